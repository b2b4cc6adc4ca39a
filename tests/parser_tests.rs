use mark0::grade::{
    NO_FEEDBACK,
    parser::{parse, try_parse},
};

#[test]
fn labelled_score_wins_over_other_numbers() {
    let result = parse("Score: 7\nFeedback: Covers 42 of the key points.", 10.0);
    assert_eq!(result.score(), 7.0);
    assert_eq!(result.feedback(), "Covers 42 of the key points.");
}

#[test]
fn bare_number_is_used_without_a_label() {
    let result = parse("I would award 6 marks for this answer.", 10.0);
    assert_eq!(result.score(), 6.0);
    assert_eq!(result.feedback(), NO_FEEDBACK);
}

#[test]
fn no_number_scores_zero() {
    let result = parse("This answer misses the point entirely.", 10.0);
    assert_eq!(result.score(), 0.0);
}

#[test]
fn scores_are_clamped_to_max_marks() {
    let result = parse("Score: 99\nFeedback: Generous.", 10.0);
    assert_eq!(result.score(), 10.0);
    assert_eq!(result.max_marks(), 10.0);
}

#[test]
fn labels_are_case_insensitive_and_feedback_spans_lines() {
    let result = parse("score : 3.5\nfeedback:\nFirst line.\nSecond line.", 5.0);
    assert_eq!(result.score(), 3.5);
    assert_eq!(result.feedback(), "First line.\nSecond line.");
}

#[test]
fn blank_feedback_section_falls_back_to_default() {
    let result = parse("Score: 2\nFeedback:   ", 5.0);
    assert_eq!(result.score(), 2.0);
    assert_eq!(result.feedback(), NO_FEEDBACK);
}

#[test]
fn labelled_zero_is_not_replaced_by_a_later_number() {
    let result = parse("Score: 0\nFeedback: Mentions 3 unrelated facts.", 5.0);
    assert_eq!(result.score(), 0.0);
}

#[test]
fn typical_response_round_trips() {
    let raw = "Rubric:\nAccuracy: 2\nCompleteness: 2\nUnderstanding: 1\nClarity: 1\nScore: \
               4.5\nFeedback: Good answer, minor omission.";
    let result = try_parse(raw, 5.0).expect("well-formed response");
    assert_eq!(result.score(), 4.5);
    assert_eq!(result.feedback(), "Good answer, minor omission.");
    assert!(!result.is_degraded());
    assert_eq!(result.to_string(), "4.5/5 - Good answer, minor omission.");
}
