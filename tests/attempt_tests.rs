mod support;

use mark0::{
    Grader,
    assessment::{Assessment, Question, Standing, Submission, SubmissionError},
};
use support::{Behaviour, Scripted, chain};

fn physics() -> Assessment {
    let mut assessment = Assessment::new("Physics").expect("assessment");
    assessment
        .add_question(
            Question::builder()
                .text("Define gravity")
                .marks(5)
                .model_answer("Gravity is the force by which masses attract each other.")
                .build(),
        )
        .expect("add");
    assessment
        .add_question(
            Question::builder()
                .text("State Newton's first law")
                .marks(5)
                .word_limit(3)
                .build(),
        )
        .expect("add");
    assessment
}

fn answers(texts: &[&str]) -> Vec<String> {
    texts.iter().map(|t| t.to_string()).collect()
}

#[test]
fn answer_count_must_match() {
    let assessment = physics();
    let err = Submission::new(&assessment, answers(&["only one"])).unwrap_err();
    assert_eq!(err, SubmissionError::AnswerCount { expected: 2, got: 1 });
}

#[test]
fn blank_answers_are_listed() {
    let assessment = physics();
    let err = Submission::new(&assessment, answers(&["Masses attract.", "  "])).unwrap_err();
    assert_eq!(err, SubmissionError::Unanswered(vec![2]));
    assert!(err.to_string().contains("question(s): 2"));
}

#[test]
fn word_limits_are_enforced() {
    let assessment = physics();
    let err = Submission::new(&assessment, answers(&["Masses attract.", "Inertia."])).unwrap_err();
    assert_eq!(err, SubmissionError::BelowWordLimit(vec![(2, 3)]));
    assert!(err.to_string().contains("Q2 (min 3 words)"));
}

#[tokio::test]
async fn results_are_attributed_to_their_questions() {
    let assessment = physics();
    let grader_double = Scripted::new(
        "scripted",
        Behaviour::ReplyWhen(vec![
            ("Define gravity", "Score: 4\nFeedback: Accurate definition."),
            ("Newton's first law", "Score: 2\nFeedback: Incomplete statement."),
        ]),
    );
    let grader = Grader::new(chain(&[&grader_double]));

    let submission = Submission::new(
        &assessment,
        answers(&[
            "Masses attract each other.",
            "Objects keep moving unless acted upon.",
        ]),
    )
    .expect("valid submission");
    let report = submission.grade(&grader).await;

    assert_eq!(grader_double.calls(), 2);
    assert_eq!(report.outcomes.len(), 2);
    assert_eq!(report.outcomes[0].number, 1);
    assert_eq!(report.outcomes[0].final_score, 4.0);
    assert_eq!(report.outcomes[0].feedback, "Accurate definition.");
    assert_eq!(report.outcomes[1].number, 2);
    assert_eq!(report.outcomes[1].final_score, 2.0);
    assert_eq!(report.total_score, 6.0);
    assert_eq!(report.total_marks, 10);
    assert_eq!(report.percentage(), 60.0);
    assert_eq!(report.standing(), Standing::Good);

    let rendered = report.render();
    assert!(rendered.contains("Assessment: Physics"));
    assert!(rendered.contains("Good work!"));
}

#[tokio::test]
async fn plagiarism_is_reported_without_penalty() {
    let assessment = physics();
    let grader_double = Scripted::replying("scripted", "Score: 5\nFeedback: Full marks.");
    let grader = Grader::new(chain(&[&grader_double]));

    let submission = Submission::new(
        &assessment,
        answers(&[
            "According to Wikipedia, gravity is copied from somewhere.",
            "An object stays at rest or in uniform motion.",
        ]),
    )
    .expect("valid submission");
    let report = submission.grade(&grader).await;

    assert!(report.outcomes[0].plagiarism.percentage > 0);
    assert_eq!(report.outcomes[0].final_score, report.outcomes[0].graded_score);
    assert_eq!(report.standing(), Standing::Excellent);
}

#[test]
fn standing_bands() {
    assert_eq!(Standing::from_percentage(80.0), Standing::Excellent);
    assert_eq!(Standing::from_percentage(79.9), Standing::Good);
    assert_eq!(Standing::from_percentage(60.0), Standing::Good);
    assert_eq!(Standing::from_percentage(59.9), Standing::NeedsImprovement);
}
