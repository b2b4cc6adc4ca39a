#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! # mark0
//!
//! Command-line front end: author assessments, generate model answers, and
//! grade free-text answers.
//!
//! Provider credentials are read from `GROQ_API_KEY`, `DEEPSEEK_API_KEY` and
//! `MISTRAL_API_KEY` (a `.env` file in the working directory is honoured).
//! Without any of them, grading falls back to a basic heuristic and answer
//! generation to a built-in topic table.

use std::path::PathBuf;

use anyhow::{Context, Result};
use bpaf::*;
use colored::Colorize;
use dotenvy::dotenv;
use mark0::{
    AnswerGenerator, Grader, GradingRequest,
    assessment::{AssessmentStore, Question, Submission},
    config, plagiarism,
};
use tracing::{Level, metadata::LevelFilter};
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt};

/// Assessment authoring and attempt subcommands.
#[derive(Debug, Clone)]
enum AssessmentCmd {
    /// Create an empty assessment
    New(String),
    /// Add a question
    Add {
        /// Question text
        question:     String,
        /// Maximum marks
        marks:        u32,
        /// Model answer, if written by hand
        model_answer: Option<String>,
        /// Generate the model answer when none is given
        generate:     bool,
        /// Minimum word count, 0 for none
        word_limit:   u32,
        /// Assessment title
        title:        String,
    },
    /// Remove a question by number
    Remove(String, usize),
    /// Remove every question
    Clear(String),
    /// List assessments
    List,
    /// Show one assessment
    Show(String),
    /// Grade a set of answers
    Attempt(String, PathBuf),
}

/// Top-level CLI commands.
#[derive(Debug, Clone)]
enum Cmd {
    /// Grade a single answer
    Grade {
        /// Question text
        question:     String,
        /// Student answer
        answer:       String,
        /// Maximum marks
        marks:        u32,
        /// Model answer, if any
        model_answer: Option<String>,
    },
    /// Generate a model answer
    Generate(String),
    /// Run the plagiarism heuristic on some text
    Plagiarism(String),
    /// Assessment operations
    Assessment(AssessmentCmd),
}

/// Parse the command line arguments and return a `Cmd` enum
fn options() -> Cmd {
    /// parses the assessment title
    fn title() -> impl Parser<String> {
        positional::<String>("TITLE").help("Assessment title")
    }

    /// parses question text
    fn question() -> impl Parser<String> {
        long("question")
            .short('q')
            .help("Question text")
            .argument::<String>("TEXT")
    }

    /// parses maximum marks
    fn marks() -> impl Parser<u32> {
        long("marks")
            .short('m')
            .help("Maximum marks for the question")
            .argument::<u32>("MARKS")
    }

    /// parses an optional model answer
    fn model_answer() -> impl Parser<Option<String>> {
        long("model-answer")
            .help("Model answer to grade against")
            .argument::<String>("TEXT")
            .optional()
    }

    let grade = {
        let question = question();
        let answer = long("answer")
            .short('a')
            .help("Student answer")
            .argument::<String>("TEXT");
        let marks = marks();
        let model_answer = model_answer();
        construct!(Cmd::Grade {
            question,
            answer,
            marks,
            model_answer
        })
        .to_options()
        .command("grade")
        .help("Grade a single answer")
    };

    let generate = {
        let question = positional::<String>("QUESTION").help("Question to answer");
        construct!(Cmd::Generate(question))
    }
    .to_options()
    .command("generate")
    .help("Generate a model answer for a question");

    let plagiarism = {
        let text = positional::<String>("TEXT").help("Text to check");
        construct!(Cmd::Plagiarism(text))
    }
    .to_options()
    .command("plagiarism")
    .help("Check text for signs of copying");

    let new = construct!(AssessmentCmd::New(title()))
        .to_options()
        .command("new")
        .help("Create an empty assessment");

    let add = {
        let question = question();
        let marks = marks();
        let model_answer = model_answer();
        let generate = long("generate")
            .short('g')
            .help("Generate the model answer when none is given")
            .switch();
        let word_limit = long("word-limit")
            .short('w')
            .help("Minimum word count for answers (0 = no limit)")
            .argument::<u32>("WORDS")
            .fallback(0);
        let title = title();
        construct!(AssessmentCmd::Add {
            question,
            marks,
            model_answer,
            generate,
            word_limit,
            title
        })
        .to_options()
        .command("add")
        .help("Add a question to an assessment, creating it if needed")
    };

    let remove = {
        let title = title();
        let number = positional::<usize>("NUMBER").help("Question number, starting at 1");
        construct!(AssessmentCmd::Remove(title, number))
    }
    .to_options()
    .command("remove")
    .help("Remove a question");

    let clear = construct!(AssessmentCmd::Clear(title()))
        .to_options()
        .command("clear")
        .help("Remove every question from an assessment");

    let list = pure(AssessmentCmd::List)
        .to_options()
        .command("list")
        .help("List assessments");

    let show = construct!(AssessmentCmd::Show(title()))
        .to_options()
        .command("show")
        .help("Show the questions of an assessment");

    let attempt = {
        let title = title();
        let answers = positional::<PathBuf>("ANSWERS").help("JSON array of answers, in question order");
        construct!(AssessmentCmd::Attempt(title, answers))
    }
    .to_options()
    .command("attempt")
    .help("Grade a set of answers to an assessment");

    let assessment = construct!([new, add, remove, clear, list, show, attempt])
        .to_options()
        .command("assessment")
        .help("Author and attempt assessments")
        .map(Cmd::Assessment);

    let cmd = construct!([grade, generate, plagiarism, assessment]);

    cmd.to_options()
        .descr("Assessment authoring and AI-assisted grading")
        .run()
}

/// Runs an assessment subcommand against the configured store.
async fn run_assessment(cmd: AssessmentCmd, store_path: PathBuf) -> Result<()> {
    let mut store = AssessmentStore::load(store_path)?;

    match cmd {
        AssessmentCmd::New(title) => {
            store.get_or_create(&title)?;
            store.save()?;
            println!("Created assessment `{}` in {}", title.trim(), store.path().display());
        }
        AssessmentCmd::Add {
            question,
            marks,
            model_answer,
            generate,
            word_limit,
            title,
        } => {
            let model_answer = match model_answer {
                Some(answer) => answer,
                None if generate => {
                    let generated = AnswerGenerator::from_config()?.generate(&question).await;
                    tracing::info!("Model answer from {:?}", generated.source);
                    generated.text
                }
                None => String::new(),
            };

            let question = Question::builder()
                .text(question)
                .marks(marks)
                .model_answer(model_answer)
                .word_limit(word_limit)
                .build();

            let assessment = store.get_or_create(&title)?;
            assessment.add_question(question)?;
            let (count, total) = (assessment.questions.len(), assessment.total_marks);
            store.save()?;
            println!("Question submitted. `{}` now has {count} questions, {total} marks.", title.trim());
        }
        AssessmentCmd::Remove(title, number) => {
            let removed = store.get_mut(&title)?.remove_question(number)?;
            store.save()?;
            println!("Removed question {number} ({} marks)", removed.marks);
        }
        AssessmentCmd::Clear(title) => {
            store.get_mut(&title)?.clear();
            store.save()?;
            println!("Cleared `{title}`");
        }
        AssessmentCmd::List => {
            let mut any = false;
            for assessment in store.assessments() {
                any = true;
                println!(
                    "{}: {} questions, {} marks",
                    assessment.title.bold(),
                    assessment.questions.len(),
                    assessment.total_marks
                );
            }
            if !any {
                println!("No assessments are currently available in {}.", store.path().display());
            }
        }
        AssessmentCmd::Show(title) => {
            let assessment = store.get(&title)?;
            println!("{} ({} marks)", assessment.title.bold(), assessment.total_marks);
            for (i, question) in assessment.questions.iter().enumerate() {
                println!("\n{} ({} marks)", format!("Question {}", i + 1).bold(), question.marks);
                println!("{}", question.text);
                if question.word_limit > 0 {
                    println!("Minimum word limit: {} words", question.word_limit);
                }
                if question.model_answer.is_empty() {
                    println!("{} Not provided", "Model answer:".dimmed());
                } else {
                    println!("{} {}", "Model answer:".dimmed(), question.model_answer);
                }
            }
        }
        AssessmentCmd::Attempt(title, answers_path) => {
            let raw = std::fs::read_to_string(&answers_path)
                .with_context(|| format!("Could not read {}", answers_path.display()))?;
            let answers: Vec<String> = serde_json::from_str(&raw).with_context(|| {
                format!("{} must be a JSON array of strings", answers_path.display())
            })?;

            let assessment = store.get(&title)?;
            let submission = Submission::new(assessment, answers)?;
            let report = submission.grade(&Grader::from_config()?).await;
            println!("{}", report.render());
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let fmt = fmt::layer()
        .without_time()
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);
    let filter_layer = LevelFilter::from_level(Level::INFO);
    tracing_subscriber::registry()
        .with(fmt)
        .with(filter_layer)
        .init();

    let cmd = options();
    let cfg = config::ensure_initialized()?;

    match cmd {
        Cmd::Grade {
            question,
            answer,
            marks,
            model_answer,
        } => {
            let request = GradingRequest::builder()
                .question(question)
                .model_answer(model_answer.unwrap_or_default())
                .student_answer(answer)
                .max_marks(marks as f64)
                .build();
            let result = Grader::from_config()?.grade(&request).await;
            println!("{} {:.1}/{}", "Score:".bold(), result.score(), result.max_marks());
            println!("{} {}", "Feedback:".bold(), result.feedback());
        }
        Cmd::Generate(question) => {
            let answer = AnswerGenerator::from_config()?.generate(&question).await;
            tracing::info!("Model answer from {:?}", answer.source);
            println!("{}", answer.text);
        }
        Cmd::Plagiarism(text) => {
            let report = plagiarism::check(&text);
            println!("{}", plagiarism::explanation(&report));
        }
        Cmd::Assessment(assessment_cmd) => {
            run_assessment(assessment_cmd, cfg.store_path().clone()).await?;
        }
    };

    Ok(())
}
