//! Handlers for the `questions` command group.

use std::fs;
use std::path::Path;

use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::command::QuestionsCommand;
use crate::adapter::inbound::cli::output;
use crate::application::catalog::QuizCatalog;
use crate::domain::Question;
use crate::error::Result;

const PREVIEW_CHARS: usize = 48;

#[derive(Tabled)]
struct QuestionRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Topic")]
    topic: String,
    #[tabled(rename = "Question")]
    question: String,
    #[tabled(rename = "Answer")]
    answer: String,
}

impl QuestionRow {
    fn new(index: usize, question: &Question) -> Self {
        Self {
            index,
            topic: question.topic.clone(),
            question: preview(&question.question),
            answer: question
                .options
                .get(question.correct)
                .cloned()
                .unwrap_or_else(|| "?".to_string()),
        }
    }
}

fn preview(text: &str) -> String {
    if text.chars().count() <= PREVIEW_CHARS {
        return text.to_string();
    }
    let mut short: String = text.chars().take(PREVIEW_CHARS - 1).collect();
    short.push('…');
    short
}

pub async fn execute(catalog: &QuizCatalog, command: &QuestionsCommand) -> Result<()> {
    match command {
        QuestionsCommand::List => list(catalog).await,
        QuestionsCommand::Delete { index } => {
            let removed = catalog.delete_question(*index).await?;
            output::report(
                "questions.delete",
                json!({ "index": index, "question": removed }),
                &format!("Deleted question {index}"),
            );
            output::note(&removed.question);
            Ok(())
        }
        QuestionsCommand::Sort => {
            catalog.sort_questions_by_topic().await?;
            output::report("questions.sort", json!({}), "Sorted questions by topic");
            Ok(())
        }
        QuestionsCommand::Reset => {
            let count = catalog.reset_questions().await?;
            output::report(
                "questions.reset",
                json!({ "count": count }),
                &format!("Restored {count} built-in questions"),
            );
            Ok(())
        }
        QuestionsCommand::Clear => {
            catalog.clear_questions().await?;
            output::report("questions.clear", json!({}), "Removed all questions");
            Ok(())
        }
        QuestionsCommand::Export { output: path } => export(catalog, path.as_deref()).await,
        QuestionsCommand::Import { file } => {
            let content = fs::read_to_string(file)?;
            let count = catalog.import_questions(&content).await?;
            output::report(
                "questions.import",
                json!({ "count": count }),
                &format!("Imported {count} questions"),
            );
            Ok(())
        }
    }
}

async fn list(catalog: &QuizCatalog) -> Result<()> {
    let questions = catalog.questions().await;

    if output::is_json() {
        output::json("questions.list", json!({ "questions": questions }));
        return Ok(());
    }

    output::section(&format!("Questions ({})", questions.len()));
    if questions.is_empty() {
        output::note("(no questions yet)");
        output::hint(&format!(
            "run {} to load the built-in bank",
            output::highlight("quizstore questions reset")
        ));
        return Ok(());
    }
    let rows = questions
        .iter()
        .enumerate()
        .map(|(index, q)| QuestionRow::new(index, q));
    output::table(&Table::new(rows).to_string());
    Ok(())
}

async fn export(catalog: &QuizCatalog, path: Option<&Path>) -> Result<()> {
    let exported = catalog.export_questions().await?;
    let Some(path) = path else {
        output::document(&exported);
        return Ok(());
    };

    fs::write(path, &exported)?;
    output::report(
        "questions.export",
        json!({ "path": path.display().to_string() }),
        "Exported questions",
    );
    output::field("Path", path.display());
    Ok(())
}
