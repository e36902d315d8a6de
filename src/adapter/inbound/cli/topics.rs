//! Handlers for the `topics` command group.

use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::command::TopicsCommand;
use crate::adapter::inbound::cli::output;
use crate::application::catalog::QuizCatalog;
use crate::error::Result;

#[derive(Tabled)]
struct TopicRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Description")]
    description: String,
}

pub async fn execute(catalog: &QuizCatalog, command: &TopicsCommand) -> Result<()> {
    match command {
        TopicsCommand::List => list(catalog).await,
        TopicsCommand::Add { name, description } => {
            let topic = catalog.add_topic(name, description).await?;
            output::report(
                "topics.add",
                json!({ "topic": topic }),
                &format!("Added topic {}", output::highlight(&topic.name)),
            );
            Ok(())
        }
    }
}

async fn list(catalog: &QuizCatalog) -> Result<()> {
    let topics = catalog.topics().await;

    if output::is_json() {
        output::json("topics.list", json!({ "topics": topics }));
        return Ok(());
    }

    output::section("Topics");
    let rows = topics.into_iter().map(|t| TopicRow {
        name: t.name,
        description: t.description,
    });
    output::table(&Table::new(rows).to_string());
    Ok(())
}
