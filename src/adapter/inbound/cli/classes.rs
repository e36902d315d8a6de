//! Handlers for the `classes` command group.

use serde_json::json;

use crate::adapter::inbound::cli::command::ClassesCommand;
use crate::adapter::inbound::cli::output;
use crate::application::catalog::QuizCatalog;
use crate::error::Result;

pub async fn execute(catalog: &QuizCatalog, command: &ClassesCommand) -> Result<()> {
    match command {
        ClassesCommand::List => list(catalog).await,
        ClassesCommand::Add { name } => {
            let name = catalog.add_class(name).await?;
            output::report(
                "classes.add",
                json!({ "name": name }),
                &format!("Added class {}", output::highlight(&name)),
            );
            Ok(())
        }
        ClassesCommand::Remove { name } => {
            catalog.remove_class(name).await?;
            output::report(
                "classes.remove",
                json!({ "name": name }),
                &format!("Removed class {}", output::highlight(name)),
            );
            Ok(())
        }
    }
}

async fn list(catalog: &QuizCatalog) -> Result<()> {
    let classes = catalog.classes().await;

    if output::is_json() {
        output::json("classes.list", json!({ "classes": classes }));
        return Ok(());
    }

    output::section("Classes");
    if classes.is_empty() {
        output::note("(no classes yet)");
        output::hint(&format!(
            "run {} to add one",
            output::highlight("quizstore classes add <name>")
        ));
        return Ok(());
    }
    for class in &classes {
        output::note(&format!("- {class}"));
    }
    Ok(())
}
