//! autodate CLI - lifecycle dates for Markdown task status edits

use anyhow::{Context, Result};
use autodate::cli::display::{PlannedOperation, display_plan, error, success};
use autodate::cli::{Cli, Commands};
use autodate::editor::{Document, FilterOutcome, Transaction};
use autodate::manager::{AutoDateManager, apply_date_operations, plan_date_operations};
use autodate::settings::Settings;
use chrono::Local;
use clap::Parser;
use std::io::Write;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();

    let cli = Cli::parse();

    let result = run(cli);

    if let Err(e) = &result {
        error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::SetStatus {
            file,
            line,
            status,
            now,
            write,
        } => {
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let tr = Transaction::set_task_status(Document::new(content), line, status)?;

            let now = now.unwrap_or_else(|| Local::now().naive_local());
            let manager = AutoDateManager::new(settings);
            let updated = match manager.filter_at(&tr, now) {
                FilterOutcome::Amended(spec) => spec.apply()?,
                FilterOutcome::PassThrough => {
                    log::debug!("No date changes for line {}", line);
                    tr.new_doc().text().to_string()
                }
            };

            if write {
                std::fs::write(&file, &updated)
                    .with_context(|| format!("Failed to write {}", file.display()))?;
                success(&format!("Updated line {} of {}", line, file.display()));
            } else {
                let doc = Document::new(updated);
                let task = doc
                    .line(line)
                    .with_context(|| format!("Line {} disappeared after the edit", line))?;
                println!("{}", task.text);
            }
        }

        Commands::Plan { from, to, line } => {
            if !settings.auto_date_manager.enabled {
                log::info!("Date management is disabled in the settings.");
                return Ok(());
            }

            let statuses = &settings.task_statuses;
            let operations = plan_date_operations(from, to, &settings, &line);

            let tr = Transaction::new(Document::new(line.as_str()), vec![])?;
            let now = Local::now().naive_local();
            let (preview, mut insert_offsets) =
                match apply_date_operations(&tr, 1, &operations, &settings, now) {
                    FilterOutcome::Amended(spec) => {
                        let offsets: Vec<usize> = spec
                            .follow_up
                            .iter()
                            .filter(|c| c.from == c.to)
                            .map(|c| c.from)
                            .collect();
                        (spec.apply()?, offsets.into_iter())
                    }
                    FilterOutcome::PassThrough => (line.clone(), Vec::new().into_iter()),
                };

            let planned: Vec<PlannedOperation> = operations
                .into_iter()
                .map(|operation| {
                    let offset = if operation.is_add() {
                        insert_offsets.next()
                    } else {
                        None
                    };
                    PlannedOperation { operation, offset }
                })
                .collect();

            display_plan(
                statuses.classify(from),
                statuses.classify(to),
                &planned,
                &preview,
            );
        }
    }

    Ok(())
}
