//! One-shot subcommands

use anyhow::{bail, Context, Result};
use secrecy::SecretString;
use tracing::debug;

use crate::cli::args::Command;
use crate::cli::render::{render_list, render_notification, render_report};
use crate::dispatch::action::ActionKind;
use crate::shell::console::Console;

fn flush_notifications(console: &mut Console) -> bool {
    let mut failed = false;
    for notification in console.drain_notifications() {
        failed |= notification.is_error();
        eprintln!("{}", render_notification(&notification));
    }
    failed
}

/// Run a subcommand that talks to the backend.
///
/// Returns `Ok(false)` when the operator was shown an error.
pub async fn execute(console: &mut Console, command: Command) -> Result<bool> {
    match command {
        Command::List => {
            console.refresh().await;
            if !flush_notifications(console) {
                print!("{}", render_list(&console.microservices(), &console.busy()));
            }
        }
        Command::Show { id } => {
            let code = console.cache().fetch_code(&id).await?;
            println!("# {} (roble: {})", code.name, code.is_roble);
            println!("{}", code.code);
        }
        Command::Create {
            name,
            code_file,
            plain,
        } => {
            let editor = console.editor_mut();
            editor.set_roble(!plain);
            editor.set_name(name);
            if let Some(path) = code_file {
                let code = tokio::fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("reading {}", path.display()))?;
                editor.set_code(code);
            }
            console.publish().await;
            if !flush_notifications(console) {
                print!("{}", render_list(&console.microservices(), &console.busy()));
            }
        }
        Command::Update {
            id,
            name,
            code_file,
            roble,
        } => {
            console.begin_edit(&id).await;
            if console.editor().loaded_for() != Some(id.as_str()) {
                debug!("Preload of {} failed, not updating", id);
                flush_notifications(console);
                return Ok(false);
            }
            let editor = console.editor_mut();
            if let Some(name) = name {
                editor.set_name(name);
            }
            if let Some(path) = code_file {
                let code = tokio::fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("reading {}", path.display()))?;
                editor.set_code(code);
            }
            if let Some(roble) = roble {
                editor.set_roble(roble);
            }
            console.publish().await;
            if !flush_notifications(console) {
                print!("{}", render_list(&console.microservices(), &console.busy()));
            }
        }
        Command::Restart { id } => return run_action(console, &id, ActionKind::Restart).await,
        Command::Stop { id } => return run_action(console, &id, ActionKind::Stop).await,
        Command::Delete { id } => return run_action(console, &id, ActionKind::Delete).await,
        Command::Test {
            id,
            payload,
            payload_file,
            project_id,
            token,
        } => {
            console.refresh().await;
            let payload = match payload_file {
                Some(path) => tokio::fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("reading {}", path.display()))?,
                None => payload,
            };
            let panel = console.test_panel_mut();
            panel.select(id);
            panel.set_payload(payload);
            panel.set_project_id(project_id);
            panel.set_token(token.map(SecretString::from));

            let report = console.run_test().await;
            let failed = flush_notifications(console);
            if let Some(report) = report {
                println!("{}", render_report(&report));
            }
            return Ok(!failed);
        }
        Command::Shell | Command::Config { .. } | Command::Version => {
            bail!("not a backend command")
        }
    }

    Ok(!flush_notifications(console))
}

async fn run_action(console: &mut Console, id: &str, action: ActionKind) -> Result<bool> {
    console.refresh().await;
    let ticket = console.dispatch(id, action).await;
    let failed = flush_notifications(console);
    if let Some(ticket) = ticket {
        eprintln!("waiting for the backend to settle...");
        ticket.settled().await;
        print!("{}", render_list(&console.microservices(), &console.busy()));
    }
    Ok(!failed)
}
