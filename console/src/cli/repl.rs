//! Interactive line-oriented console

use std::io::Write;

use secrecy::SecretString;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader, Lines};
use tracing::debug;

use crate::cli::render::{render_editor, render_list, render_notification, render_report};
use crate::dispatch::action::ActionKind;
use crate::shell::console::Console;
use crate::shell::state::Tab;

const HELP: &str = "\
views:   tab author|list|test   list   refresh   busy
author:  new   edit <id>   cancel   name <text>   roble on|off
         code (end with a line holding a single '.')   load <file>   form   publish
actions: restart <id>   stop <id>   delete <id>
test:    running   select <id>   payload <json>   project <id>   token <token>   send
other:   help   quit";

/// One parsed line of input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    Quit,
    Tab(Tab),
    List,
    Refresh,
    Busy,
    New,
    Edit(String),
    Cancel,
    Name(String),
    Roble(bool),
    Code,
    Load(String),
    Form,
    Publish,
    Action(ActionKind, String),
    Running,
    Select(String),
    Payload(String),
    Project(String),
    Token(String),
    Send,
}

/// Parse one input line; `Ok(None)` for blank lines
pub fn parse_line(line: &str) -> Result<Option<ReplCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let required = |what: &str| -> Result<String, String> {
        if rest.is_empty() {
            Err(format!("'{}' needs {}", word, what))
        } else {
            Ok(rest.to_string())
        }
    };

    let command = match word {
        "help" | "?" => ReplCommand::Help,
        "quit" | "exit" => ReplCommand::Quit,
        "tab" => ReplCommand::Tab(required("a tab name")?.parse()?),
        "list" | "ls" => ReplCommand::List,
        "refresh" => ReplCommand::Refresh,
        "busy" => ReplCommand::Busy,
        "new" => ReplCommand::New,
        "edit" => ReplCommand::Edit(required("an id")?),
        "cancel" => ReplCommand::Cancel,
        "name" => ReplCommand::Name(required("a name")?),
        "roble" => match rest {
            "on" | "true" | "yes" => ReplCommand::Roble(true),
            "off" | "false" | "no" => ReplCommand::Roble(false),
            _ => return Err("'roble' takes on or off".to_string()),
        },
        "code" => ReplCommand::Code,
        "load" => ReplCommand::Load(required("a file")?),
        "form" => ReplCommand::Form,
        "publish" | "deploy" | "save" => ReplCommand::Publish,
        "restart" | "stop" | "delete" => {
            let action: ActionKind = word.parse()?;
            ReplCommand::Action(action, required("an id")?)
        }
        "running" => ReplCommand::Running,
        "select" => ReplCommand::Select(required("an id")?),
        "payload" => ReplCommand::Payload(rest.to_string()),
        "project" => ReplCommand::Project(rest.to_string()),
        "token" => ReplCommand::Token(rest.to_string()),
        "send" | "test" => ReplCommand::Send,
        other => return Err(format!("unknown command '{}', try 'help'", other)),
    };
    Ok(Some(command))
}

fn print_notifications(console: &mut Console) {
    for notification in console.drain_notifications() {
        println!("{}", render_notification(&notification));
    }
}

/// Read a code block terminated by a line containing only `.`
async fn read_block<R>(lines: &mut Lines<BufReader<R>>) -> std::io::Result<String>
where
    R: AsyncRead + Unpin,
{
    let mut block = String::new();
    while let Some(line) = lines.next_line().await? {
        if line.trim_end() == "." {
            break;
        }
        block.push_str(&line);
        block.push('\n');
    }
    Ok(block)
}

/// Run the interactive console until `quit` or end of input
pub async fn run<R>(console: &mut Console, input: R) -> std::io::Result<()>
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(input).lines();
    println!("msconsole interactive shell, type 'help' for commands");
    console.sync().await;
    print_notifications(console);

    loop {
        print!("[{}]> ", console.shell().active_tab());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };
        debug!("Shell command: {:?}", command);

        match command {
            ReplCommand::Help => println!("{}", HELP),
            ReplCommand::Quit => break,
            ReplCommand::Tab(tab) => {
                console.select_tab(tab);
                if tab == Tab::List {
                    console.sync().await;
                }
            }
            ReplCommand::List => {
                console.select_tab(Tab::List);
                console.sync().await;
                print!("{}", render_list(&console.microservices(), &console.busy()));
            }
            ReplCommand::Refresh => {
                console.refresh().await;
                print!("{}", render_list(&console.microservices(), &console.busy()));
            }
            ReplCommand::Busy => {
                let ids = console.busy().ids();
                if ids.is_empty() {
                    println!("no actions in flight");
                } else {
                    println!("busy: {}", ids.join(", "));
                }
            }
            ReplCommand::New => {
                if console.editor().is_edit_mode() {
                    console.cancel_edit();
                }
                console.select_tab(Tab::Author);
                print!("{}", render_editor(console.editor()));
            }
            ReplCommand::Edit(id) => {
                console.begin_edit(&id).await;
                print!("{}", render_editor(console.editor()));
            }
            ReplCommand::Cancel => {
                console.cancel_edit();
                print!("{}", render_list(&console.microservices(), &console.busy()));
            }
            ReplCommand::Name(name) => console.editor_mut().set_name(name),
            ReplCommand::Roble(flag) => {
                console.editor_mut().set_roble(flag);
                print!("{}", render_editor(console.editor()));
            }
            ReplCommand::Code => {
                let code = read_block(&mut lines).await?;
                console.editor_mut().set_code(code);
            }
            ReplCommand::Load(path) => match tokio::fs::read_to_string(&path).await {
                Ok(code) => console.editor_mut().set_code(code),
                Err(e) => println!("cannot read {}: {}", path, e),
            },
            ReplCommand::Form => {
                print!("{}", render_editor(console.editor()));
                println!("{}", console.editor().code());
            }
            ReplCommand::Publish => {
                if console.publish().await.is_some() {
                    print_notifications(console);
                    print!("{}", render_list(&console.microservices(), &console.busy()));
                }
            }
            ReplCommand::Action(action, id) => {
                // Reconciliation continues in the background; dropping the ticket detaches it
                let _ = console.dispatch(&id, action).await;
            }
            ReplCommand::Running => {
                console.select_tab(Tab::Test);
                for ms in console.test_panel().selectable(console.cache()) {
                    let roble = if ms.is_roble { " (roble)" } else { "" };
                    println!("{}  {}{}", ms.id, ms.name, roble);
                }
            }
            ReplCommand::Select(id) => {
                console.select_tab(Tab::Test);
                console.test_panel_mut().select(id);
                if console.test_panel().shows_roble_fields(console.cache()) {
                    println!("Roble microservice: set 'project' (required) and 'token' (optional)");
                }
            }
            ReplCommand::Payload(payload) => console.test_panel_mut().set_payload(payload),
            ReplCommand::Project(project) => console.test_panel_mut().set_project_id(project),
            ReplCommand::Token(token) => {
                let token = (!token.is_empty()).then(|| SecretString::from(token));
                console.test_panel_mut().set_token(token);
            }
            ReplCommand::Send => {
                if let Some(report) = console.run_test().await {
                    println!("{}", render_report(&report));
                }
            }
        }

        print_notifications(console);
    }

    console.shutdown();
    Ok(())
}
