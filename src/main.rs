//! src/main.rs
//! ============================================================================
//! # Knowledge-Base Admin Console Entry Point
//!
//! Line-oriented driver for the console core: stdin lines are parsed into
//! commands, the controller runs on the main task, and each published
//! snapshot is rendered to stdout as plain text.

use std::sync::Arc;

use anyhow::Result;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    signal,
    sync::mpsc::UnboundedSender,
};
use tracing::{info, warn};

use kb_console::{
    Logger,
    api::{client::HttpApi, types::TextDraft},
    config::config::Config,
    controller::{
        commands::{Command, DeleteTarget},
        coordinator::Mutation,
        event_loop::{ConsoleHandles, Controller},
    },
    view::console,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging first
    Logger::init_tracing();
    info!("Starting knowledge-base admin console");

    // Load configuration
    let config: Arc<Config> = Arc::new(Config::load().await.unwrap_or_else(|e| {
        warn!("Failed to load config, using defaults: {}", e);
        Config::default()
    }));

    let api = HttpApi::new(config.base_url.clone(), config.request_timeout);
    let (mut controller, handles) = Controller::new(api, config);
    let ConsoleHandles {
        commands,
        mut snapshots,
    } = handles;

    // Render each published snapshot to stdout
    tokio::spawn(async move {
        while let Some(snap) = snapshots.recv().await {
            print!("{}", console::render(&snap));
        }
    });

    spawn_stdin_reader(commands.clone());
    spawn_shutdown_handler(commands.clone());
    drop(commands);

    // The controller runs on the main task; it owns all state.
    controller.bootstrap().await;
    controller.run().await?;

    info!("Application exited cleanly");
    Ok(())
}

/// Parse stdin lines into commands until EOF, then quit.
fn spawn_stdin_reader(tx: UnboundedSender<Command>) {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            match parse_command(&line) {
                Some(cmd) => {
                    if tx.send(cmd).is_err() {
                        break;
                    }
                }
                None => {
                    if !line.trim().is_empty() {
                        eprintln!("unrecognized command: {line}");
                    }
                }
            }
        }
        let _ = tx.send(Command::Quit);
    });
}

/// Translate Ctrl+C into a clean quit.
fn spawn_shutdown_handler(tx: UnboundedSender<Command>) {
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            info!("Received Ctrl+C signal");
            let _ = tx.send(Command::Quit);
        }
    });
}

/// Grammar, one command per line:
///
/// ```text
/// open <file_id> [name...]      home            search [text...]
/// page <n>                      size <n>        filter [text...]
/// reload                        mkcat <name>    rencat <id> <name>
/// mkfile <category_id> <name>   rmcat <id>      rmfile <id>
/// add <file_id> <q> :: <a> :: <author>
/// edit <text_id> <q> :: <a> :: <author>
/// rmtext <id>                   yes / no        dismiss         quit
/// ```
fn parse_command(line: &str) -> Option<Command> {
    let mut parts = line.trim().splitn(2, char::is_whitespace);
    let verb = parts.next()?;
    let rest = parts.next().unwrap_or("").trim();

    match verb {
        "home" => Some(Command::GoHome),
        "open" => {
            let mut args = rest.splitn(2, char::is_whitespace);
            let file_id = args.next()?.parse().ok()?;
            let file_name = args
                .next()
                .map(str::to_string)
                .unwrap_or_else(|| format!("file {file_id}"));
            Some(Command::SelectFile { file_id, file_name })
        }
        "search" => Some(Command::SearchInput(rest.to_string())),
        "page" => Some(Command::ChangePage(rest.parse().ok()?)),
        "size" => Some(Command::SetPageSize(rest.parse().ok()?)),
        "filter" => Some(Command::FilterSidebar(rest.to_string())),
        "reload" => Some(Command::ReloadHierarchy),
        "mkcat" => Some(Command::Mutate(Mutation::CreateCategory {
            name: rest.to_string(),
        })),
        "rencat" => {
            let mut args = rest.splitn(2, char::is_whitespace);
            Some(Command::Mutate(Mutation::RenameCategory {
                category_id: args.next()?.parse().ok()?,
                name: args.next()?.to_string(),
            }))
        }
        "mkfile" => {
            let mut args = rest.splitn(2, char::is_whitespace);
            Some(Command::Mutate(Mutation::CreateFile {
                category_id: args.next()?.parse().ok()?,
                name: args.next()?.to_string(),
            }))
        }
        "add" => {
            let mut args = rest.splitn(2, char::is_whitespace);
            let file_id = args.next()?.parse().ok()?;
            let draft = parse_draft(args.next()?)?;
            Some(Command::Mutate(Mutation::CreateText { file_id, draft }))
        }
        "edit" => {
            let mut args = rest.splitn(2, char::is_whitespace);
            let text_id = args.next()?.to_string();
            let draft = parse_draft(args.next()?)?;
            Some(Command::Mutate(Mutation::UpdateText { text_id, draft }))
        }
        "rmcat" => Some(Command::RequestDelete(DeleteTarget::Category {
            category_id: rest.parse().ok()?,
        })),
        "rmfile" => Some(Command::RequestDelete(DeleteTarget::File {
            file_id: rest.parse().ok()?,
        })),
        "rmtext" => Some(Command::RequestDelete(DeleteTarget::Text {
            text_id: rest.to_string(),
        })),
        "yes" => Some(Command::ConfirmDelete),
        "no" => Some(Command::CancelDelete),
        "dismiss" => Some(Command::DismissNotification),
        "quit" | "exit" => Some(Command::Quit),
        _ => None,
    }
}

/// `<question> :: <answer> :: <author>`
fn parse_draft(text: &str) -> Option<TextDraft> {
    let mut fields = text.splitn(3, "::").map(str::trim);
    Some(TextDraft {
        question: fields.next()?.to_string(),
        answer: fields.next()?.to_string(),
        text_author: fields.next()?.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_navigation_and_search() {
        assert_eq!(
            parse_command("open 9 Refund Policy"),
            Some(Command::SelectFile {
                file_id: 9,
                file_name: "Refund Policy".into()
            })
        );
        assert_eq!(parse_command("home"), Some(Command::GoHome));
        assert_eq!(
            parse_command("search reset password"),
            Some(Command::SearchInput("reset password".into()))
        );
        // clearing the query is a valid input
        assert_eq!(parse_command("search"), Some(Command::SearchInput("".into())));
        assert_eq!(parse_command("page 3"), Some(Command::ChangePage(3)));
        assert_eq!(parse_command("garbage"), None);
    }

    #[test]
    fn parses_drafts() {
        let cmd = parse_command("add 9 How do I restart? :: Hold the button. :: maria");
        assert_eq!(
            cmd,
            Some(Command::Mutate(Mutation::CreateText {
                file_id: 9,
                draft: TextDraft {
                    question: "How do I restart?".into(),
                    answer: "Hold the button.".into(),
                    text_author: "maria".into(),
                }
            }))
        );
        // missing author field is rejected before dispatch
        assert_eq!(parse_command("add 9 question :: answer"), None);
    }

    #[test]
    fn parses_delete_flow() {
        assert_eq!(
            parse_command("rmcat 4"),
            Some(Command::RequestDelete(DeleteTarget::Category {
                category_id: 4
            }))
        );
        assert_eq!(parse_command("yes"), Some(Command::ConfirmDelete));
        assert_eq!(parse_command("no"), Some(Command::CancelDelete));
    }
}
