//! Chat frontends: one-shot `ecfr ask` and the interactive `ecfr chat`.
//!
//! Both drive a [`ChatSession`] through the configured classifier. The
//! interactive loop reads one message per line from stdin; lines starting
//! with `/` are commands:
//!
//! | Command | Effect |
//! |---------|--------|
//! | `/agency <name>` | switch facet (`/agency` alone resets to `All`) |
//! | `/agencies` | list facets |
//! | `/history` | print the session so far |
//! | `/quit` | exit |

use anyhow::Result;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

use ecfr_explorer_core::classify::Classifier;
use ecfr_explorer_core::models::{ChatMessage, Role};
use ecfr_explorer_core::session::ChatSession;

use crate::catalog::Catalog;

/// Send a single message and print the reply.
pub async fn run_ask(
    catalog: &Catalog,
    classifier: &dyn Classifier,
    text: &str,
    agency: Option<&str>,
) -> Result<()> {
    let facet = catalog.resolve_facet(agency)?;
    let mut session = ChatSession::new(facet);
    let reply = session.send(classifier, text).await?;
    println!("{}", reply.content);
    Ok(())
}

/// Interactive session over stdin until EOF or `/quit`.
pub async fn run_chat(
    catalog: &Catalog,
    classifier: &dyn Classifier,
    agency: Option<&str>,
) -> Result<()> {
    let interactive = atty::is(atty::Stream::Stdin);
    let mut session = ChatSession::new(catalog.resolve_facet(agency)?);
    tracing::info!(session = %session.id, classifier = classifier.name(), "chat session started");

    if let Some(welcome) = session.last_message() {
        print_message(welcome);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        if interactive {
            print!("[{}] > ", session.facet());
            std::io::stdout().flush()?;
        }

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let flow = match line.strip_prefix('/') {
            Some(command) => handle_command(catalog, &mut session, command),
            None => {
                if interactive {
                    eprintln!("Thinking...");
                }
                exchange(classifier, &mut session, line).await
            }
        };
        if let Flow::Quit = flow {
            break;
        }
    }

    tracing::info!(
        session = %session.id,
        messages = session.messages().len(),
        "chat session ended"
    );
    Ok(())
}

enum Flow {
    Continue,
    Quit,
}

/// One chat turn. A failed reply is reported and the session stays open.
async fn exchange(classifier: &dyn Classifier, session: &mut ChatSession, text: &str) -> Flow {
    let id = session.id;
    match session.send(classifier, text).await {
        Ok(reply) => print_message(reply),
        Err(e) => {
            tracing::warn!(session = %id, error = %e, "no reply");
            println!("{}", e);
        }
    }
    Flow::Continue
}

fn handle_command(catalog: &Catalog, session: &mut ChatSession, command: &str) -> Flow {
    let (name, arg) = match command.split_once(' ') {
        Some((name, arg)) => (name, Some(arg.trim()).filter(|a| !a.is_empty())),
        None => (command, None),
    };

    match name {
        "quit" | "exit" => return Flow::Quit,
        "agency" => match catalog.resolve_facet(arg) {
            Ok(facet) => {
                println!("Agency set to {}.", facet);
                session.set_facet(facet);
            }
            Err(e) => println!("{}", e),
        },
        "agencies" => {
            for facet in catalog.facets() {
                println!("  {}", facet);
            }
        }
        "history" => {
            for message in session.messages() {
                print_message(message);
            }
        }
        other => println!("Unknown command: /{}", other),
    }
    Flow::Continue
}

fn print_message(message: &ChatMessage) {
    let label = match message.role {
        Role::System => "system",
        Role::User => "you",
        Role::Assistant => "assistant",
    };
    println!("{}: {}", label, message.content);
}
