//! Interactive chat session
//!
//! A rustyline REPL over the chat store and the streaming session. Plain
//! input is sent to the simulated assistant; slash commands map onto the
//! store's management operations. Ctrl-C during a reply stops the stream
//! and keeps whatever text had accumulated.

use crate::commands::{open_storage, resolve_chat_id};
use crate::config::Config;
use crate::error::Result;
use crate::session::{StreamingSession, TypingDelays};
use crate::store::{ChatStore, Role};
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::Write;
use std::sync::{Arc, Mutex};

/// Slash commands understood by the REPL
#[derive(Debug, Clone, PartialEq, Eq)]
enum SlashCommand {
    Help,
    New,
    List,
    Switch(String),
    Rename(String),
    Delete,
    Quit,
    Unknown(String),
}

/// Parse a slash command from an input line
///
/// Returns `None` when the line is a plain chat message.
fn parse_slash_command(line: &str) -> Option<SlashCommand> {
    let trimmed = line.trim();
    if !trimmed.starts_with('/') {
        return None;
    }
    let (command, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (trimmed, ""),
    };
    Some(match command {
        "/help" => SlashCommand::Help,
        "/new" => SlashCommand::New,
        "/list" => SlashCommand::List,
        "/switch" => SlashCommand::Switch(rest.to_string()),
        "/rename" => SlashCommand::Rename(rest.to_string()),
        "/delete" => SlashCommand::Delete,
        "/quit" | "/exit" => SlashCommand::Quit,
        other => SlashCommand::Unknown(other.to_string()),
    })
}

fn print_help() {
    println!();
    println!("  {}            send everything else as a message", "<text>".bold());
    println!("  {}             show this help", "/help".cyan());
    println!("  {}              start a new chat", "/new".cyan());
    println!("  {}             list chats", "/list".cyan());
    println!("  {}      switch to another chat", "/switch <id>".cyan());
    println!("  {}   rename the current chat", "/rename <title>".cyan());
    println!("  {}           delete the current chat", "/delete".cyan());
    println!("  {}             leave", "/quit".cyan());
    println!();
    println!("  Ctrl-C while the assistant is typing stops the reply.");
    println!();
}

fn print_chat_list(store: &ChatStore) {
    println!();
    for chat in store.chats() {
        let id_short = &chat.id[..8.min(chat.id.len())];
        let marker = if store.current_chat_id() == Some(chat.id.as_str()) {
            "*".green().to_string()
        } else {
            " ".to_string()
        };
        println!(
            "  {} {}  {} ({} messages)",
            marker,
            id_short.cyan(),
            chat.title,
            chat.messages.len()
        );
    }
    println!();
}

fn print_thread(store: &ChatStore) {
    let Some(chat) = store.active_chat() else {
        return;
    };
    println!("\n{}\n", chat.title.bold());
    for message in &chat.messages {
        match message.role {
            Role::User => println!("{} {}", ">".cyan().bold(), message.content),
            Role::Assistant => println!("{}\n", message.content),
        }
    }
}

/// Lock the shared store, recovering from a poisoned mutex
fn lock(store: &Arc<Mutex<ChatStore>>) -> std::sync::MutexGuard<'_, ChatStore> {
    store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Run the interactive chat session
pub async fn run_chat(config: Config) -> Result<()> {
    let store = Arc::new(Mutex::new(ChatStore::load(open_storage(&config)?)));
    let delays = TypingDelays::new(
        config.typing.first_chunk_delay_ms,
        config.typing.min_chunk_delay_ms,
        config.typing.max_chunk_delay_ms,
    );
    let session = StreamingSession::new(
        Arc::clone(&store),
        config.reply.text.clone(),
        Arc::new(delays),
    );

    println!(
        "{} Type a message, {} for commands.",
        "banter".bold(),
        "/help".cyan()
    );
    print_thread(&lock(&store));

    let mut editor = DefaultEditor::new()?;
    loop {
        let prompt = {
            let store = lock(&store);
            match store.active_chat() {
                Some(chat) => format!("{} > ", chat.title),
                None => "> ".to_string(),
            }
        };

        let line = match editor.readline(&prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        if line.trim().is_empty() {
            continue;
        }
        let _ = editor.add_history_entry(&line);

        match parse_slash_command(&line) {
            Some(SlashCommand::Help) => print_help(),
            Some(SlashCommand::New) => {
                lock(&store).create_chat();
            }
            Some(SlashCommand::List) => print_chat_list(&lock(&store)),
            Some(SlashCommand::Switch(id)) => {
                let mut store = lock(&store);
                match resolve_chat_id(store.chats(), &id) {
                    Some(chat_id) => {
                        store.select_chat(&chat_id);
                        print_thread(&store);
                    }
                    None => println!("{}", format!("No chat matches '{}'", id).yellow()),
                }
            }
            Some(SlashCommand::Rename(title)) => {
                let mut store = lock(&store);
                if let Some(chat_id) = store.current_chat_id().map(String::from) {
                    store.rename_chat(&chat_id, &title);
                }
            }
            Some(SlashCommand::Delete) => {
                let mut store = lock(&store);
                if let Some(chat_id) = store.current_chat_id().map(String::from) {
                    store.delete_chat(&chat_id);
                }
                if store.chats().is_empty() {
                    store.create_chat();
                }
            }
            Some(SlashCommand::Quit) => break,
            Some(SlashCommand::Unknown(command)) => {
                println!(
                    "{}",
                    format!("Unknown command '{}', try /help", command).yellow()
                );
            }
            None => {
                if let Some(handle) = session.send_message(&line) {
                    stream_reply(&session).await?;
                    handle.await.ok();
                }
            }
        }
    }

    println!("bye");
    Ok(())
}

/// Print the streaming reply as it accumulates
///
/// Follows the published snapshot, printing only the newly appended text
/// on each chunk boundary. Ctrl-C cancels the stream; the session flushes
/// the partial reply before this function returns.
async fn stream_reply(session: &StreamingSession) -> Result<()> {
    let mut rx = session.subscribe();
    let mut printed = 0;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                session.stop_streaming();
            }
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = rx.borrow_and_update().clone();
                if snapshot.content.len() > printed {
                    print!("{}", &snapshot.content[printed..]);
                    std::io::stdout().flush()?;
                    printed = snapshot.content.len();
                }
                if !snapshot.streaming {
                    break;
                }
            }
        }
    }

    println!("\n");
    Ok(())
}
