//! Chat-history management commands

use crate::cli::HistoryCommand;
use crate::commands::{open_storage, resolve_chat_id};
use crate::config::Config;
use crate::error::Result;
use crate::store::{ChatStore, Role};
use colored::Colorize;
use prettytable::{format, Table};

/// Handle history commands
pub fn handle_history(config: &Config, command: HistoryCommand) -> Result<()> {
    let mut store = ChatStore::load(open_storage(config)?);

    match command {
        HistoryCommand::List => {
            let chats = store.chats();

            let mut table = Table::new();
            table.set_format(*format::consts::FORMAT_BORDERS_ONLY);

            table.add_row(prettytable::row![
                "ID".bold(),
                "Title".bold(),
                "Messages".bold(),
                "Created".bold(),
                "".bold()
            ]);

            for chat in chats {
                let id_short = &chat.id[..8.min(chat.id.len())];
                let title = if chat.title.chars().count() > 40 {
                    let short: String = chat.title.chars().take(37).collect();
                    format!("{}...", short)
                } else {
                    chat.title.clone()
                };
                let created = chat.created_at.format("%Y-%m-%d %H:%M").to_string();
                let active = if store.current_chat_id() == Some(chat.id.as_str()) {
                    "active".green().to_string()
                } else {
                    String::new()
                };

                table.add_row(prettytable::row![
                    id_short.cyan(),
                    title,
                    chat.messages.len(),
                    created,
                    active
                ]);
            }

            println!("\nChats:");
            table.printstd();
            println!();
            println!("Use {} to open a chat.", "banter chat".cyan());
            println!();
        }
        HistoryCommand::Show { id } => {
            let Some(chat_id) = resolve_chat_id(store.chats(), &id) else {
                println!("{}", format!("No chat matches '{}'", id).yellow());
                return Ok(());
            };
            if let Some(chat) = store.chats().iter().find(|c| c.id == chat_id) {
                println!("\n{} ({})\n", chat.title.bold(), chat.id.dimmed());
                for message in &chat.messages {
                    let label = match message.role {
                        Role::User => "you".cyan().bold(),
                        Role::Assistant => "assistant".green().bold(),
                    };
                    println!("{}: {}\n", label, message.content);
                }
            }
        }
        HistoryCommand::Rename { id, title } => {
            let Some(chat_id) = resolve_chat_id(store.chats(), &id) else {
                println!("{}", format!("No chat matches '{}'", id).yellow());
                return Ok(());
            };
            store.rename_chat(&chat_id, &title);
            println!("{}", format!("Renamed chat {} to '{}'", chat_id, title.trim()).green());
        }
        HistoryCommand::Delete { id } => {
            let Some(chat_id) = resolve_chat_id(store.chats(), &id) else {
                println!("{}", format!("No chat matches '{}'", id).yellow());
                return Ok(());
            };
            store.delete_chat(&chat_id);
            println!("{}", format!("Deleted chat {}", chat_id).green());
        }
    }

    Ok(())
}
