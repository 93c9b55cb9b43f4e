//! Contact command handler for Confetti
//!
//! Handles contact-related commands such as add, list, edit, and delete.

use super::{CommandArgs, CommandHandler};
use crate::contact::{filter_by_name, Contact, ContactDraft, ContactPatch};
use crate::session::Session;
use anyhow::Result;
use chrono::Local;
use log::debug;
use std::future::Future;
use std::io::{self, Write};
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug)]
pub struct ContactHandler {
    session: Arc<Mutex<Session>>,
}

impl ContactHandler {
    pub fn new(session: Arc<Mutex<Session>>) -> Self {
        Self { session }
    }

    async fn add(&self, args: &CommandArgs) -> Result<()> {
        if args.args.len() < 3 {
            println!("Not enough arguments for contact add command");
            println!(
                "Usage: confetti contact add <name> <phone> [--birthday YYYY-MM-DD] [--anniversary YYYY-MM-DD] [--relationship <label>]"
            );
            return Ok(());
        }
        let mut draft = ContactDraft::new(&args.args[1], &args.args[2]);
        draft.birthday = args.flag_value("birthday");
        draft.anniversary = args.flag_value("anniversary");
        draft.relationship = args.flag_value("relationship");
        debug!("Adding contact: {:?}", draft);

        let mut session = self.session.lock().await;
        match session.add_contact(draft, Local::now().date_naive()) {
            Ok(contact) => {
                println!("Added contact '{}' ({})", contact.name, contact.id);
                Ok(())
            }
            Err(e) => {
                println!("Failed to add contact: {}", e);
                Ok(())
            }
        }
    }

    async fn list(&self, args: &CommandArgs) -> Result<()> {
        let session = self.session.lock().await;
        let contacts = session.contacts().contacts();
        let visible: Vec<&Contact> = match args.flag_value("search") {
            Some(term) => filter_by_name(contacts, &term),
            None => contacts.iter().collect(),
        };
        if visible.is_empty() {
            println!("No contacts found.");
            return Ok(());
        }
        println!("Contacts ({}):", visible.len());
        for contact in visible {
            println!("  {}  {}  {}{}", contact.id, contact.name, contact.phone, describe(contact));
        }
        Ok(())
    }

    async fn edit(&self, args: &CommandArgs) -> Result<()> {
        if args.args.len() < 2 {
            println!("Not enough arguments for contact edit command");
            println!(
                "Usage: confetti contact edit <id-or-name> [--name <name>] [--phone <phone>] [--birthday YYYY-MM-DD] [--anniversary YYYY-MM-DD] [--relationship <label>]"
            );
            println!("Pass an empty string to clear an optional field, e.g. --birthday \"\"");
            return Ok(());
        }
        let patch = ContactPatch {
            name: args.flag_value("name"),
            phone: args.flag_value("phone"),
            birthday: args.flag_value("birthday"),
            anniversary: args.flag_value("anniversary"),
            relationship: args.flag_value("relationship"),
        };
        if patch.is_empty() {
            println!(
                "Nothing to change. Pass at least one of --name, --phone, --birthday, --anniversary, --relationship"
            );
            return Ok(());
        }
        debug!("Editing contact '{}' with {:?}", args.args[1], patch);

        let mut session = self.session.lock().await;
        let id = match session.contacts().resolve(&args.args[1]) {
            Ok(contact) => contact.id,
            Err(e) => {
                println!("{}", e);
                return Ok(());
            }
        };
        match session.edit_contact(id, patch, Local::now().date_naive()) {
            Ok(contact) => {
                println!("Updated contact '{}'", contact.name);
                Ok(())
            }
            Err(e) => {
                println!("Failed to update contact: {}", e);
                Ok(())
            }
        }
    }

    async fn delete(&self, args: &CommandArgs) -> Result<()> {
        if args.args.len() < 2 {
            println!("Not enough arguments for contact delete command");
            println!("Usage: confetti contact delete <id-or-name> [--yes]");
            return Ok(());
        }
        let mut session = self.session.lock().await;
        let (id, name) = match session.contacts().resolve(&args.args[1]) {
            Ok(contact) => (contact.id, contact.name.clone()),
            Err(e) => {
                println!("{}", e);
                return Ok(());
            }
        };
        if !args.has_flag("yes") && !confirm_delete(&name)? {
            println!("Delete cancelled.");
            return Ok(());
        }
        match session.remove_contact(id, Local::now().date_naive()) {
            Ok(contact) => {
                println!("Deleted contact '{}'", contact.name);
                Ok(())
            }
            Err(e) => {
                println!("Failed to delete contact: {}", e);
                Ok(())
            }
        }
    }
}

impl CommandHandler for ContactHandler {
    fn execute(&self, args: CommandArgs) -> Pin<Box<dyn Future<Output = Result<()>> + '_>> {
        Box::pin(async move {
            match args.args.first().map(|s| s.as_str()) {
                Some("add") | Some("create") => self.add(&args).await,
                Some("list") => self.list(&args).await,
                Some("edit") | Some("update") => self.edit(&args).await,
                Some("delete") | Some("remove") => self.delete(&args).await,
                _ => {
                    println!("Unknown contact command. Available commands: add, list, edit, delete");
                    Ok(())
                }
            }
        })
    }
    fn can_handle(&self, command: &str) -> bool {
        command == "contact" || command == "contacts"
    }
}

fn describe(contact: &Contact) -> String {
    let mut details = Vec::new();
    if let Some(birthday) = &contact.birthday {
        details.push(format!("birthday {}", birthday));
    }
    if let Some(anniversary) = &contact.anniversary {
        details.push(format!("anniversary {}", anniversary));
    }
    if let Some(relationship) = &contact.relationship {
        details.push(relationship.clone());
    }
    if details.is_empty() { String::new() } else { format!("  [{}]", details.join(", ")) }
}

fn confirm_delete(name: &str) -> Result<bool> {
    print!("Delete contact '{}'? [y/N] ", name);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}
