use clap::{Parser, Subcommand};

/// Confetti - birthday and anniversary reminders with ready-to-send greetings
#[derive(Debug, Parser)]
#[command(name = "confetti")]
#[command(about = "Birthday and anniversary reminders with ready-to-send greetings", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute (if not specified, enters interactive terminal mode)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Manage contacts
    #[command(alias = "contacts")]
    Contact {
        #[command(subcommand)]
        action: ContactActions,
    },

    /// List, compose, and send this month's celebrations
    #[command(alias = "events")]
    Event {
        #[command(subcommand)]
        action: EventActions,
    },

    /// View or modify configuration
    Config {
        #[command(subcommand)]
        action: ConfigActions,
    },
}

#[derive(Debug, Subcommand)]
pub enum ContactActions {
    /// Add a new contact
    #[command(alias = "create")]
    Add {
        /// Contact name
        #[arg(required = true)]
        name: String,

        /// Phone number, digits with an optional leading +
        #[arg(required = true)]
        phone: String,

        /// Birthday (YYYY-MM-DD)
        #[arg(long)]
        birthday: Option<String>,

        /// Anniversary (YYYY-MM-DD)
        #[arg(long)]
        anniversary: Option<String>,

        /// Relationship label, e.g. "Best Friend"
        #[arg(long)]
        relationship: Option<String>,
    },

    /// List contacts
    List {
        /// Only show contacts whose name contains this text
        #[arg(long)]
        search: Option<String>,
    },

    /// Edit an existing contact
    #[command(alias = "update")]
    Edit {
        /// Contact id (or unique id prefix) or name
        #[arg(required = true)]
        contact: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New phone number
        #[arg(long)]
        phone: Option<String>,

        /// New birthday (YYYY-MM-DD); pass "" to clear
        #[arg(long)]
        birthday: Option<String>,

        /// New anniversary (YYYY-MM-DD); pass "" to clear
        #[arg(long)]
        anniversary: Option<String>,

        /// New relationship label; pass "" to clear
        #[arg(long)]
        relationship: Option<String>,
    },

    /// Delete a contact
    #[command(alias = "remove")]
    Delete {
        /// Contact id (or unique id prefix) or name
        #[arg(required = true)]
        contact: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum EventActions {
    /// List this month's celebrations
    List {
        /// Only show events whose contact name contains this text
        #[arg(long)]
        search: Option<String>,
    },

    /// Compose a greeting message for an event
    #[command(alias = "compose")]
    Generate {
        /// Event number from `event list`
        #[arg(required = true)]
        number: usize,
    },

    /// Build the send link for an event, open it, and mark the event sent
    Send {
        /// Event number from `event list`
        #[arg(required = true)]
        number: usize,

        /// Print the link without opening a browser
        #[arg(long = "no-open")]
        no_open: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigActions {
    /// Show configuration
    #[command(aliases = ["list", "get"])]
    Show {
        /// Key to show (use "all" for all settings)
        key: Option<String>,
    },

    /// Set configuration value
    Set {
        /// Configuration key
        #[arg(required = true)]
        key: String,

        /// Configuration value
        #[arg(required = true)]
        value: String,
    },
}

/// Convert a Clap command to a CommandArgs representation
pub fn convert_to_command_args(cli: &Cli) -> Option<crate::command_processor::CommandArgs> {
    use crate::command_processor::CommandArgs;
    use std::collections::HashMap;

    // If no command specified, return None to handle terminal mode
    let command = match &cli.command {
        Some(cmd) => cmd,
        None => return None,
    };

    let command_str;
    let mut args = Vec::new();
    let mut flags = HashMap::new();

    match command {
        Commands::Contact { action } => {
            command_str = "contact".to_string();
            match action {
                ContactActions::Add { name, phone, birthday, anniversary, relationship } => {
                    args.push("add".to_string());
                    args.push(name.clone());
                    args.push(phone.clone());

                    if let Some(date) = birthday {
                        flags.insert("birthday".to_string(), Some(date.clone()));
                    }
                    if let Some(date) = anniversary {
                        flags.insert("anniversary".to_string(), Some(date.clone()));
                    }
                    if let Some(label) = relationship {
                        flags.insert("relationship".to_string(), Some(label.clone()));
                    }
                }
                ContactActions::List { search } => {
                    args.push("list".to_string());
                    if let Some(term) = search {
                        flags.insert("search".to_string(), Some(term.clone()));
                    }
                }
                ContactActions::Edit {
                    contact,
                    name,
                    phone,
                    birthday,
                    anniversary,
                    relationship,
                } => {
                    args.push("edit".to_string());
                    args.push(contact.clone());

                    if let Some(value) = name {
                        flags.insert("name".to_string(), Some(value.clone()));
                    }
                    if let Some(value) = phone {
                        flags.insert("phone".to_string(), Some(value.clone()));
                    }
                    if let Some(value) = birthday {
                        flags.insert("birthday".to_string(), Some(value.clone()));
                    }
                    if let Some(value) = anniversary {
                        flags.insert("anniversary".to_string(), Some(value.clone()));
                    }
                    if let Some(value) = relationship {
                        flags.insert("relationship".to_string(), Some(value.clone()));
                    }
                }
                ContactActions::Delete { contact, yes } => {
                    args.push("delete".to_string());
                    args.push(contact.clone());
                    if *yes {
                        flags.insert("yes".to_string(), None);
                    }
                }
            }
        }
        Commands::Event { action } => {
            command_str = "event".to_string();
            match action {
                EventActions::List { search } => {
                    args.push("list".to_string());
                    if let Some(term) = search {
                        flags.insert("search".to_string(), Some(term.clone()));
                    }
                }
                EventActions::Generate { number } => {
                    args.push("generate".to_string());
                    args.push(number.to_string());
                }
                EventActions::Send { number, no_open } => {
                    args.push("send".to_string());
                    args.push(number.to_string());
                    if *no_open {
                        flags.insert("no-open".to_string(), None);
                    }
                }
            }
        }
        Commands::Config { action } => {
            command_str = "config".to_string();
            match action {
                ConfigActions::Show { key } => {
                    args.push("show".to_string());
                    if let Some(key_name) = key {
                        args.push(key_name.clone());
                    }
                }
                ConfigActions::Set { key, value } => {
                    args.push("set".to_string());
                    args.push(key.clone());
                    args.push(value.clone());
                }
            }
        }
    }

    Some(CommandArgs { command: command_str, args, flags })
}
