//! Help command handler for Confetti
//!
//! Handles help-related commands.

use super::{CommandArgs, CommandHandler};
use anyhow::Result;
use std::future::Future;
use std::pin::Pin;

#[derive(Debug)]
pub struct HelpHandler;

impl CommandHandler for HelpHandler {
    fn execute(&self, _args: CommandArgs) -> Pin<Box<dyn Future<Output = Result<()>> + '_>> {
        Box::pin(async move {
            print_help();
            Ok(())
        })
    }
    fn can_handle(&self, command: &str) -> bool {
        command == "help" || command == "--help" || command == "-h"
    }
}

fn print_help() {
    println!("Confetti - birthday and anniversary reminders with ready-to-send greetings");
    println!();
    println!("USAGE:");
    println!("  confetti [COMMAND] [SUBCOMMAND] [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("  contact   Manage contacts");
    println!("  event     List, compose, and send this month's celebrations");
    println!("  config    Manage configuration");
    println!("  help      Show this help message");
    println!("  version   Show version information");
    println!("  exit      Exit the application");
    println!();
    println!("For more information on a specific command, run:");
    println!("  confetti [COMMAND] --help");
    println!();
    println!("EXAMPLES:");
    println!("  confetti contact add \"Alex Thompson\" \"+1 (123) 456-7890\" --birthday 1992-05-15");
    println!("  confetti contact list --search alex");
    println!("  confetti event list");
    println!("  confetti event generate 1");
    println!("  confetti event send 1 --no-open");
    println!("  confetti config set compose.delay_ms 500");
}
