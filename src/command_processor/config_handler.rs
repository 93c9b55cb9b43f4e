//! Config command handler for Confetti
//!
//! Handles config-related commands such as set, get, and show.

use super::{CommandArgs, CommandHandler};
use crate::config::Config;
use anyhow::Result;
use std::future::Future;
use std::pin::Pin;

#[derive(Debug)]
pub struct ConfigHandler;

impl CommandHandler for ConfigHandler {
    fn execute(&self, args: CommandArgs) -> Pin<Box<dyn Future<Output = Result<()>> + '_>> {
        Box::pin(async move {
            match args.args.first().map(|s| s.as_str()) {
                Some("show") | Some("get") | Some("list") => {
                    let config = Config::load()?;
                    match args.args.get(1).map(|s| s.as_str()) {
                        Some(key) if key != "all" => match config.get(key) {
                            Some(value) => println!("{} = {}", key, value),
                            None => {
                                println!("Unknown config key: {}", key);
                                println!("Known keys: {}", Config::keys().join(", "));
                            }
                        },
                        _ => {
                            for key in Config::keys() {
                                if let Some(value) = config.get(key) {
                                    println!("{} = {}", key, value);
                                }
                            }
                        }
                    }
                    Ok(())
                }
                Some("set") => {
                    if args.args.len() < 3 {
                        println!("Usage: confetti config set <key> <value>");
                        println!("Known keys: {}", Config::keys().join(", "));
                        return Ok(());
                    }
                    let mut config = Config::load()?;
                    match config.set(&args.args[1], &args.args[2]) {
                        Ok(()) => {
                            config.save()?;
                            println!("Set {} = {}", args.args[1], args.args[2]);
                        }
                        Err(e) => println!("{:#}", e),
                    }
                    Ok(())
                }
                _ => {
                    println!("Unknown config command. Available commands: show, set");
                    Ok(())
                }
            }
        })
    }
    fn can_handle(&self, command: &str) -> bool {
        command == "config"
    }
}
