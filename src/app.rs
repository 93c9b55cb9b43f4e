use crate::command_processor::{CommandArgs, CommandProcessor};
use crate::config::Config;
use crate::contact::ContactBook;
use crate::session::Session;
use anyhow::{anyhow, Result};
use chrono::Local;
use clap::Parser as ClapParser;
use rustyline::DefaultEditor;
use std::sync::Arc;
use tokio::sync::Mutex;

pub struct Application {
    command_processor: CommandProcessor,
}

impl Application {
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        let book = if config.contacts.load_samples {
            log::debug!("Seeding the contact book with sample contacts");
            ContactBook::with_samples()
        } else {
            ContactBook::new()
        };
        let session = Arc::new(Mutex::new(Session::new(book, Local::now().date_naive())));
        Ok(Self { command_processor: CommandProcessor::new(session) })
    }

    pub async fn run(&self) -> Result<()> {
        log::info!("Starting Confetti Terminal");

        let mut rl = DefaultEditor::new()?;

        println!("Welcome to Confetti! Type 'help' for commands.");
        let prompt = "🎉 ";

        loop {
            match rl.readline(prompt) {
                Ok(line) => {
                    let _ = rl.add_history_entry(line.as_str());
                    if let Err(err) = self.process_input(&line).await {
                        log::error!("Failed to process command: {:?}", err);
                    }
                }
                Err(rustyline::error::ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(rustyline::error::ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    println!("Error: {:?}", err);
                    break;
                }
            }
        }

        Ok(())
    }

    async fn process_input(&self, input: &str) -> Result<()> {
        // Detection runs on a lowercased copy; parsing sees the original so
        // names and messages keep their case.
        let detection = crate::command_processor::preprocess_input(input);
        if detection.is_empty() {
            return Ok(());
        }
        if detection == "exit"
            || detection == "quit"
            || detection == "confetti exit"
            || detection == "confetti quit"
        {
            log::info!("Exit command detected");
            let command_args = CommandArgs::new(
                "exit".to_string(),
                vec![],
                std::collections::HashMap::new(),
            );
            return self.command_processor.execute(command_args).await;
        }

        self.process_command(input).await
    }

    /// Parse and execute one command line.
    pub async fn process_command(&self, input: &str) -> Result<()> {
        log::info!("Processing command: {}", input);

        // Try to parse with Clap first
        let command_args = match self.parse_command_string(input) {
            Ok(args) => args,
            Err(_) => {
                // Fall back to the flag-collecting parser for bare command
                // lines Clap does not accept
                CommandArgs::parse(input)?
            }
        };
        self.command_processor.execute(command_args).await
    }

    /// Execute an already-parsed command, e.g. from the binary's argv.
    pub async fn execute(&self, args: CommandArgs) -> Result<()> {
        self.command_processor.execute(args).await
    }

    /// Helper method to parse a command string using Clap
    fn parse_command_string(&self, input: &str) -> Result<CommandArgs> {
        // Format the input into argv style for clap
        let args =
            shell_words::split(input).map_err(|e| anyhow!("Failed to parse command: {}", e))?;

        // Check if we have any arguments
        if args.is_empty() {
            return Err(anyhow!("Empty command"));
        }

        // Parse using Clap
        let cli = match crate::cli::Cli::try_parse_from(&args) {
            Ok(cli) => cli,
            Err(e) => {
                return Err(anyhow!("Not a structured command: {}", e));
            }
        };

        // Convert from Clap command to CommandArgs
        crate::cli::convert_to_command_args(&cli)
            .ok_or_else(|| anyhow!("Failed to convert parsed command to CommandArgs"))
    }
}
