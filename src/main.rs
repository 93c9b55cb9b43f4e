use anyhow::Result;
use clap::Parser;
use confetti::app::Application;
use confetti::cli::{Cli, convert_to_command_args};
use env_logger::Env;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging with custom format
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            use chrono::Local;
            use std::io::Write;
            writeln!(
                buf,
                "{} [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .init();

    let cli = Cli::parse();

    match convert_to_command_args(&cli) {
        // One-shot command from the shell
        Some(args) => {
            let app = Application::new()?;
            app.execute(args).await
        }
        // No subcommand: interactive terminal mode
        None => confetti::run().await,
    }
}
