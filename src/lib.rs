pub mod app;
pub mod cli;
pub mod command_processor;
pub mod config;
pub mod contact;
pub mod dispatch;
pub mod event;
pub mod message;
pub mod session;

use anyhow::Result;
use log::info;

pub async fn run() -> Result<()> {
    // Create and run the application
    let app = app::Application::new()?;
    info!("Initializing Confetti application");
    app.run().await
}

// Re-export commonly used types
pub use config::Config;
pub use contact::{Contact, ContactBook};
pub use event::{CelebrationEvent, EventKind, EventStatus};
