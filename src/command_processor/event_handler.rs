//! Event command handler for Confetti
//!
//! Handles celebration event commands such as list, generate, and send.

use super::{CommandArgs, CommandHandler};
use crate::config::Config;
use crate::dispatch;
use crate::event::EventStatus;
use crate::message;
use crate::session::Session;
use anyhow::Result;
use log::{debug, warn};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

#[derive(Debug)]
pub struct EventHandler {
    session: Arc<Mutex<Session>>,
}

impl EventHandler {
    pub fn new(session: Arc<Mutex<Session>>) -> Self {
        Self { session }
    }

    async fn list(&self, args: &CommandArgs) -> Result<()> {
        let session = self.session.lock().await;
        let events = session.sorted_events();
        if events.is_empty() {
            println!("No celebrations this month.");
            return Ok(());
        }
        let term = args.flag_value("search").map(|t| t.to_lowercase());
        println!("Celebrations this month:");
        let mut shown = 0;
        for (position, event) in events.iter().enumerate() {
            if let Some(term) = &term {
                if !event.contact_name.to_lowercase().contains(term.as_str()) {
                    continue;
                }
            }
            shown += 1;
            let status = match event.status {
                EventStatus::Sent => "sent",
                EventStatus::Pending if event.generated_message.is_some() => "message ready",
                EventStatus::Pending => "pending",
            };
            println!(
                "  {:>2}. {}  {}  {} ({})",
                position + 1,
                event.date,
                event.kind.label(),
                event.contact_name,
                status
            );
        }
        if shown == 0 {
            println!("  (no events match the search)");
        }
        Ok(())
    }

    async fn generate(&self, args: &CommandArgs) -> Result<()> {
        let index = match parse_index(args, "Usage: confetti event generate <number>") {
            Some(index) => index,
            None => return Ok(()),
        };
        let mut session = self.session.lock().await;
        let (event_id, name, kind, relationship) = match session.event_at(index) {
            Some(event) => (
                event.id.clone(),
                event.contact_name.clone(),
                event.kind,
                session.contacts().get(event.contact_id).and_then(|c| c.relationship.clone()),
            ),
            None => {
                println!("No event #{}; run 'event list' to see the current numbers", index);
                return Ok(());
            }
        };
        let config = Config::load()?;
        debug!(
            "Composing {} message for '{}' with a {}ms delay",
            kind.label(),
            name,
            config.compose.delay_ms
        );
        println!("Composing message for {}...", name);
        let message = message::generate_message(
            &name,
            kind,
            relationship.as_deref(),
            Duration::from_millis(config.compose.delay_ms),
        )
        .await;
        match session.attach_message(&event_id, message) {
            Some(event) => {
                println!("Message for {}:", event.contact_name);
                if let Some(text) = &event.generated_message {
                    println!("  {}", text);
                }
            }
            None => warn!("Event {} vanished while composing", event_id),
        }
        Ok(())
    }

    async fn send(&self, args: &CommandArgs) -> Result<()> {
        let index = match parse_index(args, "Usage: confetti event send <number> [--no-open]") {
            Some(index) => index,
            None => return Ok(()),
        };
        let mut session = self.session.lock().await;
        let (event_id, name, phone, kind, message) = match session.event_at(index) {
            Some(event) => match &event.generated_message {
                Some(message) => (
                    event.id.clone(),
                    event.contact_name.clone(),
                    event.phone.clone(),
                    event.kind,
                    message.clone(),
                ),
                None => {
                    println!(
                        "No message for event #{} yet; run 'event generate {}' first",
                        index, index
                    );
                    return Ok(());
                }
            },
            None => {
                println!("No event #{}; run 'event list' to see the current numbers", index);
                return Ok(());
            }
        };
        let config = Config::load()?;
        let link = dispatch::build_send_link(&config.messaging.base_url, &phone, &message)?;
        println!("Send link for {}: {}", name, link);
        if args.has_flag("no-open") {
            debug!("--no-open set; skipping the browser");
        } else if let Err(e) = dispatch::open_in_browser(&link) {
            warn!("Could not open a browser: {}", e);
            println!("Could not open a browser; copy the link above to send the message.");
        }
        session.mark_sent(&event_id);
        println!("Marked {}'s {} as sent.", name, kind.label().to_lowercase());
        Ok(())
    }
}

impl CommandHandler for EventHandler {
    fn execute(&self, args: CommandArgs) -> Pin<Box<dyn Future<Output = Result<()>> + '_>> {
        Box::pin(async move {
            match args.args.first().map(|s| s.as_str()) {
                Some("list") => self.list(&args).await,
                Some("generate") | Some("compose") => self.generate(&args).await,
                Some("send") => self.send(&args).await,
                _ => {
                    println!("Unknown event command. Available commands: list, generate, send");
                    Ok(())
                }
            }
        })
    }
    fn can_handle(&self, command: &str) -> bool {
        command == "event" || command == "events"
    }
}

fn parse_index(args: &CommandArgs, usage: &str) -> Option<usize> {
    let raw = match args.args.get(1) {
        Some(raw) => raw,
        None => {
            println!("{}", usage);
            return None;
        }
    };
    match raw.parse() {
        Ok(index) => Some(index),
        Err(_) => {
            println!("'{}' is not an event number; run 'event list' to see the numbers", raw);
            None
        }
    }
}
