//! Greeting message composition.
//!
//! Messages come from a fixed pool of four templates per event kind, picked
//! uniformly at random. The async entry point pauses for the configured delay
//! first, standing in for a slower composition backend.

use crate::event::EventKind;
use rand::Rng;
use std::time::Duration;

/// Default simulated composition delay in milliseconds.
pub const DEFAULT_COMPOSE_DELAY_MS: u64 = 1500;

const BIRTHDAY_TEMPLATES: [&str; 4] = [
    "Happy Birthday {name}! 🎉 Wishing you an amazing day filled with joy and laughter!",
    "🎂 Happy Birthday to an incredible {relationship}! Hope your day is as wonderful as you are, {name}!",
    "Happy Birthday {name}! 🎈 May this year bring you happiness, success, and all your heart desires!",
    "Wishing the happiest of birthdays to {name}! 🎊 Enjoy your special day to the fullest!",
];

const ANNIVERSARY_TEMPLATES: [&str; 4] = [
    "Happy Anniversary {name}! 💕 Wishing you both continued love and happiness!",
    "Congratulations on your anniversary! 🥂 Here's to many more beautiful years together, {name}!",
    "Happy Anniversary! 💑 Your love story inspires us all. Cheers to you, {name}!",
    "Celebrating your special day with you! 🎉 Happy Anniversary {name}!",
];

/// The fixed template pool for an event kind.
pub fn template_pool(kind: EventKind) -> &'static [&'static str] {
    match kind {
        EventKind::Birthday => &BIRTHDAY_TEMPLATES,
        EventKind::Anniversary => &ANNIVERSARY_TEMPLATES,
    }
}

/// Picks one template uniformly at random and interpolates the recipient.
///
/// `relationship` is only used by one birthday variant and falls back to
/// "person" when absent. Anniversary templates interpolate the name alone.
pub fn compose_message(name: &str, kind: EventKind, relationship: Option<&str>) -> String {
    let pool = template_pool(kind);
    let index = rand::thread_rng().gen_range(0..pool.len());
    render(pool[index], name, relationship)
}

/// Composes a message after the simulated generation delay.
pub async fn generate_message(
    name: &str,
    kind: EventKind,
    relationship: Option<&str>,
    delay: Duration,
) -> String {
    tokio::time::sleep(delay).await;
    compose_message(name, kind, relationship)
}

fn render(template: &str, name: &str, relationship: Option<&str>) -> String {
    template.replace("{name}", name).replace("{relationship}", relationship.unwrap_or("person"))
}
