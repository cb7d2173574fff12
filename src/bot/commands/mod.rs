//! Discord command implementations.

/// Anonymous feedback command
pub mod feedback;

// Export commands
pub use feedback::*;

use crate::{bot::BotData, errors::Error};

/// Every command the bot registers.
#[must_use]
pub fn all() -> Vec<poise::Command<BotData, Error>> {
    vec![feedback()]
}
