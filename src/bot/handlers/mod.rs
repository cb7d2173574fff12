//! Discord gateway event handlers
//!
//! One handler per event type. [`dispatch`] routes the framework's events to them.

/// Slash command registration on guild availability
pub mod guild;
/// Ready notification and presence
pub mod ready;

use crate::{bot::BotData, errors::Error};
use poise::serenity_prelude as serenity;

/// Routes gateway events to their handlers. Events without a handler are ignored.
pub async fn dispatch(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    framework: poise::FrameworkContext<'_, BotData, Error>,
    data: &BotData,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::GuildCreate { guild, .. } => {
            guild::handle_guild_create(ctx, guild, framework, data).await
        }
        serenity::FullEvent::Ready { data_about_bot } => {
            ready::handle_ready(ctx, data_about_bot);
            Ok(())
        }
        _ => Ok(()),
    }
}
