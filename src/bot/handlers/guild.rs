//! Guild availability handler.
//!
//! Discord sends a guild-create event for every guild the bot is in once the shard
//! connects, and again whenever the bot joins a guild. Recognized guilds get the slash
//! command registered each time; everything else is ignored.

use crate::{
    bot::BotData,
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;
use tracing::{debug, info};

/// Registers the bot's commands in `guild` if it is one of the recognized guilds.
///
/// Registration overwrites the guild's command set, so repeating it on every connect
/// leaves an unchanged command untouched.
pub async fn handle_guild_create(
    ctx: &serenity::Context,
    guild: &serenity::Guild,
    framework: poise::FrameworkContext<'_, BotData, Error>,
    data: &BotData,
) -> Result<()> {
    info!(
        "on_guild_create: Guild name:[{}] Guild ID:[{}]",
        guild.name, guild.id
    );

    let Some(kind) = data.routing.classify(guild.id.get()) else {
        debug!("Ignoring unrecognized guild {}", guild.id);
        return Ok(());
    };

    poise::builtins::register_in_guild(ctx, &framework.options().commands, guild.id).await?;
    info!("Registered commands in {} guild {}", kind, guild.id);
    Ok(())
}
