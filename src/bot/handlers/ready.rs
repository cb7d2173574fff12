//! Ready handler.

use poise::serenity_prelude as serenity;
use tracing::info;

/// Presence text shown under the bot's name.
#[must_use]
pub fn presence_text() -> String {
    format!("v{}", env!("CARGO_PKG_VERSION"))
}

/// Logs the ready event and sets the bot's presence to "Watching v<version>".
pub fn handle_ready(ctx: &serenity::Context, ready: &serenity::Ready) {
    info!("on_ready received: logged in as {}", ready.user.name);
    ctx.set_activity(Some(serenity::ActivityData::watching(presence_text())));
}
