//! Bot layer - Discord-specific interface and event handlers
//!
//! This module wires the poise framework: the `/feedback` command, gateway event
//! handlers, error reporting and the client lifecycle.

/// Discord command implementations
pub mod commands;
/// Discord gateway event handlers (guild availability, ready)
pub mod handlers;
/// Relay message construction
pub mod relay;

use crate::{
    core::feedback::{FeedbackRouting, Rejection},
    errors::{Error, Result},
    shutdown::Shutdown,
};
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Shared data available to all bot commands and event handlers.
#[derive(Debug, Clone, Copy)]
pub struct BotData {
    /// Recognized guilds and their feedback channels
    pub routing: FeedbackRouting,
}

impl BotData {
    /// Creates a new `BotData` instance with the given routing table.
    #[must_use]
    pub const fn new(routing: FeedbackRouting) -> Self {
        Self { routing }
    }
}

/// Private reply for a malformed invocation that has nothing to do with attachments.
pub const MALFORMED_INVOCATION: &str =
    "Something went wrong reading this command. Please try again later.";

/// Private reply for an invocation poise could not map onto the command's parameters.
///
/// An attachment id missing from the interaction's resolved table is reported by poise as
/// an "expected Attachment" mismatch; anything else (stale registrations, no matching
/// action) gets a generic message.
#[must_use]
pub fn structure_mismatch_reply(description: &str) -> poise::CreateReply {
    let content = if description.contains("Attachment") {
        Rejection::UnresolvedAttachment.to_string()
    } else {
        MALFORMED_INVOCATION.to_string()
    };
    poise::CreateReply::default().content(content).ephemeral(true)
}

/// Only guild availability and interactions are needed.
#[must_use]
pub const fn intents() -> serenity::GatewayIntents {
    serenity::GatewayIntents::GUILDS
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {:?}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {:?}", ctx.command().name, error);
            if let Err(e) = ctx.say(format!("An error occurred: {error}")).await {
                error!("Failed to send error message: {}", e);
            }
        }
        poise::FrameworkError::CommandStructureMismatch { description, ctx, .. } => {
            error!(
                "Malformed `{}` invocation: {}",
                ctx.command.name, description
            );
            let reply = structure_mismatch_reply(description);
            if let Err(e) = poise::Context::Application(ctx).send(reply).await {
                error!("Failed to send error message: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Builds the poise framework around `data`.
#[must_use]
pub fn framework(data: BotData) -> poise::Framework<BotData, Error> {
    poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::all(),
            on_error: |error| Box::pin(on_error(error)),
            event_handler: |ctx, event, framework, data| {
                Box::pin(handlers::dispatch(ctx, event, framework, data))
            },
            ..Default::default()
        })
        // Commands are registered per guild as guilds become available, not here
        .setup(move |_ctx, ready, _framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                Ok(data)
            })
        })
        .build()
}

/// Connects to Discord and runs until the gateway client stops or `shutdown` is requested.
///
/// On shutdown the shards are closed; in-flight messages are not waited for.
#[instrument(skip(token, shutdown))]
pub async fn run_bot(token: &str, data: BotData, shutdown: Shutdown) -> Result<()> {
    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::ClientBuilder::new(token, intents())
        .framework(framework(data))
        .await
        .inspect_err(|e| error!("Error creating client: {:?}", e))?;

    let shard_manager = Arc::clone(&client.shard_manager);
    tokio::spawn(async move {
        shutdown.wait().await;
        info!("Shutting down shards...");
        shard_manager.shutdown_all().await;
    });

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {:?}", e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use serde_json::json;

    #[test]
    fn test_intents_cover_guild_events() {
        assert!(intents().contains(serenity::GatewayIntents::GUILDS));
        assert!(!intents().contains(serenity::GatewayIntents::MESSAGE_CONTENT));
    }

    #[test]
    fn test_bot_data_holds_routing() {
        let data = BotData::new(sample_routing());
        assert_eq!(data.routing.channel_for(PUBLIC_GUILD), Some(PUBLIC_CHANNEL));
    }

    #[test]
    fn test_attachment_missing_from_resolved_table_is_unresolved() {
        let data: serenity::CommandData = serde_json::from_value(json!({
            "id": "1",
            "name": "feedback",
            "type": 1,
            "options": [
                { "name": "text", "type": 3, "value": "see attached" },
                { "name": "attachment", "type": 11, "value": "999" }
            ],
            "resolved": { "attachments": {} }
        }))
        .unwrap();

        let options = data.options();
        let attachment = options.iter().find(|o| o.name == "attachment").unwrap();
        assert!(matches!(
            attachment.value,
            serenity::ResolvedValue::Unresolved(serenity::Unresolved::Attachment(id))
                if id == serenity::AttachmentId::new(999)
        ));
    }

    #[test]
    fn test_unresolved_attachment_reply_is_private_rejection() {
        let reply = structure_mismatch_reply("expected Attachment");
        assert_eq!(
            reply.content.as_deref(),
            Some(Rejection::UnresolvedAttachment.to_string().as_str())
        );
        assert_eq!(reply.ephemeral, Some(true));
    }

    #[test]
    fn test_other_mismatches_get_generic_private_reply() {
        for description in ["no matching action", "expected String"] {
            let reply = structure_mismatch_reply(description);
            assert_eq!(reply.content.as_deref(), Some(MALFORMED_INVOCATION));
            assert_eq!(reply.ephemeral, Some(true));
        }
    }
}
