//! The `/feedback` command - relays a member's message anonymously to the team.
//!
//! The submitter's identity never reaches the relayed message; only the text and the
//! attachment URL do. Replies to the submitter are ephemeral.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, relay},
        core::feedback::{ACKNOWLEDGEMENT, Submission},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use tracing::{debug, error, info};

    /// Send an anonymous feedback message to the team.
    #[poise::command(
        slash_command,
        guild_only,
        ephemeral,
        default_member_permissions = "USE_APPLICATION_COMMANDS"
    )]
    pub async fn feedback(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "The message text to send. Max 1800 characters."] text: String,
        #[description = "Add an attachment (screenshot, log file, etc.) to the message."]
        attachment: Option<serenity::Attachment>,
    ) -> Result<()> {
        let Some(guild_id) = ctx.guild_id() else {
            return Ok(());
        };
        let Some(channel) = ctx.data().routing.channel_for(guild_id.get()) else {
            debug!("Ignoring /feedback from unrecognized guild {}", guild_id);
            return Ok(());
        };

        // Rejections are only shown to the submitter; the text itself is never logged.
        let submission = match Submission::new(text, attachment.map(|a| a.url)) {
            Ok(submission) => submission,
            Err(rejection) => {
                ctx.say(rejection.to_string()).await?;
                return Ok(());
            }
        };

        let message = relay::relay_message(&submission);
        match serenity::ChannelId::new(channel)
            .send_message(ctx.http(), message)
            .await
        {
            Ok(_) => info!("Relayed feedback to channel {} in guild {}", channel, guild_id),
            Err(e) => error!("Failed to relay feedback to channel {}: {}", channel, e),
        }

        ctx.say(ACKNOWLEDGEMENT).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
