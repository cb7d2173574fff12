//! Shared test utilities for the feedback bot.
//!
//! Fixed ids and helpers for building routing tables, settings and token files.

use crate::core::feedback::FeedbackRouting;
use std::io::Write;
use tempfile::NamedTempFile;

/// Public guild id used across tests
pub const PUBLIC_GUILD: u64 = 100_000_000_000_000_001;
/// Private guild id used across tests
pub const PRIVATE_GUILD: u64 = 100_000_000_000_000_002;
/// Public feedback channel id used across tests
pub const PUBLIC_CHANNEL: u64 = 200_000_000_000_000_001;
/// Private feedback channel id used across tests
pub const PRIVATE_CHANNEL: u64 = 200_000_000_000_000_002;

/// Routing table built from the test ids above.
#[must_use]
pub const fn sample_routing() -> FeedbackRouting {
    FeedbackRouting {
        public_guild: PUBLIC_GUILD,
        private_guild: PRIVATE_GUILD,
        public_channel: PUBLIC_CHANNEL,
        private_channel: PRIVATE_CHANNEL,
    }
}

/// Writes `contents` to a fresh temporary file that lives as long as the returned handle.
pub fn temp_file_with(contents: &[u8]) -> std::io::Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(contents)?;
    file.flush()?;
    Ok(file)
}
