//! Discord token loading.
//!
//! The token lives in its own file so it never ends up in the settings file or the
//! repository. Only the first [`MAX_TOKEN_LEN`] bytes are read.

use crate::errors::{Error, Result};
use std::io::Read;
use std::path::Path;

/// Upper bound on token size in bytes; anything past this is ignored.
pub const MAX_TOKEN_LEN: u64 = 72;

/// Reads the bot token from `path`.
///
/// Bytes past [`MAX_TOKEN_LEN`] are dropped and surrounding whitespace (such as the
/// trailing newline editors add) is trimmed.
///
/// # Errors
/// Returns [`Error::Token`] if the file cannot be opened or read, and [`Error::Config`] if
/// the token is empty or not valid UTF-8.
pub fn load_token<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let token_error = |source| Error::Token {
        path: path.to_path_buf(),
        source,
    };

    let file = std::fs::File::open(path).map_err(token_error)?;
    let mut bytes = Vec::with_capacity(MAX_TOKEN_LEN as usize);
    file.take(MAX_TOKEN_LEN)
        .read_to_end(&mut bytes)
        .map_err(token_error)?;

    let token = String::from_utf8(bytes).map_err(|_| Error::Config {
        message: format!("Token file {path:?} is not valid UTF-8"),
    })?;
    let token = token.trim();
    if token.is_empty() {
        return Err(Error::Config {
            message: format!("Token file {path:?} is empty"),
        });
    }
    Ok(token.to_string())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::temp_file_with;

    #[test]
    fn test_load_token_trims_newline() -> Result<()> {
        let file = temp_file_with(b"abc.def.ghi\n")?;
        assert_eq!(load_token(file.path())?, "abc.def.ghi");
        Ok(())
    }

    #[test]
    fn test_load_token_truncates_long_file() -> Result<()> {
        let long = "x".repeat(100);
        let file = temp_file_with(long.as_bytes())?;
        let token = load_token(file.path())?;
        assert_eq!(token.len(), 72);
        assert_eq!(token, long[..72]);
        Ok(())
    }

    #[test]
    fn test_missing_token_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("discord.token");
        let err = load_token(&path).unwrap_err();
        match err {
            Error::Token { path: failed, .. } => assert_eq!(failed, path),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_token_is_error() -> Result<()> {
        let file = temp_file_with(b"  \n")?;
        assert!(matches!(
            load_token(file.path()),
            Err(Error::Config { .. })
        ));
        Ok(())
    }
}
