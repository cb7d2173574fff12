/// Settings file and environment overrides
pub mod settings;

/// Discord token file loading
pub mod token;

pub use settings::Settings;
pub use token::load_token;
