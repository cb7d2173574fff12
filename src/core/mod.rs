/// Feedback routing, validation and relay text composition
pub mod feedback;
