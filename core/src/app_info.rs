//! Application identity and user-facing messages

pub const APP_NAME: &str = "Glow Calm";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_DESCRIPTION: &str = "Your personal breathing and wellness companion";

pub const SESSION_COMPLETED: &str = "Great job! Breathing session completed successfully.";
pub const SETTINGS_SAVED: &str = "Your settings have been saved.";
pub const INVALID_INPUT: &str = "Please enter valid information.";
