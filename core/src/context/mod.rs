mod background_tasks;
mod config;
mod error;

pub use background_tasks::BackgroundTasks;
pub use config::{
    APP_ID, AppConfig, AppConfigExt, AudioSettings, DEFAULT_TECHNIQUE, VisualSettings,
    VoiceSettings, config_dir, config_path,
};
pub use error::ConfigError;
