pub mod settings;

pub use settings::{AppConfig, LevelConfig, ValidationConfig};
