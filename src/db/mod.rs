pub mod migrations;
pub mod provider;
pub mod repository;

pub use provider::{ActivityProvider, SqliteProvider};
