// src/config/mod.rs
pub mod app;

pub use app::{AppConfig, ENV_CONFIG_PATH};
