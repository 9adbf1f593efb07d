pub mod app;
pub mod config;
pub mod input;
pub mod logging;
pub mod render;
pub mod utils;

pub use app::{EstimatorApp, Flow, SharedOutput, load_pricing_table};
pub use config::{ConfigError, Settings, load_settings};
