pub mod engine_config;
pub mod error;
pub mod logging;

pub static APP_NAME: &str = "camunda-rest-rs";
