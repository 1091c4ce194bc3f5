pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod handler;
pub mod intent;
pub mod logging;
pub mod pipeline;
pub mod platforms;
