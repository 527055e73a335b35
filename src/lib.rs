pub mod app;
pub mod concerts;
pub mod config;
pub mod conversation;
pub mod errors;
pub mod logging;
pub mod providers;
pub mod registry;
