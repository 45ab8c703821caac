pub mod config;
pub mod logging;

pub mod cache;
pub mod checkpoint;
pub mod classify;
pub mod engine;
pub mod fetch;
pub mod listing;
pub mod pace;
pub mod state;
pub mod store;
pub mod strategy;
