pub mod apis;
pub mod classify;
pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod logging;
pub mod normalize;
pub mod pipeline;
pub mod storage;
pub mod types;

// Port traits and their production adapters
pub mod app;
pub mod infra;
