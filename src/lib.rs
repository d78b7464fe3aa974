pub mod api;
pub mod app;
pub mod config;
pub mod setup;
pub mod shared;
pub mod workflow;
