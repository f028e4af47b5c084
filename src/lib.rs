pub mod app;
pub mod clock;
pub mod config;
pub mod error;
pub mod events;
pub mod feeds;
pub mod game;
pub mod input;
pub mod logging;
pub mod report;
pub mod state;
