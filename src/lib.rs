pub mod app;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod loops;
pub mod models;
pub mod remote;
pub mod state;
pub mod stats;
pub mod storage;
pub mod ui;

#[cfg(test)]
pub(crate) mod testing;

pub use app::router;
pub use config::Config;
pub use state::AppState;
