pub mod app;
pub mod calendar;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod ids;
pub mod ledger;
pub mod models;
pub mod presenter;
pub mod registry;
pub mod state;
pub mod storage;
pub mod tracker;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use tracker::Tracker;
