pub mod app;
pub mod client;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod history;
pub mod models;
pub mod notify;
pub mod session;
pub mod state;
pub mod storage;
pub mod theme;
pub mod ui;
pub mod view;

pub use app::router;
pub use client::{AnalysisClient, AnalysisTransport, ReqwestTransport};
pub use config::Config;
pub use state::AppState;
pub use storage::{JsonFileStore, KeyValueStore};
