pub mod app;
pub mod config;
pub mod console;
pub mod effects;
pub mod logging;
pub mod persistence;
pub mod ui;

pub use app::{run_app, Presenter, Runtime};
