//! Alertfeed presentation shell around the core state machine and the engine.
pub mod platform;
