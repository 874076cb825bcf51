// The binary in main.rs drives the terminal; everything it needs lives in the
// library so integration tests and benchmarks can reach it via `numdr::*`.

pub mod app;
pub mod config;
pub mod engine;
pub mod event;
pub mod generator;
pub mod logging;
pub mod session;
pub mod settings;
pub mod store;
pub mod timer;
pub mod ui;
