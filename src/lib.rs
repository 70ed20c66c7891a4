pub mod config;
pub mod engine;
pub mod model;
pub mod notifier;
pub mod storage;
