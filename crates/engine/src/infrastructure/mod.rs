//! Infrastructure implementations.
//!
//! Port traits plus the adapters behind them: clock and random, key-value
//! storage, the in-memory memory journal, the event bus, save-blob
//! persistence and configuration.

pub mod clock;
pub mod config;
pub mod event_bus;
pub mod memory;
pub mod persistence;
pub mod ports;
pub mod storage;
