//! Core domain + application logic for the zoomer-translator bot.
//!
//! This crate is intentionally framework-agnostic. Telegram / NeuroHub / VOSK
//! live behind ports (traits) implemented in adapter crates.

pub mod blacklist;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod materials;
pub mod ports;
pub mod prompts;
pub mod settings;
pub mod users;

pub use errors::{Error, Result};
