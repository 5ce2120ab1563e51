//! Telegram glue for the zoomer-translator bot.
//!
//! Handlers stay thin: they resolve platform payloads into core commands,
//! call the adapter crates and render the replies. Nothing here is allowed
//! to take down the dispatch loop; every external failure becomes a
//! user-visible fallback message.

mod handlers;
pub mod keyboards;
pub mod media_cache;
pub mod router;
pub mod subscription;
