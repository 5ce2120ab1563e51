//! Telegram update handlers.
//!
//! Each handler resolves the platform payload into core commands, runs the
//! matching pipeline and renders a reply. Unrecognized input is silently
//! ignored.

use std::sync::Arc;

use teloxide::{
    prelude::*,
    types::{CallbackQuery, Message},
};

use crate::router::AppState;

mod callback;
mod commands;
mod text;
mod voice;

pub async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    callback::handle_callback(bot, q, state).await
}

pub async fn handle_message(bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    if let Some(text) = msg.text() {
        if text.starts_with('/') {
            return commands::handle_command(bot, msg, state).await;
        }
        return text::handle_text(bot, msg, state).await;
    }

    if msg.voice().is_some() {
        return voice::handle_voice(bot, msg, state).await;
    }

    // Other media types carry nothing to translate.
    Ok(())
}
