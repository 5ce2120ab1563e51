use std::sync::Arc;

use teloxide::{payloads::SendAnimationSetters, prelude::*, types::ParseMode};

use ztb_core::domain::{TranslationMode, UserId};

use crate::{keyboards, router::AppState};

const START_ANIMATION: &str = "Data/Materials/Animation/start.mp4";

pub async fn handle_command(bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    match command_token(msg.text().unwrap_or_default()) {
        "/start" => handle_start(bot, msg, state).await,
        // Unknown commands are silently ignored.
        _ => Ok(()),
    }
}

/// The command itself, without the `@botname` suffix or any payload after
/// the first whitespace (`/start@ztb_bot ref` → `/start`).
fn command_token(text: &str) -> &str {
    let first = text.split_whitespace().next().unwrap_or_default();
    first.split('@').next().unwrap_or(first)
}

async fn handle_start(bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(from) = msg.from() else {
        return Ok(());
    };
    let user = UserId(from.id.0 as i64);

    // First contact defaults to standard→slang without clobbering an
    // existing choice.
    if let Err(e) = state.users.set_mode_if_absent(user, TranslationMode::ToZoomer) {
        tracing::warn!("cannot persist default mode for {}: {e}", user.0);
    }

    let caption = [
        "Хай, бро! 👋",
        "Эта типа транслейтер с зумерского на нормисский и обратно. Чекни сам, это реально имба!\n",
        "Приветствуем! 👋",
        "Это переводчик с зумерского на нормальный и обратно.",
        "Отправляйте любую информацию и наслаждайтесь переводом!\n",
        "<i>Поддерживает голосовой ввод</i>",
    ]
    .join("\n");

    let animation = state.media.animation(&bot, START_ANIMATION).await;
    let _ = bot
        .send_animation(msg.chat.id, animation)
        .caption(caption)
        .parse_mode(ParseMode::Html)
        .reply_markup(keyboards::menu())
        .await;

    Ok(())
}
