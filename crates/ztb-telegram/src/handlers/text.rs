use std::sync::Arc;

use teloxide::{
    payloads::{SendAnimationSetters, SendPhotoSetters},
    prelude::*,
    types::ParseMode,
};

use ztb_core::{
    blacklist::Blacklist,
    domain::{MenuCommand, UserId},
};

use crate::{keyboards, router::AppState, subscription};

const BAD_ANIMATION: &str = "Data/Materials/Animation/bad.mp4";
const SHARE_PHOTO: &str = "Data/Materials/Photo/share.jpg";

pub async fn handle_text(bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(from) = msg.from() else {
        return Ok(());
    };
    let Some(text) = msg.text().map(|s| s.to_string()) else {
        return Ok(());
    };
    let user = UserId(from.id.0 as i64);

    if !subscription::ensure_subscribed(&bot, &state, msg.chat.id, user, true).await {
        return Ok(());
    }

    // The blacklist lives in a material file; re-read per message so edits
    // apply without a restart.
    let blacklist = Blacklist::load(ztb_core::blacklist::DEFAULT_PATH);
    if blacklist.matches(&text) {
        let animation = state.media.animation(&bot, BAD_ANIMATION).await;
        let _ = bot
            .send_animation(msg.chat.id, animation)
            .caption("<b><i>- Чел, ну реально! Не пазорься!</i></b>")
            .parse_mode(ParseMode::Html)
            .reply_markup(keyboards::delete("Был не прав, признаю!"))
            .await;
        return Ok(());
    }

    match MenuCommand::parse(&text) {
        Some(MenuCommand::Share) => send_share_message(&bot, &state, &msg).await,
        Some(MenuCommand::SwitchMode) => {
            let current = state.users.mode(user);
            let _ = bot
                .send_message(msg.chat.id, "Выберите, какой режим перевода интересует:")
                .reply_markup(keyboards::switcher(current))
                .await;
            Ok(())
        }
        None => translate_text(&bot, &state, &msg, user, &text).await,
    }
}

async fn translate_text(
    bot: &Bot,
    state: &AppState,
    msg: &Message,
    user: UserId,
    text: &str,
) -> ResponseResult<()> {
    let mode = state.users.mode(user);
    let result = state.translator.translate(mode, text).await;

    let reply = match result.value() {
        Some(translated) => translated.to_string(),
        None => {
            tracing::warn!(
                code = result.code,
                messages = ?result.messages,
                "translation failed"
            );
            "Ууупс… Не удалось выполнить перевод.".to_string()
        }
    };
    let _ = bot.send_message(msg.chat.id, reply).await;
    Ok(())
}

async fn send_share_message(bot: &Bot, state: &AppState, msg: &Message) -> ResponseResult<()> {
    let username = match bot.get_me().await {
        Ok(me) => format!("@{}", me.username()),
        Err(_) => return Ok(()),
    };

    let caption = format!(
        "{0}\n{0}\n{0}\n\n<b>Переводчик с зумерского | Пикми, чечик, найк про</b>\nКак раз то, что ты искал!\n\n<b><i>Пользуйся и делись с друзьями!</i></b>",
        username
    );

    let photo = state.media.photo(bot, SHARE_PHOTO).await;
    let _ = bot
        .send_photo(msg.chat.id, photo)
        .caption(caption)
        .parse_mode(ParseMode::Html)
        .reply_markup(keyboards::share(&username))
        .await;
    Ok(())
}
