use std::sync::Arc;

use teloxide::{payloads::SendAnimationSetters, prelude::*, types::ParseMode};

use ztb_core::domain::{CallbackCommand, UserId};

use crate::{router::AppState, subscription};

const AFTER_SUBSCRIBE_ANIMATION: &str = "Data/Materials/Animation/after_subscribe.mp4";

pub async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    let _ = bot.answer_callback_query(q.id.clone()).await;

    let Some(message) = q.message.as_ref() else {
        return Ok(());
    };
    let user = UserId(q.from.id.0 as i64);
    let chat_id = message.chat.id;

    // Unknown payloads fall through silently.
    let Some(command) = q.data.as_deref().and_then(CallbackCommand::parse) else {
        return Ok(());
    };

    match command {
        CallbackCommand::Delete => {
            let _ = bot.delete_message(chat_id, message.id).await;
        }
        CallbackCommand::SwitchMode(mode) => {
            if let Err(e) = state.users.set_mode(user, mode) {
                tracing::warn!("cannot persist mode for {}: {e}", user.0);
            }
            let _ = bot.delete_message(chat_id, message.id).await;
        }
        CallbackCommand::AfterSubscribe => {
            // Re-check without re-sending the prompt; stay quiet if the user
            // still has not joined.
            if !subscription::ensure_subscribed(&bot, &state, chat_id, user, false).await {
                return Ok(());
            }
            let _ = bot.delete_message(chat_id, message.id).await;

            let animation = state.media.animation(&bot, AFTER_SUBSCRIBE_ANIMATION).await;
            let _ = bot
                .send_animation(chat_id, animation)
                .caption("<b><i>- Ну все, удачки в пользовании!)</i></b>")
                .parse_mode(ParseMode::Html)
                .await;
        }
    }

    Ok(())
}
