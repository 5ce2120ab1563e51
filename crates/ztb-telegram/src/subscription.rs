use teloxide::{
    payloads::SendAnimationSetters,
    prelude::*,
    types::{ChatMemberKind, ParseMode},
};

use ztb_core::{domain::UserId, settings::Subscription};

use crate::{keyboards, router::AppState};

const SUBSCRIBE_ANIMATION: &str = "Data/Materials/Animation/subscribe.mp4";

/// True iff the user is a member of every required channel. A failed lookup
/// counts as not subscribed.
pub async fn is_subscribed(bot: &Bot, user: UserId, subscriptions: &[Subscription]) -> bool {
    for sub in subscriptions {
        let member = match bot
            .get_chat_member(ChatId(sub.id), teloxide::types::UserId(user.0 as u64))
            .await
        {
            Ok(member) => member,
            Err(e) => {
                tracing::warn!("membership check failed for channel {}: {e}", sub.id);
                return false;
            }
        };

        let present = matches!(
            member.kind,
            ChatMemberKind::Owner(_)
                | ChatMemberKind::Administrator(_)
                | ChatMemberKind::Member
                | ChatMemberKind::Restricted(_)
        );
        if !present {
            return false;
        }
    }
    true
}

/// Subscription gate: checks membership and, when `autosend` is set, sends
/// the subscribe prompt on failure. Returns whether the user may proceed.
pub async fn ensure_subscribed(
    bot: &Bot,
    state: &AppState,
    chat_id: ChatId,
    user: UserId,
    autosend: bool,
) -> bool {
    if state.cfg.subscriptions.is_empty() {
        return true;
    }
    if is_subscribed(bot, user, &state.cfg.subscriptions).await {
        return true;
    }

    if autosend {
        let caption = concat!(
            "<b><i>Для пользования этим ботом подпишись на наш новостной канал и на послания!</i></b> 💋\n\n",
            "Как подпишешься, дави на кнопку \"Я подписался!\""
        );
        let animation = state.media.animation(bot, SUBSCRIBE_ANIMATION).await;
        let _ = bot
            .send_animation(chat_id, animation)
            .caption(caption)
            .parse_mode(ParseMode::Html)
            .reply_markup(keyboards::subscribe(&state.cfg.subscriptions))
            .await;
    }

    false
}
