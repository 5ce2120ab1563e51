use std::{path::PathBuf, sync::Arc};

use teloxide::{
    net::Download,
    payloads::SendMessageSetters,
    prelude::*,
    types::ParseMode,
};

use ztb_core::domain::UserId;

use crate::router::{AppState, TEMP_DIR};

async fn download_voice(
    bot: &Bot,
    user: UserId,
    voice: &teloxide::types::Voice,
) -> anyhow::Result<PathBuf> {
    let file = bot.get_file(voice.file.id.clone()).await?;

    let dir = PathBuf::from(TEMP_DIR).join(user.0.to_string());
    tokio::fs::create_dir_all(&dir).await?;
    let path = dir.join(format!("{}.ogg", file.meta.unique_id));

    let mut dst = tokio::fs::File::create(&path).await?;
    bot.download_file(&file.path, &mut dst).await?;
    Ok(path)
}

pub async fn handle_voice(bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(from) = msg.from() else {
        return Ok(());
    };
    let Some(voice) = msg.voice() else {
        return Ok(());
    };
    let user = UserId(from.id.0 as i64);
    let user_dir = PathBuf::from(TEMP_DIR).join(user.0.to_string());

    let text = recognize_voice(&bot, &state, user, voice).await;

    let reply = match text {
        Some(text) => text,
        None => "<i>Не удалось распознать текст.</i>".to_string(),
    };
    let _ = bot
        .send_message(msg.chat.id, reply)
        .parse_mode(ParseMode::Html)
        .reply_to_message_id(msg.id)
        .await;

    // The per-user working directory goes away regardless of the outcome.
    let _ = tokio::fs::remove_dir_all(&user_dir).await;
    Ok(())
}

/// Download → transcode → recognize. Every failure is contained here and
/// collapses into `None`; the caller sends the fallback message.
async fn recognize_voice(
    bot: &Bot,
    state: &AppState,
    user: UserId,
    voice: &teloxide::types::Voice,
) -> Option<String> {
    let ogg_path = match download_voice(bot, user, voice).await {
        Ok(path) => path,
        Err(e) => {
            tracing::warn!("voice download failed for {}: {e}", user.0);
            return None;
        }
    };

    let wav_path = match ztb_speech::transcode_to_wav(&ogg_path).await {
        Ok(path) => path,
        Err(e) => {
            tracing::warn!("voice transcode failed for {}: {e}", user.0);
            return None;
        }
    };

    match state.speecher.recognize(&wav_path) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("voice recognition failed for {}: {e}", user.0);
            None
        }
    }
}
