use std::sync::Arc;

use teloxide::{dispatching::Dispatcher, dptree, prelude::*};

use ztb_core::{ports::Translator, settings::Settings, users::UserStore};
use ztb_speech::Speecher;

use crate::handlers;
use crate::media_cache::MediaCache;

pub const TEMP_DIR: &str = "Data/Temp";

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<Settings>,
    pub translator: Arc<dyn Translator>,
    pub speecher: Arc<Speecher>,
    pub users: UserStore,
    pub media: Arc<MediaCache>,
}

pub async fn run_polling(
    cfg: Arc<Settings>,
    translator: Arc<dyn Translator>,
    speecher: Arc<Speecher>,
) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.bot_token.clone());

    if let Ok(me) = bot.get_me().await {
        tracing::info!("ztb started: @{}", me.username());
    }

    let state = Arc::new(AppState {
        media: Arc::new(MediaCache::load(cfg.cache_chat_id)),
        cfg,
        translator,
        speecher,
        users: UserStore::new(ztb_core::users::DEFAULT_DIR),
    });

    let handler = dptree::entry()
        .branch(Update::filter_callback_query().endpoint(handlers::handle_callback))
        .branch(Update::filter_message().endpoint(handlers::handle_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .build()
        .dispatch()
        .await;

    Ok(())
}
