use std::{collections::HashMap, path::Path};

use teloxide::{prelude::*, types::InputFile};
use tokio::sync::Mutex;
use tracing::warn;

pub const STORE_PATH: &str = "Data/Temp/media_cache.json";

/// Upload-once cache for the bundled materials.
///
/// The first time a material is sent it goes to the cache chat as a regular
/// upload; the Telegram file id from the response is persisted and reused
/// for every later send. Any failure falls back to a plain file upload.
pub struct MediaCache {
    cache_chat: ChatId,
    ids: Mutex<HashMap<String, String>>,
}

impl MediaCache {
    pub fn load(cache_chat_id: i64) -> Self {
        let ids = std::fs::read_to_string(STORE_PATH)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();
        Self {
            cache_chat: ChatId(cache_chat_id),
            ids: Mutex::new(ids),
        }
    }

    async fn persist(&self, ids: &HashMap<String, String>) {
        if let Some(parent) = Path::new(STORE_PATH).parent() {
            let _ = tokio::fs::create_dir_all(parent).await;
        }
        match serde_json::to_string_pretty(ids) {
            Ok(raw) => {
                if let Err(e) = tokio::fs::write(STORE_PATH, raw).await {
                    warn!("cannot persist media cache: {e}");
                }
            }
            Err(e) => warn!("cannot serialize media cache: {e}"),
        }
    }

    /// Input for `send_animation`: cached file id, or the file itself on a
    /// cache miss (uploading to the cache chat to learn the id).
    pub async fn animation(&self, bot: &Bot, path: &str) -> InputFile {
        {
            let ids = self.ids.lock().await;
            if let Some(id) = ids.get(path) {
                return InputFile::file_id(id.clone());
            }
        }

        let uploaded = bot
            .send_animation(self.cache_chat, InputFile::file(Path::new(path).to_path_buf()))
            .await;
        match uploaded {
            Ok(msg) => {
                if let Some(animation) = msg.animation() {
                    let id = animation.file.id.clone();
                    let mut ids = self.ids.lock().await;
                    ids.insert(path.to_string(), id.clone());
                    self.persist(&ids).await;
                    return InputFile::file_id(id);
                }
            }
            Err(e) => warn!("cache upload failed for {path}: {e}"),
        }
        InputFile::file(Path::new(path).to_path_buf())
    }

    /// Same as [`MediaCache::animation`] for photos.
    pub async fn photo(&self, bot: &Bot, path: &str) -> InputFile {
        {
            let ids = self.ids.lock().await;
            if let Some(id) = ids.get(path) {
                return InputFile::file_id(id.clone());
            }
        }

        let uploaded = bot
            .send_photo(self.cache_chat, InputFile::file(Path::new(path).to_path_buf()))
            .await;
        match uploaded {
            Ok(msg) => {
                if let Some(sizes) = msg.photo() {
                    if let Some(best) = sizes.last() {
                        let id = best.file.id.clone();
                        let mut ids = self.ids.lock().await;
                        ids.insert(path.to_string(), id.clone());
                        self.persist(&ids).await;
                        return InputFile::file_id(id);
                    }
                }
            }
            Err(e) => warn!("cache upload failed for {path}: {e}"),
        }
        InputFile::file(Path::new(path).to_path_buf())
    }
}
