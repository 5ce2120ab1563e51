use std::{fs, path::Path};

use serde::Deserialize;

use crate::{errors::Error, Result};

/// NeuroHub provider. The deployment speaks to exactly one of these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    G4f,
    Gemini,
}

impl Provider {
    pub fn as_str(self) -> &'static str {
        match self {
            Provider::G4f => "g4f",
            Provider::Gemini => "gemini",
        }
    }
}

/// Options for the local NeuroHub deployment. Read-only after load; the
/// client takes them at construction time.
#[derive(Clone, Debug, Deserialize)]
pub struct NeuroHubOptions {
    pub port: u16,
    pub provider: Provider,
    pub model: String,
    #[serde(default)]
    pub force_proxy: bool,
}

/// One required channel subscription: the button label, the channel id used
/// for the membership check and the invite link shown to the user.
#[derive(Clone, Debug, Deserialize)]
pub struct Subscription {
    pub label: String,
    pub id: i64,
    pub link: String,
}

/// Typed settings for the bot, loaded once at startup from `Settings.json`.
/// Not hot-reloaded.
#[derive(Clone, Debug, Deserialize)]
pub struct Settings {
    pub bot_token: String,
    pub cache_chat_id: i64,
    #[serde(default)]
    pub subscriptions: Vec<Subscription>,
    pub vosk_model: String,
    pub neurohub: NeuroHubOptions,
}

impl Settings {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| {
            Error::Settings(format!("cannot read {}: {e}", path.display()))
        })?;
        let settings: Settings = serde_json::from_str(&raw)
            .map_err(|e| Error::Settings(format!("cannot parse {}: {e}", path.display())))?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.bot_token.trim().is_empty() {
            return Err(Error::Settings("bot_token is required".to_string()));
        }
        if self.vosk_model.trim().is_empty() {
            return Err(Error::Settings("vosk_model is required".to_string()));
        }
        if self.neurohub.model.trim().is_empty() {
            return Err(Error::Settings("neurohub.model is required".to_string()));
        }
        Ok(())
    }
}
