/// Telegram user id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

/// Which way a translation request converts text.
///
/// `ToZoomer` turns standard Russian into the slang register, `FromZoomer`
/// turns slang back into literary Russian. The wire values ("to" / "from")
/// are what the user store and callback payloads carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TranslationMode {
    FromZoomer,
    ToZoomer,
}

impl TranslationMode {
    pub fn as_str(self) -> &'static str {
        match self {
            TranslationMode::FromZoomer => "from",
            TranslationMode::ToZoomer => "to",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "from" => Some(TranslationMode::FromZoomer),
            "to" => Some(TranslationMode::ToZoomer),
            _ => None,
        }
    }

    /// The opposite direction; used by the mode-switcher keyboard.
    pub fn inverted(self) -> Self {
        match self {
            TranslationMode::FromZoomer => TranslationMode::ToZoomer,
            TranslationMode::ToZoomer => TranslationMode::FromZoomer,
        }
    }
}

impl std::fmt::Display for TranslationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inline-callback commands, parsed once at the platform boundary.
///
/// Handlers match on this enum instead of the raw payload strings, so the
/// business logic never sees presentation-layer literals.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallbackCommand {
    /// "I subscribed!" button under the subscribe prompt.
    AfterSubscribe,
    /// Delete the message carrying the button.
    Delete,
    /// Persist a new translation direction.
    SwitchMode(TranslationMode),
}

impl CallbackCommand {
    /// Parses a raw callback payload. Unknown payloads yield `None` and are
    /// silently ignored upstream.
    pub fn parse(data: &str) -> Option<Self> {
        match data {
            "after_subscribe" => Some(CallbackCommand::AfterSubscribe),
            "delete" => Some(CallbackCommand::Delete),
            _ => data
                .strip_prefix("switch_mode_")
                .and_then(TranslationMode::parse)
                .map(CallbackCommand::SwitchMode),
        }
    }

    pub fn payload(self) -> String {
        match self {
            CallbackCommand::AfterSubscribe => "after_subscribe".to_string(),
            CallbackCommand::Delete => "delete".to_string(),
            CallbackCommand::SwitchMode(mode) => format!("switch_mode_{mode}"),
        }
    }
}

/// Reply-menu commands. The visible labels carry a leading emoji; parsing
/// strips it so the handlers never compare against decorated strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuCommand {
    Share,
    SwitchMode,
}

impl MenuCommand {
    pub const SHARE_LABEL: &'static str = "📢 Поделиться с друзьям";
    pub const SWITCH_MODE_LABEL: &'static str = "🔄 Переключить режим";

    pub fn parse(text: &str) -> Option<Self> {
        // Accept the label with or without its emoji prefix.
        let bare = text.split_once(' ').map(|(_, rest)| rest);
        for candidate in std::iter::once(text).chain(bare) {
            match candidate {
                "Поделиться с друзьям" => return Some(MenuCommand::Share),
                "Переключить режим" => return Some(MenuCommand::SwitchMode),
                _ => {}
            }
        }
        None
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuCommand::Share => Self::SHARE_LABEL,
            MenuCommand::SwitchMode => Self::SWITCH_MODE_LABEL,
        }
    }
}
