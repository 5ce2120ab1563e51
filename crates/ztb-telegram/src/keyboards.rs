use teloxide::types::{
    InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup, ReplyMarkup,
};

use ztb_core::{
    domain::{CallbackCommand, MenuCommand, TranslationMode},
    settings::Subscription,
};

/// Persistent reply menu shown after /start.
pub fn menu() -> ReplyMarkup {
    let rows = vec![
        vec![KeyboardButton::new(MenuCommand::Share.label())],
        vec![KeyboardButton::new(MenuCommand::SwitchMode.label())],
    ];
    ReplyMarkup::Keyboard(KeyboardMarkup::new(rows).resize_keyboard(true))
}

/// One join-link button per required channel plus the confirmation button.
pub fn subscribe(subscriptions: &[Subscription]) -> InlineKeyboardMarkup {
    let mut rows: Vec<Vec<InlineKeyboardButton>> = subscriptions
        .iter()
        .filter_map(|sub| {
            reqwest::Url::parse(&sub.link)
                .ok()
                .map(|url| vec![InlineKeyboardButton::url(sub.label.clone(), url)])
        })
        .collect();
    rows.push(vec![InlineKeyboardButton::callback(
        "Я подписался!",
        CallbackCommand::AfterSubscribe.payload(),
    )]);
    InlineKeyboardMarkup::new(rows)
}

/// Mode switcher: one button per direction, the current one marked.
pub fn switcher(current: TranslationMode) -> InlineKeyboardMarkup {
    let label = |mode: TranslationMode| {
        let text = match mode {
            TranslationMode::ToZoomer => "С нормального на зумерский",
            TranslationMode::FromZoomer => "С зумерского на нормальный",
        };
        if mode == current {
            format!("✅ {text}")
        } else {
            text.to_string()
        }
    };

    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback(
            label(TranslationMode::ToZoomer),
            CallbackCommand::SwitchMode(TranslationMode::ToZoomer).payload(),
        )],
        vec![InlineKeyboardButton::callback(
            label(TranslationMode::FromZoomer),
            CallbackCommand::SwitchMode(TranslationMode::FromZoomer).payload(),
        )],
    ])
}

/// Forward button under the share message.
pub fn share(bot_username: &str) -> InlineKeyboardMarkup {
    let handle = bot_username.trim_start_matches('@');
    let url = format!("https://t.me/{handle}");
    let row = match reqwest::Url::parse(&url) {
        Ok(url) => vec![InlineKeyboardButton::url("Перейти к боту", url)],
        Err(_) => vec![],
    };
    InlineKeyboardMarkup::new(vec![row])
}

/// Single self-delete button with a custom label.
pub fn delete(label: &str) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
        label.to_string(),
        CallbackCommand::Delete.payload(),
    )]])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribe_keyboard_has_one_row_per_channel_plus_confirm() {
        let subs = vec![
            Subscription {
                label: "Новости".to_string(),
                id: -100,
                link: "https://t.me/example".to_string(),
            },
            Subscription {
                label: "Послания".to_string(),
                id: -101,
                link: "https://t.me/example2".to_string(),
            },
        ];
        let kb = subscribe(&subs);
        assert_eq!(kb.inline_keyboard.len(), 3);
    }

    #[test]
    fn switcher_marks_only_the_current_mode() {
        let kb = switcher(TranslationMode::FromZoomer);
        let texts: Vec<&str> = kb
            .inline_keyboard
            .iter()
            .flatten()
            .map(|b| b.text.as_str())
            .collect();
        assert_eq!(texts.iter().filter(|t| t.starts_with('✅')).count(), 1);
        assert!(texts.iter().any(|t| t.contains("С зумерского") && t.starts_with('✅')));
    }

    #[test]
    fn delete_button_carries_the_delete_command() {
        let kb = delete("Был не прав, признаю!");
        let button = &kb.inline_keyboard[0][0];
        assert_eq!(
            ztb_core::domain::CallbackCommand::parse(match &button.kind {
                teloxide::types::InlineKeyboardButtonKind::CallbackData(data) => data,
                _ => panic!("expected callback button"),
            }),
            Some(CallbackCommand::Delete)
        );
    }
}
