use crate::domain::TranslationMode;

const TO_ZOOMER: &str = "Переведи следующий текст на русский зумерский язык. \
Сохрани оригинальное форматирование и абзацы, если они есть. Не разбивай на отдельные строки. \
Не добавляй ничего от себя!";

const FROM_ZOOMER: &str = "Переведи следующий текст с зумерского на литературный русский. \
Сохрани оригинальное форматирование и абзацы, если они есть. Не разбивай на отдельные строки. \
Не добавляй ничего от себя!";

/// Fixed instruction preamble for a direction. Not templated on user input.
pub fn preamble(mode: TranslationMode) -> &'static str {
    match mode {
        TranslationMode::ToZoomer => TO_ZOOMER,
        TranslationMode::FromZoomer => FROM_ZOOMER,
    }
}

/// The full prompt sent to the remote service: preamble, line break, text.
pub fn compose(mode: TranslationMode, text: &str) -> String {
    format!("{}\n{}", preamble(mode), text)
}
