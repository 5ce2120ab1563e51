use serde::Serialize;

use crate::domain::TranslationMode;

/// Outcome of one translation request.
///
/// `code` is the HTTP-like status of the remote call (0 when the transport
/// itself failed). The text is usable only when the code indicates success;
/// callers must check before use.
#[derive(Clone, Debug, Serialize)]
pub struct TranslationResult {
    pub code: u16,
    pub text: Option<String>,
    pub messages: Vec<String>,
}

impl TranslationResult {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.code)
    }

    /// The translated text, if the request succeeded and carried one.
    pub fn value(&self) -> Option<&str> {
        if self.is_success() {
            self.text.as_deref()
        } else {
            None
        }
    }
}

/// Hexagonal port for the remote translation backend.
///
/// Implementations never propagate transport faults: a failed call comes
/// back as a `TranslationResult` with a failure code and diagnostics.
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, mode: TranslationMode, text: &str) -> TranslationResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_requires_success_code() {
        let ok = TranslationResult {
            code: 200,
            text: Some("дратути".to_string()),
            messages: vec![],
        };
        assert_eq!(ok.value(), Some("дратути"));

        let failed = TranslationResult {
            code: 0,
            text: Some("stale".to_string()),
            messages: vec!["transport error".to_string()],
        };
        assert!(!failed.is_success());
        assert_eq!(failed.value(), None);
    }

    #[test]
    fn serializes_to_the_cli_json_shape() {
        let result = TranslationResult {
            code: 200,
            text: Some("дратути".to_string()),
            messages: vec![],
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["code"], 200);
        assert_eq!(json["text"], "дратути");
        assert!(json["messages"].as_array().unwrap().is_empty());
    }
}
