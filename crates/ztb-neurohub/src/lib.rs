//! NeuroHub adapter (remote slang translation).
//!
//! Issues one awaited request per translation against the local NeuroHub
//! deployment and maps the response into a [`TranslationResult`]. Transport
//! faults never propagate past this crate: the caller always gets a result
//! back and is expected to check its status before using the text.

use tracing::{debug, warn};

use ztb_core::{
    domain::TranslationMode,
    errors::Error,
    ports::{TranslationResult, Translator},
    prompts,
    settings::NeuroHubOptions,
};

/// Status code reported when the transport itself failed and no HTTP status
/// exists.
pub const TRANSPORT_FAILURE_CODE: u16 = 0;

#[derive(Clone, Debug)]
pub struct NeuroHubClient {
    options: NeuroHubOptions,
    base_url: String,
    http: reqwest::Client,
}

impl NeuroHubClient {
    /// Builds a client for the deployment described by `options`. The
    /// options are immutable for the client's lifetime.
    pub fn new(options: NeuroHubOptions) -> Self {
        let base_url = format!("http://127.0.0.1:{}", options.port);
        Self::with_base_url(options, base_url)
    }

    /// Same as [`NeuroHubClient::new`] but against an explicit endpoint.
    /// Used by tests to point the client at a stub service.
    pub fn with_base_url(options: NeuroHubOptions, base_url: impl Into<String>) -> Self {
        Self {
            options,
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }

    /// One generation request; no retry at this layer.
    async fn generate(&self, prompt: &str) -> Result<(u16, Vec<u8>), Error> {
        let payload = serde_json::json!({
            "provider": self.options.provider.as_str(),
            "model": self.options.model,
            "force_proxy": self.options.force_proxy,
            "prompt": prompt,
        });

        let resp = self
            .http
            .post(format!("{}/generate", self.base_url))
            .json(&payload)
            .send()
            .await
            .map_err(|e| Error::Transport(format!("neurohub request failed: {e}")))?;

        let status = resp.status().as_u16();
        let body = resp
            .bytes()
            .await
            .map_err(|e| Error::Transport(format!("neurohub body read failed: {e}")))?;

        Ok((status, body.to_vec()))
    }

    pub async fn translate(&self, mode: TranslationMode, text: &str) -> TranslationResult {
        let prompt = prompts::compose(mode, text);
        debug!(%mode, chars = text.chars().count(), "sending translation request");

        let (code, body) = match self.generate(&prompt).await {
            Ok(pair) => pair,
            Err(e) => {
                warn!("translation transport failure: {e}");
                return TranslationResult {
                    code: TRANSPORT_FAILURE_CODE,
                    text: None,
                    messages: vec![e.to_string()],
                };
            }
        };

        let mut messages = Vec::new();
        let text = if body.is_empty() {
            messages.push(Error::EmptyResponse.to_string());
            None
        } else {
            match serde_json::from_slice::<serde_json::Value>(&body) {
                Ok(json) => {
                    let value = json
                        .get("text")
                        .and_then(|t| t.as_str())
                        .map(str::to_string);
                    if value.is_none() {
                        messages.push("response JSON has no \"text\" field".to_string());
                    }
                    value
                }
                Err(e) => {
                    messages.push(Error::Decode(format!("response is not JSON: {e}")).to_string());
                    None
                }
            }
        };

        TranslationResult {
            code,
            text,
            messages,
        }
    }
}

#[async_trait::async_trait]
impl Translator for NeuroHubClient {
    async fn translate(&self, mode: TranslationMode, text: &str) -> TranslationResult {
        NeuroHubClient::translate(self, mode, text).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use ztb_core::settings::Provider;

    fn options() -> NeuroHubOptions {
        NeuroHubOptions {
            port: 0,
            provider: Provider::Gemini,
            model: "gemini-2.0-flash".to_string(),
            force_proxy: false,
        }
    }

    /// One-shot HTTP stub: accepts a single connection, captures the request
    /// and answers with a canned status/body.
    async fn spawn_stub(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];

            // Read headers, then the content-length body.
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                request.extend_from_slice(&buf[..n]);
                let head_end = request.windows(4).position(|w| w == b"\r\n\r\n");
                let Some(head_end) = head_end else {
                    continue;
                };
                let head = String::from_utf8_lossy(&request[..head_end]).to_lowercase();
                let expected: usize = head
                    .lines()
                    .find_map(|l| l.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse().ok())
                    .unwrap_or(0);
                if request.len() >= head_end + 4 + expected {
                    break;
                }
            }

            let response = format!(
                "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();

            String::from_utf8_lossy(&request).to_string()
        });

        (format!("http://{addr}"), handle)
    }

    #[tokio::test]
    async fn maps_success_body_text() {
        let (url, handle) = spawn_stub("HTTP/1.1 200 OK", r#"{"text":"дратути"}"#).await;
        let client = NeuroHubClient::with_base_url(options(), url);

        let result = client.translate(TranslationMode::ToZoomer, "привет").await;
        assert_eq!(result.code, 200);
        assert!(result.is_success());
        assert_eq!(result.value(), Some("дратути"));

        let request = handle.await.unwrap();
        assert!(request.starts_with("POST /generate"));
        assert!(request.contains("\"provider\":\"gemini\""));
        assert!(request.contains("\"model\":\"gemini-2.0-flash\""));
        assert!(request.contains("\"force_proxy\":false"));
    }

    #[tokio::test]
    async fn prompt_carries_the_direction_preamble() {
        let (url, handle) = spawn_stub("HTTP/1.1 200 OK", r#"{"text":"ок"}"#).await;
        let client = NeuroHubClient::with_base_url(options(), url);

        let _ = client
            .translate(TranslationMode::FromZoomer, "кринж")
            .await;

        let request = handle.await.unwrap();
        let preamble_start = ztb_core::prompts::preamble(TranslationMode::FromZoomer)
            .chars()
            .take(20)
            .collect::<String>();
        // The JSON-escaped request still contains the raw preamble prefix.
        assert!(request.contains(&preamble_start));
    }

    #[tokio::test]
    async fn transport_failure_becomes_a_failure_result() {
        // Bind then drop to get a port nothing listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = NeuroHubClient::with_base_url(options(), format!("http://{addr}"));
        let result = client.translate(TranslationMode::ToZoomer, "привет").await;

        assert_eq!(result.code, TRANSPORT_FAILURE_CODE);
        assert!(!result.is_success());
        assert_eq!(result.value(), None);
        assert!(!result.messages.is_empty());
    }

    #[tokio::test]
    async fn non_json_body_keeps_status_and_notes_decode_failure() {
        let (url, _handle) = spawn_stub("HTTP/1.1 200 OK", "not json at all").await;
        let client = NeuroHubClient::with_base_url(options(), url);

        let result = client.translate(TranslationMode::ToZoomer, "привет").await;
        assert_eq!(result.code, 200);
        assert_eq!(result.text, None);
        assert!(result.messages.iter().any(|m| m.contains("decode")));
    }

    #[tokio::test]
    async fn error_status_is_reported_as_is() {
        let (url, _handle) =
            spawn_stub("HTTP/1.1 503 Service Unavailable", r#"{"error":"busy"}"#).await;
        let client = NeuroHubClient::with_base_url(options(), url);

        let result = client.translate(TranslationMode::ToZoomer, "привет").await;
        assert_eq!(result.code, 503);
        assert!(!result.is_success());
        assert_eq!(result.value(), None);
    }

    #[tokio::test]
    async fn empty_body_is_flagged() {
        let (url, _handle) = spawn_stub("HTTP/1.1 204 No Content", "").await;
        let client = NeuroHubClient::with_base_url(options(), url);

        let result = client.translate(TranslationMode::ToZoomer, "привет").await;
        assert_eq!(result.code, 204);
        assert_eq!(result.text, None);
        assert!(result.messages.iter().any(|m| m.contains("empty")));
    }
}
