use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use ztb_core::{
    domain::TranslationMode,
    materials::MaterialsValidator,
    ports::Translator,
    settings::Settings,
};
use ztb_neurohub::NeuroHubClient;
use ztb_speech::Speecher;

const SETTINGS_PATH: &str = "Settings.json";

#[derive(Parser, Debug)]
#[command(name = "ztb", version, about = "Russian↔zoomer slang translator bot")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the list of required materials and their status.
    Materials,
    /// Check that every required material exists and has content.
    Validate,
    /// Translate text from the command line.
    Translate {
        /// Text to translate.
        text: String,
        /// Direction: "from" (slang→standard) or "to" (standard→slang).
        #[arg(value_parser = parse_mode)]
        mode: TranslationMode,
        /// Print the result as a JSON object.
        #[arg(long)]
        json: bool,
    },
}

fn parse_mode(raw: &str) -> Result<TranslationMode, String> {
    TranslationMode::parse(raw).ok_or_else(|| format!("unknown mode \"{raw}\", expected from|to"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    ztb_core::logging::init("ztb")?;

    match cli.command {
        Some(Command::Materials) => print_materials(),
        Some(Command::Validate) => run_validation(),
        Some(Command::Translate { text, mode, json }) => translate(&text, mode, json).await?,
        None => run_bot().await?,
    }

    Ok(())
}

fn print_materials() {
    let validator = MaterialsValidator::default();
    for (category, files) in validator.statuses() {
        println!("=== {} ===", category.to_uppercase());
        for status in files {
            let marker = if status.ok() {
                "ok"
            } else if !status.exists {
                "missing"
            } else {
                "empty"
            };
            println!(" > {} [{marker}]", status.path.display());
        }
    }
}

fn run_validation() {
    let validator = MaterialsValidator::default();

    println!("=== EXISTS ===");
    for category in validator.categories() {
        let missing = validator.missing_files(category);
        if missing.is_empty() {
            println!("All files in category {category} exist.");
        } else {
            println!("In category {category} not found:");
            for path in missing {
                println!(" > {}", path.display());
            }
        }
    }

    println!("=== FILLED ===");
    for category in validator.categories() {
        let empty = validator.empty_files(category);
        if empty.is_empty() {
            println!("All files in category {category} filled.");
        } else {
            println!("In category {category} empty files:");
            for path in empty {
                println!(" > {}", path.display());
            }
        }
    }
}

async fn translate(text: &str, mode: TranslationMode, json: bool) -> anyhow::Result<()> {
    let settings = Settings::load(SETTINGS_PATH).context("cannot load settings")?;
    let client = NeuroHubClient::new(settings.neurohub);

    let output = run_translate(&client, text, mode, json).await?;
    println!("{output}");
    Ok(())
}

/// The line the `translate` command prints. With `--json` even failures
/// come back as a printable result object; otherwise a failed request turns
/// into an error report.
async fn run_translate(
    client: &NeuroHubClient,
    text: &str,
    mode: TranslationMode,
    json: bool,
) -> anyhow::Result<String> {
    let result = client.translate(mode, text).await;

    if json {
        return Ok(serde_json::to_string(&result)?);
    }

    match result.value() {
        Some(translated) => Ok(translated.to_string()),
        None => {
            let mut report = format!("translation failed (code {})", result.code);
            for message in &result.messages {
                report.push_str(&format!("\n > {message}"));
            }
            Err(anyhow::anyhow!(report))
        }
    }
}

async fn run_bot() -> anyhow::Result<()> {
    let settings = Arc::new(Settings::load(SETTINGS_PATH).context("cannot load settings")?);
    tokio::fs::create_dir_all(ztb_telegram::router::TEMP_DIR).await?;

    // Missing materials degrade specific replies; they do not block startup.
    if !MaterialsValidator::default().validate() {
        tracing::warn!("material validation failed; run `ztb validate` for the report");
    }

    let translator: Arc<dyn Translator> =
        Arc::new(NeuroHubClient::new(settings.neurohub.clone()));
    let speecher = Arc::new(Speecher::load(&settings.vosk_model).await?);

    ztb_telegram::router::run_polling(settings, translator, speecher).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use ztb_core::settings::{NeuroHubOptions, Provider};

    fn options() -> NeuroHubOptions {
        NeuroHubOptions {
            port: 0,
            provider: Provider::Gemini,
            model: "gemini-2.0-flash".to_string(),
            force_proxy: false,
        }
    }

    /// One-shot HTTP stub standing in for the NeuroHub deployment.
    async fn spawn_stub(body: &'static str) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];

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
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        format!("http://{addr}")
    }

    #[tokio::test]
    async fn translate_json_prints_the_full_result_object() {
        let url = spawn_stub(r#"{"text":"дратути"}"#).await;
        let client = NeuroHubClient::with_base_url(options(), url);

        let output = run_translate(&client, "привет", TranslationMode::ToZoomer, true)
            .await
            .unwrap();
        assert_eq!(output, r#"{"code":200,"text":"дратути","messages":[]}"#);
    }

    #[tokio::test]
    async fn translate_plain_prints_only_the_text() {
        let url = spawn_stub(r#"{"text":"дратути"}"#).await;
        let client = NeuroHubClient::with_base_url(options(), url);

        let output = run_translate(&client, "привет", TranslationMode::ToZoomer, false)
            .await
            .unwrap();
        assert_eq!(output, "дратути");
    }

    #[tokio::test]
    async fn translate_plain_reports_failure_as_an_error() {
        // Bind then drop to get a port nothing listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = NeuroHubClient::with_base_url(options(), format!("http://{addr}"));
        let err = run_translate(&client, "привет", TranslationMode::ToZoomer, false)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("translation failed (code 0)"));
    }

    #[test]
    fn parses_the_translate_command() {
        let cli = Cli::try_parse_from(["ztb", "translate", "привет", "to", "--json"]).unwrap();
        match cli.command {
            Some(Command::Translate { text, mode, json }) => {
                assert_eq!(text, "привет");
                assert_eq!(mode, TranslationMode::ToZoomer);
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_an_unknown_mode() {
        assert!(Cli::try_parse_from(["ztb", "translate", "привет", "sideways"]).is_err());
    }

    #[test]
    fn no_subcommand_means_bot_mode() {
        let cli = Cli::try_parse_from(["ztb"]).unwrap();
        assert!(cli.command.is_none());
    }
}
