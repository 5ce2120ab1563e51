//! Offline speech-to-text adapter.
//!
//! Voice attachments arrive as `*.ogg`; ffmpeg transcodes them to the
//! canonical waveform (16 kHz, mono, 16-bit PCM) and VOSK runs recognition
//! over the result. The VOSK model is installed on first use from the
//! official model archive.

use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use ztb_core::{errors::Error, Result};

pub const MODELS_DIR: &str = "Data/VOSK";
pub const DOWNLOADS_DIR: &str = "Data";

/// Frames fed to the recognizer per step.
const CHUNK_FRAMES: usize = 4000;

/// Speech recognizer over a local VOSK model.
pub struct Speecher {
    model: vosk::Model,
}

impl Speecher {
    /// Opens the named model under `Data/VOSK`, downloading and unpacking it
    /// first when absent.
    pub async fn load(model_name: &str) -> Result<Self> {
        let model_dir = Path::new(MODELS_DIR).join(model_name);
        if !model_dir.exists() {
            if let Err(e) = install_model(model_name).await {
                error!("unable to install VOSK model \"{model_name}\": {e}");
                return Err(e);
            }
        }
        Self::from_dir(&model_dir)
    }

    pub fn from_dir(model_dir: &Path) -> Result<Self> {
        let path = model_dir.to_string_lossy().into_owned();
        let model = vosk::Model::new(path).ok_or_else(|| {
            Error::External(format!("cannot open VOSK model at {}", model_dir.display()))
        })?;
        Ok(Self { model })
    }

    /// Recognizes speech in a canonical-format WAV file.
    ///
    /// Feeds the waveform in fixed-size chunks, accumulating finalized
    /// partial texts plus the final result. Returns `None` when nothing was
    /// recognized.
    pub fn recognize(&self, path: &Path) -> Result<Option<String>> {
        use vosk::DecodingState;

        let mut reader = hound::WavReader::open(path)
            .map_err(|e| Error::Decode(format!("cannot read {}: {e}", path.display())))?;
        let sample_rate = reader.spec().sample_rate;

        let samples: Vec<i16> = reader
            .samples::<i16>()
            .collect::<std::result::Result<_, _>>()
            .map_err(|e| Error::Decode(format!("bad samples in {}: {e}", path.display())))?;

        let mut recognizer = vosk::Recognizer::new(&self.model, sample_rate as f32)
            .ok_or_else(|| Error::External("cannot create VOSK recognizer".to_string()))?;

        let mut text = String::new();
        for chunk in samples.chunks(CHUNK_FRAMES) {
            let state = recognizer
                .accept_waveform(chunk)
                .map_err(|e| Error::External(format!("recognizer rejected waveform: {e}")))?;
            if matches!(state, DecodingState::Finalized) {
                if let Some(result) = recognizer.result().single() {
                    text.push_str(result.text);
                    text.push(' ');
                }
            }
        }
        if let Some(result) = recognizer.final_result().single() {
            text.push_str(result.text);
        }

        Ok(normalize_transcript(text))
    }
}

/// Transcodes a voice attachment to the canonical waveform format.
///
/// On success the source file is removed and the path of the new `*.wav`
/// (same stem) is returned. On failure the source file is retained and an
/// error comes back; nothing is raised past this boundary by the callers.
pub async fn transcode_to_wav(path: &Path) -> Result<PathBuf> {
    let target = wav_path(path);

    let output = tokio::process::Command::new("ffmpeg")
        .args(["-y", "-i"])
        .arg(path)
        .args(["-ar", "16000", "-ac", "1", "-c:a", "pcm_s16le"])
        .arg(&target)
        .output()
        .await
        .map_err(|e| Error::External(format!("cannot run ffmpeg: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let brief: String = stderr.chars().take(300).collect();
        return Err(Error::External(format!("ffmpeg failed: {brief}")));
    }

    if let Err(e) = tokio::fs::remove_file(path).await {
        warn!("cannot remove transcoded source {}: {e}", path.display());
    }

    Ok(target)
}

/// The canonical output path for a transcoded attachment: same stem, `.wav`.
pub fn wav_path(source: &Path) -> PathBuf {
    source.with_extension("wav")
}

fn normalize_transcript(text: String) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Downloads and unpacks the named model from the official archive list.
async fn install_model(model_name: &str) -> Result<()> {
    let url = format!("https://alphacephei.com/vosk/models/{model_name}.zip");
    let archive_path = Path::new(DOWNLOADS_DIR).join(format!("{model_name}.zip"));
    info!("installing VOSK model \"{model_name}\"");

    let response = reqwest::get(&url)
        .await
        .map_err(|e| Error::Transport(format!("model download failed: {e}")))?;
    if !response.status().is_success() {
        return Err(Error::Transport(format!(
            "model download failed: HTTP {}",
            response.status()
        )));
    }
    let bytes = response
        .bytes()
        .await
        .map_err(|e| Error::Transport(format!("model download failed: {e}")))?;

    tokio::fs::create_dir_all(MODELS_DIR).await?;
    tokio::fs::write(&archive_path, &bytes).await?;

    let file = std::fs::File::open(&archive_path)?;
    let mut archive = zip::ZipArchive::new(file)
        .map_err(|e| Error::Decode(format!("bad model archive: {e}")))?;
    archive
        .extract(MODELS_DIR)
        .map_err(|e| Error::Decode(format!("cannot extract model archive: {e}")))?;

    tokio::fs::remove_file(&archive_path).await?;
    Ok(())
}
