use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;
use tracing::{debug, info};

use crate::engine::gateway::{Gateway, GatewayError};
use crate::engine::prompt_builder::PromptBuilder;
use crate::model::media::{
    AspectRatio, ImageSize, MediaOperation, MediaResult, SourceImage,
};

/// The only failure text the user ever sees for media requests.
pub const MEDIA_ALERT: &str = "Hata oluştu. Lütfen tekrar dene.";

const READ_CHUNK: usize = 64 * 1024;
const DEFAULT_SOURCE_MIME: &str = "image/png";
/// Inline request payloads are capped at 20 MB by the provider.
pub const MAX_SOURCE_BYTES: u64 = 20 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediaError {
    #[error("a source image is required for this operation")]
    MissingSource,
    #[error("prompt is empty")]
    EmptyPrompt,
    #[error("could not read source image: {0}")]
    SourceRead(String),
    #[error("source image is too large ({bytes} bytes)")]
    SourceTooLarge { bytes: u64 },
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl MediaError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, MediaError::Gateway(e) if e.is_configuration())
    }
}

/// Progress reported while a request runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaPhase {
    ReadingSource(u8),
    Requesting,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MediaState {
    #[default]
    Idle,
    ReadingSource { progress: u8 },
    Requesting,
    Succeeded(MediaResult),
    Failed(String),
}

impl MediaState {
    pub fn is_busy(&self) -> bool {
        matches!(self, MediaState::ReadingSource { .. } | MediaState::Requesting)
    }

    pub fn advance(&mut self, phase: MediaPhase) {
        *self = match phase {
            MediaPhase::ReadingSource(progress) => MediaState::ReadingSource { progress },
            MediaPhase::Requesting => MediaState::Requesting,
        };
    }

    pub fn finish(&mut self, outcome: Result<MediaResult, MediaError>) {
        *self = match outcome {
            Ok(result) => MediaState::Succeeded(result),
            Err(_) => MediaState::Failed(MEDIA_ALERT.to_string()),
        };
    }
}

/// Visual-tools form as the user edits it.
#[derive(Debug, Clone, Default)]
pub struct MediaForm {
    pub operation: MediaOperation,
    pub prompt: String,
    pub ratio: AspectRatio,
    pub size: ImageSize,
    pub source: Option<PathBuf>,
}

impl MediaForm {
    /// Switching tabs drops the selected file.
    pub fn select_operation(&mut self, operation: MediaOperation) {
        if self.operation != operation {
            self.operation = operation;
            self.source = None;
        }
    }

    pub fn can_trigger(&self, busy: bool) -> bool {
        !busy
            && !self.prompt.trim().is_empty()
            && (!self.operation.requires_source() || self.source.is_some())
    }

    pub fn to_request(&self) -> Result<MediaRequest, MediaError> {
        if self.prompt.trim().is_empty() {
            return Err(MediaError::EmptyPrompt);
        }
        if self.operation.requires_source() && self.source.is_none() {
            return Err(MediaError::MissingSource);
        }

        Ok(MediaRequest {
            operation: self.operation,
            prompt: self.prompt.trim().to_string(),
            ratio: self.ratio,
            size: self.size,
            source: self
                .source
                .clone()
                .filter(|_| self.operation.accepts_source()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRequest {
    pub operation: MediaOperation,
    pub prompt: String,
    pub ratio: AspectRatio,
    pub size: ImageSize,
    pub source: Option<PathBuf>,
}

impl MediaRequest {
    fn build_prompt(&self, has_source: bool) -> String {
        match self.operation {
            MediaOperation::Generate => PromptBuilder::image(&self.prompt, self.size, self.ratio),
            MediaOperation::Edit => PromptBuilder::image_edit(&self.prompt),
            MediaOperation::Video => {
                PromptBuilder::video_frame(&self.prompt, self.ratio, has_source)
            }
        }
    }
}

/// Runs one media request end to end.
///
/// The credential is checked before the source file is read, so a
/// configuration error never costs a file read or a network call.
pub fn run_media_request(
    gateway: &dyn Gateway,
    request: &MediaRequest,
    mut on_phase: impl FnMut(MediaPhase),
) -> Result<MediaResult, MediaError> {
    if !gateway.has_credential() {
        return Err(GatewayError::MissingCredential.into());
    }
    if request.operation.requires_source() && request.source.is_none() {
        return Err(MediaError::MissingSource);
    }

    let source = match &request.source {
        Some(path) if request.operation.accepts_source() => {
            Some(read_source(path, |p| on_phase(MediaPhase::ReadingSource(p)))?)
        }
        _ => None,
    };

    on_phase(MediaPhase::Requesting);

    let prompt = request.build_prompt(source.is_some());
    let kind = request.operation.kind();
    info!(operation = ?request.operation, with_source = source.is_some(), "requesting media");

    let payload = gateway.generate_media(&prompt, kind, source.as_ref())?;
    Ok(MediaResult::from_payload(kind, payload))
}

/// Reads a local image into base64, reporting 0..=100 as it goes.
pub fn read_source(
    path: &Path,
    mut on_progress: impl FnMut(u8),
) -> Result<SourceImage, MediaError> {
    let read_err = |e: std::io::Error| MediaError::SourceRead(format!("{}: {e}", path.display()));

    let file = File::open(path).map_err(read_err)?;
    let total = file.metadata().map_err(read_err)?.len();
    if total > MAX_SOURCE_BYTES {
        return Err(MediaError::SourceTooLarge { bytes: total });
    }

    on_progress(0);

    // The file may grow after the size check.
    let mut reader = file.take(MAX_SOURCE_BYTES + 1);
    let mut bytes = Vec::with_capacity(usize::try_from(total).unwrap_or(0));
    let mut chunk = vec![0u8; READ_CHUNK];
    let mut read_so_far = 0u64;
    let mut last_reported = 0u8;

    loop {
        let n = reader.read(&mut chunk).map_err(read_err)?;
        if n == 0 {
            break;
        }
        bytes.extend_from_slice(&chunk[..n]);
        read_so_far += n as u64;

        if total > 0 {
            let progress = percent(read_so_far, total);
            if progress != last_reported {
                last_reported = progress;
                on_progress(progress);
            }
        }
    }

    if read_so_far > MAX_SOURCE_BYTES {
        return Err(MediaError::SourceTooLarge { bytes: read_so_far });
    }

    if last_reported != 100 {
        on_progress(100);
    }

    let mime_type = mime_guess::from_path(path)
        .first_raw()
        .filter(|m| m.starts_with("image/"))
        .unwrap_or(DEFAULT_SOURCE_MIME)
        .to_string();
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    debug!(%file_name, %mime_type, bytes = bytes.len(), "source image read");

    Ok(SourceImage {
        file_name,
        mime_type,
        data: STANDARD.encode(&bytes),
    })
}

fn percent(done: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    (done.saturating_mul(100) / total).min(100) as u8
}
