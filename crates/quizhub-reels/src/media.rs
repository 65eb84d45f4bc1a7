//! Media download and validation
//!
//! The publish dialog silently accepts images and then produces a still
//! post instead of a reel, so image content is rejected up front, as are
//! files too small to be real video. Remote videos are fetched to a
//! local temp file first; the browser can only upload what is on disk.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tracing::{info, instrument};

use crate::error::{PipelineError, PipelineResult};

/// Files below this size are never valid video
pub const MIN_VIDEO_BYTES: u64 = 1024;

/// Bound on the whole download, connect included
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(300);

const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "m4v", "avi", "mkv", "webm"];
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp", "heic"];

/// MIME type guessed from the file extension, when recognized
#[must_use]
pub fn guess_mime(path: &Path) -> Option<&'static str> {
    match extension(path)?.as_str() {
        "mp4" | "m4v" => Some("video/mp4"),
        "mov" => Some("video/quicktime"),
        "avi" => Some("video/x-msvideo"),
        "mkv" => Some("video/x-matroska"),
        "webm" => Some("video/webm"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

/// Validate a file for reel upload.
///
/// Accepts only recognized video extensions; any `image/*` file and any
/// file below [`MIN_VIDEO_BYTES`] is rejected.
pub fn validate_video(path: &Path) -> PipelineResult<()> {
    let Some(ext) = extension(path) else {
        return Err(PipelineError::Media(format!(
            "{}: missing or unrecognized extension",
            path.display()
        )));
    };

    if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        return Err(PipelineError::Media(format!(
            "{}: image files cannot be published as reels",
            path.display()
        )));
    }
    if !VIDEO_EXTENSIONS.contains(&ext.as_str()) {
        return Err(PipelineError::Media(format!(
            "{}: not a recognized video format",
            path.display()
        )));
    }

    let metadata = std::fs::metadata(path)
        .map_err(|e| PipelineError::Media(format!("{}: {e}", path.display())))?;
    if metadata.len() < MIN_VIDEO_BYTES {
        return Err(PipelineError::Media(format!(
            "{}: file is only {} bytes",
            path.display(),
            metadata.len()
        )));
    }

    Ok(())
}

/// Fetch a remote video into the local temp directory.
///
/// The response's `Content-Type` is checked before any byte is written:
/// `image/*` is rejected outright, and anything that is neither video
/// nor an opaque octet stream is refused. The body is streamed to disk
/// and the resulting file goes through [`validate_video`].
#[instrument]
pub async fn download_video(url: &str) -> PipelineResult<PathBuf> {
    let client = reqwest::Client::builder()
        .timeout(DOWNLOAD_TIMEOUT)
        .build()
        .map_err(|e| PipelineError::Media(format!("http client: {e}")))?;
    let mut response = client
        .get(url)
        .send()
        .await
        .map_err(|e| PipelineError::Media(format!("{url}: download failed: {e}")))?;
    if !response.status().is_success() {
        return Err(PipelineError::Media(format!(
            "{url}: download failed with status {}",
            response.status()
        )));
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    check_content_type(url, content_type.as_deref())?;

    let dir = std::env::temp_dir().join(format!("quizhub-reels-{}", std::process::id()));
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| PipelineError::Media(format!("{}: {e}", dir.display())))?;
    let path = dir.join(download_filename(url, content_type.as_deref()));

    let mut file = tokio::fs::File::create(&path)
        .await
        .map_err(|e| PipelineError::Media(format!("{}: {e}", path.display())))?;
    let mut written: u64 = 0;
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| PipelineError::Media(format!("{url}: download interrupted: {e}")))?
    {
        file.write_all(&chunk)
            .await
            .map_err(|e| PipelineError::Media(format!("{}: {e}", path.display())))?;
        written += chunk.len() as u64;
    }
    file.flush()
        .await
        .map_err(|e| PipelineError::Media(format!("{}: {e}", path.display())))?;

    validate_video(&path)?;
    info!(url, bytes = written, path = %path.display(), "video downloaded");
    Ok(path)
}

/// Reject downloads whose Content-Type cannot be a reel.
///
/// A missing header is tolerated; the extension check on the saved file
/// still applies.
fn check_content_type(url: &str, content_type: Option<&str>) -> PipelineResult<()> {
    let Some(content_type) = content_type else {
        return Ok(());
    };
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim()
        .to_ascii_lowercase();

    if mime.starts_with("image/") {
        return Err(PipelineError::Media(format!(
            "{url}: image content ({mime}) cannot be published as reels"
        )));
    }
    if mime.starts_with("video/") || mime == "application/octet-stream" {
        return Ok(());
    }
    Err(PipelineError::Media(format!(
        "{url}: content type {mime} is not video"
    )))
}

/// Local filename for a downloaded video.
///
/// The URL's last path segment is kept when it already looks like a
/// video file; otherwise an extension is derived from the Content-Type,
/// defaulting to mp4.
fn download_filename(url: &str, content_type: Option<&str>) -> String {
    let segment = url::Url::parse(url)
        .ok()
        .and_then(|u| {
            u.path_segments()
                .and_then(|mut s| s.next_back().map(str::to_string))
        })
        .filter(|s| !s.is_empty());

    if let Some(name) = &segment {
        if extension(Path::new(name))
            .is_some_and(|ext| VIDEO_EXTENSIONS.contains(&ext.as_str()))
        {
            return name.clone();
        }
    }

    let ext = match content_type.map(str::to_ascii_lowercase).as_deref() {
        Some(ct) if ct.starts_with("video/quicktime") => "mov",
        Some(ct) if ct.starts_with("video/webm") => "webm",
        Some(ct) if ct.starts_with("video/x-matroska") => "mkv",
        _ => "mp4",
    };
    match segment {
        Some(name) => format!("{name}.{ext}"),
        None => format!("reel.{ext}"),
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
}
