//! Streaming download of a release archive.

use futures_util::StreamExt;
use hyper::ext::ReasonPhrase;
use reqwest::StatusCode;

use crate::error::{InstallError, Result};
use crate::steps::extract::ArchiveExtractor;

/// User agent string for download requests.
const USER_AGENT_VALUE: &str = concat!(
    "frapps-launcher/",
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("CARGO_PKG_REPOSITORY"),
    ")"
);

/// Builds the HTTP client used for release downloads.
///
/// No timeouts are configured; a stalled server blocks the download.
pub fn build_client() -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT_VALUE)
        .build()?;
    Ok(client)
}

/// Issues the GET request and checks that the server answered `200 OK`.
///
/// The body is left unread so the caller can stream it.
pub async fn request_archive(client: &reqwest::Client, url: &str) -> Result<reqwest::Response> {
    tracing::info!("Starting streaming download from {}", url);

    let response = client.get(url).send().await?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(InstallError::DownloadFailed {
            status: status.as_u16(),
            status_text: status_text(&response),
        });
    }

    Ok(response)
}

/// Reason phrase the server sent, or the standard one for the status code.
///
/// hyper only records the phrase when it differs from the standard one.
fn status_text(response: &reqwest::Response) -> String {
    match response.extensions().get::<ReasonPhrase>() {
        Some(reason) => String::from_utf8_lossy(reason.as_bytes()).into_owned(),
        None => response
            .status()
            .canonical_reason()
            .unwrap_or_default()
            .to_string(),
    }
}

/// Bytes received so far while streaming a response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownloadProgress {
    /// Bytes downloaded so far.
    pub downloaded: u64,
    /// Total bytes announced by the server, 0 when unknown.
    pub total: u64,
}

impl DownloadProgress {
    /// Returns the progress as a fraction (0.0 to 1.0).
    #[must_use]
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        (self.downloaded as f64 / self.total as f64) as f32
    }

    /// Returns the progress as a percentage (0 to 100).
    #[must_use]
    pub fn percentage(&self) -> u8 {
        (self.fraction() * 100.0).min(100.0) as u8
    }
}

/// Pipes the response body into `extractor`.
///
/// Returns once the body is exhausted or the extractor stops accepting data.
/// This does not mean extraction is done; await the extractor for that.
pub async fn pipe_response(
    response: reqwest::Response,
    extractor: &ArchiveExtractor,
) -> Result<DownloadProgress> {
    let mut progress = DownloadProgress {
        downloaded: 0,
        total: response.content_length().unwrap_or(0),
    };

    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        progress.downloaded += chunk.len() as u64;

        tracing::trace!(
            "Downloaded {} / {} ({}%)",
            format_bytes(progress.downloaded),
            format_bytes(progress.total),
            progress.percentage()
        );

        if !extractor.feed(chunk).await {
            tracing::debug!("Extractor stopped reading; ending transfer");
            break;
        }
    }

    tracing::info!("Download complete: {}", format_bytes(progress.downloaded));
    Ok(progress)
}

/// Format bytes as a human-readable string.
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
