//! Streaming gzip/tar extraction into the install directory.
//!
//! The extractor runs on a blocking task and consumes chunks from a bounded
//! channel. Its completion is reported through its own join handle, so the
//! caller waits for files to be written rather than for the last byte to
//! arrive.

use std::io::{self, Read};
use std::path::Path;

use bytes::{Buf, Bytes};
use flate2::read::GzDecoder;
use tar::Archive;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::{InstallError, Result};

/// Chunks buffered between the download and the extractor.
const CHANNEL_CAPACITY: usize = 16;

/// Handle to a running gzip/tar extraction.
#[derive(Debug)]
pub struct ArchiveExtractor {
    sender: mpsc::Sender<Bytes>,
    task: JoinHandle<io::Result<()>>,
}

impl ArchiveExtractor {
    /// Starts an extractor unpacking into `destination`.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn spawn(destination: &Path) -> Self {
        let (sender, receiver) = mpsc::channel(CHANNEL_CAPACITY);
        let destination = destination.to_path_buf();
        let task =
            tokio::task::spawn_blocking(move || unpack(ChannelReader::new(receiver), &destination));
        Self { sender, task }
    }

    /// Hands one chunk of compressed data to the extractor.
    ///
    /// Returns `false` once the extractor no longer reads, either because it
    /// reached the end of the archive or because it failed.
    pub async fn feed(&self, chunk: Bytes) -> bool {
        self.sender.send(chunk).await.is_ok()
    }

    /// Signals end of input and waits for the extractor to finish.
    pub async fn finish(self) -> Result<()> {
        let Self { sender, task } = self;
        drop(sender);
        match task.await {
            Ok(result) => result.map_err(InstallError::Extraction),
            Err(join_error) => Err(InstallError::Extraction(io::Error::other(join_error))),
        }
    }
}

/// Unpacks a gzip-compressed tar stream into `destination`.
fn unpack<R: Read>(reader: R, destination: &Path) -> io::Result<()> {
    tracing::debug!("Extracting tar.gz stream into {}", destination.display());
    let mut archive = Archive::new(GzDecoder::new(reader));
    archive.set_preserve_permissions(true);
    archive.set_overwrite(true);
    archive.unpack(destination)?;
    tracing::debug!("Extraction finished");
    Ok(())
}

/// Blocking [`Read`] over chunks arriving on a channel.
///
/// End of input is the sender being dropped.
struct ChannelReader {
    receiver: mpsc::Receiver<Bytes>,
    current: Bytes,
}

impl ChannelReader {
    fn new(receiver: mpsc::Receiver<Bytes>) -> Self {
        Self {
            receiver,
            current: Bytes::new(),
        }
    }
}

impl Read for ChannelReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        while !self.current.has_remaining() {
            match self.receiver.blocking_recv() {
                Some(chunk) => self.current = chunk,
                None => return Ok(0),
            }
        }
        let len = buf.len().min(self.current.remaining());
        self.current.copy_to_slice(&mut buf[..len]);
        Ok(len)
    }
}
