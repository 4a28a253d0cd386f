//! HTTP model source used by `scriptscan setup --model-url`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use futures_util::{Stream, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use scriptscan_core::{ModelSource, ModelSourceError};
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

/// Downloads the entity model from a URL, with a terminal progress bar.
pub struct HttpModelSource {
    client: Client,
    url: String,
}

impl HttpModelSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }

    fn progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec})")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );
        pb
    }
}

#[async_trait]
impl ModelSource for HttpModelSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self, dest: &Path) -> Result<u64, ModelSourceError> {
        let response = self
            .client
            .get(&self.url)
            .header("User-Agent", "scriptscan")
            .send()
            .await
            .map_err(|e| ModelSourceError::Transfer(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ModelSourceError::Transfer(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let total_size = response.content_length().unwrap_or(0);
        debug!(target: "scriptscan.setup", url = %self.url, total_size, "Model download started");

        let pb = Self::progress_bar(total_size);
        let written = write_stream(response.bytes_stream(), dest, &pb).await;
        pb.finish_and_clear();
        written
    }
}

/// Sibling of `dest` that receives the bytes until the transfer completes.
fn partial_path(dest: &Path) -> PathBuf {
    let mut name = dest.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}

/// Write `stream` to `dest` through a `.part` file.
///
/// `dest` is only replaced once every chunk has been written; on failure
/// the partial file is removed.
async fn write_stream<S, B, E>(stream: S, dest: &Path, pb: &ProgressBar) -> Result<u64, ModelSourceError>
where
    S: Stream<Item = Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
    E: std::fmt::Display,
{
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| ModelSourceError::Io(e.to_string()))?;
    }

    let part = partial_path(dest);
    match copy_into(stream, &part, pb).await {
        Ok(downloaded) => {
            fs::rename(&part, dest)
                .await
                .map_err(|e| ModelSourceError::Io(e.to_string()))?;
            Ok(downloaded)
        }
        Err(e) => {
            if let Err(cleanup) = fs::remove_file(&part).await {
                warn!(target: "scriptscan.setup", path = %part.display(), error = %cleanup, "Could not remove partial download");
            }
            Err(e)
        }
    }
}

async fn copy_into<S, B, E>(mut stream: S, path: &Path, pb: &ProgressBar) -> Result<u64, ModelSourceError>
where
    S: Stream<Item = Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
    E: std::fmt::Display,
{
    let mut file = File::create(path)
        .await
        .map_err(|e| ModelSourceError::Io(e.to_string()))?;

    let mut downloaded: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| ModelSourceError::Transfer(e.to_string()))?;
        let bytes = chunk.as_ref();
        file.write_all(bytes)
            .await
            .map_err(|e| ModelSourceError::Io(e.to_string()))?;
        downloaded += bytes.len() as u64;
        pb.set_position(downloaded);
    }

    file.flush()
        .await
        .map_err(|e| ModelSourceError::Io(e.to_string()))?;
    Ok(downloaded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_itself_by_url() {
        let source = HttpModelSource::new("https://example.com/entity_model.json");
        assert_eq!(source.describe(), "https://example.com/entity_model.json");
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transfer_error() {
        let temp = tempfile::tempdir().unwrap();
        let source = HttpModelSource::new("http://127.0.0.1:9/model.json");

        let err = source
            .fetch(&temp.path().join("model.json"))
            .await
            .unwrap_err();

        assert!(matches!(err, ModelSourceError::Transfer(_)));
        assert!(!temp.path().join("model.json").exists());
    }

    #[tokio::test]
    async fn interrupted_transfer_keeps_previous_model() {
        let temp = tempfile::tempdir().unwrap();
        let dest = temp.path().join("model").join("entities.json");
        std::fs::create_dir_all(dest.parent().unwrap()).unwrap();
        std::fs::write(&dest, "previous").unwrap();

        let chunks = futures_util::stream::iter(vec![
            Ok(b"{\"version\"".to_vec()),
            Err("connection reset".to_string()),
        ]);
        let err = write_stream(chunks, &dest, &ProgressBar::hidden())
            .await
            .unwrap_err();

        assert!(matches!(err, ModelSourceError::Transfer(ref m) if m == "connection reset"));
        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "previous");
        assert!(!partial_path(&dest).exists());
    }

    #[tokio::test]
    async fn completed_transfer_replaces_destination() {
        let temp = tempfile::tempdir().unwrap();
        let dest = temp.path().join("model").join("entities.json");

        let chunks = futures_util::stream::iter(vec![
            Ok::<_, String>(b"{}".to_vec()),
            Ok(b"\n".to_vec()),
        ]);
        let written = write_stream(chunks, &dest, &ProgressBar::hidden())
            .await
            .unwrap();

        assert_eq!(written, 3);
        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "{}\n");
        assert!(!partial_path(&dest).exists());
    }
}
