use super::model::VideoInfo;
use anyhow::{anyhow, Context};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;
use youtube_dl::{SingleVideo, YoutubeDl};

/// Anything that can resolve an identifier into video metadata.
#[async_trait]
pub trait MetadataClient: Send + Sync {
    async fn fetch(&self, identifier: &str) -> anyhow::Result<VideoInfo>;
}

/// Metadata client backed by the yt-dlp executable.
#[derive(Debug, Clone)]
pub struct YtDlpClient {
    socket_timeout: String,
    executable: Option<PathBuf>,
}

impl YtDlpClient {
    pub fn new(socket_timeout: impl Into<String>, executable: Option<PathBuf>) -> Self {
        Self {
            socket_timeout: socket_timeout.into(),
            executable,
        }
    }
}

#[async_trait]
impl MetadataClient for YtDlpClient {
    async fn fetch(&self, identifier: &str) -> anyhow::Result<VideoInfo> {
        let mut command = YoutubeDl::new(identifier);
        command.socket_timeout(self.socket_timeout.as_str());
        if let Some(path) = &self.executable {
            command.youtube_dl_path(path);
        }

        let output = match command.run_async().await {
            Ok(output) => output,
            Err(error) => {
                if error.to_string().contains("ERROR: Unsupported URL") {
                    return Err(anyhow!("Unsupported URL: {}", identifier));
                }
                return Err(error).context("yt-dlp failed to extract metadata");
            }
        };

        let video = output
            .into_single_video()
            .context("Expected a single video, got a playlist")?;
        debug!(url = %identifier, "yt-dlp returned metadata");

        project(video)
    }
}

/// Binds only the fields this tool reports on.
fn project(video: SingleVideo) -> anyhow::Result<VideoInfo> {
    let raw = serde_json::to_value(&video).context("Failed to read yt-dlp output")?;
    serde_json::from_value(raw).context("Failed to parse yt-dlp output")
}
