use super::error::CompletionError;
use crate::infrastructure::repositories::DidTalksRepository;
use std::path::{Path, PathBuf};

/// Save a finished video as `talk_<unix seconds>.mp4` under `save_dir`.
/// A failed download is not retried.
pub async fn download_video(
    talks: &DidTalksRepository,
    video_url: &str,
    save_dir: &Path,
) -> Result<PathBuf, CompletionError> {
    tokio::fs::create_dir_all(save_dir)
        .await
        .map_err(|e| CompletionError::Download(format!("cannot create {}: {}", save_dir.display(), e)))?;

    let filename = format!("talk_{}.mp4", chrono::Utc::now().timestamp());
    let save_path = save_dir.join(filename);

    tracing::info!(url = video_url, "Downloading video");

    match talks.download(video_url, &save_path).await {
        Ok(bytes) => {
            tracing::info!(path = %save_path.display(), size_bytes = bytes, "Video saved");
            Ok(save_path)
        }
        Err(e) => {
            // Drop any partial file
            let _ = tokio::fs::remove_file(&save_path).await;
            tracing::error!(error = %e, "Failed to download video");
            Err(CompletionError::Download(e.to_string()))
        }
    }
}
