use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

const FILE_PREFIX: &str = "output_";
const FILE_EXTENSION: &str = ".mp3";

/// A file written by [`AudioStore::save`]
#[derive(Debug, Clone)]
pub struct StoredAudio {
    pub filename: String,
    pub path: PathBuf,
}

/// Directory of generated audio artifacts.
///
/// After each write only the newest `retention` artifacts are kept. There is
/// no locking: concurrent writers may race on the directory listing, which at
/// worst leaves an extra file until the next write.
pub struct AudioStore {
    dir: PathBuf,
    retention: usize,
}

impl AudioStore {
    /// `retention == 0` disables cleanup
    pub fn new(dir: impl Into<PathBuf>, retention: usize) -> Self {
        Self {
            dir: dir.into(),
            retention,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn ensure_dir(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }

    /// Write one new artifact, then prune older ones
    pub async fn save(&self, audio: &[u8]) -> io::Result<StoredAudio> {
        self.ensure_dir().await?;

        let filename = generate_filename();
        let path = self.dir.join(&filename);
        tokio::fs::write(&path, audio).await?;

        tracing::info!(
            path = %path.display(),
            size_bytes = audio.len(),
            "Audio saved"
        );

        // Cleanup failures never fail the write that triggered them
        if let Err(e) = self.enforce_retention().await {
            tracing::warn!(error = %e, dir = %self.dir.display(), "Audio retention cleanup failed");
        }

        Ok(StoredAudio { filename, path })
    }

    /// Resolve a caller supplied file name inside the store.
    /// Returns `None` for names that could escape the directory.
    pub fn resolve(&self, filename: &str) -> Option<PathBuf> {
        let is_plain_name = !filename.is_empty()
            && !filename.contains(['/', '\\'])
            && filename != "."
            && filename != ".."
            && !filename.contains("..");

        is_plain_name.then(|| self.dir.join(filename))
    }

    /// Read an artifact, `Ok(None)` when it does not exist
    pub async fn read(&self, filename: &str) -> io::Result<Option<Vec<u8>>> {
        let Some(path) = self.resolve(filename) else {
            return Ok(None);
        };

        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Delete all but the newest `retention` artifacts. Returns how many were removed.
    pub async fn enforce_retention(&self) -> io::Result<usize> {
        if self.retention == 0 {
            return Ok(0);
        }

        let mut artifacts: Vec<(SystemTime, String, PathBuf)> = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().into_owned();
            if !is_artifact_name(&name) {
                continue;
            }
            let metadata = match entry.metadata().await {
                Ok(metadata) if metadata.is_file() => metadata,
                // Deleted by a concurrent cleanup, or not a regular file
                _ => continue,
            };
            let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
            artifacts.push((modified, name, entry.path()));
        }

        if artifacts.len() <= self.retention {
            return Ok(0);
        }

        // Oldest first; names carry a timestamp so they break mtime ties
        artifacts.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
        let excess = artifacts.len() - self.retention;

        let mut removed = 0;
        for (_, name, path) in artifacts.into_iter().take(excess) {
            match tokio::fs::remove_file(&path).await {
                Ok(()) => {
                    removed += 1;
                    tracing::debug!(file = %name, "Removed old audio artifact");
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e),
            }
        }

        if removed > 0 {
            tracing::info!(removed = removed, kept = self.retention, "Audio retention applied");
        }

        Ok(removed)
    }
}

fn is_artifact_name(name: &str) -> bool {
    name.starts_with(FILE_PREFIX) && name.ends_with(FILE_EXTENSION)
}

/// `output_<unix millis>_<8 hex>.mp3`
fn generate_filename() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("{}{}_{}{}", FILE_PREFIX, millis, &suffix[..8], FILE_EXTENSION)
}
