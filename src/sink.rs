use crate::config::Config;
use std::io;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

pub fn resolve_sink_path(cfg: &Config, job_id: &str) -> PathBuf {
    let root = PathBuf::from(&cfg.paths.cache_dir);
    if cfg.paths.per_job_sink {
        root.join(job_id).join(&cfg.paths.image_filename)
    } else {
        root.join(&cfg.paths.image_filename)
    }
}

/// Creates or truncates `path` and writes `bytes` in a single call.
///
/// The file handle lives only inside this future, so it is closed on every
/// exit path, including when the future is dropped mid-write.
pub async fn write_image(path: &Path, bytes: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let mut file = tokio::fs::File::create(path).await?;
    file.write_all(bytes).await?;
    file.flush().await?;
    Ok(())
}
