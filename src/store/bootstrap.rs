use reqwest::Client as HttpClient;
use std::path::Path;

use crate::error::{AppError, AppResult};

/// Makes sure an artifact exists locally, downloading it once if needed
///
/// Existing files are never re-fetched. The download is written to a sibling
/// temp file and renamed into place so a partial download never looks like a
/// valid artifact.
pub async fn ensure_artifact(
    path: impl AsRef<Path>,
    url: Option<&str>,
    http_client: &HttpClient,
) -> AppResult<()> {
    let path = path.as_ref();

    if tokio::fs::try_exists(path).await? {
        tracing::debug!(path = %path.display(), "Artifact present locally");
        return Ok(());
    }

    let url = url.ok_or_else(|| {
        AppError::Load(format!(
            "{} is missing and no download URL is configured",
            path.display()
        ))
    })?;

    tracing::info!(path = %path.display(), url = %url, "Downloading artifact");

    let response = http_client
        .get(url)
        .send()
        .await
        .map_err(|e| AppError::Load(format!("download from {} failed: {}", url, e)))?;

    if !response.status().is_success() {
        return Err(AppError::Load(format!(
            "download from {} returned status {}",
            url,
            response.status()
        )));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| AppError::Load(format!("download from {} failed: {}", url, e)))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    write_atomically(path, &bytes).await?;

    tracing::info!(path = %path.display(), bytes = bytes.len(), "Artifact downloaded");

    Ok(())
}

/// Writes to `<path>.part` and renames into place, removing the temp file on failure
async fn write_atomically(path: &Path, bytes: &[u8]) -> AppResult<()> {
    let tmp_path = path.with_extension("part");

    let result = match tokio::fs::write(&tmp_path, bytes).await {
        Ok(()) => tokio::fs::rename(&tmp_path, path).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        if let Err(cleanup) = tokio::fs::remove_file(&tmp_path).await {
            tracing::debug!(path = %tmp_path.display(), error = %cleanup, "Temp file not removed");
        }
        return Err(e.into());
    }

    Ok(())
}
