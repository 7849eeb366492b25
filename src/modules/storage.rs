use crate::types::StorageContext;
use axum_typed_multipart::FieldData;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path};
use tempfile::NamedTempFile;
use ulid::Ulid;

#[derive(Debug)]
pub enum Error {
    UploadFailed,
    DeleteFailed,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct UploadedMedia {
    pub file_name: String,
    pub original_name: Option<String>,
    /// Absolute path of the stored copy.
    pub path: String,
}

fn generate_file_name(original_name: Option<&str>) -> String {
    let id = Ulid::new().to_string();

    let extension = original_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|extension| extension.to_str())
        .filter(|extension| {
            !extension.is_empty()
                && extension.len() <= 16
                && extension.chars().all(|c| c.is_ascii_alphanumeric())
        });

    match extension {
        Some(extension) => format!("{}.{}", id, extension.to_ascii_lowercase()),
        None => id,
    }
}

pub async fn upload_file(
    cfg: &StorageContext,
    file: FieldData<NamedTempFile>,
) -> Result<UploadedMedia, Error> {
    let contents = tokio::fs::read(file.contents.path()).await.map_err(|err| {
        tracing::error!("Failed to read the uploaded file {:?}", err);
        Error::UploadFailed
    })?;

    let original_name = file.metadata.file_name.clone();
    let file_name = generate_file_name(original_name.as_deref());
    let path = cfg.uploads_dir.join(&file_name);

    tokio::fs::create_dir_all(&cfg.uploads_dir)
        .await
        .map_err(|err| {
            tracing::error!("Failed to prepare uploads directory: {:?}", err);
            Error::UploadFailed
        })?;

    tokio::fs::write(&path, contents).await.map_err(|err| {
        tracing::error!("Failed to save uploaded file {}: {:?}", path.display(), err);
        Error::UploadFailed
    })?;

    tracing::debug!("Stored upload {:?} as {}", original_name, path.display());

    Ok(UploadedMedia {
        file_name,
        original_name,
        path: path.to_string_lossy().into_owned(),
    })
}

/// Removes a previously stored file. Paths outside the uploads directory are
/// never touched.
pub async fn delete_file(cfg: &StorageContext, path: &str) -> Result<(), Error> {
    let path = Path::new(path);

    let escapes = path
        .components()
        .any(|component| matches!(component, Component::ParentDir));

    if escapes || !path.starts_with(&cfg.uploads_dir) {
        tracing::warn!(
            "Refusing to delete {} outside of {}",
            path.display(),
            cfg.uploads_dir.display()
        );
        return Err(Error::DeleteFailed);
    }

    match tokio::fs::remove_file(path).await {
        Ok(_) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => {
            tracing::error!("Failed to delete file {}: {:?}", path.display(), err);
            Err(Error::DeleteFailed)
        }
    }
}
