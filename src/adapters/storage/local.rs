use crate::core::{ObjectLocation, Storage};
use crate::utils::error::{EtlError, Result};
use std::io::ErrorKind;
use std::path::PathBuf;

/// Filesystem stand-in for object storage: `<root>/<bucket>/<key>`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn object_path(&self, location: &ObjectLocation) -> Result<PathBuf> {
        let escapes = |part: &str| {
            part.is_empty()
                || part.starts_with('/')
                || part.split('/').any(|segment| segment == "..")
        };

        if escapes(&location.bucket) || location.bucket.contains('/') || escapes(&location.key) {
            return Err(EtlError::InvalidConfigValueError {
                field: "object location".to_string(),
                value: location.to_string(),
                reason: "bucket and key must stay inside the storage root".to_string(),
            });
        }

        Ok(self.root.join(&location.bucket).join(&location.key))
    }
}

fn map_io_error(error: std::io::Error, location: &ObjectLocation) -> EtlError {
    match error.kind() {
        ErrorKind::NotFound => EtlError::ObjectNotFound {
            location: location.to_string(),
        },
        ErrorKind::PermissionDenied => EtlError::AccessDenied {
            location: location.to_string(),
            message: error.to_string(),
        },
        _ => EtlError::IoError(error),
    }
}

impl Storage for LocalStorage {
    async fn read_object(&self, location: &ObjectLocation) -> Result<Vec<u8>> {
        let path = self.object_path(location)?;
        tracing::debug!("Reading {}", path.display());

        tokio::fs::read(&path)
            .await
            .map_err(|e| map_io_error(e, location))
    }

    async fn write_object(
        &self,
        location: &ObjectLocation,
        _content_type: &str,
        data: &[u8],
    ) -> Result<()> {
        let path = self.object_path(location)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| map_io_error(e, location))?;
        }

        tracing::debug!("Writing {} bytes to {}", data.len(), path.display());
        tokio::fs::write(&path, data)
            .await
            .map_err(|e| map_io_error(e, location))
    }
}
