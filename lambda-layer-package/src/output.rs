use crate::util::copy_dir_recursively;
use std::path::{Path, PathBuf};

/// Writes the assembled staging tree to its final location.
///
/// The destination must not pre-exist: a stale output from a previous run is
/// never removed, and the copy does not start in that case. A copy failure
/// part-way through is fatal and the partial destination is not rolled back.
///
/// # Errors
///
/// Will return `Err` if the destination already exists or the copy fails.
pub fn write_layer(staging_dir: &Path, destination: &Path) -> Result<(), WriteLayerError> {
    if destination.exists() {
        return Err(WriteLayerError::DestinationExists(destination.to_path_buf()));
    }

    copy_dir_recursively(staging_dir, destination)
        .map_err(|e| WriteLayerError::CopyLayer(destination.to_path_buf(), e))
}

#[derive(thiserror::Error, Debug)]
pub enum WriteLayerError {
    #[error("Layer output directory {0} already exists")]
    DestinationExists(PathBuf),
    #[error("Failed to copy staging tree to {0}: {1}")]
    CopyLayer(PathBuf, #[source] std::io::Error),
}
