use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Recursively copies a directory and its contents to the destination.
///
/// An already existing destination directory is tolerated; files inside it are
/// overwritten entry by entry.
///
/// # Errors
///
/// Returns `Err` if an IO error occurred while walking or copying.
pub fn copy_dir_recursively(source: &Path, destination: &Path) -> std::io::Result<()> {
    match fs::create_dir(destination) {
        Err(io_error) if io_error.kind() == ErrorKind::AlreadyExists => Ok(()),
        other => other,
    }?;

    for entry in fs::read_dir(source)? {
        let dir_entry = entry?;

        if dir_entry.file_type()?.is_dir() {
            copy_dir_recursively(&dir_entry.path(), &destination.join(dir_entry.file_name()))?;
        } else {
            fs::copy(dir_entry.path(), destination.join(dir_entry.file_name()))?;
        }
    }

    Ok(())
}

/// Recursively calculate the size of a directory and its contents in bytes.
///
/// # Errors
///
/// Returns `Err` if an IO error occurred during the size calculation.
pub fn calculate_dir_size(path: impl AsRef<Path>) -> std::io::Result<u64> {
    let mut size_in_bytes = 0;

    // The size of the directory entry (ie: its metadata only, not the directory contents).
    size_in_bytes += path.as_ref().metadata()?.len();

    for entry in fs::read_dir(&path)? {
        let entry = entry?;
        let metadata = entry.metadata()?;

        if metadata.is_dir() {
            size_in_bytes += calculate_dir_size(entry.path())?;
        } else {
            size_in_bytes += metadata.len();
        }
    }

    Ok(size_in_bytes)
}
