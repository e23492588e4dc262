use std::fs;
use std::path::{Path, PathBuf};

/// Directory inside the layer that Lambda adds to the Python module search path.
///
/// <https://docs.aws.amazon.com/lambda/latest/dg/configuration-layers.html#configuration-layers-path>
pub const PYTHON_SITE_PACKAGES_DIR: &str = "python";

/// Filename that marks the shim directory as an importable Python package.
pub const PACKAGE_ENTRY_MODULE: &str = "__init__.py";

/// The staging tree a layer is assembled in before it is written to its final
/// location.
///
/// The base directory is expected to be ephemeral and exclusively owned by a
/// single build run.
#[derive(Debug)]
pub struct LayerStaging {
    base_dir: PathBuf,
    site_packages: PathBuf,
}

impl LayerStaging {
    /// Creates a staging tree rooted at the given base directory.
    ///
    /// Only derives paths; no filesystem access happens until
    /// [`LayerStaging::create_directories`].
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        let site_packages = base_dir.join(PYTHON_SITE_PACKAGES_DIR);

        LayerStaging {
            base_dir,
            site_packages,
        }
    }

    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// The directory installed packages must land in so the Lambda runtime can
    /// discover them.
    #[must_use]
    pub fn site_packages(&self) -> &Path {
        &self.site_packages
    }

    /// Creates the site-packages directory inside the staging tree.
    ///
    /// Installation expects an empty site-packages directory, so a pre-existing
    /// one is an error.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the directory already exists or cannot be created.
    pub fn create_directories(&self) -> Result<(), StagingError> {
        if self.site_packages.exists() {
            return Err(StagingError::SitePackagesExists(self.site_packages.clone()));
        }

        fs::create_dir_all(&self.site_packages)
            .map_err(|e| StagingError::CreateSitePackages(self.site_packages.clone(), e))
    }

    /// Copies the shim module into the installed package as an importable
    /// subpackage.
    ///
    /// The destination directory is created if the installed package does not
    /// already declare it. The copy is renamed to `__init__.py` so
    /// `{package_name}.{subpath}.{module}` resolves in the Python import
    /// system. Calling this twice overwrites the previous copy; it never
    /// duplicates.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the shim source does not exist or the destination
    /// cannot be written.
    pub fn inject_shim(
        &self,
        shim_source: impl AsRef<Path>,
        package_name: &str,
        subpath: &str,
        module: &str,
    ) -> Result<(), StagingError> {
        let shim_source = shim_source.as_ref();

        if !shim_source.is_file() {
            return Err(StagingError::MissingShimSource(shim_source.to_path_buf()));
        }

        let shim_dir = self
            .site_packages
            .join(package_name)
            .join(subpath)
            .join(module);

        fs::create_dir_all(&shim_dir)
            .map_err(|e| StagingError::CreateShimPackage(shim_dir.clone(), e))?;

        let entry_module = shim_dir.join(PACKAGE_ENTRY_MODULE);
        fs::copy(shim_source, &entry_module)
            .map_err(|e| StagingError::CopyShimModule(entry_module, e))?;

        Ok(())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum StagingError {
    #[error("Site-packages directory {0} already exists")]
    SitePackagesExists(PathBuf),
    #[error("Failed to create site-packages directory {0}: {1}")]
    CreateSitePackages(PathBuf, #[source] std::io::Error),
    #[error("Shim module {0} does not exist")]
    MissingShimSource(PathBuf),
    #[error("Failed to create shim package directory {0}: {1}")]
    CreateShimPackage(PathBuf, #[source] std::io::Error),
    #[error("Failed to copy shim module to {0}: {1}")]
    CopyShimModule(PathBuf, #[source] std::io::Error),
}
