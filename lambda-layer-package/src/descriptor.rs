use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// The name of the layer descriptor file read from the project directory.
pub const LAYER_DESCRIPTOR_FILE: &str = "layer.toml";

/// A parsed layer descriptor.
///
/// Everything the build pipeline needs to locate the wheel, inject the shim and
/// write the output comes from this struct rather than from build constants.
#[derive(Debug, Clone, Deserialize)]
pub struct LayerDescriptor {
    pub package: PackageSpec,
    pub shim: ShimSpec,
    #[serde(default)]
    pub layer: LayerPaths,
    #[serde(default)]
    pub installer: InstallerSpec,
}

impl LayerDescriptor {
    /// Path of the wheel the pipeline installs, relative to the project directory.
    ///
    /// The filename is derived from the descriptor alone, following the
    /// `{name}-{version}-{platform_tag}.whl` convention. The filesystem is not
    /// searched; the wheel must have been produced by an upstream build step.
    #[must_use]
    pub fn wheel_path(&self) -> PathBuf {
        self.layer.dist_dir.join(format!(
            "{}-{}-{}.whl",
            self.package.name, self.package.version, self.package.platform_tag
        ))
    }
}

/// The wheel distribution that is installed into the layer.
#[derive(Debug, Clone, Deserialize)]
pub struct PackageSpec {
    /// Wheel distribution name. Also the top-level import package the shim is
    /// injected into.
    pub name: String,
    pub version: String,
    #[serde(default = "default_platform_tag")]
    pub platform_tag: String,
}

/// The static shim module inserted into the installed package tree.
#[derive(Debug, Clone, Deserialize)]
pub struct ShimSpec {
    /// Project-relative path to the shim source file.
    pub source: PathBuf,
    /// Name of the injected subpackage.
    pub module: String,
    /// Namespace inside the installed package the subpackage lands in.
    #[serde(default = "default_shim_subpath")]
    pub subpath: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LayerPaths {
    /// Directory the upstream build step writes wheels to.
    #[serde(default = "default_dist_dir")]
    pub dist_dir: PathBuf,
    /// Directory the finished layer is written to. Must not pre-exist.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for LayerPaths {
    fn default() -> Self {
        LayerPaths {
            dist_dir: default_dist_dir(),
            output_dir: default_output_dir(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InstallerSpec {
    /// The package installer executable. Overridable so tests can substitute a
    /// fake installer.
    #[serde(default = "default_installer_program")]
    pub program: String,
}

impl Default for InstallerSpec {
    fn default() -> Self {
        InstallerSpec {
            program: default_installer_program(),
        }
    }
}

fn default_platform_tag() -> String {
    String::from("py2.py3-none-any")
}

fn default_shim_subpath() -> String {
    String::from("integrations")
}

fn default_dist_dir() -> PathBuf {
    PathBuf::from("dist")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("dist-serverless")
}

fn default_installer_program() -> String {
    String::from("pip")
}

/// Reads the layer descriptor at the given path.
///
/// # Errors
///
/// Will return `Err` if the file couldn't be read or its contents couldn't be
/// deserialized.
pub fn read_layer_descriptor(path: impl AsRef<Path>) -> Result<LayerDescriptor, DescriptorError> {
    let contents = fs::read_to_string(path)?;
    Ok(toml::from_str(&contents)?)
}

/// An error that occurred during reading or parsing a layer descriptor.
#[derive(thiserror::Error, Debug)]
pub enum DescriptorError {
    #[error("I/O error while reading layer descriptor: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML deserialization error while reading layer descriptor: {0}")]
    TomlError(#[from] toml::de::Error),
}
