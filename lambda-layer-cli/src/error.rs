use lambda_layer_package::descriptor::DescriptorError;
use lambda_layer_package::install::InstallError;
use lambda_layer_package::output::WriteLayerError;
use lambda_layer_package::staging::StagingError;
use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub(crate) enum Error {
    #[error("Failed to get current dir: {0}")]
    GetCurrentDir(#[source] std::io::Error),
    #[error("Failed to read layer descriptor {0}: {1}")]
    ReadDescriptor(PathBuf, #[source] DescriptorError),
    #[error("Failed to create staging directory: {0}")]
    CreateStagingDirectory(#[source] std::io::Error),
    #[error("Failed to prepare staging tree: {0}")]
    PrepareStagingTree(#[source] StagingError),
    #[error("Failed to install wheel into staging tree: {0}")]
    InstallWheel(#[source] InstallError),
    #[error("Failed to inject serverless shim: {0}")]
    InjectShim(#[source] StagingError),
    #[error("Failed to write layer directory: {0}")]
    WriteLayer(#[source] WriteLayerError),
    #[error("Failed to calculate directory size of {0}: {1}")]
    CalculateLayerSize(PathBuf, #[source] std::io::Error),
}
