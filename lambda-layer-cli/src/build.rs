use crate::error::Error;
use lambda_layer_package::descriptor::{read_layer_descriptor, LAYER_DESCRIPTOR_FILE};
use lambda_layer_package::install::WheelInstaller;
use lambda_layer_package::output::write_layer;
use lambda_layer_package::staging::LayerStaging;
use lambda_layer_package::util::calculate_dir_size;
use log::info;
use std::path::Path;

type Result<T> = std::result::Result<T, Error>;

pub(crate) fn execute() -> Result<()> {
    let project_dir = std::env::current_dir().map_err(Error::GetCurrentDir)?;

    let descriptor_path = project_dir.join(LAYER_DESCRIPTOR_FILE);
    let descriptor = read_layer_descriptor(&descriptor_path)
        .map_err(|e| Error::ReadDescriptor(descriptor_path, e))?;

    info!(
        "Found layer configuration for {} {}.",
        descriptor.package.name, descriptor.package.version
    );

    // Dropped on every exit path, so a failed run never leaks staging trees.
    let staging_base = tempfile::tempdir().map_err(Error::CreateStagingDirectory)?;
    let staging = LayerStaging::new(staging_base.path());

    staging.create_directories().map_err(Error::PrepareStagingTree)?;

    let wheel_path = project_dir.join(descriptor.wheel_path());
    info!("Installing {}...", wheel_path.to_string_lossy());

    WheelInstaller::new(descriptor.installer.program.as_str())
        .install(&wheel_path, staging.site_packages())
        .map_err(Error::InstallWheel)?;

    info!(
        "Injecting {}.{}.{} shim...",
        descriptor.package.name, descriptor.shim.subpath, descriptor.shim.module
    );

    staging
        .inject_shim(
            project_dir.join(&descriptor.shim.source),
            &descriptor.package.name,
            &descriptor.shim.subpath,
            &descriptor.shim.module,
        )
        .map_err(Error::InjectShim)?;

    let output_dir = project_dir.join(&descriptor.layer.output_dir);
    info!("Writing layer directory...");

    write_layer(staging.base_dir(), &output_dir).map_err(Error::WriteLayer)?;

    report_written_layer(&output_dir)
}

fn report_written_layer(output_dir: &Path) -> Result<()> {
    let size_in_bytes = calculate_dir_size(output_dir)
        .map_err(|e| Error::CalculateLayerSize(output_dir.to_path_buf(), e))?;

    // Precision will only be lost for sizes bigger than 52 bits (~4 Petabytes), and even
    // then will only result in a less precise figure, so is not an issue.
    #[allow(clippy::cast_precision_loss)]
    let size_in_mib = size_in_bytes as f64 / (1024.0 * 1024.0);

    info!(
        "Successfully wrote layer directory: {} ({size_in_mib:.2} MiB)",
        output_dir.to_string_lossy()
    );
    info!("Hint: To publish the layer, zip the directory contents and run: aws lambda publish-layer-version");

    Ok(())
}
