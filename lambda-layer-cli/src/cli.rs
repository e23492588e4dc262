use clap::Parser;

/// Assembles a deployable AWS Lambda layer from the project's pre-built wheel.
///
/// Reads `layer.toml` from the current directory; takes no arguments.
#[derive(Parser)]
#[command(version, about, long_about = None)]
pub(crate) struct Cli {}
