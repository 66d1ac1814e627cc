//! Camera-info binary: queries V4L2 camera capabilities and prints JSON.

use camera_info::bridge::{Bridge, BridgeError, Method, DEFAULT_CAMERA};
use camera_info::device::{FacingOverride, V4L2Provider};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "camera-info")]
#[command(about = "Report camera capabilities as JSON")]
#[command(version)]
struct Cli {
    /// Report a facing for a device index, e.g. `0=back` (repeatable)
    #[arg(long = "facing", value_name = "ID=FACING")]
    facings: Vec<FacingOverride>,

    /// Print single-line JSON
    #[arg(long)]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List supported JPEG resolutions
    Resolutions {
        /// Camera facing to query ("back" or "front")
        #[arg(short, long, default_value = DEFAULT_CAMERA)]
        camera: String,
    },

    /// Show zoom, focus, ISO and exposure capabilities
    Info {
        /// Camera facing to query ("back" or "front")
        #[arg(short, long, default_value = DEFAULT_CAMERA)]
        camera: String,
    },

    /// List available cameras
    List,

    /// Invoke a bridge method by name
    Call {
        /// Method name, e.g. getCameraInfo
        method: String,

        /// Options object as JSON
        #[arg(short, long, default_value = "null")]
        options: String,
    },
}

fn main() {
    // Set RUST_LOG to control log level, e.g. RUST_LOG=camera_info=debug
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), BridgeError> {
    let bridge = Bridge::new(V4L2Provider::new().with_facings(cli.facings));

    let response = match cli.command {
        Commands::Resolutions { camera } => {
            bridge.invoke(Method::GetSupportedResolutions, &json!({ "camera": camera }))?
        }
        Commands::Info { camera } => {
            bridge.invoke(Method::GetCameraInfo, &json!({ "camera": camera }))?
        }
        Commands::List => bridge.invoke(Method::GetAvailableCameras, &Value::Null)?,
        Commands::Call { method, options } => {
            let options: Value =
                serde_json::from_str(&options).map_err(BridgeError::InvalidOptions)?;
            bridge.call(&method, &options)?
        }
    };

    let output = if cli.compact {
        serde_json::to_string(&response)
    } else {
        serde_json::to_string_pretty(&response)
    }
    .map_err(BridgeError::Encode)?;

    println!("{output}");
    Ok(())
}
