pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "contract-form")]
#[command(about = "Fill, validate and submit a service contract, then confirm its signature")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "contract-form.toml")]
    pub config: String,

    /// Override the generation endpoint from config
    #[arg(long)]
    pub generate_endpoint: Option<String>,

    /// Override the sign-confirmation endpoint from config
    #[arg(long)]
    pub sign_endpoint: Option<String>,

    /// Override the download directory from config
    #[arg(long)]
    pub output_path: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Replay a form file and report validation errors
    Validate {
        #[arg(short, long)]
        form: String,
    },
    /// Print the payload that would be sent
    Preview {
        #[arg(short, long)]
        form: String,
    },
    /// Submit the form and download the generated document
    Generate {
        #[arg(short, long)]
        form: String,
    },
    /// Upload an externally signed CMS file and download the result
    Sign {
        #[arg(short, long)]
        file: String,
    },
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 命令列參數覆蓋 TOML 設定
    pub fn apply_overrides(&self, config: &mut TomlConfig) {
        if let Some(endpoint) = &self.generate_endpoint {
            tracing::info!("🔧 Generate endpoint overridden to: {}", endpoint);
            config.endpoints.generate = endpoint.clone();
        }
        if let Some(endpoint) = &self.sign_endpoint {
            tracing::info!("🔧 Sign endpoint overridden to: {}", endpoint);
            config.endpoints.sign = endpoint.clone();
        }
        if let Some(path) = &self.output_path {
            tracing::info!("🔧 Output path overridden to: {}", path);
            config.download.output_path = path.clone();
        }
    }
}
