pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use app::FormEntries;
#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::TomlConfig};

pub use core::{
    controller::{FormController, SubmissionState},
    document_client::DocumentExchangeClient,
    signature_client::SignatureExchangeClient,
};
pub use domain::form::FormState;
pub use domain::ports::{ConfigProvider, GenerationPort, SignaturePort, Storage};
pub use utils::error::{FormError, Result};
