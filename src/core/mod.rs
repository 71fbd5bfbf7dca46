pub mod artifact;
pub mod binding;
pub mod controller;
pub mod document_client;
pub mod download;
pub mod fields;
pub mod payload;
pub mod response;
pub mod signature_client;
pub mod validator;

pub use crate::domain::form::FormState;
pub use crate::domain::model::{BinaryArtifact, ContractPayload, DownloadOffer, FieldId};
pub use crate::domain::ports::{ConfigProvider, GenerationPort, SignaturePort, Storage};
pub use crate::utils::error::Result;
