use anyhow::Result;
use base64::{engine::general_purpose, Engine as _};
use contract_form::core::controller::{FormController, UPLOAD_LABEL};
use contract_form::domain::model::{FieldId, StatusKind};
use contract_form::utils::error::FormError;
use contract_form::{
    DocumentExchangeClient, FormState, LocalStorage, SignaturePort, SignatureExchangeClient,
    SubmissionState, TomlConfig,
};
use httpmock::prelude::*;
use tempfile::TempDir;

fn test_config(server: &MockServer, output_path: &str) -> TomlConfig {
    TomlConfig::from_toml_str(&format!(
        r#"
[endpoints]
generate = "{}"
sign = "{}"
timeout_seconds = 10

[download]
output_path = "{}"
auto_download_delay_ms = 0
"#,
        server.url("/generate"),
        server.url("/sign"),
        output_path.replace('\\', "/")
    ))
    .unwrap()
}

fn signer_for(
    server: &MockServer,
    temp_dir: &TempDir,
) -> SignatureExchangeClient<LocalStorage, TomlConfig> {
    let output_path = temp_dir.path().to_str().unwrap().to_string();
    let config = test_config(server, &output_path);
    SignatureExchangeClient::new(LocalStorage::new(output_path), config)
}

#[tokio::test]
async fn test_signed_cms_round_trip() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();
    let cms: Vec<u8> = vec![0x30, 0x82, 0x0b, 0x7a, 0x06, 0x09, 0x2a, 0x86, 0x48];
    let signed = b"%PDF-1.4 signed".to_vec();

    let sign_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/sign")
            .json_body(serde_json::json!({ "cms": general_purpose::STANDARD.encode(&cms) }));
        then.status(200).json_body(serde_json::json!({
            "signed_cms": general_purpose::STANDARD.encode(&signed)
        }));
    });

    let offer = signer_for(&server, &temp_dir).upload_signed(&cms).await?;

    sign_mock.assert();
    assert_eq!(offer.file_name, "signed_document.pdf");
    assert_eq!(offer.artifact.bytes, signed);
    assert_eq!(
        std::fs::read(temp_dir.path().join("signed_document.pdf"))?,
        signed
    );
    Ok(())
}

#[tokio::test]
async fn test_non_success_status_is_failure() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path("/sign");
        then.status(422).json_body(serde_json::json!({
            "signed_cms": general_purpose::STANDARD.encode(b"PK\x03\x04")
        }));
    });

    let err = signer_for(&server, &temp_dir)
        .upload_signed(b"cms")
        .await
        .unwrap_err();

    assert!(matches!(err, FormError::HttpStatus { status: 422 }));
    assert!(std::fs::read_dir(temp_dir.path())?.next().is_none());
    Ok(())
}

#[tokio::test]
async fn test_missing_signed_cms_is_failure() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path("/sign");
        then.status(200)
            .json_body(serde_json::json!({"verified": true}));
    });

    let err = signer_for(&server, &temp_dir)
        .upload_signed(b"cms")
        .await
        .unwrap_err();

    assert!(matches!(err, FormError::MissingField { ref field } if field == "signed_cms"));
    Ok(())
}

#[tokio::test]
async fn test_non_json_body_is_failure() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path("/sign");
        then.status(200).body("OK");
    });

    let err = signer_for(&server, &temp_dir)
        .upload_signed(b"cms")
        .await
        .unwrap_err();

    assert!(matches!(err, FormError::InvalidResponse { .. }));
    Ok(())
}

#[tokio::test]
async fn test_generate_then_upload_through_controller() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let generate_mock = server.mock(|when, then| {
        when.method(POST).path("/generate");
        then.status(200).json_body(serde_json::json!({
            "generated_document": general_purpose::STANDARD.encode(b"PK\x03\x04")
        }));
    });
    let sign_mock = server.mock(|when, then| {
        when.method(POST).path("/sign");
        then.status(200).json_body(serde_json::json!({
            "signed_cms": general_purpose::STANDARD.encode(b"\x30\x82signed")
        }));
    });

    let config = test_config(&server, &output_path);
    let storage = LocalStorage::new(output_path);
    let mut controller = FormController::new(
        FormState::contract_form(),
        DocumentExchangeClient::new(storage.clone(), config.clone()),
        SignatureExchangeClient::new(storage, config),
    );

    // 尚未產生文件前不可上傳
    assert_eq!(
        controller.upload_signed(b"early").await,
        SubmissionState::Idle
    );
    sign_mock.assert_hits(0);

    for (field, value) in [
        (FieldId::Lastname, "Сапаров"),
        (FieldId::Firstname, "Ерлан"),
        (FieldId::Middlename, "Маратович"),
        (FieldId::Raddress, "Almaty, 1 Abay St"),
        (FieldId::Saddress, "Astana, 2 Kenesary St"),
        (FieldId::Iin, "123456789012"),
        (FieldId::Mobile, "+77011234567"),
        (FieldId::Whatsapp, "+77759876543"),
        (FieldId::Manager, "manager-07"),
    ] {
        controller.input(field, value);
    }

    assert_eq!(controller.submit().await, SubmissionState::Success);
    generate_mock.assert();

    assert_eq!(
        controller.upload_signed(b"signed by ezsigner").await,
        SubmissionState::Success
    );
    sign_mock.assert();

    let signed = controller.signed_document().unwrap();
    assert_eq!(signed.file_name, "signed_document.docx");
    assert_eq!(controller.sign_status().unwrap().kind, StatusKind::Success);
    assert_eq!(controller.upload_button().unwrap().label, UPLOAD_LABEL);
    assert!(temp_dir.path().join("generated_document.docx").exists());
    assert!(temp_dir.path().join("signed_document.docx").exists());
    Ok(())
}
