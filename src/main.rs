use anyhow::Context;
use clap::Parser;
use contract_form::config::Command;
use contract_form::core::controller::FormController;
use contract_form::domain::model::FieldId;
use contract_form::utils::error::{ErrorSeverity, FormError};
use contract_form::utils::{logger, validation::Validate};
use contract_form::{
    CliConfig, ConfigProvider, DocumentExchangeClient, FormEntries, FormState, LocalStorage,
    SignaturePort, SignatureExchangeClient, Storage, SubmissionState, TomlConfig,
};

type Controller = FormController<
    DocumentExchangeClient<LocalStorage, TomlConfig>,
    SignatureExchangeClient<LocalStorage, TomlConfig>,
>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting contract-form CLI");
    tracing::debug!("CLI config: {:?}", cli);

    let mut config = match TomlConfig::from_file(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", cli.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };
    cli.apply_overrides(&mut config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let storage = LocalStorage::new(config.output_path().to_string());

    match cli.command {
        Command::Validate { form } => {
            let mut controller = build_controller(&config, storage);
            load_entries(&form, &mut controller)?;
            if !controller.validate_all() {
                print_errors(&controller);
                std::process::exit(2);
            }
            println!("✅ Form is valid");
        }
        Command::Preview { form } => {
            let mut controller = build_controller(&config, storage);
            load_entries(&form, &mut controller)?;
            let preview = controller.preview()?;
            println!("{}", preview);
            if !controller.form().errors().is_empty() {
                print_errors(&controller);
                std::process::exit(2);
            }
        }
        Command::Generate { form } => {
            let mut controller = build_controller(&config, storage);
            load_entries(&form, &mut controller)?;

            let state = controller.submit().await;
            if let Some(status) = controller.server_status() {
                println!("{}", status.text);
            }
            match (state, controller.document()) {
                (SubmissionState::Success, Some(offer)) => {
                    match &offer.saved_to {
                        Some(path) => println!("📁 Saved to: {}", path),
                        None => println!("⚠️ Автозагрузка не удалась: {}", offer.file_name),
                    }
                    if let Some(instructions) = controller.instructions() {
                        println!("\n{}", instructions.text);
                    }
                    println!("💡 Then run: contract-form sign --file <signed.cms>");
                }
                _ => {
                    print_errors(&controller);
                    match controller.last_error() {
                        Some(e) => exit_with("Document generation", e),
                        None => std::process::exit(2),
                    }
                }
            }
        }
        Command::Sign { file } => {
            let signer = SignatureExchangeClient::new(storage, config.clone());
            let input = LocalStorage::new(String::new());

            let outcome = match input.read_file(&file).await {
                Ok(bytes) => signer.upload_signed(&bytes).await,
                Err(e) => Err(e),
            };
            match outcome {
                Ok(offer) => {
                    println!(
                        "✅ Подписанный договор получен. Скачать файл: {}",
                        offer.file_name
                    );
                    if let Some(path) = &offer.saved_to {
                        println!("📁 Saved to: {}", path);
                    }
                }
                Err(e) => exit_with("Signature confirmation", &e),
            }
        }
    }

    Ok(())
}

fn build_controller(config: &TomlConfig, storage: LocalStorage) -> Controller {
    let form = FormState::contract_form().with_hint_duration(config.hint_duration());
    FormController::new(
        form,
        DocumentExchangeClient::new(storage.clone(), config.clone()),
        SignatureExchangeClient::new(storage, config.clone()),
    )
}

fn load_entries(path: &str, controller: &mut Controller) -> anyhow::Result<()> {
    let entries = FormEntries::from_file(path)
        .with_context(|| format!("failed to load form entries from '{}'", path))?;
    let report = entries.replay(controller);
    for checkbox in &report.unknown_checkboxes {
        tracing::warn!("⚠️ Unknown checkbox '{}' ignored", checkbox);
    }
    Ok(())
}

fn print_errors(controller: &Controller) {
    for field in FieldId::ALL {
        if let Some(message) = controller.form().error(field) {
            eprintln!("  ❌ {}: {}", field, message);
        }
    }
}

fn exit_with(action: &str, e: &FormError) -> ! {
    tracing::error!(
        "❌ {} failed: {} (Category: {:?}, Severity: {:?})",
        action,
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
