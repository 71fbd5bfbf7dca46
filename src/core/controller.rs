use crate::core::binding::BindingToggle;
use crate::core::payload::{build_payload, preview_json};
use crate::domain::form::FormState;
use crate::domain::model::{
    ContractPayload, ControlState, DownloadOffer, FieldId, ServiceFlag, ServiceKind, StatusMessage,
};
use crate::domain::ports::{GenerationPort, SignaturePort};
use crate::utils::error::{FormError, Result};
use std::time::Instant;

pub const SEND_LABEL: &str = "Сформировать договор";
pub const SENDING_LABEL: &str = "Отправка...";
pub const UPLOAD_LABEL: &str = "Загрузить подписанный договор";
pub const UPLOADING_LABEL: &str = "Загрузка...";

/// Shown next to the download link once a document is generated.
pub const SIGNING_INSTRUCTIONS: &str = "Как подписать договор:
1. Откройте https://ezsigner.kz (нужны NCALayer и модуль ezsigner).
2. Выберите «Подписать документ» и загрузите скачанный .docx.
3. Подпишите документ своей ЭЦП и скачайте файл .cms.
4. Нажмите «Загрузить подписанный договор» и выберите этот .cms.
5. Сохраните полученный файл и сделайте резервные копии.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Success,
    Failure,
}

/// Disables a control for the duration of a round trip. The control is
/// restored on drop, including when the request future is cancelled.
pub struct BusyGuard<'a> {
    control: &'a mut ControlState,
    idle_label: &'static str,
}

impl<'a> BusyGuard<'a> {
    pub fn engage(
        control: &'a mut ControlState,
        busy_label: &'static str,
        idle_label: &'static str,
    ) -> Self {
        control.enabled = false;
        control.label = busy_label.to_string();
        Self {
            control,
            idle_label,
        }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.control.enabled = true;
        self.control.label = self.idle_label.to_string();
    }
}

/// One dispatcher per user action on the contract page.
pub struct FormController<G: GenerationPort, P: SignaturePort> {
    form: FormState,
    generator: G,
    signer: P,
    state: SubmissionState,
    sign_state: SubmissionState,
    send_button: ControlState,
    upload_button: Option<ControlState>,
    server_status: Option<StatusMessage>,
    instructions: Option<StatusMessage>,
    sign_status: Option<StatusMessage>,
    last_payload: Option<ContractPayload>,
    last_error: Option<FormError>,
    document: Option<DownloadOffer>,
    signed_document: Option<DownloadOffer>,
}

impl<G: GenerationPort, P: SignaturePort> FormController<G, P> {
    pub fn new(form: FormState, generator: G, signer: P) -> Self {
        Self {
            form,
            generator,
            signer,
            state: SubmissionState::Idle,
            sign_state: SubmissionState::Idle,
            send_button: ControlState::new(SEND_LABEL),
            upload_button: None,
            server_status: None,
            instructions: None,
            sign_status: None,
            last_payload: None,
            last_error: None,
            document: None,
            signed_document: None,
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn sign_state(&self) -> SubmissionState {
        self.sign_state
    }

    pub fn send_button(&self) -> &ControlState {
        &self.send_button
    }

    /// `None` until a document has been generated.
    pub fn upload_button(&self) -> Option<&ControlState> {
        self.upload_button.as_ref()
    }

    pub fn server_status(&self) -> Option<&StatusMessage> {
        self.server_status.as_ref()
    }

    pub fn instructions(&self) -> Option<&StatusMessage> {
        self.instructions.as_ref()
    }

    pub fn sign_status(&self) -> Option<&StatusMessage> {
        self.sign_status.as_ref()
    }

    pub fn last_payload(&self) -> Option<&ContractPayload> {
        self.last_payload.as_ref()
    }

    /// Why the last submit did not succeed.
    pub fn last_error(&self) -> Option<&FormError> {
        self.last_error.as_ref()
    }

    pub fn document(&self) -> Option<&DownloadOffer> {
        self.document.as_ref()
    }

    pub fn signed_document(&self) -> Option<&DownloadOffer> {
        self.signed_document.as_ref()
    }

    // ---- field events ---------------------------------------------------

    pub fn input(&mut self, field: FieldId, value: &str) {
        self.form.input(field, value);
    }

    pub fn blur(&mut self, field: FieldId) -> bool {
        self.form.validate_field(field)
    }

    pub fn click_field(&mut self, field: FieldId, now: Instant) -> bool {
        self.form.click_field(field, now)
    }

    pub fn toggle_binding(&mut self, checkbox: &str, checked: bool) -> BindingToggle {
        self.form.toggle_binding(checkbox, checked)
    }

    pub fn toggle_service(&mut self, kind: ServiceKind, flag: ServiceFlag, checked: bool) {
        self.form.toggle_service(kind, flag, checked);
    }

    pub fn validate_all(&mut self) -> bool {
        self.form.validate_all()
    }

    /// Send button enablement, re-evaluated on every keystroke/blur.
    pub fn submit_enabled(&self) -> bool {
        self.send_button.enabled && self.form.is_form_valid()
    }

    pub fn preview(&mut self) -> Result<String> {
        preview_json(&mut self.form)
    }

    // ---- round trips ----------------------------------------------------

    /// Validate, build the payload and run the generation round trip.
    /// Any previous result is discarded first, so the state starts over at `Idle`.
    pub async fn submit(&mut self) -> SubmissionState {
        self.server_status = None;
        self.instructions = None;
        self.last_error = None;
        self.document = None;
        self.upload_button = None;
        self.state = SubmissionState::Idle;

        if !self.form.validate_all() {
            let err = FormError::InvalidForm {
                fields: self.form.invalid_fields(),
            };
            tracing::info!("Submission blocked: {}", err);
            self.server_status = Some(StatusMessage::error(err.user_friendly_message()));
            self.last_error = Some(err);
            return self.state;
        }

        let payload = build_payload(&self.form);
        self.last_payload = Some(payload.clone());
        self.state = SubmissionState::Submitting;
        tracing::info!("🚀 Submitting contract payload (cdate {})", payload.cdate);

        let outcome = {
            let _busy = BusyGuard::engage(&mut self.send_button, SENDING_LABEL, SEND_LABEL);
            self.generator.submit(&payload).await
        };

        match outcome {
            Ok(offer) => {
                tracing::info!("✅ Document generated: {}", offer.file_name);
                self.server_status = Some(StatusMessage::success(format!(
                    "Скачать файл: {}",
                    offer.file_name
                )));
                self.instructions = Some(StatusMessage::info(SIGNING_INSTRUCTIONS));
                self.document = Some(offer);
                self.upload_button = Some(ControlState::new(UPLOAD_LABEL));
                self.state = SubmissionState::Success;
            }
            Err(e) => {
                tracing::error!(
                    "❌ Document generation failed: {} (Category: {:?})",
                    e,
                    e.category()
                );
                self.server_status = Some(StatusMessage::error(e.user_friendly_message()));
                self.last_error = Some(e);
                self.state = SubmissionState::Failure;
            }
        }
        self.state
    }

    /// Second round trip with the file signed outside this application.
    pub async fn upload_signed(&mut self, file_bytes: &[u8]) -> SubmissionState {
        let Some(button) = self.upload_button.as_mut() else {
            self.sign_status = Some(StatusMessage::error(
                FormError::UploadUnavailable.user_friendly_message(),
            ));
            return self.sign_state;
        };

        self.sign_status = None;
        self.signed_document = None;
        self.sign_state = SubmissionState::Submitting;

        let outcome = {
            let _busy = BusyGuard::engage(button, UPLOADING_LABEL, UPLOAD_LABEL);
            self.signer.upload_signed(file_bytes).await
        };

        match outcome {
            Ok(offer) => {
                tracing::info!("✅ Signed document received: {}", offer.file_name);
                self.sign_status = Some(StatusMessage::success(format!(
                    "Подписанный договор получен. Скачать файл: {}",
                    offer.file_name
                )));
                self.signed_document = Some(offer);
                self.sign_state = SubmissionState::Success;
            }
            Err(e) => {
                tracing::error!("❌ Signed upload failed: {} (Category: {:?})", e, e.category());
                self.sign_status = Some(StatusMessage::error(e.user_friendly_message()));
                self.sign_state = SubmissionState::Failure;
            }
        }
        self.sign_state
    }
}
