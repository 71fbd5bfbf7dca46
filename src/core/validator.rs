use crate::core::fields::field_value;
use crate::domain::form::FormState;
use crate::domain::model::FieldId;
use regex::Regex;
use std::sync::LazyLock;

pub const REQUIRED_MESSAGE: &str = "Обязательное поле";
pub const IIN_MESSAGE: &str = "ИИН должен содержать ровно 12 цифр";
pub const MOBILE_MESSAGE: &str = "Телефон в формате +7XXXXXXXXXX";
pub const WHATSAPP_MESSAGE: &str = "WhatsApp в формате +7XXXXXXXXXX";

static IIN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{12}$").unwrap());
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\+7[0-9]{10}$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    Required,
    NationalId,
    Phone,
}

impl FieldRule {
    pub fn for_field(field: FieldId) -> Self {
        match field {
            FieldId::Iin => FieldRule::NationalId,
            FieldId::Mobile | FieldId::Whatsapp => FieldRule::Phone,
            FieldId::Lastname
            | FieldId::Firstname
            | FieldId::Middlename
            | FieldId::Raddress
            | FieldId::Saddress
            | FieldId::Manager => FieldRule::Required,
        }
    }

    pub fn accepts(self, trimmed: &str) -> bool {
        match self {
            FieldRule::Required => !trimmed.is_empty(),
            FieldRule::NationalId => IIN_RE.is_match(trimmed),
            FieldRule::Phone => PHONE_RE.is_match(trimmed),
        }
    }
}

pub fn error_message(field: FieldId) -> &'static str {
    match field {
        FieldId::Iin => IIN_MESSAGE,
        FieldId::Mobile => MOBILE_MESSAGE,
        FieldId::Whatsapp => WHATSAPP_MESSAGE,
        _ => REQUIRED_MESSAGE,
    }
}

/// Disabled (mirrored) fields always pass.
fn check(form: &FormState, field: FieldId) -> bool {
    if form.is_disabled(field) {
        return true;
    }
    FieldRule::for_field(field).accepts(field_value(form, field).as_str())
}

impl FormState {
    /// Validate one field and update its error slot.
    pub fn validate_field(&mut self, field: FieldId) -> bool {
        let valid = check(self, field);
        if valid {
            self.clear_error(field);
        } else {
            self.set_error(field, error_message(field));
        }
        valid
    }

    /// Clear every error, then re-run all rules.
    pub fn validate_all(&mut self) -> bool {
        self.clear_errors();
        FieldId::ALL
            .into_iter()
            .fold(true, |ok, field| self.validate_field(field) && ok)
    }

    /// Side-effect-free check used for submit button enablement.
    pub fn is_form_valid(&self) -> bool {
        FieldId::ALL.into_iter().all(|field| check(self, field))
    }

    pub fn invalid_fields(&self) -> Vec<FieldId> {
        FieldId::ALL
            .into_iter()
            .filter(|field| !check(self, *field))
            .collect()
    }
}
