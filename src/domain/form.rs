use crate::domain::model::{
    FieldId, LinkedFieldBinding, ServiceKind, ServiceSelection, TransientHint, ValidationErrors,
};
use std::collections::{BTreeMap, BTreeSet};
use std::time::{Duration, Instant};

pub const DEFAULT_HINT_DURATION: Duration = Duration::from_secs(3);

/// In-memory form: raw field values, disabled flags, error slots,
/// service checkboxes and copy-bindings.
#[derive(Debug, Clone)]
pub struct FormState {
    values: BTreeMap<FieldId, String>,
    disabled: BTreeSet<FieldId>,
    errors: ValidationErrors,
    hints: BTreeMap<FieldId, TransientHint>,
    services: BTreeMap<ServiceKind, ServiceSelection>,
    pub(crate) bindings: Vec<LinkedFieldBinding>,
    focus: Option<FieldId>,
    hint_duration: Duration,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

impl FormState {
    pub fn new() -> Self {
        Self {
            values: BTreeMap::new(),
            disabled: BTreeSet::new(),
            errors: ValidationErrors::new(),
            hints: BTreeMap::new(),
            services: ServiceKind::ALL
                .into_iter()
                .map(|kind| (kind, ServiceSelection::default()))
                .collect(),
            bindings: Vec::new(),
            focus: None,
            hint_duration: DEFAULT_HINT_DURATION,
        }
    }

    pub fn with_hint_duration(mut self, hint_duration: Duration) -> Self {
        self.hint_duration = hint_duration;
        self
    }

    pub fn hint_duration(&self) -> Duration {
        self.hint_duration
    }

    /// Raw (untrimmed) value as typed.
    pub fn raw_value(&self, field: FieldId) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub(crate) fn store_value(&mut self, field: FieldId, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    pub fn is_disabled(&self, field: FieldId) -> bool {
        self.disabled.contains(&field)
    }

    pub(crate) fn set_disabled(&mut self, field: FieldId, disabled: bool) {
        if disabled {
            self.disabled.insert(field);
        } else {
            self.disabled.remove(&field);
        }
    }

    pub fn error(&self, field: FieldId) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub(crate) fn set_error(&mut self, field: FieldId, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub(crate) fn clear_error(&mut self, field: FieldId) {
        self.errors.remove(&field);
    }

    pub(crate) fn clear_errors(&mut self) {
        self.errors.clear();
    }

    pub(crate) fn show_hint(&mut self, field: FieldId, message: impl Into<String>, now: Instant) {
        self.hints.insert(
            field,
            TransientHint {
                message: message.into(),
                expires_at: now + self.hint_duration,
            },
        );
    }

    /// 欄位提示區目前顯示的文字：未過期的提示優先，否則顯示錯誤
    pub fn displayed_message(&self, field: FieldId, now: Instant) -> Option<&str> {
        match self.hints.get(&field) {
            Some(hint) if hint.is_visible(now) => Some(hint.message.as_str()),
            _ => self.error(field),
        }
    }

    pub fn focus(&self) -> Option<FieldId> {
        self.focus
    }

    pub(crate) fn set_focus(&mut self, field: FieldId) {
        self.focus = Some(field);
    }

    pub fn service(&self, kind: ServiceKind) -> ServiceSelection {
        self.services.get(&kind).copied().unwrap_or_default()
    }

    pub(crate) fn service_mut(&mut self, kind: ServiceKind) -> &mut ServiceSelection {
        self.services.entry(kind).or_default()
    }

    pub fn bindings(&self) -> &[LinkedFieldBinding] {
        &self.bindings
    }

    pub fn binding(&self, checkbox: &str) -> Option<&LinkedFieldBinding> {
        self.bindings.iter().find(|b| b.checkbox == checkbox)
    }
}
