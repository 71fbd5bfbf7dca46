use crate::core::fields::field_value;
use crate::domain::form::FormState;
use crate::domain::model::{FieldId, LinkedFieldBinding, ServiceFlag, ServiceKind};
use std::time::Instant;

pub const WHATSAPP_SAME_AS_MOBILE: &str = "whatsapp_same_as_mobile";
pub const SADDRESS_SAME_AS_RADDRESS: &str = "saddress_same_as_raddress";
pub const LOCKED_FIELD_HINT: &str = "Отключите опцию \"Тот же...\" чтобы редактировать это поле";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingToggle {
    Activated,
    /// Source was empty; checkbox reverted.
    Rejected,
    Deactivated,
    /// No binding registered under that checkbox.
    Unknown,
}

impl FormState {
    /// Form with both "same as" bindings of the contract page.
    pub fn contract_form() -> Self {
        let mut form = FormState::new();
        form.bind(
            WHATSAPP_SAME_AS_MOBILE,
            FieldId::Mobile,
            FieldId::Whatsapp,
            "Сначала введите номер телефона",
        );
        form.bind(
            SADDRESS_SAME_AS_RADDRESS,
            FieldId::Raddress,
            FieldId::Saddress,
            "Сначала укажите адрес проживания",
        );
        form
    }

    pub fn bind(
        &mut self,
        checkbox: &str,
        source: FieldId,
        target: FieldId,
        empty_message: impl Into<String>,
    ) {
        self.bindings.retain(|b| b.checkbox != checkbox);
        self.bindings.push(LinkedFieldBinding {
            checkbox: checkbox.to_string(),
            source,
            target,
            empty_message: empty_message.into(),
            active: false,
        });
    }

    pub fn is_binding_active(&self, checkbox: &str) -> bool {
        self.binding(checkbox).map(|b| b.active).unwrap_or(false)
    }

    /// Checkbox change handler of a copy-binding.
    pub fn toggle_binding(&mut self, checkbox: &str, checked: bool) -> BindingToggle {
        let Some(index) = self.bindings.iter().position(|b| b.checkbox == checkbox) else {
            tracing::warn!("No binding registered for checkbox '{}'", checkbox);
            return BindingToggle::Unknown;
        };
        let (source, target, empty_message) = {
            let b = &self.bindings[index];
            (b.source, b.target, b.empty_message.clone())
        };

        if !checked {
            self.bindings[index].active = false;
            self.set_disabled(target, false);
            self.clear_error(target);
            self.set_focus(target);
            return BindingToggle::Deactivated;
        }

        let source_value = field_value(self, source);
        if source_value.is_empty() {
            self.bindings[index].active = false;
            self.set_disabled(target, false);
            self.set_error(target, empty_message);
            self.set_focus(source);
            tracing::debug!("Binding '{}' rejected: {} is empty", checkbox, source);
            return BindingToggle::Rejected;
        }

        self.bindings[index].active = true;
        self.store_value(target, source_value.value);
        self.set_disabled(target, true);
        self.clear_error(target);
        BindingToggle::Activated
    }

    /// Input handler: stores the value, clears the field's error and mirrors
    /// it into every active binding target.
    pub fn input(&mut self, field: FieldId, value: &str) {
        self.store_value(field, value);
        self.clear_error(field);

        let targets: Vec<FieldId> = self
            .bindings
            .iter()
            .filter(|b| b.active && b.source == field)
            .map(|b| b.target)
            .collect();
        for target in targets {
            self.store_value(target, value);
            self.clear_error(target);
        }
    }

    /// Click on a field. Locked targets show a short-lived hint.
    pub fn click_field(&mut self, field: FieldId, now: Instant) -> bool {
        let locked = self.is_disabled(field)
            && self.bindings.iter().any(|b| b.active && b.target == field);
        if locked {
            self.show_hint(field, LOCKED_FIELD_HINT, now);
        }
        locked
    }

    /// Service checkbox change; `new` and `existing` exclude each other.
    pub fn toggle_service(&mut self, kind: ServiceKind, flag: ServiceFlag, checked: bool) {
        self.service_mut(kind).set(flag, checked);
    }
}
