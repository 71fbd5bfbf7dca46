use crate::core::binding::BindingToggle;
use crate::core::controller::FormController;
use crate::domain::model::{FieldId, ServiceKind};
use crate::domain::ports::{GenerationPort, SignaturePort};
use crate::utils::error::{FormError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What the user typed and clicked, in a TOML file:
///
/// ```toml
/// lastname = "Сапаров"
/// mobile = "+77011234567"
/// checked = ["int_n", "whatsapp_same_as_mobile"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormEntries {
    pub lastname: Option<String>,
    pub firstname: Option<String>,
    pub middlename: Option<String>,
    pub raddress: Option<String>,
    pub saddress: Option<String>,
    pub iin: Option<String>,
    pub mobile: Option<String>,
    pub whatsapp: Option<String>,
    pub manager: Option<String>,
    /// Checkbox ids in click order: service boxes (`catv_n`, `int_e`, ...)
    /// and copy-bindings (`whatsapp_same_as_mobile`, ...).
    #[serde(default)]
    pub checked: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayReport {
    pub rejected_bindings: Vec<String>,
    pub unknown_checkboxes: Vec<String>,
}

impl FormEntries {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| FormError::ConfigValidation {
            field: "form_entries".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    pub fn field(&self, field: FieldId) -> Option<&str> {
        let value = match field {
            FieldId::Lastname => &self.lastname,
            FieldId::Firstname => &self.firstname,
            FieldId::Middlename => &self.middlename,
            FieldId::Raddress => &self.raddress,
            FieldId::Saddress => &self.saddress,
            FieldId::Iin => &self.iin,
            FieldId::Mobile => &self.mobile,
            FieldId::Whatsapp => &self.whatsapp,
            FieldId::Manager => &self.manager,
        };
        value.as_deref()
    }

    /// 依序重播輸入與勾選事件
    pub fn replay<G: GenerationPort, P: SignaturePort>(
        &self,
        controller: &mut FormController<G, P>,
    ) -> ReplayReport {
        let mut report = ReplayReport::default();

        for field in FieldId::ALL {
            if let Some(value) = self.field(field) {
                controller.input(field, value);
            }
        }

        for checkbox in &self.checked {
            if let Some((kind, flag)) = ServiceKind::parse_checkbox_id(checkbox) {
                controller.toggle_service(kind, flag, true);
                continue;
            }
            match controller.toggle_binding(checkbox, true) {
                BindingToggle::Activated | BindingToggle::Deactivated => {}
                BindingToggle::Rejected => {
                    tracing::warn!("⚠️ '{}' could not be enabled: source field is empty", checkbox);
                    report.rejected_bindings.push(checkbox.clone());
                }
                BindingToggle::Unknown => {
                    report.unknown_checkboxes.push(checkbox.clone());
                }
            }
        }

        report
    }
}
