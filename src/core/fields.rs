use crate::domain::form::FormState;
use crate::domain::model::{FieldId, FieldValue, ServiceKind};

/// Trimmed value of a field.
pub fn field_value(form: &FormState, field: FieldId) -> FieldValue {
    FieldValue {
        field,
        value: form.raw_value(field).trim().to_string(),
    }
}

/// 去掉所有 '+'，只送數字到後端
pub fn normalize_phone(phone: &str) -> String {
    phone.replace('+', "").trim().to_string()
}

/// (new, existing) as strict booleans.
pub fn checkbox_pair(form: &FormState, kind: ServiceKind) -> (bool, bool) {
    let selection = form.service(kind);
    (selection.new_flag(), selection.existing_flag())
}
