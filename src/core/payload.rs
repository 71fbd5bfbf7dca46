use crate::core::fields::{checkbox_pair, field_value, normalize_phone};
use crate::domain::form::FormState;
use crate::domain::model::{ContractPayload, FieldId, Fio, ServiceEntry, ServiceKind, UpInfoEntry};
use crate::utils::error::Result;
use chrono::{Local, NaiveDateTime};

pub const CDATE_FORMAT: &str = "%Y-%m-%d %H:%M";
pub const FORM_HAS_ERRORS: &str = "Есть ошибки в форме — исправьте их перед просмотром JSON.";

/// Build the payload stamped with the current local time.
/// Does not validate; call `validate_all` first.
pub fn build_payload(form: &FormState) -> ContractPayload {
    build_payload_at(form, Local::now().naive_local())
}

pub fn build_payload_at(form: &FormState, now: NaiveDateTime) -> ContractPayload {
    let text = |field| field_value(form, field).value;

    let services = ServiceKind::ALL
        .into_iter()
        .map(|kind| {
            let (new, existing) = checkbox_pair(form, kind);
            ServiceEntry::from_pair(kind, new, existing)
        })
        .collect();

    let upinfo = vec![
        UpInfoEntry::Fio(Fio {
            firstname: text(FieldId::Firstname),
            middlename: text(FieldId::Middlename),
            lastname: text(FieldId::Lastname),
        }),
        UpInfoEntry::Raddress(text(FieldId::Raddress)),
        UpInfoEntry::Saddress(text(FieldId::Saddress)),
        UpInfoEntry::Iin(text(FieldId::Iin)),
        UpInfoEntry::Mobile(normalize_phone(form.raw_value(FieldId::Mobile))),
        UpInfoEntry::Whatsapp(normalize_phone(form.raw_value(FieldId::Whatsapp))),
    ];

    ContractPayload {
        services,
        upinfo,
        manager: text(FieldId::Manager),
        cdate: now.format(CDATE_FORMAT).to_string(),
    }
}

/// 「顯示 JSON」：驗證通過才輸出格式化的 payload
pub fn preview_json(form: &mut FormState) -> Result<String> {
    if !form.validate_all() {
        return Ok(FORM_HAS_ERRORS.to_string());
    }
    Ok(serde_json::to_string_pretty(&build_payload(form))?)
}
