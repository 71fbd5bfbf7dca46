use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Instant;

/// 表單上的文字欄位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldId {
    Lastname,
    Firstname,
    Middlename,
    Raddress,
    Saddress,
    Iin,
    Mobile,
    Whatsapp,
    Manager,
}

impl FieldId {
    pub const ALL: [FieldId; 9] = [
        FieldId::Lastname,
        FieldId::Firstname,
        FieldId::Middlename,
        FieldId::Raddress,
        FieldId::Saddress,
        FieldId::Iin,
        FieldId::Mobile,
        FieldId::Whatsapp,
        FieldId::Manager,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldId::Lastname => "lastname",
            FieldId::Firstname => "firstname",
            FieldId::Middlename => "middlename",
            FieldId::Raddress => "raddress",
            FieldId::Saddress => "saddress",
            FieldId::Iin => "iin",
            FieldId::Mobile => "mobile",
            FieldId::Whatsapp => "whatsapp",
            FieldId::Manager => "manager",
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A trimmed value read from a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValue {
    pub field: FieldId,
    pub value: String,
}

impl FieldValue {
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ServiceKind {
    Catv,
    Internet,
    Cctv,
    Intercom,
    Iptv,
    Router,
}

impl ServiceKind {
    pub const ALL: [ServiceKind; 6] = [
        ServiceKind::Catv,
        ServiceKind::Internet,
        ServiceKind::Cctv,
        ServiceKind::Intercom,
        ServiceKind::Iptv,
        ServiceKind::Router,
    ];

    /// Checkbox id prefix, also used for the wire keys (`catv_n`, `int_e`, ...).
    pub fn checkbox_prefix(self) -> &'static str {
        match self {
            ServiceKind::Catv => "catv",
            ServiceKind::Internet => "int",
            ServiceKind::Cctv => "cctv",
            ServiceKind::Intercom => "icom",
            ServiceKind::Iptv => "iptv",
            ServiceKind::Router => "rout",
        }
    }

    pub fn checkbox_id(self, flag: ServiceFlag) -> String {
        let suffix = match flag {
            ServiceFlag::New => "n",
            ServiceFlag::Existing => "e",
        };
        format!("{}_{}", self.checkbox_prefix(), suffix)
    }

    /// 解析 `catv_n` 之類的 checkbox id
    pub fn parse_checkbox_id(id: &str) -> Option<(ServiceKind, ServiceFlag)> {
        let (prefix, suffix) = id.rsplit_once('_')?;
        let flag = match suffix {
            "n" => ServiceFlag::New,
            "e" => ServiceFlag::Existing,
            _ => return None,
        };
        ServiceKind::ALL
            .into_iter()
            .find(|kind| kind.checkbox_prefix() == prefix)
            .map(|kind| (kind, flag))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceFlag {
    New,
    Existing,
}

/// `new` and `existing` are never both true.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServiceSelection {
    new: bool,
    existing: bool,
}

impl ServiceSelection {
    pub fn new_flag(&self) -> bool {
        self.new
    }

    pub fn existing_flag(&self) -> bool {
        self.existing
    }

    pub fn set(&mut self, flag: ServiceFlag, checked: bool) {
        match (flag, checked) {
            (ServiceFlag::New, true) => {
                self.new = true;
                self.existing = false;
            }
            (ServiceFlag::Existing, true) => {
                self.existing = true;
                self.new = false;
            }
            (ServiceFlag::New, false) => self.new = false,
            (ServiceFlag::Existing, false) => self.existing = false,
        }
    }
}

pub type ValidationErrors = BTreeMap<FieldId, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransientHint {
    pub message: String,
    pub expires_at: Instant,
}

impl TransientHint {
    pub fn is_visible(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Copy-binding between two fields toggled by a checkbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedFieldBinding {
    pub checkbox: String,
    pub source: FieldId,
    pub target: FieldId,
    pub empty_message: String,
    pub active: bool,
}

// ---- wire format -------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceEntry {
    Catv { catv_n: bool, catv_e: bool },
    Internet { int_n: bool, int_e: bool },
    Cctv { cctv_n: bool, cctv_e: bool },
    Intercom { icom_n: bool, icom_e: bool },
    Iptv { iptv_n: bool, iptv_e: bool },
    Router { rout_n: bool, rout_e: bool },
}

impl ServiceEntry {
    pub fn from_pair(kind: ServiceKind, new: bool, existing: bool) -> Self {
        match kind {
            ServiceKind::Catv => ServiceEntry::Catv {
                catv_n: new,
                catv_e: existing,
            },
            ServiceKind::Internet => ServiceEntry::Internet {
                int_n: new,
                int_e: existing,
            },
            ServiceKind::Cctv => ServiceEntry::Cctv {
                cctv_n: new,
                cctv_e: existing,
            },
            ServiceKind::Intercom => ServiceEntry::Intercom {
                icom_n: new,
                icom_e: existing,
            },
            ServiceKind::Iptv => ServiceEntry::Iptv {
                iptv_n: new,
                iptv_e: existing,
            },
            ServiceKind::Router => ServiceEntry::Router {
                rout_n: new,
                rout_e: existing,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fio {
    pub firstname: String,
    pub middlename: String,
    pub lastname: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpInfoEntry {
    Fio(Fio),
    Raddress(String),
    Saddress(String),
    Iin(String),
    Mobile(String),
    Whatsapp(String),
}

/// Document posted to the generation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractPayload {
    pub services: Vec<ServiceEntry>,
    pub upinfo: Vec<UpInfoEntry>,
    pub manager: String,
    pub cdate: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignRequest {
    pub cms: String,
}

// ---- artifacts and UI status ------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileKind {
    pub mime: &'static str,
    pub extension: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryArtifact {
    pub bytes: Vec<u8>,
    pub kind: FileKind,
}

impl BinaryArtifact {
    pub fn file_name(&self, stem: &str) -> String {
        format!("{}.{}", stem, self.kind.extension)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// A download link rendered after a successful round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOffer {
    pub file_name: String,
    pub artifact: BinaryArtifact,
    /// Set when the auto-download wrote the file.
    pub saved_to: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlState {
    pub enabled: bool,
    pub label: String,
}

impl ControlState {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            enabled: true,
            label: label.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_exclusivity_both_directions() {
        for kind in ServiceKind::ALL {
            let mut selection = ServiceSelection::default();

            selection.set(ServiceFlag::New, true);
            assert!(selection.new_flag() && !selection.existing_flag(), "{:?}", kind);

            selection.set(ServiceFlag::Existing, true);
            assert!(!selection.new_flag() && selection.existing_flag(), "{:?}", kind);

            selection.set(ServiceFlag::Existing, true);
            assert!(!selection.new_flag() && selection.existing_flag(), "{:?}", kind);

            selection.set(ServiceFlag::New, true);
            selection.set(ServiceFlag::New, true);
            assert!(selection.new_flag() && !selection.existing_flag(), "{:?}", kind);
        }
    }

    #[test]
    fn test_unchecking_leaves_other_flag() {
        let mut selection = ServiceSelection::default();
        selection.set(ServiceFlag::Existing, true);
        selection.set(ServiceFlag::New, false);
        assert!(selection.existing_flag());
    }

    #[test]
    fn test_checkbox_ids() {
        assert_eq!(ServiceKind::Internet.checkbox_id(ServiceFlag::New), "int_n");
        assert_eq!(
            ServiceKind::parse_checkbox_id("rout_e"),
            Some((ServiceKind::Router, ServiceFlag::Existing))
        );
        assert_eq!(ServiceKind::parse_checkbox_id("router_e"), None);
        assert_eq!(ServiceKind::parse_checkbox_id("catv_x"), None);
    }
}
