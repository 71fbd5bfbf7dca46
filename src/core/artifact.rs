use crate::domain::model::{BinaryArtifact, FileKind};
use crate::utils::error::Result;
use base64::{
    alphabet,
    engine::{general_purpose, DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine as _,
};

pub const DOCX: FileKind = FileKind {
    mime: "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    extension: "docx",
};

pub const PDF: FileKind = FileKind {
    mime: "application/pdf",
    extension: "pdf",
};

/// Checked in order; first matching prefix wins.
pub const SIGNATURES: &[(&[u8], FileKind)] = &[
    // ZIP container (docx)
    (&[0x50, 0x4B], DOCX),
    // %PD
    (&[0x25, 0x50, 0x44], PDF),
];

/// Used when no signature matches.
pub const FALLBACK_KIND: FileKind = DOCX;

/// Best-effort label from the leading bytes; never fails.
pub fn sniff(bytes: &[u8]) -> FileKind {
    SIGNATURES
        .iter()
        .find(|(prefix, _)| bytes.starts_with(prefix))
        .map(|(_, kind)| *kind)
        .unwrap_or(FALLBACK_KIND)
}

/// Accepts missing padding and non-zero trailing bits, as browsers' `atob` does.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

pub fn encode_base64(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}

/// 伺服器回傳的 base64 可能含有換行，先移除空白再解碼
pub fn decode_base64(encoded: &str) -> Result<Vec<u8>> {
    let clean: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    Ok(LENIENT.decode(clean)?)
}

impl BinaryArtifact {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let kind = sniff(&bytes);
        Self { bytes, kind }
    }

    pub fn from_base64(encoded: &str) -> Result<Self> {
        Ok(Self::from_bytes(decode_base64(encoded)?))
    }
}

pub(crate) fn hex_preview(bytes: &[u8], count: usize) -> String {
    bytes
        .iter()
        .take(count)
        .map(|b| format!("0x{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::FormError;

    #[test]
    fn test_sniff_zip_signature() {
        assert_eq!(sniff(&[0x50, 0x4B, 0x03, 0x04, 0x14]).extension, "docx");
        assert_eq!(sniff(b"PK").mime, DOCX.mime);
    }

    #[test]
    fn test_sniff_pdf_signature() {
        assert_eq!(sniff(b"%PDF-1.7\n").extension, "pdf");
        assert_eq!(sniff(&[0x25, 0x50, 0x44]).mime, "application/pdf");
    }

    #[test]
    fn test_sniff_fallback() {
        assert_eq!(sniff(&[0x30, 0x82, 0x01, 0x0a]), FALLBACK_KIND);
        assert_eq!(sniff(&[]), FALLBACK_KIND);
        assert_eq!(sniff(&[0x25, 0x50]), FALLBACK_KIND);
        assert!(!sniff(b"plain text").extension.is_empty());
    }

    #[test]
    fn test_base64_round_trip() {
        let bytes: Vec<u8> = (0..=255u8).chain([0x00, 0xff, 0x50, 0x4b]).collect();
        let encoded = encode_base64(&bytes);
        assert_eq!(decode_base64(&encoded).unwrap(), bytes);
    }

    #[test]
    fn test_decode_strips_whitespace() {
        let encoded = "JVBE\nRi0x\r\nLjc=  ";
        let artifact = BinaryArtifact::from_base64(encoded).unwrap();
        assert_eq!(artifact.bytes, b"%PDF-1.7");
        assert_eq!(artifact.file_name("signed_document"), "signed_document.pdf");
    }

    #[test]
    fn test_decode_accepts_missing_padding() {
        assert_eq!(decode_base64("UEsDBA").unwrap(), vec![0x50, 0x4B, 0x03, 0x04]);
        assert_eq!(BinaryArtifact::from_base64("UEsDBA").unwrap().kind, DOCX);
    }

    #[test]
    fn test_decode_accepts_trailing_bits() {
        assert_eq!(decode_base64("UEt=").unwrap(), b"PK");
    }

    #[test]
    fn test_decode_error() {
        let err = decode_base64("not*base64!").unwrap_err();
        assert!(matches!(err, FormError::Decode(_)));
    }

    #[test]
    fn test_hex_preview() {
        assert_eq!(hex_preview(&[0x50, 0x4b, 0x03], 2), "0x50 0x4b");
    }
}
