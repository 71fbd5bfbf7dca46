use crate::utils::error::{FormError, Result};
use serde_json::Value;

/// Response body: parsed JSON, or the raw text when it is not JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

impl ResponseBody {
    pub fn parse(text: &str) -> Self {
        match serde_json::from_str(text) {
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::Text(text.to_string()),
        }
    }

    /// Required base64 string field of an object body.
    /// Absent, null or empty counts as missing; any other non-string is unreadable.
    pub fn string_field(&self, name: &str) -> Result<&str> {
        let missing = || FormError::MissingField {
            field: name.to_string(),
        };

        let ResponseBody::Json(Value::Object(map)) = self else {
            return Err(missing());
        };

        match map.get(name) {
            None | Some(Value::Null) => Err(missing()),
            Some(Value::String(s)) if s.is_empty() => Err(missing()),
            Some(Value::String(s)) => Ok(s.as_str()),
            Some(other) => Err(FormError::InvalidResponse {
                message: format!("field \"{}\" is not a string: {}", name, other),
            }),
        }
    }

    /// 用於日誌與畫面輸出
    pub fn render(&self) -> String {
        match self {
            ResponseBody::Json(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            ResponseBody::Text(text) => text.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_json_body_kept_as_text() {
        let body = ResponseBody::parse("<html>502 Bad Gateway</html>");
        assert_eq!(
            body,
            ResponseBody::Text("<html>502 Bad Gateway</html>".to_string())
        );
        assert!(matches!(
            body.string_field("generated_document"),
            Err(FormError::MissingField { .. })
        ));
    }

    #[test]
    fn test_string_field_present() {
        let body = ResponseBody::parse(r#"{"generated_document": "UEsDBA=="}"#);
        assert_eq!(body.string_field("generated_document").unwrap(), "UEsDBA==");
    }

    #[test]
    fn test_string_field_missing_or_empty() {
        for text in [r#"{"status": "ok"}"#, r#"{"generated_document": ""}"#, r#"{"generated_document": null}"#, "[1,2]"] {
            let body = ResponseBody::parse(text);
            assert!(
                matches!(body.string_field("generated_document"), Err(FormError::MissingField { .. })),
                "{}",
                text
            );
        }
    }

    #[test]
    fn test_string_field_wrong_type() {
        let body = ResponseBody::parse(r#"{"signed_cms": 42}"#);
        assert!(matches!(
            body.string_field("signed_cms"),
            Err(FormError::InvalidResponse { .. })
        ));
    }
}
