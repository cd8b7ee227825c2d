use serde_json::Value;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("response body is empty")]
    Empty,
    #[error("response body is not valid JSON: {message}")]
    InvalidJson { message: String },
}

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Decode a response body into JSON, tolerating a UTF-8 BOM and surrounding whitespace.
pub fn decode_json(bytes: &[u8]) -> Result<Value, DecodeError> {
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(DecodeError::Empty);
    }
    serde_json::from_slice(body).map_err(|err| DecodeError::InvalidJson {
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::{decode_json, DecodeError};
    use serde_json::json;

    #[test]
    fn decodes_array_payload() {
        let value = decode_json(br#"[{"lineName":"K2"}]"#).unwrap();
        assert_eq!(value, json!([{"lineName": "K2"}]));
    }

    #[test]
    fn strips_byte_order_mark() {
        let value = decode_json(b"\xEF\xBB\xBF  []\n").unwrap();
        assert_eq!(value, json!([]));
    }

    #[test]
    fn blank_body_is_empty() {
        assert_eq!(decode_json(b"  \n"), Err(DecodeError::Empty));
        assert_eq!(decode_json(b""), Err(DecodeError::Empty));
    }

    #[test]
    fn garbage_is_invalid_json() {
        assert!(matches!(
            decode_json(b"<html>down for maintenance</html>"),
            Err(DecodeError::InvalidJson { .. })
        ));
    }
}
