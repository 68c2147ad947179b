use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("no JSON object found in response")]
    NoJsonObject,
    #[error("invalid JSON object: {0}")]
    InvalidJson(String),
}

/// Pulls the first JSON object out of free-form model output.
/// The object is returned as decoded; its shape is not checked.
pub fn extract_json_object(text: &str) -> Result<Map<String, Value>, ParseError> {
    let span = find_object_span(text).ok_or(ParseError::NoJsonObject)?;

    match serde_json::from_str::<Value>(span) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ParseError::InvalidJson("not an object".into())),
        Err(e) => Err(ParseError::InvalidJson(e.to_string())),
    }
}

/// Opening braces tried before giving up. Each failed attempt scans to the
/// end of the text.
const MAX_UNCLOSED_STARTS: usize = 32;

/// First balanced `{ ... }` span. Braces inside string literals do not
/// count towards depth. An opening brace that never closes is skipped and
/// scanning resumes at the next one, up to `MAX_UNCLOSED_STARTS` times.
pub fn find_object_span(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    let mut search_from = 0;

    for _ in 0..MAX_UNCLOSED_STARTS {
        let start = search_from + text[search_from..].find('{')?;
        if let Some(end) = matching_brace(bytes, start) {
            return Some(&text[start..=end]);
        }
        search_from = start + 1;
    }

    None
}

fn matching_brace(bytes: &[u8], start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate().skip(start) {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }

        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_object_surrounded_by_prose() {
        let text = "İşte içeriğin:\n```json\n{\"slogan\": \"Katıl!\", \"whatsapp\": \"Selam\"}\n```\nBaşka bir şey?";
        let object = extract_json_object(text).unwrap();
        assert_eq!(object["slogan"], "Katıl!");
        assert_eq!(object["whatsapp"], "Selam");
    }

    #[test]
    fn nested_objects_and_braces_in_strings() {
        let text = r#"ok {"a": {"b": "} tricky {"}, "c": [1, 2]} trailing } brace"#;
        let span = find_object_span(text).unwrap();
        assert_eq!(span, r#"{"a": {"b": "} tricky {"}, "c": [1, 2]}"#);
        assert!(extract_json_object(text).is_ok());
    }

    #[test]
    fn escaped_quotes_stay_inside_strings() {
        let text = r#"{"slogan": "\"Efsane\" {olacak"}"#;
        let object = extract_json_object(text).unwrap();
        assert_eq!(object["slogan"], "\"Efsane\" {olacak");
    }

    #[test]
    fn no_braces_is_reported() {
        assert_eq!(
            extract_json_object("Üzgünüm, yardımcı olamam."),
            Err(ParseError::NoJsonObject)
        );
    }

    #[test]
    fn unclosed_object_is_not_a_candidate() {
        assert_eq!(extract_json_object("{\"a\": 1"), Err(ParseError::NoJsonObject));
    }

    #[test]
    fn malformed_span_is_invalid_json() {
        let err = extract_json_object("here: {slogan: 'no quotes'}").unwrap_err();
        assert!(matches!(err, ParseError::InvalidJson(_)));
    }

    #[test]
    fn stray_open_brace_before_the_object_is_skipped() {
        let text = r#"Not: { bu satır kapanmıyor. {"slogan": "Katıl!"}"#;
        assert_eq!(find_object_span(text), Some(r#"{"slogan": "Katıl!"}"#));
    }

    #[test]
    fn runaway_open_braces_stop_the_scan() {
        let text = format!("{}{}", "{".repeat(10_000), r#"{"a": 1}"#);
        // Every candidate nests the real object, so none balances.
        assert_eq!(find_object_span(&text), None);

        let text = format!("{}{}", "{ ".repeat(MAX_UNCLOSED_STARTS + 1), "}");
        assert_eq!(find_object_span(&text), None);
    }
}
