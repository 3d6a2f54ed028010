//! Page content decoding.

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Decodes fetched bytes as UTF-8 text.
///
/// A leading byte-order mark is dropped. Returns `None` for an empty payload
/// and for bytes that are not valid UTF-8; both end the detection.
pub fn decode_content(raw: &[u8]) -> Option<String> {
    let bytes = raw.strip_prefix(UTF8_BOM).unwrap_or(raw);
    if bytes.is_empty() {
        return None;
    }
    match std::str::from_utf8(bytes) {
        Ok(text) => Some(text.to_string()),
        Err(e) => {
            log::debug!(
                "Content is not valid UTF-8 (valid up to byte {}): {}",
                e.valid_up_to(),
                e
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf8() {
        let html = "<title>Caf\u{e9} news</title>";
        assert_eq!(decode_content(html.as_bytes()), Some(html.to_string()));
    }

    #[test]
    fn test_decode_strips_bom() {
        let mut raw = UTF8_BOM.to_vec();
        raw.extend_from_slice(b"<html></html>");
        assert_eq!(decode_content(&raw), Some("<html></html>".to_string()));
    }

    #[test]
    fn test_decode_empty_is_none() {
        assert_eq!(decode_content(b""), None);
        assert_eq!(decode_content(UTF8_BOM), None);
    }

    #[test]
    fn test_decode_invalid_utf8_is_none() {
        // Latin-1 encoded "café"
        assert_eq!(decode_content(b"caf\xe9"), None);
    }
}
