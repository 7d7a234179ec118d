//! Decoding raw HTML bytes to text.
//!
//! A byte-order mark wins; otherwise the first kilobyte is sniffed for a
//! `<meta charset>` or `http-equiv` declaration. Undeclared input is UTF-8.
//! Malformed sequences become U+FFFD rather than failing.

use encoding_rs::{Encoding, UTF_8};

use crate::patterns::{META_CHARSET, META_CONTENT_TYPE_CHARSET};

const SNIFF_LIMIT: usize = 1024;

/// Picks the encoding of `html`.
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(html) {
        return encoding;
    }
    sniff_charset(html).unwrap_or(UTF_8)
}

/// Encoding declared by a meta tag in the first kilobyte, if recognised.
#[must_use]
pub fn sniff_charset(html: &[u8]) -> Option<&'static Encoding> {
    let head = String::from_utf8_lossy(&html[..html.len().min(SNIFF_LIMIT)]);

    [&*META_CHARSET, &*META_CONTENT_TYPE_CHARSET]
        .into_iter()
        .filter_map(|re| re.captures(&head))
        .filter_map(|caps| caps.get(1))
        .find_map(|label| Encoding::for_label(label.as_str().trim().as_bytes()))
}

/// Decodes `html` to a `String` using [`detect_encoding`].
///
/// # Example
///
/// ```
/// use rs_boilerpipe::encoding::decode_html;
///
/// let text = decode_html(b"<meta charset=\"latin1\"><p>Caf\xE9</p>");
/// assert!(text.contains("Café"));
/// ```
#[must_use]
pub fn decode_html(html: &[u8]) -> String {
    let encoding = detect_encoding(html);
    // decode() strips a matching BOM itself
    let (text, used, had_errors) = encoding.decode(html);
    if had_errors {
        log::debug!("replaced malformed {} sequences while decoding", used.name());
    }
    text.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::{UTF_16LE, WINDOWS_1252};

    #[test]
    fn meta_charset_is_honoured() {
        let html = b"<html><head><META CHARSET=windows-1252></head><body>\x93quoted\x94</body></html>";
        assert_eq!(detect_encoding(html), WINDOWS_1252);
        assert!(decode_html(html).contains("\u{201C}quoted\u{201D}"));
    }

    #[test]
    fn http_equiv_declaration_is_honoured() {
        let html = br#"<meta http-equiv="Content-Type" content="text/html; charset=ISO-8859-1"><p>x</p>"#;
        // WHATWG maps latin1 labels to windows-1252
        assert_eq!(sniff_charset(html), Some(WINDOWS_1252));
    }

    #[test]
    fn bom_beats_declaration() {
        let mut html = vec![0xFF, 0xFE];
        for unit in "<p>hi</p>".encode_utf16() {
            html.extend_from_slice(&unit.to_le_bytes());
        }
        assert_eq!(detect_encoding(&html), UTF_16LE);
        assert_eq!(decode_html(&html), "<p>hi</p>");
    }

    #[test]
    fn unknown_or_missing_label_falls_back_to_utf8() {
        assert_eq!(detect_encoding(b"<meta charset=klingon><p>x</p>"), UTF_8);
        assert_eq!(detect_encoding(b"<p>plain</p>"), UTF_8);
    }

    #[test]
    fn malformed_bytes_are_replaced() {
        let text = decode_html(b"<p>ok \xFF\xFE end</p>");
        assert!(text.contains('\u{FFFD}'));
        assert!(text.contains("end"));
    }
}
