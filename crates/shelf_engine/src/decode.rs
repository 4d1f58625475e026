use chardetng::EncodingDetector;
use encoding_rs::Encoding;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPage {
    pub html: String,
    pub encoding: &'static str,
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("page body is not valid {encoding}")]
    Malformed { encoding: &'static str },
}

/// Turns a fetched body into text.
///
/// The encoding is picked from a byte-order mark first, then the
/// `Content-Type` charset parameter, then content sniffing.
pub fn decode_page(bytes: &[u8], content_type: Option<&str>) -> Result<DecodedPage, DecodeError> {
    let encoding = Encoding::for_bom(bytes)
        .map(|(encoding, _)| encoding)
        .or_else(|| {
            content_type
                .and_then(charset_param)
                .and_then(|label| Encoding::for_label(label.as_bytes()))
        })
        .unwrap_or_else(|| {
            let mut detector = EncodingDetector::new();
            detector.feed(bytes, true);
            detector.guess(None, true)
        });

    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(DecodeError::Malformed {
            encoding: encoding.name(),
        });
    }
    Ok(DecodedPage {
        html: text.into_owned(),
        encoding: encoding.name(),
    })
}

fn charset_param(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches(&['"', '\''][..]))
    })
}

#[cfg(test)]
mod tests {
    use super::{charset_param, decode_page};

    #[test]
    fn charset_param_is_case_insensitive() {
        assert_eq!(charset_param("text/html; CharSet=\"utf-8\""), Some("utf-8"));
        assert_eq!(charset_param("text/html"), None);
    }

    #[test]
    fn latin1_header_decodes_pound_sign() {
        let decoded = decode_page(b"\xa351.77", Some("text/html; charset=ISO-8859-1")).unwrap();
        assert_eq!(decoded.html, "£51.77");
    }

    #[test]
    fn bom_wins_over_header() {
        let decoded = decode_page(b"\xEF\xBB\xBFok", Some("text/html; charset=ISO-8859-1")).unwrap();
        assert_eq!(decoded.html, "ok");
        assert_eq!(decoded.encoding, "UTF-8");
    }
}
