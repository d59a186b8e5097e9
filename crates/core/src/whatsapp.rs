//! WhatsApp deep-link construction.
//!
//! The outbound contract of the whole system is a single URL:
//! `https://wa.me/<phone>?text=<encoded message>`. The message is multi-line,
//! so everything reserved (newlines included) must be percent-encoded or the
//! order arrives mangled.

/// Paraguay country calling code, substituted for the local trunk `0`.
const COUNTRY_CODE: &str = "595";

/// Normalize a phone number for `wa.me`.
///
/// Strips every non-digit, then rewrites a local trunk prefix (`0986...`)
/// to the international form (`595986...`). Numbers already starting with
/// the country code pass through unchanged, as does anything else.
#[must_use]
pub fn normalize_phone(input: &str) -> String {
    let digits: String = input.chars().filter(char::is_ascii_digit).collect();
    if let Some(rest) = digits.strip_prefix('0') {
        return format!("{COUNTRY_CODE}{rest}");
    }
    digits
}

/// Build the deep link that opens WhatsApp with `message` pre-filled for
/// `phone`.
#[must_use]
pub fn wa_url(phone: &str, message: &str) -> String {
    format!(
        "https://wa.me/{}?text={}",
        normalize_phone(phone),
        urlencoding::encode(message)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_trunk_prefix_is_internationalized() {
        assert_eq!(normalize_phone("0986550235"), "595986550235");
        assert_eq!(normalize_phone("0986 550 235"), "595986550235");
        assert_eq!(normalize_phone("(0986) 550-235"), "595986550235");
    }

    #[test]
    fn test_international_numbers_pass_through() {
        assert_eq!(normalize_phone("595986550235"), "595986550235");
        assert_eq!(normalize_phone("+595 986 550 235"), "595986550235");
    }

    #[test]
    fn test_other_numbers_keep_their_digits() {
        assert_eq!(normalize_phone("986550235"), "986550235");
        assert_eq!(normalize_phone(""), "");
    }

    #[test]
    fn test_wa_url_encodes_reserved_characters() {
        let url = wa_url("0986550235", "Pedido – línea 1\nlínea 2 & fin?");
        assert!(url.starts_with("https://wa.me/595986550235?text="));
        // Newlines and ampersands must not survive unencoded
        assert!(!url.contains('\n'));
        assert!(url.contains("%0A"));
        assert!(url.contains("%26"));
        assert!(!url[url.find("text=").unwrap_or(0)..].contains(' '));
    }

    #[test]
    fn test_wa_url_simple_message() {
        assert_eq!(
            wa_url("595986550235", "Hola"),
            "https://wa.me/595986550235?text=Hola"
        );
    }
}
