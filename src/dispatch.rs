//! Outbound deep-link construction and launch.
//!
//! A send link is `<base>/<digits-only-phone>?text=<encoded-message>`. The
//! phone number is reduced to its digits without further validation, so a
//! malformed number yields a well-formed but useless link.

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;
use std::process::Command;
use url::Url;

/// Default messaging host for outbound links.
pub const DEFAULT_BASE_URL: &str = "https://wa.me";

static NON_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\D").unwrap());

// Everything except alphanumerics and - _ . ! ~ * ' ( ) gets escaped, matching
// what messaging apps expect in the text parameter.
const MESSAGE_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Strips every non-digit character from a phone number.
pub fn digits_only(phone: &str) -> String {
    NON_DIGITS.replace_all(phone, "").into_owned()
}

/// Builds the deep link for sending `message` to `phone` via the messaging host.
pub fn build_send_link(base_url: &str, phone: &str, message: &str) -> Result<Url> {
    let digits = digits_only(phone);
    let encoded = utf8_percent_encode(message, MESSAGE_ENCODE_SET);
    let raw = format!("{}/{}?text={}", base_url.trim_end_matches('/'), digits, encoded);
    Url::parse(&raw).with_context(|| format!("Invalid send link: {}", raw))
}

/// Opens a link in the default browser through the platform opener.
pub fn open_in_browser(url: &Url) -> Result<()> {
    #[cfg(target_os = "macos")]
    let output = Command::new("open").arg(url.as_str()).output()?;

    #[cfg(target_os = "windows")]
    let output = Command::new("cmd").args(["/C", "start", "", url.as_str()]).output()?;

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let output = Command::new("xdg-open").arg(url.as_str()).output()?;

    if output.status.success() {
        Ok(())
    } else {
        Err(anyhow!(
            "Failed to open {}: {}",
            url,
            String::from_utf8_lossy(&output.stderr)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case("+1 (234) 567-8900", "12345678900"; "formatted us number")]
    #[test_case("555-0100", "5550100"; "dashed number")]
    #[test_case("+49 170 1234567", "491701234567"; "international number")]
    #[test_case("no digits here", ""; "letters only")]
    fn test_digits_only(phone: &str, expected: &str) {
        assert_eq!(digits_only(phone), expected);
    }

    #[test]
    fn test_send_link_strips_phone_and_keeps_safe_characters() {
        let url = build_send_link(DEFAULT_BASE_URL, "+1 (234) 567-8900", "Hi!").unwrap();
        assert_eq!(url.as_str(), "https://wa.me/12345678900?text=Hi!");
    }

    #[test]
    fn test_send_link_encodes_spaces_and_emoji() {
        let url =
            build_send_link(DEFAULT_BASE_URL, "+19998887777", "Happy Birthday Alex! 🎉").unwrap();
        assert_eq!(
            url.query(),
            Some("text=Happy%20Birthday%20Alex!%20%F0%9F%8E%89")
        );
    }

    #[test]
    fn test_send_link_tolerates_trailing_slash_in_base() {
        let url = build_send_link("https://wa.me/", "+15551234444", "hello").unwrap();
        assert_eq!(url.as_str(), "https://wa.me/15551234444?text=hello");
    }

    #[test]
    fn test_send_link_accepts_digitless_phone() {
        let url = build_send_link(DEFAULT_BASE_URL, "???", "still builds").unwrap();
        assert_eq!(url.path(), "/");
        assert_eq!(url.query(), Some("text=still%20builds"));
    }

    #[test]
    fn test_send_link_rejects_garbage_base_url() {
        assert!(build_send_link("not a url", "+15551234444", "hello").is_err());
    }
}
