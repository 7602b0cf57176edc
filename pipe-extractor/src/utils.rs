//! URL and text helpers shared by link handlers and extractors

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;
use url::Url;

use crate::error::{ExtractionError, Result};

/// Characters left alone when encoding a query component.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Unwrap `https://www.google.<tld>/url?...&url=<target>&...` to `<target>`.
///
/// Anything else, including unparsable input, is returned unchanged.
#[must_use]
pub fn follow_google_redirect_if_needed(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return url.to_string();
    };

    let is_redirect = parsed.host_str().is_some_and(|host| host.contains("google"))
        && parsed.path() == "/url";
    if !is_redirect {
        return url.to_string();
    }

    parsed
        .query_pairs()
        .find(|(key, _)| key == "url")
        .map_or_else(|| url.to_string(), |(_, target)| target.into_owned())
}

/// `scheme://host[:port]` of `url`; default ports are left out.
pub fn base_url(url: &str) -> Result<String> {
    let parsed = Url::parse(url)?;
    let host = parsed
        .host_str()
        .ok_or_else(|| ExtractionError::MalformedUrl(format!("no host in \"{url}\"")))?;
    Ok(match parsed.port() {
        Some(port) => format!("{}://{host}:{port}", parsed.scheme()),
        None => format!("{}://{host}", parsed.scheme()),
    })
}

/// Whether `url` has an http or https scheme.
#[must_use]
pub fn is_http(url: &str) -> bool {
    Url::parse(url).is_ok_and(|u| matches!(u.scheme(), "http" | "https"))
}

/// Capture `group` of the first match of `pattern` in `input`.
pub fn match_group(pattern: &Regex, input: &str, group: usize) -> Result<String> {
    pattern
        .captures(input)
        .and_then(|caps| caps.get(group))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| {
            ExtractionError::parsing(format!(
                "Failed to find pattern \"{}\" inside of \"{input}\"",
                pattern.as_str()
            ))
        })
}

pub fn match_group1(pattern: &Regex, input: &str) -> Result<String> {
    match_group(pattern, input, 1)
}

#[must_use]
pub fn remove_non_digits(text: &str) -> String {
    text.chars().filter(char::is_ascii_digit).collect()
}

/// Percent-encode a single query component (space becomes `%20`).
#[must_use]
pub fn encode_url_utf8(text: &str) -> String {
    utf8_percent_encode(text, QUERY_COMPONENT).to_string()
}
