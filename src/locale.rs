use regex::Regex;
use std::sync::LazyLock;

/// `de`, `de-AT` or `de_AT`.
static USUAL_LOCALE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]{2}([_-][A-Z]{2})?$").unwrap());

/// True for the common two-letter language tags with an optional region.
///
/// Other valid BCP 47 tags (`es-419`, `zh-Hant`) are accepted by the engine
/// but flagged by the CLI, since they are usually typos.
pub fn is_usual_locale_format(tag: &str) -> bool {
    USUAL_LOCALE_REGEX.is_match(tag)
}
