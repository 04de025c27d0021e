//! Placeholder interpolation for error messages
//!
//! Handles `{name}` placeholders in message templates. Placeholders with no
//! matching parameter are left as written.

use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Regex for matching placeholders: {name}
static PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([a-zA-Z_][a-zA-Z0-9_]*)\}").unwrap());

/// Parameters available to a template
pub type Params = BTreeMap<String, String>;

/// Render a template string with the given parameters
pub fn render(template: &str, params: &Params) -> String {
    PLACEHOLDER_REGEX
        .replace_all(template, |cap: &Captures<'_>| match params.get(&cap[1]) {
            Some(value) => value.clone(),
            None => cap[0].to_string(),
        })
        .into_owned()
}

/// Check if a string contains placeholders
pub fn has_placeholders(s: &str) -> bool {
    PLACEHOLDER_REGEX.is_match(s)
}
