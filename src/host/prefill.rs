use url::form_urlencoded;

/// Query parameter that carries the phrase.
pub const INPUT_PARAM: &str = "input";

const QUOTES: [char; 2] = ['"', '\''];

/// First value of `key` in a query string. Accepts a bare query (`a=1&b=2`), one with a leading
/// `?`, or a whole URL. Values are percent- and `+`-decoded.
pub fn query_param(query: &str, key: &str) -> Option<String> {
    let query = query.split_once('?').map_or(query, |(_, q)| q);
    let query = query.split_once('#').map_or(query, |(q, _)| q);
    form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

/// Drop one leading and one trailing quote character, independently.
pub fn strip_wrapping_quotes(s: &str) -> &str {
    let s = s.strip_prefix(QUOTES).unwrap_or(s);
    s.strip_suffix(QUOTES).unwrap_or(s)
}

/// Phrase prefilled through the `input` query parameter. Absent or empty values yield `None`.
pub fn prefill_from_query(query: &str) -> Option<String> {
    let raw = query_param(query, INPUT_PARAM)?;
    if raw.is_empty() {
        return None;
    }
    Some(strip_wrapping_quotes(&raw).to_owned())
}

/// A prefilled phrase that starts on its own once fonts are ready.
#[derive(Clone, Debug, PartialEq)]
pub struct AutoStart {
    pub text: String,
    pub delay_ms: f64,
}

impl AutoStart {
    pub fn from_query(query: &str, delay_ms: f64) -> Option<Self> {
        prefill_from_query(query).map(|text| Self { text, delay_ms })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/prefill.rs"]
mod tests;
