//! Response transforms: turning a host's 2xx body into the public URL.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResponseError {
    #[error("response is not valid JSON")]
    Json(#[from] serde_json::Error),
    #[error("response JSON has no string at `{0}`")]
    MissingField(String),
    #[error("response ({len} bytes) does not fit the expected page template")]
    Truncated { len: usize },
}

/// Default: the body is the URL, surrounded by whitespace.
pub fn trimmed(body: &str) -> Result<String, ResponseError> {
    Ok(body.trim().to_string())
}

/// Walks `path` through a JSON document and returns the string found there.
/// Numeric segments index into arrays.
pub fn json_field(body: &str, path: &[&str]) -> Result<String, ResponseError> {
    let root: serde_json::Value = serde_json::from_str(body.trim())?;
    let mut node = &root;
    for segment in path {
        let next = match node {
            serde_json::Value::Array(items) => {
                segment.parse::<usize>().ok().and_then(|i| items.get(i))
            }
            other => other.get(*segment),
        };
        node = next.ok_or_else(|| ResponseError::MissingField(path.join(".")))?;
    }
    node.as_str()
        .map(|s| s.trim().to_string())
        .ok_or_else(|| ResponseError::MissingField(path.join(".")))
}

/// Drops any query string or fragment.
pub fn strip_query(url: &str) -> String {
    match url.find(['?', '#']) {
        Some(at) => url[..at].to_string(),
        None => url.to_string(),
    }
}

/// Upgrades a leading `http://` to `https://`; other inputs are returned as-is.
pub fn force_https(url: &str) -> String {
    match url.strip_prefix("http://") {
        Some(rest) => format!("https://{rest}"),
        None => url.to_string(),
    }
}

/// Cuts `head` bytes off the front and `tail` bytes off the back of a
/// templated page.
///
/// Brittle: any change to the host's page template shifts the offsets.
/// Offsets that fall outside the body or inside a UTF-8 sequence are an error.
pub fn fixed_slice(body: &str, head: usize, tail: usize) -> Result<String, ResponseError> {
    let truncated = || ResponseError::Truncated { len: body.len() };
    let end = body
        .len()
        .checked_sub(tail)
        .filter(|end| *end >= head)
        .ok_or_else(truncated)?;
    body.get(head..end).map(str::to_string).ok_or_else(truncated)
}
