/// Canonicalize a channel URL to `http(s)://www.<rest>`
///
/// Scheme-less input is assumed to be https. Nothing is validated: odd input
/// comes back structurally adjusted but never rejected.
pub fn normalize_channel_url(input: &str) -> String {
    let input = input.trim();

    let (scheme, rest) = if let Some(rest) = input.strip_prefix("https://") {
        ("https://", rest)
    } else if let Some(rest) = input.strip_prefix("http://") {
        ("http://", rest)
    } else {
        ("https://", input)
    };

    if rest.starts_with("www.") {
        format!("{scheme}{rest}")
    } else {
        format!("{scheme}www.{rest}")
    }
}
