use url::Url;

/// Normalize a URL to its origin (scheme + host + optional port).
///
/// Falls back to trimming trailing slashes if the input cannot be parsed.
pub fn normalize_origin(input: &str) -> String {
    match Url::parse(input) {
        Ok(parsed) => parsed
            .origin()
            .ascii_serialization()
            .trim_end_matches('/')
            .to_string(),
        Err(_) => input.trim_end_matches('/').to_string(),
    }
}

/// Whether `candidate` lives on the same origin as `origin`.
///
/// Relative references always count as same-origin.
pub fn is_same_origin(candidate: &str, origin: &str) -> bool {
    match Url::parse(candidate) {
        Ok(_) => normalize_origin(candidate).eq_ignore_ascii_case(origin),
        Err(_) => true,
    }
}
