//! Extract `Content-Length` from collected HTTP response header lines.

const CONTENT_LENGTH: &str = "Content-Length";

/// Returns the `Content-Length` of the last response in `lines`.
///
/// With redirects, libcurl reports every response's headers in order; each
/// status line (`HTTP/...`) starts a new response and discards what came
/// before. The header name must equal `Content-Length` ignoring ASCII case.
/// An unparseable value counts as absent.
pub fn content_length(lines: &[String]) -> Option<u64> {
    let mut length = None;

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            length = None;
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            if !name.trim().eq_ignore_ascii_case(CONTENT_LENGTH) {
                continue;
            }
            let value = value.trim();
            match value.parse::<u64>() {
                Ok(n) => length = Some(n),
                Err(_) => {
                    tracing::warn!(value, "ignoring unparseable Content-Length");
                    length = None;
                }
            }
        }
    }

    length
}
