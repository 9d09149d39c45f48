//! HTTP HEAD probing for a resource's declared size.
//!
//! Uses the curl crate (libcurl) to fetch response headers without a body
//! and reads `Content-Length` from the final response.

mod error;
mod parse;

pub use error::ProbeError;
pub use parse::content_length;

use std::str;
use std::time::Duration;

/// Per-request transport settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    pub connect_timeout: Duration,
    pub timeout: Duration,
    pub follow_redirects: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(30),
            follow_redirects: true,
        }
    }
}

/// Looks up the declared content length of a URL.
///
/// Implementations block the calling thread; the prober runs them on the
/// blocking pool.
pub trait LengthFetcher: Send + Sync {
    fn fetch_length(&self, url: &str) -> Result<u64, ProbeError>;
}

/// libcurl-backed fetcher issuing one HEAD request per call.
#[derive(Debug, Clone, Default)]
pub struct CurlFetcher {
    opts: FetchOptions,
}

impl CurlFetcher {
    pub fn new(opts: FetchOptions) -> Self {
        Self { opts }
    }
}

impl LengthFetcher for CurlFetcher {
    fn fetch_length(&self, url: &str) -> Result<u64, ProbeError> {
        probe_head(url, &self.opts)
    }
}

/// Performs a HEAD request and returns the final response's `Content-Length`
/// (0 when absent). Runs in the current thread.
pub fn probe_head(url: &str, opts: &FetchOptions) -> Result<u64, ProbeError> {
    let mut headers: Vec<String> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.nobody(true)?; // HEAD request
    easy.follow_location(opts.follow_redirects)?;
    easy.connect_timeout(opts.connect_timeout)?;
    easy.timeout(opts.timeout)?;

    {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Ok(s) = str::from_utf8(data) {
                headers.push(s.trim_end().to_string());
            }
            true
        })?;
        transfer.perform()?;
    }

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(ProbeError::Http(code));
    }

    Ok(content_length(&headers).unwrap_or(0))
}
