//! The HTTP transport seam.
//!
//! The rest of the tool only knows the [`Transport`] trait: one method that
//! returns the raw response body text. Keeping the body as text matters for
//! the edit session, which stages the server's bytes verbatim so the user
//! diffs against what the server actually sent.

use crate::error::{CmsError, Result};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

/// A blocking HTTP request capability. Implementations do not retry;
/// failures surface as the calling command's failure.
pub trait Transport {
    fn request(&self, method: Method, url: &str, body: Option<&Value>) -> Result<String>;
}

/// Production transport backed by `ureq`.
pub struct HttpTransport;

impl Transport for HttpTransport {
    fn request(&self, method: Method, url: &str, body: Option<&Value>) -> Result<String> {
        let request = ureq::request(method.as_str(), url);

        let response = match body {
            Some(json) => request.send_json(json),
            None => request.call(),
        };

        match response {
            Ok(resp) => resp
                .into_string()
                .map_err(|e| CmsError::Network(e.to_string())),
            Err(ureq::Error::Status(status, resp)) => {
                let body = resp.into_string().unwrap_or_default();
                Err(CmsError::Http { status, body })
            }
            Err(e) => Err(CmsError::Network(e.to_string())),
        }
    }
}
