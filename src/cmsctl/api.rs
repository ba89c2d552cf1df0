//! # API Facade
//!
//! `CmsApi` is the single entry point for talking to the server. It owns the
//! loaded session, builds resource URLs, and parses responses where callers
//! need structure. It is generic over [`Transport`] so tests can record
//! requests and serve canned responses without a server.
//!
//! Precondition checks (`require_login`, `require_location`) run here,
//! before any network work begins.

use crate::config::SessionConfig;
use crate::error::Result;
use crate::http::{Method, Transport};
use serde_json::Value;
use std::fmt;

/// A resource category, determining the API path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Content,
    Schemas,
    Forms,
    Connections,
}

impl Category {
    pub fn path_segment(&self) -> &'static str {
        match self {
            Category::Content => "content",
            Category::Schemas => "schemas",
            Category::Forms => "forms",
            Category::Connections => "connections",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

/// The facade over the server's HTTP contract.
pub struct CmsApi<T: Transport> {
    pub(crate) transport: T,
    session: SessionConfig,
}

impl<T: Transport> CmsApi<T> {
    pub fn new(transport: T, session: SessionConfig) -> Self {
        Self { transport, session }
    }

    pub fn session(&self) -> &SessionConfig {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionConfig {
        &mut self.session
    }

    /// Builds `{host}/api/{project}/{environment}/{category}[/{suffix}]`
    /// with the session token appended as a query parameter.
    fn resource_url(&self, category: Category, suffix: Option<&str>) -> Result<String> {
        let (host, token) = self.session.require_login()?;
        let (project, environment) = self.session.require_location()?;

        let mut url = format!(
            "{}/api/{}/{}/{}",
            host,
            project,
            environment,
            category.path_segment()
        );

        if let Some(suffix) = suffix {
            url.push('/');
            url.push_str(suffix);
        }

        // The suffix may already carry a query string (new?schemaId=...).
        url.push(if url.contains('?') { '&' } else { '?' });
        url.push_str("token=");
        url.push_str(token);

        Ok(url)
    }

    /// Logs in and returns the token. Does not touch the stored session;
    /// the caller decides what to persist.
    pub fn login(&self, host: &str, username: &str, password: &str) -> Result<String> {
        let url = format!("{}/api/user/login?persist=false", host);
        let body = serde_json::json!({ "username": username, "password": password });

        let token = self.transport.request(Method::Post, &url, Some(&body))?;

        Ok(unquote(token.trim()))
    }

    /// Lists every resource in a category.
    pub fn list_resources(&self, category: Category) -> Result<Vec<Value>> {
        let url = self.resource_url(category, None)?;
        let text = self.transport.request(Method::Get, &url, None)?;

        Ok(serde_json::from_str(&text)?)
    }

    /// Creates a new resource and returns it. Content creation requires a
    /// schema id.
    pub fn create_resource(&self, category: Category, schema_id: Option<&str>) -> Result<Value> {
        let suffix = match schema_id {
            Some(schema_id) => format!("new?schemaId={}", schema_id),
            None => "new".to_string(),
        };
        let url = self.resource_url(category, Some(&suffix))?;
        let text = self.transport.request(Method::Post, &url, None)?;

        Ok(serde_json::from_str(&text)?)
    }

    /// Deletes a resource by id.
    pub fn delete_resource(&self, category: Category, id: &str) -> Result<()> {
        let url = self.resource_url(category, Some(id))?;
        self.transport.request(Method::Delete, &url, None)?;

        Ok(())
    }

    /// Fetches a resource as the raw text the server returned, never
    /// re-serialized. The edit session stages these bytes verbatim.
    pub fn fetch_raw(&self, category: Category, id: &str) -> Result<String> {
        let url = self.resource_url(category, Some(id))?;
        self.transport.request(Method::Get, &url, None)
    }

    /// Submits an edited resource back to its endpoint.
    pub fn submit(&self, category: Category, id: &str, resource: &Value) -> Result<()> {
        let url = self.resource_url(category, Some(id))?;
        self.transport.request(Method::Post, &url, Some(resource))?;

        Ok(())
    }

    /// Lists all projects on the server. Requires login but no selected
    /// project/environment.
    pub fn list_projects(&self) -> Result<Vec<Value>> {
        let (host, token) = self.session.require_login()?;
        let url = format!("{}/api/server/projects?token={}", host, token);
        let text = self.transport.request(Method::Get, &url, None)?;

        Ok(serde_json::from_str(&text)?)
    }
}

/// Login responses may be a bare token or a JSON-encoded string.
fn unquote(text: &str) -> String {
    serde_json::from_str::<String>(text).unwrap_or_else(|_| text.to_string())
}
