//! The edit session: fetch → stage → edit → reconcile → submit → cleanup.
//!
//! A strictly linear workflow. Each stage either completes and advances or
//! fails and aborts the whole session, leaving whatever the prior stages
//! produced. There are no retries and no rollback; a dangling cache file is
//! the deliberate recovery artifact, not a leak.

use crate::api::{Category, CmsApi};
use crate::cache::CacheStore;
use crate::editor;
use crate::error::Result;
use crate::http::Transport;
use serde_json::Value;

pub struct EditSession<'a, T: Transport> {
    api: &'a CmsApi<T>,
    cache: &'a CacheStore,
    editor: String,
}

impl<'a, T: Transport> EditSession<'a, T> {
    pub fn new(api: &'a CmsApi<T>, cache: &'a CacheStore, editor: String) -> Self {
        Self { api, cache, editor }
    }

    /// Runs one edit session for a resource.
    pub fn run(&self, category: Category, id: &str) -> Result<()> {
        // Stage the raw text exactly as the server sent it; re-serializing
        // would churn formatting the user wants to diff against.
        let raw = self.api.fetch_raw(category, id)?;
        let cache_path = self.cache.write(id, &raw)?;

        // Hands the terminal to the editor until the user is done. The
        // subprocess exit status is ignored.
        editor::launch(&self.editor, &cache_path)?;

        // A parse failure propagates before cleanup is reached, so the
        // edited file survives on disk for manual recovery.
        let edited = self.cache.read(id)?;
        let resource: Value = serde_json::from_str(&edited)?;

        self.api.submit(category, id, &resource)?;

        // Only reached after a successful submit.
        self.cache.remove(id)
    }
}

#[cfg(test)]
#[cfg(unix)]
mod tests {
    use super::*;
    use crate::api::test_transport::MockTransport;
    use crate::config::SessionConfig;
    use crate::error::CmsError;
    use crate::http::Method;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn session_config() -> SessionConfig {
        SessionConfig {
            host: Some("https://cms.example.com".into()),
            token: Some("tok".into()),
            project: Some("site".into()),
            environment: Some("live".into()),
        }
    }

    /// Writes a stand-in editor: a shell script that rewrites its file
    /// argument and exits with the given status.
    fn fake_editor(dir: &Path, new_content: &str, exit_code: i32) -> PathBuf {
        let path = dir.join("fake-editor.sh");
        let script = format!(
            "#!/bin/sh\nprintf '%s' '{}' > \"$1\"\nexit {}\n",
            new_content, exit_code
        );
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn test_nonzero_editor_exit_still_submits_and_cleans_up() {
        let tmp = TempDir::new().unwrap();
        let cache = CacheStore::new(tmp.path());
        let api = CmsApi::new(
            MockTransport::with_text(&["{\"id\":\"42\",\"title\":\"old\"}", ""]),
            session_config(),
        );
        let editor = fake_editor(tmp.path(), "{\"id\":\"42\",\"title\":\"new\"}", 1);

        EditSession::new(&api, &cache, editor.display().to_string())
            .run(Category::Content, "42")
            .unwrap();

        let requests = api.transport.requests.borrow();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].0, Method::Post);
        assert_eq!(
            requests[1].1,
            "https://cms.example.com/api/site/live/content/42?token=tok"
        );
        assert_eq!(
            requests[1].2,
            Some(serde_json::json!({"id": "42", "title": "new"}))
        );
        assert!(!cache.path("42").exists());
    }

    #[test]
    fn test_invalid_json_aborts_before_submit_and_preserves_cache_file() {
        let tmp = TempDir::new().unwrap();
        let cache = CacheStore::new(tmp.path());
        let api = CmsApi::new(
            MockTransport::with_text(&["{\"id\":\"42\",\"title\":\"old\"}"]),
            session_config(),
        );
        let editor = fake_editor(tmp.path(), "not json", 0);

        let err = EditSession::new(&api, &cache, editor.display().to_string())
            .run(Category::Content, "42")
            .unwrap_err();

        assert!(matches!(err, CmsError::Parse(_)));
        // Only the GET went out.
        assert_eq!(api.transport.requests.borrow().len(), 1);
        assert_eq!(fs::read_to_string(cache.path("42")).unwrap(), "not json");
    }

    #[test]
    fn test_missing_editor_aborts_but_leaves_staged_file() {
        let tmp = TempDir::new().unwrap();
        let cache = CacheStore::new(tmp.path());
        let api = CmsApi::new(
            MockTransport::with_text(&["{\"id\":\"42\"}"]),
            session_config(),
        );

        let err = EditSession::new(&api, &cache, "cmsctl-no-such-editor".into())
            .run(Category::Content, "42")
            .unwrap_err();

        assert!(matches!(err, CmsError::Subprocess(_)));
        assert_eq!(
            fs::read_to_string(cache.path("42")).unwrap(),
            "{\"id\":\"42\"}"
        );
    }

    #[test]
    fn test_untouched_valid_resource_round_trips() {
        let tmp = TempDir::new().unwrap();
        let cache = CacheStore::new(tmp.path());
        let api = CmsApi::new(
            MockTransport::with_text(&["{\"id\": \"42\", \"title\": \"old\"}", ""]),
            session_config(),
        );

        // `true` exits immediately without touching the file.
        EditSession::new(&api, &cache, "true".into())
            .run(Category::Schemas, "42")
            .unwrap();

        let requests = api.transport.requests.borrow();
        assert_eq!(
            requests[1].2,
            Some(serde_json::json!({"id": "42", "title": "old"}))
        );
        assert!(!cache.path("42").exists());
    }
}
