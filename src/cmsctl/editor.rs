//! External editor integration.

use crate::config::Settings;
use crate::error::{CmsError, Result};
use std::env;
use std::path::Path;
use std::process::Command;

const DEFAULT_EDITOR: &str = "vi";

/// Resolves the editor command: the `editor` setting, then `$EDITOR`, then
/// `vi`.
pub fn resolve_editor(settings: &Settings) -> String {
    if let Some(editor) = settings.get("editor") {
        if !editor.is_empty() {
            return editor.to_string();
        }
    }

    if let Ok(editor) = env::var("EDITOR") {
        if !editor.is_empty() {
            return editor;
        }
    }

    DEFAULT_EDITOR.to_string()
}

/// Spawns `<editor> <path>` with inherited stdio and blocks until it exits.
///
/// The exit status is not inspected: editors disagree on what a nonzero
/// exit means, so the file content is the only signal that matters.
pub fn launch(editor: &str, path: &Path) -> Result<()> {
    Command::new(editor)
        .arg(path)
        .status()
        .map_err(|e| CmsError::Subprocess(format!("Failed to launch editor '{}': {}", editor, e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_editor_precedence() {
        // Sequential on purpose: these cases share the EDITOR env var.
        let original = env::var("EDITOR").ok();

        let mut settings = Settings::default();
        settings.set("editor", "nano");
        env::set_var("EDITOR", "emacs");
        assert_eq!(resolve_editor(&settings), "nano");

        assert_eq!(resolve_editor(&Settings::default()), "emacs");

        env::remove_var("EDITOR");
        assert_eq!(resolve_editor(&Settings::default()), "vi");

        match original {
            Some(value) => env::set_var("EDITOR", value),
            None => env::remove_var("EDITOR"),
        }
    }

    #[test]
    #[cfg(unix)]
    fn test_launch_missing_executable_is_subprocess_error() {
        let err = launch("cmsctl-no-such-editor", Path::new("/dev/null")).unwrap_err();
        assert!(matches!(err, CmsError::Subprocess(_)));
    }

    #[test]
    #[cfg(unix)]
    fn test_launch_ignores_nonzero_exit() {
        // `false` exits 1; the launch still counts as done.
        launch("false", Path::new("/dev/null")).unwrap();
    }
}
