//! Filesystem utility used by the cache store and config layer.
//!
//! Two contracts here look odd on purpose and must stay that way, because
//! callers branch on them:
//!
//! - [`list`] is asymmetric: a directory yields the *names* of its immediate
//!   entries, a file yields a single-element vec holding the full path.
//! - [`read`] collapses a single file to a scalar value, while zero or
//!   several files come back as a sequence.

use crate::error::{CmsError, Result};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Text encoding for [`read`]. Only UTF-8 is supported; `None` reads raw
/// bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
}

/// One file's content, raw or decoded depending on the requested encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    Raw(Vec<u8>),
    Text(String),
}

/// Aggregate result of [`read`]: exactly one file is a scalar, anything
/// else (including none) is a sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadValue {
    Scalar(FileContent),
    Sequence(Vec<FileContent>),
}

/// Content accepted by [`write`]. Text is written verbatim; JSON is
/// pretty-printed with a 4-space indent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(String),
    Json(Value),
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Content::Text(text)
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::Text(text.to_string())
    }
}

impl From<Value> for Content {
    fn from(value: Value) -> Self {
        Content::Json(value)
    }
}

/// Creates a directory and any missing parents, shallowest first.
///
/// A segment that already exists is skipped without error; any other OS
/// error aborts and propagates. Calling this on a fully-existing path is a
/// no-op, so repeated calls are safe.
pub fn make_directory<P: AsRef<Path>>(path: P) -> Result<()> {
    let mut current = PathBuf::new();

    for component in path.as_ref().components() {
        current.push(component);

        if matches!(
            component,
            Component::Prefix(_) | Component::RootDir | Component::CurDir
        ) {
            continue;
        }

        match fs::create_dir(&current) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}

/// Checks whether a file or directory exists. No distinction is made
/// between the two.
pub fn exists<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().exists()
}

/// Lists a file or the files in a directory.
///
/// For a directory this returns the bare names of its immediate entries,
/// unsorted, in OS enumeration order. For a file it returns the full path
/// itself as the only element. Anything else fails.
pub fn list<P: AsRef<Path>>(path: P) -> Result<Vec<PathBuf>> {
    let path = path.as_ref();
    let meta = fs::symlink_metadata(path)?;

    if meta.is_dir() {
        let mut names = Vec::new();
        for entry in fs::read_dir(path)? {
            names.push(PathBuf::from(entry?.file_name()));
        }
        Ok(names)
    } else if meta.is_file() {
        Ok(vec![path.to_path_buf()])
    } else {
        Err(CmsError::Filesystem(io::Error::other(format!(
            "File type for {} unknown",
            path.display()
        ))))
    }
}

/// Reads a file, or every file in a directory, fully into memory.
///
/// Files are read in [`list`] order. With an encoding, each buffer is
/// decoded to text. Exactly one file comes back as `Scalar`; zero or
/// several come back as `Sequence`.
pub fn read<P: AsRef<Path>>(path: P, encoding: Option<Encoding>) -> Result<ReadValue> {
    let path = path.as_ref();
    let entries = list(path)?;
    let listed_dir = path.is_dir();

    let mut contents = Vec::with_capacity(entries.len());

    for entry in entries {
        // Directory listings hold bare names; resolve them against the
        // directory itself.
        let file_path = if listed_dir { path.join(&entry) } else { entry };
        let bytes = fs::read(&file_path)?;

        contents.push(match encoding {
            Some(Encoding::Utf8) => FileContent::Text(String::from_utf8(bytes).map_err(|e| {
                CmsError::Filesystem(io::Error::new(io::ErrorKind::InvalidData, e))
            })?),
            None => FileContent::Raw(bytes),
        });
    }

    if contents.len() == 1 {
        match contents.pop() {
            Some(content) => Ok(ReadValue::Scalar(content)),
            None => Ok(ReadValue::Sequence(contents)),
        }
    } else {
        Ok(ReadValue::Sequence(contents))
    }
}

/// Removes a file, or a directory tree depth-first: every child goes before
/// the directory itself. The first error aborts the remainder; deletions
/// already performed are not rolled back.
pub fn remove<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();

    if fs::symlink_metadata(path)?.is_dir() {
        for entry in fs::read_dir(path)? {
            remove(path.join(entry?.file_name()))?;
        }
        fs::remove_dir(path)?;
    } else {
        fs::remove_file(path)?;
    }

    Ok(())
}

/// Writes content to a file, overwriting any existing file at `path`.
///
/// Empty text and JSON null are silent no-ops that leave the target
/// untouched; callers rely on this to mean "nothing to write".
pub fn write<C: Into<Content>, P: AsRef<Path>>(content: C, path: P) -> Result<()> {
    match content.into() {
        Content::Text(text) if text.is_empty() => Ok(()),
        Content::Json(Value::Null) => Ok(()),
        Content::Text(text) => {
            fs::write(path, text)?;
            Ok(())
        }
        Content::Json(value) => {
            fs::write(path, json_pretty(&value)?)?;
            Ok(())
        }
    }
}

/// Moves a file or directory. OS errors propagate unchanged.
pub fn move_entry<P: AsRef<Path>, Q: AsRef<Path>>(from: P, to: Q) -> Result<()> {
    fs::rename(from, to)?;
    Ok(())
}

/// Copies a file. OS errors propagate unchanged.
pub fn copy<P: AsRef<Path>, Q: AsRef<Path>>(from: P, to: Q) -> Result<()> {
    fs::copy(from, to)?;
    Ok(())
}

/// Serializes a JSON value pretty-printed with a 4-space indent, matching
/// the format the server and config files use.
pub fn json_pretty(value: &Value) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;

    String::from_utf8(buf)
        .map_err(|e| CmsError::Filesystem(io::Error::new(io::ErrorKind::InvalidData, e)))
}
