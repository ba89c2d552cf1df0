//! # cmsctl Architecture
//!
//! cmsctl is a small client library with a thin CLI on top. The core of the
//! tool is the pairing of two pieces:
//!
//! - [`fsutil`]: a generic, recursive filesystem utility (directory creation,
//!   listing, aggregate read, recursive removal) with deliberately quirky but
//!   stable contracts that the rest of the tool relies on.
//! - [`session`]: the edit-session workflow that stages a remote resource on
//!   disk, hands the terminal to an external editor, and reconciles the
//!   edited file back to the server.
//!
//! ```text
//! CLI (main.rs, args.rs, print.rs)
//!   │ parses arguments, formats output, owns exit codes
//!   ▼
//! CmsApi (api.rs) ── Transport (http.rs)
//!   │ builds resource URLs, parses responses
//!   ▼
//! EditSession (session.rs) ── CacheStore (cache.rs) ── fsutil
//! ```
//!
//! ## Key principles
//!
//! - **No I/O assumptions in core.** From [`api`] inward, code takes regular
//!   arguments, returns `Result`, and never touches stdout or calls
//!   `process::exit`. Only `main.rs` prints and exits.
//! - **Preserve data over tidiness.** A cache file is removed only after its
//!   content has been parsed *and* submitted. Any earlier failure leaves it
//!   on disk for manual recovery.
//! - **Nothing retries.** Every error bubbles to the top-level dispatcher,
//!   which prints one message and exits nonzero.
//!
//! ## Module overview
//!
//! - [`api`]: facade over the server's HTTP contract
//! - [`cache`]: cache-file paths and staging
//! - [`config`]: session and settings configuration
//! - [`editor`]: external editor resolution and launching
//! - [`error`]: error types
//! - [`fsutil`]: filesystem utility
//! - [`http`]: the `Transport` seam and its `ureq` implementation
//! - [`resource`]: resource display helpers
//! - [`session`]: the edit-session workflow

pub mod api;
pub mod cache;
pub mod config;
pub mod editor;
pub mod error;
pub mod fsutil;
pub mod http;
pub mod resource;
pub mod session;
