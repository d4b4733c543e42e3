//! # dotdrop Engine
//!
//! Installation engine for the dotdrop dotfile manager.
//!
//! - **Installer**: install a source file or tree by writing rendered content,
//!   or link it (through a rendered copy when it is a template)
//! - **Write policy**: skip identical content, confirm and back up before
//!   overwriting, honor dry-run everywhere
//! - **Shadow install**: render what an install would produce into a scratch
//!   directory for comparison
//! - **Logger**: the sink for every decision, with a `tracing` implementation
//!   and an in-memory one

pub mod context;
pub mod error;
pub mod installer;
mod link;
pub mod logger;
mod write;

pub use context::InstallContext;
pub use error::{Error, Result};
pub use installer::{InstallOutcome, Installed, Installer};
pub use logger::{Logger, MemoryLogger, TracingLogger};
pub use write::{BACKUP_SUFFIX, backup_path};
