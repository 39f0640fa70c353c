//! Module discovery and systemd unit installation
//!
//! A module is a directory under the module root. Its marker files decide what
//! gets installed into the systemd unit directory:
//!
//! - `*.service` fragments are copied verbatim
//! - `exec.sh` produces a `Type=oneshot` unit named after the module
//! - `daemon.sh` produces a `Type=simple` unit named after the module
//!
//! Directories without any marker are skipped.
//!
//! # Example
//!
//! ```no_run
//! use codec_init::module::ModulePipeline;
//! use std::path::Path;
//!
//! let pipeline = ModulePipeline::default();
//! let modules = pipeline.discover(Path::new("/opt/codec/modules"))?;
//! let report = pipeline.process(&modules, Path::new("/etc/systemd/system"))?;
//! println!("{} units written", report.unit_count());
//! # Ok::<(), codec_init::module::ModuleError>(())
//! ```

pub mod classify;
pub mod descriptor;
pub mod error;
pub mod install;
pub mod pipeline;
pub mod unit;

pub use classify::{classify, classify_or_skip};
pub use descriptor::{ModuleActions, ModuleDescriptor};
pub use error::ModuleError;
pub use install::{InstallOutcome, Installer};
pub use pipeline::{ModulePipeline, ProcessReport};
pub use unit::{render_unit, UnitKind};
