//! codec-init - module discovery and systemd unit installation
//!
//! At startup the host scans a module root directory. Each subdirectory is a
//! module; its marker files decide what is installed into the systemd unit
//! directory:
//!
//! - `*.service` fragments are copied verbatim
//! - `exec.sh` yields a `Type=oneshot` unit named `<module>.service`
//! - `daemon.sh` yields a `Type=simple` unit named `<module>.service`
//!
//! After installation, and when credentials are configured, the host keeps
//! reporting its health to the control API every 10 seconds.
//!
//! # Project Structure
//!
//! - [`module`]: discovery, classification, unit rendering and installation
//! - [`health`]: periodic health reporter
//! - [`config`]: environment-backed configuration
//! - [`fs`]: file system seam used by the module pipeline
//! - [`cli`]: command-line interface

pub mod cli;
pub mod config;
pub mod fs;
pub mod health;
pub mod module;
pub mod util;

pub use config::{CodecConfig, ConfigError, HealthConfig};
pub use health::{HealthHandle, HealthReporter};
pub use module::{ModuleDescriptor, ModuleError, ModulePipeline, ProcessReport};
pub use util::{init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
