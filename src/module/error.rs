//! Errors raised while discovering and installing modules

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in the module pipeline
///
/// Every filesystem failure carries the operation and the path it failed on.
#[derive(Debug, Error)]
pub enum ModuleError {
    /// The module root itself could not be listed
    #[error("could not read module directory {path:?}: {source}")]
    ReadRoot { path: PathBuf, source: io::Error },

    /// A module directory could not be listed
    #[error("error reading module directory {path:?}: {source}")]
    ReadModule { path: PathBuf, source: io::Error },

    /// Copying a pre-authored fragment into the target directory failed
    #[error("error copying service file {from:?} -> {to:?}: {source}")]
    CopyFragment {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },

    /// Writing a synthesized unit failed
    #[error("could not write {kind} service file {path:?}: {source}")]
    WriteUnit {
        kind: &'static str,
        path: PathBuf,
        source: io::Error,
    },

    /// A module failed; the run was stopped at this module
    #[error("error processing module {name:?}: {source}")]
    Process {
        name: String,
        #[source]
        source: Box<ModuleError>,
    },
}

impl ModuleError {
    /// Name of the module that stopped the run, if any
    pub fn module_name(&self) -> Option<&str> {
        match self {
            ModuleError::Process { name, .. } => Some(name),
            _ => None,
        }
    }
}
