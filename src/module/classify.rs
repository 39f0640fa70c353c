use super::descriptor::ModuleActions;
use super::error::ModuleError;
use crate::fs::FileSystem;
use std::ffi::OsStr;
use std::path::Path;
use tracing::{debug, warn};

pub const EXEC_MARKER: &str = "exec.sh";
pub const DAEMON_MARKER: &str = "daemon.sh";
pub const FRAGMENT_SUFFIX: &str = ".service";

/// Lists a module directory once and derives its actions from entry names.
///
/// Names are compared as raw bytes, so entries that are not valid UTF-8 are
/// still recognized.
pub fn classify<F: FileSystem + ?Sized>(
    fs: &F,
    module_path: &Path,
) -> Result<ModuleActions, ModuleError> {
    let entries = fs
        .read_dir(module_path)
        .map_err(|source| ModuleError::ReadModule {
            path: module_path.to_path_buf(),
            source,
        })?;

    let mut actions = ModuleActions::default();
    for entry in &entries {
        let name = entry.file_name();
        if is_fragment(name) {
            actions.fragments.push(name.to_os_string());
        } else if name == OsStr::new(EXEC_MARKER) {
            actions.exec = true;
        } else if name == OsStr::new(DAEMON_MARKER) {
            actions.daemon = true;
        }
    }

    debug!(
        module = %module_path.display(),
        fragments = actions.fragments.len(),
        exec = actions.exec,
        daemon = actions.daemon,
        "Classified module"
    );

    Ok(actions)
}

fn is_fragment(name: &OsStr) -> bool {
    name.as_encoded_bytes()
        .ends_with(FRAGMENT_SUFFIX.as_bytes())
}

/// Like [`classify`], but a directory that cannot be read is logged and
/// reported as having no actions
pub fn classify_or_skip<F: FileSystem + ?Sized>(fs: &F, module_path: &Path) -> ModuleActions {
    match classify(fs, module_path) {
        Ok(actions) => actions,
        Err(e) => {
            warn!("module system: {}", e);
            ModuleActions::default()
        }
    }
}
