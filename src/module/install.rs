use super::descriptor::ModuleDescriptor;
use super::error::ModuleError;
use super::unit::{render_unit, UnitKind};
use crate::fs::FileSystem;
use serde::Serialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// What was written for one module
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InstallOutcome {
    pub module: String,
    pub fragments: Vec<PathBuf>,
    pub units: Vec<PathBuf>,
}

/// Writes module artifacts into the service manager's unit directory
pub struct Installer<'a, F: FileSystem + ?Sized> {
    fs: &'a F,
    target_dir: &'a Path,
}

impl<'a, F: FileSystem + ?Sized> Installer<'a, F> {
    pub fn new(fs: &'a F, target_dir: &'a Path) -> Self {
        Self { fs, target_dir }
    }

    pub fn target_dir(&self) -> &Path {
        self.target_dir
    }

    /// Copies each fragment to a same-named file in the target directory.
    ///
    /// Stops at the first failure; fragments already copied stay in place.
    pub fn copy_fragments(
        &self,
        module: &ModuleDescriptor,
        fragments: &[OsString],
    ) -> Result<Vec<PathBuf>, ModuleError> {
        let mut copied = Vec::with_capacity(fragments.len());

        for file_name in fragments {
            let from = module.path().join(file_name);
            let to = self.target_dir.join(file_name);

            let bytes =
                self.fs
                    .copy_file(&from, &to)
                    .map_err(|source| ModuleError::CopyFragment {
                        from: from.clone(),
                        to: to.clone(),
                        source,
                    })?;

            debug!(
                module = module.name(),
                bytes,
                "Copied {} -> {}",
                from.display(),
                to.display()
            );
            copied.push(to);
        }

        Ok(copied)
    }

    /// Writes the synthesized unit to `<name>.service`, replacing any existing file
    pub fn install_unit(
        &self,
        module: &ModuleDescriptor,
        kind: UnitKind,
    ) -> Result<PathBuf, ModuleError> {
        let path = self.target_dir.join(module.unit_file_name());
        let contents = render_unit(module.name(), module.path(), kind);

        self.fs
            .write_file(&path, contents.as_bytes())
            .map_err(|source| ModuleError::WriteUnit {
                kind: kind.as_str(),
                path: path.clone(),
                source,
            })?;

        debug!(module = module.name(), %kind, "Wrote {}", path.display());
        Ok(path)
    }

    /// Runs every action the module's classification asks for.
    ///
    /// Order is fragments, then the exec unit, then the daemon unit.
    pub fn install(&self, module: &ModuleDescriptor) -> Result<InstallOutcome, ModuleError> {
        let actions = module.actions();
        let mut outcome = InstallOutcome {
            module: module.name().to_string(),
            ..Default::default()
        };

        if !actions.fragments.is_empty() {
            outcome.fragments = self.copy_fragments(module, &actions.fragments)?;
        }

        if actions.has_unit_collision() {
            warn!(
                module = module.name(),
                "Both {} and {} present; the daemon unit replaces the exec unit in {}",
                UnitKind::Exec.script(),
                UnitKind::Daemon.script(),
                module.unit_file_name().to_string_lossy()
            );
        }

        for kind in [UnitKind::Exec, UnitKind::Daemon] {
            let wanted = match kind {
                UnitKind::Exec => actions.exec,
                UnitKind::Daemon => actions.daemon,
            };
            if !wanted {
                continue;
            }
            // Both kinds share one file; a rewrite is still one unit
            let path = self.install_unit(module, kind)?;
            if !outcome.units.contains(&path) {
                outcome.units.push(path);
            }
        }

        info!(
            module = module.name(),
            fragments = outcome.fragments.len(),
            units = outcome.units.len(),
            "Installed module"
        );

        Ok(outcome)
    }
}
