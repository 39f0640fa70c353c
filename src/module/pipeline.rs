//! Discovery and installation across every module under a root directory

use super::classify::classify_or_skip;
use super::descriptor::ModuleDescriptor;
use super::error::ModuleError;
use super::install::{InstallOutcome, Installer};
use crate::fs::{FileSystem, RealFileSystem};
use serde::Serialize;
use std::env;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Summary of a successful `process` run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProcessReport {
    pub modules: Vec<InstallOutcome>,
}

impl ProcessReport {
    pub fn fragment_count(&self) -> usize {
        self.modules.iter().map(|m| m.fragments.len()).sum()
    }

    pub fn unit_count(&self) -> usize {
        self.modules.iter().map(|m| m.units.len()).sum()
    }
}

/// Drives discovery and installation through a [`FileSystem`]
pub struct ModulePipeline<F: FileSystem = RealFileSystem> {
    fs: F,
}

impl Default for ModulePipeline<RealFileSystem> {
    fn default() -> Self {
        Self::new(RealFileSystem)
    }
}

impl<F: FileSystem> ModulePipeline<F> {
    pub fn new(fs: F) -> Self {
        Self { fs }
    }

    /// Lists the immediate subdirectories of `root_dir` that carry at least one
    /// marker file, in file-name order.
    ///
    /// A module directory that cannot be read is logged and left out. Symlinks
    /// are not modules, even when they point at a directory. Failure to list
    /// `root_dir` itself is returned.
    pub fn discover(&self, root_dir: &Path) -> Result<Vec<ModuleDescriptor>, ModuleError> {
        let root = absolute(root_dir);

        let entries = self
            .fs
            .read_dir(&root)
            .map_err(|source| ModuleError::ReadRoot {
                path: root.clone(),
                source,
            })?;

        let mut modules = Vec::new();
        for entry in entries.into_iter().filter(|e| e.is_dir()) {
            let path = root.join(entry.file_name());
            let actions = classify_or_skip(&self.fs, &path);

            if !actions.is_eligible() {
                debug!(module = %entry.display_name(), "No marker files, skipping");
                continue;
            }

            modules.push(ModuleDescriptor::new(path, entry.display_name(), actions));
        }

        info!(
            root = %root.display(),
            count = modules.len(),
            "Discovered modules"
        );
        Ok(modules)
    }

    /// Installs each module in order, stopping at the first one that fails.
    ///
    /// Files written for earlier modules are kept; later modules are not touched.
    pub fn process(
        &self,
        modules: &[ModuleDescriptor],
        target_dir: &Path,
    ) -> Result<ProcessReport, ModuleError> {
        let installer = Installer::new(&self.fs, target_dir);
        let mut report = ProcessReport::default();

        for module in modules {
            if !module.actions().is_eligible() {
                debug!(module = module.name(), "No actions, skipping");
                continue;
            }

            let outcome = installer
                .install(module)
                .map_err(|source| ModuleError::Process {
                    name: module.name().to_string(),
                    source: Box::new(source),
                })?;
            report.modules.push(outcome);
        }

        info!(
            target = %target_dir.display(),
            modules = report.modules.len(),
            fragments = report.fragment_count(),
            units = report.unit_count(),
            "Module processing complete"
        );
        Ok(report)
    }

    /// `discover` followed by `process`
    pub fn run(&self, root_dir: &Path, target_dir: &Path) -> Result<ProcessReport, ModuleError> {
        let modules = self.discover(root_dir)?;
        self.process(&modules, target_dir)
    }
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    absolute_from(path, env::current_dir())
}

fn absolute_from(path: &Path, cwd: io::Result<PathBuf>) -> PathBuf {
    match cwd {
        Ok(cwd) => cwd.join(path),
        Err(e) => {
            warn!(
                root = %path.display(),
                "Cannot resolve working directory ({}); ExecStart lines will be relative",
                e
            );
            path.to_path_buf()
        }
    }
}
