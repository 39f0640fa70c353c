use serde::{Serialize, Serializer};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Actions a module's marker files ask for, evaluated once at discovery
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModuleActions {
    /// Pre-authored `*.service` fragments to copy verbatim, as raw file names
    #[serde(serialize_with = "serialize_names_lossy")]
    pub fragments: Vec<OsString>,
    /// `exec.sh` is present
    pub exec: bool,
    /// `daemon.sh` is present
    pub daemon: bool,
}

impl ModuleActions {
    pub fn is_eligible(&self) -> bool {
        !self.fragments.is_empty() || self.exec || self.daemon
    }

    /// Both markers target `<name>.service`; the daemon unit overwrites the exec one
    pub fn has_unit_collision(&self) -> bool {
        self.exec && self.daemon
    }

    /// Fragment names for display; invalid UTF-8 is replaced
    pub fn fragment_names(&self) -> Vec<String> {
        self.fragments
            .iter()
            .map(|f| f.to_string_lossy().into_owned())
            .collect()
    }
}

fn serialize_names_lossy<S: Serializer>(names: &[OsString], s: S) -> Result<S::Ok, S::Error> {
    s.collect_seq(names.iter().map(|n| n.to_string_lossy()))
}

fn serialize_path_lossy<S: Serializer>(path: &Path, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&path.to_string_lossy())
}

/// One discovered module directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleDescriptor {
    #[serde(serialize_with = "serialize_path_lossy")]
    path: PathBuf,
    name: String,
    actions: ModuleActions,
}

impl ModuleDescriptor {
    pub fn new(path: PathBuf, name: impl Into<String>, actions: ModuleActions) -> Self {
        Self {
            path,
            name: name.into(),
            actions,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn actions(&self) -> &ModuleActions {
        &self.actions
    }

    /// File name of the unit synthesized for this module.
    ///
    /// Built from the raw directory name, so it stays valid when `name` had
    /// to be lossily converted.
    pub fn unit_file_name(&self) -> OsString {
        let mut file_name = self
            .path
            .file_name()
            .map(OsStr::to_os_string)
            .unwrap_or_else(|| OsString::from(&self.name));
        file_name.push(".service");
        file_name
    }
}
