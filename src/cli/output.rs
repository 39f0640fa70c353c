//! Output formatting for the `list` command

use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Write;
use std::path::Path;

use crate::module::{ModuleDescriptor, UnitKind};

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// Human-readable formatted text
    Human,
}

#[derive(Serialize)]
struct ModulePlan<'a> {
    #[serde(flatten)]
    module: &'a ModuleDescriptor,
    unit: Option<UnitKind>,
}

/// Formats discovered modules
pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format_modules(&self, root: &Path, modules: &[ModuleDescriptor]) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_modules_json(modules),
            OutputFormat::Human => Ok(self.format_modules_human(root, modules)),
        }
    }

    fn format_modules_json(&self, modules: &[ModuleDescriptor]) -> Result<String> {
        let plans: Vec<ModulePlan<'_>> = modules
            .iter()
            .map(|module| ModulePlan {
                module,
                unit: final_unit(module),
            })
            .collect();
        serde_json::to_string_pretty(&plans).context("Failed to serialize modules to JSON")
    }

    fn format_modules_human(&self, root: &Path, modules: &[ModuleDescriptor]) -> String {
        if modules.is_empty() {
            return format!("No modules found in {}", root.display());
        }

        let mut out = format!("Modules in {}:\n", root.display());
        for module in modules {
            let _ = writeln!(out, "\n  {}", module.name());
            let actions = module.actions();
            if !actions.fragments.is_empty() {
                let _ = writeln!(out, "    fragments: {}", actions.fragment_names().join(", "));
            }
            if let Some(kind) = final_unit(module) {
                let _ = writeln!(
                    out,
                    "    unit:      {} ({})",
                    module.unit_file_name().to_string_lossy(),
                    kind.service_type()
                );
            }
            if actions.has_unit_collision() {
                let _ = writeln!(out, "    warning:   exec.sh unit is replaced by daemon.sh unit");
            }
        }
        out
    }
}

/// Kind of the unit left in `<name>.service` after installation
fn final_unit(module: &ModuleDescriptor) -> Option<UnitKind> {
    let actions = module.actions();
    if actions.daemon {
        Some(UnitKind::Daemon)
    } else if actions.exec {
        Some(UnitKind::Exec)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::ModuleActions;
    use std::path::PathBuf;

    fn modules() -> Vec<ModuleDescriptor> {
        vec![
            ModuleDescriptor::new(
                PathBuf::from("/m/agent"),
                "agent",
                ModuleActions {
                    fragments: vec!["agent-timer.service".into()],
                    exec: true,
                    daemon: true,
                },
            ),
            ModuleDescriptor::new(
                PathBuf::from("/m/setup"),
                "setup",
                ModuleActions {
                    exec: true,
                    ..Default::default()
                },
            ),
        ]
    }

    #[test]
    fn test_human_output() {
        let out = OutputFormatter::new(OutputFormat::Human)
            .format_modules(Path::new("/m"), &modules())
            .unwrap();

        assert!(out.contains("agent"));
        assert!(out.contains("fragments: agent-timer.service"));
        assert!(out.contains("agent.service (simple)"));
        assert!(out.contains("setup.service (oneshot)"));
        assert!(out.contains("warning:"));
    }

    #[test]
    fn test_human_output_empty() {
        let out = OutputFormatter::new(OutputFormat::Human)
            .format_modules(Path::new("/m"), &[])
            .unwrap();
        assert_eq!(out, "No modules found in /m");
    }

    #[test]
    fn test_json_output() {
        let out = OutputFormatter::new(OutputFormat::Json)
            .format_modules(Path::new("/m"), &modules())
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["name"], "agent");
        assert_eq!(value[0]["unit"], "daemon");
        assert_eq!(value[0]["actions"]["fragments"][0], "agent-timer.service");
        assert_eq!(value[1]["unit"], "exec");
        assert_eq!(value[1]["path"], "/m/setup");
    }
}
