//! Rendering of systemd units for modules that ship `exec.sh` or `daemon.sh`

use super::classify::{DAEMON_MARKER, EXEC_MARKER};
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Which marker script a synthesized unit starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    /// Runs `exec.sh` once
    Exec,
    /// Keeps `daemon.sh` running
    Daemon,
}

impl UnitKind {
    pub fn service_type(self) -> &'static str {
        match self {
            UnitKind::Exec => "oneshot",
            UnitKind::Daemon => "simple",
        }
    }

    pub fn script(self) -> &'static str {
        match self {
            UnitKind::Exec => EXEC_MARKER,
            UnitKind::Daemon => DAEMON_MARKER,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UnitKind::Exec => "exec",
            UnitKind::Daemon => "daemon",
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Renders the unit text for `name`, starting the kind's script inside `module_root`.
///
/// `module_root` should be absolute; the pipeline only hands out absolute
/// module paths.
pub fn render_unit(name: &str, module_root: &Path, kind: UnitKind) -> String {
    let exec_start = module_root.join(kind.script());

    format!(
        "[Unit]
Description={name} service
After=network.target

[Service]
Type={service_type}
ExecStart={exec_start}
Restart=always
User=root

[Install]
WantedBy=multi-user.target
",
        name = name,
        service_type = kind.service_type(),
        exec_start = exec_start.display(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_exec_unit() {
        let unit = render_unit("backup", Path::new("/opt/modules/backup"), UnitKind::Exec);

        let expected = "[Unit]
Description=backup service
After=network.target

[Service]
Type=oneshot
ExecStart=/opt/modules/backup/exec.sh
Restart=always
User=root

[Install]
WantedBy=multi-user.target
";
        assert_eq!(unit, expected);
    }

    #[test]
    fn test_render_daemon_unit() {
        let unit = render_unit("proxy", Path::new("/srv/mods/proxy"), UnitKind::Daemon);

        assert!(unit.contains("Description=proxy service\n"));
        assert!(unit.contains("Type=simple\n"));
        assert!(unit.contains("ExecStart=/srv/mods/proxy/daemon.sh\n"));
        assert!(!unit.contains("oneshot"));
        assert!(unit.ends_with("WantedBy=multi-user.target\n"));
    }

    #[test]
    fn test_kinds_differ_only_in_type_and_script() {
        let root = Path::new("/m/x");
        let exec = render_unit("x", root, UnitKind::Exec);
        let daemon = render_unit("x", root, UnitKind::Daemon);

        let diff: Vec<(&str, &str)> = exec
            .lines()
            .zip(daemon.lines())
            .filter(|(a, b)| a != b)
            .collect();

        assert_eq!(
            diff,
            vec![
                ("Type=oneshot", "Type=simple"),
                ("ExecStart=/m/x/exec.sh", "ExecStart=/m/x/daemon.sh"),
            ]
        );
    }

    #[test]
    fn test_render_is_deterministic() {
        let root = Path::new("/opt/modules/a");
        assert_eq!(
            render_unit("a", root, UnitKind::Daemon),
            render_unit("a", root, UnitKind::Daemon)
        );
    }

    #[test]
    fn test_name_is_inserted_verbatim() {
        let unit = render_unit("{{TYPE}}", Path::new("/m/{{NAME}}"), UnitKind::Exec);

        assert!(unit.contains("Description={{TYPE}} service\n"));
        assert!(unit.contains("Type=oneshot\n"));
        assert!(unit.contains("ExecStart=/m/{{NAME}}/exec.sh\n"));
    }
}
