use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Installs systemd units for provisioning modules, then reports instance health
#[derive(Parser, Debug)]
#[command(
    name = "codec-init",
    version,
    long_about = "codec-init scans the module directory, copies pre-authored *.service \
                  fragments and generates units for exec.sh/daemon.sh scripts into the \
                  systemd unit directory. When health credentials are configured it then \
                  keeps reporting instance health until interrupted."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - only log errors"
    )]
    pub quiet: bool,
}

impl CliArgs {
    /// The subcommand to run; `run` with defaults when none was given
    pub fn subcommand(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or_else(|| Commands::Run(RunArgs::default()))
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    #[command(
        about = "Install module units and start health reporting (default)",
        long_about = "Discovers modules, writes their units into the systemd directory and, \
                      unless running standalone, reports health every 10 seconds.\n\n\
                      Examples:\n  \
                      codec-init\n  \
                      codec-init run --module-dir ./modules --systemd-path /etc/systemd/system\n  \
                      codec-init run --standalone"
    )]
    Run(RunArgs),

    #[command(
        about = "List discovered modules without writing anything",
        long_about = "Prints each eligible module with the fragments and units it would install.\n\n\
                      Examples:\n  \
                      codec-init list\n  \
                      codec-init list --module-dir ./modules --format json"
    )]
    List(ListArgs),
}

#[derive(Parser, Debug, Clone, Default)]
pub struct RunArgs {
    #[arg(
        long,
        value_name = "DIR",
        help = "Module root directory (overrides CODEC_MODULE_DIR)"
    )]
    pub module_dir: Option<PathBuf>,

    #[arg(
        long,
        value_name = "DIR",
        help = "Systemd unit directory (overrides CODEC_SYSTEMD_PATH)"
    )]
    pub systemd_path: Option<PathBuf>,

    #[arg(long, help = "Skip health reporting even if credentials are set")]
    pub standalone: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ListArgs {
    #[arg(
        long,
        value_name = "DIR",
        help = "Module root directory (overrides CODEC_MODULE_DIR)"
    )]
    pub module_dir: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}
