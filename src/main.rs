use codec_init::cli::commands::{CliArgs, Commands};
use codec_init::cli::handlers::{handle_list, handle_run};
use codec_init::util::logging::{init_logging, parse_level, LoggingConfig};
use codec_init::{NAME, VERSION};

use clap::Parser;
use tracing::{debug, info, Level};

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    init_logging_from_args(&args);

    info!("{} v{} starting", NAME, VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match args.subcommand() {
        Commands::Run(run_args) => handle_run(&run_args).await,
        Commands::List(list_args) => handle_list(&list_args),
    };

    std::process::exit(exit_code);
}

fn init_logging_from_args(args: &CliArgs) {
    let mut config = LoggingConfig::from_env();

    if let Some(level_str) = &args.log_level {
        config.level = parse_level(level_str);
    } else if args.verbose {
        config.level = Level::DEBUG;
    } else if args.quiet {
        config.level = Level::ERROR;
    }

    init_logging(config);
}
