use std::path::PathBuf;

use clap::{Parser, Subcommand};
use conndetails_cli::commands::project::{OutputFormat, ProjectOptions};
use conndetails_cli::commands::{keys, project, CommandResult};
use conndetails_core::{init_tracing, ConnConfig};

#[derive(Parser)]
#[command(
    name = "conndetails",
    version,
    about = "Project OpenID client attributes into connection details"
)]
struct Cli {
    /// Directory holding conndetails.yaml and .env files
    #[arg(long, global = true, default_value = ".")]
    config_dir: PathBuf,

    /// Configuration profile (overridden by CONNDETAILS_PROFILE)
    #[arg(long, global = true, default_value = "dev")]
    profile: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the connection details of an attribute document
    Project {
        /// Attribute document (JSON or YAML); reads stdin when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Treat the input as YAML
        #[arg(long)]
        yaml: bool,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
        /// Reject non-string values for recognized fields
        #[arg(long)]
        strict: bool,
    },
    /// Print the field -> key table
    Keys,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}", colored::Colorize::red(format!("Error: {e}").as_str()));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> CommandResult {
    // Installed first so config loading is traced; `logging.filter` applies
    // from here on.
    let telemetry = init_tracing("info");
    let config = ConnConfig::load_from_dir(&cli.config_dir, &cli.profile)?;
    if let Some(filter) = config.get_opt::<String>("logging.filter")? {
        telemetry.set_filter(&filter)?;
    }

    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Commands::Project {
            input,
            yaml,
            format,
            strict,
        } => {
            let options = ProjectOptions {
                input,
                yaml,
                format,
                strict,
            };
            project::run(&config, &options, &mut stdout)
        }
        Commands::Keys => keys::run(&config, &mut stdout),
    }
}
