use clap::builder::styling::{AnsiColor, Styles};
use clap::{ArgAction, ColorChoice, CommandFactory, FromArgMatches, Parser};
use std::path::{Path, PathBuf};

use rhizome_cdpdiff::commands::compare::{self, CompareArgs};
use rhizome_cdpdiff::config::CdpdiffConfig;
use rhizome_cdpdiff::output::{ColorMode, OutputFlags, OutputFormat};

#[derive(Parser)]
#[command(name = "cdpdiff")]
#[command(about = "Compare remote-debugging protocol session logs from two clients")]
struct Cli {
    #[command(flatten)]
    compare: CompareArgs,

    #[command(flatten)]
    output: OutputFlags,

    /// Extra config file, applied after global and project config
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// Help output styling.
const HELP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().bold())
    .usage(AnsiColor::Green.on_default().bold())
    .literal(AnsiColor::Cyan.on_default().bold())
    .placeholder(AnsiColor::Cyan.on_default());

/// Determine color choice for help output.
/// Checks args, config, and NO_COLOR before parsing since --help may exit early.
fn help_color_choice() -> ColorChoice {
    if std::env::var("NO_COLOR").is_ok() {
        return ColorChoice::Never;
    }

    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--compact") {
        return ColorChoice::Never;
    }
    if args.iter().any(|a| a == "--pretty") {
        return ColorChoice::Always;
    }

    let config = CdpdiffConfig::load(Path::new("."), None);
    match config.pretty.colors {
        Some(ColorMode::Always) => ColorChoice::Always,
        Some(ColorMode::Never) => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

/// Install the stderr log subscriber.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Reset SIGPIPE to default behavior so piping to `head` etc. doesn't panic.
#[cfg(unix)]
fn reset_sigpipe() {
    // SAFETY: libc::signal is a standard POSIX function. Restoring SIG_DFL for
    // SIGPIPE only changes signal disposition.
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}

#[cfg(not(unix))]
fn reset_sigpipe() {}

fn main() {
    reset_sigpipe();

    // Wrong argument counts exit here with usage and status 2.
    let matches = Cli::command()
        .styles(HELP_STYLES)
        .color(help_color_choice())
        .get_matches();
    let cli = match Cli::from_arg_matches(&matches) {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };

    init_tracing(cli.verbose);

    let config = CdpdiffConfig::load(Path::new("."), cli.config.as_deref());
    let format = OutputFormat::resolve(&cli.output, &config.pretty);

    let exit_code = compare::run(cli.compare, &format, &config);
    std::process::exit(exit_code);
}
