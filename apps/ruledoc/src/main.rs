//! ruledoc CLI binary entry point.
//! Resolves settings, runs the generator and prints the report.

mod exit_code;

use clap::Parser;
use exit_code::ExitCode;
use owo_colors::OwoColorize;
use ruledoc::cli::{Cli, Commands, GenerateArgs};
use ruledoc::error::GenerateError;
use ruledoc::{config, generate, output};

fn main() {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Generate(args) => run(args).exit(),
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn error_prefix() -> String {
    if std::env::var_os("NO_COLOR").is_some() {
        "error:".to_string()
    } else {
        "error:".red().bold().to_string()
    }
}

fn fail(err: GenerateError) -> ExitCode {
    eprintln!("{} {}", error_prefix(), err);
    ExitCode::from(&err)
}

fn run(args: GenerateArgs) -> ExitCode {
    let settings = match config::resolve_effective(&args.into_overrides()) {
        Ok(s) => s,
        Err(e) => return fail(e.into()),
    };
    let plugin = match generate::load_plugin(&settings) {
        Ok(p) => p,
        Err(e) => return fail(e),
    };
    let report = match generate::run_generate(&settings, &plugin) {
        Ok(r) => r,
        Err(e) => return fail(e),
    };
    output::print_report(&report, &settings.output, settings.check);

    if settings.check && report.drifted().next().is_some() {
        eprintln!(
            "{} Rule docs or lists are out of date. Run `ruledoc generate` to update them.",
            error_prefix()
        );
    }
    if report.failed(settings.check) {
        ExitCode::DocsFailure
    } else {
        ExitCode::Success
    }
}
