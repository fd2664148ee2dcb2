use clap::{CommandFactory, Parser};
use clap_complete::generate;
use mapping_debugger::cli::{Cli, Commands, Verbosity};
use mapping_debugger::config::Settings;
use mapping_debugger::ui::formatter::Formatter;
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn initialize_tracing(verbosity: Verbosity) {
    let log_level = verbosity.to_log_level();
    let fallback_filter = format!("mapping_debugger={}", log_level);

    let use_json = std::env::var("MAPPING_DEBUG_JSON").is_ok();

    if use_json {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true);

        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| fallback_filter.clone().into()),
            )
            .with(json_layer)
            .init();
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true);

        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| fallback_filter.into()),
            )
            .with(fmt_layer)
            .init();
    }
}

fn main() -> miette::Result<()> {
    Formatter::configure_colors_from_env();

    let cli = Cli::parse();
    let verbosity = cli.verbosity();

    initialize_tracing(verbosity);

    let settings_path = Settings::default_path(cli.settings.as_deref());
    let mut settings = Settings::load_or_default(&settings_path);

    let result = match cli.command {
        Commands::Check(args) => mapping_debugger::cli::commands::check(args, &settings),
        Commands::Lookup(args) => mapping_debugger::cli::commands::lookup(args, &settings),
        Commands::Files(args) => mapping_debugger::cli::commands::files(args, &settings),
        Commands::Reverse(args) => mapping_debugger::cli::commands::reverse(args, &settings),
        Commands::Name(args) => mapping_debugger::cli::commands::name(args, &settings),
        Commands::Interactive(args) => {
            mapping_debugger::cli::commands::interactive(args, &settings)
        }
        Commands::Context(command) => {
            mapping_debugger::cli::commands::context(command, &mut settings, &settings_path)
        }
        Commands::Completions(args) => {
            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "mapping-debug", &mut io::stdout());
            Ok(())
        }
    };

    if let Err(err) = &result {
        eprintln!("{}", Formatter::error(format!("Error: {err}")));
    }
    result
}
