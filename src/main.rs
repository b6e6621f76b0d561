mod cli;
mod logging;

use cli::Args;
use depsnap::adapters::outbound::console::StderrProgressReporter;
use depsnap::adapters::outbound::filesystem::FileSystemReader;
use depsnap::application::dto::ReplayRequest;
use depsnap::application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use depsnap::application::read_models::SnapshotReportBuilder;
use depsnap::application::use_cases::ReplayChangesUseCase;
use depsnap::config::{self, ConfigFile};
use depsnap::ports::inbound::SnapshotReplayPort;
use depsnap::shared::{ExitCode, Result};
use std::io::IsTerminal;
use std::path::Path;
use std::process;

#[tokio::main]
async fn main() {
    // clap exits with code 2 on usage errors
    let args = Args::parse_args();
    logging::init_logging(!args.no_color && std::io::stderr().is_terminal());

    if let Err(e) = run(args).await {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        process::exit(ExitCode::ApplicationError.as_i32());
    }
}

async fn run(args: Args) -> Result<()> {
    let progress_reporter = if args.quiet {
        StderrProgressReporter::quiet()
    } else {
        StderrProgressReporter::new()
    };

    // Load configuration: explicit path, or discovered next to the change log
    let config = load_config(&args)?;

    // Create use case with injected dependencies
    let use_case = ReplayChangesUseCase::new(
        FileSystemReader::new(),
        progress_reporter,
        config.filter_pipeline()?,
        config.provider_registry(),
    );
    use_case.validate_change_log_path(&args.change_log)?;

    // CLI flags override configuration
    let item_specs = if args.item_specs.is_empty() {
        config.project_item_specs
    } else {
        Some(args.item_specs)
    };
    let request = ReplayRequest::new(args.change_log)
        .with_project_path(args.project)
        .with_active_target_framework(args.target_framework.or(config.active_target_framework))
        .with_project_item_specs(item_specs);

    let response = use_case.replay(request).await?;

    if !args.quiet {
        eprintln!("{}", FormatterFactory::progress_message(args.format));
    }

    let colored = !args.no_color && args.output.is_none() && std::io::stdout().is_terminal();
    let report = SnapshotReportBuilder::build(&response.snapshot, &response.statistics);
    let formatted_output = FormatterFactory::create(args.format, colored).format(&report)?;

    PresenterFactory::create(PresenterType::from_output(args.output)).present(&formatted_output)?;

    Ok(())
}

fn load_config(args: &Args) -> Result<ConfigFile> {
    if let Some(path) = &args.config {
        return config::load_config_from_path(path);
    }

    let dir = match args.change_log.parent() {
        Some(parent) if parent != Path::new("") => parent,
        _ => Path::new("."),
    };
    Ok(config::discover_config(dir)?.unwrap_or_default())
}
