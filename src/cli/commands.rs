//! Command implementations for the snowgrid CLI

use crate::cli::args::{Args, Commands, InspectArgs, SmetArgs, Verbosity};
use crate::constants::VARIABLE_ALIASES;
use crate::models::Grid;
use crate::pro_parser::{ParseResult, ProParser};
use crate::registry::all_entries;
use crate::render::{PlotOptions, prepare_plot};
use crate::resample::GridResampler;
use crate::smet::read_smet;
use anyhow::{Context, Result};
use colored::*;
use tracing::{debug, info};

/// Run the selected command
pub fn run(args: Args) -> Result<()> {
    let Some(command) = args.command else {
        return Ok(());
    };
    setup_logging(command.verbosity());

    match command {
        Commands::Inspect(inspect_args) => run_inspect(&inspect_args),
        Commands::Codes(_) => {
            print_codes();
            Ok(())
        }
        Commands::Smet(smet_args) => run_smet(&smet_args),
    }
}

/// Set up structured logging on stderr
pub fn setup_logging(verbosity: &Verbosity) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = verbosity.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("snowgrid={}", log_level)));

    // Keep an already installed subscriber
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init();

    debug!("Logging initialized at level: {}", log_level);
}

fn run_inspect(args: &InspectArgs) -> Result<()> {
    let config = args.config();
    config.validate().context("Invalid grid settings")?;
    let height_window = args.height_window()?;
    let time_window = args.time_window()?;

    info!("Inspecting {}", args.file.display());
    let parsed = ProParser::new(config.clone())
        .parse_file(&args.file, Some(&args.variable))
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    let grid = GridResampler::new(config)
        .create_grid(&parsed.profiles, &args.variable, time_window, height_window)
        .context("Failed to resample profiles")?;

    let mut options = PlotOptions::default().with_y_shift(args.y_shift);
    if let Some(window) = time_window {
        options = options.with_time_window(window);
    }

    print_profile_summary(&parsed);
    print_grid_summary(&grid, &options);
    Ok(())
}

fn print_profile_summary(parsed: &ParseResult) {
    let profiles = &parsed.profiles;

    println!("\n{}", "Profiles".bright_green().bold());
    println!(
        "  Snapshots: {}",
        profiles.len().to_string().bright_white().bold()
    );
    if let Some((first, last)) = profiles.time_span() {
        println!("  Time span: {} to {}", first, last);
    }

    let layers: Vec<usize> = profiles.iter().map(|p| p.layer_count()).collect();
    if let (Some(min), Some(max)) = (layers.iter().min(), layers.iter().max()) {
        println!("  Layers:    {} to {}", min, max);
    }
    println!(
        "  Lines:     {} read, {} used ({:.1}%)",
        parsed.stats.total_lines,
        parsed.stats.lines_bucketed(),
        parsed.stats.bucketed_rate()
    );
}

fn print_grid_summary(grid: &Grid, options: &PlotOptions) {
    let plot = prepare_plot(grid, options);

    println!("\n{}", "Grid".bright_green().bold());
    println!("  Variable:  {}", grid.variable.bright_white().bold());
    println!("  Shape:     {} x {}", grid.rows(), grid.columns());
    if let Some(extent) = plot.extent {
        println!(
            "  Extent:    {} to {}, {} to {} cm",
            extent.start, extent.end, extent.bottom, extent.top
        );
    }

    let coverage = format!("{:.1}%", grid.coverage() * 100.0);
    let coverage = if grid.coverage() > 0.0 {
        coverage.bright_white().bold()
    } else {
        coverage.bright_red().bold()
    };
    println!("  Filled:    {}", coverage);

    if let Some((low, high)) = grid.value_range() {
        println!("  Values:    {} to {}", low, high);
    }
    println!("  Colours:   {:?}", plot.color_scheme);
}

fn print_codes() {
    println!("{}", "Field codes".bright_green().bold());
    for (code, name) in all_entries() {
        println!("  {}  {}", code.bright_white().bold(), name);
    }

    println!("\n{}", "Aliases".bright_green().bold());
    for (alias, name) in VARIABLE_ALIASES {
        println!("  {} {}", format!("{:<14}", alias).bright_white(), name);
    }
}

fn run_smet(args: &SmetArgs) -> Result<()> {
    let series = read_smet(&args.file, &args.field)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    println!("\n{}", "SMET series".bright_green().bold());
    println!("  Field:   {}", series.field.bright_white().bold());
    println!("  Records: {} ({} valid)", series.len(), series.valid_count());
    if let (Some(first), Some(last)) = (series.timestamps.first(), series.timestamps.last()) {
        println!("  Span:    {} to {}", first, last);
    }
    Ok(())
}
