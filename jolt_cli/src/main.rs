use clap::{Parser, Subcommand};
use jolt_core::store::EVENTS_FILE;
use jolt_core::time::{backdate, format_elapsed, now_millis};
use jolt_core::*;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "jolt")]
#[command(about = "Caffeine intake tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Config file (defaults to $XDG_CONFIG_HOME/jolt/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Evaluate at this instant (epoch milliseconds) instead of the wall clock
    #[arg(long, global = true, allow_hyphen_values = true)]
    now: Option<i64>,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a drink
    Log {
        /// Substance name as listed by `jolt substances`
        substance: String,

        /// Price paid in USD
        #[arg(long, default_value_t = 0.0)]
        cost: f64,

        /// Hours since the drink was consumed
        #[arg(long, default_value_t = 0)]
        hours: u32,

        /// Minutes since the drink was consumed (added to --hours)
        #[arg(long, default_value_t = 0)]
        minutes: u32,
    },

    /// Show the active caffeine level (default)
    Status,

    /// Show daily statistics and the most frequent drinks
    Stats {
        /// Number of drinks in the ranking
        #[arg(long, default_value_t = DEFAULT_TOP_N)]
        top: usize,
    },

    /// List logged drinks, newest first
    History,

    /// List known substances
    Substances,

    /// Write a config file with the default settings
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

/// Everything a command needs, resolved from flags and config
struct Context {
    config: Config,
    catalog: Catalog,
    events_path: PathBuf,
    now: i64,
    json: bool,
}

fn main() -> Result<()> {
    jolt_core::logging::init_with_level(jolt_core::logging::CLI_DEFAULT_LEVEL);

    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(Config::default_config_path);

    // Init must work even when the existing file would fail to load
    if let Some(Commands::Init { force }) = cli.command {
        return cmd_init(&config_path, cli.data_dir, force);
    }

    let config = Config::load_or_default(&config_path)?;
    let data_dir = cli
        .data_dir
        .unwrap_or_else(|| config.data.data_dir.clone());
    let catalog = config.build_catalog()?;

    let ctx = Context {
        events_path: data_dir.join(EVENTS_FILE),
        now: cli.now.unwrap_or_else(now_millis),
        json: cli.json,
        config,
        catalog,
    };
    tracing::debug!("Using event log {:?} at {}", ctx.events_path, ctx.now);

    match cli.command {
        Some(Commands::Log {
            substance,
            cost,
            hours,
            minutes,
        }) => cmd_log(&ctx, substance, cost, hours, minutes),
        Some(Commands::Status) | None => cmd_status(&ctx),
        Some(Commands::Stats { top }) => cmd_stats(&ctx, top),
        Some(Commands::History) => cmd_history(&ctx),
        Some(Commands::Substances) => cmd_substances(&ctx),
        Some(Commands::Init { .. }) => unreachable!("init is dispatched before config load"),
    }
}

fn cmd_log(ctx: &Context, substance: String, cost: f64, hours: u32, minutes: u32) -> Result<()> {
    let Some(entry) = ctx.catalog.get(&substance) else {
        return Err(Error::UnknownSubstance(substance));
    };
    if !cost.is_finite() || cost < 0.0 {
        return Err(Error::InvalidEvent(format!(
            "cost must be a non-negative amount, got {}",
            cost
        )));
    }
    if minutes >= 60 {
        return Err(Error::InvalidEvent(format!(
            "minutes must be below 60, got {}",
            minutes
        )));
    }

    let event = ConsumptionEvent::new(backdate(ctx.now, hours, minutes), substance, cost);

    let mut sink = JsonlSink::new(&ctx.events_path);
    sink.append(&event)?;

    if ctx.json {
        println!("{}", serde_json::to_string(&event)?);
    } else {
        println!(
            "✓ Logged {} ({} mg, ${:.2})",
            event.substance_name, entry.caffeine_mg, event.cost_usd
        );
    }
    Ok(())
}

fn build_report(ctx: &Context, top: usize) -> Result<Report> {
    let log = read_events(&ctx.events_path)?;
    let aggregator = Aggregator::new(&ctx.catalog, ctx.config.decay_model());
    Ok(Report::build(
        &aggregator,
        &ctx.config.thresholds(),
        &log,
        ctx.now,
        top,
    ))
}

fn cmd_status(ctx: &Context) -> Result<()> {
    let report = build_report(ctx, DEFAULT_TOP_N)?;

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "Active caffeine: {} mg [{}]",
        report.active_level_mg,
        report.status.tier.as_str()
    );
    println!("  {}", report.status.description);
    Ok(())
}

fn cmd_stats(ctx: &Context, top: usize) -> Result<()> {
    let report = build_report(ctx, top)?;

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let stats = &report.stats;
    println!("Daily caffeine:   {:.0} mg", stats.daily_caffeine_mg);
    println!("Avg # of drinks:  {:.2}", stats.average_daily_coffees);
    println!("Daily cost:       ${:.2}", stats.daily_cost_usd);
    println!("Total cost:       ${:.2}", stats.total_cost_usd);

    if report.top.is_empty() {
        println!("\nNo drinks logged yet.");
        return Ok(());
    }

    println!();
    println!("{:<28} {:>6} {:>6}", "Drink", "Count", "Share");
    for entry in &report.top {
        println!(
            "{:<28} {:>6} {:>5}%",
            entry.substance_name, entry.count, entry.percentage
        );
    }
    Ok(())
}

fn cmd_history(ctx: &Context) -> Result<()> {
    let log = read_events(&ctx.events_path)?;
    let aggregator = Aggregator::new(&ctx.catalog, ctx.config.decay_model());
    for name in aggregator.unknown_substances(&log) {
        tracing::warn!("Unknown substance '{}' contributes no caffeine", name);
    }
    let history = aggregator.history(&log, ctx.now);

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&history)?);
        return Ok(());
    }

    if history.is_empty() {
        println!("No drinks logged yet.");
        return Ok(());
    }

    for entry in &history {
        println!(
            "{} | {} ago | ${:.2} | {} mg / {} mg",
            entry.substance_name,
            format_elapsed(entry.elapsed_ms),
            entry.cost_usd,
            entry.remaining_mg,
            entry.original_mg
        );
    }
    Ok(())
}

fn cmd_substances(ctx: &Context) -> Result<()> {
    let substances = ctx.catalog.sorted();

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&substances)?);
        return Ok(());
    }

    for substance in substances {
        println!(
            "{:<28} {:>5} mg  {:?}",
            substance.name, substance.caffeine_mg, substance.tier
        );
    }
    Ok(())
}

/// Write the default settings, keeping only an explicit `--data-dir`
fn cmd_init(config_path: &Path, data_dir: Option<PathBuf>, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        return Err(Error::Config(format!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        )));
    }

    let mut config = Config::default();
    if let Some(data_dir) = data_dir {
        config.data.data_dir = data_dir;
    }

    config.save_to(config_path)?;
    println!("✓ Wrote {}", config_path.display());
    Ok(())
}
