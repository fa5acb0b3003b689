use fitreport::*;
use anyhow::Context;

/// A utility for comparing fit strategies
/// over many seeded workloads.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Number of cells in the address space
    #[arg(short, long = "nmax", alias = "NMAX")]
    #[arg(value_parser = clap::value_parser!(Cells))]
    nmax:       Cells,

    /// Number of ticks per simulation
    #[arg(short, long = "tmax", alias = "TMAX")]
    #[arg(value_parser = clap::value_parser!(Tick))]
    tmax:       Tick,

    /// Maximum job size, in cells
    #[arg(short, long = "jmax", alias = "JMAX")]
    #[arg(value_parser = clap::value_parser!(Cells))]
    jmax:       Cells,

    /// Probability of attempting an allocation at each tick
    #[arg(short = 'a', long = "palloc", alias = "PALLOC")]
    #[arg(value_parser = clap::value_parser!(f64))]
    palloc:     f64,

    /// Probability of deallocating a random job at each tick (after the warm-up)
    #[arg(short = 'd', long = "pdealloc", alias = "PDEALLOC")]
    #[arg(value_parser = clap::value_parser!(f64))]
    pdealloc:   f64,

    /// Number of seeds to try each strategy with
    #[arg(short = 'k', long, default_value_t = 32)]
    #[arg(value_parser = clap::value_parser!(u64))]
    trials:     u64,

    /// First seed; the rest follow consecutively
    #[arg(short, long, default_value_t = 0)]
    #[arg(value_parser = clap::value_parser!(u64))]
    seed:       u64,

    /// Emit every trial plus the summaries as JSON
    #[arg(long, default_value_t = false)]
    json:       bool,
}

fn main() -> anyhow::Result<()> {
    // Per-job events are far too many here.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .init();
    let cli = Args::parse();
    let base = SimConfig {
        fit:            Fit::First,
        space_size:     cli.nmax,
        ticks:          cli.tmax,
        max_job_size:   cli.jmax,
        p_alloc:        cli.palloc,
        p_dealloc:      cli.pdealloc,
    };
    let last_seed = cli.seed
        .checked_add(cli.trials)
        .context("Seed range overflows")?;
    let trials = run_trials(base, cli.seed..last_seed)
        .context("Bad simulation parameters")?;
    let summaries = summarize(&trials);

    if cli.json {
        let doc = serde_json::json!({
            "trials":       trials,
            "summaries":    summaries,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        println!("{}", render_table(&summaries));
    }

    Ok(())
}
