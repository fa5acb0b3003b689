use fitsim::*;
use anyhow::Context;

/// Simulates contiguous allocation over a linear address space
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Fit strategy
    #[arg(value_enum, ignore_case = true)]
    fit:        Fit,

    /// Number of cells in the address space
    #[arg(short, long = "nmax", alias = "NMAX")]
    #[arg(value_parser = clap::value_parser!(Cells))]
    nmax:       Cells,

    /// Number of ticks to simulate
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

    /// Workload seed (drawn at random if not given)
    #[arg(short, long)]
    #[arg(value_parser = clap::value_parser!(u64))]
    seed:       Option<u64>,

    /// Print the address space and its holes before every tick,
    /// regardless of the space's size
    #[arg(long, default_value_t = false)]
    trace:      bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .init();
    let cli = Args::parse();
    let config = SimConfig {
        fit:            cli.fit,
        space_size:     cli.nmax,
        ticks:          cli.tmax,
        max_job_size:   cli.jmax,
        p_alloc:        cli.palloc,
        p_dealloc:      cli.pdealloc,
    };
    let seed = cli.seed.unwrap_or_else(rand::random);
    info!("Workload seed: {}", seed);
    let sim = Simulation::seeded(config, seed)
        .context("Bad simulation parameters")?;

    let report = if cli.trace || cli.nmax <= SMALL_SPACE {
        sim.run_observed(|_, space, holes| {
            println!("{}", space);
            for h in holes {
                println!("{}", h);
            }
        })
    } else { sim.run() };
    println!("\n{}", report);

    Ok(())
}
