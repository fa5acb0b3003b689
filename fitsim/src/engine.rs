//! The tick-driven simulation loop.
//!
//! Each tick goes through the same fixed sequence:
//!
//! 1. a job size is drawn from `[1, max_job_size]`, whether it ends up
//!    being used or not;
//! 2. a deallocation coin is flipped. Past the warm-up window
//!    ([`WARMUP_TICKS`]), heads means a random active job is evicted;
//! 3. an allocation coin is flipped. Heads means the configured [`Fit`]
//!    looks for a hole for the drawn size, and the outcome is tallied;
//! 4. the clock advances.
//!
//! Every random draw above is taken from the one generator owned by the
//! [`Simulation`], in the order listed, regardless of outcome. A fixed seed
//! thus yields the exact same run.
use crate::{analyze, helpe::*};

/// Parameters of one simulation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimConfig {
    pub fit:            Fit,
    /// Number of cells in the address space.
    pub space_size:     Cells,
    /// Number of ticks to run for.
    pub ticks:          Tick,
    /// Job sizes are drawn uniformly from `[1, max_job_size]`.
    pub max_job_size:   Cells,
    /// Probability of attempting an allocation at each tick.
    pub p_alloc:        f64,
    /// Probability of deallocating a job at each (post-warm-up) tick.
    pub p_dealloc:      f64,
}

impl SimConfig {
    /// This function is the gatekeeper to the rest of the library.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.space_size == 0 {
            return Err(ConfigError::EmptySpace);
        } else if self.ticks == 0 {
            return Err(ConfigError::NoTicks);
        } else if self.max_job_size == 0 {
            return Err(ConfigError::ZeroJobSize);
        }
        for (name, value) in [("PALLOC", self.p_alloc), ("PDEALLOC", self.p_dealloc)] {
            // Also rejects NaN.
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::BadProbability { name, value });
            }
        }

        Ok(())
    }
}

/// Everything that a simulation mutates, in one place.
#[derive(Debug, Clone)]
pub struct SimState {
    pub space:  AddressSpace,
    pub jobs:   JobRegistry,
}

impl SimState {
    pub fn new(space_size: Cells) -> Self {
        Self {
            space:  AddressSpace::new(space_size),
            jobs:   JobRegistry::new(),
        }
    }

    /// Freshly scanned holes of the current space.
    pub fn holes(&self) -> Holes {
        scan(&self.space)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running(Tick),
    Terminated,
}

/// Running tallies of a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    pub successful:     u64,
    pub failed:         u64,
    pub deallocated:    u64,
}

impl Stats {
    pub fn attempts(&self) -> u64 {
        self.successful + self.failed
    }

    /// Share of allocation attempts that failed, as a percentage.
    /// Undefined (`None`) if no allocation was ever attempted.
    pub fn failed_pct(&self) -> Option<f64> {
        self.pct(self.failed)
    }

    /// Share of allocation attempts that succeeded, as a percentage.
    /// Undefined (`None`) if no allocation was ever attempted.
    pub fn successful_pct(&self) -> Option<f64> {
        self.pct(self.successful)
    }

    fn pct(&self, part: u64) -> Option<f64> {
        match self.attempts() {
            0       => { None },
            total   => { Some(100.0 * part as f64 / total as f64) }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocOutcome {
    Placed(Job),
    /// No hole could accommodate a job of this size.
    Missed(Cells),
}

/// What happened during a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickRecord {
    pub tick:       Tick,
    pub job_size:   Cells,
    pub freed:      Option<Job>,
    /// `None` if no allocation was attempted.
    pub alloc:      Option<AllocOutcome>,
}

/// Drives an [`AddressSpace`] and a [`JobRegistry`] through a number of ticks,
/// placing jobs according to a [`Fit`].
pub struct Simulation<R: Rng = ChaCha8Rng> {
    config: SimConfig,
    choose: Chooser,
    state:  SimState,
    rng:    R,
    phase:  Phase,
    stats:  Stats,
}

impl Simulation<ChaCha8Rng> {
    /// A simulation whose randomness is fully determined by `seed`.
    pub fn seeded(config: SimConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::new(config, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> Simulation<R> {
    pub fn new(config: SimConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        debug!("{} over {} cells for {} ticks, jobs up to {} cells, PALLOC {}, PDEALLOC {}",
            config.fit,
            config.space_size,
            config.ticks,
            config.max_job_size,
            config.p_alloc,
            config.p_dealloc
        );

        Ok(Self {
            config,
            // Resolved once, here, instead of matching on every tick.
            choose: config.fit.chooser(),
            state:  SimState::new(config.space_size),
            rng,
            phase:  Phase::Running(0),
            stats:  Stats::default(),
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current tick; equal to the tick count once terminated.
    fn now(&self) -> Tick {
        match self.phase {
            Phase::Running(t)   => { t },
            Phase::Terminated   => { self.config.ticks }
        }
    }

    /// Runs a single tick. Returns `None`, doing nothing, if the
    /// simulation has already terminated.
    pub fn step(&mut self) -> Option<TickRecord> {
        let tick = match self.phase {
            Phase::Running(t)   => { t },
            Phase::Terminated   => { return None; }
        };
        let job_size = self.rng.gen_range(1..=self.config.max_job_size);
        // The coin is flipped even during warm-up, so that the stream of
        // random numbers doesn't depend on the tick.
        let dealloc_coin = self.rng.gen_bool(self.config.p_dealloc);
        let freed = if dealloc_coin && tick > WARMUP_TICKS {
            self.deallocate_random()
        } else { None };
        let alloc = if self.rng.gen_bool(self.config.p_alloc) {
            match self.allocate(job_size) {
                Some(j) => { Some(AllocOutcome::Placed(j)) },
                None    => { Some(AllocOutcome::Missed(job_size)) }
            }
        } else { None };
        debug_assert!(analyze::placement_is_valid(&self.state), "Inconsistent state after tick {}.", tick);
        self.phase = if tick + 1 < self.config.ticks {
            Phase::Running(tick + 1)
        } else { Phase::Terminated };

        Some(TickRecord {
            tick,
            job_size,
            freed,
            alloc,
        })
    }

    /// Evicts a uniformly picked active job. Nothing happens if there is none.
    pub fn deallocate_random(&mut self) -> Option<Job> {
        let victim = self.state.jobs.pick_random(&mut self.rng)?;

        self.release(victim.id)
    }

    /// Tries to place a job of `size` cells according to the configured
    /// [`Fit`], and tallies the outcome.
    ///
    /// Holes are scanned anew: the space may have changed since the last call.
    pub fn allocate(&mut self, size: Cells) -> Option<Job> {
        assert!(size > 0, "Zero-sized job requested.");
        let holes = scan(&self.state.space);
        trace!("{:?}", holes);
        match (self.choose)(&holes, size) {
            Some(start) => {
                let job = self.state.jobs.add(size, start);
                self.state.space.write(job.start, job.size, job.id);
                self.stats.successful += 1;
                info!("Allocated {} at time {}", job, self.now());

                Some(job)
            },
            None        => {
                self.stats.failed += 1;
                debug!("No hole fits {} cells at time {}", size, self.now());

                None
            }
        }
    }

    /// Deallocates job `id`: its whole extent is freed and it leaves the
    /// registry. Unknown or already released ids are ignored.
    pub fn release(&mut self, id: JobId) -> Option<Job> {
        let job = self.state.jobs.remove(id)?;
        let freed = self.state.space.clear(job.id);
        assert_eq!(freed, job.size, "Job {} owned {} cells instead of {}.", job.id, freed, job.size);
        self.stats.deallocated += 1;
        info!("Deallocating job {}", job.id);

        Some(job)
    }

    /// Runs all remaining ticks.
    pub fn run(mut self) -> Report {
        while self.step().is_some() {}

        self.into_report()
    }

    /// Runs all remaining ticks, handing the space and its holes to
    /// `observer` at the start of each one.
    pub fn run_observed<F>(mut self, mut observer: F) -> Report
    where F: FnMut(Tick, &AddressSpace, &[Hole]) {
        while let Phase::Running(tick) = self.phase {
            observer(tick, &self.state.space, &scan(&self.state.space));
            self.step();
        }

        self.into_report()
    }

    /// Wraps things up. May be called before termination too, in which
    /// case the report reflects the ticks run so far.
    pub fn into_report(self) -> Report {
        let frag = Fragmentation::of(&self.state.holes());
        info!("{}: {} successful, {} failed, {} deallocated; {}",
            self.config.fit,
            self.stats.successful,
            self.stats.failed,
            self.stats.deallocated,
            frag
        );

        Report {
            fit:    self.config.fit,
            stats:  self.stats,
            frag,
            space:  self.state.space,
        }
    }
}

/// The outcome of a simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub fit:    Fit,
    pub stats:  Stats,
    pub frag:   Fragmentation,
    /// Final contents of the address space.
    pub space:  AddressSpace,
}

fn fmt_pct(pct: Option<f64>) -> String {
    match pct {
        Some(p) => { format!("{:.2} percent", p) },
        None    => { String::from("undefined percent (no allocation attempted)") }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Final state:{}", self.space)?;
        writeln!(f)?;
        writeln!(f, "{} Failed allocations {}", self.stats.failed, fmt_pct(self.stats.failed_pct()))?;
        writeln!(f)?;
        writeln!(f, "{} Successful allocations {}", self.stats.successful, fmt_pct(self.stats.successful_pct()))?;
        writeln!(f)?;
        write!(f, "{}", self.frag)
    }
}
