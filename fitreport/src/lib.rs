//! Runs every fit strategy against the same seeded workloads and
//! condenses the outcomes, so that strategies can be compared on
//! equal footing.
pub use fitsim::*;
pub use serde::Serialize;
pub use rayon::prelude::*;
pub use std::ops::Range;

/// The outcome of one strategy against one seed.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Trial {
    pub fit:            &'static str,
    pub seed:           u64,
    pub successful:     u64,
    pub failed:         u64,
    pub deallocated:    u64,
    /// `None` if no allocation was attempted.
    pub success_pct:    Option<f64>,
    pub holes:          usize,
    pub external_frag:  f64,
}

impl Trial {
    pub fn from_report(report: &Report, seed: u64) -> Self {
        Self {
            fit:            report.fit.code(),
            seed,
            successful:     report.stats.successful,
            failed:         report.stats.failed,
            deallocated:    report.stats.deallocated,
            success_pct:    report.stats.successful_pct(),
            holes:          report.frag.holes,
            external_frag:  report.frag.external(),
        }
    }
}

/// Per-strategy averages over all trials.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Summary {
    pub fit:                &'static str,
    pub trials:             usize,
    /// Trials in which no allocation was attempted at all. They are left
    /// out of [`mean_success_pct`](Summary::mean_success_pct).
    pub idle_trials:        usize,
    pub mean_success_pct:   Option<f64>,
    pub mean_failed:        f64,
    pub mean_external_frag: f64,
}

/// Simulates each of [`Fit::ALL`] once per seed in `seeds`, in parallel.
///
/// `base.fit` is ignored. Simulations share nothing but their parameters,
/// and every one of them owns its generator, so the result is the same
/// regardless of scheduling. Trials come out ordered by seed, then by
/// strategy.
pub fn run_trials(base: SimConfig, seeds: Range<u64>) -> Result<Vec<Trial>, ConfigError> {
    base.validate()?;
    let todo: Vec<(u64, Fit)> = seeds
        .flat_map(|s| Fit::ALL.map(|f| (s, f)))
        .collect();
    info!("Running {} trials", todo.len());

    todo.into_par_iter()
        .map(|(seed, fit)| -> Result<Trial, ConfigError> {
            let report = Simulation::seeded(SimConfig { fit, ..base }, seed)?.run();
            Ok(Trial::from_report(&report, seed))
        })
        .collect()
}

fn mean(vals: &[f64]) -> Option<f64> {
    if vals.is_empty() {
        None
    } else {
        Some(vals.iter().sum::<f64>() / vals.len() as f64)
    }
}

/// One [`Summary`] per strategy, in [`Fit::ALL`] order. Strategies with
/// no trials are skipped.
pub fn summarize(trials: &[Trial]) -> Vec<Summary> {
    let mut res = vec![];
    for fit in Fit::ALL {
        let mine: Vec<&Trial> = trials.iter()
            .filter(|t| t.fit == fit.code())
            .collect();
        if mine.is_empty() {
            continue;
        }
        let pcts: Vec<f64> = mine.iter()
            .filter_map(|t| t.success_pct)
            .collect();
        let failed: Vec<f64> = mine.iter()
            .map(|t| t.failed as f64)
            .collect();
        let frags: Vec<f64> = mine.iter()
            .map(|t| t.external_frag)
            .collect();
        res.push(Summary {
            fit:                fit.code(),
            trials:             mine.len(),
            idle_trials:        mine.len() - pcts.len(),
            mean_success_pct:   mean(&pcts),
            mean_failed:        mean(&failed).unwrap_or(0.0),
            mean_external_frag: mean(&frags).unwrap_or(0.0),
        });
    }

    res
}

/// Plain-text table of `summaries`, one line per strategy.
pub fn render_table(summaries: &[Summary]) -> String {
    let header = format!("{:<4}{:>8}{:>8}{:>12}{:>12}{:>12}",
        "fit", "trials", "idle", "success %", "failed", "ext. frag %");
    let rows = summaries.iter()
        .map(|s| {
            let success = match s.mean_success_pct {
                Some(p) => { format!("{:.2}", p) },
                None    => { String::from("undefined") }
            };
            format!("{:<4}{:>8}{:>8}{:>12}{:>12.2}{:>12.2}",
                s.fit,
                s.trials,
                s.idle_trials,
                success,
                s.mean_failed,
                s.mean_external_frag * 100.0
            )
        })
        .join("\n");

    format!("{}\n{}", header, rows)
}
