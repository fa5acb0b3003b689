use fitreport::*;

fn base() -> SimConfig {
    SimConfig {
        fit:            Fit::Best,
        space_size:     40,
        ticks:          400,
        max_job_size:   6,
        p_alloc:        0.8,
        p_dealloc:      0.5,
    }
}

#[test]
fn every_strategy_meets_every_seed() {
    let trials = run_trials(base(), 10..14).unwrap();
    assert_eq!(trials.len(), 12);
    let order: Vec<(u64, &str)> = trials.iter()
        .map(|t| (t.seed, t.fit))
        .collect();
    assert_eq!(order[..3].to_vec(), vec![(10u64, "FF"), (10, "WF"), (10, "BF")]);
    assert_eq!(order[11], (13, "BF"));
}

#[test]
fn trials_match_standalone_runs() {
    let trials = run_trials(base(), 5..7).unwrap();
    for t in &trials {
        let fit = Fit::ALL.into_iter()
            .find(|f| f.code() == t.fit)
            .unwrap();
        let report = Simulation::seeded(SimConfig { fit, ..base() }, t.seed).unwrap().run();
        assert_eq!(*t, Trial::from_report(&report, t.seed));
    }
}

#[test]
fn summaries_count_idle_trials() {
    let idle = SimConfig { p_alloc: 0.0, ..base() };
    let trials = run_trials(idle, 0..3).unwrap();
    let summaries = summarize(&trials);
    assert_eq!(summaries.len(), 3);
    for s in &summaries {
        assert_eq!(s.trials, 3);
        assert_eq!(s.idle_trials, 3);
        assert_eq!(s.mean_success_pct, None);
        assert_eq!(s.mean_failed, 0.0);
    }
    assert!(render_table(&summaries).contains("undefined"));
}

#[test]
fn summaries_average_trials() {
    let trials = run_trials(base(), 0..8).unwrap();
    let summaries = summarize(&trials);
    let ff = &summaries[0];
    assert_eq!(ff.fit, "FF");
    let expected = trials.iter()
        .filter(|t| t.fit == "FF")
        .map(|t| t.failed as f64)
        .sum::<f64>() / 8.0;
    assert!((ff.mean_failed - expected).abs() < 1e-9);
    if let Some(p) = ff.mean_success_pct {
        assert!((0.0..=100.0).contains(&p));
    }
}

#[test]
fn bad_parameters_are_refused() {
    let bad = SimConfig { p_dealloc: 2.0, ..base() };
    assert!(run_trials(bad, 0..2).is_err());
}

#[test]
fn summaries_serialize() {
    let summaries = summarize(&run_trials(base(), 0..2).unwrap());
    let json = serde_json::to_value(&summaries).unwrap();
    assert_eq!(json[1]["fit"], "WF");
    assert_eq!(json[1]["trials"], 2);
}
