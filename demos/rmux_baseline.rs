//! Run the 6-bit real multiplexer with the bandit baseline and write the
//! learning curve as JSON.
//!
//! ```text
//! RUST_LOG=info cargo run --release --example rmux_baseline [curve.json]
//! ```

use anyhow::Result;
use rmux::{BanditLearner, Experiment, ExperimentConfig, LearnerParams, ParamValue};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut params = LearnerParams::default();
    let overrides: [(&str, ParamValue); 14] = [
        ("OMP_NUM_THREADS", 8.into()),
        ("POP_SIZE", 1000.into()),
        ("PERF_TRIALS", 1000.into()),
        ("EPS_0", 0.01.into()),
        ("COND_TYPE", 1.into()),
        ("PRED_TYPE", 1.into()),
        ("ACT_TYPE", 0.into()),
        ("BETA", 0.2.into()),
        ("THETA_EA", 25.0.into()),
        ("ALPHA", 0.1.into()),
        ("NU", 5.0.into()),
        ("EA_SUBSUMPTION", true.into()),
        ("SET_SUBSUMPTION", true.into()),
        ("THETA_SUB", 100.into()),
    ];
    for (name, value) in overrides {
        params.set(name, value)?;
    }

    let config = ExperimentConfig {
        total_bits: 6,
        n_blocks: 100,
        seed: 1,
        params,
    };

    let mut experiment = Experiment::new(BanditLearner::new(2), config)?;
    let curve = experiment.run()?;

    match std::env::args().nth(1) {
        Some(path) => {
            curve.to_json_file(&path)?;
            println!("wrote {} samples to {}", curve.len(), path);
        }
        None => println!("{}", curve.to_json()?),
    }

    if let Some(performance) = curve.final_performance() {
        println!("final performance: {:.5}", performance);
    }
    Ok(())
}
