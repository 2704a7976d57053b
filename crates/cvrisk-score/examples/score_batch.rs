//! Score a batch of individuals from a JSON file of predictor columns.
//!
//! The input has the shape of `PredictorColumns`:
//!
//! ```json
//! { "sex": ["female", "male"], "age": [72, 81],
//!   "total_cholesterol": [200, 240], "hdl_cholesterol": [50, 45],
//!   "systolic_bp": [130, 165], "smoker": [0, 1] }
//! ```
//!
//! Region, unit and dataset come from the environment.
//!
//! Usage:
//!   CVRISK_REGION="very high" \
//!   CVRISK_CHOLESTEROL_UNIT=mg/dL \
//!   cargo run -p cvrisk-score --example score_batch -- batch.json

use cvrisk_core::models::PredictorColumns;
use cvrisk_score::config::ScoringConfig;
use cvrisk_score::Provenance;
use cvrisk_score::report::render_summary;

fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let path = std::env::args()
        .nth(1)
        .ok_or_else(|| eyre::eyre!("usage: score_batch <columns.json>"))?;
    let contents = std::fs::read_to_string(&path)
        .map_err(|e| eyre::eyre!("failed to read {path}: {e}"))?;
    let columns: PredictorColumns = serde_json::from_str(&contents)?;

    let config = ScoringConfig::from_env()?;
    let engine = config.engine()?;
    let options = config.options();
    let batch = engine.score(options, &columns)?;
    if batch.table_provenance == Provenance::Placeholder {
        eprintln!("note: coefficients are placeholders, not the published chart");
    }

    for record in &batch.records {
        println!(
            "{}",
            render_summary(record, options, engine.table().discretizer())
        );
    }
    println!("{}", serde_json::to_string_pretty(&batch.scores())?);
    Ok(())
}
