use cvrisk_core::models::{CholesterolUnit, Predictors, RiskRegion, Sex, Smoking};
use cvrisk_score::axis::AxisId;
use cvrisk_score::report::render_summary;
use cvrisk_score::{ScoreEngine, ScoringOptions};

fn individual(age: f64) -> Predictors {
    Predictors {
        sex: Sex::Female,
        age,
        total_cholesterol: 200.0,
        hdl_cholesterol: 50.0,
        systolic_bp: 130.0,
        smoking: Smoking::NonSmoker,
    }
}

#[test]
fn summary_lists_each_axis_and_the_score() {
    let engine = ScoreEngine::bundled().unwrap();
    let options = ScoringOptions {
        region: RiskRegion::Low,
        cholesterol_unit: CholesterolUnit::MgPerDl,
    };
    let record = engine.score_record(options, &individual(72.0)).unwrap();
    let summary = render_summary(&record, options, engine.table().discretizer());

    assert!(summary.starts_with("## Cardiovascular risk (low risk region)"));
    assert!(summary.contains("- Sex: female\n"));
    assert!(summary.contains("- Smoking: non-smoker\n"));
    assert!(summary.contains("- Age (years): <75\n"));
    assert!(summary.contains("- Systolic blood pressure (mmHg): [120, 140)\n"));
    assert!(summary.contains("- Non-HDL cholesterol (mmol/L): <4\n"));
    assert!(summary.contains("Estimated 10-year risk: 10% (high)"));
    assert!(summary.contains("converted to mmol/L"));
    assert!(!summary.contains("Note:"));
}

#[test]
fn summary_includes_age_advisory() {
    let engine = ScoreEngine::bundled().unwrap();
    let options = ScoringOptions::default();
    let young = Predictors {
        total_cholesterol: 5.0,
        hdl_cholesterol: 1.3,
        ..individual(66.0)
    };
    let record = engine.score_record(options, &young).unwrap();
    let summary = render_summary(&record, options, engine.table().discretizer());

    assert!(summary.contains("> Note: record 0: age 66 is below 70"));
    assert!(!summary.contains("converted to mmol/L"));
}

#[test]
fn axes_describe_all_bins() {
    let engine = ScoreEngine::bundled().unwrap();
    let axes = engine.table().discretizer().axes();
    let ids: Vec<AxisId> = axes.iter().map(|a| a.id).collect();
    assert_eq!(
        ids,
        vec![
            AxisId::Sex,
            AxisId::Smoking,
            AxisId::Age,
            AxisId::SystolicBp,
            AxisId::NonHdlCholesterol,
        ]
    );
    assert_eq!(axes[2].bins, vec!["<75", "[75, 80)", "[80, 85)", ">=85"]);
    assert_eq!(axes[4].bins, vec!["<4", "[4, 5)", "[5, 6)", ">=6"]);
}
