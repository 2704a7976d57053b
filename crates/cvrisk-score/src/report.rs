//! Plain-text summaries of scored records, for inclusion in clinical notes.

use cvrisk_core::models::CholesterolUnit;

use crate::axis::{AxisId, Discretizer};
use crate::engine::{ScoredRecord, ScoringOptions};

/// Markdown summary of one scored record: the bin selected on each axis,
/// the score and its category, and any advisory.
pub fn render_summary(
    record: &ScoredRecord,
    options: ScoringOptions,
    discretizer: &Discretizer,
) -> String {
    let mut output = format!(
        "## Cardiovascular risk ({} risk region)\n\n",
        options.region
    );

    for axis in discretizer.axes() {
        let bin = match axis.id {
            AxisId::Sex => record.cell.sex as usize,
            AxisId::Smoking => record.cell.smoking as usize,
            AxisId::Age => record.cell.age.index(),
            AxisId::SystolicBp => record.cell.systolic_bp.index(),
            AxisId::NonHdlCholesterol => record.cell.non_hdl_cholesterol.index(),
        };
        let label = axis.bins.get(bin).map(String::as_str).unwrap_or("?");
        match &axis.unit {
            Some(unit) => output.push_str(&format!("- {} ({}): {}\n", axis.name, unit, label)),
            None => output.push_str(&format!("- {}: {}\n", axis.name, label)),
        }
    }

    output.push_str(&format!(
        "\nEstimated 10-year risk: {}% ({})\n",
        record.score, record.category
    ));
    if options.cholesterol_unit != CholesterolUnit::MmolPerL {
        output.push_str(&format!(
            "Cholesterol entered in {} and converted to mmol/L.\n",
            options.cholesterol_unit
        ));
    }
    if let Some(advisory) = &record.advisory {
        output.push_str(&format!("\n> Note: {advisory}\n"));
    }
    output
}
