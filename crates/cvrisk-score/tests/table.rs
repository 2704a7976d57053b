//! Load-time checks on the coefficient dataset, and properties of the
//! bundled table.

use cvrisk_core::models::{RiskRegion, Sex, Smoking};
use cvrisk_score::axis::{Bin, Cutpoints};
use cvrisk_score::cell::{CELL_COUNT, Cell};
use cvrisk_score::error::TableError;
use cvrisk_score::table::{CoefficientTable, ENTRY_COUNT, Provenance};
use serde_json::{Value, json};

const BUNDLED: &str = include_str!("../data/coefficients.json");

fn dataset() -> Value {
    serde_json::from_str(BUNDLED).unwrap()
}

fn rows(dataset: &mut Value) -> &mut Vec<Value> {
    dataset["rows"].as_array_mut().unwrap()
}

fn load(dataset: &Value) -> Result<CoefficientTable, TableError> {
    CoefficientTable::from_json(&dataset.to_string())
}

fn cell(sex: Sex, smoking: Smoking, age: u8, sbp: u8, chol: u8) -> Cell {
    Cell {
        sex,
        smoking,
        age: Bin::from_number(age).unwrap(),
        systolic_bp: Bin::from_number(sbp).unwrap(),
        non_hdl_cholesterol: Bin::from_number(chol).unwrap(),
    }
}

#[test]
fn bundled_table_is_complete() {
    let table = CoefficientTable::bundled().unwrap();
    assert_eq!(table.iter().count(), ENTRY_COUNT);
    assert_eq!(ENTRY_COUNT, 1024);
    assert_eq!(CELL_COUNT, 256);
    assert!(table.iter().all(|(_, _, value)| value <= 100));
}

#[test]
fn bundled_table_is_shared() {
    let a = CoefficientTable::bundled().unwrap();
    let b = CoefficientTable::bundled().unwrap();
    assert!(std::sync::Arc::ptr_eq(&a, &b));
}

#[test]
fn documented_reference_cells() {
    let table = CoefficientTable::bundled().unwrap();
    let reference = cell(Sex::Female, Smoking::NonSmoker, 1, 2, 1);
    assert_eq!(table.get(RiskRegion::Low, reference), 10);

    let smoker = cell(Sex::Female, Smoking::Smoker, 1, 2, 1);
    assert_eq!(table.get(RiskRegion::Low, smoker), 14);
    assert_eq!(table.get(RiskRegion::VeryHigh, smoker), 33);
}

#[test]
fn every_region_sub_table_is_reachable_and_distinct() {
    let table = CoefficientTable::bundled().unwrap();
    for (i, a) in RiskRegion::ALL.iter().enumerate() {
        for b in &RiskRegion::ALL[i + 1..] {
            assert_ne!(table.region(*a), table.region(*b), "{a} and {b} share coefficients");
        }
    }
}

#[test]
fn cell_index_is_a_bijection() {
    let indices: Vec<usize> = Cell::all().map(|c| c.index()).collect();
    assert_eq!(indices, (0..CELL_COUNT).collect::<Vec<_>>());
    assert_eq!(Cell::from_index(CELL_COUNT), None);
    for c in Cell::all() {
        assert_eq!(Cell::from_index(c.index()), Some(c));
    }
}

/// Coefficients never decrease when age, blood pressure or cholesterol move
/// up one bin with everything else held fixed.
#[test]
fn coefficients_are_monotone_in_ordered_axes() {
    let table = CoefficientTable::bundled().unwrap();
    for region in RiskRegion::ALL {
        for c in Cell::all() {
            let here = table.get(region, c);
            let next = |bin: Bin| Bin::from_number(bin.number() + 1);

            if let Some(age) = next(c.age) {
                let up = Cell { age, ..c };
                assert!(table.get(region, up) >= here, "{region} {c} -> {up}");
            }
            if let Some(systolic_bp) = next(c.systolic_bp) {
                let up = Cell { systolic_bp, ..c };
                assert!(table.get(region, up) >= here, "{region} {c} -> {up}");
            }
            if let Some(non_hdl_cholesterol) = next(c.non_hdl_cholesterol) {
                let up = Cell {
                    non_hdl_cholesterol,
                    ..c
                };
                assert!(table.get(region, up) >= here, "{region} {c} -> {up}");
            }
        }
    }
}

#[test]
fn bundled_cutpoints() {
    let table = CoefficientTable::bundled().unwrap();
    let d = table.discretizer();
    assert_eq!(d.age().bounds(), [75.0, 80.0, 85.0]);
    assert_eq!(d.systolic_bp().bounds(), [120.0, 140.0, 160.0]);
    assert_eq!(d.non_hdl_cholesterol().bounds(), [4.0, 5.0, 6.0]);
}

#[test]
fn missing_cell_is_fatal() {
    let mut data = dataset();
    rows(&mut data).pop();
    assert_eq!(
        load(&data).unwrap_err(),
        TableError::MissingCell {
            region: RiskRegion::VeryHigh,
            cell: cell(Sex::Male, Smoking::Smoker, 4, 4, 4),
        }
    );
}

#[test]
fn duplicate_cell_is_fatal() {
    let mut data = dataset();
    let first = rows(&mut data)[0].clone();
    rows(&mut data).push(first);
    assert_eq!(
        load(&data).unwrap_err(),
        TableError::DuplicateCell {
            row: 1024,
            region: RiskRegion::Low,
            cell: cell(Sex::Female, Smoking::NonSmoker, 1, 1, 1),
        }
    );
}

#[test]
fn bin_numbers_outside_one_to_four_are_fatal() {
    let mut data = dataset();
    rows(&mut data)[3][3] = json!(5);
    assert_eq!(
        load(&data).unwrap_err(),
        TableError::BinOutOfRange {
            row: 3,
            axis: "age",
            value: 5,
        }
    );

    let mut data = dataset();
    rows(&mut data)[7][5] = json!(0);
    assert_eq!(
        load(&data).unwrap_err(),
        TableError::BinOutOfRange {
            row: 7,
            axis: "non_hdl_cholesterol",
            value: 0,
        }
    );
}

#[test]
fn coefficient_above_one_hundred_is_fatal() {
    let mut data = dataset();
    rows(&mut data)[0][6] = json!(101);
    assert_eq!(
        load(&data).unwrap_err(),
        TableError::CoefficientOutOfRange { row: 0, value: 101 }
    );
}

#[test]
fn unsorted_cutpoints_are_fatal() {
    let mut data = dataset();
    data["cutpoints"]["systolic_bp"] = json!([120.0, 160.0, 140.0]);
    assert!(matches!(
        load(&data).unwrap_err(),
        TableError::InvalidCutpoints {
            axis: "systolic_bp",
            ..
        }
    ));

    let mut data = dataset();
    data["cutpoints"]["age"] = json!([75.0, 80.0]);
    assert!(matches!(
        load(&data).unwrap_err(),
        TableError::InvalidCutpoints { axis: "age", .. }
    ));
}

#[test]
fn unknown_format_version_is_fatal() {
    let mut data = dataset();
    data["format_version"] = json!(2);
    assert_eq!(
        load(&data).unwrap_err(),
        TableError::UnsupportedFormat {
            found: 2,
            supported: 1,
        }
    );
}

#[test]
fn bundled_table_is_marked_placeholder() {
    let table = CoefficientTable::bundled().unwrap();
    assert_eq!(table.provenance(), Provenance::Placeholder);
    assert!(table.description().contains("Placeholder"));
}

#[test]
fn published_provenance_is_carried_through() {
    let mut data = dataset();
    data["provenance"] = json!("published");
    assert_eq!(load(&data).unwrap().provenance(), Provenance::Published);
}

#[test]
fn dataset_without_provenance_is_rejected() {
    let mut data = dataset();
    data.as_object_mut().unwrap().remove("provenance");
    match load(&data).unwrap_err() {
        TableError::Parse(message) => assert!(message.contains("provenance"), "{message}"),
        other => panic!("expected parse error, got {other:?}"),
    }

    data["provenance"] = json!("estimated");
    assert!(matches!(load(&data), Err(TableError::Parse(_))));
}

#[test]
fn cutpoints_deserialize_through_validation() {
    let parsed: Cutpoints = serde_json::from_str("[120.0, 140.0, 160.0]").unwrap();
    assert_eq!(parsed.bounds(), [120.0, 140.0, 160.0]);

    let err = serde_json::from_str::<Cutpoints>("[160.0, 140.0, 120.0]").unwrap_err();
    assert!(err.to_string().contains("strictly increasing"), "{err}");
    let err = serde_json::from_str::<Cutpoints>("[120.0, 140.0]").unwrap_err();
    assert!(err.to_string().contains("exactly three"), "{err}");
    assert!(serde_json::from_str::<Cutpoints>("[120.0, 120.0, 160.0]").is_err());
}

#[test]
fn bins_serialize_as_one_based_numbers() {
    let bin = Bin::from_number(3).unwrap();
    assert_eq!(serde_json::to_string(&bin).unwrap(), "3");
    assert_eq!(serde_json::from_str::<Bin>("3").unwrap(), bin);
    assert!(serde_json::from_str::<Bin>("0").is_err());
    assert!(serde_json::from_str::<Bin>("5").is_err());
}

#[test]
fn underscore_region_label_in_dataset_is_rejected() {
    let data = BUNDLED.replace("\"very high\"", "\"very_high\"");
    match CoefficientTable::from_json(&data).unwrap_err() {
        TableError::Parse(message) => assert!(message.contains("very high"), "{message}"),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn load_reads_dataset_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("coefficients.json");
    let mut data = dataset();
    data["version"] = json!(2);
    std::fs::write(&path, data.to_string()).unwrap();

    let table = CoefficientTable::load(&path).unwrap();
    assert_eq!(table.version(), 2);

    let missing = dir.path().join("absent.json");
    assert!(matches!(
        CoefficientTable::load(&missing),
        Err(TableError::Read { .. })
    ));
}
