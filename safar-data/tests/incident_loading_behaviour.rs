//! Behavioural coverage for loading the incident dataset from disk.

use std::cell::RefCell;
use std::io::Write;

use camino::Utf8PathBuf;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use safar_core::IncidentStore;
use safar_data::{DataLoadError, DatasetConfig, load_incidents};
use tempfile::TempDir;

const HEADER: &str = "id,murder,rape,gangrape,robbery,theft,assault,harassment,total,area,lon,lat,ratio";
const VALID_ROW: &str = "1,1,0,0,2,5,0,1,9,x,77.2090,28.6139,0.5";

/// Temporary directory holding the dataset plus the path to load.
struct Dataset {
    _dir: TempDir,
    path: Utf8PathBuf,
}

#[fixture]
fn dataset() -> RefCell<Option<Dataset>> {
    RefCell::new(None)
}

#[fixture]
fn outcome() -> RefCell<Option<Result<IncidentStore, DataLoadError>>> {
    RefCell::new(None)
}

fn write_dataset(rows: &[String]) -> Dataset {
    let dir = TempDir::new().expect("temporary directory");
    let path = Utf8PathBuf::from_path_buf(dir.path().join("crimes.csv")).expect("UTF-8 temp path");
    let mut file = std::fs::File::create(&path).expect("create dataset");
    writeln!(file, "{HEADER}").expect("write header");
    for row in rows {
        writeln!(file, "{row}").expect("write row");
    }
    Dataset { _dir: dir, path }
}

#[given("a dataset file with 6 valid incidents")]
fn valid_dataset(dataset: &RefCell<Option<Dataset>>) {
    let rows = vec![VALID_ROW.to_owned(); 6];
    *dataset.borrow_mut() = Some(write_dataset(&rows));
}

#[given("a dataset file whose third row has latitude \"north\"")]
fn malformed_dataset(dataset: &RefCell<Option<Dataset>>) {
    let mut rows = vec![VALID_ROW.to_owned(); 6];
    if let Some(row) = rows.get_mut(2) {
        *row = row.replace("28.6139", "north");
    }
    *dataset.borrow_mut() = Some(write_dataset(&rows));
}

#[given("a dataset path that does not exist")]
fn missing_dataset(dataset: &RefCell<Option<Dataset>>) {
    let dir = TempDir::new().expect("temporary directory");
    let path = Utf8PathBuf::from_path_buf(dir.path().join("absent.csv")).expect("UTF-8 temp path");
    *dataset.borrow_mut() = Some(Dataset { _dir: dir, path });
}

#[when("I load the dataset")]
fn load(
    dataset: &RefCell<Option<Dataset>>,
    outcome: &RefCell<Option<Result<IncidentStore, DataLoadError>>>,
) {
    let binding = dataset.borrow();
    let dataset = binding.as_ref().expect("dataset must be prepared");
    *outcome.borrow_mut() = Some(load_incidents(&dataset.path, &DatasetConfig::default()));
}

#[then("6 incidents are available")]
fn six_incidents(outcome: &RefCell<Option<Result<IncidentStore, DataLoadError>>>) {
    let binding = outcome.borrow();
    let store = match binding.as_ref() {
        Some(Ok(store)) => store,
        other => panic!("expected a loaded store, got {other:?}"),
    };
    assert_eq!(store.len(), 6);
}

#[then("the first incident carries a risk weight of 25.05")]
fn first_risk(outcome: &RefCell<Option<Result<IncidentStore, DataLoadError>>>) {
    let binding = outcome.borrow();
    let Some(Ok(store)) = binding.as_ref() else {
        panic!("expected a loaded store");
    };
    let first = store.incidents().first().expect("at least one incident");
    assert!((first.risk_weight() - 25.05).abs() < 1e-9);
}

#[then("loading fails with an invalid number on row 3")]
fn invalid_number(outcome: &RefCell<Option<Result<IncidentStore, DataLoadError>>>) {
    let binding = outcome.borrow();
    assert!(
        matches!(
            binding.as_ref(),
            Some(Err(DataLoadError::InvalidNumber { row: 3, column: 11, .. }))
        ),
        "unexpected outcome {binding:?}"
    );
}

#[then("loading fails because the file cannot be opened")]
fn open_failure(outcome: &RefCell<Option<Result<IncidentStore, DataLoadError>>>) {
    let binding = outcome.borrow();
    assert!(matches!(binding.as_ref(), Some(Err(DataLoadError::Open { .. }))));
}

#[scenario(path = "tests/features/incident_loading.feature", index = 0)]
fn loads_valid_dataset(
    dataset: RefCell<Option<Dataset>>,
    outcome: RefCell<Option<Result<IncidentStore, DataLoadError>>>,
) {
    let _ = (dataset, outcome);
}

#[scenario(path = "tests/features/incident_loading.feature", index = 1)]
fn reports_malformed_coordinate(
    dataset: RefCell<Option<Dataset>>,
    outcome: RefCell<Option<Result<IncidentStore, DataLoadError>>>,
) {
    let _ = (dataset, outcome);
}

#[scenario(path = "tests/features/incident_loading.feature", index = 2)]
fn reports_missing_file(
    dataset: RefCell<Option<Dataset>>,
    outcome: RefCell<Option<Result<IncidentStore, DataLoadError>>>,
) {
    let _ = (dataset, outcome);
}
