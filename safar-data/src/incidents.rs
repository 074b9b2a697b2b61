//! Load the crime dataset from CSV into an [`IncidentStore`].
//!
//! The dataset has a fixed schema read by column position rather than by
//! header name: seven raw crime counts, a longitude, a latitude, and a
//! normalised crime-to-area ratio. [`CsvLayout`] records where each lives.
//! Every row must parse; a single malformed row fails the whole load so the
//! engine never starts on a partial dataset.

use std::io::Read;

use camino::{Utf8Path, Utf8PathBuf};
use geo::Coord;
use safar_core::{
    CrimeIncident, FEATURE_COUNT, FeatureVector, IncidentError, IncidentStore, RiskWeights,
};
use thiserror::Error;

use crate::fs::open_utf8_file;

/// Column positions of the fields the loader reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvLayout {
    /// Column of each feature, in [`safar_core::Feature`] order.
    pub features: [usize; FEATURE_COUNT],
    /// Column holding longitude in degrees.
    pub longitude: usize,
    /// Column holding latitude in degrees.
    pub latitude: usize,
    /// Whether the first record is a header row to skip.
    pub has_headers: bool,
}

impl Default for CsvLayout {
    fn default() -> Self {
        Self {
            features: [1, 2, 3, 4, 5, 6, 7, 12],
            longitude: 10,
            latitude: 11,
            has_headers: true,
        }
    }
}

/// Options for [`load_incidents`] and [`read_incidents`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DatasetConfig {
    /// Where each field lives in a record.
    pub layout: CsvLayout,
    /// Severity weights applied to every row.
    pub weights: RiskWeights,
    /// Fewest rows accepted; normally the zone count.
    pub min_rows: usize,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            layout: CsvLayout::default(),
            weights: RiskWeights::default(),
            min_rows: 6,
        }
    }
}

impl DatasetConfig {
    /// Override the minimum row count.
    #[must_use]
    pub const fn with_min_rows(mut self, min_rows: usize) -> Self {
        self.min_rows = min_rows;
        self
    }

    /// Override the column layout.
    #[must_use]
    pub const fn with_layout(mut self, layout: CsvLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Override the severity weights.
    #[must_use]
    pub const fn with_weights(mut self, weights: RiskWeights) -> Self {
        self.weights = weights;
        self
    }
}

/// Errors raised while loading the dataset. All are fatal at startup.
///
/// Row numbers count data records from 1, excluding any header.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// The dataset file could not be opened.
    #[error("failed to open dataset at {path}: {source}")]
    Open {
        /// Location of the dataset.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The CSV reader rejected a record.
    #[error("failed to read CSV record {row}: {source}")]
    Csv {
        /// Record being read.
        row: usize,
        /// Error reported by the reader.
        #[source]
        source: csv::Error,
    },
    /// A record was shorter than the layout requires.
    #[error("row {row} has no column {column}")]
    MissingColumn {
        /// Offending record.
        row: usize,
        /// Zero-based column index.
        column: usize,
    },
    /// A cell did not hold a number.
    #[error("row {row} column {column} is not a number: {value:?}")]
    InvalidNumber {
        /// Offending record.
        row: usize,
        /// Zero-based column index.
        column: usize,
        /// Raw cell contents.
        value: String,
    },
    /// Parsed values did not form a valid incident.
    #[error("row {row} is not a valid incident: {source}")]
    InvalidIncident {
        /// Offending record.
        row: usize,
        /// Validation failure.
        #[source]
        source: IncidentError,
    },
    /// The dataset had fewer rows than the zone model needs.
    #[error("dataset has {rows} rows but at least {required} are needed")]
    TooFewRows {
        /// Rows loaded.
        rows: usize,
        /// Rows required.
        required: usize,
    },
}

/// Load the dataset at `path`.
///
/// # Errors
/// Returns [`DataLoadError::Open`] when the file cannot be opened and any
/// other [`DataLoadError`] raised by [`read_incidents`].
pub fn load_incidents(path: &Utf8Path, config: &DatasetConfig) -> Result<IncidentStore, DataLoadError> {
    let file = open_utf8_file(path).map_err(|source| DataLoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let store = read_incidents(file.into_std(), config)?;
    log::info!("loaded {} crime incidents from {path}", store.len());
    Ok(store)
}

/// Parse incidents from any CSV source.
///
/// # Errors
/// Returns [`DataLoadError`] when a record cannot be read, a required column
/// is missing or non-numeric, a row fails validation, or fewer than
/// `config.min_rows` rows were read.
///
/// # Examples
/// ```
/// use safar_data::{DatasetConfig, read_incidents};
///
/// let csv = "\
/// id,murder,rape,gangrape,robbery,theft,assault,harassment,a,b,lon,lat,ratio
/// 1,1,0,0,2,5,0,1,x,y,77.2090,28.6139,0.5
/// ";
/// let store = read_incidents(csv.as_bytes(), &DatasetConfig::default().with_min_rows(1))
///     .expect("valid dataset");
/// assert_eq!(store.len(), 1);
/// assert_eq!(store.incidents()[0].risk_weight(), 25.05);
/// ```
pub fn read_incidents<R: Read>(reader: R, config: &DatasetConfig) -> Result<IncidentStore, DataLoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(config.layout.has_headers)
        .flexible(true)
        .from_reader(reader);

    let mut incidents = Vec::new();
    for (index, record) in csv_reader.records().enumerate() {
        let row = index + 1;
        let record = record.map_err(|source| DataLoadError::Csv { row, source })?;
        incidents.push(parse_record(&record, row, config)?);
    }

    if incidents.len() < config.min_rows {
        return Err(DataLoadError::TooFewRows {
            rows: incidents.len(),
            required: config.min_rows,
        });
    }
    Ok(IncidentStore::new(incidents))
}

fn parse_record(
    record: &csv::StringRecord,
    row: usize,
    config: &DatasetConfig,
) -> Result<CrimeIncident, DataLoadError> {
    let layout = &config.layout;
    let mut values = [0.0; FEATURE_COUNT];
    for (value, &column) in values.iter_mut().zip(&layout.features) {
        *value = number_at(record, row, column)?;
    }
    let location = Coord {
        x: number_at(record, row, layout.longitude)?,
        y: number_at(record, row, layout.latitude)?,
    };
    CrimeIncident::new(location, FeatureVector::new(values), &config.weights)
        .map_err(|source| DataLoadError::InvalidIncident { row, source })
}

fn number_at(record: &csv::StringRecord, row: usize, column: usize) -> Result<f64, DataLoadError> {
    let raw = record
        .get(column)
        .ok_or(DataLoadError::MissingColumn { row, column })?;
    raw.trim()
        .parse::<f64>()
        .map_err(|_| DataLoadError::InvalidNumber {
            row,
            column,
            value: raw.to_owned(),
        })
}
