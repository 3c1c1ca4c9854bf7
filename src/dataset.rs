//! City dataset store
//!
//! The dataset is loaded once at startup and never mutated afterwards. Rows are
//! kept sorted by population, largest first, so every rank-based view is a
//! plain slice.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use csv::{ReaderBuilder, StringRecord};
use error_stack::Report;
use tracing::{debug, info};

use crate::core::CityRecord;
use crate::{DataUnavailable, Result};

/// Location of the published 2014 US cities table.
pub const DEFAULT_DATASET_URL: &str =
    "https://raw.githubusercontent.com/plotly/datasets/refs/heads/master/2014_us_cities.csv";

const NAME_COLUMN: &str = "name";
const POPULATION_COLUMN: &str = "pop";
const LATITUDE_COLUMN: &str = "lat";
const LONGITUDE_COLUMN: &str = "lon";

/// Where the CSV comes from
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataSource {
    Url(String),
    File(PathBuf),
}

impl Default for DataSource {
    fn default() -> Self {
        DataSource::Url(DEFAULT_DATASET_URL.to_string())
    }
}

/// Read-only, population-sorted city table shared by every request.
#[derive(Clone, Debug)]
pub struct Dataset {
    records: Arc<[CityRecord]>,
}

impl Dataset {
    /// Fetch and parse the dataset. Blocks on network or disk I/O.
    pub fn load(source: &DataSource) -> Result<Self> {
        match source {
            DataSource::Url(url) => {
                info!("Fetching city dataset from {}", url);
                let agent = ureq::Agent::new_with_defaults();
                let response = agent
                    .get(url)
                    .call()
                    .map_err(|e| unavailable(e, format!("failed to fetch {url}")))?;
                let body = response
                    .into_body()
                    .read_to_string()
                    .map_err(|e| unavailable(e, format!("failed to read body of {url}")))?;
                Self::from_reader(body.as_bytes())
            }
            DataSource::File(path) => {
                info!("Reading city dataset from {:?}", path);
                let file = File::open(path)
                    .map_err(|e| unavailable(e, format!("failed to open {}", path.display())))?;
                Self::from_reader(file)
            }
        }
    }

    /// Parse CSV with at least the `name`, `pop`, `lat` and `lon` columns.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let headers = rdr
            .headers()
            .map_err(|e| unavailable(e, "failed to read CSV header".to_string()))?
            .clone();

        let name_idx = column(&headers, NAME_COLUMN)?;
        let pop_idx = column(&headers, POPULATION_COLUMN)?;
        let lat_idx = column(&headers, LATITUDE_COLUMN)?;
        let lon_idx = column(&headers, LONGITUDE_COLUMN)?;

        let mut records = Vec::new();
        for result in rdr.records() {
            let row = result.map_err(|e| unavailable(e, "malformed CSV row".to_string()))?;
            let line = row.position().map(|p| p.line()).unwrap_or_default();

            let name = row.get(name_idx).unwrap_or("");
            if name.is_empty() {
                debug!("Skipping unnamed row on line {}", line);
                continue;
            }

            let population = field(&row, pop_idx)
                .parse::<u64>()
                .map_err(|e| unavailable(e, format!("invalid population on line {line}")))?;
            let latitude = field(&row, lat_idx)
                .parse::<f64>()
                .map_err(|e| unavailable(e, format!("invalid latitude on line {line}")))?;
            let longitude = field(&row, lon_idx)
                .parse::<f64>()
                .map_err(|e| unavailable(e, format!("invalid longitude on line {line}")))?;

            records.push(CityRecord::new(name, population, latitude, longitude));
        }

        info!("Loaded {} cities", records.len());
        Ok(Self::from_records(records))
    }

    /// Build from in-memory rows. Sorts by population, largest first; ties keep
    /// their input order.
    pub fn from_records(mut records: Vec<CityRecord>) -> Self {
        records.sort_by(|a, b| b.population.cmp(&a.population));
        Self {
            records: records.into(),
        }
    }

    pub fn records(&self) -> &[CityRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The `n` most populous cities (all of them if fewer than `n`).
    pub fn head(&self, n: usize) -> &[CityRecord] {
        &self.records[..n.min(self.len())]
    }

    /// The `n` least populous cities, still in descending order.
    pub fn tail(&self, n: usize) -> &[CityRecord] {
        &self.records[self.len().saturating_sub(n)..]
    }

    /// Cities whose name is in `names`, in dataset order.
    pub fn named(&self, names: &BTreeSet<String>) -> Vec<CityRecord> {
        self.records
            .iter()
            .filter(|r| names.contains(&r.name))
            .cloned()
            .collect()
    }

    pub fn names(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.name.as_str()).collect()
    }
}

fn column(headers: &StringRecord, name: &str) -> Result<usize> {
    headers.iter().position(|h| h == name).ok_or_else(|| {
        Report::new(DataUnavailable).attach(format!("required column `{name}` not found in CSV"))
    })
}

fn field(row: &StringRecord, idx: usize) -> &str {
    row.get(idx).unwrap_or("")
}

fn unavailable<E>(err: E, reason: String) -> Report<DataUnavailable>
where
    E: std::error::Error + Send + Sync + 'static,
{
    Report::new(err).change_context(DataUnavailable).attach(reason)
}
