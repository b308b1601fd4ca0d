//! Cheapest-price-per-region table.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info, warn};

use super::error::PriceError;

const STATE_COLUMN: &str = "State";
const PRICE_COLUMN: &str = "Retail Price";
const NAME_COLUMN: &str = "Truckstop Name";
const CITY_COLUMN: &str = "City";
const ADDRESS_COLUMN: &str = "Address";

/// The cheapest station seen for one region.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionPriceEntry {
    /// Region code as written in the dataset (e.g. `TX`)
    pub region_key: String,
    /// Retail price per gallon
    pub price: f64,
    pub station_name: String,
    pub city: String,
    pub address: String,
}

/// How a reverse-geocoded region name was matched to a table key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionMatch {
    /// The region name is itself a key
    Exact,
    /// Case-insensitive equality, or the region name starts with a key
    Loose,
}

/// Minimum price per region.
///
/// Entries keep the order in which their region first appeared in the
/// dataset. That order decides which key wins a loose match and which
/// entry wins a price tie in [`PriceTable::cheapest_overall`].
#[derive(Debug, Clone, Default)]
pub struct PriceTable {
    entries: Vec<RegionPriceEntry>,
    index: HashMap<String, usize>,
}

impl PriceTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from entries, keeping the cheapest per region.
    ///
    /// On a price tie the entry seen first is kept.
    pub fn from_entries(entries: impl IntoIterator<Item = RegionPriceEntry>) -> Self {
        let mut table = Self::new();
        for entry in entries {
            table.offer(entry);
        }
        table
    }

    /// Load the dataset from a CSV file.
    pub fn from_path(path: &Path) -> Result<Self, PriceError> {
        let file = std::fs::File::open(path).map_err(|source| PriceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_reader(file)?;
        info!(
            path = %path.display(),
            regions = table.len(),
            "loaded fuel price table"
        );
        Ok(table)
    }

    /// Load the dataset from CSV with a header row.
    ///
    /// Rows with a blank region, a price that is not a finite non-negative
    /// number, or a structural CSV error are skipped.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, PriceError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_owned())
            .collect();
        let column = |name: &str| headers.iter().position(|h| h == name);

        let state_idx = column(STATE_COLUMN).ok_or(PriceError::MissingColumn(STATE_COLUMN))?;
        let price_idx = column(PRICE_COLUMN).ok_or(PriceError::MissingColumn(PRICE_COLUMN))?;
        let name_idx = column(NAME_COLUMN);
        let city_idx = column(CITY_COLUMN);
        let address_idx = column(ADDRESS_COLUMN);

        let mut table = Self::new();
        let mut skipped = 0usize;

        for (row, result) in reader.records().enumerate() {
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    warn!(row, error = %e, "skipping unreadable price row");
                    skipped += 1;
                    continue;
                }
            };

            let field = |idx: Option<usize>| {
                idx.and_then(|i| record.get(i))
                    .unwrap_or("")
                    .to_string()
            };

            let Some(price) = record.get(price_idx).and_then(parse_price) else {
                skipped += 1;
                continue;
            };

            let region_key = record.get(state_idx).unwrap_or("").trim();
            if region_key.is_empty() {
                skipped += 1;
                continue;
            }

            table.offer(RegionPriceEntry {
                region_key: region_key.to_string(),
                price,
                station_name: field(name_idx),
                city: field(city_idx),
                address: field(address_idx),
            });
        }

        if skipped > 0 {
            debug!(skipped, "skipped malformed price rows");
        }

        Ok(table)
    }

    /// Insert `entry` unless its region already has a cheaper or equal price.
    fn offer(&mut self, entry: RegionPriceEntry) {
        match self.index.get(&entry.region_key) {
            Some(&i) => {
                if entry.price < self.entries[i].price {
                    self.entries[i] = entry;
                }
            }
            None => {
                self.index
                    .insert(entry.region_key.clone(), self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    /// Exact lookup by region key.
    pub fn lookup(&self, region_key: &str) -> Option<&RegionPriceEntry> {
        self.index.get(region_key).map(|&i| &self.entries[i])
    }

    /// The globally cheapest entry, or `None` if the table is empty.
    pub fn cheapest_overall(&self) -> Option<&RegionPriceEntry> {
        self.entries
            .iter()
            .min_by(|a, b| a.price.total_cmp(&b.price))
    }

    /// Match a region display name (e.g. "Texas" or "TX") to an entry.
    ///
    /// An exact key match wins. Otherwise the first key (in dataset order)
    /// that equals the name ignoring case, or that the lowercased name
    /// starts with, is returned. "Colorado" therefore matches `CO`, and so
    /// does "Connecticut" if no `CT` key precedes it.
    pub fn match_region(&self, region: &str) -> Option<(&RegionPriceEntry, RegionMatch)> {
        if let Some(entry) = self.lookup(region) {
            return Some((entry, RegionMatch::Exact));
        }

        let region_lower = region.to_lowercase();
        self.entries
            .iter()
            .find(|e| {
                let key_lower = e.region_key.to_lowercase();
                key_lower == region_lower || region_lower.starts_with(&key_lower)
            })
            .map(|e| (e, RegionMatch::Loose))
    }

    /// Number of regions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no regions.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_price(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite() && *p >= 0.0)
}
