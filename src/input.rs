use std::{fs::File, io::Read, path::Path};

use anyhow::Context;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct Purchase {
    pub label: String,
    pub merchant: String,
    pub cost: f64,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("{label}:{line}: expected merchant and cost, found {fields} fields")]
    InvalidRecord {
        label: String,
        line: u64,
        fields: usize,
    },
    #[error("{label}:{line}: invalid cost {value:?}")]
    InvalidAmount {
        label: String,
        line: u64,
        value: String,
    },
    #[error("{label}: {source}")]
    Csv {
        label: String,
        #[source]
        source: csv::Error,
    },
}

/// Tab separated files are recognized by their extension, everything else
/// is read as comma separated.
pub fn delimiter_for(path: &Path) -> u8 {
    match path.extension().and_then(|e| e.to_str()) {
        Some("tsv") => b'\t',
        _ => b',',
    }
}

/// Files become report columns named after the file without its extension.
pub fn label_for(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

pub fn read_file(path: &Path) -> anyhow::Result<Vec<Purchase>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let label = label_for(path);
    let purchases = read_purchases(file, delimiter_for(path), &label)?;

    debug!(
        path = %path.display(),
        purchases = purchases.len(),
        "read purchases"
    );

    Ok(purchases)
}

pub fn read_purchases<R: Read>(reader: R, delimiter: u8, label: &str) -> Result<Vec<Purchase>, Error> {
    let mut csv_rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut purchases = Vec::new();
    for record in csv_rdr.records() {
        let record = record.map_err(|source| Error::Csv {
            label: label.to_owned(),
            source,
        })?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        if record.len() != 2 {
            return Err(Error::InvalidRecord {
                label: label.to_owned(),
                line,
                fields: record.len(),
            });
        }

        let cost = parse_cost(&record[1]).ok_or_else(|| Error::InvalidAmount {
            label: label.to_owned(),
            line,
            value: record[1].to_owned(),
        })?;

        purchases.push(Purchase {
            label: label.to_owned(),
            merchant: record[0].trim().to_owned(),
            cost,
        });
    }

    Ok(purchases)
}

fn parse_cost(raw: &str) -> Option<f64> {
    let cleaned = raw.replace(['$', ','], "");
    cleaned
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|cost| cost.is_finite())
}
