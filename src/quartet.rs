use std::{fs::File, io::BufReader, path::Path};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub name: String,
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
}

impl Dataset {
    pub fn new(name: impl Into<String>, xs: &[f64], ys: &[f64]) -> Self {
        Self {
            name: name.into(),
            xs: xs.to_vec(),
            ys: ys.to_vec(),
        }
    }

    /// Bytes held by the sample values themselves.
    pub fn sample_bytes(&self) -> usize {
        (self.xs.len() + self.ys.len()) * std::mem::size_of::<f64>()
    }
}

/// Reads a JSON array of datasets.
pub fn load_datasets(path: impl AsRef<Path>) -> Result<Vec<Dataset>> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

const X_SHARED: [f64; 11] = [10.0, 8.0, 13.0, 9.0, 11.0, 14.0, 6.0, 4.0, 12.0, 7.0, 5.0];
const X_IV: [f64; 11] = [8.0, 8.0, 8.0, 8.0, 8.0, 8.0, 8.0, 19.0, 8.0, 8.0, 8.0];

pub static QUARTET: Lazy<Vec<Dataset>> = Lazy::new(|| {
    vec![
        Dataset::new(
            "Set I",
            &X_SHARED,
            &[8.04, 6.95, 7.58, 8.81, 8.33, 9.96, 7.24, 4.26, 10.84, 4.82, 5.68],
        ),
        Dataset::new(
            "Set II",
            &X_SHARED,
            &[9.14, 8.14, 8.74, 8.77, 9.26, 8.1, 6.13, 3.1, 9.13, 7.26, 4.74],
        ),
        Dataset::new(
            "Set III",
            &X_SHARED,
            &[7.46, 6.77, 12.74, 7.11, 7.81, 8.84, 6.08, 5.39, 8.15, 6.42, 5.73],
        ),
        Dataset::new(
            "Set IV",
            &X_IV,
            &[6.58, 5.76, 7.71, 8.84, 8.47, 7.04, 5.25, 12.5, 5.56, 7.91, 6.89],
        ),
    ]
});
