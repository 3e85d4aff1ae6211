//! Load named presets from a CSV batch file
//!
//! Expected header: `name,initial,dca,years,growth,price`. A `price` of 0
//! leaves the starting price unresolved for that preset.

use csv::Reader;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{validate, PresetError};
use crate::projection::ProjectionInputs;

/// Raw CSV row matching the preset file columns
#[derive(Debug, Deserialize)]
struct CsvRow {
    name: String,
    initial: f64,
    dca: f64,
    years: u32,
    growth: f64,
    #[serde(default)]
    price: f64,
}

impl CsvRow {
    fn into_preset(self, row: usize) -> Result<NamedPreset, PresetError> {
        let inputs = ProjectionInputs::new(self.initial, self.dca, self.years, self.growth, self.price);
        validate(&inputs).map_err(|reason| PresetError::InvalidRow { row, reason })?;

        Ok(NamedPreset {
            name: self.name,
            inputs,
        })
    }
}

/// A labelled input set from a batch file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedPreset {
    pub name: String,
    pub inputs: ProjectionInputs,
}

/// Load all presets from a CSV file
pub fn load_presets<P: AsRef<Path>>(path: P) -> Result<Vec<NamedPreset>, PresetError> {
    let reader = Reader::from_path(path)?;
    collect_presets(reader)
}

/// Load presets from any reader (e.g., string buffer, network stream)
pub fn load_presets_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<NamedPreset>, PresetError> {
    collect_presets(Reader::from_reader(reader))
}

fn collect_presets<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<NamedPreset>, PresetError> {
    let mut presets = Vec::new();

    // Row numbers are 1-based and exclude the header
    for (index, result) in reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        presets.push(row.into_preset(index + 1)?);
    }

    Ok(presets)
}
