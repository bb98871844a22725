use crate::io::calibration_tables::{HYPERION_BANDS, WORLDVIEW3_BANDS};
use crate::types::{EnviError, EnviResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Radiometric range a band was digitised in; selects its scale divisor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DynamicRange {
    Vnir,
    Swir,
}

/// Spectral descriptor of one band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandRecord {
    pub key: String,
    /// 1-based position in the table
    pub band_index: usize,
    pub center_wavelength: f64,
    pub fwhm: f64,
    pub range: Option<DynamicRange>,
}

/// Band identifier to spectral descriptor lookup.
///
/// Records keep the order they were added in, which is the order wavelength
/// and FWHM sequences are emitted in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BandTable {
    records: Vec<BandRecord>,
    index: HashMap<String, usize>,
}

impl BandTable {
    /// Zero-padded key for a 1-based band number, e.g. `B007`
    pub fn band_key(band: usize) -> String {
        format!("B{:03}", band)
    }

    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record; a repeated key replaces the earlier entry's values
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        center_wavelength: f64,
        fwhm: f64,
        range: Option<DynamicRange>,
    ) {
        let key = key.into();
        if let Some(&position) = self.index.get(&key) {
            log::warn!("Duplicate band {} in calibration table, keeping the last entry", key);
            let record = &mut self.records[position];
            record.center_wavelength = center_wavelength;
            record.fwhm = fwhm;
            record.range = range;
            return;
        }

        self.index.insert(key.clone(), self.records.len());
        self.records.push(BandRecord {
            key,
            band_index: self.records.len() + 1,
            center_wavelength,
            fwhm,
            range,
        });
    }

    /// EO-1 Hyperion calibrated bands
    pub fn hyperion() -> Self {
        let mut table = Self::new();
        for &(key, wavelength, fwhm, range) in HYPERION_BANDS {
            table.insert(key, wavelength, fwhm, Some(range));
        }
        table
    }

    /// WorldView-3 panchromatic, VNIR and SWIR bands
    pub fn worldview3() -> Self {
        let mut table = Self::new();
        for &(key, wavelength, fwhm) in WORLDVIEW3_BANDS {
            table.insert(key, wavelength, fwhm, None);
        }
        table
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn records(&self) -> &[BandRecord] {
        &self.records
    }

    /// Look up a band; a missing key means the table and the data disagree
    pub fn lookup(&self, key: &str) -> EnviResult<&BandRecord> {
        self.index
            .get(key)
            .map(|&position| &self.records[position])
            .ok_or_else(|| EnviError::UnmappedBand(key.to_string()))
    }

    /// Look up every key, failing on the first unmapped one
    pub fn resolve<S: AsRef<str>>(&self, keys: &[S]) -> EnviResult<Vec<&BandRecord>> {
        keys.iter().map(|key| self.lookup(key.as_ref())).collect()
    }

    pub fn wavelengths(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.center_wavelength).collect()
    }

    pub fn fwhms(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.fwhm).collect()
    }
}

/// Dynamic range to scale divisor lookup
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScaleTable {
    divisors: HashMap<DynamicRange, f64>,
}

impl ScaleTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_divisor(mut self, range: DynamicRange, divisor: f64) -> Self {
        self.divisors.insert(range, divisor);
        self
    }

    /// Hyperion L1 radiance scaling: VNIR / 40, SWIR / 80
    pub fn hyperion() -> Self {
        Self::new()
            .with_divisor(DynamicRange::Vnir, 40.0)
            .with_divisor(DynamicRange::Swir, 80.0)
    }

    /// Divisor for a band's range, 1.0 when unmapped
    pub fn divisor(&self, range: Option<DynamicRange>) -> f64 {
        range
            .and_then(|r| self.divisors.get(&r).copied())
            .unwrap_or(1.0)
    }

    /// One divisor per record, in record order
    pub fn divisors(&self, records: &[&BandRecord]) -> Vec<f64> {
        records.iter().map(|record| self.divisor(record.range)).collect()
    }
}
