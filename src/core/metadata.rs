//! ENVI header model
//!
//! Field order here is the order fields are written to the header. Reference:
//! <https://www.nv5geospatialsoftware.com/docs/ENVIHeaderFiles.html>

use crate::types::{
    ByteOrder, DataType, Dimensions, EnviError, EnviResult, Interleave, SampleFormat, Sensor,
};
use serde::Serialize;
use std::fmt::{self, Write};

/// A wavelength or FWHM sequence whose length disagrees with the band count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BandCountIssue {
    pub field: &'static str,
    pub found: usize,
    pub bands: usize,
}

impl From<BandCountIssue> for EnviError {
    fn from(issue: BandCountIssue) -> Self {
        EnviError::BandCountMismatch {
            field: issue.field,
            found: issue.found,
            bands: issue.bands,
        }
    }
}

/// Complete ENVI header record.
///
/// Values are built once by [`EnviMetadataBuilder`] and not mutated after;
/// the only derived copy is [`EnviMetadata::with_interleave`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnviMetadata {
    // Required
    byte_order: ByteOrder,
    data_type: DataType,
    header_offset: usize,
    file_type: String,
    interleave: Interleave,
    bands: usize,
    lines: usize,
    samples: usize,

    // Optional
    coordinate_system_string: String,
    data_ignore_value: i64,
    fwhm: Vec<f64>,
    map_info: String,
    sensor_type: String,
    wavelength: Vec<f64>,
    wavelength_units: String,

    /// Encoding of the raw payload; not a header field
    #[serde(skip)]
    sample_format: SampleFormat,
}

/// Header value as written after `key = `
enum FieldValue<'a> {
    Scalar(String),
    List(&'a [f64]),
}

impl EnviMetadata {
    pub fn builder() -> EnviMetadataBuilder {
        EnviMetadataBuilder::default()
    }

    /// Copy of this record with a different interleave
    pub fn with_interleave(&self, interleave: Interleave) -> Self {
        Self {
            interleave,
            ..self.clone()
        }
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// Encoding the raw payload is written with
    pub fn sample_format(&self) -> SampleFormat {
        self.sample_format
    }

    pub fn header_offset(&self) -> usize {
        self.header_offset
    }

    pub fn interleave(&self) -> Interleave {
        self.interleave
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.bands, self.lines, self.samples)
    }

    pub fn bands(&self) -> usize {
        self.bands
    }

    pub fn lines(&self) -> usize {
        self.lines
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    pub fn coordinate_system_string(&self) -> &str {
        &self.coordinate_system_string
    }

    pub fn data_ignore_value(&self) -> i64 {
        self.data_ignore_value
    }

    pub fn fwhm(&self) -> &[f64] {
        &self.fwhm
    }

    pub fn map_info(&self) -> &str {
        &self.map_info
    }

    pub fn sensor_type(&self) -> &str {
        &self.sensor_type
    }

    pub fn wavelength(&self) -> &[f64] {
        &self.wavelength
    }

    pub fn wavelength_units(&self) -> &str {
        &self.wavelength_units
    }

    /// Wavelength/FWHM sequences whose length differs from `bands`
    pub fn band_count_issues(&self) -> Vec<BandCountIssue> {
        [("wavelength", self.wavelength.len()), ("fwhm", self.fwhm.len())]
            .into_iter()
            .filter(|(_, found)| *found != self.bands)
            .map(|(field, found)| BandCountIssue {
                field,
                found,
                bands: self.bands,
            })
            .collect()
    }

    /// Log every band count issue at error level and return them
    pub fn report_band_count_issues(&self) -> Vec<BandCountIssue> {
        let issues = self.band_count_issues();
        for issue in &issues {
            log::error!(
                "The number of {} values ({}) does not equal the number of bands ({})",
                issue.field,
                issue.found,
                issue.bands
            );
        }
        issues
    }

    fn fields(&self) -> Vec<(&'static str, FieldValue<'_>)> {
        use FieldValue::{List, Scalar};

        vec![
            ("byte_order", Scalar(self.byte_order.code().to_string())),
            ("data_type", Scalar(self.data_type.code().to_string())),
            ("header_offset", Scalar(self.header_offset.to_string())),
            ("file_type", Scalar(self.file_type.clone())),
            ("interleave", Scalar(self.interleave.to_string())),
            ("bands", Scalar(self.bands.to_string())),
            ("lines", Scalar(self.lines.to_string())),
            ("samples", Scalar(self.samples.to_string())),
            ("coordinate_system_string", Scalar(self.coordinate_system_string.clone())),
            ("data_ignore_value", Scalar(self.data_ignore_value.to_string())),
            ("fwhm", List(&self.fwhm)),
            ("map_info", Scalar(self.map_info.clone())),
            ("sensor_type", Scalar(self.sensor_type.clone())),
            ("wavelength", List(&self.wavelength)),
            ("wavelength_units", Scalar(self.wavelength_units.clone())),
        ]
    }

    /// Render the ENVI header text
    pub fn to_header_string(&self) -> String {
        self.to_string()
    }
}

fn format_list(values: &[f64]) -> String {
    let items: Vec<String> = values.iter().map(|v| format!("{:?}", v)).collect();
    format!("{{ {} }}", items.join(", "))
}

impl fmt::Display for EnviMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::from("ENVI\n");
        for (name, value) in self.fields() {
            let key = name.replace('_', " ");
            let rendered = match value {
                FieldValue::Scalar(text) => text,
                FieldValue::List(values) => format_list(values),
            };
            writeln!(out, "{} = {}", key, rendered)?;
        }
        f.write_str(&out)
    }
}

/// Field-by-field construction of an [`EnviMetadata`]
#[derive(Debug, Clone)]
pub struct EnviMetadataBuilder {
    byte_order: ByteOrder,
    data_type: DataType,
    header_offset: usize,
    interleave: Interleave,
    dims: Option<Dimensions>,
    coordinate_system_string: String,
    data_ignore_value: i64,
    fwhm: Vec<f64>,
    map_info: String,
    sensor_type: String,
    wavelength: Vec<f64>,
    wavelength_units: String,
    sample_format: Option<SampleFormat>,
}

impl Default for EnviMetadataBuilder {
    fn default() -> Self {
        Self {
            byte_order: ByteOrder::Lsf,
            data_type: DataType::Unknown,
            header_offset: 0,
            interleave: Interleave::Bip,
            dims: None,
            coordinate_system_string: String::new(),
            data_ignore_value: 0,
            fwhm: Vec::new(),
            map_info: String::new(),
            sensor_type: String::new(),
            wavelength: Vec::new(),
            wavelength_units: String::new(),
            sample_format: None,
        }
    }
}

impl EnviMetadataBuilder {
    pub fn byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    pub fn data_type(mut self, data_type: DataType) -> Self {
        self.data_type = data_type;
        self
    }

    pub fn header_offset(mut self, header_offset: usize) -> Self {
        self.header_offset = header_offset;
        self
    }

    pub fn interleave(mut self, interleave: Interleave) -> Self {
        self.interleave = interleave;
        self
    }

    pub fn dimensions(mut self, dims: Dimensions) -> Self {
        self.dims = Some(dims);
        self
    }

    pub fn coordinate_system_string(mut self, value: impl Into<String>) -> Self {
        self.coordinate_system_string = value.into();
        self
    }

    pub fn data_ignore_value(mut self, value: i64) -> Self {
        self.data_ignore_value = value;
        self
    }

    pub fn fwhm(mut self, fwhm: Vec<f64>) -> Self {
        self.fwhm = fwhm;
        self
    }

    pub fn map_info(mut self, value: impl Into<String>) -> Self {
        self.map_info = value.into();
        self
    }

    pub fn sensor(self, sensor: Sensor) -> Self {
        self.sensor_type(sensor.to_string())
    }

    pub fn sensor_type(mut self, value: impl Into<String>) -> Self {
        self.sensor_type = value.into();
        self
    }

    pub fn wavelength(mut self, wavelength: Vec<f64>) -> Self {
        self.wavelength = wavelength;
        self
    }

    pub fn wavelength_units(mut self, value: impl Into<String>) -> Self {
        self.wavelength_units = value.into();
        self
    }

    /// Raw encoding, when it cannot be derived from the data type
    pub fn sample_format(mut self, sample_format: Option<SampleFormat>) -> Self {
        self.sample_format = sample_format;
        self
    }

    /// Finish the record; dimensions must be set and non-zero.
    ///
    /// Without an explicit or derivable sample format the payload falls back
    /// to float32; a complex data type is then declared as float32 as well.
    pub fn build(self) -> EnviResult<EnviMetadata> {
        let dims = self
            .dims
            .ok_or_else(|| EnviError::Metadata("Raster dimensions were never set".to_string()))?;
        if dims.is_empty() {
            return Err(EnviError::Metadata(format!(
                "Raster dimensions must be positive, got {:?}",
                dims
            )));
        }

        let mut data_type = self.data_type;
        let sample_format = match self
            .sample_format
            .or_else(|| SampleFormat::for_data_type(data_type))
        {
            Some(format) => format,
            None => {
                log::warn!("No raw encoding for data type {:?}, writing float32 samples", data_type);
                if matches!(data_type, DataType::Complex | DataType::Complex64) {
                    data_type = DataType::Float32;
                }
                SampleFormat::Float32
            }
        };

        Ok(EnviMetadata {
            byte_order: self.byte_order,
            data_type,
            header_offset: self.header_offset,
            file_type: "ENVI".to_string(),
            interleave: self.interleave,
            bands: dims.bands,
            lines: dims.lines,
            samples: dims.samples,
            coordinate_system_string: self.coordinate_system_string,
            data_ignore_value: self.data_ignore_value,
            fwhm: self.fwhm,
            map_info: self.map_info,
            sensor_type: self.sensor_type,
            wavelength: self.wavelength,
            wavelength_units: self.wavelength_units,
            sample_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_metadata() -> EnviMetadata {
        EnviMetadata::builder()
            .dimensions(Dimensions::new(3, 2, 4))
            .interleave(Interleave::Bip)
            .byte_order(ByteOrder::Lsf)
            .data_type(DataType::Float32)
            .wavelength(vec![400.0, 500.0, 600.0])
            .fwhm(vec![10.0, 10.0, 10.0])
            .wavelength_units("nm")
            .build()
            .unwrap()
    }

    #[test]
    fn test_header_layout() {
        let header = sample_metadata().to_header_string();
        let lines: Vec<&str> = header.lines().collect();

        assert_eq!(lines[0], "ENVI");
        assert_eq!(lines[1], "byte order = 0");
        assert_eq!(lines[2], "data type = 4");
        assert_eq!(lines[3], "header offset = 0");
        assert_eq!(lines[4], "file type = ENVI");
        assert_eq!(lines[5], "interleave = bip");
        assert_eq!(lines[6], "bands = 3");
        assert_eq!(lines[7], "lines = 2");
        assert_eq!(lines[8], "samples = 4");
        assert_eq!(lines[9], "coordinate system string = ");
        assert_eq!(lines[10], "data ignore value = 0");
        assert_eq!(lines[11], "fwhm = { 10.0, 10.0, 10.0 }");
        assert_eq!(lines[12], "map info = ");
        assert_eq!(lines[13], "sensor type = ");
        assert_eq!(lines[14], "wavelength = { 400.0, 500.0, 600.0 }");
        assert_eq!(lines[15], "wavelength units = nm");
        assert_eq!(lines.len(), 16);
    }

    #[test]
    fn test_empty_lists_still_render() {
        let metadata = EnviMetadata::builder()
            .dimensions(Dimensions::new(1, 1, 1))
            .build()
            .unwrap();
        let header = metadata.to_header_string();
        assert!(header.contains("\nwavelength = {  }\n"));
        assert!(header.contains("\ndata type = -1\n"));
        assert_eq!(metadata.sample_format(), SampleFormat::Float32);
    }

    #[test]
    fn test_sample_format_resolution() {
        let build = |data_type: DataType, format: Option<SampleFormat>| {
            EnviMetadata::builder()
                .dimensions(Dimensions::new(1, 1, 1))
                .data_type(data_type)
                .sample_format(format)
                .build()
                .unwrap()
        };

        assert_eq!(build(DataType::UInt16, None).sample_format(), SampleFormat::UInt16);

        let int8 = build(DataType::Unknown, Some(SampleFormat::Int8));
        assert_eq!(int8.data_type(), DataType::Unknown);
        assert_eq!(int8.sample_format(), SampleFormat::Int8);

        let complex = build(DataType::Complex64, None);
        assert_eq!(complex.data_type(), DataType::Float32);
        assert_eq!(complex.sample_format(), SampleFormat::Float32);
    }

    #[test]
    fn test_with_interleave_changes_only_interleave() {
        let metadata = sample_metadata();
        let bsq = metadata.with_interleave(Interleave::Bsq);
        assert_eq!(bsq.interleave(), Interleave::Bsq);
        assert_eq!(bsq.with_interleave(Interleave::Bip), metadata);
    }

    #[test]
    fn test_band_count_issues() {
        assert!(sample_metadata().band_count_issues().is_empty());

        let metadata = EnviMetadata::builder()
            .dimensions(Dimensions::new(3, 2, 2))
            .wavelength(vec![400.0, 500.0])
            .fwhm(vec![10.0, 10.0, 10.0])
            .build()
            .unwrap();
        let issues = metadata.report_band_count_issues();
        assert_eq!(
            issues,
            vec![BandCountIssue {
                field: "wavelength",
                found: 2,
                bands: 3
            }]
        );
    }

    #[test]
    fn test_build_requires_dimensions() {
        assert!(EnviMetadata::builder().build().is_err());
        assert!(EnviMetadata::builder()
            .dimensions(Dimensions::new(0, 10, 10))
            .build()
            .is_err());
    }
}
