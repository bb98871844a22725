//! Conversion driver: extract, transpose, apply radiometry, serialize

use crate::core::interleave::{transpose, PixelCube};
use crate::core::metadata::EnviMetadata;
use crate::io::envi_writer::{encode_cube, EnviOutput, EnviWriter};
use crate::io::sensor::SensorAdapter;
use crate::types::{EnviError, EnviResult, Interleave};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Conversion settings, loadable from a TOML file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertOptions {
    /// Interleave of the written cube
    pub interleave: Interleave,
    /// Z-score normalize sensors that support it
    pub normalize: bool,
    /// Treat wavelength/FWHM counts that differ from the band count as fatal
    pub strict_band_count: bool,
    /// Extension of the raw payload next to the header
    pub raw_extension: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            interleave: Interleave::Bip,
            normalize: false,
            strict_band_count: false,
            raw_extension: "raw".to_string(),
        }
    }
}

impl ConvertOptions {
    pub fn from_toml_str(content: &str) -> EnviResult<Self> {
        toml::from_str(content).map_err(|e| EnviError::Config(format!("Invalid options: {}", e)))
    }

    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> EnviResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(EnviError::InputNotFound(path.to_path_buf()));
        }
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }
}

/// Result of one conversion run, ready to be serialized
#[derive(Debug, Clone)]
pub struct Conversion {
    pub metadata: EnviMetadata,
    pub cube: PixelCube,
    pub source_path: PathBuf,
}

impl Conversion {
    pub fn header_text(&self) -> String {
        self.metadata.to_header_string()
    }

    /// Header-free payload in the cube's final physical order
    pub fn raw_bytes(&self) -> EnviResult<Vec<u8>> {
        encode_cube(&self.cube, self.metadata.sample_format(), self.metadata.byte_order())
    }

    /// Header path used when none is given: the source with a `.hdr` extension
    pub fn default_header_path(&self) -> PathBuf {
        self.source_path.with_extension("hdr")
    }

    pub fn write(&self, writer: &EnviWriter, header_path: &Path) -> EnviResult<EnviOutput> {
        writer.write(header_path, &self.metadata, &self.cube)
    }
}

pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    pub fn writer(&self) -> EnviWriter {
        EnviWriter::new().with_raw_extension(self.options.raw_extension.clone())
    }

    /// Run one adapter through the pipeline.
    ///
    /// Metadata is resolved completely before the cube is touched; the cube is
    /// transposed to the target interleave first and the radiometric transform
    /// is applied to the transposed cube.
    pub fn run(&self, adapter: &dyn SensorAdapter) -> EnviResult<Conversion> {
        log::info!("Converting {} scene", adapter.sensor());
        let extraction = adapter.extract()?;

        let issues = extraction.metadata.band_count_issues();
        if self.options.strict_band_count {
            if let Some(issue) = issues.into_iter().next() {
                return Err(issue.into());
            }
        }

        let dims = extraction.metadata.dimensions();
        let target = self.options.interleave;
        log::info!(
            "Converting data from {} to {}...",
            extraction.cube.interleave(),
            target
        );
        let mut cube = transpose(extraction.cube, target, &dims)?;
        let metadata = extraction.metadata.with_interleave(target);

        log::debug!("Applying radiometry {:?}", extraction.radiometry);
        extraction.radiometry.apply(&mut cube)?;
        log::info!("Data converted.");

        Ok(Conversion {
            metadata,
            cube,
            source_path: extraction.source_path,
        })
    }
}

/// Convert one scene into header text and raw bytes
pub fn convert(adapter: &dyn SensorAdapter, target: Interleave) -> EnviResult<(String, Vec<u8>)> {
    let options = ConvertOptions {
        interleave: target,
        ..ConvertOptions::default()
    };
    let conversion = Converter::new(options).run(adapter)?;
    Ok((conversion.header_text(), conversion.raw_bytes()?))
}
