use crate::core::radiometry::Radiometry;
use crate::io::band_table::BandTable;
use crate::io::raster::RasterDriver;
use crate::io::sensor::{
    read_native_cube, read_native_metadata, require_file, spectral_sequences, Extraction,
    SensorAdapter,
};
use crate::types::{EnviError, EnviResult, Sensor};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Dataset metadata item listing the band numbers of the product
pub const IMAGE_DESCRIPTION_TAG: &str = "TIFFTAG_IMAGEDESCRIPTION";

/// Band numbers (1-based, WorldView-3 numbering) listed in an image
/// description such as `"bandList = 2;3;5;"`
pub fn parse_band_numbers(description: &str) -> EnviResult<Vec<usize>> {
    static BAND_PATTERN: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();
    let pattern = BAND_PATTERN
        .get_or_init(|| Regex::new(r"(\d+);"))
        .as_ref()
        .map_err(|e| EnviError::Processing(format!("Invalid band pattern: {}", e)))?;

    pattern
        .captures_iter(description)
        .map(|caps| {
            caps[1]
                .parse::<usize>()
                .map_err(|e| EnviError::Metadata(format!("Invalid band number '{}': {}", &caps[1], e)))
        })
        .collect()
}

/// WorldView-3 GeoTIFF; band identities come from the TIFF image description
pub struct WorldView3Adapter<'a, D: RasterDriver> {
    driver: &'a D,
    geotiff: PathBuf,
    bands: &'a BandTable,
}

impl<'a, D: RasterDriver> WorldView3Adapter<'a, D> {
    pub fn new<P: AsRef<Path>>(driver: &'a D, geotiff: P, bands: &'a BandTable) -> Self {
        Self {
            driver,
            geotiff: geotiff.as_ref().to_path_buf(),
            bands,
        }
    }
}

impl<'a, D: RasterDriver> SensorAdapter for WorldView3Adapter<'a, D> {
    fn sensor(&self) -> Sensor {
        Sensor::WorldView3
    }

    fn extract(&self) -> EnviResult<Extraction> {
        require_file(&self.geotiff)?;

        let raster = self.driver.open(&self.geotiff)?;
        let native = read_native_metadata(raster.as_ref(), &self.geotiff)?;

        let numbers = match raster.metadata_item(IMAGE_DESCRIPTION_TAG) {
            Some(description) => parse_band_numbers(&description)?,
            None => Vec::new(),
        };
        if numbers.is_empty() {
            log::error!("Was not able to parse band numbers from the GeoTIFF metadata");
        }

        let keys: Vec<String> = numbers.into_iter().map(BandTable::band_key).collect();
        let records = self.bands.resolve(&keys)?;
        let (wavelength, fwhm) = spectral_sequences(&records);
        log::info!("Wavelengths parsed through GeoTIFF metadata");

        let radiometry = Radiometry::Native;
        let metadata = native
            .into_builder(&radiometry)
            .wavelength(wavelength)
            .fwhm(fwhm)
            .wavelength_units("nm")
            .sensor(Sensor::WorldView3)
            .build()?;
        metadata.report_band_count_issues();

        let cube = read_native_cube(raster.as_ref())?;

        Ok(Extraction {
            metadata,
            cube,
            radiometry,
            source_path: self.geotiff.clone(),
        })
    }
}
