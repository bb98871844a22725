use crate::core::radiometry::Radiometry;
use crate::io::band_table::BandTable;
use crate::io::raster::RasterDriver;
use crate::io::sensor::{
    read_native_cube, read_native_metadata, require_file, spectral_sequences, Extraction,
    SensorAdapter,
};
use crate::types::{EnviError, EnviResult, Sensor};
use quick_xml::de::from_str;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// EnMAP metadata XML, reduced to the band characterisation block
#[derive(Debug, Deserialize)]
pub struct EnMapMetadataRoot {
    #[serde(rename = "specific")]
    pub specific: Option<Specific>,
}

#[derive(Debug, Deserialize)]
pub struct Specific {
    #[serde(rename = "bandCharacterisation")]
    pub band_characterisation: Option<BandCharacterisation>,
}

#[derive(Debug, Deserialize)]
pub struct BandCharacterisation {
    #[serde(rename = "bandID", default)]
    pub bands: Vec<BandId>,
}

#[derive(Debug, Deserialize)]
pub struct BandId {
    #[serde(rename = "@number")]
    pub number: String,
    #[serde(rename = "wavelengthCenterOfBand")]
    pub wavelength_center: f64,
    #[serde(rename = "FWHMOfBand")]
    pub fwhm: f64,
}

/// Parser for EnMAP scene metadata
pub struct EnMapMetadataParser;

impl EnMapMetadataParser {
    pub fn parse(xml_content: &str) -> EnviResult<EnMapMetadataRoot> {
        from_str::<EnMapMetadataRoot>(xml_content)
            .map_err(|e| EnviError::XmlParsing(format!("Failed to parse EnMAP metadata XML: {}", e)))
    }

    /// Band table in document order, keyed `B%03d` by band number
    pub fn band_table(root: &EnMapMetadataRoot) -> EnviResult<BandTable> {
        let mut table = BandTable::new();
        let bands = root
            .specific
            .as_ref()
            .and_then(|s| s.band_characterisation.as_ref())
            .map(|c| c.bands.as_slice())
            .unwrap_or_default();

        if bands.is_empty() {
            log::warn!("EnMAP metadata has no specific/bandCharacterisation bands");
        }

        for band in bands {
            let number: usize = band.number.trim().parse().map_err(|_| {
                EnviError::Metadata(format!("Invalid EnMAP band number '{}'", band.number))
            })?;
            table.insert(BandTable::band_key(number), band.wavelength_center, band.fwhm, None);
        }
        Ok(table)
    }
}

/// EnMAP L1/L2 GeoTIFF plus its metadata XML
pub struct EnMapAdapter<'a, D: RasterDriver> {
    driver: &'a D,
    geotiff: PathBuf,
    metadata_xml: PathBuf,
}

impl<'a, D: RasterDriver> EnMapAdapter<'a, D> {
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(driver: &'a D, geotiff: P, metadata_xml: Q) -> Self {
        Self {
            driver,
            geotiff: geotiff.as_ref().to_path_buf(),
            metadata_xml: metadata_xml.as_ref().to_path_buf(),
        }
    }
}

impl<'a, D: RasterDriver> SensorAdapter for EnMapAdapter<'a, D> {
    fn sensor(&self) -> Sensor {
        Sensor::EnMap
    }

    fn extract(&self) -> EnviResult<Extraction> {
        require_file(&self.geotiff)?;
        require_file(&self.metadata_xml)?;
        log::info!("GeoTIFF and XML metadata files are valid");

        let xml_content = std::fs::read_to_string(&self.metadata_xml)?;
        let table = EnMapMetadataParser::band_table(&EnMapMetadataParser::parse(&xml_content)?)?;
        log::info!("XML metadata parsed: {} bands", table.len());

        let raster = self.driver.open(&self.geotiff)?;
        let native = read_native_metadata(raster.as_ref(), &self.geotiff)?;

        let records: Vec<_> = table.records().iter().collect();
        let (wavelength, fwhm) = spectral_sequences(&records);
        let radiometry = Radiometry::SIGNED_16_TO_UNIT;

        let metadata = native
            .into_builder(&radiometry)
            .data_ignore_value(0)
            .wavelength(wavelength)
            .fwhm(fwhm)
            .wavelength_units("nm")
            .sensor(Sensor::EnMap)
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
