use crate::core::radiometry::Radiometry;
use crate::io::band_table::BandTable;
use crate::io::raster::RasterDriver;
use crate::io::sensor::{
    read_native_cube, read_native_metadata, require_file, spectral_sequences, Extraction,
    SensorAdapter,
};
use crate::types::{EnviError, EnviResult, Sensor};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::path::{Path, PathBuf};

/// `Status` value of a band that is present in the image
const ACTIVE_STATUS: &str = "1";

/// Spectral description of a Pixxel scene
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PixxelBands {
    pub table: BandTable,
    pub wavelength_units: String,
}

/// One `Bands` element as it is read
#[derive(Debug, Default)]
struct BandElement {
    status: Option<String>,
    wavelength: Option<f64>,
    bandwidth: Option<f64>,
}

/// Everything collected in a single pass over the document
#[derive(Debug, Default)]
struct Collected {
    bands: Vec<BandElement>,
    central_wavelength_unit: Option<String>,
    wavelength_list: Option<String>,
    wavelength_list_unit: Option<String>,
    fwhm_list: Option<String>,
}

/// Parser for Pixxel scene metadata.
///
/// Current products describe each band in a `Bands` element (`Status`,
/// `Central_Wavelength`, `Bandwidth`); older ones carry brace-delimited
/// `Wavelength_list` / `FWHM_list` elements. Per-band elements win when both
/// are present.
pub struct PixxelMetadataParser;

fn xml_error(e: impl std::fmt::Display) -> EnviError {
    EnviError::XmlParsing(format!("Failed to parse Pixxel metadata XML: {}", e))
}

fn attribute(element: &BytesStart<'_>, name: &str) -> EnviResult<Option<String>> {
    for attr in element.attributes() {
        let attr = attr.map_err(xml_error)?;
        if attr.key.as_ref() == name.as_bytes() {
            return Ok(Some(attr.unescape_value().map_err(xml_error)?.into_owned()));
        }
    }
    Ok(None)
}

fn parse_number(text: &str, what: &str) -> EnviResult<f64> {
    text.trim()
        .parse()
        .map_err(|_| EnviError::Metadata(format!("Invalid {} value '{}'", what, text)))
}

/// Parse `{ 1.0, 2.0, }` style lists, ignoring empty items
fn parse_list(text: &str, what: &str) -> EnviResult<Vec<f64>> {
    text.trim()
        .trim_start_matches('{')
        .trim_end_matches('}')
        .split(',')
        .filter(|item| !item.trim().is_empty())
        .map(|item| parse_number(item, what))
        .collect()
}

impl PixxelMetadataParser {
    pub fn parse(xml_content: &str) -> EnviResult<PixxelBands> {
        let collected = Self::collect(xml_content)?;

        if !collected.bands.is_empty() {
            return Self::from_band_elements(collected);
        }
        if collected.wavelength_list.is_some() {
            return Self::from_lists(collected);
        }

        log::warn!("Pixxel metadata has neither Bands elements nor a Wavelength_list");
        Ok(PixxelBands::default())
    }

    fn collect(xml_content: &str) -> EnviResult<Collected> {
        let mut reader = Reader::from_str(xml_content);
        reader.trim_text(true);

        let mut collected = Collected::default();
        let mut path: Vec<String> = Vec::new();
        let mut current: Option<BandElement> = None;

        loop {
            match reader.read_event().map_err(xml_error)? {
                Event::Start(element) => {
                    let name = String::from_utf8_lossy(element.name().as_ref()).into_owned();
                    match name.as_str() {
                        "Bands" => current = Some(BandElement::default()),
                        "Central_Wavelength" if collected.central_wavelength_unit.is_none() => {
                            collected.central_wavelength_unit = attribute(&element, "unit")?;
                        }
                        "Wavelength_list" => {
                            collected.wavelength_list_unit = attribute(&element, "unit")?;
                        }
                        _ => {}
                    }
                    path.push(name);
                }
                Event::Text(text) => {
                    let text = text.unescape().map_err(xml_error)?;
                    let element = path.last().map(String::as_str).unwrap_or_default();
                    let in_band = path.len() >= 2 && path[path.len() - 2] == "Bands";

                    match (element, current.as_mut()) {
                        ("Status", Some(band)) if in_band => band.status = Some(text.trim().to_string()),
                        ("Central_Wavelength", Some(band)) if in_band => {
                            band.wavelength = Some(parse_number(&text, "Central_Wavelength")?)
                        }
                        ("Bandwidth", Some(band)) if in_band => {
                            band.bandwidth = Some(parse_number(&text, "Bandwidth")?)
                        }
                        ("Wavelength_list", _) => collected.wavelength_list = Some(text.into_owned()),
                        ("FWHM_list", _) => collected.fwhm_list = Some(text.into_owned()),
                        _ => {}
                    }
                }
                Event::End(_) => {
                    if path.pop().as_deref() == Some("Bands") {
                        if let Some(band) = current.take() {
                            collected.bands.push(band);
                        }
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(collected)
    }

    fn from_band_elements(collected: Collected) -> EnviResult<PixxelBands> {
        let mut table = BandTable::new();
        let mut skipped = 0;

        for (index, band) in collected.bands.iter().enumerate() {
            if band.status.as_deref() != Some(ACTIVE_STATUS) {
                skipped += 1;
                continue;
            }
            match (band.wavelength, band.bandwidth) {
                (Some(wavelength), Some(bandwidth)) => {
                    table.insert(BandTable::band_key(index + 1), wavelength, bandwidth, None)
                }
                // wavelength and FWHM sequences stay the same length: a band
                // missing either value contributes to neither
                _ => log::warn!(
                    "Active band {} lacks a Central_Wavelength or Bandwidth, leaving it out",
                    index + 1
                ),
            }
        }

        log::debug!("{} active bands, {} inactive skipped", table.len(), skipped);
        Ok(PixxelBands {
            table,
            wavelength_units: collected.central_wavelength_unit.unwrap_or_default(),
        })
    }

    fn from_lists(collected: Collected) -> EnviResult<PixxelBands> {
        let wavelengths = parse_list(collected.wavelength_list.as_deref().unwrap_or_default(), "Wavelength_list")?;
        let fwhms = parse_list(collected.fwhm_list.as_deref().unwrap_or_default(), "FWHM_list")?;
        if wavelengths.len() != fwhms.len() {
            log::warn!(
                "Wavelength_list has {} values but FWHM_list has {}",
                wavelengths.len(),
                fwhms.len()
            );
        }

        let mut table = BandTable::new();
        for (index, (wavelength, fwhm)) in wavelengths.into_iter().zip(fwhms).enumerate() {
            table.insert(BandTable::band_key(index + 1), wavelength, fwhm, None);
        }
        Ok(PixxelBands {
            table,
            wavelength_units: collected.wavelength_list_unit.unwrap_or_default(),
        })
    }
}

/// Pixxel hyperspectral GeoTIFF plus its metadata XML
pub struct PixxelAdapter<'a, D: RasterDriver> {
    driver: &'a D,
    geotiff: PathBuf,
    metadata_xml: PathBuf,
    normalize: bool,
}

impl<'a, D: RasterDriver> PixxelAdapter<'a, D> {
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(driver: &'a D, geotiff: P, metadata_xml: Q) -> Self {
        Self {
            driver,
            geotiff: geotiff.as_ref().to_path_buf(),
            metadata_xml: metadata_xml.as_ref().to_path_buf(),
            normalize: false,
        }
    }

    /// Z-score normalize the cube into [0, 1] instead of writing raw counts
    pub fn with_normalization(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }
}

impl<'a, D: RasterDriver> SensorAdapter for PixxelAdapter<'a, D> {
    fn sensor(&self) -> Sensor {
        Sensor::Pixxel
    }

    fn extract(&self) -> EnviResult<Extraction> {
        require_file(&self.geotiff)?;
        require_file(&self.metadata_xml)?;
        log::info!("GeoTIFF and XML metadata files are valid");

        let bands = PixxelMetadataParser::parse(&std::fs::read_to_string(&self.metadata_xml)?)?;
        log::info!("XML metadata parsed: {} active bands", bands.table.len());

        let raster = self.driver.open(&self.geotiff)?;
        let native = read_native_metadata(raster.as_ref(), &self.geotiff)?;

        let records: Vec<_> = bands.table.records().iter().collect();
        let (wavelength, fwhm) = spectral_sequences(&records);
        let radiometry = if self.normalize {
            Radiometry::ZScore
        } else {
            Radiometry::Native
        };

        let metadata = native
            .into_builder(&radiometry)
            .wavelength(wavelength)
            .fwhm(fwhm)
            .wavelength_units(bands.wavelength_units)
            .sensor(Sensor::Pixxel)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_elements_skip_inactive() {
        let xml = r#"<Product>
            <Band_Info>
                <Bands>
                    <Status>1</Status>
                    <Central_Wavelength unit="nm">470.5</Central_Wavelength>
                    <Bandwidth>9.8</Bandwidth>
                </Bands>
                <Bands>
                    <Status>0</Status>
                    <Central_Wavelength unit="nm">480.2</Central_Wavelength>
                    <Bandwidth>9.9</Bandwidth>
                </Bands>
                <Bands>
                    <Status>1</Status>
                    <Central_Wavelength unit="nm">490.0</Central_Wavelength>
                    <Bandwidth>10.1</Bandwidth>
                </Bands>
            </Band_Info>
        </Product>"#;

        let bands = PixxelMetadataParser::parse(xml).unwrap();
        assert_eq!(bands.table.wavelengths(), vec![470.5, 490.0]);
        assert_eq!(bands.table.fwhms(), vec![9.8, 10.1]);
        assert_eq!(bands.wavelength_units, "nm");
        assert!(bands.table.contains("B003"));
        assert!(!bands.table.contains("B002"));
    }

    #[test]
    fn test_legacy_lists() {
        let xml = r#"<Product>
            <Wavelength_list unit="Nanometers">{470.5, 480.2, 490.0,}</Wavelength_list>
            <FWHM_list>{9.8, 9.9, 10.1,}</FWHM_list>
        </Product>"#;

        let bands = PixxelMetadataParser::parse(xml).unwrap();
        assert_eq!(bands.table.wavelengths(), vec![470.5, 480.2, 490.0]);
        assert_eq!(bands.table.fwhms(), vec![9.8, 9.9, 10.1]);
        assert_eq!(bands.wavelength_units, "Nanometers");
    }

    #[test]
    fn test_incomplete_active_band_is_left_out() {
        let xml = r#"<Product>
            <Bands><Status>1</Status><Central_Wavelength unit="nm">470.5</Central_Wavelength></Bands>
            <Bands><Status>1</Status><Central_Wavelength unit="nm">480.0</Central_Wavelength><Bandwidth>9.0</Bandwidth></Bands>
        </Product>"#;

        let bands = PixxelMetadataParser::parse(xml).unwrap();
        assert_eq!(bands.table.wavelengths(), vec![480.0]);
        assert_eq!(bands.table.fwhms(), vec![9.0]);
        assert!(!bands.table.contains("B001"));
        assert!(bands.table.contains("B002"));
    }

    #[test]
    fn test_bad_number_is_reported() {
        let xml = r#"<Product><Bands><Status>1</Status><Bandwidth>wide</Bandwidth></Bands></Product>"#;
        assert!(matches!(
            PixxelMetadataParser::parse(xml),
            Err(EnviError::Metadata(_))
        ));
    }

    #[test]
    fn test_parse_list_tolerates_whitespace() {
        assert_eq!(parse_list(" { 1.5 ,2.5, } ", "list").unwrap(), vec![1.5, 2.5]);
        assert!(parse_list("{}", "list").unwrap().is_empty());
    }
}
