use crate::core::interleave::PixelCube;
use crate::core::metadata::{EnviMetadata, EnviMetadataBuilder};
use crate::core::radiometry::Radiometry;
use crate::io::band_table::BandRecord;
use crate::io::raster::{sniff_byte_order, RasterSource};
use crate::types::{DataType, EnviError, EnviResult, GeoTransform, SampleFormat, Sensor};
use std::path::{Path, PathBuf};

/// Everything a sensor adapter hands to the conversion driver
#[derive(Debug, Clone)]
pub struct Extraction {
    pub metadata: EnviMetadata,
    pub cube: PixelCube,
    /// Transform to apply once the cube is in its target interleave
    pub radiometry: Radiometry,
    /// File the cube was read from (for merged inputs, the merged name)
    pub source_path: PathBuf,
}

/// Reads one sensor family's native files into the canonical model
pub trait SensorAdapter {
    fn sensor(&self) -> Sensor;

    /// Resolve metadata and read the native cube
    fn extract(&self) -> EnviResult<Extraction>;
}

/// Fail with `InputNotFound` unless `path` is an existing file
pub fn require_file(path: &Path) -> EnviResult<()> {
    if !path.is_file() {
        log::error!("Input file doesn't exist: {}", path.display());
        return Err(EnviError::InputNotFound(path.to_path_buf()));
    }
    Ok(())
}

/// ENVI map info: projection, reference pixel (1, 1), tie-point easting and
/// northing, pixel sizes
pub fn compose_map_info(crs: &str, transform: &GeoTransform) -> String {
    format!(
        "{}, 1.000, 1.000, {:?}, {:?}, {:?}, {:?}",
        crs, transform.top_left_x, transform.top_left_y, transform.pixel_width, transform.pixel_height
    )
}

/// Metadata common to every GeoTIFF based adapter
pub(crate) struct NativeMetadata {
    pub builder: EnviMetadataBuilder,
    pub data_type: DataType,
    pub sample_format: Option<SampleFormat>,
}

impl NativeMetadata {
    /// Builder with the data type and raw encoding the radiometry produces
    pub fn into_builder(self, radiometry: &Radiometry) -> EnviMetadataBuilder {
        self.builder
            .data_type(radiometry.output_data_type(self.data_type))
            .sample_format(radiometry.output_format(self.sample_format))
    }
}

/// Byte order, dimensions, georeferencing and native data type, in that order
pub(crate) fn read_native_metadata(
    raster: &dyn RasterSource,
    primary_file: &Path,
) -> EnviResult<NativeMetadata> {
    let byte_order = sniff_byte_order(primary_file)?;

    let dims = raster.dimensions();
    log::info!(
        "Lines = {} | Samples = {} | Bands = {}",
        dims.lines,
        dims.samples,
        dims.bands
    );

    let crs = raster.crs();
    let map_info = compose_map_info(&crs, &raster.geo_transform()?);
    log::debug!("Map info: {}", map_info);

    let dtype = raster.dtypes().into_iter().next().unwrap_or_default();
    let data_type = DataType::from_dtype(&dtype);
    let sample_format = SampleFormat::from_dtype(&dtype);
    if data_type == DataType::Unknown {
        log::warn!("Native sample type '{}' has no ENVI data type", dtype);
    }

    let builder = EnviMetadata::builder()
        .byte_order(byte_order)
        .dimensions(dims)
        .map_info(map_info)
        .coordinate_system_string(raster.crs_wkt());

    Ok(NativeMetadata {
        builder,
        data_type,
        sample_format,
    })
}

/// Read the raster and tag it with the interleave its shape implies
pub(crate) fn read_native_cube(raster: &dyn RasterSource) -> EnviResult<PixelCube> {
    log::info!("Reading raw data...");
    let data = raster.read_all()?;
    PixelCube::from_native(data, &raster.dimensions())
}

/// Split band records into wavelength and FWHM sequences
pub(crate) fn spectral_sequences(records: &[&BandRecord]) -> (Vec<f64>, Vec<f64>) {
    records
        .iter()
        .map(|record| (record.center_wavelength, record.fwhm))
        .unzip()
}
