use crate::io::raster::{RasterDriver, RasterSource};
use crate::types::{EnviResult, GeoTransform, Sample};
use gdal::{Dataset, Metadata};
use ndarray::Array2;
use std::path::Path;

/// GeoTIFF (or any GDAL-readable raster) opened through GDAL
pub struct GdalRaster {
    dataset: Dataset,
}

impl GdalRaster {
    pub fn open<P: AsRef<Path>>(path: P) -> EnviResult<Self> {
        log::debug!("Opening raster with GDAL: {}", path.as_ref().display());
        let dataset = Dataset::open(path.as_ref())?;
        Ok(Self { dataset })
    }
}

/// GDAL data type names to the raster-library dtype convention
fn dtype_name(gdal_name: &str) -> String {
    match gdal_name {
        "Byte" => "uint8",
        "Int8" => "int8",
        "UInt16" => "uint16",
        "Int16" => "int16",
        "UInt32" => "uint32",
        "Int32" => "int32",
        "UInt64" => "uint64",
        "Int64" => "int64",
        "Float32" => "float32",
        "Float64" => "float64",
        "CInt16" => "complex_int16",
        "CInt32" => "complex_int32",
        "CFloat32" => "complex64",
        "CFloat64" => "complex128",
        other => other,
    }
    .to_string()
}

impl RasterSource for GdalRaster {
    fn size(&self) -> (usize, usize) {
        self.dataset.raster_size()
    }

    fn band_count(&self) -> usize {
        self.dataset.raster_count() as usize
    }

    fn crs(&self) -> String {
        match self.dataset.spatial_ref() {
            Ok(srs) => match (srs.auth_name(), srs.auth_code()) {
                (Ok(name), Ok(code)) => format!("{}:{}", name, code),
                _ => srs.to_proj4().unwrap_or_default(),
            },
            Err(e) => {
                log::warn!("Raster has no usable spatial reference: {}", e);
                String::new()
            }
        }
    }

    fn crs_wkt(&self) -> String {
        self.dataset.projection()
    }

    fn geo_transform(&self) -> EnviResult<GeoTransform> {
        Ok(GeoTransform::from_gdal(self.dataset.geo_transform()?))
    }

    fn dtypes(&self) -> Vec<String> {
        (1..=self.band_count())
            .map(|index| match self.dataset.rasterband(index as isize) {
                Ok(band) => dtype_name(&band.band_type().name()),
                Err(_) => String::new(),
            })
            .collect()
    }

    fn band_descriptions(&self) -> Vec<Option<String>> {
        (1..=self.band_count())
            .map(|index| {
                self.dataset
                    .rasterband(index as isize)
                    .and_then(|band| band.description())
                    .ok()
                    .filter(|description| !description.is_empty())
            })
            .collect()
    }

    fn metadata_item(&self, key: &str) -> Option<String> {
        self.dataset.metadata_item(key, "")
    }

    fn read_band(&self, band: usize) -> EnviResult<Array2<Sample>> {
        let (width, height) = self.size();
        let rasterband = self.dataset.rasterband(band as isize)?;
        let data = rasterband.read_as_array::<Sample>((0, 0), (width, height), (width, height), None)?;
        Ok(data)
    }
}

/// Opens rasters with GDAL
#[derive(Debug, Clone, Copy, Default)]
pub struct GdalDriver;

impl RasterDriver for GdalDriver {
    fn open(&self, path: &Path) -> EnviResult<Box<dyn RasterSource>> {
        Ok(Box::new(GdalRaster::open(path)?))
    }
}
