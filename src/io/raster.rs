use crate::types::{ByteOrder, CubeData, Dimensions, EnviError, EnviResult, GeoTransform, Sample};
use ndarray::{Array2, Array3, Axis};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Read access to a georeferenced multi-band raster
pub trait RasterSource {
    /// Raster size as (width, height)
    fn size(&self) -> (usize, usize);

    fn band_count(&self) -> usize;

    /// Short coordinate reference identifier, e.g. `EPSG:32633`
    fn crs(&self) -> String;

    /// Coordinate reference system as WKT
    fn crs_wkt(&self) -> String;

    fn geo_transform(&self) -> EnviResult<GeoTransform>;

    /// Native sample type name of every band (`uint8`, `int16`, `float32`, ...)
    fn dtypes(&self) -> Vec<String>;

    /// Per-band description, `None` where unset
    fn band_descriptions(&self) -> Vec<Option<String>>;

    /// Dataset-level metadata item from the default domain
    fn metadata_item(&self, key: &str) -> Option<String>;

    /// Read one band (1-based) as a (lines, samples) array
    fn read_band(&self, band: usize) -> EnviResult<Array2<Sample>>;

    fn dimensions(&self) -> Dimensions {
        let (width, height) = self.size();
        Dimensions::new(self.band_count(), height, width)
    }

    /// Read every band into a band-sequential (bands, lines, samples) array
    fn read_all(&self) -> EnviResult<CubeData> {
        let dims = self.dimensions();
        let mut cube = Array3::zeros((dims.bands, dims.lines, dims.samples));

        for (index, mut slot) in cube.axis_iter_mut(Axis(0)).enumerate() {
            let band = self.read_band(index + 1)?;
            if band.dim() != (dims.lines, dims.samples) {
                return Err(EnviError::DimensionMismatch(format!(
                    "Band {} is {:?}, raster is {} x {}",
                    index + 1,
                    band.dim(),
                    dims.lines,
                    dims.samples
                )));
            }
            slot.assign(&band);
        }

        Ok(cube)
    }
}

/// Opens rasters by path
pub trait RasterDriver {
    fn open(&self, path: &Path) -> EnviResult<Box<dyn RasterSource>>;
}

/// Read the first two bytes of a file and match them against the TIFF
/// byte-order markers
pub fn sniff_byte_order<P: AsRef<Path>>(path: P) -> EnviResult<ByteOrder> {
    let path = path.as_ref();
    let mut marker = Vec::with_capacity(2);
    File::open(path)?.take(2).read_to_end(&mut marker)?;

    let byte_order = ByteOrder::from_marker(&marker);
    if byte_order == ByteOrder::Unknown {
        log::warn!(
            "Unrecognised byte-order marker {:02X?} in {}",
            marker,
            path.display()
        );
    }
    Ok(byte_order)
}

/// Raster held entirely in memory
#[derive(Debug, Clone)]
pub struct MemoryRaster {
    data: CubeData,
    dtype: String,
    crs: String,
    crs_wkt: String,
    geo_transform: GeoTransform,
    descriptions: Vec<Option<String>>,
    metadata: HashMap<String, String>,
}

impl MemoryRaster {
    /// Wrap a band-sequential array whose samples are all of `dtype`
    pub fn new(data: CubeData, dtype: impl Into<String>) -> Self {
        let bands = data.len_of(Axis(0));
        Self {
            data,
            dtype: dtype.into(),
            crs: String::new(),
            crs_wkt: String::new(),
            geo_transform: GeoTransform::default(),
            descriptions: vec![None; bands],
            metadata: HashMap::new(),
        }
    }

    pub fn with_crs(mut self, crs: impl Into<String>, wkt: impl Into<String>) -> Self {
        self.crs = crs.into();
        self.crs_wkt = wkt.into();
        self
    }

    pub fn with_geo_transform(mut self, geo_transform: GeoTransform) -> Self {
        self.geo_transform = geo_transform;
        self
    }

    pub fn with_descriptions(mut self, descriptions: Vec<Option<String>>) -> Self {
        self.descriptions = descriptions;
        self
    }

    pub fn with_metadata_item(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

impl RasterSource for MemoryRaster {
    fn size(&self) -> (usize, usize) {
        let (_, height, width) = self.data.dim();
        (width, height)
    }

    fn band_count(&self) -> usize {
        self.data.len_of(Axis(0))
    }

    fn crs(&self) -> String {
        self.crs.clone()
    }

    fn crs_wkt(&self) -> String {
        self.crs_wkt.clone()
    }

    fn geo_transform(&self) -> EnviResult<GeoTransform> {
        Ok(self.geo_transform)
    }

    fn dtypes(&self) -> Vec<String> {
        vec![self.dtype.clone(); self.band_count()]
    }

    fn band_descriptions(&self) -> Vec<Option<String>> {
        self.descriptions.clone()
    }

    fn metadata_item(&self, key: &str) -> Option<String> {
        self.metadata.get(key).cloned()
    }

    fn read_band(&self, band: usize) -> EnviResult<Array2<Sample>> {
        if band == 0 || band > self.band_count() {
            return Err(EnviError::InvalidFormat(format!(
                "Band {} out of range 1..={}",
                band,
                self.band_count()
            )));
        }
        Ok(self.data.index_axis(Axis(0), band - 1).to_owned())
    }

    fn read_all(&self) -> EnviResult<CubeData> {
        Ok(self.data.clone())
    }
}

/// Driver serving [`MemoryRaster`]s registered under a path
#[derive(Debug, Clone, Default)]
pub struct MemoryDriver {
    rasters: HashMap<PathBuf, MemoryRaster>,
}

impl MemoryDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<P: Into<PathBuf>>(&mut self, path: P, raster: MemoryRaster) {
        self.rasters.insert(path.into(), raster);
    }
}

impl RasterDriver for MemoryDriver {
    fn open(&self, path: &Path) -> EnviResult<Box<dyn RasterSource>> {
        let raster = self
            .rasters
            .get(path)
            .ok_or_else(|| EnviError::InputNotFound(path.to_path_buf()))?;
        Ok(Box::new(raster.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_bytes(bytes: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file
    }

    #[test]
    fn test_sniff_byte_order() {
        let little = write_bytes(&[0x49, 0x49, 0x2A, 0x00]);
        let big = write_bytes(&[0x4D, 0x4D, 0x00, 0x2A]);
        let other = write_bytes(&[0x89, 0x50, 0x4E, 0x47]);
        let short = write_bytes(&[0x49]);

        assert_eq!(sniff_byte_order(little.path()).unwrap(), ByteOrder::Lsf);
        assert_eq!(sniff_byte_order(big.path()).unwrap(), ByteOrder::Msf);
        assert_eq!(sniff_byte_order(other.path()).unwrap(), ByteOrder::Unknown);
        assert_eq!(sniff_byte_order(short.path()).unwrap(), ByteOrder::Unknown);
    }

    #[test]
    fn test_default_read_all_stacks_bands() {
        struct TwoBands;

        impl RasterSource for TwoBands {
            fn size(&self) -> (usize, usize) {
                (3, 2)
            }
            fn band_count(&self) -> usize {
                2
            }
            fn crs(&self) -> String {
                String::new()
            }
            fn crs_wkt(&self) -> String {
                String::new()
            }
            fn geo_transform(&self) -> EnviResult<GeoTransform> {
                Ok(GeoTransform::default())
            }
            fn dtypes(&self) -> Vec<String> {
                vec!["int16".to_string(); 2]
            }
            fn band_descriptions(&self) -> Vec<Option<String>> {
                vec![None, None]
            }
            fn metadata_item(&self, _key: &str) -> Option<String> {
                None
            }
            fn read_band(&self, band: usize) -> EnviResult<Array2<Sample>> {
                Ok(Array2::from_elem((2, 3), band as f64))
            }
        }

        let cube = TwoBands.read_all().unwrap();
        assert_eq!(cube.dim(), (2, 2, 3));
        assert_eq!(cube[[0, 1, 2]], 1.0);
        assert_eq!(cube[[1, 0, 0]], 2.0);
    }

    #[test]
    fn test_memory_driver_missing_path() {
        let driver = MemoryDriver::new();
        assert!(matches!(
            driver.open(Path::new("missing.tif")),
            Err(EnviError::InputNotFound(_))
        ));
    }
}
