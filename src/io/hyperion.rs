use crate::core::radiometry::Radiometry;
use crate::io::band_table::{BandTable, ScaleTable};
use crate::io::raster::{MemoryRaster, RasterDriver, RasterSource};
use crate::io::sensor::{
    read_native_cube, read_native_metadata, require_file, spectral_sequences, Extraction,
    SensorAdapter,
};
use crate::types::{EnviError, EnviResult, Sensor};
use ndarray::{Array3, Axis};
use std::path::{Path, PathBuf};

/// EO-1 Hyperion adapter.
///
/// Accepts either one multi-band GeoTIFF or a directory holding one GeoTIFF
/// per band. Band keys come from the band descriptions, falling back to the
/// band position.
pub struct HyperionAdapter<'a, D: RasterDriver> {
    driver: &'a D,
    source: PathBuf,
    bands: &'a BandTable,
    scaling: &'a ScaleTable,
}

/// Single-band files stacked into one in-memory raster
pub struct MergedBands {
    pub raster: MemoryRaster,
    /// Name the merged raster is known by (`_B001_` replaced by `_MERGED_`)
    pub merged_path: PathBuf,
    /// First band file, used for byte-order detection
    pub first_file: PathBuf,
}

impl<'a, D: RasterDriver> HyperionAdapter<'a, D> {
    pub fn new<P: AsRef<Path>>(
        driver: &'a D,
        source: P,
        bands: &'a BandTable,
        scaling: &'a ScaleTable,
    ) -> Self {
        Self {
            driver,
            source: source.as_ref().to_path_buf(),
            bands,
            scaling,
        }
    }

    /// Sorted `*.tif` files in the source directory
    fn band_files(&self) -> EnviResult<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(&self.source)? {
            let path = entry?.path();
            let is_tif = path
                .extension()
                .map(|ext| ext.eq_ignore_ascii_case("tif"))
                .unwrap_or(false);
            if is_tif && path.is_file() {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }

    /// Stack the band files that have a calibration entry into one raster.
    ///
    /// The n-th file (sorted by name) is band `B%03d` of n; files whose key is
    /// missing from the table are left out.
    pub fn merge_band_files(&self) -> EnviResult<MergedBands> {
        log::info!("Found directory, merging band files...");
        let paths = self.band_files()?;
        let first_file = paths.first().cloned().ok_or_else(|| {
            EnviError::InvalidFormat(format!(
                "No .tif band files in {}",
                self.source.display()
            ))
        })?;

        let selected: Vec<(String, &PathBuf)> = paths
            .iter()
            .enumerate()
            .map(|(i, path)| (BandTable::band_key(i + 1), path))
            .filter(|(key, _)| self.bands.contains(key))
            .collect();
        if selected.is_empty() {
            return Err(EnviError::InvalidFormat(format!(
                "None of the {} band files in {} has a calibration entry",
                paths.len(),
                self.source.display()
            )));
        }

        let reference = self.driver.open(&first_file)?;
        let (width, height) = reference.size();
        let mut cube = Array3::zeros((selected.len(), height, width));

        for ((key, path), mut slot) in selected.iter().zip(cube.axis_iter_mut(Axis(0))) {
            log::info!("Merging band: {}...", key);
            let band = self.driver.open(path)?.read_band(1)?;
            if band.dim() != (height, width) {
                return Err(EnviError::DimensionMismatch(format!(
                    "{} is {:?}, expected {:?}",
                    path.display(),
                    band.dim(),
                    (height, width)
                )));
            }
            slot.assign(&band.mapv(|x| x as f32 as f64));
        }

        let descriptions = selected.iter().map(|(key, _)| Some(key.clone())).collect();
        let raster = MemoryRaster::new(cube, "float32")
            .with_crs(reference.crs(), reference.crs_wkt())
            .with_geo_transform(reference.geo_transform()?)
            .with_descriptions(descriptions);

        let merged_path = PathBuf::from(first_file.to_string_lossy().replace("_B001_", "_MERGED_"));
        log::info!("Merged {} bands as {}", selected.len(), merged_path.display());

        Ok(MergedBands {
            raster,
            merged_path,
            first_file,
        })
    }
}

impl<'a, D: RasterDriver> SensorAdapter for HyperionAdapter<'a, D> {
    fn sensor(&self) -> Sensor {
        Sensor::Hyperion
    }

    fn extract(&self) -> EnviResult<Extraction> {
        if !self.source.exists() {
            return Err(EnviError::InputNotFound(self.source.clone()));
        }

        let (raster, source_path, primary_file): (Box<dyn RasterSource>, PathBuf, PathBuf) =
            if self.source.is_dir() {
                let merged = self.merge_band_files()?;
                (Box::new(merged.raster), merged.merged_path, merged.first_file)
            } else {
                require_file(&self.source)?;
                (
                    self.driver.open(&self.source)?,
                    self.source.clone(),
                    self.source.clone(),
                )
            };

        log::info!("Converting metadata...");
        let native = read_native_metadata(raster.as_ref(), &primary_file)?;

        let keys: Vec<String> = raster
            .band_descriptions()
            .into_iter()
            .enumerate()
            .map(|(i, description)| {
                description
                    .filter(|d| !d.is_empty())
                    .unwrap_or_else(|| BandTable::band_key(i + 1))
            })
            .collect();
        let records = self.bands.resolve(&keys)?;
        let (wavelength, fwhm) = spectral_sequences(&records);
        let radiometry = Radiometry::BandScale(self.scaling.divisors(&records));

        let metadata = native
            .into_builder(&radiometry)
            .wavelength(wavelength)
            .fwhm(fwhm)
            .wavelength_units("nm")
            .sensor(Sensor::Hyperion)
            .build()?;
        metadata.report_band_count_issues();
        log::info!("Metadata converted.");

        let cube = read_native_cube(raster.as_ref())?;

        Ok(Extraction {
            metadata,
            cube,
            radiometry,
            source_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::raster::MemoryDriver;
    use crate::types::{DataType, GeoTransform};
    use ndarray::Array3;
    use std::fs;

    fn band_raster(value: f64) -> MemoryRaster {
        MemoryRaster::new(Array3::from_elem((1, 2, 3), value), "int16")
            .with_crs("EPSG:32610", "PROJCS[\"WGS 84 / UTM zone 10N\"]")
            .with_geo_transform(GeoTransform::from_gdal([100.0, 30.0, 0.0, 200.0, 0.0, -30.0]))
    }

    #[test]
    fn test_merge_filters_uncalibrated_bands() {
        let dir = tempfile::tempdir().unwrap();
        let mut driver = MemoryDriver::new();
        // B001..B009: only B008 and B009 are in the table
        for i in 1..=9 {
            let path = dir.path().join(format!("EO1H_B{:03}_L1T.TIF", i));
            fs::write(&path, b"II*\0").unwrap();
            driver.insert(path, band_raster(i as f64));
        }
        fs::write(dir.path().join("README.txt"), b"not a band").unwrap();

        let table = BandTable::hyperion();
        let scaling = ScaleTable::hyperion();
        let adapter = HyperionAdapter::new(&driver, dir.path(), &table, &scaling);
        let merged = adapter.merge_band_files().unwrap();

        assert_eq!(merged.raster.band_count(), 2);
        assert_eq!(
            merged.raster.band_descriptions(),
            vec![Some("B008".to_string()), Some("B009".to_string())]
        );
        assert_eq!(merged.raster.read_band(1).unwrap()[[0, 0]], 8.0);
        assert_eq!(merged.merged_path, dir.path().join("EO1H_MERGED_L1T.TIF"));
        assert_eq!(merged.first_file, dir.path().join("EO1H_B001_L1T.TIF"));
    }

    #[test]
    fn test_extract_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.tif");
        fs::write(&path, b"MM\0*").unwrap();

        let data = Array3::from_shape_fn((2, 3, 4), |(b, _, _)| (b + 1) as f64 * 40.0);
        let raster = MemoryRaster::new(data, "float32")
            .with_descriptions(vec![Some("B010".to_string()), Some("B100".to_string())]);
        let mut driver = MemoryDriver::new();
        driver.insert(&path, raster);

        let table = BandTable::hyperion();
        let scaling = ScaleTable::hyperion();
        let extraction = HyperionAdapter::new(&driver, &path, &table, &scaling)
            .extract()
            .unwrap();

        let metadata = &extraction.metadata;
        assert_eq!(metadata.bands(), 2);
        assert_eq!(metadata.lines(), 3);
        assert_eq!(metadata.samples(), 4);
        assert_eq!(metadata.data_type(), DataType::Float32);
        assert_eq!(metadata.byte_order().code(), 1);
        assert_eq!(metadata.sensor_type(), "Hyperion");
        assert_eq!(metadata.wavelength().len(), 2);
        assert_eq!(extraction.radiometry, Radiometry::BandScale(vec![40.0, 80.0]));
        assert_eq!(extraction.source_path, path);
    }

    #[test]
    fn test_extract_unmapped_description_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.tif");
        fs::write(&path, b"II*\0").unwrap();

        let raster = MemoryRaster::new(Array3::zeros((1, 2, 3)), "float32");
        let mut driver = MemoryDriver::new();
        driver.insert(&path, raster);

        // no description: falls back to B001, which is not calibrated
        let table = BandTable::hyperion();
        let scaling = ScaleTable::hyperion();
        let result = HyperionAdapter::new(&driver, &path, &table, &scaling).extract();
        assert!(matches!(result, Err(EnviError::UnmappedBand(key)) if key == "B001"));
    }

    #[test]
    fn test_missing_source() {
        let driver = MemoryDriver::new();
        let table = BandTable::hyperion();
        let scaling = ScaleTable::hyperion();
        let adapter = HyperionAdapter::new(&driver, "/no/such/scene.tif", &table, &scaling);
        assert!(matches!(adapter.extract(), Err(EnviError::InputNotFound(_))));
    }
}
