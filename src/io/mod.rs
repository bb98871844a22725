//! Raster access, band tables, sensor adapters and the ENVI writer

pub mod raster;
#[cfg(feature = "gdal")]
pub mod gdal_raster;
mod calibration_tables;
pub mod band_table;
pub mod sensor;
pub mod hyperion;
pub mod enmap;
pub mod pixxel;
pub mod worldview;
pub mod envi_writer;

pub use raster::{RasterSource, RasterDriver, MemoryRaster, MemoryDriver, sniff_byte_order};
#[cfg(feature = "gdal")]
pub use gdal_raster::{GdalRaster, GdalDriver};
pub use band_table::{BandTable, BandRecord, DynamicRange, ScaleTable};
pub use sensor::{SensorAdapter, Extraction, compose_map_info};
pub use hyperion::HyperionAdapter;
pub use enmap::{EnMapAdapter, EnMapMetadataParser};
pub use pixxel::{PixxelAdapter, PixxelMetadataParser};
pub use worldview::WorldView3Adapter;
pub use envi_writer::{EnviWriter, EnviOutput, encode_cube};
