//! envi-convert: multi-band satellite GeoTIFF to ENVI converter
//!
//! Reads EnMAP, EO-1 Hyperion, Pixxel and WorldView-3 scenes, resolves their
//! spectral metadata and writes an ENVI header plus a raw cube in BSQ, BIL or
//! BIP order.

pub mod types;
pub mod io;
pub mod core;

// Re-export main types and functions for easier access
pub use types::{
    ByteOrder, DataType, Dimensions, EnviError, EnviResult, GeoTransform, Interleave, SampleFormat,
    Sensor,
};

pub use crate::core::{ConvertOptions, Conversion, Converter, EnviMetadata, PixelCube, convert};
pub use io::{BandTable, EnviWriter, ScaleTable, SensorAdapter};
