use ndarray::Array3;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Sample value held in memory while a cube is being converted
pub type Sample = f64;

/// 3D sample array; axis meaning depends on the cube's interleave tag
pub type CubeData = Array3<Sample>;

/// Dimension a cube axis carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CubeAxis {
    Band,
    Line,
    Sample,
}

/// Physical axis order of a multi-band cube
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interleave {
    /// Band sequential: (band, line, sample)
    Bsq,
    /// Band interleaved by line: (line, band, sample)
    Bil,
    /// Band interleaved by pixel: (line, sample, band)
    Bip,
}

impl Interleave {
    pub const ALL: [Interleave; 3] = [Interleave::Bsq, Interleave::Bil, Interleave::Bip];

    /// Axis labels in physical order
    pub fn axes(self) -> [CubeAxis; 3] {
        match self {
            Interleave::Bsq => [CubeAxis::Band, CubeAxis::Line, CubeAxis::Sample],
            Interleave::Bil => [CubeAxis::Line, CubeAxis::Band, CubeAxis::Sample],
            Interleave::Bip => [CubeAxis::Line, CubeAxis::Sample, CubeAxis::Band],
        }
    }

    /// Position of the band axis
    pub fn band_axis(self) -> usize {
        match self {
            Interleave::Bsq => 0,
            Interleave::Bil => 1,
            Interleave::Bip => 2,
        }
    }

    /// Header token
    pub fn as_str(self) -> &'static str {
        match self {
            Interleave::Bsq => "bsq",
            Interleave::Bil => "bil",
            Interleave::Bip => "bip",
        }
    }
}

impl std::fmt::Display for Interleave {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Interleave {
    type Err = EnviError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bsq" => Ok(Interleave::Bsq),
            "bil" => Ok(Interleave::Bil),
            "bip" => Ok(Interleave::Bip),
            _ => Err(EnviError::Config(format!("Invalid interleave: {}", s))),
        }
    }
}

/// Endianness of multi-byte samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ByteOrder {
    /// Least significant byte first (TIFF "II")
    Lsf,
    /// Most significant byte first (TIFF "MM")
    Msf,
    Unknown,
}

impl ByteOrder {
    /// ENVI header code
    pub fn code(self) -> i32 {
        match self {
            ByteOrder::Lsf => 0,
            ByteOrder::Msf => 1,
            ByteOrder::Unknown => -1,
        }
    }

    /// Match a TIFF byte-order marker
    pub fn from_marker(marker: &[u8]) -> Self {
        match marker {
            b"II" => ByteOrder::Lsf,
            b"MM" => ByteOrder::Msf,
            _ => ByteOrder::Unknown,
        }
    }
}

/// ENVI data type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    Unknown,
    Byte,
    Int16,
    Int32,
    Float32,
    Float64,
    Complex,
    Complex64,
    UInt16,
    UInt32,
    Int64,
    UInt64,
}

impl DataType {
    /// ENVI header code (1-15, -1 for unknown)
    pub fn code(self) -> i32 {
        match self {
            DataType::Unknown => -1,
            DataType::Byte => 1,
            DataType::Int16 => 2,
            DataType::Int32 => 3,
            DataType::Float32 => 4,
            DataType::Float64 => 5,
            DataType::Complex => 6,
            DataType::Complex64 => 9,
            DataType::UInt16 => 12,
            DataType::UInt32 => 13,
            DataType::Int64 => 14,
            DataType::UInt64 => 15,
        }
    }

    /// Map a native dtype name to the ENVI enumeration.
    ///
    /// Names follow the raster library convention (`uint8`, `int16`,
    /// `float32`, ...). Unmapped names resolve to [`DataType::Unknown`].
    pub fn from_dtype(dtype: &str) -> Self {
        match dtype {
            "byte" | "uint8" => DataType::Byte,
            "int16" => DataType::Int16,
            "int32" => DataType::Int32,
            "float32" => DataType::Float32,
            "float64" => DataType::Float64,
            "complex" => DataType::Complex,
            "complex64" => DataType::Complex64,
            "uint16" => DataType::UInt16,
            "uint32" => DataType::UInt32,
            "int64" => DataType::Int64,
            "uint64" => DataType::UInt64,
            _ => DataType::Unknown,
        }
    }
}

/// Binary encoding of one raw sample.
///
/// Usually follows the declared [`DataType`], but also covers native types
/// without an ENVI code (`int8`), whose header then declares unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SampleFormat {
    UInt8,
    Int8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Float32,
    Float64,
}

impl SampleFormat {
    /// Encoding of an ENVI data type; complex and unknown types have none
    pub fn for_data_type(data_type: DataType) -> Option<Self> {
        match data_type {
            DataType::Byte => Some(SampleFormat::UInt8),
            DataType::Int16 => Some(SampleFormat::Int16),
            DataType::UInt16 => Some(SampleFormat::UInt16),
            DataType::Int32 => Some(SampleFormat::Int32),
            DataType::UInt32 => Some(SampleFormat::UInt32),
            DataType::Int64 => Some(SampleFormat::Int64),
            DataType::UInt64 => Some(SampleFormat::UInt64),
            DataType::Float32 => Some(SampleFormat::Float32),
            DataType::Float64 => Some(SampleFormat::Float64),
            DataType::Complex | DataType::Complex64 | DataType::Unknown => None,
        }
    }

    /// Encoding of a native dtype name
    pub fn from_dtype(dtype: &str) -> Option<Self> {
        match dtype {
            "int8" => Some(SampleFormat::Int8),
            other => Self::for_data_type(DataType::from_dtype(other)),
        }
    }

    pub fn size(self) -> usize {
        match self {
            SampleFormat::UInt8 | SampleFormat::Int8 => 1,
            SampleFormat::Int16 | SampleFormat::UInt16 => 2,
            SampleFormat::Int32 | SampleFormat::UInt32 | SampleFormat::Float32 => 4,
            SampleFormat::Int64 | SampleFormat::UInt64 | SampleFormat::Float64 => 8,
        }
    }
}

/// Raster dimensions, independent of axis order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub bands: usize,
    pub lines: usize,
    pub samples: usize,
}

impl Dimensions {
    pub fn new(bands: usize, lines: usize, samples: usize) -> Self {
        Self { bands, lines, samples }
    }

    fn extent(&self, axis: CubeAxis) -> usize {
        match axis {
            CubeAxis::Band => self.bands,
            CubeAxis::Line => self.lines,
            CubeAxis::Sample => self.samples,
        }
    }

    /// Array shape these dimensions take under an interleave
    pub fn shape_for(&self, interleave: Interleave) -> [usize; 3] {
        interleave.axes().map(|axis| self.extent(axis))
    }

    /// Total number of samples in the cube
    pub fn len(&self) -> usize {
        self.bands * self.lines * self.samples
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Geospatial transformation parameters (GDAL affine order)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoTransform {
    pub top_left_x: f64,
    pub pixel_width: f64,
    pub rotation_x: f64,
    pub top_left_y: f64,
    pub rotation_y: f64,
    pub pixel_height: f64,
}

impl GeoTransform {
    pub fn from_gdal(coefficients: [f64; 6]) -> Self {
        Self {
            top_left_x: coefficients[0],
            pixel_width: coefficients[1],
            rotation_x: coefficients[2],
            top_left_y: coefficients[3],
            rotation_y: coefficients[4],
            pixel_height: coefficients[5],
        }
    }
}

impl Default for GeoTransform {
    /// Pixel grid with no georeferencing
    fn default() -> Self {
        Self::from_gdal([0.0, 1.0, 0.0, 0.0, 0.0, 1.0])
    }
}

/// Sensor families with an adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sensor {
    EnMap,
    Hyperion,
    Pixxel,
    WorldView3,
}

impl std::fmt::Display for Sensor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sensor::EnMap => write!(f, "EnMAP"),
            Sensor::Hyperion => write!(f, "Hyperion"),
            Sensor::Pixxel => write!(f, "Pixxel"),
            Sensor::WorldView3 => write!(f, "WorldView-3"),
        }
    }
}

/// Error types for ENVI conversion
#[derive(Debug, thiserror::Error)]
pub enum EnviError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Unknown interleave: array shape {shape:?} matches no single layout of {dims:?}")]
    UnknownInterleave { shape: Vec<usize>, dims: Dimensions },

    #[error("Band {0} has no entry in the calibration table")]
    UnmappedBand(String),

    #[error("Band count mismatch: {field} has {found} values for {bands} bands")]
    BandCountMismatch {
        field: &'static str,
        found: usize,
        bands: usize,
    },

    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    #[error("Degenerate statistics: {0}")]
    DegenerateStatistics(String),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("Metadata error: {0}")]
    Metadata(String),

    #[error("XML parsing error: {0}")]
    XmlParsing(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[cfg(feature = "gdal")]
    #[error("GDAL error: {0}")]
    Gdal(#[from] gdal::errors::GdalError),
}

/// Result type for conversion operations
pub type EnviResult<T> = Result<T, EnviError>;
