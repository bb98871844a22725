//! Core conversion modules

pub mod interleave;
pub mod radiometry;
pub mod metadata;
pub mod convert;

// Re-export main types
pub use interleave::{PixelCube, resolve_source_interleave, permutation, transpose};
pub use radiometry::{Radiometry, scale_bands, normalize_zscore, remap_fixed_point};
pub use metadata::{EnviMetadata, EnviMetadataBuilder, BandCountIssue};
pub use convert::{ConvertOptions, Conversion, Converter, convert};
