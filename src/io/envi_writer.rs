use crate::core::interleave::PixelCube;
use crate::core::metadata::EnviMetadata;
use crate::types::{ByteOrder, CubeData, EnviError, EnviResult, Sample, SampleFormat};
use byteorder::{BigEndian, LittleEndian, WriteBytesExt};
use num_traits::NumCast;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

fn cast<T: NumCast>(value: Sample, format: SampleFormat) -> EnviResult<T> {
    T::from(value).ok_or_else(|| {
        EnviError::InvalidFormat(format!("Sample {} does not fit {:?}", value, format))
    })
}

fn write_with_order<B: byteorder::ByteOrder, W: Write>(
    writer: &mut W,
    data: &CubeData,
    format: SampleFormat,
) -> EnviResult<()> {
    for &value in data.iter() {
        match format {
            SampleFormat::UInt8 => writer.write_u8(cast(value, format)?)?,
            SampleFormat::Int8 => writer.write_i8(cast(value, format)?)?,
            SampleFormat::Int16 => writer.write_i16::<B>(cast(value, format)?)?,
            SampleFormat::UInt16 => writer.write_u16::<B>(cast(value, format)?)?,
            SampleFormat::Int32 => writer.write_i32::<B>(cast(value, format)?)?,
            SampleFormat::UInt32 => writer.write_u32::<B>(cast(value, format)?)?,
            SampleFormat::Int64 => writer.write_i64::<B>(cast(value, format)?)?,
            SampleFormat::UInt64 => writer.write_u64::<B>(cast(value, format)?)?,
            SampleFormat::Float32 => writer.write_f32::<B>(value as f32)?,
            SampleFormat::Float64 => writer.write_f64::<B>(value)?,
        }
    }
    Ok(())
}

/// Write cube samples in their logical (= physical, after transpose) order,
/// encoded as `format` with `byte_order`
pub fn write_samples<W: Write>(
    writer: &mut W,
    cube: &PixelCube,
    format: SampleFormat,
    byte_order: ByteOrder,
) -> EnviResult<()> {
    match byte_order {
        ByteOrder::Msf => write_with_order::<BigEndian, W>(writer, cube.data(), format),
        ByteOrder::Lsf => write_with_order::<LittleEndian, W>(writer, cube.data(), format),
        ByteOrder::Unknown => {
            log::warn!("Byte order unknown, writing raw data least significant byte first");
            write_with_order::<LittleEndian, W>(writer, cube.data(), format)
        }
    }
}

/// Header-free raw payload as bytes
pub fn encode_cube(cube: &PixelCube, format: SampleFormat, byte_order: ByteOrder) -> EnviResult<Vec<u8>> {
    let mut bytes = Vec::with_capacity(format.size() * cube.data().len());
    write_samples(&mut bytes, cube, format, byte_order)?;
    Ok(bytes)
}

/// Fail unless `path` is absent or a regular file that can be replaced
fn check_target(path: &Path) -> EnviResult<()> {
    if path.exists() && !path.is_file() {
        return Err(EnviError::InvalidFormat(format!(
            "Output path {} exists and is not a file",
            path.display()
        )));
    }
    Ok(())
}

/// Paths of a written header/raw pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnviOutput {
    pub header_path: PathBuf,
    pub raw_path: PathBuf,
}

/// Writes an ENVI header and its raw payload side by side.
///
/// Both files are staged as temporary files in the destination directory and
/// only renamed into place once both are complete.
#[derive(Debug, Clone)]
pub struct EnviWriter {
    raw_extension: String,
}

impl Default for EnviWriter {
    fn default() -> Self {
        Self {
            raw_extension: "raw".to_string(),
        }
    }
}

impl EnviWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_raw_extension(mut self, extension: impl Into<String>) -> Self {
        self.raw_extension = extension.into();
        self
    }

    /// Raw payload path belonging to a header path
    pub fn raw_path_for(&self, header_path: &Path) -> PathBuf {
        header_path.with_extension(&self.raw_extension)
    }

    pub fn write(
        &self,
        header_path: &Path,
        metadata: &EnviMetadata,
        cube: &PixelCube,
    ) -> EnviResult<EnviOutput> {
        cube.check_dimensions(&metadata.dimensions())?;
        if cube.interleave() != metadata.interleave() {
            return Err(EnviError::DimensionMismatch(format!(
                "Cube is {} but header declares {}",
                cube.interleave(),
                metadata.interleave()
            )));
        }

        let raw_path = self.raw_path_for(header_path);
        check_target(header_path)?;
        check_target(&raw_path)?;
        let directory = match header_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        log::info!("Saving {}...", header_path.display());
        let mut raw_file = NamedTempFile::new_in(&directory)?;
        {
            let mut writer = BufWriter::new(raw_file.as_file_mut());
            write_samples(&mut writer, cube, metadata.sample_format(), metadata.byte_order())?;
            writer.flush()?;
        }

        let mut header_file = NamedTempFile::new_in(&directory)?;
        header_file.write_all(metadata.to_header_string().as_bytes())?;
        header_file.flush()?;

        raw_file.persist(&raw_path).map_err(|e| EnviError::Io(e.error))?;
        if let Err(e) = header_file.persist(header_path) {
            // the pair is committed together or not at all
            if let Err(cleanup) = std::fs::remove_file(&raw_path) {
                log::error!("Could not remove {}: {}", raw_path.display(), cleanup);
            }
            return Err(EnviError::Io(e.error));
        }
        log::debug!("Wrote {} and {}", header_path.display(), raw_path.display());

        Ok(EnviOutput {
            header_path: header_path.to_path_buf(),
            raw_path,
        })
    }
}
