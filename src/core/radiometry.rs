use crate::core::interleave::PixelCube;
use crate::types::{DataType, EnviError, EnviResult, Sample, SampleFormat};
use ndarray::Axis;

/// Numeric transform applied to a cube after it reaches its target interleave.
///
/// The variants are mutually exclusive; one conversion run applies exactly one.
#[derive(Debug, Clone, PartialEq)]
pub enum Radiometry {
    /// Samples are written as read
    Native,
    /// Divide each band by its own divisor (one per band, in band order)
    BandScale(Vec<f64>),
    /// Whole-cube z-score, then min/max stretch into [0, 1]
    ZScore,
    /// `(x + offset) / divisor`
    FixedPoint { offset: f64, divisor: f64 },
}

impl Radiometry {
    /// EnMAP style signed-to-unsigned fraction remap
    pub const SIGNED_16_TO_UNIT: Radiometry = Radiometry::FixedPoint {
        offset: 32768.0,
        divisor: 65535.0,
    };

    /// Data type the cube should be written as after this transform
    pub fn output_data_type(&self, native: DataType) -> DataType {
        match self {
            Radiometry::Native => native,
            _ => DataType::Float32,
        }
    }

    /// Raw encoding matching [`Radiometry::output_data_type`]
    pub fn output_format(&self, native: Option<SampleFormat>) -> Option<SampleFormat> {
        match self {
            Radiometry::Native => native,
            _ => Some(SampleFormat::Float32),
        }
    }

    /// Apply to a cube in place
    pub fn apply(&self, cube: &mut PixelCube) -> EnviResult<()> {
        match self {
            Radiometry::Native => Ok(()),
            Radiometry::BandScale(divisors) => scale_bands(cube, divisors),
            Radiometry::ZScore => normalize_zscore(cube),
            Radiometry::FixedPoint { offset, divisor } => remap_fixed_point(cube, *offset, *divisor),
        }
    }
}

/// Divide every sample of band `b` by `divisors[b]`.
///
/// The band slice is taken along the band axis of the cube's current
/// interleave, so this is valid before or after any transpose.
pub fn scale_bands(cube: &mut PixelCube, divisors: &[f64]) -> EnviResult<()> {
    let band_axis = cube.interleave().band_axis();
    let bands = cube.shape()[band_axis];

    if divisors.len() != bands {
        return Err(EnviError::BandCountMismatch {
            field: "scale divisors",
            found: divisors.len(),
            bands,
        });
    }
    if let Some(bad) = divisors.iter().position(|d| *d == 0.0 || !d.is_finite()) {
        return Err(EnviError::Processing(format!(
            "Band {} has invalid scale divisor {}",
            bad, divisors[bad]
        )));
    }

    log::debug!("Scaling {} bands along axis {}", bands, band_axis);
    for (mut band, &divisor) in cube
        .data_mut()
        .axis_iter_mut(Axis(band_axis))
        .zip(divisors.iter())
    {
        if divisor != 1.0 {
            band.mapv_inplace(|x| x / divisor);
        }
    }
    Ok(())
}

/// Z-score normalize the whole cube, then stretch into [0, 1].
///
/// Statistics are global (population standard deviation). A cube with zero
/// or non-finite spread is rejected instead of producing NaN samples.
pub fn normalize_zscore(cube: &mut PixelCube) -> EnviResult<()> {
    let data = cube.data_mut();
    let count = data.len();
    if count == 0 {
        return Err(EnviError::DegenerateStatistics(
            "cannot normalize an empty cube".to_string(),
        ));
    }

    let mean = data.sum() / count as Sample;
    let variance = data.iter().map(|x| (x - mean).powi(2)).sum::<Sample>() / count as Sample;
    let std_dev = variance.sqrt();
    log::debug!("Cube statistics: mean={:.6}, std={:.6}", mean, std_dev);

    if !std_dev.is_finite() || std_dev == 0.0 {
        return Err(EnviError::DegenerateStatistics(format!(
            "standard deviation is {} (mean {}), z-score normalization would divide by zero",
            std_dev, mean
        )));
    }

    data.mapv_inplace(|x| (x - mean) / std_dev);

    let min = data.iter().copied().fold(Sample::INFINITY, Sample::min);
    let max = data.iter().copied().fold(Sample::NEG_INFINITY, Sample::max);
    let range = max - min;
    if !range.is_finite() || range == 0.0 {
        return Err(EnviError::DegenerateStatistics(format!(
            "normalized range [{}, {}] cannot be stretched",
            min, max
        )));
    }

    data.mapv_inplace(|x| (x - min) / range);
    Ok(())
}

/// Shift by a fixed offset and divide by a fixed divisor
pub fn remap_fixed_point(cube: &mut PixelCube, offset: f64, divisor: f64) -> EnviResult<()> {
    if divisor == 0.0 || !divisor.is_finite() {
        return Err(EnviError::Processing(format!(
            "Invalid fixed-point divisor {}",
            divisor
        )));
    }
    cube.data_mut().mapv_inplace(|x| (x + offset) / divisor);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::interleave::transpose;
    use crate::types::{Dimensions, Interleave};
    use approx::assert_relative_eq;
    use ndarray::Array3;

    fn constant_cube(dims: &Dimensions, interleave: Interleave, value: f64) -> PixelCube {
        let shape = dims.shape_for(interleave);
        PixelCube::new(Array3::from_elem(shape, value), interleave, dims).unwrap()
    }

    #[test]
    fn test_constant_divisor_any_interleave() {
        let dims = Dimensions::new(3, 4, 5);
        for interleave in Interleave::ALL {
            let mut cube = constant_cube(&dims, interleave, 120.0);
            scale_bands(&mut cube, &[4.0, 4.0, 4.0]).unwrap();
            assert!(cube.data().iter().all(|&x| x == 30.0), "{}", interleave);
        }
    }

    #[test]
    fn test_per_band_divisors_follow_band_axis() {
        let dims = Dimensions::new(2, 3, 4);
        let data = Array3::from_shape_fn((2, 3, 4), |(b, _, _)| if b == 0 { 40.0 } else { 80.0 });
        let cube = PixelCube::new(data, Interleave::Bsq, &dims).unwrap();

        for target in Interleave::ALL {
            let mut cube = transpose(cube.clone(), target, &dims).unwrap();
            scale_bands(&mut cube, &[40.0, 80.0]).unwrap();
            assert!(cube.data().iter().all(|&x| x == 1.0), "{}", target);
        }
    }

    #[test]
    fn test_scale_requires_one_divisor_per_band() {
        let dims = Dimensions::new(3, 2, 2);
        let mut cube = constant_cube(&dims, Interleave::Bil, 1.0);
        let result = scale_bands(&mut cube, &[1.0, 1.0]);
        assert!(matches!(result, Err(EnviError::BandCountMismatch { found: 2, bands: 3, .. })));
    }

    #[test]
    fn test_zscore_stretches_to_unit_range() {
        let dims = Dimensions::new(1, 1, 4);
        let data = Array3::from_shape_vec((1, 1, 4), vec![2.0, 4.0, 6.0, 8.0]).unwrap();
        let mut cube = PixelCube::new(data, Interleave::Bsq, &dims).unwrap();
        normalize_zscore(&mut cube).unwrap();

        let values: Vec<f64> = cube.data().iter().copied().collect();
        assert_relative_eq!(values[0], 0.0);
        assert_relative_eq!(values[1], 1.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(values[2], 2.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(values[3], 1.0);
    }

    #[test]
    fn test_zscore_zero_variance_fails() {
        let dims = Dimensions::new(2, 2, 2);
        let mut cube = constant_cube(&dims, Interleave::Bip, 7.0);
        let result = normalize_zscore(&mut cube);
        assert!(matches!(result, Err(EnviError::DegenerateStatistics(_))));
        assert!(cube.data().iter().all(|x| !x.is_nan()));
    }

    #[test]
    fn test_fixed_point_remap() {
        let dims = Dimensions::new(1, 1, 3);
        let data = Array3::from_shape_vec((1, 1, 3), vec![-32768.0, 0.0, 32767.0]).unwrap();
        let mut cube = PixelCube::new(data, Interleave::Bsq, &dims).unwrap();
        Radiometry::SIGNED_16_TO_UNIT.apply(&mut cube).unwrap();

        let values: Vec<f64> = cube.data().iter().copied().collect();
        assert_relative_eq!(values[0], 0.0);
        assert_relative_eq!(values[1], 32768.0 / 65535.0);
        assert_relative_eq!(values[2], 1.0);
    }

    #[test]
    fn test_output_data_type() {
        assert_eq!(Radiometry::Native.output_data_type(DataType::Int16), DataType::Int16);
        assert_eq!(Radiometry::ZScore.output_data_type(DataType::Int16), DataType::Float32);
        assert_eq!(
            Radiometry::BandScale(vec![40.0]).output_data_type(DataType::UInt16),
            DataType::Float32
        );
    }

    #[test]
    fn test_output_format() {
        assert_eq!(
            Radiometry::Native.output_format(Some(SampleFormat::Int8)),
            Some(SampleFormat::Int8)
        );
        assert_eq!(Radiometry::Native.output_format(None), None);
        assert_eq!(
            Radiometry::SIGNED_16_TO_UNIT.output_format(Some(SampleFormat::Int16)),
            Some(SampleFormat::Float32)
        );
    }
}
