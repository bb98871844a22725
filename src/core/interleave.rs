use crate::types::{CubeData, Dimensions, EnviError, EnviResult, Interleave};

/// Pixel cube with the interleave its array is physically laid out in.
///
/// The tag is private and only changes inside [`transpose`], together with the
/// array itself, so it always describes the current axis order.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelCube {
    data: CubeData,
    interleave: Interleave,
}

impl PixelCube {
    /// Wrap an array already known to be in `interleave` order
    pub fn new(data: CubeData, interleave: Interleave, dims: &Dimensions) -> EnviResult<Self> {
        let cube = Self { data, interleave };
        cube.check_dimensions(dims)?;
        Ok(cube)
    }

    /// Wrap a native array, working out its interleave from its shape
    pub fn from_native(data: CubeData, dims: &Dimensions) -> EnviResult<Self> {
        let interleave = resolve_source_interleave(data.shape(), dims)?;
        log::debug!("Native array {:?} resolved as {}", data.shape(), interleave);
        Ok(Self { data, interleave })
    }

    pub fn interleave(&self) -> Interleave {
        self.interleave
    }

    pub fn data(&self) -> &CubeData {
        &self.data
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    pub fn into_data(self) -> CubeData {
        self.data
    }

    /// Mutable samples; axis order is fixed, only values may change
    pub(crate) fn data_mut(&mut self) -> &mut CubeData {
        &mut self.data
    }

    /// Verify the array shape agrees with `dims` under the current tag
    pub fn check_dimensions(&self, dims: &Dimensions) -> EnviResult<()> {
        let expected = dims.shape_for(self.interleave);
        if self.data.shape() != expected {
            return Err(EnviError::DimensionMismatch(format!(
                "{} cube has shape {:?}, expected {:?} for {:?}",
                self.interleave,
                self.data.shape(),
                expected,
                dims
            )));
        }
        Ok(())
    }
}

/// Work out which interleave an array shape corresponds to.
///
/// Fails when the shape matches none of the three layouts, or more than one
/// (for example when `bands == lines`), since the axis meaning is then unknown.
pub fn resolve_source_interleave(shape: &[usize], dims: &Dimensions) -> EnviResult<Interleave> {
    let matches: Vec<Interleave> = Interleave::ALL
        .into_iter()
        .filter(|&interleave| shape == dims.shape_for(interleave))
        .collect();

    match matches.as_slice() {
        [interleave] => Ok(*interleave),
        _ => Err(EnviError::UnknownInterleave {
            shape: shape.to_vec(),
            dims: *dims,
        }),
    }
}

/// Axis permutation taking a `source` layout to a `target` layout.
///
/// Entry `i` is the source axis that becomes target axis `i`.
pub fn permutation(source: Interleave, target: Interleave) -> [usize; 3] {
    use Interleave::*;

    match (source, target) {
        (Bip, Bip) => [0, 1, 2],
        (Bip, Bil) => [0, 2, 1],
        (Bip, Bsq) => [2, 0, 1],
        (Bil, Bil) => [0, 1, 2],
        (Bil, Bip) => [0, 2, 1],
        (Bil, Bsq) => [1, 0, 2],
        (Bsq, Bsq) => [0, 1, 2],
        (Bsq, Bip) => [1, 2, 0],
        (Bsq, Bil) => [1, 0, 2],
    }
}

/// Reorder a cube into `target` interleave.
///
/// The result is laid out contiguously in the new order, so iterating it in
/// logical order yields the bytes of the target layout. Same-interleave calls
/// return the cube untouched.
pub fn transpose(cube: PixelCube, target: Interleave, dims: &Dimensions) -> EnviResult<PixelCube> {
    cube.check_dimensions(dims)?;

    let source = cube.interleave;
    if source == target {
        log::debug!("Cube already {}, no transpose needed", target);
        return Ok(cube);
    }

    let axes = permutation(source, target);
    log::debug!("Transposing {} -> {} with axes {:?}", source, target, axes);

    let data = cube
        .data
        .permuted_axes(axes)
        .as_standard_layout()
        .into_owned();
    let transposed = PixelCube {
        data,
        interleave: target,
    };
    transposed.check_dimensions(dims)?;
    Ok(transposed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CubeAxis;
    use ndarray::Array3;

    fn bsq_cube(dims: &Dimensions) -> PixelCube {
        let data = Array3::from_shape_fn((dims.bands, dims.lines, dims.samples), |(b, l, s)| {
            (b * 10_000 + l * 100 + s) as f64
        });
        PixelCube::new(data, Interleave::Bsq, dims).unwrap()
    }

    #[test]
    fn test_permutation_table_matches_axis_labels() {
        for source in Interleave::ALL {
            for target in Interleave::ALL {
                let perm = permutation(source, target);
                let source_axes = source.axes();
                let target_axes = target.axes();
                for (i, &axis) in perm.iter().enumerate() {
                    assert_eq!(
                        source_axes[axis], target_axes[i],
                        "{} -> {} axis {}",
                        source, target, i
                    );
                }
            }
        }
    }

    #[test]
    fn test_transpose_places_samples_by_label() {
        let dims = Dimensions::new(3, 4, 5);
        for target in Interleave::ALL {
            let cube = transpose(bsq_cube(&dims), target, &dims).unwrap();
            assert_eq!(cube.interleave(), target);
            let axes = target.axes();
            for (index, &value) in cube.data().indexed_iter() {
                let index = [index.0, index.1, index.2];
                let mut b = 0;
                let mut l = 0;
                let mut s = 0;
                for (pos, axis) in axes.iter().enumerate() {
                    match axis {
                        CubeAxis::Band => b = index[pos],
                        CubeAxis::Line => l = index[pos],
                        CubeAxis::Sample => s = index[pos],
                    }
                }
                assert_eq!(value, (b * 10_000 + l * 100 + s) as f64);
            }
        }
    }

    #[test]
    fn test_transpose_output_is_contiguous() {
        let dims = Dimensions::new(2, 3, 4);
        let cube = transpose(bsq_cube(&dims), Interleave::Bip, &dims).unwrap();
        assert!(cube.data().is_standard_layout());
        let first: Vec<f64> = cube.data().iter().take(2).copied().collect();
        // first pixel, both bands
        assert_eq!(first, vec![0.0, 10_000.0]);
    }

    #[test]
    fn test_resolve_unique_shape() {
        let dims = Dimensions::new(3, 4, 5);
        assert_eq!(resolve_source_interleave(&[3, 4, 5], &dims).unwrap(), Interleave::Bsq);
        assert_eq!(resolve_source_interleave(&[4, 3, 5], &dims).unwrap(), Interleave::Bil);
        assert_eq!(resolve_source_interleave(&[4, 5, 3], &dims).unwrap(), Interleave::Bip);
    }

    #[test]
    fn test_resolve_rejects_unknown_and_ambiguous() {
        let dims = Dimensions::new(3, 4, 5);
        assert!(matches!(
            resolve_source_interleave(&[5, 4, 3], &dims),
            Err(EnviError::UnknownInterleave { .. })
        ));

        let square = Dimensions::new(4, 4, 5);
        assert!(matches!(
            resolve_source_interleave(&[4, 4, 5], &square),
            Err(EnviError::UnknownInterleave { .. })
        ));
    }

    #[test]
    fn test_new_rejects_wrong_shape() {
        let dims = Dimensions::new(3, 4, 5);
        let data = Array3::<f64>::zeros((4, 3, 5));
        assert!(PixelCube::new(data, Interleave::Bsq, &dims).is_err());
    }
}
