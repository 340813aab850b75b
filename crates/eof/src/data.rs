//! A pair of spatial EOF eigenvectors on a fixed (lat, long) grid.

use ndarray::{Array1, Array2, ArrayD};

use crate::error::EofError;

/// Statistics of the PCA a pair of EOFs was derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct EofStatistics {
    /// Eigenvalues of the two leading components, descending.
    eigenvalues: (f64, f64),
    /// Fractions of total variance explained by the two leading
    /// components.
    explained_variances: (f64, f64),
    /// Number of observation maps entering the PCA.
    no_observations: usize,
}

impl EofStatistics {
    /// Creates a new statistics record.
    pub fn new(
        eigenvalues: (f64, f64),
        explained_variances: (f64, f64),
        no_observations: usize,
    ) -> Self {
        Self {
            eigenvalues,
            explained_variances,
            no_observations,
        }
    }

    /// Returns the two leading eigenvalues, descending.
    pub fn eigenvalues(&self) -> (f64, f64) {
        self.eigenvalues
    }

    /// Returns the explained-variance fractions of the two leading
    /// components.
    pub fn explained_variances(&self) -> (f64, f64) {
        self.explained_variances
    }

    /// Returns the number of observation maps entering the PCA.
    pub fn no_observations(&self) -> usize {
        self.no_observations
    }
}

/// A pair of real-valued spatial eigenvectors (`eof1`, `eof2`) over a
/// fixed `(lat, long)` grid.
///
/// Vectors are stored flat in latitude-major order (latitude first, then
/// longitude) and exposed both as vectors and as 2D maps. Construction
/// accepts either form for each eigenvector.
#[derive(Debug, Clone, PartialEq)]
pub struct EofPair {
    lat: Array1<f64>,
    long: Array1<f64>,
    eof1: Array1<f64>,
    eof2: Array1<f64>,
    statistics: Option<EofStatistics>,
}

impl EofPair {
    /// Creates a new `EofPair` from 1D (already flattened) or 2D
    /// (lat x long) eigenvector arrays.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`EofError::InvalidDimensionality`] | input is neither 1D nor 2D |
    /// | [`EofError::ShapeMismatch`] | eof1 and eof2 shapes differ |
    /// | [`EofError::LengthMismatch`] | 1D length != lat.size*long.size |
    /// | [`EofError::LatAxisMismatch`] | 2D first axis != lat.size |
    /// | [`EofError::LongAxisMismatch`] | 2D second axis != long.size |
    pub fn new(
        lat: Array1<f64>,
        long: Array1<f64>,
        eof1: ArrayD<f64>,
        eof2: ArrayD<f64>,
    ) -> Result<Self, EofError> {
        if eof1.ndim() != 1 && eof1.ndim() != 2 {
            return Err(EofError::InvalidDimensionality { ndim: eof1.ndim() });
        }
        if eof2.ndim() != 1 && eof2.ndim() != 2 {
            return Err(EofError::InvalidDimensionality { ndim: eof2.ndim() });
        }
        if eof1.shape() != eof2.shape() {
            return Err(EofError::ShapeMismatch {
                shape1: eof1.shape().to_vec(),
                shape2: eof2.shape().to_vec(),
            });
        }

        let flat1 = flatten_checked(&eof1, lat.len(), long.len())?;
        let flat2 = flatten_checked(&eof2, lat.len(), long.len())?;

        Ok(Self {
            lat,
            long,
            eof1: flat1,
            eof2: flat2,
            statistics: None,
        })
    }

    /// Attaches PCA statistics to the pair.
    pub fn with_statistics(mut self, statistics: EofStatistics) -> Self {
        self.statistics = Some(statistics);
        self
    }

    /// Returns the latitude grid.
    pub fn lat(&self) -> &Array1<f64> {
        &self.lat
    }

    /// Returns the longitude grid.
    pub fn long(&self) -> &Array1<f64> {
        &self.long
    }

    /// Returns the first eigenvector as a flat vector.
    pub fn eof1_vector(&self) -> &Array1<f64> {
        &self.eof1
    }

    /// Returns the second eigenvector as a flat vector.
    pub fn eof2_vector(&self) -> &Array1<f64> {
        &self.eof2
    }

    /// Returns the first eigenvector as a (lat, long) map.
    pub fn eof1_map(&self) -> Array2<f64> {
        self.vector_to_map(&self.eof1)
            .expect("stored vector always matches the grid")
    }

    /// Returns the second eigenvector as a (lat, long) map.
    pub fn eof2_map(&self) -> Array2<f64> {
        self.vector_to_map(&self.eof2)
            .expect("stored vector always matches the grid")
    }

    /// Returns the attached PCA statistics, if any.
    pub fn statistics(&self) -> Option<&EofStatistics> {
        self.statistics.as_ref()
    }

    /// Reshapes a flat vector in latitude-major order into a (lat, long)
    /// map on this pair's grid.
    ///
    /// # Errors
    ///
    /// Returns [`EofError::LengthMismatch`] if the vector length does not
    /// equal `lat.size * long.size`.
    pub fn vector_to_map(&self, vector: &Array1<f64>) -> Result<Array2<f64>, EofError> {
        let expected = self.lat.len() * self.long.len();
        if vector.len() != expected {
            return Err(EofError::LengthMismatch {
                got: vector.len(),
                expected,
            });
        }
        Ok(Array2::from_shape_fn(
            (self.lat.len(), self.long.len()),
            |(i, j)| vector[i * self.long.len() + j],
        ))
    }

    /// Flattens a (lat, long) map into a vector in latitude-major order.
    ///
    /// # Errors
    ///
    /// Returns [`EofError::LatAxisMismatch`] /
    /// [`EofError::LongAxisMismatch`] if the map shape does not match this
    /// pair's grid.
    pub fn map_to_vector(&self, map: &Array2<f64>) -> Result<Array1<f64>, EofError> {
        if map.nrows() != self.lat.len() {
            return Err(EofError::LatAxisMismatch {
                got: map.nrows(),
                expected: self.lat.len(),
            });
        }
        if map.ncols() != self.long.len() {
            return Err(EofError::LongAxisMismatch {
                got: map.ncols(),
                expected: self.long.len(),
            });
        }
        Ok(Array1::from_iter(map.iter().cloned()))
    }

    /// Elementwise closeness of grids and eigenvectors within an absolute
    /// tolerance. Statistics are not compared.
    pub fn close_to(&self, other: &EofPair, atol: f64) -> bool {
        arrays_close(&self.lat, &other.lat, atol)
            && arrays_close(&self.long, &other.long, atol)
            && arrays_close(&self.eof1, &other.eof1, atol)
            && arrays_close(&self.eof2, &other.eof2, atol)
    }

    /// True if both pairs live on the identical spatial grid.
    pub fn same_grid(&self, other: &EofPair) -> bool {
        self.lat == other.lat && self.long == other.long
    }
}

fn arrays_close(a: &Array1<f64>, b: &Array1<f64>, atol: f64) -> bool {
    a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() <= atol)
}

fn flatten_checked(
    input: &ArrayD<f64>,
    n_lat: usize,
    n_long: usize,
) -> Result<Array1<f64>, EofError> {
    let expected = n_lat * n_long;
    match input.ndim() {
        1 => {
            if input.len() != expected {
                return Err(EofError::LengthMismatch {
                    got: input.len(),
                    expected,
                });
            }
            Ok(Array1::from_iter(input.iter().cloned()))
        }
        2 => {
            let shape = input.shape();
            if shape[0] != n_lat {
                return Err(EofError::LatAxisMismatch {
                    got: shape[0],
                    expected: n_lat,
                });
            }
            if shape[1] != n_long {
                return Err(EofError::LongAxisMismatch {
                    got: shape[1],
                    expected: n_long,
                });
            }
            Ok(Array1::from_iter(input.iter().cloned()))
        }
        ndim => Err(EofError::InvalidDimensionality { ndim }),
    }
}
