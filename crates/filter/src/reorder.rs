//! Legacy spectrum component reordering.
//!
//! The reference Fortran pipeline stores 2D FFT components in an order
//! that corresponds to an `fftshift` followed by a half-length roll along
//! each axis. The composition is a cyclic roll by `2 * (n / 2)` positions
//! per axis, which is the identity for even axis lengths and a roll by
//! `n - 1` for odd ones. The mask in [`crate::wk`] is defined on this
//! ordering, so the remap is load-bearing for bit compatibility and kept
//! as an explicit, separately tested function.

use ndarray::Array2;
use num_complex::Complex;

/// Cyclic roll offset of the legacy ordering for an axis of length `n`.
pub fn legacy_roll_offset(n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    (2 * (n / 2)) % n
}

/// Rolls `spectrum` into the legacy component ordering.
pub fn reorder_to_legacy(spectrum: &Array2<Complex<f64>>) -> Array2<Complex<f64>> {
    let (nt, nl) = spectrum.dim();
    roll2(spectrum, legacy_roll_offset(nt), legacy_roll_offset(nl))
}

/// Rolls a legacy-ordered `spectrum` back into natural FFT ordering.
pub fn reorder_from_legacy(spectrum: &Array2<Complex<f64>>) -> Array2<Complex<f64>> {
    let (nt, nl) = spectrum.dim();
    let rt = legacy_roll_offset(nt);
    let rl = legacy_roll_offset(nl);
    roll2(spectrum, (nt - rt) % nt.max(1), (nl - rl) % nl.max(1))
}

/// Cyclic roll by `(rt, rl)`: `out[(i + rt) % nt, (j + rl) % nl] = in[i, j]`.
fn roll2(spectrum: &Array2<Complex<f64>>, rt: usize, rl: usize) -> Array2<Complex<f64>> {
    let (nt, nl) = spectrum.dim();
    let mut out = Array2::zeros((nt, nl));
    for ((i, j), &value) in spectrum.indexed_iter() {
        out[[(i + rt) % nt, (j + rl) % nl]] = value;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn re(v: f64) -> Complex<f64> {
        Complex::new(v, 0.0)
    }

    fn sample(nt: usize, nl: usize) -> Array2<Complex<f64>> {
        Array2::from_shape_fn((nt, nl), |(i, j)| re((i * nl + j) as f64))
    }

    #[test]
    fn offset_even_is_zero() {
        assert_eq!(legacy_roll_offset(4), 0);
        assert_eq!(legacy_roll_offset(144), 0);
        assert_eq!(legacy_roll_offset(1 << 17), 0);
    }

    #[test]
    fn offset_odd_is_n_minus_one() {
        assert_eq!(legacy_roll_offset(3), 2);
        assert_eq!(legacy_roll_offset(5), 4);
        assert_eq!(legacy_roll_offset(145), 144);
    }

    #[test]
    fn even_axes_identity() {
        let spec = sample(4, 6);
        let reordered = reorder_to_legacy(&spec);
        assert_eq!(spec, reordered);
    }

    #[test]
    fn odd_axis_rolls_by_minus_one() {
        // fftshift(x) followed by roll(n/2) on [0,1,2,3,4] gives [1,2,3,4,0]:
        // every component moves one slot toward the lower index.
        let spec = Array2::from_shape_fn((5, 1), |(i, _)| re(i as f64));
        let reordered = reorder_to_legacy(&spec);
        let expected: Vec<f64> = vec![1.0, 2.0, 3.0, 4.0, 0.0];
        for (i, &e) in expected.iter().enumerate() {
            assert_eq!(reordered[[i, 0]], re(e), "mismatch at index {i}");
        }
    }

    #[test]
    fn both_axes_odd_small_case() {
        let spec = sample(3, 3);
        let reordered = reorder_to_legacy(&spec);
        // Row roll by 2 and column roll by 2 each equal a roll by -1.
        assert_eq!(reordered[[0, 0]], spec[[1, 1]]);
        assert_eq!(reordered[[2, 2]], spec[[0, 0]]);
        assert_eq!(reordered[[0, 2]], spec[[1, 0]]);
    }

    #[test]
    fn roundtrip_is_identity() {
        for &(nt, nl) in &[(4usize, 6usize), (5, 6), (4, 7), (5, 7)] {
            let spec = sample(nt, nl);
            let back = reorder_from_legacy(&reorder_to_legacy(&spec));
            assert_eq!(spec, back, "roundtrip failed for ({nt}, {nl})");
        }
    }
}
