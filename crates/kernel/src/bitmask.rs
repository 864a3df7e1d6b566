//! Lattice bitmasks.
//!
//! Tuples of `dim` digits in `[0, p)` are enumerated in odometer order (last
//! coordinate fastest). A tuple's bit index is its position in that
//! enumeration; the correspondence is never stored, so the order is part of
//! the mask format.

use crate::error::{KernelError, KernelResult};
use num_bigint::BigUint;
use num_traits::Zero;

/// Number of lattice points, `p^dim`.
pub fn lattice_size(p: u32, dim: u32) -> KernelResult<u64> {
    u64::from(p)
        .checked_pow(dim)
        .ok_or(KernelError::LatticeTooLarge { p, dim })
}

/// Visit every tuple once, in enumeration order, with its index.
pub fn for_each_tuple<F>(dim: u32, p: u32, mut visit: F)
where
    F: FnMut(u64, &[u32]),
{
    let mut coords = vec![0u32; dim as usize];
    let mut index = 0u64;
    assign_digit(0, p, &mut coords, &mut index, &mut visit);
}

fn assign_digit<F>(depth: usize, p: u32, coords: &mut [u32], index: &mut u64, visit: &mut F)
where
    F: FnMut(u64, &[u32]),
{
    if depth == coords.len() {
        visit(*index, coords);
        *index += 1;
        return;
    }

    for digit in 0..p {
        coords[depth] = digit;
        assign_digit(depth + 1, p, coords, index, visit);
    }
}

/// Build the mask whose bit `i` is set iff tuple `i` satisfies `accept`.
pub fn build_mask<F>(dim: u32, p: u32, accept: F) -> BigUint
where
    F: Fn(&[u32]) -> bool,
{
    let mut mask = BigUint::zero();
    for_each_tuple(dim, p, |index, coords| {
        if accept(coords) {
            mask.set_bit(index, true);
        }
    });
    mask
}

pub fn bit_test(mask: &BigUint, index: u64) -> bool {
    mask.bit(index)
}

/// Indices in `[0, n)` whose bit is set, ascending.
pub fn indices_from_bitset(mask: &BigUint, n: u64) -> Vec<u64> {
    (0..n.min(mask.bits())).filter(|&i| mask.bit(i)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enumerates_last_coordinate_fastest() {
        let mut seen = Vec::new();
        for_each_tuple(2, 2, |index, coords| seen.push((index, coords.to_vec())));
        assert_eq!(
            seen,
            vec![
                (0, vec![0, 0]),
                (1, vec![0, 1]),
                (2, vec![1, 0]),
                (3, vec![1, 1]),
            ]
        );
    }

    #[test]
    fn mask_bits_follow_enumeration() {
        let mask = build_mask(2, 3, |coords| coords[1] == 2);
        assert!(bit_test(&mask, 2));
        assert!(!bit_test(&mask, 3));
        assert_eq!(indices_from_bitset(&mask, 9), vec![2, 5, 8]);
    }

    #[test]
    fn empty_predicate_gives_zero_mask() {
        assert!(build_mask(3, 3, |_| false).is_zero());
    }

    #[test]
    fn lattice_size_overflow_is_reported() {
        assert_eq!(lattice_size(3, 3), Ok(27));
        assert_eq!(
            lattice_size(2, 64),
            Err(KernelError::LatticeTooLarge { p: 2, dim: 64 })
        );
    }
}
