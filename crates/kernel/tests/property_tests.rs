use csl_kernel::bitmask::{build_mask, for_each_tuple, indices_from_bitset, lattice_size};
use csl_kernel::canonicalize;
use proptest::prelude::*;

proptest! {
    #[test]
    fn canonicalize_is_idempotent(source in "[ -~\t\r\n\u{201C}\u{201D}\u{2014}\u{00A0}\u{2207}\u{22A2}]{0,200}") {
        let once = canonicalize(&source);
        prop_assert_eq!(canonicalize(&once), once);
    }

    #[test]
    fn enumeration_visits_every_index_in_order(p in 2u32..5, dim in 1u32..5) {
        let mut seen = Vec::new();
        for_each_tuple(dim, p, |index, coords| {
            assert_eq!(coords.len(), dim as usize);
            assert!(coords.iter().all(|&c| c < p));
            seen.push(index);
        });
        let expected: Vec<u64> = (0..lattice_size(p, dim).unwrap()).collect();
        prop_assert_eq!(seen, expected);
    }

    #[test]
    fn mask_bits_match_predicate(p in 2u32..4, dim in 1u32..4, axis_seed in 0u32..8, constant in 0u32..4) {
        let axis = (axis_seed % dim) as usize;
        let mask = build_mask(dim, p, |coords| coords[axis] == constant);
        let n = lattice_size(p, dim).unwrap();

        let mut expected = Vec::new();
        for_each_tuple(dim, p, |index, coords| {
            if coords[axis] == constant {
                expected.push(index);
            }
        });
        prop_assert_eq!(indices_from_bitset(&mask, n), expected);
    }
}
