//! Property tests for flood-fill reveal (pure domain, no DB).
//!
//! Properties tested:
//! - A mine is never part of a reveal mask
//! - The worklist fill matches a naive recursive fill on small boards

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::domain::generator::{generate, MineLayout};
use crate::domain::grid::GridSpec;
use crate::domain::reveal::reveal_mask;

/// Recursive fill, small boards only.
fn reference_fill(layout: &MineLayout, index: usize, out: &mut Vec<bool>) {
    if out[index] || layout.is_mine(index) {
        return;
    }
    out[index] = true;
    if layout.neighbor_count(index) == 0 {
        for n in layout.spec().neighbors(index) {
            reference_fill(layout, n, out);
        }
    }
}

proptest! {
    #[test]
    fn prop_never_reveals_a_mine_and_matches_reference(
        rows in 2u16..=9,
        columns in 2u16..=9,
        seed in any::<u64>(),
        start in any::<prop::sample::Index>(),
    ) {
        let spec = GridSpec::new(rows, columns).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        let layout = generate(spec, None, 0.2, &mut rng);
        let start = start.index(spec.total_cells());
        let (x, y) = spec.coords(start);

        let mask = reveal_mask(
            spec,
            layout.mines(),
            layout.neighbor_counts(),
            i64::from(x),
            i64::from(y),
        );

        for (i, &revealed) in mask.iter().enumerate() {
            prop_assert!(!(revealed && layout.is_mine(i)));
        }

        let mut expected = vec![false; spec.total_cells()];
        reference_fill(&layout, start, &mut expected);
        prop_assert_eq!(mask, expected);
    }
}
