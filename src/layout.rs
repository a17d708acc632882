use macroquad::prelude::debug;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::model::Tube;

/// Deals `color_count * capacity` shuffled drops into the first `color_count`
/// tubes and leaves the rest empty. Each color gets exactly `capacity` drops.
/// The resulting arrangement is not checked for solvability.
pub fn generate_layout<R: Rng + ?Sized>(
    tube_count: usize,
    capacity: usize,
    color_count: usize,
    rng: &mut R,
) -> Vec<Tube> {
    let mut colors: Vec<usize> = (1..=color_count)
        .flat_map(|color| std::iter::repeat_n(color, capacity))
        .collect();
    // Fisher-Yates, every permutation equally likely.
    colors.shuffle(rng);

    let mut tubes: Vec<Tube> = (0..tube_count).map(|_| Tube::new(capacity)).collect();
    for (tube, chunk) in tubes.iter_mut().zip(colors.chunks(capacity.max(1))) {
        for &color in chunk {
            tube.pour_in(color);
        }
    }
    debug!(
        "Dealt {} drops into {} of {} tubes",
        colors.len(),
        color_count,
        tube_count
    );
    tubes
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn color_totals(tubes: &[Tube], color_count: usize) -> Vec<usize> {
        let mut totals = vec![0; color_count + 1];
        for tube in tubes {
            for code in tube.snapshot() {
                totals[code] += 1;
            }
        }
        totals
    }

    #[test]
    fn every_color_dealt_capacity_times() {
        let mut rng = StdRng::seed_from_u64(42);
        let tubes = generate_layout(7, 4, 5, &mut rng);
        let totals = color_totals(&tubes, 5);
        assert_eq!(totals[0], 2 * 4);
        assert!(totals[1..].iter().all(|&t| t == 4));
    }

    #[test]
    fn colored_tubes_are_full_and_spares_empty() {
        let mut rng = StdRng::seed_from_u64(7);
        let tubes = generate_layout(6, 3, 4, &mut rng);
        assert_eq!(tubes.len(), 6);
        assert!(tubes[..4].iter().all(Tube::is_full));
        assert!(tubes[4..].iter().all(Tube::is_empty));
    }

    #[test]
    fn same_seed_same_layout() {
        let a = generate_layout(5, 4, 3, &mut StdRng::seed_from_u64(99999));
        let b = generate_layout(5, 4, 3, &mut StdRng::seed_from_u64(99999));
        assert_eq!(a, b);
    }

    #[test]
    fn single_color_layout_is_already_sorted() {
        let tubes = generate_layout(3, 2, 1, &mut StdRng::seed_from_u64(1));
        assert_eq!(tubes[0].snapshot(), vec![1, 1]);
        assert!(tubes[1].is_empty() && tubes[2].is_empty());
    }

    #[test]
    fn shuffle_mixes_colors_across_seeds() {
        // With 3 colors of 4 drops, some seed must leave tube 0 mixed.
        let mixed = (0..32u64).any(|seed| {
            let tubes = generate_layout(4, 4, 3, &mut StdRng::seed_from_u64(seed));
            !tubes[0].is_monochrome()
        });
        assert!(mixed);
    }
}
