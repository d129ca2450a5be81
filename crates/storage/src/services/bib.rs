use std::ops::RangeInclusive;

use rand::Rng;

/// Five-digit bib numbers.
pub const BIB_RANGE: RangeInclusive<i32> = 10_000..=99_999;

/// Draws before giving up on a collision-free bib.
pub const MAX_BIB_ATTEMPTS: usize = 8;

pub fn draw_bib_number<R: Rng + ?Sized>(rng: &mut R) -> i32 {
    rng.gen_range(BIB_RANGE)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn test_draws_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1_000 {
            assert!(BIB_RANGE.contains(&draw_bib_number(&mut rng)));
        }
    }
}
