//! Precomputed aperture sample offsets. A fixed table of unit-disk points is
//! generated once (rejection sampling, seeded ChaCha8 so frames are
//! reproducible) and shared by every pixel; sample 0 is pinned to the disk
//! centre so a single-ray render always shoots through the aperture centre.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::geometry::Vec2;

pub const APERTURE_SAMPLE_COUNT: usize = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct ApertureSamples {
    offsets: [Vec2; APERTURE_SAMPLE_COUNT],
}

impl ApertureSamples {
    pub fn generate(seed: u64) -> ApertureSamples {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut offsets = [Vec2(0.0, 0.0); APERTURE_SAMPLE_COUNT];

        let mut i = 1;
        while i < APERTURE_SAMPLE_COUNT {
            let x = 2.0 * uniform(&mut rng) - 1.0;
            let y = 2.0 * uniform(&mut rng) - 1.0;
            let candidate = Vec2(x, y);
            if candidate.square_magnitude() <= 1.0 {
                offsets[i] = candidate;
                i += 1;
            }
        }

        ApertureSamples { offsets }
    }

    pub fn get(&self, index: usize) -> Vec2 {
        self.offsets[index]
    }
}

impl Default for ApertureSamples {
    fn default() -> Self {
        ApertureSamples::generate(0)
    }
}

fn uniform(rng: &mut ChaCha8Rng) -> f32 {
    (rng.next_u32() as f64 / u32::MAX as f64) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sample_is_the_aperture_centre() {
        let samples = ApertureSamples::default();
        assert_eq!(samples.get(0), Vec2(0.0, 0.0));
    }

    #[test]
    fn all_samples_lie_within_the_unit_disk() {
        let samples = ApertureSamples::generate(7);
        for i in 0..APERTURE_SAMPLE_COUNT {
            assert!(samples.get(i).square_magnitude() <= 1.0);
        }
    }

    #[test]
    fn generation_is_deterministic_per_seed() {
        assert_eq!(ApertureSamples::generate(3), ApertureSamples::generate(3));
        assert_ne!(ApertureSamples::generate(3), ApertureSamples::generate(4));
    }
}
