// rng.rs - Deterministic per-run random streams

use rand::SeedableRng;
use rand_pcg::Pcg64;

/// Hot-loop random stream for one simulation run, derived from a master
/// seed and a stream index with a splitmix64-style mix. Every run owns its
/// stream exclusively; nothing is ever reseeded mid-run, so identical
/// (master, index) pairs replay identical trajectories.
pub fn stream(master: u64, index: u64) -> Pcg64 {
    let mut x = master ^ index.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    Pcg64::seed_from_u64(x ^ (x >> 31))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn streams_replay_and_separate() {
        let a: Vec<u64> = stream(42, 3).sample_iter(rand::distributions::Standard).take(8).collect();
        let b: Vec<u64> = stream(42, 3).sample_iter(rand::distributions::Standard).take(8).collect();
        let c: Vec<u64> = stream(42, 4).sample_iter(rand::distributions::Standard).take(8).collect();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn index_zero_differs_from_master_reuse() {
        let mut base = stream(7, 0);
        let mut other = stream(7, 1);
        assert_ne!(base.gen::<u64>(), other.gen::<u64>());
    }
}
