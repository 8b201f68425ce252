// spin.rs - The three spin domains and their update proposals

use crate::error::BuildError;
use rand::Rng;
use std::f64::consts::PI;

/// One spin family: its site domain, how a site is initialized, how a
/// candidate replacement is proposed, and the two energy kernels.
///
/// The total energy of a configuration is
/// `-J * sum over bonds of bond(s_i, s_j)  -  h * sum over sites of moment(s_i)`,
/// so implementations return raw alignment/moment terms and leave the
/// couplings to the model.
pub trait SpinVariant: Clone + Send + Sync {
    type Spin: Copy + PartialEq + Send + Sync + std::fmt::Debug;

    /// Uniform draw over the spin domain, used for the initial configuration.
    fn random_spin<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::Spin;

    /// Candidate replacement for a site currently holding `current`.
    fn candidate<R: Rng + ?Sized>(&self, current: Self::Spin, rng: &mut R) -> Self::Spin;

    /// Pairwise alignment term for one nearest-neighbor bond.
    fn bond(&self, a: Self::Spin, b: Self::Spin) -> f64;

    /// Single-site term the external field couples to.
    fn moment(&self, s: Self::Spin) -> f64;
}

/// Binary spins in {-1, +1}; the candidate is always the flipped spin.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ising;

impl SpinVariant for Ising {
    type Spin = i8;

    fn random_spin<R: Rng + ?Sized>(&self, rng: &mut R) -> i8 {
        if rng.gen_bool(0.5) {
            1
        } else {
            -1
        }
    }

    fn candidate<R: Rng + ?Sized>(&self, current: i8, _rng: &mut R) -> i8 {
        -current
    }

    #[inline(always)]
    fn bond(&self, a: i8, b: i8) -> f64 {
        (a * b) as f64
    }

    #[inline(always)]
    fn moment(&self, s: i8) -> f64 {
        s as f64
    }
}

/// q-state clock-less Potts spins in {0, .., q-1}; aligned neighbors are
/// rewarded, everything else is degenerate. Candidates are drawn uniformly
/// over the whole domain, so proposing the current value is a valid no-op.
#[derive(Debug, Clone, Copy)]
pub struct Potts {
    q: u8,
}

impl Potts {
    pub fn new(q: u8) -> Result<Self, BuildError> {
        if q < 2 {
            return Err(BuildError::PottsStates(q));
        }
        Ok(Self { q })
    }

    pub fn q(&self) -> u8 {
        self.q
    }
}

impl SpinVariant for Potts {
    type Spin = u8;

    fn random_spin<R: Rng + ?Sized>(&self, rng: &mut R) -> u8 {
        rng.gen_range(0..self.q)
    }

    fn candidate<R: Rng + ?Sized>(&self, _current: u8, rng: &mut R) -> u8 {
        rng.gen_range(0..self.q)
    }

    #[inline(always)]
    fn bond(&self, a: u8, b: u8) -> f64 {
        if a == b {
            1.0
        } else {
            0.0
        }
    }

    #[inline(always)]
    fn moment(&self, s: u8) -> f64 {
        s as f64
    }
}

/// Planar rotors: a real angle per site, coupled through the cosine of the
/// angle difference. Candidates ignore the current angle.
#[derive(Debug, Clone, Copy, Default)]
pub struct Xy;

impl SpinVariant for Xy {
    type Spin = f64;

    fn random_spin<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        rng.gen_range(-PI..PI)
    }

    fn candidate<R: Rng + ?Sized>(&self, _current: f64, rng: &mut R) -> f64 {
        rng.gen_range(-PI..PI)
    }

    #[inline(always)]
    fn bond(&self, a: f64, b: f64) -> f64 {
        (a - b).cos()
    }

    #[inline(always)]
    fn moment(&self, s: f64) -> f64 {
        s.cos()
    }
}
