// model.rs - Spin configuration on a lattice with incremental energy bookkeeping

use crate::error::BuildError;
use crate::lattice::Lattice;
use crate::spin::SpinVariant;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Nearest-neighbor coupling and external field, fixed per model instance.
#[derive(Debug, Clone, Copy)]
pub struct Couplings {
    pub j: f64,
    pub h: f64,
}

impl Default for Couplings {
    fn default() -> Self {
        Self { j: 1.0, h: 0.0 }
    }
}

/// A proposed single-site replacement.
#[derive(Debug, Clone, Copy)]
pub struct Proposal<S> {
    pub site: usize,
    pub value: S,
}

/// Spin configuration plus the cached total energy.
///
/// The energy is computed from scratch exactly once, at construction. Every
/// applied update adds its local delta, so `energy()` is O(1) and must agree
/// with a fresh `hamiltonian()` sweep at all times; `local_energy_delta`
/// carries that contract.
#[derive(Debug, Clone)]
pub struct LatticeModel<V: SpinVariant> {
    lattice: Lattice,
    variant: V,
    couplings: Couplings,
    kt: f64,
    spins: Vec<V::Spin>,
    energy: f64,
}

impl<V: SpinVariant> LatticeModel<V> {
    /// Draw every site i.i.d. uniform over the spin domain from a stream
    /// seeded with `seed`, then price the configuration once in full.
    pub fn new(lattice: Lattice, variant: V, couplings: Couplings, seed: u64) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let spins = (0..lattice.site_count())
            .map(|_| variant.random_spin(&mut rng))
            .collect();

        let mut model = Self {
            lattice,
            variant,
            couplings,
            kt: 1.0,
            spins,
            energy: 0.0,
        };
        model.energy = model.hamiltonian();
        model
    }

    /// Total energy recomputed from scratch over the full lattice.
    ///
    /// Forward neighbors only, so each unordered bond contributes once.
    pub fn hamiltonian(&self) -> f64 {
        let mut pair = 0.0;
        let mut field = 0.0;
        for i in 0..self.spins.len() {
            let s = self.spins[i];
            for d in 0..self.lattice.n_dims() {
                pair += self.variant.bond(s, self.spins[self.lattice.forward(i, d)]);
            }
            field += self.variant.moment(s);
        }
        -self.couplings.j * pair - self.couplings.h * field
    }

    /// Energy change of replacing the spin at `site` with `candidate`,
    /// from the site's own neighborhood only.
    #[inline]
    pub fn local_energy_delta(&self, site: usize, candidate: V::Spin) -> f64 {
        let current = self.spins[site];
        let mut dpair = 0.0;
        for &n in self.lattice.neighbors(site) {
            let neighbor = self.spins[n as usize];
            dpair += self.variant.bond(candidate, neighbor) - self.variant.bond(current, neighbor);
        }
        let dfield = self.variant.moment(candidate) - self.variant.moment(current);
        -self.couplings.j * dpair - self.couplings.h * dfield
    }

    /// Write an accepted update: store the spin, add its already-computed
    /// delta to the cached energy. Never triggers a full recompute.
    #[inline]
    pub fn apply_update(&mut self, site: usize, candidate: V::Spin, delta_e: f64) {
        self.spins[site] = candidate;
        self.energy += delta_e;
    }

    /// Uniform random site plus a variant-specific candidate value.
    #[inline]
    pub fn propose<R: Rng + ?Sized>(&self, rng: &mut R) -> Proposal<V::Spin> {
        let site = rng.gen_range(0..self.spins.len());
        Proposal {
            site,
            value: self.variant.candidate(self.spins[site], rng),
        }
    }

    /// The cached total energy.
    #[inline(always)]
    pub fn energy(&self) -> f64 {
        self.energy
    }

    /// Temperature only enters acceptance probabilities; changing it leaves
    /// the configuration untouched.
    pub fn set_temperature(&mut self, kt: f64) -> Result<(), BuildError> {
        if !kt.is_finite() || kt <= 0.0 {
            return Err(BuildError::Temperature(kt));
        }
        self.kt = kt;
        Ok(())
    }

    #[inline(always)]
    pub fn kt(&self) -> f64 {
        self.kt
    }

    #[inline(always)]
    pub fn site_count(&self) -> usize {
        self.spins.len()
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn variant(&self) -> &V {
        &self.variant
    }

    pub fn couplings(&self) -> Couplings {
        self.couplings
    }

    pub fn spin(&self, site: usize) -> V::Spin {
        self.spins[site]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spin::{Ising, Potts};

    #[test]
    fn construction_prices_the_configuration_once() {
        let lat = Lattice::square(8).unwrap();
        let model = LatticeModel::new(lat, Ising, Couplings::default(), 42);
        assert_eq!(model.energy(), model.hamiltonian());
    }

    #[test]
    fn temperature_validation() {
        let lat = Lattice::chain(8).unwrap();
        let mut model = LatticeModel::new(lat, Potts::new(3).unwrap(), Couplings::default(), 1);

        assert!(model.set_temperature(2.5).is_ok());
        assert_eq!(model.kt(), 2.5);

        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(model.set_temperature(bad).is_err());
        }
        // A rejected value leaves the previous temperature in place.
        assert_eq!(model.kt(), 2.5);
    }

    #[test]
    fn field_term_enters_the_delta() {
        let lat = Lattice::chain(16).unwrap();
        let model = LatticeModel::new(lat, Ising, Couplings { j: 1.0, h: 0.3 }, 9);

        let site = 5;
        let flipped = -model.spin(site);
        let delta = model.local_energy_delta(site, flipped);

        let mut moved = model.clone();
        moved.apply_update(site, flipped, delta);
        assert!((moved.hamiltonian() - moved.energy()).abs() < 1e-12);
    }
}
