//! The incremental-energy contract: the cached total must track a
//! from-scratch recomputation for every variant in both dimensions, and
//! updating a site away and back must restore the energy.

use spinscan::lattice::Lattice;
use spinscan::mcmc::{elementary_step, UpdateRule};
use spinscan::model::{Couplings, LatticeModel};
use spinscan::rng::stream;
use spinscan::spin::{Ising, Potts, SpinVariant, Xy};

// Nonzero field so the field term of the delta is exercised too.
const COUPLINGS: Couplings = Couplings { j: 1.0, h: 0.25 };

fn assert_cached_energy_tracks_ground_truth<V: SpinVariant>(variant: V, lattice: Lattice) {
    let mut model = LatticeModel::new(lattice, variant, COUPLINGS, 0xDEADBEEF);
    model.set_temperature(2.0).unwrap();
    let mut rng = stream(0xDEADBEEF, 1);

    for step in 0..2000 {
        elementary_step(&mut model, UpdateRule::Metropolis, &mut rng);

        let exact = model.hamiltonian();
        let cached = model.energy();
        let tol = 1e-9 * exact.abs().max(1.0);
        assert!(
            (exact - cached).abs() <= tol,
            "cached energy drifted after step {step}: cached {cached}, exact {exact}"
        );
    }
}

fn assert_update_involution<V: SpinVariant>(variant: V, lattice: Lattice) {
    let mut model = LatticeModel::new(lattice, variant, COUPLINGS, 99);
    let mut rng = stream(99, 2);

    for _ in 0..500 {
        let proposal = model.propose(&mut rng);
        let original = model.spin(proposal.site);
        let before = model.energy();

        let there = model.local_energy_delta(proposal.site, proposal.value);
        model.apply_update(proposal.site, proposal.value, there);
        let back = model.local_energy_delta(proposal.site, original);
        model.apply_update(proposal.site, original, back);

        let tol = 1e-9 * before.abs().max(1.0);
        assert!(
            (model.energy() - before).abs() <= tol,
            "there-and-back update did not restore the energy"
        );
    }
}

#[test]
fn ising_energy_bookkeeping() {
    assert_cached_energy_tracks_ground_truth(Ising, Lattice::chain(64).unwrap());
    assert_cached_energy_tracks_ground_truth(Ising, Lattice::square(8).unwrap());
}

#[test]
fn potts_energy_bookkeeping() {
    let potts = Potts::new(4).unwrap();
    assert_cached_energy_tracks_ground_truth(potts, Lattice::chain(64).unwrap());
    assert_cached_energy_tracks_ground_truth(potts, Lattice::square(8).unwrap());
}

#[test]
fn xy_energy_bookkeeping() {
    assert_cached_energy_tracks_ground_truth(Xy, Lattice::chain(64).unwrap());
    assert_cached_energy_tracks_ground_truth(Xy, Lattice::square(8).unwrap());
}

#[test]
fn ising_update_involution() {
    assert_update_involution(Ising, Lattice::chain(32).unwrap());
    assert_update_involution(Ising, Lattice::square(8).unwrap());
}

#[test]
fn potts_update_involution() {
    let potts = Potts::new(5).unwrap();
    assert_update_involution(potts, Lattice::chain(32).unwrap());
    assert_update_involution(potts, Lattice::square(8).unwrap());
}

#[test]
fn xy_update_involution() {
    assert_update_involution(Xy, Lattice::chain(32).unwrap());
    assert_update_involution(Xy, Lattice::square(8).unwrap());
}
