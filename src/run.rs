// run.rs - Equilibration + production loop for one temperature point

use crate::error::RunError;
use crate::mcmc::{self, UpdateRule};
use crate::model::LatticeModel;
use crate::spin::SpinVariant;
use crate::stats::{AcceptanceErrorEstimator, BlockAccumulator, BlockVariance, ObservableSet};
use rand::Rng;

/// Step budget of one run, counted in sweeps.
#[derive(Debug, Clone, Copy)]
pub struct RunConfig {
    /// Production sweeps, recorded.
    pub sweeps: usize,
    /// Equilibration sweeps, discarded.
    pub skip: usize,
    /// Sweeps per statistics block.
    pub block_len: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            sweeps: 100_000,
            skip: 10_000,
            block_len: 1000,
        }
    }
}

/// Run one simulation with the default block-variance acceptance error.
pub fn run<V, R>(
    model: &mut LatticeModel<V>,
    rule: UpdateRule,
    config: &RunConfig,
    rng: &mut R,
) -> Result<ObservableSet, RunError>
where
    V: SpinVariant,
    R: Rng + ?Sized,
{
    run_with(model, rule, config, &BlockVariance, rng)
}

/// Run one simulation with a caller-chosen acceptance error estimator.
///
/// The model is equilibrated for `config.skip` sweeps whose samples are
/// discarded, then sampled for `config.sweeps` production sweeps. A
/// non-finite energy surfaces as [`RunError::NonFiniteEnergy`] for this run
/// alone; concurrent runs at other temperatures are unaffected.
pub fn run_with<V, R>(
    model: &mut LatticeModel<V>,
    rule: UpdateRule,
    config: &RunConfig,
    estimator: &dyn AcceptanceErrorEstimator,
    rng: &mut R,
) -> Result<ObservableSet, RunError>
where
    V: SpinVariant,
    R: Rng + ?Sized,
{
    if config.sweeps == 0 {
        return Err(RunError::EmptyProduction);
    }
    if !model.energy().is_finite() {
        return Err(RunError::NonFiniteEnergy { kt: model.kt() });
    }

    let mut accumulator = BlockAccumulator::new(config.block_len, model.site_count())?;

    for _ in 0..config.skip {
        mcmc::sweep(model, rule, rng);
    }
    for _ in 0..config.sweeps {
        accumulator.push(mcmc::sweep(model, rule, rng));
    }

    accumulator.finalize(model.kt(), estimator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::Lattice;
    use crate::model::Couplings;
    use crate::rng::stream;
    use crate::spin::Ising;

    #[test]
    fn zero_production_sweeps_rejected() {
        let lat = Lattice::chain(8).unwrap();
        let mut model = LatticeModel::new(lat, Ising, Couplings::default(), 0);
        let config = RunConfig {
            sweeps: 0,
            skip: 0,
            block_len: 10,
        };
        let err = run(&mut model, UpdateRule::Metropolis, &config, &mut stream(0, 0));
        assert_eq!(err.unwrap_err(), RunError::EmptyProduction);
    }

    #[test]
    fn non_finite_couplings_fail_alone() {
        let lat = Lattice::chain(8).unwrap();
        let mut model = LatticeModel::new(
            lat,
            Ising,
            Couplings {
                j: f64::NAN,
                h: 0.0,
            },
            0,
        );
        let config = RunConfig {
            sweeps: 10,
            skip: 0,
            block_len: 5,
        };
        let err = run(&mut model, UpdateRule::Metropolis, &config, &mut stream(0, 0));
        assert!(matches!(
            err.unwrap_err(),
            RunError::NonFiniteEnergy { .. }
        ));
    }
}
