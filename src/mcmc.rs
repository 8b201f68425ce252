// mcmc.rs - Elementary Monte Carlo steps under the two acceptance rules

use crate::model::LatticeModel;
use crate::spin::SpinVariant;
use crate::stats::SweepSample;
use rand::Rng;

/// Acceptance rule for single-spin updates, chosen once per run and never
/// mixed within one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateRule {
    Metropolis,
    Heatbath,
}

impl UpdateRule {
    /// Probability of accepting a move with energy change `delta_e` at
    /// temperature `kt`.
    ///
    /// Metropolis returns 1 for `delta_e <= 0` before touching the
    /// exponential, so a strongly downhill move at low temperature can
    /// never overflow. The heatbath probability is evaluated as
    /// `1 / (1 + exp(delta_e / kt))`, which is finite for every input.
    #[inline]
    pub fn acceptance_probability(self, delta_e: f64, kt: f64) -> f64 {
        match self {
            UpdateRule::Metropolis => {
                if delta_e <= 0.0 {
                    1.0
                } else {
                    (-delta_e / kt).exp()
                }
            }
            UpdateRule::Heatbath => 1.0 / (1.0 + (delta_e / kt).exp()),
        }
    }

    /// Draw the acceptance coin. The `delta_e <= 0` Metropolis case skips
    /// the draw entirely.
    #[inline]
    pub fn accepts<R: Rng + ?Sized>(self, delta_e: f64, kt: f64, rng: &mut R) -> bool {
        if self == UpdateRule::Metropolis && delta_e <= 0.0 {
            return true;
        }
        rng.gen::<f64>() < self.acceptance_probability(delta_e, kt)
    }
}

/// Outcome of one elementary step. `energy` is the cached post-step total,
/// recorded whether or not the proposal was applied.
#[derive(Debug, Clone, Copy)]
pub struct StepInfo {
    pub accepted: bool,
    pub energy: f64,
}

/// One elementary Monte Carlo step: propose, price, accept or reject, apply.
#[inline]
pub fn elementary_step<V, R>(
    model: &mut LatticeModel<V>,
    rule: UpdateRule,
    rng: &mut R,
) -> StepInfo
where
    V: SpinVariant,
    R: Rng + ?Sized,
{
    let proposal = model.propose(rng);
    let delta_e = model.local_energy_delta(proposal.site, proposal.value);
    let accepted = rule.accepts(delta_e, model.kt(), rng);
    if accepted {
        model.apply_update(proposal.site, proposal.value, delta_e);
    }
    StepInfo {
        accepted,
        energy: model.energy(),
    }
}

/// One sweep: as many elementary steps as there are sites, with sites drawn
/// independently each time (a nominal pass, not a systematic one). Returns
/// the sweep's aggregated sample for the block accumulator.
pub fn sweep<V, R>(model: &mut LatticeModel<V>, rule: UpdateRule, rng: &mut R) -> SweepSample
where
    V: SpinVariant,
    R: Rng + ?Sized,
{
    let n = model.site_count();
    let mut sum_e = 0.0;
    let mut sum_e2 = 0.0;
    let mut accepted = 0u64;

    for _ in 0..n {
        let step = elementary_step(model, rule, rng);
        if step.accepted {
            accepted += 1;
        }
        sum_e += step.energy;
        sum_e2 += step.energy * step.energy;
    }

    SweepSample {
        mean_energy: sum_e / n as f64,
        mean_energy_sq: sum_e2 / n as f64,
        accepted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metropolis_always_takes_downhill_moves() {
        for delta_e in [0.0, -1e-12, -0.5, -1e3, -1e9] {
            for kt in [1e-3, 1.0, 1e6] {
                assert_eq!(
                    UpdateRule::Metropolis.acceptance_probability(delta_e, kt),
                    1.0,
                    "delta_e = {delta_e}, kT = {kt}"
                );
            }
        }
    }

    #[test]
    fn heatbath_probability_is_finite_everywhere() {
        for delta_e in [-1e9, -1.0, 0.0, 1.0, 1e9] {
            for kt in [1e-6, 1.0, 1e6] {
                let p = UpdateRule::Heatbath.acceptance_probability(delta_e, kt);
                assert!(p.is_finite(), "delta_e = {delta_e}, kT = {kt}");
                assert!((0.0..=1.0).contains(&p));
            }
        }
        // Strongly downhill at low temperature: certain acceptance, not NaN.
        assert_eq!(UpdateRule::Heatbath.acceptance_probability(-1e3, 1e-3), 1.0);
    }

    #[test]
    fn heatbath_is_half_at_zero_delta() {
        let p = UpdateRule::Heatbath.acceptance_probability(0.0, 1.0);
        assert!((p - 0.5).abs() < 1e-15);
    }
}
