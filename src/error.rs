// error.rs - Typed failures for construction and for individual runs

use std::error::Error;
use std::fmt;

/// Rejected parameters, reported at construction or configuration time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BuildError {
    /// Lattice extent of zero sites.
    ZeroLength,
    /// Site count exceeds the u32 neighbor-table index space.
    LatticeTooLarge { sites: usize },
    /// Potts models need at least two states.
    PottsStates(u8),
    /// Temperature must be finite and strictly positive.
    Temperature(f64),
    /// Blocks must hold at least one sweep.
    ZeroBlockLength,
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::ZeroLength => write!(f, "lattice length must be at least 1"),
            BuildError::LatticeTooLarge { sites } => {
                write!(f, "lattice with {sites} sites exceeds the index space")
            }
            BuildError::PottsStates(q) => {
                write!(f, "Potts model needs q >= 2 states, got {q}")
            }
            BuildError::Temperature(kt) => {
                write!(f, "temperature must be finite and positive, got {kt}")
            }
            BuildError::ZeroBlockLength => write!(f, "block length must be at least 1"),
        }
    }
}

impl Error for BuildError {}

/// A single simulation run that could not produce a valid observable set.
/// One failed temperature point never takes down its siblings.
#[derive(Debug, Clone, PartialEq)]
pub enum RunError {
    InvalidConfig(BuildError),
    /// Production phase of zero sweeps.
    EmptyProduction,
    /// The cached energy left the finite range (NaN or infinite couplings,
    /// or NaN propagation from the configuration).
    NonFiniteEnergy { kt: f64 },
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::InvalidConfig(e) => write!(f, "invalid run configuration: {e}"),
            RunError::EmptyProduction => write!(f, "production phase needs at least one sweep"),
            RunError::NonFiniteEnergy { kt } => {
                write!(f, "energy became non-finite during the run at kT = {kt}")
            }
        }
    }
}

impl Error for RunError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RunError::InvalidConfig(e) => Some(e),
            _ => None,
        }
    }
}

impl From<BuildError> for RunError {
    fn from(e: BuildError) -> Self {
        RunError::InvalidConfig(e)
    }
}
