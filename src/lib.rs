pub mod error;
pub mod grid;
pub mod lattice;
pub mod mcmc;
pub mod model;
pub mod rng;
pub mod run;
pub mod spin;
pub mod stats;
