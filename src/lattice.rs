// lattice.rs - Periodic 1D/2D lattices with a precomputed neighbor table

use crate::error::BuildError;

/// Periodic hypercubic lattice in one or two dimensions.
///
/// Sites are indexed in row-major order; dimension 0 has stride 1. The
/// neighbor table is precomputed so every lookup in the hot loop is a single
/// indexed load. Element `(site * n_dims + d) * 2` is the forward neighbor in
/// direction `d`, the following element the backward one.
#[derive(Debug, Clone)]
pub struct Lattice {
    length: usize,
    n_dims: usize,
    n_sites: usize,
    neighbors: Vec<u32>,
}

impl Lattice {
    /// Periodic chain of `length` sites.
    pub fn chain(length: usize) -> Result<Self, BuildError> {
        Self::build(length, 1)
    }

    /// Periodic `length` x `length` square lattice.
    pub fn square(length: usize) -> Result<Self, BuildError> {
        Self::build(length, 2)
    }

    fn build(length: usize, n_dims: usize) -> Result<Self, BuildError> {
        if length == 0 {
            return Err(BuildError::ZeroLength);
        }
        let n_sites = length.pow(n_dims as u32);
        if n_sites > u32::MAX as usize {
            return Err(BuildError::LatticeTooLarge { sites: n_sites });
        }

        let mut neighbors = vec![0u32; n_sites * n_dims * 2];
        for i in 0..n_sites {
            let coords = [i % length, i / length];
            for d in 0..n_dims {
                for (slot, step) in [(0, 1isize), (1, -1isize)] {
                    let mut c = coords;
                    c[d] = (coords[d] as isize + step).rem_euclid(length as isize) as usize;
                    neighbors[(i * n_dims + d) * 2 + slot] = (c[0] + c[1] * length) as u32;
                }
            }
        }

        Ok(Self {
            length,
            n_dims,
            n_sites,
            neighbors,
        })
    }

    /// Extent along one dimension.
    #[inline(always)]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Number of spatial dimensions (1 or 2).
    #[inline(always)]
    pub fn n_dims(&self) -> usize {
        self.n_dims
    }

    /// Total number of sites: L or L².
    #[inline(always)]
    pub fn site_count(&self) -> usize {
        self.n_sites
    }

    /// Forward neighbor of `site` in direction `d`. Iterating forward
    /// neighbors only visits each unordered bond exactly once.
    #[inline(always)]
    pub fn forward(&self, site: usize, d: usize) -> usize {
        self.neighbors[(site * self.n_dims + d) * 2] as usize
    }

    /// All neighbors of `site`: 2 entries in 1D, 4 in 2D.
    #[inline(always)]
    pub fn neighbors(&self, site: usize) -> &[u32] {
        &self.neighbors[site * self.n_dims * 2..(site + 1) * self.n_dims * 2]
    }
}
