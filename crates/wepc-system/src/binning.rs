use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use wepc_core::errors::{ErrorInfo, WepcError};
use wepc_core::PcoordArray;

/// Bin mapper over a rectilinear grid of progress-coordinate space.
///
/// Each binned dimension is cut at its boundaries into `[b_k, b_{k+1})`
/// intervals. Bins are numbered row-major over the dimensions in the order
/// they were supplied. Progress coordinates may carry more columns than the
/// mapper bins; extra trailing columns (such as the state label) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectilinearBinMapper {
    boundaries: Vec<Vec<f64>>,
}

impl RectilinearBinMapper {
    /// Builds a mapper; every dimension needs at least two strictly increasing boundaries.
    pub fn new(boundaries: Vec<Vec<f64>>) -> Result<Self, WepcError> {
        if boundaries.is_empty() {
            return Err(WepcError::Config(ErrorInfo::new(
                "bin-empty",
                "bin mapper needs at least one dimension",
            )));
        }
        for (dim, edges) in boundaries.iter().enumerate() {
            if edges.len() < 2 {
                return Err(WepcError::Config(
                    ErrorInfo::new("bin-edges", "each dimension needs at least two boundaries")
                        .with_context("dimension", dim.to_string())
                        .with_context("boundaries", edges.len().to_string()),
                ));
            }
            for (k, pair) in edges.windows(2).enumerate() {
                if pair[0].partial_cmp(&pair[1]) != Some(Ordering::Less) {
                    return Err(WepcError::Config(
                        ErrorInfo::new("bin-order", "bin boundaries must be strictly increasing")
                            .with_context("dimension", dim.to_string())
                            .with_context("index", (k + 1).to_string()),
                    ));
                }
            }
        }
        Ok(Self { boundaries })
    }

    /// Number of binned dimensions.
    pub fn ndim(&self) -> usize {
        self.boundaries.len()
    }

    /// Boundaries per dimension.
    pub fn boundaries(&self) -> &[Vec<f64>] {
        &self.boundaries
    }

    /// Bins along each dimension.
    pub fn bins_per_dim(&self) -> Vec<usize> {
        self.boundaries.iter().map(|edges| edges.len() - 1).collect()
    }

    /// Total number of bins.
    pub fn nbins(&self) -> usize {
        self.bins_per_dim().iter().product()
    }

    fn digitize(&self, dim: usize, value: f64) -> Result<usize, WepcError> {
        let edges = &self.boundaries[dim];
        // Number of boundaries <= value; NaN compares false everywhere and lands at 0.
        let above = edges.partition_point(|edge| *edge <= value);
        if above == 0 || above == edges.len() {
            return Err(WepcError::Bin(
                ErrorInfo::new("bin-range", "coordinate outside bin space")
                    .with_context("dimension", dim.to_string())
                    .with_context("value", value.to_string()),
            ));
        }
        Ok(above - 1)
    }

    /// Assigns one progress-coordinate row to its flattened bin index.
    pub fn assign(&self, coords: &[f32]) -> Result<usize, WepcError> {
        if coords.len() < self.ndim() {
            return Err(WepcError::shape_mismatch(
                "bin-coords",
                "coordinate columns available for binning",
                self.ndim(),
                coords.len(),
            ));
        }
        let mut index = 0;
        for (dim, edges) in self.boundaries.iter().enumerate() {
            let bin = self.digitize(dim, f64::from(coords[dim]))?;
            index = index * (edges.len() - 1) + bin;
        }
        Ok(index)
    }

    /// Assigns every frame of a progress coordinate.
    pub fn assign_rows(&self, pcoord: &PcoordArray) -> Result<Vec<usize>, WepcError> {
        pcoord.iter_rows().map(|row| self.assign(row)).collect()
    }

    /// Human-readable description of every bin, indexed like [`Self::assign`].
    pub fn labels(&self) -> Vec<String> {
        let dims = self.bins_per_dim();
        (0..self.nbins())
            .map(|flat| {
                let mut rest = flat;
                let mut per_dim = vec![0; dims.len()];
                for (dim, count) in dims.iter().enumerate().rev() {
                    per_dim[dim] = rest % count;
                    rest /= count;
                }
                let ranges: Vec<String> = per_dim
                    .iter()
                    .enumerate()
                    .map(|(dim, &bin)| {
                        let edges = &self.boundaries[dim];
                        format!("({}, {})", edges[bin], edges[bin + 1])
                    })
                    .collect();
                format!("[{}]", ranges.join(", "))
            })
            .collect()
    }
}

/// Initial walker occupancy requested for every bin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetCounts(Vec<u32>);

impl TargetCounts {
    /// Same target for each of `nbins` bins.
    pub fn uniform(nbins: usize, count: u32) -> Self {
        Self(vec![count; nbins])
    }

    /// Target for one bin.
    pub fn get(&self, bin: usize) -> Option<u32> {
        self.0.get(bin).copied()
    }

    /// Overrides the target for one bin.
    pub fn set(&mut self, bin: usize, count: u32) -> Result<(), WepcError> {
        let nbins = self.0.len();
        let slot = self.0.get_mut(bin).ok_or_else(|| {
            WepcError::Bin(
                ErrorInfo::new("target-bin", "bin index out of range")
                    .with_context("bin", bin.to_string())
                    .with_context("nbins", nbins.to_string()),
            )
        })?;
        *slot = count;
        Ok(())
    }

    /// Targets in bin order.
    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    /// Sum of all targets.
    pub fn total(&self) -> u64 {
        self.0.iter().map(|&count| u64::from(count)).sum()
    }
}
