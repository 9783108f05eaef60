use std::path::Path;

use log::debug;
use wepc_core::errors::WepcError;
use wepc_core::{Dataset, SegmentStorage};
use wepc_system::WeSystem;

use crate::text::{load_table, with_path};
use crate::DatasetLoader;

/// Loads a per-segment Cartesian coordinate dump into a `(frames, atoms, 3)` dataset.
///
/// Row boundaries in the file are irrelevant; only the total number of reals
/// has to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordLoader {
    n_frames: usize,
    n_atoms: usize,
}

impl CoordLoader {
    /// Creates a loader for a fixed frame and atom count.
    pub fn new(n_frames: usize, n_atoms: usize) -> Self {
        Self { n_frames, n_atoms }
    }

    /// Creates a loader configured from an initialised system.
    pub fn from_system(system: &WeSystem) -> Self {
        let coords = &system.config().coords;
        Self::new(coords.n_frames, coords.n_atoms)
    }

    /// Shape of the produced dataset.
    pub fn shape(&self) -> [usize; 3] {
        [self.n_frames, self.n_atoms, 3]
    }
}

impl DatasetLoader for CoordLoader {
    fn name(&self) -> &'static str {
        "coords"
    }

    fn load(
        &self,
        field: &str,
        path: &Path,
        segment: &mut dyn SegmentStorage,
        _single_point: bool,
    ) -> Result<(), WepcError> {
        let table = load_table(path)?;
        let dataset = Dataset::new(self.shape().to_vec(), table.as_slice().to_vec())
            .map_err(|err| with_path(err, path))?;
        debug!("{field}: coordinates {:?} from {}", dataset.shape(), path.display());
        segment.set_dataset(field, dataset);
        Ok(())
    }
}
