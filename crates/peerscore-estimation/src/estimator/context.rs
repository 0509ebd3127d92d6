//! Read-only inputs shared by the strategy stages of one run.

use rayon::prelude::*;

use peerscore_core::PopulationSnapshot;

/// What every strategy stage may read during one `compute()` call.
#[derive(Debug, Clone, Copy)]
pub struct RunContext<'a> {
    pub snapshot: &'a PopulationSnapshot,
    /// Stage-1 output, indexed by user id.
    pub reputations: &'a [Option<f64>],
    /// Whether per-entity work may run on the rayon pool.
    pub parallel: bool,
}

impl<'a> RunContext<'a> {
    /// Map `0..len` through `f`, in parallel when allowed.
    ///
    /// The output is in index order either way, so results never depend on
    /// scheduling.
    pub fn map_indexed<T, F>(&self, len: usize, f: F) -> Vec<T>
    where
        T: Send,
        F: Fn(usize) -> T + Sync + Send,
    {
        map_indexed(self.parallel, len, f)
    }
}

pub(crate) fn map_indexed<T, F>(parallel: bool, len: usize, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Sync + Send,
{
    if parallel {
        (0..len).into_par_iter().map(f).collect()
    } else {
        (0..len).map(f).collect()
    }
}
