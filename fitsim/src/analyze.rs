use crate::helpe::*;

/// Returns `true` if holes and job extents add up to the whole space.
pub fn partition_holds(state: &SimState) -> bool {
    let free: Cells = scan(&state.space)
        .iter()
        .map(|h| h.len)
        .sum();

    free + state.jobs.occupied() == state.space.len()
}

/// Checks that every registered job owns exactly the cells it was
/// written to, and that no cell is owned by an unregistered job.
pub fn extents_consistent(state: &SimState) -> bool {
    let mut owned: HashMap<JobId, Cells> = HashMap::new();
    for id in state.space.cells().iter().flatten() {
        *owned.entry(*id).or_default() += 1;
    }
    if owned.len() != state.jobs.len() {
        return false;
    }

    state.jobs
        .iter()
        .all(|j| {
            j.end() <= state.space.len()
            && owned.get(&j.id) == Some(&j.size)
            && state.space.cells()[j.start..j.end()]
                .iter()
                .all(|c| *c == Some(j.id))
        })
}

/// The full sanity check run after every tick in debug builds.
pub fn placement_is_valid(state: &SimState) -> bool {
    partition_holds(state) && extents_consistent(state)
}

/// A snapshot of how scattered the free space is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Fragmentation {
    pub free:           Cells,
    pub holes:          usize,
    pub largest_hole:   Cells,
}

impl Fragmentation {
    pub fn of(holes: &[Hole]) -> Self {
        Self {
            free:           holes.iter().map(|h| h.len).sum(),
            holes:          holes.len(),
            largest_hole:   holes.iter().map(|h| h.len).max().unwrap_or(0),
        }
    }

    /// External fragmentation, i.e., the share of free space that lies
    /// *outside* the largest hole. Zero if nothing is free, or if all of
    /// the free space is a single hole.
    pub fn external(&self) -> f64 {
        if self.free == 0 {
            0.0
        } else {
            1.0 - self.largest_hole as f64 / self.free as f64
        }
    }
}

impl fmt::Display for Fragmentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} free cells in {} holes (largest {}), external fragmentation {:.2}%",
            self.free,
            self.holes,
            self.largest_hole,
            self.external() * 100.0
        )
    }
}
