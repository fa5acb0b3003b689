use crate::helpe::*;

type ActiveJobs = IndexMap<JobId, Job, BuildHasherDefault<AHasher>>;

/// Book-keeping for the jobs currently occupying the [`AddressSpace`].
///
/// Jobs are kept in an [`IndexMap`] so that (i) picking one uniformly
/// at random is a matter of drawing an index and (ii) removal by id is
/// cheap. Removal is a *swap*-remove: the last entry takes the place of the
/// removed one, so the relative order of the remaining jobs is **not**
/// preserved. Victims are picked at random anyway, so nobody should care.
#[derive(Debug, Clone)]
pub struct JobRegistry {
    active:     ActiveJobs,
    next_id:    JobId,
}

impl Default for JobRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl JobRegistry {
    pub fn new() -> Self {
        Self {
            active:     ActiveJobs::default(),
            next_id:    1,
        }
    }

    /// Registers a freshly placed job under the next available id.
    /// Ids are never recycled, even after their jobs are gone.
    pub fn add(&mut self, size: Cells, start: Cells) -> Job {
        let job = Job {
            id: self.next_id,
            size,
            start,
        };
        self.next_id += 1;
        assert!(self.active.insert(job.id, job).is_none(), "Job id {} issued twice.", job.id);

        job
    }

    /// Uniformly picks one of the active jobs.
    ///
    /// Returns `None` on an empty registry, in which case the generator
    /// is left untouched.
    pub fn pick_random<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Job> {
        if self.active.is_empty() {
            return None;
        }
        let random_idx = rng.gen_range(0..self.active.len());

        self.active
            .get_index(random_idx)
            .map(|(_, j)| *j)
    }

    /// Forgets about job `id`, if it is active. Does not preserve
    /// the order of the rest.
    pub fn remove(&mut self, id: JobId) -> Option<Job> {
        self.active.swap_remove(&id)
    }

    pub fn get(&self, id: JobId) -> Option<&Job> {
        self.active.get(&id)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Job> {
        self.active.values()
    }

    /// Total number of cells held by active jobs.
    pub fn occupied(&self) -> Cells {
        self.active
            .values()
            .map(|j| j.size)
            .sum()
    }

    /// The id that the next [`add`](JobRegistry::add) will hand out.
    pub fn next_id(&self) -> JobId {
        self.next_id
    }
}
