use crate::helpe::*;

impl AddressSpace {
    /// Creates a space of `size` cells, all of them free.
    pub fn new(size: Cells) -> Self {
        Self {
            cells:  vec![None; size],
        }
    }

    pub fn len(&self) -> Cells {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Read-only view of every cell. `None` means free.
    pub fn cells(&self) -> &[Option<JobId>] {
        &self.cells
    }

    /// Owner of cell `idx`, if any. Panics if `idx` is out of bounds.
    pub fn owner(&self, idx: Cells) -> Option<JobId> {
        self.cells[idx]
    }

    pub fn free_cells(&self) -> Cells {
        self.cells
            .iter()
            .filter(|c| c.is_none())
            .count()
    }

    /// Tags cells `[start, start + len)` with `id`.
    ///
    /// Every targeted cell must be in bounds and free. Placement decisions
    /// are only ever made against freshly scanned holes, so hitting an
    /// occupied cell here means the engine is broken: we panic instead of
    /// overwriting somebody else's memory.
    pub fn write(&mut self, start: Cells, len: Cells, id: JobId) {
        assert!(len > 0, "Zero-length write requested for job {}.", id);
        let end = match start.checked_add(len) {
            Some(e) if e <= self.cells.len()    => { e },
            _                                   => {
                panic!("Job {} at [{}, +{}) exceeds space of {} cells.", id, start, len, self.cells.len());
            }
        };
        if let Some((idx, owner)) = self.cells[start..end]
            .iter()
            .enumerate()
            .find_map(|(i, c)| c.map(|o| (start + i, o))) {
                panic!("Job {} collides with job {} at cell {}.", id, owner, idx);
        }
        self.cells[start..end]
            .iter_mut()
            .for_each(|c| *c = Some(id));
    }

    /// Frees every cell owned by `id` and returns how many there were.
    ///
    /// The whole space is traversed. An id that owns nothing (stale or
    /// never issued) leaves the space untouched.
    pub fn clear(&mut self, id: JobId) -> Cells {
        let mut freed = 0;
        for c in self.cells.iter_mut() {
            if *c == Some(id) {
                *c = None;
                freed += 1;
            }
        }

        freed
    }
}

// Free cells are shown as zeros, e.g. `| 0 | 1 | 1 | 0 |`.
impl fmt::Display for AddressSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "|")?;
        for c in &self.cells {
            write!(f, " {} |", c.unwrap_or(0))?;
        }

        Ok(())
    }
}
