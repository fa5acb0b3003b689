use crate::helpe::*;

impl Job {
    /// First cell *after* the job's extent.
    pub fn end(&self) -> Cells {
        self.start + self.size
    }

    /// Returns `true` if cell `idx` belongs to the job's extent.
    pub fn covers(&self, idx: Cells) -> bool {
        self.start <= idx && idx < self.end()
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Job {} size {} index {}", self.id, self.size, self.start)
    }
}
