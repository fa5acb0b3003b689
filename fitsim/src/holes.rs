use crate::helpe::*;

impl Hole {
    pub fn new(start: Cells, len: Cells) -> Self {
        Self { start, len }
    }

    /// First cell *after* the hole.
    pub fn end(&self) -> Cells {
        self.start + self.len
    }

    pub fn fits(&self, size: Cells) -> bool {
        self.len >= size
    }

    /// Space left unused if a job of `size` cells is put here, or `None`
    /// if it doesn't fit at all.
    pub fn leftover(&self, size: Cells) -> Option<Cells> {
        self.len.checked_sub(size)
    }
}

impl fmt::Display for Hole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hole at index {} {} blocks long", self.start, self.len)
    }
}

/// Collects the holes of `space` in a single left-to-right pass.
///
/// A fully free space yields exactly one hole spanning all of it; a fully
/// occupied one yields nothing.
pub fn scan(space: &AddressSpace) -> Holes {
    let mut res = vec![];
    // Start of the free run we're currently inside of, if any.
    let mut run_start: Option<Cells> = None;
    for (idx, cell) in space.cells().iter().enumerate() {
        match (cell, run_start) {
            (None, None)        => { run_start = Some(idx); },
            (Some(_), Some(s))  => {
                res.push(Hole::new(s, idx - s));
                run_start = None;
            },
            _                   => {}
        }
    }
    if let Some(s) = run_start {
        res.push(Hole::new(s, space.len() - s));
    }

    res
}
