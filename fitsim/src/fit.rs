//! Placement decisions.
//!
//! A fit strategy is a *pure* function: it looks at the current holes and
//! the requested size and names a start index, or admits defeat. It never
//! touches the [`AddressSpace`]; committing the decision is the engine's job.
use crate::helpe::*;

/// Signature shared by all fit strategies. The engine resolves its strategy
/// to one of these once, at construction time.
pub type Chooser = fn(&[Hole], Cells) -> Option<Cells>;

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum, Debug)]
pub enum Fit {
    /// First fit: lowest-addressed hole that is big enough
    #[value(name = "FF")]
    First,
    /// Worst fit: biggest hole overall
    #[value(name = "WF")]
    Worst,
    /// Best fit: hole leaving the least space unused
    #[value(name = "BF")]
    Best,
}

impl Fit {
    pub const ALL: [Fit; 3] = [Fit::First, Fit::Worst, Fit::Best];

    pub fn chooser(self) -> Chooser {
        match self {
            Fit::First  => { first_fit },
            Fit::Worst  => { worst_fit },
            Fit::Best   => { best_fit },
        }
    }

    /// Convenience wrapper for one-off decisions.
    pub fn choose(self, holes: &[Hole], size: Cells) -> Option<Cells> {
        (self.chooser())(holes, size)
    }

    /// The short code by which the strategy is known on the command line.
    pub fn code(self) -> &'static str {
        match self {
            Fit::First  => { "FF" },
            Fit::Worst  => { "WF" },
            Fit::Best   => { "BF" },
        }
    }
}

impl fmt::Display for Fit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Start of the first hole, in ascending address order, that
/// can accommodate `size` cells.
pub fn first_fit(holes: &[Hole], size: Cells) -> Option<Cells> {
    holes.iter()
        .find(|h| h.fits(size))
        .map(|h| h.start)
}

/// Start of the largest hole, provided it can accommodate `size` cells.
///
/// If the largest hole is too small, no other hole will do. Among equally
/// large holes the lowest-addressed one wins. Note that
/// [`Iterator::max_by_key`] would pick the *last* one, hence the loop.
pub fn worst_fit(holes: &[Hole], size: Cells) -> Option<Cells> {
    let mut biggest: Option<&Hole> = None;
    for h in holes {
        match biggest {
            Some(b) if h.len <= b.len   => {},
            _                           => { biggest = Some(h); }
        }
    }

    biggest
        .filter(|b| b.fits(size))
        .map(|b| b.start)
}

/// Start of the hole that, after accommodating `size` cells, has the
/// smallest leftover.
///
/// Ties go to the lowest-addressed candidate: the first candidate sets the
/// running minimum, and only a *strictly* smaller leftover replaces it.
pub fn best_fit(holes: &[Hole], size: Cells) -> Option<Cells> {
    let mut best: Option<(Cells, Cells)> = None;
    for h in holes {
        if let Some(leftover) = h.leftover(size) {
            match best {
                Some((min_left, _)) if leftover >= min_left => {},
                _                                           => {
                    best = Some((leftover, h.start));
                    // Can't beat a perfect fit.
                    if leftover == 0 { break; }
                }
            }
        }
    }

    best.map(|(_, start)| start)
}
