pub use std::{
    collections::HashMap,
    hash::BuildHasherDefault,
    fmt,
};
pub use thiserror::Error;
pub use itertools::Itertools;
pub use indexmap::IndexMap;
pub use ahash::AHasher;
pub use clap::{Parser, ValueEnum};
pub use rand::{Rng, SeedableRng};
pub use rand_chacha::ChaCha8Rng;
pub use log::{debug, info, trace};

pub use crate::{AddressSpace, Hole, Job,
    holes::scan,
    fit::*,
    registry::*,
    engine::*,
    analyze::Fragmentation,
};

/// The unit for measuring both positions and extents within the
/// [`AddressSpace`]. A job of size 3 placed at 5 owns cells 5, 6 and 7.
pub type Cells = usize;

/// Identifies a [`Job`]. Zero is never handed out: ids start at 1.
pub type JobId = u64;

/// The unit of simulated time.
pub type Tick = usize;

/// Free runs of an [`AddressSpace`], in order of ascending start.
pub type Holes = Vec<Hole>;

/// No deallocation takes place before this tick has passed, so that
/// the space has a chance to fill up first.
pub const WARMUP_TICKS: Tick = 100;

/// Spaces up to this many cells are small enough to be dumped to the
/// terminal on every tick.
pub const SMALL_SPACE: Cells = 16;

#[derive(Error, Debug, PartialEq)]
/// Appears while validating the parameters of a simulation, before any
/// state is built. The engine itself assumes a valid [`SimConfig`].
pub enum ConfigError {
    #[error("Address space must hold at least one cell.")]
    EmptySpace,
    #[error("Simulation must last at least one tick.")]
    NoTicks,
    #[error("Maximum job size must be positive.")]
    ZeroJobSize,
    #[error("{name} must be a probability within [0, 1], got {value}.")]
    BadProbability {
        name:   &'static str,
        value:  f64,
    },
}
