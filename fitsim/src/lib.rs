//! Welcome to `fitsim`!
//!
//! A discrete-time simulator of *contiguous* memory allocation. Jobs of
//! random sizes arrive and depart over a fixed-size, linear address space,
//! and each arrival is placed according to one of three classic rules:
//! first, worst or best fit. What comes out is a tally of successful
//! versus failed placements, i.e., a measure of how badly each rule
//! fragments the space.

mod job;
mod space;
mod holes;

pub mod fit;
pub mod registry;
pub mod engine;
pub mod analyze;
pub mod helpe;

pub use crate::helpe::*;

/// A block of contiguous cells owned by one requester.
///
/// A [`Job`] comes to life only when a fit strategy has found a hole
/// for it, and dies only when the engine deallocates it--at which point
/// *all* of its [`size`](Job::size) cells, starting at [`start`](Job::start),
/// are freed in one go. There is no such thing as a partially freed job.
///
/// Identifiers are handed out by the [`JobRegistry`] in increasing order,
/// starting from 1, and are never recycled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Job {
    pub id:     JobId,
    pub size:   Cells,
    pub start:  Cells,
}

/// The simulated "disk": a fixed number of cells, each of them either free
/// or tagged with the [`JobId`] of its owner.
///
/// The space is created once, all cells free, and never resized. It is only
/// ever mutated by the engine, once per tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressSpace {
    cells:  Vec<Option<JobId>>,
}

/// A *maximal* run of free cells.
///
/// Holes are a derived structure: they are recomputed from the
/// [`AddressSpace`] (see [`scan`]) every time they are needed, and never
/// cached across mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hole {
    pub start:  Cells,
    pub len:    Cells,
}
