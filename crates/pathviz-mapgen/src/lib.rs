//! Layout generators for the pathviz visualizer.
//!
//! [`MapGen`] turns a [`Preset`] into a [`Grid`](pathviz_core::Grid) with
//! both endpoints placed. Every layout it returns is solvable: mazes are
//! perfect on the odd-coordinate lattice with the endpoints tunnelled in,
//! and random scatter is re-rolled until the endpoints connect.

mod lattice;
mod mapgen;
mod preset;

pub use mapgen::{DEFAULT_DENSITY, MAX_ATTEMPTS, MapGen};
pub use preset::{Preset, UnknownPreset};
