//! Calculations like metrics, neighborhood, nearest neighbor search, lattice geometry, ...

pub mod hex;
pub mod metric;
pub mod neighborhood;
pub mod nn;
pub mod norm;
pub mod size;
