//! Planar geometry collaborators.

pub mod polygon;
