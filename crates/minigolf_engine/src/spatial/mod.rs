//! Spatial partitioning data structures
//!
//! Provides the horizontal broad-phase index used by the collision world.

mod quadtree;

pub use quadtree::{QuadEntry, QuadNode, QuadTree, QuadTreeConfig};
