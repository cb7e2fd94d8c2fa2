//! Procedurally generated multi-floor mazes for infinite voxel worlds.
//!
//! A `DungeonGenerator` lays out the whole maze once from its `DungeonParameters`, then answers
//! per-voxel queries: `true` means the maze claims that voxel as open space, `false` means the
//! terrain there should be left alone.

pub mod coords;
pub mod extent;
pub mod generator;
pub mod graph;
pub mod map_types;
pub mod params;
pub mod room;
pub mod sampling;
pub mod spiral;
pub mod tunnel;

pub use generator::DungeonGenerator;
pub use map_types::dungeon::DungeonLayout;
pub use params::{DungeonParameters, ParameterError};
pub use room::RoomTile;

use ilattice3::Point;

/// Implement this to receive the voxels a dungeon claims in a region. The dungeon never chooses a
/// material; that is up to the encoder.
pub trait VoxelEncoder {
    fn encode_voxel(&mut self, point: &Point);
}
