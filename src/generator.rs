use crate::{
    map_types::dungeon::DungeonLayout,
    params::{DungeonParameters, ParameterError},
    VoxelEncoder,
};

use ilattice3::{Extent, Point};
use std::sync::Arc;

/// Answers occupancy queries against one generated layout.
///
/// The layout is built once in `new` and shared read-only by every clone, so a single generator
/// can serve any number of threads.
#[derive(Clone, Debug)]
pub struct DungeonGenerator {
    layout: Arc<DungeonLayout>,
}

impl DungeonGenerator {
    pub fn new(params: DungeonParameters) -> Result<Self, ParameterError> {
        params.validate()?;

        Ok(DungeonGenerator {
            layout: Arc::new(DungeonLayout::generate(&params)),
        })
    }

    /// Serves queries against a layout that was already built.
    pub fn from_layout(layout: DungeonLayout) -> Self {
        DungeonGenerator {
            layout: Arc::new(layout),
        }
    }

    /// A generator with default parameters and the given seed.
    pub fn from_seed(seed: u64) -> Self {
        DungeonGenerator {
            layout: Arc::new(DungeonLayout::generate(&DungeonParameters::with_seed(seed))),
        }
    }

    pub fn params(&self) -> &DungeonParameters {
        self.layout.params()
    }

    pub fn layout(&self) -> &DungeonLayout {
        &self.layout
    }

    /// True if the dungeon claims `pos` as open space. False means "leave the terrain alone",
    /// which is also the answer everywhere outside the dungeon boundaries.
    pub fn contains_world_position(&self, pos: &Point) -> bool {
        let params = self.layout.params();
        let room_id = match params.room_id_for(pos) {
            Some(id) => id,
            None => return false,
        };

        if let Some(carved) = self.layout.tunnel_override(pos) {
            return carved;
        }

        match self.layout.tile(&room_id) {
            Some(tile) => tile.is_passable(&params.local_position_for(pos)),
            None => false,
        }
    }

    /// Conservative test for whether any voxel of `region` could be claimed. Never returns false
    /// for a region that contains a claimed voxel.
    pub fn intersects_region(&self, region: &Extent) -> bool {
        let params = self.layout.params();

        !region
            .intersection(&params.entrance_shaft_extent(region))
            .is_empty()
            || !region.intersection(&params.maze_body_extent()).is_empty()
    }

    /// Writes every claimed voxel of `region` into `encoder` and returns how many there were.
    pub fn generate_region(&self, region: &Extent, encoder: &mut impl VoxelEncoder) -> usize {
        if !self.intersects_region(region) {
            return 0;
        }

        let mut num_claimed = 0;
        for p in region {
            if self.contains_world_position(&p) {
                encoder.encode_voxel(&p);
                num_claimed += 1;
            }
        }
        log::trace!("{} dungeon voxels in {:?}", num_claimed, region);

        num_claimed
    }
}
