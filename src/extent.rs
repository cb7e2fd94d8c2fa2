use crate::params::DungeonParameters;

use ilattice3::Extent;

impl DungeonParameters {
    /// The open interior of the maze below the entrance. The boundaries themselves are never
    /// claimed.
    pub fn maze_body_extent(&self) -> Extent {
        Extent::from_min_and_local_supremum(
            [
                self.min_tile_x() + 1,
                self.min_tile_y() + 1,
                self.min_tile_z() + 1,
            ]
            .into(),
            [
                self.max_tile_x() - self.min_tile_x() - 1,
                self.max_tile_y() - self.min_tile_y() - 1,
                self.max_tile_z() - self.min_tile_z() - 1,
            ]
            .into(),
        )
    }

    /// The entrance shaft column, clipped vertically to `region` since the shaft has no upper
    /// bound.
    pub fn entrance_shaft_extent(&self, region: &Extent) -> Extent {
        let region_min = region.get_minimum();
        let region_sup = region.get_local_supremum();

        Extent::from_min_and_local_supremum(
            [self.entrance.x, region_min.y, self.entrance.z].into(),
            [self.room_diameter + 1, region_sup.y, self.room_diameter + 1].into(),
        )
    }
}
