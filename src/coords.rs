//! Mapping between world coordinates, room IDs and room-local coordinates.
//!
//! A room ID is `(column x, floor, column z)`, where the floor index grows as Y decreases below
//! the entrance. Local Y also grows downward, which is how the staircase templates are authored.
//!
//! All divisions here truncate toward zero (Rust's `/` and `%`), NOT floor division. Existing
//! geometry depends on this, including for negative offsets.

use crate::params::DungeonParameters;

use ilattice3::Point;

impl DungeonParameters {
    pub fn min_tile_x(&self) -> i32 {
        self.entrance.x
    }

    pub fn max_tile_x(&self) -> i32 {
        self.entrance.x + self.maze_width * self.room_diameter
    }

    pub fn min_tile_y(&self) -> i32 {
        self.entrance.y - self.maze_depth * self.floor_period()
    }

    pub fn max_tile_y(&self) -> i32 {
        self.entrance.y
    }

    pub fn min_tile_z(&self) -> i32 {
        self.entrance.z
    }

    pub fn max_tile_z(&self) -> i32 {
        self.entrance.z + self.maze_height * self.room_diameter
    }

    /// True if `pos` is in the column directly under (and over) the entrance, down to the bottom
    /// of the maze.
    pub fn is_in_entrance_shaft(&self, pos: &Point) -> bool {
        pos.x >= self.entrance.x
            && pos.x < self.entrance.x + self.room_diameter
            && pos.z >= self.entrance.z
            && pos.z < self.entrance.z + self.room_diameter
            && pos.y > self.min_tile_y()
    }

    pub fn is_inside_boundaries(&self, pos: &Point) -> bool {
        if self.is_in_entrance_shaft(pos) {
            return true;
        }

        pos.x > self.min_tile_x()
            && pos.y > self.min_tile_y()
            && pos.z > self.min_tile_z()
            && pos.x < self.max_tile_x()
            && pos.y < self.max_tile_y()
            && pos.z < self.max_tile_z()
    }

    pub fn room_id_for(&self, pos: &Point) -> Option<Point> {
        if !self.is_inside_boundaries(pos) {
            return None;
        }

        Some(self.room_cell_for(pos))
    }

    /// The room cell `pos` falls in, whether or not it is inside the maze.
    pub fn room_cell_for(&self, pos: &Point) -> Point {
        // The shaft has no upper bound, so the vertical offset may not fit in an i32.
        let dy = i64::from(pos.y) - i64::from(self.entrance.y);

        let x = (pos.x - self.entrance.x) / self.room_diameter;
        let floor = (-dy / i64::from(self.floor_period())) as i32;
        let z = (pos.z - self.entrance.z) / self.room_diameter;

        [x, floor, z].into()
    }

    /// Position of `pos` inside its room. Above the entrance plane the vertical remainder is
    /// measured from the other end of the period, so it lands in `1..=floor_period()`.
    pub fn local_position_for(&self, pos: &Point) -> Point {
        let period = i64::from(self.floor_period());
        let dy = i64::from(pos.y) - i64::from(self.entrance.y);

        let x = (pos.x - self.entrance.x) % self.room_diameter;
        let y = if pos.y > self.entrance.y {
            period - dy % period
        } else {
            -dy % period
        };
        let z = (pos.z - self.entrance.z) % self.room_diameter;

        [x, y as i32, z].into()
    }

    /// Inverse of `room_id_for` + `local_position_for` for rooms at or below the entrance plane.
    pub fn world_position_for(&self, room_id: &Point, local: &Point) -> Point {
        [
            self.entrance.x + room_id.x * self.room_diameter + local.x,
            self.entrance.y - (room_id.y * self.floor_period() + local.y),
            self.entrance.z + room_id.z * self.room_diameter + local.z,
        ]
        .into()
    }

    /// The middle of the lowest open layer of a room. Tunnels run between these.
    pub fn room_anchor(&self, room_id: &Point) -> Point {
        let half = self.room_diameter / 2;

        self.world_position_for(room_id, &[half, self.room_height, half].into())
    }

    /// True if `local` lies within the `room_diameter` x `floor_period` x `room_diameter` cell.
    pub fn is_inside_room(&self, local: &Point) -> bool {
        local.x >= 0
            && local.y >= 0
            && local.z >= 0
            && local.x < self.room_diameter
            && local.y < self.floor_period()
            && local.z < self.room_diameter
    }
}
