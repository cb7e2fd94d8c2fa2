use crate::{
    params::DungeonParameters,
    room::{RoomTile, StaircaseTemplates},
    sampling::{dungeon_rng, sample_below, sample_offset},
    tunnel::carve,
};

use fnv::FnvHashMap;
use ilattice3::Point;
use rand::Rng;

/// Number of through-staircase cells stacked in the entrance column, counting the entrance floor
/// itself and the cells above it.
pub const ENTRANCE_SHAFT_FLOORS: i32 = 20;

/// Rooms per floor are drawn from `[MIN_ROOMS_PER_FLOOR, MIN_ROOMS_PER_FLOOR + ROOM_COUNT_SPREAD)`.
pub const MIN_ROOMS_PER_FLOOR: i32 = 5;
pub const ROOM_COUNT_SPREAD: i32 = 3;

/// Room half-extents (in room cells) are drawn from `[MIN_ROOM_HALF_EXTENT,
/// MIN_ROOM_HALF_EXTENT + ROOM_HALF_EXTENT_SPREAD)`.
pub const MIN_ROOM_HALF_EXTENT: i32 = 2;
pub const ROOM_HALF_EXTENT_SPREAD: i32 = 3;

/// A room placed by the builder, in room-ID space.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PlacedRoom {
    pub center: Point,
    pub half_width: i32,
    pub half_depth: i32,
    /// World position where the tunnel from the previous room stopped. `None` for the first room
    /// of a floor.
    pub tunnel_end: Option<Point>,
}

impl PlacedRoom {
    /// True if `room_id` lies in the footprint opened around this room's center.
    pub fn covers(&self, room_id: &Point) -> bool {
        room_id.y == self.center.y
            && room_id.x >= (self.center.x - self.half_width).max(0)
            && room_id.x < self.center.x + self.half_width
            && room_id.z >= (self.center.z - self.half_depth).max(0)
            && room_id.z < self.center.z + self.half_depth
    }
}

/// The rooms of one floor, in generation order. Consecutive rooms are joined by tunnels, the
/// first holds the up staircase and the last holds the down staircase.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FloorPlan {
    pub floor: i32,
    pub rooms: Vec<PlacedRoom>,
}

impl FloorPlan {
    pub fn up_stairs(&self) -> Option<&PlacedRoom> {
        self.rooms.first()
    }

    pub fn down_stairs(&self) -> Option<&PlacedRoom> {
        self.rooms.last()
    }
}

/// The finished dungeon: room tiles keyed by room ID and tunnel voxels keyed by world position.
/// Never mutated after `generate` returns.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DungeonLayout {
    params: DungeonParameters,
    pub(crate) tiles: FnvHashMap<Point, RoomTile>,
    pub(crate) tunnels: FnvHashMap<Point, bool>,
    pub(crate) floors: Vec<FloorPlan>,
    rooms_per_floor: i32,
}

impl DungeonLayout {
    /// Lays out the whole dungeon. Random draws happen in this order:
    ///
    /// 1. the number of rooms per floor, once;
    /// 2. then for every floor, for every room:
    ///    - column X and Z of the room center (not for the first room of a floor),
    ///    - half-width, then half-depth,
    ///    - the tunnel from the previous room (not for the first room of a floor).
    ///
    /// `params` are assumed to be valid; see `DungeonParameters::validate`.
    pub fn generate(params: &DungeonParameters) -> Self {
        log::debug!("Generating dungeon layout for seed {}", params.seed);

        let mut rng = dungeon_rng(params.seed);
        let templates = StaircaseTemplates::new(params);

        let mut builder = LayoutBuilder {
            params,
            tiles: FnvHashMap::default(),
            tunnels: FnvHashMap::default(),
        };

        builder.dig_entrance_shaft(&templates);

        let rooms_per_floor = sample_offset(&mut rng, MIN_ROOMS_PER_FLOOR, ROOM_COUNT_SPREAD);
        log::debug!("{} rooms per floor", rooms_per_floor);

        let mut floors = Vec::new();
        let mut previous_stairs: Option<Point> = None;
        for floor in 1..params.maze_depth {
            let plan = builder.lay_out_floor(
                floor,
                rooms_per_floor,
                previous_stairs,
                &templates,
                &mut rng,
            );
            previous_stairs = plan.down_stairs().map(|r| r.center);
            floors.push(plan);
        }

        let LayoutBuilder { tiles, tunnels, .. } = builder;
        log::debug!(
            "Dungeon layout done: {} floors, {} room tiles, {} tunnel voxels",
            floors.len(),
            tiles.len(),
            tunnels.len()
        );

        let layout = DungeonLayout {
            params: params.clone(),
            tiles,
            tunnels,
            floors,
            rooms_per_floor,
        };
        if !layout.is_connected() {
            log::warn!("Dungeon room graph for seed {} is disconnected", params.seed);
        }

        layout
    }

    pub fn params(&self) -> &DungeonParameters {
        &self.params
    }

    pub fn tile(&self, room_id: &Point) -> Option<&RoomTile> {
        self.tiles.get(room_id)
    }

    /// `Some` only where a tunnel was carved.
    pub fn tunnel_override(&self, pos: &Point) -> Option<bool> {
        self.tunnels.get(pos).cloned()
    }

    pub fn floors(&self) -> &[FloorPlan] {
        &self.floors
    }

    pub fn rooms_per_floor(&self) -> i32 {
        self.rooms_per_floor
    }

    pub fn num_tiles(&self) -> usize {
        self.tiles.len()
    }

    pub fn num_tunnel_voxels(&self) -> usize {
        self.tunnels.len()
    }
}

struct LayoutBuilder<'a> {
    params: &'a DungeonParameters,
    tiles: FnvHashMap<Point, RoomTile>,
    tunnels: FnvHashMap<Point, bool>,
}

impl<'a> LayoutBuilder<'a> {
    /// The entrance floor and the cells stacked above it, so the descent from the surface arrives
    /// at the entrance.
    fn dig_entrance_shaft(&mut self, templates: &StaircaseTemplates) {
        for level in 0..ENTRANCE_SHAFT_FLOORS {
            self.tiles.insert(
                [0, -level, 0].into(),
                RoomTile::ThroughStaircase(templates.through.clone()),
            );
        }
    }

    fn lay_out_floor(
        &mut self,
        floor: i32,
        num_rooms: i32,
        previous_stairs: Option<Point>,
        templates: &StaircaseTemplates,
        rng: &mut impl Rng,
    ) -> FloorPlan {
        let mut plan = FloorPlan {
            floor,
            rooms: Vec::new(),
        };

        for i in 0..num_rooms {
            let center: Point = if i == 0 {
                // Directly under the previous floor's way down, or the entrance column.
                let (x, z) = previous_stairs.map_or((0, 0), |p| (p.x, p.z));
                let center: Point = [x, floor, z].into();
                self.tiles
                    .insert(center, RoomTile::UpStaircase(templates.up.clone()));

                center
            } else {
                let x = sample_below(rng, self.params.maze_width);
                let z = sample_below(rng, self.params.maze_height);

                [x, floor, z].into()
            };

            let half_width = sample_offset(rng, MIN_ROOM_HALF_EXTENT, ROOM_HALF_EXTENT_SPREAD);
            let half_depth = sample_offset(rng, MIN_ROOM_HALF_EXTENT, ROOM_HALF_EXTENT_SPREAD);
            self.open_room(&center, half_width, half_depth);

            let tunnel_end = match plan.rooms.last() {
                Some(previous) => {
                    let previous_center = previous.center;
                    Some(self.dig_tunnel(&previous_center, &center, rng))
                }
                None => None,
            };

            plan.rooms.push(PlacedRoom {
                center,
                half_width,
                half_depth,
                tunnel_end,
            });
        }

        if let Some(last) = plan.down_stairs() {
            self.tiles
                .insert(last.center, RoomTile::DownStaircase(templates.down.clone()));
        }

        log::debug!("Floor {}: {:?}", floor, plan.rooms);

        plan
    }

    /// Fills the footprint around `center` with open room tiles, keeping any tile already placed.
    /// The footprint is clamped at the maze origin but not at its far edges.
    fn open_room(&mut self, center: &Point, half_width: i32, half_depth: i32) {
        for x in (center.x - half_width).max(0)..center.x + half_width {
            for z in (center.z - half_depth).max(0)..center.z + half_depth {
                self.tiles
                    .entry([x, center.y, z].into())
                    .or_insert(RoomTile::OpenRoom);
            }
        }
    }

    /// Returns the voxel the walk stopped on, which is `from_room`'s anchor if it never moved.
    fn dig_tunnel(&mut self, from_room: &Point, to_room: &Point, rng: &mut impl Rng) -> Point {
        let from = self.params.room_anchor(from_room);
        let to = self.params.room_anchor(to_room);

        let path = carve(&from, &to, rng);
        let end = path.last().cloned().unwrap_or(from);
        log::trace!(
            "Tunnel {:?} -> {:?}: {} voxels",
            from_room,
            to_room,
            path.len()
        );
        for voxel in path {
            self.tunnels.insert(voxel, true);
        }

        end
    }
}
