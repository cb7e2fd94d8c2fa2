use crate::{
    params::DungeonParameters,
    spiral::{spiral_step, Facing, SpiralSense},
};

use fnv::FnvHashSet;
use ilattice3::Point;
use std::sync::Arc;

/// The solid steps of one spiral staircase, in room-local coordinates.
#[derive(Debug, Eq, PartialEq)]
pub struct Staircase {
    /// Steps in the order the cursor visited them.
    steps: Vec<Point>,
    solid: FnvHashSet<Point>,
}

impl Staircase {
    fn from_steps(steps: Vec<Point>) -> Self {
        let solid = steps.iter().cloned().collect();

        Staircase { steps, solid }
    }

    /// Ascends through the floor slab, from its bottom to just below the room's floor plane.
    pub fn down(params: &DungeonParameters) -> Self {
        let mut focus = Point::from([0, params.floor_period() - 1, 1]);
        let mut facing = Facing::North;
        let mut steps = Vec::new();
        // Everything at or above the floor plane is left open.
        while focus.y > params.room_height {
            steps.push(focus);
            let (next, next_facing) =
                spiral_step(SpiralSense::Up, focus, facing, |p| params.is_inside_room(p));
            focus = next;
            facing = next_facing;
        }

        Staircase::from_steps(steps)
    }

    /// Ascends from the room's floor plane to the top of the cell.
    pub fn up(params: &DungeonParameters) -> Self {
        let mut focus = Point::from([0, params.room_height, 1]);
        let mut facing = Facing::North;
        let mut steps = vec![focus];
        while focus.y > 0 {
            let (next, next_facing) =
                spiral_step(SpiralSense::Up, focus, facing, |p| params.is_inside_room(p));
            focus = next;
            facing = next_facing;
            steps.push(focus);
        }

        Staircase::from_steps(steps)
    }

    /// Descends through the whole cell so that stacked cells form one continuous spiral.
    pub fn through(params: &DungeonParameters) -> Self {
        let mut focus = Point::from([0, 1, 1]);
        let mut facing = Facing::West;
        let mut steps = Vec::new();
        while focus.y < params.floor_period() {
            steps.push(focus);
            let (next, next_facing) =
                spiral_step(SpiralSense::Down, focus, facing, |p| params.is_inside_room(p));
            focus = next;
            facing = next_facing;
        }

        Staircase::from_steps(steps)
    }

    pub fn steps(&self) -> &[Point] {
        &self.steps
    }

    pub fn is_solid(&self, local: &Point) -> bool {
        self.solid.contains(local)
    }
}

/// The staircase templates shared by every tile of one layout.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StaircaseTemplates {
    pub up: Arc<Staircase>,
    pub down: Arc<Staircase>,
    pub through: Arc<Staircase>,
}

impl StaircaseTemplates {
    pub fn new(params: &DungeonParameters) -> Self {
        StaircaseTemplates {
            up: Arc::new(Staircase::up(params)),
            down: Arc::new(Staircase::down(params)),
            through: Arc::new(Staircase::through(params)),
        }
    }
}

/// The content of one room cell.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RoomTile {
    OpenRoom,
    UpStaircase(Arc<Staircase>),
    DownStaircase(Arc<Staircase>),
    ThroughStaircase(Arc<Staircase>),
}

impl RoomTile {
    pub fn is_passable(&self, local: &Point) -> bool {
        match self {
            RoomTile::OpenRoom => true,
            RoomTile::UpStaircase(stairs)
            | RoomTile::DownStaircase(stairs)
            | RoomTile::ThroughStaircase(stairs) => !stairs.is_solid(local),
        }
    }

    pub fn is_staircase(&self) -> bool {
        !matches!(self, RoomTile::OpenRoom)
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32, z: i32) -> Point {
        Point::from([x, y, z])
    }

    fn assert_connected_spiral(params: &DungeonParameters, stairs: &Staircase) {
        assert!(!stairs.steps().is_empty());
        for step in stairs.steps() {
            assert!(params.is_inside_room(step), "{:?} left the room", step);
        }
        for pair in stairs.steps().windows(2) {
            let (a, b) = (pair[0], pair[1]);
            assert_eq!((a.y - b.y).abs(), 1);
            assert_eq!((a.x - b.x).abs() + (a.z - b.z).abs(), 1);
        }
    }

    #[test]
    fn test_open_room_is_passable_everywhere() {
        assert!(RoomTile::OpenRoom.is_passable(&p(0, 0, 0)));
        assert!(RoomTile::OpenRoom.is_passable(&p(2, 8, 2)));
        assert!(RoomTile::OpenRoom.is_passable(&p(-7, 100, 3)));
    }

    #[test]
    fn test_down_staircase_default_steps() {
        let params = DungeonParameters::default();
        let stairs = Staircase::down(&params);

        assert_eq!(stairs.steps(), &[p(0, 8, 1), p(0, 7, 2), p(1, 6, 2)]);

        let tile = RoomTile::DownStaircase(Arc::new(stairs));
        assert!(!tile.is_passable(&p(0, 8, 1)));
        assert!(tile.is_passable(&p(0, 8, 0)));
        for y in 0..=params.room_height {
            for x in 0..3 {
                for z in 0..3 {
                    assert!(tile.is_passable(&p(x, y, z)));
                }
            }
        }
    }

    #[test]
    fn test_up_staircase_reaches_top_of_cell() {
        let params = DungeonParameters::default();
        let stairs = Staircase::up(&params);

        assert_eq!(stairs.steps().first(), Some(&p(0, 5, 1)));
        assert_eq!(stairs.steps().last().map(|s| s.y), Some(0));
        assert_eq!(stairs.steps().len(), 6);
        assert_connected_spiral(&params, &stairs);
    }

    #[test]
    fn test_through_staircase_spans_the_cell() {
        let params = DungeonParameters::default();
        let stairs = Staircase::through(&params);

        let ys: Vec<i32> = stairs.steps().iter().map(|s| s.y).collect();
        assert_eq!(ys, (1..9).collect::<Vec<_>>());
        assert_connected_spiral(&params, &stairs);

        let tile = RoomTile::ThroughStaircase(Arc::new(stairs));
        assert!(!tile.is_passable(&p(0, 1, 1)));
        assert!(tile.is_passable(&p(0, 1, 0)));
        assert!(tile.is_passable(&p(1, 0, 1)));
    }

    #[test]
    fn test_spirals_stay_connected_for_other_sizes() {
        for &(diameter, height, thickness) in [(2, 1, 1), (4, 7, 2), (5, 3, 6)].iter() {
            let params = DungeonParameters {
                room_diameter: diameter,
                room_height: height,
                floor_thickness: thickness,
                ..Default::default()
            };
            let templates = StaircaseTemplates::new(&params);

            assert_connected_spiral(&params, &templates.up);
            assert_connected_spiral(&params, &templates.through);
            // The slab stair may be a single step when the slab is one voxel thick.
            for step in templates.down.steps() {
                assert!(params.is_inside_room(step));
                assert!(step.y > params.room_height);
            }
        }
    }
}
