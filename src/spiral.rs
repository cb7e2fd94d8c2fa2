use ilattice3::{
    normal::{Direction, Normal},
    Point,
};

/// Horizontal facing of the staircase cursor. `+X` is to the left of the player at spawn, so
/// east points toward `-X`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Facing {
    North,
    East,
    South,
    West,
}

impl Facing {
    pub fn direction(self) -> Direction {
        match self {
            Facing::North => Direction::PosZ,
            Facing::East => Direction::NegX,
            Facing::South => Direction::NegZ,
            Facing::West => Direction::PosX,
        }
    }

    pub fn offset(self) -> Point {
        Point::from(Normal::Axis(self.direction()))
    }

    pub fn clockwise(self) -> Self {
        match self {
            Facing::North => Facing::East,
            Facing::East => Facing::South,
            Facing::South => Facing::West,
            Facing::West => Facing::North,
        }
    }

    pub fn counterclockwise(self) -> Self {
        match self {
            Facing::North => Facing::West,
            Facing::West => Facing::South,
            Facing::South => Facing::East,
            Facing::East => Facing::North,
        }
    }
}

/// Which way the cursor travels vertically. Descending and ascending stairs turn in opposite
/// senses so that stairs between adjacent floors line up.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SpiralSense {
    /// Turns clockwise and moves toward +Y (down, in room-local coordinates).
    Down,
    /// Turns counterclockwise and moves toward -Y (up, in room-local coordinates).
    Up,
}

impl SpiralSense {
    fn turn(self, facing: Facing) -> Facing {
        match self {
            SpiralSense::Down => facing.clockwise(),
            SpiralSense::Up => facing.counterclockwise(),
        }
    }

    fn vertical_step(self) -> i32 {
        match self {
            SpiralSense::Down => 1,
            SpiralSense::Up => -1,
        }
    }
}

/// Returns the next `(focus, facing)` of a staircase spiral.
///
/// The focus advances one voxel along `facing`. When that would leave the horizontal footprint
/// accepted by `inside`, the facing turns a quarter and the focus advances from where it was.
/// Then the focus moves one voxel vertically.
pub fn spiral_step(
    sense: SpiralSense,
    focus: Point,
    facing: Facing,
    inside: impl Fn(&Point) -> bool,
) -> (Point, Facing) {
    let mut facing = facing;
    let mut next = focus;
    for _ in 0..4 {
        let candidate = focus + facing.offset();
        if inside(&candidate) {
            next = candidate;
            break;
        }
        facing = sense.turn(facing);
    }

    next.y += sense.vertical_step();

    (next, facing)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inside_3x3(p: &Point) -> bool {
        p.x >= 0 && p.z >= 0 && p.x < 3 && p.z < 3
    }

    #[test]
    fn test_rotation_orders_are_reversed() {
        let mut f = Facing::North;
        let mut clockwise = Vec::new();
        for _ in 0..4 {
            f = f.clockwise();
            clockwise.push(f);
        }
        assert_eq!(
            clockwise,
            vec![Facing::East, Facing::South, Facing::West, Facing::North]
        );

        for f in clockwise {
            assert_eq!(f.clockwise().counterclockwise(), f);
        }
    }

    #[test]
    fn test_opposite_facings_are_opposite_directions() {
        for &f in [Facing::North, Facing::East, Facing::South, Facing::West].iter() {
            let opposite = f.clockwise().clockwise();
            assert_eq!(opposite.direction(), f.direction().negate());
            assert_eq!(f.offset() + opposite.offset(), Point::from([0, 0, 0]));
        }
        assert_eq!(Facing::North.offset(), Point::from([0, 0, 1]));
        assert_eq!(Facing::East.offset(), Point::from([-1, 0, 0]));
    }

    #[test]
    fn test_step_down_turns_at_wall() {
        let (focus, facing) = spiral_step(
            SpiralSense::Down,
            [2, 3, 1].into(),
            Facing::West,
            inside_3x3,
        );

        assert_eq!(facing, Facing::North);
        assert_eq!(focus, Point::from([2, 4, 2]));
    }

    #[test]
    fn test_step_up_moves_straight_when_possible() {
        let (focus, facing) =
            spiral_step(SpiralSense::Up, [0, 8, 1].into(), Facing::North, inside_3x3);

        assert_eq!(facing, Facing::North);
        assert_eq!(focus, Point::from([0, 7, 2]));
    }

    #[test]
    fn test_step_up_turns_counterclockwise() {
        let (focus, facing) =
            spiral_step(SpiralSense::Up, [0, 7, 2].into(), Facing::North, inside_3x3);

        assert_eq!(facing, Facing::West);
        assert_eq!(focus, Point::from([1, 6, 2]));
    }

    #[test]
    fn test_spiral_never_leaves_footprint() {
        for sense in [SpiralSense::Down, SpiralSense::Up].iter() {
            let mut focus = Point::from([0, 0, 1]);
            let mut facing = Facing::South;
            for _ in 0..100 {
                let (next, next_facing) = spiral_step(*sense, focus, facing, inside_3x3);
                assert!(inside_3x3(&next));
                let horizontal = (next.x - focus.x).abs() + (next.z - focus.z).abs();
                assert_eq!(horizontal, 1);
                focus = next;
                facing = next_facing;
            }
        }
    }

    #[test]
    fn test_degenerate_footprint_only_moves_vertically() {
        let single = |p: &Point| p.x == 0 && p.z == 0;
        let (focus, _) = spiral_step(SpiralSense::Down, [0, 0, 0].into(), Facing::North, single);

        assert_eq!(focus, Point::from([0, 1, 0]));
    }
}
