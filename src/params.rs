use ilattice3::Point;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParameterError {
    #[error("{name} must be at least {min}, got {value}")]
    TooSmall {
        name: &'static str,
        min: i32,
        value: i32,
    },
    #[error("{name} puts the maze outside 32-bit world coordinates")]
    OutOfRange { name: &'static str },
    #[error("failed to parse dungeon parameters: {0}")]
    Parse(#[from] ron::Error),
}

/// Everything the layout depends on. All derived geometry is a pure function of these values.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct DungeonParameters {
    pub seed: u64,
    /// The number of voxels each room is wide (rooms are square).
    pub room_diameter: i32,
    /// The height of the open part of each room.
    pub room_height: i32,
    /// The thickness of the floor/ceiling slab between rooms.
    pub floor_thickness: i32,
    /// Number of room columns along +X.
    pub maze_width: i32,
    /// Number of room columns along +Z.
    pub maze_height: i32,
    /// Number of floors below the entrance.
    pub maze_depth: i32,
    /// The maze extends toward +X, +Z and -Y from this position.
    pub entrance: Point,
}

impl Default for DungeonParameters {
    fn default() -> Self {
        DungeonParameters {
            seed: 500,
            room_diameter: 3,
            room_height: 5,
            floor_thickness: 4,
            maze_width: 80,
            maze_height: 25,
            maze_depth: 5,
            entrance: [0, 0, 5].into(),
        }
    }
}

impl DungeonParameters {
    pub fn with_seed(seed: u64) -> Self {
        DungeonParameters {
            seed,
            ..Default::default()
        }
    }

    /// Parses RON text; omitted fields take their default values.
    pub fn from_ron_str(text: &str) -> Result<Self, ParameterError> {
        let params: DungeonParameters = ron::de::from_str(text)?;
        params.validate()?;

        Ok(params)
    }

    /// Vertical distance between the tops of two consecutive floors.
    pub fn floor_period(&self) -> i32 {
        self.room_height + self.floor_thickness
    }

    pub fn validate(&self) -> Result<(), ParameterError> {
        // The staircases anchor at local z = 1, so a room needs at least a 2x2 footprint.
        check_at_least("room_diameter", self.room_diameter, 2)?;
        check_at_least("room_height", self.room_height, 1)?;
        check_at_least("floor_thickness", self.floor_thickness, 1)?;
        check_at_least("maze_width", self.maze_width, 1)?;
        check_at_least("maze_height", self.maze_height, 1)?;
        check_at_least("maze_depth", self.maze_depth, 1)?;

        // Every far boundary must be representable, so no derived coordinate overflows.
        let period = self
            .room_height
            .checked_add(self.floor_thickness)
            .ok_or(ParameterError::OutOfRange {
                name: "floor_thickness",
            })?;
        check_span("maze_width", self.entrance.x, self.maze_width, self.room_diameter)?;
        check_span("maze_height", self.entrance.z, self.maze_height, self.room_diameter)?;
        check_span("maze_depth", self.entrance.y, -self.maze_depth, period)?;

        Ok(())
    }
}

/// `origin + cells * size` must fit in an `i32`.
fn check_span(
    name: &'static str,
    origin: i32,
    cells: i32,
    size: i32,
) -> Result<(), ParameterError> {
    cells
        .checked_mul(size)
        .and_then(|span| origin.checked_add(span))
        .map(|_| ())
        .ok_or(ParameterError::OutOfRange { name })
}

fn check_at_least(name: &'static str, value: i32, min: i32) -> Result<(), ParameterError> {
    if value < min {
        Err(ParameterError::TooSmall { name, min, value })
    } else {
        Ok(())
    }
}
