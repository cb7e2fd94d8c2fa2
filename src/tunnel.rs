use ilattice3::Point;
use rand::Rng;

/// Carving stops once the cursor is within this distance of the target.
pub const ARRIVAL_DISTANCE: i32 = 2;

fn distance_squared(a: &Point, b: &Point) -> i64 {
    let delta = |from: i32, to: i32| i64::from(to) - i64::from(from);
    let (dx, dy, dz) = (delta(a.x, b.x), delta(a.y, b.y), delta(a.z, b.z));

    let square = |d: i64| d.saturating_mul(d);

    square(dx).saturating_add(square(dy)).saturating_add(square(dz))
}

/// Random walk on the XZ plane from `from` toward `to`, returning every voxel visited after
/// `from`, in order.
///
/// Each step moves one voxel along an axis that brings the cursor closer to `to`. When both X and
/// Z would, one `bool` is drawn from `rng` (`true` picks X). The walk stops when the cursor is
/// within `ARRIVAL_DISTANCE` of `to`, so the path need not touch `to` itself.
pub fn carve(from: &Point, to: &Point, rng: &mut impl Rng) -> Vec<Point> {
    let mut path = Vec::new();
    let mut focus = *from;
    let arrival_squared = i64::from(ARRIVAL_DISTANCE * ARRIVAL_DISTANCE);
    while distance_squared(&focus, to) > arrival_squared {
        let x_delta = (to.x - focus.x).signum();
        let z_delta = (to.z - focus.z).signum();

        if x_delta == 0 && z_delta == 0 {
            // Only a vertical gap is left, which this walk can't close.
            break;
        } else if x_delta == 0 {
            focus.z += z_delta;
        } else if z_delta == 0 {
            focus.x += x_delta;
        } else if rng.gen::<bool>() {
            focus.x += x_delta;
        } else {
            focus.z += z_delta;
        }

        path.push(focus);
    }

    path
}
