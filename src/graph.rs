use crate::{
    map_types::dungeon::{DungeonLayout, PlacedRoom},
    room::RoomTile,
};

use ilattice3::Point;
use petgraph::{algo::tarjan_scc, graph::NodeIndex, stable_graph::StableGraph, Undirected};

/// How two rooms are joined.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Passage {
    Tunnel,
    Stairs,
}

/// Nodes are room IDs. There is one node per placed room (even if two rooms share a center) plus
/// one for the entrance. Edges exist only where the carved geometry actually joins two rooms.
pub type RoomGraph = StableGraph<Point, Passage, Undirected>;

impl DungeonLayout {
    pub fn room_graph(&self) -> RoomGraph {
        let mut graph = RoomGraph::default();

        let entrance: Point = [0, 0, 0].into();
        let mut stairs_above: (NodeIndex, Point) = (graph.add_node(entrance), entrance);
        for plan in self.floors().iter() {
            let mut previous: Option<NodeIndex> = None;
            for room in plan.rooms.iter() {
                let node = graph.add_node(room.center);
                match previous {
                    Some(p) => {
                        if self.tunnel_reaches(room) {
                            graph.add_edge(p, node, Passage::Tunnel);
                        }
                    }
                    None => {
                        let (above, above_id) = stairs_above;
                        if self.stairs_join(&above_id, &room.center) {
                            graph.add_edge(above, node, Passage::Stairs);
                        }
                    }
                }
                previous = Some(node);
            }
            if let (Some(last), Some(room)) = (previous, plan.down_stairs()) {
                stairs_above = (last, room.center);
            }
        }

        graph
    }

    /// True iff every room can be reached from the entrance.
    pub fn is_connected(&self) -> bool {
        tarjan_scc(&self.room_graph()).len() == 1
    }

    /// The tunnel dug toward `room` stopped in a cell of its footprint that holds a tile.
    fn tunnel_reaches(&self, room: &PlacedRoom) -> bool {
        let end = match room.tunnel_end {
            Some(end) => end,
            None => return false,
        };
        let cell = self.params().room_cell_for(&end);

        room.covers(&cell) && self.tile(&cell).is_some()
    }

    /// `lower` is the cell directly under `upper`, which holds a way down, and `lower` holds
    /// stairs of its own. A down staircase placed over the arrival cell still counts.
    fn stairs_join(&self, upper: &Point, lower: &Point) -> bool {
        if (upper.x, upper.z) != (lower.x, lower.z) || lower.y != upper.y + 1 {
            return false;
        }
        let leads_down = matches!(
            self.tile(upper),
            Some(RoomTile::DownStaircase(_)) | Some(RoomTile::ThroughStaircase(_))
        );

        leads_down && self.tile(lower).map_or(false, RoomTile::is_staircase)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        graph::Passage, map_types::dungeon::DungeonLayout, params::DungeonParameters,
        room::RoomTile,
    };

    use ilattice3::Point;
    use petgraph::visit::{EdgeRef, IntoEdgeReferences};

    fn small_layout(seed: u64) -> DungeonLayout {
        DungeonLayout::generate(&DungeonParameters {
            seed,
            maze_width: 12,
            maze_height: 9,
            ..Default::default()
        })
    }

    #[test]
    fn test_room_graph_is_a_connected_chain() {
        for seed in 0..10 {
            let layout = small_layout(seed);
            let graph = layout.room_graph();

            let num_rooms = layout.floors().len() * layout.rooms_per_floor() as usize;
            assert_eq!(graph.node_count(), num_rooms + 1);
            assert_eq!(graph.edge_count(), num_rooms);
            assert!(layout.is_connected());

            let stairs = graph
                .edge_references()
                .filter(|e| *e.weight() == Passage::Stairs)
                .count();
            assert_eq!(stairs, layout.floors().len());
        }
    }

    #[test]
    fn test_stairs_join_matching_columns() {
        let layout = DungeonLayout::generate(&DungeonParameters::with_seed(17));
        let graph = layout.room_graph();

        for edge in graph.edge_references() {
            if *edge.weight() == Passage::Stairs {
                let (a, b) = (graph[edge.source()], graph[edge.target()]);
                assert_eq!((a.x, a.z), (b.x, b.z));
                assert_eq!(b.y, a.y + 1);
            }
        }
    }

    #[test]
    fn test_tunnel_that_misses_its_room_disconnects() {
        let mut layout = small_layout(4);
        assert!(layout.is_connected());

        let far: Point = [10_000, 0, 10_000].into();
        layout.floors[0].rooms[2].tunnel_end = Some(far);

        assert!(!layout.is_connected());
        let graph = layout.room_graph();
        let num_rooms = layout.floors().len() * layout.rooms_per_floor() as usize;
        assert_eq!(graph.edge_count(), num_rooms - 1);
    }

    #[test]
    fn test_missing_target_tile_disconnects() {
        let mut layout = small_layout(5);
        let target = layout.floors()[1].rooms[1];
        let cell = layout
            .params()
            .room_cell_for(&target.tunnel_end.unwrap());

        layout.tiles.remove(&cell);

        assert!(!layout.is_connected());
    }

    #[test]
    fn test_open_room_under_the_stairs_disconnects() {
        let mut layout = small_layout(6);
        let arrival = layout.floors()[1].up_stairs().unwrap().center;

        layout.tiles.insert(arrival, RoomTile::OpenRoom);

        assert!(!layout.is_connected());
        let stairs = layout
            .room_graph()
            .edge_references()
            .filter(|e| *e.weight() == Passage::Stairs)
            .count();
        assert_eq!(stairs, layout.floors().len() - 1);
    }

    #[test]
    fn test_shaft_only_graph_is_connected() {
        let params = DungeonParameters {
            maze_depth: 1,
            ..Default::default()
        };
        let layout = DungeonLayout::generate(&params);

        assert_eq!(layout.room_graph().node_count(), 1);
        assert!(layout.is_connected());
    }
}
