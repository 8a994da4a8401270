//! Corridors
//!
//! A corridor is an L-shaped path through three points: it leaves `start`
//! along one axis, turns at `mid` and reaches `end` along the other.

use serde::{Deserialize, Serialize};

use crate::rng::DungeonRng;

use super::rect::Point;
use super::room::Room;

/// An L-shaped corridor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Corridor {
    pub start: Point,
    pub mid: Point,
    pub end: Point,
}

impl Corridor {
    pub const fn new(start: Point, mid: Point, end: Point) -> Self {
        Self { start, mid, end }
    }

    /// Join two points, turning at one of the two possible corners.
    ///
    /// Heads: horizontal first (corner at `(to.x, from.y)`).
    /// Tails: vertical first (corner at `(from.x, to.y)`).
    pub fn between(from: Point, to: Point, rng: &mut DungeonRng) -> Self {
        let mid = if rng.coin() {
            Point::new(to.x, from.y)
        } else {
            Point::new(from.x, to.y)
        };
        Self::new(from, mid, to)
    }

    /// Every grid cell the corridor crosses, from `start` to `end`
    pub fn points(&self) -> Vec<Point> {
        let mut points = line_points(self.start, self.mid);
        points.pop();
        points.extend(line_points(self.mid, self.end));
        points
    }
}

/// Bresenham line from `a` to `b`, both endpoints included
pub fn line_points(a: Point, b: Point) -> Vec<Point> {
    let dx = (b.x - a.x).abs();
    let dy = -(b.y - a.y).abs();
    let sx = if a.x < b.x { 1 } else { -1 };
    let sy = if a.y < b.y { 1 } else { -1 };

    let mut points = Vec::with_capacity((dx - dy) as usize + 1);
    let (mut x, mut y) = (a.x, a.y);
    let mut err = dx + dy;
    loop {
        points.push(Point::new(x, y));
        if x == b.x && y == b.y {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
    points
}

/// Point of a room a corridor attaches to.
///
/// Fixed rooms with entrance or exit offsets use one of those at random;
/// every other room uses its integer center.
pub fn connection_point(room: &Room, rng: &mut DungeonRng) -> Point {
    if let Some(descriptor) = &room.fixed {
        let offsets: Vec<Point> = descriptor.connection_points().collect();
        if let Some(offset) = rng.choose(&offsets) {
            return room.rect.origin().offset(offset.x, offset.y);
        }
    }
    room.center()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::fixed::FixedRoom;
    use crate::dungeon::rect::Rect;
    use crate::dungeon::room::AreaType;
    use std::sync::Arc;

    #[test]
    fn test_line_points_axis_aligned() {
        let pts = line_points(Point::new(2, 5), Point::new(6, 5));
        assert_eq!(pts.len(), 5);
        assert_eq!(pts[0], Point::new(2, 5));
        assert_eq!(pts[4], Point::new(6, 5));
        assert!(pts.iter().all(|p| p.y == 5));

        let back = line_points(Point::new(3, 9), Point::new(3, 4));
        assert_eq!(back.len(), 6);
        assert_eq!(back.last(), Some(&Point::new(3, 4)));
    }

    #[test]
    fn test_line_points_single_cell() {
        assert_eq!(line_points(Point::new(1, 1), Point::new(1, 1)), vec![Point::new(1, 1)]);
    }

    #[test]
    fn test_line_points_are_eight_connected() {
        let pts = line_points(Point::new(0, 0), Point::new(7, -3));
        for pair in pts.windows(2) {
            assert!((pair[0].x - pair[1].x).abs() <= 1);
            assert!((pair[0].y - pair[1].y).abs() <= 1);
        }
    }

    #[test]
    fn test_corridor_corner_choice() {
        let from = Point::new(1, 2);
        let to = Point::new(8, 9);
        let mut rng = DungeonRng::new(21);
        for _ in 0..16 {
            let c = Corridor::between(from, to, &mut rng);
            assert!(c.mid == Point::new(8, 2) || c.mid == Point::new(1, 9));
            assert_eq!((c.start, c.end), (from, to));
        }
    }

    #[test]
    fn test_corridor_points_connect_start_to_end() {
        let c = Corridor::new(Point::new(0, 0), Point::new(4, 0), Point::new(4, 3));
        let pts = c.points();
        assert_eq!(pts.first(), Some(&c.start));
        assert_eq!(pts.last(), Some(&c.end));
        assert!(pts.contains(&c.mid));
        // 5 cells across, 3 more down
        assert_eq!(pts.len(), 8);
        for pair in pts.windows(2) {
            assert!(pair[0].manhattan(pair[1]) <= 1);
        }
    }

    #[test]
    fn test_connection_point() {
        let mut rng = DungeonRng::new(0);
        let plain = Room::new(0, Rect::new(10, 10, 6, 4));
        assert_eq!(connection_point(&plain, &mut rng), Point::new(13, 12));

        let descriptor = FixedRoom::new(
            "gate",
            AreaType::Boss,
            1,
            vec![vec![true; 5]; 5],
            vec![Point::new(0, 2)],
            vec![Point::new(4, 2)],
        )
        .unwrap();
        let fixed = Room::fixed(1, Point::new(20, 30), Arc::new(descriptor));
        for _ in 0..8 {
            let p = connection_point(&fixed, &mut rng);
            assert!(p == Point::new(20, 32) || p == Point::new(24, 32));
        }

        let bare = FixedRoom::new("bare", AreaType::Shop, 1, vec![vec![true; 3]; 3], vec![], vec![])
            .unwrap();
        let fixed = Room::fixed(2, Point::new(0, 0), Arc::new(bare));
        assert_eq!(connection_point(&fixed, &mut rng), Point::new(1, 1));
    }
}
