//! Tile grid
//!
//! The final output of generation: a `width` x `height` grid of tiles,
//! indexed `cells[x][y]`. Rooms are painted first, then corridors, then the
//! entrance and exit markers. Anything outside the grid is clipped.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::corridor::Corridor;
use super::rect::Point;
use super::room::{AreaType, AreaTypes, Room};

/// Terrain of a tile
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum TileType {
    #[default]
    Wall = 0,
    Floor = 1,
    Entrance = 2,
    Exit = 3,
}

/// A single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tile {
    pub tile_type: TileType,
    /// Area type of the room covering this tile, `UnKnown` outside rooms
    pub area_type: AreaType,
    pub is_corridor: bool,
}

impl Tile {
    /// Character used by [`TileMap::render_ascii`]
    pub const fn symbol(&self) -> char {
        match self.tile_type {
            TileType::Wall => '#',
            TileType::Entrance => '<',
            TileType::Exit => '>',
            TileType::Floor => match self.area_type {
                AreaType::UnKnown if self.is_corridor => ',',
                area_type => area_type.symbol(),
            },
        }
    }
}

/// Rasterized dungeon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileMap {
    width: i32,
    height: i32,
    cells: Vec<Vec<Tile>>,
}

impl TileMap {
    /// A grid of walls; negative sizes are treated as empty
    pub fn new(width: i32, height: i32) -> Self {
        let (width, height) = (width.max(0), height.max(0));
        Self {
            width,
            height,
            cells: vec![vec![Tile::default(); height as usize]; width as usize],
        }
    }

    /// Paint rooms, corridors and the entrance and exit onto a fresh grid
    pub fn rasterize(
        width: i32,
        height: i32,
        rooms: &[Room],
        area_types: &AreaTypes,
        corridors: &[Corridor],
        entrance: Option<Point>,
        exit: Option<Point>,
    ) -> Self {
        let mut map = Self::new(width, height);

        for room in rooms {
            let area_type = area_types.get_or_unknown(room.id);
            for p in room.rect.points() {
                let walkable = match &room.fixed {
                    Some(descriptor) => {
                        descriptor.is_walkable(p.x - room.rect.x, p.y - room.rect.y)
                    }
                    None => true,
                };
                if let Some(tile) = map.get_mut(p) {
                    tile.tile_type = if walkable {
                        TileType::Floor
                    } else {
                        TileType::Wall
                    };
                    tile.area_type = area_type;
                }
            }
        }

        for corridor in corridors {
            for p in corridor.points() {
                if let Some(tile) = map.get_mut(p)
                    && (tile.area_type == AreaType::UnKnown || tile.tile_type == TileType::Wall)
                {
                    tile.tile_type = TileType::Floor;
                    tile.is_corridor = true;
                }
            }
        }

        for (point, tile_type) in [(entrance, TileType::Entrance), (exit, TileType::Exit)] {
            if let Some(tile) = point.and_then(|p| map.get_mut(p)) {
                *tile = Tile {
                    tile_type,
                    area_type: AreaType::UnKnown,
                    is_corridor: false,
                };
            }
        }

        map
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height
    }

    pub fn get(&self, p: Point) -> Option<&Tile> {
        if !self.in_bounds(p) {
            return None;
        }
        self.cells.get(p.x as usize)?.get(p.y as usize)
    }

    pub fn get_mut(&mut self, p: Point) -> Option<&mut Tile> {
        if !self.in_bounds(p) {
            return None;
        }
        self.cells.get_mut(p.x as usize)?.get_mut(p.y as usize)
    }

    /// Columns of tiles, indexed `[x][y]`
    pub fn cells(&self) -> &[Vec<Tile>] {
        &self.cells
    }

    /// Iterate over every tile with its position
    pub fn iter(&self) -> impl Iterator<Item = (Point, &Tile)> + '_ {
        self.cells.iter().enumerate().flat_map(|(x, column)| {
            column
                .iter()
                .enumerate()
                .map(move |(y, tile)| (Point::new(x as i32, y as i32), tile))
        })
    }

    /// Number of tiles of the given terrain
    pub fn count(&self, tile_type: TileType) -> usize {
        self.iter().filter(|(_, t)| t.tile_type == tile_type).count()
    }

    /// One text line per row, top row first
    pub fn render_ascii(&self) -> String {
        let mut out = String::with_capacity(((self.width + 1) * self.height) as usize);
        for y in 0..self.height {
            for x in 0..self.width {
                let c = self.get(Point::new(x, y)).map_or(' ', Tile::symbol);
                out.push(c);
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::fixed::FixedRoom;
    use crate::dungeon::rect::Rect;
    use std::sync::Arc;

    #[test]
    fn test_empty_map_is_all_wall() {
        let map = TileMap::new(5, 3);
        assert_eq!(map.count(TileType::Wall), 15);
        assert_eq!(map.render_ascii(), "#####\n#####\n#####\n");
        assert!(map.get(Point::new(5, 0)).is_none());
        assert!(map.get(Point::new(-1, 0)).is_none());
    }

    #[test]
    fn test_rooms_and_corridors() {
        let rooms = vec![
            Room::new(0, Rect::new(1, 1, 3, 3)),
            Room::new(1, Rect::new(8, 1, 3, 3)),
        ];
        let mut types = AreaTypes::new();
        types.insert(0, AreaType::Standard);
        types.insert(1, AreaType::Boss);
        let corridors = [Corridor::new(Point::new(2, 2), Point::new(9, 2), Point::new(9, 2))];
        let map = TileMap::rasterize(12, 5, &rooms, &types, &corridors, None, None);

        let room_tile = map.get(Point::new(1, 1)).unwrap();
        assert_eq!(room_tile.tile_type, TileType::Floor);
        assert_eq!(room_tile.area_type, AreaType::Standard);
        assert!(!room_tile.is_corridor);

        // Corridor cells inside rooms keep the room's tagging
        assert!(!map.get(Point::new(2, 2)).unwrap().is_corridor);
        let hall = map.get(Point::new(5, 2)).unwrap();
        assert_eq!(hall.tile_type, TileType::Floor);
        assert_eq!(hall.area_type, AreaType::UnKnown);
        assert!(hall.is_corridor);

        assert_eq!(
            map.render_ascii(),
            "############\n\
             #...####BBB#\n\
             #...,,,,BBB#\n\
             #...####BBB#\n\
             ############\n"
        );
    }

    #[test]
    fn test_fixed_room_layout_and_markers() {
        let layout = FixedRoom::parse_layout(&["#.#", "...", "#.#"]);
        let descriptor =
            Arc::new(FixedRoom::new("cross", AreaType::Puzzle, 1, layout, vec![], vec![]).unwrap());
        let rooms = vec![Room::fixed(0, Point::new(1, 1), descriptor)];
        let mut types = AreaTypes::new();
        types.insert(0, AreaType::Puzzle);
        let corridors = [Corridor::new(Point::new(1, 1), Point::new(0, 1), Point::new(0, 1))];

        let map = TileMap::rasterize(
            5,
            5,
            &rooms,
            &types,
            &corridors,
            Some(Point::new(2, 2)),
            Some(Point::new(9, 9)),
        );

        let wall = map.get(Point::new(3, 3)).unwrap();
        assert_eq!(wall.tile_type, TileType::Wall);
        assert_eq!(wall.area_type, AreaType::Puzzle);

        // A corridor may dig through a fixed room's wall
        let dug = map.get(Point::new(1, 1)).unwrap();
        assert_eq!(dug.tile_type, TileType::Floor);
        assert!(dug.is_corridor);

        let entrance = map.get(Point::new(2, 2)).unwrap();
        assert_eq!(entrance.tile_type, TileType::Entrance);
        assert_eq!(entrance.area_type, AreaType::UnKnown);
        // Exit was out of bounds and got clipped
        assert_eq!(map.count(TileType::Exit), 0);
    }
}
