/// Tile layouts: the level 4 alley maze and the level 3 arena ring.
///
/// Legend:  'W' = wall   '7','1' = storefront (walkable)   ' ' = street

use super::entity::Wall;
use super::geom::{Rect, SCREEN_H, SCREEN_W, TILE};

pub const GRID_W: usize = (SCREEN_W / TILE) as usize; // 20
pub const GRID_H: usize = (SCREEN_H / TILE) as usize; // 15

pub const LAYOUT: [&str; GRID_H] = [
    "WWWWWWWWWWWWWWWWWWWW",
    "W                  W",
    "W   WW   W   WWW   W",
    "W   W        W     W",
    "W   W   WWW  W     W",
    "W                  W",
    "WWWWWW   W   WWWWWWW",
    "W        W     711 W",
    "W   WWWWWWWWWW      ",
    "W   W       W   WWWW",
    "W   W   W   W     WW",
    "W   WWWWW   WWWWW  W",
    "W                  W",
    "W   WWWWWWWWWWWWWWWW",
    "WWWWWWWWWWWWWWWWWWWW",
];

/// Grid cell of the 7-Eleven door.
pub const STORE_CELL: (usize, usize) = (15, 7);

/// Is the maze cell at (col, row) a wall? Outside the grid counts as wall.
pub fn is_wall(col: usize, row: usize) -> bool {
    LAYOUT
        .get(row)
        .and_then(|r| r.as_bytes().get(col))
        .map_or(true, |&b| b == b'W')
}

pub fn maze_walls() -> Vec<Wall> {
    let mut walls = Vec::with_capacity(GRID_W * GRID_H);
    for (row, line) in LAYOUT.iter().enumerate() {
        for (col, ch) in line.bytes().enumerate() {
            if ch == b'W' {
                walls.push(cell_rect(col, row));
            }
        }
    }
    walls
}

pub fn store_rect() -> Rect {
    cell_rect(STORE_CELL.0, STORE_CELL.1)
}

/// A one-tile ring around the whole screen (level 3 arena).
/// Corner tiles appear twice, which is harmless for overlap tests.
pub fn border_walls() -> Vec<Wall> {
    let mut walls = Vec::new();
    for x in (0..SCREEN_W).step_by(TILE as usize) {
        walls.push(Rect::new(x, 0, TILE, TILE));
        walls.push(Rect::new(x, SCREEN_H - TILE, TILE, TILE));
    }
    for y in (0..SCREEN_H).step_by(TILE as usize) {
        walls.push(Rect::new(0, y, TILE, TILE));
        walls.push(Rect::new(SCREEN_W - TILE, y, TILE, TILE));
    }
    walls
}

fn cell_rect(col: usize, row: usize) -> Rect {
    Rect::new(col as i32 * TILE, row as i32 * TILE, TILE, TILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_rectangular() {
        assert!(LAYOUT.iter().all(|r| r.len() == GRID_W));
    }

    #[test]
    fn store_cell_is_open() {
        assert!(!is_wall(STORE_CELL.0, STORE_CELL.1));
        assert_eq!(&LAYOUT[7][15..18], "711");
        assert_eq!(store_rect(), Rect::new(600, 280, 40, 40));
    }

    #[test]
    fn outside_grid_is_wall() {
        assert!(is_wall(GRID_W, 3));
        assert!(is_wall(3, GRID_H));
        assert!(!is_wall(1, 1));
    }

    #[test]
    fn wall_count_matches_layout() {
        let expected: usize = LAYOUT.iter().map(|r| r.matches('W').count()).sum();
        assert_eq!(maze_walls().len(), expected);
    }

    #[test]
    fn border_ring_blocks_every_edge() {
        let walls = border_walls();
        assert_eq!(walls.len(), 2 * 20 + 2 * 15);
        let probe_left = Rect::new(10, 300, 5, 5);
        let probe_center = Rect::new(400, 300, 5, 5);
        assert!(probe_left.collides_any(&walls));
        assert!(!probe_center.collides_any(&walls));
    }
}
