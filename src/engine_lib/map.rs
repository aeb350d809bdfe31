// src/engine_lib/map.rs

use std::collections::HashMap;

/// Row-major tile grid. Code 0 is open floor; any other code is a wall whose
/// atlas layer comes from the `wall_layers` table. Probes outside the grid
/// read as solid so rays and movement always terminate at the border.
pub struct Map {
    layout: Vec<Vec<u8>>,
    wall_layers: HashMap<u8, u32>,
}

impl Map {
    pub fn new(layout: Vec<Vec<u8>>, wall_layers: HashMap<u8, u32>) -> Self {
        Self {
            layout,
            wall_layers,
        }
    }

    pub fn rows(&self) -> usize {
        self.layout.len()
    }

    pub fn cols(&self) -> usize {
        self.layout.first().map_or(0, |row| row.len())
    }

    fn tile(&self, row: i32, col: i32) -> Option<u8> {
        if row < 0 || col < 0 {
            return None;
        }
        self.layout
            .get(row as usize)
            .and_then(|r| r.get(col as usize))
            .copied()
    }

    pub fn is_wall(&self, row: i32, col: i32) -> bool {
        match self.tile(row, col) {
            Some(code) => code != 0,
            None => true, // outside the grid counts as solid
        }
    }

    /// Atlas layer of the wall at (row, col); None for open tiles and for
    /// probes outside the grid.
    pub fn wall_layer(&self, row: i32, col: i32) -> Option<u32> {
        let code = self.tile(row, col)?;
        if code == 0 {
            return None;
        }
        self.wall_layers.get(&code).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_map() -> Map {
        let layout = vec![
            vec![1, 1, 1],
            vec![1, 0, 2],
            vec![1, 1, 1],
        ];
        let wall_layers = HashMap::from([(1, 0), (2, 1)]);
        Map::new(layout, wall_layers)
    }

    #[test]
    fn open_tile_is_not_a_wall() {
        let map = small_map();
        assert!(!map.is_wall(1, 1));
        assert_eq!(map.wall_layer(1, 1), None);
    }

    #[test]
    fn wall_codes_resolve_to_layers() {
        let map = small_map();
        assert_eq!(map.wall_layer(0, 0), Some(0));
        assert_eq!(map.wall_layer(1, 2), Some(1));
    }

    #[test]
    fn outside_the_grid_is_solid() {
        let map = small_map();
        assert!(map.is_wall(-1, 0));
        assert!(map.is_wall(0, 3));
        assert!(map.is_wall(3, 0));
        assert_eq!(map.wall_layer(-1, 0), None);
    }

    #[test]
    fn dimensions() {
        let map = small_map();
        assert_eq!(map.rows(), 3);
        assert_eq!(map.cols(), 3);
    }
}
