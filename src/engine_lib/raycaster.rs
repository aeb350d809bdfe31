// src/engine_lib/raycaster.rs

use std::f32::consts::PI;

use glam::{vec2, Vec2};

use crate::engine_lib::map::Map;
use crate::engine_lib::player::Player;
use crate::rendering_lib::projection::{VIRTUAL_HEIGHT, VIRTUAL_WIDTH};
use crate::rendering_lib::vertex::ColumnInstance;

/// World-space edge length of one map tile, in pixels.
pub const TILE_SIZE: f32 = 64.0;
/// Wall height in the same units; equal to TILE_SIZE so walls are cubes.
pub const WALL_HEIGHT: f32 = 64.0;

const FOV_DEG: f32 = 60.0;

#[derive(Clone, Copy, Debug, PartialEq)]
enum TileSide {
    Top,
    Left,
    Bottom,
    Right,
}

struct Hit {
    dist: f32,
    point: Vec2,
    side: TileSide,
    layer: u32,
}

/// Builds one `ColumnInstance` per logical screen column from the player's
/// pose and the map. The ray fan and fisheye table depend only on the fixed
/// logical resolution, so they are precomputed once.
pub struct Raycaster {
    /// Ray angles relative to the view direction, radians, one per column.
    ray_angles: Vec<f32>,
    /// 1 / cos(relative angle); dividing a euclidean ray length by this
    /// yields the perpendicular distance the projection needs.
    fisheye_table: Vec<f32>,
    dist_to_projection_plane: f32,
    y_center: f32,
    atlas_layers: u32,
}

impl Raycaster {
    pub fn new(atlas_layers: u32) -> Self {
        let columns = VIRTUAL_WIDTH as usize;
        let fov = FOV_DEG.to_radians();
        let ray_inc = fov / columns as f32;

        let ray_angles: Vec<f32> = (0..columns)
            .map(|i| i as f32 * ray_inc - fov / 2.0)
            .collect();
        let fisheye_table = ray_angles.iter().map(|a| 1.0 / a.cos()).collect();

        Self {
            ray_angles,
            fisheye_table,
            dist_to_projection_plane: VIRTUAL_WIDTH / 2.0 / (fov / 2.0).tan(),
            y_center: VIRTUAL_HEIGHT / 2.0,
            atlas_layers,
        }
    }

    pub fn column_count(&self) -> usize {
        self.ray_angles.len()
    }

    /// Fill `columns` (one slot per logical screen column) for this frame.
    /// Columns whose ray never strikes a wall become the degenerate default
    /// instance and rasterize to nothing.
    pub fn cast(&self, map: &Map, player: &Player, columns: &mut [ColumnInstance]) {
        debug_assert_eq!(columns.len(), self.ray_angles.len());

        let heading = player.rotation_deg.to_radians();
        for (i, out) in columns.iter_mut().enumerate() {
            let angle = wrap_angle(heading + self.ray_angles[i]);
            *out = match self.nearest_wall(map, player.position, angle) {
                Some(hit) => {
                    let dist = hit.dist / self.fisheye_table[i];
                    let ratio = self.dist_to_projection_plane / dist;
                    let strip_height = self.dist_to_projection_plane * WALL_HEIGHT / dist;
                    let wall_bottom = ratio * player.eye_height + self.y_center;

                    let column = ColumnInstance {
                        screen_x: i as f32,
                        top: wall_bottom - strip_height,
                        height: strip_height,
                        tex_u: tex_u(hit.point, hit.side),
                        tex_layer: hit.layer,
                    };
                    self.debug_validate(&column);
                    column
                }
                None => ColumnInstance::default(),
            };
        }
    }

    /// Closest wall-side intersection for one ray, scanning every wall tile
    /// and only the two sides that can face the ray's quadrant.
    fn nearest_wall(&self, map: &Map, origin: Vec2, angle: f32) -> Option<Hit> {
        let dir = vec2(angle.cos(), angle.sin());
        let sides = sides_facing(angle);
        let mut best: Option<Hit> = None;

        for row in 0..map.rows() as i32 {
            for col in 0..map.cols() as i32 {
                let Some(layer) = map.wall_layer(row, col) else {
                    continue;
                };
                for side in sides {
                    let (a, b) = side_segment(row, col, side);
                    if let Some((dist, point)) = ray_segment_intersection(origin, dir, a, b) {
                        if best.as_ref().map_or(true, |h| dist < h.dist) {
                            best = Some(Hit {
                                dist,
                                point,
                                side,
                                layer,
                            });
                        }
                    }
                }
            }
        }
        best
    }

    /// The column stage downstream performs no validation at all; a bad
    /// instance renders as silently wrong pixels. Catch violations here, at
    /// the boundary where column data is produced, in debug builds only.
    fn debug_validate(&self, column: &ColumnInstance) {
        debug_assert!(
            column.tex_layer < self.atlas_layers,
            "tex_layer {} outside atlas ({} layers)",
            column.tex_layer,
            self.atlas_layers
        );
        debug_assert!(
            column.screen_x >= 0.0 && column.screen_x < VIRTUAL_WIDTH,
            "screen_x {} outside the logical screen",
            column.screen_x
        );
        debug_assert!(column.top.is_finite() && column.height.is_finite());
        debug_assert!(column.height >= 0.0);
        debug_assert!((0.0..1.0).contains(&column.tex_u));
    }
}

fn wrap_angle(angle: f32) -> f32 {
    angle.rem_euclid(2.0 * PI)
}

/// The two tile sides that can face a ray in the given direction; the grid's
/// y axis grows downward, so quadrant 0 is right-and-down.
fn sides_facing(angle: f32) -> [TileSide; 2] {
    match (angle / (PI / 2.0)).floor() as u8 {
        0 => [TileSide::Top, TileSide::Left],
        1 => [TileSide::Top, TileSide::Right],
        2 => [TileSide::Right, TileSide::Bottom],
        3 => [TileSide::Bottom, TileSide::Left],
        _ => [TileSide::Top, TileSide::Left],
    }
}

fn side_segment(row: i32, col: i32, side: TileSide) -> (Vec2, Vec2) {
    let x1 = col as f32 * TILE_SIZE;
    let y1 = row as f32 * TILE_SIZE;
    let x2 = x1 + TILE_SIZE;
    let y2 = y1 + TILE_SIZE;
    match side {
        TileSide::Top => (vec2(x1, y1), vec2(x2, y1)),
        TileSide::Right => (vec2(x2, y1), vec2(x2, y2)),
        TileSide::Bottom => (vec2(x1, y2), vec2(x2, y2)),
        TileSide::Left => (vec2(x1, y1), vec2(x1, y2)),
    }
}

/// Intersect a ray (unit `dir`) with segment a-b. Returns the distance along
/// the ray and the hit point; None when parallel, behind the origin, or off
/// the segment.
fn ray_segment_intersection(origin: Vec2, dir: Vec2, a: Vec2, b: Vec2) -> Option<(f32, Vec2)> {
    let seg = b - a;
    let denom = dir.perp_dot(seg);
    if denom.abs() < f32::EPSILON {
        return None;
    }
    let ao = a - origin;
    let along_ray = ao.perp_dot(seg) / denom;
    let on_segment = ao.perp_dot(dir) / denom;
    if (0.0..=1.0).contains(&on_segment) && along_ray >= 0.0 {
        Some((along_ray, origin + dir * along_ray))
    } else {
        None
    }
}

/// Fraction of the struck tile side covered so far: which vertical slice of
/// the wall texture this column shows.
fn tex_u(point: Vec2, side: TileSide) -> f32 {
    let along = match side {
        TileSide::Top | TileSide::Bottom => point.x / TILE_SIZE,
        TileSide::Left | TileSide::Right => point.y / TILE_SIZE,
    };
    along - along.floor()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    const CENTER: usize = VIRTUAL_WIDTH as usize / 2;

    fn corridor() -> Map {
        // Open row 1, brick border (code 1, layer 0), stone far wall
        // (code 2, layer 1) at column 7.
        let layout = vec![
            vec![1; 8],
            vec![1, 0, 0, 0, 0, 0, 0, 2],
            vec![1; 8],
        ];
        Map::new(layout, HashMap::from([(1, 0), (2, 1)]))
    }

    #[test]
    fn one_ray_per_logical_column() {
        let rc = Raycaster::new(2);
        assert_eq!(rc.column_count(), VIRTUAL_WIDTH as usize);
    }

    #[test]
    fn center_ray_looks_straight_ahead() {
        let rc = Raycaster::new(2);
        assert!(rc.ray_angles[CENTER].abs() < 1e-6);
        assert!((rc.fisheye_table[CENTER] - 1.0).abs() < 1e-6);
        assert!((rc.fisheye_table[0] - 1.0 / (30.0f32.to_radians()).cos()).abs() < 1e-5);
    }

    #[test]
    fn wall_dead_ahead_lands_centered_on_screen() {
        let rc = Raycaster::new(2);
        let map = corridor();
        let player = Player::new(vec2(96.0, 96.0), 0.0, 32.0);
        let mut columns = vec![ColumnInstance::default(); rc.column_count()];
        rc.cast(&map, &player, &mut columns);

        let c = &columns[CENTER];
        assert_eq!(c.screen_x, CENTER as f32);
        assert_eq!(c.tex_layer, 1);
        // Hit is the left face of the far wall at x = 448, half-way up the
        // tile side.
        assert!((c.tex_u - 0.5).abs() < 1e-3);

        // dist 352, plane distance 427 / tan(30 deg).
        let d2p = VIRTUAL_WIDTH / 2.0 / (30.0f32.to_radians()).tan();
        let expected_height = d2p * WALL_HEIGHT / 352.0;
        assert!((c.height - expected_height).abs() < 0.5);

        // Fully on screen and vertically centered around the horizon for an
        // eye at half wall height.
        assert!(c.top > 0.0);
        assert!(c.top + c.height < VIRTUAL_HEIGHT);
        let mid = c.top + c.height / 2.0;
        assert!((mid - VIRTUAL_HEIGHT / 2.0).abs() < 1.0);
    }

    #[test]
    fn strip_height_halves_when_distance_doubles() {
        let rc = Raycaster::new(2);
        let map = corridor();
        let mut near_columns = vec![ColumnInstance::default(); rc.column_count()];
        let mut far_columns = vec![ColumnInstance::default(); rc.column_count()];

        let far = Player::new(vec2(96.0, 96.0), 0.0, 32.0); // dist 352
        let near = Player::new(vec2(272.0, 96.0), 0.0, 32.0); // dist 176
        rc.cast(&map, &far, &mut far_columns);
        rc.cast(&map, &near, &mut near_columns);

        let ratio = near_columns[CENTER].height / far_columns[CENTER].height;
        assert!((ratio - 2.0).abs() < 1e-3);
    }

    #[test]
    fn misses_stay_degenerate() {
        let rc = Raycaster::new(2);
        let open = Map::new(vec![vec![0; 4]; 4], HashMap::new());
        let player = Player::new(vec2(128.0, 128.0), 0.0, 32.0);
        let mut columns = vec![ColumnInstance::default(); rc.column_count()];
        rc.cast(&open, &player, &mut columns);
        assert!(columns.iter().all(|c| c.height == 0.0));
    }

    #[test]
    fn every_hit_column_is_valid_for_the_atlas() {
        let rc = Raycaster::new(2);
        let map = corridor();
        let player = Player::new(vec2(200.0, 100.0), 30.0, 32.0);
        let mut columns = vec![ColumnInstance::default(); rc.column_count()];
        rc.cast(&map, &player, &mut columns);

        for c in columns.iter().filter(|c| c.height > 0.0) {
            assert!(c.tex_layer < 2);
            assert!((0.0..1.0).contains(&c.tex_u));
            assert!(c.top.is_finite() && c.height.is_finite());
        }
    }

    #[test]
    fn ray_segment_hits_and_misses() {
        let origin = vec2(0.0, 0.0);
        let dir = vec2(1.0, 0.0);
        // Crossing segment in front of the ray.
        let hit = ray_segment_intersection(origin, dir, vec2(5.0, -1.0), vec2(5.0, 1.0));
        let (dist, point) = hit.unwrap();
        assert!((dist - 5.0).abs() < 1e-6);
        assert!((point - vec2(5.0, 0.0)).length() < 1e-6);
        // Behind the origin.
        assert!(ray_segment_intersection(origin, dir, vec2(-5.0, -1.0), vec2(-5.0, 1.0)).is_none());
        // Parallel.
        assert!(ray_segment_intersection(origin, dir, vec2(0.0, 1.0), vec2(5.0, 1.0)).is_none());
    }

    #[test]
    fn angles_wrap_into_one_turn() {
        assert!((wrap_angle(2.5 * PI) - 0.5 * PI).abs() < 1e-6);
        assert!((wrap_angle(-0.5 * PI) - 1.5 * PI).abs() < 1e-6);
        assert_eq!(wrap_angle(0.0), 0.0);
    }
}
