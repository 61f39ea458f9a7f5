use crate::config::Config;
use crate::map::GridMap;
use crate::player::{Player, normalize_angle};

/// Distance reported by a scan that never reached a wall.
pub const NO_HIT_DISTANCE: f32 = 1_000_000.0;

// Seeds the first grid line just across the boundary being stepped away from.
const EDGE_NUDGE: f32 = 1e-3;
// Below this a ray counts as parallel to a grid-line family.
const PARALLEL_EPS: f32 = 1e-6;

/// Which grid-line family produced a hit. Only used for shading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub angle: f32,    // ray angle in radians, [0, 2pi)
    pub distance: f32, // Euclidean, before fisheye correction
    pub side: Side,
    pub hit_point: [f32; 2],
}

impl RayHit {
    #[inline]
    pub fn is_miss(&self) -> bool {
        self.distance >= NO_HIT_DISTANCE
    }
}

struct Scan {
    distance: f32,
    point: [f32; 2],
}

impl Scan {
    fn miss(origin: [f32; 2]) -> Self {
        Self {
            distance: NO_HIT_DISTANCE,
            point: origin,
        }
    }
}

/// Casts one ray per screen column, left to right across the field of view.
pub fn cast_fov(map: &GridMap, player: &Player, config: &Config) -> Vec<RayHit> {
    let start = player.angle() - 0.5 * config.fov();
    let step = config.column_step();

    (0..config.column_count)
        .map(|column| {
            let ra = normalize_angle(start + step * column as f32);
            cast_ray(map, player.pos(), ra, config.depth_of_field)
        })
        .collect()
}

/// Casts a single ray from `origin` at angle `ra` (y grows downward).
pub fn cast_ray(map: &GridMap, origin: [f32; 2], ra: f32, depth_of_field: u32) -> RayHit {
    let ra = normalize_angle(ra);
    let h = scan_horizontal(map, origin, ra, depth_of_field);
    let v = scan_vertical(map, origin, ra, depth_of_field);

    let (scan, side) = match pick_closer(h.distance, v.distance) {
        Side::Horizontal => (h, Side::Horizontal),
        Side::Vertical => (v, Side::Vertical),
    };

    RayHit {
        angle: ra,
        distance: scan.distance,
        side,
        hit_point: scan.point,
    }
}

/// Vertical wins exact ties.
#[inline]
pub fn pick_closer(horizontal: f32, vertical: f32) -> Side {
    if vertical <= horizontal {
        Side::Vertical
    } else {
        Side::Horizontal
    }
}

// Steps along the horizontal grid lines (constant y).
fn scan_horizontal(map: &GridMap, origin: [f32; 2], ra: f32, depth_of_field: u32) -> Scan {
    let (sin, cos) = ra.sin_cos();
    if sin.abs() < PARALLEL_EPS {
        return Scan::miss(origin);
    }

    let cs = map.cell_size();
    let [px, py] = origin;
    let inv_slope = cos / sin; // dx per unit dy
    let line = (py / cs).floor() * cs;

    let (ry, yo) = if sin < 0.0 {
        (line - EDGE_NUDGE, -cs) // facing up
    } else {
        (line + cs, cs) // facing down
    };
    let rx = px + (ry - py) * inv_slope;
    let xo = yo * inv_slope;

    march(map, origin, [rx, ry], [xo, yo], depth_of_field)
}

// Steps along the vertical grid lines (constant x).
fn scan_vertical(map: &GridMap, origin: [f32; 2], ra: f32, depth_of_field: u32) -> Scan {
    let (sin, cos) = ra.sin_cos();
    if cos.abs() < PARALLEL_EPS {
        return Scan::miss(origin);
    }

    let cs = map.cell_size();
    let [px, py] = origin;
    let slope = sin / cos; // dy per unit dx
    let line = (px / cs).floor() * cs;

    let (rx, xo) = if cos < 0.0 {
        (line - EDGE_NUDGE, -cs) // facing left
    } else {
        (line + cs, cs) // facing right
    };
    let ry = py + (rx - px) * slope;
    let yo = xo * slope;

    march(map, origin, [rx, ry], [xo, yo], depth_of_field)
}

fn march(
    map: &GridMap,
    origin: [f32; 2],
    mut point: [f32; 2],
    offset: [f32; 2],
    depth_of_field: u32,
) -> Scan {
    for _ in 0..depth_of_field {
        if map.is_wall(point[0], point[1]) {
            let distance = (point[0] - origin[0]).hypot(point[1] - origin[1]);
            return Scan { distance, point };
        }
        point[0] += offset[0];
        point[1] += offset[1];
    }
    Scan::miss(origin)
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, FRAC_PI_6, PI};

    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::map::Cell;

    const CELL: f32 = 64.0;

    fn open_room(size: usize) -> GridMap {
        let cells = (0..size * size)
            .map(|i| {
                let (col, row) = (i % size, i / size);
                if col == 0 || row == 0 || col == size - 1 || row == size - 1 {
                    Cell::Wall
                } else {
                    Cell::Empty
                }
            })
            .collect();
        GridMap::new(size, size, CELL, cells).unwrap()
    }

    #[test]
    fn center_ray_hits_south_border() {
        let map = GridMap::reference(CELL).unwrap();
        let hit = cast_ray(&map, [150.0, 400.0], FRAC_PI_2, 8);
        assert!(!hit.is_miss());
        assert_eq!(hit.side, Side::Horizontal);
        assert_abs_diff_eq!(hit.distance, 48.0, epsilon = 1e-2);
        assert_abs_diff_eq!(hit.hit_point[0], 150.0, epsilon = 1e-2);
        assert_abs_diff_eq!(hit.hit_point[1], 448.0, epsilon = 1e-2);
    }

    #[test]
    fn fov_edges_hit_the_border() {
        let map = GridMap::reference(CELL).unwrap();
        for ra in [FRAC_PI_2 - FRAC_PI_6, FRAC_PI_2 + FRAC_PI_6] {
            let hit = cast_ray(&map, [150.0, 400.0], ra, 8);
            assert!(!hit.is_miss(), "ray at {ra} missed");
            assert!(map.is_wall(hit.hit_point[0], hit.hit_point[1]));
        }
    }

    #[test]
    fn closed_map_never_misses() {
        let map = GridMap::reference(CELL).unwrap();
        let config = Config::default();
        for turn in 0..72 {
            let player = Player::new([150.0, 400.0], turn as f32 * 5f32.to_radians(), 5.0);
            for hit in cast_fov(&map, &player, &config) {
                assert!(!hit.is_miss(), "miss at angle {}", hit.angle);
            }
        }
    }

    #[test]
    fn fov_is_ordered_left_to_right() {
        let map = GridMap::reference(CELL).unwrap();
        let config = Config::default();
        let player = Player::new([150.0, 400.0], FRAC_PI_2, 5.0);
        let hits = cast_fov(&map, &player, &config);

        assert_eq!(hits.len(), config.column_count);
        assert_abs_diff_eq!(hits[0].angle, FRAC_PI_2 - FRAC_PI_6, epsilon = 1e-5);
        assert_abs_diff_eq!(hits[30].angle, FRAC_PI_2, epsilon = 1e-5);
        for pair in hits.windows(2) {
            assert_abs_diff_eq!(pair[1].angle - pair[0].angle, config.column_step(), epsilon = 1e-5);
        }
    }

    #[test]
    fn fov_wraps_through_zero() {
        let map = open_room(8);
        let config = Config::default();
        let player = Player::new([256.0, 256.0], 0.1, 5.0);
        let hits = cast_fov(&map, &player, &config);
        assert!(hits.iter().all(|h| (0.0..std::f32::consts::TAU).contains(&h.angle)));
        assert!(hits[0].angle > PI);
        assert!(hits[59].angle < 1.0);
    }

    #[test]
    fn cardinal_rays_match_ground_truth() {
        let map = open_room(8);
        let origin = [256.0, 256.0];
        // inner faces of the border are at 64 and 7 * 64
        let cases = [
            (0.0, 448.0 - 256.0, Side::Vertical),
            (FRAC_PI_2, 448.0 - 256.0, Side::Horizontal),
            (PI, 256.0 - 64.0, Side::Vertical),
            (3.0 * FRAC_PI_2, 256.0 - 64.0, Side::Horizontal),
        ];
        for (ra, expected, side) in cases {
            let hit = cast_ray(&map, origin, ra, 8);
            assert_abs_diff_eq!(hit.distance, expected, epsilon = 0.01);
            assert_eq!(hit.side, side, "ray at {ra}");
        }
    }

    #[test]
    fn oblique_rays_within_a_cell_diagonal() {
        let map = open_room(8);
        let origin = [200.0, 300.0];
        let tolerance = CELL * std::f32::consts::SQRT_2;

        for deg in (5..360).step_by(17) {
            let ra = (deg as f32).to_radians();
            let (sin, cos) = ra.sin_cos();
            // distance to the inner room boundary along the ray
            let tx = if cos > 0.0 { (448.0 - origin[0]) / cos } else { (64.0 - origin[0]) / cos };
            let ty = if sin > 0.0 { (448.0 - origin[1]) / sin } else { (64.0 - origin[1]) / sin };
            let truth = tx.min(ty);

            let hit = cast_ray(&map, origin, ra, 8);
            assert!(
                (hit.distance - truth).abs() <= tolerance,
                "deg {deg}: got {} expected {truth}",
                hit.distance
            );
        }
    }

    #[test]
    fn diagonal_into_corner() {
        let map = open_room(8);
        let hit = cast_ray(&map, [256.0, 256.0], FRAC_PI_4, 8);
        assert_abs_diff_eq!(hit.distance, 192.0 * std::f32::consts::SQRT_2, epsilon = 0.5);
    }

    #[test]
    fn interior_wall_blocks_before_border() {
        let map = GridMap::reference(CELL).unwrap();
        // cell (5, 5) is solid; approach it from the west along row 5
        let hit = cast_ray(&map, [100.0, 352.0], 0.0, 8);
        assert_eq!(hit.side, Side::Vertical);
        assert_abs_diff_eq!(hit.distance, 320.0 - 100.0, epsilon = 0.01);
    }

    #[test]
    fn depth_cap_reports_sentinel() {
        // one long corridor with the only wall past the step budget
        let mut cells = vec![Cell::Empty; 20];
        cells[19] = Cell::Wall;
        let map = GridMap::new(20, 1, CELL, cells).unwrap();

        let hit = cast_ray(&map, [32.0, 32.0], 0.0, 8);
        assert!(hit.is_miss());
        assert_eq!(hit.distance, NO_HIT_DISTANCE);

        let hit = cast_ray(&map, [32.0, 32.0], 0.0, 20);
        assert!(!hit.is_miss());
        assert_abs_diff_eq!(hit.distance, 19.0 * CELL - 32.0, epsilon = 0.01);
    }

    #[test]
    fn open_space_misses() {
        let map = GridMap::new(2, 2, CELL, vec![Cell::Empty; 4]).unwrap();
        let hit = cast_ray(&map, [64.0, 64.0], 1.0, 8);
        assert!(hit.is_miss());
    }

    #[test]
    fn vertical_wins_exact_ties() {
        assert_eq!(pick_closer(10.0, 10.0), Side::Vertical);
        assert_eq!(pick_closer(9.0, 10.0), Side::Horizontal);
        assert_eq!(pick_closer(10.0, 9.0), Side::Vertical);
        assert_eq!(pick_closer(NO_HIT_DISTANCE, NO_HIT_DISTANCE), Side::Vertical);
    }
}
