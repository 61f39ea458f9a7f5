use crate::caster::{RayHit, Side};
use crate::config::Config;
use crate::player::{Player, normalize_angle};

const SHADE_VERTICAL: f32 = 0.9;
const SHADE_HORIZONTAL: f32 = 0.7;

/// One vertical slice of the 3D view, in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallSegment {
    pub column: usize,
    pub top_y: f32,
    pub bottom_y: f32,
    pub shade: f32, // 0..1 brightness weight
}

impl WallSegment {
    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom_y - self.top_y
    }
}

#[inline]
pub fn shade_for(side: Side) -> f32 {
    match side {
        Side::Vertical => SHADE_VERTICAL,
        Side::Horizontal => SHADE_HORIZONTAL,
    }
}

/// Perpendicular distance to the view plane; removes the fisheye bulge.
#[inline]
pub fn corrected_distance(hit: &RayHit, player_angle: f32) -> f32 {
    let ca = normalize_angle(player_angle - hit.angle);
    hit.distance * ca.cos()
}

/// Projected wall height, clamped to `projection_height`.
#[inline]
pub fn wall_height(distance: f32, cell_size: f32, config: &Config) -> f32 {
    let max = config.projection_height;
    if distance <= 0.0 {
        return max;
    }
    (cell_size * config.projection_height / distance).min(max)
}

pub fn project(hit: &RayHit, column: usize, player: &Player, config: &Config) -> WallSegment {
    let distance = corrected_distance(hit, player.angle());
    let height = wall_height(distance, config.cell_size, config);
    let top_y = config.view_center_y - 0.5 * height;

    WallSegment {
        column,
        top_y,
        bottom_y: top_y + height,
        shade: shade_for(hit.side),
    }
}

pub fn project_all(hits: &[RayHit], player: &Player, config: &Config) -> Vec<WallSegment> {
    hits.iter()
        .enumerate()
        .map(|(column, hit)| project(hit, column, player, config))
        .collect()
}
