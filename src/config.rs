use std::f32::consts::FRAC_PI_2;

use crate::error::{Error, Result};

/// Fixed tunables for the demo. There are no CLI flags; everything lives here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    pub viewport_width: usize,
    pub viewport_height: usize,
    pub fov_degrees: f32,
    pub column_count: usize,
    pub cell_size: f32,
    pub map_width: usize,
    pub map_height: usize,
    /// Max grid-line steps per scan before a ray gives up.
    pub depth_of_field: u32,

    // 3D view
    pub projection_height: f32, // also the wall height clamp
    pub view_center_y: f32,
    pub column_width: f32,
    pub view_origin_x: f32,

    // Player
    pub rotate_step: f32, // radians per key press
    pub move_step: f32,
    pub direction_scale: f32,
    pub player_start: [f32; 2],
    pub player_start_angle: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            viewport_width: 1024,
            viewport_height: 512,
            fov_degrees: 60.0,
            column_count: 60,
            cell_size: 64.0,
            map_width: 8,
            map_height: 8,
            depth_of_field: 8,

            projection_height: 320.0,
            view_center_y: 160.0,
            column_width: 8.0,
            view_origin_x: 530.0,

            rotate_step: 0.1,
            move_step: 5.0,
            direction_scale: 5.0,
            player_start: [150.0, 400.0],
            player_start_angle: FRAC_PI_2, // facing +y
        }
    }
}

impl Config {
    #[inline]
    pub fn fov(&self) -> f32 {
        self.fov_degrees.to_radians()
    }

    /// Angular step between adjacent screen columns.
    #[inline]
    pub fn column_step(&self) -> f32 {
        self.fov() / self.column_count as f32
    }

    pub fn validate(&self) -> Result<()> {
        if self.viewport_width == 0 || self.viewport_height == 0 {
            return Err(Error::Config(format!(
                "viewport must be non-empty, got {}x{}",
                self.viewport_width, self.viewport_height
            )));
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(Error::Config(format!(
                "fov_degrees must be in (0, 180), got {}",
                self.fov_degrees
            )));
        }
        if self.column_count == 0 {
            return Err(Error::Config("column_count must be at least 1".into()));
        }
        if !(self.cell_size > 0.0) {
            return Err(Error::Config(format!(
                "cell_size must be positive, got {}",
                self.cell_size
            )));
        }
        if self.map_width == 0 || self.map_height == 0 {
            return Err(Error::Config(format!(
                "map must be non-empty, got {}x{}",
                self.map_width, self.map_height
            )));
        }
        if self.depth_of_field == 0 {
            return Err(Error::Config("depth_of_field must be at least 1".into()));
        }
        if !(self.projection_height > 0.0) {
            return Err(Error::Config(format!(
                "projection_height must be positive, got {}",
                self.projection_height
            )));
        }
        Ok(())
    }
}
