//! A small grid raycaster: rays are stepped across horizontal and vertical
//! grid lines of a tile map, then projected into fisheye-corrected wall slices.
//! The casting and projection are plain functions of the map, the player and
//! the config, so the whole pipeline runs without a window.

pub mod app;
pub mod caster;
pub mod config;
pub mod error;
pub mod input;
pub mod map;
pub mod player;
pub mod projector;
pub mod renderer;
pub mod scaler;

pub use app::{App, Demo, Scene};
pub use caster::{NO_HIT_DISTANCE, RayHit, Side, cast_fov, cast_ray};
pub use config::Config;
pub use error::{Error, Result};
pub use input::{Command, InputController};
pub use map::{Cell, GridMap};
pub use player::Player;
pub use projector::{WallSegment, project, project_all};
pub use renderer::FrameBuffer;
