use crate::caster::RayHit;
use crate::config::Config;
use crate::map::{Cell, GridMap};
use crate::player::Player;
use crate::projector::{WallSegment, shade_for};

#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    // 0RGB, the layout softbuffer expects
    (b as u32) | ((g as u32) << 8) | ((r as u32) << 16)
}

/// Packs a colour given as 0..1 channel weights.
#[inline]
pub fn rgb_f(r: f32, g: f32, b: f32) -> u32 {
    let c = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    pack_rgb(c(r), c(g), c(b))
}

/// CPU framebuffer exposing the handful of primitives the demo draws with.
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
    background: u32,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
            background: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    pub fn set_viewport(&mut self, width: usize, height: usize) {
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.pixels = vec![self.background; width * height];
        }
    }

    pub fn set_background(&mut self, color: u32) {
        self.background = color;
    }

    pub fn clear(&mut self) {
        self.pixels.fill(self.background);
    }

    /// Fills the pixels whose centers fall inside the quad.
    pub fn fill_quad(&mut self, top_left: [f32; 2], bottom_right: [f32; 2], color: u32) {
        self.fill_px(
            top_left[0].round() as i64,
            top_left[1].round() as i64,
            bottom_right[0].round() as i64,
            bottom_right[1].round() as i64,
            color,
        );
    }

    /// Square point of side `size` centered on `pos`.
    pub fn point(&mut self, pos: [f32; 2], size: f32, color: u32) {
        let half = 0.5 * size.max(1.0);
        self.fill_quad(
            [pos[0] - half, pos[1] - half],
            [pos[0] + half, pos[1] + half],
            color,
        );
    }

    pub fn line(&mut self, from: [f32; 2], to: [f32; 2], width: f32, color: u32) {
        let dx = to[0] - from[0];
        let dy = to[1] - from[1];
        let span = dx.abs().max(dy.abs()).ceil();
        if !span.is_finite() {
            return;
        }

        // stamp a square every pixel along the major axis
        let steps = (span as usize).max(1);
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            self.point([from[0] + t * dx, from[1] + t * dy], width, color);
        }
    }

    // half-open pixel rect, clipped to the buffer
    fn fill_px(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: u32) {
        let (w, h) = (self.width as i64, self.height as i64);
        let (x0, x1) = (x0.clamp(0, w), x1.clamp(0, w));
        let (y0, y1) = (y0.clamp(0, h), y1.clamp(0, h));
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        for y in y0 as usize..y1 as usize {
            let row = y * self.width;
            self.pixels[row + x0 as usize..row + x1 as usize].fill(color);
        }
    }
}

#[inline]
fn ray_color(shade: f32) -> u32 {
    rgb_f(shade, 0.0, 0.0)
}

pub fn draw_map_2d(fb: &mut FrameBuffer, map: &GridMap) {
    let wall = pack_rgb(255, 255, 255);
    let empty = pack_rgb(0, 0, 0);
    let s = map.cell_size();

    for (col, row, cell) in map.iter() {
        let xo = col as f32 * s;
        let yo = row as f32 * s;
        let color = match cell {
            Cell::Wall => wall,
            Cell::Empty => empty,
        };
        // 1px inset leaves a visible grid
        fb.fill_quad([xo + 1.0, yo + 1.0], [xo + s - 1.0, yo + s - 1.0], color);
    }
}

pub fn draw_player(fb: &mut FrameBuffer, player: &Player) {
    let yellow = pack_rgb(255, 255, 0);
    let [px, py] = player.pos();
    let [dx, dy] = player.direction();

    fb.point([px, py], 8.0, yellow);
    fb.line([px, py], [px + dx * 5.0, py + dy * 5.0], 3.0, yellow);
}

pub fn draw_rays(fb: &mut FrameBuffer, player: &Player, hits: &[RayHit]) {
    for hit in hits {
        fb.line(player.pos(), hit.hit_point, 3.0, ray_color(shade_for(hit.side)));
    }
}

pub fn draw_walls(fb: &mut FrameBuffer, segments: &[WallSegment], config: &Config) {
    for seg in segments {
        let x = seg.column as f32 * config.column_width + config.view_origin_x;
        fb.line(
            [x, seg.top_y],
            [x, seg.bottom_y],
            config.column_width,
            ray_color(seg.shade),
        );
    }
}

/// Top-down view on the left, projected walls on the right.
pub fn render_frame(
    fb: &mut FrameBuffer,
    map: &GridMap,
    player: &Player,
    hits: &[RayHit],
    segments: &[WallSegment],
    config: &Config,
) {
    fb.set_viewport(config.viewport_width, config.viewport_height);
    fb.set_background(rgb_f(0.3, 0.3, 0.3));
    fb.clear();

    draw_map_2d(fb, map);
    draw_player(fb, player);
    draw_rays(fb, player, hits);
    draw_walls(fb, segments, config);
}
