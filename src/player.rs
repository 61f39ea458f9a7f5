use std::f32::consts::TAU;

/// Player pose in world units. `direction` is always derived from `angle`.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pos: [f32; 2],       // (x, y) position in world space
    angle: f32,          // radians in [0, 2pi), y grows "south"
    direction: [f32; 2], // (cos, sin) of angle times speed
    speed: f32,
}

impl Player {
    pub fn new(pos: [f32; 2], angle: f32, speed: f32) -> Self {
        let mut player = Self {
            pos,
            angle: 0.0,
            direction: [0.0, 0.0],
            speed,
        };
        player.set_angle(angle);
        player
    }

    #[inline]
    pub fn pos(&self) -> [f32; 2] {
        self.pos
    }

    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    #[inline]
    pub fn direction(&self) -> [f32; 2] {
        self.direction
    }

    pub fn set_angle(&mut self, angle: f32) {
        self.angle = normalize_angle(angle);
        self.direction = [
            self.angle.cos() * self.speed,
            self.angle.sin() * self.speed,
        ];
    }

    pub fn rotate(&mut self, delta: f32) {
        self.set_angle(self.angle + delta);
    }

    /// Moves along `direction`; negative steps walk backwards. Walls are not checked.
    pub fn advance(&mut self, steps: f32) {
        self.pos[0] += self.direction[0] * steps;
        self.pos[1] += self.direction[1] * steps;
    }
}

/// Wraps any angle into `[0, 2pi)`.
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    let a = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if a >= TAU { 0.0 } else { a }
}
