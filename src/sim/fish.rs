// fish.rs - Wandering fish with boundary turnaround
//
// Each fish swims straight along its heading at constant speed, drifts
// its heading by a small random walk, and flips around when it strays
// past the boundary. The tail fin wiggles on its own clock.

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use rand::Rng;

use crate::world::Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FishColor {
    Gold,
    Red,
}

impl FishColor {
    pub fn color(self) -> Color {
        match self {
            FishColor::Gold => Color::from_hex(0xffd700),
            FishColor::Red => Color::from_hex(0xf25f5c),
        }
    }
}

#[derive(Clone, Debug)]
pub struct FishBody {
    pub position: Vec3,
    /// Heading on the xz plane, radians in [0, 2pi)
    pub heading: f32,
    /// Distance covered per tick
    pub speed: f32,
    /// Width of the per-tick heading jitter
    pub turn_rate: f32,
    pub color: FishColor,
}

impl FishBody {
    /// Unit travel direction for the current heading
    #[inline]
    pub fn direction(&self) -> Vec3 {
        Vec3::new(self.heading.cos(), 0.0, self.heading.sin())
    }

    /// Body rotation about y so the nose points along the heading
    #[inline]
    pub fn yaw(&self) -> f32 {
        -self.heading
    }

    #[inline]
    pub fn planar_distance(&self) -> f32 {
        (self.position.x * self.position.x + self.position.z * self.position.z).sqrt()
    }

    fn advance(&mut self) {
        self.position += self.direction() * self.speed;
    }

    fn reverse(&mut self) {
        self.heading = wrap_angle(self.heading + PI);
    }

    fn jitter<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let delta = (rng.random::<f32>() - 0.5) * self.turn_rate;
        self.heading = wrap_angle(self.heading + delta);
    }
}

/// Wrap into [0, 2pi); `rem_euclid` alone can round up to 2pi.
#[inline]
fn wrap_angle(a: f32) -> f32 {
    let w = a.rem_euclid(TAU);
    if w >= TAU { 0.0 } else { w }
}

/// Decorative fin; never feeds back into the body.
#[derive(Clone, Debug, Default)]
pub struct TailFin {
    pub rotation_y: f32,
}

#[derive(Clone, Debug)]
pub struct Fish {
    pub body: FishBody,
    pub tail: TailFin,
}

#[derive(Clone, Copy, Debug)]
pub struct Wiggle {
    pub freq: f32,
    pub amplitude: f32,
}

impl Wiggle {
    #[inline]
    pub fn angle(&self, t: f32) -> f32 {
        (t * self.freq).sin() * self.amplitude
    }
}

/// Advance every fish by one tick.
///
/// Turnaround wins over jitter: a fish past `boundary_radius` after moving
/// gets exactly `heading + pi` and no random drift that tick.
pub fn update_all<R: Rng + ?Sized>(
    fish: &mut [Fish],
    elapsed: f32,
    boundary_radius: f32,
    wiggle: Wiggle,
    rng: &mut R,
) {
    let tail = wiggle.angle(elapsed);
    for f in fish {
        f.body.advance();
        f.tail.rotation_y = tail;
        if f.body.planar_distance() > boundary_radius {
            f.body.reverse();
        } else {
            f.body.jitter(rng);
        }
    }
}

/// The fish list plus the parameters that drive it.
#[derive(Clone, Debug)]
pub struct FishSwarm {
    pub fish: Vec<Fish>,
    pub boundary_radius: f32,
    pub wiggle: Wiggle,
}

impl FishSwarm {
    pub fn update<R: Rng + ?Sized>(&mut self, elapsed: f32, rng: &mut R) {
        update_all(&mut self.fish, elapsed, self.boundary_radius, self.wiggle, rng);
    }

    pub fn len(&self) -> usize {
        self.fish.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fish.is_empty()
    }
}
