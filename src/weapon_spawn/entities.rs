use bevy::prelude::*;
use noise::{Fbm, MultiFractal, Perlin};

use crate::math;
use crate::weapon_slot::WeaponSlotKind;

/// Anchor weapons are thrown from.
#[derive(Component, Reflect)]
pub struct WeaponHead;

/// Centre of the landing area.
#[derive(Component, Reflect)]
pub struct WeaponDropZone;

/// A weapon in the world.
#[derive(Component, Clone, Copy, Debug, Reflect)]
pub struct ThrownWeapon {
    /// Slot the weapon fills when picked up.
    pub kind: WeaponSlotKind,
}

/// In-flight state; removed on landing.
#[derive(Component, Clone, Copy, Debug, Reflect)]
pub struct Lobbed {
    /// Landing point.
    pub target: Vec3,
    /// Normalized flight time.
    pub t: f32,
}

impl Lobbed {
    /// Advances by `dt` over a flight of `flight_secs`; `true` on landing.
    pub fn advance(&mut self, dt: f32, flight_secs: f32) -> bool {
        self.t += dt / flight_secs.max(math::MIN_DURATION);
        self.t >= 1.0
    }
}

/// Spawn clock.
#[derive(Resource)]
pub struct WeaponGenerator {
    /// Repeating interval timer.
    pub timer: Timer,
    /// Weapons spawned this scene.
    pub spawned: u32,
}

/// Noise field driving scatter and kind selection.
#[derive(Resource)]
pub struct WeaponScatter(pub Fbm<Perlin>);

impl WeaponScatter {
    /// Three-octave fractal Perlin noise with `seed`.
    pub fn new(seed: u32) -> Self {
        Self(Fbm::<Perlin>::new(seed).set_octaves(3))
    }
}

/// Sent when a weapon finishes its arc.
#[derive(Message, Debug, Clone, Copy)]
pub struct WeaponLanded {
    /// The landed weapon entity.
    pub entity: Entity,
    /// Its kind.
    pub kind: WeaponSlotKind,
}
