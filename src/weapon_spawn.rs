//! Lobbed weapon spawns.
//!
//! Every few seconds a weapon pops out of the mascot's head and arcs onto a
//! scattered point around the drop zone. Landed weapons are announced with
//! [`WeaponLanded`] for the slot HUD to pick up.

mod entities;
mod systems;

pub use entities::{
    Lobbed, ThrownWeapon, WeaponDropZone, WeaponGenerator, WeaponHead, WeaponLanded, WeaponScatter,
};

use bevy::prelude::*;
use noise::NoiseFn;

use crate::weapon_slot::WeaponSlotKind;
use crate::{GameState, in_gameplay};

/// Per-plugin configuration for weapon spawning.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct WeaponSpawnConfig {
    /// Scatter radius around the drop zone, per axis.
    pub radius: f32,
    /// Peak height of the arc above the landing point.
    pub height: f32,
    /// Seconds between spawns.
    pub generation_interval: f32,
    /// Seconds a weapon spends in the air.
    pub flight_secs: f32,
    /// Seed for scatter and kind selection.
    pub scatter_seed: u32,
    /// Weapon kinds that can spawn.
    pub kinds: Vec<WeaponSlotKind>,
    /// Head anchor position.
    pub head_position: Vec3,
    /// Drop zone centre.
    pub drop_zone: Vec3,
}

impl Default for WeaponSpawnConfig {
    fn default() -> Self {
        Self {
            radius: 60.0,
            height: 180.0,
            generation_interval: 5.0,
            flight_secs: 1.0,
            scatter_seed: 7,
            kinds: vec![
                WeaponSlotKind::Melee,
                WeaponSlotKind::Ranged,
                WeaponSlotKind::Bomb,
            ],
            head_position: Vec3::new(-260.0, 40.0, 1.0),
            drop_zone: Vec3::new(0.0, -120.0, 0.0),
        }
    }
}

/// Maps a noise sample (roughly `[-1, 1]`) to `[-1, 1]` exactly.
fn unit(noise_val: f64) -> f32 {
    (noise_val as f32).clamp(-1.0, 1.0)
}

/// Scatter offset for the `n`-th spawn, see [`landing_point`].
///
/// Both axes stay within `[-radius, radius]`. Off-lattice sample points keep
/// Perlin noise away from its zero crossings at integer coordinates.
pub fn scatter_offset(noise: &impl NoiseFn<f64, 2>, n: u32, radius: f32) -> Vec2 {
    let s = n as f64 * 0.37 + 0.11;
    Vec2::new(
        unit(noise.get([s, 0.29])) * radius,
        unit(noise.get([0.71, s])) * radius,
    )
}

/// Where a scattered weapon lands inside the drop zone.
///
/// The world is viewed through a 2D camera, so both scatter axes land on the
/// screen plane (x, y) and cover the zone's square. Z keeps the zone's layer.
pub fn landing_point(zone: Vec3, offset: Vec2) -> Vec3 {
    zone + offset.extend(0.0)
}

/// Index into `count` weapon kinds for the `n`-th spawn. `None` when empty.
pub fn pick_kind(noise: &impl NoiseFn<f64, 2>, n: u32, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let v = (unit(noise.get([n as f64 * 0.53 + 7.3, 3.17])) + 1.0) / 2.0;
    Some(((v * count as f32) as usize).min(count - 1))
}

/// Periodic weapon spawns with lobbed flight.
pub struct WeaponSpawnPlugin(pub WeaponSpawnConfig);

impl Plugin for WeaponSpawnPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<WeaponSpawnConfig>()
            .register_type::<Lobbed>()
            .insert_resource(self.0.clone())
            .insert_resource(WeaponScatter::new(self.0.scatter_seed))
            .add_message::<WeaponLanded>()
            .add_systems(OnEnter(GameState::Stage), systems::spawn_anchors)
            .add_systems(OnEnter(GameState::Boss), systems::spawn_anchors)
            .add_systems(
                Update,
                (systems::generate_weapons, systems::fly_weapons)
                    .chain()
                    .run_if(in_gameplay),
            );
    }
}
