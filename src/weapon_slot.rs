//! Weapon slot HUD.
//!
//! Four slots (starter, melee, ranged, bomb). Each slot entity carries a
//! [`WeaponSlot`] and layer children toggled from [`WeaponSlot::layers`].
//! Landed weapons fill the matching slot; digits select, F uses the selected
//! weapon and wears it down.

mod entities;
mod systems;

pub use entities::{
    IconSetError, SlotLayer, SlotLayers, WeaponIconSet, WeaponSlot, WeaponSlotKind, pick_slot,
};

use bevy::platform::collections::HashMap;
use bevy::prelude::*;

use crate::{GameState, in_gameplay};

/// Per-plugin configuration for the slot HUD.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct WeaponSlotConfig {
    /// Directory holding `<n>_<Kind>Weapon*.png` sprites. `None` uses tinted placeholders.
    pub icon_dir: Option<String>,
    /// Accept incomplete icon sets without warning.
    pub allow_missing_sprites: bool,
    /// Durability lost per use.
    pub wear_per_use: f32,
    /// Slot size in logical pixels.
    pub slot_size: f32,
}

impl Default for WeaponSlotConfig {
    fn default() -> Self {
        Self {
            icon_dir: None,
            allow_missing_sprites: true,
            wear_per_use: 0.25,
            slot_size: 56.0,
        }
    }
}

/// Icon sets by kind.
#[derive(Resource, Default, Debug)]
pub struct WeaponIconSets(pub HashMap<WeaponSlotKind, WeaponIconSet>);

/// Weapon slot HUD for gameplay scenes.
pub struct WeaponSlotPlugin(pub WeaponSlotConfig);

impl Plugin for WeaponSlotPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<WeaponSlotConfig>()
            .register_type::<WeaponSlot>()
            .insert_resource(self.0.clone())
            .init_resource::<WeaponIconSets>()
            .add_systems(Startup, systems::load_icon_sets)
            .add_systems(OnEnter(GameState::Stage), systems::spawn_slot_hud)
            .add_systems(OnEnter(GameState::Boss), systems::spawn_slot_hud)
            .add_systems(
                Update,
                (
                    systems::select_slot,
                    systems::use_selected_weapon,
                    systems::pick_up_weapons,
                    systems::refresh_slot_visuals,
                )
                    .chain()
                    .run_if(in_gameplay),
            );
    }
}
