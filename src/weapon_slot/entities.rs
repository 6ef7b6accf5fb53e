use bevy::prelude::*;
use thiserror::Error;

use crate::math;

/// Weapon category a slot holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Reflect)]
pub enum WeaponSlotKind {
    /// Slot 0: fixed starter weapon.
    #[default]
    Default,
    /// Close range.
    Melee,
    /// Long range.
    Ranged,
    /// Thrown explosive.
    Bomb,
}

impl WeaponSlotKind {
    /// Every kind, in slot order.
    pub const ALL: [Self; 4] = [Self::Default, Self::Melee, Self::Ranged, Self::Bomb];

    /// Placeholder tint used when no sprite is set.
    pub fn color(self) -> Color {
        match self {
            Self::Default => Color::srgb(0.8, 0.8, 0.8),
            Self::Melee => Color::srgb(0.9, 0.45, 0.2),
            Self::Ranged => Color::srgb(0.3, 0.7, 0.95),
            Self::Bomb => Color::srgb(0.85, 0.25, 0.6),
        }
    }

    /// Asset file stem, e.g. `2_MeleeWeapon`.
    pub fn file_stem(self) -> &'static str {
        match self {
            Self::Default => "1_DefaultWeapon",
            Self::Melee => "2_MeleeWeapon",
            Self::Ranged => "3_RangedWeapon",
            Self::Bomb => "4_BombWeapon",
        }
    }
}

/// A sprite an icon set failed to provide.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{kind:?} icon set: {sprite} is missing")]
pub struct IconSetError {
    /// Set that failed validation.
    pub kind: WeaponSlotKind,
    /// Which sprite is missing.
    pub sprite: &'static str,
}

/// Sprites used by one kind of weapon slot.
#[derive(Clone, Debug, Default, Reflect)]
pub struct WeaponIconSet {
    /// Kind this set belongs to.
    pub kind: WeaponSlotKind,
    /// Icon when not selected.
    pub normal_icon: Option<Handle<Image>>,
    /// Icon when selected.
    pub active_icon: Option<Handle<Image>>,
    /// Radial durability gauge.
    pub gauge: Option<Handle<Image>>,
    /// Backdrop of the slot number.
    pub text_bg: Option<Handle<Image>>,
    /// Outline shown on the selected slot.
    pub selected_outline: Option<Handle<Image>>,
    /// Icon of an empty slot.
    pub empty_slot_icon: Option<Handle<Image>>,
    /// Skip completeness checks.
    pub allow_missing_sprites: bool,
}

impl WeaponIconSet {
    /// Checks every sprite is present, unless missing sprites are allowed.
    pub fn validate(&self) -> Result<(), IconSetError> {
        if self.allow_missing_sprites {
            return Ok(());
        }
        let sprites = [
            ("normal icon", &self.normal_icon),
            ("active icon", &self.active_icon),
            ("gauge sprite", &self.gauge),
            ("text background", &self.text_bg),
            ("empty slot icon", &self.empty_slot_icon),
            ("selected outline", &self.selected_outline),
        ];
        match sprites.into_iter().find(|(_, handle)| handle.is_none()) {
            Some((sprite, _)) => Err(IconSetError {
                kind: self.kind,
                sprite,
            }),
            None => Ok(()),
        }
    }
}

/// State of one HUD weapon slot.
#[derive(Component, Clone, Debug, PartialEq, Reflect)]
pub struct WeaponSlot {
    /// Slot number shown on the HUD.
    pub index: usize,
    /// Kind of weapon this slot holds.
    pub kind: WeaponSlotKind,
    has_weapon: bool,
    selected: bool,
    durability: f32,
    durability_visible: bool,
}

impl WeaponSlot {
    /// Empty, unselected slot.
    pub fn new(index: usize, kind: WeaponSlotKind) -> Self {
        Self {
            index,
            kind,
            has_weapon: false,
            selected: false,
            durability: 0.0,
            durability_visible: true,
        }
    }

    /// Holds a weapon.
    pub fn has_weapon(&self) -> bool {
        self.has_weapon
    }

    /// Currently selected.
    pub fn selected(&self) -> bool {
        self.selected
    }

    /// Durability in `[0, 1]`; 0 while empty.
    pub fn durability(&self) -> f32 {
        self.durability
    }

    /// Empties or fills the slot. Emptying resets durability.
    pub fn set_has_weapon(&mut self, value: bool) {
        self.has_weapon = value;
        if !value {
            self.durability = 0.0;
        }
    }

    /// Selects or deselects the slot.
    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    /// Sets durability, clamped to `[0, 1]`. Ignored while empty.
    pub fn set_durability(&mut self, value: f32) {
        if self.has_weapon {
            self.durability = math::clamp01(value);
        }
    }

    /// Hides the gauge for weapons that never wear out.
    pub fn set_durability_visible(&mut self, visible: bool) {
        self.durability_visible = visible;
    }

    /// Applies the whole state at once, switching the slot to `kind`'s icons.
    pub fn apply_snapshot(
        &mut self,
        has_weapon: bool,
        selected: bool,
        durability: f32,
        kind: WeaponSlotKind,
    ) {
        self.kind = kind;
        self.set_has_weapon(has_weapon);
        self.set_selected(selected);
        self.set_durability(durability);
    }

    /// Which layers should be visible.
    pub fn layers(&self) -> SlotLayers {
        let filled = self.has_weapon;
        SlotLayers {
            empty: !filled,
            normal_icon: filled && !self.selected,
            active_icon: filled && self.selected,
            selected_fx: filled && self.selected,
            text_bg: filled,
            index_text: filled,
            durability: filled && self.durability_visible,
        }
    }
}

/// Slot a landed `kind` goes into: the slot already showing that kind, else
/// the first empty slot other than the starter.
pub fn pick_slot(slots: &[WeaponSlot], kind: WeaponSlotKind) -> Option<usize> {
    slots
        .iter()
        .find(|slot| slot.kind == kind)
        .or_else(|| {
            slots
                .iter()
                .find(|slot| slot.kind != WeaponSlotKind::Default && !slot.has_weapon)
        })
        .map(|slot| slot.index)
}

/// Visibility of each slot layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotLayers {
    /// Empty-slot group.
    pub empty: bool,
    /// Normal icon.
    pub normal_icon: bool,
    /// Active icon.
    pub active_icon: bool,
    /// Selection highlight and outline.
    pub selected_fx: bool,
    /// Slot number backdrop.
    pub text_bg: bool,
    /// Slot number.
    pub index_text: bool,
    /// Durability gauge.
    pub durability: bool,
}

/// One visual layer of a slot; children of the [`WeaponSlot`] entity.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, Reflect)]
pub enum SlotLayer {
    /// Empty-slot icon.
    Empty,
    /// Normal icon.
    NormalIcon,
    /// Active icon.
    ActiveIcon,
    /// Selection highlight.
    SelectedFx,
    /// Slot number backdrop.
    TextBg,
    /// Slot number.
    IndexText,
    /// Durability gauge fill.
    Durability,
}

impl SlotLayer {
    /// Whether this layer is shown for `layers`.
    pub fn visible_in(self, layers: &SlotLayers) -> bool {
        match self {
            Self::Empty => layers.empty,
            Self::NormalIcon => layers.normal_icon,
            Self::ActiveIcon => layers.active_icon,
            Self::SelectedFx => layers.selected_fx,
            Self::TextBg => layers.text_bg,
            Self::IndexText => layers.index_text,
            Self::Durability => layers.durability,
        }
    }
}
