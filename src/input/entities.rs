use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

/// Index of the gamepad currently driving confirm input.
#[derive(Resource, Default, Debug, Reflect)]
pub struct ActivePad {
    /// Position among connected pads, ordered by entity.
    pub index: usize,
}

/// Hardware notification that the active pad changed.
#[derive(Message, Debug, Clone, Copy)]
pub struct PadIndexChanged(pub i32);

/// Bundled access to the confirm button (Enter / Space / pad South).
#[derive(SystemParam)]
pub struct ConfirmInput<'w, 's> {
    keys: Res<'w, ButtonInput<KeyCode>>,
    gamepads: Query<'w, 's, (Entity, &'static Gamepad)>,
    active: Res<'w, ActivePad>,
}

impl ConfirmInput<'_, '_> {
    /// Raw level: `true` while the button is held.
    pub fn held(&self) -> bool {
        self.keys.any_pressed([KeyCode::Enter, KeyCode::Space])
            || self
                .with_active_pad(|pad| pad.pressed(GamepadButton::South))
                .unwrap_or(false)
    }

    /// Edge as reported by the input backend.
    pub fn just_pressed(&self) -> bool {
        self.keys.any_just_pressed([KeyCode::Enter, KeyCode::Space])
            || self
                .with_active_pad(|pad| pad.just_pressed(GamepadButton::South))
                .unwrap_or(false)
    }

    fn with_active_pad<R>(&self, f: impl FnOnce(&Gamepad) -> R) -> Option<R> {
        let mut pads: Vec<_> = self.gamepads.iter().collect();
        pads.sort_by_key(|(entity, _)| *entity);
        pads.get(self.active.index).map(|(_, pad)| f(pad))
    }
}
