use bevy::prelude::*;

use super::entities::{ActivePad, PadIndexChanged};

const PAD_KEYS: [KeyCode; 4] = [KeyCode::F1, KeyCode::F2, KeyCode::F3, KeyCode::F4];

/// F1–F4 stand in for the hardware active-pad selector.
pub fn pad_hotkeys(keys: Res<ButtonInput<KeyCode>>, mut changed: MessageWriter<PadIndexChanged>) {
    for (i, key) in PAD_KEYS.iter().enumerate() {
        if keys.just_pressed(*key) {
            changed.write(PadIndexChanged(i as i32));
        }
    }
}

/// Applies validated pad switches; invalid indices are dropped.
pub fn route_pad_changes(
    mut changed: MessageReader<PadIndexChanged>,
    gamepads: Query<&Gamepad>,
    mut active: ResMut<ActivePad>,
) {
    let connected = gamepads.iter().count();
    for ev in changed.read() {
        match super::route_active_pad(ev.0, connected) {
            Some(index) => {
                info!("Active pad -> {index}");
                active.index = index;
            }
            None => debug!("Ignoring pad index {} ({connected} connected)", ev.0),
        }
    }
}
