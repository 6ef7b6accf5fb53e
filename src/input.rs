//! Confirm-button input and active gamepad routing.
//!
//! The hardware layer reports which of up to four pads is active; only that
//! pad (plus the keyboard) feeds [`ConfirmInput`].

mod entities;
mod systems;

pub use entities::{ActivePad, ConfirmInput, PadIndexChanged};

use bevy::prelude::*;

/// Highest pad index the hardware layer may report.
pub const MAX_PAD_INDEX: i32 = 3;

/// Validates a hardware pad index against the connected pad count.
///
/// Returns `None` for indices outside `0..=3` or beyond the connected pads,
/// leaving the current routing untouched.
///
/// # Examples
/// ```
/// # use hangar_client::input::route_active_pad;
/// assert_eq!(route_active_pad(1, 2), Some(1));
/// assert_eq!(route_active_pad(2, 2), None);
/// assert_eq!(route_active_pad(-1, 4), None);
/// ```
pub fn route_active_pad(index: i32, connected: usize) -> Option<usize> {
    if !(0..=MAX_PAD_INDEX).contains(&index) {
        return None;
    }
    let index = index as usize;
    (index < connected).then_some(index)
}

/// Confirm input plus active-pad routing (F1–F4 simulate hardware switches).
pub struct PadRoutingPlugin;

impl Plugin for PadRoutingPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<ActivePad>()
            .init_resource::<ActivePad>()
            .add_message::<PadIndexChanged>()
            .add_systems(
                Update,
                (systems::pad_hotkeys, systems::route_pad_changes).chain(),
            );
    }
}
