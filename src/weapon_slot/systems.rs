use bevy::prelude::*;

use super::entities::{SlotLayer, WeaponIconSet, WeaponSlot, WeaponSlotKind, pick_slot};
use super::{WeaponIconSets, WeaponSlotConfig};
use crate::GameState;
use crate::weapon_spawn::WeaponLanded;

const SLOT_KEYS: [KeyCode; 4] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
];

/// Builds one icon set per kind and reports incomplete sets.
pub fn load_icon_sets(
    cfg: Res<WeaponSlotConfig>,
    assets: Option<Res<AssetServer>>,
    mut sets: ResMut<WeaponIconSets>,
) {
    for kind in WeaponSlotKind::ALL {
        let mut set = WeaponIconSet {
            kind,
            allow_missing_sprites: cfg.allow_missing_sprites,
            ..default()
        };
        if let (Some(dir), Some(assets)) = (&cfg.icon_dir, &assets) {
            let stem = kind.file_stem();
            let load = |suffix: &str| -> Option<Handle<Image>> {
                Some(assets.load(format!("{dir}/{stem}{suffix}.png")))
            };
            set.normal_icon = load("");
            set.active_icon = load("_Active");
            set.gauge = load("Gage");
            set.text_bg = load("TextBg");
            set.selected_outline = load("_Outline");
            set.empty_slot_icon = Some(assets.load(format!("{dir}/EmptySlot.png")));
        }
        if let Err(err) = set.validate() {
            warn!("{err}");
        }
        sets.0.insert(kind, set);
    }
}

fn image_or_tint(handle: &Option<Handle<Image>>, tint: Color) -> ImageNode {
    match handle {
        Some(handle) => ImageNode::new(handle.clone()),
        None => ImageNode::default().with_color(tint),
    }
}

/// Image for one layer of a slot showing `set.kind`. `None` for the text layer.
fn layer_image(set: &WeaponIconSet, layer: SlotLayer) -> Option<ImageNode> {
    let tint = set.kind.color();
    let (handle, fallback) = match layer {
        SlotLayer::Empty => (&set.empty_slot_icon, Color::srgba(1.0, 1.0, 1.0, 0.1)),
        SlotLayer::NormalIcon => (&set.normal_icon, tint.with_alpha(0.6)),
        SlotLayer::ActiveIcon => (&set.active_icon, tint),
        SlotLayer::SelectedFx => (&set.selected_outline, Color::srgba(1.0, 1.0, 0.6, 0.25)),
        SlotLayer::TextBg => (&set.text_bg, Color::srgba(0.0, 0.0, 0.0, 0.7)),
        SlotLayer::Durability => (&set.gauge, Color::srgb(0.3, 0.9, 0.4)),
        SlotLayer::IndexText => return None,
    };
    Some(image_or_tint(handle, fallback))
}

fn icon_set(sets: &WeaponIconSets, kind: WeaponSlotKind) -> WeaponIconSet {
    sets.0.get(&kind).cloned().unwrap_or_else(|| WeaponIconSet {
        kind,
        ..default()
    })
}

/// Spawns the four-slot HUD; the starter slot is filled, selected and never wears.
pub fn spawn_slot_hud(
    mut commands: Commands,
    cfg: Res<WeaponSlotConfig>,
    sets: Res<WeaponIconSets>,
    state: Res<State<GameState>>,
) {
    let size = Val::Px(cfg.slot_size);
    let fill = || Node {
        position_type: PositionType::Absolute,
        width: Val::Percent(100.0),
        height: Val::Percent(100.0),
        ..default()
    };

    commands
        .spawn((
            Name::new("WeaponSlots"),
            DespawnOnExit(*state.get()),
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(24.0),
                bottom: Val::Px(24.0),
                column_gap: Val::Px(8.0),
                ..default()
            },
        ))
        .with_children(|hud| {
            for (index, kind) in WeaponSlotKind::ALL.into_iter().enumerate() {
                let mut slot = WeaponSlot::new(index, kind);
                if kind == WeaponSlotKind::Default {
                    slot.set_durability_visible(false);
                    slot.apply_snapshot(true, true, 1.0, kind);
                }
                let set = icon_set(&sets, kind);
                let image = |layer| layer_image(&set, layer).unwrap_or_default();

                hud.spawn((
                    Name::new(format!("Slot{index}")),
                    slot,
                    Node {
                        width: size,
                        height: size,
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.5)),
                ))
                .with_children(|layers| {
                    layers.spawn((
                        SlotLayer::Empty,
                        image(SlotLayer::Empty),
                        fill(),
                    ));
                    layers.spawn((
                        SlotLayer::NormalIcon,
                        image(SlotLayer::NormalIcon),
                        fill(),
                    ));
                    layers.spawn((
                        SlotLayer::ActiveIcon,
                        image(SlotLayer::ActiveIcon),
                        fill(),
                    ));
                    layers.spawn((
                        SlotLayer::SelectedFx,
                        image(SlotLayer::SelectedFx),
                        fill(),
                    ));
                    layers.spawn((
                        SlotLayer::TextBg,
                        image(SlotLayer::TextBg),
                        Node {
                            position_type: PositionType::Absolute,
                            right: Val::Px(0.0),
                            top: Val::Px(0.0),
                            width: Val::Px(16.0),
                            height: Val::Px(16.0),
                            ..default()
                        },
                    ));
                    layers.spawn((
                        SlotLayer::IndexText,
                        Text::new(index.to_string()),
                        TextFont {
                            font_size: 12.0,
                            ..default()
                        },
                        Node {
                            position_type: PositionType::Absolute,
                            right: Val::Px(4.0),
                            top: Val::Px(0.0),
                            ..default()
                        },
                    ));
                    layers.spawn((
                        SlotLayer::Durability,
                        image(SlotLayer::Durability),
                        Node {
                            position_type: PositionType::Absolute,
                            left: Val::Px(0.0),
                            bottom: Val::Px(0.0),
                            width: Val::Percent(100.0),
                            height: Val::Px(4.0),
                            ..default()
                        },
                    ));
                });
            }
        });
}

/// Digits 1–4 select a slot and deselect the rest.
pub fn select_slot(keys: Res<ButtonInput<KeyCode>>, mut slots: Query<&mut WeaponSlot>) {
    let Some(chosen) = SLOT_KEYS.iter().position(|key| keys.just_pressed(*key)) else {
        return;
    };
    for mut slot in &mut slots {
        let selected = slot.index == chosen;
        if slot.selected() != selected {
            slot.set_selected(selected);
        }
    }
}

/// F uses the selected weapon; worn-out weapons leave their slot.
pub fn use_selected_weapon(
    keys: Res<ButtonInput<KeyCode>>,
    cfg: Res<WeaponSlotConfig>,
    mut slots: Query<&mut WeaponSlot>,
) {
    if !keys.just_pressed(KeyCode::KeyF) {
        return;
    }
    for mut slot in &mut slots {
        if !slot.selected() || !slot.has_weapon() || slot.kind == WeaponSlotKind::Default {
            continue;
        }
        let left = slot.durability() - cfg.wear_per_use;
        if left <= 0.0 {
            info!("{:?} weapon broke", slot.kind);
            slot.set_has_weapon(false);
        } else {
            slot.set_durability(left);
        }
    }
}

/// Fills a slot with a landed weapon and removes it from the world.
pub fn pick_up_weapons(
    mut commands: Commands,
    mut landed: MessageReader<WeaponLanded>,
    mut slots: Query<&mut WeaponSlot>,
) {
    for ev in landed.read() {
        commands.entity(ev.entity).despawn();

        let current: Vec<WeaponSlot> = slots.iter().cloned().collect();
        let Some(index) = pick_slot(&current, ev.kind) else {
            debug!("No free slot for {:?}", ev.kind);
            continue;
        };
        if let Some(mut slot) = slots.iter_mut().find(|slot| slot.index == index) {
            let selected = slot.selected();
            slot.apply_snapshot(true, selected, 1.0, ev.kind);
            debug!("Picked up {:?} into slot {}", ev.kind, slot.index);
        }
    }
}

/// Pushes changed slot state to the layer children.
#[allow(clippy::type_complexity)]
pub fn refresh_slot_visuals(
    sets: Res<WeaponIconSets>,
    slots: Query<Ref<WeaponSlot>>,
    mut layers: Query<(
        &ChildOf,
        &SlotLayer,
        &mut Visibility,
        &mut Node,
        Option<&mut ImageNode>,
    )>,
) {
    for (child_of, layer, mut visibility, mut node, image) in &mut layers {
        let Ok(slot) = slots.get(child_of.parent()) else {
            continue;
        };
        if !slot.is_changed() {
            continue;
        }
        let shown = layer.visible_in(&slot.layers());
        *visibility = if shown {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        let next = layer_image(&icon_set(&sets, slot.kind), *layer);
        if let (Some(mut image), Some(next)) = (image, next) {
            *image = next;
        }
        if *layer == SlotLayer::Durability {
            node.width = Val::Percent(slot.durability() * 100.0);
        }
    }
}
