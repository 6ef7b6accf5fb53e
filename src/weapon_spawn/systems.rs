use bevy::prelude::*;

use super::WeaponSpawnConfig;
use super::entities::{
    Lobbed, ThrownWeapon, WeaponDropZone, WeaponGenerator, WeaponHead, WeaponLanded, WeaponScatter,
};
use crate::GameState;
use crate::math;

/// Spawns the head and drop-zone anchors and restarts the spawn clock.
pub fn spawn_anchors(
    mut commands: Commands,
    cfg: Res<WeaponSpawnConfig>,
    state: Res<State<GameState>>,
) {
    let scene = *state.get();
    commands.spawn((
        Name::new("KoriHead"),
        WeaponHead,
        Sprite::from_color(Color::srgb(0.95, 0.8, 0.3), Vec2::splat(40.0)),
        Transform::from_translation(cfg.head_position),
        DespawnOnExit(scene),
    ));
    commands.spawn((
        Name::new("WeaponDropZone"),
        WeaponDropZone,
        Sprite::from_color(
            Color::srgba(1.0, 1.0, 0.3, 0.15),
            Vec2::splat(cfg.radius * 2.0),
        ),
        Transform::from_translation(cfg.drop_zone),
        DespawnOnExit(scene),
    ));
    commands.insert_resource(WeaponGenerator {
        timer: Timer::from_seconds(
            cfg.generation_interval.max(math::MIN_DURATION),
            TimerMode::Repeating,
        ),
        spawned: 0,
    });
}

/// Throws a weapon from the head every interval.
pub fn generate_weapons(
    mut commands: Commands,
    time: Res<Time>,
    cfg: Res<WeaponSpawnConfig>,
    scatter: Res<WeaponScatter>,
    state: Res<State<GameState>>,
    generator: Option<ResMut<WeaponGenerator>>,
    heads: Query<&GlobalTransform, With<WeaponHead>>,
    zones: Query<&GlobalTransform, With<WeaponDropZone>>,
) {
    let Some(mut generator) = generator else {
        return;
    };
    let (Ok(head), Ok(zone)) = (heads.single(), zones.single()) else {
        return;
    };

    generator.timer.tick(time.delta());
    if !generator.timer.just_finished() {
        return;
    }

    let n = generator.spawned;
    generator.spawned += 1;
    let Some(kind) =
        super::pick_kind(&scatter.0, n, cfg.kinds.len()).and_then(|i| cfg.kinds.get(i).copied())
    else {
        return;
    };

    let offset = super::scatter_offset(&scatter.0, n, cfg.radius);
    let target = super::landing_point(zone.translation(), offset);
    debug!("Throwing {kind:?} towards {target}");

    commands.spawn((
        Name::new(format!("{kind:?}Weapon")),
        ThrownWeapon { kind },
        Lobbed { target, t: 0.0 },
        Sprite::from_color(kind.color(), Vec2::splat(20.0)),
        Transform::from_translation(head.translation()),
        DespawnOnExit(*state.get()),
    ));
}

/// Moves weapons along their arc; snaps and announces them on landing.
pub fn fly_weapons(
    mut commands: Commands,
    time: Res<Time>,
    cfg: Res<WeaponSpawnConfig>,
    heads: Query<&GlobalTransform, With<WeaponHead>>,
    mut weapons: Query<(Entity, &ThrownWeapon, &mut Lobbed, &mut Transform)>,
    mut landed: MessageWriter<WeaponLanded>,
) {
    let Ok(head) = heads.single() else { return };
    let from = head.translation();

    for (entity, weapon, mut lob, mut transform) in &mut weapons {
        if lob.advance(time.delta_secs(), cfg.flight_secs) {
            transform.translation = lob.target;
            commands.entity(entity).remove::<Lobbed>();
            landed.write(WeaponLanded {
                entity,
                kind: weapon.kind,
            });
            continue;
        }
        transform.translation = math::lob_position(from, lob.target, lob.t, cfg.height);
    }
}
