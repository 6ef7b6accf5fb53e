use bevy::prelude::*;

/// Integer scene routing id, as exchanged with the scene loader.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Reflect)]
pub struct SceneId(pub i32);

impl SceneId {
    /// No scene selected.
    pub const NONE: Self = Self(-1);
    /// Title screen.
    pub const TITLE: Self = Self(0);
    /// Character selection; arriving from here plays the intro cutscene.
    pub const SELECT_CHARACTER: Self = Self(1);
    /// Boss stage; heading here plays the boss cutscene.
    pub const BOSS: Self = Self(2);
    /// Regular stage.
    pub const STAGE: Self = Self(3);

    /// Negative ids mean "unset".
    pub fn is_valid(self) -> bool {
        self.0 >= 0
    }
}

/// Capability handed to scene-switch controllers instead of a global singleton.
pub trait SceneRouter {
    /// `true` once the next scene finished loading.
    fn is_scene_load_ready(&self) -> bool;
    /// Scene the loader is heading to.
    fn next_scene_id(&self) -> SceneId;
    /// Scene the player came from.
    fn came_from_scene_id(&self) -> SceneId;
    /// Requests the actual switch. Fire-and-forget: the router owns completion.
    fn commit_scene_switch(&mut self);
}

/// Engine-side scene routing state.
#[derive(Resource, Debug, Reflect)]
pub struct SceneRouting {
    next: SceneId,
    came_from: SceneId,
    load_complete: bool,
    pending_switch: Option<SceneId>,
}

impl Default for SceneRouting {
    fn default() -> Self {
        Self {
            next: SceneId::NONE,
            came_from: SceneId::NONE,
            load_complete: false,
            pending_switch: None,
        }
    }
}

impl SceneRouting {
    /// Selects the scene to load next. Clears the load-complete flag.
    pub fn set_next_scene(&mut self, next: SceneId, came_from: SceneId) {
        self.next = next;
        self.came_from = came_from;
        self.load_complete = false;
    }

    /// Flags the pending load as finished.
    pub fn mark_load_complete(&mut self) {
        self.load_complete = true;
    }

    /// Takes the switch requested by [`SceneRouter::commit_scene_switch`].
    pub fn take_pending_switch(&mut self) -> Option<SceneId> {
        self.pending_switch.take()
    }
}

impl SceneRouter for SceneRouting {
    fn is_scene_load_ready(&self) -> bool {
        self.load_complete
    }

    fn next_scene_id(&self) -> SceneId {
        self.next
    }

    fn came_from_scene_id(&self) -> SceneId {
        self.came_from
    }

    fn commit_scene_switch(&mut self) {
        if !self.next.is_valid() {
            return;
        }
        self.pending_switch = Some(self.next);
    }
}

/// Stand-in for the asynchronous scene load while on the loading screen.
#[derive(Resource)]
pub struct LoadJob(pub Timer);

/// Marker for the per-scene caption card.
#[derive(Component, Reflect)]
pub struct SceneCard;
