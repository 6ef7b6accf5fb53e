//! Command-line launch options.

use clap::{Parser, ValueEnum};

use crate::{GameState, LaunchOptions};

/// Hangar client.
#[derive(Parser, Debug)]
#[command(name = "hangar-client", version, about)]
pub struct Cli {
    /// Scene to start in (skips the slideshow).
    #[arg(long, value_enum)]
    pub start: Option<StartScene>,
    /// Play a cutscene on every scene switch.
    #[arg(long)]
    pub test_mode: bool,
    /// Use the boss cut range on every cutscene.
    #[arg(long)]
    pub test_boss_stage: bool,
    /// Hold on the last cut until confirm.
    #[arg(long)]
    pub wait_at_last_cut: bool,
    /// Seconds between auto-played cuts.
    #[arg(long)]
    pub auto_play_delay: Option<f32>,
    /// Seconds the loading screen pretends to load.
    #[arg(long)]
    pub simulated_load: Option<f32>,
}

/// Scenes selectable with `--start`.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartScene {
    /// Logo slideshow.
    Bootstrap,
    /// Title screen.
    Title,
    /// Character selection.
    SelectCharacter,
    /// Regular stage.
    Stage,
    /// Boss stage.
    Boss,
}

impl From<StartScene> for GameState {
    fn from(scene: StartScene) -> Self {
        match scene {
            StartScene::Bootstrap => Self::Bootstrap,
            StartScene::Title => Self::Title,
            StartScene::SelectCharacter => Self::SelectCharacter,
            StartScene::Stage => Self::Stage,
            StartScene::Boss => Self::Boss,
        }
    }
}

impl Cli {
    /// Folds the flags over the default launch options.
    pub fn into_launch_options(self) -> LaunchOptions {
        let mut opts = LaunchOptions::default();
        if let Some(start) = self.start {
            opts.start = start.into();
        }
        opts.transition.test_mode = self.test_mode;
        opts.transition.test_boss_stage = self.test_boss_stage;
        opts.transition.wait_at_last_cut = self.wait_at_last_cut;
        if let Some(delay) = self.auto_play_delay {
            opts.transition.auto_play_delay = delay;
        }
        if let Some(secs) = self.simulated_load {
            opts.scene.simulated_load_secs = secs;
        }
        opts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_flags_keep_defaults() {
        let opts = Cli::try_parse_from(["hangar-client"])
            .map(Cli::into_launch_options)
            .unwrap();
        assert_eq!(opts.start, GameState::Bootstrap);
        assert!(!opts.transition.test_mode);
        assert_eq!(opts.transition.auto_play_delay, 1.0);
    }

    #[test]
    fn flags_override_configs() {
        let opts = Cli::try_parse_from([
            "hangar-client",
            "--start",
            "select-character",
            "--test-mode",
            "--test-boss-stage",
            "--auto-play-delay",
            "0.25",
            "--simulated-load",
            "0",
        ])
        .map(Cli::into_launch_options)
        .unwrap();
        assert_eq!(opts.start, GameState::SelectCharacter);
        assert!(opts.transition.test_mode && opts.transition.test_boss_stage);
        assert_eq!(opts.transition.auto_play_delay, 0.25);
        assert_eq!(opts.scene.simulated_load_secs, 0.0);
    }

    #[test]
    fn unknown_scene_is_rejected() {
        assert!(Cli::try_parse_from(["hangar-client", "--start", "credits"]).is_err());
    }
}
