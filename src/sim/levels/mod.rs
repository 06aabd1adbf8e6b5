/// Per-level simulations.
///
/// Each level owns its sprites and exposes `step(ctx, input, events)`,
/// returning an `Outcome` once the level is decided. The phase machine in
/// `step.rs` turns outcomes into banners and records.

pub mod blaze;
pub mod datafall;
pub mod gallery;
pub mod harvest;
pub mod maze;
pub mod rescue;

use rand::rngs::StdRng;

use crate::config::TimingConfig;
use crate::domain::entity::{FrameInput, Player};
use super::event::GameEvent;
use super::level::LevelId;

pub use blaze::Blaze;
pub use datafall::Datafall;
pub use gallery::Gallery;
pub use harvest::Harvest;
pub use maze::Maze;
pub use rescue::Rescue;

/// Mutable world pieces a level needs for one tick.
pub struct LevelCtx<'a> {
    pub player: &'a mut Player,
    pub rng: &'a mut StdRng,
    pub tick: u64,
    pub timing: &'a TimingConfig,
}

/// Text colour of a banner.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tone {
    Plain,
    Alert,
}

/// Where a banner sits on the playfield.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Anchor {
    Top,
    Center,
    Bottom,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Outcome {
    Banner { won: bool, text: String, tone: Tone, anchor: Anchor },
    /// Level 4's goal: the hot-dog scene, counted as a win.
    HotDog,
}

impl Outcome {
    pub fn win(text: impl Into<String>, tone: Tone, anchor: Anchor) -> Self {
        Outcome::Banner { won: true, text: text.into(), tone, anchor }
    }

    pub fn lose(text: impl Into<String>, tone: Tone, anchor: Anchor) -> Self {
        Outcome::Banner { won: false, text: text.into(), tone, anchor }
    }

    pub fn won(&self) -> bool {
        match self {
            Outcome::Banner { won, .. } => *won,
            Outcome::HotDog => true,
        }
    }
}

/// State of the level being played.
#[derive(Clone, Debug)]
pub enum Scene {
    Gallery(Gallery),
    Harvest(Harvest),
    Rescue(Rescue),
    Maze(Maze),
    Blaze(Blaze),
    Datafall(Datafall),
}

impl Scene {
    /// Fresh scene for `level`. Some levels also reposition the player.
    pub fn build(level: LevelId, player: &mut Player, rng: &mut StdRng, tick: u64) -> Scene {
        match level {
            LevelId::Gallery => Scene::Gallery(Gallery::new(rng)),
            LevelId::Harvest => Scene::Harvest(Harvest::new(rng)),
            LevelId::Rescue => Scene::Rescue(Rescue::new(rng)),
            LevelId::Maze => Scene::Maze(Maze::new(player, rng)),
            LevelId::Blaze => Scene::Blaze(Blaze::new()),
            LevelId::Datafall => Scene::Datafall(Datafall::new(player, tick)),
        }
    }

    pub fn level(&self) -> LevelId {
        match self {
            Scene::Gallery(_) => LevelId::Gallery,
            Scene::Harvest(_) => LevelId::Harvest,
            Scene::Rescue(_) => LevelId::Rescue,
            Scene::Maze(_) => LevelId::Maze,
            Scene::Blaze(_) => LevelId::Blaze,
            Scene::Datafall(_) => LevelId::Datafall,
        }
    }

    pub fn step(
        &mut self,
        ctx: &mut LevelCtx,
        input: &FrameInput,
        events: &mut Vec<GameEvent>,
    ) -> Option<Outcome> {
        match self {
            Scene::Gallery(s) => s.step(ctx, input, events),
            Scene::Harvest(s) => s.step(ctx, input, events),
            Scene::Rescue(s) => s.step(ctx, input, events),
            Scene::Maze(s) => s.step(ctx, input, events),
            Scene::Blaze(s) => s.step(ctx, input, events),
            Scene::Datafall(s) => s.step(ctx, input, events),
        }
    }

    /// Status lines for the HUD row.
    pub fn hud(&self) -> Vec<String> {
        match self {
            Scene::Gallery(s) => vec![format!("Enemies: {}", s.enemies.len())],
            Scene::Harvest(s) => vec![format!("Brains: {}/{}", s.collected, harvest::BRAIN_GOAL)],
            Scene::Rescue(s) => vec![format!(
                "Animals: {}  Rescued: {}  Caught: {}",
                s.animals.len(), s.rescued, s.caught
            )],
            Scene::Maze(_) => vec!["Find the 7-Eleven".to_string()],
            Scene::Blaze(s) => vec![format!("Flame: {}", s.flame.size)],
            Scene::Datafall(s) => vec![
                format!("Data Collected: {}/{}", s.collected, datafall::WIN_THRESHOLD),
                format!("Missed Data: {}/{}", s.missed, datafall::MAX_MISSED),
            ],
        }
    }
}

#[cfg(test)]
pub(crate) mod fixture {
    use rand::SeedableRng;

    use super::*;
    use crate::domain::roster::Character;

    pub fn parts() -> (Player, StdRng, TimingConfig) {
        (Player::new(Character::Rob), StdRng::seed_from_u64(11), TimingConfig::default())
    }

    pub fn ctx<'a>(
        player: &'a mut Player,
        rng: &'a mut StdRng,
        timing: &'a TimingConfig,
        tick: u64,
    ) -> LevelCtx<'a> {
        LevelCtx { player, rng, tick, timing }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_matches_level() {
        let (mut player, mut rng, _) = fixture::parts();
        for level in LevelId::ALL {
            let scene = Scene::build(level, &mut player, &mut rng, 0);
            assert_eq!(scene.level(), level);
            assert!(!scene.hud().is_empty());
        }
    }

    #[test]
    fn hot_dog_counts_as_win() {
        assert!(Outcome::HotDog.won());
        assert!(!Outcome::lose("x", Tone::Alert, Anchor::Center).won());
    }
}
