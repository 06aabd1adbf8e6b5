/// Events emitted during a simulation step.
/// The presentation layer consumes these for music, sound and the log.

use crate::domain::geom::Vec2;
use crate::domain::roster::Character;
use super::level::LevelId;

#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    CharacterChosen(Character),
    EnteredMap,
    DoorLocked { door: usize },
    IntroShown(LevelId),
    LevelStarted(LevelId),
    WeaponFired { character: Character, target: Vec2 },
    WaterFired,
    EnemyDestroyed { remaining: usize },
    BrainCollected { total: u32 },
    AnimalCaught { remaining: usize },
    AnimalRescued { remaining: usize },
    FlameDoused { size: i32 },
    DataCollected { total: u32 },
    DataMissed { total: u32 },
    LevelFinished { level: LevelId, won: bool },
    LevelAbandoned(LevelId),
}
