/// Level identities and the map hub's door layout.
///
/// Doors are numbered left-to-right, top-to-bottom:
///   ```
///   [1] [2] [3] [4]
///   [5] [6] [7] [8]
///   ```
/// Doors 1–6 open levels; 7 and 8 stay locked.

use crate::domain::geom::Rect;

pub const DOOR_COUNT: usize = 8;
pub const DOOR_SIZE: i32 = 50;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum LevelId {
    Gallery,
    Harvest,
    Rescue,
    Maze,
    Blaze,
    Datafall,
}

impl LevelId {
    pub const ALL: [LevelId; 6] = [
        LevelId::Gallery,
        LevelId::Harvest,
        LevelId::Rescue,
        LevelId::Maze,
        LevelId::Blaze,
        LevelId::Datafall,
    ];

    /// Level behind a 0-based door index, if the door is unlocked.
    pub fn from_door(door: usize) -> Option<LevelId> {
        Self::ALL.get(door).copied()
    }

    /// 1-based level number (also the door label).
    pub fn number(self) -> usize {
        self.index() + 1
    }

    pub fn index(self) -> usize {
        match self {
            LevelId::Gallery => 0,
            LevelId::Harvest => 1,
            LevelId::Rescue => 2,
            LevelId::Maze => 3,
            LevelId::Blaze => 4,
            LevelId::Datafall => 5,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            LevelId::Gallery => "The Fountain of Filth",
            LevelId::Harvest => "The Beginning Was the End",
            LevelId::Rescue => "Vegan Hate",
            LevelId::Maze => "Seven-11 Hot Dog",
            LevelId::Blaze => "Spontaneous Human Combustion",
            LevelId::Datafall => "Data Date",
        }
    }

    /// Key of the looping track (`<key>_music.mp3`).
    pub fn music_key(self) -> String {
        format!("level{}", self.number())
    }
}

pub const MAP_MUSIC: &str = "map";

/// Door rectangles on the map, in door order.
pub fn door_rects() -> [Rect; DOOR_COUNT] {
    std::array::from_fn(|i| {
        let x = 100 + (i as i32 % 4) * 150;
        let y = 200 + (i as i32 / 4) * 150;
        Rect::new(x, y, DOOR_SIZE, DOOR_SIZE)
    })
}
