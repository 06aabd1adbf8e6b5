/// WorldState: the complete snapshot of a running game.
///
/// ## Phases
///
/// ```text
///   CharacterSelect ─pick─▶ Map ─door─▶ Intro(L) ─button─▶ Playing(L)
///                            ▲                                 │
///                            └──── Banner / HotDog ◀─outcome───┘
/// ```
///
/// Esc from `Intro` or `Playing` goes straight back to `Map`.
///
/// ## Viewport
///
/// Game logic works in the logical 800×600 playfield. The renderer decides
/// which terminal cells show it and records that here, so mouse clicks can be
/// translated back into playfield coordinates.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::TimingConfig;
use crate::domain::entity::{Keys, Player};
use crate::domain::geom::{Vec2, SCREEN_H, SCREEN_W};
use super::level::LevelId;
use super::levels::{Anchor, Scene, Tone};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    CharacterSelect,
    Map,
    Intro(LevelId),
    Playing(LevelId),
    Banner,
    HotDog,
}

/// A timed message that closes a level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Banner {
    pub text: String,
    pub tone: Tone,
    pub anchor: Anchor,
    pub ticks_left: u32,
}

/// Per-level results for this session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LevelRecord {
    wins: [u32; 6],
    losses: [u32; 6],
}

impl LevelRecord {
    pub fn record(&mut self, level: LevelId, won: bool) {
        let slot = if won { &mut self.wins } else { &mut self.losses };
        slot[level.index()] += 1;
    }

    pub fn wins(&self, level: LevelId) -> u32 {
        self.wins[level.index()]
    }

    pub fn losses(&self, level: LevelId) -> u32 {
        self.losses[level.index()]
    }
}

/// Terminal area showing the playfield.
///
/// `(col, row)` is the top-left cell, `(cols, rows)` the size in cells.
/// These are computed from terminal size and set during `render()`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    pub col: u16,
    pub row: u16,
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    /// Playfield point at the centre of a terminal cell.
    /// `None` if the cell lies outside the playfield.
    pub fn to_logical(&self, col: u16, row: u16) -> Option<Vec2> {
        if self.cols == 0 || self.rows == 0 {
            return None;
        }
        if col < self.col || row < self.row {
            return None;
        }
        let (dc, dr) = (col - self.col, row - self.row);
        if dc >= self.cols || dr >= self.rows {
            return None;
        }
        let x = (dc as f32 + 0.5) * SCREEN_W as f32 / self.cols as f32;
        let y = (dr as f32 + 0.5) * SCREEN_H as f32 / self.rows as f32;
        Some(Vec2::new(x, y))
    }

    /// Cell (relative to the viewport) covering a playfield point.
    /// Points outside the playfield are clamped to the border cells.
    pub fn to_cell(&self, x: i32, y: i32) -> (u16, u16) {
        let cx = (x.clamp(0, SCREEN_W - 1) as i64 * self.cols as i64 / SCREEN_W as i64) as u16;
        let cy = (y.clamp(0, SCREEN_H - 1) as i64 * self.rows as i64 / SCREEN_H as i64) as u16;
        (cx, cy)
    }
}

pub struct WorldState {
    pub phase: Phase,
    /// Chosen character, absent until the welcome screen is done.
    pub player: Option<Player>,
    /// State of the level in progress. Kept through its banner so the final
    /// frame stays visible underneath.
    pub scene: Option<Scene>,
    pub banner: Option<Banner>,

    pub tick: u64,
    pub rng: StdRng,
    pub timing: TimingConfig,

    // ── UI ──
    pub paused: bool,
    pub message: String,
    pub message_timer: u32,
    pub record: LevelRecord,
    pub viewport: Viewport,
    /// Highlighted row on the welcome screen (0-based).
    pub select_cursor: usize,
    /// Keys held on the previous tick, for edge detection on menus.
    pub last_keys: Keys,
}

impl WorldState {
    /// A seed makes every level replay identically.
    pub fn new(timing: TimingConfig, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        WorldState {
            phase: Phase::CharacterSelect,
            player: None,
            scene: None,
            banner: None,
            tick: 0,
            rng,
            timing,
            paused: false,
            message: String::new(),
            message_timer: 0,
            record: LevelRecord::default(),
            viewport: Viewport::default(),
            select_cursor: 0,
            last_keys: Keys::default(),
        }
    }

    pub fn set_message(&mut self, msg: &str, duration: u32) {
        self.message = msg.to_string();
        self.message_timer = duration;
    }

    /// Level whose intro or play is on screen, if any.
    pub fn active_level(&self) -> Option<LevelId> {
        match self.phase {
            Phase::Intro(level) | Phase::Playing(level) => Some(level),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_counts_per_level() {
        let mut r = LevelRecord::default();
        r.record(LevelId::Maze, true);
        r.record(LevelId::Maze, false);
        r.record(LevelId::Maze, true);
        assert_eq!(r.wins(LevelId::Maze), 2);
        assert_eq!(r.losses(LevelId::Maze), 1);
        assert_eq!(r.wins(LevelId::Gallery), 0);
    }

    #[test]
    fn viewport_maps_cells_to_playfield() {
        let vp = Viewport { col: 2, row: 1, cols: 80, rows: 30 };
        assert_eq!(vp.to_logical(1, 5), None);
        assert_eq!(vp.to_logical(82, 5), None);
        let p = vp.to_logical(2, 1).unwrap();
        assert_eq!(p, Vec2::new(5.0, 10.0));
        let q = vp.to_logical(81, 30).unwrap();
        assert_eq!(vp.to_cell(q.x as i32, q.y as i32), (79, 29));
        assert_eq!(vp.to_cell(-50, 9999), (0, 29));
    }

    #[test]
    fn zero_sized_viewport_rejects_clicks() {
        assert_eq!(Viewport::default().to_logical(0, 0), None);
    }

    #[test]
    fn seeded_worlds_agree() {
        use rand::Rng;
        let mut a = WorldState::new(TimingConfig::default(), Some(3));
        let mut b = WorldState::new(TimingConfig::default(), Some(3));
        assert_eq!(a.rng.gen::<u64>(), b.rng.gen::<u64>());
        assert_eq!(a.phase, Phase::CharacterSelect);
        assert_eq!(a.active_level(), None);
    }
}
