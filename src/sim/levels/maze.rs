/// Level 4: find the 7-Eleven through the alley maze without meeting a thug.

use rand::Rng;

use crate::domain::entity::{FrameInput, Player, Wall, Wanderer};
use crate::domain::geom::{Rect, SCREEN_H, TILE};
use crate::domain::maze::{is_wall, maze_walls, store_rect, GRID_H, GRID_W};
use crate::sim::event::GameEvent;
use super::{Anchor, LevelCtx, Outcome, Tone};

/// Thug placement attempts. Attempts landing on a wall are dropped.
pub const THUG_ATTEMPTS: usize = 5;

#[derive(Clone, Debug)]
pub struct Maze {
    pub walls: Vec<Wall>,
    pub store: Rect,
    pub thugs: Vec<Wanderer>,
}

impl Maze {
    pub fn new<R: Rng>(player: &mut Player, rng: &mut R) -> Self {
        let walls = maze_walls();
        let mut thugs = Vec::new();
        for _ in 0..THUG_ATTEMPTS {
            let col = rng.gen_range(1..=GRID_W - 2);
            let row = rng.gen_range(1..=GRID_H - 2);
            if !is_wall(col, row) {
                thugs.push(Wanderer::new(col as i32 * TILE, row as i32 * TILE, rng));
            }
        }

        player.rect.x = TILE;
        player.rect.y = rng.gen_range(1..=GRID_H as i32 - 2) * TILE;
        while player.rect.collides_any(&walls) {
            player.rect.y += TILE;
            if player.rect.y >= SCREEN_H {
                player.rect.y = TILE;
            }
        }

        Maze { walls, store: store_rect(), thugs }
    }

    pub fn step(
        &mut self,
        ctx: &mut LevelCtx,
        input: &FrameInput,
        _events: &mut Vec<GameEvent>,
    ) -> Option<Outcome> {
        let (dx, dy) = ctx.player.step_for(input.keys);
        ctx.player.move_blocked(dx, dy, &self.walls);
        ctx.player.rect.clamp_inside(&Rect::screen());

        for thug in &mut self.thugs {
            thug.update(&self.walls, ctx.rng);
        }

        let player = ctx.player.rect;
        if player.collides_any(self.thugs.iter().map(|t| &t.rect)) {
            return Some(Outcome::lose("You were caught by an enemy!", Tone::Alert, Anchor::Center));
        }
        if player.collides(&self.store) {
            return Some(Outcome::HotDog);
        }
        None
    }
}
