/// Level 3: herd animals into the safe zone before the humans grab them.

use rand::Rng;

use crate::domain::entity::{Animal, FrameInput, Human, Wall};
use crate::domain::geom::{Rect, SCREEN_H, SCREEN_W, TILE};
use crate::domain::maze::{border_walls, GRID_H, GRID_W};
use crate::sim::event::GameEvent;
use super::{Anchor, LevelCtx, Outcome, Tone};

pub const ANIMAL_COUNT: usize = 10;
pub const HUMAN_COUNT: usize = 3;
pub const SAFE_ZONE: Rect = Rect::new(50, 50, 200, 100);

#[derive(Clone, Debug)]
pub struct Rescue {
    pub walls: Vec<Wall>,
    pub safe_zone: Rect,
    pub animals: Vec<Animal>,
    pub humans: Vec<Human>,
    pub rescued: u32,
    pub caught: u32,
}

/// Strictly inside the arena ring, one tile clear of the far walls.
fn in_arena(r: &Rect) -> bool {
    TILE < r.x && r.x < SCREEN_W - 2 * TILE && TILE < r.y && r.y < SCREEN_H - 2 * TILE
}

impl Rescue {
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        let animals = (0..ANIMAL_COUNT)
            .map(|_| loop {
                let a = Animal::random(rng);
                if in_arena(&a.rect) {
                    break a;
                }
            })
            .collect();
        let humans = (0..HUMAN_COUNT)
            .map(|_| loop {
                let x = rng.gen_range(1..=GRID_W as i32 - 2) * TILE;
                let y = rng.gen_range(1..=GRID_H as i32 - 2) * TILE;
                let h = Human::new(x, y, rng);
                if in_arena(&h.rect) {
                    break h;
                }
            })
            .collect();
        Rescue {
            walls: border_walls(),
            safe_zone: SAFE_ZONE,
            animals,
            humans,
            rescued: 0,
            caught: 0,
        }
    }

    pub fn step(
        &mut self,
        ctx: &mut LevelCtx,
        input: &FrameInput,
        events: &mut Vec<GameEvent>,
    ) -> Option<Outcome> {
        ctx.player.update(input.keys);
        let player = ctx.player.rect;
        for animal in self.animals.iter_mut().filter(|a| a.rect.collides(&player)) {
            animal.push(input.keys);
        }

        for human in &mut self.humans {
            human.update(&self.walls, ctx.rng);
        }

        for human in &self.humans {
            let before = self.animals.len();
            self.animals.retain(|a| !a.rect.collides(&human.rect));
            for remaining in (self.animals.len()..before).rev() {
                self.caught += 1;
                events.push(GameEvent::AnimalCaught { remaining });
            }
        }

        let zone = self.safe_zone;
        let before = self.animals.len();
        self.animals.retain(|a| !a.rect.collides(&zone));
        for remaining in (self.animals.len()..before).rev() {
            self.rescued += 1;
            events.push(GameEvent::AnimalRescued { remaining });
        }

        if self.animals.is_empty() {
            return Some(Outcome::win(
                format!(
                    "Level complete! Returning to the map world.\nRescued {}, caught {}.",
                    self.rescued, self.caught
                ),
                Tone::Plain,
                Anchor::Center,
            ));
        }
        None
    }
}
