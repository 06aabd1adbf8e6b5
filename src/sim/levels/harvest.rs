/// Level 2: collect brains while dodging bouncing blocks.

use rand::Rng;

use crate::domain::entity::{Brain, FrameInput, Obstacle};
use crate::sim::event::GameEvent;
use super::{Anchor, LevelCtx, Outcome, Tone};

pub const BRAIN_COUNT: usize = 10;
pub const OBSTACLE_COUNT: usize = 5;
pub const BRAIN_GOAL: u32 = 10;

#[derive(Clone, Debug)]
pub struct Harvest {
    pub brains: Vec<Brain>,
    pub obstacles: Vec<Obstacle>,
    pub collected: u32,
}

impl Harvest {
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        Harvest {
            brains: (0..BRAIN_COUNT).map(|_| Brain::random(rng)).collect(),
            obstacles: (0..OBSTACLE_COUNT).map(|_| Obstacle::random(rng)).collect(),
            collected: 0,
        }
    }

    pub fn step(
        &mut self,
        ctx: &mut LevelCtx,
        input: &FrameInput,
        events: &mut Vec<GameEvent>,
    ) -> Option<Outcome> {
        ctx.player.update(input.keys);
        for o in &mut self.obstacles {
            o.update();
        }

        let player = ctx.player.rect;
        let before = self.brains.len();
        self.brains.retain(|b| !b.rect.collides(&player));
        for _ in self.brains.len()..before {
            self.collected += 1;
            events.push(GameEvent::BrainCollected { total: self.collected });
        }

        if player.collides_any(self.obstacles.iter().map(|o| &o.rect)) {
            return Some(Outcome::lose(
                "You hit an obstacle! Returning to the map world.",
                Tone::Plain,
                Anchor::Top,
            ));
        }

        if self.collected >= BRAIN_GOAL {
            return Some(Outcome::win(
                "Level 2 complete! Returning to the map world.",
                Tone::Plain,
                Anchor::Top,
            ));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geom::Rect;
    use crate::sim::levels::fixture;

    fn quiet_level(rng: &mut rand::rngs::StdRng) -> Harvest {
        let mut level = Harvest::new(rng);
        level.brains.clear();
        level.obstacles = vec![Obstacle { rect: Rect::new(700, 50, 40, 40), vx: 2, vy: 2 }];
        level
    }

    #[test]
    fn touching_two_brains_counts_both() {
        let (mut player, mut rng, timing) = fixture::parts();
        let mut level = quiet_level(&mut rng);
        let p = player.rect;
        level.brains = vec![
            Brain { rect: Rect::new(p.x, p.y, 30, 30) },
            Brain { rect: Rect::new(p.x + 15, p.y + 15, 30, 30) },
            Brain { rect: Rect::new(10, 10, 30, 30) },
        ];
        let mut events = vec![];
        let mut ctx = fixture::ctx(&mut player, &mut rng, &timing, 1);
        assert!(level.step(&mut ctx, &FrameInput::default(), &mut events).is_none());
        assert_eq!(level.collected, 2);
        assert_eq!(level.brains.len(), 1);
        assert_eq!(events.last(), Some(&GameEvent::BrainCollected { total: 2 }));
    }

    #[test]
    fn tenth_brain_wins() {
        let (mut player, mut rng, timing) = fixture::parts();
        let mut level = quiet_level(&mut rng);
        level.collected = 9;
        level.brains = vec![Brain { rect: player.rect }];
        let mut events = vec![];
        let mut ctx = fixture::ctx(&mut player, &mut rng, &timing, 1);
        let outcome = level.step(&mut ctx, &FrameInput::default(), &mut events);
        assert!(outcome.is_some_and(|o| o.won()));
    }

    #[test]
    fn obstacle_contact_loses_even_on_winning_tick() {
        let (mut player, mut rng, timing) = fixture::parts();
        let mut level = quiet_level(&mut rng);
        level.collected = 9;
        level.brains = vec![Brain { rect: player.rect }];
        let p = player.rect;
        level.obstacles = vec![Obstacle { rect: Rect::new(p.x - 2, p.y - 2, 40, 40), vx: 2, vy: 2 }];
        let mut events = vec![];
        let mut ctx = fixture::ctx(&mut player, &mut rng, &timing, 1);
        let outcome = level.step(&mut ctx, &FrameInput::default(), &mut events);
        assert!(matches!(outcome, Some(Outcome::Banner { won: false, .. })));
    }
}
