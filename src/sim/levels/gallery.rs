/// Level 1: shooting gallery. Shoot every bouncing block to clear the fountain.

use rand::Rng;

use crate::domain::entity::{FrameInput, Obstacle, Projectile, ProjectileKind};
use crate::sim::event::GameEvent;
use super::{Anchor, LevelCtx, Outcome, Tone};

pub const ENEMY_COUNT: usize = 5;

#[derive(Clone, Debug)]
pub struct Gallery {
    pub enemies: Vec<Obstacle>,
    pub bullets: Vec<Projectile>,
}

impl Gallery {
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        Gallery {
            enemies: (0..ENEMY_COUNT).map(|_| Obstacle::random(rng)).collect(),
            bullets: Vec::new(),
        }
    }

    pub fn step(
        &mut self,
        ctx: &mut LevelCtx,
        input: &FrameInput,
        events: &mut Vec<GameEvent>,
    ) -> Option<Outcome> {
        if let Some(target) = input.click {
            if let Some(dir) = ctx.player.aim(target) {
                let origin = ctx.player.rect.center_vec();
                self.bullets.push(Projectile::new(ProjectileKind::Bullet, origin, dir));
                events.push(GameEvent::WeaponFired { character: ctx.player.character, target });
            }
        }

        ctx.player.update(input.keys);
        self.bullets.retain_mut(|b| b.update());
        for enemy in &mut self.enemies {
            enemy.update();
        }

        // Bullets pass through; every block they touch goes.
        let bullets = &self.bullets;
        let before = self.enemies.len();
        self.enemies
            .retain(|e| !bullets.iter().any(|b| b.rect().collides(&e.rect)));
        for remaining in (self.enemies.len()..before).rev() {
            events.push(GameEvent::EnemyDestroyed { remaining });
        }

        if self.enemies.is_empty() {
            return Some(Outcome::win(
                "All enemies defeated! Returning to the map world.",
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
    use crate::domain::geom::{Rect, Vec2};
    use crate::sim::levels::fixture;

    #[test]
    fn click_fires_toward_target() {
        let (mut player, mut rng, timing) = fixture::parts();
        let mut level = Gallery::new(&mut rng);
        let mut events = vec![];
        let target = Vec2::new(400.0, 100.0);
        let input = FrameInput { click: Some(target), ..FrameInput::default() };
        let mut ctx = fixture::ctx(&mut player, &mut rng, &timing, 1);
        level.step(&mut ctx, &input, &mut events);
        assert_eq!(level.bullets.len(), 1);
        assert!(level.bullets[0].vel.y < 0.0);
        assert!(events.iter().any(|e| matches!(e, GameEvent::WeaponFired { .. })));
    }

    #[test]
    fn click_on_player_centre_does_not_fire() {
        let (mut player, mut rng, timing) = fixture::parts();
        let mut level = Gallery::new(&mut rng);
        let centre = player.rect.center_vec();
        let input = FrameInput { click: Some(centre), ..FrameInput::default() };
        let mut events = vec![];
        let mut ctx = fixture::ctx(&mut player, &mut rng, &timing, 1);
        level.step(&mut ctx, &input, &mut events);
        assert!(level.bullets.is_empty());
    }

    #[test]
    fn last_block_hit_wins_and_bullet_survives() {
        let (mut player, mut rng, timing) = fixture::parts();
        let mut level = Gallery::new(&mut rng);
        level.enemies = vec![Obstacle { rect: Rect::new(200, 200, 40, 40), vx: 2, vy: 2 }];
        // Bullet about to sit inside the block after both move.
        level.bullets = vec![Projectile::new(
            ProjectileKind::Bullet,
            Vec2::new(212.0, 222.0),
            Vec2::new(1.0, 0.0),
        )];
        let mut events = vec![];
        let mut ctx = fixture::ctx(&mut player, &mut rng, &timing, 1);
        let outcome = level.step(&mut ctx, &FrameInput::default(), &mut events);
        assert!(matches!(outcome, Some(Outcome::Banner { won: true, anchor: Anchor::Top, .. })));
        assert_eq!(level.bullets.len(), 1);
        assert_eq!(events, vec![GameEvent::EnemyDestroyed { remaining: 0 }]);
    }

    #[test]
    fn misses_keep_level_running() {
        let (mut player, mut rng, timing) = fixture::parts();
        let mut level = Gallery::new(&mut rng);
        level.enemies = vec![Obstacle { rect: Rect::new(600, 100, 40, 40), vx: 2, vy: 2 }];
        let mut events = vec![];
        let mut ctx = fixture::ctx(&mut player, &mut rng, &timing, 1);
        assert!(level.step(&mut ctx, &FrameInput::default(), &mut events).is_none());
        assert_eq!(level.enemies.len(), 1);
    }
}
