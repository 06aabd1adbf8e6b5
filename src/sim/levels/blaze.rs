/// Level 5: douse the burning man before the fire gets out of hand.

use crate::domain::entity::{Flame, FrameInput, Projectile, ProjectileKind, FLAME_MAX, FLAME_MIN};
use crate::domain::geom::{Rect, SCREEN_H, SCREEN_W};
use crate::sim::event::GameEvent;
use super::{Anchor, LevelCtx, Outcome, Tone};

#[derive(Clone, Debug)]
pub struct Blaze {
    pub flame: Flame,
    pub water: Vec<Projectile>,
}

impl Blaze {
    pub fn new() -> Self {
        Blaze { flame: Flame::new(SCREEN_W / 2, SCREEN_H / 2), water: Vec::new() }
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
                self.water.push(Projectile::new(ProjectileKind::Water, origin, dir));
                events.push(GameEvent::WaterFired);
            }
        }

        let (dx, dy) = ctx.player.step_for(input.keys);
        ctx.player.move_blocked(dx, dy, &[]);
        ctx.player.rect.clamp_inside(&Rect::screen());

        self.water.retain_mut(|w| w.update());

        let fire = self.flame.rect();
        let before = self.water.len();
        self.water.retain(|w| !w.rect().collides(&fire));
        for _ in self.water.len()..before {
            self.flame.shrink(ctx.rng);
            events.push(GameEvent::FlameDoused { size: self.flame.size });
        }

        self.flame.grow(ctx.rng);

        if self.flame.size <= FLAME_MIN {
            return Some(Outcome::win(
                "You extinguished the flames! Level Complete.",
                Tone::Plain,
                Anchor::Center,
            ));
        }
        if self.flame.size >= FLAME_MAX {
            return Some(Outcome::lose(
                "The flames got too big! Returning to map.",
                Tone::Alert,
                Anchor::Center,
            ));
        }
        None
    }
}

impl Default for Blaze {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geom::Vec2;
    use crate::sim::levels::fixture;

    #[test]
    fn flame_grows_each_tick() {
        let (mut player, mut rng, timing) = fixture::parts();
        let mut level = Blaze::new();
        let mut events = vec![];
        let mut ctx = fixture::ctx(&mut player, &mut rng, &timing, 1);
        level.step(&mut ctx, &FrameInput::default(), &mut events);
        level.step(&mut ctx, &FrameInput::default(), &mut events);
        assert_eq!(level.flame.size, 52);
    }

    #[test]
    fn water_hit_shrinks_then_grows() {
        let (mut player, mut rng, timing) = fixture::parts();
        let mut level = Blaze::new();
        level.water = vec![Projectile::new(
            ProjectileKind::Water,
            Vec2::new(390.0, 300.0),
            Vec2::new(1.0, 0.0),
        )];
        let mut events = vec![];
        let mut ctx = fixture::ctx(&mut player, &mut rng, &timing, 1);
        assert!(level.step(&mut ctx, &FrameInput::default(), &mut events).is_none());
        assert!(level.water.is_empty());
        assert_eq!(events, vec![GameEvent::FlameDoused { size: 45 }]);
        assert_eq!(level.flame.size, 46);
    }

    #[test]
    fn small_flame_wins_and_big_flame_loses() {
        let (mut player, mut rng, timing) = fixture::parts();
        let mut level = Blaze::new();
        level.flame.size = 19;
        let mut events = vec![];
        let mut ctx = fixture::ctx(&mut player, &mut rng, &timing, 1);
        let outcome = level.step(&mut ctx, &FrameInput::default(), &mut events);
        assert!(outcome.is_some_and(|o| o.won()));

        let mut level = Blaze::new();
        level.flame.size = 299;
        let outcome = level.step(&mut ctx, &FrameInput::default(), &mut events);
        assert!(matches!(outcome, Some(Outcome::Banner { won: false, tone: Tone::Alert, .. })));
    }

    #[test]
    fn click_sprays_water() {
        let (mut player, mut rng, timing) = fixture::parts();
        let mut level = Blaze::new();
        let input = FrameInput { click: Some(Vec2::new(400.0, 300.0)), ..FrameInput::default() };
        let mut events = vec![];
        let mut ctx = fixture::ctx(&mut player, &mut rng, &timing, 1);
        level.step(&mut ctx, &input, &mut events);
        assert_eq!(level.water.len(), 1);
        assert_eq!(events, vec![GameEvent::WaterFired]);
    }
}
