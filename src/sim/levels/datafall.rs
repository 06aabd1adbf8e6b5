/// Level 6: catch falling data points, dodge the glitches.

use rand::Rng;

use crate::domain::entity::{Falling, FallingKind, FrameInput, Player, PLAYER_SIZE};
use crate::domain::geom::{SCREEN_H, SCREEN_W};
use crate::sim::event::GameEvent;
use super::{Anchor, LevelCtx, Outcome, Tone};

pub const WIN_THRESHOLD: u32 = 50;
pub const MAX_MISSED: u32 = 5;
pub const MAX_DATA_POINTS: usize = 15;
pub const MAX_GLITCHES: usize = 10;
const INITIAL_SPEED: i32 = 3;
/// Horizontal play band for the player's left edge.
const MIN_X: i32 = 50;
const MAX_X: i32 = SCREEN_W - 50;
const SPAWN_MARGIN: i32 = 100;

#[derive(Clone, Debug)]
pub struct Datafall {
    pub data: Vec<Falling>,
    pub glitches: Vec<Falling>,
    pub collected: u32,
    pub missed: u32,
    last_spawn: u64,
}

impl Datafall {
    pub fn new(player: &mut Player, tick: u64) -> Self {
        player.rect.y = SCREEN_H - 100 - PLAYER_SIZE / 2;
        Datafall {
            data: Vec::new(),
            glitches: Vec::new(),
            collected: 0,
            missed: 0,
            last_spawn: tick,
        }
    }

    /// Fall speed for new drops; every ten points collected adds one.
    pub fn drop_speed(&self) -> i32 {
        INITIAL_SPEED + (self.collected / 10) as i32
    }

    fn spawn<R: Rng>(&mut self, rng: &mut R) {
        let speed = self.drop_speed();
        if self.data.len() < MAX_DATA_POINTS {
            let x = rng.gen_range(SPAWN_MARGIN..=SCREEN_W - SPAWN_MARGIN);
            self.data.push(Falling::spawn(FallingKind::Data, x, speed));
        }
        if self.glitches.len() < MAX_GLITCHES {
            let x = rng.gen_range(SPAWN_MARGIN..=SCREEN_W - SPAWN_MARGIN);
            self.glitches.push(Falling::spawn(FallingKind::Glitch, x, speed));
        }
    }

    pub fn step(
        &mut self,
        ctx: &mut LevelCtx,
        input: &FrameInput,
        events: &mut Vec<GameEvent>,
    ) -> Option<Outcome> {
        let (dx, _) = ctx.player.step_for(input.keys);
        ctx.player.rect.x = (ctx.player.rect.x + dx).clamp(MIN_X, MAX_X);

        let interval = u64::from(ctx.timing.spawn_interval_ticks);
        if ctx.tick.saturating_sub(self.last_spawn) >= interval {
            self.spawn(ctx.rng);
            self.last_spawn = ctx.tick;
        }

        let player = ctx.player.rect;
        let mut collected = self.collected;
        let mut missed = self.missed;
        self.data.retain_mut(|d| {
            d.fall();
            if d.below_screen() {
                missed += 1;
                events.push(GameEvent::DataMissed { total: missed });
                false
            } else if d.rect.collides(&player) {
                collected += 1;
                events.push(GameEvent::DataCollected { total: collected });
                false
            } else {
                true
            }
        });
        self.collected = collected;
        self.missed = missed;

        let mut hit = false;
        self.glitches.retain_mut(|g| {
            g.fall();
            hit |= g.rect.collides(&player);
            !g.below_screen()
        });
        if hit {
            return Some(Outcome::lose(
                "You hit a glitch! Returning to map.",
                Tone::Alert,
                Anchor::Center,
            ));
        }

        if self.collected >= WIN_THRESHOLD {
            return Some(Outcome::win(
                "Level Complete! You collected enough data.",
                Tone::Alert,
                Anchor::Center,
            ));
        }
        if self.missed >= MAX_MISSED {
            return Some(Outcome::lose(
                "Too many missed data points! Returning to map.",
                Tone::Alert,
                Anchor::Center,
            ));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::Keys;
    use crate::domain::geom::{Rect, TILE};
    use crate::sim::levels::fixture;

    #[test]
    fn player_is_placed_on_spawn_row() {
        let (mut player, _, _) = fixture::parts();
        player.rect.y = 10;
        Datafall::new(&mut player, 0);
        assert_eq!(player.rect.center().1, SCREEN_H - 100);
    }

    #[test]
    fn spawns_on_interval() {
        let (mut player, mut rng, timing) = fixture::parts();
        let mut level = Datafall::new(&mut player, 0);
        let mut events = vec![];
        let mut ctx = fixture::ctx(&mut player, &mut rng, &timing, 59);
        level.step(&mut ctx, &FrameInput::default(), &mut events);
        assert!(level.data.is_empty());
        ctx.tick = 60;
        level.step(&mut ctx, &FrameInput::default(), &mut events);
        assert_eq!(level.data.len(), 1);
        assert_eq!(level.glitches.len(), 1);
        let d = &level.data[0];
        assert_eq!(d.rect.center().1, -TILE + d.speed);
        assert!((SPAWN_MARGIN..=SCREEN_W - SPAWN_MARGIN).contains(&d.rect.center().0));
    }

    #[test]
    fn movement_is_horizontal_and_clamped() {
        let (mut player, mut rng, timing) = fixture::parts();
        let mut level = Datafall::new(&mut player, 0);
        player.rect.x = MIN_X + 2;
        let y = player.rect.y;
        let keys = Keys { left: true, up: true, ..Keys::default() };
        let mut events = vec![];
        let mut ctx = fixture::ctx(&mut player, &mut rng, &timing, 1);
        level.step(&mut ctx, &FrameInput { keys, ..FrameInput::default() }, &mut events);
        assert_eq!((player.rect.x, player.rect.y), (MIN_X, y));
    }

    #[test]
    fn catching_and_missing_data() {
        let (mut player, mut rng, timing) = fixture::parts();
        let mut level = Datafall::new(&mut player, 0);
        let p = player.rect;
        level.data = vec![
            Falling { kind: FallingKind::Data, rect: Rect::new(p.x, p.y - 10, 20, 20), speed: 3 },
            Falling { kind: FallingKind::Data, rect: Rect::new(100, SCREEN_H - 1, 20, 20), speed: 3 },
        ];
        let mut events = vec![];
        let mut ctx = fixture::ctx(&mut player, &mut rng, &timing, 1);
        assert!(level.step(&mut ctx, &FrameInput::default(), &mut events).is_none());
        assert_eq!((level.collected, level.missed), (1, 1));
        assert!(level.data.is_empty());
    }

    #[test]
    fn fifth_miss_loses() {
        let (mut player, mut rng, timing) = fixture::parts();
        let mut level = Datafall::new(&mut player, 0);
        level.missed = 4;
        level.data = vec![Falling { kind: FallingKind::Data, rect: Rect::new(100, SCREEN_H, 20, 20), speed: 3 }];
        let mut events = vec![];
        let mut ctx = fixture::ctx(&mut player, &mut rng, &timing, 1);
        let outcome = level.step(&mut ctx, &FrameInput::default(), &mut events);
        assert!(matches!(outcome, Some(Outcome::Banner { won: false, .. })));
        assert_eq!(events, vec![GameEvent::DataMissed { total: 5 }]);
    }

    #[test]
    fn full_screen_spawns_nothing() {
        let (mut player, mut rng, timing) = fixture::parts();
        let mut level = Datafall::new(&mut player, 0);
        let parked = |kind: FallingKind, size: i32| Falling { kind, rect: Rect::new(100, 0, size, size), speed: 3 };
        level.data = vec![parked(FallingKind::Data, 20); MAX_DATA_POINTS];
        level.glitches = vec![parked(FallingKind::Glitch, 30); MAX_GLITCHES];
        let mut events = vec![];
        let mut ctx = fixture::ctx(&mut player, &mut rng, &timing, 60);
        assert!(level.step(&mut ctx, &FrameInput::default(), &mut events).is_none());
        assert_eq!(level.data.len(), MAX_DATA_POINTS);
        assert_eq!(level.glitches.len(), MAX_GLITCHES);
    }

    #[test]
    fn one_below_the_cap_still_spawns() {
        let (mut player, mut rng, timing) = fixture::parts();
        let mut level = Datafall::new(&mut player, 0);
        let parked = |kind: FallingKind, size: i32| Falling { kind, rect: Rect::new(100, 0, size, size), speed: 3 };
        level.data = vec![parked(FallingKind::Data, 20); MAX_DATA_POINTS - 1];
        level.glitches = vec![parked(FallingKind::Glitch, 30); MAX_GLITCHES - 1];
        let mut events = vec![];
        let mut ctx = fixture::ctx(&mut player, &mut rng, &timing, 60);
        level.step(&mut ctx, &FrameInput::default(), &mut events);
        assert_eq!(level.data.len(), MAX_DATA_POINTS);
        assert_eq!(level.glitches.len(), MAX_GLITCHES);
    }

    #[test]
    fn glitch_leaving_the_bottom_is_harmless() {
        let (mut player, mut rng, timing) = fixture::parts();
        let mut level = Datafall::new(&mut player, 0);
        level.glitches = vec![Falling {
            kind: FallingKind::Glitch,
            rect: Rect::new(100, SCREEN_H, 30, 30),
            speed: 3,
        }];
        let mut events = vec![];
        let mut ctx = fixture::ctx(&mut player, &mut rng, &timing, 1);
        assert!(level.step(&mut ctx, &FrameInput::default(), &mut events).is_none());
        assert!(level.glitches.is_empty());
        assert_eq!(level.missed, 0);
        assert!(events.is_empty());
    }

    #[test]
    fn glitch_contact_loses() {
        let (mut player, mut rng, timing) = fixture::parts();
        let mut level = Datafall::new(&mut player, 0);
        let p = player.rect;
        level.glitches = vec![Falling { kind: FallingKind::Glitch, rect: Rect::new(p.x, p.y - 20, 30, 30), speed: 3 }];
        let mut events = vec![];
        let mut ctx = fixture::ctx(&mut player, &mut rng, &timing, 1);
        let outcome = level.step(&mut ctx, &FrameInput::default(), &mut events);
        assert!(matches!(outcome, Some(Outcome::Banner { won: false, tone: Tone::Alert, .. })));
    }

    #[test]
    fn fiftieth_point_wins_and_speeds_scale() {
        let (mut player, mut rng, timing) = fixture::parts();
        let mut level = Datafall::new(&mut player, 0);
        level.collected = 49;
        assert_eq!(level.drop_speed(), 7);
        let p = player.rect;
        level.data = vec![Falling { kind: FallingKind::Data, rect: Rect::new(p.x, p.y, 20, 20), speed: 3 }];
        let mut events = vec![];
        let mut ctx = fixture::ctx(&mut player, &mut rng, &timing, 1);
        let outcome = level.step(&mut ctx, &FrameInput::default(), &mut events);
        assert!(outcome.is_some_and(|o| o.won()));
    }
}
