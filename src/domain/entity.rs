/// Entities: Player, Projectile, Brain, Obstacle, Flame, Wanderer, Animal, Falling.
///
/// Every sprite is a rectangle plus a tiny per-tick update rule.
/// Randomised constructors take the world RNG so levels replay from a seed.

use rand::Rng;

use super::geom::{Rect, Vec2, SCREEN_H, SCREEN_W, TILE};
use super::roster::Character;

/// Held movement keys for one tick.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Keys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl Keys {
    /// Raw direction (-1/0/1 per axis). Right wins over left, down over up.
    pub fn direction(self) -> (i32, i32) {
        let mut dx = 0;
        let mut dy = 0;
        if self.left { dx = -1; }
        if self.right { dx = 1; }
        if self.up { dy = -1; }
        if self.down { dy = 1; }
        (dx, dy)
    }
}

/// Frame input: held movement plus this tick's one-shot actions.
/// Clicks are already translated into playfield coordinates.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameInput {
    pub keys: Keys,
    pub click: Option<Vec2>,
    pub confirm: bool,
    /// 1-based character choice on the welcome screen.
    pub pick: Option<usize>,
}

// ── Player ──

pub const PLAYER_SIZE: i32 = 40;

#[derive(Clone, Debug)]
pub struct Player {
    pub character: Character,
    pub rect: Rect,
    pub speed: i32,
}

impl Player {
    pub fn new(character: Character) -> Self {
        Player {
            character,
            rect: Rect::centered(SCREEN_W / 2, SCREEN_H - 100, PLAYER_SIZE, PLAYER_SIZE),
            speed: character.speed(),
        }
    }

    /// Free movement: each held key moves one step unless that edge is
    /// already at the screen border.
    pub fn update(&mut self, keys: Keys) {
        if keys.left && self.rect.left() > 0 {
            self.rect.x -= self.speed;
        }
        if keys.right && self.rect.right() < SCREEN_W {
            self.rect.x += self.speed;
        }
        if keys.up && self.rect.top() > 0 {
            self.rect.y -= self.speed;
        }
        if keys.down && self.rect.bottom() < SCREEN_H {
            self.rect.y += self.speed;
        }
    }

    /// Per-axis step for the held keys (right/down override left/up).
    pub fn step_for(&self, keys: Keys) -> (i32, i32) {
        let (dx, dy) = keys.direction();
        (dx * self.speed, dy * self.speed)
    }

    /// Wall-aware movement: X then Y, undoing whichever axis hits a wall.
    pub fn move_blocked(&mut self, dx: i32, dy: i32, walls: &[Rect]) {
        self.rect.x += dx;
        if self.rect.collides_any(walls) {
            self.rect.x -= dx;
        }
        self.rect.y += dy;
        if self.rect.collides_any(walls) {
            self.rect.y -= dy;
        }
    }

    /// Unit vector from the player's centre toward `target`.
    /// `None` when the target is exactly the centre (no direction to fire in).
    pub fn aim(&self, target: Vec2) -> Option<Vec2> {
        (target - self.rect.center_vec()).normalized()
    }
}

// ── Projectiles ──

pub const PROJECTILE_SIZE: i32 = 10;
pub const PROJECTILE_SPEED: f32 = 10.0;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ProjectileKind {
    /// Level 1 shot. Expires once fully off screen.
    Bullet,
    /// Level 5 shot. Expires once its corner leaves the screen.
    Water,
}

/// A shot with a float position so shallow angles do not drift.
#[derive(Clone, Debug)]
pub struct Projectile {
    pub kind: ProjectileKind,
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Projectile {
    pub fn new(kind: ProjectileKind, origin: Vec2, direction: Vec2) -> Self {
        Projectile { kind, pos: origin, vel: direction * PROJECTILE_SPEED }
    }

    pub fn rect(&self) -> Rect {
        Rect::centered(
            self.pos.x.round() as i32,
            self.pos.y.round() as i32,
            PROJECTILE_SIZE,
            PROJECTILE_SIZE,
        )
    }

    /// Advance one tick. Returns false once the shot has left the playfield.
    pub fn update(&mut self) -> bool {
        self.pos = self.pos + self.vel;
        let r = self.rect();
        match self.kind {
            ProjectileKind::Bullet => !r.off_screen(),
            ProjectileKind::Water => {
                (0..=SCREEN_W).contains(&r.x) && (0..=SCREEN_H).contains(&r.y)
            }
        }
    }
}

// ── Pickups and hazards ──

fn random_rect<R: Rng>(rng: &mut R, w: i32, h: i32) -> Rect {
    Rect::new(rng.gen_range(0..=SCREEN_W - w), rng.gen_range(0..=SCREEN_H - h), w, h)
}

fn random_sign<R: Rng>(rng: &mut R) -> i32 {
    if rng.gen_bool(0.5) { 1 } else { -1 }
}

/// Level 2 pickup.
#[derive(Clone, Debug)]
pub struct Brain {
    pub rect: Rect,
}

impl Brain {
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Brain { rect: random_rect(rng, 30, 30) }
    }
}

/// Bouncing block used by levels 1 and 2.
#[derive(Clone, Debug)]
pub struct Obstacle {
    pub rect: Rect,
    pub vx: i32,
    pub vy: i32,
}

impl Obstacle {
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Obstacle {
            rect: random_rect(rng, 40, 40),
            vx: 2 * random_sign(rng),
            vy: 2 * random_sign(rng),
        }
    }

    pub fn update(&mut self) {
        self.rect.x += self.vx;
        self.rect.y += self.vy;
        if self.rect.left() <= 0 || self.rect.right() >= SCREEN_W {
            self.vx = -self.vx;
        }
        if self.rect.top() <= 0 || self.rect.bottom() >= SCREEN_H {
            self.vy = -self.vy;
        }
    }
}

// ── Flame ──

pub const FLAME_START: i32 = 50;
pub const FLAME_MIN: i32 = 20;
pub const FLAME_MAX: i32 = 300;
const FLAME_SHRINK: i32 = 5;

/// Level 5: a square fire that grows every tick and shrinks when doused.
#[derive(Clone, Debug)]
pub struct Flame {
    pub center: (i32, i32),
    pub size: i32,
    pub growth_rate: i32,
    /// Green channel of the current flicker colour (50..=100).
    pub shade: u8,
}

impl Flame {
    pub fn new(cx: i32, cy: i32) -> Self {
        Flame { center: (cx, cy), size: FLAME_START, growth_rate: 1, shade: 100 }
    }

    pub fn rect(&self) -> Rect {
        Rect::centered(self.center.0, self.center.1, self.size, self.size)
    }

    pub fn grow<R: Rng>(&mut self, rng: &mut R) {
        self.size += self.growth_rate;
        self.shade = rng.gen_range(50..=100);
    }

    /// Shrink after a water hit. The flame never shrinks from the minimum.
    pub fn shrink<R: Rng>(&mut self, rng: &mut R) {
        if self.size > FLAME_MIN {
            self.size -= FLAME_SHRINK;
            self.shade = rng.gen_range(50..=100);
        }
    }
}

// ── Walls and wanderers ──

/// Solid tile. Walls never move, so a bare rectangle is enough.
pub type Wall = Rect;

/// Random-walk chaser: level 3 hunters and level 4 thugs.
#[derive(Clone, Debug)]
pub struct Wanderer {
    pub rect: Rect,
    pub speed: i32,
    pub dir: (i32, i32),
}

/// Level 3 calls its wanderers humans.
pub type Human = Wanderer;

/// Chance (out of 101) that a wanderer picks a new heading in a tick.
const TURN_CHANCE: u32 = 5;

impl Wanderer {
    pub fn new<R: Rng>(x: i32, y: i32, rng: &mut R) -> Self {
        Wanderer {
            rect: Rect::new(x, y, TILE, TILE),
            speed: 2,
            dir: (random_sign(rng), random_sign(rng)),
        }
    }

    pub fn update<R: Rng>(&mut self, walls: &[Wall], rng: &mut R) {
        let (dx, dy) = (self.speed * self.dir.0, self.speed * self.dir.1);
        self.rect.x += dx;
        self.rect.y += dy;

        if self.rect.collides_any(walls) {
            self.rect.x -= dx;
            self.rect.y -= dy;
            self.dir = (-self.dir.0, -self.dir.1);
        }

        if rng.gen_range(0..=100) < TURN_CHANCE {
            self.dir = (random_sign(rng), random_sign(rng));
        }
    }
}

// ── Animal ──

const PUSH_DISTANCE: f32 = 5.0;

/// Level 3 rescue target.
#[derive(Clone, Debug)]
pub struct Animal {
    pub rect: Rect,
}

impl Animal {
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Animal { rect: random_rect(rng, 30, 30) }
    }

    /// Nudge along `keys` and keep inside the arena walls.
    /// Each component is truncated toward zero, so diagonals move 3 px.
    pub fn push(&mut self, keys: Keys) {
        let (dx, dy) = keys.direction();
        let Some(dir) = Vec2::new(dx as f32, dy as f32).normalized() else { return };
        let step = dir * PUSH_DISTANCE;
        self.rect.x += step.x as i32;
        self.rect.y += step.y as i32;
        self.rect.x = self.rect.x.clamp(TILE, SCREEN_W - 2 * TILE);
        self.rect.y = self.rect.y.clamp(TILE, SCREEN_H - 2 * TILE);
    }
}

// ── Falling objects ──

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FallingKind {
    Data,
    Glitch,
}

/// Level 6 falling object.
#[derive(Clone, Debug)]
pub struct Falling {
    pub kind: FallingKind,
    pub rect: Rect,
    pub speed: i32,
}

impl Falling {
    pub fn spawn(kind: FallingKind, cx: i32, speed: i32) -> Self {
        let size = match kind {
            FallingKind::Data => 20,
            FallingKind::Glitch => 30,
        };
        Falling { kind, rect: Rect::centered(cx, -TILE, size, size), speed }
    }

    pub fn fall(&mut self) {
        self.rect.y += self.speed;
    }

    pub fn below_screen(&self) -> bool {
        self.rect.top() > SCREEN_H
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn player_stops_at_screen_edge() {
        let mut p = Player::new(Character::Daniel);
        p.rect.x = 0;
        p.update(Keys { left: true, ..Keys::default() });
        assert_eq!(p.rect.x, 0);
        p.rect.x = SCREEN_W - PLAYER_SIZE;
        p.update(Keys { right: true, ..Keys::default() });
        assert_eq!(p.rect.x, SCREEN_W - PLAYER_SIZE);
    }

    #[test]
    fn player_spawns_near_bottom_center() {
        let p = Player::new(Character::Hera);
        assert_eq!(p.rect.center(), (SCREEN_W / 2, SCREEN_H - 100));
        assert_eq!(p.speed, 6);
    }

    #[test]
    fn blocked_move_keeps_free_axis() {
        let mut p = Player::new(Character::Rob);
        p.rect = Rect::new(100, 100, 40, 40);
        let walls = [Rect::new(141, 80, 40, 100)];
        p.move_blocked(5, 5, &walls);
        // X blocked by the wall, Y slides
        assert_eq!(p.rect.x, 100);
        assert_eq!(p.rect.y, 105);
    }

    #[test]
    fn aim_at_own_center_is_none() {
        let p = Player::new(Character::Pete);
        assert!(p.aim(p.rect.center_vec()).is_none());
        let d = p.aim(p.rect.center_vec() + Vec2::new(0.0, -50.0)).unwrap();
        assert!((d.y + 1.0).abs() < 1e-6);
    }

    #[test]
    fn bullet_expires_only_when_fully_off_screen() {
        let mut b = Projectile::new(ProjectileKind::Bullet, Vec2::new(5.0, 300.0), Vec2::new(-1.0, 0.0));
        assert!(b.update()); // centre at -5, right edge still on screen
        assert!(!b.update()); // centre at -15, right edge at -10
    }

    #[test]
    fn water_expires_when_corner_leaves() {
        let mut w = Projectile::new(ProjectileKind::Water, Vec2::new(10.0, 300.0), Vec2::new(-1.0, 0.0));
        assert!(!w.update()); // corner at x = -5
    }

    #[test]
    fn obstacle_bounces_off_left_edge() {
        let mut o = Obstacle { rect: Rect::new(2, 100, 40, 40), vx: -2, vy: 2 };
        o.update();
        assert_eq!(o.rect.x, 0);
        assert_eq!(o.vx, 2);
        assert_eq!(o.vy, 2);
    }

    #[test]
    fn random_sprites_start_on_screen() {
        let mut r = rng();
        for _ in 0..50 {
            let b = Brain::random(&mut r);
            assert!(b.rect.x >= 0 && b.rect.right() <= SCREEN_W);
            let o = Obstacle::random(&mut r);
            assert!(o.vx.abs() == 2 && o.vy.abs() == 2);
        }
    }

    #[test]
    fn flame_shrink_has_floor() {
        let mut r = rng();
        let mut f = Flame::new(400, 300);
        f.size = 21;
        f.shrink(&mut r);
        assert_eq!(f.size, 16);
        f.shrink(&mut r);
        assert_eq!(f.size, 16);
        f.grow(&mut r);
        assert_eq!(f.size, 17);
        assert!((50..=100).contains(&f.shade));
    }

    #[test]
    fn wanderer_reverses_on_wall() {
        let mut r = rng();
        let mut w = Wanderer::new(100, 100, &mut r);
        w.dir = (1, 1);
        let walls = [Rect::new(141, 0, 40, 600)];
        w.update(&walls, &mut r);
        assert_eq!(w.rect.x, 100);
        assert_eq!(w.rect.y, 100);
        // Reversed, unless the 5% re-roll fired; either way a diagonal.
        assert!(w.dir.0.abs() == 1 && w.dir.1.abs() == 1);
    }

    #[test]
    fn animal_push_truncates_diagonal_and_clamps() {
        let mut a = Animal { rect: Rect::new(200, 200, 30, 30) };
        a.push(Keys { right: true, down: true, ..Keys::default() });
        assert_eq!((a.rect.x, a.rect.y), (203, 203));

        a.rect.x = TILE + 2;
        a.push(Keys { left: true, ..Keys::default() });
        assert_eq!(a.rect.x, TILE);

        let before = a.rect;
        a.push(Keys::default());
        assert_eq!(a.rect, before);
    }

    #[test]
    fn falling_size_follows_kind() {
        let data = Falling::spawn(FallingKind::Data, 300, 3);
        let glitch = Falling::spawn(FallingKind::Glitch, 300, 3);
        assert_eq!((data.kind, data.rect.w), (FallingKind::Data, 20));
        assert_eq!((glitch.kind, glitch.rect.w), (FallingKind::Glitch, 30));
    }

    #[test]
    fn falling_objects_spawn_above_screen() {
        let mut d = Falling::spawn(FallingKind::Data, 300, 3);
        assert_eq!(d.rect.center(), (300, -TILE));
        d.rect.y = SCREEN_H;
        assert!(!d.below_screen());
        d.fall();
        assert!(d.below_screen());
    }
}
