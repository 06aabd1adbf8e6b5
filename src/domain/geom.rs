/// Screen geometry: integer rectangles, float vectors, palette.
///
/// The playfield is a fixed logical 800×600 area. The renderer scales it
/// onto terminal cells, so nothing here knows about the terminal.

use std::ops::{Add, Mul, Sub};

pub const SCREEN_W: i32 = 800;
pub const SCREEN_H: i32 = 600;
pub const TILE: i32 = 40;

// ── Palette ──

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const WHITE: Rgb = Rgb(255, 255, 255);
pub const BLACK: Rgb = Rgb(0, 0, 0);
pub const PINK: Rgb = Rgb(255, 182, 193);
pub const RED: Rgb = Rgb(255, 0, 0);
pub const ORANGE: Rgb = Rgb(255, 165, 0);
pub const GRAY: Rgb = Rgb(200, 200, 200);
pub const GREEN: Rgb = Rgb(0, 255, 0);
pub const WATER_BLUE: Rgb = Rgb(0, 0, 255);
pub const DATA_CYAN: Rgb = Rgb(0, 255, 255);
pub const NIGHT: Rgb = Rgb(10, 10, 20);
pub const GRID_LINE: Rgb = Rgb(30, 30, 60);

// ── Vec2 ──

#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Vec2 { x, y }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Unit vector in the same direction. `None` for the zero vector.
    pub fn normalized(self) -> Option<Vec2> {
        let len = self.length();
        if len > f32::EPSILON {
            Some(Vec2::new(self.x / len, self.y / len))
        } else {
            None
        }
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, o: Vec2) -> Vec2 { Vec2::new(self.x + o.x, self.y + o.y) }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, o: Vec2) -> Vec2 { Vec2::new(self.x - o.x, self.y - o.y) }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, k: f32) -> Vec2 { Vec2::new(self.x * k, self.y * k) }
}

// ── Rect ──

/// Axis-aligned integer rectangle. `right`/`bottom` are exclusive.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }

    /// Rectangle of the given size centred on `(cx, cy)`.
    pub fn centered(cx: i32, cy: i32, w: i32, h: i32) -> Self {
        let mut r = Rect::new(0, 0, w, h);
        r.set_center(cx, cy);
        r
    }

    pub const fn screen() -> Self {
        Rect::new(0, 0, SCREEN_W, SCREEN_H)
    }

    #[inline] pub fn left(&self) -> i32 { self.x }
    #[inline] pub fn right(&self) -> i32 { self.x + self.w }
    #[inline] pub fn top(&self) -> i32 { self.y }
    #[inline] pub fn bottom(&self) -> i32 { self.y + self.h }

    pub fn center(&self) -> (i32, i32) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }

    pub fn center_vec(&self) -> Vec2 {
        let (cx, cy) = self.center();
        Vec2::new(cx as f32, cy as f32)
    }

    pub fn set_center(&mut self, cx: i32, cy: i32) {
        self.x = cx - self.w / 2;
        self.y = cy - self.h / 2;
    }

    /// Overlap test. Rectangles that only share an edge do not collide.
    pub fn collides(&self, o: &Rect) -> bool {
        self.x < o.right() && self.right() > o.x && self.y < o.bottom() && self.bottom() > o.y
    }

    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.x as f32
            && p.x < self.right() as f32
            && p.y >= self.y as f32
            && p.y < self.bottom() as f32
    }

    pub fn collides_any<'a, I>(&self, others: I) -> bool
    where
        I: IntoIterator<Item = &'a Rect>,
    {
        others.into_iter().any(|o| self.collides(o))
    }

    /// Move (without resizing) so the rectangle lies inside `bounds`.
    pub fn clamp_inside(&mut self, bounds: &Rect) {
        self.x = self.x.max(bounds.x).min(bounds.right() - self.w);
        self.y = self.y.max(bounds.y).min(bounds.bottom() - self.h);
    }

    /// Entirely outside the screen on any side.
    pub fn off_screen(&self) -> bool {
        self.bottom() < 0 || self.top() > SCREEN_H || self.right() < 0 || self.left() > SCREEN_W
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_contact_is_not_collision() {
        let a = Rect::new(0, 0, 40, 40);
        let b = Rect::new(40, 0, 40, 40);
        assert!(!a.collides(&b));
        let c = Rect::new(39, 39, 40, 40);
        assert!(a.collides(&c));
    }

    #[test]
    fn centered_rect_round_trips_center() {
        let r = Rect::centered(400, 500, 40, 40);
        assert_eq!(r.x, 380);
        assert_eq!(r.y, 480);
        assert_eq!(r.center(), (400, 500));
    }

    #[test]
    fn contains_point_is_half_open() {
        let r = Rect::new(10, 10, 10, 10);
        assert!(r.contains_point(Vec2::new(10.0, 10.0)));
        assert!(r.contains_point(Vec2::new(19.9, 19.9)));
        assert!(!r.contains_point(Vec2::new(20.0, 15.0)));
    }

    #[test]
    fn clamp_keeps_size() {
        let mut r = Rect::new(-30, 590, 40, 40);
        r.clamp_inside(&Rect::screen());
        assert_eq!(r, Rect::new(0, 560, 40, 40));
    }

    #[test]
    fn off_screen_needs_full_exit() {
        assert!(!Rect::new(-5, 0, 10, 10).off_screen());
        assert!(Rect::new(-11, 0, 10, 10).off_screen());
        assert!(Rect::new(0, 601, 10, 10).off_screen());
    }

    #[test]
    fn zero_vector_has_no_direction() {
        assert!(Vec2::default().normalized().is_none());
        let n = Vec2::new(3.0, 4.0).normalized().unwrap();
        assert!((n.x - 0.6).abs() < 1e-6);
        assert!((n.y - 0.8).abs() < 1e-6);
    }
}
