/// Terminal presentation. Each frame is composed into `front`, compared
/// cell by cell against `back` (what the terminal already shows), and only
/// the differences are queued and flushed.
///
/// The logical 800×600 playfield is scaled onto a block of cells between the
/// HUD row and the message/help rows. The block keeps roughly the playfield's
/// aspect ratio, counting a cell as twice as tall as it is wide.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::entity::{FallingKind, Player};
use crate::domain::geom::{self, Rect, Rgb, SCREEN_H, SCREEN_W, TILE};
use crate::domain::roster::Character;
use crate::sim::level::{door_rects, LevelId};
use crate::sim::levels::{Anchor, Scene, Tone};
use crate::sim::story::{self, LINE_SPACING};
use crate::sim::world::{Banner, Phase, Viewport, WorldState};

// ── Cells and frames ──

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Cell {
    /// Explicit dark background for every cell outside the playfield.
    ///
    /// Using the same RGB for `Clear(ClearType::All)` and every cell keeps
    /// the inter-row gap pixels of VTE terminals the same colour as the cells.
    const BASE_BG: Color = Color::Rgb { r: 22, g: 22, b: 35 };

    const BLANK: Cell = Cell { ch: ' ', fg: Color::White, bg: Cell::BASE_BG };

    /// Never composed, so a back buffer full of these repaints everything.
    const INVALID: Cell = Cell { ch: '\0', fg: Color::Magenta, bg: Color::Magenta };

    /// `Color::Reset` becomes `BASE_BG`; the terminal default is never used.
    fn new(ch: char, fg: Color, bg: Color) -> Self {
        let bg = if bg == Color::Reset { Self::BASE_BG } else { bg };
        Cell { ch, fg, bg }
    }
}

fn rgb(c: Rgb) -> Color {
    Color::Rgb { r: c.0, g: c.1, b: c.2 }
}

/// Row-major grid of cells covering the whole terminal.
struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    fn new(width: usize, height: usize) -> Self {
        FrameBuffer { width, height, cells: vec![Cell::BLANK; width * height] }
    }

    fn resize(&mut self, width: usize, height: usize) {
        if (self.width, self.height) != (width, height) {
            *self = FrameBuffer::new(width, height);
        }
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn invalidate(&mut self) {
        self.cells.fill(Cell::INVALID);
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    fn get(&self, x: usize, y: usize) -> Cell {
        self.index(x, y).map_or(Cell::BLANK, |i| self.cells[i])
    }

    /// One column per char; clipped at the right edge.
    fn put_str(&mut self, x: usize, y: usize, s: &str, fg: Color, bg: Color) {
        for (i, ch) in s.chars().enumerate() {
            if x + i >= self.width { break; }
            self.set(x + i, y, Cell::new(ch, fg, bg));
        }
    }

    /// Like `put_str`, but keeps whatever background is already there.
    fn overlay_str(&mut self, x: usize, y: usize, s: &str, fg: Color) {
        for (i, ch) in s.chars().enumerate() {
            if x + i >= self.width { break; }
            let bg = self.get(x + i, y).bg;
            self.set(x + i, y, Cell::new(ch, fg, bg));
        }
    }

    /// Fill the inclusive cell box (x0, y0)..=(x1, y1).
    fn fill(&mut self, x0: usize, y0: usize, x1: usize, y1: usize, cell: Cell) {
        for y in y0..=y1 {
            for x in x0..=x1 {
                self.set(x, y, cell);
            }
        }
    }
}

// ── Layout ──

const HUD_ROW: u16 = 0;
const PLAY_ROW: u16 = 1;
/// HUD above the playfield, message and help rows below it.
const RESERVED_ROWS: u16 = 3;

const HUD_BG: Color = Color::Rgb { r: 20, g: 20, b: 60 };
const MSG_BG: Color = Color::Rgb { r: 200, g: 180, b: 50 };

/// Where the playfield goes on a terminal of the given size.
pub fn fit_viewport(term_w: u16, term_h: u16) -> Viewport {
    let avail_rows = term_h.saturating_sub(RESERVED_ROWS).max(1);
    let avail_cols = term_w.max(1);
    // 800×600 at two columns per row of height is 8:3 in cells.
    let rows = (avail_rows as u32).min(avail_cols as u32 * 3 / 8).max(1) as u16;
    let cols = (rows as u32 * 8 / 3).clamp(1, avail_cols as u32) as u16;
    Viewport {
        col: term_w.saturating_sub(cols) / 2,
        row: PLAY_ROW,
        cols,
        rows,
    }
}

/// Logical y of a banner's first line.
fn banner_y(anchor: Anchor) -> i32 {
    match anchor {
        Anchor::Top => 30,
        Anchor::Center => SCREEN_H / 2,
        Anchor::Bottom => SCREEN_H - 50,
    }
}

const HOT_DOG_ART: [(&str, Rgb); 5] = [
    ("   ______________________   ", Rgb(205, 133, 63)),
    ("  /                      \\  ", Rgb(205, 133, 63)),
    (" (~~~~~~~~~~~~~~~~~~~~~~~~) ", Rgb(255, 200, 0)),
    ("(==========================)", Rgb(180, 40, 30)),
    ("  \\______________________/  ", Rgb(205, 133, 63)),
];

// ── Renderer ──

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
    term_w: usize,
    term_h: usize,
    vp: Viewport,
    last_phase: Option<Phase>,
    /// The terminal reports key releases.
    pub key_release: bool,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            term_w: 0,
            term_h: 0,
            vp: Viewport::default(),
            last_phase: None,
            key_release: false,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide,
            SetBackgroundColor(Cell::BASE_BG),
            Clear(ClearType::All)
        )?;

        if terminal::supports_keyboard_enhancement().unwrap_or(false) {
            execute!(
                self.writer,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
            self.key_release = true;
        }
        log::debug!("key release events: {}", self.key_release);

        self.sync_size()?;
        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        if self.key_release {
            execute!(self.writer, PopKeyboardEnhancementFlags)?;
            self.key_release = false;
        }
        execute!(
            self.writer,
            ResetColor,
            DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    /// Clear the screen and forget what it shows.
    fn repaint_all(&mut self) -> io::Result<()> {
        self.back.invalidate();
        queue!(self.writer, SetBackgroundColor(Cell::BASE_BG), Clear(ClearType::All))
    }

    /// Follow the terminal size; a change repaints everything.
    fn sync_size(&mut self) -> io::Result<()> {
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        let size = (tw as usize, th as usize);
        if size != (self.term_w, self.term_h) || self.back.cells.is_empty() {
            (self.term_w, self.term_h) = size;
            self.front.resize(self.term_w, self.term_h);
            self.back.resize(self.term_w, self.term_h);
            self.repaint_all()?;
        }
        self.vp = fit_viewport(tw, th);
        Ok(())
    }

    pub fn render(&mut self, world: &mut WorldState) -> io::Result<()> {
        self.sync_size()?;
        world.viewport = self.vp;

        if self.last_phase != Some(world.phase) {
            self.repaint_all()?;
            self.last_phase = Some(world.phase);
        }

        self.front.clear();
        self.compose_hud(world);

        match world.phase {
            Phase::CharacterSelect => self.compose_select(world.select_cursor),
            Phase::Map => self.compose_map(world),
            Phase::Intro(level) => self.compose_intro(level),
            Phase::Playing(_) => self.compose_level(world),
            Phase::Banner => {
                self.compose_level(world);
                if let Some(banner) = &world.banner {
                    self.compose_banner(banner);
                }
            }
            Phase::HotDog => self.compose_hot_dog(world),
        }

        self.compose_footer(world);

        if world.paused {
            self.compose_pause_overlay();
        }

        self.flush_diff()?;
        std::mem::swap(&mut self.front, &mut self.back);
        Ok(())
    }

    /// Queue the cells that differ from `back`, then flush once.
    fn flush_diff(&mut self) -> io::Result<()> {
        // Colours are always explicit; ResetColor would expose the
        // terminal's own default background.
        let mut pen = (Color::White, Cell::BASE_BG);
        queue!(self.writer, SetForegroundColor(pen.0), SetBackgroundColor(pen.1))?;

        let width = self.front.width.max(1);
        // Where the cursor sits after the last Print, if known.
        let mut cursor: Option<usize> = None;

        for (i, (cell, old)) in self.front.cells.iter().zip(&self.back.cells).enumerate() {
            if cell == old {
                continue;
            }
            if cursor != Some(i) || i % width == 0 {
                queue!(self.writer, MoveTo((i % width) as u16, (i / width) as u16))?;
            }
            if cell.fg != pen.0 {
                queue!(self.writer, SetForegroundColor(cell.fg))?;
            }
            if cell.bg != pen.1 {
                queue!(self.writer, SetBackgroundColor(cell.bg))?;
            }
            pen = (cell.fg, cell.bg);
            queue!(self.writer, Print(cell.ch))?;
            cursor = Some(i + 1);
        }

        self.writer.flush()
    }

    // ── Playfield drawing helpers (logical coordinates) ──

    /// Inclusive cell box covered by a logical rectangle.
    /// `None` when the rectangle lies entirely off the playfield.
    fn cell_box(&self, r: &Rect) -> Option<(usize, usize, usize, usize)> {
        if r.w <= 0 || r.h <= 0 || !r.collides(&Rect::screen()) {
            return None;
        }
        let vp = self.vp;
        let (c0, r0) = vp.to_cell(r.left(), r.top());
        let (c1, r1) = vp.to_cell(r.right() - 1, r.bottom() - 1);
        let (ox, oy) = (vp.col as usize, vp.row as usize);
        Some((ox + c0 as usize, oy + r0 as usize, ox + c1 as usize, oy + r1 as usize))
    }

    fn fill_rect(&mut self, r: &Rect, ch: char, fg: Color, bg: Color) {
        if let Some((x0, y0, x1, y1)) = self.cell_box(r) {
            self.front.fill(x0, y0, x1, y1, Cell::new(ch, fg, bg));
        }
    }

    fn sprite(&mut self, r: &Rect, color: Rgb) {
        self.fill_rect(r, ' ', Color::Black, rgb(color));
    }

    /// A sprite with a glyph in its centre cell.
    fn marked_sprite(&mut self, r: &Rect, color: Rgb, mark: char, mark_fg: Rgb) {
        self.sprite(r, color);
        if self.cell_box(r).is_some() {
            let (cx, cy) = r.center();
            let (col, row) = self.cell_at(cx, cy);
            self.front.set(col, row, Cell::new(mark, rgb(mark_fg), rgb(color)));
        }
    }

    fn cell_at(&self, x: i32, y: i32) -> (usize, usize) {
        let (c, r) = self.vp.to_cell(x, y);
        (self.vp.col as usize + c as usize, self.vp.row as usize + r as usize)
    }

    fn fill_playfield(&mut self, color: Rgb) {
        self.sprite(&Rect::screen(), color);
    }

    /// Text centred on logical `cx`, on the row holding logical `y`.
    fn text_centered(&mut self, cx: i32, y: i32, text: &str, fg: Rgb) {
        let (col, row) = self.cell_at(cx, y);
        let half = text.chars().count() / 2;
        let start = col.saturating_sub(half).max(self.vp.col as usize);
        self.front.overlay_str(start, row, text, rgb(fg));
    }

    fn player(&mut self, p: &Player) {
        let initial = p.character.name().chars().next().unwrap_or('?');
        self.marked_sprite(&p.rect, p.character.color(), initial, geom::BLACK);
    }

    // ── Rows outside the playfield ──

    fn compose_hud(&mut self, w: &WorldState) {
        let hud = match w.phase {
            Phase::CharacterSelect => " Liquid Rigidity".to_string(),
            Phase::Map => match &w.player {
                Some(p) => format!(
                    " Liquid Rigidity  │  {}  ({})",
                    p.character.name(),
                    p.character.weapon(),
                ),
                None => " Liquid Rigidity".to_string(),
            },
            Phase::Intro(level) => format!(" Level {}: {}", level.number(), level.title()),
            Phase::Playing(_) | Phase::Banner | Phase::HotDog => match &w.scene {
                Some(scene) => {
                    let level = scene.level();
                    let mut hud = format!(" Level {}: {}", level.number(), level.title());
                    for status in scene.hud() {
                        hud.push_str("  │  ");
                        hud.push_str(&status);
                    }
                    hud
                }
                None => String::new(),
            },
        };
        let row = HUD_ROW as usize;
        for x in 0..self.front.width {
            self.front.set(x, row, Cell::new(' ', Color::White, HUD_BG));
        }
        self.front.put_str(0, row, &hud, Color::White, HUD_BG);
    }

    fn compose_footer(&mut self, w: &WorldState) {
        let msg_row = (self.vp.row + self.vp.rows) as usize;
        let help_row = msg_row + 1;

        if msg_row < self.front.height && !w.message.is_empty() {
            let msg = format!(" ◈ {} ", w.message);
            for x in 0..self.front.width {
                self.front.set(x, msg_row, Cell::new(' ', Color::Black, MSG_BG));
            }
            self.front.put_str(0, msg_row, &msg, Color::Black, MSG_BG);
        }

        if help_row < self.front.height {
            let help = match w.phase {
                Phase::CharacterSelect => " 1-5 or Up/Down + Enter: Choose character  │  Esc: Quit",
                Phase::Map => " Arrows/WASD: Move  │  Walk into a door  │  F1: Pause  Esc: Quit",
                Phase::Intro(_) => " Click the button or press Enter  │  Esc: Back to map",
                Phase::Playing(_) => " Arrows/WASD: Move  Click: Fire  │  F1: Pause  Esc: Back to map",
                Phase::Banner | Phase::HotDog => "",
            };
            self.front.put_str(0, help_row, help, Color::DarkGrey, Color::Reset);
        }
    }

    // ── Screens ──

    fn compose_select(&mut self, cursor: usize) {
        self.fill_playfield(geom::WHITE);
        let cx = SCREEN_W / 2;
        self.text_centered(cx, 100, "Welcome to Liquid Rigidity!", geom::BLACK);
        self.text_centered(cx, 150, "Choose your character:", geom::BLACK);
        for (i, character) in Character::ALL.iter().enumerate() {
            let marker = if i == cursor { '>' } else { ' ' };
            let line = format!("{marker} {}. {}", i + 1, character.name());
            self.text_centered(cx, 200 + 50 * i as i32, &line, geom::BLACK);
        }
    }

    fn compose_map(&mut self, w: &WorldState) {
        self.fill_playfield(geom::GRAY);
        self.text_centered(SCREEN_W / 2, 50, "Map World - Explore and enter levels!", geom::BLACK);

        for (i, door) in door_rects().iter().enumerate() {
            self.marked_sprite(door, geom::BLACK, char::from_digit(i as u32 + 1, 10).unwrap_or('?'), geom::WHITE);
            let (cx, _) = door.center();
            let label = match LevelId::from_door(i) {
                Some(level) => format!("W{} L{}", w.record.wins(level), w.record.losses(level)),
                None => "locked".to_string(),
            };
            self.text_centered(cx, door.bottom() + 15, &label, geom::BLACK);
        }

        if let Some(p) = &w.player {
            self.player(p);
        }
    }

    fn compose_intro(&mut self, level: LevelId) {
        self.fill_playfield(geom::WHITE);
        let intro = story::intro(level);
        let cx = SCREEN_W / 2;
        for (i, line) in intro.lines.iter().enumerate() {
            self.text_centered(cx, intro.first_line_y + LINE_SPACING * i as i32, line, geom::BLACK);
        }
        if let Some(prompt) = intro.prompt {
            self.text_centered(cx, intro.button.top() - 50, prompt, geom::BLACK);
        }
        self.sprite(&intro.button, geom::GRAY);
        let (bx, by) = intro.button.center();
        self.text_centered(bx, by, intro.button_label, geom::BLACK);
    }

    fn compose_level(&mut self, w: &WorldState) {
        let Some(scene) = &w.scene else { return };
        match scene {
            Scene::Gallery(s) => {
                self.fill_playfield(geom::WHITE);
                for e in &s.enemies {
                    self.marked_sprite(&e.rect, geom::RED, 'X', geom::BLACK);
                }
                for b in &s.bullets {
                    self.sprite(&b.rect(), geom::RED);
                }
            }
            Scene::Harvest(s) => {
                self.fill_playfield(geom::WHITE);
                for b in &s.brains {
                    self.sprite(&b.rect, geom::GREEN);
                }
                for o in &s.obstacles {
                    self.marked_sprite(&o.rect, geom::RED, 'X', geom::BLACK);
                }
            }
            Scene::Rescue(s) => {
                self.fill_playfield(geom::WHITE);
                for wall in &s.walls {
                    self.sprite(wall, geom::BLACK);
                }
                self.fill_rect(&s.safe_zone, '░', rgb(Rgb(0, 150, 0)), rgb(geom::GREEN));
                for a in &s.animals {
                    self.marked_sprite(&a.rect, geom::GREEN, '@', geom::BLACK);
                }
                for h in &s.humans {
                    self.marked_sprite(&h.rect, geom::RED, 'H', geom::BLACK);
                }
            }
            Scene::Maze(s) => {
                self.fill_playfield(geom::WHITE);
                for wall in &s.walls {
                    self.sprite(wall, geom::BLACK);
                }
                self.sprite(&s.store, geom::GREEN);
                let (sx, sy) = s.store.center();
                self.text_centered(sx, sy, "7-11", geom::BLACK);
                for t in &s.thugs {
                    self.marked_sprite(&t.rect, geom::RED, '!', geom::BLACK);
                }
            }
            Scene::Blaze(s) => {
                self.fill_playfield(geom::WHITE);
                let flame = Rgb(255, s.flame.shade, 0);
                self.fill_rect(&s.flame.rect(), '^', rgb(geom::RED), rgb(flame));
                for drop in &s.water {
                    self.sprite(&drop.rect(), geom::WATER_BLUE);
                }
            }
            Scene::Datafall(s) => {
                self.fill_playfield(geom::NIGHT);
                self.compose_grid();
                for f in s.data.iter().chain(&s.glitches) {
                    match f.kind {
                        FallingKind::Data => {
                            self.fill_rect(&f.rect, '●', rgb(geom::DATA_CYAN), rgb(geom::NIGHT))
                        }
                        FallingKind::Glitch => self.sprite(&f.rect, geom::RED),
                    }
                }
            }
        }
        if let Some(p) = &w.player {
            self.player(p);
        }
    }

    /// Level 6 backdrop: a line every tile in both directions.
    fn compose_grid(&mut self) {
        let line = rgb(geom::GRID_LINE);
        let bg = rgb(geom::NIGHT);
        let (top, bottom) = (self.vp.row as usize, (self.vp.row + self.vp.rows) as usize);
        let (left, right) = (self.vp.col as usize, (self.vp.col + self.vp.cols) as usize);
        for x in (0..SCREEN_W).step_by(TILE as usize) {
            let (col, _) = self.cell_at(x, 0);
            for row in top..bottom {
                self.front.set(col, row, Cell::new('│', line, bg));
            }
        }
        for y in (0..SCREEN_H).step_by(TILE as usize) {
            let (_, row) = self.cell_at(0, y);
            for col in left..right {
                let ch = if self.front.get(col, row).ch == '│' { '┼' } else { '─' };
                self.front.set(col, row, Cell::new(ch, line, bg));
            }
        }
    }

    fn compose_banner(&mut self, banner: &Banner) {
        let fg = match banner.tone {
            Tone::Plain => geom::BLACK,
            Tone::Alert => geom::RED,
        };
        let y = banner_y(banner.anchor);
        for (i, line) in banner.text.lines().enumerate() {
            self.text_centered(SCREEN_W / 2, y + 30 * i as i32, line, fg);
        }
    }

    fn compose_hot_dog(&mut self, w: &WorldState) {
        self.fill_playfield(geom::WHITE);
        let top = SCREEN_H / 2 - 100;
        for (i, (line, color)) in HOT_DOG_ART.iter().enumerate() {
            self.text_centered(SCREEN_W / 2, top + 40 * i as i32, line, *color);
        }
        if let Some(banner) = &w.banner {
            self.compose_banner(banner);
        }
    }

    fn compose_pause_overlay(&mut self) {
        let dim = Color::Rgb { r: 40, g: 40, b: 40 };
        let hdr = Color::Rgb { r: 255, g: 220, b: 50 };
        let key_c = Color::Rgb { r: 100, g: 200, b: 255 };

        let box_w = 30_usize.min(self.front.width);
        let box_h = 7_usize.min(self.front.height);
        let box_x = self.front.width.saturating_sub(box_w) / 2;
        let box_y = self.front.height.saturating_sub(box_h) / 2;
        if box_w == 0 || box_h == 0 { return; }

        self.front.fill(box_x, box_y, box_x + box_w - 1, box_y + box_h - 1, Cell::new(' ', Color::Reset, dim));

        self.front.put_str(box_x + 2, box_y + 1, "╔══════════════════╗", hdr, dim);
        self.front.put_str(box_x + 2, box_y + 2, "║      PAUSED      ║", hdr, dim);
        self.front.put_str(box_x + 2, box_y + 3, "╚══════════════════╝", hdr, dim);
        self.front.put_str(box_x + 2, box_y + 5, "F1 Resume   Esc Leave", key_c, dim);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_keeps_aspect_and_centres() {
        let vp = fit_viewport(80, 24);
        assert_eq!(vp, Viewport { col: 12, row: 1, cols: 56, rows: 21 });

        // Narrow terminals are limited by width instead.
        let vp = fit_viewport(40, 50);
        assert_eq!((vp.cols, vp.rows), (40, 15));
        assert_eq!(vp.col, 0);
    }

    #[test]
    fn tiny_terminal_still_gets_a_cell() {
        let vp = fit_viewport(0, 0);
        assert_eq!((vp.cols, vp.rows), (1, 1));
        assert_eq!(vp.col, 0);
    }

    #[test]
    fn banner_anchors() {
        assert_eq!(banner_y(Anchor::Top), 30);
        assert_eq!(banner_y(Anchor::Center), 300);
        assert_eq!(banner_y(Anchor::Bottom), 550);
    }

    #[test]
    fn overlay_keeps_background() {
        let mut fb = FrameBuffer::new(4, 1);
        fb.fill(0, 0, 3, 0, Cell::new(' ', Color::Black, Color::Green));
        fb.overlay_str(1, 0, "ab", Color::Red);
        assert_eq!(fb.get(1, 0), Cell::new('a', Color::Red, Color::Green));
        assert_eq!(fb.get(0, 0).ch, ' ');
    }

    #[test]
    fn writes_outside_the_grid_are_dropped() {
        let mut fb = FrameBuffer::new(3, 2);
        fb.put_str(1, 1, "xyz", Color::White, Color::Reset);
        assert_eq!(fb.get(2, 1), Cell::new('y', Color::White, Cell::BASE_BG));
        assert_eq!(fb.get(3, 1), Cell::BLANK);
        fb.set(0, 5, Cell::INVALID);
        assert!(fb.cells.iter().all(|c| *c != Cell::INVALID));
    }
}
