/// Rendering layer. All terminal output lives here.
///
/// `TerminalSurface` receives the simulation's draw calls in world units,
/// scales them onto the terminal grid into a cell buffer, and `present`
/// writes the buffer out with queued crossterm commands.  No game logic is
/// performed here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Attribute, Color, Print},
    QueueableCommand,
};
use night_runner::entities::Rect;
use night_runner::player::PlayerState;
use night_runner::surface::{Align, Sprite, Surface, TextStyle, Tint};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_PLAYER: Color = Color::White;
const C_PLAYER_HIT: Color = Color::Red;
const C_ENEMY_FLYING: Color = Color::Magenta;
const C_ENEMY_GROUND: Color = Color::Green;
const C_ENEMY_CLIMBING: Color = Color::DarkRed;
const C_WEB: Color = Color::DarkGrey;
const C_DUST: Color = Color::DarkYellow;
const C_SPLASH: Color = Color::Cyan;
const C_FIRE: Color = Color::Red;
const C_IMPACT: Color = Color::Yellow;
const C_LIFE: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;
const C_NOTICE: Color = Color::Yellow;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Cell {
    ch: char,
    fg: Color,
    bold: bool,
}

/// Terminal-backed render surface.  The bottom row is kept for host hints.
pub struct TerminalSurface {
    cols: u16,
    rows: u16,
    world_width: f32,
    world_height: f32,
    cells: Vec<Option<Cell>>,
}

impl TerminalSurface {
    pub fn new(cols: u16, rows: u16, world_width: f32, world_height: f32) -> Self {
        let mut surface = TerminalSurface {
            cols: 0,
            rows: 0,
            world_width,
            world_height,
            cells: Vec::new(),
        };
        surface.resize(cols, rows);
        surface
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols.max(1);
        self.rows = rows.max(2);
        self.cells = vec![None; self.cols as usize * self.canvas_rows() as usize];
    }

    fn canvas_rows(&self) -> u16 {
        self.rows - 1
    }

    /// World units per column / per row.
    fn scale(&self) -> (f32, f32) {
        (
            self.world_width / self.cols as f32,
            self.world_height / self.canvas_rows() as f32,
        )
    }

    fn to_cell(&self, x: f32, y: f32) -> (i32, i32) {
        let (sx, sy) = self.scale();
        ((x / sx).floor() as i32, (y / sy).floor() as i32)
    }

    fn put(&mut self, col: i32, row: i32, ch: char, fg: Color, bold: bool) {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.canvas_rows() as i32 {
            return;
        }
        let idx = row as usize * self.cols as usize + col as usize;
        self.cells[idx] = Some(Cell { ch, fg, bold });
    }

    /// Cell span covered by `rect`, at least one cell in each direction.
    fn span(&self, rect: Rect) -> (i32, i32, i32, i32) {
        let (c0, r0) = self.to_cell(rect.x, rect.y);
        let (c1, r1) = self.to_cell(rect.right(), rect.bottom());
        (c0, r0, c1.max(c0 + 1), r1.max(r0 + 1))
    }

    fn fill(&mut self, rect: Rect, ch: char, fg: Color) {
        let (c0, r0, c1, r1) = self.span(rect);
        for row in r0..r1 {
            for col in c0..c1 {
                self.put(col, row, ch, fg, false);
            }
        }
    }

    fn draw_layer(&mut self, layer: u8, dest: Rect) {
        // (band top, band bottom) as fractions of the canvas, glyph period in world units.
        let (top, bottom, period, fg) = match layer {
            1 => (0.40, 0.50, 180.0, Color::DarkGrey),
            2 => (0.55, 0.70, 120.0, Color::DarkGreen),
            3 => (0.78, 0.86, 60.0, Color::Green),
            4 => (0.92, 1.00, 30.0, Color::DarkYellow),
            _ => return,
        };
        let (sx, _) = self.scale();
        let (_, r0) = self.to_cell(0.0, self.world_height * top);
        let (_, r1) = self.to_cell(0.0, self.world_height * bottom);
        for col in 0..self.cols as i32 {
            let wx = col as f32 * sx;
            if wx < dest.x || wx >= dest.right() {
                continue;
            }
            let rel = wx - dest.x;
            let slot = (rel / period) as i32;
            let ch = match layer {
                1 if rel % period < sx => '^',
                2 if rel % period < sx * 2.0 => '♣',
                3 if slot % 3 == 0 => '"',
                4 if slot % 2 == 0 => '=',
                4 => '-',
                _ => continue,
            };
            for row in r0..r1.max(r0 + 1) {
                self.put(col, row, ch, fg, false);
            }
        }
    }

    /// Write the buffer, then the hint row and an optional one-shot notice.
    pub fn present<W: Write>(
        &self,
        out: &mut W,
        hint: &str,
        notice: Option<&str>,
    ) -> std::io::Result<()> {
        for row in 0..self.canvas_rows() {
            out.queue(cursor::MoveTo(0, row))?;
            let start = row as usize * self.cols as usize;
            let mut current: Option<(Color, bool)> = None;
            for cell in &self.cells[start..start + self.cols as usize] {
                let (ch, fg, bold) = match cell {
                    Some(c) => (c.ch, c.fg, c.bold),
                    None => (' ', Color::Reset, false),
                };
                if current != Some((fg, bold)) {
                    out.queue(style::SetAttribute(if bold {
                        Attribute::Bold
                    } else {
                        Attribute::NormalIntensity
                    }))?;
                    out.queue(style::SetForegroundColor(fg))?;
                    current = Some((fg, bold));
                }
                out.queue(Print(ch))?;
            }
        }

        draw_hint(out, self.cols, self.rows, hint)?;
        if let Some(notice) = notice {
            draw_notice(out, self.cols, self.rows, notice)?;
        }

        out.queue(style::ResetColor)?;
        out.queue(style::SetAttribute(Attribute::Reset))?;
        out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        out.flush()?;
        Ok(())
    }
}

fn tint_color(tint: Tint) -> Color {
    match tint {
        Tint::Ink => Color::White,
        Tint::Shadow => Color::DarkGrey,
        Tint::Grey => Color::Grey,
        Tint::Red => Color::Red,
        Tint::Yellow => Color::Yellow,
        Tint::Green => Color::Green,
    }
}

/// Glyph and colour for a sprite; animation frames alternate the glyph.
fn glyph(sprite: Sprite, frame: u32) -> Option<(char, Color)> {
    let even = frame % 2 == 0;
    let g = match sprite {
        Sprite::Player(state) => match state {
            PlayerState::Sitting => ('▄', C_PLAYER),
            PlayerState::Running => (if even { '▓' } else { '▒' }, C_PLAYER),
            PlayerState::Jumping => ('▲', C_PLAYER),
            PlayerState::Falling => ('▼', C_PLAYER),
            PlayerState::Rolling => (if even { '@' } else { 'o' }, C_FIRE),
            PlayerState::Diving => ('↓', C_FIRE),
            PlayerState::Hit => ('✖', C_PLAYER_HIT),
        },
        Sprite::FlyingEnemy => (if even { '≈' } else { '~' }, C_ENEMY_FLYING),
        Sprite::GroundEnemy => ('█', C_ENEMY_GROUND),
        Sprite::ClimbingEnemy => (if even { '¥' } else { 'Ж' }, C_ENEMY_CLIMBING),
        Sprite::Dust => ('·', C_DUST),
        Sprite::Splash => ('∙', C_SPLASH),
        Sprite::Fire => ('*', C_FIRE),
        Sprite::Impact => (if even { '✸' } else { '*' }, C_IMPACT),
        Sprite::Life => ('♥', C_LIFE),
        Sprite::Layer(_) => return None,
    };
    Some(g)
}

impl Surface for TerminalSurface {
    fn clear(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = None);
    }

    fn sprite(&mut self, sprite: Sprite, frame: u32, dest: Rect) {
        match sprite {
            Sprite::Layer(layer) => self.draw_layer(layer, dest),
            // Particles are tiny next to a cell; one glyph at their centre.
            Sprite::Dust | Sprite::Splash | Sprite::Fire | Sprite::Life => {
                if let Some((ch, fg)) = glyph(sprite, frame) {
                    let (cx, cy) = dest.center();
                    let (col, row) = self.to_cell(cx, cy);
                    self.put(col, row, ch, fg, false);
                }
            }
            _ => {
                if let Some((ch, fg)) = glyph(sprite, frame) {
                    self.fill(dest, ch, fg);
                }
            }
        }
    }

    fn fill_rect(&mut self, rect: Rect, tint: Tint) {
        self.fill(rect, '█', tint_color(tint));
    }

    fn stroke_rect(&mut self, rect: Rect, tint: Tint) {
        let fg = tint_color(tint);
        let (c0, r0, c1, r1) = self.span(rect);
        for col in c0..c1 {
            self.put(col, r0 - 1, '─', fg, false);
            self.put(col, r1, '─', fg, false);
        }
        for row in r0..r1 {
            self.put(c0 - 1, row, '│', fg, false);
            self.put(c1, row, '│', fg, false);
        }
    }

    fn line(&mut self, from: (f32, f32), to: (f32, f32), _tint: Tint) {
        let (c0, r0) = self.to_cell(from.0, from.1);
        let (c1, r1) = self.to_cell(to.0, to.1);
        let steps = (c1 - c0).abs().max((r1 - r0).abs()).max(1);
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let col = c0 + ((c1 - c0) as f32 * t).round() as i32;
            let row = r0 + ((r1 - r0) as f32 * t).round() as i32;
            self.put(col, row, '│', C_WEB, false);
        }
    }

    fn text(&mut self, x: f32, y: f32, text: &str, style: TextStyle) {
        let (mut col, row) = self.to_cell(x, y);
        if style.align == Align::Center {
            col -= text.chars().count() as i32 / 2;
        }
        let fg = tint_color(style.tint);
        for (i, ch) in text.chars().enumerate() {
            self.put(col + i as i32, row, ch, fg, style.large);
        }
    }
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_hint<W: Write>(out: &mut W, cols: u16, rows: u16, hint: &str) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.queue(style::SetAttribute(Attribute::NormalIntensity))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    let text: String = hint.chars().take(cols as usize).collect();
    out.queue(Print(format!("{:<width$}", text, width = cols as usize)))?;
    Ok(())
}

// ── One-shot notice (centre of the screen) ────────────────────────────────────

fn draw_notice<W: Write>(out: &mut W, cols: u16, rows: u16, notice: &str) -> std::io::Result<()> {
    let width = notice.chars().count() as u16 + 4;
    let col = (cols / 2).saturating_sub(width / 2);
    let row = (rows / 2).saturating_sub(1);
    out.queue(style::SetForegroundColor(C_NOTICE))?;
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(Print(format!("╔{}╗", "═".repeat(width as usize - 2))))?;
    out.queue(cursor::MoveTo(col, row + 1))?;
    out.queue(Print(format!("║ {} ║", notice)))?;
    out.queue(cursor::MoveTo(col, row + 2))?;
    out.queue(Print(format!("╚{}╝", "═".repeat(width as usize - 2))))?;
    Ok(())
}
