/// Render surface boundary.
///
/// The simulation issues draw calls back to front; how they become pixels
/// or terminal cells is the surface's business.  Clearing happens once per
/// frame in the driver, never inside a draw pass.

use crate::entities::Rect;
use crate::player::PlayerState;

/// Images the simulation can ask for.  Frames index into the animation strip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sprite {
    Player(PlayerState),
    FlyingEnemy,
    GroundEnemy,
    ClimbingEnemy,
    Dust,
    Splash,
    Fire,
    Impact,
    Life,
    /// Parallax background layer, 0 = farthest.
    Layer(u8),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tint {
    /// Default foreground for text and outlines.
    Ink,
    /// Drop shadow behind highlighted text.
    Shadow,
    Grey,
    Red,
    Yellow,
    Green,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextStyle {
    pub tint: Tint,
    pub align: Align,
    /// Headline text is drawn larger where the surface can.
    pub large: bool,
}

impl TextStyle {
    pub fn plain(tint: Tint) -> Self {
        TextStyle {
            tint,
            align: Align::Left,
            large: false,
        }
    }

    pub fn headline(tint: Tint) -> Self {
        TextStyle {
            tint,
            align: Align::Center,
            large: true,
        }
    }

    pub fn centered(tint: Tint) -> Self {
        TextStyle {
            tint,
            align: Align::Center,
            large: false,
        }
    }
}

pub trait Surface {
    fn clear(&mut self);

    fn sprite(&mut self, sprite: Sprite, frame: u32, dest: Rect);

    fn fill_rect(&mut self, rect: Rect, tint: Tint);

    /// Outline only; used for debug hitboxes.
    fn stroke_rect(&mut self, rect: Rect, tint: Tint);

    fn line(&mut self, from: (f32, f32), to: (f32, f32), tint: Tint);

    fn text(&mut self, x: f32, y: f32, text: &str, style: TextStyle);
}
