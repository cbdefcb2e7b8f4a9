/// Parallax background: five layers scrolling at fractions of world speed.

use crate::entities::{Rect, Tick};
use crate::surface::{Sprite, Surface};

const SPEED_MODIFIERS: [f32; 5] = [0.0, 0.2, 0.4, 0.8, 1.0];

#[derive(Clone, Debug)]
pub struct Layer {
    pub x: f32,
    pub speed_modifier: f32,
}

#[derive(Clone, Debug)]
pub struct Background {
    pub layers: Vec<Layer>,
    width: f32,
    height: f32,
}

impl Background {
    pub fn new(width: f32, height: f32) -> Self {
        Background {
            layers: SPEED_MODIFIERS
                .iter()
                .map(|&speed_modifier| Layer { x: 0.0, speed_modifier })
                .collect(),
            width,
            height,
        }
    }

    pub fn update(&mut self, tick: &Tick) {
        let k = tick.frames();
        for layer in &mut self.layers {
            layer.x -= tick.speed * layer.speed_modifier * k;
            if layer.x < -self.width {
                layer.x += self.width;
            }
        }
    }

    /// Each layer is drawn twice side by side so the seam never shows.
    pub fn draw(&self, surface: &mut dyn Surface) {
        for (i, layer) in self.layers.iter().enumerate() {
            let sprite = Sprite::Layer(i as u8);
            surface.sprite(sprite, 0, Rect::new(layer.x, 0.0, self.width, self.height));
            surface.sprite(
                sprite,
                0,
                Rect::new(layer.x + self.width, 0.0, self.width, self.height),
            );
        }
    }
}
