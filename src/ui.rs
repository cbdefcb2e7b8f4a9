/// Heads-up display: score, remaining time, lives and the game-over banner.

use crate::entities::Rect;
use crate::surface::{Sprite, Surface, TextStyle, Tint};
use crate::world::World;

const LIFE_SIZE: f32 = 25.0;

pub fn draw(world: &World, surface: &mut dyn Surface) {
    surface.text(20.0, 50.0, &format!("Score: {}", world.score), TextStyle::plain(Tint::Ink));

    let remaining = (world.config.world.max_time - world.time).max(0.0) * 0.001;
    surface.text(20.0, 80.0, &format!("Time: {remaining:.1}"), TextStyle::plain(Tint::Ink));

    for i in 0..world.lives {
        let dest = Rect::new(25.0 * i as f32 + 20.0, 95.0, LIFE_SIZE, LIFE_SIZE);
        surface.sprite(Sprite::Life, 0, dest);
    }

    if world.debug {
        surface.text(
            20.0,
            140.0,
            &format!("{} speed {:.1}", world.player.state.label(), world.speed),
            TextStyle::plain(Tint::Grey),
        );
    }

    if world.game_over {
        let cx = world.config.world.width * 0.5;
        let cy = world.config.world.height * 0.5;
        let (headline, detail, tint) = if world.has_won() {
            ("Boo-yah", "What are creatures of the night afraid of? YOU!!!", Tint::Yellow)
        } else {
            ("Love at first bite?", "Nope. Better luck next time!", Tint::Red)
        };
        surface.text(cx, cy - 20.0, headline, TextStyle::headline(tint));
        surface.text(cx, cy + 20.0, detail, TextStyle::centered(Tint::Ink));
    }
}
