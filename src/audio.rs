/// Fire-and-forget sound playback boundary.

use crate::entities::Sound;

pub trait Sfx {
    /// Start playing `sound`.  Never blocks and never reports failure.
    fn play(&mut self, sound: Sound);
}

/// Audio sink that drops everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct Silent;

impl Sfx for Silent {
    fn play(&mut self, _sound: Sound) {}
}

/// Remembers every trigger it received, in order.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    pub played: Vec<Sound>,
}

impl Sfx for Recorder {
    fn play(&mut self, sound: Sound) {
        self.played.push(sound);
    }
}
