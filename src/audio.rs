//! Audio collaborator - sounds linked to frame animations

/// Starts and stops sounds by id.
pub trait SoundPlayer {
    fn play(&mut self, sound: &str);
    fn stop(&mut self, sound: &str);
}

/// Sound player that only logs, for headless runs.
#[derive(Debug, Default)]
pub struct LogSoundPlayer;

impl SoundPlayer for LogSoundPlayer {
    fn play(&mut self, sound: &str) {
        log::debug!("[SOUND] play {}", sound);
    }

    fn stop(&mut self, sound: &str) {
        log::debug!("[SOUND] stop {}", sound);
    }
}
