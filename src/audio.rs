use log::info;

/// Background music sink. Playback itself lives outside the game core.
pub trait Soundtrack {
    fn play_looping(&mut self, track: &str);
}

/// Records the requested track in the log instead of playing it.
#[derive(Debug, Default)]
pub struct LoggedSoundtrack {
    now_playing: Option<String>,
}

impl LoggedSoundtrack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_playing(&self) -> Option<&str> {
        self.now_playing.as_deref()
    }
}

impl Soundtrack for LoggedSoundtrack {
    fn play_looping(&mut self, track: &str) {
        info!("Looping soundtrack {}", track);
        self.now_playing = Some(track.to_string());
    }
}
