use std::io::{self, Write};

use crate::driver::{AudioEvent, AudioNotifier};

/// Rings the terminal bell for each event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalBell;

impl AudioNotifier for TerminalBell {
    fn notify(&mut self, event: AudioEvent) {
        match event {
            AudioEvent::FruitEaten => {
                let mut stdout = io::stdout();
                if let Err(error) = stdout.write_all(b"\x07").and_then(|()| stdout.flush()) {
                    tracing::debug!(%error, "terminal bell failed");
                }
            }
        }
    }
}

/// Drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl AudioNotifier for Silent {
    fn notify(&mut self, _event: AudioEvent) {}
}

/// Either notifier, chosen at startup.
#[derive(Debug, Clone, Copy)]
pub enum Speaker {
    Bell(TerminalBell),
    Silent(Silent),
}

impl Speaker {
    #[must_use]
    pub fn new(sound_enabled: bool) -> Self {
        if sound_enabled {
            Self::Bell(TerminalBell)
        } else {
            Self::Silent(Silent)
        }
    }
}

impl AudioNotifier for Speaker {
    fn notify(&mut self, event: AudioEvent) {
        match self {
            Self::Bell(bell) => bell.notify(event),
            Self::Silent(silent) => silent.notify(event),
        }
    }
}
