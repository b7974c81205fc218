use std::io;
use std::thread;
use std::time::{Duration, Instant};

use crate::game::{GameSession, Snapshot, TickReport};
use crate::input::InputSource;

/// Sink for one complete frame per tick.
pub trait Renderer {
    fn render(&mut self, snapshot: &Snapshot<'_>) -> io::Result<()>;
}

/// Events the audio collaborator may react to.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum AudioEvent {
    FruitEaten,
}

/// Event-driven sound output. Implementations decide how, or whether, to play.
pub trait AudioNotifier {
    fn notify(&mut self, event: AudioEvent);
}

/// Runs one tick end to end: the session samples input and steps, the new
/// snapshot is rendered, then audio is notified.
#[derive(Debug)]
pub struct Driver<R, A> {
    renderer: R,
    audio: A,
}

impl<R: Renderer, A: AudioNotifier> Driver<R, A> {
    #[must_use]
    pub fn new(renderer: R, audio: A) -> Self {
        Self { renderer, audio }
    }

    /// Ticks `session` once and hands the result to the collaborators.
    pub fn tick<I: InputSource + ?Sized>(
        &mut self,
        session: &mut GameSession,
        input: &mut I,
    ) -> io::Result<TickReport> {
        let report = session.tick(input);
        self.renderer.render(&session.snapshot())?;

        if report.fruit_eaten() && session.config().sound_enabled {
            self.audio.notify(AudioEvent::FruitEaten);
        }

        Ok(report)
    }

    /// Draws the current state without advancing it.
    pub fn redraw(&mut self, session: &GameSession) -> io::Result<()> {
        self.renderer.render(&session.snapshot())
    }

    pub fn into_parts(self) -> (R, A) {
        (self.renderer, self.audio)
    }
}

/// Fixed-period tick source. Deadlines advance by whole periods so slow
/// frames do not accumulate drift.
#[derive(Debug, Clone, Copy)]
pub struct Ticker {
    period: Duration,
    next: Instant,
}

impl Ticker {
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next: Instant::now() + period,
        }
    }

    /// Sleeps until the next tick is due.
    pub fn wait(&mut self) {
        let now = Instant::now();
        if self.next > now {
            thread::sleep(self.next - now);
            self.next += self.period;
        } else {
            // Fell behind; restart the schedule instead of bursting ticks.
            self.next = now + self.period;
        }
    }

    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }
}
