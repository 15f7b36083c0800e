//! Optional sound effects
//!
//! Sound is a capability the game may or may not have. Nothing in the game
//! logic looks at whether a sound played; failures are logged and dropped.

use crossterm::{QueueableCommand, style::Print};
use log::{debug, info, warn};
use std::io::{self, IsTerminal, Stderr, Write};

/// Somewhere to send sound effects
pub trait SoundSink {
    /// Healthy food was eaten
    fn play_eat(&mut self);
}

/// Discards every sound
#[derive(Debug, Default)]
pub struct Silent;

impl SoundSink for Silent {
    fn play_eat(&mut self) {}
}

/// Rings the terminal bell
pub struct TerminalBell<W: Write> {
    out: W,
    failed: bool,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out, failed: false }
    }

    fn ring(&mut self) -> io::Result<()> {
        self.out.queue(Print('\x07'))?;
        self.out.flush()
    }
}

impl<W: Write> SoundSink for TerminalBell<W> {
    fn play_eat(&mut self) {
        if let Err(err) = self.ring() {
            // warn once, then keep quiet for the rest of the session
            if !self.failed {
                warn!("terminal bell failed, continuing without sound: {err}");
                self.failed = true;
            } else {
                debug!("terminal bell failed again: {err}");
            }
        }
    }
}

/// Pick a sound sink for the session
///
/// Falls back to [`Silent`] when sound is disabled or stderr is not a
/// terminal.
pub fn open_sound(enabled: bool) -> Box<dyn SoundSink> {
    if !enabled {
        info!("sound disabled");
        return Box::new(Silent);
    }

    let stderr: Stderr = io::stderr();
    if !stderr.is_terminal() {
        warn!("stderr is not a terminal, sound disabled");
        return Box::new(Silent);
    }

    Box::new(TerminalBell::new(stderr))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "no device"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "no device"))
        }
    }

    #[test]
    fn test_bell_writes_bel() {
        let mut bell = TerminalBell::new(Vec::new());
        bell.play_eat();
        bell.play_eat();
        assert_eq!(bell.out, b"\x07\x07");
    }

    #[test]
    fn test_broken_device_is_swallowed() {
        let mut bell = TerminalBell::new(Broken);
        bell.play_eat();
        bell.play_eat();
        assert!(bell.failed);
    }

    #[test]
    fn test_disabled_sound_is_silent() {
        let mut sink = open_sound(false);
        sink.play_eat();
    }
}
