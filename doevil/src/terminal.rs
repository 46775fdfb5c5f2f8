//! Unbuffered, non-echoing terminal input for the duration of a run.

use std::io::{self, IsTerminal};

use tracing::{debug, warn};

#[cfg(unix)]
use nix::sys::termios::{self, LocalFlags, SetArg, Termios};
#[cfg(unix)]
use std::os::fd::AsFd;

/// Turns off echo and line buffering on stdin and restores the saved
/// attributes on drop. Signal keys and output processing stay enabled, so
/// Ctrl-C still interrupts a run and `\n` still starts a new line.
pub struct TerminalGuard {
    #[cfg(unix)]
    saved: Option<Termios>,
}

impl TerminalGuard {
    /// Switch stdin to byte-at-a-time input if `enabled` and stdin is a
    /// terminal. Otherwise this is a no-op guard.
    pub fn enter(enabled: bool) -> io::Result<Self> {
        if !enabled || !io::stdin().is_terminal() {
            debug!(enabled, "leaving terminal mode alone");
            return Ok(Self::inactive());
        }
        Self::enter_terminal()
    }

    #[cfg(unix)]
    fn enter_terminal() -> io::Result<Self> {
        let saved = enter_cbreak(io::stdin())?;
        debug!("terminal echo and line buffering off");
        Ok(Self { saved: Some(saved) })
    }

    #[cfg(not(unix))]
    fn enter_terminal() -> io::Result<Self> {
        debug!("terminal modes not supported on this platform");
        Ok(Self::inactive())
    }

    fn inactive() -> Self {
        Self {
            #[cfg(unix)]
            saved: None,
        }
    }

    /// Whether terminal attributes were changed and will be restored.
    pub fn is_active(&self) -> bool {
        #[cfg(unix)]
        {
            self.saved.is_some()
        }
        #[cfg(not(unix))]
        {
            false
        }
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        #[cfg(unix)]
        if let Some(saved) = self.saved.take() {
            if let Err(e) = termios::tcsetattr(io::stdin(), SetArg::TCSANOW, &saved) {
                warn!("failed to restore terminal: {e}");
            }
        }
    }
}

/// Local flags for run input: `flags` without echo and canonical mode.
#[cfg(unix)]
fn cbreak_flags(flags: LocalFlags) -> LocalFlags {
    flags - (LocalFlags::ECHO | LocalFlags::ICANON)
}

/// Apply [`cbreak_flags`] to the terminal behind `fd`, returning the
/// attributes it had before.
#[cfg(unix)]
fn enter_cbreak<Fd: AsFd>(fd: Fd) -> nix::Result<Termios> {
    let saved = termios::tcgetattr(&fd)?;
    let mut cbreak = saved.clone();
    cbreak.local_flags = cbreak_flags(saved.local_flags);
    termios::tcsetattr(&fd, SetArg::TCSANOW, &cbreak)?;
    Ok(saved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_guard_never_touches_terminal() {
        let guard = TerminalGuard::enter(false).unwrap();
        assert!(!guard.is_active());
    }

    #[cfg(unix)]
    #[test]
    fn cbreak_keeps_signal_keys() {
        let flags = LocalFlags::ECHO | LocalFlags::ICANON | LocalFlags::ISIG | LocalFlags::IEXTEN;
        let cbreak = cbreak_flags(flags);
        assert!(!cbreak.contains(LocalFlags::ECHO));
        assert!(!cbreak.contains(LocalFlags::ICANON));
        assert!(cbreak.contains(LocalFlags::ISIG));
        assert!(cbreak.contains(LocalFlags::IEXTEN));
    }

    #[cfg(unix)]
    #[test]
    fn cbreak_on_pty_leaves_output_processing_alone() {
        use nix::pty::openpty;
        use nix::sys::termios::OutputFlags;

        // Containers without /dev/ptmx cannot open a pseudo-terminal.
        let Ok(pty) = openpty(None, None) else {
            return;
        };
        let before = termios::tcgetattr(&pty.slave).unwrap();
        let saved = enter_cbreak(&pty.slave).unwrap();
        let during = termios::tcgetattr(&pty.slave).unwrap();

        assert_eq!(saved.local_flags, before.local_flags);
        assert!(!during.local_flags.contains(LocalFlags::ECHO));
        assert!(!during.local_flags.contains(LocalFlags::ICANON));
        assert_eq!(
            during.local_flags.contains(LocalFlags::ISIG),
            before.local_flags.contains(LocalFlags::ISIG)
        );
        assert_eq!(
            during.output_flags.contains(OutputFlags::OPOST),
            before.output_flags.contains(OutputFlags::OPOST)
        );

        termios::tcsetattr(&pty.slave, SetArg::TCSANOW, &saved).unwrap();
        let after = termios::tcgetattr(&pty.slave).unwrap();
        assert_eq!(after.local_flags, before.local_flags);
    }
}
