//! Signal Handling
//!
//! Handlers only set atomic flags; everything else happens in normal
//! control flow. `SA_RESTART` is deliberately not set so a pending
//! `read` or `waitpid` returns `EINTR` and the caller can inspect the
//! flags.
//!
//! - `SIGINT` cancels the current input line.
//! - `SIGTSTP` during a foreground wait suspends the child.

use std::sync::atomic::{AtomicBool, Ordering};

use nix::sys::signal::{sigaction, SaFlags, SigAction, SigHandler, SigSet, Signal};

static SIGINT_RECEIVED: AtomicBool = AtomicBool::new(false);
static SIGTSTP_RECEIVED: AtomicBool = AtomicBool::new(false);

extern "C" fn on_sigint(_: libc::c_int) {
    SIGINT_RECEIVED.store(true, Ordering::SeqCst);
}

extern "C" fn on_sigtstp(_: libc::c_int) {
    SIGTSTP_RECEIVED.store(true, Ordering::SeqCst);
}

/// Install the shell's signal handlers.
pub fn install() -> nix::Result<()> {
    let int_action = SigAction::new(
        SigHandler::Handler(on_sigint),
        SaFlags::empty(),
        SigSet::empty(),
    );
    let tstp_action = SigAction::new(
        SigHandler::Handler(on_sigtstp),
        SaFlags::empty(),
        SigSet::empty(),
    );
    unsafe {
        sigaction(Signal::SIGINT, &int_action)?;
        sigaction(Signal::SIGTSTP, &tstp_action)?;
    }
    Ok(())
}

/// Consume a pending SIGINT, if any.
pub fn take_sigint() -> bool {
    SIGINT_RECEIVED.swap(false, Ordering::SeqCst)
}

/// Consume a pending SIGTSTP, if any.
pub fn take_sigtstp() -> bool {
    SIGTSTP_RECEIVED.swap(false, Ordering::SeqCst)
}
