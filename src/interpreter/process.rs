//! Process Manager
//!
//! fork/exec plumbing for external commands: pipe creation, stdio
//! wiring in the child, foreground waits with suspension handling,
//! background launches, and the signals sent by `fg` and `kill`.
//!
//! The parent owns every pipe end; children inherit them, dup the ends
//! they were wired to onto stdin/stdout/stderr, and close the rest
//! before exec.

use std::ffi::CString;
use std::fs::File;
use std::io::{self, Read, Write};
use std::os::fd::{AsRawFd, OwnedFd, RawFd};

use nix::errno::Errno;
use nix::sys::signal::{kill, Signal};
use nix::sys::wait::{waitpid, WaitPidFlag, WaitStatus};
use nix::unistd::{execv, fork, pipe, ForkResult, Pid};

use crate::interpreter::signals;
use crate::interpreter::types::ShellState;

/// Both ends of a pipe, owned by the parent.
#[derive(Debug)]
pub struct PipeEnds {
    pub read: OwnedFd,
    pub write: OwnedFd,
}

/// Create a pipe.
pub fn make_pipe() -> io::Result<PipeEnds> {
    let (read, write) = pipe().map_err(errno_to_io)?;
    Ok(PipeEnds { read, write })
}

fn errno_to_io(e: Errno) -> io::Error {
    io::Error::from_raw_os_error(e as i32)
}

/// Fork and exec an external command.
///
/// - `stdin`: read end dup'd onto fd 0
/// - `stdout`: write end dup'd onto both fd 1 and fd 2 (piped commands
///   forward stdout and stderr together)
/// - `also_close`: stray pipe ends the child must not keep open
pub fn spawn(
    path: &str,
    argv: &[String],
    stdin: Option<&OwnedFd>,
    stdout: Option<&OwnedFd>,
    also_close: &[RawFd],
) -> io::Result<Pid> {
    let path_c = CString::new(path)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "nul byte in command path"))?;
    let argv_c: Vec<CString> = argv
        .iter()
        .map(|a| CString::new(a.as_str()))
        .collect::<Result<_, _>>()
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "nul byte in argument"))?;

    // Anything buffered must not be duplicated into the child.
    io::stdout().flush().ok();
    io::stderr().flush().ok();

    match unsafe { fork() } {
        Ok(ForkResult::Child) => {
            unsafe {
                if let Some(fd) = stdin {
                    libc::dup2(fd.as_raw_fd(), 0);
                    libc::close(fd.as_raw_fd());
                }
                if let Some(fd) = stdout {
                    libc::dup2(fd.as_raw_fd(), 1);
                    libc::dup2(fd.as_raw_fd(), 2);
                    libc::close(fd.as_raw_fd());
                }
                for fd in also_close {
                    libc::close(*fd);
                }
                libc::signal(libc::SIGINT, libc::SIG_DFL);
                libc::signal(libc::SIGTSTP, libc::SIG_DFL);
            }

            let err = match execv(&path_c, &argv_c) {
                Err(e) => e,
                Ok(infallible) => match infallible {},
            };
            let msg = format!("wsh: {}: {}\n", path, err.desc());
            let _ = nix::unistd::write(io::stderr(), msg.as_bytes());
            unsafe { libc::_exit(1) }
        }
        Ok(ForkResult::Parent { child }) => Ok(child),
        Err(e) => Err(errno_to_io(e)),
    }
}

/// Wait for a foreground child.
///
/// Loops on `waitpid(pid, WUNTRACED)`. A SIGTSTP delivered to the shell
/// while waiting stops the child with SIGSTOP; a child reported stopped
/// is recorded in the suspended-job table either way and the shell
/// returns to the prompt.
pub fn wait_foreground(state: &mut ShellState, pid: Pid) -> i32 {
    loop {
        match waitpid(pid, Some(WaitPidFlag::WUNTRACED)) {
            Ok(WaitStatus::Exited(_, code)) => return code & 0xff,
            Ok(WaitStatus::Signaled(_, sig, _)) => return 128 + sig as i32,
            Ok(WaitStatus::Stopped(stopped, _)) => {
                state.jobs.push(stopped.as_raw());
                eprintln!("wsh: suspended [{}] {}", state.jobs.len(), stopped);
                return 128 + Signal::SIGTSTP as i32;
            }
            Ok(_) => {}
            Err(Errno::EINTR) => {
                if signals::take_sigtstp() {
                    let _ = kill(pid, Signal::SIGSTOP);
                    // The next waitpid round reports the stop.
                }
            }
            Err(Errno::ECHILD) => return state.last_status,
            Err(e) => {
                log::warn!("waitpid({}) failed: {}", pid, e);
                return 1;
            }
        }
    }
}

/// Send SIGCONT to a suspended job and wait for it in the foreground.
pub fn resume_job(state: &mut ShellState, pid: i32) -> i32 {
    let pid = Pid::from_raw(pid);
    if let Err(e) = kill(pid, Signal::SIGCONT) {
        eprintln!("wsh: fg: {}: {}", pid, e.desc());
        return 1;
    }
    wait_foreground(state, pid)
}

/// Send SIGTERM to a process.
pub fn send_term(pid: i32) -> Result<(), Errno> {
    kill(Pid::from_raw(pid), Signal::SIGTERM)
}

/// Reap any finished background children without blocking.
pub fn reap_background() {
    loop {
        match waitpid(Pid::from_raw(-1), Some(WaitPidFlag::WNOHANG)) {
            Ok(WaitStatus::Exited(pid, _)) | Ok(WaitStatus::Signaled(pid, _, _)) => {
                log::debug!("reaped background child {}", pid);
            }
            _ => break,
        }
    }
}

/// Write a whole buffer to a pipe end.
pub fn write_all(fd: &OwnedFd, mut bytes: &[u8]) -> io::Result<()> {
    while !bytes.is_empty() {
        match nix::unistd::write(fd, bytes) {
            Ok(0) => break,
            Ok(n) => bytes = &bytes[n..],
            Err(Errno::EINTR) => {}
            Err(e) => return Err(errno_to_io(e)),
        }
    }
    Ok(())
}

/// Drain a pipe read end to a string.
pub fn read_all(fd: OwnedFd) -> String {
    let mut buf = Vec::new();
    let mut file = File::from(fd);
    if let Err(e) = file.read_to_end(&mut buf) {
        log::warn!("failed to drain pipe: {}", e);
    }
    String::from_utf8_lossy(&buf).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipe_roundtrip() {
        let pipe = make_pipe().unwrap();
        write_all(&pipe.write, b"hello pipe").unwrap();
        drop(pipe.write);
        assert_eq!(read_all(pipe.read), "hello pipe");
    }

    #[test]
    fn test_spawn_and_wait() {
        let mut state = ShellState::new();
        let pipe = make_pipe().unwrap();
        let pid = spawn(
            "/bin/echo",
            &["echo".to_string(), "spawned".to_string()],
            None,
            Some(&pipe.write),
            &[pipe.read.as_raw_fd()],
        )
        .unwrap();
        drop(pipe.write);

        let status = wait_foreground(&mut state, pid);
        assert_eq!(status, 0);
        assert_eq!(read_all(pipe.read), "spawned\n");
    }

    #[test]
    fn test_spawn_missing_program_exits_nonzero() {
        let mut state = ShellState::new();
        let sink = make_pipe().unwrap();
        let pid = spawn(
            "/nonexistent-wsh-binary",
            &["/nonexistent-wsh-binary".to_string()],
            None,
            Some(&sink.write),
            &[sink.read.as_raw_fd()],
        )
        .unwrap();
        drop(sink.write);

        let status = wait_foreground(&mut state, pid);
        assert_eq!(status, 1);
        let diagnostic = read_all(sink.read);
        assert!(diagnostic.contains("/nonexistent-wsh-binary"));
    }

    #[test]
    fn test_stdin_wiring() {
        let mut state = ShellState::new();
        let input = make_pipe().unwrap();
        let output = make_pipe().unwrap();
        write_all(&input.write, b"lower\n").unwrap();
        drop(input.write);

        let pid = spawn(
            "/bin/cat",
            &["cat".to_string()],
            Some(&input.read),
            Some(&output.write),
            &[output.read.as_raw_fd()],
        )
        .unwrap();
        drop(input.read);
        drop(output.write);

        assert_eq!(wait_foreground(&mut state, pid), 0);
        assert_eq!(read_all(output.read), "lower\n");
    }
}
