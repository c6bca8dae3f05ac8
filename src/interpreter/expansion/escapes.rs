//! Escape Processing
//!
//! Interprets backslash escapes in unquoted and double-quoted text and
//! in the prompt template. Applied after variable and tilde expansion.
//!
//! Supported escapes:
//! - \\ \" \' - the literal character
//! - \n \r \e \a - newline, carriage return, escape, bell
//! - \h \H - hostname
//! - \u - login name
//! - \s - shell name
//! - \w \W - working directory, its basename
//! - \$ - `#` for root, `$` otherwise
//! - \t \T \@ - time (24h, 12h, 12h with AM/PM)
//! - \d - date (`Www Mon DD`)
//! - \j - number of suspended jobs
//! - \l - terminal device basename
//! - \v \V - version (major.minor, full)
//!
//! Anything else passes through verbatim.

use chrono::{Datelike, Local, Timelike};
use nix::unistd::{gethostname, ttyname, Uid, User};

use crate::interpreter::types::ShellState;
use crate::shell::SHELL_NAME;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

fn hostname() -> String {
    gethostname()
        .map(|h| h.to_string_lossy().into_owned())
        .unwrap_or_else(|_| "localhost".to_string())
}

fn login_name() -> String {
    if let Ok(user) = std::env::var("USER") {
        return user;
    }
    if let Ok(user) = std::env::var("LOGNAME") {
        return user;
    }
    User::from_uid(Uid::current())
        .ok()
        .flatten()
        .map(|u| u.name)
        .unwrap_or_else(|| "user".to_string())
}

fn current_dir() -> String {
    std::env::current_dir()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|_| "/".to_string())
}

fn tty_basename() -> String {
    ttyname(std::io::stdin())
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "tty".to_string())
}

fn short_version() -> String {
    let mut pieces = VERSION.splitn(3, '.');
    match (pieces.next(), pieces.next()) {
        (Some(major), Some(minor)) => format!("{}.{}", major, minor),
        _ => VERSION.to_string(),
    }
}

fn hour12(hour: u32) -> u32 {
    let h = hour % 12;
    if h == 0 {
        12
    } else {
        h
    }
}

/// Process all backslash escapes in `value`.
pub fn process_escapes(state: &ShellState, value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let chars: Vec<char> = value.chars().collect();
    let now = Local::now();
    let mut i = 0;

    while i < chars.len() {
        if chars[i] != '\\' {
            result.push(chars[i]);
            i += 1;
            continue;
        }

        if i + 1 >= chars.len() {
            // Trailing backslash
            result.push('\\');
            break;
        }

        match chars[i + 1] {
            '\\' => result.push('\\'),
            '"' => result.push('"'),
            '\'' => result.push('\''),
            'n' => result.push('\n'),
            'r' => result.push('\r'),
            'e' => result.push('\x1b'),
            'a' => result.push('\x07'),
            'h' | 'H' => result.push_str(&hostname()),
            'u' => result.push_str(&login_name()),
            's' => result.push_str(SHELL_NAME),
            'w' => result.push_str(&current_dir()),
            'W' => {
                let dir = current_dir();
                result.push_str(dir.rsplit('/').next().filter(|s| !s.is_empty()).unwrap_or("/"));
            }
            '$' => result.push(if Uid::effective().is_root() { '#' } else { '$' }),
            't' => result.push_str(&format!(
                "{:02}:{:02}:{:02}",
                now.hour(),
                now.minute(),
                now.second()
            )),
            'T' => result.push_str(&format!(
                "{:02}:{:02}:{:02}",
                hour12(now.hour()),
                now.minute(),
                now.second()
            )),
            '@' => {
                let ampm = if now.hour() < 12 { "AM" } else { "PM" };
                result.push_str(&format!(
                    "{:02}:{:02}:{:02} {}",
                    hour12(now.hour()),
                    now.minute(),
                    now.second(),
                    ampm
                ));
            }
            'd' => result.push_str(&format!(
                "{} {} {:2}",
                WEEKDAYS[now.weekday().num_days_from_sunday() as usize],
                MONTHS[(now.month() - 1) as usize],
                now.day()
            )),
            'j' => result.push_str(&state.jobs.len().to_string()),
            'l' => result.push_str(&tty_basename()),
            'v' => result.push_str(&short_version()),
            'V' => result.push_str(VERSION),
            other => {
                // Unknown escape - pass through as written
                result.push('\\');
                result.push(other);
            }
        }
        i += 2;
    }

    result
}
