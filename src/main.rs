use clap::Parser;
use std::io::{BufRead, IsTerminal, Write};

use wsh::interpreter::{process, signals};
use wsh::shell::Shell;

#[derive(Parser)]
#[command(name = "wsh")]
#[command(about = "An interactive Unix command-line shell")]
#[command(version)]
struct Cli {
    /// Execute a single command string and exit
    #[arg(short = 'c')]
    command: Option<String>,

    /// Script file to execute
    #[arg()]
    script_file: Option<String>,
}

fn main() {
    std::process::exit(run());
}

fn run() -> i32 {
    let cli = Cli::parse();

    wsh::logging::init();
    if let Err(e) = signals::install() {
        log::warn!("failed to install signal handlers: {}", e);
    }

    let mut shell = Shell::new();

    if let Some(command) = cli.command {
        shell.set_silent();
        shell.run_line(&command);
        return shell.exit_status();
    }

    if let Some(file) = cli.script_file {
        let contents = match std::fs::read_to_string(&file) {
            Ok(contents) => contents,
            Err(e) => {
                eprintln!("wsh: {}: {}", file, e);
                return 1;
            }
        };
        shell.set_silent();
        shell.run_script(&contents);
        return shell.exit_status();
    }

    if !std::io::stdin().is_terminal() {
        shell.set_silent();
    }

    shell.load_rc();
    repl(&mut shell);
    shell.save_history();
    shell.exit_status()
}

/// Read-eval loop. A SIGINT while reading cancels the current line and
/// redraws the prompt.
fn repl(shell: &mut Shell) {
    let stdin = std::io::stdin();

    loop {
        if shell.state.exit_request.is_some() {
            break;
        }

        process::reap_background();
        signals::take_sigint();

        if shell.is_interactive() {
            print!("{}", shell.render_prompt());
            std::io::stdout().flush().ok();
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {
                shell.run_line(&line);
            }
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {
                if signals::take_sigint() && shell.is_interactive() {
                    println!();
                }
            }
            Err(e) => {
                log::warn!("stdin read failed: {}", e);
                break;
            }
        }
    }
}
