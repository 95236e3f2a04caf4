//! Process execution for simulator commands.

use std::{future::Future, io};

use tokio::process::Command;
use tracing::{debug, trace};

/// Runs a command and hands back whatever text it produced.
///
/// The simulator is only ever reached through this trait, so tests can swap in
/// a fake that answers with canned responses.
pub trait CommandExecutor {
    fn run(&self, args: &[String]) -> impl Future<Output = io::Result<String>>;
}

/// Executes commands through the platform shell.
///
/// The arguments are joined with single spaces into one command line, the same
/// way they would be typed at a prompt.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellExecutor;

impl CommandExecutor for ShellExecutor {
    async fn run(&self, args: &[String]) -> io::Result<String> {
        let command_line = args.join(" ");
        debug!(command = %command_line, "running shell command");

        let output = shell(&command_line).output().await?;
        let text = longest_output(&output.stdout, &output.stderr);
        trace!(status = %output.status, output = %text, "shell command finished");

        Ok(text)
    }
}

#[cfg(not(windows))]
fn shell(command_line: &str) -> Command {
    let mut command = Command::new("sh");
    command.arg("-c").arg(command_line);
    command
}

#[cfg(windows)]
fn shell(command_line: &str) -> Command {
    let mut command = Command::new("cmd");
    command.arg("/C").arg(command_line);
    command
}

/// Picks the longer of the two captured streams and trims it.
///
/// The simulator reports some results on stderr, so neither stream can be
/// ignored. Stdout wins a tie.
pub fn longest_output(stdout: &[u8], stderr: &[u8]) -> String {
    let chosen = if stderr.len() > stdout.len() {
        stderr
    } else {
        stdout
    };
    String::from_utf8_lossy(chosen).trim().to_string()
}
