//! Confirmation and alert dialogs on the terminal.
//!
//! Stdin is read by one background thread for the whole process. Lines go
//! through a channel shared by the watch loop and the prompt, so a
//! confirmation answer is never mistaken for a command key.

use std::io::{BufRead, Write};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use console::{Term, style};
use patchbell_core::UserPrompt;
use tokio::sync::{Mutex as AsyncMutex, mpsc};
use tracing::debug;

/// Shared receiving end of the stdin line channel.
pub type LineReceiver = Arc<AsyncMutex<mpsc::Receiver<String>>>;

/// Start forwarding stdin lines into a channel.
///
/// The channel closes when stdin reaches end of file.
pub fn spawn_stdin_reader() -> LineReceiver {
    let (tx, rx) = mpsc::channel(16);
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.blocking_send(line).is_err() {
                break;
            }
        }
        debug!("Stdin closed");
    });
    Arc::new(AsyncMutex::new(rx))
}

/// Whether an answer counts as "yes". Anything else, including an empty
/// line, is "no".
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Prompt reading answers from the shared stdin channel.
pub struct TerminalPrompt<W: Write + Send> {
    input: LineReceiver,
    out: Mutex<W>,
}

impl TerminalPrompt<Term> {
    pub fn stdout(input: LineReceiver) -> Self {
        Self::new(input, Term::stdout())
    }
}

impl<W: Write + Send> TerminalPrompt<W> {
    pub fn new(input: LineReceiver, out: W) -> Self {
        Self {
            input,
            out: Mutex::new(out),
        }
    }

    fn write_line(&self, text: &str, newline: bool) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = if newline {
            writeln!(out, "{text}")
        } else {
            write!(out, "{text}")
        };
        let _ = out.flush();
    }
}

impl TerminalPrompt<Vec<u8>> {
    pub fn output(&self) -> String {
        let out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&out).into_owned()
    }
}

#[async_trait]
impl<W: Write + Send> UserPrompt for TerminalPrompt<W> {
    async fn confirm(&self, message: &str) -> bool {
        self.write_line(&format!("{} [y/N] ", style(message).bold()), false);
        let answer = self.input.lock().await.recv().await;
        answer.is_some_and(|line| is_yes(&line))
    }

    async fn alert(&self, message: &str) {
        self.write_line(&format!("{} {message}", style("!").yellow().bold()), true);
    }
}
