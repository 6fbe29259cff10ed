//! Line commands from the terminal: Enter or `r` refreshes, `q` quits.
//! They stand in for the touchscreen's refresh button.

use std::io::BufRead;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::scheduler::RefreshScheduler;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Refresh,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim() {
            "" | "r" => Some(Command::Refresh),
            "q" => Some(Command::Quit),
            _ => None,
        }
    }
}

/// Read stdin on a dedicated OS thread and forward each line.
///
/// The thread is detached, so a read still waiting for input does not hold
/// up shutdown. It ends on EOF or once the receiver is dropped.
pub fn spawn_stdin_reader() -> std::io::Result<mpsc::Receiver<String>> {
    let (tx, rx) = mpsc::channel(8);

    std::thread::Builder::new()
        .name("skyboard-stdin".to_string())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.blocking_send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!("Failed to read input: {}", e);
                        break;
                    }
                }
            }
        })?;

    Ok(rx)
}

/// Apply commands until `q`, cancellation, or the input closing.
///
/// `q` cancels `cancel`. A closed input only ends command handling; the
/// refresh loop keeps running on its timer.
pub async fn handle_commands(
    mut lines: mpsc::Receiver<String>,
    scheduler: Arc<RefreshScheduler>,
    cancel: CancellationToken,
) {
    loop {
        let line = tokio::select! {
            _ = cancel.cancelled() => return,
            line = lines.recv() => line,
        };

        let Some(line) = line else {
            tracing::debug!("Input closed");
            return;
        };

        match Command::parse(&line) {
            Some(Command::Refresh) => {
                scheduler.request_refresh();
            }
            Some(Command::Quit) => {
                cancel.cancel();
                return;
            }
            None => tracing::debug!("Ignoring input: {}", line.trim()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse(""), Some(Command::Refresh));
        assert_eq!(Command::parse("  r \n"), Some(Command::Refresh));
        assert_eq!(Command::parse("q"), Some(Command::Quit));
        assert_eq!(Command::parse("refresh"), None);
    }
}
