use crate::decoder::Decoder;
use std::sync::Arc;
use termloop_types::Event;
use tokio::io::{AsyncReadExt, Stdin};
use tokio::sync::{mpsc, Notify};
use tokio::task::JoinHandle;

/// Escape-key disambiguation window: if no follow-up byte arrives within
/// this long after a bare `ESC`, it is flushed as a standalone `Key(Escape)`.
pub const ESCAPE_FLUSH_MS: u64 = 75;

/// Handle used to request the reader task stop. Mirrors the
/// notify-then-join shutdown pairing used elsewhere in the runtime.
pub struct ReaderShutdown {
    notify: Arc<Notify>,
}

impl ReaderShutdown {
    pub fn signal(&self) {
        self.notify.notify_one();
    }
}

/// Spawn a task that reads raw bytes from stdin, feeds them to a
/// [`Decoder`], and forwards decoded events on `tx` in the order they were
/// produced. Returns a shutdown handle and the task's `JoinHandle`.
pub fn spawn_reader(tx: mpsc::Sender<Event>) -> (ReaderShutdown, JoinHandle<()>) {
    let notify = Arc::new(Notify::new());
    let shutdown = ReaderShutdown {
        notify: notify.clone(),
    };
    let handle = tokio::spawn(run_reader(tx, notify));
    (shutdown, handle)
}

async fn run_reader(tx: mpsc::Sender<Event>, shutdown: Arc<Notify>) {
    let mut stdin: Stdin = tokio::io::stdin();
    let mut decoder = Decoder::new();
    let mut buf = [0u8; 1024];
    let mut flush_pending = false;

    loop {
        let read_fut = stdin.read(&mut buf);
        let timeout = tokio::time::sleep(std::time::Duration::from_millis(ESCAPE_FLUSH_MS));

        tokio::select! {
            biased;
            _ = shutdown.notified() => {
                tracing::debug!("input reader received shutdown signal");
                return;
            }
            n = read_fut => {
                match n {
                    Ok(0) => {
                        tracing::debug!("stdin closed, input reader exiting");
                        return;
                    }
                    Ok(n) => {
                        let events = decoder.feed(&buf[..n]);
                        flush_pending = n > 0 && (decoder.has_pending_cr() || events.is_empty());
                        for ev in events {
                            if tx.send(ev).await.is_err() {
                                return;
                            }
                        }
                    }
                    Err(err) => {
                        tracing::warn!(%err, "input reader read error");
                        return;
                    }
                }
            }
            _ = timeout, if flush_pending => {
                flush_pending = false;
                if let Some(ev) = decoder.flush_cr().or_else(|| decoder.flush_escape()) {
                    if tx.send(ev).await.is_err() {
                        return;
                    }
                }
            }
        }
    }
}
