//! Command handling and shutdown for the terminal input path.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use skyboard_core::Units;
use skyboard_dashboard::{handle_commands, Presenter, RefreshScheduler};
use skyboard_weather::{CurrentConditions, DailySummary};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

#[derive(Default)]
struct CountingPresenter {
    errors: AtomicUsize,
}

impl CountingPresenter {
    fn errors(&self) -> usize {
        self.errors.load(Ordering::SeqCst)
    }
}

impl Presenter for CountingPresenter {
    fn show_current(&self, _current: &CurrentConditions, _units: Units) {}

    fn show_daily_summaries(&self, _days: &[DailySummary], _units: Units) {}

    fn show_error(&self, _message: &str) {
        self.errors.fetch_add(1, Ordering::SeqCst);
    }
}

fn idle_scheduler() -> (Arc<RefreshScheduler>, Arc<CountingPresenter>) {
    let presenter = Arc::new(CountingPresenter::default());
    let scheduler = Arc::new(RefreshScheduler::new(None, "London", presenter.clone()));
    (scheduler, presenter)
}

#[tokio::test]
async fn test_cancel_stops_handler_while_input_is_open() {
    let (scheduler, _presenter) = idle_scheduler();
    let (_tx, rx) = mpsc::channel(8);
    let cancel = CancellationToken::new();

    let handle = tokio::spawn(handle_commands(rx, scheduler, cancel.clone()));
    cancel.cancel();

    tokio::time::timeout(Duration::from_secs(1), handle)
        .await
        .expect("handler did not stop on cancellation")
        .unwrap();
}

#[tokio::test]
async fn test_quit_cancels() {
    let (scheduler, _presenter) = idle_scheduler();
    let (tx, rx) = mpsc::channel(8);
    let cancel = CancellationToken::new();

    tx.send("hello".to_string()).await.unwrap();
    tx.send("q".to_string()).await.unwrap();
    handle_commands(rx, scheduler, cancel.clone()).await;

    assert!(cancel.is_cancelled());
}

#[tokio::test]
async fn test_closed_input_does_not_cancel() {
    let (scheduler, _presenter) = idle_scheduler();
    let (tx, rx) = mpsc::channel::<String>(8);
    let cancel = CancellationToken::new();

    drop(tx);
    handle_commands(rx, scheduler, cancel.clone()).await;

    assert!(!cancel.is_cancelled());
}

#[tokio::test(start_paused = true)]
async fn test_refresh_command_triggers_cycle() {
    let (scheduler, presenter) = idle_scheduler();
    let (tx, rx) = mpsc::channel(8);
    let cancel = CancellationToken::new();

    let refresh_loop = tokio::spawn(scheduler.clone().run(cancel.clone()));
    let input = tokio::spawn(handle_commands(rx, scheduler, cancel.clone()));

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(presenter.errors(), 1);

    tx.send("r".to_string()).await.unwrap();
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(presenter.errors(), 2);

    tx.send(String::new()).await.unwrap();
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(presenter.errors(), 3);

    cancel.cancel();
    refresh_loop.await.unwrap();
    input.await.unwrap();
}
