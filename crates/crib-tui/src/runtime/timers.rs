//! Countdown ticker and resend hold timer.
//!
//! Both run as tokio tasks bound to a `CancellationToken` and report through
//! the inbox. Events carry their generation so the reducer can drop anything
//! that outlived a restart.

use std::time::Duration;

use tokio::time::{Instant, sleep, sleep_until};
use tokio_util::sync::CancellationToken;

use super::inbox::UiEventSender;
use crate::events::UiEvent;

/// Ticks every `period` until `deadline`, then once more at the deadline.
///
/// The final tick lands exactly on the deadline even when the window is not
/// a multiple of the period.
pub async fn run_countdown(
    generation: u64,
    deadline: Instant,
    period: Duration,
    tx: UiEventSender,
    cancel: CancellationToken,
) {
    let mut next = Instant::now() + period;
    loop {
        let wake = next.min(deadline);
        tokio::select! {
            biased;
            () = cancel.cancelled() => return,
            () = sleep_until(wake) => {}
        }

        let at = Instant::now();
        if tx.send(UiEvent::CountdownTick { generation, at }).is_err() || at >= deadline {
            return;
        }
        while next <= at {
            next += period;
        }
    }
}

/// Reports `ResendHoldElapsed` after `delay` unless cancelled first.
pub async fn run_resend_hold(
    generation: u64,
    delay: Duration,
    tx: UiEventSender,
    cancel: CancellationToken,
) {
    tokio::select! {
        biased;
        () = cancel.cancelled() => {}
        () = sleep(delay) => {
            let _ = tx.send(UiEvent::ResendHoldElapsed {
                generation,
                at: Instant::now(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;

    use super::*;

    fn tick_parts(event: UiEvent) -> (u64, Instant) {
        match event {
            UiEvent::CountdownTick { generation, at } => (generation, at),
            other => panic!("expected CountdownTick, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_countdown_ticks_each_second_and_stops_at_deadline() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let start = Instant::now();
        let deadline = start + Duration::from_secs(3);
        let handle = tokio::spawn(run_countdown(
            7,
            deadline,
            Duration::from_secs(1),
            tx,
            CancellationToken::new(),
        ));

        let mut offsets = Vec::new();
        while let Some(event) = rx.recv().await {
            let (generation, at) = tick_parts(event);
            assert_eq!(generation, 7);
            offsets.push(at.duration_since(start).as_secs());
        }
        assert_eq!(offsets, vec![1, 2, 3]);
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_countdown_final_tick_hits_fractional_deadline() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let start = Instant::now();
        let deadline = start + Duration::from_millis(1500);
        tokio::spawn(run_countdown(
            1,
            deadline,
            Duration::from_secs(1),
            tx,
            CancellationToken::new(),
        ));

        let mut last = None;
        while let Some(event) = rx.recv().await {
            last = Some(tick_parts(event).1);
        }
        let last = last.unwrap();
        assert!(last >= deadline);
        assert_eq!(last.duration_since(start).as_secs(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_countdown_sends_nothing_more() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let deadline = Instant::now() + Duration::from_secs(30);
        let handle = tokio::spawn(run_countdown(
            1,
            deadline,
            Duration::from_secs(1),
            tx,
            cancel.clone(),
        ));

        assert!(rx.recv().await.is_some());
        cancel.cancel();
        handle.await.unwrap();
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_hold_fires_once_after_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let start = Instant::now();
        tokio::spawn(run_resend_hold(
            3,
            Duration::from_secs(5),
            tx,
            CancellationToken::new(),
        ));

        match rx.recv().await {
            Some(UiEvent::ResendHoldElapsed { generation, at }) => {
                assert_eq!(generation, 3);
                assert_eq!(at.duration_since(start).as_secs(), 5);
            }
            other => panic!("expected ResendHoldElapsed, got {other:?}"),
        }
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_hold_is_silent() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        cancel.cancel();
        run_resend_hold(3, Duration::from_secs(5), tx, cancel).await;
        assert!(rx.recv().await.is_none());
    }
}
