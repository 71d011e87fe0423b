//! Terminal event abstraction.
//!
//! Input events and timer ticks are merged into one channel.  Ticks come
//! from a dedicated interval task rather than an input-poll timeout, so the
//! simulation cadence stays fixed even while input events arrive faster
//! than the tick rate (held keys, mouse drags).

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    /// Periodic timer tick — drives every simulation.
    Tick,
}

/// Spawns the tick interval and the terminal input reader, returning the
/// channel both feed into.
pub fn spawn_event_reader(tick_rate: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    spawn_tick_interval(tick_rate, tx.clone());

    // crossterm's read() blocks, so it gets its own thread.
    tokio::task::spawn_blocking(move || loop {
        match event::read() {
            Ok(ev) => {
                let app_event = match ev {
                    CtEvent::Key(k) => AppEvent::Key(k),
                    CtEvent::Mouse(m) => AppEvent::Mouse(m),
                    CtEvent::Resize(w, h) => AppEvent::Resize(w, h),
                    _ => continue,
                };
                if tx.send(app_event).is_err() {
                    break; // receiver dropped
                }
            }
            Err(_) => break,
        }
    });

    rx
}

/// Sends [`AppEvent::Tick`] at a fixed interval, independent of input.
fn spawn_tick_interval(tick_rate: Duration, tx: mpsc::UnboundedSender<AppEvent>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(tick_rate);
        // A stalled receiver should not cause a burst of catch-up ticks.
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            if tx.send(AppEvent::Tick).is_err() {
                break;
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn ticks_arrive_at_a_fixed_interval() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        spawn_tick_interval(Duration::from_millis(50), tx);

        // First tick fires immediately, then one per interval.
        let start = tokio::time::Instant::now();
        for _ in 0..4 {
            let ev = rx.recv().await.unwrap();
            assert!(matches!(ev, AppEvent::Tick));
        }
        assert_eq!(start.elapsed(), Duration::from_millis(150));
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_keep_flowing_alongside_other_events() {
        // Input events share the channel with ticks; flooding it must not
        // displace the interval.
        let (tx, mut rx) = mpsc::unbounded_channel();
        spawn_tick_interval(Duration::from_millis(50), tx.clone());

        for _ in 0..20 {
            tx.send(AppEvent::Resize(80, 24)).unwrap();
        }

        let mut ticks = 0;
        let deadline = tokio::time::Instant::now() + Duration::from_millis(160);
        while tokio::time::Instant::now() < deadline {
            match rx.recv().await.unwrap() {
                AppEvent::Tick => ticks += 1,
                _ => {}
            }
            if ticks == 4 {
                break;
            }
        }
        assert_eq!(ticks, 4);
    }
}
