//! Count-up animation for the estimate bounds.
//!
//! When results appear, each bound counts up from zero to its final value
//! over [`DEFAULT_REVEAL_DURATION`] with an ease-out cubic curve. Every frame
//! is an integer, and the last frame is exactly the final value.
//!
//! The [`Revealer`] runs one Tokio task per [`RevealTarget`] and hands frames
//! to a [`RevealSink`]. Starting a new reveal for a target aborts the one
//! already running, so a stale animation never writes over a fresh one.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use rust_decimal::{Decimal, RoundingStrategy};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, trace, warn};

use crate::models::PriceEstimate;

/// How long one bound takes to count up.
pub const DEFAULT_REVEAL_DURATION: Duration = Duration::from_millis(1500);

/// Time between frames, roughly one display refresh.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Which displayed bound a frame belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RevealTarget {
    Min,
    Max,
}

impl fmt::Display for RevealTarget {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            RevealTarget::Min => write!(f, "min"),
            RevealTarget::Max => write!(f, "max"),
        }
    }
}

/// Receives animation frames. Called from Tokio tasks.
pub trait RevealSink: Send + Sync {
    fn render(
        &self,
        target: RevealTarget,
        value: Decimal,
    );
}

/// `1 - (1 - p)^3`, with `p` clamped to `[0, 1]`.
pub fn ease_out_cubic(progress: Decimal) -> Decimal {
    let p = progress.clamp(Decimal::ZERO, Decimal::ONE);
    let remaining = Decimal::ONE - p;
    Decimal::ONE - remaining * remaining * remaining
}

/// The integer shown at `progress` through an animation from `start` to
/// `end`. Returns `end` exactly once progress reaches 1.
pub fn frame_value(
    start: Decimal,
    end: Decimal,
    progress: Decimal,
) -> Decimal {
    if progress >= Decimal::ONE {
        return end;
    }
    let value = start + (end - start) * ease_out_cubic(progress);
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

fn progress_at(
    elapsed: Duration,
    duration: Duration,
) -> Decimal {
    if duration.is_zero() {
        return Decimal::ONE;
    }
    let elapsed_ms = Decimal::from(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX));
    let duration_ms = Decimal::from(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX));
    if duration_ms.is_zero() {
        return Decimal::ONE;
    }
    (elapsed_ms / duration_ms).min(Decimal::ONE)
}

async fn animate(
    sink: Arc<dyn RevealSink>,
    target: RevealTarget,
    end: Decimal,
    duration: Duration,
) {
    let started = Instant::now();
    let mut ticker = time::interval(FRAME_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut frames = 0_u32;

    loop {
        ticker.tick().await;
        let progress = progress_at(started.elapsed(), duration);
        sink.render(target, frame_value(Decimal::ZERO, end, progress));
        frames += 1;
        if progress >= Decimal::ONE {
            break;
        }
    }

    trace!(%target, %end, frames, "reveal finished");
}

/// Drives count-up animations for the two bounds of an estimate.
pub struct Revealer {
    sink: Arc<dyn RevealSink>,
    duration: Duration,
    tasks: HashMap<RevealTarget, JoinHandle<()>>,
}

impl fmt::Debug for Revealer {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("Revealer")
            .field("duration", &self.duration)
            .field("running", &self.tasks.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Revealer {
    pub fn new(sink: Arc<dyn RevealSink>) -> Self {
        Self::with_duration(sink, DEFAULT_REVEAL_DURATION)
    }

    /// A revealer whose animations last `duration`. A zero duration renders
    /// the final value as the only frame.
    pub fn with_duration(
        sink: Arc<dyn RevealSink>,
        duration: Duration,
    ) -> Self {
        Self {
            sink,
            duration,
            tasks: HashMap::new(),
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Starts animating both bounds of `estimate`.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    pub fn reveal(
        &mut self,
        estimate: &PriceEstimate,
    ) {
        self.start(RevealTarget::Min, estimate.min);
        self.start(RevealTarget::Max, estimate.max);
    }

    /// Animates `target` from zero to `end`, aborting any animation already
    /// running for it.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    pub fn start(
        &mut self,
        target: RevealTarget,
        end: Decimal,
    ) {
        if self.cancel(target) {
            debug!(%target, "superseded running reveal");
        }
        let handle = tokio::spawn(animate(Arc::clone(&self.sink), target, end, self.duration));
        self.tasks.insert(target, handle);
    }

    /// Stops the animation for `target`. Returns whether one was running.
    pub fn cancel(
        &mut self,
        target: RevealTarget,
    ) -> bool {
        match self.tasks.remove(&target) {
            Some(handle) => {
                let running = !handle.is_finished();
                handle.abort();
                running
            }
            None => false,
        }
    }

    pub fn cancel_all(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }

    pub fn is_animating(&self) -> bool {
        self.tasks.values().any(|handle| !handle.is_finished())
    }

    /// Waits until every started animation has rendered its last frame or
    /// been cancelled.
    ///
    /// Cancel safe: a handle leaves the revealer only once its task is done,
    /// so dropping this future early leaves the rest cancellable.
    pub async fn settle(&mut self) {
        while let Some(target) = self.tasks.keys().next().copied() {
            let Some(handle) = self.tasks.get_mut(&target) else {
                break;
            };
            let result = handle.await;
            self.tasks.remove(&target);
            if let Err(err) = result {
                if err.is_panic() {
                    warn!(%target, "reveal task panicked");
                }
            }
        }
    }
}

impl Drop for Revealer {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        frames: Mutex<Vec<(RevealTarget, Decimal)>>,
    }

    impl RecordingSink {
        fn values(
            &self,
            target: RevealTarget,
        ) -> Vec<Decimal> {
            self.frames
                .lock()
                .unwrap()
                .iter()
                .filter(|(t, _)| *t == target)
                .map(|(_, value)| *value)
                .collect()
        }
    }

    impl RevealSink for RecordingSink {
        fn render(
            &self,
            target: RevealTarget,
            value: Decimal,
        ) {
            self.frames.lock().unwrap().push((target, value));
        }
    }

    fn estimate(
        min: Decimal,
        max: Decimal,
    ) -> PriceEstimate {
        PriceEstimate {
            min,
            max,
            breakdown: Vec::new(),
        }
    }

    // =========================================================================
    // easing
    // =========================================================================

    #[test]
    fn ease_out_cubic_endpoints_and_midpoint() {
        assert_eq!(ease_out_cubic(dec!(0)), dec!(0));
        assert_eq!(ease_out_cubic(dec!(0.5)), dec!(0.875));
        assert_eq!(ease_out_cubic(dec!(1)), dec!(1));
    }

    #[test]
    fn ease_out_cubic_clamps_progress() {
        assert_eq!(ease_out_cubic(dec!(-0.5)), dec!(0));
        assert_eq!(ease_out_cubic(dec!(2)), dec!(1));
    }

    #[test]
    fn frame_value_is_whole_number() {
        let value = frame_value(dec!(0), dec!(51000), dec!(0.5));

        assert_eq!(value, dec!(44625));
    }

    #[test]
    fn frame_value_rounds_half_up() {
        // 0.875 * 3 = 2.625
        assert_eq!(frame_value(dec!(0), dec!(3), dec!(0.5)), dec!(3));
        // 0.875 * 2 = 1.75
        assert_eq!(frame_value(dec!(0), dec!(2), dec!(0.5)), dec!(2));
        // 0.271 * 10 = 2.71
        assert_eq!(frame_value(dec!(0), dec!(10), dec!(0.1)), dec!(3));
    }

    #[test]
    fn frame_value_at_completion_is_exact_end() {
        assert_eq!(frame_value(dec!(0), dec!(64000), dec!(1)), dec!(64000));
        assert_eq!(frame_value(dec!(0), dec!(64000), dec!(1.2)), dec!(64000));
    }

    #[test]
    fn progress_is_capped_at_one() {
        let duration = Duration::from_millis(1500);

        assert_eq!(progress_at(Duration::from_millis(750), duration), dec!(0.5));
        assert_eq!(progress_at(Duration::from_millis(3000), duration), dec!(1));
        assert_eq!(progress_at(Duration::from_millis(5), Duration::ZERO), dec!(1));
    }

    // =========================================================================
    // revealer
    // =========================================================================

    #[tokio::test(start_paused = true)]
    async fn reveal_counts_up_to_exact_bounds() {
        let sink = Arc::new(RecordingSink::default());
        let mut revealer = Revealer::new(sink.clone());

        revealer.reveal(&estimate(dec!(51000), dec!(64000)));
        revealer.settle().await;

        let min_frames = sink.values(RevealTarget::Min);
        let max_frames = sink.values(RevealTarget::Max);
        assert_eq!(min_frames.first(), Some(&dec!(0)));
        assert_eq!(min_frames.last(), Some(&dec!(51000)));
        assert_eq!(max_frames.last(), Some(&dec!(64000)));
        assert!(min_frames.windows(2).all(|pair| pair[0] <= pair[1]));
        assert!(min_frames.iter().all(|value| value.fract().is_zero()));
    }

    #[tokio::test(start_paused = true)]
    async fn reveal_takes_configured_duration() {
        let sink = Arc::new(RecordingSink::default());
        let mut revealer = Revealer::new(sink.clone());
        let started = Instant::now();

        revealer.reveal(&estimate(dec!(48000), dec!(60000)));
        revealer.settle().await;

        let elapsed = started.elapsed();
        assert!(elapsed >= DEFAULT_REVEAL_DURATION);
        assert!(elapsed < DEFAULT_REVEAL_DURATION + FRAME_INTERVAL * 2);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_duration_renders_final_value_only() {
        let sink = Arc::new(RecordingSink::default());
        let mut revealer = Revealer::with_duration(sink.clone(), Duration::ZERO);

        revealer.reveal(&estimate(dec!(15000), dec!(18000)));
        revealer.settle().await;

        assert_eq!(sink.values(RevealTarget::Min), vec![dec!(15000)]);
        assert_eq!(sink.values(RevealTarget::Max), vec![dec!(18000)]);
    }

    #[tokio::test(start_paused = true)]
    async fn new_reveal_supersedes_running_one() {
        let sink = Arc::new(RecordingSink::default());
        let mut revealer = Revealer::new(sink.clone());

        revealer.reveal(&estimate(dec!(999000), dec!(999000)));
        revealer.reveal(&estimate(dec!(51000), dec!(64000)));
        revealer.settle().await;

        let min_frames = sink.values(RevealTarget::Min);
        let max_frames = sink.values(RevealTarget::Max);
        assert!(min_frames.iter().all(|value| *value <= dec!(51000)));
        assert!(max_frames.iter().all(|value| *value <= dec!(64000)));
        assert_eq!(min_frames.last(), Some(&dec!(51000)));
        assert_eq!(max_frames.last(), Some(&dec!(64000)));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_all_stops_rendering() {
        let sink = Arc::new(RecordingSink::default());
        let mut revealer = Revealer::new(sink.clone());

        revealer.reveal(&estimate(dec!(51000), dec!(64000)));
        tokio::time::sleep(Duration::from_millis(100)).await;
        revealer.cancel_all();
        let rendered = sink.frames.lock().unwrap().len();
        tokio::time::sleep(DEFAULT_REVEAL_DURATION).await;

        assert!(!revealer.is_animating());
        assert_eq!(sink.frames.lock().unwrap().len(), rendered);
        assert!(sink.values(RevealTarget::Min).iter().all(|v| *v < dec!(51000)));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_reports_whether_animation_was_running() {
        let sink = Arc::new(RecordingSink::default());
        let mut revealer = Revealer::new(sink);

        revealer.start(RevealTarget::Min, dec!(1000));

        assert!(revealer.is_animating());
        assert!(revealer.cancel(RevealTarget::Min));
        assert!(!revealer.cancel(RevealTarget::Min));
        assert!(!revealer.cancel(RevealTarget::Max));
    }

    #[tokio::test(start_paused = true)]
    async fn interrupted_settle_leaves_animation_cancellable() {
        let sink = Arc::new(RecordingSink::default());
        let mut revealer = Revealer::new(sink.clone());

        revealer.reveal(&estimate(dec!(51000), dec!(64000)));
        let settled = tokio::time::timeout(Duration::from_millis(200), revealer.settle()).await;

        assert!(settled.is_err());
        assert!(revealer.is_animating());

        revealer.cancel_all();
        tokio::time::sleep(DEFAULT_REVEAL_DURATION).await;

        assert!(!sink.values(RevealTarget::Max).contains(&dec!(64000)));
    }
}
