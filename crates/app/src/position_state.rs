//! Observable holder for the device's current position.
//!
//! Exactly one sample is held at a time. [`PositionState::update`] replaces it
//! first and notifies subscribers second, so a woken subscriber always reads
//! the new value. Subscribers that fall behind only see the latest sample.

use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tokio_stream::{Stream, StreamExt};

use geowatch_domain::position::PositionSample;

/// Current position, starting out unknown.
pub struct PositionState {
    sender: watch::Sender<Option<PositionSample>>,
}

impl Default for PositionState {
    fn default() -> Self {
        let (sender, _) = watch::channel(None);
        Self { sender }
    }
}

impl PositionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last known sample, or `None` before the first fix.
    #[must_use]
    pub fn current(&self) -> Option<PositionSample> {
        *self.sender.borrow()
    }

    /// Replace the current sample and wake every subscriber.
    pub fn update(&self, sample: PositionSample) {
        self.sender.send_replace(Some(sample));
    }

    /// Raw receiver, for callers that want `changed()` semantics.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<PositionSample>> {
        self.sender.subscribe()
    }

    /// Stream of samples set *after* this call.
    pub fn changes(&self) -> impl Stream<Item = PositionSample> + Send + 'static {
        WatchStream::from_changes(self.sender.subscribe()).filter_map(|sample| sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geowatch_domain::coordinate::Coordinate;

    #[test]
    fn should_start_unknown() {
        assert!(PositionState::new().current().is_none());
    }

    #[test]
    fn should_replace_sample_on_update() {
        let state = PositionState::new();
        state.update(PositionSample::now(Coordinate::new(1.0, 1.0)));
        state.update(PositionSample::now(Coordinate::new(2.0, 2.0)));
        assert_eq!(
            state.current().map(|s| s.coordinate),
            Some(Coordinate::new(2.0, 2.0))
        );
    }

    #[tokio::test]
    async fn should_see_new_value_when_notified() {
        let state = PositionState::new();
        let mut rx = state.subscribe();

        state.update(PositionSample::now(Coordinate::new(3.0, 4.0)));

        rx.changed().await.unwrap();
        let seen = rx.borrow_and_update().map(|s| s.coordinate);
        assert_eq!(seen, Some(Coordinate::new(3.0, 4.0)));
    }

    #[tokio::test]
    async fn should_stream_only_updates_after_subscription() {
        let state = PositionState::new();
        state.update(PositionSample::now(Coordinate::new(0.0, 0.0)));

        let mut changes = Box::pin(state.changes());
        state.update(PositionSample::now(Coordinate::new(5.0, 6.0)));

        let next = changes.next().await.unwrap();
        assert_eq!(next.coordinate, Coordinate::new(5.0, 6.0));
    }
}
