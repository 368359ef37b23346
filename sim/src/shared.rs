//! The two things the physics and telemetry threads share: the latest published state and the stop flag.
//! Both are built once in `main` and handed to each thread explicitly.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use hyperion_physics::State;
use tokio::sync::watch;

/// Cooperative shutdown flag. Loops check it once per iteration and finish the iteration they are in.
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    /// A new, lowered flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask every holder to stop after its current iteration.
    pub fn raise(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Whether a stop has been requested.
    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Creates the latest-value slot, seeded with `initial` so readers always have something whole to copy.
///
/// Publishing replaces the entire `State` under the channel's lock and never waits for readers;
/// a reader copies the entire value out. Readers may see a snapshot twice or miss several, never a mix of two.
pub fn snapshot_slot(initial: State) -> (SnapshotPublisher, SnapshotReader) {
    let (tx, rx) = watch::channel(initial);
    (SnapshotPublisher(tx), SnapshotReader(rx))
}

/// Producer half of the slot. Only the driver holds one.
#[derive(Debug)]
pub struct SnapshotPublisher(watch::Sender<State>);

impl SnapshotPublisher {
    /// Overwrites the slot with a copy of `state`. Works with or without live readers.
    pub fn publish(&self, state: &State) {
        self.0.send_replace(*state);
    }

    /// A fresh reader onto the same slot.
    pub fn reader(&self) -> SnapshotReader {
        SnapshotReader(self.0.subscribe())
    }
}

/// Consumer half of the slot. Cheap to clone.
#[derive(Debug, Clone)]
pub struct SnapshotReader(watch::Receiver<State>);

impl SnapshotReader {
    /// Copy of the most recently published state.
    pub fn latest(&self) -> State {
        *self.0.borrow()
    }
}
