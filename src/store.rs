//! Load lifecycle for the dataset snapshot.

use crate::record::VehicleRecord;

/// The three mutually exclusive states of a dataset load.
///
/// `Ready` with zero records is a loaded-but-empty dataset, distinct from
/// `Failed`, which carries a human-readable message for the terminal load
/// error. There is no retry: a failed load stays failed.
#[derive(Debug)]
pub enum LoadState {
    Loading,
    Ready(Vec<VehicleRecord>),
    Failed(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    /// The immutable snapshot, once loaded.
    pub fn records(&self) -> Option<&[VehicleRecord]> {
        match self {
            LoadState::Ready(records) => Some(records),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Owns the record snapshot for the lifetime of a run.
///
/// Starts in `Loading` and transitions exactly once. All aggregation and
/// table calls borrow the snapshot; nothing here is mutated after load.
#[derive(Debug)]
pub struct DataStore {
    state: LoadState,
}

impl DataStore {
    pub fn new() -> Self {
        DataStore {
            state: LoadState::Loading,
        }
    }

    pub fn complete(&mut self, records: Vec<VehicleRecord>) {
        self.state = LoadState::Ready(records);
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.state = LoadState::Failed(message.into());
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Consumes the store, handing the settled state to the caller.
    pub fn into_state(self) -> LoadState {
        self.state
    }
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new()
    }
}
