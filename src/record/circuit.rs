use serde::{Deserialize, Serialize};

use crate::Record;

/// A circuit occupying a strand (or pair) range on its cable.
///
/// The three `feed_*` fields are either all set or all `None`. The service
/// does not check this; [`CircuitPatch::feed`] is the way to change them
/// together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Record)]
#[record(collection = "circuits")]
#[serde(rename_all = "camelCase")]
pub struct Circuit {
    pub id: String,
    pub cable_id: String,
    /// Label shown by the editor, e.g. "ABC,1-12".
    #[serde(default)]
    pub circuit_id: String,
    pub position: i64,
    pub fiber_start: u32,
    pub fiber_end: u32,
    /// 0 means not spliced.
    pub is_spliced: u8,
    pub feed_cable_id: Option<String>,
    pub feed_fiber_start: Option<u32>,
    pub feed_fiber_end: Option<u32>,
}

/// Upstream cable and range feeding a circuit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feed {
    pub cable_id: String,
    pub fiber_start: u32,
    pub fiber_end: u32,
}

impl Circuit {
    /// The feed, when all three feed fields are present.
    pub fn feed(&self) -> Option<Feed> {
        match (
            &self.feed_cable_id,
            self.feed_fiber_start,
            self.feed_fiber_end,
        ) {
            (Some(cable_id), Some(fiber_start), Some(fiber_end)) => Some(Feed {
                cable_id: cable_id.clone(),
                fiber_start,
                fiber_end,
            }),
            _ => None,
        }
    }

    pub fn is_spliced(&self) -> bool {
        self.is_spliced != 0
    }

    pub(crate) fn apply(&mut self, patch: CircuitPatch) {
        if let Some(cable_id) = patch.cable_id {
            self.cable_id = cable_id;
        }
        if let Some(circuit_id) = patch.circuit_id {
            self.circuit_id = circuit_id;
        }
        if let Some(position) = patch.position {
            self.position = position;
        }
        if let Some(fiber_start) = patch.fiber_start {
            self.fiber_start = fiber_start;
        }
        if let Some(fiber_end) = patch.fiber_end {
            self.fiber_end = fiber_end;
        }
        if let Some(is_spliced) = patch.is_spliced {
            self.is_spliced = is_spliced;
        }
        match patch.feed {
            Some(Some(feed)) => {
                self.feed_cable_id = Some(feed.cable_id);
                self.feed_fiber_start = Some(feed.fiber_start);
                self.feed_fiber_end = Some(feed.fiber_end);
            }
            Some(None) => {
                self.feed_cable_id = None;
                self.feed_fiber_start = None;
                self.feed_fiber_end = None;
            }
            None => {}
        }
    }
}

/// Fields supplied when creating a circuit. There is no way to pass splice
/// status or a feed here: new circuits always start unspliced and unfed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCircuit {
    pub cable_id: String,
    #[serde(default)]
    pub circuit_id: String,
    pub position: i64,
    pub fiber_start: u32,
    pub fiber_end: u32,
}

impl NewCircuit {
    pub fn new(cable_id: impl Into<String>, position: i64, fiber_start: u32, fiber_end: u32) -> Self {
        Self {
            cable_id: cable_id.into(),
            circuit_id: String::new(),
            position,
            fiber_start,
            fiber_end,
        }
    }

    pub fn with_circuit_id(mut self, circuit_id: impl Into<String>) -> Self {
        self.circuit_id = circuit_id.into();
        self
    }

    pub(crate) fn into_circuit(self, id: String) -> Circuit {
        Circuit {
            id,
            cable_id: self.cable_id,
            circuit_id: self.circuit_id,
            position: self.position,
            fiber_start: self.fiber_start,
            fiber_end: self.fiber_end,
            is_spliced: 0,
            feed_cable_id: None,
            feed_fiber_start: None,
            feed_fiber_end: None,
        }
    }
}

/// Partial circuit update.
///
/// `feed` is tri-state: `None` leaves the feed alone, `Some(None)` clears
/// it, `Some(Some(feed))` sets all three feed fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CircuitPatch {
    pub cable_id: Option<String>,
    pub circuit_id: Option<String>,
    pub position: Option<i64>,
    pub fiber_start: Option<u32>,
    pub fiber_end: Option<u32>,
    pub is_spliced: Option<u8>,
    pub feed: Option<Option<Feed>>,
}

impl CircuitPatch {
    pub fn cable_id(mut self, cable_id: impl Into<String>) -> Self {
        self.cable_id = Some(cable_id.into());
        self
    }

    pub fn circuit_id(mut self, circuit_id: impl Into<String>) -> Self {
        self.circuit_id = Some(circuit_id.into());
        self
    }

    pub fn position(mut self, position: i64) -> Self {
        self.position = Some(position);
        self
    }

    pub fn fibers(mut self, fiber_start: u32, fiber_end: u32) -> Self {
        self.fiber_start = Some(fiber_start);
        self.fiber_end = Some(fiber_end);
        self
    }

    pub fn spliced(mut self, is_spliced: u8) -> Self {
        self.is_spliced = Some(is_spliced);
        self
    }

    pub fn feed(mut self, cable_id: impl Into<String>, fiber_start: u32, fiber_end: u32) -> Self {
        self.feed = Some(Some(Feed {
            cable_id: cable_id.into(),
            fiber_start,
            fiber_end,
        }));
        self
    }

    pub fn clear_feed(mut self) -> Self {
        self.feed = Some(None);
        self
    }
}

/// One entry of a bulk circuit update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircuitUpdate {
    pub id: String,
    pub changes: CircuitPatch,
}

impl CircuitUpdate {
    pub fn new(id: impl Into<String>, changes: CircuitPatch) -> Self {
        Self {
            id: id.into(),
            changes,
        }
    }
}
