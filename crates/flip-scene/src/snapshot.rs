//! Layout snapshots.
//!
//! A snapshot is a live read of every tracked element under a container:
//! geometry, opacity and group identity, keyed by flip id. The caller keeps
//! the previous snapshot ("First") and diffs it against a fresh one ("Last").

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::geometry::Rect;
use crate::host::FlipHost;

/// Measured state of one tracked element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementSnapshot {
    pub id: String,
    pub rect: Rect,
    /// `None` when the computed opacity was missing or malformed.
    pub opacity: Option<f64>,
    pub group_id: Option<String>,
}

impl ElementSnapshot {
    /// Geometry and opacity are both exactly equal.
    pub fn same_state(&self, other: &ElementSnapshot) -> bool {
        self.rect.same_geometry(&other.rect) && self.opacity == other.opacity
    }
}

/// Snapshots keyed by flip id.
pub type SnapshotMap = HashMap<String, ElementSnapshot>;

/// Read every tracked element under `container`.
///
/// Elements without an identity are skipped. If two elements share an
/// identity the later one in document order wins.
pub fn capture_snapshot<H: FlipHost>(host: &H, container: &H::Element) -> SnapshotMap {
    let mut snapshot = SnapshotMap::new();
    for element in host.tracked_elements(container) {
        let Some(id) = host.flip_id(&element) else {
            continue;
        };
        snapshot.insert(
            id.clone(),
            ElementSnapshot {
                id,
                rect: host.bounding_rect(&element),
                opacity: parse_opacity(host.computed_opacity(&element).as_deref()),
                group_id: host.group_id(&element),
            },
        );
    }
    trace!(elements = snapshot.len(), "captured flip snapshot");
    snapshot
}

fn parse_opacity(raw: Option<&str>) -> Option<f64> {
    raw?.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
