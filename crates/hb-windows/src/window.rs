//! Window records handed to the downstream optimisation model.

use hb_core::{Generation, NodeId, PathId, TechnologyId};

/// A contiguous sub-route that one vehicle can drive on a single charge.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Window {
    pub path_id:       PathId,
    pub generation:    Generation,
    pub technology_id: TechnologyId,
    /// 0-based, dense within the `(path, generation, technology)` group.
    pub subset_id:     u32,
    /// Waypoint nodes from the first segment's start to the last segment's end.
    pub sequence:      Vec<NodeId>,
    /// Sum of the constituent segment distances.
    pub length_km:     f64,
    pub segment_count: usize,
}

impl Window {
    /// Merge key for batch output.
    #[inline]
    pub fn sort_key(&self) -> (PathId, Generation, TechnologyId, u32) {
        (self.path_id, self.generation, self.technology_id, self.subset_id)
    }

    pub fn first_node(&self) -> Option<NodeId> {
        self.sequence.first().copied()
    }

    pub fn last_node(&self) -> Option<NodeId> {
        self.sequence.last().copied()
    }
}
