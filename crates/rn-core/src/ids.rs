//! Node identifier.
//!
//! A graph owns its nodes in one `Vec`; a `NodeId` is the position in that
//! arena.  Edges, routes and search tables all refer to nodes this way.

use std::fmt;

/// Index of a node in a graph's arena.
///
/// The inner integer is public for construction in tests and tools; use
/// [`NodeId::index`] to address arena-aligned tables.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub u32);

impl NodeId {
    /// Never handed out by a graph.
    pub const INVALID: NodeId = NodeId(u32::MAX);

    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl Default for NodeId {
    /// [`NodeId::INVALID`], so an id that was never assigned stands out.
    #[inline(always)]
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl From<NodeId> for usize {
    #[inline(always)]
    fn from(id: NodeId) -> usize {
        id.index()
    }
}

impl TryFrom<usize> for NodeId {
    type Error = std::num::TryFromIntError;

    fn try_from(n: usize) -> Result<Self, Self::Error> {
        u32::try_from(n).map(NodeId)
    }
}
