//! Graph configuration options and query flags.

use std::ops::BitOr;

/// Which physical edge direction points toward the descendants of a vertex.
///
/// Each edge is directed `source -> target`; this convention gives that direction its
/// meaning for [`roots`](super::Graph::roots), [`leaves`](super::Graph::leaves) and every
/// direction-relative query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum MeaningOfDirection {
    /// Edges are directed from a parent to its child.
    #[default]
    ParentToChild,
    /// Edges are directed from a child to its parent.
    ChildToParent,
}

/// Direction-relative orientation for searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Toward {
    Leaves,
    Roots,
}

/// Selects which incident edges of a vertex a query looks at.
///
/// `TO_LEAVES` and `TO_ROOTS` resolve to `OUTBOUND` or `INBOUND` depending on the graph's
/// [`MeaningOfDirection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AdjacencyFlags(u8);

impl AdjacencyFlags {
    pub const OUTBOUND: Self = Self(1 << 0);
    pub const INBOUND: Self = Self(1 << 1);
    pub const TO_LEAVES: Self = Self(1 << 2);
    pub const TO_ROOTS: Self = Self(1 << 3);
    pub const ALL: Self = Self(Self::OUTBOUND.0 | Self::INBOUND.0);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Folds the direction-relative bits into physical `OUTBOUND` / `INBOUND` bits.
    pub fn resolve(self, direction: MeaningOfDirection) -> Self {
        let (to_leaves, to_roots) = match direction {
            MeaningOfDirection::ParentToChild => (Self::OUTBOUND, Self::INBOUND),
            MeaningOfDirection::ChildToParent => (Self::INBOUND, Self::OUTBOUND),
        };
        let mut out = Self(self.0 & Self::ALL.0);
        if self.contains(Self::TO_LEAVES) {
            out = out | to_leaves;
        }
        if self.contains(Self::TO_ROOTS) {
            out = out | to_roots;
        }
        out
    }
}

impl Default for AdjacencyFlags {
    fn default() -> Self {
        Self::ALL
    }
}

impl BitOr for AdjacencyFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Which payloads are carried over into a derived graph (closure, reduction).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GraphCopyFlags(u8);

impl GraphCopyFlags {
    pub const NONE: Self = Self(0);
    pub const VERTEX_PROPERTIES: Self = Self(1 << 0);
    pub const EDGE_PROPERTIES: Self = Self(1 << 1);
    pub const ALL: Self = Self(Self::VERTEX_PROPERTIES.0 | Self::EDGE_PROPERTIES.0);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl Default for GraphCopyFlags {
    fn default() -> Self {
        Self::ALL
    }
}

impl BitOr for GraphCopyFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Order in which [`vertices_dominated_by`](super::Graph::vertices_dominated_by) lists
/// its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReturnOrder {
    #[default]
    BreadthFirst,
    DepthFirst,
}
