//! Vertex and edge handles.
//!
//! A handle is a slot index plus the generation of the slot at the time the handle was
//! issued. Removing a vertex or edge bumps the slot generation, which turns every handle
//! still pointing at it into a stale one.

const NULL_INDEX: u32 = u32::MAX;

/// Index for a slot appended to an arena that currently holds `len` slots, or `None` once
/// the arena is full. `u32::MAX` is reserved for the null handle.
pub(crate) fn next_slot_index(len: usize) -> Option<u32> {
    u32::try_from(len).ok().filter(|&index| index != NULL_INDEX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Vertex {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl Vertex {
    pub const NULL: Vertex = Vertex {
        index: NULL_INDEX,
        generation: 0,
    };

    pub(crate) fn new(index: u32, generation: u32) -> Self {
        debug_assert!(index != NULL_INDEX, "vertex arena exhausted");
        Self { index, generation }
    }

    pub fn is_null(self) -> bool {
        self.index == NULL_INDEX
    }

    pub(crate) fn slot(self) -> usize {
        self.index as usize
    }
}

impl Default for Vertex {
    fn default() -> Self {
        Self::NULL
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl Edge {
    pub const NULL: Edge = Edge {
        index: NULL_INDEX,
        generation: 0,
    };

    pub(crate) fn new(index: u32, generation: u32) -> Self {
        debug_assert!(index != NULL_INDEX, "edge arena exhausted");
        Self { index, generation }
    }

    pub fn is_null(self) -> bool {
        self.index == NULL_INDEX
    }

    pub(crate) fn slot(self) -> usize {
        self.index as usize
    }
}

impl Default for Edge {
    fn default() -> Self {
        Self::NULL
    }
}
