//! 1-based index types for the vertex and material tables.
//!
//! Scene files number vertices and materials starting at 1; index 0 is
//! reserved and never refers to a real entry. The conversion to a 0-based
//! slot lives in [`OneBasedId::slot`] and nowhere else.

use std::fmt;

/// An index that scene files count from 1.
pub trait OneBasedId: Copy {
    /// The index as written in the scene file.
    fn raw(self) -> u32;

    /// 0-based slot in the backing table.
    ///
    /// The reserved index 0 maps to `usize::MAX`, so it is out of range for
    /// every table.
    #[inline]
    fn slot(self) -> usize {
        (self.raw() as usize).wrapping_sub(1)
    }
}

/// Look up a table entry by its 1-based id.
///
/// Returns `None` for the reserved index 0 and for ids past the end.
#[inline]
pub fn lookup<T, I: OneBasedId>(table: &[T], id: I) -> Option<&T> {
    table.get(id.slot())
}

/// 1-based reference into the vertex table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexId(pub u32);

/// 1-based reference into the material table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(pub u32);

impl OneBasedId for VertexId {
    fn raw(self) -> u32 {
        self.0
    }
}

impl OneBasedId for MaterialId {
    fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "vertex #{}", self.0)
    }
}

impl fmt::Display for MaterialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "material #{}", self.0)
    }
}
