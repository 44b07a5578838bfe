//! Typed identifiers for mesh entities.
//!
//! This module provides type-safe ID wrappers for vertices, edges, faces, and
//! face corners. IDs are handed out by a container from monotonic per-kind
//! counters and are never reused for the container's lifetime, so an external
//! controller can address elements across arbitrary edit sequences: a retired
//! ID simply stops resolving.

use std::fmt::{self, Debug};

/// Sentinel raw value representing an invalid/null ID.
const INVALID: u32 = u32::MAX;

/// A type-safe vertex ID.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct VertexId(u32);

/// A type-safe edge ID.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct EdgeId(u32);

/// A type-safe face ID.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct FaceId(u32);

/// A type-safe face-corner ID.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct CornerId(u32);

macro_rules! impl_id_type {
    ($name:ident, $display:literal) => {
        impl $name {
            /// Create an ID from a raw value.
            #[inline]
            pub fn new(raw: u32) -> Self {
                Self(raw)
            }

            /// Create an invalid/null ID.
            #[inline]
            pub fn invalid() -> Self {
                Self(INVALID)
            }

            /// Get the raw value.
            #[inline]
            pub fn raw(self) -> u32 {
                self.0
            }

            /// Check if this is a valid (non-null) ID.
            #[inline]
            pub fn is_valid(self) -> bool {
                self.0 != INVALID
            }
        }

        impl Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, "{}({})", $display, self.0)
                } else {
                    write!(f, "{}(INVALID)", $display)
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::invalid()
            }
        }

        impl From<u32> for $name {
            fn from(v: u32) -> Self {
                Self::new(v)
            }
        }
    };
}

impl_id_type!(VertexId, "V");
impl_id_type!(EdgeId, "E");
impl_id_type!(FaceId, "F");
impl_id_type!(CornerId, "C");

/// A monotonic ID allocator for one entity kind.
///
/// Allocation only ever moves forward; there is no free list. Retired IDs
/// therefore never resolve to a later-created entity.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    /// Create an allocator starting at zero.
    pub fn new() -> Self {
        Self { next: 0 }
    }

    /// Hand out the next raw ID.
    #[inline]
    pub fn allocate(&mut self) -> u32 {
        let id = self.next;
        debug_assert!(id != INVALID, "id space exhausted");
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_id() {
        let v = VertexId::new(42);
        assert_eq!(v.raw(), 42);
        assert!(v.is_valid());

        let invalid = VertexId::invalid();
        assert!(!invalid.is_valid());
    }

    #[test]
    fn test_type_safety() {
        // Same raw value, distinct types
        let v = VertexId::new(0);
        let e = EdgeId::new(0);
        let f = FaceId::new(0);

        assert_eq!(v.raw(), e.raw());
        assert_eq!(e.raw(), f.raw());
    }

    #[test]
    fn test_debug_format() {
        let v = VertexId::new(42);
        assert_eq!(format!("{:?}", v), "V(42)");

        let invalid = CornerId::invalid();
        assert_eq!(format!("{:?}", invalid), "C(INVALID)");
    }

    #[test]
    fn test_allocator_is_monotonic() {
        let mut alloc = IdAllocator::new();
        let a = alloc.allocate();
        let b = alloc.allocate();
        let c = alloc.allocate();
        assert!(a < b && b < c);
    }
}
