use std::fmt;

use crate::error::SetError;

// /////////////////////////////////////////////////////////////////////////////////////////////////
// SkipNode
// /////////////////////////////////////////////////////////////////////////////////////////////////

/// SkipNodes make up the SkipListSet.  Nodes live in the set's arena and refer to each other
/// through arena indices, so a link is simply `Option<usize>`.
///
/// The number of links is the node's height: a node of height `h` is present on levels `0..h`,
/// and `links[i]` is the next node on level `i` (or `None` at the end of that level).
///
/// In cases where the value is not applicable, `None` should be used.  This is the case for the
/// head node and for arena slots which have been released.
#[derive(Clone, Debug)]
pub struct SkipNode<V> {
    // value should never be None, with the exception of the head node and vacant slots.
    pub value: Option<V>,
    pub links: Vec<Option<usize>>,
}

// ///////////////////////////////////////////////
// Inherent methods
// ///////////////////////////////////////////////

impl<V> SkipNode<V> {
    /// Create a new head node.
    pub fn head(total_levels: usize) -> Self {
        SkipNode {
            value: None,
            links: vec![None; total_levels],
        }
    }

    /// Create a new SkipNode with the given value, present on `height` levels.  All the links are
    /// `None` and have to be adjusted.
    ///
    /// Fails with `SetError::InvalidHeight` when `height` is 0.
    pub fn new(value: V, height: usize) -> Result<Self, SetError> {
        if height == 0 {
            return Err(SetError::InvalidHeight);
        }
        Ok(SkipNode {
            value: Some(value),
            links: vec![None; height],
        })
    }

    /// A released arena slot.
    pub fn vacant() -> Self {
        SkipNode {
            value: None,
            links: Vec::new(),
        }
    }

    /// How many levels the node reaches.
    pub fn height(&self) -> usize {
        self.links.len()
    }

    /// Consumes the node returning the value it contains.
    pub fn into_inner(self) -> Option<V> {
        self.value
    }

    /// Returns `true` if the slot holds neither a value nor links.
    #[cfg(test)]
    pub fn is_vacant(&self) -> bool {
        self.value.is_none() && self.links.is_empty()
    }
}

// ///////////////////////////////////////////////
// Trait implementation
// ///////////////////////////////////////////////

impl<V> fmt::Display for SkipNode<V>
where
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(ref v) = self.value {
            write!(f, "{}", v)
        } else {
            Ok(())
        }
    }
}
