//! Frontier: the active set driving each BSP round
//!
//! Based on Ligra (Shun & Blelloch, `PPoPP` 2013) and Gunrock (Wang et al.,
//! ACM `ToPC` 2017) frontier-based traversal.
//!
//! A frontier is an ordered, resizable list of vertex (or edge) ids. Operators
//! read the input frontier, write the output frontier, then swap the pair.

use crate::error::GraphError;
use crate::storage::VertexId;

/// What the ids in a frontier refer to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrontierKind {
    /// Vertex ids
    #[default]
    Vertex,
    /// Edge ids
    Edge,
}

/// Ordered set of active vertex or edge ids
#[derive(Debug, Clone, Default)]
pub struct Frontier {
    kind: FrontierKind,
    data: Vec<VertexId>,
}

impl Frontier {
    /// Create an empty frontier of the given kind
    #[must_use]
    pub const fn new(kind: FrontierKind) -> Self {
        Self {
            kind,
            data: Vec::new(),
        }
    }

    /// Create an empty frontier with capacity for `capacity` ids
    #[must_use]
    pub fn with_capacity(kind: FrontierKind, capacity: usize) -> Self {
        Self {
            kind,
            data: Vec::with_capacity(capacity),
        }
    }

    /// Frontier kind
    #[must_use]
    pub const fn kind(&self) -> FrontierKind {
        self.kind
    }

    /// Replace contents with `start, start + 1, ..., start + count - 1`
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::IdOverflow`] if the last id would exceed
    /// `u32::MAX`; the frontier is left unchanged
    pub fn sequence(&mut self, start: VertexId, count: usize) -> Result<(), GraphError> {
        let end = u64::from(start) + count as u64;
        if end > u64::from(VertexId::MAX) + 1 {
            return Err(GraphError::IdOverflow { start, count });
        }

        self.data.clear();
        self.data.reserve(count);
        #[allow(clippy::cast_possible_truncation)] // range checked above
        self.data.extend((0..count).map(|i| start + i as VertexId));
        Ok(())
    }

    /// Replace contents with `ids`
    pub fn replace(&mut self, ids: Vec<VertexId>) {
        self.data = ids;
    }

    /// Append one id
    pub fn push(&mut self, id: VertexId) {
        self.data.push(id);
    }

    /// Ensure room for `additional` more ids
    pub fn reserve(&mut self, additional: usize) {
        self.data.reserve(additional);
    }

    /// Remove all ids (keeps the allocation)
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// No active elements (drives loop termination)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of active elements
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Active ids in order
    #[must_use]
    pub fn as_slice(&self) -> &[VertexId] {
        &self.data
    }
}

/// Input/output frontier pair swapped after every operator
#[derive(Debug, Clone, Default)]
pub struct FrontierPair {
    input: Frontier,
    output: Frontier,
}

impl FrontierPair {
    /// Two empty frontiers of the given kind
    #[must_use]
    pub const fn new(kind: FrontierKind) -> Self {
        Self {
            input: Frontier::new(kind),
            output: Frontier::new(kind),
        }
    }

    /// Frontier the next operator reads
    #[must_use]
    pub const fn input(&self) -> &Frontier {
        &self.input
    }

    /// Mutable input frontier (seeding, reseeding)
    pub fn input_mut(&mut self) -> &mut Frontier {
        &mut self.input
    }

    /// Borrow input for reading and output for writing at once
    pub fn split(&mut self) -> (&Frontier, &mut Frontier) {
        (&self.input, &mut self.output)
    }

    /// Make the output the next input
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.input, &mut self.output);
        self.output.clear();
    }
}
