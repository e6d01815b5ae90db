// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sources of node identifiers.

use uuid::Uuid;

use crate::types::NodeId;

/// Produces a fresh identifier for every node a tree creates.
///
/// Implemented for closures, so a test can plug in `|| NodeId::from_uuid(..)`.
pub trait IdSource {
    /// The next identifier. Must not repeat within one tree.
    fn next_id(&mut self) -> NodeId;
}

impl<F: FnMut() -> NodeId> IdSource for F {
    fn next_id(&mut self) -> NodeId {
        self()
    }
}

/// Numbers nodes `0, 1, 2, ...` in creation order.
///
/// Deterministic, which makes tree layouts easy to compare across runs.
#[derive(Clone, Debug, Default)]
pub struct SequentialIds {
    next: u128,
}

impl SequentialIds {
    /// Start numbering at 0.
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    /// Start numbering at `first`.
    pub const fn starting_at(first: u128) -> Self {
        Self { next: first }
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> NodeId {
        let id = NodeId::from_uuid(Uuid::from_u128(self.next));
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// Random version 4 UUIDs.
#[cfg(feature = "random_ids")]
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomIds;

#[cfg(feature = "random_ids")]
impl IdSource for RandomIds {
    fn next_id(&mut self) -> NodeId {
        NodeId::from_uuid(Uuid::new_v4())
    }
}

/// The identifier source trees use unless told otherwise.
#[cfg(feature = "random_ids")]
pub type DefaultIds = RandomIds;

/// The identifier source trees use unless told otherwise.
#[cfg(not(feature = "random_ids"))]
pub type DefaultIds = SequentialIds;
