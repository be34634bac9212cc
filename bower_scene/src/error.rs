// Copyright 2025 the Bower Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors returned by structural edits.

use crate::types::NodeId;

/// Why a structural edit (spawn, attach, detach) was refused.
///
/// A refused edit leaves the scene unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// The id refers to a destroyed node.
    #[error("node {0:?} is not live")]
    StaleNode(NodeId),
    /// The child already has an owner; detach it first.
    #[error("node {child:?} is already owned by {owner:?}")]
    AlreadyAttached {
        /// The node being attached.
        child: NodeId,
        /// Its current owner.
        owner: NodeId,
    },
    /// The child is the parent itself or one of its ancestors.
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    WouldCycle {
        /// The requested owner.
        parent: NodeId,
        /// The node being attached.
        child: NodeId,
    },
    /// The child is not owned by the given parent.
    #[error("node {child:?} is not a child of {parent:?}")]
    NotAChild {
        /// The supposed owner.
        parent: NodeId,
        /// The node being detached.
        child: NodeId,
    },
}
