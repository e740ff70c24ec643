// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported for malformed placement requests.
//!
//! Overflow is never an error: a popup that fits nowhere is clamped or allowed
//! to overflow. These variants signal caller bugs.

use alloc::string::String;

/// A placement request that cannot be laid out.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    /// Layout was requested without a target to anchor to.
    #[error("cannot lay out a popup without a target")]
    MissingTarget,
    /// A preference token did not name an orientation.
    #[error("unknown orientation `{0}`")]
    UnknownOrientation(String),
}
