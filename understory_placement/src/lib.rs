// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_placement --heading-base-level=0

//! Understory Placement: a Kurbo-native placement engine for popups.
//!
//! Understory Placement decides where a floating box (popup, tooltip, callout) goes
//! relative to the element it points at.
//!
//! - Evaluates the four sides of a target against a bounding rectangle and margins.
//! - Picks the side that fits, preferring the one with the most free area, or follows
//!   a caller-supplied order of preferred sides.
//! - Slides the box along the target edge to keep it in bounds, and limits its size
//!   when nothing fits.
//! - Positions a pointer (caret) so it aims at the target without leaving the box.
//!
//! ## Layering
//!
//! The [`engine`] is a pure function: measure the target, bounds, and popup, call
//! [`compute_layout`], apply the [`LayoutResult`]. It never touches a rendering surface,
//! so it is easy to test with synthetic rectangles.
//!
//! The [`popup`] module adds a small stateful host on top: a [`Popup`] keeps its
//! configuration, target, visibility, and lazily measured pointer geometry, and pulls
//! fresh measurements from a [`Surface`] you implement for your toolkit.
//!
//! ## API overview
//!
//! - [`LayoutInput`] → [`compute_layout`] / [`compute_layout_with`] → [`LayoutResult`]
//! - [`Preference`]: [`Auto`](Preference::Auto) or an ordered list of [`Orientation`]s,
//!   parseable from text (`"left, top"`).
//! - [`PointerGeometry`]: pointer size per side.
//! - [`Reflow`]: report the new popup height after its width was limited.
//! - [`Popup`], [`PopupConfig`], [`Surface`], [`Anchor`], [`Placement`].
//! - [`PlacementError`]: missing target or unknown orientation token.
//!
//! ## Determinism
//!
//! A layout pass depends only on its inputs. Ties between equally good sides resolve in
//! evaluation order, and final pixel offsets are rounded to whole pixels.
//!
//! # Example
//!
//! ```rust
//! use kurbo::{Insets, Rect, Size};
//! use understory_placement::{LayoutInput, Orientation, Preference, compute_layout};
//!
//! let viewport = Rect::new(0.0, 0.0, 1024.0, 768.0);
//! let target = Rect::new(500.0, 300.0, 540.0, 320.0);
//!
//! // Plenty of room everywhere: the popup goes below, centered on the target.
//! let input = LayoutInput::new(target, viewport, Size::new(200.0, 100.0));
//! let result = compute_layout(&input).unwrap();
//! assert_eq!(result.orientation(), Orientation::Bottom);
//! assert_eq!(result.popup, Rect::new(420.0, 330.0, 620.0, 430.0));
//!
//! // Forcing the top side with a popup wider than the viewport limits its width.
//! let input = LayoutInput::new(target, viewport, Size::new(1200.0, 100.0))
//!     .with_margins(Insets::uniform(10.0))
//!     .with_preference("top".parse::<Preference>().unwrap());
//! let result = compute_layout(&input).unwrap();
//! assert_eq!(result.orientation(), Orientation::Top);
//! assert_eq!(result.popup.width(), 1004.0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`. Rounding needs either the `std` (default)
//! or the `libm` feature.

#![no_std]

extern crate alloc;

pub mod engine;
pub mod error;
pub mod popup;
pub mod types;

pub use engine::{
    DEFAULT_MARGIN, DEFAULT_POINTER_DISTANCE, DEFAULT_POINTER_EDGE_DISTANCE, LayoutInput,
    NoReflow, Reflow, compute_layout, compute_layout_with,
};
pub use error::PlacementError;
pub use popup::{Anchor, Placement, Popup, PopupConfig, Surface};
pub use types::{
    BoxPosition, Candidate, LayoutResult, Orientation, PointerGeometry, PointerOffset,
    Preference, VerticalEdge,
};
