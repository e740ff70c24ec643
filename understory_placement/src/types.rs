// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for placement: orientations, preferences, pointer geometry, and results.

use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use kurbo::{Rect, Size};

use crate::error::PlacementError;

/// The side of the target a popup is placed on.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Orientation {
    /// Above the target.
    Top,
    /// To the right of the target.
    Right,
    /// Below the target.
    Bottom,
    /// To the left of the target.
    Left,
}

impl Orientation {
    /// All orientations in the order tried by [`Preference::Auto`].
    pub const ALL: [Self; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    /// Lowercase name, also used as the state class a host toggles on the popup.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
        }
    }

    /// True for [`Top`](Self::Top) and [`Bottom`](Self::Bottom), where the popup
    /// slides horizontally and the pointer offset is horizontal.
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    pub(crate) const fn flag(self) -> OrientationSet {
        match self {
            Self::Top => OrientationSet::TOP,
            Self::Right => OrientationSet::RIGHT,
            Self::Bottom => OrientationSet::BOTTOM,
            Self::Left => OrientationSet::LEFT,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Orientation {
    type Err = PlacementError;

    /// Parses `top`, `right`, `bottom` or `left`, ignoring ASCII case and
    /// surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        Self::ALL
            .into_iter()
            .find(|o| o.as_str().eq_ignore_ascii_case(token))
            .ok_or_else(|| PlacementError::UnknownOrientation(token.into()))
    }
}

bitflags::bitflags! {
    /// Set of orientations, used to evaluate each side at most once per pass.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub(crate) struct OrientationSet: u8 {
        const TOP    = 0b0001;
        const RIGHT  = 0b0010;
        const BOTTOM = 0b0100;
        const LEFT   = 0b1000;
    }
}

/// Which orientations to try, and how.
///
/// ## Semantics
///
/// - [`Auto`](Self::Auto) evaluates all four orientations in the order of
///   [`Orientation::ALL`] and ranks them.
/// - [`Ordered`](Self::Ordered) evaluates the listed orientations in order and
///   stops at the first one that fits without clamping. If none fits, the
///   evaluated candidates are ranked as for `Auto`.
///   Repeated entries are evaluated once; an empty list behaves as `Auto`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Preference {
    /// Try every side and pick the one with the most room.
    #[default]
    Auto,
    /// Try the listed sides in order.
    Ordered(Vec<Orientation>),
}

impl Preference {
    /// A preference forcing a single side.
    pub fn only(orientation: Orientation) -> Self {
        Self::Ordered(alloc::vec![orientation])
    }

    /// Builds a preference from textual tokens.
    ///
    /// A lone `auto` token yields [`Preference::Auto`]. Every other token must
    /// name an orientation; the first one that does not fails with
    /// [`PlacementError::UnknownOrientation`].
    ///
    /// ```
    /// use understory_placement::{Orientation, PlacementError, Preference};
    ///
    /// let p = Preference::from_tokens(["left", "top"]).unwrap();
    /// assert_eq!(p, Preference::Ordered(vec![Orientation::Left, Orientation::Top]));
    ///
    /// let err = Preference::from_tokens(["top", "diagonal"]).unwrap_err();
    /// assert_eq!(err, PlacementError::UnknownOrientation("diagonal".into()));
    /// ```
    pub fn from_tokens<'a, I>(tokens: I) -> Result<Self, PlacementError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut out = Vec::new();
        let mut auto = false;
        for token in tokens {
            if token.trim().eq_ignore_ascii_case("auto") {
                auto = true;
                continue;
            }
            out.push(token.parse::<Orientation>()?);
        }
        if auto && !out.is_empty() {
            // `auto` only makes sense on its own.
            return Err(PlacementError::UnknownOrientation("auto".into()));
        }
        Ok(if auto { Self::Auto } else { Self::Ordered(out) })
    }

    /// The first orientation to evaluate and the ones after it.
    pub(crate) fn split_first(&self) -> (Orientation, &[Orientation]) {
        match self {
            Self::Ordered(list) => match list.split_first() {
                Some((&first, rest)) => (first, rest),
                None => (Orientation::Top, &Orientation::ALL[1..]),
            },
            Self::Auto => (Orientation::Top, &Orientation::ALL[1..]),
        }
    }

    pub(crate) fn stops_at_first_fit(&self) -> bool {
        matches!(self, Self::Ordered(list) if !list.is_empty())
    }
}

impl FromStr for Preference {
    type Err = PlacementError;

    /// Parses a comma and/or whitespace separated list, e.g. `"left, top"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tokens(
            s.split(|c: char| c == ',' || c.is_whitespace())
                .filter(|t| !t.is_empty()),
        )
    }
}

/// Size of the pointer (caret) drawn for each orientation.
///
/// Hosts measure this once per popup instance; it is assumed constant across layouts.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PointerGeometry {
    /// Pointer shown when the popup is above the target.
    pub top: Size,
    /// Pointer shown when the popup is right of the target.
    pub right: Size,
    /// Pointer shown when the popup is below the target.
    pub bottom: Size,
    /// Pointer shown when the popup is left of the target.
    pub left: Size,
}

impl PointerGeometry {
    /// The same pointer size for every orientation.
    pub const fn uniform(size: Size) -> Self {
        Self {
            top: size,
            right: size,
            bottom: size,
            left: size,
        }
    }

    /// A pointer of `base` x `depth` pointing away from the popup on each side:
    /// `base` wide and `depth` tall for top/bottom, transposed for left/right.
    pub const fn caret(base: f64, depth: f64) -> Self {
        let vertical = Size::new(base, depth);
        let horizontal = Size::new(depth, base);
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    /// Pointer size for `orientation`.
    pub const fn get(&self, orientation: Orientation) -> Size {
        match orientation {
            Orientation::Top => self.top,
            Orientation::Right => self.right,
            Orientation::Bottom => self.bottom,
            Orientation::Left => self.left,
        }
    }
}

/// Fit metrics for one orientation.
///
/// Deltas are signed slack (negative means overflow); moves are the lateral
/// corrections that keep a centered popup inside the bounds.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Candidate {
    /// The side evaluated.
    pub orientation: Orientation,
    /// Free area on that side, used for ranking.
    pub area: f64,
    /// Available width minus popup width.
    pub delta_width: f64,
    /// Available height minus popup height.
    pub delta_height: f64,
    /// Horizontal correction (top/bottom only).
    pub move_x: f64,
    /// Vertical correction (left/right only).
    pub move_y: f64,
}

impl Candidate {
    /// True if the popup fits on this side without clamping.
    pub fn fits(&self) -> bool {
        self.delta_width >= 0.0 && self.delta_height >= 0.0
    }

    /// Sum of the negative parts of both deltas.
    pub fn overflow(&self) -> f64 {
        (-self.delta_width).max(0.0) + (-self.delta_height).max(0.0)
    }
}

/// Offset of the pointer inside the popup box, on the axis the popup slides along.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PointerOffset {
    /// Distance from the popup's left edge (top/bottom orientations).
    Left(f64),
    /// Distance from the popup's top edge (left/right orientations).
    Top(f64),
}

impl PointerOffset {
    /// The offset, whichever axis it is on.
    pub const fn value(self) -> f64 {
        match self {
            Self::Left(v) | Self::Top(v) => v,
        }
    }
}

/// Vertical anchoring for a positioned popup.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum VerticalEdge {
    /// Distance from the container's top edge to the popup's top edge.
    Top(f64),
    /// Distance from the container's bottom edge to the popup's bottom edge.
    Bottom(f64),
}

/// Popup position expressed relative to a positioning container.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoxPosition {
    /// Distance from the container's left edge to the popup's left edge.
    pub left: f64,
    /// Vertical anchoring; popups above their target are anchored by the bottom edge
    /// so that later content growth extends away from the target.
    pub vertical: VerticalEdge,
}

/// Outcome of a layout pass.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutResult {
    /// The chosen candidate, recomputed after any clamping.
    pub candidate: Candidate,
    /// Final popup box in the coordinate space of the inputs, with a whole-pixel origin.
    pub popup: Rect,
    /// Popup size after limiting, if it was limited.
    pub clamped: Option<Size>,
    /// Pointer placement inside the popup.
    pub pointer: PointerOffset,
}

impl LayoutResult {
    /// The selected orientation.
    pub fn orientation(&self) -> Orientation {
        self.candidate.orientation
    }

    /// Position of the popup relative to `container`.
    ///
    /// ```
    /// use kurbo::{Rect, Size};
    /// use understory_placement::{LayoutInput, VerticalEdge, compute_layout};
    ///
    /// let viewport = Rect::new(0.0, 0.0, 1024.0, 768.0);
    /// let input = LayoutInput::new(
    ///     Rect::new(500.0, 300.0, 540.0, 320.0),
    ///     viewport,
    ///     Size::new(200.0, 100.0),
    /// );
    /// let result = compute_layout(&input).unwrap();
    /// let pos = result.position(viewport);
    /// assert_eq!(pos.left, 420.0);
    /// assert_eq!(pos.vertical, VerticalEdge::Top(330.0));
    /// ```
    pub fn position(&self, container: Rect) -> BoxPosition {
        let vertical = match self.orientation() {
            Orientation::Top => VerticalEdge::Bottom(container.y1 - self.popup.y1),
            _ => VerticalEdge::Top(self.popup.y0 - container.y0),
        };
        BoxPosition {
            left: self.popup.x0 - container.x0,
            vertical,
        }
    }
}
