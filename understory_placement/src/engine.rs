// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement engine: rank the sides of a target and place a popup on the best one.
//!
//! ## Overview
//!
//! A pass is a pure function of a [`LayoutInput`]. Nothing carries over between
//! calls, so calling [`compute_layout`] twice with the same input yields the same
//! [`LayoutResult`].
//!
//! ## Measurements
//!
//! All math runs relative to the bounds origin. For each side the engine knows:
//!
//! - the free space between the target (plus the pointer distance) and the
//!   bounds edge (minus its margin);
//! - the usable extent of the bounds on the cross axis, i.e. the bounds size
//!   minus both margins.
//!
//! ## Selection
//!
//! - Every evaluated side produces a [`Candidate`].
//! - With an ordered [`Preference`], evaluation stops at the first side that fits.
//! - Candidates rank by overflow (least first), then by free area (most first),
//!   then by evaluation order.
//!
//! ## Limiting
//!
//! When [`LayoutInput::limit_layout`] is set and the winner does not fit, the
//! popup width and then height are clamped to the space available on the chosen
//! side. Clamping the width may change the height of wrapped content; a
//! [`Reflow`] provider reports the new height.

use core::cmp::Ordering;

use kurbo::{Insets, Point, Rect, Size, Vec2};

use crate::error::PlacementError;
use crate::types::{
    Candidate, LayoutResult, Orientation, PointerGeometry, PointerOffset, Preference,
};

/// Default minimum distance from each bounds edge.
pub const DEFAULT_MARGIN: f64 = 10.0;
/// Default gap between the target and the popup.
pub const DEFAULT_POINTER_DISTANCE: f64 = 10.0;
/// Default minimum distance between the pointer and the popup's corners.
pub const DEFAULT_POINTER_EDGE_DISTANCE: f64 = 15.0;

/// Everything a layout pass needs, measured fresh by the caller.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutInput {
    /// Anchor rectangle. A point anchor is a zero-sized rectangle.
    pub target: Option<Rect>,
    /// Viewport or containing rectangle the popup must stay inside.
    pub bounds: Rect,
    /// Measured popup size before any limiting.
    pub popup: Size,
    /// Minimum distance from each bounds edge.
    pub margins: Insets,
    /// Pointer sizes per orientation.
    pub pointers: PointerGeometry,
    /// Which sides to try.
    pub preference: Preference,
    /// Gap kept between the target edge and the popup edge.
    pub pointer_distance: f64,
    /// Minimum distance between the pointer and either end of the popup edge.
    pub pointer_edge_distance: f64,
    /// Shrink the popup to the available space instead of letting it overflow.
    pub limit_layout: bool,
}

impl LayoutInput {
    /// Input with default margins, distances, no pointer, [`Preference::Auto`],
    /// and limiting enabled.
    pub fn new(target: Rect, bounds: Rect, popup: Size) -> Self {
        Self {
            target: Some(target),
            bounds,
            popup,
            margins: Insets::uniform(DEFAULT_MARGIN),
            pointers: PointerGeometry::default(),
            preference: Preference::Auto,
            pointer_distance: DEFAULT_POINTER_DISTANCE,
            pointer_edge_distance: DEFAULT_POINTER_EDGE_DISTANCE,
            limit_layout: true,
        }
    }

    /// Set the margins.
    #[must_use]
    pub fn with_margins(mut self, margins: Insets) -> Self {
        self.margins = margins;
        self
    }

    /// Set the pointer geometry.
    #[must_use]
    pub fn with_pointers(mut self, pointers: PointerGeometry) -> Self {
        self.pointers = pointers;
        self
    }

    /// Set the orientation preference.
    #[must_use]
    pub fn with_preference(mut self, preference: Preference) -> Self {
        self.preference = preference;
        self
    }

    /// Set the target-to-popup gap.
    #[must_use]
    pub fn with_pointer_distance(mut self, distance: f64) -> Self {
        self.pointer_distance = distance;
        self
    }

    /// Set the minimum pointer distance from the popup corners.
    #[must_use]
    pub fn with_pointer_edge_distance(mut self, distance: f64) -> Self {
        self.pointer_edge_distance = distance;
        self
    }

    /// Enable or disable limiting.
    #[must_use]
    pub fn with_limit_layout(mut self, limit: bool) -> Self {
        self.limit_layout = limit;
        self
    }
}

/// Re-measures popup height after its width has been limited.
///
/// Wrapped content usually grows taller when narrowed; hosts that can reflow
/// report the new height here. Closures `FnMut(f64) -> f64` taking the new width
/// implement this trait.
pub trait Reflow {
    /// Height of the popup when laid out at `width`. `previous` is the size before limiting.
    fn height_for_width(&mut self, width: f64, previous: Size) -> f64;
}

/// A reflow provider that keeps the previous height.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoReflow;

impl Reflow for NoReflow {
    #[inline]
    fn height_for_width(&mut self, _width: f64, previous: Size) -> f64 {
        previous.height
    }
}

impl<F: FnMut(f64) -> f64> Reflow for F {
    #[inline]
    fn height_for_width(&mut self, width: f64, _previous: Size) -> f64 {
        self(width)
    }
}

/// Lay out a popup whose height does not depend on its width.
///
/// See [`compute_layout_with`].
pub fn compute_layout(input: &LayoutInput) -> Result<LayoutResult, PlacementError> {
    compute_layout_with(input, &mut NoReflow)
}

/// Lay out a popup, re-measuring its height through `reflow` if its width is limited.
///
/// Fails with [`PlacementError::MissingTarget`] when `input.target` is `None`.
/// Running out of space is not an error: the popup is limited or overflows.
///
/// ```
/// use kurbo::{Rect, Size};
/// use understory_placement::{LayoutInput, Orientation, compute_layout};
///
/// // A target pinned to the bottom of the viewport gets its popup above.
/// let input = LayoutInput::new(
///     Rect::new(500.0, 760.0, 540.0, 768.0),
///     Rect::new(0.0, 0.0, 1024.0, 768.0),
///     Size::new(200.0, 100.0),
/// );
/// let result = compute_layout(&input).unwrap();
/// assert_eq!(result.orientation(), Orientation::Top);
/// assert_eq!(result.popup.y1, 750.0);
/// ```
pub fn compute_layout_with<R: Reflow + ?Sized>(
    input: &LayoutInput,
    reflow: &mut R,
) -> Result<LayoutResult, PlacementError> {
    let target = input.target.ok_or(PlacementError::MissingTarget)?;
    let mut m = Measurements::new(input, target);

    let mut best = select(&m, &input.preference);
    tracing::debug!(
        orientation = %best.orientation,
        fits = best.fits(),
        "selected popup orientation"
    );

    let mut clamped = false;
    if best.delta_width < 0.0 && input.limit_layout {
        let width = m.available_width(best.orientation).max(0.0);
        let height = reflow.height_for_width(width, m.popup);
        tracing::debug!(from = m.popup.width, to = width, height, "limiting popup width");
        m.popup = Size::new(width, height);
        best = m.candidate(best.orientation);
        clamped = true;
    }
    if best.delta_height < 0.0 && input.limit_layout {
        let height = m.available_height(best.orientation).max(0.0);
        tracing::debug!(from = m.popup.height, to = height, "limiting popup height");
        m.popup.height = height;
        best = m.candidate(best.orientation);
        clamped = true;
    }

    let (popup, pointer) = m.place(&best, input.bounds.origin().to_vec2());
    Ok(LayoutResult {
        candidate: best,
        popup,
        clamped: clamped.then_some(m.popup),
        pointer,
    })
}

/// Evaluate the preferred sides and return the best-ranked candidate.
fn select(m: &Measurements, preference: &Preference) -> Candidate {
    let (first, rest) = preference.split_first();
    let stop_at_fit = preference.stops_at_first_fit();

    let mut seen = first.flag();
    let mut best = m.candidate(first);
    trace_candidate(&best);
    if stop_at_fit && best.fits() {
        return best;
    }

    for &o in rest {
        if seen.contains(o.flag()) {
            continue;
        }
        seen |= o.flag();
        let c = m.candidate(o);
        trace_candidate(&c);
        // Strictly better only, so earlier candidates win ties.
        if rank(&c, &best) == Ordering::Less {
            best = c;
        }
        if stop_at_fit && c.fits() {
            // Everything evaluated before overflowed, so `c` already ranks first.
            break;
        }
    }
    best
}

/// Ranking: least overflow first, then most free area.
fn rank(a: &Candidate, b: &Candidate) -> Ordering {
    a.overflow()
        .partial_cmp(&b.overflow())
        .unwrap_or(Ordering::Equal)
        .then_with(|| b.area.partial_cmp(&a.area).unwrap_or(Ordering::Equal))
}

fn trace_candidate(c: &Candidate) {
    tracing::trace!(
        orientation = %c.orientation,
        area = c.area,
        delta_width = c.delta_width,
        delta_height = c.delta_height,
        move_x = c.move_x,
        move_y = c.move_y,
        "evaluated popup candidate"
    );
}

/// Free space on each side of the target.
#[derive(Copy, Clone, Debug)]
struct Sides {
    top: f64,
    right: f64,
    bottom: f64,
    left: f64,
}

impl Sides {
    fn get(&self, o: Orientation) -> f64 {
        match o {
            Orientation::Top => self.top,
            Orientation::Right => self.right,
            Orientation::Bottom => self.bottom,
            Orientation::Left => self.left,
        }
    }
}

/// Per-pass measurements, relative to the bounds origin.
#[derive(Clone, Debug)]
struct Measurements {
    target: Rect,
    usable: Size,
    margins: Insets,
    free: Sides,
    pointers: PointerGeometry,
    pointer_distance: f64,
    pointer_edge_distance: f64,
    popup: Size,
}

impl Measurements {
    fn new(input: &LayoutInput, target: Rect) -> Self {
        let bounds = input.bounds.size();
        let target = target - input.bounds.origin().to_vec2();
        let m = input.margins;
        let pd = input.pointer_distance;
        Self {
            target,
            usable: Size::new(bounds.width - m.x0 - m.x1, bounds.height - m.y0 - m.y1),
            margins: m,
            free: Sides {
                top: target.y0 - pd - m.y0,
                right: bounds.width - target.x1 - pd - m.x1,
                bottom: bounds.height - target.y1 - pd - m.y1,
                left: target.x0 - pd - m.x0,
            },
            pointers: input.pointers,
            pointer_distance: pd,
            pointer_edge_distance: input.pointer_edge_distance,
            popup: input.popup,
        }
    }

    fn candidate(&self, o: Orientation) -> Candidate {
        let free = self.free.get(o);
        let pointer = self.pointers.get(o);
        let center = self.target.center();
        if o.is_vertical() {
            Candidate {
                orientation: o,
                area: free * self.usable.width,
                delta_width: self.usable.width - self.popup.width,
                delta_height: free - self.popup.height - pointer.height,
                move_x: lateral_move(
                    self.usable.width,
                    self.popup.width,
                    center.x,
                    self.margins.x0,
                ),
                move_y: 0.0,
            }
        } else {
            Candidate {
                orientation: o,
                area: free * self.usable.height,
                delta_width: free - self.popup.width - pointer.width,
                delta_height: self.usable.height - self.popup.height,
                move_x: 0.0,
                move_y: lateral_move(
                    self.usable.height,
                    self.popup.height,
                    center.y,
                    self.margins.y0,
                ),
            }
        }
    }

    /// Widest the popup may be on side `o`.
    fn available_width(&self, o: Orientation) -> f64 {
        match o {
            Orientation::Top | Orientation::Bottom => self.usable.width,
            Orientation::Left | Orientation::Right => self.free.get(o) - self.pointers.get(o).width,
        }
    }

    /// Tallest the popup may be on side `o`.
    fn available_height(&self, o: Orientation) -> f64 {
        match o {
            Orientation::Left | Orientation::Right => self.usable.height,
            Orientation::Top | Orientation::Bottom => {
                self.free.get(o) - self.pointers.get(o).height
            }
        }
    }

    /// Final popup box (translated back by `origin`) and pointer offset for `c`.
    fn place(&self, c: &Candidate, origin: Vec2) -> (Rect, PointerOffset) {
        let Size { width, height } = self.popup;
        let pointer = self.pointers.get(c.orientation);
        let center = self.target.center();
        let pd = self.pointer_distance;

        // The corner on the attachment edge is rounded so that edge lands on a whole pixel.
        let popup = match c.orientation {
            Orientation::Top => {
                let corner = (Point::new(center.x - width / 2.0 + c.move_x, self.target.y0 - pd)
                    + origin)
                    .round();
                Rect::new(corner.x, corner.y - height, corner.x + width, corner.y)
            }
            Orientation::Bottom => {
                let corner = (Point::new(center.x - width / 2.0 + c.move_x, self.target.y1 + pd)
                    + origin)
                    .round();
                Rect::from_origin_size(corner, self.popup)
            }
            Orientation::Left => {
                let corner = (Point::new(self.target.x0 - pd, center.y - height / 2.0 + c.move_y)
                    + origin)
                    .round();
                Rect::new(corner.x - width, corner.y, corner.x, corner.y + height)
            }
            Orientation::Right => {
                let corner = (Point::new(self.target.x1 + pd, center.y - height / 2.0 + c.move_y)
                    + origin)
                    .round();
                Rect::from_origin_size(corner, self.popup)
            }
        };

        // The pointer aims at the target center, which sits at half the popup
        // extent minus the lateral correction.
        let edge = self.pointer_edge_distance;
        let offset = if c.orientation.is_vertical() {
            let raw = width / 2.0 - pointer.width / 2.0 - c.move_x;
            PointerOffset::Left(round_px(clamp_pointer(raw, width, pointer.width, edge)))
        } else {
            let raw = height / 2.0 - pointer.height / 2.0 - c.move_y;
            PointerOffset::Top(round_px(clamp_pointer(raw, height, pointer.height, edge)))
        };
        (popup, offset)
    }
}

/// Cross-axis correction that keeps a popup centered on `anchor` inside the
/// usable range `[margin, margin + usable]`.
///
/// A popup larger than the usable range is treated as exactly that large. The
/// result is negative when the popup would overflow the far edge, positive when
/// it would overflow the near edge, and zero otherwise.
fn lateral_move(usable: f64, extent: f64, anchor: f64, margin: f64) -> f64 {
    let half = extent.min(usable) / 2.0;
    let far = margin + usable - (anchor + half);
    if far < 0.0 {
        return far;
    }
    let near = anchor - half - margin;
    if near < 0.0 { -near } else { 0.0 }
}

/// Keep a pointer of `size` at least `edge` away from both ends of `extent`.
///
/// When both constraints cannot hold, the leading edge wins.
fn clamp_pointer(offset: f64, extent: f64, size: f64, edge: f64) -> f64 {
    if offset < edge {
        edge
    } else if offset + size > extent - edge {
        extent - edge - size
    } else {
        offset
    }
}

/// Round to the nearest whole pixel.
// Kurbo routes rounding through `std` or `libm`, whichever is enabled.
fn round_px(v: f64) -> f64 {
    Vec2::new(v, 0.0).round().x
}
