// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stateful popup host: configuration, target tracking, and cached pointer geometry.
//!
//! ## Usage
//!
//! 1) Implement [`Surface`] for your rendering backend. It measures the viewport,
//!    an optional positioning container, anchor elements, the popup box, and the
//!    pointer graphics.
//! 2) Call [`Popup::show`] with an [`Anchor`]; apply the returned [`Placement`].
//! 3) Forward viewport resizes to [`Popup::resize`] (debounce them yourself) and
//!    call [`Popup::layout`] whenever the content changes.
//! 4) Call [`Popup::hide`] when done.
//!
//! ## Containers
//!
//! If the surface reports a container and limiting is enabled, the popup is kept
//! inside the container; otherwise it is kept inside the viewport. Positions are
//! always reported relative to the container when there is one.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Rect, Size};
//! use understory_placement::{Anchor, Orientation, PointerGeometry, Popup, PopupConfig, Surface};
//!
//! struct Screen;
//! impl Surface<()> for Screen {
//!     fn viewport(&self) -> Rect { Rect::new(0.0, 0.0, 800.0, 600.0) }
//!     fn measure(&self, _element: &()) -> Option<Rect> { None }
//!     fn popup_size(&self) -> Size { Size::new(120.0, 40.0) }
//!     fn measure_pointers(&mut self) -> PointerGeometry { PointerGeometry::caret(16.0, 8.0) }
//! }
//!
//! let mut popup: Popup<()> = Popup::new(PopupConfig::default());
//! let placed = popup.show(Anchor::Point(Point::new(400.0, 20.0)), &mut Screen).unwrap();
//! assert_eq!(placed.result.orientation(), Orientation::Bottom);
//! assert_eq!(popup.orientation(), Some(Orientation::Bottom));
//! ```

use core::marker::PhantomData;

use kurbo::{Insets, Point, Rect, Size};

use crate::engine::{
    DEFAULT_MARGIN, DEFAULT_POINTER_DISTANCE, DEFAULT_POINTER_EDGE_DISTANCE, LayoutInput, Reflow,
    compute_layout_with,
};
use crate::error::PlacementError;
use crate::types::{BoxPosition, LayoutResult, Orientation, PointerGeometry, Preference};

/// What a popup points at.
#[derive(Clone, Debug, PartialEq)]
pub enum Anchor<E> {
    /// An element, re-measured through [`Surface::measure`] on every layout.
    Element(E),
    /// A fixed point, e.g. where a pointer or touch event happened.
    Point(Point),
}

/// Measurement provider for a popup host.
///
/// All rectangles are in one coordinate space, typically viewport pixels.
pub trait Surface<E> {
    /// The visible area.
    fn viewport(&self) -> Rect;

    /// The element the popup is positioned in, if not the viewport itself.
    fn container(&self) -> Option<Rect> {
        None
    }

    /// Current bounds of `element`, or `None` if it is no longer laid out.
    fn measure(&self, element: &E) -> Option<Rect>;

    /// Natural size of the popup box with its current content.
    fn popup_size(&self) -> Size;

    /// Pointer sizes per orientation. Called once per [`Popup`].
    fn measure_pointers(&mut self) -> PointerGeometry;

    /// Height of the popup when its width is limited to `width`.
    fn height_for_width(&mut self, width: f64, previous: Size) -> f64 {
        let _ = width;
        previous.height
    }
}

/// Routes engine reflow requests to the surface.
struct SurfaceReflow<'a, E, S: ?Sized> {
    surface: &'a mut S,
    _element: PhantomData<fn(&E)>,
}

impl<E, S: Surface<E> + ?Sized> Reflow for SurfaceReflow<'_, E, S> {
    fn height_for_width(&mut self, width: f64, previous: Size) -> f64 {
        self.surface.height_for_width(width, previous)
    }
}

/// Popup behavior settings.
#[derive(Clone, Debug, PartialEq)]
pub struct PopupConfig {
    /// Which sides to try.
    pub preference: Preference,
    /// Minimum distance from each bounds edge.
    pub margins: Insets,
    /// Gap between the target and the popup.
    pub pointer_distance: f64,
    /// Minimum distance between the pointer and the popup's corners.
    pub pointer_edge_distance: f64,
    /// Shrink the popup to fit instead of letting it overflow.
    pub limit_layout: bool,
    /// Re-lay out on [`Popup::resize`].
    pub resize: bool,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            preference: Preference::Auto,
            margins: Insets::uniform(DEFAULT_MARGIN),
            pointer_distance: DEFAULT_POINTER_DISTANCE,
            pointer_edge_distance: DEFAULT_POINTER_EDGE_DISTANCE,
            limit_layout: true,
            resize: true,
        }
    }
}

impl PopupConfig {
    /// Set the orientation preference.
    #[must_use]
    pub fn preference(mut self, preference: Preference) -> Self {
        self.preference = preference;
        self
    }

    /// Set the margins.
    #[must_use]
    pub fn margins(mut self, margins: Insets) -> Self {
        self.margins = margins;
        self
    }

    /// Set the target-to-popup gap.
    #[must_use]
    pub fn pointer_distance(mut self, distance: f64) -> Self {
        self.pointer_distance = distance;
        self
    }

    /// Set the minimum pointer distance from the popup corners.
    #[must_use]
    pub fn pointer_edge_distance(mut self, distance: f64) -> Self {
        self.pointer_edge_distance = distance;
        self
    }

    /// Enable or disable limiting.
    #[must_use]
    pub fn limit_layout(mut self, limit: bool) -> Self {
        self.limit_layout = limit;
        self
    }

    /// Enable or disable re-layout on resize.
    #[must_use]
    pub fn resize(mut self, resize: bool) -> Self {
        self.resize = resize;
        self
    }
}

/// A laid out popup, ready to apply.
#[derive(Clone, Debug, PartialEq)]
pub struct Placement {
    /// Engine output in surface coordinates.
    pub result: LayoutResult,
    /// Position relative to the container (or the viewport when there is none).
    pub position: BoxPosition,
}

/// A single popup instance.
///
/// Instances share nothing; each measures and caches its own pointer geometry.
#[derive(Clone, Debug)]
pub struct Popup<E> {
    config: PopupConfig,
    // Configuration for the current showing; reset to `config` on hide.
    active: PopupConfig,
    target: Option<Anchor<E>>,
    visible: bool,
    pointers: Option<PointerGeometry>,
    orientation: Option<Orientation>,
}

impl<E> Default for Popup<E> {
    fn default() -> Self {
        Self::new(PopupConfig::default())
    }
}

impl<E> Popup<E> {
    /// Create a hidden popup.
    pub fn new(config: PopupConfig) -> Self {
        Self {
            active: config.clone(),
            config,
            target: None,
            visible: false,
            pointers: None,
            orientation: None,
        }
    }

    /// Instance configuration.
    pub fn config(&self) -> &PopupConfig {
        &self.config
    }

    /// Replace the instance configuration.
    ///
    /// Takes effect immediately: the next [`layout`](Self::layout) or
    /// [`resize`](Self::resize) of a visible popup uses it, overriding any
    /// [`show_with`](Self::show_with) settings.
    pub fn configure(&mut self, config: PopupConfig) {
        self.active = config.clone();
        self.config = config;
    }

    /// True between [`show`](Self::show) and [`hide`](Self::hide).
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Orientation chosen by the last successful layout while visible.
    pub fn orientation(&self) -> Option<Orientation> {
        self.orientation
    }

    /// Cached pointer geometry, once measured.
    pub fn pointer_geometry(&self) -> Option<PointerGeometry> {
        self.pointers
    }

    /// Current target.
    pub fn target(&self) -> Option<&Anchor<E>> {
        self.target.as_ref()
    }

    /// Show the popup at `anchor` with the instance configuration and lay it out.
    ///
    /// Showing an already visible popup moves it to the new anchor. If layout
    /// fails the popup is hidden again.
    pub fn show<S: Surface<E> + ?Sized>(
        &mut self,
        anchor: Anchor<E>,
        surface: &mut S,
    ) -> Result<Placement, PlacementError> {
        if !self.visible {
            self.active = self.config.clone();
        }
        self.open(anchor, surface)
    }

    /// Like [`show`](Self::show), overriding the configuration for this showing only.
    pub fn show_with<S: Surface<E> + ?Sized>(
        &mut self,
        anchor: Anchor<E>,
        config: PopupConfig,
        surface: &mut S,
    ) -> Result<Placement, PlacementError> {
        self.active = config;
        self.open(anchor, surface)
    }

    fn open<S: Surface<E> + ?Sized>(
        &mut self,
        anchor: Anchor<E>,
        surface: &mut S,
    ) -> Result<Placement, PlacementError> {
        self.target = Some(anchor);
        self.visible = true;
        tracing::trace!("showing popup");
        self.layout(surface)
    }

    /// Hide the popup, dropping its target. Returns whether it was visible.
    pub fn hide(&mut self) -> bool {
        let was_visible = core::mem::replace(&mut self.visible, false);
        self.target = None;
        self.orientation = None;
        self.active = self.config.clone();
        if was_visible {
            tracing::trace!("hid popup");
        }
        was_visible
    }

    /// Re-lay out after a viewport resize.
    ///
    /// Returns `Ok(None)` when hidden or when resize handling is disabled.
    pub fn resize<S: Surface<E> + ?Sized>(
        &mut self,
        surface: &mut S,
    ) -> Result<Option<Placement>, PlacementError> {
        if !self.visible || !self.active.resize {
            return Ok(None);
        }
        self.layout(surface).map(Some)
    }

    /// Measure everything and lay out against the current target.
    ///
    /// Fails with [`PlacementError::MissingTarget`] when there is no target or the
    /// target element can no longer be measured. A failed layout hides the popup.
    pub fn layout<S: Surface<E> + ?Sized>(
        &mut self,
        surface: &mut S,
    ) -> Result<Placement, PlacementError> {
        let placed = self.try_layout(surface);
        if placed.is_err() {
            self.hide();
        }
        placed
    }

    fn try_layout<S: Surface<E> + ?Sized>(
        &mut self,
        surface: &mut S,
    ) -> Result<Placement, PlacementError> {
        let target = match &self.target {
            Some(Anchor::Element(element)) => surface.measure(element),
            Some(Anchor::Point(p)) => Some(Rect::from_origin_size(*p, Size::ZERO)),
            None => None,
        }
        .ok_or(PlacementError::MissingTarget)?;

        let pointers = *self
            .pointers
            .get_or_insert_with(|| surface.measure_pointers());
        let viewport = surface.viewport();
        let container = surface.container();
        let bounds = match container {
            Some(c) if self.active.limit_layout => c,
            _ => viewport,
        };

        let input = LayoutInput {
            target: Some(target),
            bounds,
            popup: surface.popup_size(),
            margins: self.active.margins,
            pointers,
            preference: self.active.preference.clone(),
            pointer_distance: self.active.pointer_distance,
            pointer_edge_distance: self.active.pointer_edge_distance,
            limit_layout: self.active.limit_layout,
        };
        let mut reflow = SurfaceReflow {
            surface,
            _element: PhantomData,
        };
        let result = compute_layout_with(&input, &mut reflow)?;

        self.orientation = Some(result.orientation());
        let position = result.position(container.unwrap_or(viewport));
        Ok(Placement { result, position })
    }
}
