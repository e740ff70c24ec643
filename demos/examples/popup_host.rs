// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Popup host over a toy document.
//!
//! Implements `Surface` for a fixed set of named elements, shows a popup on one of
//! them, then shrinks the viewport and re-lays out on resize.
//!
//! Run:
//! - `RUST_LOG=understory_placement=debug cargo run -p understory_placement_demos --example popup_host`

use kurbo::{Point, Rect, Size};
use tracing_subscriber::EnvFilter;
use understory_placement::{
    Anchor, Orientation, PointerGeometry, Popup, PopupConfig, Surface, VerticalEdge,
};

struct Document {
    viewport: Rect,
    elements: Vec<(&'static str, Rect)>,
    /// Content area of the popup; width changes rewrap it.
    content_area: f64,
    natural_width: f64,
}

impl Surface<&'static str> for Document {
    fn viewport(&self) -> Rect {
        self.viewport
    }

    fn measure(&self, element: &&'static str) -> Option<Rect> {
        self.elements
            .iter()
            .find(|(name, _)| name == element)
            .map(|(_, r)| *r)
    }

    fn popup_size(&self) -> Size {
        Size::new(self.natural_width, self.content_area / self.natural_width)
    }

    fn measure_pointers(&mut self) -> PointerGeometry {
        println!("  (measuring pointers)");
        PointerGeometry::caret(16.0, 8.0)
    }

    fn height_for_width(&mut self, width: f64, _previous: Size) -> f64 {
        self.content_area / width.max(1.0)
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut doc = Document {
        viewport: Rect::new(0.0, 0.0, 1280.0, 800.0),
        elements: vec![
            ("nav-link", Rect::new(40.0, 20.0, 160.0, 44.0)),
            ("footer-link", Rect::new(600.0, 770.0, 680.0, 790.0)),
        ],
        content_area: 480.0 * 120.0,
        natural_width: 480.0,
    };

    let mut popup: Popup<&'static str> = Popup::new(PopupConfig::default());

    let placed = popup.show(Anchor::Element("nav-link"), &mut doc).unwrap();
    println!("== Nav link ==\n  {:?}\n  {:?}", placed.result.orientation(), placed.position);
    assert_eq!(placed.result.orientation(), Orientation::Bottom);

    let placed = popup.show(Anchor::Element("footer-link"), &mut doc).unwrap();
    println!("== Footer link ==\n  {:?}\n  {:?}", placed.result.orientation(), placed.position);
    assert_eq!(placed.result.orientation(), Orientation::Top);
    assert!(matches!(placed.position.vertical, VerticalEdge::Bottom(_)));

    // A phone-sized viewport: the popup is narrowed and rewraps taller.
    doc.viewport = Rect::new(0.0, 0.0, 360.0, 800.0);
    doc.elements[1].1 = Rect::new(140.0, 770.0, 220.0, 790.0);
    let placed = popup.resize(&mut doc).unwrap().expect("visible popup re-lays out");
    println!(
        "== After resize ==\n  {:?} clamped to {:?}",
        placed.result.orientation(),
        placed.result.clamped
    );
    assert_eq!(placed.result.popup.width(), 340.0);

    // Anchored at a tap location instead of an element.
    let placed = popup
        .show(Anchor::Point(Point::new(180.0, 400.0)), &mut doc)
        .unwrap();
    println!(
        "== Tap ==\n  {:?}, pointer {}px along the edge",
        placed.result.orientation(),
        placed.result.pointer.value()
    );

    popup.hide();
    assert!(popup.resize(&mut doc).unwrap().is_none());
}
