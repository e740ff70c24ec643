// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement basics.
//!
//! Lay out a popup next to targets in a few positions, force a side, and parse
//! preferences from text.
//!
//! Run:
//! - `RUST_LOG=understory_placement=trace cargo run -p understory_placement_demos --example placement_basics`

use kurbo::{Rect, Size};
use tracing_subscriber::EnvFilter;
use understory_placement::{
    LayoutInput, Orientation, PlacementError, PointerGeometry, Preference, compute_layout,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let viewport = Rect::new(0.0, 0.0, 1024.0, 768.0);
    let popup = Size::new(200.0, 100.0);
    let pointers = PointerGeometry::caret(20.0, 8.0);

    // Room everywhere: below wins on area.
    let centered = LayoutInput::new(Rect::new(500.0, 300.0, 540.0, 320.0), viewport, popup)
        .with_pointers(pointers);
    let result = compute_layout(&centered).unwrap();
    println!("== Centered target ==\n  {:?}\n  {:?}", result.orientation(), result.popup);
    assert_eq!(result.orientation(), Orientation::Bottom);
    assert_eq!(result.popup.origin().x, 420.0);

    // Pinned to the bottom edge: flips above.
    let pinned = LayoutInput {
        target: Some(Rect::new(500.0, 760.0, 540.0, 768.0)),
        ..centered.clone()
    };
    let result = compute_layout(&pinned).unwrap();
    println!("== Pinned to bottom ==\n  {:?}\n  {:?}", result.orientation(), result.popup);
    assert_eq!(result.orientation(), Orientation::Top);

    // Too wide for the viewport with the top side forced: width is limited.
    let wide = LayoutInput {
        popup: Size::new(1200.0, 100.0),
        preference: Preference::only(Orientation::Top),
        ..centered.clone()
    };
    let result = compute_layout(&wide).unwrap();
    println!(
        "== Forced top, too wide ==\n  clamped to {:?}, pointer {:?}",
        result.clamped, result.pointer
    );
    assert_eq!(result.popup.width(), 1004.0);

    // Preferences from configuration text.
    let pref: Preference = "left, top".parse().unwrap();
    let result = compute_layout(&centered.clone().with_preference(pref)).unwrap();
    println!("== Prefer left, then top ==\n  {:?}", result.orientation());
    assert_eq!(result.orientation(), Orientation::Left);

    let err = "left, diagonal".parse::<Preference>().unwrap_err();
    println!("== Bad preference ==\n  {err}");
    assert_eq!(err, PlacementError::UnknownOrientation("diagonal".into()));
}
