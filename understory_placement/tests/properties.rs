// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for the placement engine over synthetic scenes.
//!
//! Run:
//! - `cargo test -p understory_placement --test properties`

use kurbo::{Insets, Rect, Size};
use proptest::prelude::*;

use understory_placement::{
    LayoutInput, LayoutResult, Orientation, PointerGeometry, PointerOffset, Preference,
    compute_layout,
};

// Whole-pixel rounding may move a box by up to half a pixel.
const ROUNDING: f64 = 0.5 + 1e-9;

prop_compose! {
    /// Integer scenes with the target inside the bounds shrunk by the margins.
    fn scene()(
        bw in 200_u32..1600,
        bh in 200_u32..1200,
        ox in 0_u32..200,
        oy in 0_u32..200,
        margin in 0_u32..40,
        tw in 0_u32..80,
        th in 0_u32..80,
        fx in 0_u32..=1000,
        fy in 0_u32..=1000,
        pw in 10_u32..900,
        ph in 10_u32..700,
        pd in 0_u32..20,
        caret in 0_u32..16,
    ) -> LayoutInput {
        let inner_w = bw - 2 * margin;
        let inner_h = bh - 2 * margin;
        let tw = tw.min(inner_w);
        let th = th.min(inner_h);
        let tx = ox + margin + (inner_w - tw) * fx / 1000;
        let ty = oy + margin + (inner_h - th) * fy / 1000;
        LayoutInput::new(
            Rect::new(tx.into(), ty.into(), (tx + tw).into(), (ty + th).into()),
            Rect::new(ox.into(), oy.into(), (ox + bw).into(), (oy + bh).into()),
            Size::new(pw.into(), ph.into()),
        )
        .with_margins(Insets::uniform(margin.into()))
        .with_pointer_distance(pd.into())
        .with_pointers(PointerGeometry::caret((2 * caret).into(), caret.into()))
    }
}

fn fits_on(input: &LayoutInput, o: Orientation) -> bool {
    let probe = LayoutInput {
        preference: Preference::only(o),
        limit_layout: false,
        ..input.clone()
    };
    compute_layout(&probe).unwrap().candidate.fits()
}

fn inner(input: &LayoutInput) -> Rect {
    let b = input.bounds;
    let m = input.margins;
    Rect::new(b.x0 + m.x0, b.y0 + m.y0, b.x1 - m.x1, b.y1 - m.y1)
}

fn within(outer: Rect, r: Rect) -> bool {
    r.x0 >= outer.x0 - ROUNDING
        && r.y0 >= outer.y0 - ROUNDING
        && r.x1 <= outer.x1 + ROUNDING
        && r.y1 <= outer.y1 + ROUNDING
}

fn pointer_inside(input: &LayoutInput, result: &LayoutResult) -> bool {
    let size = input.pointers.get(result.orientation());
    let edge = input.pointer_edge_distance;
    let (offset, extent, pointer) = match result.pointer {
        PointerOffset::Left(v) => (v, result.popup.width(), size.width),
        PointerOffset::Top(v) => (v, result.popup.height(), size.height),
    };
    if extent < 2.0 * edge + pointer {
        // Not enough room to honor both edges.
        return true;
    }
    offset >= edge - ROUNDING && offset <= extent - edge - pointer + ROUNDING
}

proptest! {
    #[test]
    fn layout_is_deterministic(input in scene(), limit in any::<bool>()) {
        let input = input.with_limit_layout(limit);
        prop_assert_eq!(compute_layout(&input), compute_layout(&input));
    }

    #[test]
    fn fitting_popup_stays_inside_margins(input in scene()) {
        if !Orientation::ALL.iter().any(|&o| fits_on(&input, o)) {
            return Ok(());
        }
        let result = compute_layout(&input).unwrap();
        prop_assert!(result.candidate.fits());
        prop_assert_eq!(result.clamped, None);
        prop_assert!(
            within(inner(&input), result.popup),
            "{:?} escapes {:?}", result.popup, inner(&input)
        );
    }

    #[test]
    fn limited_popup_never_exceeds_side_space(input in scene()) {
        let result = compute_layout(&input).unwrap();
        let c = result.candidate;
        // The candidate is recomputed after limiting, so its deltas measure the final size.
        prop_assert!(c.delta_width >= 0.0 || result.popup.width() == 0.0);
        prop_assert!(c.delta_height >= 0.0 || result.popup.height() == 0.0);
    }

    #[test]
    fn pointer_stays_inside_popup(input in scene(), limit in any::<bool>()) {
        let input = input.with_limit_layout(limit);
        let result = compute_layout(&input).unwrap();
        prop_assert!(pointer_inside(&input, &result), "{:?}", result);
    }

    #[test]
    fn first_fitting_preference_wins(input in scene(), pick in 0_usize..4, b in 0_usize..4) {
        let fitting: Vec<Orientation> = Orientation::ALL
            .into_iter()
            .filter(|&o| fits_on(&input, o))
            .collect();
        if fitting.is_empty() {
            return Ok(());
        }
        let a = fitting[pick % fitting.len()];
        let b = Orientation::ALL[b];
        let input = input.with_preference(Preference::Ordered(vec![a, b]));
        let result = compute_layout(&input).unwrap();
        prop_assert_eq!(result.orientation(), a);
    }
}
