//! Font-size to dispersal spread lookup curve.

/// `(font size px, spread)` control points, ascending by size.
const SPREAD_CURVE: [(f32, f32); 3] = [(20.0, 0.2), (50.0, 0.5), (100.0, 1.5)];

/// Base vaporize spread for a font size: piecewise linear through
/// [`SPREAD_CURVE`], clamped at both ends.
#[must_use]
pub fn vaporize_spread(font_size: f32) -> f32 {
    let (first_size, first_spread) = SPREAD_CURVE[0];
    let (last_size, last_spread) = SPREAD_CURVE[SPREAD_CURVE.len() - 1];
    if font_size <= first_size {
        return first_spread;
    }
    if font_size >= last_size {
        return last_spread;
    }

    SPREAD_CURVE
        .windows(2)
        .find(|w| font_size <= w[1].0)
        .map_or(last_spread, |w| {
            let ((s1, p1), (s2, p2)) = (w[0], w[1]);
            p1 + (font_size - s1) * (p2 - p1) / (s2 - s1)
        })
}
