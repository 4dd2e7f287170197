//! Linear range remapping.

/// Map `input` from `[in_min, in_max]` onto `[out_min, out_max]`.
///
/// With `clamp`, the result is held inside the output range whichever way
/// round it is given. A degenerate input range maps everything to `out_min`.
#[must_use]
pub fn remap(
    input: f32,
    (in_min, in_max): (f32, f32),
    (out_min, out_max): (f32, f32),
    clamp: bool,
) -> f32 {
    let span = in_max - in_min;
    if span == 0.0 {
        return out_min;
    }
    let progress = (input - in_min) / span;
    let result = out_min + progress * (out_max - out_min);
    if !clamp {
        return result;
    }
    if out_max > out_min {
        result.clamp(out_min, out_max)
    } else {
        result.clamp(out_max, out_min)
    }
}
