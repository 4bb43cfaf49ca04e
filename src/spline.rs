//! Curve evaluation by repeated pairwise linear interpolation (de Casteljau).
//!
//! A curve is given by its control points in grid space. Evaluating at `t`
//! collapses `k` points to `k - 1` by lerping each adjacent pair, over and over,
//! until one point is left. Any number of control points is accepted: one point
//! is a constant, two a straight segment, three a quadratic, four a cubic.

use glam::DVec2;

/// Number of line segments a spline is flattened into (`t` step of 0.1).
pub const SPLINE_STEPS: u32 = 10;

/// One reduction step: `buf[i] = lerp(buf[i], buf[i + 1], t)`, then drop the
/// last point. Does nothing on buffers with fewer than two points.
pub fn reduce(buf: &mut Vec<DVec2>, t: f64) {
    if buf.len() < 2 {
        return;
    }
    for i in 0..buf.len() - 1 {
        buf[i] = buf[i].lerp(buf[i + 1], t);
    }
    buf.pop();
}

/// Evaluate the curve through `control` at parameter `t`, clamped to `[0, 1]`.
///
/// Returns `None` only when there are no control points.
pub fn evaluate(control: &[DVec2], t: f64) -> Option<DVec2> {
    let mut buf = Vec::with_capacity(control.len());
    evaluate_in(&mut buf, control, t)
}

/// Like [`evaluate`], reusing `buf` as scratch space.
pub fn evaluate_in(buf: &mut Vec<DVec2>, control: &[DVec2], t: f64) -> Option<DVec2> {
    // Exact at the ends; lerp(a, b, 1.0) is not always bit-equal to b.
    if t <= 0.0 {
        return control.first().copied();
    }
    if t >= 1.0 {
        return control.last().copied();
    }
    buf.clear();
    buf.extend_from_slice(control);
    while buf.len() > 1 {
        reduce(buf, t);
    }
    buf.first().copied()
}

/// Parameter of sample `i` out of `steps`, exact at both ends.
///
/// Computed from the integer index instead of accumulating `0.1` so the final
/// sample is exactly `1.0` and the curve always lands on its last control point.
#[inline]
pub fn sample_t(i: u32, steps: u32) -> f64 {
    if i >= steps {
        1.0
    } else {
        f64::from(i) / f64::from(steps)
    }
}

/// Absolute control points for a curve that starts at `start` and whose
/// remaining control points are each given relative to the previous one.
pub fn accumulate(start: DVec2, offsets: &[DVec2]) -> Vec<DVec2> {
    let mut points = Vec::with_capacity(offsets.len() + 1);
    points.push(start);
    let mut last = start;
    for offset in offsets {
        last += *offset;
        points.push(last);
    }
    points
}

/// Flatten a curve into `steps` samples for `t` in `(0, 1]`.
///
/// The implicit first sample, `t = 0`, is the first control point and is not
/// included; drawing a line from it through every returned point traces the curve.
pub fn flatten(control: &[DVec2], steps: u32) -> Vec<DVec2> {
    let mut scratch = Vec::with_capacity(control.len());
    (1..=steps)
        .filter_map(|i| evaluate_in(&mut scratch, control, sample_t(i, steps)))
        .collect()
}
