use std::f64::consts::{FRAC_PI_2, PI};

use crate::sink::CommandSink;
use crate::types::Point;

const EPSILON: f64 = 1e-6;

///Signed angle from `u` to `v`
fn vector_angle(ux: f64, uy: f64, vx: f64, vy: f64) -> f64 {
    let len = (ux * ux + uy * uy).sqrt() * (vx * vx + vy * vy).sqrt();
    let cos = ((ux * vx + uy * vy) / len).clamp(-1.0, 1.0);
    let angle = cos.acos();

    if ux * vy < uy * vx {
	-angle
    } else {
	angle
    }
}

/// Approximates an SVG elliptical arc with cubic Beziers.
///
/// Follows the endpoint to center conversion of SVG 1.1 appendix F.6.5,
/// scaling the radii up when they cannot span the chord. The sweep is cut
/// into segments of at most 90 degrees, one `cubic_to` each. A zero length
/// chord or a zero radius degrades to a single `line_to(end)`.
#[allow(clippy::too_many_arguments)]
pub fn convert_arc_to_bezier<S: CommandSink + ?Sized>(
    rx: f64,
    ry: f64,
    x_rotation: f64,
    large_arc: bool,
    sweep: bool,
    start: Point,
    end: Point,
    sink: &mut S,
) {
    let mut rx = rx.abs();
    let mut ry = ry.abs();

    let dx = start.x - end.x;
    let dy = start.y - end.y;
    if (dx * dx + dy * dy).sqrt() < EPSILON || rx < EPSILON || ry < EPSILON {
	sink.line_to(end.x, end.y);
	return;
    }

    let (sin_rot, cos_rot) = x_rotation.sin_cos();

    // midpoint of the chord in the ellipse's frame
    let x1p = cos_rot * dx / 2.0 + sin_rot * dy / 2.0;
    let y1p = -sin_rot * dx / 2.0 + cos_rot * dy / 2.0;

    let lambda = (x1p * x1p) / (rx * rx) + (y1p * y1p) / (ry * ry);
    if lambda > 1.0 {
	let scale = lambda.sqrt();
	rx *= scale;
	ry *= scale;
    }

    let rx2 = rx * rx;
    let ry2 = ry * ry;
    let num = (rx2 * ry2 - rx2 * y1p * y1p - ry2 * x1p * x1p).max(0.0);
    let den = rx2 * y1p * y1p + ry2 * x1p * x1p;
    let mut s = if den > 0.0 { (num / den).sqrt() } else { 0.0 };
    if large_arc == sweep {
	s = -s;
    }

    let cxp = s * rx * y1p / ry;
    let cyp = -s * ry * x1p / rx;

    let cx = (start.x + end.x) / 2.0 + cos_rot * cxp - sin_rot * cyp;
    let cy = (start.y + end.y) / 2.0 + sin_rot * cxp + cos_rot * cyp;

    let ux = (x1p - cxp) / rx;
    let uy = (y1p - cyp) / ry;
    let vx = (-x1p - cxp) / rx;
    let vy = (-y1p - cyp) / ry;

    let start_angle = vector_angle(1.0, 0.0, ux, uy);
    let mut delta = vector_angle(ux, uy, vx, vy);
    if !sweep && delta > 0.0 {
	delta -= 2.0 * PI;
    } else if sweep && delta < 0.0 {
	delta += 2.0 * PI;
    }

    // tolerance keeps an exact half turn at two segments
    let segments = ((delta.abs() / FRAC_PI_2) - 1e-9).ceil().max(1.0) as usize;
    let step = delta / segments as f64;

    let kappa = 4.0 / 3.0 * (step / 4.0).tan();

    // unit circle -> ellipse -> user space
    let to_user = |ex: f64, ey: f64| (cx + cos_rot * ex - sin_rot * ey, cy + sin_rot * ex + cos_rot * ey);
    let tangent = |ex: f64, ey: f64| (cos_rot * ex - sin_rot * ey, sin_rot * ex + cos_rot * ey);

    let (mut px, mut py) = (start.x, start.y);
    let (mut ptx, mut pty) = tangent(-start_angle.sin() * rx * kappa, start_angle.cos() * ry * kappa);

    for i in 1..=segments {
	let angle = start_angle + step * i as f64;
	let (sin, cos) = angle.sin_cos();

	let (x, y) = if i == segments { (end.x, end.y) } else { to_user(cos * rx, sin * ry) };
	let (tx, ty) = tangent(-sin * rx * kappa, cos * ry * kappa);

	sink.cubic_to(px + ptx, py + pty, x - tx, y - ty, x, y);

	px = x;
	py = y;
	ptx = tx;
	pty = ty;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PathCommand;

    fn arc(rx: f64, ry: f64, rot: f64, large: bool, sweep: bool, start: Point, end: Point) -> Vec<PathCommand> {
	let mut out: Vec<PathCommand> = Vec::new();
	convert_arc_to_bezier(rx, ry, rot, large, sweep, start, end, &mut out);
	out
    }

    fn cubic_midpoint(from: Point, command: &PathCommand) -> Point {
	match *command {
	    PathCommand::CubicTo(c1x, c1y, c2x, c2y, x, y) => Point::new(
		0.125 * from.x + 0.375 * c1x + 0.375 * c2x + 0.125 * x,
		0.125 * from.y + 0.375 * c1y + 0.375 * c2y + 0.125 * y,
	    ),
	    ref other => panic!("expected a cubic, got {:?}", other),
	}
    }

    #[test]
    fn half_circle_is_two_segments() {
	let out = arc(5.0, 5.0, 0.0, false, true, Point::ORIGIN, Point::new(10.0, 0.0));
	assert_eq!(out.len(), 2);
	assert_eq!(out[1].end_point(), Some(Point::new(10.0, 0.0)));
    }

    #[test]
    fn segments_stay_on_the_circle() {
	let center = Point::new(5.0, 0.0);
	let out = arc(5.0, 5.0, 0.0, false, true, Point::ORIGIN, Point::new(10.0, 0.0));

	let mut from = Point::ORIGIN;
	for command in &out {
	    let mid = cubic_midpoint(from, command);
	    assert!((mid.distance(center) - 5.0).abs() < 1e-2, "{:?}", mid);
	    from = command.end_point().unwrap();
	}
    }

    #[test]
    fn sweep_flag_picks_the_side() {
	let positive = arc(5.0, 5.0, 0.0, false, true, Point::ORIGIN, Point::new(10.0, 0.0));
	let negative = arc(5.0, 5.0, 0.0, false, false, Point::ORIGIN, Point::new(10.0, 0.0));

	let mid_pos = positive[0].end_point().unwrap();
	let mid_neg = negative[0].end_point().unwrap();
	assert!(mid_pos.y < -4.9);
	assert!(mid_neg.y > 4.9);
    }

    #[test]
    fn large_arc_spans_more_than_half() {
	let small = arc(10.0, 10.0, 0.0, false, true, Point::ORIGIN, Point::new(10.0, 0.0));
	let large = arc(10.0, 10.0, 0.0, true, true, Point::ORIGIN, Point::new(10.0, 0.0));
	assert_eq!(small.len(), 1);
	assert_eq!(large.len(), 4);
    }

    #[test]
    fn small_radii_are_scaled_up() {
	let out = arc(1.0, 1.0, 0.0, false, true, Point::ORIGIN, Point::new(10.0, 0.0));
	assert_eq!(out.len(), 2);
	let mid = out[0].end_point().unwrap();
	assert!((mid.x - 5.0).abs() < 1e-9);
	assert!((mid.y.abs() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn rotated_ellipse_ends_on_endpoint() {
	let end = Point::new(20.0, 7.0);
	let out = arc(12.0, 4.0, 30f64.to_radians(), true, false, Point::new(1.0, 2.0), end);
	assert_eq!(out.last().and_then(|c| c.end_point()), Some(end));
    }

    #[test]
    fn degenerate_arcs_become_lines() {
	assert_eq!(
	    arc(0.0, 0.0, 0.0, false, false, Point::ORIGIN, Point::new(5.0, 5.0)),
	    vec![PathCommand::LineTo(5.0, 5.0)]
	);
	assert_eq!(
	    arc(3.0, 3.0, 0.0, false, false, Point::new(1.0, 1.0), Point::new(1.0, 1.0)),
	    vec![PathCommand::LineTo(1.0, 1.0)]
	);
    }
}
