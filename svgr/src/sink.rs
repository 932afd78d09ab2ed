use crate::types::{PathCommand, Point, Transform};

/// Receiver of interpreted path commands.
///
/// Coordinates are always absolute.
pub trait CommandSink {
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn cubic_to(&mut self, c1x: f64, c1y: f64, c2x: f64, c2y: f64, x: f64, y: f64);
    fn quadratic_to(&mut self, cx: f64, cy: f64, x: f64, y: f64);
    fn close_path(&mut self);
}

impl<S: CommandSink + ?Sized> CommandSink for &mut S {
    fn move_to(&mut self, x: f64, y: f64) {
	(**self).move_to(x, y)
    }

    fn line_to(&mut self, x: f64, y: f64) {
	(**self).line_to(x, y)
    }

    fn cubic_to(&mut self, c1x: f64, c1y: f64, c2x: f64, c2y: f64, x: f64, y: f64) {
	(**self).cubic_to(c1x, c1y, c2x, c2y, x, y)
    }

    fn quadratic_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
	(**self).quadratic_to(cx, cy, x, y)
    }

    fn close_path(&mut self) {
	(**self).close_path()
    }
}

/// Records the stream for later replay.
impl CommandSink for Vec<PathCommand> {
    fn move_to(&mut self, x: f64, y: f64) {
	self.push(PathCommand::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
	self.push(PathCommand::LineTo(x, y));
    }

    fn cubic_to(&mut self, c1x: f64, c1y: f64, c2x: f64, c2y: f64, x: f64, y: f64) {
	self.push(PathCommand::CubicTo(c1x, c1y, c2x, c2y, x, y));
    }

    fn quadratic_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
	self.push(PathCommand::QuadraticTo(cx, cy, x, y));
    }

    fn close_path(&mut self) {
	self.push(PathCommand::ClosePath);
    }
}

pub fn replay<S: CommandSink + ?Sized>(commands: &[PathCommand], sink: &mut S) {
    for command in commands {
	command.send_to(sink);
    }
}

/// Maps every point through a transform before forwarding it.
#[derive(Debug)]
pub struct Transformed<S> {
    pub transform: Transform,
    pub inner: S,
}

impl<S: CommandSink> Transformed<S> {
    pub fn new(transform: Transform, inner: S) -> Self {
	Transformed { transform, inner }
    }

    pub fn into_inner(self) -> S {
	self.inner
    }
}

impl<S: CommandSink> CommandSink for Transformed<S> {
    fn move_to(&mut self, x: f64, y: f64) {
	let (x, y) = self.transform.apply(x, y);
	self.inner.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
	let (x, y) = self.transform.apply(x, y);
	self.inner.line_to(x, y);
    }

    fn cubic_to(&mut self, c1x: f64, c1y: f64, c2x: f64, c2y: f64, x: f64, y: f64) {
	let t = &self.transform;
	let (c1x, c1y) = t.apply(c1x, c1y);
	let (c2x, c2y) = t.apply(c2x, c2y);
	let (x, y) = t.apply(x, y);
	self.inner.cubic_to(c1x, c1y, c2x, c2y, x, y);
    }

    fn quadratic_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
	let t = &self.transform;
	let (cx, cy) = t.apply(cx, cy);
	let (x, y) = t.apply(x, y);
	self.inner.quadratic_to(cx, cy, x, y);
    }

    fn close_path(&mut self) {
	self.inner.close_path();
    }
}

/// Axis aligned box around every emitted point, control points included.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min: Option<Point>,
    max: Option<Point>,
}

impl Bounds {
    pub fn new() -> Self {
	Bounds::default()
    }

    fn add(&mut self, x: f64, y: f64) {
	let (min, max) = match (self.min, self.max) {
	    (Some(min), Some(max)) => (
		Point::new(min.x.min(x), min.y.min(y)),
		Point::new(max.x.max(x), max.y.max(y)),
	    ),
	    _ => (Point::new(x, y), Point::new(x, y)),
	};
	self.min = Some(min);
	self.max = Some(max);
    }

    pub fn union(&mut self, other: &Bounds) {
	if let Some((min, max)) = other.rect() {
	    self.add(min.x, min.y);
	    self.add(max.x, max.y);
	}
    }

    ///`(min, max)` corners, `None` if nothing was emitted
    pub fn rect(&self) -> Option<(Point, Point)> {
	self.min.zip(self.max)
    }
}

impl CommandSink for Bounds {
    fn move_to(&mut self, x: f64, y: f64) {
	self.add(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
	self.add(x, y);
    }

    fn cubic_to(&mut self, c1x: f64, c1y: f64, c2x: f64, c2y: f64, x: f64, y: f64) {
	self.add(c1x, c1y);
	self.add(c2x, c2y);
	self.add(x, y);
    }

    fn quadratic_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
	self.add(cx, cy);
	self.add(x, y);
    }

    fn close_path(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transformed_forwards_mapped_points() {
	let mut sink = Transformed::new(Transform::translate(1.0, 2.0), Vec::<PathCommand>::new());
	sink.move_to(0.0, 0.0);
	sink.quadratic_to(1.0, 1.0, 2.0, 0.0);
	sink.close_path();

	assert_eq!(
	    sink.into_inner(),
	    vec![
		PathCommand::MoveTo(1.0, 2.0),
		PathCommand::QuadraticTo(2.0, 3.0, 3.0, 2.0),
		PathCommand::ClosePath,
	    ]
	);
    }

    #[test]
    fn bounds_include_control_points() {
	let mut bounds = Bounds::new();
	assert_eq!(bounds.rect(), None);

	bounds.move_to(0.0, 0.0);
	bounds.cubic_to(-1.0, 5.0, 3.0, -2.0, 2.0, 2.0);

	assert_eq!(bounds.rect(), Some((Point::new(-1.0, -2.0), Point::new(3.0, 5.0))));
    }

    #[test]
    fn union_grows_to_cover_both() {
	let mut bounds = Bounds::new();
	bounds.union(&Bounds::new());
	assert_eq!(bounds.rect(), None);

	let mut other = Bounds::new();
	other.move_to(4.0, -1.0);
	bounds.move_to(0.0, 0.0);
	bounds.line_to(1.0, 3.0);
	bounds.union(&other);

	assert_eq!(bounds.rect(), Some((Point::new(0.0, -1.0), Point::new(4.0, 3.0))));
    }

    #[test]
    fn replay_through_reference() {
	let commands = vec![PathCommand::MoveTo(1.0, 1.0), PathCommand::LineTo(2.0, 3.0)];
	let mut copy: Vec<PathCommand> = Vec::new();
	replay(&commands, &mut copy);
	assert_eq!(copy, commands);
    }
}
