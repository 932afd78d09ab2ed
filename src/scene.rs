use svgr::{interpret, Document, FillRule, ParseError, PathCommand, Point, Style, Transform, Transformed};
use tracing::{debug, warn};

pub type Rgba = (f64, f64, f64, f64);

/// One filled and/or stroked path, in pixel coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub commands: Vec<PathCommand>,
    pub fill: Option<Rgba>,
    pub fill_rule: FillRule,
    ///Paint and line width
    pub stroke: Option<(Rgba, f64)>,
}

/// Everything a backend needs to produce a square image.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub size: u32,
    pub background: Rgba,
    pub items: Vec<DrawItem>,
}

///Uniform scale mapping `[min, max]` into a `size` square, centered
pub fn fit(min: Point, max: Point, size: f64) -> Transform {
    let width = max.x - min.x;
    let height = max.y - min.y;
    let extent = width.max(height);
    if extent <= 0.0 {
	return Transform::translate(size / 2.0 - min.x, size / 2.0 - min.y);
    }

    let s = size / extent;
    let dx = (size - width * s) / 2.0 - min.x * s;
    let dy = (size - height * s) / 2.0 - min.y * s;

    Transform::new(s, 0.0, 0.0, s, dx, dy)
}

impl Scene {
    pub fn new(size: u32) -> Self {
	Scene {
	    size,
	    background: (1.0, 1.0, 1.0, 1.0),
	    items: Vec::new(),
	}
    }

    /// Interprets `data` under `transform` and queues it with `style`.
    ///
    /// Nothing is queued if the data does not interpret cleanly.
    pub fn push_path(&mut self, data: &str, transform: Transform, style: &Style) -> Result<(), ParseError> {
	let mut sink = Transformed::new(transform, Vec::<PathCommand>::new());
	interpret(data, &mut sink)?;

	// line widths scale with the geometric mean of the axes
	let scale = (transform.xx * transform.yy - transform.xy * transform.yx).abs().sqrt();

	self.items.push(DrawItem {
	    commands: sink.into_inner(),
	    fill: style.fill_paint(),
	    fill_rule: style.fill_rule(),
	    stroke: style.stroke_paint().map(|paint| (paint, style.stroke_width() * scale)),
	});

	Ok(())
    }

    pub fn push_rect(&mut self, x: f64, y: f64, width: f64, height: f64, fill: Rgba) {
	self.items.push(DrawItem {
	    commands: vec![
		PathCommand::MoveTo(x, y),
		PathCommand::LineTo(x + width, y),
		PathCommand::LineTo(x + width, y + height),
		PathCommand::LineTo(x, y + height),
		PathCommand::ClosePath,
	    ],
	    fill: Some(fill),
	    fill_rule: FillRule::NonZero,
	    stroke: None,
	});
    }

    /// Lays out a document so its viewBox, or failing that the box around
    /// its paths, fills the image.
    ///
    /// Paths whose data does not interpret are left out.
    pub fn from_document(document: &Document, size: u32) -> Scene {
	let mut scene = Scene::new(size);

	let area = match document.view_box {
	    Some(vb) => Some((Point::new(vb.x, vb.y), Point::new(vb.x + vb.width, vb.y + vb.height))),
	    None => document.bounds().rect(),
	};
	let (min, max) = match area {
	    Some(area) => area,
	    None => {
		warn!("document has nothing to draw");
		return scene;
	    }
	};
	let view = fit(min, max, f64::from(size));
	debug!("fitting {:?}..{:?} into {}px", min, max, size);

	for path in &document.paths {
	    let transform = view.multiply(&path.transform);
	    if let Err(err) = scene.push_path(&path.data, transform, &path.style) {
		warn!("skipping path {:?}: {}", path.id, err);
	    }
	}

	scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_centers_the_short_axis() {
	let t = fit(Point::new(0.0, 0.0), Point::new(10.0, 5.0), 100.0);
	assert_eq!(t.apply(0.0, 0.0), (0.0, 25.0));
	assert_eq!(t.apply(10.0, 5.0), (100.0, 75.0));
    }

    #[test]
    fn push_path_scales_stroke() {
	let mut scene = Scene::new(90);
	let style: Style = "fill:none;stroke:#000;stroke-width:2".parse().unwrap();
	scene.push_path("M0 0 L1 1", Transform::scale(3.0, 3.0), &style).unwrap();

	let item = &scene.items[0];
	assert_eq!(item.commands, vec![PathCommand::MoveTo(0.0, 0.0), PathCommand::LineTo(3.0, 3.0)]);
	assert_eq!(item.fill, None);
	assert_eq!(item.stroke, Some(((0.0, 0.0, 0.0, 1.0), 6.0)));
    }

    #[test]
    fn push_path_rejects_bad_data() {
	let mut scene = Scene::new(10);
	assert!(scene.push_path("M0 0 L1", Transform::IDENTITY, &Style::new()).is_err());
	assert!(scene.items.is_empty());
    }

    #[test]
    fn document_paths_are_fitted_and_bad_ones_dropped() {
	let document = Document::parse(
	    r#"<svg viewBox="0 0 10 10"><path d="M0 0 L10 10"/><path d="M0 0 Y"/></svg>"#,
	)
	.unwrap();
	let scene = Scene::from_document(&document, 100);

	assert_eq!(scene.items.len(), 1);
	assert_eq!(
	    scene.items[0].commands,
	    vec![PathCommand::MoveTo(0.0, 0.0), PathCommand::LineTo(100.0, 100.0)]
	);
    }
}
