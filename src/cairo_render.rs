use std::fs::File;
use std::path::Path;

use anyhow::{anyhow, Context as _, Result};
use cairo::{Context, Format, ImageSurface};
use svgr::{replay, CommandSink, FillRule};
use tracing::info;

use crate::scene::Scene;

/// Draws interpreted commands onto a cairo context.
///
/// Cairo has no quadratic segments so they are raised to cubics, which
/// needs the current point.
pub struct CairoPath<'a> {
    cr: &'a Context,
    last: (f64, f64),
    start: (f64, f64),
}

impl<'a> CairoPath<'a> {
    pub fn new(cr: &'a Context) -> Self {
	CairoPath { cr, last: (0.0, 0.0), start: (0.0, 0.0) }
    }
}

impl<'a> CommandSink for CairoPath<'a> {
    fn move_to(&mut self, x: f64, y: f64) {
	self.cr.move_to(x, y);
	self.last = (x, y);
	self.start = (x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
	self.cr.line_to(x, y);
	self.last = (x, y);
    }

    fn cubic_to(&mut self, c1x: f64, c1y: f64, c2x: f64, c2y: f64, x: f64, y: f64) {
	self.cr.curve_to(c1x, c1y, c2x, c2y, x, y);
	self.last = (x, y);
    }

    fn quadratic_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
	let (x0, y0) = self.last;
	self.cr.curve_to(
	    x0 + 2.0 / 3.0 * (cx - x0),
	    y0 + 2.0 / 3.0 * (cy - y0),
	    x + 2.0 / 3.0 * (cx - x),
	    y + 2.0 / 3.0 * (cy - y),
	    x,
	    y,
	);
	self.last = (x, y);
    }

    fn close_path(&mut self) {
	self.cr.close_path();
	self.last = self.start;
    }
}

pub fn draw(cr: &Context, scene: &Scene) {
    let (r, g, b, a) = scene.background;
    cr.set_source_rgba(r, g, b, a);
    cr.paint();

    for item in &scene.items {
	replay(&item.commands, &mut CairoPath::new(cr));

	if let Some((r, g, b, a)) = item.fill {
	    cr.set_fill_rule(match item.fill_rule {
		FillRule::NonZero => cairo::FillRule::Winding,
		FillRule::EvenOdd => cairo::FillRule::EvenOdd,
	    });
	    cr.set_source_rgba(r, g, b, a);
	    cr.fill_preserve();
	}

	if let Some(((r, g, b, a), width)) = item.stroke {
	    cr.set_source_rgba(r, g, b, a);
	    cr.set_line_width(width);
	    cr.stroke_preserve();
	}

	cr.new_path();
    }
}

pub fn render_png(scene: &Scene, output: &Path) -> Result<()> {
    let size = scene.size as i32;
    let surface = ImageSurface::create(Format::ARgb32, size, size)
	.map_err(|status| anyhow!("cannot create a {0}x{0} surface: {1:?}", size, status))?;

    {
	let cr = Context::new(&surface);
	draw(&cr, scene);
    }

    let mut file = File::create(output).with_context(|| format!("creating {}", output.display()))?;
    surface
	.write_to_png(&mut file)
	.map_err(|err| anyhow!("writing {}: {:?}", output.display(), err))?;

    info!("wrote {} with cairo ({}x{})", output.display(), scene.size, scene.size);
    Ok(())
}
