use std::path::Path;

use anyhow::{anyhow, Context, Result};
use svgr::{replay, CommandSink, FillRule};
use tiny_skia::{Color, Paint, PathBuilder, Pixmap, Stroke, Transform};
use tracing::{debug, info};

use crate::scene::{Rgba, Scene};

/// Feeds interpreted commands into a tiny-skia path.
#[derive(Default)]
pub struct SkiaPath {
    builder: PathBuilder,
}

impl SkiaPath {
    pub fn new() -> Self {
	SkiaPath::default()
    }

    pub fn finish(self) -> Option<tiny_skia::Path> {
	self.builder.finish()
    }
}

impl CommandSink for SkiaPath {
    fn move_to(&mut self, x: f64, y: f64) {
	self.builder.move_to(x as f32, y as f32);
    }

    fn line_to(&mut self, x: f64, y: f64) {
	self.builder.line_to(x as f32, y as f32);
    }

    fn cubic_to(&mut self, c1x: f64, c1y: f64, c2x: f64, c2y: f64, x: f64, y: f64) {
	self.builder
	    .cubic_to(c1x as f32, c1y as f32, c2x as f32, c2y as f32, x as f32, y as f32);
    }

    fn quadratic_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
	self.builder.quad_to(cx as f32, cy as f32, x as f32, y as f32);
    }

    fn close_path(&mut self) {
	self.builder.close();
    }
}

fn color((r, g, b, a): Rgba) -> Color {
    Color::from_rgba(r as f32, g as f32, b as f32, a as f32).unwrap_or(Color::BLACK)
}

fn paint(rgba: Rgba) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color(rgba));
    paint.anti_alias = true;
    paint
}

/// Rasterizes the scene into a new pixmap.
pub fn rasterize(scene: &Scene) -> Result<Pixmap> {
    let mut pixmap = Pixmap::new(scene.size, scene.size)
	.ok_or_else(|| anyhow!("cannot allocate a {0}x{0} pixmap", scene.size))?;
    pixmap.fill(color(scene.background));

    for item in &scene.items {
	let mut sink = SkiaPath::new();
	replay(&item.commands, &mut sink);
	let path = match sink.finish() {
	    Some(path) => path,
	    None => {
		debug!("nothing to draw for {} commands", item.commands.len());
		continue;
	    }
	};

	if let Some(fill) = item.fill {
	    let rule = match item.fill_rule {
		FillRule::NonZero => tiny_skia::FillRule::Winding,
		FillRule::EvenOdd => tiny_skia::FillRule::EvenOdd,
	    };
	    pixmap.fill_path(&path, &paint(fill), rule, Transform::identity(), None);
	}

	if let Some((stroke, width)) = item.stroke {
	    let stroke_style = Stroke {
		width: width as f32,
		..Stroke::default()
	    };
	    pixmap.stroke_path(&path, &paint(stroke), &stroke_style, Transform::identity(), None);
	}
    }

    Ok(pixmap)
}

pub fn render_png(scene: &Scene, output: &Path) -> Result<()> {
    let pixmap = rasterize(scene)?;
    pixmap
	.save_png(output)
	.with_context(|| format!("writing {}", output.display()))?;

    info!("wrote {} ({}x{})", output.display(), scene.size, scene.size);
    Ok(())
}
