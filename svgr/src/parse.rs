use std::path::Path as FilePath;

use svg::node::element::tag::{self, Group, Path, SVG};
use svg::node::Attributes;
use svg::parser::{Event, Parser};
use tracing::{debug, warn};

use crate::error::{DocumentError, ParseError};
use crate::interpret::interpret;
use crate::sink::{Bounds, CommandSink, Transformed};
use crate::style::Style;
use crate::transform::parse_transform;
use crate::types::{Transform, ViewBox};

/// Elements whose children are never painted directly.
const NON_RENDERED: &[&str] = &["defs", "clipPath", "mask", "marker", "pattern", "symbol"];

/// A `<path>` with everything inherited from its ancestors resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct PathElement {
    pub id: Option<String>,
    pub data: String,
    ///User space of the path to document space
    pub transform: Transform,
    pub style: Style,
}

impl PathElement {
    /// Interprets the path data into `sink` in document coordinates.
    pub fn interpret<S: CommandSink + ?Sized>(&self, sink: &mut S) -> Result<(), ParseError> {
	if self.transform.is_identity() {
	    interpret(&self.data, sink)
	} else {
	    interpret(&self.data, &mut Transformed::new(self.transform, sink))
	}
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub view_box: Option<ViewBox>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub paths: Vec<PathElement>,
}

fn attribute<'a>(attributes: &'a Attributes, name: &str) -> Option<&'a str> {
    let value: &'a str = attributes.get(name)?;
    Some(value)
}

fn length(attributes: &Attributes, name: &str) -> Option<f64> {
    attribute(attributes, name)?.trim().trim_end_matches("px").parse().ok()
}

fn element_style(attributes: &Attributes) -> Style {
    let mut style = Style::new();

    for name in ["display", "fill", "fill-opacity", "fill-rule", "stroke", "stroke-width", "stroke-opacity"] {
	if let Some(val) = attribute(attributes, name) {
	    if let Err(err) = style.set(name, val) {
		warn!("ignoring presentation attribute {}: {}", name, err);
	    }
	}
    }

    if let Some(style_data) = attribute(attributes, "style") {
	match style_data.parse::<Style>() {
	    Ok(declared) => style = declared.inherit(&style),
	    Err(err) => warn!("ignoring style attribute: {}", err),
	}
    }

    style
}

impl Document {
    /// Parses an SVG document held in memory.
    pub fn parse(content: &str) -> Result<Document, DocumentError> {
	Document::from_events(Parser::new(content))
    }

    fn from_events<'l, I>(events: I) -> Result<Document, DocumentError>
    where
	I: Iterator<Item = Event<'l>>,
    {
	let mut document = Document::default();
	let mut stack: Vec<(Transform, Style, bool)> = vec![(Transform::IDENTITY, Style::new(), false)];
	let mut hidden_depth = 0usize;
	let mut seen_root = false;

	for event in events {
	    let (name, kind, attributes) = match event {
		Event::Tag(name, kind, attributes) => (name, kind, attributes),
		Event::Error(err) => return Err(DocumentError::Xml(err.to_string())),
		_ => continue,
	    };

	    if kind == tag::Type::End {
		if stack.len() > 1 {
		    if let Some((_, _, true)) = stack.pop() {
			hidden_depth = hidden_depth.saturating_sub(1);
		    }
		}
		continue;
	    }

	    let (parent_transform, parent_style, _) = stack.last().copied().unwrap_or_default();
	    let transform = match attribute(&attributes, "transform") {
		Some(transform_data) => parent_transform.multiply(&parse_transform(transform_data)?),
		None => parent_transform,
	    };
	    let own = element_style(&attributes);
	    let hides = !own.is_visible() || NON_RENDERED.contains(&name);
	    let mut style = own.inherit(&parent_style);
	    // display is not inherited, a hidden element hides its whole subtree
	    style.display = own.display;

	    match name {
		SVG if !seen_root => {
		    seen_root = true;
		    document.view_box = attribute(&attributes, "viewBox").map(str::parse).transpose()?;
		    document.width = length(&attributes, "width");
		    document.height = length(&attributes, "height");
		    debug!("svg root: viewBox {:?}", document.view_box);
		}
		Path if hidden_depth == 0 => {
		    let id = attribute(&attributes, "id").map(String::from);
		    match attribute(&attributes, "d") {
			Some(data) if !hides => document.paths.push(PathElement {
			    id,
			    data: String::from(data),
			    transform,
			    style,
			}),
			Some(_) => debug!("skipping hidden path {:?}", id),
			None => warn!("skipping path {:?} without data", id),
		    }
		}
		Group => debug!("group {:?}", attribute(&attributes, "id")),
		_ => (),
	    }

	    if kind == tag::Type::Start {
		if hides {
		    hidden_depth += 1;
		}
		stack.push((transform, style, hides));
	    }
	}

	debug!("loaded {} paths", document.paths.len());
	Ok(document)
    }

    /// Box around all paths in document space. Paths that fail to
    /// interpret contribute the part emitted before the error.
    pub fn bounds(&self) -> Bounds {
	let mut bounds = Bounds::new();
	for path in &self.paths {
	    let mut path_bounds = Bounds::new();
	    if let Err(err) = path.interpret(&mut path_bounds) {
		warn!("path {:?}: {}", path.id, err);
	    }
	    bounds.union(&path_bounds);
	}
	bounds
    }
}

pub fn load_svg<P: AsRef<FilePath>>(path: P) -> Result<Document, DocumentError> {
    let mut content = String::new();
    let parser = svg::open(path, &mut content)?;

    Document::from_events(parser)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Color;
    use crate::types::{PathCommand, Point};

    const DOC: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="45" height="45px" viewBox="0 0 45 45">
  <defs>
    <path id="unused" d="M0 0 L1 1"/>
  </defs>
  <g id="piece" style="fill:#ffffff;stroke:#000000" transform="translate(10 0)">
    <path id="base" d="M0 0 L5 0" style="stroke-width:1.5"/>
    <g transform="scale(2)">
      <path id="top" d="M1 1 L2 1" fill="none"/>
    </g>
  </g>
  <path id="plain" d="M0 0 H3"/>
  <path id="hidden" d="M0 0 H3" display="none"/>
  <path id="nodata"/>
</svg>
"##;

    #[test]
    fn loads_root_geometry() {
	let doc = Document::parse(DOC).unwrap();
	assert_eq!(doc.view_box, Some(ViewBox { x: 0.0, y: 0.0, width: 45.0, height: 45.0 }));
	assert_eq!(doc.width, Some(45.0));
	assert_eq!(doc.height, Some(45.0));
    }

    #[test]
    fn skips_defs_hidden_and_empty_paths() {
	let doc = Document::parse(DOC).unwrap();
	let ids: Vec<_> = doc.paths.iter().map(|p| p.id.as_deref().unwrap_or("")).collect();
	assert_eq!(ids, vec!["base", "top", "plain"]);
    }

    #[test]
    fn composes_group_transforms_and_styles() {
	let doc = Document::parse(DOC).unwrap();

	let base = &doc.paths[0];
	assert_eq!(base.transform, Transform::translate(10.0, 0.0));
	assert_eq!(base.style.fill, Some(Color::RGB(1.0, 1.0, 1.0)));
	assert_eq!(base.style.stroke_width(), 1.5);

	let top = &doc.paths[1];
	let mut out: Vec<PathCommand> = Vec::new();
	top.interpret(&mut out).unwrap();
	assert_eq!(out, vec![PathCommand::MoveTo(12.0, 2.0), PathCommand::LineTo(14.0, 2.0)]);
	assert_eq!(top.style.fill_paint(), None);
	assert_eq!(top.style.stroke_paint(), Some((0.0, 0.0, 0.0, 1.0)));

	let plain = &doc.paths[2];
	assert!(plain.transform.is_identity());
	assert_eq!(plain.style, Style::new());
    }

    #[test]
    fn document_bounds() {
	let doc = Document::parse(DOC).unwrap();
	let (min, max) = doc.bounds().rect().unwrap();
	assert_eq!(min, Point::new(0.0, 0.0));
	assert_eq!(max, Point::new(15.0, 2.0));
    }

    #[test]
    fn bad_transform_is_an_error() {
	let res = Document::parse(r#"<svg><path d="M0 0" transform="spin(3)"/></svg>"#);
	assert!(matches!(res, Err(DocumentError::Transform(_))));
    }

    #[test]
    fn hidden_group_hides_its_subtree() {
	let doc = Document::parse(
	    r#"<svg>
  <g display="none"><path id="a" d="M0 0 H1" display="inline"/><g><path id="b" d="M0 0 H1"/></g></g>
  <g style="display:none"/>
  <path id="c" d="M0 0 H1"/>
</svg>"#,
	)
	.unwrap();
	let ids: Vec<_> = doc.paths.iter().map(|p| p.id.as_deref().unwrap_or("")).collect();
	assert_eq!(ids, vec!["c"]);
	assert!(doc.paths[0].style.is_visible());
    }

    #[test]
    fn truncated_document_is_an_error() {
	let res = Document::parse(r#"<svg><path d="M0 0 L1 1"/><path d="M5 5 <<<< ><g"#);
	assert!(matches!(res, Err(DocumentError::Xml(_))));
    }

    #[test]
    fn missing_file() {
	assert!(matches!(load_svg("/nonexistent/piece.svg"), Err(DocumentError::Io(_))));
    }
}
