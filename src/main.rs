//! pathview
//!
//! Interpret SVG path data and render it to PNG.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use svgr::{interpret, load_svg, PathCommand};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[cfg(feature = "cairo")]
mod cairo_render;
mod chess;
mod render;
mod scene;

use scene::Scene;

#[derive(Parser)]
#[command(name = "pathview")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "SVG path data interpreter", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the absolute commands a path string interprets to
    Dump {
	/// Path data, e.g. "M0,0 L10,0 Z"
	#[arg(allow_hyphen_values = true)]
	data: String,
    },

    /// Render the paths of an SVG file
    Render {
	file: PathBuf,

	/// Output PNG
	#[arg(short, long)]
	output: PathBuf,

	/// Image width and height in pixels
	#[arg(short, long, default_value = "512")]
	size: u32,

	#[arg(short, long, value_enum, default_value = "skia")]
	backend: Backend,
    },

    /// Render the chess pieces on a board in the starting position
    Board {
	/// Output PNG
	#[arg(short, long)]
	output: PathBuf,

	#[arg(short, long, default_value = "720")]
	size: u32,

	#[arg(short, long, value_enum, default_value = "skia")]
	backend: Backend,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Backend {
    Skia,
    Cairo,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
	EnvFilter::new("debug")
    } else {
	EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
	.with(fmt::layer().with_writer(std::io::stderr))
	.with(filter)
	.init();

    match cli.command {
	Commands::Dump { data } => cmd_dump(&data),

	Commands::Render {
	    file,
	    output,
	    size,
	    backend,
	} => cmd_render(&file, &output, size, backend),

	Commands::Board { output, size, backend } => cmd_board(&output, size, backend),
    }
}

fn format_command(command: &PathCommand) -> String {
    match *command {
	PathCommand::MoveTo(x, y) => format!("M {} {}", x, y),
	PathCommand::LineTo(x, y) => format!("L {} {}", x, y),
	PathCommand::CubicTo(c1x, c1y, c2x, c2y, x, y) => {
	    format!("C {} {} {} {} {} {}", c1x, c1y, c2x, c2y, x, y)
	}
	PathCommand::QuadraticTo(cx, cy, x, y) => format!("Q {} {} {} {}", cx, cy, x, y),
	PathCommand::ClosePath => String::from("Z"),
    }
}

fn cmd_dump(data: &str) -> Result<()> {
    let mut commands: Vec<PathCommand> = Vec::new();
    let res = interpret(data, &mut commands);

    for command in &commands {
	println!("{}", format_command(command));
    }

    res.with_context(|| format!("interpreting {:?}", data))
}

fn write_png(scene: &Scene, output: &Path, backend: Backend) -> Result<()> {
    match backend {
	Backend::Skia => render::render_png(scene, output),
	#[cfg(feature = "cairo")]
	Backend::Cairo => cairo_render::render_png(scene, output),
	#[cfg(not(feature = "cairo"))]
	Backend::Cairo => bail!("pathview was built without the cairo feature"),
    }
}

fn cmd_render(file: &Path, output: &Path, size: u32, backend: Backend) -> Result<()> {
    if size == 0 {
	bail!("size must be positive");
    }

    let document = load_svg(file).with_context(|| format!("loading {}", file.display()))?;
    info!("{}: {} paths", file.display(), document.paths.len());

    let scene = Scene::from_document(&document, size);
    if scene.items.is_empty() {
	warn!("{} has nothing to draw", file.display());
    }

    write_png(&scene, output, backend)
}

fn cmd_board(output: &Path, size: u32, backend: Backend) -> Result<()> {
    if size == 0 {
	bail!("size must be positive");
    }

    let scene = chess::board_scene(size).context("interpreting the piece artwork")?;
    write_png(&scene, output, backend)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_print_as_absolute_path_data() {
	assert_eq!(format_command(&PathCommand::MoveTo(5.0, 5.0)), "M 5 5");
	assert_eq!(format_command(&PathCommand::LineTo(10.0, -2.5)), "L 10 -2.5");
	assert_eq!(format_command(&PathCommand::ClosePath), "Z");
    }

    #[test]
    fn dump_fails_on_bad_data() {
	assert!(cmd_dump("M0,0 L10,0 Z").is_ok());
	assert!(cmd_dump("M0,0 K").is_err());
    }

    #[test]
    fn cli_parses_subcommands() {
	let cli = Cli::try_parse_from(["pathview", "render", "piece.svg", "-o", "out.png", "-b", "cairo"]).unwrap();
	assert!(matches!(
	    cli.command,
	    Commands::Render { size: 512, backend: Backend::Cairo, .. }
	));

	let cli = Cli::try_parse_from(["pathview", "-v", "dump", "m-1,-1 l2,2"]).unwrap();
	assert!(cli.verbose);
	assert!(matches!(cli.command, Commands::Dump { .. }));
    }
}
