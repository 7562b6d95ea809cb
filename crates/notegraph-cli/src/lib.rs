//! CLI logic for the notegraph diagram renderer.
//!
//! This module reads a diagram payload, renders each diagram with the
//! [`DiagramBuilder`] and writes one SVG file per diagram.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, info};

use notegraph::{DiagramBuilder, NotegraphError, semantic::Diagram};

/// Run the notegraph CLI application
///
/// This function parses the input payload, renders the selected diagrams and
/// writes them to the output directory as `<index>-<slug>.svg`.
///
/// Returns the paths of the written files, in diagram order.
///
/// # Errors
///
/// Returns `NotegraphError` for:
/// - File I/O errors
/// - Configuration loading errors, including an out-of-range `--diagram`
/// - Parsing errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<Vec<PathBuf>, NotegraphError> {
    info!(
        input_path = args.input,
        output_dir = args.output;
        "Processing diagram payload"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    let builder = DiagramBuilder::new(app_config);
    let diagrams = builder.parse(&source)?;
    let selected = select_diagrams(&diagrams, args.diagram)?;

    let output_dir = Path::new(&args.output);
    fs::create_dir_all(output_dir)?;

    let mut written = Vec::with_capacity(selected.len());
    for (index, diagram) in selected {
        let svg = builder.render_svg(diagram)?;
        let path = output_dir.join(output_file_name(index, diagram.title()));
        fs::write(&path, svg)?;

        debug!(index, summary:% = diagram.summary(), path:? = path; "Diagram written");
        written.push(path);
    }

    info!(files_count = written.len(), output_dir = args.output; "SVG exported successfully");

    Ok(written)
}

/// Pick every diagram, or only the one at `only`.
fn select_diagrams(
    diagrams: &[Diagram],
    only: Option<usize>,
) -> Result<Vec<(usize, &Diagram)>, NotegraphError> {
    match only {
        None => Ok(diagrams.iter().enumerate().collect()),
        Some(index) => diagrams
            .get(index)
            .map(|diagram| vec![(index, diagram)])
            .ok_or_else(|| {
                NotegraphError::Config(format!(
                    "diagram index {index} is out of range, the payload has {} diagram(s)",
                    diagrams.len()
                ))
            }),
    }
}

/// `<index>-<slug>.svg`, where the slug keeps lowercase alphanumeric runs of
/// the title joined by `-`.
fn output_file_name(index: usize, title: &str) -> String {
    let slug = title
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-");

    if slug.is_empty() {
        format!("{index}-diagram.svg")
    } else {
        format!("{index}-{slug}.svg")
    }
}
