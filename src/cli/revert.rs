//! `revert`: component source → SVG.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};

use super::common::read_input;
use crate::log;
use crate::transcode::{self, find_svg_span, looks_like_svg};

/// Print (or write) the SVG embedded in a component file.
pub fn revert_component(input: Option<&Path>, output: Option<&Path>) -> Result<()> {
    let source = read_input(input)?;
    let svg = component_to_svg(&source)?;

    match output {
        Some(path) => {
            fs::write(path, &svg).with_context(|| format!("failed to write `{}`", path.display()))?;
            log!("revert"; "saved {}", path.display());
        }
        None => println!("{svg}"),
    }
    Ok(())
}

/// Reverse-transcode the first SVG span of `source`.
fn component_to_svg(source: &str) -> Result<String> {
    let Some(span) = find_svg_span(source) else {
        bail!("no <svg> element found in the component source");
    };
    let svg = transcode::component_source_to_svg(span.text);
    if !looks_like_svg(&svg) {
        bail!("converted markup is not SVG");
    }
    Ok(svg)
}
