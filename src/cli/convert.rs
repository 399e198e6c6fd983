//! `convert`: SVG file or stdin → icon component.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use super::common::{display_relative, read_input};
use crate::batch::{HttpClient, OptimizeClient};
use crate::config::AppConfig;
use crate::icon;
use crate::optimize::OptimizeError;
use crate::transcode::{self, looks_like_svg, replace_color};
use crate::{debug, log};

/// Convert one SVG into a component and write it into the icon directory.
pub fn convert_icon(
    config: &AppConfig,
    input: Option<&Path>,
    name: &str,
    icon_type: &str,
    to_stdout: bool,
) -> Result<()> {
    icon::validate_icon_name(name)?;

    let svg = read_input(input)?;
    let client = config
        .optimize
        .enabled
        .then(|| HttpClient::new(config.optimize.url.as_str()));
    let source = render_component(
        config,
        &svg,
        icon_type,
        client.as_ref().map(|c| c as &dyn OptimizeClient),
    )?;

    if to_stdout {
        print!("{source}");
        return Ok(());
    }

    let path = install_component(config, name, icon_type, &source)?;
    log!("convert"; "saved {}", display_relative(&path, &config.root));
    Ok(())
}

/// Optimize, recolour and transcode `svg` into component source.
fn render_component(
    config: &AppConfig,
    svg: &str,
    icon_type: &str,
    client: Option<&dyn OptimizeClient>,
) -> Result<String> {
    if !looks_like_svg(svg) {
        bail!(OptimizeError::not_svg());
    }

    let mut svg = svg.trim().to_string();
    if let Some(client) = client {
        let outcome = client
            .optimize(&svg, config.optimize.overrides())
            .context("optimization failed (use --no-optimize to skip it)")?;
        if let (Some(data), Some(pct)) = (outcome.markup(), outcome.reduction_percentage) {
            debug!("convert"; "optimized: {}% smaller", pct);
            svg = data.to_string();
        }
    }

    let rc = &config.icons.replace_color;
    if rc.applies_to(icon_type) {
        svg = replace_color(&svg, &rc.color).into_owned();
    }

    Ok(transcode::svg_to_component_source(&svg))
}

/// Write the component file and register it in the barrel file.
fn install_component(
    config: &AppConfig,
    name: &str,
    icon_type: &str,
    source: &str,
) -> Result<PathBuf> {
    let dir = config.icon_dir(icon_type);
    icon::upsert_dir(&dir)?;
    let path = icon::write_component(&dir, name, source)?;

    if config.icons.auto_export && icon::export_module(&dir, name, icon_type)? {
        debug!("convert"; "exported {}{} from {}", name, icon::capitalize(icon_type), icon::INDEX_FILE);
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::LocalClient;
    use crate::optimize::testing::StubOptimizer;
    use crate::optimize::{OptimizedSvg, Optimizer, RuleSet};
    use crate::server::OptimizationService;
    use std::fs;
    use std::sync::Arc;
    use tempfile::TempDir;

    const SVG: &str = r##"<svg viewBox="0 0 24 24"><path fill-rule="evenodd" fill="#2B2B2B" d="M0 0h24"/></svg>"##;

    fn config_at(root: &Path) -> AppConfig {
        AppConfig {
            root: root.to_path_buf(),
            ..Default::default()
        }
    }

    #[test]
    fn test_render_replaces_color_for_listed_types() {
        let config = AppConfig::default();
        let fill = render_component(&config, SVG, "Fill", None).unwrap();
        assert!(fill.contains("fill=\"currentColor\""));
        assert!(fill.contains("fillRule=\"evenodd\""));

        let color = render_component(&config, SVG, "Color", None).unwrap();
        assert!(color.contains("#2B2B2B"));
    }

    #[test]
    fn test_render_rejects_non_svg() {
        let err = render_component(&AppConfig::default(), "<div/>", "Fill", None).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<OptimizeError>(),
            Some(OptimizeError::InvalidInputShape(msg)) if msg == "Invalid SVG format"
        ));
    }

    /// Always answers with the same markup.
    struct FixedOptimizer;

    impl Optimizer for FixedOptimizer {
        fn optimize(&self, _svg: &str, _rules: &RuleSet) -> anyhow::Result<OptimizedSvg> {
            Ok(OptimizedSvg {
                data: "<svg><circle r=\"1\"/></svg>".to_string(),
                size: (2.0, 2.0),
            })
        }
    }

    #[test]
    fn test_render_uses_optimizer_output() {
        let service = OptimizationService::new(Arc::new(FixedOptimizer), RuleSet::baseline());
        let client = LocalClient::new(service);
        let source = render_component(&AppConfig::default(), SVG, "Color", Some(&client)).unwrap();
        assert!(source.contains("<circle r=\"1\"/>"));
        assert!(!source.contains("fillRule"));
    }

    #[test]
    fn test_render_propagates_optimizer_failure() {
        let service = OptimizationService::new(Arc::new(StubOptimizer), RuleSet::baseline());
        let client = LocalClient::new(service);
        let err = render_component(&AppConfig::default(), "<svg>boom</svg>", "Fill", Some(&client))
            .unwrap_err();
        assert!(format!("{err:#}").contains("--no-optimize"));
    }

    #[test]
    fn test_install_component_writes_and_exports() {
        let dir = TempDir::new().unwrap();
        let config = config_at(dir.path());
        let path = install_component(&config, "Home", "Fill", "source").unwrap();

        assert_eq!(path, config.icon_dir("Fill").join("Home.tsx"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "source");
        let index = fs::read_to_string(config.icon_dir("Fill").join(icon::INDEX_FILE)).unwrap();
        assert!(index.contains("export const HomeFill = dynamic(() => import('./Home'));"));
    }

    #[test]
    fn test_install_component_without_export() {
        let dir = TempDir::new().unwrap();
        let mut config = config_at(dir.path());
        config.icons.auto_export = false;
        install_component(&config, "Home", "Outline", "source").unwrap();
        assert!(!config.icon_dir("Outline").join(icon::INDEX_FILE).exists());
    }

    #[test]
    fn test_convert_rejects_bad_name() {
        let err = convert_icon(&AppConfig::default(), None, "home", "Fill", true).unwrap_err();
        assert_eq!(err.to_string(), "Name must be in PascalCase");
    }
}
