//! Non-interactive commands: SVG export and dataset dump.

use std::fs;
use std::io::{Write, stdout};

use anyhow::{Context, Result, bail};
use paddock_core::data::{DATASET_NAMES, dataset_json};
use paddock_core::svg::render_svg;
use paddock_core::{Page, SectionId};
use paddock_protocol::{ThemeMode, Viewport};
use serde_json::{Map, Value};

use crate::cli::{DumpArgs, ExportArgs};

/// Seconds into the page's life at which exports are sampled; every
/// entrance has finished by then.
const SETTLED_AT: f64 = 10.0;

pub fn export(args: &ExportArgs, mode: ThemeMode) -> Result<()> {
    if !(args.width > 0.0 && args.height > 0.0) {
        bail!("export size must be positive, got {}x{}", args.width, args.height);
    }
    fs::create_dir_all(&args.out)
        .with_context(|| format!("creating {}", args.out.display()))?;

    // The map is exported fully drawn, without a sweep frozen mid-lap.
    let page = Page::new(0.0).with_reduced_motion(true);
    let viewport = Viewport::new(args.width, args.height);

    for section in SectionId::ALL {
        let rendered = page.render_section(section, &viewport, SETTLED_AT);
        let svg = render_svg(&rendered.commands, args.width, rendered.height, mode);
        write_file(&args.out.join(format!("{section}.svg")), &svg)?;
    }
    let rendered = page.render(&viewport, SETTLED_AT);
    let svg = render_svg(&rendered.commands, args.width, rendered.height, mode);
    write_file(&args.out.join("page.svg"), &svg)?;

    tracing::info!(out = %args.out.display(), sections = SectionId::ALL.len(), "export finished");
    Ok(())
}

fn write_file(path: &std::path::Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("writing {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote svg");
    Ok(())
}

/// The requested dataset, or all of them keyed by name.
pub fn dump_value(name: Option<&str>) -> Result<Value> {
    match name {
        Some(name) => dataset_json(name)
            .with_context(|| format!("known datasets: {}", DATASET_NAMES.join(", "))),
        None => {
            let mut all = Map::new();
            for name in DATASET_NAMES {
                all.insert(name.to_string(), dataset_json(name)?);
            }
            Ok(Value::Object(all))
        }
    }
}

pub fn dump(args: &DumpArgs) -> Result<()> {
    let value = dump_value(args.name.as_deref())?;
    let text = if args.compact {
        serde_json::to_string(&value)?
    } else {
        serde_json::to_string_pretty(&value)?
    };
    let mut out = stdout().lock();
    writeln!(out, "{text}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dump_single_dataset() {
        let teams = dump_value(Some("teams")).unwrap_or_else(|e| panic!("{e:#}"));
        let names: Vec<&str> = teams
            .as_array()
            .map(|a| a.iter().filter_map(|t| t["name"].as_str()).collect())
            .unwrap_or_default();
        assert_eq!(
            names,
            ["Scuderia Ferrari", "Red Bull Racing", "McLaren", "Mercedes-AMG"]
        );
    }

    #[test]
    fn dump_everything() {
        let all = dump_value(None).unwrap_or_else(|e| panic!("{e:#}"));
        let keys: Vec<&String> = all.as_object().map(|m| m.keys().collect()).unwrap_or_default();
        assert_eq!(keys.len(), DATASET_NAMES.len());
    }

    #[test]
    fn dump_unknown_lists_alternatives() {
        let err = dump_value(Some("pitlane")).err().map(|e| format!("{e:#}"));
        let msg = err.unwrap_or_default();
        assert!(msg.contains("known datasets"));
        assert!(msg.contains("pitlane"));
    }

    #[test]
    fn export_rejects_empty_size() {
        let args = ExportArgs {
            out: std::env::temp_dir().join("paddock-export-never-written"),
            width: 0.0,
            height: 800.0,
        };
        assert!(export(&args, ThemeMode::Dark).is_err());
    }
}
