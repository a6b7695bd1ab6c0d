//! fOS Audit - command-line entry point
//!
//! `fos-audit <page.html> [settings.json]` runs one collection pass and
//! prints the annotation snapshot, per-record layout and live regions as
//! JSON on stdout. Logs go to stderr.

use anyhow::{Context, Result, bail};
use fos_a11y::{Auditor, ElementMeta, LiveRegionMonitor, MetaSnapshot, Settings, TipLayout};
use fos_dom::Page;
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report<'a> {
    annotations: &'a MetaSnapshot,
    layouts: Vec<PlacedRecord<'a>>,
    live_regions: Vec<LiveRegion>,
}

#[derive(Serialize)]
struct PlacedRecord<'a> {
    record: &'a ElementMeta,
    layout: TipLayout,
}

#[derive(Serialize)]
struct LiveRegion {
    document: u32,
    tag: String,
    text: String,
}

fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();

    let mut args = std::env::args().skip(1);
    let Some(html_path) = args.next().map(PathBuf::from) else {
        bail!("usage: fos-audit <page.html> [settings.json]");
    };
    let settings = match args.next() {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading settings from {path}"))?;
            Settings::from_json(&json).with_context(|| format!("loading settings from {path}"))?
        }
        None => Settings::default(),
    };

    let html = std::fs::read_to_string(&html_path)
        .with_context(|| format!("reading {}", html_path.display()))?;
    let doc = fos_html::parse(&html).with_context(|| format!("parsing {}", html_path.display()))?;
    let page = Page::new(doc);
    tracing::info!("Auditing {}", html_path.display());

    let auditor = Auditor::new(settings.clone());
    let snapshot = auditor.collect(&page);

    let layouts = snapshot
        .iter()
        .filter_map(|record| {
            TipLayout::compute(record, &snapshot.bounds, &settings, false)
                .map(|layout| PlacedRecord { record, layout })
        })
        .collect();

    let mut monitor = LiveRegionMonitor::default();
    monitor.apply_settings(&settings);
    monitor.observe_live_regions(&page);
    let live_regions = monitor
        .regions()
        .filter_map(|region| {
            let doc = page.document(region.document).ok()?;
            Some(LiveRegion {
                document: region.document.0,
                tag: doc.tag(region.node)?.to_string(),
                text: doc.text_content(region.node).trim().to_string(),
            })
        })
        .collect();

    let report = Report {
        annotations: &snapshot,
        layouts,
        live_regions,
    };
    tracing::info!("{} annotated elements", snapshot.len());
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
