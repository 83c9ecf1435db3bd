//! poi-map: load the points feed and render the filtered map as SVG.
//!
//! ```text
//! poi-map --points https://example.com/data/points.json --filter hospital
//! ```
//!
//! An unreachable feed still produces a map, just an empty one.

use std::{
    fs,
    io::Read,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value;
use tracing::{info, warn, Level};
use tracing_subscriber::EnvFilter;

use poi_map::{
    points::points_source_for, svg::SvgBackend, Category, FilterUi, MapConfig, MapController,
    ALL_TOKEN,
};

#[derive(Parser)]
#[command(name = "poi-map")]
#[command(version, about = "Render categorized points of interest on a map", long_about = None)]
struct Cli {
    /// Points feed: http(s) URL or file path
    #[arg(short, long)]
    points: Option<String>,

    /// Category to show; `todos` shows everything
    #[arg(short, long, default_value = ALL_TOKEN)]
    filter: String,

    /// Country polygons (GeoJSON URL or file) drawn as land
    #[arg(short, long)]
    basemap: Option<String>,

    /// JSON file with map settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output file
    #[arg(short, long, default_value = "map.svg")]
    output: PathBuf,

    /// Canvas width in pixels
    #[arg(long)]
    width: Option<f64>,

    /// Canvas height in pixels
    #[arg(long)]
    height: Option<f64>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// The filter bar: one button for everything plus one per category.
struct FilterBar {
    tokens: Vec<String>,
    active: Vec<bool>,
}

impl FilterBar {
    fn new() -> Self {
        let tokens: Vec<String> = std::iter::once(ALL_TOKEN)
            .chain(Category::ALL.iter().map(|c| c.label()))
            .map(String::from)
            .collect();
        let active = vec![false; tokens.len()];
        Self { tokens, active }
    }

    fn active_token(&self) -> Option<&str> {
        self.active
            .iter()
            .position(|a| *a)
            .map(|i| self.tokens[i].as_str())
    }
}

impl FilterUi for FilterBar {
    fn filter_tokens(&self) -> Vec<String> {
        self.tokens.clone()
    }

    fn set_active(&mut self, index: usize, active: bool) {
        if let Some(flag) = self.active.get_mut(index) {
            *flag = active;
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => MapConfig::from_file(path)?,
        None => MapConfig::default(),
    };
    if let Some(points) = cli.points {
        config.points = points;
    }
    if let Some(w) = cli.width {
        config.width = w;
    }
    if let Some(h) = cli.height {
        config.height = h;
    }

    let mut backend = SvgBackend::new(config.width, config.height);
    if let Some(geojson) = cli.basemap.as_deref().and_then(load_basemap) {
        backend = backend.with_basemap(geojson);
    }

    let mut controller = MapController::new(&backend, &config);
    let mut bar = FilterBar::new();
    controller.bind_filters(&mut bar);
    if controller.activate_token(&cli.filter, &mut bar).is_none() {
        warn!(filter = %cli.filter, "unknown filter; showing everything");
    }

    info!(source = %config.points, "loading points");
    let source = points_source_for(&config.points);
    controller.load(source.as_ref());

    let session = controller.session();
    let Some(surface) = session.surface() else {
        anyhow::bail!("no map surface to render");
    };
    info!(
        filter = bar.active_token().unwrap_or(ALL_TOKEN),
        visible = session.visible_count(),
        total = session.registry().len(),
        "rendering"
    );
    let svg = surface.render();
    write_atomic(&cli.output, &svg)?;
    info!(bytes = svg.len(), output = %cli.output.display(), "map written");
    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Land is decoration: a basemap that cannot be read is skipped.
fn load_basemap(location: &str) -> Option<Value> {
    info!(%location, "loading basemap");
    match read_json(location) {
        Ok(geojson) => Some(geojson),
        Err(e) => {
            warn!(%location, error = ?e, "basemap unavailable; rendering without land");
            None
        }
    }
}

fn read_json(location: &str) -> Result<Value> {
    if location.starts_with("http://") || location.starts_with("https://") {
        let resp = ureq::get(location)
            .set("Accept-Encoding", "identity")
            .call()
            .with_context(|| format!("GET {location}"))?;
        let mut body = Vec::new();
        resp.into_reader()
            .read_to_end(&mut body)
            .with_context(|| format!("reading body of {location}"))?;
        Ok(serde_json::from_slice(&body).with_context(|| format!("parsing {location}"))?)
    } else {
        let body = fs::read(location).with_context(|| format!("reading {location}"))?;
        Ok(serde_json::from_slice(&body).with_context(|| format!("parsing {location}"))?)
    }
}

/// Write to a temp file then atomically rename.
fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    fs::write(&tmp, contents).with_context(|| format!("writing {}", Path::new(&tmp).display()))?;
    fs::rename(&tmp, path).with_context(|| format!("renaming onto {}", path.display()))?;
    Ok(())
}
