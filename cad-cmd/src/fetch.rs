//! `fetch` and `snapshot`: pull panel artifacts from the analytics service.
//!
//! Requests go through the same [`Panel`] lifecycle the dashboard uses, so
//! URLs, status handling and response normalization are identical.

use anyhow::{anyhow, bail, Context};
use cad_core::cases::{rank_cases, RankedTable};
use cad_core::client::HttpTransport;
use cad_core::config::DashboardConfig;
use cad_core::fetch::FetchState;
use cad_core::image::{ImageArtifact, MemoryUrls};
use cad_core::params::ResponseKind;
use cad_core::status::EMPTY_MESSAGE;
use cad_core::transport::{CasesDecoder, Decode, ImageDecoder, Transport};
use cad_core::{Endpoint, FilterState, Panel, ParamBundle};
use log::{error, info};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// What one panel produced.
#[derive(Debug)]
pub enum PanelOutput {
    Image(ImageArtifact<MemoryUrls>),
    Cases(RankedTable),
}

/// Outcome of a snapshot run.
#[derive(Debug, Default)]
pub struct SnapshotReport {
    pub written: Vec<PathBuf>,
    pub failed: Vec<(Endpoint, String)>,
}

fn http_transport() -> anyhow::Result<HttpTransport> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(60))
        .build()?;
    Ok(HttpTransport::with_client(client))
}

async fn run_panel<T, D>(
    transport: &T,
    base_url: &str,
    endpoint: Endpoint,
    decoder: D,
    bundle: &ParamBundle,
) -> anyhow::Result<D::Output>
where
    T: Transport,
    D: Decode,
{
    let mut panel = Panel::new(endpoint, decoder);
    let ticket = panel
        .update(Some(bundle))
        .ok_or_else(|| anyhow!("{} is missing required parameters", endpoint))?;

    info!("Fetching {}", ticket.request().url(base_url));
    panel.complete(ticket.run(transport, base_url).await);

    match panel.into_state() {
        FetchState::Success(output) => Ok(output),
        FetchState::Failed(e) => Err(anyhow::Error::new(e).context(format!("{} failed", endpoint))),
        FetchState::Idle | FetchState::Loading => bail!("{} did not complete", endpoint),
    }
}

/// Fetch one panel with the given filters.
pub async fn fetch_panel<T: Transport>(
    transport: &T,
    base_url: &str,
    endpoint: Endpoint,
    filters: &FilterState,
    store: &MemoryUrls,
) -> anyhow::Result<PanelOutput> {
    let bundle = ParamBundle::from(filters);
    match endpoint.response_kind() {
        ResponseKind::Image => {
            let decoder = ImageDecoder::new(store.clone());
            let image = run_panel(transport, base_url, endpoint, decoder, &bundle).await?;
            Ok(PanelOutput::Image(image))
        }
        ResponseKind::Json => {
            let cases = run_panel(transport, base_url, endpoint, CasesDecoder, &bundle).await?;
            Ok(PanelOutput::Cases(rank_cases(&cases)))
        }
    }
}

/// File extension for an image content type.
pub fn extension_for(content_type: Option<&str>) -> &'static str {
    let essence = content_type
        .and_then(|ct| ct.split(';').next())
        .map(str::trim)
        .unwrap_or_default();
    match essence {
        "image/svg+xml" => "svg",
        "image/jpeg" => "jpg",
        "image/gif" => "gif",
        "image/webp" => "webp",
        _ => "png",
    }
}

/// Plain-text ranked table.
pub fn render_ranked(table: &RankedTable) -> String {
    if table.is_empty() {
        return format!("{}\n", EMPTY_MESSAGE);
    }

    let mut out = format!("{}\n", table.total_label());
    for row in &table.rows {
        let bar = "#".repeat((row.bar_width / 5.0).round() as usize);
        out.push_str(&format!(
            "{:>4}  {:<30} {:>10} {:>7}  {}\n",
            row.rank_label(),
            row.label,
            row.count_label(),
            row.percentage_label(),
            bar
        ));
    }
    out
}

fn save_image(image: &ImageArtifact<MemoryUrls>, store: &MemoryUrls, path: &Path) -> anyhow::Result<()> {
    let bytes = store
        .bytes(image.image_url())
        .ok_or_else(|| anyhow!("image {} is no longer held", image.image_url()))?;
    fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
    info!("Wrote {} ({} bytes)", path.display(), image.byte_len());
    Ok(())
}

fn image_path(dir: &Path, endpoint: Endpoint, store: &MemoryUrls, image: &ImageArtifact<MemoryUrls>) -> PathBuf {
    let ct = store.content_type(image.image_url());
    dir.join(format!("{}.{}", endpoint.slug(), extension_for(ct.as_deref())))
}

/// Fetch every panel into `out_dir`. A failing panel is recorded and the
/// rest carry on.
pub async fn snapshot<T: Transport>(
    transport: &T,
    base_url: &str,
    filters: &FilterState,
    out_dir: &Path,
) -> anyhow::Result<SnapshotReport> {
    fs::create_dir_all(out_dir).with_context(|| format!("creating {}", out_dir.display()))?;
    let store = MemoryUrls::new();
    let mut report = SnapshotReport::default();

    for endpoint in Endpoint::ALL {
        let written = match fetch_panel(transport, base_url, endpoint, filters, &store).await {
            Ok(PanelOutput::Image(image)) => {
                let path = image_path(out_dir, endpoint, &store, &image);
                save_image(&image, &store, &path).map(|_| path)
            }
            Ok(PanelOutput::Cases(table)) => {
                let path = out_dir.join(format!("{}.txt", endpoint.slug()));
                fs::write(&path, render_ranked(&table))
                    .with_context(|| format!("writing {}", path.display()))
                    .map(|_| path)
            }
            Err(e) => Err(e),
        };

        match written {
            Ok(path) => report.written.push(path),
            Err(e) => {
                error!("{}: {:#}", endpoint, e);
                report.failed.push((endpoint, format!("{:#}", e)));
            }
        }
    }

    Ok(report)
}

pub async fn run_fetch(
    config: &DashboardConfig,
    endpoint: Endpoint,
    filters: &FilterState,
    out: Option<PathBuf>,
) -> anyhow::Result<()> {
    let transport = http_transport()?;
    let store = MemoryUrls::new();

    match fetch_panel(&transport, &config.api_base_url, endpoint, filters, &store).await? {
        PanelOutput::Image(image) => {
            let path = match out {
                Some(path) => path,
                None => image_path(Path::new("."), endpoint, &store, &image),
            };
            save_image(&image, &store, &path)?;
            println!("{} ({}) -> {}", endpoint.title(), filters.year_range_label(), path.display());
        }
        PanelOutput::Cases(table) => {
            let text = render_ranked(&table);
            match out {
                Some(path) => {
                    fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
                    println!("{} ({}) -> {}", endpoint.title(), filters.year_range_label(), path.display());
                }
                None => print!("{}", text),
            }
        }
    }
    Ok(())
}

pub async fn run_snapshot(
    config: &DashboardConfig,
    filters: &FilterState,
    out_dir: &Path,
) -> anyhow::Result<()> {
    let transport = http_transport()?;
    let report = snapshot(&transport, &config.api_base_url, filters, out_dir).await?;

    for path in &report.written {
        println!("wrote {}", path.display());
    }
    for (endpoint, message) in &report.failed {
        println!("failed {}: {}", endpoint, message);
    }

    if report.written.is_empty() {
        bail!("all {} panels failed", report.failed.len());
    }
    info!(
        "Snapshot complete: {} written, {} failed",
        report.written.len(),
        report.failed.len()
    );
    Ok(())
}
