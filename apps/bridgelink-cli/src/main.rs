//! `bridgelink-cli` — analyse one recorded route end to end.
//!
//! Reads a saved routing response, a saved geometry-service response, and
//! the bridge attribute dataset; writes `RouteData.json`, `route_nodes.csv`
//! and, given an empirical delay dataset, `loss_timeline.csv`.
//!
//! Run with:
//!   cargo run -p bridgelink-cli -- \
//!     --route route.json --geometry overpass.json \
//!     --attributes obstacle_data.json --delays delays.csv --out out/
//!
//! Set `RUST_LOG=debug` to print the routing URL and the obstacle query.

mod providers;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use bl_core::{AnalysisConfig, GeoPoint, SimRng};
use bl_netsim::{EmpiricalSampler, ReconfigDataset};
use bl_output::write_exports;
use bl_session::Session;

use providers::{AttributeFile, GeometryFile, RouteFile};

#[derive(Parser, Debug)]
#[command(name = "bridgelink-cli", version, about = "Bridge obstruction analysis for a driving route")]
struct Cli {
    /// Recorded routing-service response (JSON).
    #[arg(long)]
    route: PathBuf,

    /// Recorded geometry-service response (JSON).
    #[arg(long)]
    geometry: PathBuf,

    /// Bridge attribute dataset (JSON keyed by way id).
    #[arg(long)]
    attributes: PathBuf,

    /// Empirical reconfiguration delays (CSV); enables the loss timeline.
    #[arg(long)]
    delays: Option<PathBuf>,

    /// Analysis configuration (JSON).  Defaults apply to missing fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the speed cap, km/h.
    #[arg(long)]
    max_speed: Option<f64>,

    /// Override the RNG seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Route start as `LAT,LON`; only used to render the routing request.
    #[arg(long, value_parser = parse_point, default_value = "0,0")]
    from: GeoPoint,

    /// Route end as `LAT,LON`.
    #[arg(long, value_parser = parse_point, default_value = "0,0")]
    to: GeoPoint,

    /// Output directory (created if missing).
    #[arg(long)]
    out: PathBuf,
}

fn parse_point(s: &str) -> Result<GeoPoint, String> {
    let (lat, lon) = s.split_once(',').ok_or_else(|| format!("expected LAT,LON, got {s:?}"))?;
    let lat: f64 = lat.trim().parse().map_err(|_| format!("invalid latitude {lat:?}"))?;
    let lon: f64 = lon.trim().parse().map_err(|_| format!("invalid longitude {lon:?}"))?;
    Ok(GeoPoint::new(lat, lon))
}

fn load_config(cli: &Cli) -> Result<AnalysisConfig> {
    let mut config = match &cli.config {
        Some(path) => AnalysisConfig::from_json_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };
    if let Some(kmh) = cli.max_speed {
        config.max_speed_kmh = kmh;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = load_config(&cli)?;
    let seed = config.seed;

    let mut session = Session::new(
        config,
        RouteFile(cli.route.clone()),
        GeometryFile(cli.geometry.clone()),
        AttributeFile(cli.attributes.clone()),
    )
    .context("invalid analysis configuration")?;

    session.lookup_route(cli.from, cli.to).context("route lookup")?;
    session.lookup_obstacles().context("obstacle lookup")?;

    let export = session.route_export().context("analysis did not complete")?;

    let loss = match &cli.delays {
        Some(path) => {
            let dataset = ReconfigDataset::load_path(path)
                .with_context(|| format!("loading delay dataset {}", path.display()))?;
            let mut sampler = EmpiricalSampler::new(dataset, SimRng::new(seed));
            session.loss_timeline(&mut sampler)
        }
        None => None,
    };

    std::fs::create_dir_all(&cli.out).with_context(|| format!("creating {}", cli.out.display()))?;
    write_exports(&cli.out, &export, loss.as_ref()).context("writing exports")?;

    let obstructed = export.route_data.iter().filter(|r| r.obstructed_time > 0.0).count();
    log::info!(
        "{} nodes, {} bridge(s), {} tunnel(s), {obstructed} obstructed node(s){}",
        export.route_data.len(),
        export.obstacles.len(),
        export.tunnels.len(),
        loss.map(|l| format!(", {} loss entries", l.len())).unwrap_or_default(),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::parse_point;

    #[test]
    fn parses_lat_lon() {
        let p = parse_point("52.52, 13.405").unwrap();
        assert_eq!((p.lat, p.lon), (52.52, 13.405));
        assert!(parse_point("52.52").is_err());
        assert!(parse_point("north,13").is_err());
    }
}
