//! aire CLI - IMECA conversion and wind direction interpolation

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use aire_algorithms::imeca::{convert_many_codes, UnknownPollutantPolicy};
use aire_algorithms::interpolation::{
    directional_idw_grid, directional_idw_samples, DirectionalIdwGridParams, DirectionalIdwParams,
};
use aire_core::{CoordinateSystem, DirectionalSample, GeoTransform, Point};

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "aire")]
#[command(author, version, about = "Mexico City air-quality index and wind tools", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert pollutant concentrations to IMECA
    Imeca {
        /// Pollutant code: O3, PM10, PM2, NO2, SO2, CO (or comma-separated, one per value)
        pollutant: String,
        /// Concentrations (ppb for O3/NO2/SO2, ppm for CO, µg/m³ for PM); NA for missing
        #[arg(required = true, allow_hyphen_values = true)]
        values: Vec<String>,
        /// Fail on unknown pollutant codes instead of reporting NA
        #[arg(long)]
        strict: bool,
    },
    /// Interpolate wind direction with directional IDW
    Wind {
        /// File with one `x,y,bearing` sample per line
        #[arg(long, conflicts_with_all = ["sources", "values"])]
        samples: Option<PathBuf>,
        /// Source points as "x,y;x,y;..."
        #[arg(long, requires = "values")]
        sources: Option<String>,
        /// Bearings in degrees at the source points, "a,b,..."
        #[arg(long, requires = "sources", allow_hyphen_values = true)]
        values: Option<String>,
        /// Query points as "x,y;x,y;..."
        #[arg(long, conflicts_with = "grid")]
        targets: Option<String>,
        /// Interpolate onto a grid of ROWSxCOLS cells
        #[arg(long, requires = "origin")]
        grid: Option<String>,
        /// Upper-left corner of the grid as "x,y"
        #[arg(long, allow_hyphen_values = true)]
        origin: Option<String>,
        /// Grid cell size
        #[arg(long, default_value = "1.0")]
        cell: f64,
        /// IDW power
        #[arg(short, long, default_value = "2.0", allow_hyphen_values = true)]
        power: f64,
        /// Treat coordinates as lon,lat degrees and use great-circle distance
        #[arg(short, long)]
        geographic: bool,
    },
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn spinner(msg: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    Ok(pb)
}

/// IMECA band name for an index value
fn imeca_category(index: i32) -> &'static str {
    match index {
        i32::MIN..=50 => "Buena",
        51..=100 => "Regular",
        101..=150 => "Mala",
        151..=200 => "Muy mala",
        _ => "Extremadamente mala",
    }
}

fn parse_concentration(s: &str) -> Result<Option<f64>> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("na") || s.is_empty() {
        return Ok(None);
    }
    let v: f64 = s
        .parse()
        .with_context(|| format!("Invalid concentration: {}", s))?;
    Ok(Some(v))
}

fn parse_point(s: &str) -> Result<Point> {
    let parts: Vec<&str> = s.trim().split(',').collect();
    if parts.len() != 2 {
        anyhow::bail!("Point must be 'x,y', got: {}", s);
    }
    let x: f64 = parts[0].trim().parse().context("Invalid x")?;
    let y: f64 = parts[1].trim().parse().context("Invalid y")?;
    Ok(Point::new(x, y))
}

fn parse_points(s: &str) -> Result<Vec<Point>> {
    s.split(';')
        .filter(|p| !p.trim().is_empty())
        .map(parse_point)
        .collect()
}

fn parse_values(s: &str) -> Result<Vec<f64>> {
    s.split(',')
        .map(|v| {
            v.trim()
                .parse::<f64>()
                .with_context(|| format!("Invalid bearing: {}", v))
        })
        .collect()
}

fn parse_grid(s: &str) -> Result<(usize, usize)> {
    let (rows, cols) = s
        .to_lowercase()
        .split_once('x')
        .map(|(r, c)| (r.trim().to_string(), c.trim().to_string()))
        .with_context(|| format!("Grid must be 'ROWSxCOLS', got: {}", s))?;
    Ok((
        rows.parse().context("Invalid grid rows")?,
        cols.parse().context("Invalid grid cols")?,
    ))
}

fn parse_sample_line(line: &str) -> Result<DirectionalSample> {
    let parts: Vec<&str> = line.split(',').collect();
    if parts.len() != 3 {
        anyhow::bail!("Sample must be 'x,y,bearing', got: {}", line);
    }
    let x: f64 = parts[0].trim().parse().context("Invalid x")?;
    let y: f64 = parts[1].trim().parse().context("Invalid y")?;
    let value: f64 = parts[2].trim().parse().context("Invalid bearing")?;
    Ok(DirectionalSample::new(x, y, value))
}

fn read_samples(path: &PathBuf) -> Result<Vec<DirectionalSample>> {
    let pb = spinner("Reading samples...")?;
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let samples = text
        .lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty() && !l.trim_start().starts_with('#'))
        .map(|(n, l)| parse_sample_line(l).with_context(|| format!("line {}", n + 1)))
        .collect::<Result<Vec<_>>>()?;
    pb.finish_and_clear();
    info!("Read {} samples from {}", samples.len(), path.display());
    Ok(samples)
}

fn inline_samples(sources: &str, values: &str) -> Result<Vec<DirectionalSample>> {
    let points = parse_points(sources)?;
    let values = parse_values(values)?;
    if points.len() != values.len() {
        anyhow::bail!(
            "{} source points but {} bearings",
            points.len(),
            values.len()
        );
    }
    Ok(points
        .into_iter()
        .zip(values)
        .map(|(p, v)| DirectionalSample::new(p.x, p.y, v))
        .collect())
}

fn fmt_bearing(v: f64) -> String {
    if v.is_nan() {
        "NA".to_string()
    } else {
        format!("{:.2}", v)
    }
}

// ─── Main ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        // ── IMECA ────────────────────────────────────────────────────
        Commands::Imeca {
            pollutant,
            values,
            strict,
        } => {
            let policy = if strict {
                UnknownPollutantPolicy::Error
            } else {
                UnknownPollutantPolicy::Missing
            };
            let codes: Vec<&str> = pollutant.split(',').map(str::trim).collect();
            let concentrations = values
                .iter()
                .map(|v| parse_concentration(v))
                .collect::<Result<Vec<_>>>()?;

            let indices = convert_many_codes(&codes, &concentrations, policy)
                .context("Failed to convert to IMECA")?;

            for (i, idx) in indices.iter().enumerate() {
                let code = if codes.len() == 1 { codes[0] } else { codes[i] };
                let raw = if concentrations.len() == 1 {
                    &values[0]
                } else {
                    &values[i]
                };
                match idx {
                    Some(idx) => println!("{}\t{}\t{}\t{}", code, raw, idx, imeca_category(*idx)),
                    None => println!("{}\t{}\tNA", code, raw),
                }
            }
        }

        // ── Wind ─────────────────────────────────────────────────────
        Commands::Wind {
            samples,
            sources,
            values,
            targets,
            grid,
            origin,
            cell,
            power,
            geographic,
        } => {
            let samples = match (samples, sources, values) {
                (Some(path), _, _) => read_samples(&path)?,
                (None, Some(sources), Some(values)) => inline_samples(&sources, &values)?,
                _ => anyhow::bail!("Provide --samples FILE or --sources with --values"),
            };
            let coordinates = if geographic {
                CoordinateSystem::Geographic
            } else {
                CoordinateSystem::Planar
            };
            debug!("{} samples, {} coordinates", samples.len(), coordinates);

            match (targets, grid) {
                (Some(targets), None) => {
                    let targets = parse_points(&targets)?;
                    let start = Instant::now();
                    let result = directional_idw_samples(
                        &samples,
                        &targets,
                        &DirectionalIdwParams { power, coordinates },
                    )
                    .context("Failed to interpolate")?;
                    info!("Interpolated {} points in {:.2?}", targets.len(), start.elapsed());

                    for (p, v) in targets.iter().zip(result) {
                        println!("{}\t{}\t{}", p.x, p.y, fmt_bearing(v));
                    }
                }
                (None, Some(grid)) => {
                    let (rows, cols) = parse_grid(&grid)?;
                    let origin = parse_point(origin.as_deref().unwrap_or_default())?;
                    let params = DirectionalIdwGridParams {
                        power,
                        coordinates,
                        rows,
                        cols,
                        transform: GeoTransform::new(origin.x, origin.y, cell, -cell),
                    };
                    let start = Instant::now();
                    let raster =
                        directional_idw_grid(&samples, params).context("Failed to interpolate")?;
                    info!(
                        "Interpolated {} x {} grid in {:.2?}",
                        cols,
                        rows,
                        start.elapsed()
                    );

                    let gt = raster.transform();
                    println!(
                        "# origin {},{} cell {}x{}",
                        gt.origin_x, gt.origin_y, gt.cell_width, gt.cell_height
                    );
                    for row in raster.view().rows() {
                        let line: Vec<String> = row.iter().map(|&v| fmt_bearing(v)).collect();
                        println!("{}", line.join("\t"));
                    }
                }
                _ => anyhow::bail!("Provide either --targets or --grid"),
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_points() {
        let pts = parse_points("1,2; 3.5,-4;").unwrap();
        assert_eq!(pts, vec![Point::new(1.0, 2.0), Point::new(3.5, -4.0)]);
        assert!(parse_points("1,2,3").is_err());
    }

    #[test]
    fn test_parse_grid() {
        assert_eq!(parse_grid("10x20").unwrap(), (10, 20));
        assert_eq!(parse_grid("3X4").unwrap(), (3, 4));
        assert!(parse_grid("10").is_err());
    }

    #[test]
    fn test_parse_concentration() {
        assert_eq!(parse_concentration("NA").unwrap(), None);
        assert_eq!(parse_concentration("-1").unwrap(), Some(-1.0));
        assert!(parse_concentration("abc").is_err());
    }

    #[test]
    fn test_inline_samples_length_check() {
        assert!(inline_samples("0,0;1,1", "90").is_err());
        let s = inline_samples("0,0;1,1", "90,180").unwrap();
        assert_eq!(s[1], DirectionalSample::new(1.0, 1.0, 180.0));
    }

    #[test]
    fn test_imeca_category() {
        assert_eq!(imeca_category(0), "Buena");
        assert_eq!(imeca_category(50), "Buena");
        assert_eq!(imeca_category(51), "Regular");
        assert_eq!(imeca_category(150), "Mala");
        assert_eq!(imeca_category(200), "Muy mala");
        assert_eq!(imeca_category(201), "Extremadamente mala");
    }
}
