use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{info, info_span, warn};

use stain_cli::settings::Settings;
use stain_core::{PngPreviewEncoder, Sampler, Session, SessionError, load_image_file};
use stain_model::{EstimationResult, HistoryEntry};
use stain_persistence::HistoryStore;

use crate::cli::{ConfigArgs, EstimateArgs, HistoryCommand, SweepArgs};
use crate::summary::{print_entry, print_estimate, print_history, print_sweep};

/// Resolved settings plus the file locations in effect for this run.
pub struct AppContext {
    pub settings: Settings,
    pub config_path: PathBuf,
    pub history_path: PathBuf,
}

/// Outcome of `estimate`, printed by the summary.
pub struct EstimateReport {
    pub file_name: String,
    pub image_width: u32,
    pub image_height: u32,
    pub result: EstimationResult,
    pub overlay_path: Option<PathBuf>,
}

pub fn run_estimate(args: &EstimateArgs, ctx: &AppContext) -> Result<()> {
    let points = args.points.unwrap_or(ctx.settings.sampling.default_points);
    let span = info_span!("estimate", image = %args.image.display(), points);
    let _guard = span.enter();

    let mut session = open_session(&args.image, points, args.seed.or(ctx.settings.sampling.seed))?;
    let result = session.run_estimate().context("Estimation failed")?;

    let overlay_path = match &args.overlay_out {
        Some(path) => {
            write_overlay(&session, path)?;
            Some(path.clone())
        }
        None => None,
    };

    let (image_width, image_height) = session
        .image()
        .map(|image| (image.width(), image.height()))
        .unwrap_or_default();
    print_estimate(&EstimateReport {
        file_name: session.file_name().unwrap_or_default().to_string(),
        image_width,
        image_height,
        result,
        overlay_path,
    });

    if args.save {
        let encoder = PngPreviewEncoder::new(ctx.settings.preview.max_size);
        let entry = session
            .commit(&encoder)
            .context("Failed to prepare history entry")?;
        let id = entry.id.clone();
        let mut store = HistoryStore::open(&ctx.history_path);
        store
            .append(entry)
            .with_context(|| format!("Failed to save history to {}", ctx.history_path.display()))?;
        println!("Saved to history as {id}");
    }
    Ok(())
}

pub fn run_sweep(args: &SweepArgs, ctx: &AppContext) -> Result<()> {
    let sampling = &ctx.settings.sampling;
    let counts = sweep_counts(
        args.from.unwrap_or(sampling.min_points),
        args.to.unwrap_or(sampling.max_points),
        args.step.unwrap_or(sampling.step),
    );
    let Some(&first) = counts.first() else {
        bail!("Empty sweep range");
    };
    let span = info_span!("sweep", image = %args.image.display(), runs = counts.len());
    let _guard = span.enter();

    let mut session = open_session(&args.image, first, args.seed.or(sampling.seed))?;
    session.run_estimate().context("Estimation failed")?;

    // Once estimated, each count change re-estimates on the fresh samples
    let mut rows = Vec::with_capacity(counts.len());
    for &count in &counts {
        session
            .set_sample_count(count)
            .with_context(|| format!("Failed to sample {count} points"))?;
        let result = match session.estimate() {
            Some(result) => *result,
            None => session.run_estimate().context("Estimation failed")?,
        };
        rows.push(result);
    }

    print_sweep(session.file_name().unwrap_or_default(), &rows);
    Ok(())
}

pub fn run_history(command: &HistoryCommand, ctx: &AppContext) -> Result<()> {
    let mut store = HistoryStore::open(&ctx.history_path);
    match command {
        HistoryCommand::List => {
            if store.is_empty() {
                println!("No saved calculations in {}", ctx.history_path.display());
            } else {
                print_history(store.all());
            }
        }
        HistoryCommand::Show { id } => {
            let entry = find_entry(&store, id)?;
            print_entry(entry);
        }
        HistoryCommand::Remove { id } => {
            if store.remove(id).context("Failed to update history")? {
                println!("Removed {id}");
            } else {
                warn!(id = %id, "No history entry to remove");
                println!("No history entry with id {id}");
            }
        }
        HistoryCommand::Clear => {
            let count = store.len();
            store.clear().context("Failed to clear history")?;
            println!("Removed {count} saved calculation(s)");
        }
    }
    Ok(())
}

pub fn run_config(args: &ConfigArgs, ctx: &AppContext) -> Result<()> {
    if args.write_default {
        Settings::default().save_to(&ctx.config_path)?;
        info!("Wrote default settings to {}", ctx.config_path.display());
        println!("Wrote default settings to {}", ctx.config_path.display());
        return Ok(());
    }
    println!("# Settings file: {}", ctx.config_path.display());
    println!("# History file: {}", ctx.history_path.display());
    print!("{}", ctx.settings.to_toml()?);
    Ok(())
}

/// Sample counts from `from` to `to` inclusive, `step` apart.
///
/// A zero step is treated as one and a zero count is skipped, since no
/// estimate can be made from it. An inverted range is empty.
pub fn sweep_counts(from: usize, to: usize, step: usize) -> Vec<usize> {
    if from > to {
        return Vec::new();
    }
    (from..=to)
        .step_by(step.max(1))
        .filter(|&count| count > 0)
        .collect()
}

fn open_session(image: &Path, points: usize, seed: Option<u64>) -> Result<Session> {
    let (file_name, buffer) = load_image_file(image)
        .map_err(SessionError::from)
        .with_context(|| format!("Failed to load image {}", image.display()))?;
    let sampler = match seed {
        Some(seed) => Sampler::seeded(seed),
        None => Sampler::from_entropy(),
    };
    let mut session = Session::with_sampler(sampler);
    session.set_sample_count(points)?;
    session.open_image(file_name, buffer)?;
    Ok(session)
}

fn write_overlay(session: &Session, path: &Path) -> Result<()> {
    let overlay = session.overlay().context("No samples to export")?;
    let json = serde_json::to_string_pretty(&overlay).context("Failed to serialize overlay")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write overlay to {}", path.display()))?;
    info!("Wrote overlay points to {}", path.display());
    Ok(())
}

fn find_entry<'a>(store: &'a HistoryStore, id: &str) -> Result<&'a HistoryEntry> {
    match store.get(id) {
        Some(entry) => Ok(entry),
        None => bail!("No history entry with id {id}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_counts_inclusive() {
        assert_eq!(sweep_counts(100, 500, 100), vec![100, 200, 300, 400, 500]);
        assert_eq!(sweep_counts(100, 450, 100), vec![100, 200, 300, 400]);
    }

    #[test]
    fn test_sweep_counts_edge_cases() {
        assert_eq!(sweep_counts(5, 5, 100), vec![5]);
        assert_eq!(sweep_counts(3, 5, 0), vec![3, 4, 5]);
        assert!(sweep_counts(10, 1, 1).is_empty());
    }

    #[test]
    fn test_sweep_counts_skips_zero() {
        assert_eq!(sweep_counts(0, 200, 100), vec![100, 200]);
        assert_eq!(sweep_counts(0, 2, 1), vec![1, 2]);
        assert!(sweep_counts(0, 0, 100).is_empty());
    }
}
