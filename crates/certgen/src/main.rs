//! Command-line batch driver

use anyhow::{bail, Context};
use certgen::{archive_documents, Generator, RenderProfile, Roster};
use clap::Parser;
use std::path::PathBuf;

/// Batch certificate generator
#[derive(Debug, Parser)]
#[command(name = "certgen", version, about)]
struct Args {
    /// CSV roster with recipient data
    #[arg(long)]
    csv: PathBuf,

    /// Front template raster (PNG or JPEG)
    #[arg(long)]
    front: PathBuf,

    /// Back template raster (PNG or JPEG)
    #[arg(long)]
    back: PathBuf,

    /// Output directory
    #[arg(long, default_value = "certificates")]
    output: PathBuf,

    /// Optional JSON render profile overriding styles and coordinates
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Bundle the composed documents into this zip file after the run
    #[arg(long)]
    archive: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    for (label, path) in [
        ("CSV roster", &args.csv),
        ("front template", &args.front),
        ("back template", &args.back),
    ] {
        if !path.exists() {
            bail!("{label} not found: {}", path.display());
        }
    }

    let roster = Roster::from_path(&args.csv).context("loading roster")?;
    let mut generator =
        Generator::new(&args.front, &args.back, &args.output).context("preparing batch")?;

    if let Some(path) = &args.profile {
        let profile = RenderProfile::from_path(path)
            .with_context(|| format!("loading profile {}", path.display()))?;
        profile.apply(generator.engine_mut());
    }

    let report = generator.run(&roster, |done, total| {
        println!("[{done}/{total}]");
    });

    println!(
        "Generated {} of {} certificates in {}",
        report.generated,
        roster.len(),
        args.output.display()
    );
    for failure in &report.failures {
        eprintln!(
            "row {} ({}): {}",
            failure.row, failure.name, failure.reason
        );
    }

    if let Some(zip_path) = &args.archive {
        let count = archive_documents(generator.layout(), zip_path)
            .with_context(|| format!("archiving into {}", zip_path.display()))?;
        println!("Archived {count} documents into {}", zip_path.display());
    }

    if !report.is_clean() {
        std::process::exit(1);
    }
    Ok(())
}
