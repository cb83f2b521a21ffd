use std::path::Path;

use crate::app::{AppContext, Result};
use crate::pipeline::Pipeline;
use crate::sources::Source;
use crate::store;

/// Run the named sources (all when empty) and print each new announcement.
///
/// Unknown aliases print their message; failures are reported per source and
/// do not stop the remaining runs.
pub async fn run(ctx: &AppContext, aliases: &[String], dry_run: bool) -> Result<()> {
    let pipeline = if dry_run {
        ctx.dry_run_pipeline()?
    } else {
        ctx.pipeline()
    };

    let aliases: Vec<String> = if aliases.is_empty() {
        Source::ALL.iter().map(|s| s.alias().to_string()).collect()
    } else {
        aliases.to_vec()
    };

    let mut announced = 0;
    let mut errors = 0;

    for alias in &aliases {
        match run_one(&pipeline, alias).await {
            Ok(true) => announced += 1,
            Ok(false) => {}
            Err(e) => {
                errors += 1;
                eprintln!("Error running {}: {}", alias, e);
            }
        }
    }

    tracing::info!(
        "Run complete: {} announced, {} errors{}",
        announced,
        errors,
        if dry_run { " (dry run)" } else { "" }
    );
    Ok(())
}

async fn run_one(pipeline: &Pipeline, alias: &str) -> Result<bool> {
    match pipeline.run_alias(alias).await? {
        Some(post) => {
            println!("{}", post);
            Ok(Source::from_alias(alias).is_some())
        }
        None => {
            tracing::info!("{}: nothing new", alias);
            Ok(false)
        }
    }
}

pub fn list_sources() {
    for source in Source::ALL {
        println!("{:<5} {:<18} {}", source.alias(), source.publisher(), source.url());
    }
}

/// Re-record fingerprints from an archive of past posts.
pub fn recon(ctx: &AppContext, path: &Path) -> Result<()> {
    let archive = std::fs::read_to_string(path)?;
    let report = store::reconstruct(&*ctx.store, &archive)?;

    println!(
        "Recon complete: {} added, {} skipped (already recorded)",
        report.added, report.skipped
    );
    Ok(())
}
