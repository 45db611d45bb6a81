use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use bst_avl::compare;
use bst_avl::records::{self, Dataset};

/// Environment variable consulted when `--seed` isn't given.
const SEED_VAR: &str = "BST_AVL_SEED";

/// Loads a delimited file, inserts every unique row into an unbalanced BST and an AVL tree, then
/// times searching both for a random sample of keys.
#[derive(Parser, Debug)]
#[command(name = "bst-avl")]
#[command(about = "Compare an unbalanced BST and an AVL tree on the same records.", long_about = None)]
struct Cli {
    /// Delimited file with a header line.
    path: PathBuf,
    /// Field delimiter.
    #[arg(long, default_value_t = ';')]
    delimiter: char,
    /// Column holding the key.
    #[arg(long, default_value = "cod_operacao")]
    key: String,
    /// How many keys to search for.
    #[arg(long, default_value_t = 1000)]
    samples: usize,
    /// Seed for sampling keys (or set BST_AVL_SEED). Random if omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Print loading details to stderr.
    #[arg(long, short)]
    verbose: bool,
}

/// The flag wins over the environment; neither means sample from a fresh random seed.
fn resolve_seed(flag: Option<u64>, env: Option<String>) -> Result<Option<u64>> {
    match flag {
        Some(seed) => Ok(Some(seed)),
        None => env
            .map(|s| {
                s.trim()
                    .parse::<u64>()
                    .with_context(|| format!("{} must be a u64, got {:?}", SEED_VAR, s))
            })
            .transpose(),
    }
}

fn ensure_keys(dataset: &Dataset, key: &str, path: &Path) -> Result<()> {
    if dataset.is_empty() {
        bail!("no rows with a {:?} value in {}", key, path.display());
    }
    Ok(())
}

/// The stderr lines to print before running. `INFO:` lines only show up with `--verbose`.
fn diagnostics(dataset: &Dataset, samples: usize, seed: Option<u64>, verbose: bool) -> Vec<String> {
    let mut lines = Vec::new();
    if verbose {
        lines.push(format!(
            "INFO: loaded {} unique keys ({} blank, {} duplicate rows dropped)",
            dataset.len(),
            dataset.dropped_blank,
            dataset.dropped_duplicates
        ));
        if let Some(seed) = seed {
            lines.push(format!("INFO: sampling with seed {}", seed));
        }
    }
    if samples > dataset.len() {
        lines.push(format!(
            "WARN: asked for {} samples but there are only {} keys; searching all of them.",
            samples,
            dataset.len()
        ));
    }

    lines
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let dataset = records::load(&cli.path, cli.delimiter, &cli.key)
        .with_context(|| format!("loading records from {}", cli.path.display()))?;
    ensure_keys(&dataset, &cli.key, &cli.path)?;

    let seed = resolve_seed(cli.seed, std::env::var(SEED_VAR).ok())?;
    for line in diagnostics(&dataset, cli.samples, seed, cli.verbose) {
        eprintln!("{}", line);
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let comparison = compare::compare(&dataset, cli.samples, &mut rng);
    if !comparison.is_consistent() {
        eprintln!("WARN: node counts or search hits don't match the number of unique keys.");
    }

    println!("{}", comparison);
    Ok(())
}
