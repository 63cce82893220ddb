use std::error::Error;

use curate::{Category, CurateConfig, CurationEngine, Params};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => CurateConfig::from_file(path)?,
        None => CurateConfig::default(),
    };
    let engine = CurationEngine::new(config)?;

    let samples = [
        "Comprehensive documentation facilitates collaborative engineering across distributed organizations",
        "aaaaaaaaaaaaaaaaaaaaaaaa",
        "Comprehensive documentation facilitates collaborative engineering across distributed organizations",
        "Reach the maintainer at maintainer@example.org or 555-867-5309 for licensing questions",
    ];
    let filters = ["entropy", "ngram", "readability_fog", "minhash"];

    for text in &samples {
        let outcome = engine.run_filters(text, &filters, &Params::new())?;
        println!("[{}] {}", if outcome.passed { "keep" } else { "drop" }, outcome.reason);
    }

    let masked = engine
        .invoke(
            Category::Rewrite,
            "pii_mask",
            samples[3],
            &Params::new(),
            &engine.collaborators(None, None),
        )
        .await?;
    println!("masked: {}", masked["text"]);

    let topics = [
        "rust borrow checker lifetimes",
        "rust ownership lifetimes traits",
        "sourdough starter flour water",
        "rye flour sourdough loaf",
    ];
    let clustering = engine.cluster(&topics, Some(2), Some(50));
    println!(
        "clusters: {:?} (converged: {})",
        clustering.assignments, clustering.converged
    );

    for _ in 0..10 {
        engine.record_evaluation("reviewer-1", true, true);
        engine.record_evaluation("reviewer-1", false, false);
    }
    println!(
        "P(correct | reviewer-1 says correct) = {:.3}",
        engine.infer_correctness("reviewer-1", true)
    );

    Ok(())
}
