use binpub::{AppError, PassManifest};
use std::env;
use std::fs;

/// Rewrites a rich-text fragment, publishing the binaries it links to.
fn main() -> Result<(), AppError> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 4 {
        eprintln!("Publishes the binaries linked from an XHTML fragment and rewrites the links.");
        eprintln!();
        eprintln!(
            "Usage: {} <path/to/manifest.json> <path/to/fragment.xhtml> <path/to/output-dir>",
            args.first().map(String::as_str).unwrap_or("binpub")
        );
        std::process::exit(1);
    }

    let manifest_path = &args[1];
    let fragment_path = &args[2];
    let output_dir = &args[3];

    let manifest = PassManifest::load(manifest_path)?;
    let fragment = fs::read_to_string(fragment_path)?;

    let mut pass = manifest.start_pass(output_dir)?;
    if pass.is_inert() {
        log::warn!("Target location unusable, fragment is written back unchanged");
    }
    let rewritten = pass.rewrite_rich_text(&fragment)?;
    let registry = pass.finish();

    for published in registry.iter() {
        log::info!(
            "{} -> {}",
            published.id,
            published.resolved_path.as_deref().unwrap_or("<unresolved>")
        );
    }
    println!("{}", rewritten);
    Ok(())
}
