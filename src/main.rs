use kindle_clippings::config::Config;
use kindle_clippings::convert::convert;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    init_tracing();

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    println!("Input file: {}", config.input_path.display());
    println!("Output directory: {}", config.output_dir.display());

    let summary = match convert(&config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    println!(
        "Processed {} clippings from {} books ({} blocks, {} skipped, {} excluded)",
        summary.clippings, summary.books, summary.blocks, summary.skipped, summary.excluded
    );
    println!("Created {} Markdown files", summary.written.len());

    if !summary.failures.is_empty() {
        eprintln!("Failed to write {} books", summary.failures.len());
        std::process::exit(1);
    }
}
