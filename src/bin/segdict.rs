use clap::Parser;
use segdict::{
    config::{self, LoaderConfig},
    dictionary::DictionaryLoader,
    Error, MemoryDictionary,
};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Dictionary file, absolute or relative to the current directory
    dictionary: PathBuf,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of entries to print after loading
    #[arg(long, default_value_t = 10)]
    show: usize,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

async fn run(cli: &Cli) -> Result<(), Error> {
    let config: LoaderConfig = match &cli.config {
        Some(path) => config::from_file(path)?,
        None => LoaderConfig::default(),
    };
    info!("config loaded.");
    debug!("config: {:?}", config);

    let loader = DictionaryLoader::new(&config)?;
    let mut dictionary = MemoryDictionary::new();
    let summary = loader.load(&mut dictionary, &cli.dictionary).await?;

    println!(
        "{} entries from {} lines, total frequency {}",
        dictionary.len(),
        summary.lines_read,
        dictionary.total_frequency()
    );
    for token in dictionary.tokens().iter().take(cli.show) {
        if token.pos().is_empty() {
            println!("{}\t{}", token.text(), token.frequency());
        } else {
            println!("{}\t{}\t{}", token.text(), token.frequency(), token.pos());
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = run(&cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
