use clap::{Arg, Command};
use humanize::synonyms::{MockMode, MockSynonymSource, SynonymSource, WordsApiProvider};
use humanize::{HumanizeConfig, Humanizer, Intensity, RewriteRequest, Style};
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = Command::new("humanize")
        .version("0.1.0")
        .about("Rewrite machine-generated text so it reads naturally")
        .arg(
            Arg::new("text")
                .help("Text to rewrite (reads stdin when omitted or '-')")
                .index(1),
        )
        .arg(
            Arg::new("style")
                .long("style")
                .short('s')
                .help("Requested style: academic, casual, professional, creative"),
        )
        .arg(
            Arg::new("intensity")
                .long("intensity")
                .short('i')
                .help("Requested intensity: subtle, moderate, aggressive"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Path to a JSON configuration file"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .help("Seed for reproducible word substitution")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("mock")
                .long("mock")
                .short('m')
                .help("Use a mock synonym source instead of WordsAPI")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the full result as JSON")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Show statistics and pipeline logs")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let verbose = matches.get_flag("verbose");
    let use_mock = matches.get_flag("mock");

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(if verbose { "info" } else { "warn" })),
        )
        .init();

    let text = match matches.get_one::<String>("text").map(String::as_str) {
        Some(text) if text != "-" => text.to_string(),
        _ => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let style = matches
        .get_one::<String>("style")
        .map(|s| s.parse::<Style>())
        .transpose()?;
    let intensity = matches
        .get_one::<String>("intensity")
        .map(|s| s.parse::<Intensity>())
        .transpose()?;

    // 1. Configuration: file, then environment, then flags
    let config = match matches.get_one::<String>("config") {
        Some(path) => HumanizeConfig::from_file(Path::new(path))?,
        None => HumanizeConfig::default(),
    };
    let mut config = config.apply_env()?;
    if let Some(seed) = matches.get_one::<u64>("seed") {
        config.seed = Some(*seed);
    }

    // 2. Synonym source
    let source: Arc<dyn SynonymSource> = if use_mock {
        Arc::new(MockSynonymSource::new(MockMode::Empty))
    } else {
        if config.lookup.api_key.is_none() {
            eprintln!("❌ WORDS_API_KEY environment variable not set");
            eprintln!("   Set it with: export WORDS_API_KEY=your_api_key");
            eprintln!("   Or use --mock to skip synonym lookups");
            return Err("Missing API key".into());
        }
        Arc::new(WordsApiProvider::from_config(&config.lookup)?)
    };

    if verbose {
        println!("📝 Input: {} characters", text.chars().count());
        println!("📡 Synonyms: {}", source.source_name());
        if let Some(seed) = config.seed {
            println!("🎲 Seed: {}", seed);
        }
        println!();
    }

    // 3. Rewrite
    let humanizer = Humanizer::new(config, source)?;
    let mut request = RewriteRequest::new(text);
    request.style = style;
    request.intensity = intensity;

    let result = match humanizer.humanize(&request).await {
        Ok(result) => result,
        Err(e) => {
            eprintln!("❌ {} ({})", e, e.code());
            return Err(e.into());
        }
    };

    // 4. Output
    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("{}", result.humanized_text);

    if verbose {
        let stats = &result.statistics;
        println!();
        println!("📊 Statistics:");
        println!("   Style / intensity: {} / {}", result.style, result.intensity);
        println!(
            "   Words: {} → {}",
            stats.original_word_count, stats.humanized_word_count
        );
        println!("   Changes: {}", stats.changes_count);
        println!("   Readability: {:.1}", stats.readability_score);
        println!("   Time: {:.3}s", result.processing_time);
    }

    Ok(())
}
