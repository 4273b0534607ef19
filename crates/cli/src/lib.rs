use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use lexis_engine::{EngineConfig, SubstitutionEngine};
use lexis_guards::Guards;
use lexis_vocabulary::{normalize_key, Candidate, VocabularyRecord, VocabularyStore};
use providers::{build_providers, resolve_provider_url, EmbedMode};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::time::Duration;

mod providers;
mod report;

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| {
            if text.ends_with('\n') {
                Ok(())
            } else {
                stdout.write_all(b"\n")
            }
        })
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    print_stdout(&json)
}

#[derive(Parser)]
#[command(name = "lexis")]
#[command(about = "Context-aware vocabulary enrichment", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for output)
    #[arg(long, global = true)]
    quiet: bool,

    /// TOML file overriding engine thresholds
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Provider backend (overrides LEXIS_EMBEDDING_MODE)
    #[arg(long, global = true, value_enum)]
    embed_mode: Option<EmbedMode>,

    /// Base URL of the HTTP providers (overrides LEXIS_PROVIDER_URL)
    #[arg(long, global = true)]
    provider_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite a document with sophisticated synonyms
    Rewrite(RewriteArgs),

    /// Show every candidate's verdict for one word
    Explain(ExplainArgs),

    /// List the builtin vocabulary
    Vocab(VocabArgs),
}

#[derive(Args)]
struct RewriteArgs {
    /// Input file ("-" or omitted reads stdin)
    input: Option<PathBuf>,

    /// Fraction of tokens that may be substituted (default: config max_density)
    #[arg(short, long)]
    density: Option<f32>,

    /// JSON file of custom vocabulary entries
    #[arg(long)]
    vocab: Option<PathBuf>,

    /// Precompute builtin embeddings before the pass
    #[arg(long)]
    warm: bool,

    /// Abort the pass after this many seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Emit the full rewrite as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ExplainArgs {
    /// Word to look up
    word: String,

    /// Sentence the word appears in (defaults to the word alone)
    #[arg(short, long)]
    sentence: Option<String>,

    /// JSON file of custom vocabulary entries
    #[arg(long)]
    vocab: Option<PathBuf>,

    /// Emit results as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct VocabArgs {
    /// Show candidates for a single word
    #[arg(short, long)]
    word: Option<String>,

    /// Emit JSON
    #[arg(long)]
    json: bool,
}

pub async fn main_entry() -> Result<()> {
    let mut cli = Cli::parse();

    let json_output = match &cli.command {
        Commands::Rewrite(args) => args.json,
        Commands::Explain(args) => args.json,
        Commands::Vocab(args) => args.json,
    };
    if json_output {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    if !cli.verbose {
        builder.filter_module("reqwest", log::LevelFilter::Warn);
        builder.filter_module("hyper", log::LevelFilter::Warn);
    }
    builder.target(env_logger::Target::Stderr).init();

    match cli.command {
        Commands::Rewrite(ref args) => run_rewrite(&cli, args).await,
        Commands::Explain(ref args) => run_explain(&cli, args).await,
        Commands::Vocab(ref args) => run_vocab(args),
    }
}

fn load_config(cli: &Cli) -> Result<EngineConfig> {
    match &cli.config {
        Some(path) => EngineConfig::from_toml_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

async fn build_engine(cli: &Cli, vocab: Option<&PathBuf>) -> Result<SubstitutionEngine> {
    let config = load_config(cli)?;
    let mode = EmbedMode::resolve(cli.embed_mode)?;
    let base_url = resolve_provider_url(cli.provider_url.as_deref());
    let (embedder, predictor) = build_providers(mode, &base_url)?;
    log::debug!(
        "Providers: mode={} url={} embedder={}",
        mode.as_str(),
        base_url,
        embedder.model_id()
    );

    let engine = SubstitutionEngine::new(
        config,
        VocabularyStore::new(),
        Guards::new(),
        embedder,
        predictor,
    )
    .context("Invalid engine configuration")?;

    if let Some(path) = vocab {
        let records = VocabularyRecord::load_batch(path)
            .with_context(|| format!("Failed to read vocabulary {}", path.display()))?;
        engine
            .add_custom(&records)
            .await
            .with_context(|| format!("Invalid vocabulary {}", path.display()))?;
    }
    Ok(engine)
}

fn read_input(input: Option<&PathBuf>) -> Result<String> {
    match input {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

async fn run_rewrite(cli: &Cli, args: &RewriteArgs) -> Result<()> {
    let text = read_input(args.input.as_ref())?;
    let engine = build_engine(cli, args.vocab.as_ref()).await?;
    if !engine.is_ready() {
        log::warn!("Providers not ready; every candidate will report MODEL_NOT_READY");
    }
    if args.warm {
        engine.warm_up().await;
    }

    let density = args.density.unwrap_or(engine.config().max_density);
    let pass = engine.process_document(&text, density);
    let rewrite = match args.timeout_secs {
        Some(secs) => tokio::time::timeout(Duration::from_secs(secs), pass)
            .await
            .map_err(|_| anyhow::anyhow!("Rewrite timed out after {secs}s"))?,
        None => pass.await,
    };

    if args.json {
        print_json(&rewrite)
    } else {
        log::info!("{}", report::render_rewrite_summary(&rewrite));
        print_stdout(&rewrite.modified_text)
    }
}

async fn run_explain(cli: &Cli, args: &ExplainArgs) -> Result<()> {
    let engine = build_engine(cli, args.vocab.as_ref()).await?;
    let sentence = args.sentence.clone().unwrap_or_else(|| args.word.clone());
    let results = engine.evaluate_word(&sentence, &args.word).await;

    if args.json {
        print_json(&results)
    } else {
        print_stdout(&report::render_explain(&args.word, &sentence, &results))
    }
}

fn run_vocab(args: &VocabArgs) -> Result<()> {
    let store = VocabularyStore::new();

    if let Some(word) = &args.word {
        let candidates = store.lookup(word);
        if args.json {
            return print_json(&candidates);
        }
        return print_stdout(&report::render_vocab_word(&normalize_key(word), &candidates));
    }

    let entries: Vec<_> = store
        .builtin_words()
        .into_iter()
        .map(|word| {
            let candidates = store.lookup(&word);
            (word, candidates)
        })
        .collect();
    if args.json {
        let map: BTreeMap<String, Vec<Candidate>> = entries.into_iter().collect();
        return print_json(&map);
    }
    print_stdout(&report::render_vocab_index(&entries))
}
