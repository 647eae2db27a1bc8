use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use lexika_anki::AnkiExporter;
use lexika_cache::WordCache;
use lexika_config::Config;
use lexika_dictionary::DictionaryRegistry;
use lexika_fetch::{parse_tabular, HttpFetcher};
use lexika_pipeline::{
    DictionaryEnhancement, EnhancementOptions, FieldMapping, MiddlewarePipeline, PipelineData,
};
use lexika_types::WordRecord;
use tracing_subscriber::EnvFilter;

/// Fetch vocabulary notes, enrich them with dictionary data and export
/// them as flashcards.
#[derive(Parser)]
#[command(name = "lexika", version)]
struct Cli {
    /// Anki deck to add cards to
    #[arg(long)]
    deck: Option<String>,

    /// Anki note model to use
    #[arg(long)]
    model: Option<String>,

    /// Dictionary backend (youdao, renren, glossary)
    #[arg(long, default_value = "youdao")]
    service: String,

    /// Write a portable package file instead of a live import
    #[arg(long)]
    output: Option<PathBuf>,

    /// Import records from a tab-separated file instead of the notes API
    #[arg(long)]
    import: Option<PathBuf>,

    /// Skip the already-exported-words cache
    #[arg(long)]
    no_cache: bool,

    /// Leave out phonetic transcriptions
    #[arg(long)]
    no_phonetic: bool,

    /// Leave out example sentences
    #[arg(long)]
    no_examples: bool,

    /// Leave out Collins dictionary data
    #[arg(long)]
    no_collins: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let config = Config::new();

    run(cli, config).await
}

async fn run(cli: Cli, config: Config) -> Result<()> {
    let records = fetch_records(&cli, &config).await?;
    tracing::info!("fetched {} word records", records.len());

    if records.is_empty() {
        tracing::warn!("no word records received");
        return Ok(());
    }

    let use_cache = config.cache.enabled && !cli.no_cache;
    let mut cache = use_cache.then(|| WordCache::load(Path::new(&config.cache.file)));

    let records = match &cache {
        Some(cache) => {
            let fresh = cache.filter_new_words(&records);
            tracing::info!("{} words are new after the cache filter", fresh.len());
            fresh
        }
        None => records,
    };

    if records.is_empty() {
        tracing::info!("no new words to process");
        return Ok(());
    }

    let registry = DictionaryRegistry::new(&config.dictionary);
    let enhancement = DictionaryEnhancement::new(
        &registry,
        &cli.service,
        EnhancementOptions {
            include_phonetic: !cli.no_phonetic,
            include_examples: !cli.no_examples,
            include_collins: !cli.no_collins,
        },
    )?;
    let mapping = FieldMapping::new(&config.anki.field_mappings)?;

    let pipeline = MiddlewarePipeline::new()
        .add_stage(enhancement)
        .add_stage(mapping);

    let output = pipeline
        .process(PipelineData::Records(records.clone()))
        .await?;
    let notes = output
        .into_notes()
        .context("pipeline did not end in rendered notes")?;
    tracing::info!("{} notes survived the pipeline", notes.len());

    if notes.is_empty() {
        tracing::warn!("nothing to export");
        return Ok(());
    }

    let deck = cli.deck.as_deref().unwrap_or(&config.anki.deck_name);
    let model = cli.model.as_deref().unwrap_or(&config.anki.model_name);

    let exporter = AnkiExporter::new(&config.anki.connect_url);
    let success = exporter
        .export(&notes, deck, model, cli.output.as_deref())
        .await?;

    if !success {
        anyhow::bail!("export to '{deck}' failed");
    }

    tracing::info!("exported {} notes to '{deck}'", notes.len());

    if let Some(cache) = cache.as_mut() {
        cache.save_cache(&records)?;
        tracing::info!("cache updated, {} words total", cache.len());
    }

    Ok(())
}

async fn fetch_records(cli: &Cli, config: &Config) -> Result<Vec<WordRecord>> {
    if let Some(path) = &cli.import {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read import file {}", path.display()))?;
        return Ok(parse_tabular(
            &text,
            &config.api.source_lang,
            &config.api.target_lang,
        ));
    }

    let fetcher = HttpFetcher::new(&config.api)?;
    Ok(fetcher.fetch_data().await?)
}
