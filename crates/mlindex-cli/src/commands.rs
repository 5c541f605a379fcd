//! Index command handlers.
//!
//! Each handler returns the text to print so the dispatcher owns stdout.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use mlindex_core::{MetadataInstance, MetadataSchema};
use mlindex_fts::{
    IndexComputer, IndexOp, IndexPlan, IndexRecord, JsonFileStore, LanguageFilter, RecordStore,
    ResourceId,
};

use crate::cli::ResourceInput;
use crate::config::MlindexConfig;

/// List the active languages, optionally with the localized names of `field`.
pub fn cmd_languages(config: &MlindexConfig, field: Option<&str>) -> Result<String> {
    let catalog = config
        .indexing
        .catalog()
        .context("Invalid language configuration")?;

    let mut out = String::new();
    for lang in catalog.active_languages() {
        match field {
            Some(field) => writeln!(out, "{lang}\t{}", catalog.localized_field_name(field, lang))?,
            None => writeln!(out, "{lang}")?,
        }
    }
    Ok(out)
}

/// Compute the plan for a resource and render it.
pub fn cmd_plan(config: &MlindexConfig, input: &ResourceInput, json: bool) -> Result<String> {
    let computer = build_computer(config)?;
    let (resource, schema, instance) = load_input(input)?;

    let plan = computer
        .plan(&resource, &schema, &instance)
        .with_context(|| format!("Failed to plan resource {resource}"))?;

    if json {
        let mut out = serde_json::to_string_pretty(&plan)?;
        out.push('\n');
        Ok(out)
    } else {
        render_plan(&plan)
    }
}

/// Recompute and store the records of a resource.
pub async fn cmd_update(
    config: &MlindexConfig,
    input: &ResourceInput,
    store_override: Option<&Path>,
) -> Result<String> {
    let computer = build_computer(config)?;
    let (resource, schema, instance) = load_input(input)?;
    let store = open_store(config, store_override)?;

    let stats = computer
        .update_index(&resource, &schema, &instance, &store)
        .await
        .with_context(|| format!("Failed to index resource {resource}"))?;

    Ok(format!(
        "Indexed resource {resource} into {}: {} created, {} updated, {} deleted\n",
        store.path().display(),
        stats.created,
        stats.updated,
        stats.deleted
    ))
}

/// List the stored records of a resource.
pub async fn cmd_records(
    config: &MlindexConfig,
    resource: &str,
    store_override: Option<&Path>,
    json: bool,
) -> Result<String> {
    let store = open_store(config, store_override)?;
    let records = store.records_for(&ResourceId::new(resource)).await?;

    if json {
        let mut out = serde_json::to_string_pretty(&records)?;
        out.push('\n');
        Ok(out)
    } else {
        render_records(&records)
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn build_computer(config: &MlindexConfig) -> Result<IndexComputer> {
    IndexComputer::from_config(&config.indexing, &config.vectorizer)
        .context("Invalid indexing configuration")
}

fn load_input(input: &ResourceInput) -> Result<(ResourceId, MetadataSchema, MetadataInstance)> {
    let schema = MetadataSchema::load(&input.schema)
        .with_context(|| format!("Failed to load schema {}", input.schema.display()))?;
    let instance = MetadataInstance::load(&input.instance)
        .with_context(|| format!("Failed to load instance {}", input.instance.display()))?;
    Ok((ResourceId::new(input.resource.as_str()), schema, instance))
}

fn open_store(config: &MlindexConfig, store_override: Option<&Path>) -> Result<JsonFileStore> {
    let path: PathBuf = match store_override {
        Some(path) => path.to_path_buf(),
        None => config.store_path(),
    };
    log::debug!("Using record store {}", path.display());
    JsonFileStore::open(&path)
        .with_context(|| format!("Failed to open record store {}", path.display()))
}

fn filter_label(filter: &LanguageFilter) -> String {
    match filter {
        LanguageFilter::Neutral => "neutral".to_string(),
        LanguageFilter::Localized => "localized".to_string(),
        LanguageFilter::Exact(lang) => lang.to_string(),
    }
}

/// One line per operation:
///
/// ```text
/// resource 42: 2 op(s)
///   upsert title [-] 'river':1
///   delete title [localized]
/// ```
pub fn render_plan(plan: &IndexPlan) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "resource {}: {} op(s)", plan.resource, plan.len())?;
    for op in &plan.ops {
        match op {
            IndexOp::Upsert {
                index_name,
                language,
                vector,
            } => {
                let lang = language.as_ref().map_or("-", |l| l.as_str());
                writeln!(out, "  upsert {index_name} [{lang}] {vector}")?;
            }
            IndexOp::Delete { index_name, filter } => {
                writeln!(out, "  delete {index_name} [{}]", filter_label(filter))?;
            }
        }
    }
    Ok(out)
}

/// One line per record: `key  indexed_at  vector`.
pub fn render_records(records: &[IndexRecord]) -> Result<String> {
    let mut out = String::new();
    for record in records {
        writeln!(
            out,
            "{}\t{}\t{}",
            record.key,
            record.indexed_at.to_rfc3339(),
            record.vector
        )?;
    }
    Ok(out)
}

// ============================================================================
// Tests
// ============================================================================
