//! Subcommand implementations.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use doctype_core::{ClassificationEngine, EngineConfig};
use doctype_model::{ClassificationResult, Document};
use doctype_persistence::JsonResultStore;
use doctype_standards::{StaticRegistry, TypeRegistry, builtin_catalog, load_catalog};

use crate::cli::{ClassifyArgs, OutputFormatArg, TypesArgs};
use crate::render::{print_result, types_table};

/// Exit code for results that need human review.
pub const EXIT_NEEDS_REVIEW: i32 = 2;

/// Load an engine configuration file; defaults when no path is given.
pub fn load_engine_config(path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let text =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parse config {}", path.display()))
}

/// Read a document JSON file.
pub fn read_document(path: &Path) -> Result<Document> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read document {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse document {}", path.display()))
}

/// Registry for `--catalog`, or the built-in catalog.
///
/// A catalog that fails to load is tolerated when built-in fallback is
/// enabled: the engine then falls back on its own.
pub fn build_registry(
    catalog: Option<&Path>,
    use_builtin_fallback: bool,
) -> Result<Option<Arc<dyn TypeRegistry>>> {
    let registry = match catalog {
        Some(path) => match StaticRegistry::from_path(path) {
            Ok(registry) => registry,
            Err(error) if use_builtin_fallback => {
                warn!(
                    catalog = %path.display(),
                    %error,
                    "catalog unusable; falling back to built-in types"
                );
                return Ok(None);
            }
            Err(error) => {
                return Err(error).with_context(|| format!("load catalog {}", path.display()));
            }
        },
        None => StaticRegistry::builtin().context("load built-in catalog")?,
    };
    Ok(Some(Arc::new(registry)))
}

/// Engine for the given arguments.
pub fn build_engine(args: &ClassifyArgs) -> Result<ClassificationEngine> {
    let mut config = load_engine_config(args.config.as_deref())?;
    config.use_builtin_fallback = args.use_builtin_fallback();
    if args.refine {
        config.enable_refinement = true;
    }

    let mut engine = ClassificationEngine::new(config);
    if let Some(registry) = build_registry(args.catalog.as_deref(), args.use_builtin_fallback())? {
        engine = engine.with_registry(registry);
    }
    if let Some(dir) = &args.store {
        let store = JsonResultStore::open(dir)
            .with_context(|| format!("open result store {}", dir.display()))?;
        engine = engine.with_store(Arc::new(store));
    }
    Ok(engine)
}

/// Classify one document and print the outcome.
pub fn run_classify(args: &ClassifyArgs) -> Result<ClassificationResult> {
    let span = info_span!("classify_command", document = %args.document.display());
    let _guard = span.enter();

    let document = read_document(&args.document)?;
    let engine = build_engine(args)?;

    let result = match args.timeout_ms {
        Some(ms) => {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_time()
                .build()
                .context("start async runtime")?;
            let engine = Arc::new(engine);
            runtime.block_on(engine.classify_with_timeout(document, Duration::from_millis(ms)))
        }
        None => engine.classify(&document),
    }
    .with_context(|| format!("classify {}", args.document.display()))?;

    match args.format {
        OutputFormatArg::Table => print_result(&result, args.top),
        OutputFormatArg::Json => {
            let json = serde_json::to_string_pretty(&result).context("serialize result")?;
            println!("{json}");
        }
    }
    info!(
        result_id = %result.id,
        ambiguity = %result.ambiguity_level,
        "classification reported"
    );
    Ok(result)
}

/// List the types of a catalog.
pub fn run_types(args: &TypesArgs) -> Result<()> {
    let mut types = match &args.catalog {
        Some(path) => {
            load_catalog(path).with_context(|| format!("load catalog {}", path.display()))?
        }
        None => builtin_catalog().context("load built-in catalog")?,
    };
    types.sort_by(|a, b| a.id.cmp(&b.id));
    println!("{}", types_table(&types));
    Ok(())
}

/// Process exit code for a classification result.
pub fn exit_code(result: &ClassificationResult) -> i32 {
    if result.needs_review() {
        EXIT_NEEDS_REVIEW
    } else {
        0
    }
}
