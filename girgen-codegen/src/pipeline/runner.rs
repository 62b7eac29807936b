//! Pipeline orchestrator.

use std::sync::Arc;

use girgen_ir::{Category, Module, Registry};
use tokio::task::JoinSet;

use super::{Diagnostic, PostProcess, RunOptions, RunOutput, RunStats, Stage};
use crate::{
    Configuring, GenerationContext, Synthesizer, VerboseReport, filter,
    partition::{self, Chunk, FileNamer, OutputPolicy, Synthesized, TypeSplit},
    writer::Writer,
};

/// The generation pipeline.
///
/// A run moves through three states:
///
/// 1. **Configuring**: side files are resolved into the registry, the output
///    policy is selected and, when writing files, the bucket files are
///    prepared and the module file is scheduled.
/// 2. **Generating**: one task per [`Category`] selects, synthesizes and
///    partitions its declarations against a frozen [`GenerationContext`] and
///    schedules the resulting writes.
/// 3. **Draining**: the run waits for every category task, bucket worker and
///    background write.
///
/// Post-processing steps then run once with the complete [`RunOutput`].
/// Nothing in a run is fatal: failures end up in
/// [`RunOutput::diagnostics`].
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new(SkeletonSynthesizer).post_process(PrintUnified);
///
/// let output = pipeline.run(module, registry, &options).await;
/// for diag in output.warnings() {
///     eprintln!("warning: {}", diag.message);
/// }
/// ```
pub struct Pipeline {
    synthesizer: Arc<dyn Synthesizer>,
    post_processors: Vec<Box<dyn PostProcess>>,
}

impl Pipeline {
    /// Create a pipeline around a synthesizer.
    pub fn new(synthesizer: impl Synthesizer + 'static) -> Self {
        Self {
            synthesizer: Arc::new(synthesizer),
            post_processors: Vec::new(),
        }
    }

    /// Add a step to run after the barrier.
    pub fn post_process(mut self, step: impl PostProcess + 'static) -> Self {
        self.post_processors.push(Box::new(step));
        self
    }

    /// Run the pipeline on a module.
    ///
    /// `registry` holds the prerequisite modules preloaded by the caller; it
    /// is mutated while configuring and frozen before generation starts.
    /// Whitelisted names are evicted first, then the module's own
    /// declarations are registered.
    pub async fn run(&self, module: Module, registry: Registry, options: &RunOptions) -> RunOutput {
        let mut configuring = Configuring::new(&options.module_name, registry);
        filter::resolve(&mut configuring, &options.config_dir);
        configuring.registry.preload(&module);
        let (ctx, mut diagnostics) = configuring.freeze();

        let policy = options.policy();
        let prefix = format!("{}{}", options.boilerplate, module.boilerplate);
        tracing::info!(module = %options.module_name, ?policy, "generating");

        let (mut writer, accumulator) = Writer::new(ctx.preamble());
        let layout = match &policy {
            OutputPolicy::Unified => None,
            OutputPolicy::Files { dir, split } => {
                let namer = FileNamer::new(dir, &options.module_name);
                let alpha = *split == TypeSplit::AlphaBuckets;
                let created = writer.prepare_buckets(&namer, alpha).await;
                if alpha {
                    writer.start_buckets(&namer, created);
                }
                writer.overwrite(namer.module_file(), prefix.clone());
                Some(Arc::new(Layout {
                    namer,
                    split: *split,
                }))
            }
        };

        let module = Arc::new(module);
        let mut tasks = JoinSet::new();
        for category in Category::ALL {
            tasks.spawn(generate_category(CategoryJob {
                category,
                module: Arc::clone(&module),
                ctx: Arc::clone(&ctx),
                synthesizer: Arc::clone(&self.synthesizer),
                layout: layout.clone(),
                writer: writer.clone(),
                generate_all: options.generate_all,
            }));
        }

        let mut outcomes = Vec::with_capacity(Category::ALL.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => {
                    let diagnostic =
                        Diagnostic::error(Stage::Generate, format!("category task failed: {e}"));
                    diagnostic.trace();
                    diagnostics.push(diagnostic);
                }
            }
        }

        writer.drain().await;
        let collected = accumulator.finish().await;
        diagnostics.extend(collected.diagnostics);

        outcomes.sort_by_key(|outcome| outcome.category);
        let mut stats = RunStats::default();
        let mut parts = Vec::new();
        for outcome in outcomes {
            stats.generated.push((outcome.category, outcome.generated));
            stats.blacklisted += outcome.blacklisted;
            stats.elided.extend(outcome.elided);
            diagnostics.extend(outcome.diagnostics);
            if !outcome.unified.is_empty() {
                parts.push(outcome.unified);
            }
        }

        let unified = match layout {
            None => format!("{prefix}{}{}", ctx.preamble(), parts.join("\n\n")),
            Some(_) => String::new(),
        };
        let report = options
            .verbose
            .then(|| VerboseReport::new(ctx.filters(), &unified));

        let mut output = RunOutput {
            module: options.module_name.clone(),
            pkg_config_name: options.resolved_pkg_config_name(),
            unified,
            output_dir: policy.output_dir().map(|dir| dir.to_path_buf()),
            files: collected.files,
            diagnostics,
            stats,
            report,
        };
        tracing::info!(
            module = %output.module,
            generated = output.stats.total_generated(),
            files = output.files.len(),
            diagnostics = output.diagnostics.len(),
            "generation finished"
        );

        for step in &self.post_processors {
            if let Err(e) = step.run(&output) {
                let diagnostic =
                    Diagnostic::error(Stage::PostProcess, format!("{}: {e:#}", step.name()));
                diagnostic.trace();
                output.diagnostics.push(diagnostic);
            }
        }

        output
    }
}

/// File layout of a run writing to a directory.
#[derive(Debug)]
struct Layout {
    namer: FileNamer,
    split: TypeSplit,
}

/// Inputs of one category task.
struct CategoryJob {
    category: Category,
    module: Arc<Module>,
    ctx: Arc<GenerationContext>,
    synthesizer: Arc<dyn Synthesizer>,
    layout: Option<Arc<Layout>>,
    writer: Writer,
    generate_all: bool,
}

/// What one category task produced.
#[derive(Debug)]
struct CategoryOutcome {
    category: Category,
    generated: usize,
    blacklisted: usize,
    elided: Vec<String>,
    /// Joined text, only in unified mode.
    unified: String,
    diagnostics: Vec<Diagnostic>,
}

impl CategoryOutcome {
    fn failed(category: Category, diagnostic: Diagnostic) -> Self {
        Self {
            category,
            generated: 0,
            blacklisted: 0,
            elided: Vec::new(),
            unified: String::new(),
            diagnostics: vec![diagnostic],
        }
    }
}

async fn generate_category(job: CategoryJob) -> CategoryOutcome {
    let CategoryJob {
        category,
        module,
        ctx,
        synthesizer,
        layout,
        writer,
        generate_all,
    } = job;
    tracing::debug!(%category, "category started");

    let synthesized = tokio::task::spawn_blocking(move || {
        synthesize_category(
            category,
            &module,
            &ctx,
            synthesizer.as_ref(),
            layout.as_deref(),
            generate_all,
        )
    })
    .await;

    match synthesized {
        Ok((outcome, chunks)) => {
            for chunk in chunks {
                writer.schedule(chunk).await;
            }
            outcome
        }
        Err(e) => {
            let diagnostic =
                Diagnostic::error(Stage::Generate, format!("{category}: synthesis failed: {e}"));
            diagnostic.trace();
            CategoryOutcome::failed(category, diagnostic)
        }
    }
}

fn synthesize_category(
    category: Category,
    module: &Module,
    ctx: &GenerationContext,
    synthesizer: &dyn Synthesizer,
    layout: Option<&Layout>,
    generate_all: bool,
) -> (CategoryOutcome, Vec<Chunk>) {
    let selection = filter::select(module, category, ctx.filters(), generate_all);
    let items: Vec<Synthesized> = selection
        .declarations
        .iter()
        .map(|decl| Synthesized::new(decl.display_name(), synthesizer.synthesize(decl, ctx)))
        .collect();
    let generated = items.iter().filter(|item| !item.text.is_empty()).count();

    let (unified, chunks) = match layout {
        None => (partition::join_simple(&items), Vec::new()),
        Some(layout) => (
            String::new(),
            partition::partition(category, &items, layout.split, &layout.namer),
        ),
    };
    tracing::debug!(%category, generated, chunks = chunks.len(), "category synthesized");

    let outcome = CategoryOutcome {
        category,
        generated,
        blacklisted: selection.blacklisted,
        elided: selection.elided,
        unified,
        diagnostics: Vec::new(),
    };
    (outcome, chunks)
}
