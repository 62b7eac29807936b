//! Concurrent writer.
//!
//! Every write runs on a background task tracked by a [`TaskTracker`], which
//! doubles as the run's barrier. Writes never touch shared state directly:
//!
//! - produced paths and diagnostics are sent to one accumulator task, the
//!   only place the output file set is mutated;
//! - appends to an alpha bucket go through that bucket's bounded channel and
//!   are applied by one worker per bucket, so the three type categories
//!   never write the same bucket file concurrently.
//!
//! Writes to distinct files proceed in parallel.

use std::{
    collections::BTreeSet,
    path::PathBuf,
    sync::Arc,
};

use girgen_core::{OutputFile, WriteResult};
use tokio::{
    sync::mpsc,
    task::{JoinHandle, JoinSet},
};
use tokio_util::task::TaskTracker;

use crate::{
    partition::{Bucket, Chunk, FileNamer, Target},
    pipeline::{Diagnostic, Stage},
};

/// Capacity of each bucket channel.
const BUCKET_CAPACITY: usize = 16;
/// Capacity of the accumulator channel.
const EVENT_CAPACITY: usize = 64;

/// Something a write task reports to the accumulator.
#[derive(Debug)]
enum Event {
    Produced(PathBuf),
    Diagnostic(Diagnostic),
}

/// Everything the accumulator collected during a run.
#[derive(Debug, Default)]
pub struct Collected {
    /// Paths written this run.
    pub files: BTreeSet<PathBuf>,
    /// Diagnostics reported by write tasks.
    pub diagnostics: Vec<Diagnostic>,
}

/// Receiving end of the accumulator.
pub struct Accumulator {
    handle: JoinHandle<Collected>,
}

impl Accumulator {
    /// Wait for every sender to go away and return what was collected.
    pub async fn finish(self) -> Collected {
        match self.handle.await {
            Ok(collected) => collected,
            Err(e) => Collected {
                files: BTreeSet::new(),
                diagnostics: vec![Diagnostic::error(
                    Stage::Write,
                    format!("output accumulator failed: {e}"),
                )],
            },
        }
    }
}

/// Handle for scheduling writes; cheap to clone into category tasks.
#[derive(Clone)]
pub struct Writer {
    preamble: Arc<str>,
    tracker: TaskTracker,
    events: mpsc::Sender<Event>,
    buckets: Arc<[mpsc::Sender<String>]>,
}

impl Writer {
    /// Create a writer and the accumulator collecting its results.
    pub fn new(preamble: impl Into<Arc<str>>) -> (Self, Accumulator) {
        let (events, mut rx) = mpsc::channel(EVENT_CAPACITY);
        let handle = tokio::spawn(async move {
            let mut collected = Collected::default();
            while let Some(event) = rx.recv().await {
                match event {
                    Event::Produced(path) => {
                        collected.files.insert(path);
                    }
                    Event::Diagnostic(diagnostic) => collected.diagnostics.push(diagnostic),
                }
            }
            collected
        });

        let writer = Self {
            preamble: preamble.into(),
            tracker: TaskTracker::new(),
            events,
            buckets: Arc::from(Vec::new()),
        };
        (writer, Accumulator { handle })
    }

    /// The task tracker every write is spawned on.
    pub fn tracker(&self) -> &TaskTracker {
        &self.tracker
    }

    /// Record a path produced outside of [`Writer::schedule`].
    pub async fn record_produced(&self, path: PathBuf) {
        send(&self.events, Event::Produced(path)).await;
    }

    /// Report a diagnostic through the accumulator.
    pub async fn report(&self, diagnostic: Diagnostic) {
        diagnostic.trace();
        send(&self.events, Event::Diagnostic(diagnostic)).await;
    }

    /// Remove stale bucket files and, when `precreate` is set, create all
    /// 27 of them with the preamble only.
    ///
    /// Runs concurrently and returns once every bucket is settled, so no
    /// truncation can race a later append. The returned flags tell which
    /// bucket files exist for this run.
    pub async fn prepare_buckets(&self, namer: &FileNamer, precreate: bool) -> [bool; Bucket::COUNT] {
        let mut set = JoinSet::new();
        for bucket in Bucket::all() {
            let path = namer.bucket_file(bucket);
            let preamble = Arc::clone(&self.preamble);
            set.spawn_blocking(move || {
                let result = girgen_core::remove_stale(&path).and_then(|_| {
                    if precreate {
                        OutputFile::overwrite(&path, "").write(&preamble).map(Some)
                    } else {
                        Ok(None)
                    }
                });
                (bucket, path, result)
            });
        }

        let mut created = [false; Bucket::COUNT];
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((bucket, path, Ok(Some(_)))) => {
                    created[bucket.index()] = true;
                    self.record_produced(path).await;
                }
                Ok((_, _, Ok(None))) => {}
                Ok((_, path, Err(e))) => {
                    self.report(Diagnostic::warning(Stage::Configure, format!("{e:#}")).at(path))
                        .await;
                }
                Err(e) => {
                    self.report(Diagnostic::error(
                        Stage::Configure,
                        format!("bucket preparation panicked: {e}"),
                    ))
                    .await;
                }
            }
        }
        created
    }

    /// Start one serial worker per alpha bucket.
    ///
    /// `created` marks bucket files that already exist for this run; a
    /// worker only appends to a file it knows was created this run.
    pub fn start_buckets(&mut self, namer: &FileNamer, created: [bool; Bucket::COUNT]) {
        let senders: Vec<_> = Bucket::all()
            .map(|bucket| {
                let (tx, rx) = mpsc::channel(BUCKET_CAPACITY);
                let worker = BucketWorker {
                    bucket,
                    path: namer.bucket_file(bucket),
                    created: created[bucket.index()],
                    preamble: Arc::clone(&self.preamble),
                    events: self.events.clone(),
                };
                self.tracker.spawn(worker.drain(rx));
                tx
            })
            .collect();
        self.buckets = Arc::from(senders);
    }

    /// Schedule a chunk for writing on a background task.
    pub async fn schedule(&self, chunk: Chunk) {
        match chunk.target {
            Target::File(path) => self.overwrite(path, chunk.content),
            Target::Bucket(bucket) => match self.buckets.get(bucket.index()) {
                Some(tx) => {
                    if tx.send(chunk.content).await.is_err() {
                        self.report(Diagnostic::error(
                            Stage::Write,
                            format!("bucket '{}' is closed", bucket.marker()),
                        ))
                        .await;
                    }
                }
                None => {
                    self.report(Diagnostic::error(
                        Stage::Write,
                        format!("no worker for bucket '{}'", bucket.marker()),
                    ))
                    .await;
                }
            },
        }
    }

    /// Replace `path` with preamble and content on a background task.
    pub fn overwrite(&self, path: PathBuf, content: String) {
        let preamble = Arc::clone(&self.preamble);
        let events = self.events.clone();
        self.tracker.spawn(async move {
            let file = OutputFile::overwrite(path, content);
            let event = write_blocking(file, preamble).await;
            send(&events, event).await;
        });
    }

    /// Close the bucket channels and wait for every write to finish.
    ///
    /// Consumes this handle; other clones must already be dropped for the
    /// bucket workers to drain.
    pub async fn drain(self) {
        let Writer {
            tracker, buckets, ..
        } = self;
        drop(buckets);
        tracker.close();
        tracker.wait().await;
    }
}

/// Serial writer of one alpha bucket file.
struct BucketWorker {
    bucket: Bucket,
    path: PathBuf,
    created: bool,
    preamble: Arc<str>,
    events: mpsc::Sender<Event>,
}

impl BucketWorker {
    async fn drain(mut self, mut rx: mpsc::Receiver<String>) {
        let mut appended = 0usize;
        while let Some(content) = rx.recv().await {
            let file = if self.created {
                OutputFile::append(&self.path, content)
            } else {
                OutputFile::overwrite(&self.path, content)
            };
            let event = write_blocking(file, Arc::clone(&self.preamble)).await;
            if matches!(event, Event::Produced(_)) {
                self.created = true;
                appended += 1;
            }
            send(&self.events, event).await;
        }
        tracing::debug!(bucket = %self.bucket.marker(), appended, "bucket drained");
    }
}

async fn write_blocking(file: OutputFile, preamble: Arc<str>) -> Event {
    let path = file.path().to_path_buf();
    let result = tokio::task::spawn_blocking(move || file.write(&preamble)).await;
    match result {
        Ok(Ok(written)) => {
            tracing::debug!(
                path = %path.display(),
                appended = written == WriteResult::Appended,
                "file written"
            );
            Event::Produced(path)
        }
        Ok(Err(e)) => {
            let diagnostic = Diagnostic::warning(Stage::Write, format!("{e:#}")).at(path);
            diagnostic.trace();
            Event::Diagnostic(diagnostic)
        }
        Err(e) => {
            let diagnostic =
                Diagnostic::error(Stage::Write, format!("write task failed: {e}")).at(path);
            diagnostic.trace();
            Event::Diagnostic(diagnostic)
        }
    }
}

async fn send(events: &mpsc::Sender<Event>, event: Event) {
    if events.send(event).await.is_err() {
        tracing::error!("output accumulator stopped before the run finished");
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[tokio::test(flavor = "multi_thread")]
    async fn test_overwrite_records_produced_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Test-aliases.swift");

        let (writer, accumulator) = Writer::new("// pre\n");
        writer.overwrite(path.clone(), "typealias A = B".to_string());
        writer.drain().await;
        let collected = accumulator.finish().await;

        assert!(collected.files.contains(&path));
        assert!(collected.diagnostics.is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), "// pre\ntypealias A = B");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_failed_write_is_a_diagnostic() {
        let temp = TempDir::new().unwrap();
        // The parent "directory" is a regular file.
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let path = blocker.join("Test-aliases.swift");

        let (writer, accumulator) = Writer::new("");
        writer.overwrite(path.clone(), "x".to_string());
        writer.drain().await;
        let collected = accumulator.finish().await;

        assert!(collected.files.is_empty());
        assert_eq!(collected.diagnostics.len(), 1);
        assert_eq!(collected.diagnostics[0].location.as_deref(), Some(path.as_path()));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_bucket_appends_are_serialized() {
        let temp = TempDir::new().unwrap();
        let namer = FileNamer::new(temp.path(), "Test");

        let (mut writer, accumulator) = Writer::new("// pre\n");
        let created = writer.prepare_buckets(&namer, true).await;
        assert!(created.iter().all(|c| *c));
        writer.start_buckets(&namer, created);

        let bucket = Bucket::for_name("Apple");
        let mut tasks = JoinSet::new();
        for producer in 0..3 {
            let writer = writer.clone();
            tasks.spawn(async move {
                for i in 0..20 {
                    writer
                        .schedule(Chunk {
                            target: Target::Bucket(bucket),
                            content: format!("{producer}:{i}\n"),
                        })
                        .await;
                }
            });
        }
        while tasks.join_next().await.is_some() {}

        writer.drain().await;
        let collected = accumulator.finish().await;

        assert_eq!(collected.files.len(), Bucket::COUNT);
        let content = fs::read_to_string(namer.bucket_file(bucket)).unwrap();
        assert!(content.starts_with("// pre\n"));
        assert_eq!(content.lines().count(), 1 + 3 * 20);
        for producer in 0..3 {
            let own: Vec<_> = content
                .lines()
                .filter(|l| l.starts_with(&format!("{producer}:")))
                .collect();
            let expected: Vec<_> = (0..20).map(|i| format!("{producer}:{i}")).collect();
            assert_eq!(own, expected);
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_prepare_buckets_removes_stale_files() {
        let temp = TempDir::new().unwrap();
        let namer = FileNamer::new(temp.path(), "Test");
        let stale = namer.bucket_file(Bucket::for_name("Q"));
        fs::write(&stale, "old run").unwrap();

        let (writer, accumulator) = Writer::new("");
        let created = writer.prepare_buckets(&namer, false).await;
        writer.drain().await;
        let collected = accumulator.finish().await;

        assert!(created.iter().all(|c| !*c));
        assert!(!stale.exists());
        assert!(collected.files.is_empty());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_bucket_without_file_is_created_not_appended() {
        let temp = TempDir::new().unwrap();
        let namer = FileNamer::new(temp.path(), "Test");
        let bucket = Bucket::for_name("Zebra");
        fs::write(namer.bucket_file(bucket), "from a previous run\n").unwrap();

        let (mut writer, accumulator) = Writer::new("// pre\n");
        writer.start_buckets(&namer, [false; Bucket::COUNT]);
        writer
            .schedule(Chunk {
                target: Target::Bucket(bucket),
                content: "first\n".to_string(),
            })
            .await;
        writer
            .schedule(Chunk {
                target: Target::Bucket(bucket),
                content: "second\n".to_string(),
            })
            .await;
        writer.drain().await;
        accumulator.finish().await;

        assert_eq!(
            fs::read_to_string(namer.bucket_file(bucket)).unwrap(),
            "// pre\nfirst\nsecond\n"
        );
    }
}
