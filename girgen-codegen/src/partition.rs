//! Output partitioning.
//!
//! The partitioner decides which file each piece of synthesized text ends
//! up in. It is a pure function of the category, the synthesized
//! declarations in IR order and the active [`OutputPolicy`]; writing is left
//! to the [`Writer`](crate::Writer).
//!
//! Type categories (interfaces, records, classes) are split according to a
//! [`TypeSplit`]:
//!
//! - [`TypeSplit::GroupedRuns`] groups *consecutive* declarations sharing a
//!   leading character. This is not a sort: `Apple, Ant, Banana, Avocado`
//!   yields three files.
//! - [`TypeSplit::FilePerClass`] writes one file per declaration.
//! - [`TypeSplit::AlphaBuckets`] appends into 27 fixed files shared by all
//!   three type categories.

use std::path::{Path, PathBuf};

use girgen_ir::Category;

/// Extension of generated source files.
pub const EXTENSION: &str = "swift";

/// How type categories are split into files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeSplit {
    /// One file per run of declarations sharing a leading character.
    GroupedRuns,
    /// One file per declaration.
    FilePerClass,
    /// 27 fixed files, one per leading ASCII letter plus a catch-all.
    AlphaBuckets,
}

/// Output policy of a run, selected once while configuring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputPolicy {
    /// All text is concatenated into one string.
    Unified,
    /// Text is written to files in `dir`.
    Files { dir: PathBuf, split: TypeSplit },
}

impl OutputPolicy {
    /// Select the policy from the run parameters.
    ///
    /// Alpha buckets take precedence over one file per class.
    pub fn select(
        output_dir: Option<&Path>,
        alpha_names: bool,
        single_file_per_class: bool,
    ) -> Self {
        let Some(dir) = output_dir else {
            return OutputPolicy::Unified;
        };
        let split = if alpha_names {
            TypeSplit::AlphaBuckets
        } else if single_file_per_class {
            TypeSplit::FilePerClass
        } else {
            TypeSplit::GroupedRuns
        };
        OutputPolicy::Files {
            dir: dir.to_path_buf(),
            split,
        }
    }

    /// The output directory, if text goes to files.
    pub fn output_dir(&self) -> Option<&Path> {
        match self {
            OutputPolicy::Unified => None,
            OutputPolicy::Files { dir, .. } => Some(dir),
        }
    }

    /// Returns true if type categories append into alpha buckets.
    pub fn uses_buckets(&self) -> bool {
        matches!(
            self,
            OutputPolicy::Files {
                split: TypeSplit::AlphaBuckets,
                ..
            }
        )
    }
}

/// One of the 27 alpha bucket files.
///
/// Index 0 is the catch-all `@`, indices 1 to 26 are `A` to `Z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Bucket(u8);

impl Bucket {
    /// Number of buckets.
    pub const COUNT: usize = 27;

    /// Bucket for names not starting with an ASCII letter.
    pub const CATCH_ALL: Bucket = Bucket(0);

    /// All buckets, catch-all first.
    pub fn all() -> impl Iterator<Item = Bucket> {
        (0..Self::COUNT as u8).map(Bucket)
    }

    /// Bucket of a display name: its uppercased leading ASCII letter.
    pub fn for_name(name: &str) -> Self {
        match name.chars().next() {
            Some(c) if c.is_ascii_alphabetic() => Bucket(c.to_ascii_uppercase() as u8 - b'@'),
            _ => Self::CATCH_ALL,
        }
    }

    /// File name marker (`@` or `A` to `Z`).
    pub fn marker(self) -> char {
        (b'@' + self.0) as char
    }

    /// Position in [`Bucket::all`].
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Derives output file paths for one module.
#[derive(Debug, Clone)]
pub struct FileNamer {
    dir: PathBuf,
    module: String,
}

impl FileNamer {
    pub fn new(dir: impl Into<PathBuf>, module: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            module: module.into(),
        }
    }

    /// `{dir}/{module}.swift`
    pub fn module_file(&self) -> PathBuf {
        self.dir.join(format!("{}.{}", self.module, EXTENSION))
    }

    /// `{dir}/{module}-{part}.swift`
    pub fn part_file(&self, part: &str) -> PathBuf {
        self.dir
            .join(format!("{}-{}.{}", self.module, part, EXTENSION))
    }

    /// File of an alpha bucket.
    pub fn bucket_file(&self, bucket: Bucket) -> PathBuf {
        self.part_file(&bucket.marker().to_string())
    }
}

/// Synthesized text of one declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Synthesized {
    pub display_name: String,
    pub text: String,
}

impl Synthesized {
    pub fn new(display_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            text: text.into(),
        }
    }

    /// Text as it appears in a type file: followed by a blank line.
    fn block(&self) -> String {
        if self.text.is_empty() {
            String::new()
        } else {
            format!("{}\n\n", self.text)
        }
    }
}

/// Where a chunk of text goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Replace the file with preamble and content.
    File(PathBuf),
    /// Append to a shared alpha bucket file.
    Bucket(Bucket),
}

/// Text destined for one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub target: Target,
    pub content: String,
}

/// Join the text of a simple category, separating entries by a blank line.
pub fn join_simple(items: &[Synthesized]) -> String {
    items
        .iter()
        .map(|item| item.text.as_str())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Split the synthesized declarations of one category into chunks.
pub fn partition(
    category: Category,
    items: &[Synthesized],
    split: TypeSplit,
    namer: &FileNamer,
) -> Vec<Chunk> {
    if let Some(suffix) = category.file_suffix() {
        return vec![Chunk {
            target: Target::File(namer.part_file(suffix)),
            content: join_simple(items),
        }];
    }

    match split {
        TypeSplit::FilePerClass => items
            .iter()
            .map(|item| Chunk {
                target: Target::File(namer.part_file(&item.display_name)),
                content: item.block(),
            })
            .collect(),
        TypeSplit::GroupedRuns => items
            .chunk_by(|a, b| leading_char(a) == leading_char(b))
            .map(|run| Chunk {
                target: Target::File(namer.part_file(&run[0].display_name)),
                content: run.iter().map(Synthesized::block).collect(),
            })
            .collect(),
        TypeSplit::AlphaBuckets => items
            .chunk_by(|a, b| Bucket::for_name(&a.display_name) == Bucket::for_name(&b.display_name))
            .map(|run| Chunk {
                target: Target::Bucket(Bucket::for_name(&run[0].display_name)),
                content: run.iter().map(Synthesized::block).collect(),
            })
            .filter(|chunk| !chunk.content.is_empty())
            .collect(),
    }
}

fn leading_char(item: &Synthesized) -> Option<char> {
    item.display_name.chars().next()
}
