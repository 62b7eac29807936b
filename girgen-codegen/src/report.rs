//! Verbose run report.

use std::fmt;

use girgen_manifest::FilterSet;

/// Verbatim-constant and blacklisted names of a run.
///
/// Rendered as Swift comments (`// `) when the unified output is printed on
/// stdout, so that both streams can be concatenated, and with a `** ` marker
/// otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerboseReport {
    pub verbatim: Vec<String>,
    pub blacklisted: Vec<String>,
    /// Render as source comments.
    pub commented: bool,
}

impl VerboseReport {
    pub fn new(filters: &FilterSet, unified: &str) -> Self {
        Self {
            verbatim: filters.verbatim_constants.iter().cloned().collect(),
            blacklisted: filters.blacklist.iter().cloned().collect(),
            commented: !unified.is_empty(),
        }
    }

    fn section(&self, f: &mut fmt::Formatter<'_>, title: &str, names: &[String]) -> fmt::Result {
        let (prefix, separator) = if self.commented {
            ("// ", "\n// ")
        } else {
            ("** ", "\n")
        };
        write!(f, "{prefix}{title}: {}", names.len())?;
        for name in names {
            write!(f, "{separator}{name}")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for VerboseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.section(f, "Verbatim", &self.verbatim)?;
        self.section(f, "Blacklisted", &self.blacklisted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filters() -> FilterSet {
        let mut filters = FilterSet::default();
        filters.verbatim_constants.insert("PI".to_string());
        filters.blacklist.insert("Hidden".to_string());
        filters.blacklist.insert("Secret".to_string());
        filters
    }

    #[test]
    fn test_commented_when_unified_output_exists() {
        let report = VerboseReport::new(&filters(), "public let X = 1");
        assert_eq!(
            report.to_string(),
            "// Verbatim: 1\n// PI\n// Blacklisted: 2\n// Hidden\n// Secret\n"
        );
    }

    #[test]
    fn test_marked_without_unified_output() {
        let report = VerboseReport::new(&filters(), "");
        assert_eq!(
            report.to_string(),
            "** Verbatim: 1\nPI\n** Blacklisted: 2\nHidden\nSecret\n"
        );
    }

    #[test]
    fn test_empty_lists() {
        let report = VerboseReport::new(&FilterSet::default(), "");
        assert_eq!(report.to_string(), "** Verbatim: 0\n** Blacklisted: 0\n");
    }
}
