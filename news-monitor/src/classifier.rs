use crate::types::{KeywordGroup, Result};
use regex::Regex;
use tracing::debug;

struct CompiledGroup {
    name: String,
    patterns: Vec<Regex>,
}

impl CompiledGroup {
    fn matches(&self, lowered: &str) -> bool {
        self.patterns.iter().all(|pattern| pattern.is_match(lowered))
    }
}

/// Assigns text to the first keyword group whose terms all appear in it.
///
/// Terms match case-insensitively on word boundaries, so "nuclear" does not
/// match inside "nuclearize". Multi-word terms match as a contiguous phrase.
/// Groups are scanned in the order given at construction.
pub struct KeywordClassifier {
    groups: Vec<CompiledGroup>,
}

impl KeywordClassifier {
    pub fn new(groups: &[KeywordGroup]) -> Result<Self> {
        let mut compiled = Vec::with_capacity(groups.len());

        for group in groups {
            let patterns = group
                .keywords
                .iter()
                .map(|keyword| keyword_pattern(keyword))
                .collect::<Result<Vec<_>>>()?;

            compiled.push(CompiledGroup {
                name: group.name.clone(),
                patterns,
            });
        }

        debug!("Compiled {} keyword groups", compiled.len());
        Ok(Self { groups: compiled })
    }

    /// Name of the first fully matching group, if any. `text` may be in any
    /// case; it is lower-cased once here.
    pub fn classify(&self, text: &str) -> Option<&str> {
        let lowered = text.to_lowercase();
        self.groups
            .iter()
            .find(|group| group.matches(&lowered))
            .map(|group| group.name.as_str())
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

fn keyword_pattern(keyword: &str) -> Result<Regex> {
    let escaped = regex::escape(&keyword.trim().to_lowercase());
    Ok(Regex::new(&format!(r"\b{}\b", escaped))?)
}
