use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use strum::IntoEnumIterator;
use thiserror::Error;
use tracing::warn;

use crate::review::ReviewInterval;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown review interval `{word}` (expected one of: {})", canonical_list())]
pub struct UnknownInterval {
    pub word: String,
}

fn canonical_list() -> String {
    ReviewInterval::iter()
        .map(|interval| interval.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub struct Keywords;

impl Keywords {
    /// Returns the **global interval registry** (word → interval).
    ///
    /// The registry is:
    /// - **Initialized once** on first access (via [`once_cell::sync::Lazy`]).
    /// - **Thread-safe** (wrapped in [`RwLock`]): many readers or one writer.
    /// - **Lowercased**: all keys are stored lowercased for case-insensitive lookups.
    ///
    /// Seeded with the canonical identifiers (`immediate`, `1day`, `5days`,
    /// `20days`, `unlimited`). Use [`extend`](Self::extend) to add synonyms and
    /// [`interval`](Self::interval) to resolve a word.
    fn registry() -> &'static RwLock<HashMap<String, ReviewInterval>> {
        static REGISTRY: Lazy<RwLock<HashMap<String, ReviewInterval>>> = Lazy::new(|| {
            let m = ReviewInterval::iter()
                .map(|interval| (interval.as_ref().to_string(), interval))
                .collect();
            RwLock::new(m)
        });
        &REGISTRY
    }

    // Writers only insert whole pairs, so a poisoned map is still consistent.
    fn read() -> RwLockReadGuard<'static, HashMap<String, ReviewInterval>> {
        Self::registry().read().unwrap_or_else(|e| e.into_inner())
    }

    fn write() -> RwLockWriteGuard<'static, HashMap<String, ReviewInterval>> {
        Self::registry().write().unwrap_or_else(|e| e.into_inner())
    }

    /// Extends the global registry with user-defined **synonyms**.
    ///
    /// Each pair is `(alias, target)`. The `target` must resolve to an interval
    /// (a canonical identifier or another synonym, from this call or before); unknown targets
    /// are skipped with a warning. Returns how many aliases were registered.
    ///
    /// ```toml
    /// # config.toml
    /// [synonyms]
    /// now      = "immediate"
    /// tomorrow = "1day"
    /// never    = "unlimited"
    /// ```
    pub fn extend(synonyms: &[(String, String)]) -> usize {
        let mut reg = Self::write();
        let mut pending: Vec<&(String, String)> = synonyms.iter().collect();
        let mut added = 0;
        // Repeat until no progress so chained synonyms resolve in any input order.
        loop {
            let before = pending.len();
            pending.retain(|(alias, target)| match reg.get(&target.to_ascii_lowercase()) {
                Some(&interval) => {
                    reg.insert(alias.to_ascii_lowercase(), interval);
                    added += 1;
                    false
                }
                None => true,
            });
            if pending.is_empty() || pending.len() == before {
                break;
            }
        }
        for (alias, target) in pending {
            warn!(%alias, %target, "ignoring synonym for unknown interval");
        }
        added
    }

    /// Returns `true` if `word` is a canonical interval identifier (eg "5days").
    pub fn is_canonical(word: &str) -> bool {
        let word = word.to_ascii_lowercase();
        ReviewInterval::iter().any(|interval| interval.as_ref() == word)
    }

    /// Resolves `word` (case-insensitively) to an interval.
    pub fn interval(word: &str) -> Option<ReviewInterval> {
        Self::read().get(&word.trim().to_ascii_lowercase()).copied()
    }

    /// Like [`interval`](Self::interval), but an unknown word is an error.
    pub fn parse(word: &str) -> Result<ReviewInterval, UnknownInterval> {
        Self::interval(word).ok_or_else(|| UnknownInterval {
            word: word.trim().to_string(),
        })
    }

    /// Returns `true` if `input` names `interval` directly or through a synonym.
    pub fn matches(interval: ReviewInterval, input: &str) -> bool {
        Self::interval(input) == Some(interval)
    }

    /// Every registered word for `interval`, canonical identifier first.
    pub fn aliases(interval: ReviewInterval) -> Vec<String> {
        let reg = Self::read();
        let mut words: Vec<String> = reg
            .iter()
            .filter(|&(word, &i)| i == interval && word != interval.as_ref())
            .map(|(word, _)| word.clone())
            .collect();
        words.sort();
        words.insert(0, interval.as_ref().to_string());
        words
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_identifiers_resolve() {
        assert_eq!(Keywords::interval("immediate"), Some(ReviewInterval::Immediate));
        assert_eq!(Keywords::interval("1day"), Some(ReviewInterval::OneDay));
        assert_eq!(Keywords::interval("5DAYS"), Some(ReviewInterval::FiveDays));
        assert_eq!(Keywords::interval(" 20days "), Some(ReviewInterval::TwentyDays));
        assert_eq!(Keywords::interval("unlimited"), Some(ReviewInterval::Unlimited));
    }

    #[test]
    fn unknown_word_resolves_to_none() {
        assert_eq!(Keywords::interval("fortnight-ish"), None);
        assert!(!Keywords::matches(ReviewInterval::OneDay, "not in registry"));
    }

    #[test]
    fn parse_reports_unknown_word() {
        assert_eq!(Keywords::parse("5days"), Ok(ReviewInterval::FiveDays));
        let err = Keywords::parse(" whenever ").unwrap_err();
        assert_eq!(err.word, "whenever");
        assert_eq!(
            err.to_string(),
            "unknown review interval `whenever` (expected one of: immediate, 1day, 5days, 20days, unlimited)"
        );
    }

    #[test]
    fn synonyms_extend() {
        let added = Keywords::extend(&[
            ("tmrw".into(), "1day".into()),
            ("Never".into(), "UNLIMITED".into()),
            ("next-tmrw".into(), "tmrw".into()),
        ]);
        assert_eq!(added, 3);
        assert!(Keywords::matches(ReviewInterval::OneDay, "tmrw"));
        assert!(Keywords::matches(ReviewInterval::Unlimited, "never"));
        assert!(Keywords::matches(ReviewInterval::OneDay, "NEXT-TMRW"));
    }

    #[test]
    fn chained_synonyms_resolve_in_any_order() {
        let added = Keywords::extend(&[
            ("chain-c".into(), "chain-b".into()),
            ("chain-b".into(), "chain-a".into()),
            ("chain-a".into(), "20days".into()),
        ]);
        assert_eq!(added, 3);
        assert_eq!(Keywords::interval("chain-c"), Some(ReviewInterval::TwentyDays));
    }

    #[test]
    fn synonyms_with_unknown_target_are_skipped() {
        let added = Keywords::extend(&[("someday".into(), "eventually".into())]);
        assert_eq!(added, 0);
        assert_eq!(Keywords::interval("someday"), None);
    }

    #[test]
    fn canonical_check_is_case_insensitive() {
        assert!(Keywords::is_canonical("5days"));
        assert!(Keywords::is_canonical("Immediate"));
        assert!(!Keywords::is_canonical("soon"));
    }

    #[test]
    fn aliases_list_canonical_first() {
        Keywords::extend(&[("asap".into(), "immediate".into())]);
        let aliases = Keywords::aliases(ReviewInterval::Immediate);
        assert_eq!(aliases[0], "immediate");
        assert!(aliases.contains(&"asap".to_string()));
    }
}
