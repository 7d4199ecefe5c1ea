//! Country inference from detected language signals.
//!
//! A signal points at a country only through its region subtag (`ar-AE` ->
//! `AE` -> UAE). Region-less signals (`ar`) never pick a country on their own;
//! they only add corroborating weight to countries that other signals already
//! resolved and whose language set contains them.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use docnorm_model::{CountryCode, InferredCountry, LanguageSignal};
use docnorm_standards::{CountryRules, LocaleRuleTable};

/// A locale tag split into its primary language and optional region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleTag {
    /// Lower-case primary language subtag.
    pub language: String,
    /// Upper-case region subtag (two letters or three digits).
    pub region: Option<String>,
}

impl LocaleTag {
    /// Parse a BCP-47-like tag such as `ar-AE`, `en_us` or `zh-Hant-TW`.
    pub fn parse(tag: &str) -> Option<Self> {
        let mut subtags = tag
            .trim()
            .split(['-', '_'])
            .filter(|subtag| !subtag.is_empty());

        let language = subtags.next()?;
        if !language.chars().all(|ch| ch.is_ascii_alphabetic()) {
            return None;
        }

        let region = subtags
            .find(|subtag| {
                (subtag.len() == 2 && subtag.chars().all(|ch| ch.is_ascii_alphabetic()))
                    || (subtag.len() == 3 && subtag.chars().all(|ch| ch.is_ascii_digit()))
            })
            .map(str::to_ascii_uppercase);

        Some(Self {
            language: language.to_ascii_lowercase(),
            region,
        })
    }
}

/// Outcome of country inference with the evidence behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct Inference {
    pub country: InferredCountry,
    /// Locale of the strongest signal for the winning country.
    pub locale: Option<String>,
    /// Confidence of that signal, 0-1.
    pub confidence: f64,
    /// Summed confidence of region-less signals backing the winner.
    pub corroboration: f64,
    /// Number of distinct countries the signals resolved to.
    pub candidates: usize,
}

impl Inference {
    fn unknown() -> Self {
        Self {
            country: InferredCountry::Unknown,
            locale: None,
            confidence: 0.0,
            corroboration: 0.0,
            candidates: 0,
        }
    }
}

struct Candidate<'a> {
    rules: &'a CountryRules,
    confidence: f64,
    locale: String,
    corroboration: f64,
}

impl Candidate<'_> {
    /// Ranking: confidence, then corroboration, then priority, then code.
    fn rank(&self, other: &Self) -> Ordering {
        self.confidence
            .total_cmp(&other.confidence)
            .then_with(|| self.corroboration.total_cmp(&other.corroboration))
            .then_with(|| other.rules.priority.cmp(&self.rules.priority))
            .then_with(|| other.rules.code.cmp(&self.rules.code))
    }
}

/// Infer the country whose rules apply to a document.
pub fn infer_country(signals: &[LanguageSignal], table: &LocaleRuleTable) -> InferredCountry {
    infer_country_detailed(signals, table).country
}

/// Infer the country and report the evidence used.
///
/// The result does not depend on signal order.
pub fn infer_country_detailed(signals: &[LanguageSignal], table: &LocaleRuleTable) -> Inference {
    let mut candidates: BTreeMap<&CountryCode, Candidate<'_>> = BTreeMap::new();
    let mut regionless: Vec<(String, f64)> = Vec::new();

    for signal in signals {
        if !signal.confidence.is_finite() {
            tracing::debug!(locale = %signal.locale, "Ignoring language signal with non-finite confidence");
            continue;
        }
        let confidence = signal.confidence.clamp(0.0, 1.0);
        let Some(tag) = LocaleTag::parse(&signal.locale) else {
            tracing::debug!(locale = %signal.locale, "Ignoring unparseable locale");
            continue;
        };

        let Some(region) = tag.region else {
            regionless.push((tag.language, confidence));
            continue;
        };
        let Some(rules) = table.country_for_region(&region) else {
            tracing::debug!(locale = %signal.locale, "Locale region not in rule table");
            continue;
        };

        let locale = signal.locale.trim().to_string();
        candidates
            .entry(&rules.code)
            .and_modify(|candidate| {
                let stronger = confidence > candidate.confidence
                    || (confidence == candidate.confidence && locale < candidate.locale);
                if stronger {
                    candidate.confidence = confidence;
                    candidate.locale = locale.clone();
                }
            })
            .or_insert_with(|| Candidate {
                rules,
                confidence,
                locale: locale.clone(),
                corroboration: 0.0,
            });
    }

    // Sorted before summing so float addition order is fixed.
    regionless.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
    for candidate in candidates.values_mut() {
        candidate.corroboration = regionless
            .iter()
            .filter(|(language, _)| candidate.rules.speaks(language))
            .map(|(_, confidence)| confidence)
            .sum();
    }

    let count = candidates.len();
    let Some(best) = candidates.into_values().max_by(|a, b| a.rank(b)) else {
        tracing::debug!(signals = signals.len(), "No language signal resolved to a country");
        return Inference::unknown();
    };

    tracing::debug!(
        country = %best.rules.code,
        confidence = best.confidence,
        candidates = count,
        "Inferred country"
    );

    Inference {
        country: InferredCountry::Known(best.rules.code.clone()),
        locale: Some(best.locale),
        confidence: best.confidence,
        corroboration: best.corroboration,
        candidates: count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signals(items: &[(&str, f64)]) -> Vec<LanguageSignal> {
        items
            .iter()
            .map(|(locale, confidence)| LanguageSignal::new(*locale, *confidence))
            .collect()
    }

    fn infer(items: &[(&str, f64)]) -> String {
        infer_country(&signals(items), LocaleRuleTable::builtin()).to_string()
    }

    #[test]
    fn test_parse_locale_tags() {
        let tag = LocaleTag::parse("ar-AE").unwrap();
        assert_eq!(tag.language, "ar");
        assert_eq!(tag.region.as_deref(), Some("AE"));

        assert_eq!(
            LocaleTag::parse("zh-Hant-TW").unwrap().region.as_deref(),
            Some("TW")
        );
        assert_eq!(LocaleTag::parse("en_us").unwrap().region.as_deref(), Some("US"));
        assert_eq!(LocaleTag::parse("es-419").unwrap().region.as_deref(), Some("419"));
        assert_eq!(LocaleTag::parse("AR").unwrap().region, None);
        assert_eq!(LocaleTag::parse("  "), None);
        assert_eq!(LocaleTag::parse("12-AE"), None);
    }

    #[test]
    fn test_highest_confidence_region_wins() {
        assert_eq!(infer(&[("ar-AE", 0.9), ("en-US", 0.8)]), "UAE");
        assert_eq!(infer(&[("ar-AE", 0.7), ("en-US", 0.8)]), "USA");
    }

    #[test]
    fn test_regionless_only_corroborates() {
        assert_eq!(infer(&[("ar", 0.99)]), "Unknown");
        // Equal confidence: Arabic corroborates the UAE over the US.
        assert_eq!(infer(&[("en-US", 0.8), ("ar-AE", 0.8), ("ar", 0.5)]), "UAE");
    }

    #[test]
    fn test_tie_breaks_by_priority() {
        // Same confidence, no corroboration: USA has the lower priority value.
        assert_eq!(infer(&[("ar-AE", 0.8), ("en-US", 0.8)]), "USA");
    }

    #[test]
    fn test_unresolvable_signals() {
        assert_eq!(infer(&[]), "Unknown");
        assert_eq!(infer(&[("xx-ZZ", 0.9)]), "Unknown");
        assert_eq!(infer(&[("ar-AE", f64::NAN)]), "Unknown");
    }

    #[test]
    fn test_detailed_inference_reports_evidence() {
        let inference = infer_country_detailed(
            &signals(&[("ar-AE", 0.6), ("ar-ae", 0.9), ("en-GB", 0.4), ("en", 0.3)]),
            LocaleRuleTable::builtin(),
        );
        assert_eq!(inference.country.to_string(), "UAE");
        assert_eq!(inference.locale.as_deref(), Some("ar-ae"));
        assert_eq!(inference.confidence, 0.9);
        assert_eq!(inference.corroboration, 0.3);
        assert_eq!(inference.candidates, 2);
    }
}
