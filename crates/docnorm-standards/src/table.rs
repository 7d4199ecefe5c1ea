//! The locale rule table: validated, immutable, indexed country rules.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use docnorm_model::CountryCode;

use crate::error::{Result, RulesError};
use crate::rules::{CountryRules, KeywordEntry, KeywordTaxonomy, RuleTableDocument};

const BUILTIN_RULES_JSON: &str = include_str!("../data/locale_rules.json");

static BUILTIN: LazyLock<LocaleRuleTable> = LazyLock::new(|| {
    LocaleRuleTable::from_json_str(BUILTIN_RULES_JSON).expect("Invalid built-in locale rule table")
});

/// Read-only per-country configuration shared by every pipeline step.
///
/// Countries are kept sorted by `(priority, code)`, so iteration order is the
/// documented tie-break order. The table is immutable after construction and
/// safe to share across threads.
#[derive(Debug, Clone)]
pub struct LocaleRuleTable {
    taxonomy: KeywordTaxonomy,
    countries: Vec<CountryRules>,
    by_code: BTreeMap<CountryCode, usize>,
    by_region: BTreeMap<String, usize>,
}

impl LocaleRuleTable {
    /// The built-in table, parsed once on first access.
    pub fn builtin() -> &'static LocaleRuleTable {
        &BUILTIN
    }

    /// Build a table from its serialized form, validating every entry.
    pub fn new(document: RuleTableDocument) -> Result<Self> {
        let RuleTableDocument {
            taxonomy,
            mut countries,
        } = document;

        if countries.is_empty() {
            return Err(RulesError::Empty);
        }

        let taxonomy = KeywordTaxonomy {
            version: taxonomy.version,
            core: normalize_keywords(taxonomy.core, "core taxonomy")?,
        };

        for country in &mut countries {
            validate_country(country)?;
            country.regions = country
                .regions
                .iter()
                .map(|region| region.trim().to_ascii_uppercase())
                .collect();
            country.languages = country
                .languages
                .iter()
                .map(|lang| lang.trim().to_ascii_lowercase())
                .collect();
            let scope = format!("{} keywords", country.code);
            country.critical_keywords =
                normalize_keywords(std::mem::take(&mut country.critical_keywords), &scope)?;
        }

        countries.sort_by(|a, b| a.priority.cmp(&b.priority).then_with(|| a.code.cmp(&b.code)));

        let mut by_code = BTreeMap::new();
        let mut by_region: BTreeMap<String, usize> = BTreeMap::new();
        for (index, country) in countries.iter().enumerate() {
            if by_code.insert(country.code.clone(), index).is_some() {
                return Err(RulesError::DuplicateCountry(country.code.to_string()));
            }
            for region in &country.regions {
                if let Some(&existing) = by_region.get(region) {
                    return Err(RulesError::DuplicateRegion {
                        region: region.clone(),
                        first: countries[existing].code.to_string(),
                        second: country.code.to_string(),
                    });
                }
                by_region.insert(region.clone(), index);
            }
        }

        tracing::debug!(
            countries = countries.len(),
            taxonomy_version = %taxonomy.version,
            "Loaded locale rule table"
        );

        Ok(Self {
            taxonomy,
            countries,
            by_code,
            by_region,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let document: RuleTableDocument = serde_json::from_str(json)?;
        Self::new(document)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|source| RulesError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Serialized form of this table.
    pub fn to_document(&self) -> RuleTableDocument {
        RuleTableDocument {
            taxonomy: self.taxonomy.clone(),
            countries: self.countries.clone(),
        }
    }

    pub fn taxonomy(&self) -> &KeywordTaxonomy {
        &self.taxonomy
    }

    /// Countries in tie-break order (priority, then code).
    pub fn countries(&self) -> &[CountryRules] {
        &self.countries
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    pub fn country(&self, code: &CountryCode) -> Option<&CountryRules> {
        self.by_code.get(code).map(|&index| &self.countries[index])
    }

    /// Country owning a locale region subtag (case-insensitive).
    pub fn country_for_region(&self, region: &str) -> Option<&CountryRules> {
        self.by_region
            .get(&region.to_ascii_uppercase())
            .map(|&index| &self.countries[index])
    }

    /// Every distinct calling code, longest first.
    pub fn calling_codes(&self) -> Vec<&str> {
        let codes: BTreeSet<&str> = self
            .countries
            .iter()
            .map(|country| country.phone.calling_code.as_str())
            .collect();
        let mut codes: Vec<&str> = codes.into_iter().collect();
        codes.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        codes
    }

    /// Keywords to match for a country: the shared core plus its own terms.
    ///
    /// When the country is unknown, every country's terms are included so that
    /// an unresolved country never hides a critical answer. Duplicate terms are
    /// dropped; the first occurrence keeps its category.
    pub fn keywords_for(&self, country: Option<&CountryCode>) -> Vec<KeywordEntry> {
        let mut seen = BTreeSet::new();
        let mut keywords = Vec::new();
        let mut push = |entry: &KeywordEntry| {
            if seen.insert(entry.term.clone()) {
                keywords.push(entry.clone());
            }
        };

        self.taxonomy.core.iter().for_each(&mut push);
        match country.and_then(|code| self.country(code)) {
            Some(rules) => rules.critical_keywords.iter().for_each(&mut push),
            None => self
                .countries
                .iter()
                .flat_map(|rules| rules.critical_keywords.iter())
                .for_each(&mut push),
        }

        keywords
    }
}

fn normalize_keywords(entries: Vec<KeywordEntry>, scope: &str) -> Result<Vec<KeywordEntry>> {
    entries
        .into_iter()
        .map(|entry| {
            let term = entry
                .term
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
                .to_lowercase();
            if term.is_empty() {
                return Err(RulesError::EmptyKeyword {
                    scope: scope.to_string(),
                });
            }
            Ok(KeywordEntry {
                term,
                category: entry.category,
            })
        })
        .collect()
}

fn validate_country(country: &CountryRules) -> Result<()> {
    let code = country.code.to_string();

    for region in &country.regions {
        let region = region.trim();
        let letters = region.len() == 2 && region.chars().all(|ch| ch.is_ascii_alphabetic());
        let digits = region.len() == 3 && region.chars().all(|ch| ch.is_ascii_digit());
        if !letters && !digits {
            return Err(RulesError::InvalidRegion {
                country: code,
                region: region.to_string(),
            });
        }
    }

    let pattern = &country.date_format;
    if !(pattern.contains("dd") && pattern.contains("MM") && pattern.contains("yyyy")) {
        return Err(RulesError::InvalidDatePattern {
            country: code,
            pattern: pattern.clone(),
        });
    }

    let calling_code = &country.phone.calling_code;
    let valid_code = (1..=3).contains(&calling_code.len())
        && calling_code.chars().all(|ch| ch.is_ascii_digit());
    if !valid_code {
        return Err(RulesError::InvalidCallingCode {
            country: code,
            code: calling_code.clone(),
        });
    }

    if country.phone.national_lengths.is_empty() {
        return Err(RulesError::MissingNationalLengths { country: code });
    }

    for grouping in &country.phone.groupings {
        let total: usize = grouping.iter().sum();
        if grouping.contains(&0) || !country.phone.accepts_length(total) {
            return Err(RulesError::InvalidGrouping {
                country: code,
                grouping: grouping.clone(),
            });
        }
    }

    Ok(())
}
