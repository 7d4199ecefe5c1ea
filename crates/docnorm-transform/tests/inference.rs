//! Tests for country inference over language signals.

use docnorm_model::{InferredCountry, LanguageSignal};
use docnorm_standards::LocaleRuleTable;
use docnorm_transform::{infer_country, infer_country_detailed};
use proptest::prelude::*;

const LOCALES: &[&str] = &[
    "ar-AE", "en-US", "en-GB", "ar-SA", "ar", "en", "fr-CA", "de-DE", "hi-IN", "xx-ZZ", "ur",
    "ar-QA", "es",
];

fn signal_strategy() -> impl Strategy<Value = LanguageSignal> {
    (prop::sample::select(LOCALES), 0u8..=10)
        .prop_map(|(locale, tenths)| LanguageSignal::new(locale, f64::from(tenths) / 10.0))
}

#[test]
fn ar_ae_beats_weaker_en_us() {
    let signals = vec![
        LanguageSignal::new("ar-AE", 0.9),
        LanguageSignal::new("en-US", 0.8),
    ];
    let country = infer_country(&signals, LocaleRuleTable::builtin());
    assert_eq!(country.as_str(), "UAE");
}

#[test]
fn no_signals_is_unknown() {
    let country = infer_country(&[], LocaleRuleTable::builtin());
    assert_eq!(country, InferredCountry::Unknown);
}

#[test]
fn custom_table_controls_regions() {
    let table = LocaleRuleTable::from_json_str(
        r#"{
            "taxonomy": {"version": "t", "core": []},
            "countries": [{
                "code": "QAT", "name": "Qatar", "priority": 1,
                "regions": ["QA"], "languages": ["ar"], "dateFormat": "dd/MM/yyyy",
                "phone": {"callingCode": "974", "nationalLengths": [8], "style": "local"}
            }]
        }"#,
    )
    .unwrap();

    let signals = vec![
        LanguageSignal::new("ar-AE", 0.95),
        LanguageSignal::new("ar-QA", 0.4),
    ];
    assert_eq!(infer_country(&signals, &table).as_str(), "QAT");
}

proptest! {
    #[test]
    fn inference_ignores_signal_order(
        signals in prop::collection::vec(signal_strategy(), 0..8),
        seed in any::<u64>(),
    ) {
        let table = LocaleRuleTable::builtin();
        let expected = infer_country_detailed(&signals, table);

        let mut shuffled = signals.clone();
        let len = shuffled.len();
        if len > 1 {
            for i in 0..len {
                let j = (seed.rotate_left(i as u32) as usize) % len;
                shuffled.swap(i, j);
            }
        }
        shuffled.reverse();

        prop_assert_eq!(infer_country_detailed(&shuffled, table), expected);
    }

    #[test]
    fn winner_holds_the_highest_resolvable_confidence(
        signals in prop::collection::vec(signal_strategy(), 1..8),
    ) {
        let table = LocaleRuleTable::builtin();
        let inference = infer_country_detailed(&signals, table);

        let best = signals
            .iter()
            .filter(|signal| {
                docnorm_transform::LocaleTag::parse(&signal.locale)
                    .and_then(|tag| tag.region)
                    .and_then(|region| table.country_for_region(&region))
                    .is_some()
            })
            .map(|signal| signal.confidence)
            .fold(None, |acc: Option<f64>, c| Some(acc.map_or(c, |a| a.max(c))));

        match best {
            Some(confidence) => {
                prop_assert!(inference.country.is_known());
                prop_assert_eq!(inference.confidence, confidence);
            }
            None => prop_assert_eq!(inference.country, InferredCountry::Unknown),
        }
    }
}
