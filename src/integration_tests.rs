//! End-to-End Integration Tests for the Rewriting Pipeline
//!
//! These tests run whole requests through [`Humanizer`](crate::Humanizer)
//! with mock synonym sources, plus one live test against WordsAPI.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --lib integration_tests
//! export WORDS_API_KEY=...
//! cargo test --lib integration_tests -- --ignored --nocapture
//! ```

#[cfg(test)]
mod tests {
    use crate::config::{HumanizeConfig, LookupConfig, RewriteProfile};
    use crate::data::RewriteRequest;
    use crate::error::HumanizeError;
    use crate::pipeline::Humanizer;
    use crate::synonyms::{MockMode, MockSynonymSource, SynonymSource, WordsApiProvider};
    use std::sync::Arc;

    const SCENARIO_A: &str = "The patient's doctor demonstrated significant improvement. \
                              Furthermore, the treatment was effective.";

    /// Every eligible word is looked up; lookups give up after 20 ms
    fn eager_config() -> HumanizeConfig {
        HumanizeConfig {
            profile: RewriteProfile {
                substitution_probability: 1.0,
                ..RewriteProfile::default()
            },
            lookup: LookupConfig {
                timeout_ms: 20,
                ..LookupConfig::default()
            },
            seed: Some(7),
            ..HumanizeConfig::default()
        }
    }

    fn humanizer(config: HumanizeConfig, mode: MockMode) -> Humanizer {
        Humanizer::new(config, Arc::new(MockSynonymSource::new(mode))).unwrap()
    }

    async fn rewrite(h: &Humanizer, text: &str) -> String {
        h.humanize(&RewriteRequest::new(text))
            .await
            .unwrap()
            .humanized_text
    }

    // ============================================================================
    // Scenario A: protected clinical vocabulary
    // ============================================================================

    #[tokio::test]
    async fn test_scenario_a_protected_terms_survive() {
        let mode = MockMode::mappings(&[
            ("improvement", &["surgery", "betterment"]),
            ("showed", &["nurse"]),
        ]);
        let out = rewrite(&humanizer(eager_config(), mode), SCENARIO_A).await;

        assert_eq!(
            out,
            "The patient's doctor showed major betterment. Also, the treatment was effective."
        );
        assert!(!out.contains("Furthermore,"));
        assert!(!out.contains("surgery"));
        assert!(!out.contains("nurse"));
    }

    #[tokio::test]
    async fn test_scenario_a_with_random_profile() {
        let mode = MockMode::mappings(&[("showed", &["proved", "shown"])]);
        let config = HumanizeConfig {
            seed: None,
            ..HumanizeConfig::default()
        };
        let h = humanizer(config, mode);
        for _ in 0..10 {
            let out = rewrite(&h, SCENARIO_A).await;
            for word in ["patient", "doctor", "treatment"] {
                assert!(out.contains(word), "'{}' missing from: {}", word, out);
            }
            assert!(!out.contains("Furthermore,"));
        }
    }

    // ============================================================================
    // Scenario B: reference integrity
    // ============================================================================

    #[tokio::test]
    async fn test_scenario_b_references_are_verbatim() {
        let trailer = "References: Smith, J. (2020). Title. Journal.";
        let input = format!(
            "Furthermore, the method is very robust and works as described. {}",
            trailer
        );
        let mode = MockMode::mappings(&[("title", &["name"]), ("journal", &["diary"])]);
        let out = rewrite(&humanizer(eager_config(), mode), &input).await;

        assert!(out.ends_with(trailer), "trailer changed: {}", out);
        assert!(out.starts_with("Also, the method"));
        assert!(out.contains("\n\nReferences:"));
    }

    #[tokio::test]
    async fn test_scenario_b_multiline_trailer_keeps_spacing() {
        let trailer = "References:\n  [1] Roe, B. (2021).  Moreover, it is very odd.\n";
        let input = format!("Moreover, results hold\n\n{}", trailer);
        let out = rewrite(&humanizer(eager_config(), MockMode::Empty), &input).await;

        assert_eq!(out, format!("Plus, results hold.\n\n{}", trailer));
    }

    // ============================================================================
    // Scenario C: length boundaries
    // ============================================================================

    #[tokio::test]
    async fn test_scenario_c_min_length_boundary() {
        let h = humanizer(HumanizeConfig::default(), MockMode::Empty);

        let exact = "abcdefghij";
        assert!(h.humanize(&RewriteRequest::new(exact)).await.is_ok());

        let short = "abcdefghi";
        assert_eq!(
            h.humanize(&RewriteRequest::new(short)).await,
            Err(HumanizeError::TextTooShort { min: 10, actual: 9 })
        );
    }

    // ============================================================================
    // Scenario D: lexical source always times out
    // ============================================================================

    #[tokio::test]
    async fn test_scenario_d_timeouts_fall_back_to_rule_output() {
        let input = "Furthermore, numerous teams utilize modern tooling to deliver \
                     substantial results quickly.";

        let timed_out = rewrite(&humanizer(eager_config(), MockMode::Timeout), input).await;
        let no_source = rewrite(&humanizer(eager_config(), MockMode::Empty), input).await;

        assert_eq!(timed_out, no_source);
        assert_eq!(
            timed_out,
            "Also, many teams use modern tooling to deliver strong results quickly."
        );
    }

    #[tokio::test]
    async fn test_lookup_errors_never_escape() {
        let mode = MockMode::Error(crate::error::LookupError::Http {
            status: 503,
            message: "Service Unavailable".to_string(),
        });
        let result = humanizer(eager_config(), mode)
            .humanize(&RewriteRequest::new("Teams deliver results quickly."))
            .await;
        assert!(result.is_ok());
    }

    // ============================================================================
    // Properties
    // ============================================================================

    #[tokio::test]
    async fn test_whitelist_idempotence() {
        let mode = MockMode::mappings(&[
            ("gave", &["dose"]),
            ("quickly", &["clinic"]),
            ("success", &["biopsy", "win"]),
        ]);
        let h = humanizer(eager_config(), mode);
        let input = "The doctor gave the patient medication quickly. Furthermore, the \
                     surgery was a very significant success for the hospital.";

        let once = rewrite(&h, input).await;
        let twice = rewrite(&h, &once).await;

        for text in [&once, &twice] {
            for word in ["doctor", "patient", "medication", "surgery", "hospital"] {
                assert_eq!(text.matches(word).count(), 1, "'{}' in: {}", word, text);
            }
            for word in ["dose", "clinic", "biopsy"] {
                assert!(!text.contains(word), "'{}' introduced in: {}", word, text);
            }
        }
    }

    #[tokio::test]
    async fn test_clause_final_copulas_are_not_contracted() {
        let h = humanizer(eager_config(), MockMode::Empty);
        let input = "I know what it is. We know who they are.";
        assert_eq!(rewrite(&h, input).await, input);
        assert_eq!(
            rewrite(&h, "They are sure that it is what we are after.").await,
            "They're sure that it's what we're after."
        );
    }

    #[tokio::test]
    async fn test_punctuated_synonyms_are_rejected() {
        let mode = MockMode::mappings(&[("markets", &["mkts.", "o'er"]), ("steady", &["stable"])]);
        let out = rewrite(
            &humanizer(eager_config(), mode),
            "Markets often remain steady overall.",
        )
        .await;
        assert!(!out.contains('\''), "punctuated synonym used: {}", out);
        assert!(out.starts_with("Markets "));
    }

    #[tokio::test]
    async fn test_token_order_with_shuffled_completion() {
        let source = MockSynonymSource::new(MockMode::mappings(&[
            ("alpha", &["first"]),
            ("charlie", &["carlos"]),
            ("echo", &["ecco"]),
        ]))
        .with_word_delay("alpha", 15)
        .with_word_delay("charlie", 8);
        let config = HumanizeConfig {
            lookup: LookupConfig::default(),
            ..eager_config()
        };
        let h = Humanizer::new(config, Arc::new(source)).unwrap();

        let out = rewrite(&h, "alpha bravo charlie delta echo foxtrot.").await;
        assert_eq!(out, "First bravo carlos delta ecco foxtrot.");
    }

    #[tokio::test]
    async fn test_seeded_pipelines_agree() {
        let mode = MockMode::mappings(&[
            ("rapid", &["quick", "fast", "swift"]),
            ("growth", &["rise", "gain", "boom"]),
            ("markets", &["sectors", "fields", "areas"]),
            ("steady", &["stable", "even", "firm"]),
        ]);
        let config = HumanizeConfig {
            seed: Some(2024),
            ..HumanizeConfig::default()
        };
        let input = "Rapid growth happens across markets and often remains steady.";

        let first = rewrite(&humanizer(config.clone(), mode.clone()), input).await;
        let second = rewrite(&humanizer(config, mode), input).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_statistics_are_consistent() {
        let result = humanizer(eager_config(), MockMode::Empty)
            .humanize(&RewriteRequest::new(SCENARIO_A))
            .await
            .unwrap();
        let stats = &result.statistics;
        assert_eq!(stats.original_word_count, 11);
        assert_eq!(stats.humanized_word_count, 11);
        assert!(stats.changes_count > 0);
        assert!((6.5..=8.5).contains(&stats.readability_score));
    }

    // ============================================================================
    // Live WordsAPI
    // ============================================================================

    #[tokio::test]
    #[ignore]
    async fn test_e2e_words_api() {
        if std::env::var("WORDS_API_KEY").is_err() {
            eprintln!("⚠️  Skipping: WORDS_API_KEY not set");
            return;
        }

        let config = HumanizeConfig::default().apply_env().unwrap();
        let provider = WordsApiProvider::from_config(&config.lookup).unwrap();
        println!("📡 Source: {}", provider.source_name());

        let h = Humanizer::new(config, Arc::new(provider)).unwrap();
        let result = h.humanize(&RewriteRequest::new(SCENARIO_A)).await.unwrap();

        println!("\n📝 ORIGINAL:\n  {}", result.original_text);
        println!("\n✨ HUMANIZED:\n  {}", result.humanized_text);
        println!("\n📊 STATS: {:?}", result.statistics);

        for word in ["patient", "doctor", "treatment"] {
            assert!(result.humanized_text.contains(word));
        }
    }
}
