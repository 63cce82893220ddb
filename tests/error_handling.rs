use std::io::Write;
use std::sync::Arc;

use async_trait::async_trait;
use curate::{
    Algorithm, AlgorithmError, Category, Collaborators, CompletionError, ConfigLoadError,
    CurateConfig, CurationEngine, EngineError, InvokeError, Message, Params, PipelineError,
    RegistryError, RewriteAlgorithm,
};
use tempfile::NamedTempFile;

fn engine() -> CurationEngine {
    CurationEngine::new(CurateConfig::default()).unwrap()
}

/// Rewrite that forwards the text to the completion service.
struct Paraphrase;

#[async_trait]
impl RewriteAlgorithm for Paraphrase {
    fn name(&self) -> &str {
        "paraphrase"
    }

    async fn rewrite(
        &self,
        text: &str,
        _params: &Params,
        collaborators: &Collaborators,
    ) -> Result<String, AlgorithmError> {
        let request = collaborators
            .completion_request()
            .with_message(Message::user(text));
        Ok(collaborators.completion.complete(&request).await?.text)
    }
}

#[test]
fn unknown_filter_fails_after_earlier_filters_ran() {
    let engine = engine();
    let text = "a text that would be stored by the minhash filter";
    let err = engine
        .run_filters(text, &["minhash", "does_not_exist"], &Params::new())
        .unwrap_err();
    assert_eq!(err, PipelineError::NotFound("does_not_exist".into()));
    assert_eq!(engine.deduplicator().len(), 1);
}

#[test]
fn rejection_is_reported_before_a_later_unknown_filter() {
    let engine = engine();
    let text = "repeated text that the minhash filter has already seen";
    assert!(engine.deduplicate(text, None).keep);
    let outcome = engine
        .run_filters(text, &["minhash", "does_not_exist"], &Params::new())
        .unwrap();
    assert!(!outcome.passed);
    assert!(outcome.reason.starts_with("failed at minhash"));
}

#[test]
fn filter_names_are_case_sensitive() {
    let err = engine()
        .run_filters("text", &["Entropy"], &Params::new())
        .unwrap_err();
    assert_eq!(err.to_string(), "algorithm 'Entropy' not found");
}

#[tokio::test]
async fn invoke_reports_missing_algorithm_with_category() {
    let engine = engine();
    let collaborators = engine.collaborators(None, None);
    let err = engine
        .invoke(Category::Distill, "pii_mask", "x", &Params::new(), &collaborators)
        .await
        .unwrap_err();
    match err {
        InvokeError::NotFound(RegistryError::NotFound { category, name }) => {
            assert_eq!(category, Category::Distill);
            assert_eq!(name, "pii_mask");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn empty_completion_target_surfaces_as_completion_error() {
    let engine = engine();
    engine
        .registry()
        .register("paraphrase", Algorithm::Rewrite(Arc::new(Paraphrase)));

    // Default config has no base URL.
    let collaborators = engine.collaborators(None, None);
    let err = engine
        .invoke(Category::Rewrite, "paraphrase", "hi", &Params::new(), &collaborators)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        InvokeError::Algorithm(AlgorithmError::Completion(CompletionError::EmptyBaseUrl))
    ));
}

#[test]
fn unsupported_version_is_rejected() {
    let err = CurateConfig::from_yaml_str("version: \"2.0\"\n").unwrap_err();
    assert!(matches!(err, ConfigLoadError::UnsupportedVersion(v) if v == "2.0"));
}

#[test]
fn malformed_yaml_is_a_parse_error() {
    let err = CurateConfig::from_yaml_str("dedup: [unclosed").unwrap_err();
    assert!(matches!(err, ConfigLoadError::YamlParse(_)));
}

#[test]
fn missing_file_is_a_read_error() {
    let err = CurateConfig::from_file("/definitely/not/here/curate.yaml").unwrap_err();
    assert!(matches!(err, ConfigLoadError::FileRead(_)));
}

#[test]
fn invalid_sections_fail_validation() {
    for yaml in [
        "dedup:\n  num_hashes: 0\n",
        "dedup:\n  threshold: 1.5\n",
        "filters:\n  ngram_n: 0\n",
        "clustering:\n  max_iters: 0\n",
        "reliability:\n  smoothing: -1.0\n",
    ] {
        let err = CurateConfig::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, ConfigLoadError::Validation(_)), "{yaml}: {err}");
    }
}

#[test]
fn invalid_config_fails_engine_construction() {
    let mut config = CurateConfig::default();
    config.reliability.prior_correct = 1.5;
    let err = CurationEngine::new(config).unwrap_err();
    assert!(matches!(err, EngineError::Config(ConfigLoadError::Validation(_))));
}

#[test]
fn config_file_round_trip() {
    let mut config = CurateConfig::default();
    config.name = Some("from-disk".into());
    config.dedup.num_hashes = 32;

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(config.to_yaml_string().unwrap().as_bytes())
        .unwrap();

    let loaded = CurateConfig::from_file(file.path()).unwrap();
    assert_eq!(loaded.name.as_deref(), Some("from-disk"));
    assert_eq!(loaded.dedup.num_hashes, 32);
}
