use std::path::PathBuf;

use kira_neurodx::error::DxError;
use kira_neurodx::features::build;
use kira_neurodx::input::{Gender, RawInput};
use kira_neurodx::model::{Classifier, ForestClassifier, classify};

fn demo_model_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/models/adni_forest_demo.json")
}

fn healthy(gender: Gender) -> RawInput {
    RawInput {
        age: 70,
        education_years: 16,
        gender,
        mmse: 29,
        moca: 28,
        hippocampus_norm_vol: 0.0045,
        amygdala_norm_vol: 0.0011,
        temporal_pole_norm_vol: 0.0024,
        brainstem_norm_vol: 0.0142,
        precentral_thick: 2.6,
        superior_frontal_thick: 2.7,
        insula_thick: 2.9,
    }
}

fn impaired() -> RawInput {
    RawInput {
        mmse: 20,
        moca: 22,
        hippocampus_norm_vol: 0.0025,
        precentral_thick: 2.1,
        ..healthy(Gender::Male)
    }
}

const FEATURES_JSON: &str = r#"["MMSCORE","MOCA","AGE","EDUCATION_YEARS","hippocampus_norm_vol","amygdala_norm_vol","temporal_pole_norm_vol","brainstem_norm_vol","precentral_thick","superior_frontal_thick","insula_thick","GENDER"]"#;

fn artifact(trees: &str) -> String {
    format!(
        r#"{{"format":"kira-forest-v1","feature_names":{},"classes":[1,2,3],"categorical":{{"GENDER":["Male","Female"]}},"trees":{}}}"#,
        FEATURES_JSON, trees
    )
}

fn load_err(content: &str) -> String {
    let err = ForestClassifier::from_json_str(content, "test")
        .map(|_| ())
        .unwrap_err();
    format!("{:#}", err)
}

#[test]
fn demo_model_loads() {
    let forest = ForestClassifier::load(&demo_model_path()).unwrap();
    assert_eq!(forest.name(), "adni_forest_demo");
    assert_eq!(forest.classes(), &[1i64, 2, 3]);
    assert_eq!(forest.n_trees(), 3);
}

#[test]
fn healthy_profile_is_cognitively_normal() {
    let forest = ForestClassifier::load(&demo_model_path()).unwrap();
    let features = build(&healthy(Gender::Male));
    assert_eq!(forest.predict(&features).unwrap(), 1);

    let proba = forest.predict_proba(&features).unwrap();
    assert_eq!(proba.len(), 3);
    assert!((proba[0] - 0.816_666_7).abs() < 1e-6);
    assert!((proba[1] - 0.133_333_3).abs() < 1e-6);
    assert!((proba[2] - 0.05).abs() < 1e-6);
}

#[test]
fn gender_is_ordinal_encoded() {
    let forest = ForestClassifier::load(&demo_model_path()).unwrap();
    let proba = forest.predict_proba(&build(&healthy(Gender::Female))).unwrap();
    assert!((proba[0] - 0.8).abs() < 1e-6);
    assert!((proba[1] - 0.15).abs() < 1e-6);
}

#[test]
fn impaired_profile_is_dementia() {
    let forest = ForestClassifier::load(&demo_model_path()).unwrap();
    let result = classify(&forest, &build(&impaired())).unwrap();
    assert_eq!(result.category.code(), 3);
    let sum: f64 = result.probabilities.iter().sum();
    assert!((sum - 1.0).abs() < 1e-9);
}

#[test]
fn missing_artifact_is_classifier_unavailable() {
    let err = ForestClassifier::load(&PathBuf::from("/nonexistent/model.json")).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DxError>(),
        Some(DxError::ClassifierUnavailable(_))
    ));
}

#[test]
fn corrupt_artifact_is_classifier_unavailable() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("model.json");
    std::fs::write(&path, "{ not json").unwrap();
    let err = ForestClassifier::load(&path).unwrap_err();
    match err.downcast_ref::<DxError>() {
        Some(DxError::ClassifierUnavailable(reason)) => {
            assert!(reason.contains("malformed forest JSON"))
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn schema_mismatch_is_rejected() {
    let content = r#"{"format":"kira-forest-v1","feature_names":["MOCA","MMSCORE"],"classes":[1,2,3],"trees":[{"nodes":[{"value":[1,0,0]}]}]}"#;
    assert!(load_err(content).contains("feature schema mismatch"));
}

#[test]
fn wrong_format_is_rejected() {
    let content = artifact(r#"[{"nodes":[{"value":[1,0,0]}]}]"#).replace("kira-forest-v1", "pickle");
    assert!(load_err(&content).contains("unsupported model format"));
}

#[test]
fn structural_errors_are_rejected() {
    assert!(load_err(&artifact("[]")).contains("no trees"));
    assert!(
        load_err(&artifact(
            r#"[{"nodes":[{"feature":"MOCA","threshold":25.5,"left":1,"right":7},{"value":[1,0,0]}]}]"#
        ))
        .contains("points outside the tree")
    );
    assert!(load_err(&artifact(r#"[{"nodes":[{"value":[1,0]}]}]"#)).contains("class weights"));
    assert!(
        load_err(&artifact(
            r#"[{"nodes":[{"feature":"MMSE","threshold":1.0,"left":0,"right":0}]}]"#
        ))
        .contains("unknown feature")
    );

    let reordered = artifact(r#"[{"nodes":[{"value":[0.9,0.05,0.05]}]}]"#)
        .replace(r#""classes":[1,2,3]"#, r#""classes":[3,2,1]"#);
    assert!(load_err(&reordered).contains("do not match category order"));
    let two_classes = artifact(r#"[{"nodes":[{"value":[0.9,0.1]}]}]"#)
        .replace(r#""classes":[1,2,3]"#, r#""classes":[1,2]"#);
    assert!(load_err(&two_classes).contains("do not match category order"));
}

#[test]
fn reordered_classes_fail_at_load() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("model.json");
    let content = artifact(r#"[{"nodes":[{"value":[0.9,0.05,0.05]}]}]"#)
        .replace(r#""classes":[1,2,3]"#, r#""classes":[3,2,1]"#);
    std::fs::write(&path, content).unwrap();
    let err = ForestClassifier::load(&path).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DxError>(),
        Some(DxError::ClassifierUnavailable(_))
    ));
}

#[test]
fn tied_distribution_predicts_first_category() {
    let forest = ForestClassifier::from_json_str(
        &artifact(r#"[{"nodes":[{"value":[0.4,0.4,0.2]}]}]"#),
        "tied",
    )
    .unwrap();
    let features = build(&healthy(Gender::Male));
    assert_eq!(forest.predict(&features).unwrap(), 1);

    let result = classify(&forest, &features).unwrap();
    assert_eq!(result.category.code(), 1);
    assert!((result.probabilities[0] - 0.4).abs() < 1e-12);
    assert!((result.probabilities[1] - 0.4).abs() < 1e-12);
}

#[test]
fn predict_agrees_with_probability_argmax() {
    let forest = ForestClassifier::load(&demo_model_path()).unwrap();
    for input in [healthy(Gender::Male), healthy(Gender::Female), impaired()] {
        let features = build(&input);
        let proba = forest.predict_proba(&features).unwrap();
        let mut best = 0;
        for (idx, p) in proba.iter().enumerate() {
            if *p > proba[best] {
                best = idx;
            }
        }
        assert_eq!(forest.predict(&features).unwrap(), best as i64 + 1);
    }
}

#[test]
fn cyclic_tree_fails_at_prediction() {
    let forest = ForestClassifier::from_json_str(
        &artifact(r#"[{"nodes":[{"feature":"MOCA","threshold":25.5,"left":0,"right":0}]}]"#),
        "cyclic",
    )
    .unwrap();
    let err = classify(&forest, &build(&healthy(Gender::Male))).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DxError>(),
        Some(DxError::ClassifierUnavailable(_))
    ));
}

#[test]
fn unknown_categorical_level_fails() {
    let content = artifact(r#"[{"nodes":[{"value":[1,0,0]}]}]"#)
        .replace(r#"["Male","Female"]"#, r#"["M","F"]"#);
    let forest = ForestClassifier::from_json_str(&content, "levels").unwrap();
    let err = forest.predict_proba(&build(&healthy(Gender::Male))).unwrap_err();
    assert!(format!("{:#}", err).contains("unknown GENDER value 'Male'"));
}

#[test]
fn leaf_weights_are_normalized() {
    let forest = ForestClassifier::from_json_str(
        &artifact(r#"[{"nodes":[{"value":[6,3,1]}]}]"#),
        "counts",
    )
    .unwrap();
    let proba = forest.predict_proba(&build(&healthy(Gender::Male))).unwrap();
    assert!((proba[0] - 0.6).abs() < 1e-12);
    assert!((proba[1] - 0.3).abs() < 1e-12);
    assert!((proba[2] - 0.1).abs() < 1e-12);
}
