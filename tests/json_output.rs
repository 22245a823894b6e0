use kira_neurodx::ctx::SubmissionContext;
use kira_neurodx::input::{Gender, RawInput};
use kira_neurodx::io::json_writer::build_report;
use kira_neurodx::model::ForestClassifier;
use kira_neurodx::pipeline::Pipeline;
use kira_neurodx::schema::v1::NeuroDxV1;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

fn demo_forest() -> Arc<ForestClassifier> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/models/adni_forest_demo.json");
    Arc::new(ForestClassifier::load(&path).unwrap())
}

fn impaired_input() -> RawInput {
    RawInput {
        age: 81,
        education_years: 9,
        gender: Gender::Male,
        mmse: 20,
        moca: 22,
        hippocampus_norm_vol: 0.0025,
        amygdala_norm_vol: 0.0009,
        temporal_pole_norm_vol: 0.0020,
        brainstem_norm_vol: 0.0128,
        precentral_thick: 2.1,
        superior_frontal_thick: 2.3,
        insula_thick: 2.6,
    }
}

#[test]
fn json_report_populated() {
    let tmp = TempDir::new().unwrap();
    let json_path = tmp.path().join("neurodx.json");
    let mut ctx = SubmissionContext::new(impaired_input(), Some(json_path.clone()));

    Pipeline::submission(demo_forest()).run(&mut ctx).unwrap();
    Pipeline::summary().run(&mut ctx).unwrap();

    let content = std::fs::read_to_string(&json_path).unwrap();
    let json: Value = serde_json::from_str(&content).unwrap();

    assert_eq!(json["tool"], "kira-neurodx");
    assert_eq!(json["schema_version"], "v1");
    assert_eq!(json["model"], "adni_forest_demo");
    assert_eq!(json["diagnosis"]["category"], 3);
    assert_eq!(json["diagnosis"]["label"], "Dementia");
    assert_eq!(json["diagnosis"]["color"], "red");
    assert_eq!(json["diagnosis"]["color_hex"], "#e74c3c");

    let probabilities = json["probabilities"].as_array().unwrap();
    assert_eq!(probabilities.len(), 3);
    assert_eq!(probabilities[0]["label"], "Cognitively Normal");
    assert_eq!(probabilities[2]["emphasized"], true);
    assert_eq!(probabilities[0]["emphasized"], false);

    assert_eq!(json["chart"]["y_min"], 0.0);
    assert_eq!(json["chart"]["y_max"], 100.0);
    assert_eq!(json["chart"]["series"][1]["color"], "yellow");

    assert_eq!(json["key_indicators"].as_array().unwrap().len(), 4);
    assert_eq!(json["indicator_rules"][0]["name"], "low_mmse");
    assert_eq!(json["indicator_rules"][0]["fired"], true);
    assert!(json["disclaimer"].as_str().unwrap().contains("research"));
}

#[test]
fn report_roundtrips_through_serde() {
    let mut ctx = SubmissionContext::new(impaired_input(), None);
    Pipeline::submission(demo_forest()).run(&mut ctx).unwrap();
    Pipeline::summary().run(&mut ctx).unwrap();

    let report = build_report(&ctx).unwrap();
    let encoded = serde_json::to_string(&report).unwrap();
    let decoded: NeuroDxV1 = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded.diagnosis.label, report.diagnosis.label);
    assert_eq!(decoded.probabilities.len(), 3);
    assert_eq!(decoded.indicator_rules.len(), 4);
}

#[test]
fn report_requires_presentation() {
    let ctx = SubmissionContext::new(impaired_input(), None);
    assert!(build_report(&ctx).is_err());
}
