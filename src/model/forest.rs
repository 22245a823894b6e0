use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::DxError;
use crate::features::{FEATURE_NAMES, FeatureValue, FeatureVector};
use crate::model::Classifier;

pub const FOREST_FORMAT_V1: &str = "kira-forest-v1";

/// Leaf distributions are read index-aligned with these category codes.
const CATEGORY_CODES: [i64; 3] = [1, 2, 3];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestArtifact {
    pub format: String,
    #[serde(default)]
    pub name: Option<String>,
    pub feature_names: Vec<String>,
    pub classes: Vec<i64>,
    #[serde(default)]
    pub categorical: BTreeMap<String, Vec<String>>,
    pub trees: Vec<TreeArtifact>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeArtifact {
    pub nodes: Vec<NodeArtifact>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeArtifact {
    Split {
        feature: String,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: Vec<f64>,
    },
}

#[derive(Debug, Clone)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        distribution: Vec<f64>,
    },
}

#[derive(Debug, Clone)]
struct Tree {
    nodes: Vec<Node>,
}

/// Random forest over the 12-column feature schema. Categorical columns are
/// ordinal-encoded by their position in the artifact's category list; splits
/// go left when `x <= threshold`.
#[derive(Debug, Clone)]
pub struct ForestClassifier {
    name: String,
    classes: Vec<i64>,
    categorical: Vec<Option<Vec<String>>>,
    trees: Vec<Tree>,
}

impl ForestClassifier {
    /// Loads a forest artifact. Any failure here is fatal for the process.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read model artifact {}", path.display()))
            .map_err(into_unavailable)?;
        let default_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("forest")
            .to_string();
        let forest = Self::from_json_str(&content, &default_name)
            .with_context(|| format!("model artifact {}", path.display()))
            .map_err(into_unavailable)?;
        info!(
            model = %forest.name,
            trees = forest.trees.len(),
            classes = forest.classes.len(),
            "model_loaded"
        );
        Ok(forest)
    }

    pub fn from_json_str(content: &str, default_name: &str) -> Result<Self> {
        let artifact: ForestArtifact =
            serde_json::from_str(content).context("malformed forest JSON")?;
        Self::from_artifact(artifact, default_name)
    }

    pub fn from_artifact(artifact: ForestArtifact, default_name: &str) -> Result<Self> {
        if artifact.format != FOREST_FORMAT_V1 {
            bail!(
                "unsupported model format '{}' (expected '{}')",
                artifact.format,
                FOREST_FORMAT_V1
            );
        }
        if artifact.feature_names.len() != FEATURE_NAMES.len()
            || artifact
                .feature_names
                .iter()
                .zip(FEATURE_NAMES.iter())
                .any(|(got, want)| got != want)
        {
            bail!(
                "feature schema mismatch: model expects [{}], form provides [{}]",
                artifact.feature_names.join(", "),
                FEATURE_NAMES.join(", ")
            );
        }
        if artifact.classes != CATEGORY_CODES {
            bail!(
                "model classes {:?} do not match category order {:?}",
                artifact.classes,
                CATEGORY_CODES
            );
        }
        if artifact.trees.is_empty() {
            bail!("model contains no trees");
        }

        let mut categorical: Vec<Option<Vec<String>>> = vec![None; FEATURE_NAMES.len()];
        for (feature, levels) in artifact.categorical {
            let idx = feature_index(&feature)
                .with_context(|| format!("categorical encoding for unknown feature '{}'", feature))?;
            if levels.is_empty() {
                bail!("categorical encoding for '{}' has no levels", feature);
            }
            categorical[idx] = Some(levels);
        }

        let n_classes = artifact.classes.len();
        let mut trees = Vec::with_capacity(artifact.trees.len());
        for (tree_idx, tree) in artifact.trees.into_iter().enumerate() {
            trees.push(
                resolve_tree(tree, n_classes).with_context(|| format!("tree {}", tree_idx))?,
            );
        }

        Ok(Self {
            name: artifact.name.unwrap_or_else(|| default_name.to_string()),
            classes: artifact.classes,
            categorical,
            trees,
        })
    }

    pub fn classes(&self) -> &[i64] {
        &self.classes
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    fn encode(&self, features: &FeatureVector) -> Result<Vec<f64>> {
        let mut row = Vec::with_capacity(FEATURE_NAMES.len());
        for (idx, name) in FEATURE_NAMES.iter().enumerate() {
            let value = features
                .get(name)
                .with_context(|| format!("feature '{}' missing from input", name))?;
            let encoded = match (value, &self.categorical[idx]) {
                (FeatureValue::Number(v), None) => *v,
                (FeatureValue::Text(s), Some(levels)) => levels
                    .iter()
                    .position(|level| level == s)
                    .map(|pos| pos as f64)
                    .with_context(|| format!("unknown {} value '{}'", name, s))?,
                (FeatureValue::Number(_), Some(_)) => {
                    bail!("feature '{}' is categorical but received a number", name)
                }
                (FeatureValue::Text(s), None) => {
                    bail!("feature '{}' is numeric but received '{}'", name, s)
                }
            };
            row.push(encoded);
        }
        Ok(row)
    }

    fn mean_distribution(&self, row: &[f64]) -> Result<Vec<f64>> {
        let mut acc = vec![0.0; self.classes.len()];
        for (tree_idx, tree) in self.trees.iter().enumerate() {
            let leaf = tree
                .leaf_for(row)
                .with_context(|| format!("tree {}", tree_idx))?;
            for (a, p) in acc.iter_mut().zip(leaf) {
                *a += *p;
            }
        }
        let n = self.trees.len() as f64;
        for a in &mut acc {
            *a /= n;
        }
        Ok(acc)
    }
}

impl Classifier for ForestClassifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, features: &FeatureVector) -> Result<i64> {
        let proba = self.predict_proba(features)?;
        let mut best = 0usize;
        for (idx, p) in proba.iter().enumerate() {
            if *p > proba[best] {
                best = idx;
            }
        }
        Ok(self.classes[best])
    }

    fn predict_proba(&self, features: &FeatureVector) -> Result<Vec<f64>> {
        let row = self.encode(features)?;
        self.mean_distribution(&row)
    }
}

impl Tree {
    fn leaf_for(&self, row: &[f64]) -> Result<&[f64]> {
        let mut idx = 0usize;
        // A well-formed tree reaches a leaf in fewer hops than it has nodes.
        for _ in 0..=self.nodes.len() {
            match &self.nodes[idx] {
                Node::Leaf { distribution } => return Ok(distribution.as_slice()),
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if row[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
        bail!("cycle detected while walking tree")
    }
}

fn resolve_tree(tree: TreeArtifact, n_classes: usize) -> Result<Tree> {
    if tree.nodes.is_empty() {
        bail!("tree has no nodes");
    }
    let n_nodes = tree.nodes.len();
    let mut nodes = Vec::with_capacity(n_nodes);
    for (node_idx, node) in tree.nodes.into_iter().enumerate() {
        let resolved = match node {
            NodeArtifact::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                let feature_idx = feature_index(&feature)
                    .with_context(|| format!("node {} splits on unknown feature '{}'", node_idx, feature))?;
                if !threshold.is_finite() {
                    bail!("node {} has a non-finite threshold", node_idx);
                }
                if left >= n_nodes || right >= n_nodes {
                    bail!(
                        "node {} points outside the tree (left={}, right={}, nodes={})",
                        node_idx,
                        left,
                        right,
                        n_nodes
                    );
                }
                Node::Split {
                    feature: feature_idx,
                    threshold,
                    left,
                    right,
                }
            }
            NodeArtifact::Leaf { value } => {
                if value.len() != n_classes {
                    bail!(
                        "leaf {} has {} class weights, expected {}",
                        node_idx,
                        value.len(),
                        n_classes
                    );
                }
                if value.iter().any(|v| !v.is_finite() || *v < 0.0) {
                    bail!("leaf {} has invalid class weights", node_idx);
                }
                let total: f64 = value.iter().sum();
                if total <= 0.0 {
                    bail!("leaf {} has zero total weight", node_idx);
                }
                Node::Leaf {
                    distribution: value.iter().map(|v| v / total).collect(),
                }
            }
        };
        nodes.push(resolved);
    }
    Ok(Tree { nodes })
}

fn feature_index(name: &str) -> Option<usize> {
    FEATURE_NAMES.iter().position(|f| *f == name)
}

fn into_unavailable(err: anyhow::Error) -> anyhow::Error {
    DxError::unavailable(format!("{:#}", err)).into()
}
