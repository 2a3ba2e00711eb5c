//! Feature file parser — line-oriented recognition of feature, background,
//! scenario, and step markers.

use serde::{Deserialize, Serialize};

/// A parsed feature file: one named feature and its scenarios.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub title: String,
    pub background: bool,
    pub scenarios: Vec<ScenarioRecord>,
}

/// A named scenario — an ordered sequence of raw step lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioRecord {
    pub name: String,
    pub steps: Vec<String>,
}

/// Step keywords recognized at the start of a trimmed line. `And` lines
/// inherit the role of the step above them, so all four are stored
/// identically as raw text.
const STEP_KEYWORDS: [&str; 4] = ["Given ", "When ", "Then ", "And "];

/// Parse raw feature text into a [`FeatureRecord`].
///
/// Lines matching no marker are silently ignored — blank lines, comments,
/// tags, data tables and doc-strings all degrade to smaller output rather
/// than an error. Steps appearing before the first `Scenario:` line are
/// dropped. This function never fails.
pub fn parse(text: &str) -> FeatureRecord {
    let mut feature = FeatureRecord::default();
    let mut current: Option<ScenarioRecord> = None;

    for raw in text.lines() {
        let line = raw.trim();

        if let Some(rest) = line.strip_prefix("Feature:") {
            feature.title = rest.trim().to_string();
        } else if line.starts_with("Background:") {
            feature.background = true;
        } else if let Some(rest) = line.strip_prefix("Scenario:") {
            if let Some(done) = current.take() {
                feature.scenarios.push(done);
            }
            current = Some(ScenarioRecord {
                name: rest.trim().to_string(),
                steps: Vec::new(),
            });
        } else if STEP_KEYWORDS.iter().any(|kw| line.starts_with(kw)) {
            if let Some(scenario) = current.as_mut() {
                scenario.steps.push(line.to_string());
            }
        }
    }

    if let Some(done) = current.take() {
        feature.scenarios.push(done);
    }

    feature
}
