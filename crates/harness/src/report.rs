//! Run reports — structured summaries of scenario executions with
//! pass/fail analysis, text rendering, JSON export, and flaky detection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use featurespec_core::error::HarnessResult;

use crate::runner::{ScenarioRun, StepStatus};

/// Overall verdict for one scenario run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Passed,
    Failed,
    /// Every step was skipped — nothing was actually exercised.
    Skipped,
}

/// Summary of a single scenario run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub run_id: uuid::Uuid,
    pub feature: String,
    pub scenario: String,
    pub verdict: Verdict,
    pub total_steps: usize,
    pub passed_steps: usize,
    pub failed_steps: usize,
    pub skipped_steps: usize,
    pub duration_ms: u64,
    pub screenshot: Option<String>,
}

/// Detail of a failed step for debugging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedStep {
    pub scenario: String,
    pub step_number: u32,
    pub text: String,
    pub message: String,
}

/// Aggregate report across a batch of scenario runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub summaries: Vec<RunSummary>,
    pub total_runs: usize,
    pub passed_runs: usize,
    pub failed_runs: usize,
    pub skipped_runs: usize,
    pub overall_pass_rate: f64,
    pub total_duration_ms: u64,
    pub slowest_scenario: Option<String>,
    pub fastest_scenario: Option<String>,
    pub failed_steps_detail: Vec<FailedStep>,
}

impl RunReport {
    /// Generate a report from a batch of scenario runs.
    pub fn generate(title: impl Into<String>, runs: &[ScenarioRun]) -> Self {
        let summaries: Vec<RunSummary> = runs.iter().map(summarize).collect();

        let total_runs = summaries.len();
        let passed_runs = summaries
            .iter()
            .filter(|s| s.verdict == Verdict::Passed)
            .count();
        let failed_runs = summaries
            .iter()
            .filter(|s| s.verdict == Verdict::Failed)
            .count();
        let skipped_runs = summaries
            .iter()
            .filter(|s| s.verdict == Verdict::Skipped)
            .count();

        let overall_pass_rate = if total_runs == 0 {
            100.0
        } else {
            passed_runs as f64 / total_runs as f64 * 100.0
        };

        let total_duration_ms: u64 = summaries.iter().map(|s| s.duration_ms).sum();

        let slowest_scenario = summaries
            .iter()
            .max_by_key(|s| s.duration_ms)
            .map(|s| s.scenario.clone());
        let fastest_scenario = summaries
            .iter()
            .min_by_key(|s| s.duration_ms)
            .map(|s| s.scenario.clone());

        let failed_steps_detail = collect_failures(runs);

        Self {
            title: title.into(),
            generated_at: Utc::now(),
            summaries,
            total_runs,
            passed_runs,
            failed_runs,
            skipped_runs,
            overall_pass_rate,
            total_duration_ms,
            slowest_scenario,
            fastest_scenario,
            failed_steps_detail,
        }
    }

    /// Whether any scenario in the batch failed.
    pub fn has_failures(&self) -> bool {
        self.failed_runs > 0
    }

    /// Render the report as a formatted text table.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("=== {} ===\n", self.title));
        out.push_str(&format!(
            "Generated: {}\n\n",
            self.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        out.push_str(&format!(
            "Total: {} | Passed: {} | Failed: {} | Skipped: {} | Pass Rate: {:.1}%\n",
            self.total_runs, self.passed_runs, self.failed_runs, self.skipped_runs,
            self.overall_pass_rate,
        ));
        out.push_str(&format!("Total Duration: {}ms\n\n", self.total_duration_ms));

        out.push_str(&format!(
            "  {:<30} {:<10} {:<8} {:<10}\n",
            "Scenario", "Verdict", "Steps", "Duration"
        ));
        out.push_str(&format!("  {}\n", "-".repeat(60)));

        for s in &self.summaries {
            let verdict = match s.verdict {
                Verdict::Passed => "PASS",
                Verdict::Failed => "FAIL",
                Verdict::Skipped => "SKIP",
            };
            out.push_str(&format!(
                "  {:<30} {:<10} {}/{:<5} {}ms\n",
                s.scenario, verdict, s.passed_steps, s.total_steps, s.duration_ms,
            ));
        }

        if !self.failed_steps_detail.is_empty() {
            out.push_str("\nFailed Steps:\n");
            for f in &self.failed_steps_detail {
                out.push_str(&format!(
                    "  [{}] Step {} - {}\n",
                    f.scenario, f.step_number, f.message
                ));
            }
        }

        out
    }

    /// Serialize the full report as pretty-printed JSON.
    pub fn to_json(&self) -> HarnessResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn summarize(run: &ScenarioRun) -> RunSummary {
    let passed_steps = run
        .steps
        .iter()
        .filter(|s| s.status == StepStatus::Passed)
        .count();
    let failed_steps = run
        .steps
        .iter()
        .filter(|s| s.status == StepStatus::Failed)
        .count();
    let skipped_steps = run
        .steps
        .iter()
        .filter(|s| s.status == StepStatus::Skipped)
        .count();

    let verdict = if failed_steps > 0 {
        Verdict::Failed
    } else if passed_steps == 0 && !run.steps.is_empty() {
        Verdict::Skipped
    } else {
        Verdict::Passed
    };

    RunSummary {
        run_id: run.id,
        feature: run.feature.clone(),
        scenario: run.scenario.clone(),
        verdict,
        total_steps: run.steps.len(),
        passed_steps,
        failed_steps,
        skipped_steps,
        duration_ms: run.duration_ms(),
        screenshot: run.screenshot.clone(),
    }
}

fn collect_failures(runs: &[ScenarioRun]) -> Vec<FailedStep> {
    let mut failures = Vec::new();
    for run in runs {
        for step in &run.steps {
            if step.status == StepStatus::Failed {
                failures.push(FailedStep {
                    scenario: run.scenario.clone(),
                    step_number: step.step_number,
                    text: step.text.clone(),
                    message: step.message.clone().unwrap_or_else(|| "unknown".into()),
                });
            }
        }
    }
    failures
}

/// Detect flaky scenarios: names with mixed pass/fail results across
/// repeated runs of the same batch.
pub fn detect_flaky(runs: &[ScenarioRun]) -> Vec<String> {
    use std::collections::HashMap;
    let mut results_by_scenario: HashMap<String, Vec<bool>> = HashMap::new();

    for run in runs {
        results_by_scenario
            .entry(run.scenario.clone())
            .or_default()
            .push(run.passed);
    }

    let mut flaky: Vec<String> = results_by_scenario
        .into_iter()
        .filter(|(_, results)| {
            results.len() > 1 && results.iter().any(|r| *r) && results.iter().any(|r| !*r)
        })
        .map(|(name, _)| name)
        .collect();
    flaky.sort();
    flaky
}
