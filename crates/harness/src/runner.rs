//! Scenario runner — executes parsed features directly against a page
//! driver, with per-scenario lifecycle hooks and screenshot capture on
//! failure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use featurespec_core::config::RunnerConfig;
use featurespec_core::error::HarnessResult;
use featurespec_generator::parser::{FeatureRecord, ScenarioRecord};
use featurespec_generator::translate::{classify, StepIntent};

use crate::driver::PageDriver;

/// Outcome classification of one executed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Passed,
    Failed,
    /// The step matched no translation rule and was not executed.
    Skipped,
}

/// Record of one executed (or skipped) step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepOutcome {
    pub step_number: u32,
    pub text: String,
    pub status: StepStatus,
    pub message: Option<String>,
}

/// Record of a complete scenario execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioRun {
    pub id: Uuid,
    pub feature: String,
    pub scenario: String,
    pub steps: Vec<StepOutcome>,
    pub passed: bool,
    pub screenshot: Option<String>,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl ScenarioRun {
    pub fn duration_ms(&self) -> u64 {
        (self.completed_at - self.started_at).num_milliseconds().max(0) as u64
    }
}

/// Executes scenarios step by step against a [`PageDriver`].
pub struct ScenarioRunner<'a, D: PageDriver> {
    config: RunnerConfig,
    driver: &'a mut D,
}

impl<'a, D: PageDriver> ScenarioRunner<'a, D> {
    pub fn new(config: RunnerConfig, driver: &'a mut D) -> Self {
        Self { config, driver }
    }

    /// Execute every scenario of a feature in declaration order.
    pub fn run_feature(&mut self, feature: &FeatureRecord) -> Vec<ScenarioRun> {
        feature
            .scenarios
            .iter()
            .map(|scenario| self.run_scenario(&feature.title, scenario))
            .collect()
    }

    /// Execute one scenario. A failed step aborts the scenario; remaining
    /// steps are not executed. Retry is disabled unless configured.
    pub fn run_scenario(&mut self, feature: &str, scenario: &ScenarioRecord) -> ScenarioRun {
        info!(scenario = %scenario.name, steps = scenario.steps.len(), "Starting scenario");
        let started_at = Utc::now();

        let mut steps = Vec::new();
        for (i, raw) in scenario.steps.iter().enumerate() {
            let outcome = self.execute_step(i as u32 + 1, raw);
            let failed = outcome.status == StepStatus::Failed;
            steps.push(outcome);
            if failed && !self.config.retry_flaky {
                break;
            }
        }

        let passed = steps.iter().all(|s| s.status != StepStatus::Failed);
        let screenshot = if !passed && self.config.screenshot_on_failure {
            self.driver.screenshot(&scenario.name).ok()
        } else {
            None
        };

        info!(scenario = %scenario.name, passed, "Finished scenario");

        ScenarioRun {
            id: Uuid::new_v4(),
            feature: feature.to_string(),
            scenario: scenario.name.clone(),
            steps,
            passed,
            screenshot,
            started_at,
            completed_at: Utc::now(),
        }
    }

    fn execute_step(&mut self, step_number: u32, raw: &str) -> StepOutcome {
        let (status, message) = match classify(raw) {
            StepIntent::Navigate(url) => {
                let resolved = self.resolve_url(&url);
                let result = self.driver.goto(&resolved);
                action_outcome(result, format!("navigated to {resolved}"))
            }
            StepIntent::AssertTitle(expected) => match self.driver.title() {
                Ok(actual) if actual == expected => {
                    (StepStatus::Passed, Some(format!("title is '{actual}'")))
                }
                Ok(actual) => (
                    StepStatus::Failed,
                    Some(format!("expected title '{expected}', got '{actual}'")),
                ),
                Err(e) => (StepStatus::Failed, Some(e.to_string())),
            },
            StepIntent::AssertVisibleText(text) => {
                let result = self.driver.text_visible(&text);
                visibility_outcome(result, "text", &text)
            }
            StepIntent::AssertLink(text) => {
                let result = self.driver.link_visible(&text);
                visibility_outcome(result, "link", &text)
            }
            StepIntent::Click(text) => {
                let result = self.driver.click_text(&text);
                action_outcome(result, format!("clicked '{text}'"))
            }
            StepIntent::AssertUrlContains(substring) => match self.driver.current_url() {
                Ok(url) if url.contains(&substring) => {
                    (StepStatus::Passed, Some(format!("url is {url}")))
                }
                Ok(url) => (
                    StepStatus::Failed,
                    Some(format!("url '{url}' does not contain '{substring}'")),
                ),
                Err(e) => (StepStatus::Failed, Some(e.to_string())),
            },
            StepIntent::WaitForLoad => {
                let result = self.driver.wait_for_load();
                action_outcome(result, "page loaded".to_string())
            }
            StepIntent::BrowserWindow => (
                StepStatus::Passed,
                Some("browser window handled by the driver".into()),
            ),
            StepIntent::Passthrough(_) => {
                (StepStatus::Skipped, Some("no matching step rule".into()))
            }
        };

        StepOutcome {
            step_number,
            text: raw.to_string(),
            status,
            message,
        }
    }

    /// Quoted URLs starting with `/` are resolved against the configured
    /// base URL; absolute URLs pass through untouched.
    fn resolve_url(&self, url: &str) -> String {
        if url.starts_with('/') {
            format!("{}{}", self.config.base_url.trim_end_matches('/'), url)
        } else {
            url.to_string()
        }
    }
}

fn action_outcome(
    result: HarnessResult<()>,
    ok_message: String,
) -> (StepStatus, Option<String>) {
    match result {
        Ok(()) => (StepStatus::Passed, Some(ok_message)),
        Err(e) => (StepStatus::Failed, Some(e.to_string())),
    }
}

fn visibility_outcome(
    result: HarnessResult<bool>,
    kind: &str,
    text: &str,
) -> (StepStatus, Option<String>) {
    match result {
        Ok(true) => (StepStatus::Passed, Some(format!("{kind} '{text}' is visible"))),
        Ok(false) => (StepStatus::Failed, Some(format!("{kind} '{text}' not found"))),
        Err(e) => (StepStatus::Failed, Some(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{MockPageDriver, PageFixture};
    use featurespec_generator::parser::parse;
    use std::collections::HashMap;

    fn example_driver() -> MockPageDriver {
        MockPageDriver::new().with_page(
            "https://example.com",
            PageFixture {
                title: "Example Domain".into(),
                texts: vec!["This domain is for use in illustrative examples.".into()],
                links: vec!["More information...".into()],
                click_targets: HashMap::from([(
                    "More information...".into(),
                    "https://www.iana.org/domains/example".into(),
                )]),
            },
        )
    }

    #[test]
    fn test_run_passing_scenario() {
        let feature = parse(
            "Feature: Search\n\
             Scenario: Find results\n\
             Given I navigate to \"https://example.com\"\n\
             Then the page title should be \"Example Domain\"\n\
             And I should see a link \"More information...\"\n\
             When I click on \"More information...\"\n\
             Then the url should contain \"iana.org\"\n",
        );
        let mut driver = example_driver();
        let mut runner = ScenarioRunner::new(RunnerConfig::default(), &mut driver);
        let runs = runner.run_feature(&feature);

        assert_eq!(runs.len(), 1);
        let run = &runs[0];
        assert!(run.passed);
        assert_eq!(run.steps.len(), 5);
        assert!(run.steps.iter().all(|s| s.status == StepStatus::Passed));
        assert!(run.screenshot.is_none());
    }

    #[test]
    fn test_failed_step_aborts_scenario() {
        let feature = parse(
            "Feature: Search\n\
             Scenario: Wrong title\n\
             Given I navigate to \"https://example.com\"\n\
             Then the page title should be \"Wrong Title\"\n\
             And I should see a link \"More information...\"\n",
        );
        let mut driver = example_driver();
        let mut runner = ScenarioRunner::new(RunnerConfig::default(), &mut driver);
        let runs = runner.run_feature(&feature);
        let run = &runs[0];

        assert!(!run.passed);
        // The failing title assertion stops execution; the link step never runs.
        assert_eq!(run.steps.len(), 2);
        assert_eq!(run.steps[1].status, StepStatus::Failed);
        assert!(run.steps[1]
            .message
            .as_deref()
            .unwrap()
            .contains("expected title 'Wrong Title'"));
    }

    #[test]
    fn test_screenshot_on_failure() {
        let feature = parse(
            "Feature: F\n\
             Scenario: Broken click\n\
             Given I navigate to \"https://example.com\"\n\
             When I click on \"Missing\"\n",
        );
        let mut driver = example_driver();
        let mut runner = ScenarioRunner::new(RunnerConfig::default(), &mut driver);
        let runs = runner.run_feature(&feature);
        let run = &runs[0];

        assert!(!run.passed);
        assert_eq!(
            run.screenshot.as_deref(),
            Some("reports/screenshots/Broken click.png")
        );
    }

    #[test]
    fn test_passthrough_step_skipped() {
        let feature = parse(
            "Feature: F\n\
             Scenario: Unknown step\n\
             Given something no rule understands\n\
             Then the page is loaded\n",
        );
        let mut driver = example_driver();
        let mut runner = ScenarioRunner::new(RunnerConfig::default(), &mut driver);
        let runs = runner.run_feature(&feature);
        let run = &runs[0];

        // Skipped is not a failure; execution continues past it.
        assert!(run.passed);
        assert_eq!(run.steps[0].status, StepStatus::Skipped);
        assert_eq!(run.steps[1].status, StepStatus::Passed);
    }

    #[test]
    fn test_relative_url_resolved_against_base() {
        let feature = parse(
            "Feature: F\n\
             Scenario: Relative\n\
             Given I navigate to \"/login\"\n\
             Then the url should contain \"localhost\"\n",
        );
        let mut driver = MockPageDriver::new();
        let mut runner = ScenarioRunner::new(RunnerConfig::default(), &mut driver);
        let runs = runner.run_feature(&feature);
        let run = &runs[0];

        assert!(run.passed);
        assert!(run.steps[0]
            .message
            .as_deref()
            .unwrap()
            .contains("http://localhost:8080/login"));
    }

    #[test]
    fn test_browser_window_step_is_noop_pass() {
        let feature = parse(
            "Feature: F\n\
             Scenario: Window\n\
             Given I open a new browser window\n",
        );
        let mut driver = MockPageDriver::new();
        let mut runner = ScenarioRunner::new(RunnerConfig::default(), &mut driver);
        let runs = runner.run_feature(&feature);
        let run = &runs[0];
        assert!(run.passed);
        assert_eq!(run.steps[0].status, StepStatus::Passed);
    }
}
