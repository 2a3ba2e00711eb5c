//! Spec emitter — assembles translated statements into a complete
//! Playwright spec file, one describe block per feature.

use crate::parser::FeatureRecord;
use crate::translate::translate;

/// Escape a feature or scenario name for embedding inside the
/// double-quoted describe/test title. Only double quotes need protection
/// in that position, so this is deliberately narrower than
/// [`crate::translate::escape_literal`].
fn escape_title(name: &str) -> String {
    name.replace('"', "\\\"")
}

/// Whether any step across the whole feature triggers navigation or
/// browser-window handling. Scanned feature-wide, not per-scenario: one
/// such step anywhere warrants the shared setup block.
fn needs_setup(feature: &FeatureRecord) -> bool {
    feature.scenarios.iter().any(|scenario| {
        scenario.steps.iter().any(|step| {
            let lowered = step.to_lowercase();
            lowered.contains("navigate to") || lowered.contains("browser window")
        })
    })
}

/// Assemble the complete spec file text for one feature: a describe block
/// containing an optional shared setup and one test case per scenario,
/// each body the scenario's translated statements in declaration order.
pub fn emit(feature: &FeatureRecord) -> String {
    let mut out = String::new();
    out.push_str("import { test, expect } from '@playwright/test';\n\n");
    out.push_str(&format!(
        "test.describe(\"{}\", () => {{\n",
        escape_title(&feature.title)
    ));

    if needs_setup(feature) {
        out.push_str("  test.beforeEach(async ({ page }) => {\n");
        out.push_str("    // Setup before each test\n");
        out.push_str("  });\n\n");
    }

    for scenario in &feature.scenarios {
        out.push_str(&format!(
            "  test(\"{}\", async ({{ page }}) => {{\n",
            escape_title(&scenario.name)
        ));
        for step in &scenario.steps {
            out.push_str(&translate(step));
            out.push('\n');
        }
        out.push_str("  });\n\n");
    }

    out.push_str("});\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse, ScenarioRecord};

    #[test]
    fn test_emit_worked_example() {
        let feature = parse(
            "Feature: Search\n\
             Scenario: Find results\n\
             Given I navigate to \"https://example.com\"\n\
             Then the page title should be \"Example Domain\"\n",
        );
        let spec = emit(&feature);
        let expected = "import { test, expect } from '@playwright/test';\n\n\
            test.describe(\"Search\", () => {\n\
            \x20 test.beforeEach(async ({ page }) => {\n\
            \x20   // Setup before each test\n\
            \x20 });\n\n\
            \x20 test(\"Find results\", async ({ page }) => {\n\
            \x20   await page.goto('https://example.com');\n\
            \x20   await expect(page).toHaveTitle('Example Domain');\n\
            \x20 });\n\n\
            });\n";
        assert_eq!(spec, expected);
    }

    #[test]
    fn test_setup_block_omitted_without_navigation() {
        let feature = parse(
            "Feature: Static\n\
             Scenario: Check heading\n\
             Then I should see text \"Hello\"\n",
        );
        let spec = emit(&feature);
        assert!(!spec.contains("beforeEach"));
    }

    #[test]
    fn test_setup_block_for_browser_window_step() {
        let feature = parse(
            "Feature: Window\n\
             Scenario: Open\n\
             Given I open a new browser window\n",
        );
        let spec = emit(&feature);
        assert!(spec.contains("test.beforeEach(async ({ page }) => {"));
    }

    #[test]
    fn test_scenario_count_preserved() {
        let mut feature = parse(
            "Feature: Counts\n\
             Scenario: One\n\
             Given I click on \"A\"\n\
             Scenario: Two\n\
             Given I click on \"B\"\n",
        );
        // A scenario with zero steps still emits an empty-bodied test case.
        feature.scenarios.push(ScenarioRecord {
            name: "Empty".into(),
            steps: Vec::new(),
        });

        let spec = emit(&feature);
        assert_eq!(spec.matches("  test(\"").count(), 3);
        assert!(spec.contains("  test(\"Empty\", async ({ page }) => {\n  });\n"));
    }

    #[test]
    fn test_title_quote_escaping() {
        let feature = parse(
            "Feature: The \"big\" one\n\
             Scenario: Say \"hi\"\n\
             Given I click on \"x\"\n",
        );
        let spec = emit(&feature);
        assert!(spec.contains("test.describe(\"The \\\"big\\\" one\", () => {"));
        assert!(spec.contains("test(\"Say \\\"hi\\\"\", async ({ page }) => {"));
    }

    #[test]
    fn test_untranslated_step_keeps_file_valid() {
        let feature = parse(
            "Feature: Gaps\n\
             Scenario: Unknown step\n\
             Given something the table does not know\n",
        );
        let spec = emit(&feature);
        assert!(spec.contains("    // TODO: Implement step - Given something the table does not know"));
    }
}
