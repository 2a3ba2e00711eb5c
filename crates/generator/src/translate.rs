//! Step translator — maps raw step text to a recognized intent via an
//! ordered pattern-rule table, then renders the intent as one generated
//! Playwright statement.

use serde::{Deserialize, Serialize};

/// The recognized semantic action behind a step line. Derived transiently
/// from raw text; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum StepIntent {
    /// Navigate the page to a URL.
    Navigate(String),
    /// Assert the page title equals the given text.
    AssertTitle(String),
    /// Assert the given text is visible on the page.
    AssertVisibleText(String),
    /// Assert a link with the given text is visible.
    AssertLink(String),
    /// Click the element carrying the given text.
    Click(String),
    /// Assert the current URL contains the given substring.
    AssertUrlContains(String),
    /// Wait for the page to reach network idle.
    WaitForLoad,
    /// Browser window lifecycle is handled by the surrounding fixture.
    BrowserWindow,
    /// No rule matched — the original step text is carried through.
    Passthrough(String),
}

/// One entry in the translation table: trigger phrases, whether a quoted
/// literal must be extracted, and the intent constructor.
struct Rule {
    triggers: &'static [&'static str],
    needs_literal: bool,
    build: fn(&str) -> StepIntent,
}

/// The rule table, evaluated strictly top to bottom. First match wins;
/// a rule that requires a quoted literal is skipped when none is present.
/// The ordering is a contract — do not reorder.
const RULES: &[Rule] = &[
    Rule {
        triggers: &["navigate to", "go to"],
        needs_literal: true,
        build: |lit| StepIntent::Navigate(lit.to_string()),
    },
    Rule {
        triggers: &["page title should be"],
        needs_literal: true,
        build: |lit| StepIntent::AssertTitle(lit.to_string()),
    },
    Rule {
        triggers: &["should see text", "should see the main heading"],
        needs_literal: true,
        build: |lit| StepIntent::AssertVisibleText(lit.to_string()),
    },
    Rule {
        triggers: &["should see a link"],
        needs_literal: true,
        build: |lit| StepIntent::AssertLink(lit.to_string()),
    },
    Rule {
        triggers: &["click on"],
        needs_literal: true,
        build: |lit| StepIntent::Click(lit.to_string()),
    },
    Rule {
        triggers: &["url should contain"],
        needs_literal: true,
        build: |lit| StepIntent::AssertUrlContains(lit.to_string()),
    },
    Rule {
        triggers: &["page is loaded", "page should be fully loaded"],
        needs_literal: false,
        build: |_| StepIntent::WaitForLoad,
    },
    Rule {
        triggers: &["open a new browser window", "browser window"],
        needs_literal: false,
        build: |_| StepIntent::BrowserWindow,
    },
];

/// Classify a raw step line into a [`StepIntent`].
///
/// Matching is case-insensitive substring containment against the trigger
/// phrases. Total over all input strings: anything unmatched becomes
/// [`StepIntent::Passthrough`].
pub fn classify(step: &str) -> StepIntent {
    let lowered = step.to_lowercase();

    for rule in RULES {
        if !rule.triggers.iter().any(|t| lowered.contains(t)) {
            continue;
        }
        if rule.needs_literal {
            match first_quoted(step) {
                Some(literal) => return (rule.build)(literal),
                // Required literal absent: treat as non-matching.
                None => continue,
            }
        }
        return (rule.build)("");
    }

    StepIntent::Passthrough(step.to_string())
}

/// Extract the first non-empty double-quoted substring from a step line.
fn first_quoted(text: &str) -> Option<&str> {
    let quotes: Vec<usize> = text
        .char_indices()
        .filter(|(_, c)| *c == '"')
        .map(|(i, _)| i)
        .collect();

    for pair in quotes.windows(2) {
        if pair[1] > pair[0] + 1 {
            return Some(&text[pair[0] + 1..pair[1]]);
        }
    }
    None
}

/// Escape a value for embedding inside a single-quoted string literal in
/// the generated code. The backslash substitution runs first so already
/// escaped sequences are not re-escaped.
pub fn escape_literal(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// Render an intent as one generated statement, indented for a test body.
pub fn statement(intent: &StepIntent) -> String {
    match intent {
        StepIntent::Navigate(url) => format!("    await page.goto('{url}');"),
        StepIntent::AssertTitle(text) => {
            format!(
                "    await expect(page).toHaveTitle('{}');",
                escape_literal(text)
            )
        }
        StepIntent::AssertVisibleText(text) => {
            format!(
                "    await expect(page.getByText('{}')).toBeVisible();",
                escape_literal(text)
            )
        }
        StepIntent::AssertLink(text) => {
            format!(
                "    await expect(page.locator('a', {{ hasText: '{}' }})).toBeVisible();",
                escape_literal(text)
            )
        }
        StepIntent::Click(text) => {
            format!("    await page.click('text={}');", escape_literal(text))
        }
        StepIntent::AssertUrlContains(text) => {
            format!(
                "    expect(page.url()).toContain('{}');",
                escape_literal(text)
            )
        }
        StepIntent::WaitForLoad => "    await page.waitForLoadState('networkidle');".to_string(),
        StepIntent::BrowserWindow => {
            "    // Browser window opened automatically by Playwright".to_string()
        }
        StepIntent::Passthrough(step) => format!("    // TODO: Implement step - {step}"),
    }
}

/// Translate one raw step line into a generated statement. Total function:
/// always returns a non-empty statement, never fails.
pub fn translate(step: &str) -> String {
    statement(&classify(step))
}
