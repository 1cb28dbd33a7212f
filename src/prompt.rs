// Report sections requested from the model, in order
pub const REPORT_SECTIONS: [&str; 7] = [
    "Summary of the idea",
    "Problem clarity",
    "Existing demand & market landscape",
    "Differentiator strength",
    "Monetization potential",
    "Suggested marketing channel",
    "Validation Score (1-10)",
];

/// Builds the validation prompt for an already trimmed, non-empty idea.
pub fn build_prompt(idea: &str) -> String {
    let mut prompt = format!(
        "I want to validate this SaaS idea: \"{idea}\". Please return a validation report with:\n"
    );
    for section in REPORT_SECTIONS {
        prompt.push_str("- ");
        prompt.push_str(section);
        prompt.push('\n');
    }
    prompt.push_str("Format the report as Markdown with a heading for each section.");
    prompt
}
