pub const CHAT: &str = include_str!("../data/prompts/chat.txt");
pub const HEADER_IMAGE: &str = include_str!("../data/prompts/header_image.txt");
pub const SKILL_ANALYSIS: &str = include_str!("../data/prompts/skill_analysis.txt");

/// Phrase every skill analysis is asked to open with.
pub const ANALYSIS_OPENER: &str = "Interesting! This looks like...";

/// Replace `{{key}}` placeholders in a template string.
///
/// Substitution is single-pass: placeholder-looking text inside a substituted
/// value is copied through untouched, and unknown keys are left as-is.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };

        let key = &after[..end];
        match vars.iter().find(|(k, _)| *k == key) {
            Some((_, value)) => out.push_str(value),
            None => {
                out.push_str("{{");
                out.push_str(key);
                out.push_str("}}");
            }
        }
        rest = &after[end + 2..];
    }

    out.push_str(rest);
    out
}

pub fn chat(knowledge: &str, query: &str) -> String {
    render(CHAT, &[("knowledge", knowledge), ("query", query)])
}

pub fn header_image(company: &str) -> String {
    render(HEADER_IMAGE, &[("company", company)])
}

pub fn skill_analysis(knowledge: &str) -> String {
    render(
        SKILL_ANALYSIS,
        &[("knowledge", knowledge), ("opener", ANALYSIS_OPENER)],
    )
}
