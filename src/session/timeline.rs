//! Career timeline shown beside the chat widget.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineItem {
    pub date: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub description: &'static str,
    pub tech: &'static [&'static str],
}

const ITEMS: [TimelineItem; 3] = [
    TimelineItem {
        date: "2022 - Present",
        title: "Nexus AI",
        subtitle: "Lead AI Engineer (Personal Project)",
        description: "Architected a RAG-based document analysis system using Python, Gemini, and vector databases for advanced semantic search capabilities.",
        tech: &["Python", "Gemini API", "LangChain", "Vector DB"],
    },
    TimelineItem {
        date: "2020 - 2022",
        title: "SwiftCart E-commerce",
        subtitle: "Senior Frontend Developer (Freelance)",
        description: "Built a high-performance e-commerce engine focusing on scalability and user experience with modern Jamstack architecture.",
        tech: &["Next.js", "React", "TypeScript", "Vercel", "Stripe"],
    },
    TimelineItem {
        date: "2018 - 2020",
        title: "Orbit Dashboard",
        subtitle: "Data Visualization Engineer",
        description: "Developed a real-time dashboard for tracking space debris, handling large data streams and visualizing them on an interactive 3D globe.",
        tech: &["Angular", "D3.js", "TypeScript", "WebSockets"],
    },
];

/// Read-only list of career entries, newest first.
#[derive(Debug, Clone)]
pub struct Timeline {
    items: Vec<TimelineItem>,
}

impl Timeline {
    pub fn new(items: Vec<TimelineItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[TimelineItem] {
        &self.items
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new(ITEMS.to_vec())
    }
}

impl fmt::Display for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Career Trajectory")?;
        for item in &self.items {
            writeln!(f)?;
            writeln!(f, "{}  {}", item.date, item.title)?;
            writeln!(f, "  {}", item.subtitle)?;
            writeln!(f, "  {}", item.description)?;
            writeln!(f, "  [{}]", item.tech.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_entries_newest_first() {
        let timeline = Timeline::default();
        let entries: Vec<(&str, &str)> = timeline
            .items()
            .iter()
            .map(|item| (item.date, item.title))
            .collect();
        assert_eq!(
            entries,
            vec![
                ("2022 - Present", "Nexus AI"),
                ("2020 - 2022", "SwiftCart E-commerce"),
                ("2018 - 2020", "Orbit Dashboard"),
            ]
        );
    }

    #[test]
    fn test_titles_are_unique() {
        let timeline = Timeline::default();
        let mut titles: Vec<&str> = timeline.items().iter().map(|item| item.title).collect();
        titles.sort_unstable();
        titles.dedup();
        assert_eq!(titles.len(), timeline.items().len());
    }

    #[test]
    fn test_display_lists_each_entry() {
        let text = Timeline::default().to_string();
        assert!(text.starts_with("Career Trajectory\n\n2022 - Present  Nexus AI\n"));
        assert!(text.contains("  Senior Frontend Developer (Freelance)\n"));
        assert!(text.contains("  [Angular, D3.js, TypeScript, WebSockets]\n"));
    }
}
