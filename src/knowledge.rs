//! Grounding knowledge base injected into every prompt.

use std::fmt::Write as _;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub name: &'static str,
    pub stack: &'static [&'static str],
    pub description: &'static str,
}

/// Read-only facts about the portfolio owner.
///
/// The text form is rendered once on construction and never changes, so every
/// prompt built from the same knowledge base carries byte-identical grounding.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    name: &'static str,
    role: &'static str,
    projects: Vec<Project>,
    rendered: String,
}

const OWNER_NAME: &str = "AAKASH DHINGRA";
const OWNER_ROLE: &str = "Lead Full-Stack Engineer & Creative Technologist";

const PROJECTS: [Project; 3] = [
    Project {
        name: "Nexus AI",
        stack: &["Python", "Gemini", "Vector DB"],
        description: "A RAG-based document analyzer built with Python and Gemini. It uses vector databases to perform semantic search on large document sets, providing accurate and context-aware answers. Core logic involves text chunking, embedding generation, and similarity search.",
    },
    Project {
        name: "SwiftCart",
        stack: &["Next.js", "Vercel", "Stripe"],
        description: "A high-performance e-commerce engine using Next.js, Vercel, and Stripe. It's designed for scalability and speed, featuring server-side rendering (SSR), static site generation (SSG), and optimized image loading. The backend handles complex product variants and inventory management.",
    },
    Project {
        name: "Orbit Dashboard",
        stack: &["D3.js", "Angular"],
        description: "A real-time data visualization tool for space debris tracking built with D3.js and Angular. It consumes live satellite data from an API, processes it, and renders it on an interactive 3D globe. The challenge was handling large data streams efficiently without freezing the UI.",
    },
];

impl KnowledgeBase {
    pub fn new(name: &'static str, role: &'static str, projects: Vec<Project>) -> Self {
        let rendered = render(name, role, &projects);
        Self {
            name,
            role,
            projects,
            rendered,
        }
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn role(&self) -> &str {
        self.role
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn as_text(&self) -> &str {
        &self.rendered
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::new(OWNER_NAME, OWNER_ROLE, PROJECTS.to_vec())
    }
}

fn render(name: &str, role: &str, projects: &[Project]) -> String {
    let mut out = format!("Name: {}\nRole: {}\n\nProjects:\n", name, role);
    for project in projects {
        // Writing into a String cannot fail.
        let _ = writeln!(
            out,
            "- \"{}\" ({}): {}",
            project.name,
            project.stack.join(", "),
            project.description
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_three_projects() {
        let kb = KnowledgeBase::default();
        let names: Vec<&str> = kb.projects().iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Nexus AI", "SwiftCart", "Orbit Dashboard"]);
    }

    #[test]
    fn test_rendered_text_carries_identity_and_projects() {
        let kb = KnowledgeBase::default();
        assert_eq!(kb.name(), "AAKASH DHINGRA");
        assert_eq!(kb.role(), "Lead Full-Stack Engineer & Creative Technologist");
        let text = kb.as_text();
        assert!(text.starts_with("Name: AAKASH DHINGRA\n"));
        assert!(text.contains("Role: Lead Full-Stack Engineer & Creative Technologist"));
        assert!(text.contains("- \"Nexus AI\" (Python, Gemini, Vector DB): A RAG-based"));
        assert!(text.contains("interactive 3D globe"));
    }

    #[test]
    fn test_rendering_is_stable() {
        assert_eq!(
            KnowledgeBase::default().as_text(),
            KnowledgeBase::default().as_text()
        );
    }
}
