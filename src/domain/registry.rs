/*!
Domain/tool registry.

A domain is a directory directly containing one YAML document per tool
(file stem = tool id). Domains are discovered across an ordered list of
roots; the first root containing a directory of a given name wins, later
ones are shadowed. Everything is read fresh from disk on each call; the
registry holds only the resolved root list.
*/

use crate::domain::tool::{NO_DESCRIPTION, ToolDoc};
use crate::log_warn;
use std::path::{Path, PathBuf};

/// One visible domain, as reported by `list_domains`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainSummary {
    pub id: String,
    pub description: String,
    pub tool_count: usize,
}

/// One tool row, as reported by `list_tools`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub usage: String,
}

/// Precedence-ordered view over the resolved domain roots.
#[derive(Debug)]
pub struct Registry {
    roots: Vec<PathBuf>,
}

impl Registry {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    /// First directory named `domain` across the ordered roots.
    pub fn find_domain(&self, domain: &str) -> Option<PathBuf> {
        self.roots
            .iter()
            .map(|root| root.join(domain))
            .find(|candidate| candidate.is_dir())
    }

    /// Path a tool document would live at, if the domain exists.
    pub fn tool_path(&self, domain: &str, tool: &str) -> Option<PathBuf> {
        self.find_domain(domain)
            .map(|dir| dir.join(format!("{tool}.yaml")))
    }

    /// All visible domains in discovery order, deduplicated by id with
    /// first-match-wins. Entries within one root are name-sorted so plain
    /// output stays deterministic.
    pub fn list_domains(&self) -> Vec<DomainSummary> {
        let mut seen: Vec<String> = Vec::new();
        let mut out = Vec::new();
        for root in &self.roots {
            for dir in sorted_subdirs(root) {
                let id = dir_name(&dir);
                if seen.iter().any(|s| s == &id) {
                    continue;
                }
                seen.push(id.clone());
                out.push(DomainSummary {
                    id,
                    description: NO_DESCRIPTION.to_string(),
                    tool_count: tool_files(&dir).len(),
                });
            }
        }
        out
    }

    /// Tool rows for one domain, sorted by id. `None` when the domain does
    /// not exist; an existing domain with no documents yields an empty list.
    pub fn list_tools(&self, domain: &str) -> Option<Vec<ToolSummary>> {
        let dir = self.find_domain(domain)?;
        let mut out = Vec::new();
        for file in tool_files(&dir) {
            let id = file_stem(&file);
            let doc = match ToolDoc::load(&file) {
                Ok(doc) => doc,
                Err(e) => {
                    log_warn!("skipping tool document {}: {e:#}", file.display());
                    continue;
                }
            };
            out.push(ToolSummary {
                name: doc.display_name(&id).to_string(),
                description: doc.description().to_string(),
                usage: doc.usage_hint(),
                id,
            });
        }
        Some(out)
    }

    /// Domain ids appearing under more than one root, with their sources in
    /// precedence order. First source listed is the active one. Advisory.
    pub fn check_conflicts(&self) -> Vec<(String, Vec<PathBuf>)> {
        let mut sources: Vec<(String, Vec<PathBuf>)> = Vec::new();
        for root in &self.roots {
            for dir in sorted_subdirs(root) {
                let id = dir_name(&dir);
                match sources.iter_mut().find(|(name, _)| name == &id) {
                    Some((_, paths)) => paths.push(dir),
                    None => sources.push((id, vec![dir])),
                }
            }
        }
        sources.retain(|(_, paths)| paths.len() > 1);
        sources
    }
}

fn sorted_subdirs(root: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(root) else {
        return Vec::new();
    };
    let mut dirs: Vec<PathBuf> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    dirs.sort();
    dirs
}

fn tool_files(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "yaml"))
        .collect();
    files.sort();
    files
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_tool(dir: &Path, tool: &str, yaml: &str) {
        std::fs::write(dir.join(format!("{tool}.yaml")), yaml).unwrap();
    }

    fn fixture_root(tmp: &TempDir, root: &str, domains: &[(&str, &[&str])]) -> PathBuf {
        let root = tmp.path().join(root);
        for (domain, tools) in domains {
            let dir = root.join(domain);
            std::fs::create_dir_all(&dir).unwrap();
            for tool in *tools {
                write_tool(&dir, tool, "command: \"echo {args}\"\n");
            }
        }
        root
    }

    #[test]
    fn first_root_wins_on_collision() {
        let tmp = TempDir::new().unwrap();
        let first = fixture_root(&tmp, "first", &[("linting", &["ruff", "black"])]);
        let second = fixture_root(&tmp, "second", &[("linting", &["ruff"]), ("coding", &["test"])]);
        let reg = Registry::new(vec![first.clone(), second.clone()]);

        let domains = reg.list_domains();
        let ids: Vec<&str> = domains.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["linting", "coding"]);
        // The visible linting domain is the one from the first root.
        assert_eq!(domains[0].tool_count, 2);
        assert_eq!(reg.find_domain("linting"), Some(first.join("linting")));
    }

    #[test]
    fn conflicts_list_all_sources_in_precedence_order() {
        let tmp = TempDir::new().unwrap();
        let first = fixture_root(&tmp, "first", &[("linting", &["ruff"])]);
        let second = fixture_root(&tmp, "second", &[("linting", &[]), ("coding", &[])]);
        let reg = Registry::new(vec![first.clone(), second.clone()]);

        let conflicts = reg.check_conflicts();
        assert_eq!(conflicts.len(), 1);
        let (id, sources) = &conflicts[0];
        assert_eq!(id, "linting");
        assert_eq!(
            sources,
            &vec![first.join("linting"), second.join("linting")]
        );
    }

    #[test]
    fn empty_domain_lists_zero_tools() {
        let tmp = TempDir::new().unwrap();
        let root = fixture_root(&tmp, "root", &[("empty", &[])]);
        let reg = Registry::new(vec![root]);
        assert_eq!(reg.list_tools("empty"), Some(vec![]));
        assert_eq!(reg.list_domains()[0].tool_count, 0);
    }

    #[test]
    fn missing_domain_is_none() {
        let tmp = TempDir::new().unwrap();
        let reg = Registry::new(vec![tmp.path().to_path_buf()]);
        assert_eq!(reg.list_tools("nope"), None);
        assert_eq!(reg.find_domain("nope"), None);
    }

    #[test]
    fn tool_rows_carry_document_fields() {
        let tmp = TempDir::new().unwrap();
        let root = fixture_root(&tmp, "root", &[("linting", &[])]);
        let dir = root.join("linting");
        write_tool(
            &dir,
            "ruff",
            "name: RUFF\ndescription: Fast linter\ncommand: \"ruff {args}\"\nhelp: |\n  Lint things.\n  craft linting ruff check --fix\n",
        );
        let reg = Registry::new(vec![root]);
        let tools = reg.list_tools("linting").unwrap();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].id, "ruff");
        assert_eq!(tools[0].name, "RUFF");
        assert_eq!(tools[0].description, "Fast linter");
        assert_eq!(tools[0].usage, "craft linting ruff check --fix");
    }

    #[test]
    fn unparseable_documents_are_skipped() {
        let tmp = TempDir::new().unwrap();
        let root = fixture_root(&tmp, "root", &[("linting", &["ruff"])]);
        std::fs::write(root.join("linting/broken.yaml"), "command: [unclosed").unwrap();
        let reg = Registry::new(vec![root]);
        let tools = reg.list_tools("linting").unwrap();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].id, "ruff");
    }
}
