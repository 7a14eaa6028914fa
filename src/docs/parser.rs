//! Section parsing and keyword scoring over `llms-full.txt`.

use std::sync::LazyLock;

use regex::Regex;
use rmcp::schemars;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

const TITLE_BOOST: usize = 5;
const EXCERPT_BEFORE: usize = 50;
const EXCERPT_AFTER: usize = 150;
const EXCERPT_FALLBACK: usize = 200;

/// Documentation area inferred from a section title.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    schemars::JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum DocCategory {
    IosSdk,
    BackendApi,
    Dashboard,
    McpConfig,
    Guides,
}

impl DocCategory {
    /// First matching keyword group wins; anything else is a guide.
    pub fn infer(title: &str) -> Self {
        let lower = title.to_lowercase();
        let has_any = |words: &[&str]| words.iter().any(|w| lower.contains(w));
        if has_any(&["ios", "sdk", "swift"]) {
            Self::IosSdk
        } else if has_any(&["api", "endpoint", "stream"]) {
            Self::BackendApi
        } else if has_any(&["dashboard", "project", "key"]) {
            Self::Dashboard
        } else if has_any(&["mcp", "tool"]) {
            Self::McpConfig
        } else {
            Self::Guides
        }
    }
}

/// One top-level (`#` or `##`) section of the documentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocSection {
    pub path: String,
    pub title: String,
    pub content: String,
    pub category: DocCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocSearchResult {
    pub title: String,
    pub path: String,
    pub excerpt: String,
    pub category: DocCategory,
    pub relevance: usize,
}

static HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#{1,2}\s+(.+)$").expect("header pattern is valid"));

/// Lowercase, with every run of non-alphanumeric ASCII collapsed to `-`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            slug.push(c);
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_string()
}

/// Split the document into sections. Text before the first header is dropped.
pub fn parse_sections(raw: &str) -> Vec<DocSection> {
    let mut sections = Vec::new();
    let mut current: Option<DocSection> = None;

    for line in raw.lines() {
        if let Some(caps) = HEADER.captures(line) {
            if let Some(done) = current.take() {
                sections.push(done);
            }
            let title = caps[1].trim_end().to_string();
            let category = DocCategory::infer(&title);
            current = Some(DocSection {
                path: format!("/{category}/{}", slugify(&title)),
                title,
                content: String::new(),
                category,
            });
        } else if let Some(section) = current.as_mut() {
            section.content.push_str(line);
            section.content.push('\n');
        }
    }
    sections.extend(current);
    sections
}

/// Occurrences of every term in title and body, plus a boost per term in the title.
pub fn score(section: &DocSection, terms: &[String]) -> usize {
    let haystack = format!("{} {}", section.title, section.content).to_lowercase();
    let title = section.title.to_lowercase();
    terms
        .iter()
        .map(|term| {
            let boost = if title.contains(term.as_str()) {
                TITLE_BOOST
            } else {
                0
            };
            haystack.matches(term.as_str()).count() + boost
        })
        .sum()
}

pub fn query_terms(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Snippet around the first case-insensitive occurrence of `term`.
pub fn extract_excerpt(content: &str, term: &str) -> String {
    let chars: Vec<char> = content.chars().collect();
    // Per-char lowercase keeps indices aligned with `chars`.
    let lowered: Vec<char> = chars
        .iter()
        .map(|c| c.to_lowercase().next().unwrap_or(*c))
        .collect();
    let needle: Vec<char> = term.to_lowercase().chars().collect();

    let found = if needle.is_empty() {
        None
    } else {
        lowered
            .windows(needle.len())
            .position(|window| window == needle.as_slice())
    };

    let Some(index) = found else {
        let head: String = chars.iter().take(EXCERPT_FALLBACK).collect();
        return format!("{}...", head.trim());
    };

    let start = index.saturating_sub(EXCERPT_BEFORE);
    let end = (index + EXCERPT_AFTER).min(chars.len());
    let body: String = chars[start..end].iter().collect();
    let mut excerpt = body.trim().to_string();
    if start > 0 {
        excerpt = format!("...{excerpt}");
    }
    if end < chars.len() {
        excerpt.push_str("...");
    }
    excerpt
}

/// Rank sections against `query`, highest relevance first.
pub fn search(
    sections: &[DocSection],
    query: &str,
    category: Option<DocCategory>,
    limit: usize,
) -> Vec<DocSearchResult> {
    let terms = query_terms(query);
    let Some(first_term) = terms.first() else {
        return Vec::new();
    };

    let mut results: Vec<DocSearchResult> = sections
        .iter()
        .filter(|section| category.map_or(true, |c| section.category == c))
        .filter_map(|section| {
            let relevance = score(section, &terms);
            (relevance > 0).then(|| DocSearchResult {
                title: section.title.clone(),
                path: section.path.clone(),
                excerpt: extract_excerpt(&section.content, first_term),
                category: section.category,
                relevance,
            })
        })
        .collect();

    results.sort_by(|a, b| b.relevance.cmp(&a.relevance));
    results.truncate(limit);
    results
}

/// Exact path match first, then the first path containing the last segment.
pub fn find_section<'a>(sections: &'a [DocSection], path: &str) -> Option<&'a DocSection> {
    let normalized = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };
    if let Some(section) = sections.iter().find(|s| s.path == normalized) {
        return Some(section);
    }
    let slug = normalized.rsplit('/').next().unwrap_or_default();
    if slug.is_empty() {
        return None;
    }
    sections.iter().find(|s| s.path.contains(slug))
}
