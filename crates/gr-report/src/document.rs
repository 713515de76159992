//! Section-based HTML document builder.
//!
//! A document has a fixed set of named sections (`head`, `body`, `css`).
//! Callers append fragments; nothing is ever removed or reordered, and
//! [`HtmlDocument::serialize`] is a read-only projection of the sections into
//! one HTML string.

use crate::error::{ReportError, Result};
use crate::render::html_escape;
use std::fmt;
use std::str::FromStr;

/// Named fragment bucket of an [`HtmlDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// Extra `<head>` markup (meta tags, stylesheet links).
    Head,
    /// Page content.
    Body,
    /// Rules for the inline `<style>` block.
    Css,
}

impl Section {
    /// Every section, in skeleton order.
    pub const ALL: [Section; 3] = [Section::Head, Section::Body, Section::Css];

    /// Section name as accepted by [`HtmlDocument::append_to`].
    pub fn name(&self) -> &'static str {
        match self {
            Section::Head => "head",
            Section::Body => "body",
            Section::Css => "css",
        }
    }

    fn index(&self) -> usize {
        match self {
            Section::Head => 0,
            Section::Body => 1,
            Section::Css => 2,
        }
    }
}

impl FromStr for Section {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "head" => Ok(Section::Head),
            "body" => Ok(Section::Body),
            "css" => Ok(Section::Css),
            other => Err(ReportError::UnknownSection(other.to_string())),
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One fragment or a sequence of fragments.
pub trait IntoFragments {
    fn into_fragments(self) -> Vec<String>;
}

impl IntoFragments for &str {
    fn into_fragments(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl IntoFragments for String {
    fn into_fragments(self) -> Vec<String> {
        vec![self]
    }
}

impl IntoFragments for &String {
    fn into_fragments(self) -> Vec<String> {
        vec![self.clone()]
    }
}

impl IntoFragments for Vec<String> {
    fn into_fragments(self) -> Vec<String> {
        self
    }
}

impl IntoFragments for Vec<&str> {
    fn into_fragments(self) -> Vec<String> {
        self.into_iter().map(str::to_string).collect()
    }
}

impl IntoFragments for &[String] {
    fn into_fragments(self) -> Vec<String> {
        self.to_vec()
    }
}

impl IntoFragments for &[&str] {
    fn into_fragments(self) -> Vec<String> {
        self.iter().map(|s| s.to_string()).collect()
    }
}

/// Append-only HTML document.
#[derive(Debug, Clone)]
pub struct HtmlDocument {
    title: String,
    sections: [Vec<String>; 3],
}

impl HtmlDocument {
    /// Create a document with empty sections.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: [Vec::new(), Vec::new(), Vec::new()],
        }
    }

    /// Document title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Append fragments to a section.
    pub fn append(&mut self, section: Section, fragments: impl IntoFragments) {
        self.sections[section.index()].extend(fragments.into_fragments());
    }

    /// Append fragments to a section named by string.
    ///
    /// Fails with [`ReportError::UnknownSection`] for anything other than
    /// `head`, `body` or `css`; the document is left untouched.
    pub fn append_to(&mut self, section: &str, fragments: impl IntoFragments) -> Result<()> {
        let section: Section = section.parse()?;
        self.append(section, fragments);
        Ok(())
    }

    /// Fragments of a section in append order.
    pub fn fragments(&self, section: Section) -> &[String] {
        &self.sections[section.index()]
    }

    /// Render the complete document.
    pub fn serialize(&self) -> String {
        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<title>{title}</title>\n<meta charset=\"UTF-8\">\n{head}\n<style>\n{css}\n</style>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
            title = html_escape(&self.title),
            head = self.fragments(Section::Head).join(""),
            css = style_text(&self.fragments(Section::Css).join("\n")),
            body = self.fragments(Section::Body).join(""),
        )
    }
}

/// Keep CSS from closing the `<style>` element. `<\/` is the same text to a
/// CSS parser.
fn style_text(css: &str) -> String {
    css.replace("</", "<\\/")
}
