//! Template engine implementation
//!
//! The engine wraps minijinja and renders dotfiles against a
//! [`TemplateContext`].

use crate::context::TemplateContext;
use crate::functions;
use crate::{Error, Result};
use minijinja::Environment;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Markers that make a text file a template
const TEMPLATE_MARKERS: [&str; 3] = ["{{", "{%", "{#"];

/// Template engine for rendering dotfiles
pub struct TemplateEngine {
    /// The minijinja environment
    env: Environment<'static>,

    /// Data exposed to every template
    context: TemplateContext,
}

impl TemplateEngine {
    /// Create a template engine with the default context and no include directory
    #[must_use]
    pub fn new() -> Self {
        Self::with_context(TemplateContext::new(), None)
    }

    /// Create a template engine
    ///
    /// `{% include %}` and `{% import %}` resolve names relative to
    /// `include_dir` (usually the dotfiles directory) when one is given.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use dotdrop_template::{TemplateContext, TemplateEngine};
    /// use std::path::PathBuf;
    ///
    /// let engine = TemplateEngine::with_context(
    ///     TemplateContext::new(),
    ///     Some(PathBuf::from("/home/user/dotfiles")),
    /// );
    /// ```
    #[must_use]
    pub fn with_context(context: TemplateContext, include_dir: Option<PathBuf>) -> Self {
        let mut env = Environment::new();

        // trim_blocks: remove the newline after a block tag
        // lstrip_blocks: strip leading whitespace before a block tag
        // keep_trailing_newline: rendered files keep their final newline
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);

        env.add_function("env", functions::env);
        env.add_function("os", functions::os);
        env.add_function("arch", functions::arch);
        env.add_function("hostname", functions::hostname);
        env.add_function("username", functions::username);
        env.add_function("home_dir", functions::home_dir);
        env.add_function("joinPath", functions::join_path);
        env.add_filter("quote", functions::quote);

        if let Some(dir) = include_dir
            && dir.is_dir()
        {
            env.set_loader(minijinja::path_loader(dir));
        }

        Self { env, context }
    }

    /// The context templates are rendered against
    pub fn context(&self) -> &TemplateContext {
        &self.context
    }

    /// Render a template string with a name used in error messages
    ///
    /// # Examples
    ///
    /// ```
    /// use dotdrop_template::TemplateEngine;
    ///
    /// let engine = TemplateEngine::new();
    /// let out = engine.render_named_str("greeting", "{{ 1 + 1 }}").unwrap();
    /// assert_eq!(out, "2");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns error if template rendering fails
    pub fn render_named_str(&self, name: &str, template: &str) -> Result<String> {
        self.env
            .render_named_str(name, template, &self.context)
            .map_err(Error::from)
    }

    /// Produce the installable content of a file
    ///
    /// Binary files (NUL bytes or invalid UTF-8) are returned unchanged; text
    /// files are rendered.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or fails to render
    pub fn render_file(&self, path: &Path) -> Result<Vec<u8>> {
        let raw = fs::read(path)?;
        if let Some(text) = text_content(&raw) {
            let name = path.display().to_string();
            return Ok(self.render_named_str(&name, text)?.into_bytes());
        }

        tracing::debug!(path = %path.display(), "Binary file, not rendering");
        Ok(raw)
    }

    /// Check if a string contains template syntax
    #[must_use]
    pub fn is_template_str(content: &str) -> bool {
        TEMPLATE_MARKERS
            .iter()
            .any(|marker| content.contains(marker))
    }

    fn is_template_file(path: &Path) -> bool {
        fs::read(path).is_ok_and(|raw| text_content(&raw).is_some_and(Self::is_template_str))
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// The text of `content`, or `None` when it is binary (NUL bytes or invalid UTF-8)
fn text_content(content: &[u8]) -> Option<&str> {
    std::str::from_utf8(content)
        .ok()
        .filter(|text| !text.contains('\0'))
}

impl dotdrop_core::Templater for TemplateEngine {
    fn is_template(&self, path: &Path) -> bool {
        if path.is_file() {
            return Self::is_template_file(path);
        }
        if !path.is_dir() {
            return false;
        }

        WalkDir::new(path)
            .follow_links(true)
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .any(|entry| Self::is_template_file(entry.path()))
    }

    fn generate(&self, path: &Path) -> dotdrop_core::Result<Vec<u8>> {
        self.render_file(path)
            .map_err(|e| dotdrop_core::Error::Template {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
    }
}
