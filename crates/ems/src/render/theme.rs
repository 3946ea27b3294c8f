//! Named styles for templates.
//!
//! Templates never carry escape codes. They name a style with the `style`
//! filter (`{{ e.name | style("name") }}`) and the theme decides what it
//! looks like. Status values double as style names, so
//! `{{ e.status | style(e.status) }}` colors each status differently.

use std::collections::HashMap;

use console::Style;
use once_cell::sync::Lazy;

static DEFAULT_THEME: Lazy<Theme> = Lazy::new(|| {
    Theme::new()
        .add("title", Style::new().bold().cyan())
        .add("header", Style::new().bold().underlined())
        .add("muted", Style::new().dim())
        .add("name", Style::new().bold())
        .add("date", Style::new().blue())
        .add("empty", Style::new().dim().italic())
        // Employee status
        .add("active", Style::new().green())
        .add("on-leave", Style::new().yellow())
        .add("terminated", Style::new().red().dim())
        // Leave status
        .add("approved", Style::new().green())
        .add("pending", Style::new().yellow())
        .add("rejected", Style::new().red())
        // Audit severity
        .add("info", Style::new().dim())
        .add("warning", Style::new().yellow().bold())
        .add("critical", Style::new().red().bold())
});

/// A named collection of styles.
#[derive(Debug, Clone, Default)]
pub struct Theme {
    styles: HashMap<String, Style>,
}

impl Theme {
    /// Creates an empty theme.
    pub fn new() -> Self {
        Theme::default()
    }

    /// Returns the theme the views render with.
    pub fn default_theme() -> &'static Theme {
        &DEFAULT_THEME
    }

    /// Adds or replaces a style.
    pub fn add(mut self, name: impl Into<String>, style: Style) -> Self {
        self.styles.insert(name.into(), style);
        self
    }

    /// Looks up a style by name.
    pub fn get(&self, name: &str) -> Option<&Style> {
        self.styles.get(name)
    }

    /// Applies a named style to `text`.
    ///
    /// Unknown names and unstyled output return the text unchanged.
    pub fn apply(&self, name: &str, text: &str, styled: bool) -> String {
        match self.get(name) {
            Some(style) if styled => style.clone().force_styling(true).apply_to(text).to_string(),
            _ => text.to_string(),
        }
    }
}
