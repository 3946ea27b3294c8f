//! Printing views.
//!
//! Text modes render a MiniJinja template per view, styled through a
//! [`Theme`] when the mode asks for it. Structured modes serialize the
//! page's records and skip templates.

mod output;
mod serialize;
mod theme;

pub use output::{OutputMode, TextMode};
pub use serialize::{serialize_structured, to_csv, SerializeError};
pub use theme::Theme;

use console::{pad_str, Alignment};
use minijinja::{context, Environment, Value};
use serde::Serialize;
use thiserror::Error;
use tracing::trace;

use crate::views::{ListView, ViewKind};

const DIRECTORY_TEMPLATE: &str = include_str!("../../templates/directory.jinja");
const LEAVE_TEMPLATE: &str = include_str!("../../templates/leave.jinja");
const AUDIT_TEMPLATE: &str = include_str!("../../templates/audit.jinja");

/// Errors from printing a view.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error(transparent)]
    Serialize(#[from] SerializeError),
}

/// Returns the template source of a view.
pub fn template_for(view: ViewKind) -> &'static str {
    match view {
        ViewKind::Directory => DIRECTORY_TEMPLATE,
        ViewKind::Leave => LEAVE_TEMPLATE,
        ViewKind::Audit => AUDIT_TEMPLATE,
    }
}

/// Renders a view in the given output mode.
pub fn render_view<T: Serialize>(
    list: &ListView<T>,
    view: ViewKind,
    mode: OutputMode,
) -> Result<String, RenderError> {
    match mode.to_text_mode() {
        Some(text_mode) => render_template(view.as_str(), template_for(view), list, text_mode),
        None => Ok(serialize_structured(&list.items, mode)?),
    }
}

/// Renders a list view through a template source.
pub fn render_template<T: Serialize>(
    name: &str,
    source: &str,
    list: &ListView<T>,
    mode: TextMode,
) -> Result<String, RenderError> {
    trace!(template = name, ?mode, "rendering view");

    let env = environment(Theme::default_theme(), mode == TextMode::Styled);
    let output = env.render_named_str(
        name,
        source,
        context! {
            title => &list.title,
            items => &list.items,
            total => list.total,
            filter => &list.filter,
            empty => list.empty,
            past_end => list.past_end,
            page => list.page,
            pages => list.pages,
            footer => footer(list),
        },
    )?;
    Ok(output)
}

/// Builds an environment with the `style`, `pad` and `nl` filters.
pub fn environment(theme: &'static Theme, styled: bool) -> Environment<'static> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);

    env.add_filter("style", move |value: Value, name: String| -> String {
        theme.apply(&name, &value.to_string(), styled)
    });

    // {{ value | pad(width) }}: left-align to a column, cutting with an ellipsis.
    env.add_filter("pad", |value: Value, width: usize| -> String {
        pad_str(&value.to_string(), width, Alignment::Left, Some("…")).into_owned()
    });

    env.add_filter("nl", |value: Value| -> String { format!("{}\n", value) });

    env
}

fn footer<T>(list: &ListView<T>) -> String {
    let mut footer = format!(
        "Showing {} of {} · page {}/{}",
        list.shown(),
        list.total,
        list.page,
        list.pages
    );
    if let Some(sort) = &list.sort {
        footer.push_str(" · sorted by ");
        footer.push_str(sort);
    }
    footer
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Debug, Clone, Serialize)]
    struct Row {
        name: &'static str,
    }

    fn list(items: Vec<Row>) -> ListView<Row> {
        ListView {
            title: "People".to_string(),
            empty: items.is_empty(),
            past_end: false,
            total: items.len(),
            items,
            page: 1,
            pages: 1,
            filter: Some("search 'lee' in name".to_string()),
            sort: Some("name:asc".to_string()),
        }
    }

    const SOURCE: &str = "{{ title | style(\"title\") }}\n{% if empty %}\nNo records found\n{% else %}\n{% for r in items %}\n[{{ r.name | pad(6) }}]\n{% endfor %}\n{{ footer }}\n{% endif %}\n";

    #[test]
    fn plain_template() {
        let out = render_template("t", SOURCE, &list(vec![Row { name: "Sarah Lee" }]), TextMode::Plain)
            .unwrap();
        assert_eq!(out, "People\n[Sarah…]\nShowing 1 of 1 · page 1/1 · sorted by name:asc\n");
    }

    #[test]
    fn styled_template() {
        let out = render_template("t", SOURCE, &list(vec![]), TextMode::Styled).unwrap();
        assert!(out.contains("\u{1b}["));
        assert!(out.contains("No records found"));
    }

    #[test]
    fn structured_modes_skip_templates() {
        let out = render_view(&list(vec![Row { name: "Sarah Lee" }]), ViewKind::Directory, OutputMode::Json)
            .unwrap();
        assert!(out.trim_start().starts_with('['));
        assert!(out.contains("\"name\": \"Sarah Lee\""));
        assert!(!out.contains("People"));
    }

    #[test]
    fn pad_fills_short_values() {
        let env = environment(Theme::default_theme(), false);
        let out = env.render_str("[{{ 'ab' | pad(4) }}]", ()).unwrap();
        assert_eq!(out, "[ab  ]");
    }
}
