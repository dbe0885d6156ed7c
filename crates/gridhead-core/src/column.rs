//! Column definitions as supplied by the grid author.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::percent::Percent;

/// Content shown inside a header cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum DisplayContent {
    /// Plain text.
    Text(String),
    /// Pre-rendered markup handed through to the renderer untouched.
    Markup(String),
}

impl DisplayContent {
    /// The raw string regardless of kind.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text(text) | Self::Markup(text) => text,
        }
    }
}

impl fmt::Display for DisplayContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type RenderFn = dyn Fn(&ColumnDefinition) -> DisplayContent + Send + Sync;
type ClickFn = dyn Fn(&ColumnDefinition) + Send + Sync;

/// Custom header content renderer.
#[derive(Clone)]
pub struct ColumnRenderer(Arc<RenderFn>);

impl ColumnRenderer {
    pub fn new(
        render: impl Fn(&ColumnDefinition) -> DisplayContent + Send + Sync + 'static,
    ) -> Self {
        Self(Arc::new(render))
    }

    #[must_use]
    pub fn render(&self, column: &ColumnDefinition) -> DisplayContent {
        (self.0)(column)
    }
}

impl fmt::Debug for ColumnRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ColumnRenderer(..)")
    }
}

impl PartialEq for ColumnRenderer {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Column-supplied header click handler.
#[derive(Clone)]
pub struct ClickHandler(Arc<ClickFn>);

impl ClickHandler {
    pub fn new(handler: impl Fn(&ColumnDefinition) + Send + Sync + 'static) -> Self {
        Self(Arc::new(handler))
    }

    pub fn call(&self, column: &ColumnDefinition) {
        (self.0)(column);
    }
}

impl fmt::Debug for ClickHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClickHandler(..)")
    }
}

impl PartialEq for ClickHandler {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// One column of the grid.
///
/// Immutable input to a layout pass. `width` is the *declared* width; the
/// rendered width also depends on persisted overrides and the remainder rule
/// (see `gridhead_layout::width`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnDefinition {
    pub name: String,
    pub value: Option<String>,
    pub width: Option<Percent>,
    pub resizable: Option<bool>,
    pub moveable: Option<bool>,
    pub class_name: String,
    #[serde(skip)]
    pub renderer: Option<ColumnRenderer>,
    #[serde(skip)]
    pub on_click: Option<ClickHandler>,
}

impl ColumnDefinition {
    /// Create a column with the given display name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the data value (field accessor) the column is bound to.
    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the declared width in percent.
    #[must_use]
    pub fn width(mut self, width: f64) -> Self {
        self.width = Some(Percent::new(width));
        self
    }

    #[must_use]
    pub fn resizable(mut self, resizable: bool) -> Self {
        self.resizable = Some(resizable);
        self
    }

    #[must_use]
    pub fn moveable(mut self, moveable: bool) -> Self {
        self.moveable = Some(moveable);
        self
    }

    #[must_use]
    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    #[must_use]
    pub fn renderer(
        mut self,
        render: impl Fn(&ColumnDefinition) -> DisplayContent + Send + Sync + 'static,
    ) -> Self {
        self.renderer = Some(ColumnRenderer::new(render));
        self
    }

    #[must_use]
    pub fn on_click(mut self, handler: impl Fn(&ColumnDefinition) + Send + Sync + 'static) -> Self {
        self.on_click = Some(ClickHandler::new(handler));
        self
    }

    /// Declared width as a number, `0` when undeclared.
    #[must_use]
    pub fn declared_width(&self) -> f64 {
        self.width.map_or(0.0, Percent::get)
    }

    /// Header content: the renderer's output, or the column name.
    #[must_use]
    pub fn display_content(&self) -> DisplayContent {
        match &self.renderer {
            Some(renderer) => renderer.render(self),
            None => DisplayContent::Text(self.name.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn display_content_defaults_to_name() {
        let col = ColumnDefinition::new("Name");
        assert_eq!(col.display_content(), DisplayContent::Text("Name".into()));
    }

    #[test]
    fn renderer_overrides_name() {
        let col = ColumnDefinition::new("Name")
            .renderer(|c| DisplayContent::Markup(format!("<b>{}</b>", c.name)));
        assert_eq!(col.display_content().as_str(), "<b>Name</b>");
    }

    #[test]
    fn declared_width_is_zero_when_missing() {
        assert_eq!(ColumnDefinition::new("A").declared_width(), 0.0);
        assert_eq!(ColumnDefinition::new("A").width(40.0).declared_width(), 40.0);
    }

    #[test]
    fn click_handler_receives_column() {
        let hits = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&hits);
        let col = ColumnDefinition::new("A").on_click(move |c| {
            assert_eq!(c.name, "A");
            seen.fetch_add(1, Ordering::SeqCst);
        });
        col.on_click.as_ref().unwrap().call(&col);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn deserializes_css_widths_and_skips_callbacks() {
        let cols: Vec<ColumnDefinition> = serde_json::from_str(
            r#"[
                {"name":"A","value":"a","width":"40%","class_name":"col-a"},
                {"name":"B","resizable":false}
            ]"#,
        )
        .unwrap();
        assert_eq!(cols[0].width, Some(Percent::new(40.0)));
        assert_eq!(cols[0].class_name, "col-a");
        assert_eq!(cols[1].resizable, Some(false));
        assert!(cols[1].renderer.is_none());
    }
}
