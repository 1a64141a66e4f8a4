//! Single-route highlight state and the map renderer seam.

use crate::models::{RouteBounds, RouteStyle};

/// Map-side collaborator that draws route polylines.
pub trait MapRenderer {
    fn apply_style(&mut self, index: usize, style: &RouteStyle);

    /// Pan/zoom so that `bounds` is in view.
    fn fit_bounds(&mut self, index: usize, bounds: RouteBounds);

    /// Forget every drawn route before a new collection is drawn.
    fn clear(&mut self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HighlightState {
    #[default]
    NoHighlight,
    Highlighted(usize),
}

impl HighlightState {
    pub fn index(self) -> Option<usize> {
        match self {
            HighlightState::NoHighlight => None,
            HighlightState::Highlighted(index) => Some(index),
        }
    }
}

pub fn base_style() -> RouteStyle {
    RouteStyle {
        color: "#2563eb".into(),
        weight: 3.0,
        opacity: 0.7,
        dash_array: Some("8, 6".into()),
    }
}

pub fn highlight_style() -> RouteStyle {
    RouteStyle {
        color: "#f97316".into(),
        weight: 6.0,
        opacity: 1.0,
        dash_array: None,
    }
}

/// Owns the highlight state machine for one route collection.
///
/// `set_highlight` always resets the previously highlighted route to its base
/// style before styling the new one, so two routes are never drawn
/// highlighted at the same time.
pub struct Highlighter<R> {
    state: HighlightState,
    base_styles: Vec<RouteStyle>,
    highlight: RouteStyle,
    renderer: R,
}

impl<R: MapRenderer> Highlighter<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            state: HighlightState::NoHighlight,
            base_styles: Vec::new(),
            highlight: highlight_style(),
            renderer,
        }
    }

    /// Starts over for a freshly loaded collection of `route_count` routes.
    pub fn reset_routes(&mut self, route_count: usize) {
        self.state = HighlightState::NoHighlight;
        self.renderer.clear();
        self.base_styles = vec![base_style(); route_count];
        for (index, style) in self.base_styles.iter().enumerate() {
            self.renderer.apply_style(index, style);
        }
    }

    /// Returns `false` and leaves everything untouched when `index` is not a
    /// known route.
    pub fn set_highlight(&mut self, index: usize, bounds: Option<RouteBounds>) -> bool {
        if index >= self.base_styles.len() {
            return false;
        }

        self.reset_current();
        self.renderer.apply_style(index, &self.highlight);
        self.state = HighlightState::Highlighted(index);

        if let Some(bounds) = bounds {
            self.renderer.fit_bounds(index, bounds);
        }
        true
    }

    pub fn clear_highlight(&mut self) {
        self.reset_current();
        self.state = HighlightState::NoHighlight;
    }

    pub fn state(&self) -> HighlightState {
        self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    fn reset_current(&mut self) {
        if let HighlightState::Highlighted(previous) = self.state {
            if let Some(style) = self.base_styles.get(previous) {
                self.renderer.apply_style(previous, style);
            }
        }
    }
}

/// In-memory renderer keeping the current style of every route and the last
/// centering request.
#[derive(Debug, Clone, Default)]
pub struct StyleBook {
    styles: Vec<RouteStyle>,
    last_view: Option<RouteBounds>,
}

impl StyleBook {
    pub fn styles(&self) -> &[RouteStyle] {
        &self.styles
    }

    pub fn style(&self, index: usize) -> Option<&RouteStyle> {
        self.styles.get(index)
    }

    pub fn last_view(&self) -> Option<RouteBounds> {
        self.last_view
    }
}

impl MapRenderer for StyleBook {
    fn apply_style(&mut self, index: usize, style: &RouteStyle) {
        if index >= self.styles.len() {
            self.styles.resize(index + 1, base_style());
        }
        self.styles[index] = style.clone();
    }

    fn fit_bounds(&mut self, index: usize, bounds: RouteBounds) {
        tracing::debug!("centering map on route {}: {:?}", index, bounds);
        self.last_view = Some(bounds);
    }

    fn clear(&mut self) {
        self.styles.clear();
        self.last_view = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Style(usize, RouteStyle),
        Fit(usize),
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl MapRenderer for Recorder {
        fn apply_style(&mut self, index: usize, style: &RouteStyle) {
            self.calls.push(Call::Style(index, style.clone()));
        }

        fn fit_bounds(&mut self, index: usize, _bounds: RouteBounds) {
            self.calls.push(Call::Fit(index));
        }
    }

    fn bounds() -> RouteBounds {
        RouteBounds {
            min_lat: 60.39,
            max_lat: 63.43,
            min_lon: 5.32,
            max_lon: 10.39,
        }
    }

    #[test]
    fn second_highlight_supersedes_first() {
        let mut highlighter = Highlighter::new(StyleBook::default());
        highlighter.reset_routes(6);

        assert!(highlighter.set_highlight(3, None));
        assert!(highlighter.set_highlight(5, None));

        assert_eq!(highlighter.state(), HighlightState::Highlighted(5));
        let book = highlighter.renderer();
        assert_eq!(book.style(3), Some(&base_style()));
        assert_eq!(book.style(5), Some(&highlight_style()));
        let highlighted = book
            .styles()
            .iter()
            .filter(|style| **style == highlight_style())
            .count();
        assert_eq!(highlighted, 1);
    }

    #[test]
    fn reset_happens_before_apply() {
        let mut highlighter = Highlighter::new(Recorder::default());
        highlighter.reset_routes(4);
        highlighter.set_highlight(1, Some(bounds()));
        let start = highlighter.renderer().calls.len();

        highlighter.set_highlight(2, Some(bounds()));

        assert_eq!(
            highlighter.renderer().calls[start..],
            [
                Call::Style(1, base_style()),
                Call::Style(2, highlight_style()),
                Call::Fit(2),
            ]
        );
    }

    #[test]
    fn rehighlighting_same_route_still_resets_first() {
        let mut highlighter = Highlighter::new(Recorder::default());
        highlighter.reset_routes(2);
        highlighter.set_highlight(0, None);
        let start = highlighter.renderer().calls.len();

        highlighter.set_highlight(0, None);

        assert_eq!(
            highlighter.renderer().calls[start..],
            [Call::Style(0, base_style()), Call::Style(0, highlight_style())]
        );
        assert_eq!(highlighter.state(), HighlightState::Highlighted(0));
    }

    #[test]
    fn clear_restores_base_style() {
        let mut highlighter = Highlighter::new(StyleBook::default());
        highlighter.reset_routes(3);
        highlighter.set_highlight(2, Some(bounds()));

        highlighter.clear_highlight();

        assert_eq!(highlighter.state(), HighlightState::NoHighlight);
        assert!(highlighter
            .renderer()
            .styles()
            .iter()
            .all(|style| *style == base_style()));
        assert_eq!(highlighter.renderer().last_view(), Some(bounds()));
    }

    #[test]
    fn unknown_index_is_rejected_without_side_effects() {
        let mut highlighter = Highlighter::new(Recorder::default());
        highlighter.reset_routes(2);
        highlighter.set_highlight(1, None);
        let before = highlighter.renderer().calls.len();

        assert!(!highlighter.set_highlight(7, None));

        assert_eq!(highlighter.renderer().calls.len(), before);
        assert_eq!(highlighter.state(), HighlightState::Highlighted(1));
    }

    #[test]
    fn reload_drops_highlight() {
        let mut highlighter = Highlighter::new(StyleBook::default());
        highlighter.reset_routes(3);
        highlighter.set_highlight(1, None);

        highlighter.reset_routes(2);

        assert_eq!(highlighter.state(), HighlightState::NoHighlight);
        assert_eq!(highlighter.state().index(), None);
        assert_eq!(highlighter.renderer().styles().len(), 2);
    }
}
