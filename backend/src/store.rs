use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;

use crate::{
    error::ResolveError,
    geometry::route_bounds,
    highlight::{Highlighter, StyleBook},
    models::{HighlightView, Route, RouteCollection},
    resolve::{RouteIdentifier, resolve_route_index},
};

/// Shared access to the current route collection and highlight state.
///
/// The collection lives behind a watch channel: a reload swaps the whole
/// `Arc`, and the first swap doubles as the "data loaded" signal. Until then
/// every query behaves as if no route exists.
pub struct RouteStore {
    collection: watch::Sender<Option<Arc<RouteCollection>>>,
    highlighter: Mutex<Highlighter<StyleBook>>,
}

impl Default for RouteStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteStore {
    pub fn new() -> Self {
        let (collection, _) = watch::channel(None);
        Self {
            collection,
            highlighter: Mutex::new(Highlighter::new(StyleBook::default())),
        }
    }

    pub fn with_collection(collection: RouteCollection) -> Self {
        let store = Self::new();
        store.replace(collection);
        store
    }

    /// Swaps in a new collection and drops any highlight of the old one.
    pub fn replace(&self, collection: RouteCollection) {
        let mut highlighter = self.lock_highlighter();
        let count = collection.len();
        self.collection.send_replace(Some(Arc::new(collection)));
        highlighter.reset_routes(count);
        tracing::info!("route collection replaced: {} routes", count);
    }

    pub fn snapshot(&self) -> Option<Arc<RouteCollection>> {
        self.collection.borrow().clone()
    }

    pub fn is_ready(&self) -> bool {
        self.collection.borrow().is_some()
    }

    /// Resolves once a collection has been loaded.
    pub async fn wait_ready(&self) -> Option<Arc<RouteCollection>> {
        let mut rx = self.collection.subscribe();
        let loaded = rx.wait_for(Option::is_some).await.ok()?;
        loaded.clone()
    }

    pub fn resolve(&self, identifier: &RouteIdentifier) -> Result<Route, ResolveError> {
        let collection = self.snapshot().unwrap_or_default();
        let index = resolve_route_index(identifier, collection.routes())?;
        collection
            .get(index)
            .cloned()
            .ok_or_else(|| ResolveError::NotFound(identifier.to_string()))
    }

    /// Resolves `identifier` and makes it the only highlighted route, then
    /// asks the map to centre on it.
    pub fn highlight(&self, identifier: &RouteIdentifier) -> Result<HighlightView, ResolveError> {
        let mut highlighter = self.lock_highlighter();
        let collection = self.snapshot().unwrap_or_default();
        let index = resolve_route_index(identifier, collection.routes())?;
        let bounds = collection
            .get(index)
            .and_then(|route| route_bounds(&route.waypoints));

        if !highlighter.set_highlight(index, bounds) {
            return Err(ResolveError::NotFound(identifier.to_string()));
        }
        tracing::debug!("highlighted route {} for identifier {}", index, identifier);
        Ok(view(&highlighter, &collection))
    }

    pub fn clear_highlight(&self) -> HighlightView {
        let mut highlighter = self.lock_highlighter();
        highlighter.clear_highlight();
        view(&highlighter, &self.snapshot().unwrap_or_default())
    }

    pub fn highlight_view(&self) -> HighlightView {
        let highlighter = self.lock_highlighter();
        view(&highlighter, &self.snapshot().unwrap_or_default())
    }

    fn lock_highlighter(&self) -> MutexGuard<'_, Highlighter<StyleBook>> {
        self.highlighter
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

fn view(highlighter: &Highlighter<StyleBook>, collection: &RouteCollection) -> HighlightView {
    let highlighted = highlighter.state().index();
    HighlightView {
        highlighted,
        route_id: highlighted
            .and_then(|index| collection.get(index))
            .map(|route| route.id.clone()),
        styles: highlighter.renderer().styles().to_vec(),
        view: highlighter.renderer().last_view(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{highlight::base_style, loader::build_collection};

    fn collection() -> RouteCollection {
        build_collection(&json!([
            {"id": "bgo-trd", "name": "Bergen - Trondheim",
             "waypoints": [{"lat": 60.39, "lon": 5.32}, {"lat": 63.43, "lon": 10.39}]},
            {"name": "Oslo - Kristiansand", "path": [[10.75, 59.91], [8.0, 58.15]]},
            {"name": "Stavanger - Bergen", "path": [[5.73, 58.97], [5.32, 60.39]]},
            {"name": "Tromsø - Hammerfest", "path": [[18.96, 69.65], [23.68, 70.66]]},
            {"name": "Bodø - Lofoten", "path": [[14.40, 67.28], [13.19, 68.15]]},
            {"name": "Ålesund - Molde", "path": [[6.15, 62.47], [7.16, 62.74]]}
        ]))
        .expect("collection")
    }

    #[test]
    fn queries_before_load_are_empty() {
        let store = RouteStore::new();
        assert!(!store.is_ready());
        assert!(store.snapshot().is_none());
        assert!(matches!(
            store.resolve(&RouteIdentifier::Index(0)),
            Err(ResolveError::NotFound(_))
        ));
        assert!(store.highlight(&"bergen".into()).is_err());
        assert_eq!(store.highlight_view().highlighted, None);
    }

    #[test]
    fn highlight_is_exclusive() {
        let store = RouteStore::with_collection(collection());

        store.highlight(&RouteIdentifier::Index(3)).expect("route 3");
        let view = store.highlight(&RouteIdentifier::Index(5)).expect("route 5");

        assert_eq!(view.highlighted, Some(5));
        assert_eq!(view.styles[3], base_style());
        assert_eq!(view.styles.iter().filter(|s| **s != base_style()).count(), 1);
    }

    #[test]
    fn highlight_centres_on_route_bounds() {
        let store = RouteStore::with_collection(collection());
        let view = store.highlight(&"bgo-trd".into()).expect("route");
        let bounds = view.view.expect("centering request");
        assert_eq!(view.route_id.as_deref(), Some("bgo-trd"));
        assert_eq!((bounds.min_lat, bounds.max_lat), (60.39, 63.43));
    }

    #[test]
    fn failed_highlight_keeps_previous_state() {
        let store = RouteStore::with_collection(collection());
        store.highlight(&"oslo".into()).expect("oslo");
        assert!(store.highlight(&"99".into()).is_err());
        assert_eq!(store.highlight_view().highlighted, Some(1));
    }

    #[test]
    fn replace_swaps_whole_collection() {
        let store = RouteStore::with_collection(collection());
        let before = store.snapshot().expect("loaded");
        store.highlight(&RouteIdentifier::Index(2)).expect("route 2");

        store.replace(RouteCollection::default());

        assert_eq!(before.len(), 6);
        assert!(store.snapshot().expect("still loaded").is_empty());
        let view = store.highlight_view();
        assert_eq!(view.highlighted, None);
        assert!(view.styles.is_empty());
    }

    #[tokio::test]
    async fn wait_ready_fires_on_first_load() {
        let store = Arc::new(RouteStore::new());
        let waiter = {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.wait_ready().await })
        };

        store.replace(collection());

        let loaded = waiter.await.expect("join").expect("collection");
        assert_eq!(loaded.len(), 6);
    }
}
