//! Single recipe view, fetched by the identifier in the current route.
//!
//! Fetches run as independent tokio tasks and are never cancelled. With
//! [`StalePolicy::LastResolvedWins`] two overlapping fetches both commit, so
//! whichever resolves last decides what is shown even if it was requested
//! first. [`StalePolicy::LatestRequestWins`] drops any response whose
//! generation is older than the newest request.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, error, info, warn};
use tokio::task::JoinHandle;

use crate::api::{ApiResponse, RecipeSource};
use crate::error::ViewerError;
use crate::model::Recipe;
use crate::views::StalePolicy;

#[derive(Debug, Default)]
struct DetailState {
    recipe: Option<Recipe>,
    status_message: String,
    latest_generation: u64,
}

pub struct DetailController {
    source: Arc<dyn RecipeSource>,
    policy: StalePolicy,
    mounted: bool,
    id: Option<String>,
    next_generation: u64,
    state: Arc<Mutex<DetailState>>,
}

impl DetailController {
    pub fn new(source: Arc<dyn RecipeSource>, policy: StalePolicy) -> Self {
        Self {
            source,
            policy,
            mounted: false,
            id: None,
            next_generation: 0,
            state: Arc::new(Mutex::new(DetailState::default())),
        }
    }

    /// Show the recipe identified by `id`.
    ///
    /// Runs on first display and again whenever the identifier changes. An
    /// absent id or an unchanged one issues no request. Otherwise one fetch is
    /// spawned and its handle returned; the view state is updated when it
    /// resolves.
    ///
    /// # Panics
    ///
    /// Panics if a fetch is needed and this is called outside a tokio
    /// runtime, since the fetch is started with [`tokio::spawn`].
    pub fn navigate(&mut self, id: Option<String>) -> Option<JoinHandle<()>> {
        if self.mounted && self.id == id {
            return None;
        }
        self.mounted = true;
        self.id = id.clone();

        let Some(id) = id else {
            debug!("No recipe id in route, staying in loading state");
            return None;
        };

        self.next_generation += 1;
        let generation = self.next_generation;
        lock(&self.state).latest_generation = generation;

        let source = Arc::clone(&self.source);
        let state = Arc::clone(&self.state);
        let policy = self.policy;
        Some(tokio::spawn(async move {
            let result = source.recipe(&id).await;
            commit(&state, policy, generation, &id, result);
        }))
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn policy(&self) -> StalePolicy {
        self.policy
    }

    /// The recipe on display, if one ever loaded
    pub fn recipe(&self) -> Option<Recipe> {
        lock(&self.state).recipe.clone()
    }

    pub fn status_message(&self) -> String {
        lock(&self.state).status_message.clone()
    }

    /// True until the first recipe loads
    pub fn is_loading(&self) -> bool {
        lock(&self.state).recipe.is_none()
    }
}

fn lock(state: &Mutex<DetailState>) -> MutexGuard<'_, DetailState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

fn commit(
    state: &Mutex<DetailState>,
    policy: StalePolicy,
    generation: u64,
    id: &str,
    result: Result<ApiResponse<Recipe>, ViewerError>,
) {
    let mut state = lock(state);
    if policy == StalePolicy::LatestRequestWins && generation != state.latest_generation {
        debug!(
            "Discarding response for recipe {} (generation {} < {})",
            id, generation, state.latest_generation
        );
        return;
    }

    match result {
        Ok(ApiResponse::Success { data }) => {
            info!("Loaded recipe {}", data.id);
            state.recipe = Some(data);
        }
        Ok(ApiResponse::Error { message }) => {
            warn!("Recipe {} request failed: {}", id, message);
            state.status_message = message;
        }
        Err(e) => {
            error!("{}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RecipeList;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::oneshot;

    /// Holds every request open until the test releases it
    #[derive(Default)]
    struct GatedSource {
        gates: Mutex<HashMap<String, oneshot::Receiver<Result<ApiResponse<Recipe>, ViewerError>>>>,
        calls: AtomicUsize,
    }

    impl GatedSource {
        fn gate(&self, id: &str) -> oneshot::Sender<Result<ApiResponse<Recipe>, ViewerError>> {
            let (tx, rx) = oneshot::channel();
            self.gates.lock().unwrap().insert(id.to_string(), rx);
            tx
        }
    }

    #[async_trait]
    impl RecipeSource for GatedSource {
        async fn list_recipes(&self) -> Result<ApiResponse<RecipeList>, ViewerError> {
            unreachable!("detail view never fetches the list")
        }

        async fn recipe(&self, id: &str) -> Result<ApiResponse<Recipe>, ViewerError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let gate = self
                .gates
                .lock()
                .unwrap()
                .remove(id)
                .expect("request for an ungated id");
            gate.await.expect("gate dropped")
        }
    }

    fn loaded(id: u64) -> Result<ApiResponse<Recipe>, ViewerError> {
        Ok(ApiResponse::Success {
            data: Recipe {
                id,
                name: format!("Recipe {id}"),
                ..Default::default()
            },
        })
    }

    fn controller(source: &Arc<GatedSource>, policy: StalePolicy) -> DetailController {
        DetailController::new(source.clone(), policy)
    }

    #[tokio::test]
    async fn test_missing_id_never_fetches() {
        let source = Arc::new(GatedSource::default());
        let mut view = controller(&source, StalePolicy::default());

        assert!(view.navigate(None).is_none());
        assert!(view.navigate(None).is_none());
        tokio::task::yield_now().await;

        assert!(view.is_loading());
        assert!(view.recipe().is_none());
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_navigate_loads_recipe() {
        let source = Arc::new(GatedSource::default());
        let gate = source.gate("5");
        let mut view = controller(&source, StalePolicy::default());

        let handle = view.navigate(Some("5".to_string())).unwrap();
        assert!(view.is_loading());
        gate.send(loaded(5)).unwrap();
        handle.await.unwrap();

        assert!(!view.is_loading());
        assert_eq!(view.recipe().map(|r| r.id), Some(5));
        assert_eq!(view.id(), Some("5"));
    }

    #[tokio::test]
    async fn test_same_id_does_not_refetch() {
        let source = Arc::new(GatedSource::default());
        let gate = source.gate("5");
        let mut view = controller(&source, StalePolicy::default());

        let handle = view.navigate(Some("5".to_string())).unwrap();
        assert!(view.navigate(Some("5".to_string())).is_none());
        gate.send(loaded(5)).unwrap();
        handle.await.unwrap();

        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_error_keeps_previous_recipe() {
        let source = Arc::new(GatedSource::default());
        let first = source.gate("1");
        let second = source.gate("2");
        let mut view = controller(&source, StalePolicy::default());

        let handle = view.navigate(Some("1".to_string())).unwrap();
        first.send(loaded(1)).unwrap();
        handle.await.unwrap();

        let handle = view.navigate(Some("2".to_string())).unwrap();
        second
            .send(Ok(ApiResponse::Error {
                message: "Not Found".to_string(),
            }))
            .unwrap();
        handle.await.unwrap();

        assert_eq!(view.recipe().map(|r| r.id), Some(1));
        assert_eq!(view.status_message(), "Not Found");
    }

    #[tokio::test]
    async fn test_error_before_any_load_stays_loading() {
        let source = Arc::new(GatedSource::default());
        let gate = source.gate("9999");
        let mut view = controller(&source, StalePolicy::default());

        let handle = view.navigate(Some("9999".to_string())).unwrap();
        gate.send(Ok(ApiResponse::Error {
            message: "Not Found".to_string(),
        }))
        .unwrap();
        handle.await.unwrap();

        assert!(view.is_loading());
        assert_eq!(view.status_message(), "Not Found");
    }

    #[tokio::test]
    async fn test_transport_failure_leaves_state_untouched() {
        let source = Arc::new(GatedSource::default());
        let gate = source.gate("3");
        let mut view = controller(&source, StalePolicy::default());

        let handle = view.navigate(Some("3".to_string())).unwrap();
        let decode_error = serde_json::from_str::<Recipe>("not json").unwrap_err();
        gate.send(Err(ViewerError::Decode(decode_error))).unwrap();
        handle.await.unwrap();

        assert!(view.is_loading());
        assert_eq!(view.status_message(), "");
    }

    #[tokio::test]
    async fn test_slower_stale_response_wins_by_default() {
        let source = Arc::new(GatedSource::default());
        let gate_42 = source.gate("42");
        let gate_43 = source.gate("43");
        let mut view = controller(&source, StalePolicy::LastResolvedWins);

        let first = view.navigate(Some("42".to_string())).unwrap();
        let second = view.navigate(Some("43".to_string())).unwrap();

        gate_43.send(loaded(43)).unwrap();
        second.await.unwrap();
        assert_eq!(view.recipe().map(|r| r.id), Some(43));

        gate_42.send(loaded(42)).unwrap();
        first.await.unwrap();

        // The route now says 43 but the late response for 42 is displayed
        assert_eq!(view.id(), Some("43"));
        assert_eq!(view.recipe().map(|r| r.id), Some(42));
    }

    #[tokio::test]
    async fn test_latest_request_policy_drops_stale_response() {
        let source = Arc::new(GatedSource::default());
        let gate_42 = source.gate("42");
        let gate_43 = source.gate("43");
        let mut view = controller(&source, StalePolicy::LatestRequestWins);

        let first = view.navigate(Some("42".to_string())).unwrap();
        let second = view.navigate(Some("43".to_string())).unwrap();

        gate_43.send(loaded(43)).unwrap();
        second.await.unwrap();
        gate_42.send(loaded(42)).unwrap();
        first.await.unwrap();

        assert_eq!(view.recipe().map(|r| r.id), Some(43));
    }

    #[tokio::test]
    async fn test_latest_request_policy_drops_stale_error() {
        let source = Arc::new(GatedSource::default());
        let gate_1 = source.gate("1");
        let gate_2 = source.gate("2");
        let mut view = controller(&source, StalePolicy::LatestRequestWins);

        let first = view.navigate(Some("1".to_string())).unwrap();
        let second = view.navigate(Some("2".to_string())).unwrap();

        gate_2.send(loaded(2)).unwrap();
        second.await.unwrap();
        gate_1
            .send(Ok(ApiResponse::Error {
                message: "Internal Server Error".to_string(),
            }))
            .unwrap();
        first.await.unwrap();

        assert_eq!(view.recipe().map(|r| r.id), Some(2));
        assert_eq!(view.status_message(), "");
    }

    #[test]
    fn test_missing_id_needs_no_runtime() {
        let source = Arc::new(GatedSource::default());
        let mut view = controller(&source, StalePolicy::default());
        assert!(view.navigate(None).is_none());
        assert!(view.is_loading());
    }

    #[test]
    #[should_panic]
    fn test_fetch_outside_runtime_panics() {
        let source = Arc::new(GatedSource::default());
        let _gate = source.gate("1");
        let mut view = controller(&source, StalePolicy::default());
        view.navigate(Some("1".to_string()));
    }
}
