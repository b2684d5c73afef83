use std::future::Future;
use std::ops::RangeInclusive;
use std::sync::Arc;

use log::{error, info, warn};

use crate::api::{ApiResponse, RecipeSource};
use crate::error::ViewerError;
use crate::model::{Recipe, RecipeList};
use crate::pagination::{page_slice, total_pages, RECIPES_PER_PAGE};

/// State behind the paginated recipe list.
///
/// The whole catalogue is fetched once on mount; paging afterwards is purely
/// local.
pub struct ListController {
    source: Arc<dyn RecipeSource>,
    recipes: Vec<Recipe>,
    current_page: usize,
    status_message: String,
}

impl ListController {
    pub fn new(source: Arc<dyn RecipeSource>) -> Self {
        Self {
            source,
            recipes: Vec::new(),
            current_page: 1,
            status_message: String::new(),
        }
    }

    /// Fetch the catalogue. Called once when the list is first shown.
    ///
    /// A non-2xx status becomes the status message and leaves the recipes
    /// as they were. Transport and decode failures are only logged.
    pub async fn mount(&mut self) {
        let result = self.fetch().await;
        self.receive(result);
    }

    /// The catalogue request on its own, detached from `self` so it can run
    /// as a separate task while the view stays responsive
    pub fn fetch(
        &self,
    ) -> impl Future<Output = Result<ApiResponse<RecipeList>, ViewerError>> + Send + 'static {
        let source = Arc::clone(&self.source);
        async move { source.list_recipes().await }
    }

    /// Apply the outcome of [`fetch`](Self::fetch)
    pub fn receive(&mut self, result: Result<ApiResponse<RecipeList>, ViewerError>) {
        match result {
            Ok(ApiResponse::Success { data }) => {
                info!("Loaded {} recipes", data.recipes.len());
                self.recipes = data.recipes;
            }
            Ok(ApiResponse::Error { message }) => {
                warn!("Recipe list request failed: {}", message);
                self.status_message = message;
            }
            Err(e) => {
                error!("{}", e);
            }
        }
    }

    /// Switch to `page`. Never triggers a fetch.
    pub fn select_page(&mut self, page: usize) {
        self.current_page = page;
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn current_page_recipes(&self) -> &[Recipe] {
        page_slice(&self.recipes, self.current_page, RECIPES_PER_PAGE)
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.recipes.len(), RECIPES_PER_PAGE)
    }

    /// Page numbers offered by the page selector; empty with no recipes
    pub fn page_numbers(&self) -> RangeInclusive<usize> {
        1..=self.total_pages()
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }
}
