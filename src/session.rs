//! The interactive host: which view is on screen and how fetch completions
//! get back to it.
//!
//! Opening a route never waits for the network. Fetches run as tasks and
//! report on the session's event channel, so the caller can keep reading
//! input, navigate again while a request is in flight, and re-render when
//! either happens.

use std::sync::Arc;

use log::error;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use crate::api::{ApiResponse, RecipeSource};
use crate::error::ViewerError;
use crate::model::RecipeList;
use crate::render::{render_detail, render_list};
use crate::router::Route;
use crate::views::{DetailController, ListController, StalePolicy};

/// A fetch finished and the screen may need redrawing
#[derive(Debug)]
pub enum Event {
    ListLoaded {
        screen: u64,
        result: Result<ApiResponse<RecipeList>, ViewerError>,
    },
    DetailSettled,
}

pub enum Screen {
    List(ListController),
    Detail(DetailController),
}

pub struct Session {
    source: Arc<dyn RecipeSource>,
    policy: StalePolicy,
    screen: Option<Screen>,
    screen_id: u64,
    events: UnboundedSender<Event>,
}

impl Session {
    pub fn new(
        source: Arc<dyn RecipeSource>,
        policy: StalePolicy,
    ) -> (Self, UnboundedReceiver<Event>) {
        let (events, receiver) = unbounded_channel();
        let session = Self {
            source,
            policy,
            screen: None,
            screen_id: 0,
            events,
        };
        (session, receiver)
    }

    /// Switch to `route` without waiting for its data.
    ///
    /// The detail view is reused while moving between recipe ids so its
    /// stale policy applies; a route without an id always gets a fresh one.
    ///
    /// # Panics
    ///
    /// Panics outside a tokio runtime.
    pub fn open(&mut self, route: Route) {
        match route {
            Route::List => {
                let view = ListController::new(Arc::clone(&self.source));
                let fetch = view.fetch();
                let screen = self.replace(Screen::List(view));
                let events = self.events.clone();
                tokio::spawn(async move {
                    let result = fetch.await;
                    let _ = events.send(Event::ListLoaded { screen, result });
                });
            }
            Route::Detail { id } => {
                let reuse = id.is_some() && matches!(self.screen, Some(Screen::Detail(_)));
                if !reuse {
                    let view = DetailController::new(Arc::clone(&self.source), self.policy);
                    self.replace(Screen::Detail(view));
                }
                let fetch = match &mut self.screen {
                    Some(Screen::Detail(view)) => view.navigate(id),
                    _ => None,
                };
                if let Some(handle) = fetch {
                    self.watch(handle);
                }
            }
        }
    }

    /// Fold a finished fetch into the screen. List results for a screen that
    /// has since been replaced are dropped.
    pub fn apply(&mut self, event: Event) {
        match event {
            Event::ListLoaded { screen, result } => {
                if screen != self.screen_id {
                    return;
                }
                if let Some(Screen::List(view)) = &mut self.screen {
                    view.receive(result);
                }
            }
            // Detail state is committed by the fetch task itself
            Event::DetailSettled => {}
        }
    }

    pub fn screen(&self) -> Option<&Screen> {
        self.screen.as_ref()
    }

    pub fn list_mut(&mut self) -> Option<&mut ListController> {
        match &mut self.screen {
            Some(Screen::List(view)) => Some(view),
            _ => None,
        }
    }

    pub fn render(&self) -> String {
        match &self.screen {
            Some(Screen::List(view)) => render_list(view),
            Some(Screen::Detail(view)) => render_detail(view),
            None => String::new(),
        }
    }

    fn replace(&mut self, screen: Screen) -> u64 {
        self.screen_id += 1;
        self.screen = Some(screen);
        self.screen_id
    }

    fn watch(&self, handle: JoinHandle<()>) {
        let events = self.events.clone();
        tokio::spawn(async move {
            if let Err(e) = handle.await {
                error!("Recipe fetch task failed: {}", e);
            }
            let _ = events.send(Event::DetailSettled);
        });
    }
}
