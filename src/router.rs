use crate::error::ViewerError;

/// The views reachable by path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`
    List,
    /// `/recipe/:id`. The id is `None` when the segment is missing.
    Detail { id: Option<String> },
}

impl Route {
    pub fn parse(path: &str) -> Result<Self, ViewerError> {
        let trimmed = path.trim();
        let segments: Vec<&str> = trimmed
            .trim_start_matches('/')
            .trim_end_matches('/')
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        match segments.as_slice() {
            [] => Ok(Route::List),
            ["recipe"] => Ok(Route::Detail { id: None }),
            ["recipe", id] => Ok(Route::Detail {
                id: Some((*id).to_string()),
            }),
            _ => Err(ViewerError::UnknownRoute(trimmed.to_string())),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::List => "/".to_string(),
            Route::Detail { id: Some(id) } => format!("/recipe/{id}"),
            Route::Detail { id: None } => "/recipe".to_string(),
        }
    }
}
