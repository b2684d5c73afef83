pub mod detail;
pub mod list;

pub use detail::DetailController;
pub use list::ListController;

use serde::Deserialize;

/// How a view treats a response that arrives after a newer request was issued
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StalePolicy {
    /// Every response commits in the order it resolves, so a slow response for
    /// an old identifier can overwrite a newer one
    #[default]
    LastResolvedWins,
    /// Each fetch is stamped with a generation; only the newest may commit
    LatestRequestWins,
}
