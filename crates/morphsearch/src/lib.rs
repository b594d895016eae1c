pub mod handlers;
pub mod pattern;
pub mod search;

pub use handlers::{AppState, router};
pub use pattern::{FragmentSource, MatchFragment, PatternBuilder, SearchPattern};
pub use search::{Match, Matcher, SearchError};
