//! Search-as-you-type handling.

mod debounce;

pub use debounce::{DebounceController, SearchPhase, SearchRequest};
