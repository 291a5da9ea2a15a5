pub mod ai;
pub use ai::{AiPlayer, Engine, OpeningBook, SearchProgress, SearchResult};
