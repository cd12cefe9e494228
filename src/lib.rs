//! tidbits - polling HTTP fetcher and map/counter helpers

pub mod config;
pub mod counter;
pub mod debug_repr;
pub mod error;
pub mod matrix;
pub mod parser;
pub mod poller;
pub mod rich_map;

pub use config::PollConfig;
pub use counter::{Count, Counter};
pub use debug_repr::{debug_line, log_debug, DebugRepr};
pub use error::{FixSuggestion, Result, TidbitsError};
pub use matrix::matrix;
pub use parser::{Json, RawText, ResponseParser};
pub use poller::{log_error, Poller, Polled};
pub use rich_map::RichMap;
