//! Core domain logic for the kith relationship journal.
//! This crate is the single source of truth for the document grammar,
//! name resolution and derived statistics.

pub mod document;
pub mod logging;
pub mod model;
pub mod search;
pub mod service;

pub use document::parser::{load_document, parse_document, ParsedDocument};
pub use document::writer::{render_document, save_document};
pub use document::{
    DocumentError, DocumentResult, SectionKind, ACTIVITIES_HEADER, FRIENDS_HEADER,
    LOCATIONS_HEADER,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::activity::Activity;
pub use model::friend::Friend;
pub use model::location::Location;
pub use model::{RecordFormatError, RecordResult};
pub use search::resolve::{find_exact, find_one, find_one_index, ResolveError, ResolveResult};
pub use service::journal::{Journal, JournalError, JournalResult, SuggestTiers};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
