pub mod config;
pub mod entry;
pub mod filter;
pub mod keywords;
pub mod parse_input;
pub mod paths;
pub mod recall;
pub mod related;
pub mod render;
pub mod review;
pub mod store;
pub mod study;
pub mod validate;

pub use config::Config;
pub use entry::{Body, Entry, EntryDraft, EntryId, EntryPatch, QaPair};
pub use keywords::{Keywords, UnknownInterval};
pub use recall::{DetailView, ListItem, ListView, Recall};
pub use related::RelatedRef;
pub use review::{ReviewInterval, ReviewStatus, Urgency};
pub use store::{EntryStore, FileStore, MemoryStore, StoreError};
pub use study::{Card, StudySession};
pub use validate::ValidationError;
