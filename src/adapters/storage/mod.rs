//! Storage adapters - in-memory session and preference stores.

mod in_memory_preference_store;
mod in_memory_session_store;

pub use in_memory_preference_store::InMemoryPreferenceStore;
pub use in_memory_session_store::InMemorySessionStore;
