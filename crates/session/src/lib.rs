//! Session layer - everything the engine deliberately leaves out.
//!
//! The grid engine reports `Match` and `Refill` events and nothing else. This
//! crate turns that event stream into game state and gives it a home:
//!
//! - [`config`]: [`SessionConfig`] with defaults and `MATCH3_*` environment overrides
//! - [`session`]: [`GameSession`], score / selection / move budget derived from events
//! - [`store`]: [`GameStore`] persistence boundary and the in-process [`MemoryStore`]
//! - [`error`]: config, session and store errors
//!
//! # Example
//!
//! ```
//! use match_three_session::{GamePatch, GameSession, GameStore, MemoryStore, SessionConfig};
//!
//! let mut store = MemoryStore::new();
//! let record = store.create_game(1);
//!
//! let mut session = GameSession::new(SessionConfig::default()).unwrap();
//! if let Some((a, b)) = session.hint().unwrap() {
//!     assert!(session.try_move(a, b).unwrap());
//! }
//!
//! let saved = store
//!     .update_game(record.id, GamePatch::from_session(&session))
//!     .unwrap();
//! assert_eq!(saved.score, session.score());
//! ```

pub mod config;
pub mod error;
pub mod session;
pub mod store;

pub use match_three_core as core;
pub use match_three_types as types;

pub use config::SessionConfig;
pub use error::{ConfigError, SessionError, StoreError};
pub use session::{GameSession, Selection, SessionSnapshot, Tally};
pub use store::{GamePatch, GameRecord, GameStore, MemoryStore};
