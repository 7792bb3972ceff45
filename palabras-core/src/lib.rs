//! Game logic for the Palabras spelling game.
//!
//! [`PalabrasGame`] owns the catalog, the points ledger and the current
//! session. The HTTP server drives it one request at a time and answers
//! `/api/speak` and listen with a single [`Utterance`](palabras_types::Utterance).
//!
//! Front ends that play audio themselves (a terminal or desktop adapter
//! talking to a local speech engine) take a [`SpeechQueue`] from
//! [`PalabrasGame::speech_queue`]. They feed it every speak request, poll it on
//! their own clock and run each [`SpeechCommand`] it yields, so rapid clicks
//! collapse into one cancel-then-speak.

pub mod catalog;
pub mod config;
pub mod error;
pub mod game;
pub mod game_events;
pub mod ledger;
pub mod milestones;
pub mod normalize;
pub mod session;
pub mod speech;
pub mod used_words;

// Re-export main components
pub use catalog::*;
pub use config::*;
pub use error::*;
pub use game::*;
pub use game_events::*;
pub use ledger::*;
pub use milestones::*;
pub use normalize::*;
pub use session::*;
pub use speech::*;
pub use used_words::*;
