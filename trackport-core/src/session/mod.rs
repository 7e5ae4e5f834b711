//! Device session: bring-up, PS/2++ negotiation and link health
//!
//! The session is explicit and finite. Any failure lands in
//! [`SessionState::Desynchronized`]; the main loop recovers by running the
//! full bring-up again.

pub mod events;
pub mod handshake;
pub mod state;

pub use events::SessionEvent;
pub use handshake::Session;
pub use state::SessionState;
