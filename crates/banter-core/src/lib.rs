//! Core state for the banter chat service.
//!
//! Four components, leaves first:
//!
//! - [`CredentialRegistry`]: credential token → display name; issues tokens
//!   on registration.
//! - [`RoomStore`]: room id → room state; issues dense sequential ids.
//! - [`MessageHistory`]: bounded FIFO of the most recent messages per room.
//! - [`authenticate`]: the state machine deciding whether a credential plus
//!   an optional shared secret grants room access, adding the credential to
//!   the member set on secret-based success.
//!
//! All state is in-memory and process-lifetime: credentials and rooms are
//! never deleted, and nothing survives a restart. Each component carries its
//! own lock (shared-read/exclusive-write for the two top-level maps, one
//! mutex per room), so concurrent request handlers share a set of cloned
//! handles rather than a global.
//!
//! Randomness (token and secret generation) goes through the
//! [`env::Environment`] trait so tests can run seeded and production can use
//! the OS RNG.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod auth;
pub mod credential;
pub mod env;
pub mod error;
pub mod history;
pub mod room;

pub use auth::authenticate;
pub use banter_proto::{AuthStatus, Message};
pub use credential::{CredentialRegistry, CredentialToken};
pub use env::Environment;
pub use error::ChatError;
pub use history::{HISTORY_CAPACITY, MessageHistory};
pub use room::{Room, RoomId, RoomStore, SECRET_LEN};

#[cfg(test)]
pub(crate) mod test_support {
    //! Seeded environment for deterministic unit tests.

    use std::sync::{Arc, Mutex};

    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    use crate::env::Environment;

    /// Deterministic environment backed by a seeded ChaCha RNG.
    #[derive(Clone)]
    pub struct SeededEnv {
        rng: Arc<Mutex<ChaCha20Rng>>,
    }

    impl SeededEnv {
        pub fn with_seed(seed: u64) -> Self {
            Self { rng: Arc::new(Mutex::new(ChaCha20Rng::seed_from_u64(seed))) }
        }
    }

    impl Environment for SeededEnv {
        #[allow(clippy::unwrap_used)]
        fn random_bytes(&self, buffer: &mut [u8]) {
            self.rng.lock().unwrap().fill_bytes(buffer);
        }
    }
}
