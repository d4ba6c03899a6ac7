//! Production Environment implementation using the OS RNG.
//!
//! `SystemEnv` backs credential-token and room-secret generation with
//! getrandom (e.g. /dev/urandom on Linux, `BCryptGenRandom` on Windows).
//! Production randomness is not reproducible; tests use seeded
//! environments instead.
//!
//! # Panics
//!
//! Panics if the OS RNG fails. This is intentional: a server that cannot
//! draw secure randomness would issue guessable credentials and room
//! secrets. RNG failure indicates OS-level trouble and is not worth
//! limping through.

use banter_core::Environment;

/// Production environment using OS cryptographic randomness.
#[derive(Clone, Default)]
pub struct SystemEnv;

impl SystemEnv {
    /// Create a new system environment.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Environment for SystemEnv {
    #[allow(clippy::expect_used)]
    fn random_bytes(&self, buffer: &mut [u8]) {
        getrandom::fill(buffer)
            .expect("invariant: OS RNG failure is unrecoverable - tokens would be guessable");
    }
}
