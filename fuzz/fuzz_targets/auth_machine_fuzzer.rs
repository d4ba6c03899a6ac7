//! Fuzz target for the authentication state machine.
//!
//! Replays an arbitrary sequence of authentication attempts and checks
//! every outcome against an oracle recomputation of the decision policy.
//!
//! # Strategy
//!
//! - Registered and unregistered callers, plus the "null"/empty sentinels
//! - Correct, wrong, and empty secrets
//! - Valid and fabricated room ids
//!
//! # Invariants
//!
//! - The outcome always matches the documented policy order
//! - Membership only ever grows, and only on (valid credential, valid
//!   secret) attempts
//! - The machine never panics

#![no_main]

use arbitrary::Arbitrary;
use banter_core::{
    AuthStatus, CredentialRegistry, CredentialToken, Environment, RoomStore, authenticate,
};
use libfuzzer_sys::fuzz_target;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
struct FuzzEnv {
    rng: Arc<Mutex<ChaCha20Rng>>,
}

impl Environment for FuzzEnv {
    fn random_bytes(&self, buffer: &mut [u8]) {
        self.rng.lock().unwrap().fill_bytes(buffer);
    }
}

#[derive(Debug, Clone, Arbitrary)]
enum CallerChoice {
    Registered(u8),
    Unregistered,
    Sentinel,
}

#[derive(Debug, Clone, Arbitrary)]
enum SecretChoice {
    Correct,
    Wrong(String),
    Empty,
}

#[derive(Debug, Clone, Arbitrary)]
struct Attempt {
    caller: CallerChoice,
    secret: SecretChoice,
    fabricated_room: Option<u64>,
}

#[derive(Debug, Arbitrary)]
struct Scenario {
    seed: u64,
    attempts: Vec<Attempt>,
}

fuzz_target!(|scenario: Scenario| {
    let env = FuzzEnv { rng: Arc::new(Mutex::new(ChaCha20Rng::seed_from_u64(scenario.seed))) };
    let rooms = RoomStore::new();
    let registry = CredentialRegistry::new();

    let creator = registry.register("creator", &env);
    let room = rooms.create_room(creator, &env);
    let correct_secret = room.shared_secret().to_string();

    let registered: Vec<CredentialToken> =
        (0..4).map(|i| registry.register(&format!("user{i}"), &env)).collect();

    for attempt in scenario.attempts {
        let token = match &attempt.caller {
            CallerChoice::Registered(i) => registered[*i as usize % registered.len()].clone(),
            CallerChoice::Unregistered => CredentialToken::new("0000ffff0000ffff"),
            CallerChoice::Sentinel => CredentialToken::new("null"),
        };

        let supplied = match &attempt.secret {
            SecretChoice::Correct => correct_secret.clone(),
            SecretChoice::Wrong(s) => s.clone(),
            SecretChoice::Empty => String::new(),
        };

        let room_id = attempt.fabricated_room.map_or(room.id(), |id| id.max(1));

        // Oracle: recompute the policy from observable state before the call
        let expected = if rooms.get(room_id).is_none() {
            AuthStatus::Fail
        } else if room.is_member(&token) {
            AuthStatus::Success
        } else {
            let secret_valid = supplied == correct_secret;
            let credential_valid = registry.is_valid(&token);
            match (credential_valid, secret_valid) {
                (false, true) => AuthStatus::Pending,
                (true, true) => AuthStatus::Success,
                (_, false) => AuthStatus::Fail,
            }
        };

        let members_before = room.member_count();
        let outcome = authenticate(&rooms, &registry, room_id, &token, &supplied);

        assert_eq!(outcome, expected);
        assert!(room.member_count() >= members_before, "membership shrank");
    }
});
