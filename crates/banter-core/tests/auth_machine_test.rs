//! Behavior tests for the chat core.
//!
//! Walks the registration → room creation → join → post flows end to end at
//! the core level, with a seeded environment for reproducibility.

use std::sync::{Arc, Mutex};

use banter_core::{
    AuthStatus, CredentialRegistry, CredentialToken, Environment, Message, RoomStore, SECRET_LEN,
    authenticate,
};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

// Seeded environment for deterministic runs
#[derive(Clone)]
struct TestEnv {
    rng: Arc<Mutex<ChaCha20Rng>>,
}

impl TestEnv {
    fn with_seed(seed: u64) -> Self {
        Self { rng: Arc::new(Mutex::new(ChaCha20Rng::seed_from_u64(seed))) }
    }
}

impl Environment for TestEnv {
    fn random_bytes(&self, buffer: &mut [u8]) {
        self.rng.lock().unwrap().fill_bytes(buffer);
    }
}

/// The full two-user scenario: Alice registers, creates a room, posts; Bob
/// registers, joins via the shared secret, posts; history shows both in
/// order.
#[test]
fn alice_and_bob_share_a_room() {
    let env = TestEnv::with_seed(7);
    let registry = CredentialRegistry::new();
    let rooms = RoomStore::new();

    let alice = registry.register("Alice", &env);
    let room = rooms.create_room(alice.clone(), &env);
    assert_eq!(room.id(), 0);

    let secret = room.shared_secret().to_string();
    assert_eq!(secret.len(), SECRET_LEN);

    room.append_message(Message {
        display_name: registry.resolve(&alice).unwrap(),
        body: "hi".to_string(),
    });
    assert_eq!(
        room.snapshot(),
        vec![Message { display_name: "Alice".to_string(), body: "hi".to_string() }]
    );

    let bob = registry.register("Bob", &env);
    let outcome = authenticate(&rooms, &registry, room.id(), &bob, &secret);
    assert_eq!(outcome, AuthStatus::Success);
    assert!(room.is_member(&bob));

    room.append_message(Message {
        display_name: registry.resolve(&bob).unwrap(),
        body: "hey".to_string(),
    });
    assert_eq!(
        room.snapshot(),
        vec![
            Message { display_name: "Alice".to_string(), body: "hi".to_string() },
            Message { display_name: "Bob".to_string(), body: "hey".to_string() },
        ]
    );
}

/// Posting 31 distinct messages leaves exactly the last 30, oldest first,
/// with the first message evicted.
#[test]
fn thirty_one_posts_keep_the_last_thirty() {
    let env = TestEnv::with_seed(8);
    let registry = CredentialRegistry::new();
    let rooms = RoomStore::new();

    let alice = registry.register("Alice", &env);
    let room = rooms.create_room(alice, &env);

    for i in 0..31 {
        room.append_message(Message {
            display_name: "Alice".to_string(),
            body: format!("message {i}"),
        });
    }

    let snapshot = room.snapshot();
    assert_eq!(snapshot.len(), 30);
    assert!(snapshot.iter().all(|m| m.body != "message 0"));
    assert_eq!(snapshot[0].body, "message 1");
    assert_eq!(snapshot[29].body, "message 30");
}

/// A visitor with the correct secret but no credential gets Pending, then
/// Success after registering; membership changes only on the second call.
#[test]
fn pending_then_register_then_success() {
    let env = TestEnv::with_seed(9);
    let registry = CredentialRegistry::new();
    let rooms = RoomStore::new();

    let alice = registry.register("Alice", &env);
    let room = rooms.create_room(alice, &env);
    let secret = room.shared_secret().to_string();

    let visitor = CredentialToken::from_optional(None);
    assert_eq!(authenticate(&rooms, &registry, room.id(), &visitor, &secret), AuthStatus::Pending);
    assert_eq!(room.member_count(), 1);

    let bob = registry.register("Bob", &env);
    assert_eq!(authenticate(&rooms, &registry, room.id(), &bob, &secret), AuthStatus::Success);
    assert_eq!(room.member_count(), 2);
}

/// Repeated authentication of an authorized member never flips the outcome
/// and never shrinks the member set, whatever secret is supplied.
#[test]
fn success_is_idempotent_for_members() {
    let env = TestEnv::with_seed(10);
    let registry = CredentialRegistry::new();
    let rooms = RoomStore::new();

    let alice = registry.register("Alice", &env);
    let bob = registry.register("Bob", &env);
    let room = rooms.create_room(alice, &env);
    let secret = room.shared_secret().to_string();

    assert_eq!(authenticate(&rooms, &registry, room.id(), &bob, &secret), AuthStatus::Success);

    for supplied in [secret.as_str(), "wrong", "", "null"] {
        assert_eq!(
            authenticate(&rooms, &registry, room.id(), &bob, supplied),
            AuthStatus::Success
        );
        assert_eq!(room.member_count(), 2);
    }
}

/// A display name rename model: history stores names by value, so a
/// message's name stays what it was at post time. (Names are immutable
/// here, so two registrations stand in for a rename.)
#[test]
fn history_keeps_post_time_display_names() {
    let env = TestEnv::with_seed(11);
    let registry = CredentialRegistry::new();
    let rooms = RoomStore::new();

    let old_alice = registry.register("Alice", &env);
    let room = rooms.create_room(old_alice.clone(), &env);

    room.append_message(Message {
        display_name: registry.resolve(&old_alice).unwrap(),
        body: "as Alice".to_string(),
    });

    // Same person registers again under a new name; old history is untouched.
    let new_alice = registry.register("Alicia", &env);
    room.add_member(new_alice.clone());
    room.append_message(Message {
        display_name: registry.resolve(&new_alice).unwrap(),
        body: "as Alicia".to_string(),
    });

    let snapshot = room.snapshot();
    assert_eq!(snapshot[0].display_name, "Alice");
    assert_eq!(snapshot[1].display_name, "Alicia");
}
