//! Authentication state machine.
//!
//! Decides, for a room id, a credential token, and an optional shared
//! secret, whether access is granted (`Success`), denied (`Fail`), or the
//! caller should register first (`Pending`). On secret-based success the
//! credential is added to the room's authorized members.
//!
//! The decision order below is policy, not an optimization: the
//! unknown-room check runs before any secret comparison so callers cannot
//! probe room existence or secret validity, and the membership check runs
//! before the secret comparison so an authorized member is never locked out
//! by a stale or garbled secret.
//!
//! Every outcome is a reported value; the machine never panics or errors on
//! bad input.

use banter_proto::AuthStatus;

use crate::{
    credential::{CredentialRegistry, CredentialToken},
    room::{RoomId, RoomStore},
};

/// Run the authentication state machine against one room.
///
/// First match wins:
///
/// 1. Unknown `room_id` → [`AuthStatus::Fail`].
/// 2. `token` already an authorized member → [`AuthStatus::Success`],
///    whatever the supplied secret says.
/// 3. Unregistered token with the correct secret → [`AuthStatus::Pending`];
///    membership is not touched.
/// 4. Registered token with the correct secret → [`AuthStatus::Success`],
///    and the token joins `authorized_members`.
/// 5. Anything else → [`AuthStatus::Fail`].
pub fn authenticate(
    rooms: &RoomStore,
    registry: &CredentialRegistry,
    room_id: RoomId,
    token: &CredentialToken,
    supplied_secret: &str,
) -> AuthStatus {
    let Some(room) = rooms.get(room_id) else {
        tracing::debug!(room_id, "authenticate: unknown room");
        return AuthStatus::Fail;
    };

    // Members only ever accumulate, so a positive check here stays true.
    if room.is_member(token) {
        tracing::debug!(room_id, token = %token, "authenticate: already a member");
        return AuthStatus::Success;
    }

    let secret_valid = supplied_secret == room.shared_secret();
    let credential_valid = registry.is_valid(token);

    match (credential_valid, secret_valid) {
        (false, true) => {
            tracing::debug!(room_id, "authenticate: pending registration");
            AuthStatus::Pending
        },
        (true, true) => {
            // Idempotent set-insert under the room's lock; concurrent joins
            // of different credentials both land.
            room.add_member(token.clone());
            tracing::debug!(room_id, token = %token, "authenticate: member added");
            AuthStatus::Success
        },
        (_, false) => {
            tracing::debug!(room_id, "authenticate: denied");
            AuthStatus::Fail
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::SeededEnv;

    struct Fixture {
        env: SeededEnv,
        rooms: RoomStore,
        registry: CredentialRegistry,
    }

    impl Fixture {
        fn new(seed: u64) -> Self {
            Self {
                env: SeededEnv::with_seed(seed),
                rooms: RoomStore::new(),
                registry: CredentialRegistry::new(),
            }
        }
    }

    #[test]
    fn unknown_room_fails_for_any_input() {
        let f = Fixture::new(1);
        let token = f.registry.register("Alice", &f.env);

        let outcome = authenticate(&f.rooms, &f.registry, 42, &token, "whatever");

        assert_eq!(outcome, AuthStatus::Fail);
    }

    #[test]
    fn member_passes_with_wrong_or_empty_secret() {
        let f = Fixture::new(2);
        let creator = f.registry.register("Alice", &f.env);
        let room = f.rooms.create_room(creator.clone(), &f.env);

        assert_eq!(
            authenticate(&f.rooms, &f.registry, room.id(), &creator, "wrong"),
            AuthStatus::Success
        );
        assert_eq!(
            authenticate(&f.rooms, &f.registry, room.id(), &creator, ""),
            AuthStatus::Success
        );
    }

    #[test]
    fn unregistered_token_with_correct_secret_is_pending() {
        let f = Fixture::new(3);
        let creator = f.registry.register("Alice", &f.env);
        let room = f.rooms.create_room(creator, &f.env);
        let stranger = CredentialToken::new("null");

        let secret = room.shared_secret().to_string();
        let outcome = authenticate(&f.rooms, &f.registry, room.id(), &stranger, &secret);

        assert_eq!(outcome, AuthStatus::Pending);
        assert_eq!(room.member_count(), 1);
    }

    #[test]
    fn registered_token_with_correct_secret_joins() {
        let f = Fixture::new(4);
        let creator = f.registry.register("Alice", &f.env);
        let joiner = f.registry.register("Bob", &f.env);
        let room = f.rooms.create_room(creator, &f.env);

        let secret = room.shared_secret().to_string();
        let outcome = authenticate(&f.rooms, &f.registry, room.id(), &joiner, &secret);

        assert_eq!(outcome, AuthStatus::Success);
        assert!(room.is_member(&joiner));
        assert_eq!(room.member_count(), 2);
    }

    #[test]
    fn wrong_secret_fails_for_registered_nonmember() {
        let f = Fixture::new(5);
        let creator = f.registry.register("Alice", &f.env);
        let outsider = f.registry.register("Mallory", &f.env);
        let room = f.rooms.create_room(creator, &f.env);

        let outcome = authenticate(&f.rooms, &f.registry, room.id(), &outsider, "guess");

        assert_eq!(outcome, AuthStatus::Fail);
        assert!(!room.is_member(&outsider));
    }

    #[test]
    fn wrong_secret_fails_for_unregistered_caller() {
        let f = Fixture::new(6);
        let creator = f.registry.register("Alice", &f.env);
        let room = f.rooms.create_room(creator, &f.env);

        let outcome =
            authenticate(&f.rooms, &f.registry, room.id(), &CredentialToken::new(""), "guess");

        assert_eq!(outcome, AuthStatus::Fail);
    }
}
