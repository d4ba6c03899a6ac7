//! Room store: room identities, shared secrets, members, and history.
//!
//! Rooms must be explicitly created; there is no lazy creation. Ids are
//! dense and sequential (a room's id equals the number of rooms created
//! before it), assigned under the store's write lock. Rooms are never
//! deleted, so an id stays valid for the life of the process.
//!
//! Each room carries its own mutex over the mutable parts (member set and
//! message buffer); the shared secret and id are fixed at creation and
//! readable without locking.

use std::{
    collections::HashSet,
    sync::{Arc, Mutex, RwLock},
};

use banter_proto::Message;

use crate::{credential::CredentialToken, env::Environment, history::MessageHistory};

/// Room identifier. Dense: `id ==` number of rooms created before it.
pub type RoomId = u64;

/// Length of a room's shared secret.
pub const SECRET_LEN: usize = 40;

/// Shared secrets draw uniformly from lowercase letters and digits.
const SECRET_ALPHABET: &[u8; 36] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// One chat room.
///
/// The member set only ever grows: the creator is a member from birth, and
/// the authentication machine adds joiners. Nothing removes members.
///
/// Lock poisoning panics; it requires a panic elsewhere first, and no room
/// operation panics while holding the lock.
#[derive(Debug)]
pub struct Room {
    id: RoomId,
    shared_secret: String,
    state: Mutex<RoomState>,
}

#[derive(Debug)]
struct RoomState {
    members: HashSet<CredentialToken>,
    history: MessageHistory,
}

impl Room {
    fn new<E: Environment>(id: RoomId, creator: CredentialToken, env: &E) -> Self {
        let mut members = HashSet::new();
        members.insert(creator);

        Self {
            id,
            shared_secret: generate_secret(env),
            state: Mutex::new(RoomState { members, history: MessageHistory::new() }),
        }
    }

    /// Room identifier.
    pub fn id(&self) -> RoomId {
        self.id
    }

    /// The room's shared secret, fixed for its lifetime.
    pub fn shared_secret(&self) -> &str {
        &self.shared_secret
    }

    /// Check whether a token is an authorized member.
    #[allow(clippy::expect_used)]
    pub fn is_member(&self, token: &CredentialToken) -> bool {
        self.state.lock().expect("Mutex poisoned").members.contains(token)
    }

    /// Add a token to the member set.
    ///
    /// Atomic set-insert under the room's lock, so two concurrent joins
    /// both land. Idempotent: returns `false` when the token was already a
    /// member.
    #[allow(clippy::expect_used)]
    pub fn add_member(&self, token: CredentialToken) -> bool {
        self.state.lock().expect("Mutex poisoned").members.insert(token)
    }

    /// Number of authorized members.
    #[allow(clippy::expect_used)]
    pub fn member_count(&self) -> usize {
        self.state.lock().expect("Mutex poisoned").members.len()
    }

    /// Append a message to the room's bounded history.
    #[allow(clippy::expect_used)]
    pub fn append_message(&self, message: Message) {
        self.state.lock().expect("Mutex poisoned").history.append(message);
    }

    /// Consistent copy of the room's history, oldest first.
    ///
    /// Taken under the room's lock: a snapshot never contains a torn or
    /// partial message record, regardless of concurrent appends.
    #[allow(clippy::expect_used)]
    pub fn snapshot(&self) -> Vec<Message> {
        self.state.lock().expect("Mutex poisoned").history.snapshot()
    }
}

/// Store of all rooms, indexed by dense id.
///
/// Cloning is cheap and shares the underlying store. Creation takes the
/// write lock (id assignment must not race); lookup takes the read lock and
/// hands out an `Arc` handle, so room operations proceed without holding
/// the store lock.
#[derive(Debug, Clone, Default)]
pub struct RoomStore {
    rooms: Arc<RwLock<Vec<Arc<Room>>>>,
}

impl RoomStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a room with the given creator as its first authorized member.
    ///
    /// Callers are responsible for validating the creator's credential
    /// beforehand; the authentication machine is bypassed at creation since
    /// the creator is trivially authorized.
    #[allow(clippy::expect_used)]
    pub fn create_room<E: Environment>(&self, creator: CredentialToken, env: &E) -> Arc<Room> {
        let mut rooms = self.rooms.write().expect("RwLock poisoned");

        // Rooms are never removed, so the current length is the next dense id.
        let id = rooms.len() as RoomId;
        let room = Arc::new(Room::new(id, creator, env));
        rooms.push(Arc::clone(&room));

        tracing::debug!(room_id = id, "room created");

        room
    }

    /// Look up a room by id. `None` if no such room exists.
    #[allow(clippy::expect_used)]
    pub fn get(&self, id: RoomId) -> Option<Arc<Room>> {
        self.rooms.read().expect("RwLock poisoned").get(id as usize).cloned()
    }

    /// Number of rooms created so far.
    #[allow(clippy::expect_used)]
    pub fn room_count(&self) -> usize {
        self.rooms.read().expect("RwLock poisoned").len()
    }
}

/// Generate a room secret: [`SECRET_LEN`] characters drawn uniformly from
/// [`SECRET_ALPHABET`].
fn generate_secret<E: Environment>(env: &E) -> String {
    // 252 is the largest multiple of 36 that fits in a byte; higher draws
    // would bias the distribution and are rejected.
    const REJECT_FROM: u8 = 252;

    let mut secret = String::with_capacity(SECRET_LEN);
    let mut buf = [0u8; 64];

    while secret.len() < SECRET_LEN {
        env.random_bytes(&mut buf);
        for &byte in &buf {
            if secret.len() == SECRET_LEN {
                break;
            }
            if byte < REJECT_FROM {
                secret.push(SECRET_ALPHABET[(byte % 36) as usize] as char);
            }
        }
    }

    secret
}
