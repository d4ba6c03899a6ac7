//! Connected client performing request/response round trips.

use banter_proto::{
    AuthStatus, Message, Request, Response, decode_response, encode_request,
};
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    net::{
        TcpStream, ToSocketAddrs,
        tcp::{OwnedReadHalf, OwnedWriteHalf},
    },
};

use crate::error::ClientError;

/// Outcome of a room creation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateRoomOutcome {
    /// Room created; the creator is its first authorized member.
    Created {
        /// Identifier of the new room.
        room_id: u64,
        /// The room's shared secret, for building invite links.
        shared_secret: String,
    },

    /// The supplied token was invalid; register first, then retry.
    RedirectToRegister,
}

/// A connected chat client.
///
/// Requests are strictly sequential on one connection: each helper sends a
/// line and waits for the matching reply line.
pub struct Client {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

impl Client {
    /// Connect to a banter server.
    pub async fn connect(addr: impl ToSocketAddrs) -> Result<Self, ClientError> {
        let stream = TcpStream::connect(addr).await?;
        let (read_half, write_half) = stream.into_split();

        tracing::debug!("connected");

        Ok(Self { reader: BufReader::new(read_half), writer: write_half })
    }

    /// Perform one raw request/response round trip.
    pub async fn request(&mut self, request: &Request) -> Result<Response, ClientError> {
        let mut line = encode_request(request)?;
        line.push('\n');
        self.writer.write_all(line.as_bytes()).await?;

        let mut reply = String::new();
        let read = self.reader.read_line(&mut reply).await?;
        if read == 0 {
            return Err(ClientError::Disconnected);
        }

        Ok(decode_response(&reply)?)
    }

    /// Register a display name; returns the issued credential token.
    pub async fn register(&mut self, display_name: &str) -> Result<String, ClientError> {
        let request = Request::Register { display_name: display_name.to_string() };

        match self.request(&request).await? {
            Response::Registered { token } => Ok(token),
            Response::Error { reason } => Err(ClientError::Server(reason)),
            _ => Err(ClientError::UnexpectedReply { operation: "register" }),
        }
    }

    /// Create a room owned by `token`.
    pub async fn create_room(&mut self, token: &str) -> Result<CreateRoomOutcome, ClientError> {
        let request = Request::CreateRoom { token: token.to_string() };

        match self.request(&request).await? {
            Response::RoomCreated { room_id, shared_secret } => {
                Ok(CreateRoomOutcome::Created { room_id, shared_secret })
            },
            Response::RedirectToRegister => Ok(CreateRoomOutcome::RedirectToRegister),
            Response::Error { reason } => Err(ClientError::Server(reason)),
            _ => Err(ClientError::UnexpectedReply { operation: "create_room" }),
        }
    }

    /// Fetch a room's history, oldest first. An empty vec means the room
    /// exists but holds no messages yet.
    pub async fn fetch_messages(&mut self, room_id: u64) -> Result<Vec<Message>, ClientError> {
        match self.request(&Request::FetchMessages { room_id }).await? {
            Response::Messages { messages } => Ok(messages),
            Response::NoMessages => Ok(Vec::new()),
            Response::Error { reason } => Err(ClientError::Server(reason)),
            _ => Err(ClientError::UnexpectedReply { operation: "fetch_messages" }),
        }
    }

    /// Post a message to a room.
    pub async fn post_message(
        &mut self,
        room_id: u64,
        token: &str,
        body: &str,
    ) -> Result<(), ClientError> {
        let request = Request::PostMessage {
            room_id,
            token: token.to_string(),
            body: body.to_string(),
        };

        match self.request(&request).await? {
            Response::Posted => Ok(()),
            Response::Error { reason } => Err(ClientError::Server(reason)),
            _ => Err(ClientError::UnexpectedReply { operation: "post_message" }),
        }
    }

    /// Run the authentication state machine against a room.
    pub async fn authenticate(
        &mut self,
        room_id: u64,
        token: Option<&str>,
        secret: Option<&str>,
    ) -> Result<AuthStatus, ClientError> {
        let request = Request::Authenticate {
            room_id,
            token: token.map(str::to_string),
            secret: secret.map(str::to_string),
        };

        match self.request(&request).await? {
            Response::Auth { outcome } => Ok(outcome),
            Response::Error { reason } => Err(ClientError::Server(reason)),
            _ => Err(ClientError::UnexpectedReply { operation: "authenticate" }),
        }
    }
}
