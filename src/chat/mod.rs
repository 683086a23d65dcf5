//! Chat Module
//!
//! Chat rooms and messages: a room has many participants (many-to-many
//! with users) and many messages, each owned by its sender.
//!
//! Rooms are visible only to their participants; creating a room adds the
//! creator as its first participant. Posting to a room requires
//! membership.

/// Database operations for rooms and messages
pub mod db;

/// HTTP handlers
pub mod handlers;

pub use handlers::{create_message, create_room, list_messages, list_rooms};
