/**
 * Database Operations for Chat Rooms and Messages
 *
 * This module provides database operations for persisting chat rooms,
 * room membership, and messages.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// Chat room row as stored in the database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RoomRow {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Participant summary exposed in room and message responses
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ChatUser {
    pub id: i64,
    pub username: String,
    pub email: String,
}

/// Serialized message with its sender attached
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDetail {
    pub id: i64,
    pub room: i64,
    pub sender: ChatUser,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// Serialized room with participants and messages attached
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomDetail {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub participants: Vec<ChatUser>,
    pub messages: Vec<MessageDetail>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct MessageRowWithSender {
    id: i64,
    room_id: i64,
    content: String,
    timestamp: DateTime<Utc>,
    sender_id: i64,
    sender_username: String,
    sender_email: String,
}

impl From<MessageRowWithSender> for MessageDetail {
    fn from(row: MessageRowWithSender) -> Self {
        Self {
            id: row.id,
            room: row.room_id,
            sender: ChatUser {
                id: row.sender_id,
                username: row.sender_username,
                email: row.sender_email,
            },
            content: row.content,
            timestamp: row.timestamp,
        }
    }
}

/// Create a room and enroll the creator as its first participant
pub async fn create_room(
    pool: &SqlitePool,
    name: &str,
    creator_id: i64,
) -> Result<RoomRow, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let room = sqlx::query_as::<_, RoomRow>(
        r#"
        INSERT INTO chat_rooms (name, created_at)
        VALUES (?, ?)
        RETURNING id, name, created_at
        "#,
    )
    .bind(name)
    .bind(Utc::now())
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query("INSERT INTO chat_room_participants (room_id, user_id) VALUES (?, ?)")
        .bind(room.id)
        .bind(creator_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(room)
}

/// List rooms the user participates in
pub async fn list_rooms_for(pool: &SqlitePool, user_id: i64) -> Result<Vec<RoomRow>, sqlx::Error> {
    sqlx::query_as::<_, RoomRow>(
        r#"
        SELECT r.id, r.name, r.created_at
        FROM chat_rooms r
        JOIN chat_room_participants p ON p.room_id = r.id
        WHERE p.user_id = ?
        ORDER BY r.id ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Check room membership
pub async fn is_participant(
    pool: &SqlitePool,
    room_id: i64,
    user_id: i64,
) -> Result<bool, sqlx::Error> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM chat_room_participants WHERE room_id = ? AND user_id = ?",
    )
    .bind(room_id)
    .bind(user_id)
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}

/// Find a room the user participates in
pub async fn find_room_for(
    pool: &SqlitePool,
    room_id: i64,
    user_id: i64,
) -> Result<Option<RoomRow>, sqlx::Error> {
    sqlx::query_as::<_, RoomRow>(
        r#"
        SELECT r.id, r.name, r.created_at
        FROM chat_rooms r
        JOIN chat_room_participants p ON p.room_id = r.id
        WHERE r.id = ? AND p.user_id = ?
        "#,
    )
    .bind(room_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// List a room's participants
pub async fn room_participants(
    pool: &SqlitePool,
    room_id: i64,
) -> Result<Vec<ChatUser>, sqlx::Error> {
    sqlx::query_as::<_, ChatUser>(
        r#"
        SELECT u.id, u.username, u.email
        FROM users u
        JOIN chat_room_participants p ON p.user_id = u.id
        WHERE p.room_id = ?
        ORDER BY u.id ASC
        "#,
    )
    .bind(room_id)
    .fetch_all(pool)
    .await
}

/// List a room's messages, oldest first, with senders attached
pub async fn room_messages(
    pool: &SqlitePool,
    room_id: i64,
) -> Result<Vec<MessageDetail>, sqlx::Error> {
    let rows = sqlx::query_as::<_, MessageRowWithSender>(
        r#"
        SELECT m.id, m.room_id, m.content, m.timestamp,
               u.id AS sender_id, u.username AS sender_username, u.email AS sender_email
        FROM messages m
        JOIN users u ON u.id = m.sender_id
        WHERE m.room_id = ?
        ORDER BY m.id ASC
        "#,
    )
    .bind(room_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(MessageDetail::from).collect())
}

/// Insert a message into a room
pub async fn insert_message(
    pool: &SqlitePool,
    room_id: i64,
    sender: &ChatUser,
    content: &str,
) -> Result<MessageDetail, sqlx::Error> {
    #[derive(sqlx::FromRow)]
    struct InsertedMessage {
        id: i64,
        room_id: i64,
        content: String,
        timestamp: DateTime<Utc>,
    }

    let row = sqlx::query_as::<_, InsertedMessage>(
        r#"
        INSERT INTO messages (room_id, sender_id, content, timestamp)
        VALUES (?, ?, ?, ?)
        RETURNING id, room_id, content, timestamp
        "#,
    )
    .bind(room_id)
    .bind(sender.id)
    .bind(content)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(MessageDetail {
        id: row.id,
        room: row.room_id,
        sender: sender.clone(),
        content: row.content,
        timestamp: row.timestamp,
    })
}

/// Build the full room detail with participants and messages
pub async fn room_detail(pool: &SqlitePool, room: RoomRow) -> Result<RoomDetail, sqlx::Error> {
    let participants = room_participants(pool, room.id).await?;
    let messages = room_messages(pool, room.id).await?;

    Ok(RoomDetail {
        id: room.id,
        name: room.name,
        created_at: room.created_at,
        participants,
        messages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::users::create_user;
    use std::str::FromStr;

    async fn test_pool() -> SqlitePool {
        let options = sqlx::sqlite::SqliteConnectOptions::from_str("sqlite::memory:")
            .unwrap()
            .foreign_keys(true);
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .unwrap();
        sqlx::migrate!().run(&pool).await.unwrap();
        pool
    }

    async fn chat_user(pool: &SqlitePool, username: &str) -> ChatUser {
        let user = create_user(pool, username, &format!("{username}@example.com"), "hash")
            .await
            .unwrap();
        ChatUser {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }

    #[tokio::test]
    async fn test_creator_becomes_participant() {
        let pool = test_pool().await;
        let alice = chat_user(&pool, "alice").await;

        let room = create_room(&pool, "general", alice.id).await.unwrap();
        assert!(is_participant(&pool, room.id, alice.id).await.unwrap());

        let rooms = list_rooms_for(&pool, alice.id).await.unwrap();
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].name, "general");
    }

    #[tokio::test]
    async fn test_rooms_hidden_from_non_participants() {
        let pool = test_pool().await;
        let alice = chat_user(&pool, "alice").await;
        let bob = chat_user(&pool, "bob").await;

        create_room(&pool, "general", alice.id).await.unwrap();

        let rooms = list_rooms_for(&pool, bob.id).await.unwrap();
        assert!(rooms.is_empty());
    }

    #[tokio::test]
    async fn test_messages_ordered_with_sender() {
        let pool = test_pool().await;
        let alice = chat_user(&pool, "alice").await;
        let room = create_room(&pool, "general", alice.id).await.unwrap();

        insert_message(&pool, room.id, &alice, "first").await.unwrap();
        insert_message(&pool, room.id, &alice, "second").await.unwrap();

        let messages = room_messages(&pool, room.id).await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].content, "first");
        assert_eq!(messages[1].content, "second");
        assert_eq!(messages[0].sender.username, "alice");
    }

    #[tokio::test]
    async fn test_deleting_room_cascades_messages() {
        let pool = test_pool().await;
        let alice = chat_user(&pool, "alice").await;
        let room = create_room(&pool, "general", alice.id).await.unwrap();
        insert_message(&pool, room.id, &alice, "hello").await.unwrap();

        sqlx::query("DELETE FROM chat_rooms WHERE id = ?")
            .bind(room.id)
            .execute(&pool)
            .await
            .unwrap();

        let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM messages")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(remaining, 0);
    }
}
