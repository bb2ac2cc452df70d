//! Connection management for the adventure relay.
//!
//! Tracks connected editors and which adventure rooms they have joined.

use std::collections::{HashMap, HashSet};

use dashmap::DashMap;
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

use advforge_shared::RelayServerMessage;

/// Information about a connected editor.
#[derive(Debug, Clone)]
pub struct ConnectionInfo {
    /// Unique ID for this connection
    pub connection_id: Uuid,
    /// Shown to the other members of a room
    pub user_id: String,
}

/// Manages all active relay connections.
pub struct ConnectionManager {
    /// Map of connection_id -> (ConnectionInfo, sender channel)
    connections: RwLock<HashMap<Uuid, (ConnectionInfo, mpsc::Sender<RelayServerMessage>)>>,
    /// Adventure id -> members
    rooms: DashMap<String, HashSet<Uuid>>,
}

pub type SharedConnectionManager = std::sync::Arc<ConnectionManager>;

impl ConnectionManager {
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
            rooms: DashMap::new(),
        }
    }

    /// Register a new connection.
    pub async fn register(
        &self,
        connection_id: Uuid,
        user_id: String,
        sender: mpsc::Sender<RelayServerMessage>,
    ) {
        let info = ConnectionInfo {
            connection_id,
            user_id,
        };
        let mut connections = self.connections.write().await;
        connections.insert(connection_id, (info, sender));
        tracing::debug!(connection_id = %connection_id, "Connection registered");
    }

    /// Unregister a connection and drop it from every room.
    pub async fn unregister(&self, connection_id: Uuid) {
        let mut connections = self.connections.write().await;
        if connections.remove(&connection_id).is_some() {
            tracing::debug!(connection_id = %connection_id, "Connection unregistered");
        }
        drop(connections);

        self.rooms.retain(|_, members| {
            members.remove(&connection_id);
            !members.is_empty()
        });
    }

    pub async fn get(&self, connection_id: Uuid) -> Option<ConnectionInfo> {
        let connections = self.connections.read().await;
        connections.get(&connection_id).map(|(info, _)| info.clone())
    }

    pub async fn join_adventure(
        &self,
        connection_id: Uuid,
        adventure_id: &str,
    ) -> Result<(), ConnectionError> {
        if !self.connections.read().await.contains_key(&connection_id) {
            return Err(ConnectionError::NotFound);
        }
        self.rooms
            .entry(adventure_id.to_string())
            .or_default()
            .insert(connection_id);
        tracing::info!(
            connection_id = %connection_id,
            adventure_id = %adventure_id,
            "Connection joined adventure"
        );
        Ok(())
    }

    pub fn leave_adventure(&self, connection_id: Uuid, adventure_id: &str) {
        let left = self
            .rooms
            .get_mut(adventure_id)
            .map(|mut members| members.remove(&connection_id))
            .unwrap_or(false);
        self.rooms
            .remove_if(adventure_id, |_, members| members.is_empty());
        if left {
            tracing::info!(
                connection_id = %connection_id,
                adventure_id = %adventure_id,
                "Connection left adventure"
            );
        }
    }

    /// Members of an adventure room.
    pub fn members(&self, adventure_id: &str) -> Vec<Uuid> {
        self.rooms
            .get(adventure_id)
            .map(|members| members.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Send to every member of a room except `sender`. The sender does not
    /// need to be a member itself.
    pub async fn broadcast_to_adventure(
        &self,
        adventure_id: &str,
        sender: Uuid,
        message: RelayServerMessage,
    ) {
        let members = self.members(adventure_id);
        let connections = self.connections.read().await;
        for member in members.into_iter().filter(|m| *m != sender) {
            let Some((info, tx)) = connections.get(&member) else {
                continue;
            };
            if let Err(e) = tx.try_send(message.clone()) {
                tracing::warn!(
                    connection_id = %info.connection_id,
                    error = %e,
                    "Failed to relay message"
                );
            }
        }
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur during connection operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConnectionError {
    #[error("Connection not found")]
    NotFound,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(user: &str) -> RelayServerMessage {
        RelayServerMessage::CursorPosition {
            position: serde_json::json!(4),
            user_id: user.into(),
            user_name: "Anonymous".into(),
        }
    }

    async fn connect(
        manager: &ConnectionManager,
    ) -> (Uuid, mpsc::Receiver<RelayServerMessage>) {
        let id = Uuid::new_v4();
        let (tx, rx) = mpsc::channel(8);
        manager.register(id, id.to_string(), tx).await;
        (id, rx)
    }

    #[tokio::test]
    async fn broadcast_skips_the_sender_and_other_rooms() {
        let manager = ConnectionManager::new();
        let (a, mut rx_a) = connect(&manager).await;
        let (b, mut rx_b) = connect(&manager).await;
        let (c, mut rx_c) = connect(&manager).await;

        manager.join_adventure(a, "keep").await.unwrap();
        manager.join_adventure(b, "keep").await.unwrap();
        manager.join_adventure(c, "tower").await.unwrap();

        manager
            .broadcast_to_adventure("keep", a, cursor(&a.to_string()))
            .await;

        assert_eq!(rx_b.try_recv().unwrap(), cursor(&a.to_string()));
        assert!(rx_a.try_recv().is_err());
        assert!(rx_c.try_recv().is_err());
    }

    #[tokio::test]
    async fn leaving_and_disconnecting_empty_rooms() {
        let manager = ConnectionManager::new();
        let (a, _rx_a) = connect(&manager).await;
        let (b, _rx_b) = connect(&manager).await;
        manager.join_adventure(a, "keep").await.unwrap();
        manager.join_adventure(b, "keep").await.unwrap();

        manager.leave_adventure(a, "keep");
        assert_eq!(manager.members("keep"), vec![b]);

        manager.unregister(b).await;
        assert!(manager.members("keep").is_empty());
        assert!(manager.get(b).await.is_none());
    }

    #[tokio::test]
    async fn unknown_connection_cannot_join() {
        let manager = ConnectionManager::new();
        let result = manager.join_adventure(Uuid::new_v4(), "keep").await;
        assert!(matches!(result, Err(ConnectionError::NotFound)));
    }
}
