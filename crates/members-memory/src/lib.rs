//! In-memory (single node) implementation of a member source for local development and tests.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod error;

pub use error::Error;

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use fleet_members::{Member, MemberSource};
use serde::Deserialize;
use tokio::sync::RwLock;

/// On-disk description of a fleet.
#[derive(Debug, Deserialize)]
struct FleetFile {
    #[serde(default)]
    members: Vec<Member>,
}

/// In-memory member source. Clones share the same underlying fleet.
#[derive(Clone, Debug, Default)]
pub struct MemoryMemberSource {
    members: Arc<RwLock<Vec<Member>>>,
}

impl MemoryMemberSource {
    /// Creates a source holding the given members, in order.
    #[must_use]
    pub fn new(members: Vec<Member>) -> Self {
        Self {
            members: Arc::new(RwLock::new(members)),
        }
    }

    /// Creates a source from a JSON fleet file of the form `{"members": [...]}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid JSON.
    pub fn from_fleet_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::FleetFile(format!("Failed to read fleet file: {e}")))?;

        let fleet: FleetFile = serde_json::from_str(&content)
            .map_err(|e| Error::FleetFile(format!("Failed to parse fleet file: {e}")))?;

        Ok(Self::new(fleet.members))
    }

    /// Inserts a member, replacing any member with the same name in place.
    pub async fn upsert(&self, member: Member) {
        let mut members = self.members.write().await;

        match members.iter_mut().find(|m| m.name == member.name) {
            Some(existing) => *existing = member,
            None => members.push(member),
        }
    }

    /// Removes the named member.
    ///
    /// # Errors
    ///
    /// Returns an error if no member has that name.
    pub async fn remove(&self, name: &str) -> Result<Member, Error> {
        let mut members = self.members.write().await;

        let index = members
            .iter()
            .position(|m| m.name == name)
            .ok_or_else(|| Error::MemberNotFound(name.to_string()))?;

        Ok(members.remove(index))
    }
}

#[async_trait]
impl MemberSource for MemoryMemberSource {
    type Error = Error;

    async fn list(&self) -> Result<Vec<Member>, Self::Error> {
        Ok(self.members.read().await.clone())
    }
}
