//! Persistence for player records

mod memory;

pub use memory::MemoryStore;

use anyhow::Result;
use async_trait::async_trait;

use crate::players::{PageRequest, Player, PlayerFilter, PlayerId};

/// Id-keyed record storage with predicate queries.
///
/// Single-record operations are atomic; nothing spans more than one call.
#[async_trait]
pub trait PlayerStore: Send + Sync {
    async fn find_by_id(&self, id: PlayerId) -> Result<Option<Player>>;

    /// Insert when the player has no id yet, otherwise overwrite
    async fn save(&self, player: Player) -> Result<Player>;

    async fn delete(&self, player: &Player) -> Result<()>;

    /// One page of matching players, sorted by the page's order
    async fn query(&self, filter: &PlayerFilter, page: &PageRequest) -> Result<Vec<Player>>;

    async fn count(&self, filter: &PlayerFilter) -> Result<u64>;
}
