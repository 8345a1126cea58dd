use std::sync::Arc;
use tracing::{debug, info};

use super::error::PlayerError;
use super::filter::{PlayerFilter, PlayerQuery};
use super::paging::PageRequest;
use super::types::{Player, PlayerId};
use super::validation::{Mode, PlayerFields};
use crate::store::PlayerStore;

/// Player CRUD operations over a store
#[derive(Clone)]
pub struct PlayerService {
    store: Arc<dyn PlayerStore>,
}

impl PlayerService {
    pub fn new(store: Arc<dyn PlayerStore>) -> Self {
        Self { store }
    }

    /// One page of players matching the query filters
    pub async fn list(&self, query: &PlayerQuery) -> Result<Vec<Player>, PlayerError> {
        let filter = PlayerFilter::from_query(query)?;
        let page = PageRequest::from_query(query)?;
        debug!(
            "Listing players: {} conditions, page {} of size {} by {}",
            filter.conditions().len(),
            page.number,
            page.size,
            page.order.field_name()
        );
        Ok(self.store.query(&filter, &page).await?)
    }

    /// Number of players matching the query filters, ignoring paging
    pub async fn count(&self, query: &PlayerQuery) -> Result<u64, PlayerError> {
        let filter = PlayerFilter::from_query(query)?;
        Ok(self.store.count(&filter).await?)
    }

    pub async fn get(&self, id: &str) -> Result<Player, PlayerError> {
        let id = parse_id(id)?;
        self.store
            .find_by_id(id)
            .await?
            .ok_or(PlayerError::NotFound(id))
    }

    pub async fn delete(&self, id: &str) -> Result<(), PlayerError> {
        let player = self.get(id).await?;
        self.store.delete(&player).await?;
        info!("Deleted player {:?}", player.id);
        Ok(())
    }

    pub async fn create(&self, fields: &PlayerFields) -> Result<Player, PlayerError> {
        let player = fields.validate(Mode::Create)?.into_new_player()?;
        let saved = self.store.save(player).await?;
        info!("Created player {:?} ({})", saved.id, saved.name);
        Ok(saved)
    }

    /// Apply the supplied fields to an existing player. All fields are
    /// validated before any of them is written.
    pub async fn update(&self, id: &str, fields: &PlayerFields) -> Result<Player, PlayerError> {
        let mut player = self.get(id).await?;
        if !fields.is_empty() {
            fields.validate(Mode::Update)?.apply_to(&mut player);
        }
        let saved = self.store.save(player).await?;
        info!("Updated player {:?}", saved.id);
        Ok(saved)
    }
}

/// Ids are positive integers
fn parse_id(raw: &str) -> Result<PlayerId, PlayerError> {
    match raw.parse::<PlayerId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(PlayerError::invalid("id")),
    }
}
