use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use super::PlayerStore;
use crate::players::{validation, PageRequest, Player, PlayerFilter, PlayerId};

#[derive(Debug, Default)]
struct Inner {
    players: BTreeMap<PlayerId, Player>,
    next_id: PlayerId,
}

/// In-process player store
#[derive(Debug, Clone)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                players: BTreeMap::new(),
                next_id: 1,
            })),
        }
    }

    /// Load a JSON array of players. Every record is checked before any is
    /// stored, so a bad file loads nothing. Derived fields are recomputed and
    /// players without an id get one assigned.
    pub async fn load_seed<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        let content = tokio::fs::read_to_string(path.as_ref())
            .await
            .context(format!("Failed to read seed file: {:?}", path.as_ref()))?;

        let players: Vec<Player> =
            serde_json::from_str(&content).context("Failed to parse seed file")?;

        for (index, player) in players.iter().enumerate() {
            validation::check_record(player)
                .context(format!("Invalid seed player at index {}", index))?;
        }

        let count = players.len();
        for mut player in players {
            player.refresh_derived();
            self.save(player).await?;
        }

        info!("Seeded {} players from {:?}", count, path.as_ref());
        Ok(count)
    }
}

#[async_trait]
impl PlayerStore for MemoryStore {
    async fn find_by_id(&self, id: PlayerId) -> Result<Option<Player>> {
        let inner = self.inner.read().await;
        Ok(inner.players.get(&id).cloned())
    }

    async fn save(&self, mut player: Player) -> Result<Player> {
        let mut inner = self.inner.write().await;
        let id = match player.id {
            Some(id) => id,
            None => inner.next_id,
        };
        let after = id
            .checked_add(1)
            .ok_or_else(|| anyhow::anyhow!("Player id {} leaves no room for another", id))?;
        inner.next_id = inner.next_id.max(after);
        player.id = Some(id);
        inner.players.insert(id, player.clone());
        Ok(player)
    }

    async fn delete(&self, player: &Player) -> Result<()> {
        if let Some(id) = player.id {
            let mut inner = self.inner.write().await;
            inner.players.remove(&id);
        }
        Ok(())
    }

    async fn query(&self, filter: &PlayerFilter, page: &PageRequest) -> Result<Vec<Player>> {
        let inner = self.inner.read().await;
        let mut matching: Vec<&Player> =
            inner.players.values().filter(|p| filter.matches(p)).collect();
        matching.sort_by(|a, b| a.cmp_by(b, page.order));

        Ok(matching
            .into_iter()
            .skip(page.offset())
            .take(page.size)
            .cloned()
            .collect())
    }

    async fn count(&self, filter: &PlayerFilter) -> Result<u64> {
        let inner = self.inner.read().await;
        Ok(inner.players.values().filter(|p| filter.matches(p)).count() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::players::{Condition, PlayerOrder, Profession, Race};
    use chrono::{TimeZone, Utc};
    use std::io::Write;

    fn player(name: &str, exp: i32) -> Player {
        let mut p = Player {
            id: None,
            name: name.to_string(),
            title: "Ranger".to_string(),
            race: Race::Hobbit,
            profession: Profession::Rogue,
            experience: 0,
            level: 0,
            until_next_level: 0,
            birthday: Utc.with_ymd_and_hms(2020, 6, 1, 0, 0, 0).unwrap(),
            banned: false,
        };
        p.set_experience(exp);
        p
    }

    #[tokio::test]
    async fn test_save_assigns_increasing_ids() {
        let store = MemoryStore::new();
        let a = store.save(player("Frodo", 10)).await.unwrap();
        let b = store.save(player("Sam", 20)).await.unwrap();
        assert_eq!(a.id, Some(1));
        assert_eq!(b.id, Some(2));

        let mut renamed = a.clone();
        renamed.name = "Mr. Frodo".to_string();
        store.save(renamed).await.unwrap();
        let found = store.find_by_id(1).await.unwrap().unwrap();
        assert_eq!(found.name, "Mr. Frodo");
        assert_eq!(store.count(&PlayerFilter::all()).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let store = MemoryStore::new();
        let saved = store.save(player("Gollum", 5)).await.unwrap();
        store.delete(&saved).await.unwrap();
        assert!(store.find_by_id(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_query_sorts_and_pages() {
        let store = MemoryStore::new();
        for (name, exp) in [("Merry", 300), ("Pippin", 100), ("Bilbo", 900), ("Lobelia", 100)] {
            store.save(player(name, exp)).await.unwrap();
        }

        let page = PageRequest::new(0, 3, PlayerOrder::Experience);
        let names: Vec<String> = store
            .query(&PlayerFilter::all(), &page)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Pippin", "Lobelia", "Merry"]);

        let second = PageRequest::new(1, 3, PlayerOrder::Experience);
        let rest = store.query(&PlayerFilter::all(), &second).await.unwrap();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].name, "Bilbo");

        let filter = PlayerFilter::all().and(Condition::MaxExperience(100));
        assert_eq!(store.count(&filter).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_save_rejects_id_overflow() {
        let store = MemoryStore::new();
        let mut last = player("Smeagol", 1);
        last.id = Some(PlayerId::MAX);
        assert!(store.save(last).await.is_err());
        assert_eq!(store.count(&PlayerFilter::all()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_load_seed_rejects_broken_records() {
        let records = [
            r#"{"id":-4,"name":"Bad","title":"t","race":"ORC","profession":"ROGUE","experience":1,"birthday":1000000000000}"#,
            r#"{"name":"","title":"t","race":"ORC","profession":"ROGUE","experience":1,"birthday":1000000000000}"#,
            r#"{"name":"Long","title":"tttttttttttttttttttttttttttttttt","race":"ORC","profession":"ROGUE","experience":1,"birthday":1000000000000}"#,
            r#"{"name":"Neg","title":"t","race":"ORC","profession":"ROGUE","experience":-50,"birthday":1000000000000}"#,
            r#"{"name":"Old","title":"t","race":"ORC","profession":"ROGUE","experience":1,"birthday":0}"#,
            r#"{"id":9223372036854775807,"name":"Max","title":"t","race":"ORC","profession":"ROGUE","experience":1,"birthday":1000000000000}"#,
        ];

        for record in records {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            write!(
                file,
                r#"[{{"name":"Ugluk","title":"Captain","race":"ORC","profession":"WARRIOR","experience":5,"birthday":1000000000000}},{}]"#,
                record
            )
            .unwrap();

            let store = MemoryStore::new();
            assert!(store.load_seed(file.path()).await.is_err(), "accepted {}", record);
            assert_eq!(store.count(&PlayerFilter::all()).await.unwrap(), 0);
        }
    }

    #[tokio::test]
    async fn test_load_seed_recomputes_derived() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id":40,"name":"Radagast","title":"the Brown","race":"HUMAN",
                "profession":"DRUID","experience":300,"level":99,
                "birthday":1000000000000,"banned":false}},
               {{"name":"Saruman","title":"the White","race":"HUMAN",
                "profession":"WARLOCK","experience":0,"birthday":1000000000000}}]"#
        )
        .unwrap();

        let store = MemoryStore::new();
        assert_eq!(store.load_seed(file.path()).await.unwrap(), 2);

        let radagast = store.find_by_id(40).await.unwrap().unwrap();
        assert_eq!(radagast.level, 2);
        assert_eq!(radagast.until_next_level, 300);
        assert!(store.find_by_id(41).await.unwrap().is_some());
    }
}
