use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// A translation the user chose to keep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteRecord {
    pub id: u64,
    pub original: String,
    pub translated: String,
    pub created_at: DateTime<Local>,
}

/// Unbounded, newest-first list of favorites
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Favorites {
    items: Vec<FavoriteRecord>,
}

impl Favorites {
    pub fn add(&mut self, record: FavoriteRecord) {
        self.items.insert(0, record);
    }

    pub fn list(&self) -> impl Iterator<Item = &FavoriteRecord> {
        self.items.iter()
    }

    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|f| f.id != id);
        before != self.items.len()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn last_id(&self) -> Option<u64> {
        self.items.iter().map(|f| f.id).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn favorite(id: u64) -> FavoriteRecord {
        FavoriteRecord {
            id,
            original: "fever".to_string(),
            translated: "حمى".to_string(),
            created_at: Local::now(),
        }
    }

    #[test]
    fn test_add_newest_first_and_remove() {
        let mut favorites = Favorites::default();
        favorites.add(favorite(1));
        favorites.add(favorite(2));
        assert_eq!(favorites.list().next().unwrap().id, 2);

        assert!(favorites.remove(1));
        assert!(!favorites.remove(1));
        assert_eq!(favorites.len(), 1);
    }
}
