use bevy::prelude::Resource;

use crate::entities::{Alert, Drone, Soldier, Tracked};

/// Canonical ordered collection for one entity domain. All reads and writes
/// to entity state go through the store; it never triggers rendering or any
/// other side effect.
#[derive(Resource, Debug, Clone)]
pub struct EntityStore<T: Tracked> {
    entries: Vec<T>,
}

pub type AlertStore = EntityStore<Alert>;
pub type DroneStore = EntityStore<Drone>;
pub type SoldierStore = EntityStore<Soldier>;

impl<T: Tracked> Default for EntityStore<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T: Tracked> EntityStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insertion-ordered iteration.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.entries.iter_mut()
    }

    /// Lookup by identifier. Absence is not an error; callers decide.
    pub fn find(&self, id: u64) -> Option<&T> {
        self.entries.iter().find(|entry| entry.id_key() == id)
    }

    pub fn find_mut(&mut self, id: u64) -> Option<&mut T> {
        self.entries.iter_mut().find(|entry| entry.id_key() == id)
    }

    /// Insert if the id is unseen, otherwise replace in place, preserving
    /// the insertion position of the existing record.
    pub fn upsert(&mut self, entity: T) {
        match self
            .entries
            .iter()
            .position(|entry| entry.id_key() == entity.id_key())
        {
            Some(index) => self.entries[index] = entity,
            None => self.entries.push(entity),
        }
    }

    /// Delete every entry matching the predicate; returns the count removed.
    pub fn remove_where<P>(&mut self, predicate: P) -> usize
    where
        P: Fn(&T) -> bool,
    {
        let before = self.entries.len();
        self.entries.retain(|entry| !predicate(entry));
        before - self.entries.len()
    }

    /// Current entities, newest first. Ties break on ascending id so the
    /// ordering is total and stable across identical store contents.
    pub fn list(&self) -> Vec<&T> {
        let mut ordered: Vec<&T> = self.entries.iter().collect();
        ordered.sort_by(|a, b| {
            b.timestamp()
                .cmp(&a.timestamp())
                .then_with(|| a.id_key().cmp(&b.id_key()))
        });
        ordered
    }

    /// Current entities under a caller-specified ordering.
    pub fn list_by<F>(&self, mut compare: F) -> Vec<&T>
    where
        F: FnMut(&T, &T) -> std::cmp::Ordering,
    {
        let mut ordered: Vec<&T> = self.entries.iter().collect();
        ordered.sort_by(|a, b| compare(a, b));
        ordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Alert, AlertId, AlertKind, AlertStatus, Priority};

    fn alert(id: u64, timestamp: u64, status: AlertStatus) -> Alert {
        Alert {
            id: AlertId(id),
            kind: AlertKind::Info,
            status,
            priority: Priority::Low,
            title: format!("alert {id}"),
            description: String::new(),
            location: "Sector-1".to_string(),
            assigned_to: "Drone Alpha-1".to_string(),
            timestamp,
        }
    }

    #[test]
    fn upsert_inserts_then_replaces_in_place() {
        let mut store = AlertStore::new();
        store.upsert(alert(1, 10, AlertStatus::Active));
        store.upsert(alert(2, 11, AlertStatus::Active));
        store.upsert(alert(3, 12, AlertStatus::Active));

        let mut replacement = alert(2, 20, AlertStatus::Acknowledged);
        replacement.title = "updated".to_string();
        store.upsert(replacement);

        assert_eq!(store.len(), 3);
        let order: Vec<u64> = store.iter().map(|a| a.id_key()).collect();
        assert_eq!(order, vec![1, 2, 3]);
        assert_eq!(store.find(2).unwrap().title, "updated");
    }

    #[test]
    fn list_orders_newest_first_with_id_tiebreak() {
        let mut store = AlertStore::new();
        store.upsert(alert(1, 5, AlertStatus::Active));
        store.upsert(alert(2, 9, AlertStatus::Active));
        store.upsert(alert(3, 9, AlertStatus::Active));
        store.upsert(alert(4, 1, AlertStatus::Active));

        let order: Vec<u64> = store.list().iter().map(|a| a.id_key()).collect();
        assert_eq!(order, vec![2, 3, 1, 4]);
    }

    #[test]
    fn remove_where_reports_count() {
        let mut store = AlertStore::new();
        store.upsert(alert(1, 1, AlertStatus::Resolved));
        store.upsert(alert(2, 2, AlertStatus::Active));
        store.upsert(alert(3, 3, AlertStatus::Resolved));
        store.upsert(alert(4, 4, AlertStatus::Acknowledged));
        store.upsert(alert(5, 5, AlertStatus::Active));

        let removed = store.remove_where(|a| a.status == AlertStatus::Resolved);
        assert_eq!(removed, 2);
        assert_eq!(store.len(), 3);
        assert!(store.find(1).is_none());
        assert!(store.find(3).is_none());
    }

    #[test]
    fn find_absent_id_is_none() {
        let store = AlertStore::new();
        assert!(store.find(99).is_none());
    }
}
