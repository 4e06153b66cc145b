//! Process-local robot storage.
//!
//! Used when no database is configured and by HTTP tests. Rows live for the
//! lifetime of the process and mirror the PostgreSQL adapter's observable
//! behaviour: ids count up from 1 and are never reused, names are unique, and
//! listings are ordered by name then id.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{RobotRepository, RobotRepositoryError};
use crate::domain::{Robot, RobotFields, RobotId};

#[derive(Debug)]
struct Store {
    rows: BTreeMap<RobotId, Robot>,
    next_id: i64,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl Store {
    fn name_in_use(&self, name: &str, exclude: Option<RobotId>) -> bool {
        self.rows
            .values()
            .any(|robot| robot.name == name && Some(robot.id) != exclude)
    }

    fn sorted(mut robots: Vec<Robot>) -> Vec<Robot> {
        robots.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        robots
    }
}

/// In-memory implementation of the [`RobotRepository`] port.
#[derive(Debug, Default)]
pub struct InMemoryRobotRepository {
    store: Mutex<Store>,
}

impl InMemoryRobotRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        // Every mutation is a single map operation; a poisoned store is consistent.
        self.store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl RobotRepository for InMemoryRobotRepository {
    async fn list_all(&self) -> Result<Vec<Robot>, RobotRepositoryError> {
        let store = self.lock();
        Ok(Store::sorted(store.rows.values().cloned().collect()))
    }

    async fn search_by_name(&self, fragment: &str) -> Result<Vec<Robot>, RobotRepositoryError> {
        let needle = fragment.to_lowercase();
        let store = self.lock();
        let matches = store
            .rows
            .values()
            .filter(|robot| robot.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        Ok(Store::sorted(matches))
    }

    async fn find_by_id(&self, id: RobotId) -> Result<Option<Robot>, RobotRepositoryError> {
        Ok(self.lock().rows.get(&id).cloned())
    }

    async fn name_taken(
        &self,
        name: &str,
        exclude: Option<RobotId>,
    ) -> Result<bool, RobotRepositoryError> {
        Ok(self.lock().name_in_use(name, exclude))
    }

    async fn insert(&self, fields: &RobotFields) -> Result<Robot, RobotRepositoryError> {
        let mut store = self.lock();
        if store.name_in_use(&fields.name, None) {
            return Err(RobotRepositoryError::duplicate_name(fields.name.clone()));
        }
        let id = RobotId::new(store.next_id);
        store.next_id += 1;
        let robot = fields.clone().into_robot(id);
        store.rows.insert(id, robot.clone());
        Ok(robot)
    }

    async fn update(
        &self,
        id: RobotId,
        fields: &RobotFields,
    ) -> Result<usize, RobotRepositoryError> {
        let mut store = self.lock();
        if !store.rows.contains_key(&id) {
            return Ok(0);
        }
        if store.name_in_use(&fields.name, Some(id)) {
            return Err(RobotRepositoryError::duplicate_name(fields.name.clone()));
        }
        store.rows.insert(id, fields.clone().into_robot(id));
        Ok(1)
    }

    async fn delete(&self, id: RobotId) -> Result<usize, RobotRepositoryError> {
        Ok(usize::from(self.lock().rows.remove(&id).is_some()))
    }
}
