//! Explicit query cache.
//!
//! Results are keyed by (task, parameters) and dropped by task on every
//! mutating call to the same resource. A plain map with manual invalidation,
//! not a hidden global store.

use serde_json::Value as JsonValue;
use std::collections::HashMap;

/// Cache key: the task name plus its serialized parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub task: String,
    pub params: String,
}

/// Build a key from a task and its ordered parameter pairs.
pub fn cache_key(task: &str, params: &[(&str, &str)]) -> CacheKey {
    let mut serialized = String::new();
    for (name, value) in params {
        serialized.push_str(name);
        serialized.push('=');
        serialized.push_str(value);
        serialized.push('&');
    }
    CacheKey {
        task: task.to_string(),
        params: serialized,
    }
}

#[derive(Debug, Default)]
pub struct QueryCache {
    entries: HashMap<CacheKey, JsonValue>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &CacheKey) -> Option<JsonValue> {
        self.entries.get(key).cloned()
    }

    pub fn insert(&mut self, key: CacheKey, value: JsonValue) {
        self.entries.insert(key, value);
    }

    /// Drop every entry cached for a task, regardless of parameters.
    pub fn invalidate_task(&mut self, task: &str) {
        self.entries.retain(|key, _| key.task != task);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_distinct_params_get_distinct_entries() {
        let mut cache = QueryCache::new();
        cache.insert(
            cache_key("get-lookups", &[("table", "wilayas")]),
            json!([1]),
        );
        cache.insert(
            cache_key("get-lookups", &[("table", "categories")]),
            json!([2]),
        );
        assert_eq!(cache.len(), 2);
        assert_eq!(
            cache.get(&cache_key("get-lookups", &[("table", "wilayas")])),
            Some(json!([1]))
        );
    }

    #[test]
    fn test_invalidate_task_drops_all_its_params() {
        let mut cache = QueryCache::new();
        cache.insert(
            cache_key("get-entities", &[("type", "startup")]),
            json!([]),
        );
        cache.insert(
            cache_key("get-entities", &[("type", "media")]),
            json!([]),
        );
        cache.insert(
            cache_key("get-lookups", &[("table", "wilayas")]),
            json!([]),
        );

        cache.invalidate_task("get-entities");

        assert_eq!(cache.len(), 1);
        assert!(cache
            .get(&cache_key("get-lookups", &[("table", "wilayas")]))
            .is_some());
    }

    #[test]
    fn test_miss_on_unknown_key() {
        let cache = QueryCache::new();
        assert!(cache.get(&cache_key("get-entities", &[])).is_none());
    }
}
