//! Per-chat configuration sets.

use std::collections::BTreeMap;

/// Chat scope of the fallback configuration.
pub const FALLBACK_CHAT: i64 = 0;

/// A matcher's configuration for every chat scope it was configured for.
///
/// Always holds the fallback under [`FALLBACK_CHAT`]; per-chat overrides are
/// stored under their chat id. Iteration yields the fallback first, then the
/// overrides in ascending chat id order.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatConfigs<T> {
    fallback: T,
    chats: BTreeMap<i64, T>,
}

impl<T> ChatConfigs<T> {
    /// Creates a set holding only the fallback.
    pub fn new(fallback: T) -> Self {
        Self {
            fallback,
            chats: BTreeMap::new(),
        }
    }

    /// Adds or replaces the override for `chat_id`.
    ///
    /// Inserting under [`FALLBACK_CHAT`] replaces the fallback.
    pub fn insert(&mut self, chat_id: i64, config: T) {
        if chat_id == FALLBACK_CHAT {
            self.fallback = config;
        } else {
            self.chats.insert(chat_id, config);
        }
    }

    /// Returns the fallback configuration.
    pub fn fallback(&self) -> &T {
        &self.fallback
    }

    /// Returns the configuration stored exactly under `chat_id`.
    pub fn get(&self, chat_id: i64) -> Option<&T> {
        if chat_id == FALLBACK_CHAT {
            Some(&self.fallback)
        } else {
            self.chats.get(&chat_id)
        }
    }

    /// Returns the override for `chat_id`, or the fallback if there is none.
    pub fn for_chat(&self, chat_id: i64) -> &T {
        self.chats.get(&chat_id).unwrap_or(&self.fallback)
    }

    /// Returns every configured chat scope, fallback first.
    pub fn chat_ids(&self) -> Vec<i64> {
        std::iter::once(FALLBACK_CHAT)
            .chain(self.chats.keys().copied())
            .collect()
    }

    /// Returns the number of scopes, fallback included.
    pub fn len(&self) -> usize {
        self.chats.len() + 1
    }

    /// Always false: the fallback is mandatory.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns true if at least one per-chat override exists.
    pub fn has_overrides(&self) -> bool {
        !self.chats.is_empty()
    }

    /// Iterates over `(chat_id, config)` pairs, fallback first.
    pub fn iter(&self) -> impl Iterator<Item = (i64, &T)> {
        std::iter::once((FALLBACK_CHAT, &self.fallback))
            .chain(self.chats.iter().map(|(id, config)| (*id, config)))
    }

    /// Transforms every configuration, keeping the chat scopes.
    pub fn map<U>(self, mut f: impl FnMut(i64, T) -> U) -> ChatConfigs<U> {
        ChatConfigs {
            fallback: f(FALLBACK_CHAT, self.fallback),
            chats: self
                .chats
                .into_iter()
                .map(|(id, config)| (id, f(id, config)))
                .collect(),
        }
    }

    /// Converts into a plain map keyed by chat scope.
    pub fn into_map(self) -> BTreeMap<i64, T> {
        let mut map = self.chats;
        map.insert(FALLBACK_CHAT, self.fallback);
        map
    }
}

impl<T> IntoIterator for ChatConfigs<T> {
    type Item = (i64, T);
    type IntoIter = std::collections::btree_map::IntoIter<i64, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_map().into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ChatConfigs<&'static str> {
        let mut configs = ChatConfigs::new("default");
        configs.insert(222, "second");
        configs.insert(-100, "group");
        configs.insert(111, "first");
        configs
    }

    #[test]
    fn test_fallback_only() {
        let configs = ChatConfigs::new("default");

        assert_eq!(configs.len(), 1);
        assert!(!configs.has_overrides());
        assert_eq!(configs.chat_ids(), vec![0]);
        assert_eq!(configs.get(0), Some(&"default"));
        assert_eq!(configs.get(5), None);
        assert_eq!(*configs.for_chat(5), "default");
    }

    #[test]
    fn test_overrides() {
        let configs = sample();

        assert_eq!(configs.len(), 4);
        assert_eq!(configs.chat_ids(), vec![0, -100, 111, 222]);
        assert_eq!(*configs.for_chat(111), "first");
        assert_eq!(*configs.for_chat(333), "default");
        assert_eq!(*configs.fallback(), "default");
    }

    #[test]
    fn test_insert_zero_replaces_fallback() {
        let mut configs = sample();
        configs.insert(FALLBACK_CHAT, "replaced");

        assert_eq!(*configs.fallback(), "replaced");
        assert_eq!(configs.len(), 4);
    }

    #[test]
    fn test_map_and_into_map() {
        let lengths = sample().map(|id, s| (id, s.len()));
        assert_eq!(lengths.for_chat(222), &(222, 6));
        assert_eq!(lengths.fallback(), &(0, 7));

        let map = sample().into_map();
        let keys: Vec<i64> = map.keys().copied().collect();
        assert_eq!(keys, vec![-100, 0, 111, 222]);
    }

    #[test]
    fn test_iter_fallback_first() {
        let configs = sample();
        let ids: Vec<i64> = configs.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![0, -100, 111, 222]);
    }
}
