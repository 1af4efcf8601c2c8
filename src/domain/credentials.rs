use std::time::Duration;

/// API key 輪替池。
///
/// `cursor` 指向下一把要用的 key；池子非空時永遠是合法索引。
/// 被 API 回報額度用盡的 key 會被移除，同一次執行中不再使用。
#[derive(Debug, Clone, Default)]
pub struct CredentialPool {
    keys: Vec<String>,
    cursor: usize,
}

impl CredentialPool {
    pub fn new(keys: Vec<String>) -> Self {
        Self { keys, cursor: 0 }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// 取出目前的 key 並把游標往前推
    pub fn next_key(&mut self) -> Option<String> {
        if self.keys.is_empty() {
            return None;
        }
        let key = self.keys[self.cursor].clone();
        self.cursor = (self.cursor + 1) % self.keys.len();
        Some(key)
    }

    /// 移除指定 key，回傳是否真的有移除
    pub fn remove(&mut self, key: &str) -> bool {
        let Some(index) = self.keys.iter().position(|k| k == key) else {
            return false;
        };
        self.keys.remove(index);

        if index < self.cursor {
            self.cursor -= 1;
        }
        if self.cursor >= self.keys.len() {
            self.cursor = 0;
        }
        true
    }

    /// 每把 key 大約每 `base` 才被用一次
    pub fn pacing(&self, base: Duration) -> Duration {
        let divisor = self.keys.len().max(1) as u32;
        base / divisor
    }
}

/// 顯示用，只留前四碼
pub fn mask_key(key: &str) -> String {
    let prefix: String = key.chars().take(4).collect();
    format!("{}****", prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool_of(keys: &[&str]) -> CredentialPool {
        CredentialPool::new(keys.iter().map(|k| k.to_string()).collect())
    }

    #[test]
    fn test_rotation_wraps_around() {
        let mut pool = pool_of(&["a", "b", "c"]);
        let used: Vec<String> = (0..5).filter_map(|_| pool.next_key()).collect();
        assert_eq!(used, vec!["a", "b", "c", "a", "b"]);
    }

    #[test]
    fn test_empty_pool_yields_nothing() {
        let mut pool = CredentialPool::default();
        assert!(pool.is_empty());
        assert_eq!(pool.next_key(), None);
    }

    #[test]
    fn test_removed_key_is_never_reused() {
        let mut pool = pool_of(&["a", "b", "c"]);
        assert_eq!(pool.next_key().as_deref(), Some("a"));
        assert_eq!(pool.next_key().as_deref(), Some("b"));
        assert!(pool.remove("b"));

        let used: Vec<String> = (0..4).filter_map(|_| pool.next_key()).collect();
        assert_eq!(used, vec!["c", "a", "c", "a"]);
        assert!(!pool.remove("b"));
    }

    #[test]
    fn test_cursor_stays_valid_after_removing_last_entry() {
        let mut pool = pool_of(&["a", "b"]);
        pool.next_key();
        pool.next_key();
        // cursor 已繞回 0，移除尾端不影響
        assert!(pool.remove("b"));
        assert_eq!(pool.next_key().as_deref(), Some("a"));

        let mut pool2 = pool_of(&["a", "b"]);
        pool2.next_key();
        assert!(pool2.remove("b"));
        assert_eq!(pool2.next_key().as_deref(), Some("a"));
    }

    #[test]
    fn test_removing_everything_empties_pool() {
        let mut pool = pool_of(&["only"]);
        assert!(pool.remove("only"));
        assert!(pool.is_empty());
        assert_eq!(pool.next_key(), None);
    }

    #[test]
    fn test_pacing_divides_by_pool_size() {
        let base = Duration::from_secs(18);
        assert_eq!(pool_of(&["a"]).pacing(base), Duration::from_secs(18));
        assert_eq!(pool_of(&["a", "b", "c"]).pacing(base), Duration::from_secs(6));
        assert_eq!(CredentialPool::default().pacing(base), base);
    }

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key("abcdef123"), "abcd****");
        assert_eq!(mask_key("ab"), "ab****");
    }
}
