//! Conversion between cached strings and typed values.

use crate::cache::CacheError;

/// A type that can be stored in an [`AppCache`](crate::cache::AppCache).
///
/// Implemented explicitly per type so the cache wire format is chosen by
/// the value, not by the cache backend.
pub trait CacheValue: Sized {
    fn to_cache_value(&self) -> Result<String, CacheError>;

    fn from_cache_value(raw: &str) -> Result<Self, CacheError>;
}

/// Cache key of the entry with the given id: its decimal representation.
pub fn entry_key(id: i32) -> String {
    id.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_key_is_decimal_id() {
        assert_eq!(entry_key(5), "5");
        assert_eq!(entry_key(-12), "-12");
    }
}
