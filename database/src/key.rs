use smallvec::SmallVec;
use std::fmt::{Debug, Display, Formatter};

// Optimized for the common case of a one-byte prefix followed by a 32-byte hash
const DEFAULT_PREALLOC_SIZE: usize = 33;

/// A full database key: namespace prefix bytes followed by the entry key bytes.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct DbKey {
    path: SmallVec<[u8; DEFAULT_PREALLOC_SIZE]>,
    prefix_len: usize,
}

impl DbKey {
    pub fn new(prefix: &[u8], key: impl AsRef<[u8]>) -> Self {
        Self {
            path: prefix.iter().chain(key.as_ref().iter()).copied().collect(),
            prefix_len: prefix.len(),
        }
    }

    /// A key that consists of the prefix alone, usable as an iteration bound.
    pub fn prefix_only(prefix: &[u8]) -> Self {
        Self::new(prefix, b"")
    }

    /// Extends the prefix portion with a sub-bucket. Valid only while no suffix was appended yet.
    pub fn add_bucket(&mut self, bucket: impl AsRef<[u8]>) {
        debug_assert_eq!(self.prefix_len, self.path.len());
        self.path.extend_from_slice(bucket.as_ref());
        self.prefix_len = self.path.len();
    }

    pub fn prefix_len(&self) -> usize {
        self.prefix_len
    }

    /// The entry key portion, without the namespace prefix.
    pub fn suffix(&self) -> &[u8] {
        &self.path[self.prefix_len..]
    }
}

impl AsRef<[u8]> for DbKey {
    fn as_ref(&self) -> &[u8] {
        &self.path
    }
}

impl Display for DbKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut hex = vec![0u8; self.path.len() * 2];
        faster_hex::hex_encode(&self.path, &mut hex).expect("the output is exactly twice the size of the input");
        f.write_str(&format!("{}:{}", self.prefix_len, std::str::from_utf8(&hex).expect("hex is always valid UTF-8")))
    }
}

impl Debug for DbKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_composition() {
        let key = DbKey::new(&[7], [1u8; 32]);
        assert_eq!(key.prefix_len(), 1);
        assert_eq!(key.suffix(), &[1u8; 32]);
        assert_eq!(key.as_ref().len(), 33);
        assert!(key.as_ref().starts_with(&[7]));

        let mut bucketed = DbKey::prefix_only(&[7]);
        bucketed.add_bucket([9]);
        assert_eq!(bucketed.prefix_len(), 2);
        assert_eq!(bucketed.as_ref(), &[7, 9]);
    }
}
