//! Length-prefixed byte framing
//!
//! Every field is written as `len (u64, big-endian) || bytes`, and every map
//! as `count (u64, big-endian)` followed by its framed keys and values. With
//! explicit lengths, `"ab" + "c"` and `"a" + "bc"` can never produce the same
//! byte stream.

/// Builder for one framed fingerprint component
#[derive(Debug, Default)]
pub(crate) struct FrameWriter {
    buf: Vec<u8>,
}

impl FrameWriter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append a length-prefixed byte string
    pub(crate) fn put(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(&(bytes.len() as u64).to_be_bytes());
        self.buf.extend_from_slice(bytes);
        self
    }

    /// Append an entry count
    pub(crate) fn put_count(&mut self, count: usize) -> &mut Self {
        self.buf.extend_from_slice(&(count as u64).to_be_bytes());
        self
    }

    /// Append a map given as already-sorted `(key, value bytes)` pairs
    pub(crate) fn put_entries<'a, I>(&mut self, entries: I) -> &mut Self
    where
        I: ExactSizeIterator<Item = (&'a str, Vec<u8>)>,
    {
        self.put_count(entries.len());
        for (key, value) in entries {
            self.put(key.as_bytes());
            self.put(&value);
        }
        self
    }

    pub(crate) fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}
