//! Bounds-checked little-endian cursor with latched failure.
//!
//! Every primitive read checks that it fits in the buffer before touching it.
//! The first read that does not fit clears the healthy flag, and from then on
//! every read is a no-op returning `None`. A decode loop can run to its natural
//! end and check [`ByteCursor::is_healthy`] once at the checkpoint.
//!
//! ```rust
//! use mrf::ByteCursor;
//!
//! let data = [0x2A, 0x00, 0x00, 0x00, b'h', b'i', 0x00];
//! let mut cursor = ByteCursor::new(&data);
//!
//! assert_eq!(cursor.read_u32(), Some(42));
//! assert_eq!(cursor.read_cstring().as_deref(), Some("hi"));
//! assert_eq!(cursor.read_u8(), None);
//! assert!(!cursor.is_healthy());
//! ```

use tracing::debug;

/// Sequential reader over a borrowed replay buffer.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    offset: usize,
    healthy: bool,
}

impl<'a> ByteCursor<'a> {
    /// Create a healthy cursor at offset 0.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0, healthy: true }
    }

    /// Whether every read so far stayed within the buffer.
    pub fn is_healthy(&self) -> bool {
        self.healthy
    }

    /// Current read offset in bytes.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Bytes left after the current offset.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    /// Total length of the underlying buffer.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the underlying buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn read_u32(&mut self) -> Option<u32> {
        self.take::<4>().map(u32::from_le_bytes)
    }

    pub fn read_i32(&mut self) -> Option<i32> {
        self.take::<4>().map(i32::from_le_bytes)
    }

    pub fn read_u8(&mut self) -> Option<u8> {
        self.take::<1>().map(|[b]| b)
    }

    pub fn read_i8(&mut self) -> Option<i8> {
        self.take::<1>().map(i8::from_le_bytes)
    }

    pub fn read_f32(&mut self) -> Option<f32> {
        self.take::<4>().map(f32::from_le_bytes)
    }

    /// Read a string terminated by a single zero byte.
    ///
    /// The terminator is consumed but not returned. Only a missing terminator
    /// latches the cursor; bytes outside ASCII decode as UTF-8, with invalid
    /// sequences replaced by U+FFFD.
    pub fn read_cstring(&mut self) -> Option<String> {
        if !self.check(1) {
            return None;
        }

        let rest = &self.data[self.offset..];
        let Some(end) = rest.iter().position(|&b| b == 0) else {
            self.latch("string terminator", rest.len());
            return None;
        };

        let text = String::from_utf8_lossy(&rest[..end]).into_owned();
        self.offset += end + 1;
        Some(text)
    }

    /// Consume exactly `N` bytes, or latch.
    fn take<const N: usize>(&mut self) -> Option<[u8; N]> {
        if !self.check(N) {
            return None;
        }

        let mut bytes = [0u8; N];
        bytes.copy_from_slice(&self.data[self.offset..self.offset + N]);
        self.offset += N;
        Some(bytes)
    }

    /// Bounds check performed before every read.
    fn check(&mut self, width: usize) -> bool {
        if !self.healthy {
            return false;
        }

        let fits = self.offset.checked_add(width).is_some_and(|end| end <= self.data.len());
        if !fits {
            self.latch("primitive read", width);
        }
        fits
    }

    fn latch(&mut self, what: &str, width: usize) {
        if self.healthy {
            debug!(
                "Replay cursor overrun reading {} ({} bytes) at offset {} of {}",
                what,
                width,
                self.offset,
                self.data.len()
            );
            self.healthy = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn reads_little_endian_primitives() {
        let mut data = Vec::new();
        data.extend_from_slice(&0x524D_4F4Du32.to_le_bytes());
        data.extend_from_slice(&(-7i32).to_le_bytes());
        data.push(0xFF);
        data.push(0xFF);
        data.extend_from_slice(&0.01f32.to_le_bytes());

        let mut cursor = ByteCursor::new(&data);
        assert_eq!(cursor.read_u32(), Some(0x524D_4F4D));
        assert_eq!(cursor.read_i32(), Some(-7));
        assert_eq!(cursor.read_u8(), Some(255));
        assert_eq!(cursor.read_i8(), Some(-1));
        assert_eq!(cursor.read_f32().map(f32::to_bits), Some(0.01f32.to_bits()));
        assert_eq!(cursor.offset(), data.len());
        assert_eq!(cursor.remaining(), 0);
        assert!(cursor.is_healthy());
    }

    #[test]
    fn cstring_consumes_terminator() {
        let data = b"bhop_eazy\0STEAM_1:0:1\0";
        let mut cursor = ByteCursor::new(data);

        assert_eq!(cursor.read_cstring().as_deref(), Some("bhop_eazy"));
        assert_eq!(cursor.offset(), 10);
        assert_eq!(cursor.read_cstring().as_deref(), Some("STEAM_1:0:1"));
        assert_eq!(cursor.remaining(), 0);
        assert!(cursor.is_healthy());
    }

    #[test]
    fn empty_cstring_is_valid() {
        let mut cursor = ByteCursor::new(&[0u8, 7]);
        assert_eq!(cursor.read_cstring().as_deref(), Some(""));
        assert_eq!(cursor.read_u8(), Some(7));
    }

    #[test]
    fn unterminated_cstring_latches() {
        let mut cursor = ByteCursor::new(b"no terminator");
        assert_eq!(cursor.read_cstring(), None);
        assert!(!cursor.is_healthy());
        assert_eq!(cursor.offset(), 0);
    }

    #[test]
    fn high_bytes_in_cstring_decode_without_latching() {
        // UTF-8 "é", then a lone 0xE9 that is not valid UTF-8
        let mut cursor = ByteCursor::new(&[b'a', 0xC3, 0xA9, 0, b'R', 0xE9, b'x', 0, 9]);

        assert_eq!(cursor.read_cstring().as_deref(), Some("a\u{e9}"));
        assert_eq!(cursor.read_cstring().as_deref(), Some("R\u{fffd}x"));
        assert!(cursor.is_healthy());
        assert_eq!(cursor.offset(), 8);
        assert_eq!(cursor.read_u8(), Some(9));
    }

    #[test]
    fn partial_width_read_latches_without_advancing() {
        let mut cursor = ByteCursor::new(&[1, 2, 3]);
        assert_eq!(cursor.read_u32(), None);
        assert_eq!(cursor.offset(), 0);
        assert!(!cursor.is_healthy());
        // Bytes are still there, but the cursor is latched.
        assert_eq!(cursor.read_u8(), None);
    }

    #[test]
    fn empty_buffer_latches_on_first_read() {
        let mut cursor = ByteCursor::new(&[]);
        assert!(cursor.is_empty());
        assert_eq!(cursor.read_cstring(), None);
        assert!(!cursor.is_healthy());
    }

    #[test]
    fn cursor_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ByteCursor<'static>>();
    }

    proptest! {
        #[test]
        fn latched_health_never_resets(
            data in prop::collection::vec(any::<u8>(), 0..64),
            ops in prop::collection::vec(0u8..6, 1..200)
        ) {
            let mut cursor = ByteCursor::new(&data);
            let mut latched_at: Option<usize> = None;

            for op in ops {
                let before = cursor.offset();
                let produced = match op {
                    0 => cursor.read_u32().is_some(),
                    1 => cursor.read_i32().is_some(),
                    2 => cursor.read_u8().is_some(),
                    3 => cursor.read_i8().is_some(),
                    4 => cursor.read_f32().is_some(),
                    _ => cursor.read_cstring().is_some(),
                };

                prop_assert!(cursor.offset() >= before);
                prop_assert!(cursor.offset() <= data.len());

                if let Some(offset) = latched_at {
                    prop_assert!(!produced);
                    prop_assert!(!cursor.is_healthy());
                    prop_assert_eq!(cursor.offset(), offset);
                } else if !cursor.is_healthy() {
                    prop_assert!(!produced);
                    prop_assert_eq!(cursor.offset(), before);
                    latched_at = Some(before);
                }
            }
        }
    }
}
