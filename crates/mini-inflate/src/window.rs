//! 32 KiB sliding history window for LZ77 back-references

use crate::errors::InflateError;

const WINDOW_SIZE: usize = 32 * 1024;

/// A fixed-size ring buffer holding the most recently emitted bytes, used
/// to resolve DEFLATE's `(length, distance)` back-references.
pub struct SlidingWindow
{
    buffer:    Box<[u8; WINDOW_SIZE]>,
    write_pos: usize,
    /// Total bytes ever appended, capped conceptually at `WINDOW_SIZE` for
    /// distance validation (a distance can never legally exceed how much
    /// output has been produced so far).
    filled: usize
}

impl SlidingWindow
{
    pub fn new() -> SlidingWindow
    {
        SlidingWindow {
            buffer:    Box::new([0; WINDOW_SIZE]),
            write_pos: 0,
            filled:    0
        }
    }

    /// Append a single byte, overwriting the oldest entry once the ring
    /// buffer has wrapped.
    #[inline]
    pub fn append(&mut self, byte: u8)
    {
        self.buffer[self.write_pos] = byte;
        self.write_pos = (self.write_pos + 1) % WINDOW_SIZE;
        self.filled = self.filled.saturating_add(1);
    }

    /// Copy `length` bytes starting `distance` bytes behind the write head
    /// to `sink`, appending each copied byte back into the window as it
    /// goes.
    ///
    /// Appending as it goes is what makes `length > distance` work: a
    /// `distance` of 1 repeats the most recent byte `length` times, since
    /// each appended copy immediately becomes the new "byte one behind the
    /// head" for the next iteration.
    pub fn copy(
        &mut self, length: u32, distance: u32, sink: &mut Vec<u8>
    ) -> Result<(), InflateError>
    {
        if distance < 1 || (distance as usize) > WINDOW_SIZE
        {
            return Err(InflateError::CorruptStream("back-reference distance out of range"));
        }

        if (distance as usize) > self.filled
        {
            return Err(InflateError::CorruptStream(
                "back-reference distance exceeds bytes produced so far"
            ));
        }

        for _ in 0..length
        {
            let read_pos =
                (self.write_pos + WINDOW_SIZE - distance as usize) % WINDOW_SIZE;
            let byte = self.buffer[read_pos];

            sink.push(byte);
            self.append(byte);
        }

        Ok(())
    }
}
