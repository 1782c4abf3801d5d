use std::cmp::min;
use std::io::Read;

static ERROR_MSG: &str = "No more bytes";

/// An encapsulation of a byte stream reader.
///
/// This provides an interface similar to [`std::io::Cursor`] but without
/// generics, and with fine grained options for reading different integer
/// widths from the underlying buffer.
///
/// There are two variants of most reads: error and non-error. The error
/// variants are useful where the caller needs the bytes and cannot do
/// anything sensible with a default; the non-error variants are useful when
/// the caller has already checked available length via [`has`](Self::has),
/// or is fine treating end-of-stream as zero.
pub struct ZByteReader<'a>
{
    stream:   &'a [u8],
    position: usize
}

enum Mode
{
    Be,
    Le
}

impl<'a> ZByteReader<'a>
{
    /// Create a new instance of the byte stream reader.
    pub const fn new(buf: &'a [u8]) -> ZByteReader<'a>
    {
        ZByteReader {
            stream:   buf,
            position: 0
        }
    }

    /// Skip `num` bytes ahead of the stream.
    pub fn skip(&mut self, num: usize)
    {
        self.position = self.position.wrapping_add(num);
    }

    /// Undo a buffer read by moving the position pointer `num` bytes behind.
    ///
    /// This operation saturates at zero.
    pub fn rewind(&mut self, num: usize)
    {
        self.position = self.position.saturating_sub(num);
    }

    /// Return whether the underlying buffer has `num` bytes available for
    /// reading.
    #[inline]
    pub const fn has(&self, num: usize) -> bool
    {
        self.position + num <= self.stream.len()
    }

    /// Get the number of bytes available in the stream.
    #[inline]
    pub const fn get_bytes_left(&self) -> usize
    {
        self.stream.len().saturating_sub(self.position)
    }

    /// Get the length of the underlying buffer.
    #[inline]
    pub const fn len(&self) -> usize
    {
        self.stream.len()
    }

    /// Return true if the underlying buffer stream is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool
    {
        self.stream.is_empty()
    }

    /// Get the current position of the reader.
    #[inline]
    pub const fn get_position(&self) -> usize
    {
        self.position
    }

    /// Return true if the reader has consumed the whole buffer.
    #[inline]
    pub const fn eof(&self) -> bool
    {
        self.position >= self.len()
    }

    /// Get a part of the bytestream as a reference, advancing the position
    /// by `num` bytes if in bounds.
    pub fn get_as_ref(&mut self, num: usize) -> Result<&'a [u8], &'static str>
    {
        match self.stream.get(self.position..self.position + num)
        {
            Some(bytes) =>
            {
                self.position += num;
                Ok(bytes)
            }
            None => Err(ERROR_MSG)
        }
    }

    /// Look ahead `position` bytes from the current position and return a
    /// reference to `num_bytes` from there, without advancing.
    #[inline]
    pub fn peek_at(&self, position: usize, num_bytes: usize) -> Result<&'a [u8], &'static str>
    {
        let start = self.position + position;
        let end = self.position + position + num_bytes;

        match self.stream.get(start..end)
        {
            Some(bytes) => Ok(bytes),
            None => Err(ERROR_MSG)
        }
    }
}

impl<'a> Read for ZByteReader<'a>
{
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize>
    {
        let buf_length = buf.len();
        let start = self.position;
        let end = min(self.len(), self.position + buf_length);
        let diff = end - start;

        buf[0..diff].copy_from_slice(&self.stream[start..end]);

        self.skip(diff);

        Ok(diff)
    }
}

macro_rules! get_single_type {
    ($name:tt,$name2:tt,$name3:tt,$name4:tt,$int_type:tt) => {
        impl<'a> ZByteReader<'a>
        {
            #[inline(always)]
            fn $name(&mut self, mode: Mode) -> $int_type
            {
                const SIZE_OF_VAL: usize = core::mem::size_of::<$int_type>();

                let mut space = [0; SIZE_OF_VAL];

                match self.stream.get(self.position..self.position + SIZE_OF_VAL)
                {
                    Some(position) =>
                    {
                        space.copy_from_slice(position);
                        self.position += SIZE_OF_VAL;

                        match mode
                        {
                            Mode::Le => $int_type::from_le_bytes(space),
                            Mode::Be => $int_type::from_be_bytes(space)
                        }
                    }
                    None => 0
                }
            }

            #[inline(always)]
            fn $name2(&mut self, mode: Mode) -> Result<$int_type, &'static str>
            {
                const SIZE_OF_VAL: usize = core::mem::size_of::<$int_type>();

                let mut space = [0; SIZE_OF_VAL];

                match self.stream.get(self.position..self.position + SIZE_OF_VAL)
                {
                    Some(position) =>
                    {
                        space.copy_from_slice(position);
                        self.position += SIZE_OF_VAL;

                        match mode
                        {
                            Mode::Le => Ok($int_type::from_le_bytes(space)),
                            Mode::Be => Ok($int_type::from_be_bytes(space))
                        }
                    }
                    None => Err(ERROR_MSG)
                }
            }

            #[doc=concat!("Read a ",stringify!($int_type)," as a big endian integer, returning an error if the underlying buffer cannot support the read.")]
            #[inline]
            pub fn $name3(&mut self) -> Result<$int_type, &'static str>
            {
                self.$name2(Mode::Be)
            }

            #[doc=concat!("Read a ",stringify!($int_type)," as a big endian integer, returning 0 if the underlying buffer does not have enough bytes.")]
            #[inline(always)]
            pub fn $name4(&mut self) -> $int_type
            {
                self.$name(Mode::Be)
            }
        }
    };
}

// u8 is hand unrolled since it's the hottest path (chunk type bytes, signature check).
impl<'a> ZByteReader<'a>
{
    /// Retrieve a byte from the underlying stream, returning 0 if there are
    /// no more bytes available.
    ///
    /// For the error-returning variant, see [`get_u8_err`](Self::get_u8_err).
    #[inline(always)]
    pub fn get_u8(&mut self) -> u8
    {
        let byte = *self.stream.get(self.position).unwrap_or(&0);

        self.position += usize::from(self.position < self.len());
        byte
    }

    /// Retrieve a byte from the underlying stream, returning an error if
    /// there are no more bytes available.
    #[inline(always)]
    pub fn get_u8_err(&mut self) -> Result<u8, &'static str>
    {
        match self.stream.get(self.position)
        {
            Some(byte) =>
            {
                self.position += 1;
                Ok(*byte)
            }
            None => Err(ERROR_MSG)
        }
    }
}

get_single_type!(get_u16_inner_or_default, get_u16_inner_or_die, get_u16_be_err, get_u16_be, u16);
get_single_type!(get_u32_inner_or_default, get_u32_inner_or_die, get_u32_be_err, get_u32_be, u32);
get_single_type!(get_u64_inner_or_default, get_u64_inner_or_die, get_u64_be_err, get_u64_be, u64);
