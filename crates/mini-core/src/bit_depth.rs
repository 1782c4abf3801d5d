//! PNG sample bit depth

/// The number of bits used to store a single sample (or, for indexed-color
/// images, a single palette index) in a scanline.
///
/// PNG restricts the set of legal depths, and restricts which depths are
/// legal for which color type; see [`crate::colorspace::PixelType::allows_depth`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum BitDepth
{
    One,
    Two,
    Four,
    Eight,
    Sixteen
}

impl BitDepth
{
    /// Build a `BitDepth` from the raw `IHDR` byte, returning `None` for any
    /// value PNG does not define.
    pub const fn from_int(depth: u8) -> Option<BitDepth>
    {
        match depth
        {
            1 => Some(BitDepth::One),
            2 => Some(BitDepth::Two),
            4 => Some(BitDepth::Four),
            8 => Some(BitDepth::Eight),
            16 => Some(BitDepth::Sixteen),
            _ => None
        }
    }

    /// The numeric depth, as it appears in `IHDR`.
    pub const fn as_u8(self) -> u8
    {
        match self
        {
            BitDepth::One => 1,
            BitDepth::Two => 2,
            BitDepth::Four => 4,
            BitDepth::Eight => 8,
            BitDepth::Sixteen => 16
        }
    }

    /// The maximum sample value representable at this depth.
    pub const fn max_value(self) -> u16
    {
        match self
        {
            BitDepth::Sixteen => u16::MAX,
            _ => (1_u16 << self.as_u8()) - 1
        }
    }
}
