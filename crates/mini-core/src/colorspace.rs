//! PNG pixel type classification

/// The `color_type` field of `IHDR`, decoded into its PNG-defined meaning.
///
/// This is "pixel type" in the container sense: it says how a sample maps
/// to a pixel, not what colorspace a renderer would expand it into.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PixelType
{
    Grayscale,
    Truecolor,
    IndexedColor,
    GrayscaleAlpha,
    TruecolorAlpha
}

impl PixelType
{
    /// Build a `PixelType` from the raw `color_type` byte of `IHDR`.
    ///
    /// Returns `None` for any value PNG does not define: 1, 5, and 7 are
    /// reserved, and anything outside 0, 2, 3, 4, 6 is unknown.
    pub const fn from_int(color_type: u8) -> Option<PixelType>
    {
        match color_type
        {
            0 => Some(PixelType::Grayscale),
            2 => Some(PixelType::Truecolor),
            3 => Some(PixelType::IndexedColor),
            4 => Some(PixelType::GrayscaleAlpha),
            6 => Some(PixelType::TruecolorAlpha),
            _ => None
        }
    }

    /// Number of samples per pixel (for indexed-color, the index counts as
    /// one "sample").
    pub const fn num_components(self) -> usize
    {
        match self
        {
            PixelType::Grayscale | PixelType::IndexedColor => 1,
            PixelType::GrayscaleAlpha => 2,
            PixelType::Truecolor => 3,
            PixelType::TruecolorAlpha => 4
        }
    }

    pub const fn has_alpha(self) -> bool
    {
        matches!(self, PixelType::GrayscaleAlpha | PixelType::TruecolorAlpha)
    }

    /// Whether `depth` is a legal bit depth for this pixel type, per the PNG
    /// 1.2 `IHDR` table.
    pub const fn allows_depth(self, depth: crate::bit_depth::BitDepth) -> bool
    {
        use crate::bit_depth::BitDepth;

        match self
        {
            PixelType::Grayscale => true,
            PixelType::IndexedColor => !matches!(depth, BitDepth::Sixteen),
            PixelType::Truecolor | PixelType::GrayscaleAlpha | PixelType::TruecolorAlpha =>
            {
                matches!(depth, BitDepth::Eight | BitDepth::Sixteen)
            }
        }
    }
}
