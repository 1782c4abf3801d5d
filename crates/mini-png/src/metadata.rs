//! The accumulated, read-only metadata a renderer consumes: [`Picture`].

use mini_core::colorspace::PixelType;

/// One entry of a `PLTE` chunk, optionally extended with an alpha byte by a
/// later `tRNS` chunk (default 255, i.e. opaque, until then).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PaletteEntry
{
    pub red:   u8,
    pub green: u8,
    pub blue:  u8,
    pub alpha: u8
}

/// `bKGD`: a suggested background color, shaped by the image's pixel type.
#[derive(Copy, Clone, Debug)]
pub enum BackgroundColor
{
    Gray(u16),
    Rgb { red: u16, green: u16, blue: u16 },
    /// Index into the image's palette.
    Palette(u8)
}

/// `tRNS` for a non-indexed image: the one sample value that should be
/// treated as fully transparent wherever it occurs.
#[derive(Copy, Clone, Debug)]
pub enum TransparentColor
{
    Gray(u16),
    Rgb { red: u16, green: u16, blue: u16 }
}

/// `gAMA`: image gamma as the rational PNG defines it, `value / 100000`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Gamma(pub u32);

impl Gamma
{
    pub const fn as_f64(self) -> f64
    {
        self.0 as f64 / 100_000.0
    }
}

/// `tIME`: last modification time, recorded verbatim (no timezone, per the
/// PNG specification UTC convention).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PngTime
{
    pub year:   u16,
    pub month:  u8,
    pub day:    u8,
    pub hour:   u8,
    pub minute: u8,
    pub second: u8
}

/// One `tEXt`/`zTXt`/`iTXt` entry.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TextEntry
{
    pub keyword: String,
    /// Present only for `iTXt`.
    pub language: Option<String>,
    /// Present only for `iTXt`.
    pub translated_keyword: Option<String>,
    pub text: String,
    /// Whether this entry's text was stored compressed (`zTXt`, or `iTXt`
    /// with its compression flag set).
    pub compressed: bool
}

/// The fully parsed metadata and inflated pixel stream of one PNG file.
///
/// Created once, after every chunk has been read; read-only thereafter.
/// Row unfiltering, interlace deinterleaving, and palette expansion to RGBA
/// are left to a renderer operating on `raw_scanlines`.
#[derive(Clone, Debug, Default)]
pub struct Picture
{
    pub width:  u32,
    pub height: u32,

    pub bit_depth:  u8,
    pub color_type: u8,

    /// Bits used per sample (for indexed-color, per palette index), equal
    /// to `bit_depth` for every color type; the palette's own RGB entries
    /// are always 8 bits regardless of this value.
    pub sample_depth: u8,
    pub type_of_pixel: Option<PixelType>,
    pub alpha_channel: bool,

    pub compression_method: u8,
    pub filter_method:      u8,
    pub interlace_method:   u8,

    pub palette: Option<Vec<PaletteEntry>>,

    pub background_color:       Option<BackgroundColor>,
    pub gamma:                  Option<Gamma>,
    pub last_modification_time: Option<PngTime>,
    pub fully_transparent_color: Option<TransparentColor>,

    pub text_info: Vec<TextEntry>,

    /// The inflated, still-filtered, still-interlaced scanline bytes: one
    /// filter-type byte followed by `width * components * bit_depth/8`
    /// (rounded up) sample bytes, repeated per scanline (per Adam7 pass, if
    /// interlaced).
    pub raw_scanlines: Vec<u8>
}
