//! Decoder options shared across the workspace
//!
//! This module exposes a struct for which all implemented decoders get
//! shared options for decoding. All cross-cutting configuration is put into
//! one `DecoderOptions` so the same value can be reused across layers.
//!
//! Format-specific options (e.g. which unknown PNG chunks are tolerated)
//! live next to their decoder instead of here.

/// Decoder options respected by every decoder in the workspace.
///
/// To remove the annoyance of getters and setters, all exposed options are
/// declared public.
#[derive(Debug, Copy, Clone)]
pub struct DecoderOptions
{
    /// Maximum width for which decoders will not try to decode images
    /// larger than the specified width.
    ///
    /// - Default value: 131072 (`1 << 17`)
    pub max_width: usize,

    /// Maximum height for which decoders will not try to decode images
    /// larger than the specified height.
    ///
    /// - Default value: 131072 (`1 << 17`)
    pub max_height: usize,

    /// Treat recoverable inconsistencies (a suspicious `gAMA`, a `tIME`
    /// with an out of range field) as hard errors instead of logging and
    /// skipping the offending field.
    ///
    /// - Default value: false
    pub strict_mode: bool
}

impl Default for DecoderOptions
{
    fn default() -> Self
    {
        Self {
            max_width:   1 << 17,
            max_height:  1 << 17,
            strict_mode: false
        }
    }
}

impl DecoderOptions
{
    pub const fn set_max_width(mut self, width: usize) -> Self
    {
        self.max_width = width;
        self
    }

    pub const fn set_max_height(mut self, height: usize) -> Self
    {
        self.max_height = height;
        self
    }

    pub const fn set_strict_mode(mut self, strict_mode: bool) -> Self
    {
        self.strict_mode = strict_mode;
        self
    }
}
