//! Pixel layout descriptors (bit-field codec)
//!
//! A [`PixelLayout`] describes how one packed pixel is stored: the number of
//! bytes it occupies and, for each channel, a `(shift, bits)` field inside the
//! little-endian word formed by those bytes. Unpacking yields a tuple of
//! normalized integers (one `u16` per channel, never wider than the field);
//! packing is the exact inverse.
//!
//! # Word convention
//!
//! A pixel of `n` bytes is read as an `n`-byte little-endian integer, so a
//! field at shift 0 lives in the first byte in memory. `Rgb888`, whose red
//! field sits at shift 16, is therefore stored as `B, G, R` in memory.
//!
//! # Byte-aligned layouts
//!
//! When every field is exactly 8 bits wide and starts on a byte boundary the
//! codec reads and writes the channel bytes directly instead of assembling
//! the whole word.

/// Maximum number of channels in any layout
pub const MAX_CHANNELS: usize = 4;

/// Unpacked channel values of one pixel, in layout channel order
pub type Channels = [u16; MAX_CHANNELS];

/// One channel's bit-field inside the pixel word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelField {
    /// Bit offset from the least significant bit of the word
    pub shift: u8,
    /// Field width in bits (1..=8)
    pub bits: u8,
}

impl ChannelField {
    /// Placeholder for unused channel slots
    pub const NONE: Self = Self { shift: 0, bits: 0 };

    /// Create a field at `shift` that is `bits` wide.
    pub const fn new(shift: u8, bits: u8) -> Self {
        Self { shift, bits }
    }

    /// Largest value the field can hold.
    #[inline]
    pub const fn max_value(self) -> u32 {
        if self.bits == 0 {
            0
        } else {
            (1u32 << self.bits) - 1
        }
    }

    /// Mask of the field within the word.
    #[inline]
    pub const fn mask(self) -> u32 {
        self.max_value() << self.shift
    }

    /// Whether the field is a whole byte on a byte boundary.
    #[inline]
    pub const fn is_byte_aligned(self) -> bool {
        self.bits == 8 && self.shift % 8 == 0
    }

    /// Extract the field from a pixel word.
    #[inline]
    pub fn extract(self, word: u32) -> u16 {
        ((word >> self.shift) & self.max_value()) as u16
    }

    /// Replace the field in `word` with `value`.
    ///
    /// Bits of `value` above the field width are discarded.
    #[inline]
    pub fn insert(self, word: u32, value: u16) -> u32 {
        (word & !self.mask()) | ((value as u32 & self.max_value()) << self.shift)
    }
}

/// Storage description of a packed pixel format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelLayout {
    /// Bytes per pixel (1..=4)
    pub bytes_per_pixel: usize,
    /// Number of meaningful entries in `fields`
    pub channel_count: usize,
    /// Channel fields in channel order; entries past `channel_count` are
    /// [`ChannelField::NONE`]
    pub fields: [ChannelField; MAX_CHANNELS],
    /// Index into `fields` of the alpha channel, if any
    pub alpha: Option<usize>,
}

impl PixelLayout {
    /// Fields actually used by this layout.
    #[inline]
    pub fn channels(&self) -> &[ChannelField] {
        &self.fields[..self.channel_count]
    }

    /// Whether the layout has an alpha channel.
    pub const fn has_alpha(&self) -> bool {
        self.alpha.is_some()
    }

    /// Widest channel field, in bits.
    pub const fn max_channel_bits(&self) -> u32 {
        let mut max = 0;
        let mut i = 0;
        while i < self.channel_count {
            if self.fields[i].bits as u32 > max {
                max = self.fields[i].bits as u32;
            }
            i += 1;
        }
        max
    }

    /// Bits of the pixel word covered by some channel.
    pub const fn used_mask(&self) -> u32 {
        let mut mask = 0;
        let mut i = 0;
        while i < self.channel_count {
            mask |= self.fields[i].mask();
            i += 1;
        }
        mask
    }

    /// Whether every channel is a whole byte on a byte boundary.
    pub const fn is_byte_aligned(&self) -> bool {
        let mut i = 0;
        while i < self.channel_count {
            if !self.fields[i].is_byte_aligned() {
                return false;
            }
            i += 1;
        }
        true
    }

    /// Read the little-endian pixel word from the start of `px`.
    #[inline]
    pub fn read_word(&self, px: &[u8]) -> u32 {
        match self.bytes_per_pixel {
            1 => px[0] as u32,
            2 => u16::from_le_bytes([px[0], px[1]]) as u32,
            3 => px[0] as u32 | (px[1] as u32) << 8 | (px[2] as u32) << 16,
            _ => u32::from_le_bytes([px[0], px[1], px[2], px[3]]),
        }
    }

    /// Write `word` as a little-endian pixel to the start of `out`.
    #[inline]
    pub fn write_word(&self, word: u32, out: &mut [u8]) {
        let bpp = self.bytes_per_pixel;
        out[..bpp].copy_from_slice(&word.to_le_bytes()[..bpp]);
    }

    /// Extract a single channel from the pixel at the start of `px`.
    #[inline]
    pub fn extract(&self, px: &[u8], channel: usize) -> u16 {
        let field = self.fields[channel];
        if field.is_byte_aligned() {
            px[(field.shift / 8) as usize] as u16
        } else {
            field.extract(self.read_word(px))
        }
    }

    /// Unpack all channels of the pixel at the start of `px`.
    #[inline]
    pub fn unpack(&self, px: &[u8]) -> Channels {
        let mut out = [0u16; MAX_CHANNELS];
        if self.is_byte_aligned() {
            for (c, field) in self.channels().iter().enumerate() {
                out[c] = px[(field.shift / 8) as usize] as u16;
            }
        } else {
            let word = self.read_word(px);
            for (c, field) in self.channels().iter().enumerate() {
                out[c] = field.extract(word);
            }
        }
        out
    }

    /// Pack `channels` into `out`.
    ///
    /// Bits not covered by any channel are taken from `base`, a pixel of the
    /// same layout (typically the nearest source sample).
    #[inline]
    pub fn pack(&self, channels: &Channels, base: &[u8], out: &mut [u8]) {
        let bpp = self.bytes_per_pixel;
        if self.is_byte_aligned() {
            out[..bpp].copy_from_slice(&base[..bpp]);
            for (c, field) in self.channels().iter().enumerate() {
                out[(field.shift / 8) as usize] = channels[c] as u8;
            }
        } else {
            let mut word = self.read_word(base) & !self.used_mask();
            for (c, field) in self.channels().iter().enumerate() {
                word = field.insert(word, channels[c]);
            }
            self.write_word(word, out);
        }
    }
}

const fn f(shift: u8, bits: u8) -> ChannelField {
    ChannelField::new(shift, bits)
}

const NONE: ChannelField = ChannelField::NONE;

/// 16-bit R5 G6 B5, red in the high bits
pub const RGB565: PixelLayout = PixelLayout {
    bytes_per_pixel: 2,
    channel_count: 3,
    fields: [f(11, 5), f(5, 6), f(0, 5), NONE],
    alpha: None,
};

/// 16-bit B5 G6 R5, blue in the high bits
pub const BGR565: PixelLayout = PixelLayout {
    bytes_per_pixel: 2,
    channel_count: 3,
    fields: [f(11, 5), f(5, 6), f(0, 5), NONE],
    alpha: None,
};

/// 16-bit A1 R5 G5 B5
pub const ARGB1555: PixelLayout = PixelLayout {
    bytes_per_pixel: 2,
    channel_count: 4,
    fields: [f(15, 1), f(10, 5), f(5, 5), f(0, 5)],
    alpha: Some(0),
};

/// 16-bit R5 G5 B5 A1
pub const RGBA5551: PixelLayout = PixelLayout {
    bytes_per_pixel: 2,
    channel_count: 4,
    fields: [f(11, 5), f(6, 5), f(1, 5), f(0, 1)],
    alpha: Some(3),
};

/// 16-bit A4 R4 G4 B4
pub const ARGB4444: PixelLayout = PixelLayout {
    bytes_per_pixel: 2,
    channel_count: 4,
    fields: [f(12, 4), f(8, 4), f(4, 4), f(0, 4)],
    alpha: Some(0),
};

/// 16-bit R4 G4 B4 A4
pub const RGBA4444: PixelLayout = PixelLayout {
    bytes_per_pixel: 2,
    channel_count: 4,
    fields: [f(12, 4), f(8, 4), f(4, 4), f(0, 4)],
    alpha: Some(3),
};

/// 24-bit, three 8-bit channels
pub const RGB888: PixelLayout = PixelLayout {
    bytes_per_pixel: 3,
    channel_count: 3,
    fields: [f(16, 8), f(8, 8), f(0, 8), NONE],
    alpha: None,
};

/// 32-bit, four 8-bit channels with alpha in the top byte
pub const ALPHA_FIRST_8888: PixelLayout = PixelLayout {
    bytes_per_pixel: 4,
    channel_count: 4,
    fields: [f(24, 8), f(16, 8), f(8, 8), f(0, 8)],
    alpha: Some(0),
};

/// 32-bit, four 8-bit channels with alpha in the bottom byte
pub const ALPHA_LAST_8888: PixelLayout = PixelLayout {
    bytes_per_pixel: 4,
    channel_count: 4,
    fields: [f(24, 8), f(16, 8), f(8, 8), f(0, 8)],
    alpha: Some(3),
};

/// 32-bit, three 8-bit channels, top byte unused
pub const X888: PixelLayout = PixelLayout {
    bytes_per_pixel: 4,
    channel_count: 3,
    fields: [f(16, 8), f(8, 8), f(0, 8), NONE],
    alpha: None,
};

/// 8-bit single channel luminance
pub const GRAY8: PixelLayout = PixelLayout {
    bytes_per_pixel: 1,
    channel_count: 1,
    fields: [f(0, 8), NONE, NONE, NONE],
    alpha: None,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_extract_insert() {
        let g = ChannelField::new(5, 6);
        assert_eq!(g.max_value(), 63);
        assert_eq!(g.mask(), 0x07E0);
        assert_eq!(g.extract(0x07E0), 63);
        assert_eq!(g.insert(0xFFFF, 0), 0xF81F);
        // Excess bits are dropped
        assert_eq!(g.insert(0, 0xFF), 0x07E0);
    }

    #[test]
    fn test_rgb565_unpack() {
        // Pure red: 0xF800 little-endian
        let ch = RGB565.unpack(&[0x00, 0xF8]);
        assert_eq!(&ch[..3], &[31, 0, 0]);
        let ch = RGB565.unpack(&[0x1F, 0x00]);
        assert_eq!(&ch[..3], &[0, 0, 31]);
    }

    #[test]
    fn test_argb1555_alpha_bit() {
        let ch = ARGB1555.unpack(&[0x00, 0x80]);
        assert_eq!(ch[0], 1);
        assert_eq!(&ch[1..4], &[0, 0, 0]);
        assert!(ARGB1555.has_alpha());
        assert_eq!(ARGB1555.max_channel_bits(), 5);
    }

    #[test]
    fn test_rgb888_memory_order() {
        // Memory order is B, G, R
        let ch = RGB888.unpack(&[10, 20, 30]);
        assert_eq!(&ch[..3], &[30, 20, 10]);
        assert!(RGB888.is_byte_aligned());
        assert!(!RGB565.is_byte_aligned());
    }

    #[test]
    fn test_pack_keeps_unused_bits_from_base() {
        let base = [0, 0, 0, 0x5A];
        let mut out = [0u8; 4];
        X888.pack(&[1, 2, 3, 0], &base, &mut out);
        assert_eq!(out, [3, 2, 1, 0x5A]);
        assert_eq!(X888.used_mask(), 0x00FF_FFFF);
    }

    #[test]
    fn test_pack_bitfield() {
        let mut out = [0u8; 2];
        RGBA5551.pack(&[31, 0, 31, 1], &[0, 0], &mut out);
        let word = u16::from_le_bytes(out);
        assert_eq!(word, 0xF83F);
        assert_eq!(RGBA5551.unpack(&out), [31, 0, 31, 1]);
    }

    #[test]
    fn test_extract_single_channel() {
        let px = [0x12, 0x34, 0x56, 0x78];
        assert_eq!(ALPHA_FIRST_8888.extract(&px, 0), 0x78);
        assert_eq!(ALPHA_FIRST_8888.extract(&px, 3), 0x12);
        let px = 0xF800u16.to_le_bytes();
        assert_eq!(BGR565.extract(&px, 0), 31);
    }
}
