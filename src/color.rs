//! Colors
//!
//! Pixels are packed 32 bit ARGB, `0xAARRGGBB`, not premultiplied.

/// Color as Alpha, Red, Green and Blue
#[derive(Debug,Default,Copy,Clone,PartialEq,Eq)]
pub struct Argb8 {
    /// Alpha
    pub a: u8,
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
}

impl Argb8 {
    /// Create new color
    pub const fn new(a: u8, r: u8, g: u8, b: u8) -> Self {
        Argb8 { a, r, g, b }
    }
    /// Fully transparent (0,0,0,0)
    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }
    /// Black Color (255,0,0,0)
    pub const fn black() -> Self {
        Self::new(255, 0, 0, 0)
    }
    /// White Color (255,255,255,255)
    pub const fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }
    /// Unpack from `0xAARRGGBB`
    pub const fn from_u32(v: u32) -> Self {
        Self::new((v >> 24) as u8, (v >> 16) as u8, (v >> 8) as u8, v as u8)
    }
    /// Pack into `0xAARRGGBB`
    pub const fn to_u32(self) -> u32 {
        (self.a as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }
    /// Same color with a different alpha
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(a, self.r, self.g, self.b)
    }
}

impl From<u32> for Argb8 {
    fn from(v: u32) -> Self {
        Argb8::from_u32(v)
    }
}
impl From<Argb8> for u32 {
    fn from(c: Argb8) -> u32 {
        c.to_u32()
    }
}

/// Alpha component of a packed pixel
pub const fn alpha(c: u32) -> u8 {
    (c >> 24) as u8
}

/// Replace the alpha component of a packed pixel
pub const fn with_alpha(c: u32, a: u8) -> u32 {
    (c & 0x00FF_FFFF) | (a as u32) << 24
}

/// Multiply two u8 values using fixed point math, rounded
///
/// Computes `a * b / 255`
pub fn multiply_u8(a: u8, b: u8) -> u8 {
    let base_shift = 8;
    let base_msb = 1 << (base_shift - 1);
    let (a, b) = (u32::from(a), u32::from(b));
    let t: u32 = a * b + base_msb;
    let tt: u32 = ((t >> base_shift) + t) >> base_shift;
    tt as u8
}


/// Source-over compositing of non-premultiplied `src` onto `dst`
///
///     use georaster::blend;
///
///     assert_eq!(blend(0xFF00FF00, 0x00FF0000), 0xFF00FF00); // transparent source
///     assert_eq!(blend(0xFF00FF00, 0xFFFF0000), 0xFFFF0000); // opaque source
///     assert_eq!(blend(0x00000000, 0x80FF0000), 0x80FF0000); // empty destination
pub fn blend(dst: u32, src: u32) -> u32 {
    let sa = alpha(src);
    if sa == 0 {
        return dst;
    }
    let da = alpha(dst);
    if sa == 255 || da == 0 {
        return src;
    }
    let out_a = u32::from(sa) + u32::from(da) - u32::from(multiply_u8(sa, da));

    // Mix factors, renormalized to sum to one
    let a1 = f64::from(sa) / 255.0;
    let a0 = (1.0 - a1) * f64::from(da) / 255.0;
    let sum = a0 + a1;
    let (a0, a1) = (a0 / sum, a1 / sum);

    let mix = |shift: u32| -> u32 {
        let d = f64::from((dst >> shift) & 0xFF);
        let s = f64::from((src >> shift) & 0xFF);
        ((d * a0 + s * a1).round() as u32).min(255) << shift
    };
    out_a.min(255) << 24 | mix(16) | mix(8) | mix(0)
}
