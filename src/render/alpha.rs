/// Alpha values at or above this become fully opaque; below it, fully transparent.
pub const ALPHA_THRESHOLD: u8 = 128;

/// Snap every pixel's alpha to `0` or `255` in an RGBA8 buffer.
///
/// Single-bit palette transparency cannot express partial coverage, so antialiased edges are
/// resolved here before quantization. Color channels are left untouched; a trailing partial
/// pixel is ignored.
pub fn binarize_alpha(pixels: &mut [u8]) {
    for px in pixels.chunks_exact_mut(4) {
        px[3] = if px[3] < ALPHA_THRESHOLD { 0 } else { 255 };
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/alpha.rs"]
mod tests;
