//! Alpha compositing ("over" operator).
//!
//! See the "Alpha blending" section of the alpha compositing article on
//! Wikipedia. The destination is not assumed to be opaque.

use crate::types::Rgba;

/// Composite `src` over `dst`.
///
/// Channels are truncated toward zero. If the combined alpha is zero the
/// result is fully transparent black.
pub fn alpha_blend(src: Rgba, dst: Rgba) -> Rgba {
    let src_mul = src.a as f64 / 255.0;
    let dst_mul = (dst.a as f64 / 255.0) * (1.0 - src_mul);
    let out_alpha = src_mul + dst_mul;
    if out_alpha == 0.0 {
        return Rgba::TRANSPARENT;
    }

    let channel = |s: u8, d: u8| ((s as f64 * src_mul + d as f64 * dst_mul) / out_alpha) as u8;

    Rgba::new(
        channel(src.r, dst.r),
        channel(src.g, dst.g),
        channel(src.b, dst.b),
        (out_alpha * 255.0) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_transparent_is_transparent_black() {
        let out = alpha_blend(Rgba::new(10, 20, 30, 0), Rgba::new(40, 50, 60, 0));
        assert_eq!(out, Rgba::TRANSPARENT);
    }

    #[test]
    fn test_opaque_source_wins() {
        let src = Rgba::opaque(12, 200, 99);
        for dst in [Rgba::opaque(0, 0, 0), Rgba::new(255, 255, 255, 100), Rgba::TRANSPARENT] {
            assert_eq!(alpha_blend(src, dst), src);
        }
    }

    #[test]
    fn test_transparent_source_shows_destination() {
        let dst = Rgba::opaque(7, 8, 9);
        assert_eq!(alpha_blend(Rgba::new(255, 255, 255, 0), dst), dst);
    }

    #[test]
    fn test_half_alpha_over_opaque() {
        // 128/255 of white over black.
        let out = alpha_blend(Rgba::new(255, 255, 255, 128), Rgba::opaque(0, 0, 0));
        assert_eq!(out, Rgba::new(128, 128, 128, 255));
    }

    #[test]
    fn test_partial_over_transparent_keeps_source_color() {
        let out = alpha_blend(Rgba::new(100, 50, 25, 51), Rgba::TRANSPARENT);
        assert_eq!(out, Rgba::new(100, 50, 25, 51));
    }
}
