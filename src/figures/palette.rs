//! Color handling: hex parsing and the two sequential colormaps the
//! original figures use (YlOrRd for impact, RdYlGn for safety).

use plotters::style::RGBColor;

/// Parse a `#rrggbb` string; compiled-in palettes are the only callers, so a
/// malformed literal falls back to black rather than failing the render.
pub fn hex_color(hex: &str) -> RGBColor {
    let digits = hex.trim_start_matches('#');
    if digits.len() != 6 {
        return RGBColor(0, 0, 0);
    }
    let parse = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).unwrap_or(0);
    RGBColor(parse(0..2), parse(2..4), parse(4..6))
}

/// ColorBrewer YlOrRd anchor ramp (light yellow to dark red).
const YLORRD: [(u8, u8, u8); 9] = [
    (255, 255, 204),
    (255, 237, 160),
    (254, 217, 118),
    (254, 178, 76),
    (253, 141, 60),
    (252, 78, 42),
    (227, 26, 28),
    (189, 0, 38),
    (128, 0, 38),
];

/// ColorBrewer RdYlGn anchor ramp (red through yellow to green).
const RDYLGN: [(u8, u8, u8); 11] = [
    (165, 0, 38),
    (215, 48, 39),
    (244, 109, 67),
    (253, 174, 97),
    (254, 224, 139),
    (255, 255, 191),
    (217, 239, 139),
    (166, 217, 106),
    (102, 189, 99),
    (26, 152, 80),
    (0, 104, 55),
];

/// Sample the YlOrRd ramp at `t` in `[0, 1]`.
pub fn ylorrd(t: f64) -> RGBColor {
    lerp_ramp(&YLORRD, t)
}

/// Sample the RdYlGn ramp at `t` in `[0, 1]`.
pub fn rdylgn(t: f64) -> RGBColor {
    lerp_ramp(&RDYLGN, t)
}

/// Normalize `v` into `[0, 1]` over `[lo, hi]` for colormap lookup.
pub fn normalize(v: f64, lo: f64, hi: f64) -> f64 {
    if hi <= lo {
        return 0.0;
    }
    ((v - lo) / (hi - lo)).clamp(0.0, 1.0)
}

fn lerp_ramp(anchors: &[(u8, u8, u8)], t: f64) -> RGBColor {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let pos = t * (anchors.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        let (r, g, b) = anchors[lo];
        return RGBColor(r, g, b);
    }
    let frac = pos - lo as f64;
    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
    let (r0, g0, b0) = anchors[lo];
    let (r1, g1, b1) = anchors[hi];
    RGBColor(mix(r0, r1), mix(g0, g1), mix(b0, b1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parses_taxonomy_palette() {
        assert_eq!(hex_color("#77a7e5"), RGBColor(0x77, 0xa7, 0xe5));
        assert_eq!(hex_color("#f3effa"), RGBColor(0xf3, 0xef, 0xfa));
        // Malformed input degrades to black.
        assert_eq!(hex_color("nope"), RGBColor(0, 0, 0));
    }

    #[test]
    fn ramps_hit_their_endpoints() {
        assert_eq!(ylorrd(0.0), RGBColor(255, 255, 204));
        assert_eq!(ylorrd(1.0), RGBColor(128, 0, 38));
        assert_eq!(rdylgn(0.0), RGBColor(165, 0, 38));
        assert_eq!(rdylgn(1.0), RGBColor(0, 104, 55));
    }

    #[test]
    fn normalize_clamps_and_guards_degenerate_range() {
        assert!((normalize(5.0, 0.0, 10.0) - 0.5).abs() < 1e-12);
        assert_eq!(normalize(-1.0, 0.0, 10.0), 0.0);
        assert_eq!(normalize(11.0, 0.0, 10.0), 1.0);
        assert_eq!(normalize(3.0, 2.0, 2.0), 0.0);
    }
}
