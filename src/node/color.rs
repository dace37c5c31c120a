use crate::node::node_model::Rgb;

/// Parse `#RGB` or `#RRGGBB` (leading `#` optional) into a 0..=1 triple.
/// The short form doubles each nibble.
pub fn parse_hex(hex: &str) -> Option<Rgb> {
    let digits = hex.trim().trim_start_matches('#');
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return None,
    };

    let channel = |i: usize| -> Option<f64> {
        u8::from_str_radix(&expanded[i..i + 2], 16)
            .ok()
            .map(|v| f64::from(v) / 255.0)
    };

    Some(Rgb {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
    })
}

/// Lower-case `#rrggbb` for a 0..=1 triple.
pub fn to_hex(color: &Rgb) -> String {
    let byte = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "#{:02x}{:02x}{:02x}",
        byte(color.r),
        byte(color.g),
        byte(color.b)
    )
}

/// Colours compare equal when they encode to the same 8-bit hex.
pub fn same_color(a: &Rgb, b: &Rgb) -> bool {
    to_hex(a) == to_hex(b)
}
