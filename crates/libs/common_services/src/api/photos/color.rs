use std::collections::HashMap;
use std::sync::LazyLock;

/// Color names accepted from clients, mapped to hex. Anything not in this
/// table falls back to extraction from the image bytes.
static NAMED_COLORS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("black", "#000000"),
        ("white", "#FFFFFF"),
        ("gray", "#808080"),
        ("grey", "#808080"),
        ("red", "#FF0000"),
        ("green", "#00FF00"),
        ("blue", "#0000FF"),
        ("yellow", "#FFFF00"),
        ("orange", "#FFA500"),
        ("purple", "#800080"),
        ("pink", "#FFC0CB"),
        ("brown", "#A52A2A"),
        ("coral", "#FF7F50"),
        ("crimson", "#DC143C"),
        ("maroon", "#800000"),
        ("navy", "#000080"),
        ("teal", "#008080"),
        ("turquoise", "#40E0D0"),
        ("cyan", "#00FFFF"),
        ("olive", "#808000"),
        ("lime", "#32CD32"),
        ("mint", "#98FF98"),
        ("emerald", "#50C878"),
        ("gold", "#FFD700"),
        ("beige", "#F5F5DC"),
        ("cream", "#FFFDD0"),
        ("violet", "#EE82EE"),
        ("lilac", "#C8A2C8"),
        ("magenta", "#FF00FF"),
        ("lavender", "#E6E6FA"),
        ("salmon", "#FA8072"),
        ("indigo", "#4B0082"),
        ("silver", "#C0C0C0"),
    ])
});

/// Normalizes a client-supplied color to `#RRGGBB`. Accepts hex values
/// directly and known color names; returns `None` for anything else.
#[must_use]
pub fn normalize_color(input: &str) -> Option<String> {
    let trimmed = input.trim();

    if let Some(hex) = trimmed.strip_prefix('#')
        && hex.len() == 6
        && hex.chars().all(|c| c.is_ascii_hexdigit())
    {
        return Some(format!("#{}", hex.to_ascii_uppercase()));
    }

    NAMED_COLORS
        .get(trimmed.to_ascii_lowercase().as_str())
        .map(|hex| (*hex).to_owned())
}

/// Extracts the predominant color of an image as `#RRGGBB`.
///
/// The image is shrunk to a small thumbnail, pixels are binned on their
/// high color bits, and the pixels of the fullest bin are averaged.
/// Returns `None` when the bytes cannot be decoded as an image.
#[must_use]
pub fn predominant_color(bytes: &[u8]) -> Option<String> {
    let img = image::load_from_memory(bytes).ok()?;
    let thumb = img.thumbnail(32, 32).to_rgba8();

    let mut bins: HashMap<(u8, u8, u8), (u64, u64, u64, u64)> = HashMap::new();
    for pixel in thumb.pixels() {
        let [r, g, b, a] = pixel.0;
        if a < 128 {
            continue;
        }
        let bin = (r >> 5, g >> 5, b >> 5);
        let entry = bins.entry(bin).or_insert((0, 0, 0, 0));
        entry.0 += u64::from(r);
        entry.1 += u64::from(g);
        entry.2 += u64::from(b);
        entry.3 += 1;
    }

    let (r_sum, g_sum, b_sum, count) = bins.into_values().max_by_key(|entry| entry.3)?;
    if count == 0 {
        return None;
    }
    Some(format!(
        "#{:02X}{:02X}{:02X}",
        r_sum / count,
        g_sum / count,
        b_sum / count
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, ImageFormat, Rgba};
    use std::io::Cursor;

    #[test]
    fn hex_values_pass_through_normalized() {
        assert_eq!(normalize_color("#ff8800"), Some("#FF8800".to_owned()));
        assert_eq!(normalize_color("  #AbCdEf "), Some("#ABCDEF".to_owned()));
    }

    #[test]
    fn known_names_map_to_hex() {
        assert_eq!(normalize_color("red"), Some("#FF0000".to_owned()));
        assert_eq!(normalize_color(" Navy "), Some("#000080".to_owned()));
    }

    #[test]
    fn unknown_values_are_rejected() {
        assert!(normalize_color("not a color").is_none());
        assert!(normalize_color("#12345").is_none());
        assert!(normalize_color("#12345G").is_none());
    }

    #[test]
    fn solid_image_yields_its_color() {
        let img = ImageBuffer::from_pixel(8, 8, Rgba([255u8, 0, 0, 255]));
        let mut bytes = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut bytes, ImageFormat::Png)
            .expect("encode png");
        assert_eq!(
            predominant_color(bytes.get_ref()),
            Some("#FF0000".to_owned())
        );
    }

    #[test]
    fn undecodable_bytes_yield_none() {
        assert!(predominant_color(b"not an image").is_none());
    }
}
