use unicode_width::UnicodeWidthChar;
use url::Url;

/// Safely truncate a string, ensuring it is not truncated in the middle of
/// multi-byte characters
///
/// This function will:
/// 1. Correctly handle Unicode characters (including CJK, emoji, etc.)
/// 2. Add ellipsis when maximum length is reached
/// 3. Ensure the output string's display width does not exceed the specified length
#[allow(dead_code)]
pub fn truncate_str(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthStr;

    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(1);

        if current_width + char_width + 3 > max_width {
            break;
        }

        result.push(c);
        current_width += char_width;
    }

    result.push_str("...");
    result
}

/// Best-effort product display name from a marketplace URL.
///
/// Amazon and Flipkart review URLs carry the product slug in the path
/// segment before `product-reviews`; elsewhere the first path segment is
/// the closest thing available. Dashes become spaces. An unparseable URL
/// yields an empty name.
pub fn product_slug(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return String::new();
    };
    let Some(segments) = parsed.path_segments() else {
        return String::new();
    };
    let segments: Vec<&str> = segments.filter(|s| !s.is_empty()).collect();

    let slug = match segments.iter().position(|s| *s == "product-reviews") {
        Some(i) if i > 0 => segments.get(i - 1).copied(),
        Some(_) => None,
        // Snapdeal paths look like /product/<slug>/<id>.
        None if segments.first() == Some(&"product") => segments.get(1).copied(),
        None => segments.first().copied(),
    };

    slug.map(|s| s.replace('-', " ")).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("Hello, world!", 10), "Hello, ...");
        assert_eq!(truncate_str("你好，世界！", 8), "你好...");
        assert_eq!(truncate_str("Hello 你好！", 10), "Hello ...");
        assert_eq!(truncate_str("Hi!", 10), "Hi!");
    }

    #[test]
    fn slug_comes_from_the_segment_before_product_reviews() {
        assert_eq!(
            product_slug("https://www.amazon.in/Omron-HEM-7120/product-reviews/B00BBD1TMM"),
            "Omron HEM 7120"
        );
        assert_eq!(
            product_slug("https://www.flipkart.com/galaxy-s22/product-reviews/itm123?pid=1"),
            "galaxy s22"
        );
    }

    #[test]
    fn slug_skips_snapdeals_product_prefix() {
        assert_eq!(
            product_slug("https://www.snapdeal.com/product/omron-hem-7120/987"),
            "omron hem 7120"
        );
    }

    #[test]
    fn slug_falls_back_to_the_first_path_segment() {
        assert_eq!(
            product_slug("https://www.amazon.in/Omron-HEM-7120?th=1"),
            "Omron HEM 7120"
        );
    }

    #[test]
    fn slug_is_empty_for_unparseable_urls() {
        assert_eq!(product_slug("not a url"), "");
        assert_eq!(product_slug("https://www.amazon.in"), "");
    }
}
