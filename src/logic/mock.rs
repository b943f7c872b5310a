//! Mock Cookie Generator
//!
//! Sinh cookie giả có label để test nhanh pipeline khi chưa có dữ liệu scraper.
//! Cùng seed → cùng output.

use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde_json::Value;

use crate::logic::cookie::{Category, CookieRecord};

/// (name, base value, secure, httpOnly)
type CookiePattern = (&'static str, &'static str, bool, bool);

/// Category draw weights, `Category::ALL` order
const CATEGORY_WEIGHTS: [u32; 6] = [200, 150, 250, 200, 100, 100];

const ESSENTIAL_PATTERNS: &[CookiePattern] = &[
    ("session_id", "abc123def456", true, true),
    ("csrf_token", "xyz789uvw321", true, true),
    ("auth_token", "token_12345", true, true),
    ("PHPSESSID", "sess_abcdef", false, false),
];

const FUNCTIONAL_PATTERNS: &[CookiePattern] = &[
    ("lang", "en-US", false, false),
    ("theme", "dark", false, false),
    ("cart_items", "3", false, false),
];

const ANALYTICS_PATTERNS: &[CookiePattern] = &[
    ("_ga", "GA1.2.123456789.1234567890", false, false),
    ("_gid", "GA1.2.987654321.0987654321", false, false),
    ("_gat", "1", false, false),
    ("__utma", "111111111.222222222.333333333.444444444.555555555.1", false, false),
];

const ADVERTISING_PATTERNS: &[CookiePattern] = &[
    ("_fbp", "fb.1.1234567890123.1234567890", false, false),
    ("fr", "1234567890abcdef...", false, false),
    ("IDE", "AHWqTUm...", false, false),
    ("id", "a1b2c3d4e5f6", false, false),
];

const SOCIAL_PATTERNS: &[CookiePattern] = &[
    ("c_user", "1234567890", false, false),
    ("datr", "abc123...", false, false),
    ("guest_id", "v1%3A1234567890", false, false),
];

const UNKNOWN_PATTERNS: &[CookiePattern] = &[
    ("random_cookie", "some_value", false, false),
    ("temp_data", "123", false, false),
];

pub const MOCK_DOMAINS: &[&str] = &[
    "example.com",
    "test.com",
    "demo.com",
    "website.com",
    "google.com",
    "facebook.com",
    "twitter.com",
    "linkedin.com",
    "amazon.com",
    "cnn.com",
    "nytimes.com",
    "youtube.com",
];

const SAME_SITE_VALUES: &[&str] = &["Strict", "Lax", "None"];

/// Chance a mock cookie is persistent
const PERSISTENT_PROBABILITY: f64 = 0.7;
const EXPIRATION_RANGE: std::ops::RangeInclusive<u64> = 1_700_000_000..=1_800_000_000;

fn patterns_for(category: Category) -> &'static [CookiePattern] {
    match category {
        Category::Essential => ESSENTIAL_PATTERNS,
        Category::Functional => FUNCTIONAL_PATTERNS,
        Category::Analytics => ANALYTICS_PATTERNS,
        Category::Advertising => ADVERTISING_PATTERNS,
        Category::Social => SOCIAL_PATTERNS,
        Category::Unknown => UNKNOWN_PATTERNS,
    }
}

/// Generate `count` labeled mock cookies from `seed`
pub fn generate_mock_cookies(count: usize, seed: u64) -> Vec<CookieRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut cookies = Vec::with_capacity(count);

    let weights = match WeightedIndex::new(CATEGORY_WEIGHTS) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Invalid mock category weights: {}", e);
            return cookies;
        }
    };

    for _ in 0..count {
        let category = Category::ALL[weights.sample(&mut rng)];
        cookies.push(mock_cookie(&mut rng, category));
    }

    log::debug!("Generated {} mock cookies (seed {})", cookies.len(), seed);
    cookies
}

fn mock_cookie(rng: &mut StdRng, category: Category) -> CookieRecord {
    // Pattern tables and domain lists are non-empty
    let (name, base_value, secure, http_only) =
        patterns_for(category).choose(rng).copied().unwrap_or(UNKNOWN_PATTERNS[0]);
    let domain = MOCK_DOMAINS.choose(rng).copied().unwrap_or(MOCK_DOMAINS[0]);

    let value = format!("{}_{}", base_value, rng.gen_range(1000..=9999));
    let same_site = SAME_SITE_VALUES.choose(rng).copied().unwrap_or("Lax");

    let mut cookie = CookieRecord::new(name, value, domain)
        .with_flags(secure, http_only)
        .with_same_site(same_site)
        .with_label(category);

    if rng.gen_bool(PERSISTENT_PROBABILITY) {
        cookie = cookie.with_expiration(rng.gen_range(EXPIRATION_RANGE) as f64);
    }

    let source = MOCK_DOMAINS.choose(rng).copied().unwrap_or(domain);
    cookie
        .extra
        .insert("source_url".to_string(), Value::String(format!("https://{}", source)));

    cookie.with_host_only(rng.gen_bool(0.5))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::pipeline::LabelDistribution;

    #[test]
    fn test_count_and_determinism() {
        let a = generate_mock_cookies(50, 7);
        let b = generate_mock_cookies(50, 7);
        assert_eq!(a.len(), 50);
        assert_eq!(a, b);

        let c = generate_mock_cookies(50, 8);
        assert_ne!(a, c);
    }

    #[test]
    fn test_zero_count() {
        assert!(generate_mock_cookies(0, 1).is_empty());
    }

    #[test]
    fn test_cookie_shape() {
        for cookie in generate_mock_cookies(200, 42) {
            let category = cookie.label.unwrap();
            let pattern = patterns_for(category)
                .iter()
                .find(|p| p.0 == cookie.name)
                .unwrap();

            assert_eq!(cookie.secure, pattern.2);
            assert_eq!(cookie.http_only, pattern.3);
            assert!(MOCK_DOMAINS.contains(&cookie.domain.as_str()));
            assert_eq!(cookie.path, "/");

            let suffix = cookie.value.rsplit('_').next().unwrap();
            let n: u32 = suffix.parse().unwrap();
            assert!((1000..=9999).contains(&n));

            assert!(SAME_SITE_VALUES.contains(&cookie.same_site.as_deref().unwrap()));

            if let Some(secs) = cookie.expiration_date.as_ref().and_then(|e| e.epoch_seconds()) {
                assert!((1.7e9..=1.8e9).contains(&secs));
            }

            let url = cookie.extra["source_url"].as_str().unwrap();
            assert!(url.starts_with("https://"));
        }
    }

    #[test]
    fn test_weights_roughly_followed() {
        let cookies = generate_mock_cookies(5000, 3);
        let dist = LabelDistribution::from_records(&cookies);

        // analytics weight 250/1000, social 100/1000
        assert!(dist.count(Category::Analytics) > dist.count(Category::Social));
        assert!(dist.count(Category::Essential) > dist.count(Category::Unknown));
        assert_eq!(dist.total(), 5000);

        let sessions = cookies.iter().filter(|c| c.is_session()).count();
        assert!(sessions > 1000 && sessions < 2000);
    }

    #[test]
    fn test_round_trips_through_json() {
        let cookies = generate_mock_cookies(20, 11);
        let json = serde_json::to_string(&cookies).unwrap();
        let back: Vec<CookieRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), 20);
        assert_eq!(back[3].label, cookies[3].label);
        assert_eq!(back[3].extra.get("source_url"), cookies[3].extra.get("source_url"));
    }
}
