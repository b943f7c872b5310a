//! Integration Tests for Feature Extraction
//!
//! Kiểm tra extractor, pattern library và layout hoạt động đúng khi kết hợp.

#[cfg(test)]
mod integration_tests {
    use crate::logic::cookie::CookieRecord;
    use crate::logic::features::{
        feature_names, features_to_vector, Feature, FeatureExtractor, PatternLibrary,
        FEATURE_COUNT,
    };

    const NOW: f64 = 1_750_000_000.0;

    /// Realistic Google Analytics cookie
    #[test]
    fn test_google_analytics_cookie() {
        let record = CookieRecord::new("_ga", "GA1.2.123456789.1234567890", ".google.com")
            .with_same_site("None")
            .with_expiration(NOW + 730.0 * 86_400.0);

        let vector = FeatureExtractor::default().extract_vector_at(&record, NOW);
        let v = vector.as_slice();

        assert_eq!(v[0], 3.0); // nameLength
        assert_eq!(v[1], 26.0); // valueLength
        assert_eq!(v[4], 0.0); // sameSite None
        assert_eq!(v[5], 0.0); // not session
        assert!((v[6] - 730.0).abs() < 1e-3);
        assert_eq!(v[8], 2.0); // ".google.com"
        assert_eq!(v[11], 1.0); // tracking
        assert_eq!(v[13], 0.0); // no uuid
        assert_eq!(v[15], 0.0); // dots break base64
    }

    /// Secure session cookie with PII in the value
    #[test]
    fn test_pii_session_cookie() {
        let record = CookieRecord::new("PHPSESSID", "user=jane.doe@mail.example.org", "shop.example.org")
            .with_flags(true, true)
            .with_same_site("Strict")
            .with_host_only(true);

        let map = FeatureExtractor::default().extract_features_at(&record, NOW);

        assert_eq!(map.get(Feature::HasSecure), Some(1.0));
        assert_eq!(map.get(Feature::HasHttpOnly), Some(1.0));
        assert_eq!(map.get(Feature::SameSite), Some(2.0));
        assert_eq!(map.get(Feature::IsSession), Some(1.0));
        assert_eq!(map.get(Feature::IsFirstParty), Some(1.0));
        assert_eq!(map.get(Feature::HasPii), Some(1.0));
        // prefix patterns need the start of the name
        assert_eq!(map.get(Feature::MatchesTrackingPattern), Some(0.0));
    }

    /// Record decoded from JSON with most fields missing
    #[test]
    fn test_sparse_json_record() {
        let record: CookieRecord = serde_json::from_str(r#"{"value": "42"}"#).unwrap();
        let map = FeatureExtractor::default().extract_features_at(&record, NOW);

        assert_eq!(map.len(), FEATURE_COUNT);
        assert_eq!(map.get(Feature::NameLength), Some(0.0));
        assert_eq!(map.get(Feature::HasNumericOnly), Some(1.0));
        assert_eq!(map.get(Feature::IsSession), Some(1.0));
        assert_eq!(map.get(Feature::DomainDepth), Some(0.0));
    }

    /// Custom library instance gives the same output as the shared one
    #[test]
    fn test_owned_library_matches_shared() {
        let owned = PatternLibrary::compile().unwrap();
        let record = CookieRecord::new("tracker_uid", "dXNlcjoxMjM0NTY3ODkwYWJjZGVm", "t.co");

        let a = FeatureExtractor::new(&owned).extract_features_at(&record, NOW);
        let b = FeatureExtractor::default().extract_features_at(&record, NOW);
        assert_eq!(a, b);
        assert_eq!(a.get(Feature::HasBase64), Some(1.0));
    }

    /// Names and vector slots never drift
    #[test]
    fn test_names_and_vector_share_schema() {
        let record = CookieRecord::new("uid", "a1b2c3", "x.y.z");
        let map = FeatureExtractor::default().extract_features_at(&record, NOW);
        let vector = features_to_vector(&map);

        for (i, name) in feature_names().iter().enumerate() {
            assert_eq!(vector.get_by_name(name), Some(vector.values[i]));
            assert_eq!(map.get_by_name(name).map(|v| v as f32), Some(vector.values[i]));
        }
    }
}
