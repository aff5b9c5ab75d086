//! Integration Tests for Feature Extraction
//!
//! Runs normalize + extract together on realistic URLs.

#[cfg(test)]
mod integration_tests {
    use crate::logic::features::{extract, FEATURE_COUNT, FEATURE_LAYOUT};
    use crate::logic::url::normalize;

    fn features_of(raw: &str) -> crate::logic::features::FeatureVector {
        let parsed = normalize(raw).unwrap();
        extract(&parsed, &parsed.normalized)
    }

    #[test]
    fn test_google_home() {
        let v = features_of("https://www.google.com");
        assert_eq!(v.get_by_name("length"), Some(22));
        assert_eq!(v.get_by_name("num_dots"), Some(2));
        assert_eq!(v.get_by_name("has_https"), Some(1));
        assert_eq!(v.get_by_name("has_at"), Some(0));
        assert_eq!(v.get_by_name("has_dash"), Some(0));
        assert_eq!(v.get_by_name("num_digits"), Some(0));
        assert_eq!(v.get_by_name("has_ip"), Some(0));
        assert_eq!(v.get_by_name("num_subdirs"), Some(0));
        assert_eq!(v.get_by_name("hostname_length"), Some(14));
        assert_eq!(v.get_by_name("path_length"), Some(0));
        assert_eq!(v.get_by_name("num_dots_domain"), Some(2));
    }

    #[test]
    fn test_ip_host_with_deep_path() {
        let v = features_of("http://192.168.1.1/a/b/c");
        assert_eq!(v.get_by_name("has_ip"), Some(1));
        assert_eq!(v.get_by_name("has_https"), Some(0));
        assert_eq!(v.get_by_name("num_subdirs"), Some(2));
        assert_eq!(v.get_by_name("path_length"), Some(6));
        assert_eq!(v.get_by_name("num_digits"), Some(8));
        assert_eq!(v.get_by_name("num_dots"), Some(3));
    }

    #[test]
    fn test_counts_use_repaired_url() {
        // Backslashes and the missing slash are fixed before counting
        let v = features_of(r"http:/evil-site.com\login");
        assert_eq!(v.get_by_name("length"), Some(26));
        assert_eq!(v.get_by_name("has_dash"), Some(1));
        assert_eq!(v.get_by_name("path_length"), Some(6));
    }

    #[test]
    fn test_redirect_target_in_query_is_repaired_too() {
        let v = features_of("http:/a.com/r?next=http:/b.com");
        assert_eq!(v.get_by_name("length"), Some(32));
        assert_eq!(v.get_by_name("num_dots"), Some(2));
        assert_eq!(v.get_by_name("path_length"), Some(2));
    }

    #[test]
    fn test_tab_inside_host_counts_in_length_only() {
        let v = features_of("http://goo\tgle.com/");
        assert_eq!(v.get_by_name("length"), Some(19));
        assert_eq!(v.get_by_name("hostname_length"), Some(10));
        assert_eq!(v.get_by_name("path_length"), Some(1));
    }

    #[test]
    fn test_credential_trick_host() {
        let v = features_of("http://paypal.com@203.0.113.9/verify");
        assert_eq!(v.get_by_name("has_at"), Some(1));
        // Whole netloc is not a dotted quad
        assert_eq!(v.get_by_name("has_ip"), Some(0));
    }

    #[test]
    fn test_all_fields_present_and_deterministic() {
        let a = features_of("https://secure-login.example.com/account/update?id=42");
        let b = features_of("https://secure-login.example.com/account/update?id=42");
        assert_eq!(a, b);
        assert_eq!(a.values.len(), FEATURE_COUNT);

        let json = serde_json::to_value(&a).unwrap();
        let map = json.as_object().unwrap();
        assert_eq!(map.len(), FEATURE_COUNT);
        for name in FEATURE_LAYOUT {
            assert!(map.contains_key(*name), "missing {}", name);
        }
    }
}
