use client::alerts::compose_error_message;
use client::connection::{Connection, normalize_base_url};
use client::model::ErrorItem;
use proptest::prelude::*;

#[cfg(test)]
mod url_normalization_properties {
    use super::*;

    proptest! {
        #[test]
        fn test_trailing_backslash_becomes_single_slash(base in "[a-z]{1,12}://[a-z0-9.]{1,20}") {
            let normalized = normalize_base_url(&format!("{base}\\"));
            prop_assert_eq!(normalized, format!("{base}/"));
        }

        #[test]
        fn test_slash_appended_exactly_once(base in "[a-z]{1,12}://[a-z0-9./]{0,20}[a-z0-9]") {
            let normalized = normalize_base_url(&base);
            prop_assert_eq!(&normalized, &format!("{base}/"));
            prop_assert!(!normalized.ends_with("//"));
        }

        #[test]
        fn test_normalization_is_idempotent(raw in "[ -~]{1,40}") {
            let once = normalize_base_url(&raw);
            let twice = normalize_base_url(&once);
            prop_assert!(once.ends_with('/'));
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn test_connection_normalization_matches_function(raw in "[ -~]{1,40}") {
            let conn = Connection::new(raw.clone()).normalized();
            prop_assert_eq!(conn.server_url, normalize_base_url(&raw));
        }
    }
}

#[cfg(test)]
mod error_message_properties {
    use super::*;

    proptest! {
        #[test]
        fn test_message_is_head_plus_sub_messages(
            head in "[A-Za-z]{1,10}",
            subs in prop::collection::vec("[A-Za-z]{1,8}", 0..6)
        ) {
            let item = ErrorItem {
                code: None,
                message: Some(head.clone()),
                errors: subs
                    .iter()
                    .map(|m| ErrorItem { message: Some(m.clone()), ..ErrorItem::default() })
                    .collect(),
            };

            let mut expected = vec![head];
            expected.extend(subs);
            prop_assert_eq!(compose_error_message(&item, "fallback"), expected.join(" "));
        }
    }
}
