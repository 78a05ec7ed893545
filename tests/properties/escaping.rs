//! Property tests for string-literal escaping of payloads.

use proptest::prelude::*;

use nbport::domain::services::escape_string_literals;

fn python_ish() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z0-9 =()#'\"\\\\\n]{0,60}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Escaping twice equals escaping once.
    #[test]
    fn property_escaping_is_idempotent(src in python_ish()) {
        let once = escape_string_literals(&src);
        prop_assert_eq!(escape_string_literals(&once), once);
    }

    /// PROPERTY: Text without quotes passes through unchanged.
    #[test]
    fn property_unquoted_text_is_untouched(
        src in proptest::string::string_regex("[a-z0-9 =()\n]{0,60}").unwrap()
    ) {
        prop_assert_eq!(escape_string_literals(&src), src);
    }
}
