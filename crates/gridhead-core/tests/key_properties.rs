//! Property checks for column key derivation.

use gridhead_core::{ColumnDefinition, key_from_object, key_generator};
use proptest::prelude::*;

proptest! {
    #[test]
    fn key_depends_only_on_identity(
        name in "[A-Za-z ]{0,12}",
        value in proptest::option::of("[a-z_]{0,8}"),
        width in 1.0f64..100.0,
        resizable in any::<bool>(),
    ) {
        let mut column = ColumnDefinition::new(name.clone()).width(width).resizable(resizable);
        if let Some(value) = &value {
            column = column.value(value.clone());
        }
        prop_assert_eq!(key_from_object(&column), key_generator(&name, value.as_deref()));
    }

    #[test]
    fn distinct_identities_get_distinct_keys(
        a in ("[a-z]{0,6}", proptest::option::of("[a-z]{0,6}")),
        b in ("[a-z]{0,6}", proptest::option::of("[a-z]{0,6}")),
    ) {
        prop_assume!(a != b);
        prop_assert_ne!(
            key_generator(&a.0, a.1.as_deref()),
            key_generator(&b.0, b.1.as_deref())
        );
    }
}
