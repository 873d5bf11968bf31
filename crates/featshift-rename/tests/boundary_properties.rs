//! Property tests for boundary-safe rewriting

use featshift_rename::{BoundaryMatcher, RenameTable, RuleBook};
use featshift_ident::SpecVersion;
use proptest::prelude::*;

fn token() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["foo.Bar", "foo.bar", "xfoo.Bar", "foo", "foo.barbaz", "foo_1", "Baz"])
}

fn expected(token: &str) -> &str {
    match token {
        "foo.Bar" => "baz.Bar",
        "foo" => "baz",
        other => other,
    }
}

proptest! {
    #[test]
    fn prop_space_separated_tokens_rewrite_independently(
        tokens in prop::collection::vec(token(), 0..20)
    ) {
        let table = RenameTable::from_pairs([("foo", "baz")]);
        let text = tokens.join(" ");
        let want: Vec<&str> = tokens.iter().map(|t| expected(t)).collect();

        prop_assert_eq!(BoundaryMatcher::new().rewrite(&text, &table), want.join(" "));
    }

    #[test]
    fn prop_identifier_prefix_blocks_rewrite(
        prefix in "[a-zA-Z0-9_$]{1,4}",
        suffix in "[.A-Z0-9 ]{0,6}"
    ) {
        let table = RenameTable::from_pairs([("foo", "baz"), ("foo.*", "baz")]);
        let text = format!("{prefix}foo{suffix}");

        prop_assert_eq!(BoundaryMatcher::new().rewrite(&text, &table), text);
    }

    #[test]
    fn prop_text_without_key_unchanged(text in "[a-z .A-Z]{0,40}") {
        prop_assume!(!text.contains("javax"));
        let book = RuleBook::builtin();
        let table = book.for_version(SpecVersion::Ee10).unwrap();

        prop_assert_eq!(BoundaryMatcher::new().rewrite(&text, table), text);
    }

    #[test]
    fn prop_jakarta_rewrite_is_idempotent(
        parts in prop::collection::vec(
            prop::sample::select(vec![
                "javax.el.ELException", "javax.servlet.http.HttpServlet", "javax.elx",
                "javax.transaction.xa.Xid", "jakarta.el.ELContext", " ", ",", "(", "x",
            ]),
            0..16
        )
    ) {
        let book = RuleBook::builtin();
        let table = book.for_version(SpecVersion::Ee9).unwrap();
        let matcher = BoundaryMatcher::new();

        let once = matcher.rewrite(&parts.concat(), table);
        let twice = matcher.rewrite(&once, table);
        prop_assert_eq!(once, twice);
    }
}

#[test]
fn wildcard_sub_package_property() {
    let table = RenameTable::from_pairs([("com.old.*", "com.new")]);
    assert_eq!(
        BoundaryMatcher::new().rewrite("com.old.util.Thing", &table),
        "com.new.util.Thing"
    );
}
