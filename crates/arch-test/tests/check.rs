//! End-to-end checks against an in-memory module graph.

use arch_test::{Check, CollectingSink, MemoryModules};

/// A small shop application with a layering mistake: billing still pulls
/// in the legacy tax engine.
fn shop() -> MemoryModules {
    MemoryModules::new()
        .module("shop/checkout", ["shop/billing", "shop/util", "shop/checkout/promo"])
        .module("shop/checkout/promo", Vec::<String>::new())
        .module("shop/billing", ["shop/legacy/tax"])
        .module("shop/legacy/tax", Vec::<String>::new())
        .module("shop/util", ["C"])
        .module("shop/catalog", ["shop/util"])
        .module("shop/catalog/search", ["shop/catalog"])
        .test_imports("shop/checkout", ["shop/testsupport/unitkit"])
        .external_test_imports("shop/checkout", ["shop/testsupport/blackbox"])
        .module("shop/testsupport/unitkit", Vec::<String>::new())
        .module("shop/testsupport/blackbox", Vec::<String>::new())
        .module("crypto", Vec::<String>::new())
        .std_module("crypto")
}

fn assert_no_failure(sink: &CollectingSink) {
    assert!(
        sink.is_empty(),
        "check should not have failed but reported:\n{}",
        sink.messages().join("\n")
    );
}

fn assert_failure_chain(sink: &CollectingSink, trace: &[&str]) {
    let messages = sink.messages();
    assert!(!messages.is_empty(), "check did not fail on dependency");

    let mut expected = String::from("forbidden dependency:\n");
    for (depth, name) in trace.iter().enumerate() {
        expected.push_str(&"\t".repeat(depth));
        expected.push_str(name);
        expected.push('\n');
    }
    assert_eq!(messages[0], expected);
}

#[test]
fn succeeds_on_non_dependencies() {
    let modules = shop();
    let sink = CollectingSink::new();

    Check::packages(&modules, &sink, ["shop/catalog"]).should_not_depend_on(["shop/billing"]);

    assert_no_failure(&sink);
}

#[test]
fn fails_on_direct_dependencies() {
    let modules = shop();
    let sink = CollectingSink::new();

    Check::packages(&modules, &sink, ["shop/checkout"]).should_not_depend_on(["shop/billing"]);

    assert_failure_chain(&sink, &["shop/checkout", "shop/billing"]);
}

#[test]
fn fails_on_transitive_dependencies() {
    let modules = shop();
    let sink = CollectingSink::new();

    Check::packages(&modules, &sink, ["shop/checkout"]).should_not_depend_on(["shop/legacy/tax"]);

    assert_failure_chain(
        &sink,
        &["shop/checkout", "shop/billing", "shop/legacy/tax"],
    );
}

#[test]
fn supports_standard_library_targets() {
    let modules = shop().module("shop/util", ["crypto"]);
    let sink = CollectingSink::new();

    Check::packages(&modules, &sink, ["shop/checkout"]).should_not_depend_on(["crypto"]);

    assert_failure_chain(&sink, &["shop/checkout", "shop/util", "crypto"]);
}

#[test]
fn supports_multiple_roots_at_once() {
    let modules = shop();
    let sink = CollectingSink::new();

    let violations = Check::packages(&modules, &sink, ["shop/catalog", "shop/checkout"])
        .should_not_depend_on(["shop/legacy/tax", "shop/nonexistent-target"]);

    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].root(), "shop/checkout");
}

#[test]
fn supports_wildcard_roots_and_targets() {
    let modules = shop();
    let sink = CollectingSink::new();

    Check::packages(&modules, &sink, ["shop/catalog/..."])
        .should_not_depend_on(["shop/legacy/..."]);
    assert_no_failure(&sink);

    Check::packages(&modules, &sink, ["shop/checkout/..."])
        .should_not_depend_on(["shop/legacy/..."]);
    assert_failure_chain(
        &sink,
        &["shop/checkout", "shop/billing", "shop/legacy/tax"],
    );
}

#[test]
fn test_only_imports_need_opt_in() {
    let modules = shop();
    let sink = CollectingSink::new();

    Check::packages(&modules, &sink, ["shop/checkout"])
        .should_not_depend_on(["shop/testsupport/unitkit"]);
    assert_no_failure(&sink);

    Check::packages(&modules, &sink, ["shop/checkout"])
        .include_tests()
        .should_not_depend_on(["shop/testsupport/unitkit"]);
    assert_failure_chain(&sink, &["shop/checkout", "shop/testsupport/unitkit"]);
}

#[test]
fn external_test_imports_render_the_test_variant() {
    let modules = shop();
    let sink = CollectingSink::new();

    Check::packages(&modules, &sink, ["shop/checkout"])
        .include_tests()
        .should_not_depend_on(["shop/testsupport/blackbox"]);

    assert_failure_chain(&sink, &["shop/checkout_test", "shop/testsupport/blackbox"]);
}

#[test]
fn excluding_the_root_skips_the_check() {
    let modules = shop();
    let sink = CollectingSink::new();

    Check::packages(&modules, &sink, ["shop/checkout"])
        .excluding(["shop/checkout"])
        .should_not_depend_on(["shop/billing"]);

    assert_no_failure(&sink);
}

#[test]
fn exclusions_prune_transitive_paths_and_chain() {
    let modules = shop();
    let sink = CollectingSink::new();

    Check::packages(&modules, &sink, ["shop/checkout"])
        .excluding(["some/unrelated/module", "shop/billing"])
        .excluding(["shop/legacy/..."])
        .should_not_depend_on(["shop/legacy/tax"]);

    assert_no_failure(&sink);
}

#[test]
fn direct_rule_ignores_transitive_dependencies() {
    let modules = shop();
    let sink = CollectingSink::new();

    Check::packages(&modules, &sink, ["shop/checkout"])
        .should_not_directly_depend_on(["shop/legacy/tax"]);
    assert_no_failure(&sink);

    Check::packages(&modules, &sink, ["shop/checkout"])
        .should_not_directly_depend_on(["shop/billing"]);
    assert_failure_chain(&sink, &["shop/checkout", "shop/billing"]);
}

#[test]
fn reports_modules_that_do_not_exist() {
    let modules = shop();

    let sink = CollectingSink::new();
    Check::packages(&modules, &sink, ["shop/doesnotexist"])
        .should_not_depend_on(["shop/billing"]);
    let messages = sink.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("failed to resolve module `shop/doesnotexist`"));

    let sink = CollectingSink::new();
    Check::packages(&modules, &sink, ["shop/doesnotexist/..."])
        .should_not_depend_on(["shop/billing"]);
    let messages = sink.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("did not match any modules"));
}

#[test]
fn foreign_imports_are_ignored() {
    let modules = shop();
    let sink = CollectingSink::new();

    // `shop/util` imports the foreign-function sentinel; it must neither
    // be resolved nor reported.
    Check::packages(&modules, &sink, ["shop/checkout"]).should_not_depend_on(["C"]);

    assert_no_failure(&sink);
}
