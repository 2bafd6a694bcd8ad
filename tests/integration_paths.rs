use portfolio_desk::fs::{PathResolver, canonicalize, join_segments};

#[test]
fn resolution_table() {
    let resolver = PathResolver::default();
    let cases: &[(&str, &[&str])] = &[
        ("/", &[]),
        ("", &[]),
        ("~", &["home", "developer"]),
        ("~/portfolio/", &["home", "developer", "portfolio"]),
        ("/a//b/./c", &["a", "b", "c"]),
        ("/a/b/../../..", &[]),
        ("/../etc", &["etc"]),
    ];
    for (input, expected) in cases {
        assert_eq!(resolver.resolve(input), *expected, "input {input:?}");
    }
}

#[test]
fn canonical_paths_are_fixed_points() {
    let resolver = PathResolver::default();
    for input in ["/", "~", "~/portfolio/../x", "/a/./b//", "/.."] {
        let once = join_segments(&resolver.resolve(input));
        assert_eq!(join_segments(&resolver.resolve(&once)), once, "input {input:?}");
        assert_eq!(canonicalize(&resolver, input), once);
    }
}

#[test]
fn relative_paths_join_the_working_directory() {
    let resolver = PathResolver::default();
    assert_eq!(
        resolver.resolve_from("/home/developer/portfolio", "../docs"),
        ["home", "developer", "docs"]
    );
    assert_eq!(resolver.resolve_from("/tmp", "~"), ["home", "developer"]);
    assert_eq!(resolver.display("/home/developer/portfolio"), "~/portfolio");
}
