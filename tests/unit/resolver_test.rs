//! Tests for the GlobSetResolver
//!
//! The resolver expands declarations against their base directories and
//! produces an ordered, duplicate-free list of absolute paths.

use std::path::{Path, PathBuf};

use scanset::error::{ConfigError, PatternError, ResolveError};
use scanset::models::ContentDeclaration;
use scanset::resolver::{BaseDirs, GlobSetResolver, ResolveOptions};

use crate::common::TestTree;

fn resolve_relative(
    tree: &TestTree,
    declarations: &[ContentDeclaration],
) -> Result<Vec<PathBuf>, ResolveError> {
    let base_dirs: BaseDirs = (0..declarations.len()).map(|i| (i, tree.path())).collect();
    GlobSetResolver::new(tree.path())
        .resolve(declarations, &base_dirs)
        .map(scanset::ResolvedFileSet::into_vec)
}

// =============================================================================
// Expansion Tests
// =============================================================================

#[test]
fn recursive_glob_excludes_other_extensions() {
    let tree = TestTree::new();
    let files =
        resolve_relative(&tree, &[ContentDeclaration::relative(["./src/**/*.rs"])]).unwrap();
    assert_eq!(files, vec![tree.abs("src/a.rs"), tree.abs("src/b/c.rs")]);
}

#[test]
fn results_are_absolute() {
    let tree = TestTree::new();
    let files = resolve_relative(&tree, &[ContentDeclaration::relative(["src/**/*"])]).unwrap();
    assert!(!files.is_empty());
    assert!(files.iter().all(|p| p.is_absolute()));
}

#[test]
fn single_star_stays_in_directory() {
    let tree = TestTree::new();
    let files = resolve_relative(&tree, &[ContentDeclaration::relative(["src/*.rs"])]).unwrap();
    assert_eq!(files, vec![tree.abs("src/a.rs")]);
}

#[test]
fn glob_at_root_level() {
    let tree = TestTree::new();
    let files = resolve_relative(&tree, &[ContentDeclaration::relative(["*.md"])]).unwrap();
    assert_eq!(files, vec![tree.abs("README.md")]);
}

#[test]
fn literal_file_pattern() {
    let tree = TestTree::new();
    let files =
        resolve_relative(&tree, &[ContentDeclaration::relative(["./src/d.txt", "missing.rs"])])
            .unwrap();
    assert_eq!(files, vec![tree.abs("src/d.txt")]);
}

#[test]
fn brace_group_matches_each_alternative() {
    let tree = TestTree::new();
    tree.add_file("src/b.html", "<div class=\"m-2\"></div>\n");
    let files =
        resolve_relative(&tree, &[ContentDeclaration::relative(["./src/**/*.{rs,html}"])]).unwrap();
    assert_eq!(files, vec![tree.abs("src/a.rs"), tree.abs("src/b/c.rs"), tree.abs("src/b.html")]);
}

#[test]
fn brace_group_in_exclusion() {
    let tree = TestTree::new();
    tree.add_file("src/e/f.rs", "");
    let files = resolve_relative(
        &tree,
        &[ContentDeclaration::relative(["src/**/*.rs", "!src/{b,e}/**"])],
    )
    .unwrap();
    assert_eq!(files, vec![tree.abs("src/a.rs")]);
}

#[cfg(unix)]
#[test]
fn backslash_in_file_name_matches_literally() {
    let tree = TestTree::new();
    let odd = tree.add_file("src/a\\b.rs", "");
    let files =
        resolve_relative(&tree, &[ContentDeclaration::relative(["src/a\\b.rs", "src/*\\b.rs"])])
            .unwrap();
    assert_eq!(files, vec![odd]);
}

#[test]
fn zero_matches_is_not_an_error() {
    let tree = TestTree::new();
    let files = resolve_relative(&tree, &[ContentDeclaration::relative(["src/**/*.vue"])]).unwrap();
    assert!(files.is_empty());
}

#[test]
fn missing_pattern_root_contributes_nothing() {
    let tree = TestTree::new();
    let files = resolve_relative(
        &tree,
        &[ContentDeclaration::relative(["./app/src/**/*.rs", "./src/*.rs"])],
    )
    .unwrap();
    assert_eq!(files, vec![tree.abs("src/a.rs")]);
}

#[test]
fn parent_dir_pattern() {
    let tree = TestTree::new();
    let app = tree.add_dir("app");
    let declarations = vec![ContentDeclaration::relative(["../src/**/*.rs"])];
    let mut base_dirs = BaseDirs::new();
    base_dirs.insert(0, app);

    let files = GlobSetResolver::new(tree.path()).resolve(&declarations, &base_dirs).unwrap();
    assert_eq!(files.as_slice(), &[tree.abs("src/a.rs"), tree.abs("src/b/c.rs")]);
}

#[test]
fn non_relative_resolves_against_cwd() {
    let tree = TestTree::new();
    let other = tree.add_dir("elsewhere");
    let declarations = vec![ContentDeclaration::new(false, ["src/*.rs"])];
    let mut base_dirs = BaseDirs::new();
    // Ignored for non-relative declarations
    base_dirs.insert(0, other);

    let files = GlobSetResolver::new(tree.path()).resolve(&declarations, &base_dirs).unwrap();
    assert_eq!(files.as_slice(), &[tree.abs("src/a.rs")]);
}

#[test]
fn non_relative_needs_no_base_dir() {
    let tree = TestTree::new();
    let declarations = vec![ContentDeclaration::new(false, ["*.md"])];
    let files = GlobSetResolver::new(tree.path()).resolve(&declarations, &BaseDirs::new()).unwrap();
    assert_eq!(files.len(), 1);
}

// =============================================================================
// Ordering and Deduplication Tests
// =============================================================================

#[test]
fn shared_file_appears_once_at_first_position() {
    let tree = TestTree::new();
    let files = resolve_relative(
        &tree,
        &[
            ContentDeclaration::relative(["src/b/*.rs"]),
            ContentDeclaration::relative(["src/**/*.rs"]),
        ],
    )
    .unwrap();
    assert_eq!(files, vec![tree.abs("src/b/c.rs"), tree.abs("src/a.rs")]);
}

#[test]
fn overlapping_patterns_in_one_declaration() {
    let tree = TestTree::new();
    let files = resolve_relative(
        &tree,
        &[ContentDeclaration::relative(["src/**/*.rs", "src/*.rs", "./src/a.rs"])],
    )
    .unwrap();
    assert_eq!(files, vec![tree.abs("src/a.rs"), tree.abs("src/b/c.rs")]);
}

#[test]
fn declaration_order_decides_position() {
    let tree = TestTree::new();
    let forward = resolve_relative(
        &tree,
        &[ContentDeclaration::relative(["*.md"]), ContentDeclaration::relative(["src/*.rs"])],
    )
    .unwrap();
    let backward = resolve_relative(
        &tree,
        &[ContentDeclaration::relative(["src/*.rs"]), ContentDeclaration::relative(["*.md"])],
    )
    .unwrap();
    assert_eq!(forward, vec![tree.abs("README.md"), tree.abs("src/a.rs")]);
    assert_eq!(backward, vec![tree.abs("src/a.rs"), tree.abs("README.md")]);
}

#[test]
fn repeated_resolution_is_identical() {
    let tree = TestTree::new();
    tree.add_file("src/z/y/x.rs", "");
    tree.add_file("src/m.rs", "");
    let declarations = [ContentDeclaration::relative(["src/**/*.rs"])];
    let first = resolve_relative(&tree, &declarations).unwrap();
    let second = resolve_relative(&tree, &declarations).unwrap();
    assert_eq!(first, second);
}

#[test]
fn resolution_reflects_new_files() {
    let tree = TestTree::new();
    let declarations = [ContentDeclaration::relative(["src/**/*.rs"])];
    assert_eq!(resolve_relative(&tree, &declarations).unwrap().len(), 2);

    tree.add_file("src/new.rs", "");
    assert_eq!(resolve_relative(&tree, &declarations).unwrap().len(), 3);
}

#[test]
fn workspace_and_app_declarations_stay_independent() {
    // A workspace-level config and an app-level config naming the same files
    // through different relative depths
    let tree = TestTree::empty();
    tree.add_file("app/src/main.rs", "");
    tree.add_file("app/src/view/page.rs", "");

    let declarations = vec![
        ContentDeclaration::relative(["./app/src/**/*.rs"]),
        ContentDeclaration::relative(["./src/**/*.rs"]),
    ];
    let base_dirs: BaseDirs =
        [(0, tree.path().to_path_buf()), (1, tree.abs("app"))].into_iter().collect();

    let files = GlobSetResolver::new(tree.path()).resolve(&declarations, &base_dirs).unwrap();
    assert_eq!(
        files.as_slice(),
        &[tree.abs("app/src/main.rs"), tree.abs("app/src/view/page.rs")]
    );
}

// =============================================================================
// Exclusion and Hidden Entry Tests
// =============================================================================

#[test]
fn exclusion_pattern_removes_files() {
    let tree = TestTree::new();
    let files = resolve_relative(
        &tree,
        &[ContentDeclaration::relative(["src/**/*.rs", "!src/b/**"])],
    )
    .unwrap();
    assert_eq!(files, vec![tree.abs("src/a.rs")]);
}

#[test]
fn exclusion_is_scoped_to_its_declaration() {
    let tree = TestTree::new();
    let files = resolve_relative(
        &tree,
        &[
            ContentDeclaration::relative(["src/**/*.rs", "!src/b/**"]),
            ContentDeclaration::relative(["src/b/*.rs"]),
        ],
    )
    .unwrap();
    assert_eq!(files, vec![tree.abs("src/a.rs"), tree.abs("src/b/c.rs")]);
}

#[test]
fn hidden_entries_skipped_by_default() {
    let tree = TestTree::new();
    tree.add_file("src/.cache/gen.rs", "");
    tree.add_file("src/.hidden.rs", "");
    let files = resolve_relative(&tree, &[ContentDeclaration::relative(["src/**/*.rs"])]).unwrap();
    assert!(!files.contains(&tree.abs("src/.cache/gen.rs")));
    assert!(!files.contains(&tree.abs("src/.hidden.rs")));
}

#[test]
fn hidden_entries_included_when_enabled() {
    let tree = TestTree::new();
    tree.add_file("src/.cache/gen.rs", "");
    let declarations = vec![ContentDeclaration::relative(["src/**/*.rs"])];
    let base_dirs: BaseDirs = [(0, tree.path())].into_iter().collect();

    let resolver = GlobSetResolver::new(tree.path()).with_options(ResolveOptions {
        follow_links: true,
        include_hidden: true,
    });
    let files = resolver.resolve(&declarations, &base_dirs).unwrap();
    assert!(files.contains(tree.abs("src/.cache/gen.rs")));
}

#[test]
fn hidden_literal_root_is_walked() {
    let tree = TestTree::new();
    tree.add_file(".storybook/preview.rs", "");
    let files =
        resolve_relative(&tree, &[ContentDeclaration::relative([".storybook/*.rs"])]).unwrap();
    assert_eq!(files, vec![tree.abs(".storybook/preview.rs")]);
}

#[cfg(unix)]
#[test]
fn symlinked_root_dedups_with_target() {
    let tree = TestTree::new();
    std::os::unix::fs::symlink(tree.abs("src"), tree.abs("linked")).unwrap();
    let files = resolve_relative(
        &tree,
        &[
            ContentDeclaration::relative(["src/*.rs"]),
            ContentDeclaration::relative(["linked/*.rs"]),
        ],
    )
    .unwrap();
    assert_eq!(files, vec![tree.abs("src/a.rs")]);
}

#[cfg(unix)]
#[test]
fn symlinked_subdir_yields_canonical_paths_once() {
    let tree = TestTree::new();
    std::os::unix::fs::symlink(tree.abs("src"), tree.abs("view")).unwrap();
    let files = resolve_relative(&tree, &[ContentDeclaration::relative(["./**/*.rs"])]).unwrap();
    assert_eq!(files, vec![tree.abs("src/a.rs"), tree.abs("src/b/c.rs")]);
}

#[cfg(unix)]
#[test]
fn exclusion_through_symlinked_dir() {
    let tree = TestTree::empty();
    tree.add_file("src/a.rs", "");
    tree.add_file("lib/z.rs", "");
    std::os::unix::fs::symlink(tree.abs("src"), tree.abs("view")).unwrap();

    // view/a.rs and src/a.rs are one file; excluding it by either name drops it
    let files = resolve_relative(
        &tree,
        &[ContentDeclaration::relative(["./**/*.rs", "!./view/**"])],
    )
    .unwrap();
    assert_eq!(files, vec![tree.abs("lib/z.rs")]);

    let files = resolve_relative(
        &tree,
        &[ContentDeclaration::relative(["./**/*.rs", "!./src/**"])],
    )
    .unwrap();
    assert_eq!(files, vec![tree.abs("lib/z.rs")]);
}

// =============================================================================
// Error Tests
// =============================================================================

#[test]
fn empty_files_is_pattern_error() {
    let tree = TestTree::new();
    let err = resolve_relative(&tree, &[ContentDeclaration::relative(Vec::<String>::new())])
        .unwrap_err();
    assert!(matches!(err, ResolveError::Pattern(PatternError::EmptyFiles { index: 0 })));
}

#[test]
fn malformed_glob_is_pattern_error() {
    let tree = TestTree::new();
    let err = resolve_relative(&tree, &[ContentDeclaration::relative(["src/[a.rs"])]).unwrap_err();
    assert!(matches!(err, ResolveError::Pattern(PatternError::Invalid { .. })));
}

#[test]
fn unbalanced_brace_is_pattern_error() {
    let tree = TestTree::new();
    let err =
        resolve_relative(&tree, &[ContentDeclaration::relative(["src/*.{rs,html"])]).unwrap_err();
    assert!(matches!(err, ResolveError::Pattern(PatternError::Invalid { .. })));
}

#[test]
fn only_exclusions_is_pattern_error() {
    let tree = TestTree::new();
    let err = resolve_relative(&tree, &[ContentDeclaration::relative(["!src/**"])]).unwrap_err();
    assert!(err.is_pattern());
}

#[test]
fn nonexistent_base_dir_is_config_error() {
    let declarations = vec![ContentDeclaration::relative(["./src/**/*.rs"])];
    let base_dirs: BaseDirs = [(0, "/nonexistent/path/that/does/not/exist")].into_iter().collect();
    let err = GlobSetResolver::new("/").resolve(&declarations, &base_dirs).unwrap_err();
    assert!(matches!(err, ResolveError::Config(ConfigError::BaseDirNotFound(_))));
}

#[test]
fn base_dir_that_is_a_file_is_config_error() {
    let tree = TestTree::new();
    let declarations = vec![ContentDeclaration::relative(["*.rs"])];
    let base_dirs: BaseDirs = [(0, tree.abs("README.md"))].into_iter().collect();
    let err = GlobSetResolver::new(tree.path()).resolve(&declarations, &base_dirs).unwrap_err();
    assert!(matches!(err, ResolveError::Config(ConfigError::NotADirectory(_))));
}

#[test]
fn missing_base_dir_entry_is_config_error() {
    let tree = TestTree::new();
    let declarations = vec![
        ContentDeclaration::relative(["src/*.rs"]),
        ContentDeclaration::relative(["src/*.rs"]),
    ];
    let base_dirs: BaseDirs = [(0, tree.path())].into_iter().collect();
    let err = GlobSetResolver::new(tree.path()).resolve(&declarations, &base_dirs).unwrap_err();
    assert!(matches!(err, ResolveError::Config(ConfigError::MissingBaseDir { index: 1 })));
}

#[test]
fn nonexistent_cwd_is_config_error() {
    let declarations = vec![ContentDeclaration::new(false, ["*.rs"])];
    let err = GlobSetResolver::new(Path::new("/nonexistent/cwd"))
        .resolve(&declarations, &BaseDirs::new())
        .unwrap_err();
    assert!(err.is_config());
}

#[test]
fn later_invalid_declaration_fails_whole_resolution() {
    let tree = TestTree::new();
    let err = resolve_relative(
        &tree,
        &[
            ContentDeclaration::relative(["src/**/*.rs"]),
            ContentDeclaration::relative(Vec::<String>::new()),
        ],
    )
    .unwrap_err();
    assert!(matches!(err, ResolveError::Pattern(PatternError::EmptyFiles { index: 1 })));
}

// =============================================================================
// Validation and Watch Root Tests
// =============================================================================

#[test]
fn validate_accepts_good_config() {
    let tree = TestTree::new();
    let declarations = vec![ContentDeclaration::relative(["./src/**/*.rs"])];
    let base_dirs: BaseDirs = [(0, tree.path())].into_iter().collect();
    assert!(GlobSetResolver::new(tree.path()).validate(&declarations, &base_dirs).is_ok());
}

#[test]
fn watch_roots_collapse_into_enclosing_root() {
    let tree = TestTree::new();
    let app = tree.add_dir("app");
    let declarations = vec![
        ContentDeclaration::relative(["src/*.rs"]),
        ContentDeclaration::relative(["*.rs"]),
        ContentDeclaration::new(false, ["*.md"]),
    ];
    let base_dirs: BaseDirs = [(0, tree.path().to_path_buf()), (1, app)].into_iter().collect();
    let roots = GlobSetResolver::new(tree.path()).watch_roots(&declarations, &base_dirs).unwrap();
    assert_eq!(roots, vec![tree.path().to_path_buf()]);
}

#[test]
fn watch_roots_are_pattern_roots() {
    let tree = TestTree::new();
    tree.add_file("lib/ui/button.rs", "");
    let declarations = vec![ContentDeclaration::relative(["./src/**/*.rs", "lib/ui/*.rs"])];
    let base_dirs: BaseDirs = [(0, tree.path())].into_iter().collect();
    let roots = GlobSetResolver::new(tree.path()).watch_roots(&declarations, &base_dirs).unwrap();
    assert_eq!(roots, vec![tree.abs("src"), tree.abs("lib/ui")]);
}

#[test]
fn watch_roots_cover_patterns_outside_base_dir() {
    let tree = TestTree::empty();
    let app = tree.add_dir("app");
    let shared = tree.add_file("shared/x.rs", "");
    let declarations = vec![ContentDeclaration::relative(["../shared/*.rs"])];
    let base_dirs: BaseDirs = [(0, app)].into_iter().collect();

    let resolver = GlobSetResolver::new(tree.path());
    let files = resolver.resolve(&declarations, &base_dirs).unwrap();
    assert_eq!(files.as_slice(), &[shared]);

    let roots = resolver.watch_roots(&declarations, &base_dirs).unwrap();
    assert_eq!(roots, vec![tree.abs("shared")]);
}

#[test]
fn watch_roots_use_nearest_existing_ancestor() {
    let tree = TestTree::empty();
    let app = tree.add_dir("app");
    let declarations = vec![
        ContentDeclaration::relative(["./later/gen/**/*.rs"]),
        ContentDeclaration::relative(["./app/index.html"]),
    ];
    let base_dirs: BaseDirs =
        [(0, app.clone()), (1, tree.path().to_path_buf())].into_iter().collect();
    let roots = GlobSetResolver::new(tree.path()).watch_roots(&declarations, &base_dirs).unwrap();
    assert_eq!(roots, vec![app]);
}
