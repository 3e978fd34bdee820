use anyhow::Result;
use mdscout::report::{root_name, ReportBuilder};
use mdscout::results::ROOT_FOLDER;
use mdscout::{run_in, search_in, SearchConfig, SearchError};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

// Helper function to create a tree of files
fn create_test_files(root: &Path, files: &[(&str, &str)]) -> Result<()> {
    for (name, content) in files {
        let path = root.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
    }
    Ok(())
}

fn no_excludes() -> Vec<String> {
    Vec::new()
}

#[test]
fn test_extension_filter_scenario() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(
        dir.path(),
        &[("a/x.ts", "import foo"), ("b/y.js", "const foo = 1")],
    )?;

    let config = SearchConfig::new(["foo"], [".ts"], no_excludes(), no_excludes());
    let result = search_in(dir.path(), &config)?;

    let matches = result.matches_for(0);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].folder, "a");
    assert_eq!(matches[0].file, "x.ts");
    assert_eq!(matches[0].line_number, 1);
    assert_eq!(matches[0].content, "import foo");
    assert_eq!(result.files_searched, 1);
    Ok(())
}

#[test]
fn test_excluded_directory_scenario() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(
        dir.path(),
        &[
            ("node_modules/pkg/index.js", "module.exports = foo;"),
            ("src/deep/node_modules/lib.js", "foo"),
            ("src/index.js", "export default foo;"),
        ],
    )?;

    let config = SearchConfig::new(["foo"], [".js"], ["node_modules"], no_excludes());
    let result = search_in(dir.path(), &config)?;

    let matches = result.matches_for(0);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].file, "index.js");
    assert_eq!(matches[0].folder, "src");
    assert!(matches
        .iter()
        .all(|m| !m.relative_path.contains("node_modules")));
    Ok(())
}

#[test]
fn test_two_targets_scenario() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(dir.path(), &[("app.ts", "let foo;\nlet bar;\nnone\n")])?;

    let config = SearchConfig::new(["foo", "bar"], [".ts"], no_excludes(), no_excludes());
    let result = search_in(dir.path(), &config)?;

    assert_eq!(result.matches_for(0).len(), 1);
    assert_eq!(result.matches_for(0)[0].line_number, 1);
    assert_eq!(result.matches_for(1).len(), 1);
    assert_eq!(result.matches_for(1)[0].line_number, 2);
    assert_eq!(result.matches_for(0)[0].folder, ROOT_FOLDER);
    Ok(())
}

#[test]
fn test_sections_follow_target_order() -> Result<()> {
    let dir = tempdir()?;
    let root = dir.path().join("project");
    // "bar" is met before "foo" while scanning
    create_test_files(&root, &[("src/app.ts", "let bar;\nlet foo;\n")])?;

    let config = SearchConfig::new(["foo", "bar"], [".ts"], no_excludes(), no_excludes());
    let output = dir.path().join("report.md");
    run_in(&root, &config, &output)?;

    let report = fs::read_to_string(&output)?;
    let foo = report.find("### 🔗 foo (1건)").expect("foo section");
    let bar = report.find("### 🔗 bar (1건)").expect("bar section");
    assert!(foo < bar);
    assert!(report.contains("##### 1. `app.ts` (line 2)"));
    Ok(())
}

#[test]
fn test_one_match_per_line_and_target() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(dir.path(), &[("src/a.ts", "foo foo foo\nfoo\n")])?;

    let config = SearchConfig::new(["foo"], [".ts"], no_excludes(), no_excludes());
    let result = search_in(dir.path(), &config)?;

    let lines: Vec<usize> = result.matches_for(0).iter().map(|m| m.line_number).collect();
    assert_eq!(lines, vec![1, 2]);
    Ok(())
}

#[test]
fn test_hidden_and_excluded_files() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(
        dir.path(),
        &[
            (".secret.ts", "foo"),
            ("src/.env.ts", "foo"),
            ("src/generated.ts", "foo"),
            ("src/main.ts", "foo"),
        ],
    )?;

    let config = SearchConfig::new(["foo"], [".ts"], no_excludes(), ["generated.ts"]);
    let result = search_in(dir.path(), &config)?;

    let files: Vec<&str> = result.matches_for(0).iter().map(|m| m.file.as_str()).collect();
    assert_eq!(files, vec!["main.ts"]);
    assert_eq!(result.files_skipped, 3);
    Ok(())
}

#[test]
fn test_zero_match_target_has_no_section() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(dir.path(), &[("lib/a.ts", "foo\n")])?;

    let config = SearchConfig::new(["foo", "absent"], [".ts"], no_excludes(), no_excludes());
    let result = search_in(dir.path(), &config)?;
    let report = ReportBuilder::new(&config).build(&root_name(dir.path()), &result);

    assert!(report.contains("### 🔗 foo (1건)"));
    assert!(!report.contains("absent"));
    Ok(())
}

#[test]
fn test_search_is_idempotent() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(
        dir.path(),
        &[
            ("a/one.ts", "foo\nbar\nfoo bar\n"),
            ("b/two.ts", "bar\n"),
            ("b/c/three.ts", "  foo  \n"),
            ("top.ts", "foo"),
        ],
    )?;

    let config = SearchConfig::new(["foo", "bar"], [".ts"], no_excludes(), no_excludes());
    let first = search_in(dir.path(), &config)?;
    let second = search_in(dir.path(), &config)?;
    assert_eq!(first, second);

    let out1 = dir.path().join("first.md");
    let out2 = dir.path().join("second.md");
    run_in(dir.path(), &config, &out1)?;
    run_in(dir.path(), &config, &out2)?;
    assert_eq!(fs::read(&out1)?, fs::read(&out2)?);
    Ok(())
}

#[test]
fn test_report_groups_by_folder() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(
        dir.path(),
        &[("a/x.ts", "foo\n"), ("a/nested/y.ts", "foo\n"), ("z.ts", "foo\n")],
    )?;

    let config = SearchConfig::new(["foo"], [".ts"], no_excludes(), no_excludes());
    let output = dir.path().join("out.md");
    let summary = run_in(dir.path(), &config, &output)?;
    assert_eq!(summary.results.total_matches(), 3);

    let report = fs::read_to_string(&output)?;
    assert!(report.contains("### 🔗 foo (3건)"));
    assert_eq!(report.matches("#### 📁 a\n").count(), 1);
    assert_eq!(report.matches("#### 📁 root\n").count(), 1);
    assert!(report.contains("경로: `z.ts`"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_unreadable_file_aborts() -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir()?;
    create_test_files(dir.path(), &[("ok.ts", "foo"), ("locked.ts", "foo")])?;
    let locked = dir.path().join("locked.ts");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000))?;

    // Permission bits do not apply to root
    if fs::read(&locked).is_ok() {
        return Ok(());
    }

    let config = SearchConfig::new(["foo"], [".ts"], no_excludes(), no_excludes());
    let output = dir.path().join("report.md");
    let err = run_in(dir.path(), &config, &output).unwrap_err();
    assert!(matches!(err, SearchError::FileRead { .. }));
    assert!(!output.exists());

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o644))?;
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_unreadable_directory_aborts() -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir()?;
    let root = dir.path().join("project");
    create_test_files(&root, &[("ok.ts", "foo"), ("locked/inner.ts", "foo")])?;
    let locked = root.join("locked");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000))?;

    // Permission bits do not apply to root
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755))?;
        return Ok(());
    }

    let config = SearchConfig::new(["foo"], [".ts"], no_excludes(), no_excludes());
    let output = dir.path().join("report.md");
    let result = run_in(&root, &config, &output);
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755))?;

    assert!(matches!(result, Err(SearchError::Walk { .. })));
    assert!(!output.exists());
    Ok(())
}
