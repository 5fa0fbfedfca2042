/// ドメインサービス: アップロード済みファイルの列挙
///
/// データディレクトリを再帰的に走査し、ディレクトリ基準の相対パスを返す。
use std::path::Path;
use walkdir::WalkDir;

/// データディレクトリ配下のファイルを相対パスで列挙する
///
/// `sort = false` の場合は走査順のまま返す（プラットフォーム間で順序は保証されない）。
/// 読めないエントリは警告ログを出して読み飛ばす。
/// シンボリックリンクは辿らず、ディレクトリを指すリンクは一覧に含めない。
pub fn list_relative_files(data_dir: &Path, sort: bool) -> Vec<String> {
    let mut files = Vec::new();

    for entry in WalkDir::new(data_dir).follow_links(false).min_depth(1) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Skipping unreadable entry under {}: {}", data_dir.display(), e);
                continue;
            }
        };

        let file_type = entry.file_type();
        if file_type.is_dir() || (file_type.is_symlink() && entry.path().is_dir()) {
            continue;
        }

        match entry.path().strip_prefix(data_dir) {
            Ok(rel_path) => files.push(rel_path.to_string_lossy().into_owned()),
            Err(_) => {
                tracing::warn!(
                    "Failed to strip {} from {}",
                    data_dir.display(),
                    entry.path().display()
                );
            }
        }
    }

    if sort {
        files.sort();
    }

    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn rel(parts: &[&str]) -> String {
        parts.iter().collect::<PathBuf>().to_string_lossy().into_owned()
    }

    fn populate(root: &Path) {
        fs::create_dir_all(root.join("css")).unwrap();
        fs::create_dir_all(root.join("js/lib")).unwrap();
        fs::create_dir_all(root.join("empty")).unwrap();
        fs::write(root.join("index.html"), "<html>").unwrap();
        fs::write(root.join("css/style.css"), "body {}").unwrap();
        fs::write(root.join("js/lib/app.js"), "main()").unwrap();
    }

    #[test]
    fn test_lists_nested_files_only() {
        let dir = TempDir::new().unwrap();
        populate(dir.path());

        let files: BTreeSet<String> = list_relative_files(dir.path(), false).into_iter().collect();
        let expected: BTreeSet<String> = [
            rel(&["index.html"]),
            rel(&["css", "style.css"]),
            rel(&["js", "lib", "app.js"]),
        ]
        .into_iter()
        .collect();

        assert_eq!(files, expected);
    }

    #[test]
    fn test_sorted_listing() {
        let dir = TempDir::new().unwrap();
        populate(dir.path());

        let files = list_relative_files(dir.path(), true);
        let mut expected = files.clone();
        expected.sort();
        assert_eq!(files, expected);
        assert_eq!(files.len(), 3);
    }

    #[test]
    fn test_directories_without_files() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("a/b")).unwrap();

        assert!(list_relative_files(dir.path(), false).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directory_is_not_listed() {
        let dir = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        fs::write(outside.path().join("secret.txt"), "x").unwrap();
        fs::write(dir.path().join("real.txt"), "x").unwrap();
        std::os::unix::fs::symlink(outside.path(), dir.path().join("linked")).unwrap();

        let files = list_relative_files(dir.path(), true);
        assert_eq!(files, vec!["real.txt".to_string()]);
    }
}
