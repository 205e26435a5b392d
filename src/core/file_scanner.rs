use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use glob::{Pattern, glob};
use log::warn;
use walkdir::WalkDir;

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal directory paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Result of scanning files.
pub struct ScanResult {
    /// Sorted, so output order is stable across runs.
    pub files: BTreeSet<PathBuf>,
    pub skipped_count: usize,
}

pub fn scan_files(
    base_dir: &Path,
    includes: &[String],
    ignore_patterns: &[String],
    extensions: &[String],
) -> ScanResult {
    let mut files = BTreeSet::new();
    let mut skipped_count = 0;

    let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();

    for p in ignore_patterns {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(e) => warn!("Invalid ignore pattern '{}': {}", p, e),
            }
        } else {
            literal_ignore_paths.push(base_dir.join(p));
        }
    }

    let dirs_to_scan: Vec<PathBuf> = if includes.is_empty() {
        vec![base_dir.to_path_buf()]
    } else {
        let mut paths = Vec::new();
        for inc in includes {
            if is_glob_pattern(inc) {
                let full_pattern = base_dir.join(inc);
                match glob(&full_pattern.to_string_lossy()) {
                    Ok(entries) => paths.extend(entries.flatten().filter(|e| e.is_dir())),
                    Err(e) => warn!("Invalid glob pattern '{}': {}", inc, e),
                }
            } else {
                let path = base_dir.join(inc);
                if path.exists() {
                    paths.push(path);
                } else {
                    warn!("Include path does not exist: {}", path.display());
                }
            }
        }
        paths
    };

    for dir in dirs_to_scan {
        for entry in WalkDir::new(dir) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    skipped_count += 1;
                    warn!("Cannot access path: {}", e);
                    continue;
                }
            };
            let path = entry.path();

            if literal_ignore_paths
                .iter()
                .any(|ignore_path| path.starts_with(ignore_path))
            {
                continue;
            }

            let path_str = path.to_string_lossy();
            if glob_patterns.iter().any(|p| p.matches(&path_str)) {
                continue;
            }

            if path.is_file() && has_extension(path, extensions) {
                files.insert(path.to_path_buf());
            }
        }
    }

    ScanResult {
        files,
        skipped_count,
    }
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|allowed| allowed == ext))
}

#[cfg(test)]
mod tests {
    use std::fs::{self, File};

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    fn doc_extensions() -> Vec<String> {
        vec!["md".to_owned(), "mdx".to_owned()]
    }

    #[test]
    fn test_scan_document_files() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        File::create(dir_path.join("index.mdx")).unwrap();
        File::create(dir_path.join("README.md")).unwrap();
        File::create(dir_path.join("style.css")).unwrap();

        let result = scan_files(dir_path, &[], &[], &doc_extensions());

        assert_eq!(result.files.len(), 2);
        assert!(result.files.iter().any(|f| f.ends_with("index.mdx")));
        assert!(result.files.iter().any(|f| f.ends_with("README.md")));
        assert!(!result.files.iter().any(|f| f.ends_with("style.css")));
    }

    #[test]
    fn test_scan_ignores_node_modules() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        let node_modules = dir_path.join("node_modules");
        fs::create_dir(&node_modules).unwrap();
        File::create(node_modules.join("CHANGELOG.md")).unwrap();

        File::create(dir_path.join("guide.mdx")).unwrap();

        let result = scan_files(
            dir_path,
            &[],
            &["**/node_modules/**".to_owned()],
            &doc_extensions(),
        );

        assert_eq!(result.files.len(), 1);
        assert!(result.files.iter().any(|f| f.ends_with("guide.mdx")));
    }

    #[test]
    fn test_scan_literal_ignore_path() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        fs::create_dir(dir_path.join("drafts")).unwrap();
        File::create(dir_path.join("drafts/wip.mdx")).unwrap();
        File::create(dir_path.join("done.mdx")).unwrap();

        let result = scan_files(dir_path, &[], &["drafts".to_owned()], &doc_extensions());

        let names: Vec<_> = result
            .files
            .iter()
            .map(|f| f.strip_prefix(dir_path).unwrap().to_path_buf())
            .collect();
        assert_eq!(names, vec![PathBuf::from("done.mdx")]);
    }

    #[test]
    fn test_scan_with_includes() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        let docs = dir_path.join("docs");
        fs::create_dir(&docs).unwrap();
        File::create(docs.join("intro.mdx")).unwrap();

        let blog = dir_path.join("blog");
        fs::create_dir(&blog).unwrap();
        File::create(blog.join("post.md")).unwrap();

        let result = scan_files(dir_path, &["docs".to_owned()], &[], &doc_extensions());

        assert_eq!(result.files.len(), 1);
        assert!(result.files.iter().any(|f| f.ends_with("docs/intro.mdx")));
    }

    #[test]
    fn test_scan_with_glob_include() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        fs::create_dir_all(dir_path.join("docs/en")).unwrap();
        fs::create_dir_all(dir_path.join("docs/fr")).unwrap();
        File::create(dir_path.join("docs/en/a.mdx")).unwrap();
        File::create(dir_path.join("docs/fr/b.mdx")).unwrap();
        File::create(dir_path.join("top.mdx")).unwrap();

        let result = scan_files(dir_path, &["docs/*".to_owned()], &[], &doc_extensions());

        assert_eq!(result.files.len(), 2);
        assert!(!result.files.iter().any(|f| f.ends_with("top.mdx")));
    }

    #[test]
    fn test_custom_extensions() {
        assert!(has_extension(Path::new("a.markdown"), &["markdown".to_owned()]));
        assert!(!has_extension(Path::new("a.mdx"), &["markdown".to_owned()]));
        assert!(!has_extension(Path::new("Makefile"), &doc_extensions()));
    }
}
