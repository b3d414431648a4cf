//! Reading and writing fixture files.
//!
//! Files are opened with `cap-std`'s ambient UTF-8 file API, so symlinked
//! fixtures resolve the same way the operating system resolves them. Loaded
//! text always has `\n` line separators.

use std::io::{self, Read, Write};

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::File;

use super::error::HarnessError;
use super::fixture::input_fixture_path;

/// Converts `\r\n` and lone `\r` line separators to `\n`.
///
/// # Examples
///
///     use goldenfix::harness::normalize_line_separators;
///
///     assert_eq!(normalize_line_separators("a\r\nb\r\n"), "a\nb\n");
///     assert_eq!(normalize_line_separators("a\rb"), "a\nb");
#[must_use]
pub fn normalize_line_separators(text: &str) -> String {
    if !text.contains('\r') {
        return text.to_owned();
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Loads the full text of the fixture at `path`.
///
/// The returned text has normalized line separators.
///
/// # Errors
///
/// Returns [`HarnessError::FixtureNotFound`] carrying `path` when the file
/// does not exist, cannot be read, or is not valid UTF-8.
pub fn load_fixture_text(path: &Utf8Path) -> Result<String, HarnessError> {
    let text = read_file(path).map_err(|source| HarnessError::FixtureNotFound {
        path: path.to_owned(),
        source,
    })?;
    tracing::debug!(%path, bytes = text.len(), "loaded fixture");
    Ok(normalize_line_separators(&text))
}

/// Writes `contents` to the fixture at `path`, replacing any existing file.
///
/// The parent directory must already exist.
///
/// # Errors
///
/// Returns [`HarnessError::FixtureWrite`] carrying `path` when the file
/// cannot be written.
pub fn write_fixture_text(path: &Utf8Path, contents: &str) -> Result<(), HarnessError> {
    write_file(path, contents).map_err(|source| HarnessError::FixtureWrite {
        path: path.to_owned(),
        source,
    })?;
    tracing::debug!(%path, bytes = contents.len(), "wrote fixture");
    Ok(())
}

/// Loads the input fixture for `test_name` under `root/data_subpath`.
///
/// # Errors
///
/// Returns [`HarnessError::FixtureNotFound`] when the input fixture is
/// missing or unreadable.
pub fn load_input(
    root: &Utf8Path,
    data_subpath: &str,
    test_name: &str,
) -> Result<String, HarnessError> {
    load_fixture_text(&input_fixture_path(root, data_subpath, test_name))
}

fn read_file(path: &Utf8Path) -> io::Result<String> {
    let mut file = File::open_ambient(path, ambient_authority())?;
    let mut text = String::new();
    file.read_to_string(&mut text)?;
    Ok(text)
}

fn write_file(path: &Utf8Path, contents: &str) -> io::Result<()> {
    let mut file = File::create_ambient(path, ambient_authority())?;
    file.write_all(contents.as_bytes())?;
    file.flush()
}

#[cfg(test)]
mod tests {
    use camino::Utf8PathBuf;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    fn utf8_root(dir: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .unwrap_or_else(|path| panic!("temp dir is not UTF-8: {}", path.display()))
    }

    #[rstest]
    #[case::crlf("a\r\nb\r\n", "a\nb\n")]
    #[case::lone_cr("a\rb\r", "a\nb\n")]
    #[case::mixed("a\r\nb\rc\n", "a\nb\nc\n")]
    #[case::already_normal("a\nb", "a\nb")]
    #[case::empty("", "")]
    fn normalizes_line_separators(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_line_separators(input), expected);
    }

    #[test]
    fn load_normalizes_crlf() {
        let dir = TempDir::new().expect("temp dir");
        let root = utf8_root(&dir);
        let path = root.join("crlf.test.cfml");
        std::fs::write(&path, "a\r\nb\r\n").expect("write fixture");

        let text = load_fixture_text(&path).expect("fixture should load");
        assert_eq!(text, "a\nb\n");
    }

    #[test]
    fn missing_file_reports_the_exact_path() {
        let dir = TempDir::new().expect("temp dir");
        let path = Utf8PathBuf::from(format!("{}/data/parser/nothere.test.cfml", utf8_root(&dir)));

        let Err(error) = load_fixture_text(&path) else {
            panic!("missing fixture should fail");
        };
        assert!(matches!(error, HarnessError::FixtureNotFound { .. }));
        assert_eq!(error.path().map(|found| found.as_str()), Some(path.as_str()));
    }

    #[test]
    fn invalid_utf8_is_unreadable() {
        let dir = TempDir::new().expect("temp dir");
        let path = utf8_root(&dir).join("binary.test.cfml");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).expect("write fixture");

        let result = load_fixture_text(&path);
        assert!(matches!(result, Err(HarnessError::FixtureNotFound { .. })));
    }

    #[test]
    fn write_then_load() {
        let dir = TempDir::new().expect("temp dir");
        let path = utf8_root(&dir).join("out.test.expected");

        write_fixture_text(&path, "CfmlFile\n").expect("write should succeed");
        assert_eq!(load_fixture_text(&path).expect("load"), "CfmlFile\n");
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let dir = TempDir::new().expect("temp dir");
        let path = utf8_root(&dir).join("absent/out.test.expected");

        let result = write_fixture_text(&path, "x");
        assert!(matches!(result, Err(HarnessError::FixtureWrite { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_input_is_loaded_through_the_link() {
        let dir = TempDir::new().expect("temp dir");
        let root = utf8_root(&dir);
        std::fs::create_dir_all(root.join("shared")).expect("create dirs");
        std::fs::create_dir_all(root.join("data/parser")).expect("create dirs");
        std::fs::write(root.join("shared/common.test.cfml"), "a\r\nb\r\n").expect("write target");

        let relative = root.join("data/parser/simpleif.test.cfml");
        std::os::unix::fs::symlink("../../shared/common.test.cfml", &relative)
            .expect("create relative link");
        let absolute = root.join("data/parser/absolute.test.cfml");
        std::os::unix::fs::symlink(root.join("shared/common.test.cfml"), &absolute)
            .expect("create absolute link");

        assert_eq!(load_fixture_text(&relative).expect("relative link"), "a\nb\n");
        assert_eq!(load_fixture_text(&absolute).expect("absolute link"), "a\nb\n");
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_golden_is_written_through_the_link() {
        let dir = TempDir::new().expect("temp dir");
        let root = utf8_root(&dir);
        std::fs::create_dir_all(root.join("shared")).expect("create dirs");
        std::fs::create_dir_all(root.join("data/parser")).expect("create dirs");
        let target = root.join("shared/common.test.expected");
        std::fs::write(&target, "stale\n").expect("write target");
        let link = root.join("data/parser/simpleif.test.expected");
        std::os::unix::fs::symlink("../../shared/common.test.expected", &link)
            .expect("create link");

        write_fixture_text(&link, "CfmlFile\n").expect("write through link");

        assert_eq!(std::fs::read_to_string(&target).expect("read target"), "CfmlFile\n");
        assert_eq!(load_fixture_text(&link).expect("load link"), "CfmlFile\n");
    }

    #[test]
    fn load_input_uses_the_input_extension() {
        let dir = TempDir::new().expect("temp dir");
        let root = utf8_root(&dir);
        std::fs::create_dir_all(root.join("data/parser")).expect("create dirs");
        std::fs::write(root.join("data/parser/simpleif.test.cfml"), "<cfif x>\r\n")
            .expect("write fixture");

        let text = load_input(&root, "data/parser", "simpleif").expect("input should load");
        assert_eq!(text, "<cfif x>\n");
    }
}
