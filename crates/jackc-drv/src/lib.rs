//! Compiler driver: resolves a file-or-directory argument into a list of
//! `.jack` files, and fully compiles each one in turn before moving to the
//! next. Processing is single-threaded and file-granular — one file's
//! symbol table never leaks into the next.

pub mod error;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use jackc_lex::{strip_comments, Tokenizer};
use jackc_par::{emit_class, emit_token_stream, parse};
use jackc_util::Handler;

pub use error::DriverError;

/// Which artifacts to emit for each input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Both,
    TokensOnly,
    TreeOnly,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub path: PathBuf,
    pub mode: OutputMode,
    pub out_dir: Option<PathBuf>,
}

/// Resolves `path` into the list of `.jack` files to compile. A file
/// argument yields itself; a directory yields every `.jack` file directly
/// inside it (non-recursive). Order across files is unspecified.
pub fn collect_jack_files(path: &Path) -> Result<Vec<PathBuf>, DriverError> {
    if !path.exists() {
        return Err(DriverError::PathNotFound(path.to_path_buf()));
    }

    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = Vec::new();
    let entries = fs::read_dir(path).map_err(|source| DriverError::Read { path: path.to_path_buf(), source })?;
    for entry in entries {
        let entry = entry.map_err(|source| DriverError::Read { path: path.to_path_buf(), source })?;
        let entry_path = entry.path();
        if entry_path.is_file() && entry_path.extension().map(|ext| ext == "jack").unwrap_or(false) {
            files.push(entry_path);
        }
    }

    if files.is_empty() {
        return Err(DriverError::NoJackFiles(path.to_path_buf()));
    }
    files.sort();
    Ok(files)
}

fn output_path(input: &Path, out_dir: Option<&Path>, suffix: &str) -> PathBuf {
    let stem = input.file_stem().map(|s| s.to_string_lossy().to_string()).unwrap_or_default();
    let file_name = format!("{}{}", stem, suffix);
    match out_dir {
        Some(dir) => dir.join(file_name),
        None => input.with_file_name(file_name),
    }
}

/// Compiles a single `.jack` file, writing the artifacts `mode` selects.
/// Partial output for a failing file is never written — everything is
/// built in memory first.
pub fn compile_file(input: &Path, mode: OutputMode, out_dir: Option<&Path>) -> Result<(), DriverError> {
    debug!(file = %input.display(), "compiling");
    let source = fs::read_to_string(input).map_err(|source| DriverError::Read { path: input.to_path_buf(), source })?;

    let lines = strip_comments(&source);
    let mut handler = Handler::new();
    let mut tokenizer = Tokenizer::new(&mut handler);
    let tokens = tokenizer.tokenize(&lines);

    if handler.has_errors() {
        let messages: Vec<String> = handler.diagnostics().iter().map(|d| d.message.clone()).collect();
        return Err(DriverError::Compile { path: input.to_path_buf(), message: messages.join("; ") });
    }

    let token_xml = matches!(mode, OutputMode::Both | OutputMode::TokensOnly).then(|| emit_token_stream(&tokens));

    let tree_xml = if matches!(mode, OutputMode::Both | OutputMode::TreeOnly) {
        let class = parse(&tokens).map_err(|e| DriverError::Compile { path: input.to_path_buf(), message: e.to_string() })?;
        Some(emit_class(&class))
    } else {
        None
    };

    if let Some(xml) = token_xml {
        let path = output_path(input, out_dir, "T.xml");
        fs::write(&path, xml).map_err(|source| DriverError::Write { path, source })?;
    }
    if let Some(xml) = tree_xml {
        let path = output_path(input, out_dir, ".xml");
        fs::write(&path, xml).map_err(|source| DriverError::Write { path, source })?;
    }

    Ok(())
}

/// Compiles every file the configured path resolves to. Each file is
/// independent: a failure on one is reported and does not prevent later
/// files from being attempted. Returns the error for the first file that
/// failed, if any, after every file has been attempted.
pub fn run(config: &Config) -> Result<(), DriverError> {
    let files = collect_jack_files(&config.path)?;
    info!(count = files.len(), "resolved input files");

    let mut first_error = None;
    for file in &files {
        if let Err(err) = compile_file(file, config.mode, config.out_dir.as_deref()) {
            warn!(file = %file.display(), error = %err, "compilation failed");
            if first_error.is_none() {
                first_error = Some(err);
            }
        }
    }

    match first_error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn single_file_argument_resolves_to_itself() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_temp(dir.path(), "Main.jack", "class Main {}");
        let files = collect_jack_files(&file).unwrap();
        assert_eq!(files, vec![file]);
    }

    #[test]
    fn directory_argument_collects_only_jack_files_non_recursively() {
        let dir = tempfile::tempdir().unwrap();
        write_temp(dir.path(), "A.jack", "class A {}");
        write_temp(dir.path(), "B.jack", "class B {}");
        write_temp(dir.path(), "readme.txt", "not jack");
        let files = collect_jack_files(dir.path()).unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn directory_with_no_jack_files_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        write_temp(dir.path(), "readme.txt", "not jack");
        let err = collect_jack_files(dir.path()).unwrap_err();
        assert!(matches!(err, DriverError::NoJackFiles(_)));
    }

    #[test]
    fn missing_path_is_an_error() {
        let err = collect_jack_files(Path::new("/nonexistent/path/does/not/exist")).unwrap_err();
        assert!(matches!(err, DriverError::PathNotFound(_)));
    }

    #[test]
    fn compiling_a_valid_file_writes_both_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_temp(dir.path(), "Main.jack", "class Main { static int x; }");
        compile_file(&file, OutputMode::Both, None).unwrap();
        assert!(dir.path().join("MainT.xml").exists());
        assert!(dir.path().join("Main.xml").exists());
    }

    #[test]
    fn tokens_only_mode_skips_the_parse_tree_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_temp(dir.path(), "Main.jack", "class Main { static int x; }");
        compile_file(&file, OutputMode::TokensOnly, None).unwrap();
        assert!(dir.path().join("MainT.xml").exists());
        assert!(!dir.path().join("Main.xml").exists());
    }

    #[test]
    fn malformed_source_fails_without_writing_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_temp(dir.path(), "Broken.jack", "class { static int x; }");
        let result = compile_file(&file, OutputMode::Both, None);
        assert!(result.is_err());
        assert!(!dir.path().join("Broken.xml").exists());
    }

    #[test]
    fn out_dir_redirects_artifacts_away_from_source_directory() {
        let src_dir = tempfile::tempdir().unwrap();
        let out_dir = tempfile::tempdir().unwrap();
        let file = write_temp(src_dir.path(), "Main.jack", "class Main {}");
        compile_file(&file, OutputMode::Both, Some(out_dir.path())).unwrap();
        assert!(out_dir.path().join("MainT.xml").exists());
        assert!(!src_dir.path().join("MainT.xml").exists());
    }
}
