//! Reading input documents and writing results for the CLI.

use anyhow::{Context, Result};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Where an input document comes from: a file path, or `-` for stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    pub fn is_stdin(&self) -> bool {
        matches!(self, InputSource::Stdin)
    }

    /// Read the whole document as UTF-8 text.
    pub fn read(&self) -> Result<String> {
        match self {
            InputSource::Stdin => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .context("failed to read from stdin")?;
                Ok(text)
            }
            InputSource::File(path) => std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display())),
        }
    }
}

impl std::str::FromStr for InputSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Err("input path must not be empty".to_string()),
            "-" => Ok(InputSource::Stdin),
            path => Ok(InputSource::File(PathBuf::from(path))),
        }
    }
}

impl std::fmt::Display for InputSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputSource::Stdin => write!(f, "-"),
            InputSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Write `text` plus a trailing newline to `output`, or to stdout when `None`.
pub fn write_output(output: Option<&Path>, text: &str) -> Result<()> {
    match output {
        Some(path) => {
            let mut contents = String::with_capacity(text.len() + 1);
            contents.push_str(text);
            contents.push('\n');
            std::fs::write(path, contents)
                .with_context(|| format!("failed to write {}", path.display()))
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", text).context("failed to write to stdout")?;
            stdout.flush().context("failed to write to stdout")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_input_source_parse() {
        assert_eq!("-".parse::<InputSource>().unwrap(), InputSource::Stdin);
        assert_eq!(
            "a/b.json".parse::<InputSource>().unwrap(),
            InputSource::File(PathBuf::from("a/b.json"))
        );
        assert!("".parse::<InputSource>().is_err());
    }

    #[test]
    fn test_read_file_and_write_output() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("in.json");
        std::fs::write(&input, "{\"controls\": {}}").unwrap();

        let source = InputSource::File(input);
        assert_eq!(source.read().unwrap(), "{\"controls\": {}}");

        let output = temp.path().join("out.json");
        write_output(Some(&output), "{}").unwrap();
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "{}\n");
    }

    #[test]
    fn test_read_missing_file_names_path() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.json");
        let err = InputSource::File(missing.clone()).read().unwrap_err();
        assert!(err.to_string().contains("missing.json"));
    }
}
