use flate2::read::GzDecoder;
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::tempdir;

/// Field separator: either a literal string or any of a set of chars
pub enum Delimiter {
    Str(String),
    Chars(Vec<char>),
}

impl From<&str> for Delimiter {
    fn from(s: &str) -> Self {
        Delimiter::Str(s.to_string())
    }
}

impl From<Vec<char>> for Delimiter {
    fn from(chars: Vec<char>) -> Self {
        Delimiter::Chars(chars)
    }
}

impl<const N: usize> From<&[char; N]> for Delimiter {
    fn from(chars: &[char; N]) -> Self {
        Delimiter::Chars(chars.to_vec())
    }
}

impl Delimiter {
    fn split<'a>(&self, line: &'a str) -> Vec<&'a str> {
        match self {
            Delimiter::Str(s) => line.split(s.as_str()).collect(),
            Delimiter::Chars(chars) => line
                .split(chars.as_slice())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }
}

///
/// Read every line of the input_file into memory
///
/// * `input_file` - file name--either gzipped or not
///
pub fn read_lines(input_file: &str) -> anyhow::Result<Vec<Box<str>>> {
    let buf = open_buf_reader(input_file)?;
    let mut lines = vec![];
    for x in buf.lines() {
        lines.push(x?.into_boxed_str());
    }
    Ok(lines)
}

///
/// Write every line into the output_file
///
/// * `lines` - vector of lines
/// * `output_file` - file name--either gzipped or not, or `stdout`
///
pub fn write_lines<T>(lines: &[T], output_file: &str) -> anyhow::Result<()>
where
    T: std::fmt::Display,
{
    let mut buf = open_buf_writer(output_file)?;
    for line in lines {
        if let Err(e) = writeln!(buf, "{}", line) {
            if e.kind() == std::io::ErrorKind::BrokenPipe {
                return Ok(());
            }
            anyhow::bail!("failed to write {}: {}", output_file, e);
        }
    }
    buf.flush()?;
    Ok(())
}

///
/// Read non-comment lines (`#`, `%`) and split them into words.
///
/// * `input_file` - file name--either gzipped or not
/// * `delim` - delimiter
/// * `skip` - number of leading (non-comment) lines to drop, e.g., a header
///
pub fn read_lines_of_words_delim(
    input_file: &str,
    delim: impl Into<Delimiter>,
    skip: usize,
) -> anyhow::Result<Vec<Vec<Box<str>>>> {
    let delim = delim.into();

    let lines_raw: Vec<Box<str>> = open_buf_reader(input_file)?
        .lines()
        .map_while(Result::ok)
        .filter(|x| !(x.starts_with('#') || x.starts_with('%') || x.trim().is_empty()))
        .skip(skip)
        .map(|x| x.into_boxed_str())
        .collect();

    // parsing is independent line by line; `collect` keeps the order
    let lines = lines_raw
        .par_iter()
        .map(|line| {
            delim
                .split(line.trim_end_matches(['\r', '\n']))
                .into_iter()
                .map(|w| w.trim().to_owned().into_boxed_str())
                .collect::<Vec<_>>()
        })
        .collect();

    Ok(lines)
}

///
/// Open a file for reading, and return a buffered reader
/// * `input_file` - file name--either gzipped or not
///
pub fn open_buf_reader(input_file: &str) -> anyhow::Result<Box<dyn BufRead>> {
    let file = File::open(input_file)
        .map_err(|e| anyhow::anyhow!("failed to open {}: {}", input_file, e))?;
    match file_ext(input_file).as_deref() {
        Some("gz") => Ok(Box::new(BufReader::new(GzDecoder::new(file)))),
        _ => Ok(Box::new(BufReader::new(file))),
    }
}

///
/// Open a file for writing, and return a buffered writer
/// * `output_file` - file name--either gzipped or not, or `stdout`
///
pub fn open_buf_writer(output_file: &str) -> anyhow::Result<Box<dyn Write>> {
    if output_file.eq_ignore_ascii_case("stdout") {
        return Ok(Box::new(BufWriter::new(std::io::stdout())));
    }

    let file = File::create(output_file)?;
    match file_ext(output_file).as_deref() {
        Some("gz") => Ok(Box::new(BufWriter::new(flate2::write::GzEncoder::new(
            file,
            flate2::Compression::default(),
        )))),
        _ => Ok(Box::new(BufWriter::new(file))),
    }
}

///
/// Extension of a file name, if any
///
pub fn file_ext(file: &str) -> Option<Box<str>> {
    Path::new(file)
        .extension()
        .and_then(|x| x.to_str())
        .map(Box::from)
}

///
/// Create a directory for the file if needed
/// * `file` - file name
///
pub fn mkdir(file: &str) -> anyhow::Result<()> {
    if let Some(dir) = Path::new(file).parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)?;
        }
    }
    Ok(())
}

///
/// Create a temporary directory and suggest a file name
/// * `suffix` - suffix of the file name
///
pub fn create_temp_dir_file(suffix: &str) -> anyhow::Result<std::path::PathBuf> {
    let temp_dir = tempdir()?.path().to_path_buf();
    std::fs::create_dir_all(&temp_dir)?;
    let temp_file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile_in(temp_dir)?
        .path()
        .to_owned();
    Ok(temp_file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_by_chars_drops_empty_words() {
        let delim: Delimiter = (&[' ', '\t']).into();
        assert_eq!(delim.split("1  0\t1"), vec!["1", "0", "1"]);
    }

    #[test]
    fn write_then_read_lines_gz() -> anyhow::Result<()> {
        let file = create_temp_dir_file(".txt.gz")?;
        let file = file.to_str().ok_or(anyhow::anyhow!("path"))?;
        let lines = vec!["# comment", "a\tb", "c\td"];
        write_lines(&lines, file)?;

        let words = read_lines_of_words_delim(file, "\t", 0)?;
        assert_eq!(words.len(), 2);
        assert_eq!(words[1][0].as_ref(), "c");
        Ok(())
    }
}
