//! Reading and writing snakes and foldings as text files.
//!
//! Both formats hold one point per line, written as `x,y` / `x y` /
//! `(x, y)` for snakes and with a third coordinate for foldings. Blank lines
//! and everything after a `#` are ignored. Files starting with the gzip
//! magic bytes are decompressed transparently.

use std::{
    fs::File,
    io::{ErrorKind, Read, Write},
    path::{Path, PathBuf},
};

mod compression;
pub use compression::Compression;
use compression::{Reader, Writer};

use crate::{chain::Chain, geometry::Point};

/// Read the whole of `input` as text, decompressing it if needed.
pub fn read_text(mut input: impl Read) -> std::io::Result<String> {
    let mut raw = Vec::new();
    input.read_to_end(&mut raw)?;

    let compression = Compression::detect(&raw);
    let mut text = String::new();
    Reader::new(compression, raw.as_slice()).read_to_string(&mut text)?;

    Ok(text)
}

/// Parse `text` into points with `N` coordinates each.
pub fn parse_points<const N: usize>(text: &str) -> std::io::Result<Vec<[i32; N]>> {
    let mut points = Vec::new();

    for (line_no, line) in text.lines().enumerate() {
        let line = line.split('#').next().unwrap_or("").trim();

        if line.is_empty() {
            continue;
        }

        let invalid = |what: String| {
            std::io::Error::new(
                ErrorKind::InvalidData,
                format!("Line {}: {what} in `{line}`", line_no + 1),
            )
        };

        let inner = line
            .strip_prefix('(')
            .and_then(|l| l.strip_suffix(')'))
            .unwrap_or(line);

        let values = inner
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|v| !v.is_empty())
            .map(|v| {
                v.parse::<i32>()
                    .map_err(|e| invalid(format!("invalid coordinate `{v}` ({e})")))
            })
            .collect::<std::io::Result<Vec<_>>>()?;

        let point: [i32; N] = values
            .as_slice()
            .try_into()
            .map_err(|_| invalid(format!("expected {N} coordinates, found {}", values.len())))?;

        points.push(point);
    }

    Ok(points)
}

/// Read a snake description from `input`.
pub fn read_path(input: impl Read) -> std::io::Result<Vec<(i32, i32)>> {
    let text = read_text(input)?;
    let points = parse_points::<2>(&text)?;
    Ok(points.into_iter().map(|[x, y]| (x, y)).collect())
}

/// Read a snake description from the file at `p`.
pub fn read_path_file(p: impl AsRef<Path>) -> std::io::Result<Vec<(i32, i32)>> {
    read_path(File::open(p.as_ref())?)
}

/// Read a folding from `input`.
pub fn read_folding(input: impl Read) -> std::io::Result<Chain> {
    let text = read_text(input)?;
    let points = parse_points::<3>(&text)?;
    Ok(points.into_iter().map(|[x, y, z]| Point::new(x, y, z)).collect())
}

/// Read a folding from the file at `p`.
pub fn read_folding_file(p: impl AsRef<Path>) -> std::io::Result<Chain> {
    read_folding(File::open(p.as_ref())?)
}

/// Write `chain` to `output`, one `x,y,z` line per cube.
pub fn write_folding<W>(chain: &Chain, compression: Compression, output: W) -> std::io::Result<W>
where
    W: Write,
{
    let mut writer = Writer::new(compression, output);

    for Point { x, y, z } in chain.iter() {
        writeln!(writer, "{x},{y},{z}")?;
    }

    writer.finish()
}

/// Write `chain` to the file at `p`.
///
/// The data is written to a temporary file next to `p` first, which is
/// then moved into place.
pub fn write_folding_file(
    chain: &Chain,
    compression: Compression,
    p: impl AsRef<Path>,
) -> std::io::Result<()> {
    let path = p.as_ref();
    let temp = temp_path(path)?;

    let file = File::create(&temp)?;
    write_folding(chain, compression, file)?.sync_all()?;

    std::fs::rename(&temp, path)
}

fn temp_path(path: &Path) -> std::io::Result<PathBuf> {
    let filename = path.file_name().ok_or_else(|| {
        std::io::Error::new(
            ErrorKind::InvalidInput,
            format!("{} is not a file path", path.display()),
        )
    })?;

    let mut temp = path.to_path_buf();
    temp.set_file_name(format!(".{}.tmp", filename.to_string_lossy()));
    Ok(temp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_mixed_notation() {
        let text = "# the start\n0,0\n(1, 0)\n\n  1 1   # corner\n";
        let path = read_path(text.as_bytes()).unwrap();

        assert_eq!(path, vec![(0, 0), (1, 0), (1, 1)]);
    }

    #[test]
    fn reject_malformed_lines() {
        let err = read_path("0,0\n1,0,0\n".as_bytes()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
        assert!(err.to_string().starts_with("Line 2"));

        let err = read_path("0,0\n1,x\n".as_bytes()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }

    #[test]
    fn gzip_folding() {
        let chain: Chain = [(0, 0, 0), (1, 0, 0), (1, 0, -1)]
            .into_iter()
            .map(Point::from)
            .collect();

        for compression in [Compression::None, Compression::Gzip] {
            let bytes = write_folding(&chain, compression, Vec::new()).unwrap();
            assert_eq!(
                bytes.starts_with(&compression::GZIP_MAGIC),
                compression == Compression::Gzip
            );
            assert_eq!(read_folding(bytes.as_slice()).unwrap(), chain);
        }
    }

    #[test]
    fn temp_file_is_hidden_sibling() {
        let temp = temp_path(Path::new("out/fold.txt")).unwrap();
        assert_eq!(temp, Path::new("out/.fold.txt.tmp"));
        assert!(temp_path(Path::new("/")).is_err());
    }
}
