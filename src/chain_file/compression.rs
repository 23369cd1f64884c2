use std::io::{BufReader, Read, Write};

use flate2::{read::GzDecoder, write::GzEncoder};

/// The first two bytes of every gzip stream.
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Compression types supported for snake and folding files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    None,
    Gzip,
}

impl Compression {
    /// Guess the compression of a file from its first bytes.
    pub fn detect(head: &[u8]) -> Self {
        if head.starts_with(&GZIP_MAGIC) {
            Self::Gzip
        } else {
            Self::None
        }
    }
}

pub enum Reader<T>
where
    T: Read,
{
    Uncompressed(BufReader<T>),
    Gzip(GzDecoder<T>),
}

impl<T> Reader<T>
where
    T: Read,
{
    pub fn new(compression: Compression, reader: T) -> Self {
        match compression {
            Compression::None => Self::Uncompressed(BufReader::new(reader)),
            Compression::Gzip => Self::Gzip(GzDecoder::new(reader)),
        }
    }
}

impl<T> Read for Reader<T>
where
    T: Read,
{
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self {
            Reader::Uncompressed(t) => t.read(buf),
            Reader::Gzip(t) => t.read(buf),
        }
    }
}

pub enum Writer<T>
where
    T: Write,
{
    Uncompressed(T),
    Gzip(GzEncoder<T>),
}

impl<T> Writer<T>
where
    T: Write,
{
    pub fn new(compression: Compression, writer: T) -> Self {
        match compression {
            Compression::None => Self::Uncompressed(writer),
            Compression::Gzip => Self::Gzip(GzEncoder::new(writer, flate2::Compression::default())),
        }
    }

    /// Flush everything and hand back the inner writer. For gzip this also
    /// writes the stream trailer.
    pub fn finish(self) -> std::io::Result<T> {
        match self {
            Writer::Uncompressed(mut t) => {
                t.flush()?;
                Ok(t)
            }
            Writer::Gzip(t) => t.finish(),
        }
    }
}

impl<T> Write for Writer<T>
where
    T: Write,
{
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            Writer::Uncompressed(t) => t.write(buf),
            Writer::Gzip(t) => t.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            Writer::Uncompressed(t) => t.flush(),
            Writer::Gzip(t) => t.flush(),
        }
    }
}
