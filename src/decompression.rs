//! Transparent decompression for log files
//!
//! Gzip and zstd inputs are recognised by their magic bytes, never by file
//! name, so renamed or extension-less archives are still counted correctly.

use flate2::bufread::MultiGzDecoder;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

const GZIP_MAGIC: [u8; 3] = [0x1F, 0x8B, 0x08];
const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];

/// Compression detected at the start of a log file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    Gzip,
    Zstd,
    Plain,
}

impl Codec {
    /// Classify a file by its leading bytes
    pub fn sniff(head: &[u8]) -> Self {
        if head.starts_with(&GZIP_MAGIC) {
            Codec::Gzip
        } else if head.starts_with(&ZSTD_MAGIC) {
            Codec::Zstd
        } else {
            Codec::Plain
        }
    }
}

type FileReader = BufReader<File>;

/// Line reader over a log file, decompressing as it goes
pub enum DecompressionReader {
    Gzip(BufReader<MultiGzDecoder<FileReader>>),
    Zstd(BufReader<zstd::Decoder<'static, FileReader>>),
    Plain(FileReader),
}

impl DecompressionReader {
    /// Open a log file, decompressing gzip/zstd transparently
    ///
    /// The file handle is owned by the returned reader and closed when it is
    /// dropped, on every path out of the caller.
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref();

        let is_zip = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"));
        if is_zip {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "ZIP archives are not supported, only gzip and zstd files are decompressed",
            ));
        }

        let mut file = BufReader::new(File::open(path)?);
        // Peek without consuming; the decoder sees the magic bytes again
        let codec = Codec::sniff(file.fill_buf()?);

        Ok(match codec {
            Codec::Gzip => DecompressionReader::Gzip(BufReader::new(MultiGzDecoder::new(file))),
            Codec::Zstd => {
                DecompressionReader::Zstd(BufReader::new(zstd::Decoder::with_buffer(file)?))
            }
            Codec::Plain => DecompressionReader::Plain(file),
        })
    }

    pub fn codec(&self) -> Codec {
        match self {
            DecompressionReader::Gzip(_) => Codec::Gzip,
            DecompressionReader::Zstd(_) => Codec::Zstd,
            DecompressionReader::Plain(_) => Codec::Plain,
        }
    }

    fn inner(&mut self) -> &mut dyn BufRead {
        match self {
            DecompressionReader::Gzip(reader) => reader,
            DecompressionReader::Zstd(reader) => reader,
            DecompressionReader::Plain(reader) => reader,
        }
    }
}

// zstd::Decoder does not implement Debug
impl fmt::Debug for DecompressionReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DecompressionReader")
            .field(&self.codec())
            .finish()
    }
}

impl Read for DecompressionReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner().read(buf)
    }
}

impl BufRead for DecompressionReader {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.inner().fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.inner().consume(amt)
    }
}

/// Count line-delimited records until end of stream
///
/// A trailing line without a newline still counts; an empty stream has 0.
pub fn count_lines<R: BufRead>(reader: &mut R) -> io::Result<usize> {
    let mut count = 0;
    let mut buf = Vec::with_capacity(256);
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        count += 1;
    }
    Ok(count)
}
