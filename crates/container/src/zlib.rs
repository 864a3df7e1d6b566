use flate2::write::ZlibEncoder;
use flate2::{Compression, Decompress, FlushDecompress, Status};
use std::io::{self, Write};

pub const MAX_LEVEL: u32 = 9;

const CHUNK: usize = 8 * 1024;

pub fn compress(data: &[u8], level: u32) -> io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::new(level.min(MAX_LEVEL)));
    encoder.write_all(data)?;
    encoder.finish()
}

/// Inflate a complete zlib stream. A stream that ends before its trailer is
/// an error, never a short result.
pub fn decompress(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut inflater = Decompress::new(true);
    let mut out = Vec::with_capacity(data.len().saturating_mul(2).max(CHUNK));

    loop {
        if out.capacity() - out.len() < CHUNK {
            out.reserve(CHUNK);
        }
        let consumed = inflater.total_in() as usize;
        let produced = out.len();

        let status = inflater
            .decompress_vec(&data[consumed..], &mut out, FlushDecompress::Finish)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        match status {
            Status::StreamEnd => return Ok(out),
            Status::Ok | Status::BufError => {
                if inflater.total_in() as usize == consumed && out.len() == produced {
                    return Err(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "zlib stream ended early",
                    ));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncated_stream() {
        let packed = compress(b"a fairly ordinary sentence", 9).unwrap();
        assert!(decompress(&packed[..packed.len() - 4]).is_err());
        assert!(decompress(&packed[..packed.len() / 2]).is_err());
    }

    #[test]
    fn test_empty_stream() {
        assert!(decompress(&[]).is_err());
    }

    #[test]
    fn test_large_output() {
        let data = vec![7u8; 200_000];
        assert_eq!(decompress(&compress(&data, 9).unwrap()).unwrap(), data);
    }
}
