use tracing::warn;

/// Frame delimiter, both directions
pub const DELIMITER: u8 = b'\n';

/// Default cap on a single frame
pub const DEFAULT_MAX_FRAME_BYTES: usize = 1024 * 1024;

/// Splits an arbitrarily chunked byte stream into `\n`-terminated payloads.
///
/// Payloads come out in the order their delimiters arrive, without the
/// delimiter. A trailing partial payload waits for the next `feed`.
#[derive(Debug)]
pub struct FrameReader {
    buf: Vec<u8>,
    /// Bytes of `buf` already known to hold no delimiter
    scanned: usize,
    max_frame: usize,
    /// Dropping the rest of an oversized frame until its delimiter shows up
    discarding: bool,
    discarded: u64,
}

impl Default for FrameReader {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FRAME_BYTES)
    }
}

impl FrameReader {
    pub fn new(max_frame: usize) -> Self {
        Self {
            buf: Vec::with_capacity(4096),
            scanned: 0,
            max_frame: max_frame.max(1),
            discarding: false,
            discarded: 0,
        }
    }

    /// Append `chunk` and return every payload it completes
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<Vec<u8>> {
        let mut frames = Vec::new();
        let mut chunk = chunk;

        if self.discarding {
            match chunk.iter().position(|&b| b == DELIMITER) {
                Some(idx) => {
                    self.discarded += idx as u64;
                    self.discarding = false;
                    chunk = &chunk[idx + 1..];
                }
                None => {
                    self.discarded += chunk.len() as u64;
                    return frames;
                }
            }
        }

        self.buf.extend_from_slice(chunk);

        let mut start = 0;
        while let Some(offset) = self.buf[self.scanned..].iter().position(|&b| b == DELIMITER) {
            let end = self.scanned + offset;
            if end - start > self.max_frame {
                warn!(
                    len = end - start,
                    limit = self.max_frame,
                    "frame exceeds limit, discarding"
                );
                self.discarded += (end - start) as u64;
            } else {
                frames.push(self.buf[start..end].to_vec());
            }
            start = end + 1;
            self.scanned = start;
        }
        self.buf.drain(..start);
        self.scanned = self.buf.len();

        if self.buf.len() > self.max_frame {
            warn!(
                pending = self.buf.len(),
                limit = self.max_frame,
                "frame exceeds limit, discarding until next delimiter"
            );
            self.discarded += self.buf.len() as u64;
            self.buf.clear();
            self.scanned = 0;
            self.discarding = true;
        }

        frames
    }

    /// Bytes of the trailing partial payload
    #[inline]
    pub fn pending(&self) -> usize {
        self.buf.len()
    }

    /// Bytes thrown away from oversized frames
    #[inline]
    pub fn discarded_bytes(&self) -> u64 {
        self.discarded
    }
}

/// Terminate an encoded payload for the wire
pub fn frame(mut payload: Vec<u8>) -> Vec<u8> {
    payload.push(DELIMITER);
    payload
}
