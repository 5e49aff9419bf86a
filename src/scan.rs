//! Barcode scanning session
//!
//! The decoding itself is an external collaborator: something that, given
//! a video device (or any code source), yields a lazy, restartable
//! sequence of decoded strings. A scanning session consumes that sequence
//! until the first decode the acceptance predicate admits, then stops.
//! Cancellation is cooperative: drop the in-flight future.

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::error::ApiResult;

/// Decoding collaborator seam
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BarcodeDecoder: Send {
    /// Next decoded string; `None` once the stream is exhausted
    async fn next_decode(&mut self) -> ApiResult<Option<String>>;

    /// Re-arm the decoder so the next session reads a fresh sequence
    fn reset(&mut self);
}

/// One scanning session over a decoder
pub struct ScanSession<D: BarcodeDecoder> {
    decoder: D,
}

impl<D: BarcodeDecoder> ScanSession<D> {
    pub fn new(decoder: D) -> Self {
        Self { decoder }
    }

    /// Pull decodes until `accept` admits one; rejected decodes are
    /// skipped, `None` means the stream ended without an accepted decode.
    pub async fn first_match<F>(&mut self, accept: F) -> ApiResult<Option<String>>
    where
        F: Fn(&str) -> bool,
    {
        self.decoder.reset();
        while let Some(decoded) = self.decoder.next_decode().await? {
            if accept(&decoded) {
                tracing::debug!(code = %decoded, "scan accepted");
                return Ok(Some(decoded));
            }
            tracing::trace!(code = %decoded, "scan rejected");
        }
        Ok(None)
    }
}

/// Line-based decoder over any async reader. The CLI uses it with stdin
/// as a stand-in for a camera feed: one candidate code per line.
pub struct LineDecoder<R> {
    lines: Lines<R>,
}

impl<R: AsyncBufRead + Unpin> LineDecoder<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> BarcodeDecoder for LineDecoder<R> {
    async fn next_decode(&mut self) -> ApiResult<Option<String>> {
        loop {
            match self.lines.next_line().await? {
                Some(line) => {
                    let trimmed = line.trim();
                    if !trimmed.is_empty() {
                        return Ok(Some(trimmed.to_string()));
                    }
                }
                None => return Ok(None),
            }
        }
    }

    // A line stream cannot rewind; re-arming continues from the current
    // position.
    fn reset(&mut self) {}
}

/// Loose ISBN shape check used as the default acceptance predicate:
/// 13 digits, or 10 with an optional trailing X, hyphens ignored.
pub fn looks_like_isbn(code: &str) -> bool {
    let cleaned: Vec<char> = code.chars().filter(|c| *c != '-' && *c != ' ').collect();
    match cleaned.len() {
        13 => cleaned.iter().all(|c| c.is_ascii_digit()),
        10 => {
            let (head, last) = cleaned.split_at(9);
            head.iter().all(|c| c.is_ascii_digit())
                && (last[0].is_ascii_digit() || last[0] == 'X' || last[0] == 'x')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_first_match_skips_rejected_decodes() {
        let mut decoder = MockBarcodeDecoder::new();
        decoder.expect_reset().times(1).return_const(());
        let mut feed = vec![
            Ok(Some("???".to_string())),
            Ok(Some("978-2-07-036002-4".to_string())),
        ]
        .into_iter();
        decoder
            .expect_next_decode()
            .returning(move || feed.next().unwrap_or(Ok(None)));

        let mut session = ScanSession::new(decoder);
        let code = session.first_match(|c| looks_like_isbn(c)).await.unwrap();
        assert_eq!(code.as_deref(), Some("978-2-07-036002-4"));
    }

    #[tokio::test]
    async fn test_exhausted_stream_yields_none() {
        let mut decoder = MockBarcodeDecoder::new();
        decoder.expect_reset().times(1).return_const(());
        decoder.expect_next_decode().returning(|| Ok(None));

        let mut session = ScanSession::new(decoder);
        let code = session.first_match(|_| true).await.unwrap();
        assert!(code.is_none());
    }

    #[tokio::test]
    async fn test_only_first_accepted_decode_is_consumed() {
        let mut decoder = MockBarcodeDecoder::new();
        decoder.expect_reset().times(1).return_const(());
        let mut feed = vec![
            Ok(Some("9782070360024".to_string())),
            Ok(Some("9780140449136".to_string())),
        ]
        .into_iter();
        decoder
            .expect_next_decode()
            .returning(move || feed.next().unwrap_or(Ok(None)));

        let mut session = ScanSession::new(decoder);
        let code = session.first_match(|c| looks_like_isbn(c)).await.unwrap();
        assert_eq!(code.as_deref(), Some("9782070360024"));
    }

    #[tokio::test]
    async fn test_line_decoder_skips_blank_lines() {
        let input = b"\n  \n9782070360024\n".as_slice();
        let mut session = ScanSession::new(LineDecoder::new(input));
        let code = session.first_match(|c| looks_like_isbn(c)).await.unwrap();
        assert_eq!(code.as_deref(), Some("9782070360024"));
    }

    #[test]
    fn test_isbn_shapes() {
        assert!(looks_like_isbn("9782070360024"));
        assert!(looks_like_isbn("978-2-07-036002-4"));
        assert!(looks_like_isbn("080442957X"));
        assert!(!looks_like_isbn("12345"));
        assert!(!looks_like_isbn("97820703600ZZ"));
    }
}
