//! Control-byte filtering for legacy exports
//!
//! Legacy exports embed raw control bytes inside text content, which a
//! conforming decoder rejects. The filter rewrites every byte below 0x20
//! to a space — never removing it — so byte offsets are preserved and the
//! structural decoder sees only whitespace where the garbage was.

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::io::{AsyncRead, ReadBuf};

/// `AsyncRead` adapter rewriting bytes < 0x20 to `b' '`.
#[derive(Debug)]
pub struct ControlFilter<R> {
    inner: R,
}

impl<R> ControlFilter<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl<R: AsyncRead + Unpin> AsyncRead for ControlFilter<R> {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let before = buf.filled().len();
        match Pin::new(&mut self.inner).poll_read(cx, buf) {
            Poll::Ready(Ok(())) => {
                for byte in &mut buf.filled_mut()[before..] {
                    if *byte < 0x20 {
                        *byte = b' ';
                    }
                }
                Poll::Ready(Ok(()))
            }
            other => other,
        }
    }
}
