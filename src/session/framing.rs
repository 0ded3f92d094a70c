//! Request framing
//!
//! A request ends at `\n` or at the end of what one read delivered,
//! whichever comes first. Clients are not required to send a terminator.

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// One unit read from a client stream.
#[derive(Debug, PartialEq)]
pub enum Frame {
    /// A complete request, terminator stripped.
    Line(String),
    /// A request longer than the limit; its contents were discarded.
    Overlong,
    /// The peer closed its side of the connection.
    Eof,
}

/// Reads the next request of at most `max_len` bytes.
///
/// Buffered bytes are split at `\n`, with a `\r` before it stripped. Bytes
/// left without a terminator once the buffered data runs out form a
/// request on their own, the same as a single `recv`. Invalid UTF-8 is
/// replaced rather than rejected.
pub async fn read_frame<R>(reader: &mut R, max_len: usize) -> std::io::Result<Frame>
where
    R: AsyncBufRead + Unpin,
{
    let available = reader.fill_buf().await?;

    if available.is_empty() {
        return Ok(Frame::Eof);
    }

    let (message, consumed) = match available.iter().position(|&b| b == b'\n') {
        Some(pos) => (&available[..pos], pos + 1),
        None => (available, available.len()),
    };
    let message = message.strip_suffix(b"\r").unwrap_or(message);

    let frame = if message.len() > max_len {
        Frame::Overlong
    } else {
        Frame::Line(String::from_utf8_lossy(message).into_owned())
    };

    reader.consume(consumed);
    Ok(frame)
}
