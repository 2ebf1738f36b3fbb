//! Typewriter-style reveal of a complete reply.
//!
//! The reply is already stored in full before the reveal starts; the chunks
//! only pace what the user sees.
use anyhow::Result;
use futures::stream::{BoxStream, StreamExt};
use std::time::Duration;

/// Pause after each revealed word unless configured otherwise.
pub const DEFAULT_REVEAL_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealChunk {
    /// A whitespace-delimited token followed by a single space.
    Word(String),
    /// End of a source line.
    LineBreak,
}

impl RevealChunk {
    pub fn as_str(&self) -> &str {
        match self {
            RevealChunk::Word(word) => word,
            RevealChunk::LineBreak => "\n",
        }
    }
}

/// Receives revealed chunks for display.
pub trait ChunkSink {
    fn write_chunk(&mut self, chunk: &str) -> Result<()>;
}

impl ChunkSink for Vec<String> {
    fn write_chunk(&mut self, chunk: &str) -> Result<()> {
        self.push(chunk.to_string());
        Ok(())
    }
}

/// Splits `text` into display chunks without any pacing.
///
/// Every line, including empty ones, ends with a [`RevealChunk::LineBreak`].
pub fn reveal_chunks(text: &str) -> impl Iterator<Item = RevealChunk> + '_ {
    text.split('\n').flat_map(|line| {
        line.split_whitespace()
            .map(|word| RevealChunk::Word(format!("{word} ")))
            .chain(std::iter::once(RevealChunk::LineBreak))
    })
}

/// Paced chunk stream over `text`, sleeping `delay` after every word.
pub fn reveal(text: &str, delay: Duration) -> BoxStream<'static, String> {
    let chunks: Vec<RevealChunk> = reveal_chunks(text).collect();
    Box::pin(async_stream::stream! {
        for chunk in chunks {
            let is_word = matches!(chunk, RevealChunk::Word(_));
            yield chunk.as_str().to_string();
            if is_word && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }
    })
}

/// Reveals `text` into `sink`, stopping at the first sink error.
pub async fn drive(text: &str, delay: Duration, sink: &mut dyn ChunkSink) -> Result<()> {
    let mut stream = reveal(text, delay);
    while let Some(chunk) = stream.next().await {
        sink.write_chunk(&chunk)?;
    }
    Ok(())
}
