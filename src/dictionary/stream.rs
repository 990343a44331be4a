//! Streaming dictionary parser.
//!
//! [`parse_stream`] spawns a task that reads a source line by line, runs each
//! line through a [`LineGrammar`] and pushes the resulting tokens onto a
//! bounded channel. The run ends in exactly one [`ParseOutcome`]:
//!
//! ```text
//! Idle → Reading ─┬─→ Completed   (end of input, or the consumer hung up)
//!                 └─→ Failed      (malformed line or read error)
//! ```
//!
//! The token channel is always closed before the outcome is written, so a
//! consumer that drains the stream and then waits on the outcome observes
//! every token that preceded a failure.

use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, BufReader},
    sync::{mpsc, oneshot},
};
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, warn};

use super::{
    error::{DictionaryError, DictionaryResult},
    grammar::LineGrammar,
    token::Token,
};

/// Ordered stream of parsed tokens. Ends when the parser stops.
pub type TokenStream = ReceiverStream<Token>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum ParserState {
    Idle,
    Reading,
    Completed,
    Failed,
}

/// Counters of a finished parse run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseSummary {
    pub lines_read: usize,
    pub tokens_sent: usize,
}

/// Single-assignment slot holding the terminal result of a parse run.
pub struct ParseOutcome {
    receiver: oneshot::Receiver<DictionaryResult<ParseSummary>>,
}

impl ParseOutcome {
    /// Waits for the parser to stop.
    ///
    /// Consumers must drain (or drop) the paired [`TokenStream`] first; with
    /// a bounded channel the parser cannot finish while tokens are pending.
    pub async fn wait(self) -> DictionaryResult<ParseSummary> {
        match self.receiver.await {
            Ok(result) => result,
            Err(_) => Err(DictionaryError::ParserAborted),
        }
    }
}

/// Starts parsing `reader` on a background task.
///
/// `buffer_size` is the token channel capacity; values below 1 are raised
/// to 1.
pub fn parse_stream<R>(
    reader: R,
    grammar: LineGrammar,
    buffer_size: usize,
) -> (TokenStream, ParseOutcome)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let (token_tx, token_rx) = mpsc::channel(buffer_size.max(1));
    let (outcome_tx, outcome_rx) = oneshot::channel();

    tokio::spawn(async move {
        let parser = StreamParser::new(grammar);
        // token_tx is consumed by run, closing the stream before the outcome lands
        let result = parser.run(BufReader::new(reader), token_tx).await;
        if outcome_tx.send(result).is_err() {
            debug!("parse outcome dropped before the parser finished");
        }
    });

    (
        ReceiverStream::new(token_rx),
        ParseOutcome {
            receiver: outcome_rx,
        },
    )
}

struct StreamParser {
    grammar: LineGrammar,
    state: ParserState,
    summary: ParseSummary,
}

impl StreamParser {
    fn new(grammar: LineGrammar) -> Self {
        Self {
            grammar,
            state: ParserState::Idle,
            summary: ParseSummary::default(),
        }
    }

    fn transition(&mut self, next: ParserState) {
        debug!(
            from = %self.state,
            to = %next,
            lines_read = self.summary.lines_read,
            tokens_sent = self.summary.tokens_sent,
            "dictionary parser state changed"
        );
        self.state = next;
    }

    fn fail(&mut self, error: DictionaryError) -> DictionaryResult<ParseSummary> {
        warn!("dictionary parsing stopped: {}", error);
        self.transition(ParserState::Failed);
        Err(error)
    }

    #[tracing::instrument(level = "debug", skip_all)]
    async fn run<B>(
        mut self,
        reader: B,
        tokens: mpsc::Sender<Token>,
    ) -> DictionaryResult<ParseSummary>
    where
        B: AsyncBufRead + Unpin,
    {
        self.transition(ParserState::Reading);
        let mut reader = reader;
        let mut buf = Vec::new();

        loop {
            let line_number = self.summary.lines_read + 1;
            buf.clear();
            match reader.read_until(b'\n', &mut buf).await {
                Ok(0) => break,
                Ok(_) => {}
                Err(source) => {
                    return self.fail(DictionaryError::StreamRead {
                        line_number,
                        source,
                    })
                }
            }
            self.summary.lines_read = line_number;
            let line = decode_line(&buf);

            let token = match self.grammar.parse_line(line_number, &line) {
                Ok(Some(token)) => token,
                Ok(None) => continue,
                Err(error) => return self.fail(error),
            };
            if tokens.send(token).await.is_err() {
                debug!(line_number, "token stream closed by the consumer");
                break;
            }
            self.summary.tokens_sent += 1;
        }

        self.transition(ParserState::Completed);
        Ok(self.summary)
    }
}

/// Strips the line terminator and decodes the rest, replacing invalid UTF-8
/// with U+FFFD so one bad byte does not cost the rest of the dictionary.
fn decode_line(buf: &[u8]) -> std::borrow::Cow<'_, str> {
    let line = buf.strip_suffix(b"\n").unwrap_or(buf);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    String::from_utf8_lossy(line)
}
