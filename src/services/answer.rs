use std::io::{self, BufRead};
use std::sync::Arc;
use tokio::sync::oneshot;

/// Blocking source of typed answers.
///
/// `Ok(None)` means input is closed and no answer will ever come.
#[cfg_attr(test, mockall::automock)]
pub trait AnswerSource: Send + Sync {
    fn read_answer(&self) -> io::Result<Option<String>>;
}

/// Reads one line from standard input and keeps its first
/// whitespace-delimited token.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinAnswers;

impl AnswerSource for StdinAnswers {
    fn read_answer(&self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(first_token(&line)))
    }
}

/// First whitespace-delimited token of `line`, or an empty string.
pub fn first_token(line: &str) -> String {
    line.split_whitespace().next().unwrap_or_default().to_string()
}

/// An answer requested from an [`AnswerCollector`] but not yet delivered.
#[derive(Debug)]
pub struct PendingAnswer {
    answer_rx: oneshot::Receiver<String>,
}

impl PendingAnswer {
    /// Wait for the answer.
    ///
    /// If the reader gave up (input closed) this never resolves; race it
    /// against something that does.
    pub async fn received(self) -> String {
        match self.answer_rx.await {
            Ok(answer) => answer,
            Err(_) => std::future::pending().await,
        }
    }
}

/// Spawns one background read per question.
///
/// Each request runs on its own detached thread because a blocking read
/// cannot be interrupted. When the session ends while a read is still
/// pending, that thread is left behind rather than joined.
pub struct AnswerCollector {
    source: Arc<dyn AnswerSource>,
    requests: usize,
}

impl AnswerCollector {
    pub fn new(source: Arc<dyn AnswerSource>) -> Self {
        Self {
            source,
            requests: 0,
        }
    }

    /// Start exactly one read and hand back its single-slot result.
    ///
    /// A read error is delivered as an empty answer, which scores as wrong.
    pub fn request_answer(&mut self) -> io::Result<PendingAnswer> {
        self.requests += 1;
        let request = self.requests;
        let source = Arc::clone(&self.source);
        let (answer_tx, answer_rx) = oneshot::channel();

        std::thread::Builder::new()
            .name(format!("answer-{}", request))
            .spawn(move || {
                let answer = match source.read_answer() {
                    Ok(Some(answer)) => answer,
                    Ok(None) => {
                        tracing::debug!("Input closed, answer request {} left unresolved", request);
                        return;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to read answer {}: {}", request, e);
                        String::new()
                    }
                };

                // The session may already be over; nobody is listening then
                if answer_tx.send(answer).is_err() {
                    tracing::debug!("Answer {} arrived after the session ended", request);
                }
            })?;

        Ok(PendingAnswer { answer_rx })
    }

    /// Number of reads started so far.
    pub fn requests(&self) -> usize {
        self.requests
    }
}
