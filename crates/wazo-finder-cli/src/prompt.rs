//! Operator confirmation on stdin.

use std::io::{self, BufRead, Write};

use async_trait::async_trait;

use wazo_finder_core::error::PromptError;
use wazo_finder_core::report::{is_affirmative, Confirm};

/// Yes/no prompt on stderr, answer read from stdin on a blocking thread.
pub struct StdinConfirm;

#[async_trait]
impl Confirm for StdinConfirm {
    async fn confirm(&self, question: &str) -> Result<bool, PromptError> {
        let question = question.to_string();

        let answer = tokio::task::spawn_blocking(move || {
            read_answer(&question, &mut io::stdin().lock(), &mut io::stderr())
        })
        .await
        .map_err(|e| PromptError::Io(io::Error::new(io::ErrorKind::Other, e)))??;

        Ok(is_affirmative(&answer))
    }
}

/// Print the question and read one line; end of input is `PromptError::Closed`.
fn read_answer<R: BufRead, W: Write>(
    question: &str,
    input: &mut R,
    output: &mut W,
) -> Result<String, PromptError> {
    write!(output, "{} (y/N) ", question)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(PromptError::Closed);
    }
    Ok(line)
}
