use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use super::App;
use crate::error::AppResult;

const PROMPT: &str = "tandem> ";

/// ## Summary
/// Reads commands line by line from `input` and writes replies to `output`
/// until `quit` or end of input.
///
/// ## Errors
/// Returns an error if reading or writing fails.
pub async fn run<R, W>(app: &mut App, input: R, mut output: W) -> AppResult<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();

    output
        .write_all(b"Type 'help' for the list of commands.\n")
        .await?;
    loop {
        output.write_all(PROMPT.as_bytes()).await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await? else {
            tracing::debug!("End of input");
            break;
        };

        let reply = app.handle_line(&line).await;
        if !reply.text.is_empty() {
            output.write_all(reply.text.as_bytes()).await?;
            if !reply.text.ends_with('\n') {
                output.write_all(b"\n").await?;
            }
        }
        if reply.quit {
            break;
        }
    }
    output.flush().await?;
    Ok(())
}
