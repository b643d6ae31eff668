//! Line-oriented input for the "Main difficulties" section.

use std::io::{self, BufRead};

/// Reads lines until the first blank line or end of input.
///
/// Line endings are stripped; the terminating blank line is not returned.
///
/// # Errors
///
/// Returns any I/O error raised by `reader`.
pub fn read_difficulties<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    let mut difficulties = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            break;
        }
        difficulties.push(line.to_string());
    }

    Ok(difficulties)
}

/// Runs [`read_difficulties`] on tokio's blocking thread pool.
///
/// # Errors
///
/// Returns any I/O error raised by `reader`, or an error if the blocking
/// task panicked or was cancelled.
pub async fn read_difficulties_blocking<R>(reader: R) -> io::Result<Vec<String>>
where
    R: BufRead + Send + 'static,
{
    tokio::task::spawn_blocking(move || read_difficulties(reader))
        .await
        .map_err(io::Error::other)?
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn stops_at_first_blank_line() {
        let input = Cursor::new("CI queue was slow\r\nReview backlog\n\nignored\n");
        assert_eq!(
            read_difficulties(input).unwrap(),
            vec!["CI queue was slow", "Review backlog"]
        );
    }

    #[test]
    fn whitespace_only_line_terminates() {
        let input = Cursor::new("first\n   \t\nsecond\n");
        assert_eq!(read_difficulties(input).unwrap(), vec!["first"]);
    }

    #[tokio::test]
    async fn reads_on_blocking_pool() {
        let input = Cursor::new("Flaky CI\n\nignored\n".to_string());
        assert_eq!(read_difficulties_blocking(input).await.unwrap(), vec!["Flaky CI"]);
    }

    #[test]
    fn end_of_input_terminates() {
        assert_eq!(read_difficulties(Cursor::new("only line")).unwrap(), vec!["only line"]);
        assert!(read_difficulties(Cursor::new("")).unwrap().is_empty());
    }
}
