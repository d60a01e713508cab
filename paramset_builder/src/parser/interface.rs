use std::io::BufRead;

/// A source of interactively entered lines.
///
/// Every [`BufRead`] is a line source, so `std::io::stdin().lock()` and `std::io::Cursor` both work.
pub trait LineSource {
    /// Read the next line, without its line terminator.
    /// Returns `Ok(None)` once the input is exhausted.
    fn next_line(&mut self) -> std::io::Result<Option<String>>;
}

impl<R: BufRead> LineSource for R {
    fn next_line(&mut self) -> std::io::Result<Option<String>> {
        let mut line = String::default();

        if self.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        if line.ends_with('\n') {
            line.pop();

            if line.ends_with('\r') {
                line.pop();
            }
        }

        Ok(Some(line))
    }
}
