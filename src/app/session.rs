use crate::domain::model::RunReport;
use std::io::{self, BufRead, Write};

pub const BANNER: &str = "=== Navigator file update ===";
const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";
const REPEAT_CHOICE: &str = "1";

/// Console loop around an update routine.
///
/// Waits for Enter, then runs `update` and asks whether to go again until the
/// user answers anything other than `1` or input ends. Returns the number of
/// runs performed.
pub fn run_interactive<I, O, F>(input: &mut I, output: &mut O, mut update: F) -> io::Result<usize>
where
    I: BufRead,
    O: Write,
    F: FnMut() -> anyhow::Result<RunReport>,
{
    writeln!(output, "{}", BANNER)?;
    writeln!(output, "Press Enter to start")?;
    output.flush()?;
    read_answer(input)?;

    let mut runs = 0;
    loop {
        write!(output, "{}", CLEAR_SCREEN)?;
        writeln!(output, "{}", BANNER)?;
        writeln!(output)?;
        output.flush()?;

        match update() {
            Ok(report) if report.drive_found() => {
                writeln!(output)?;
                writeln!(output, "{}", "=".repeat(50))?;
                writeln!(output, "Update completed successfully!")?;
            }
            Ok(_) => {}
            Err(e) => {
                tracing::error!("Update run failed: {:#}", e);
                writeln!(output)?;
                writeln!(output, "Critical error: {:#}", e)?;
                writeln!(output, "Details: {:?}", e)?;
            }
        }
        runs += 1;

        writeln!(output)?;
        writeln!(output, "Choose an action:")?;
        writeln!(output, "1 - Repeat update")?;
        writeln!(output, "2 - Exit")?;
        write!(output, "Your choice: ")?;
        output.flush()?;

        match read_answer(input)? {
            Some(answer) if answer == REPEAT_CHOICE => continue,
            _ => break,
        }
    }

    writeln!(output, "Done. Press Enter to exit...")?;
    output.flush()?;
    read_answer(input)?;
    Ok(runs)
}

/// One trimmed line, or `None` at end of input.
fn read_answer<I: BufRead>(input: &mut I) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
