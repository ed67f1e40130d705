//! Handles all user-facing output for the CLI.
//!
//! Section titles get bold emphasis when stdout is a tty; the header body is
//! byte-identical with or without color.

use std::io::Write;

use termcolor::{ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Prints the assembled header, emphasizing section-title lines.
pub fn print_header(header: &str) {
    let choice = if atty::is(atty::Stream::Stdout) {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(choice);
    for line in header.lines() {
        if is_section_title(line) {
            let _ = stdout.set_color(ColorSpec::new().set_bold(true));
            let _ = writeln!(stdout, "{}", line);
            let _ = stdout.reset();
        } else {
            let _ = writeln!(stdout, "{}", line);
        }
    }
}

fn is_section_title(line: &str) -> bool {
    line.ends_with(':') && !line.starts_with(' ')
}
