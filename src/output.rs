//! Terminal output for suggestions, filtered rows and field statistics

use crate::dataset::Dataset;
use crate::filter::{Page, truncate_display};
use crate::registry::FieldStats;
use crate::utils::{flip_case, token_starts};
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Character positions of `value` to emphasise for `query`.
///
/// Display only: each query character is placed right after the previous one
/// when possible, otherwise at the next token start. Returns nothing if the
/// query cannot be laid out that way.
pub fn highlight_positions(value: &str, query: &str, case_sensitive: bool) -> Vec<usize> {
    let chars: Vec<char> = value.chars().collect();
    let starts = token_starts(value);
    let same = |a: char, b: char| a == b || (!case_sensitive && flip_case(a) == b);

    let mut positions = Vec::new();
    let mut next = 0;

    for q in query.chars() {
        let contiguous = chars.get(next).is_some_and(|&c| same(c, q));
        let pos = if contiguous {
            Some(next)
        } else {
            starts
                .iter()
                .copied()
                .find(|&s| s >= next && same(chars[s], q))
        };

        match pos {
            Some(p) => {
                positions.push(p);
                next = p + 1;
            }
            None => return Vec::new(),
        }
    }

    positions
}

/// Print suggestions for one field, emphasising the matched characters
pub fn print_suggestions(
    field: &str,
    suggestions: &[String],
    query: &str,
    case_sensitive: bool,
    max_len: usize,
    color: ColorChoice,
) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(color);

    stdout.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)).set_bold(true))?;
    writeln!(stdout, "{}", field)?;
    stdout.reset()?;

    for suggestion in suggestions {
        let shown = truncate_display(suggestion, max_len);
        let marks = highlight_positions(shown, query, case_sensitive);
        print_marked(&mut stdout, shown, &marks)?;
        if shown.len() < suggestion.len() {
            write!(stdout, "...")?;
        }
        writeln!(stdout)?;
    }

    Ok(())
}

fn print_marked(stdout: &mut StandardStream, text: &str, marks: &[usize]) -> io::Result<()> {
    let mut marks = marks.iter().peekable();
    for (i, ch) in text.chars().enumerate() {
        if marks.peek() == Some(&&i) {
            marks.next();
            stdout.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
            write!(stdout, "{}", ch)?;
            stdout.reset()?;
        } else {
            write!(stdout, "{}", ch)?;
        }
    }
    Ok(())
}

/// Print a page of rows as tab-separated text under a bold header
pub fn print_rows(dataset: &Dataset, page: &Page<'_>, color: ColorChoice) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(color);

    stdout.set_color(ColorSpec::new().set_bold(true))?;
    writeln!(stdout, "{}", dataset.columns().join("\t"))?;
    stdout.reset()?;

    for &index in page.rows {
        if let Some(row) = dataset.row(index) {
            writeln!(stdout, "{}", row.join("\t"))?;
        }
    }

    stdout.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
    writeln!(
        stdout,
        "-- page {}/{} ({} rows)",
        page.number + 1,
        page.total_pages,
        page.total_rows
    )?;
    stdout.reset()?;

    Ok(())
}

/// Print per-field trie statistics
pub fn print_field_stats(stats: &[FieldStats], color: ColorChoice) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(color);

    stdout.set_color(ColorSpec::new().set_bold(true))?;
    writeln!(
        stdout,
        "{:20} {:>8} {:>8} {:>8} {:>10}",
        "Field", "Values", "Nodes", "Tokens", "Skip links"
    )?;
    stdout.reset()?;

    for field in stats {
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
        write!(stdout, "{:20}", field.name)?;
        stdout.reset()?;
        writeln!(
            stdout,
            " {:>8} {:>8} {:>8} {:>10}",
            field.trie.words, field.trie.nodes, field.trie.skip_targets, field.trie.skip_links
        )?;
    }

    Ok(())
}
