use std::fmt::Write;

use bookfind::Book;
use clap::ArgEnum;

/// How a found book is printed to stdout.
#[derive(ArgEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Text,
}

pub fn render(book: &Book, format: OutputFormat) -> eyre::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(book)?),
        OutputFormat::Text => Ok(render_text(book)?),
    }
}

fn render_text(book: &Book) -> Result<String, std::fmt::Error> {
    let mut out = String::new();

    writeln!(out, "{}", book.title)?;
    if !book.authors.is_empty() {
        writeln!(out, "  by {}", book.authors.join(", "))?;
    }

    match (book.publisher.is_empty(), book.published_date.is_empty()) {
        (false, false) => writeln!(out, "  {}, {}", book.publisher, book.published_date)?,
        (false, true) => writeln!(out, "  {}", book.publisher)?,
        (true, false) => writeln!(out, "  {}", book.published_date)?,
        (true, true) => {}
    }

    if let Some(isbn) = &book.isbn13 {
        writeln!(out, "  ISBN-13: {isbn}")?;
    }
    if let Some(isbn) = &book.isbn10 {
        writeln!(out, "  ISBN-10: {isbn}")?;
    }

    writeln!(
        out,
        "  Rating: {} ({} ratings)",
        book.average_rating, book.ratings_count
    )?;

    let link = if book.google_books.canonical.is_empty() {
        &book.google_books.info
    } else {
        &book.google_books.canonical
    };
    if !link.is_empty() {
        writeln!(out, "  {link}")?;
    }

    Ok(out.trim_end().to_owned())
}
