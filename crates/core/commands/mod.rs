use bookfind::{Book, SearchOptions};

use clap::Subcommand;
use eyre::{eyre, WrapErr};
use log::trace;

#[derive(Subcommand)]
#[non_exhaustive]
pub enum Commands {
    /// Find the book best matching a title
    ///
    /// A query containing a `:` (e.g. `inauthor:Herbert`) or made up of only digits and hyphens
    /// is sent to Google Books as is, anything else is searched as a title phrase.
    #[clap(arg_required_else_help = true)]
    Title {
        /// The title, or a structured query, to search for
        query: String,

        /// The maximum number of candidates to request
        #[clap(long, default_value_t = 10)]
        max_results: u32,

        /// Only return a book whose title matches the query exactly, when one exists
        #[clap(short, long)]
        exact: bool,

        /// Ignore books rated below this, unless every book is rated below it
        #[clap(long, default_value_t = 0.0)]
        min_rating: f64,

        /// Only search books in this language, e.g. `en`
        #[clap(short, long)]
        lang: Option<String>,
    },
    /// Find a book by ISBN
    #[clap(arg_required_else_help = true)]
    Isbn {
        /// The ISBN-10 or ISBN-13 to search for, hyphens are allowed
        isbn: String,
    },
}

impl Commands {
    pub fn execute(self) -> eyre::Result<Book> {
        match self {
            Commands::Title {
                query,
                max_results,
                exact,
                min_rating,
                lang,
            } => {
                if query.trim().is_empty() {
                    return Err(eyre!("The title query cannot be empty"));
                }

                let options = SearchOptions {
                    max_results,
                    exact_title_match: exact,
                    min_rating,
                    language: lang,
                };
                trace!("title subcommand called with '{query}' and {options:?}");
                bookfind::book_by_title(&query, &options)
                    .wrap_err_with(|| format!("Failed to find a book with a title of '{query}'"))
            }
            Commands::Isbn { isbn } => {
                trace!("isbn subcommand called with the value of '{isbn}'");
                bookfind::book_by_isbn(&isbn)
                    .wrap_err_with(|| format!("Failed to find a book with an ISBN of '{isbn}'"))
            }
        }
    }
}
