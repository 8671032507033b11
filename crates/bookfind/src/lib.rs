#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc,
    clippy::missing_const_for_fn
)]
#![warn(missing_docs, rust_2018_idioms)]
#![allow(clippy::module_name_repetitions)]

//! # bookfind
//!
//! bookfind looks up a single book from the Google Books API, either by a free text title query
//! which is ranked locally to pick the best candidate, or by ISBN. The result is always a
//! normalized [`Book`] with every optional provider field defaulted.

mod api;
pub mod book;
mod error;
mod search;

pub use api::Client;
pub use book::{Book, GoogleBooksInfo};
pub use error::{Error, ErrorKind};
pub use search::SearchOptions;

use log::trace;

type DefaultClient = reqwest::blocking::Client;

/// Search for the book best matching `query` using the default API client.
///
/// A `query` containing a `:` (e.g. `inauthor:Herbert`) or made up of only digits and hyphens is
/// sent to the API as is, any other query is searched as a title phrase. The candidates returned
/// are scored locally and filtered by the [`SearchOptions`] before the best one is returned.
///
/// # Errors
///
/// An `Err` of [`ErrorKind::NotFound`] is returned when the API has no candidates for `query`.
/// An `Err` is returned when the request fails or the response cannot be deserialized.
#[inline]
pub fn book_by_title(query: &str, options: &SearchOptions) -> Result<Book, Error> {
    book_by_title_with::<DefaultClient>(query, options)
}

/// Search for the book best matching `query` using the client `C`.
///
/// See [`book_by_title`].
///
/// # Errors
///
/// An `Err` of [`ErrorKind::NotFound`] is returned when the API has no candidates for `query`.
/// An `Err` is returned when the client fails to produce a response.
pub fn book_by_title_with<C: Client>(query: &str, options: &SearchOptions) -> Result<Book, Error> {
    trace!("Search book by title of '{query}' with {options:?}");
    search::get_book_by_title::<C>(query, options)
}

/// Search for the book with the given `isbn` using the default API client.
///
/// Hyphens are removed from the `isbn` before searching. The first candidate returned by the API
/// is used as is, no ranking is applied.
///
/// # Errors
///
/// An `Err` of [`ErrorKind::NotFound`] is returned when no book is found for the `isbn`.
/// An `Err` is returned when the request fails or the response cannot be deserialized.
#[inline]
pub fn book_by_isbn(isbn: &str) -> Result<Book, Error> {
    book_by_isbn_with::<DefaultClient>(isbn)
}

/// Search for the book with the given `isbn` using the client `C`.
///
/// See [`book_by_isbn`].
///
/// # Errors
///
/// An `Err` of [`ErrorKind::NotFound`] is returned when no book is found for the `isbn`.
/// An `Err` is returned when the client fails to produce a response.
pub fn book_by_isbn_with<C: Client>(isbn: &str) -> Result<Book, Error> {
    trace!("Search book by ISBN of '{isbn}'");
    search::get_book_by_isbn::<C>(isbn)
}
