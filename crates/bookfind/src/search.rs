//! Title and ISBN searches against the Google Books API.
//!
//! A title search scores every candidate the provider returns, applies the optional rating and
//! exact title filters and normalizes the best scoring candidate. An ISBN search trusts the
//! provider and normalizes the first candidate as is.

use log::{debug, info, warn};

use crate::{
    api::{
        google_books::{self, Volume, VolumeInfo},
        Client,
    },
    Book, Error, ErrorKind,
};

/// Options for a title search, see [`book_by_title`][crate::book_by_title].
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    /// Upper bound on the number of candidates requested from the provider.
    pub max_results: u32,
    /// Keep only candidates whose title equals the query, when at least one does.
    pub exact_title_match: bool,
    /// Drop candidates rated below this, unless that would drop every candidate.
    pub min_rating: f64,
    /// Restrict candidates to a language code such as `en`.
    pub language: Option<String>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_results: 10,
            exact_title_match: false,
            min_rating: 0.0,
            language: None,
        }
    }
}

struct ScoredVolume {
    volume: Volume,
    score: f64,
}

pub(crate) fn get_book_by_title<C: Client>(
    query: &str,
    options: &SearchOptions,
) -> Result<Book, Error> {
    let url = google_books::volumes_url(
        &provider_query(query),
        options.language.as_deref(),
        Some(options.max_results),
    );

    let volumes = google_books::get_volumes::<C>(&url)?;
    if volumes.is_empty() {
        return Err(Error::new(
            ErrorKind::NotFound,
            format!("No books found with a title of '{query}'"),
        ));
    }

    let best = rank(volumes, query, options)
        .into_iter()
        .next()
        .map(|scored| scored.volume)
        .ok_or_else(|| Error::new(ErrorKind::NotFound, "No books left after ranking"))?;

    info!("Best match for '{query}' is '{}'", best.volume_info.title);
    Ok(Book::from(best))
}

pub(crate) fn get_book_by_isbn<C: Client>(isbn: &str) -> Result<Book, Error> {
    // remove hypens from ISBN-13 (if applicable)
    let isbn = isbn.replace('-', "");
    let url = google_books::volumes_url(&format!("isbn:{isbn}"), None, None);

    google_books::get_volumes::<C>(&url)?
        .into_iter()
        .next()
        .map(Book::from)
        .ok_or_else(|| {
            Error::new(
                ErrorKind::NotFound,
                format!("No book found with an ISBN of '{isbn}'"),
            )
        })
}

/// The `q` parameter for a title search.
///
/// Queries that already carry a field qualifier (`inauthor:...`) or look like an ISBN are passed
/// through, anything else becomes an `intitle` phrase search.
pub(crate) fn provider_query(query: &str) -> String {
    let is_structured =
        query.contains(':') || query.chars().all(|c| c.is_ascii_digit() || c == '-');

    if is_structured {
        query.to_owned()
    } else {
        format!("intitle:\"{query}\"")
    }
}

fn is_exact_title(info: &VolumeInfo, query: &str) -> bool {
    info.title.trim().to_lowercase() == query.trim().to_lowercase()
}

/// Relevance of a single candidate for `query`, independent of any other candidate.
pub(crate) fn score(info: &VolumeInfo, query: &str) -> f64 {
    let mut score = 10.0;

    score += f64::from(info.ratings_count.unwrap_or_default()) / 100.0;
    score += info.rating() * 5.0;

    if is_exact_title(info, query) {
        score += 50.0;
    } else if info.title.to_lowercase().contains(&query.to_lowercase()) {
        score += 20.0;
    }

    if info.description.is_some() {
        score += 5.0;
    }
    if info.thumbnail().is_some() {
        score += 5.0;
    }
    if info.has_identifiers() {
        score += 5.0;
    }

    score
}

/// Scores, filters and orders `volumes` from best to worst match.
///
/// The rating filter is reverted when it would remove every candidate and the exact title filter
/// only applies when something still in the working set matches. Emptiness of the working set is
/// checked once more after both filters, in which case every candidate is kept with a score of 0
/// so the provider order decides.
fn rank(volumes: Vec<Volume>, query: &str, options: &SearchOptions) -> Vec<ScoredVolume> {
    let mut scored: Vec<ScoredVolume> = volumes
        .into_iter()
        .map(|volume| {
            let score = score(&volume.volume_info, query);
            debug!("Scored '{}' with {score}", volume.volume_info.title);
            ScoredVolume { volume, score }
        })
        .collect();

    let mut working = vec![true; scored.len()];

    if options.min_rating > 0.0 {
        let rated: Vec<bool> = scored
            .iter()
            .map(|s| s.volume.volume_info.rating() >= options.min_rating)
            .collect();

        if rated.contains(&true) {
            working = rated;
        } else {
            warn!(
                "No candidates rated at least {} - ignoring the rating filter",
                options.min_rating
            );
        }
    }

    if options.exact_title_match {
        let exact: Vec<bool> = scored
            .iter()
            .zip(&working)
            .map(|(s, keep)| *keep && is_exact_title(&s.volume.volume_info, query))
            .collect();

        if exact.contains(&true) {
            working = exact;
        } else {
            debug!("No exact title match for '{query}' - ignoring the exact title filter");
        }
    }

    if working.contains(&true) {
        scored = scored
            .into_iter()
            .zip(working)
            .filter_map(|(s, keep)| keep.then_some(s))
            .collect();
        debug!("{} candidate(s) left after filtering", scored.len());
    } else {
        warn!("Filtering removed every candidate - falling back to provider order");
        for s in &mut scored {
            s.score = 0.0;
        }
    }

    // `sort_by` is stable so equal scores keep the provider order.
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored
}
