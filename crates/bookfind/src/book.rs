//! The normalized book record returned by every search.

use serde::Serialize;

use crate::api::google_books::{ImageLinks, Volume, VolumeInfo};

const FALLBACK_IMAGE_URL: &str = "https://tse2.mm.bing.net/th";
const FALLBACK_IMAGE_PARAMS: &str = "w=256&h=256&c=7&rs=1&p=0&dpr=3&pid=1.7&mkt=en-IN&adlt=moderate";

/// A book as described by the metadata provider, with every optional field defaulted.
///
/// Serializes with camelCase keys, `isbn10` and `isbn13` are omitted when the provider did not
/// list an identifier of that type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Title of the book, may be empty.
    pub title: String,
    /// Authors in the order the provider listed them.
    pub authors: Vec<String>,
    pub publisher: String,
    pub published_date: String,
    pub description: String,
    /// Cover image url, never empty.
    ///
    /// When the provider has no thumbnail this is an image search url built from the title and
    /// authors, see [`fallback_image_url`]. The url is only well formed, it is not guaranteed to
    /// resolve to an image.
    pub image: String,
    pub language: String,
    pub average_rating: f64,
    pub ratings_count: u32,
    pub categories: Vec<String>,
    pub page_count: u32,
    pub maturity_rating: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn10: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn13: Option<String>,
    pub google_books: GoogleBooksInfo,
}

/// Provider specific references for the volume a [`Book`] was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GoogleBooksInfo {
    /// Opaque Google Books volume id.
    pub id: String,
    pub preview: String,
    pub info: String,
    pub canonical: String,
}

/// Image search url for `"{title} by {authors}"`, with the authors joined by `", "`.
#[must_use]
pub fn fallback_image_url(title: &str, authors: &[String]) -> String {
    let query = format!("{title} by {}", authors.join(", "));
    format!(
        "{FALLBACK_IMAGE_URL}?q={}&{FALLBACK_IMAGE_PARAMS}",
        urlencoding::encode(&query)
    )
}

impl From<Volume> for Book {
    fn from(volume: Volume) -> Self {
        let isbn10 = volume.volume_info.identifier("ISBN_10").map(str::to_owned);
        let isbn13 = volume.volume_info.identifier("ISBN_13").map(str::to_owned);

        // Deconstruct volume to take ownership of fields (avoids cloning).
        let Volume {
            id,
            volume_info:
                VolumeInfo {
                    title,
                    authors,
                    publisher,
                    published_date,
                    description,
                    industry_identifiers: _,
                    page_count,
                    categories,
                    average_rating,
                    ratings_count,
                    maturity_rating,
                    image_links,
                    language,
                    preview_link,
                    info_link,
                    canonical_volume_link,
                },
        } = volume;

        let authors = authors.unwrap_or_default();
        let image = image_links
            .and_then(|ImageLinks { thumbnail }| thumbnail)
            .filter(|thumbnail| !thumbnail.is_empty())
            .unwrap_or_else(|| fallback_image_url(&title, &authors));

        Self {
            title,
            authors,
            publisher: publisher.unwrap_or_default(),
            published_date: published_date.unwrap_or_default(),
            description: description.unwrap_or_default(),
            image,
            language: language.unwrap_or_default(),
            average_rating: average_rating.unwrap_or_default(),
            ratings_count: ratings_count.unwrap_or_default(),
            categories: categories.unwrap_or_default(),
            page_count: page_count.unwrap_or_default(),
            maturity_rating: maturity_rating.unwrap_or_default(),
            isbn10,
            isbn13,
            google_books: GoogleBooksInfo {
                id,
                preview: preview_link.unwrap_or_default(),
                info: info_link.unwrap_or_default(),
                canonical: canonical_volume_link.unwrap_or_default(),
            },
        }
    }
}
