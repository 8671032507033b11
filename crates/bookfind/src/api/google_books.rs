use log::{info, trace};
use serde::Deserialize;

use crate::Error;

use super::Client;

const GOOGLE_BOOKS_URL: &str = "https://www.googleapis.com/books/v1/volumes";

/// Builds the volumes search url, `q` is percent encoded here while the optional parameters are
/// appended in the order `langRestrict`, `maxResults`.
pub(crate) fn volumes_url(q: &str, language: Option<&str>, max_results: Option<u32>) -> String {
    let mut url = format!("{GOOGLE_BOOKS_URL}?q={}", urlencoding::encode(q));

    if let Some(language) = language {
        url.push_str("&langRestrict=");
        url.push_str(&urlencoding::encode(language));
    }

    if let Some(max_results) = max_results {
        url.push_str(&format!("&maxResults={max_results}"));
    }

    url
}

/// Fetches the candidate volumes at `url`, in the order the provider ranked them.
///
/// An empty `Vec` is a valid result, the provider omits `items` entirely when nothing matched.
pub(crate) fn get_volumes<C: Client>(url: &str) -> Result<Vec<Volume>, Error> {
    info!("Searching Google Books API with '{url}'");

    let client = C::default();
    let Volumes { items } = client.get_json(url)?;

    trace!("Request was successful, {} candidate(s) returned", items.len());
    Ok(items)
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct Volumes {
    #[serde(default)]
    items: Vec<Volume>,
}

/// A single candidate returned by the Google Books API.
#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug, Clone))]
#[serde(rename_all = "camelCase")]
pub(crate) struct Volume {
    pub(crate) id: String,
    pub(crate) volume_info: VolumeInfo,
}

/// Volume information from the Google Book API
#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug, Clone, Default))]
#[serde(rename_all = "camelCase")]
pub(crate) struct VolumeInfo {
    pub(crate) title: String,
    pub(crate) authors: Option<Vec<String>>,
    pub(crate) publisher: Option<String>,
    pub(crate) published_date: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) industry_identifiers: Option<Vec<IndustryIdentifier>>,
    pub(crate) page_count: Option<u32>,
    pub(crate) categories: Option<Vec<String>>,
    pub(crate) average_rating: Option<f64>,
    pub(crate) ratings_count: Option<u32>,
    pub(crate) maturity_rating: Option<String>,
    pub(crate) image_links: Option<ImageLinks>,
    pub(crate) language: Option<String>,
    pub(crate) preview_link: Option<String>,
    pub(crate) info_link: Option<String>,
    pub(crate) canonical_volume_link: Option<String>,
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug, Clone))]
pub(crate) struct IndustryIdentifier {
    #[serde(rename = "type")]
    pub(crate) kind: String,
    pub(crate) identifier: String,
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug, Clone))]
pub(crate) struct ImageLinks {
    pub(crate) thumbnail: Option<String>,
}

impl VolumeInfo {
    pub(crate) fn thumbnail(&self) -> Option<&str> {
        self.image_links
            .as_ref()
            .and_then(|links| links.thumbnail.as_deref())
    }

    pub(crate) fn has_identifiers(&self) -> bool {
        self.industry_identifiers
            .as_ref()
            .is_some_and(|ids| !ids.is_empty())
    }

    /// Average rating, an unrated volume counts as 0.
    pub(crate) fn rating(&self) -> f64 {
        self.average_rating.unwrap_or_default()
    }

    /// First identifier of the given type, e.g. `ISBN_13`.
    pub(crate) fn identifier(&self, kind: &str) -> Option<&str> {
        self.industry_identifiers
            .as_deref()
            .unwrap_or_default()
            .iter()
            .find(|id| id.kind == kind)
            .map(|id| id.identifier.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::Volumes;
    use crate::{
        api::{assert_url, impl_text_producer, MockClient},
        Error, ErrorKind,
    };

    const DUNE_JSON: &str = include_str!("../../tests/data/dune_volumes.json");

    impl_text_producer! {
        DuneProducer => Ok(DUNE_JSON.to_owned()),
        ServerErrorProducer => Err(Error::new(ErrorKind::Status, "503 Service Unavailable")),
    }

    #[test]
    fn url_appends_lang_restrict_before_max_results() {
        assert_eq!(
            "https://www.googleapis.com/books/v1/volumes?q=intitle%3A%22Dune%22&langRestrict=en&maxResults=10",
            super::volumes_url("intitle:\"Dune\"", Some("en"), Some(10))
        );
    }

    #[test]
    fn url_without_optional_parameters_only_has_q() {
        assert_eq!(
            "https://www.googleapis.com/books/v1/volumes?q=isbn%3A9780441013593",
            super::volumes_url("isbn:9780441013593", None, None)
        );
    }

    #[test]
    fn volumes_are_returned_in_provider_order() {
        let expected = super::volumes_url("Dune", None, None);
        let volumes = super::get_volumes::<MockClient<DuneProducer>>(&expected)
            .expect("DuneProducer always produces valid json");

        let titles: Vec<_> = volumes.iter().map(|v| v.volume_info.title.as_str()).collect();
        assert_eq!(vec!["Dune Messiah", "Dune (Italian Edition)", "Dune"], titles);
        assert_url!(expected);
    }

    #[test]
    fn missing_items_deserializes_to_empty() {
        let volumes = super::get_volumes::<MockClient>("ignored").unwrap();
        assert!(volumes.is_empty());
    }

    #[test]
    fn client_error_is_propagated_unmodified() {
        let err = super::get_volumes::<MockClient<ServerErrorProducer>>("ignored")
            .expect_err("ServerErrorProducer always fails");

        assert_eq!(ErrorKind::Status, err.kind());
        assert_eq!("Status error: 503 Service Unavailable", err.to_string());
    }

    #[test]
    fn optional_fields_can_be_absent() {
        let json = r#"{
            "items": [
                { "id": "abc", "volumeInfo": { "title": "Bare" } }
            ]
        }"#;
        let Volumes { items } = serde_json::from_str(json).unwrap();
        let info = &items[0].volume_info;

        assert_eq!("abc", items[0].id);
        assert!(info.authors.is_none());
        assert!(info.thumbnail().is_none());
        assert!(!info.has_identifiers());
        assert!(info.rating().abs() < f64::EPSILON);
    }

    #[test]
    fn identifier_takes_first_of_type() {
        let Volumes { items } = serde_json::from_str(DUNE_JSON).unwrap();
        let dune = &items[2].volume_info;

        assert_eq!(Some("0441013597"), dune.identifier("ISBN_10"));
        assert_eq!(Some("9780441013593"), dune.identifier("ISBN_13"));
        assert_eq!(None, dune.identifier("ISSN"));
    }
}
