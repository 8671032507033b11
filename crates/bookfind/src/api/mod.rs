use serde::de::DeserializeOwned;

use crate::{Error, ErrorKind};

pub(crate) mod google_books;

/// HTTP capability used to reach the book metadata provider.
///
/// The search functions construct the client with [`Default`] for every call, so an
/// implementation must not rely on state shared between calls.
pub trait Client
where
    Self: Default,
{
    /// Sends a GET request to `url` and deserializes the JSON body into `T`.
    ///
    /// # Errors
    ///
    /// An `Err` is returned when the request cannot be sent, the response status is not a
    /// success or the body cannot be deserialized into `T`.
    fn get_json<T>(&self, url: &str) -> Result<T, Error>
    where
        T: DeserializeOwned;
}

impl Client for reqwest::blocking::Client {
    fn get_json<T>(&self, url: &str) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        self.get(url)
            .send()
            .map_err(|e| Error::wrap(ErrorKind::IO, e))?
            .error_for_status()
            .map_err(|e| Error::wrap(ErrorKind::Status, e))?
            .json()
            .map_err(|e| Error::wrap(ErrorKind::Deserialize, e))
    }
}

#[cfg(test)]
pub(crate) use test::{assert_url, impl_text_producer, MockClient, Producer, URL_SINK};

#[cfg(test)]
mod test {

    use super::{Client, DeserializeOwned, Error, ErrorKind};

    thread_local! {
        pub(crate) static URL_SINK: std::cell::RefCell<Option<String>> = std::cell::RefCell::new(None);
    }

    /// Asserts that the expected URL is the same as the one provided to the [`MockClient`].
    ///
    /// The [`MockClient`] will update the static thread local `URL_SINK` with the URL string that
    /// was passed to it, this allows for asserting that implementing functions are building the
    /// correct URL.
    macro_rules! assert_url {
        ($expected: expr) => {
            assert_url!($expected, "");
        };
        ($expected: expr, $($arg: tt)+) => {
            let url = crate::api::URL_SINK.with(|url| url.borrow().clone().unwrap_or_default());
            assert_eq!($expected, url, $($arg)+);
        };
    }

    pub(crate) trait Producer<T>
    where
        Self: Default,
    {
        fn produce() -> Result<T, Error>;
    }

    #[derive(Default)]
    pub(crate) struct MockClient<P: Producer<String> = EmptyItemsProducer> {
        _producer: std::marker::PhantomData<P>,
    }

    impl<P: Producer<String>> Client for MockClient<P> {
        fn get_json<T>(&self, url: &str) -> Result<T, Error>
        where
            T: DeserializeOwned,
        {
            URL_SINK.with(|sink| *sink.borrow_mut() = Some(url.to_owned()));
            P::produce().and_then(|json| {
                serde_json::from_str(&json).map_err(|e| Error::wrap(ErrorKind::Deserialize, e))
            })
        }
    }

    macro_rules! impl_text_producer {
        ($($producer:ident => $exp:expr,)*) => {
            $(
                #[derive(Default)]
                pub(crate) struct $producer;

                impl crate::api::Producer<String> for $producer {
                    fn produce() -> Result<String, crate::Error> {
                        $exp
                    }
                }
            )*
        };
    }
    impl_text_producer! {
        EmptyItemsProducer => Ok(r#"{ "kind": "books#volumes", "totalItems": 0 }"#.to_owned()),
    }

    pub(crate) use assert_url;
    pub(crate) use impl_text_producer;
}
