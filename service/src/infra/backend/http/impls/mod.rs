//! [`Backend`] implementations.
//!
//! [`Backend`]: crate::infra::Backend

mod feedback;
mod menu;
mod order;
mod payment;
mod user;

use std::str::FromStr;

use common::pagination::{Arguments, Page, TotalPages};
use tracerr::Traced;
use tracing as log;

use crate::infra::backend;

use super::{Error, PageEnvelope};

/// Name of a wire field holding a value the domain rejects.
type Field = &'static str;

/// Parses the trimmed `raw` value of the given [`Field`].
fn parse<T: FromStr>(field: Field, raw: &str) -> Result<T, Field> {
    raw.trim().parse().map_err(|_| field)
}

/// Converts a [`Field`] rejection into a [`backend::Error`].
fn malformed(field: Field) -> Traced<backend::Error> {
    tracerr::new!(backend::Error::from(Error::Malformed(field)))
}

/// Decodes the `raw` records, skipping the ones the domain rejects.
fn decode_all<R, T>(raw: Vec<R>) -> Vec<T>
where
    R: TryInto<T, Error = Field>,
{
    raw.into_iter()
        .filter_map(|r| {
            r.try_into()
                .inspect_err(|field| {
                    log::warn!("skipping record with malformed `{field}`");
                })
                .ok()
        })
        .collect()
}

impl<R> PageEnvelope<R> {
    /// Converts this [`PageEnvelope`] into a [`Page`] of the requested
    /// [`Arguments`].
    ///
    /// Records the domain rejects are skipped rather than failing the whole
    /// [`Page`].
    fn into_page<T>(self, args: &Arguments) -> Page<T>
    where
        R: TryInto<T, Error = Field>,
    {
        Page::new(
            args,
            decode_all::<R, T>(self.data),
            TotalPages::new(self.total_pages.unwrap_or(1)),
        )
    }
}

/// Query string of pagination [`Arguments`].
fn pagination(args: &Arguments) -> [(&'static str, String); 2] {
    [
        ("page", args.page.to_string()),
        ("limit", args.limit.to_string()),
    ]
}

#[cfg(test)]
mod spec {
    use common::pagination::{Arguments, Limit, PageNum, TotalPages};

    use super::{parse, Field, PageEnvelope};

    struct Even(u32);

    impl TryFrom<u32> for Even {
        type Error = Field;

        fn try_from(n: u32) -> Result<Self, Field> {
            (n % 2 == 0).then_some(Self(n)).ok_or("number")
        }
    }

    #[test]
    fn skips_malformed_records() {
        let args = Arguments {
            page: PageNum::new(2).unwrap(),
            limit: Limit::new(4).unwrap(),
        };
        let envelope = PageEnvelope {
            data: vec![1, 2, 3, 4],
            total_pages: Some(5),
        };

        let page = envelope.into_page::<Even>(&args);

        assert_eq!(
            page.items.iter().map(|e| e.0).collect::<Vec<_>>(),
            [2, 4],
        );
        assert_eq!(page.number, args.page);
        assert_eq!(page.total_pages.get(), 5);
    }

    #[test]
    fn missing_total_pages_means_one() {
        let args = Arguments {
            page: PageNum::FIRST,
            limit: Limit::new(4).unwrap(),
        };
        let envelope = PageEnvelope::<u32> {
            data: vec![],
            total_pages: None,
        };

        let page = envelope.into_page::<Even>(&args);

        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, TotalPages::ONE);
    }

    #[test]
    fn names_malformed_field() {
        assert_eq!(parse::<u8>("ratings", " 7 "), Ok(7));
        assert_eq!(parse::<u8>("ratings", "many"), Err("ratings"));
    }
}
