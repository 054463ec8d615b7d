//! Paginated view of a remote collection.

use common::{
    operations::By,
    pagination::{
        Arguments, Limit, Page, PageInfo, PageNum, Selector, TotalPages,
    },
};
use derive_more::{Display, Error};
use tracerr::Traced;
use tracing as log;

use crate::{
    infra::backend,
    query::{BackendQuery, Query},
    Service,
};

/// Sequence number of a [`Request`] issued by a [`List`].
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Ticket(u64);

/// Request for a [`Page`] issued by a [`List`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Request<F> {
    /// [`Ticket`] the response must be applied with.
    pub ticket: Ticket,

    /// [`Selector`] of the requested [`Page`].
    pub selector: Selector<F>,
}

/// Result of applying a response to a [`List`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Applied<F> {
    /// Response has been committed to the [`List`].
    Loaded,

    /// Response belongs to a superseded [`Request`] and has been discarded.
    Stale,

    /// Collection has shrunk below the requested [`Page`], so the response
    /// has been discarded and its new last [`Page`] is requested instead.
    Shrunk(Request<F>),
}

/// Error of requesting a page which doesn't exist.
#[derive(Clone, Copy, Debug, Display, Error, Eq, PartialEq)]
#[display("Page {requested} is out of range 1..={total_pages}")]
pub struct OutOfRange {
    /// Requested page number.
    pub requested: u32,

    /// [`TotalPages`] known at the moment of the request.
    pub total_pages: TotalPages,
}

/// Currently displayed [`Page`] of `N`odes narrowed by an `F`ilter.
///
/// Changes of the page or the filter don't touch the displayed state: they
/// issue a [`Request`] instead, whose response is committed via
/// [`List::apply()`] only if no newer [`Request`] has been issued since.
#[derive(Clone, Debug)]
pub struct List<N, F> {
    /// Number of `N`odes per [`Page`].
    limit: Limit,

    /// Filter the displayed `N`odes are narrowed by.
    filter: F,

    /// Number of the displayed [`Page`].
    page: PageNum,

    /// [`TotalPages`] of the displayed collection.
    total_pages: TotalPages,

    /// Displayed `N`odes.
    items: Vec<N>,

    /// Number of [`Ticket`]s issued so far.
    issued: u64,

    /// Latest issued [`Request`] not applied yet.
    pending: Option<Request<F>>,
}

impl<N, F: Clone + PartialEq> List<N, F> {
    /// Creates a new empty [`List`] with the given page `limit` and `filter`.
    #[must_use]
    pub const fn new(limit: Limit, filter: F) -> Self {
        Self {
            limit,
            filter,
            page: PageNum::FIRST,
            total_pages: TotalPages::ONE,
            items: Vec::new(),
            issued: 0,
            pending: None,
        }
    }

    /// Returns the displayed `N`odes.
    #[must_use]
    pub fn items(&self) -> &[N] {
        &self.items
    }

    /// Returns the number of the displayed [`Page`].
    #[must_use]
    pub const fn page(&self) -> PageNum {
        self.page
    }

    /// Returns [`TotalPages`] of the displayed collection.
    #[must_use]
    pub const fn total_pages(&self) -> TotalPages {
        self.total_pages
    }

    /// Returns the filter the displayed `N`odes are narrowed by.
    #[must_use]
    pub const fn filter(&self) -> &F {
        &self.filter
    }

    /// Returns the page [`Limit`] of this [`List`].
    #[must_use]
    pub const fn limit(&self) -> Limit {
        self.limit
    }

    /// Returns [`PageInfo`] of the displayed [`Page`].
    #[must_use]
    pub fn page_info(&self) -> PageInfo {
        PageInfo {
            has_next_page: self.page < self.total_pages.last(),
            has_previous_page: self.page > PageNum::FIRST,
        }
    }

    /// Indicates whether a [`Request`] is awaiting its response.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Requests the targeted [`Page`] again.
    ///
    /// The target is the one of the pending [`Request`], if any, or the
    /// displayed one otherwise.
    pub fn reload(&mut self) -> Request<F> {
        let selector = self.target();
        self.issue(selector)
    }

    /// Requests the [`Page`] with the given number under the targeted
    /// filter.
    ///
    /// # Errors
    ///
    /// With [`OutOfRange`] if the [`Page`] doesn't exist. Under a filter not
    /// loaded yet only the first [`Page`] is known to exist.
    pub fn set_page(&mut self, page: u32) -> Result<Request<F>, OutOfRange> {
        let Selector { filter, .. } = self.target();
        let total_pages = if filter == self.filter {
            self.total_pages
        } else {
            TotalPages::ONE
        };
        let page = PageNum::new(page)
            .filter(|p| total_pages.contains(*p))
            .ok_or(OutOfRange {
                requested: page,
                total_pages,
            })?;
        Ok(self.issue(Selector {
            arguments: Arguments {
                page,
                limit: self.limit,
            },
            filter,
        }))
    }

    /// Requests the [`Page`] following the targeted one.
    ///
    /// # Errors
    ///
    /// With [`OutOfRange`] if the targeted [`Page`] is the last one.
    pub fn next_page(&mut self) -> Result<Request<F>, OutOfRange> {
        let page = self.target().arguments.page;
        self.set_page(page.get().saturating_add(1))
    }

    /// Requests the [`Page`] preceding the targeted one.
    ///
    /// # Errors
    ///
    /// With [`OutOfRange`] if the targeted [`Page`] is the first one.
    pub fn previous_page(&mut self) -> Result<Request<F>, OutOfRange> {
        let page = self.target().arguments.page;
        self.set_page(page.get() - 1)
    }

    /// Requests the first [`Page`] under the given `filter`.
    pub fn set_filter(&mut self, filter: F) -> Request<F> {
        self.issue(Selector {
            arguments: Arguments {
                page: PageNum::FIRST,
                limit: self.limit,
            },
            filter,
        })
    }

    /// Applies the `result` of the [`Request`] with the given [`Ticket`].
    ///
    /// On success the items, page number, filter and total pages are
    /// replaced together. A [`Page`] lying beyond the reported
    /// [`TotalPages`] isn't committed, the last existing one is requested
    /// instead.
    ///
    /// # Errors
    ///
    /// With the `result` error, leaving the displayed state untouched.
    /// Errors of superseded [`Request`]s are discarded.
    pub fn apply<E>(
        &mut self,
        ticket: Ticket,
        result: Result<Page<N>, E>,
    ) -> Result<Applied<F>, E> {
        let Some(request) = self.pending.take_if(|r| r.ticket == ticket) else {
            log::debug!("discarding response of superseded request {ticket}");
            return Ok(Applied::Stale);
        };
        let page = result?;

        let Selector { arguments, filter } = request.selector;
        if !page.total_pages.contains(arguments.page) {
            let last = page.total_pages.last();
            log::debug!(
                "page {} is gone, requesting page {last} instead",
                arguments.page.get(),
            );
            return Ok(Applied::Shrunk(self.issue(Selector {
                arguments: Arguments {
                    page: last,
                    limit: arguments.limit,
                },
                filter,
            })));
        }
        self.total_pages = page.total_pages;
        self.page = arguments.page;
        self.filter = filter;
        self.items = page.items;
        Ok(Applied::Loaded)
    }

    /// Returns the [`Selector`] of the pending [`Request`], if any, or of the
    /// displayed [`Page`] otherwise.
    fn target(&self) -> Selector<F> {
        self.pending.as_ref().map_or_else(
            || Selector {
                arguments: Arguments {
                    page: self.page,
                    limit: self.limit,
                },
                filter: self.filter.clone(),
            },
            |r| r.selector.clone(),
        )
    }

    /// Issues a new [`Request`] superseding the pending one.
    fn issue(&mut self, selector: Selector<F>) -> Request<F> {
        self.issued += 1;
        let request = Request {
            ticket: Ticket(self.issued),
            selector,
        };
        self.pending = Some(request.clone());
        request
    }
}

impl<Api> Service<Api> {
    /// Executes the [`Request`] against the [`Backend`] and applies its
    /// response to the [`List`].
    ///
    /// [`Applied::Shrunk`] responses are followed up, so the result is
    /// either [`Applied::Loaded`] or [`Applied::Stale`].
    ///
    /// # Errors
    ///
    /// If the [`Backend`] fails to provide the requested [`Page`].
    ///
    /// [`Backend`]: crate::infra::Backend
    pub async fn load_list<N, F>(
        &self,
        list: &mut List<N, F>,
        mut request: Request<F>,
    ) -> Result<Applied<F>, Traced<backend::Error>>
    where
        F: Clone + PartialEq,
        Self: Query<
            BackendQuery<By<Page<N>, Selector<F>>>,
            Ok = Page<N>,
            Err = Traced<backend::Error>,
        >,
    {
        // Each follow-up targets a lower page, so the loop ends.
        loop {
            let Request { ticket, selector } = request;
            let result = self
                .execute(BackendQuery::<By<Page<N>, _>>::by(selector))
                .await;
            match list.apply(ticket, result).map_err(tracerr::wrap!())? {
                Applied::Shrunk(next) => request = next,
                applied @ (Applied::Loaded | Applied::Stale) => {
                    return Ok(applied);
                }
            }
        }
    }
}

#[cfg(test)]
mod spec {
    use common::pagination::{Limit, Page, PageNum, TotalPages};

    use super::{Applied, List, OutOfRange, Request};

    /// Serves pages of `1..=len` split by the [`List`] limit, filtered by
    /// divisibility.
    fn serve(request: &Request<Option<u32>>, len: u32) -> Page<u32> {
        let all = (1..=len)
            .filter(|n| request.selector.filter.map_or(true, |d| n % d == 0))
            .collect::<Vec<_>>();
        Page::from_slice(&all, &request.selector.arguments)
    }

    fn loaded(len: u32) -> List<u32, Option<u32>> {
        let mut list = List::new(Limit::new(4).unwrap(), None);
        let req = list.reload();
        let page = serve(&req, len);
        assert_eq!(list.apply::<()>(req.ticket, Ok(page)), Ok(Applied::Loaded));
        list
    }

    #[test]
    fn paginates() {
        let mut list = loaded(9);
        assert_eq!(list.items(), [1, 2, 3, 4]);
        assert_eq!(list.total_pages().get(), 3);
        assert!(!list.page_info().has_previous_page);

        let req = list.set_page(2).unwrap();
        let page = serve(&req, 9);
        assert_eq!(list.apply::<()>(req.ticket, Ok(page)), Ok(Applied::Loaded));
        assert_eq!(list.items(), [5, 6, 7, 8]);
        assert_eq!(list.page().get(), 2);
        assert!(list.page_info().has_next_page);

        assert_eq!(
            list.set_page(4),
            Err(OutOfRange {
                requested: 4,
                total_pages: TotalPages::new(3),
            }),
        );
        assert!(list.set_page(0).is_err());
        assert!(!list.is_loading());
    }

    #[test]
    fn navigates_from_target() {
        let mut list = loaded(9);

        let first = list.next_page().unwrap();
        let second = list.next_page().unwrap();
        assert_eq!(first.selector.arguments.page.get(), 2);
        assert_eq!(second.selector.arguments.page.get(), 3);
        assert!(list.next_page().is_err());

        let back = list.previous_page().unwrap();
        assert_eq!(back.selector.arguments.page.get(), 2);
    }

    #[test]
    fn filter_resets_page() {
        let mut list = loaded(9);
        let req = list.set_page(3).unwrap();
        let page = serve(&req, 9);
        _ = list.apply::<()>(req.ticket, Ok(page));

        let req = list.set_filter(Some(2));
        assert_eq!(req.selector.arguments.page, PageNum::FIRST);
        assert!(list.set_page(2).is_err());

        let req = list.reload();
        let page = serve(&req, 9);
        _ = list.apply::<()>(req.ticket, Ok(page));
        assert_eq!(list.items(), [2, 4, 6, 8]);
        assert_eq!(list.filter(), &Some(2));
        assert_eq!(list.page(), PageNum::FIRST);
    }

    #[test]
    fn discards_stale_responses() {
        let mut list = loaded(9);

        let slow = list.set_page(2).unwrap();
        let fast = list.set_page(3).unwrap();

        let page = serve(&fast, 9);
        let applied = list.apply::<()>(fast.ticket, Ok(page));
        assert_eq!(applied, Ok(Applied::Loaded));
        let page = serve(&slow, 9);
        let applied = list.apply::<()>(slow.ticket, Ok(page));
        assert_eq!(applied, Ok(Applied::Stale));

        assert_eq!(list.items(), [9]);
        assert_eq!(list.page().get(), 3);
        assert_eq!(list.apply(slow.ticket, Err("late")), Ok(Applied::Stale));
    }

    #[test]
    fn failure_keeps_state() {
        let mut list = loaded(9);

        let req = list.set_filter(Some(3));
        assert_eq!(list.apply(req.ticket, Err("offline")), Err("offline"));

        assert_eq!(list.items(), [1, 2, 3, 4]);
        assert_eq!(list.total_pages().get(), 3);
        assert_eq!(list.filter(), &None);
        assert!(!list.is_loading());
    }

    #[test]
    fn empty_collection_has_one_page() {
        let list = loaded(0);

        assert!(list.items().is_empty());
        assert_eq!(list.total_pages(), TotalPages::ONE);
        assert_eq!(list.page(), PageNum::FIRST);
    }

    #[test]
    fn requests_last_page_of_shrunk_collection() {
        let mut list = loaded(9);
        let req = list.set_page(3).unwrap();

        let page = serve(&req, 5);
        let Ok(Applied::Shrunk(next)) = list.apply::<()>(req.ticket, Ok(page))
        else {
            panic!("shrinking is not detected");
        };
        assert_eq!(next.selector.arguments.page.get(), 2);
        assert_eq!(list.items(), [1, 2, 3, 4]);
        assert_eq!(list.total_pages().get(), 3);
        assert!(list.is_loading());

        let page = serve(&next, 5);
        let applied = list.apply::<()>(next.ticket, Ok(page));
        assert_eq!(applied, Ok(Applied::Loaded));
        assert_eq!(list.items(), [5]);
        assert_eq!(list.page().get(), 2);
        assert_eq!(list.total_pages().get(), 2);
    }
}
