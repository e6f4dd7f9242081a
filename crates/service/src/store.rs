//! One handle over every repository, and the services built on it.

use std::sync::Arc;

use crate::account::{AccountRepository, AccountService};
use crate::bookmark::{BookmarkRepository, BookmarkService};
use crate::consult_detail::{ConsultDetailRepository, ConsultDetailService};
use crate::counselor::{CounselorRepository, CounselorService};
use crate::reservation::{ReservationRepository, ReservationService};
use crate::review::{ReviewRepository, ReviewService};
use crate::token::TokenCodec;

/// Anything implementing all repository traits.
pub trait Store:
    AccountRepository
    + CounselorRepository
    + BookmarkRepository
    + ReservationRepository
    + ConsultDetailRepository
    + ReviewRepository
{
}

impl<T> Store for T where
    T: AccountRepository
        + CounselorRepository
        + BookmarkRepository
        + ReservationRepository
        + ConsultDetailRepository
        + ReviewRepository
{
}

/// All services sharing one store; cheap to clone into handler state.
#[derive(Clone)]
pub struct Services {
    pub accounts: Arc<AccountService<dyn Store>>,
    pub counselors: Arc<CounselorService<dyn Store>>,
    pub bookmarks: Arc<BookmarkService<dyn Store>>,
    pub reservations: Arc<ReservationService<dyn Store>>,
    pub consult_details: Arc<ConsultDetailService<dyn Store>>,
    pub reviews: Arc<ReviewService<dyn Store>>,
}

impl Services {
    pub fn new(store: Arc<dyn Store>, tokens: TokenCodec) -> Self {
        Self {
            accounts: Arc::new(AccountService::new(store.clone(), tokens)),
            counselors: Arc::new(CounselorService::new(store.clone())),
            bookmarks: Arc::new(BookmarkService::new(store.clone())),
            reservations: Arc::new(ReservationService::new(store.clone())),
            consult_details: Arc::new(ConsultDetailService::new(store.clone())),
            reviews: Arc::new(ReviewService::new(store)),
        }
    }
}
