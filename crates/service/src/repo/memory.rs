use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use crate::account::domain::{Account, Credentials};
use crate::account::AccountRepository;
use crate::bookmark::{Bookmark, BookmarkRepository};
use crate::consult_detail::{ConsultDetailRepository, ConsultDetailView};
use crate::counselor::domain::{Counselor, CounselorFilter, NewCounselor};
use crate::counselor::CounselorRepository;
use crate::errors::ServiceError;
use crate::pagination::{Page, Pagination};
use crate::reservation::{CreateReservationInput, Reservation, ReservationRepository, ReservationStatus, ReservationView};
use crate::review::{NewReview, ReviewRepository, ReviewView};

struct ConsultRow {
    id: Uuid,
    account_id: Uuid,
    reservation_id: Uuid,
    content: Option<String>,
    created_at: DateTime<Utc>,
}

struct ReviewRow {
    id: Uuid,
    account_id: Uuid,
    counselor_id: Uuid,
    title: String,
    content: String,
    rating: f64,
    recommendation_count: i32,
    created_at: DateTime<Utc>,
    tags: BTreeSet<String>,
}

#[derive(Default)]
struct State {
    accounts: Vec<(Account, String)>,
    counselors: Vec<Counselor>,
    fields: Vec<(Uuid, String)>,
    bookmarks: Vec<Bookmark>,
    reservations: Vec<Reservation>,
    consult_details: Vec<ConsultRow>,
    reviews: Vec<ReviewRow>,
}

impl State {
    fn account_name(&self, id: Uuid) -> String {
        self.accounts.iter().find(|(a, _)| a.id == id).map(|(a, _)| a.name.clone()).unwrap_or_default()
    }

    fn counselor_name(&self, id: Uuid) -> String {
        self.counselors.iter().find(|c| c.id == id).map(|c| c.name.clone()).unwrap_or_default()
    }

    fn review_view(&self, r: &ReviewRow) -> ReviewView {
        ReviewView {
            review_id: r.id,
            counselor_id: r.counselor_id,
            author_name: self.account_name(r.account_id),
            title: r.title.clone(),
            content: r.content.clone(),
            rating: r.rating,
            recommendation_count: r.recommendation_count,
            created_at: r.created_at,
            tags: r.tags.clone(),
        }
    }

    /// Account's consult details, newest reservation slot first.
    fn consult_views(&self, account_id: Uuid) -> Vec<ConsultDetailView> {
        let mut out: Vec<ConsultDetailView> = self
            .consult_details
            .iter()
            .filter(|cd| cd.account_id == account_id)
            .filter_map(|cd| {
                let r = self.reservations.iter().find(|r| r.id == cd.reservation_id)?;
                Some(ConsultDetailView {
                    consult_detail_id: cd.id,
                    reservation_id: r.id,
                    counselor_id: r.counselor_id,
                    counselor_name: self.counselor_name(r.counselor_id),
                    counsel_date: r.counsel_date,
                    counsel_time: r.counsel_time,
                    content: cd.content.clone(),
                    created_at: cd.created_at,
                })
            })
            .collect();
        out.sort_by(|a, b| {
            (b.counsel_date, b.counsel_time, b.consult_detail_id).cmp(&(a.counsel_date, a.counsel_time, a.consult_detail_id))
        });
        out
    }
}

/// Whole data set behind one mutex.
///
/// Implements every repository trait with the same observable semantics as
/// [`SeaOrmRepository`](super::SeaOrmRepository). The `seed_*` helpers insert
/// rows directly, bypassing service validation.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    fn state(&self) -> MutexGuard<'_, State> {
        // a panicking test must not poison the others
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Account without usable credentials; returns its id.
    pub fn seed_account(&self, email: &str, name: &str) -> Uuid {
        let account = Account { id: Uuid::new_v4(), email: email.to_string(), name: name.to_string(), created_at: Utc::now() };
        let id = account.id;
        self.state().accounts.push((account, String::new()));
        id
    }

    /// Counselor with the given field labels stored as-is.
    pub fn seed_counselor(&self, name: &str, fields: &[&str]) -> Uuid {
        let id = Uuid::new_v4();
        let mut st = self.state();
        st.counselors.push(Counselor { id, name: name.to_string(), introduction: None, created_at: Utc::now() });
        st.fields.extend(fields.iter().map(|f| (id, f.to_string())));
        id
    }

    /// Completed reservation plus its consult detail; returns the consult detail id.
    pub fn seed_consult_detail(
        &self,
        account_id: Uuid,
        counselor_id: Uuid,
        date: NaiveDate,
        time: NaiveTime,
        content: Option<&str>,
    ) -> Uuid {
        let now = Utc::now();
        let reservation = Reservation {
            id: Uuid::new_v4(),
            account_id,
            counselor_id,
            counsel_date: date,
            counsel_time: time,
            location: None,
            status: ReservationStatus::Completed,
            created_at: now,
        };
        let row = ConsultRow {
            id: Uuid::new_v4(),
            account_id,
            reservation_id: reservation.id,
            content: content.map(str::to_string),
            created_at: now,
        };
        let id = row.id;
        let mut st = self.state();
        st.reservations.push(reservation);
        st.consult_details.push(row);
        id
    }

    pub fn set_reservation_status(&self, reservation_id: Uuid, status: ReservationStatus) {
        if let Some(r) = self.state().reservations.iter_mut().find(|r| r.id == reservation_id) {
            r.status = status;
        }
    }

    pub fn bookmark_count(&self) -> usize { self.state().bookmarks.len() }
}

#[async_trait]
impl AccountRepository for InMemoryStore {
    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, ServiceError> {
        Ok(self.state().accounts.iter().find(|(a, _)| a.email == email).map(|(a, _)| a.clone()))
    }

    async fn create_account(&self, email: &str, name: &str, password_hash: &str) -> Result<Account, ServiceError> {
        let mut st = self.state();
        if st.accounts.iter().any(|(a, _)| a.email == email) {
            return Err(ServiceError::Conflict("account already exists".into()));
        }
        let account = Account { id: Uuid::new_v4(), email: email.to_string(), name: name.to_string(), created_at: Utc::now() };
        st.accounts.push((account.clone(), password_hash.to_string()));
        Ok(account)
    }

    async fn get_credentials(&self, account_id: Uuid) -> Result<Option<Credentials>, ServiceError> {
        Ok(self
            .state()
            .accounts
            .iter()
            .find(|(a, hash)| a.id == account_id && !hash.is_empty())
            .map(|(a, hash)| Credentials { account_id: a.id, password_hash: hash.clone() }))
    }
}

#[async_trait]
impl CounselorRepository for InMemoryStore {
    async fn find_counselor(&self, id: Uuid) -> Result<Option<Counselor>, ServiceError> {
        Ok(self.state().counselors.iter().find(|c| c.id == id).cloned())
    }

    async fn counseling_fields(&self, counselor_id: Uuid) -> Result<Vec<String>, ServiceError> {
        Ok(self.state().fields.iter().filter(|(id, _)| *id == counselor_id).map(|(_, f)| f.clone()).collect())
    }

    async fn create_counselor(&self, input: &NewCounselor) -> Result<Counselor, ServiceError> {
        let counselor = Counselor {
            id: Uuid::new_v4(),
            name: input.name.clone(),
            introduction: input.introduction.clone(),
            created_at: Utc::now(),
        };
        let mut st = self.state();
        st.counselors.push(counselor.clone());
        st.fields.extend(input.counseling_fields.iter().map(|f| (counselor.id, f.clone())));
        Ok(counselor)
    }

    async fn list_counselors(&self, filter: &CounselorFilter) -> Result<Vec<Counselor>, ServiceError> {
        let st = self.state();
        let keyword = filter.keyword.as_ref().map(|k| k.to_lowercase());
        let mut out: Vec<Counselor> = st
            .counselors
            .iter()
            .filter(|c| keyword.as_ref().map_or(true, |k| c.name.to_lowercase().contains(k.as_str())))
            .filter(|c| {
                filter.field.as_ref().map_or(true, |f| st.fields.iter().any(|(id, label)| *id == c.id && label == f))
            })
            .cloned()
            .collect();
        out.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(out)
    }
}

#[async_trait]
impl BookmarkRepository for InMemoryStore {
    async fn bookmark_exists(&self, account_id: Uuid, counselor_id: Uuid) -> Result<bool, ServiceError> {
        Ok(self.state().bookmarks.iter().any(|b| b.account_id == account_id && b.counselor_id == counselor_id))
    }

    async fn insert_bookmark(&self, account_id: Uuid, counselor_id: Uuid) -> Result<Option<Bookmark>, ServiceError> {
        let mut st = self.state();
        if st.bookmarks.iter().any(|b| b.account_id == account_id && b.counselor_id == counselor_id) {
            return Ok(None);
        }
        let bookmark = Bookmark { id: Uuid::new_v4(), account_id, counselor_id, created_at: Utc::now() };
        st.bookmarks.push(bookmark.clone());
        Ok(Some(bookmark))
    }

    async fn delete_bookmarks(&self, account_id: Uuid, counselor_id: Uuid) -> Result<u64, ServiceError> {
        let mut st = self.state();
        let before = st.bookmarks.len();
        st.bookmarks.retain(|b| !(b.account_id == account_id && b.counselor_id == counselor_id));
        Ok((before - st.bookmarks.len()) as u64)
    }

    async fn list_bookmarks(&self, account_id: Uuid) -> Result<Vec<Bookmark>, ServiceError> {
        // insertion order is creation order
        Ok(self.state().bookmarks.iter().rev().filter(|b| b.account_id == account_id).cloned().collect())
    }
}

#[async_trait]
impl ReservationRepository for InMemoryStore {
    async fn slot_taken(&self, counselor_id: Uuid, date: NaiveDate, time: NaiveTime) -> Result<bool, ServiceError> {
        Ok(self.state().reservations.iter().any(|r| {
            r.counselor_id == counselor_id && r.counsel_date == date && r.counsel_time == time && r.status.holds_slot()
        }))
    }

    async fn insert_reservation(&self, account_id: Uuid, input: &CreateReservationInput) -> Result<Reservation, ServiceError> {
        let mut st = self.state();
        // mirrors the partial unique index on non-cancelled slots
        if st.reservations.iter().any(|r| {
            r.counselor_id == input.counselor_id
                && r.counsel_date == input.counsel_date
                && r.counsel_time == input.counsel_time
                && r.status.holds_slot()
        }) {
            return Err(ServiceError::Conflict("reservation slot already held".into()));
        }
        let reservation = Reservation {
            id: Uuid::new_v4(),
            account_id,
            counselor_id: input.counselor_id,
            counsel_date: input.counsel_date,
            counsel_time: input.counsel_time,
            location: input.location.clone(),
            status: ReservationStatus::Pending,
            created_at: Utc::now(),
        };
        st.reservations.push(reservation.clone());
        Ok(reservation)
    }

    async fn list_reservations(&self, account_id: Uuid) -> Result<Vec<ReservationView>, ServiceError> {
        let st = self.state();
        let mut out: Vec<ReservationView> = st
            .reservations
            .iter()
            .filter(|r| r.account_id == account_id)
            .map(|r| ReservationView {
                reservation_id: r.id,
                counselor_id: r.counselor_id,
                counselor_name: st.counselor_name(r.counselor_id),
                counsel_date: r.counsel_date,
                counsel_time: r.counsel_time,
                location: r.location.clone(),
                status: r.status,
            })
            .collect();
        out.sort_by_key(|r| (r.counsel_date, r.counsel_time));
        Ok(out)
    }
}

#[async_trait]
impl ConsultDetailRepository for InMemoryStore {
    async fn latest_consult_details(&self, account_id: Uuid, limit: u64) -> Result<Vec<ConsultDetailView>, ServiceError> {
        let mut views = self.state().consult_views(account_id);
        views.truncate(limit as usize);
        Ok(views)
    }

    async fn consult_detail_page(&self, account_id: Uuid, opts: Pagination) -> Result<Page<ConsultDetailView>, ServiceError> {
        Ok(Page::from_slice(&self.state().consult_views(account_id), opts))
    }
}

#[async_trait]
impl ReviewRepository for InMemoryStore {
    async fn insert_review(&self, account_id: Uuid, counselor_id: Uuid, input: &NewReview) -> Result<ReviewView, ServiceError> {
        let row = ReviewRow {
            id: Uuid::new_v4(),
            account_id,
            counselor_id,
            title: input.title.clone(),
            content: input.content.clone(),
            rating: input.rating,
            recommendation_count: 0,
            created_at: Utc::now(),
            tags: input.tags.iter().cloned().collect(),
        };
        let mut st = self.state();
        let view = st.review_view(&row);
        st.reviews.push(row);
        Ok(view)
    }

    async fn list_reviews(&self, counselor_id: Uuid) -> Result<Vec<ReviewView>, ServiceError> {
        let st = self.state();
        let mut out: Vec<ReviewView> =
            st.reviews.iter().filter(|r| r.counselor_id == counselor_id).map(|r| st.review_view(r)).collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(out)
    }

    async fn increment_recommendation(&self, review_id: Uuid) -> Result<Option<i32>, ServiceError> {
        let mut st = self.state();
        Ok(st.reviews.iter_mut().find(|r| r.id == review_id).map(|r| {
            r.recommendation_count += 1;
            r.recommendation_count
        }))
    }
}
