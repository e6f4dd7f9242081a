use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, Utc};
use sea_orm::sea_query::{Expr, Func, LikeExpr, Query};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, TransactionTrait,
};
use uuid::Uuid;

use models::errors::ModelError;
use models::{account, bookmark, consult_detail, counseling_field, counselor, reservation, review, review_tag, review_tag_map};

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

/// Postgres-backed implementation of every repository trait.
pub struct SeaOrmRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn db_err(e: DbErr) -> ServiceError { ModelError::from_db(e).into() }

fn to_account(m: account::Model) -> Account {
    Account { id: m.id, email: m.email, name: m.name, created_at: m.created_at.with_timezone(&Utc) }
}

fn to_counselor(m: counselor::Model) -> Counselor {
    Counselor { id: m.id, name: m.name, introduction: m.introduction, created_at: m.created_at.with_timezone(&Utc) }
}

fn to_reservation(m: reservation::Model) -> Result<Reservation, ServiceError> {
    Ok(Reservation {
        id: m.id,
        account_id: m.account_id,
        counselor_id: m.counselor_id,
        counsel_date: m.counsel_date,
        counsel_time: m.counsel_time,
        location: m.location,
        status: m.status.parse()?,
        created_at: m.created_at.with_timezone(&Utc),
    })
}

/// id -> name for the given counselors.
async fn counselor_names<C: ConnectionTrait>(db: &C, ids: Vec<Uuid>) -> Result<HashMap<Uuid, String>, ServiceError> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = counselor::Entity::find().filter(counselor::Column::Id.is_in(ids)).all(db).await.map_err(db_err)?;
    Ok(rows.into_iter().map(|c| (c.id, c.name)).collect())
}

/// review id -> tag names.
async fn review_tags<C: ConnectionTrait>(db: &C, review_ids: Vec<Uuid>) -> Result<HashMap<Uuid, BTreeSet<String>>, ServiceError> {
    let mut out: HashMap<Uuid, BTreeSet<String>> = HashMap::new();
    if review_ids.is_empty() {
        return Ok(out);
    }
    let rows = review_tag_map::Entity::find()
        .find_also_related(review_tag::Entity)
        .filter(review_tag_map::Column::ReviewId.is_in(review_ids))
        .all(db)
        .await
        .map_err(db_err)?;
    for (link, tag) in rows {
        if let Some(tag) = tag {
            out.entry(link.review_id).or_default().insert(tag.name);
        }
    }
    Ok(out)
}

/// `%keyword%` with LIKE metacharacters in the keyword matched literally.
fn contains_pattern(keyword: &str) -> String {
    let escaped = keyword.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_");
    format!("%{escaped}%")
}

fn review_view(r: review::Model, author_name: String, tags: BTreeSet<String>) -> ReviewView {
    ReviewView {
        review_id: r.id,
        counselor_id: r.counselor_id,
        author_name,
        title: r.title,
        content: r.content,
        rating: r.rating,
        recommendation_count: r.recommendation_count,
        created_at: r.created_at.with_timezone(&Utc),
        tags,
    }
}

#[async_trait]
impl AccountRepository for SeaOrmRepository {
    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, ServiceError> {
        Ok(account::find_by_email(&self.db, email).await?.map(to_account))
    }

    async fn create_account(&self, email: &str, name: &str, password_hash: &str) -> Result<Account, ServiceError> {
        match account::create(&self.db, email, name, password_hash).await {
            Ok(m) => Ok(to_account(m)),
            Err(ModelError::Duplicate(_)) => Err(ServiceError::Conflict("account already exists".into())),
            Err(e) => Err(e.into()),
        }
    }

    async fn get_credentials(&self, account_id: Uuid) -> Result<Option<Credentials>, ServiceError> {
        let found = account::Entity::find_by_id(account_id).one(&self.db).await.map_err(db_err)?;
        Ok(found.map(|a| Credentials { account_id: a.id, password_hash: a.password_hash }))
    }
}

#[async_trait]
impl CounselorRepository for SeaOrmRepository {
    async fn find_counselor(&self, id: Uuid) -> Result<Option<Counselor>, ServiceError> {
        let found = counselor::Entity::find_by_id(id).one(&self.db).await.map_err(db_err)?;
        Ok(found.map(to_counselor))
    }

    async fn counseling_fields(&self, counselor_id: Uuid) -> Result<Vec<String>, ServiceError> {
        Ok(counseling_field::labels_for(&self.db, counselor_id).await?)
    }

    async fn create_counselor(&self, input: &NewCounselor) -> Result<Counselor, ServiceError> {
        let txn = self.db.begin().await.map_err(db_err)?;
        let created = counselor::create(&txn, &input.name, input.introduction.as_deref()).await?;
        for field in &input.counseling_fields {
            counseling_field::create(&txn, created.id, field).await?;
        }
        txn.commit().await.map_err(db_err)?;
        Ok(to_counselor(created))
    }

    async fn list_counselors(&self, filter: &CounselorFilter) -> Result<Vec<Counselor>, ServiceError> {
        let mut q = counselor::Entity::find();
        if let Some(keyword) = &filter.keyword {
            let pattern = LikeExpr::new(contains_pattern(&keyword.to_lowercase())).escape('\\');
            q = q.filter(Expr::expr(Func::lower(Expr::col(counselor::Column::Name))).like(pattern));
        }
        if let Some(field) = &filter.field {
            q = q.filter(
                counselor::Column::Id.in_subquery(
                    Query::select()
                        .column(counseling_field::Column::CounselorId)
                        .from(counseling_field::Entity)
                        .and_where(counseling_field::Column::Field.eq(field.as_str()))
                        .to_owned(),
                ),
            );
        }
        let rows = q.order_by_asc(counselor::Column::Name).all(&self.db).await.map_err(db_err)?;
        Ok(rows.into_iter().map(to_counselor).collect())
    }
}

#[async_trait]
impl BookmarkRepository for SeaOrmRepository {
    async fn bookmark_exists(&self, account_id: Uuid, counselor_id: Uuid) -> Result<bool, ServiceError> {
        Ok(bookmark::find_pair(&self.db, account_id, counselor_id).await?.is_some())
    }

    async fn insert_bookmark(&self, account_id: Uuid, counselor_id: Uuid) -> Result<Option<Bookmark>, ServiceError> {
        let created = bookmark::create_if_absent(&self.db, account_id, counselor_id).await?;
        Ok(created.map(|b| Bookmark {
            id: b.id,
            account_id: b.account_id,
            counselor_id: b.counselor_id,
            created_at: b.created_at.with_timezone(&Utc),
        }))
    }

    async fn delete_bookmarks(&self, account_id: Uuid, counselor_id: Uuid) -> Result<u64, ServiceError> {
        Ok(bookmark::delete_pair(&self.db, account_id, counselor_id).await?)
    }

    async fn list_bookmarks(&self, account_id: Uuid) -> Result<Vec<Bookmark>, ServiceError> {
        let rows = bookmark::Entity::find()
            .filter(bookmark::Column::AccountId.eq(account_id))
            .order_by_desc(bookmark::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(rows
            .into_iter()
            .map(|b| Bookmark { id: b.id, account_id: b.account_id, counselor_id: b.counselor_id, created_at: b.created_at.with_timezone(&Utc) })
            .collect())
    }
}

#[async_trait]
impl ReservationRepository for SeaOrmRepository {
    async fn slot_taken(&self, counselor_id: Uuid, date: NaiveDate, time: NaiveTime) -> Result<bool, ServiceError> {
        Ok(reservation::slot_taken(&self.db, counselor_id, date, time).await?)
    }

    async fn insert_reservation(&self, account_id: Uuid, input: &CreateReservationInput) -> Result<Reservation, ServiceError> {
        let created = reservation::create(
            &self.db,
            account_id,
            input.counselor_id,
            input.counsel_date,
            input.counsel_time,
            input.location.as_deref(),
        )
        .await?;
        to_reservation(created)
    }

    async fn list_reservations(&self, account_id: Uuid) -> Result<Vec<ReservationView>, ServiceError> {
        let rows = reservation::Entity::find()
            .find_also_related(counselor::Entity)
            .filter(reservation::Column::AccountId.eq(account_id))
            .order_by_asc(reservation::Column::CounselDate)
            .order_by_asc(reservation::Column::CounselTime)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        rows.into_iter()
            .map(|(r, c)| -> Result<ReservationView, ServiceError> {
                let status: ReservationStatus = r.status.parse()?;
                Ok(ReservationView {
                    reservation_id: r.id,
                    counselor_id: r.counselor_id,
                    counselor_name: c.map(|c| c.name).unwrap_or_default(),
                    counsel_date: r.counsel_date,
                    counsel_time: r.counsel_time,
                    location: r.location,
                    status,
                })
            })
            .collect()
    }
}

impl SeaOrmRepository {
    fn consult_query(account_id: Uuid) -> sea_orm::SelectTwo<consult_detail::Entity, reservation::Entity> {
        consult_detail::Entity::find()
            .find_also_related(reservation::Entity)
            .filter(consult_detail::Column::AccountId.eq(account_id))
            .order_by_desc(reservation::Column::CounselDate)
            .order_by_desc(reservation::Column::CounselTime)
            .order_by_desc(consult_detail::Column::Id)
    }

    async fn consult_views(
        &self,
        rows: Vec<(consult_detail::Model, Option<reservation::Model>)>,
    ) -> Result<Vec<ConsultDetailView>, ServiceError> {
        let ids = rows.iter().filter_map(|(_, r)| r.as_ref().map(|r| r.counselor_id)).collect();
        let names = counselor_names(&self.db, ids).await?;
        Ok(rows
            .into_iter()
            .filter_map(|(cd, r)| {
                let r = r?;
                Some(ConsultDetailView {
                    consult_detail_id: cd.id,
                    reservation_id: r.id,
                    counselor_id: r.counselor_id,
                    counselor_name: names.get(&r.counselor_id).cloned().unwrap_or_default(),
                    counsel_date: r.counsel_date,
                    counsel_time: r.counsel_time,
                    content: cd.content,
                    created_at: cd.created_at.with_timezone(&Utc),
                })
            })
            .collect())
    }
}

#[async_trait]
impl ConsultDetailRepository for SeaOrmRepository {
    async fn latest_consult_details(&self, account_id: Uuid, limit: u64) -> Result<Vec<ConsultDetailView>, ServiceError> {
        let rows = Self::consult_query(account_id).limit(limit).all(&self.db).await.map_err(db_err)?;
        self.consult_views(rows).await
    }

    async fn consult_detail_page(&self, account_id: Uuid, opts: Pagination) -> Result<Page<ConsultDetailView>, ServiceError> {
        let (idx, per_page) = opts.normalize();
        let paginator = Self::consult_query(account_id).paginate(&self.db, per_page);
        let total = paginator.num_items().await.map_err(db_err)?;
        let rows = paginator.fetch_page(idx).await.map_err(db_err)?;
        Ok(Page::new(self.consult_views(rows).await?, opts, total))
    }
}

#[async_trait]
impl ReviewRepository for SeaOrmRepository {
    async fn insert_review(&self, account_id: Uuid, counselor_id: Uuid, input: &NewReview) -> Result<ReviewView, ServiceError> {
        let txn = self.db.begin().await.map_err(db_err)?;
        let created = review::create(&txn, account_id, counselor_id, &input.title, &input.content, input.rating).await?;
        let mut tags = BTreeSet::new();
        for name in &input.tags {
            let tag = review_tag::find_or_create(&txn, name).await?;
            review_tag_map::link(&txn, created.id, tag.id).await?;
            tags.insert(tag.name);
        }
        let author = account::Entity::find_by_id(account_id).one(&txn).await.map_err(db_err)?;
        txn.commit().await.map_err(db_err)?;
        Ok(review_view(created, author.map(|a| a.name).unwrap_or_default(), tags))
    }

    async fn list_reviews(&self, counselor_id: Uuid) -> Result<Vec<ReviewView>, ServiceError> {
        let rows = review::Entity::find()
            .find_also_related(account::Entity)
            .filter(review::Column::CounselorId.eq(counselor_id))
            .order_by_desc(review::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        let mut tags = review_tags(&self.db, rows.iter().map(|(r, _)| r.id).collect()).await?;
        Ok(rows
            .into_iter()
            .map(|(r, author)| {
                let t = tags.remove(&r.id).unwrap_or_default();
                review_view(r, author.map(|a| a.name).unwrap_or_default(), t)
            })
            .collect())
    }

    async fn increment_recommendation(&self, review_id: Uuid) -> Result<Option<i32>, ServiceError> {
        Ok(review::increment_recommendation(&self.db, review_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Duration;

    use super::*;
    use crate::bookmark::BookmarkService;
    use crate::consult_detail::ConsultDetailService;
    use crate::reservation::ReservationService;
    use crate::test_support::get_db;
    use crate::token::Principal;

    async fn seed(db: &DatabaseConnection) -> anyhow::Result<(account::Model, counselor::Model)> {
        let email = format!("repo_{}@example.com", Uuid::new_v4());
        let a = account::create(db, &email, "Repo Tester", "hash").await?;
        let c = counselor::create(db, "Dr. Repo", None).await?;
        counseling_field::create(db, c.id, "sleep").await?;
        Ok((a, c))
    }

    async fn cleanup(db: &DatabaseConnection, a: Uuid, c: Uuid) -> anyhow::Result<()> {
        counselor::Entity::delete_by_id(c).exec(db).await?;
        account::Entity::delete_by_id(a).exec(db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn bookmark_flow_against_postgres() -> anyhow::Result<()> {
        let Some(db) = get_db().await else { return Ok(()) };
        let (a, c) = seed(&db).await?;
        let repo = Arc::new(SeaOrmRepository::new(db.clone()));
        let svc = BookmarkService::new(repo.clone());
        let me = Principal::new(&a.email);

        svc.add_bookmark(&me, c.id).await?;
        assert!(matches!(svc.add_bookmark(&me, c.id).await, Err(ServiceError::Conflict(_))));
        // unique index stops a racing second insert
        assert!(repo.insert_bookmark(a.id, c.id).await?.is_none());

        let list = svc.list_bookmarks(&me).await?;
        assert_eq!(list.len(), 1);
        assert!(list[0].counselor.counseling_fields.contains("sleep"));

        svc.remove_bookmark(&me, c.id).await?;
        assert!(matches!(svc.remove_bookmark(&me, c.id).await, Err(ServiceError::NotFound(_))));

        cleanup(&db, a.id, c.id).await
    }

    #[tokio::test]
    async fn consult_details_ordered_by_reservation_date() -> anyhow::Result<()> {
        let Some(db) = get_db().await else { return Ok(()) };
        let (a, c) = seed(&db).await?;
        let base = Utc::now().date_naive();
        let at = NaiveTime::from_hms_opt(10, 0, 0).unwrap_or_default();
        for offset in [5, 1, 9, 3] {
            let r = reservation::create(&db, a.id, c.id, base + Duration::days(offset), at, None).await?;
            consult_detail::create(&db, a.id, r.id, Some("memo")).await?;
        }
        let svc = ConsultDetailService::new(Arc::new(SeaOrmRepository::new(db.clone())));
        let me = Principal::new(&a.email);

        let latest = svc.find_latest(&me, Some(2)).await?;
        let dates: Vec<NaiveDate> = latest.iter().map(|v| v.counsel_date).collect();
        assert_eq!(dates, vec![base + Duration::days(9), base + Duration::days(5)]);
        assert_eq!(latest[0].counselor_name, "Dr. Repo");

        let page = svc.find_all(&me, Pagination { page: 2, per_page: 3 }).await?;
        assert_eq!(page.total_items, 4);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].counsel_date, base + Duration::days(1));

        cleanup(&db, a.id, c.id).await
    }

    #[test]
    fn keyword_metacharacters_are_escaped() {
        assert_eq!(contains_pattern("kim"), "%kim%");
        assert_eq!(contains_pattern(r"100%_a\b"), r"%100\%\_a\\b%");
    }

    #[tokio::test]
    async fn keyword_wildcards_match_literally() -> anyhow::Result<()> {
        let Some(db) = get_db().await else { return Ok(()) };
        let tag = Uuid::new_v4().simple().to_string();
        let plain = counselor::create(&db, &format!("Dr. Plain {tag}"), None).await?;
        let odd = counselor::create(&db, &format!("Dr. 100%_{tag}"), None).await?;
        let repo = SeaOrmRepository::new(db.clone());
        let by_keyword = |k: &str| CounselorFilter { field: None, keyword: Some(k.to_string()) };

        for k in ["%", "_"] {
            let found = repo.list_counselors(&by_keyword(k)).await?;
            assert!(found.iter().all(|c| c.name.contains(k)), "keyword {k:?} matched names without it");
            assert!(found.iter().any(|c| c.id == odd.id));
            assert!(!found.iter().any(|c| c.id == plain.id));
        }
        let exact: Vec<Uuid> = repo.list_counselors(&by_keyword(&format!("100%_{tag}"))).await?.iter().map(|c| c.id).collect();
        assert_eq!(exact, vec![odd.id]);

        counselor::Entity::delete_by_id(plain.id).exec(&db).await?;
        counselor::Entity::delete_by_id(odd.id).exec(&db).await?;
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn reservation_slot_held_once_against_postgres() -> anyhow::Result<()> {
        let Some(db) = get_db().await else { return Ok(()) };
        let (a, c) = seed(&db).await?;
        let repo = Arc::new(SeaOrmRepository::new(db.clone()));
        let date = Utc::now().date_naive() + Duration::days(30);
        let slot = |hour: u32| CreateReservationInput {
            counselor_id: c.id,
            counsel_date: date,
            counsel_time: NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or_default(),
            location: None,
        };

        // unique index rejects a second insert without the slot_taken pre-check
        let first = repo.insert_reservation(a.id, &slot(9)).await?;
        assert!(matches!(repo.insert_reservation(a.id, &slot(9)).await, Err(ServiceError::Conflict(_))));
        reservation::Entity::update_many()
            .col_expr(reservation::Column::Status, Expr::value(reservation::STATUS_CANCELLED))
            .filter(reservation::Column::Id.eq(first.id))
            .exec(&db)
            .await?;
        repo.insert_reservation(a.id, &slot(9)).await?;

        // concurrent bookings of one slot from different accounts
        let mut racers = Vec::new();
        for i in 0..8 {
            racers.push(account::create(&db, &format!("race{i}_{}@example.com", Uuid::new_v4()), "Racer", "hash").await?);
        }
        let svc = Arc::new(ReservationService::new(repo.clone()));
        let mut handles = Vec::new();
        for racer in &racers {
            let svc = svc.clone();
            let me = Principal::new(&racer.email);
            let input = slot(15);
            handles.push(tokio::spawn(async move { svc.create_reservation(&me, input).await }));
        }
        let mut created = 0;
        for h in handles {
            match h.await? {
                Ok(_) => created += 1,
                Err(e) => assert!(matches!(e, ServiceError::Conflict(_)), "got {e:?}"),
            }
        }
        assert_eq!(created, 1);
        let holders = reservation::Entity::find()
            .filter(reservation::Column::CounselorId.eq(c.id))
            .filter(reservation::Column::CounselDate.eq(date))
            .filter(reservation::Column::CounselTime.eq(slot(15).counsel_time))
            .filter(reservation::Column::Status.ne(reservation::STATUS_CANCELLED))
            .count(&db)
            .await?;
        assert_eq!(holders, 1);

        cleanup(&db, a.id, c.id).await?;
        for racer in racers {
            account::Entity::delete_by_id(racer.id).exec(&db).await?;
        }
        Ok(())
    }

    #[tokio::test]
    async fn consult_detail_pages_break_slot_ties() -> anyhow::Result<()> {
        let Some(db) = get_db().await else { return Ok(()) };
        let (a, c) = seed(&db).await?;
        let mut counselors = vec![c.id];
        for name in ["Dr. Tie A", "Dr. Tie B"] {
            counselors.push(counselor::create(&db, name, None).await?.id);
        }
        let date = Utc::now().date_naive() - Duration::days(2);
        let at = NaiveTime::from_hms_opt(11, 0, 0).unwrap_or_default();
        for counselor_id in &counselors {
            let r = reservation::create(&db, a.id, *counselor_id, date, at, None).await?;
            consult_detail::create(&db, a.id, r.id, None).await?;
        }
        let svc = ConsultDetailService::new(Arc::new(SeaOrmRepository::new(db.clone())));
        let me = Principal::new(&a.email);

        let mut paged = Vec::new();
        for page in 1..=3 {
            let p = svc.find_all(&me, Pagination { page, per_page: 1 }).await?;
            paged.extend(p.items.iter().map(|v| v.consult_detail_id));
        }
        let latest: Vec<Uuid> = svc.find_latest(&me, Some(3)).await?.iter().map(|v| v.consult_detail_id).collect();
        assert_eq!(paged, latest);
        let mut expected = latest.clone();
        expected.sort_by(|x, y| y.cmp(x));
        assert_eq!(latest, expected);

        for id in &counselors[1..] {
            counselor::Entity::delete_by_id(*id).exec(&db).await?;
        }
        cleanup(&db, a.id, c.id).await
    }
}
