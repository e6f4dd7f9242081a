use anyhow::Result;
use chrono::{Duration, NaiveTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::{account, bookmark, consult_detail, counseling_field, counselor, reservation, review, review_tag, review_tag_map};

use super::test_db;

fn unique_email(prefix: &str) -> String {
    format!("{}_{}@example.com", prefix, Uuid::new_v4())
}

#[tokio::test]
async fn test_account_email_is_unique() -> Result<()> {
    let Some(db) = test_db().await else { return Ok(()) };
    let email = unique_email("dup");
    let a = account::create(&db, &email, "First", "hash").await?;
    let err = account::create(&db, &email, "Second", "hash").await.unwrap_err();
    assert!(matches!(err, ModelError::Duplicate(_)), "got {err:?}");

    let found = account::find_by_email(&db, &email).await?.expect("account");
    assert_eq!(found.id, a.id);
    account::Entity::delete_by_id(a.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn test_bookmark_pair_unique_and_delete() -> Result<()> {
    let Some(db) = test_db().await else { return Ok(()) };
    let a = account::create(&db, &unique_email("bm"), "Booker", "hash").await?;
    let c = counselor::create(&db, "Dr. Lee", None).await?;

    let first = bookmark::create_if_absent(&db, a.id, c.id).await?;
    assert!(first.is_some());
    let second = bookmark::create_if_absent(&db, a.id, c.id).await?;
    assert!(second.is_none(), "second insert for the same pair must be skipped");

    let found = bookmark::find_pair(&db, a.id, c.id).await?.expect("bookmark");
    assert_eq!(Some(found.id), first.map(|b| b.id));

    assert_eq!(bookmark::delete_pair(&db, a.id, c.id).await?, 1);
    assert_eq!(bookmark::delete_pair(&db, a.id, c.id).await?, 0);

    counselor::Entity::delete_by_id(c.id).exec(&db).await?;
    account::Entity::delete_by_id(a.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn test_counseling_fields_and_reservation_slot() -> Result<()> {
    let Some(db) = test_db().await else { return Ok(()) };
    let a = account::create(&db, &unique_email("rsv"), "Client", "hash").await?;
    let c = counselor::create(&db, "Dr. Park", Some("CBT")).await?;
    counseling_field::create(&db, c.id, "anxiety").await?;
    counseling_field::create(&db, c.id, "family").await?;
    let labels = counseling_field::labels_for(&db, c.id).await?;
    assert_eq!(labels.len(), 2);

    let date = (Utc::now() + Duration::days(3)).date_naive();
    let time = NaiveTime::from_hms_opt(14, 0, 0).expect("valid time");
    assert!(!reservation::slot_taken(&db, c.id, date, time).await?);
    let r = reservation::create(&db, a.id, c.id, date, time, Some("Room 1")).await?;
    assert_eq!(r.status, reservation::STATUS_PENDING);
    assert!(reservation::slot_taken(&db, c.id, date, time).await?);

    reservation::Entity::update_many()
        .col_expr(reservation::Column::Status, Expr::value(reservation::STATUS_CANCELLED))
        .filter(reservation::Column::Id.eq(r.id))
        .exec(&db)
        .await?;
    assert!(!reservation::slot_taken(&db, c.id, date, time).await?);

    let cd = consult_detail::create(&db, a.id, r.id, Some("first session")).await?;
    assert_eq!(cd.reservation_id, r.id);

    counselor::Entity::delete_by_id(c.id).exec(&db).await?;
    account::Entity::delete_by_id(a.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn test_review_recommendation_and_tags() -> Result<()> {
    let Some(db) = test_db().await else { return Ok(()) };
    let a = account::create(&db, &unique_email("rv"), "Reviewer", "hash").await?;
    let c = counselor::create(&db, "Dr. Choi", None).await?;

    let r = review::create(&db, a.id, c.id, "Great", "Very helpful session", 4.5).await?;
    assert_eq!(r.recommendation_count, 0);
    assert_eq!(review::increment_recommendation(&db, r.id).await?, Some(1));
    assert_eq!(review::increment_recommendation(&db, r.id).await?, Some(2));
    assert_eq!(review::increment_recommendation(&db, Uuid::new_v4()).await?, None);

    let tag_name = format!("kind-{}", &Uuid::new_v4().to_string()[..8]);
    let t1 = review_tag::find_or_create(&db, &tag_name).await?;
    let t2 = review_tag::find_or_create(&db, &tag_name).await?;
    assert_eq!(t1.id, t2.id);
    review_tag_map::link(&db, r.id, t1.id).await?;
    review_tag_map::link(&db, r.id, t1.id).await?;

    counselor::Entity::delete_by_id(c.id).exec(&db).await?;
    account::Entity::delete_by_id(a.id).exec(&db).await?;
    review_tag::Entity::delete_by_id(t1.id).exec(&db).await?;
    Ok(())
}
