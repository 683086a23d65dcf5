/**
 * Roadmap Persister
 *
 * This module materializes a generated roadmap draft into database rows.
 *
 * # Algorithm
 *
 * 1. Get-or-create the topic keyed by `(title, owner)`. The lookup is a
 *    single conflict-resolving upsert against the `UNIQUE(title,
 *    created_by)` constraint, so concurrent generations for the same pair
 *    cannot produce two topic rows. A freshly created topic defaults its
 *    description to `"Research topic in {field}"`.
 * 2. Insert the roadmap under that topic.
 * 3. Insert each step in draft order, carrying the draft's `order` value
 *    (not re-derived).
 * 4. Insert each step's resources, mapping draft `type` to `resource_type`.
 *
 * # Atomicity
 *
 * Steps 1-4 run inside one transaction, committed once at the end. A
 * failure at any point (e.g. a duplicate step order) rolls the whole
 * aggregate back: a roadmap is never visible without its steps, nor a step
 * without its resources. Constraint violations surface as
 * `RoadmapError::Persistence` and are propagated, not retried.
 */

use chrono::Utc;
use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::roadmap::db::{
    ResourceResponse, ResourceRow, RoadmapDetail, RoadmapRow, StepResponse, StepRow, TopicRow,
};
use crate::roadmap::generator::RoadmapDraft;
use crate::roadmap::RoadmapError;

/// Persist a roadmap draft for `owner_id`
///
/// Returns the fully materialized aggregate: the roadmap with its steps in
/// ascending order and each step's resources attached.
///
/// # Errors
///
/// Returns `RoadmapError::Persistence` on any storage failure; nothing is
/// written in that case.
pub async fn persist(
    pool: &SqlitePool,
    draft: &RoadmapDraft,
    owner_id: i64,
) -> Result<RoadmapDetail, RoadmapError> {
    let mut tx = pool.begin().await?;

    let topic = upsert_topic(&mut tx, draft, owner_id).await?;

    let now = Utc::now();
    let roadmap = sqlx::query_as::<_, RoadmapRow>(
        r#"
        INSERT INTO roadmaps (title, description, topic_id, created_at, updated_at, created_by)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING id, title, description, topic_id, created_at, updated_at, created_by
        "#,
    )
    .bind(&draft.title)
    .bind(&draft.description)
    .bind(topic.id)
    .bind(now)
    .bind(now)
    .bind(owner_id)
    .fetch_one(&mut *tx)
    .await?;

    let mut steps = Vec::with_capacity(draft.steps.len());
    for step_draft in &draft.steps {
        let step = sqlx::query_as::<_, StepRow>(
            r#"
            INSERT INTO steps (title, description, step_order, roadmap_id, estimated_time, resources)
            VALUES (?, ?, ?, ?, ?, '')
            RETURNING id, title, description, step_order, roadmap_id, estimated_time, resources
            "#,
        )
        .bind(&step_draft.title)
        .bind(&step_draft.description)
        .bind(step_draft.order)
        .bind(roadmap.id)
        .bind(&step_draft.estimated_time)
        .fetch_one(&mut *tx)
        .await?;

        let mut resource_links = Vec::with_capacity(step_draft.resources.len());
        for resource_draft in &step_draft.resources {
            let resource = sqlx::query_as::<_, ResourceRow>(
                r#"
                INSERT INTO resources (title, url, description, resource_type, step_id)
                VALUES (?, ?, '', ?, ?)
                RETURNING id, title, url, description, resource_type, step_id
                "#,
            )
            .bind(&resource_draft.title)
            .bind(&resource_draft.url)
            .bind(resource_draft.resource_type)
            .bind(step.id)
            .fetch_one(&mut *tx)
            .await?;
            resource_links.push(ResourceResponse::from(resource));
        }

        steps.push(StepResponse::new(step, resource_links));
    }

    tx.commit().await?;

    // Draft steps arrive in input order; the response contract is ascending
    // by order value.
    steps.sort_by_key(|s| s.order);

    Ok(RoadmapDetail {
        id: roadmap.id,
        title: roadmap.title,
        description: roadmap.description,
        created_at: roadmap.created_at,
        updated_at: roadmap.updated_at,
        steps,
    })
}

/// Atomic topic get-or-create keyed by `(title, owner)`
///
/// The no-op `DO UPDATE` turns a conflicting insert into a row fetch, so
/// the existing description is preserved on reuse and exactly one row ever
/// exists per key.
async fn upsert_topic(
    tx: &mut Transaction<'_, Sqlite>,
    draft: &RoadmapDraft,
    owner_id: i64,
) -> Result<TopicRow, sqlx::Error> {
    let now = Utc::now();
    sqlx::query_as::<_, TopicRow>(
        r#"
        INSERT INTO topics (title, description, created_at, updated_at, created_by)
        VALUES (?, ?, ?, ?, ?)
        ON CONFLICT (title, created_by) DO UPDATE SET title = excluded.title
        RETURNING id, title, description, created_at, updated_at, created_by
        "#,
    )
    .bind(&draft.topic)
    .bind(format!("Research topic in {}", draft.field))
    .bind(now)
    .bind(now)
    .bind(owner_id)
    .fetch_one(&mut **tx)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::users::create_user;
    use crate::roadmap::generator::generate;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    async fn test_pool() -> SqlitePool {
        let options = sqlx::sqlite::SqliteConnectOptions::from_str("sqlite::memory:")
            .unwrap()
            .foreign_keys(true);
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .unwrap();
        sqlx::migrate!().run(&pool).await.unwrap();
        pool
    }

    async fn test_user(pool: &SqlitePool, username: &str) -> i64 {
        create_user(pool, username, &format!("{username}@example.com"), "hash")
            .await
            .unwrap()
            .id
    }

    async fn count(pool: &SqlitePool, sql: &str) -> i64 {
        sqlx::query_scalar(sql).fetch_one(pool).await.unwrap()
    }

    #[tokio::test]
    async fn test_persist_materializes_aggregate() {
        let pool = test_pool().await;
        let owner = test_user(&pool, "alice").await;

        let draft = generate("Quantum Computing", "Physics", Some("beginner")).unwrap();
        let roadmap = persist(&pool, &draft, owner).await.unwrap();

        assert_eq!(roadmap.title, "Research Roadmap for Quantum Computing in Physics");
        assert_eq!(roadmap.steps.len(), 3);
        for (step, step_draft) in roadmap.steps.iter().zip(&draft.steps) {
            assert_eq!(step.order, step_draft.order);
            assert_eq!(step.resource_links.len(), step_draft.resources.len());
        }
    }

    #[tokio::test]
    async fn test_steps_ascending_by_order() {
        let pool = test_pool().await;
        let owner = test_user(&pool, "alice").await;

        let draft = generate("Topic", "Field", None).unwrap();
        let roadmap = persist(&pool, &draft, owner).await.unwrap();

        let orders: Vec<i64> = roadmap.steps.iter().map(|s| s.order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_topic_reused_for_same_owner() {
        let pool = test_pool().await;
        let owner = test_user(&pool, "alice").await;

        let draft = generate("Quantum Computing", "Physics", None).unwrap();
        persist(&pool, &draft, owner).await.unwrap();
        persist(&pool, &draft, owner).await.unwrap();

        assert_eq!(count(&pool, "SELECT COUNT(*) FROM topics").await, 1);
        assert_eq!(count(&pool, "SELECT COUNT(*) FROM roadmaps").await, 2);
    }

    #[tokio::test]
    async fn test_topic_description_preserved_on_reuse() {
        let pool = test_pool().await;
        let owner = test_user(&pool, "alice").await;

        let first = generate("Quantum Computing", "Physics", None).unwrap();
        persist(&pool, &first, owner).await.unwrap();

        // Same topic title, different field: the original description must
        // survive the reuse.
        let second = generate("Quantum Computing", "Mathematics", None).unwrap();
        persist(&pool, &second, owner).await.unwrap();

        let description: String =
            sqlx::query_scalar("SELECT description FROM topics WHERE created_by = ?")
                .bind(owner)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(description, "Research topic in Physics");
    }

    #[tokio::test]
    async fn test_different_owners_get_independent_topics() {
        let pool = test_pool().await;
        let alice = test_user(&pool, "alice").await;
        let bob = test_user(&pool, "bob").await;

        let draft = generate("Quantum Computing", "Physics", None).unwrap();
        persist(&pool, &draft, alice).await.unwrap();
        persist(&pool, &draft, bob).await.unwrap();

        assert_eq!(count(&pool, "SELECT COUNT(*) FROM topics").await, 2);
    }

    #[tokio::test]
    async fn test_failure_rolls_back_whole_aggregate() {
        let pool = test_pool().await;
        let owner = test_user(&pool, "alice").await;

        let mut draft = generate("Topic", "Field", None).unwrap();
        // Duplicate order violates UNIQUE(roadmap_id, step_order) on the
        // second step insert, after the roadmap and first step are written.
        draft.steps[1].order = 1;

        let result = persist(&pool, &draft, owner).await;
        assert!(matches!(result, Err(RoadmapError::Persistence(_))));

        assert_eq!(count(&pool, "SELECT COUNT(*) FROM roadmaps").await, 0);
        assert_eq!(count(&pool, "SELECT COUNT(*) FROM steps").await, 0);
        assert_eq!(count(&pool, "SELECT COUNT(*) FROM resources").await, 0);
        assert_eq!(count(&pool, "SELECT COUNT(*) FROM topics").await, 0);
    }
}
