/**
 * Database Operations for the Roadmap Aggregate
 *
 * This module provides the row types, response DTOs, and CRUD queries for
 * topics, roadmaps, steps, and resources.
 *
 * # Visibility
 *
 * Topic and roadmap queries take the owner's id and filter on
 * `created_by`, so a caller never sees another user's records through
 * them. Step and resource queries come in two flavors: parent-filtered
 * (any parent id, read-only use) and owner-filtered (the default when no
 * parent filter is given).
 *
 * # Response DTOs
 *
 * Rows are internal; responses are built from explicit DTOs that allow-list
 * the exposed fields. Owner foreign keys never appear in a response.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::roadmap::ResourceType;

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// Topic row as stored in the database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TopicRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: i64,
}

/// Roadmap row as stored in the database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RoadmapRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub topic_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: i64,
}

/// Step row as stored in the database
///
/// `step_order` is the column name (`order` is an SQL keyword); responses
/// expose it as `order`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StepRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub step_order: i64,
    pub roadmap_id: i64,
    pub estimated_time: Option<String>,
    pub resources: String,
}

/// Resource row as stored in the database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ResourceRow {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub description: String,
    pub resource_type: ResourceType,
    pub step_id: i64,
}

// ---------------------------------------------------------------------------
// Response DTOs
// ---------------------------------------------------------------------------

/// Serialized resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceResponse {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub description: String,
    pub resource_type: ResourceType,
}

impl From<ResourceRow> for ResourceResponse {
    fn from(row: ResourceRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            url: row.url,
            description: row.description,
            resource_type: row.resource_type,
        }
    }
}

/// Serialized step with its nested resources
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub order: i64,
    pub estimated_time: Option<String>,
    /// Free-text resource note carried on the step itself
    pub resources: String,
    /// Typed resource records attached to the step
    pub resource_links: Vec<ResourceResponse>,
}

impl StepResponse {
    pub fn new(row: StepRow, resource_links: Vec<ResourceResponse>) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            order: row.step_order,
            estimated_time: row.estimated_time,
            resources: row.resources,
            resource_links,
        }
    }
}

/// Serialized roadmap aggregate: roadmap plus nested steps and resources
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadmapDetail {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub steps: Vec<StepResponse>,
}

/// Serialized topic with its nested roadmap aggregates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicDetail {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub roadmaps: Vec<RoadmapDetail>,
}

// ---------------------------------------------------------------------------
// Topics
// ---------------------------------------------------------------------------

/// List topics owned by `owner_id`
pub async fn list_topics(pool: &SqlitePool, owner_id: i64) -> Result<Vec<TopicRow>, sqlx::Error> {
    sqlx::query_as::<_, TopicRow>(
        r#"
        SELECT id, title, description, created_at, updated_at, created_by
        FROM topics
        WHERE created_by = ?
        ORDER BY id ASC
        "#,
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await
}

/// Find a topic by id within the owner's visible set
pub async fn find_topic(
    pool: &SqlitePool,
    id: i64,
    owner_id: i64,
) -> Result<Option<TopicRow>, sqlx::Error> {
    sqlx::query_as::<_, TopicRow>(
        r#"
        SELECT id, title, description, created_at, updated_at, created_by
        FROM topics
        WHERE id = ? AND created_by = ?
        "#,
    )
    .bind(id)
    .bind(owner_id)
    .fetch_optional(pool)
    .await
}

/// Insert a topic
pub async fn insert_topic(
    pool: &SqlitePool,
    title: &str,
    description: &str,
    owner_id: i64,
) -> Result<TopicRow, sqlx::Error> {
    let now = Utc::now();
    sqlx::query_as::<_, TopicRow>(
        r#"
        INSERT INTO topics (title, description, created_at, updated_at, created_by)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, title, description, created_at, updated_at, created_by
        "#,
    )
    .bind(title)
    .bind(description)
    .bind(now)
    .bind(now)
    .bind(owner_id)
    .fetch_one(pool)
    .await
}

/// Update a topic within the owner's visible set
pub async fn update_topic(
    pool: &SqlitePool,
    id: i64,
    owner_id: i64,
    title: &str,
    description: &str,
) -> Result<Option<TopicRow>, sqlx::Error> {
    sqlx::query_as::<_, TopicRow>(
        r#"
        UPDATE topics
        SET title = ?, description = ?, updated_at = ?
        WHERE id = ? AND created_by = ?
        RETURNING id, title, description, created_at, updated_at, created_by
        "#,
    )
    .bind(title)
    .bind(description)
    .bind(Utc::now())
    .bind(id)
    .bind(owner_id)
    .fetch_optional(pool)
    .await
}

/// Delete a topic within the owner's visible set
///
/// Cascades to its roadmaps, steps, and resources. Returns whether a row
/// was deleted.
pub async fn delete_topic(pool: &SqlitePool, id: i64, owner_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM topics WHERE id = ? AND created_by = ?")
        .bind(id)
        .bind(owner_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Build the nested topic detail (roadmaps with steps and resources)
pub async fn topic_detail(pool: &SqlitePool, topic: TopicRow) -> Result<TopicDetail, sqlx::Error> {
    let roadmap_rows = sqlx::query_as::<_, RoadmapRow>(
        r#"
        SELECT id, title, description, topic_id, created_at, updated_at, created_by
        FROM roadmaps
        WHERE topic_id = ?
        ORDER BY id ASC
        "#,
    )
    .bind(topic.id)
    .fetch_all(pool)
    .await?;

    let mut roadmaps = Vec::with_capacity(roadmap_rows.len());
    for row in roadmap_rows {
        roadmaps.push(roadmap_detail(pool, row).await?);
    }

    Ok(TopicDetail {
        id: topic.id,
        title: topic.title,
        description: topic.description,
        created_at: topic.created_at,
        updated_at: topic.updated_at,
        roadmaps,
    })
}

// ---------------------------------------------------------------------------
// Roadmaps
// ---------------------------------------------------------------------------

/// List roadmaps owned by `owner_id`
pub async fn list_roadmaps(pool: &SqlitePool, owner_id: i64) -> Result<Vec<RoadmapRow>, sqlx::Error> {
    sqlx::query_as::<_, RoadmapRow>(
        r#"
        SELECT id, title, description, topic_id, created_at, updated_at, created_by
        FROM roadmaps
        WHERE created_by = ?
        ORDER BY id ASC
        "#,
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await
}

/// Find a roadmap by id within the owner's visible set
pub async fn find_roadmap(
    pool: &SqlitePool,
    id: i64,
    owner_id: i64,
) -> Result<Option<RoadmapRow>, sqlx::Error> {
    sqlx::query_as::<_, RoadmapRow>(
        r#"
        SELECT id, title, description, topic_id, created_at, updated_at, created_by
        FROM roadmaps
        WHERE id = ? AND created_by = ?
        "#,
    )
    .bind(id)
    .bind(owner_id)
    .fetch_optional(pool)
    .await
}

/// Find a roadmap by id regardless of owner
///
/// Used by step/resource handlers, which apply the owner-or-read-only
/// check explicitly instead of owner-filtering the lookup.
pub async fn find_roadmap_any(pool: &SqlitePool, id: i64) -> Result<Option<RoadmapRow>, sqlx::Error> {
    sqlx::query_as::<_, RoadmapRow>(
        r#"
        SELECT id, title, description, topic_id, created_at, updated_at, created_by
        FROM roadmaps
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Insert a roadmap under a topic
pub async fn insert_roadmap(
    pool: &SqlitePool,
    title: &str,
    description: &str,
    topic_id: i64,
    owner_id: i64,
) -> Result<RoadmapRow, sqlx::Error> {
    let now = Utc::now();
    sqlx::query_as::<_, RoadmapRow>(
        r#"
        INSERT INTO roadmaps (title, description, topic_id, created_at, updated_at, created_by)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING id, title, description, topic_id, created_at, updated_at, created_by
        "#,
    )
    .bind(title)
    .bind(description)
    .bind(topic_id)
    .bind(now)
    .bind(now)
    .bind(owner_id)
    .fetch_one(pool)
    .await
}

/// Update a roadmap within the owner's visible set
pub async fn update_roadmap(
    pool: &SqlitePool,
    id: i64,
    owner_id: i64,
    title: &str,
    description: &str,
) -> Result<Option<RoadmapRow>, sqlx::Error> {
    sqlx::query_as::<_, RoadmapRow>(
        r#"
        UPDATE roadmaps
        SET title = ?, description = ?, updated_at = ?
        WHERE id = ? AND created_by = ?
        RETURNING id, title, description, topic_id, created_at, updated_at, created_by
        "#,
    )
    .bind(title)
    .bind(description)
    .bind(Utc::now())
    .bind(id)
    .bind(owner_id)
    .fetch_optional(pool)
    .await
}

/// Delete a roadmap within the owner's visible set
pub async fn delete_roadmap(pool: &SqlitePool, id: i64, owner_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM roadmaps WHERE id = ? AND created_by = ?")
        .bind(id)
        .bind(owner_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Build the nested roadmap detail: steps ascending by order, each with
/// its resources
pub async fn roadmap_detail(
    pool: &SqlitePool,
    roadmap: RoadmapRow,
) -> Result<RoadmapDetail, sqlx::Error> {
    let step_rows = list_steps_for_roadmap(pool, roadmap.id).await?;

    let mut steps = Vec::with_capacity(step_rows.len());
    for step in step_rows {
        let resource_links = list_resources_for_step(pool, step.id)
            .await?
            .into_iter()
            .map(ResourceResponse::from)
            .collect();
        steps.push(StepResponse::new(step, resource_links));
    }

    Ok(RoadmapDetail {
        id: roadmap.id,
        title: roadmap.title,
        description: roadmap.description,
        created_at: roadmap.created_at,
        updated_at: roadmap.updated_at,
        steps,
    })
}

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

/// List steps of one roadmap, ascending by order
pub async fn list_steps_for_roadmap(
    pool: &SqlitePool,
    roadmap_id: i64,
) -> Result<Vec<StepRow>, sqlx::Error> {
    sqlx::query_as::<_, StepRow>(
        r#"
        SELECT id, title, description, step_order, roadmap_id, estimated_time, resources
        FROM steps
        WHERE roadmap_id = ?
        ORDER BY step_order ASC
        "#,
    )
    .bind(roadmap_id)
    .fetch_all(pool)
    .await
}

/// List all steps of roadmaps owned by `owner_id`
pub async fn list_steps_owned(pool: &SqlitePool, owner_id: i64) -> Result<Vec<StepRow>, sqlx::Error> {
    sqlx::query_as::<_, StepRow>(
        r#"
        SELECT s.id, s.title, s.description, s.step_order, s.roadmap_id, s.estimated_time, s.resources
        FROM steps s
        JOIN roadmaps r ON r.id = s.roadmap_id
        WHERE r.created_by = ?
        ORDER BY s.roadmap_id ASC, s.step_order ASC
        "#,
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await
}

/// Find a step by id, along with the owning user of its roadmap
pub async fn find_step(pool: &SqlitePool, id: i64) -> Result<Option<(StepRow, i64)>, sqlx::Error> {
    let step = sqlx::query_as::<_, StepRow>(
        r#"
        SELECT id, title, description, step_order, roadmap_id, estimated_time, resources
        FROM steps
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    match step {
        Some(step) => {
            let owner_id: i64 = sqlx::query_scalar("SELECT created_by FROM roadmaps WHERE id = ?")
                .bind(step.roadmap_id)
                .fetch_one(pool)
                .await?;
            Ok(Some((step, owner_id)))
        }
        None => Ok(None),
    }
}

/// Insert a step under a roadmap
pub async fn insert_step(
    pool: &SqlitePool,
    roadmap_id: i64,
    title: &str,
    description: &str,
    order: i64,
    estimated_time: Option<&str>,
    resources: &str,
) -> Result<StepRow, sqlx::Error> {
    sqlx::query_as::<_, StepRow>(
        r#"
        INSERT INTO steps (title, description, step_order, roadmap_id, estimated_time, resources)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING id, title, description, step_order, roadmap_id, estimated_time, resources
        "#,
    )
    .bind(title)
    .bind(description)
    .bind(order)
    .bind(roadmap_id)
    .bind(estimated_time)
    .bind(resources)
    .fetch_one(pool)
    .await
}

/// Update a step
pub async fn update_step(
    pool: &SqlitePool,
    id: i64,
    title: &str,
    description: &str,
    order: i64,
    estimated_time: Option<&str>,
    resources: &str,
) -> Result<Option<StepRow>, sqlx::Error> {
    sqlx::query_as::<_, StepRow>(
        r#"
        UPDATE steps
        SET title = ?, description = ?, step_order = ?, estimated_time = ?, resources = ?
        WHERE id = ?
        RETURNING id, title, description, step_order, roadmap_id, estimated_time, resources
        "#,
    )
    .bind(title)
    .bind(description)
    .bind(order)
    .bind(estimated_time)
    .bind(resources)
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Delete a step (cascades to its resources)
pub async fn delete_step(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM steps WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// List resources of one step
pub async fn list_resources_for_step(
    pool: &SqlitePool,
    step_id: i64,
) -> Result<Vec<ResourceRow>, sqlx::Error> {
    sqlx::query_as::<_, ResourceRow>(
        r#"
        SELECT id, title, url, description, resource_type, step_id
        FROM resources
        WHERE step_id = ?
        ORDER BY id ASC
        "#,
    )
    .bind(step_id)
    .fetch_all(pool)
    .await
}

/// List all resources under roadmaps owned by `owner_id`
pub async fn list_resources_owned(
    pool: &SqlitePool,
    owner_id: i64,
) -> Result<Vec<ResourceRow>, sqlx::Error> {
    sqlx::query_as::<_, ResourceRow>(
        r#"
        SELECT res.id, res.title, res.url, res.description, res.resource_type, res.step_id
        FROM resources res
        JOIN steps s ON s.id = res.step_id
        JOIN roadmaps r ON r.id = s.roadmap_id
        WHERE r.created_by = ?
        ORDER BY res.id ASC
        "#,
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await
}

/// Find a resource by id, along with the owning user of its roadmap
pub async fn find_resource(
    pool: &SqlitePool,
    id: i64,
) -> Result<Option<(ResourceRow, i64)>, sqlx::Error> {
    let resource = sqlx::query_as::<_, ResourceRow>(
        r#"
        SELECT id, title, url, description, resource_type, step_id
        FROM resources
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    match resource {
        Some(resource) => {
            let owner_id: i64 = sqlx::query_scalar(
                r#"
                SELECT r.created_by
                FROM roadmaps r
                JOIN steps s ON s.roadmap_id = r.id
                WHERE s.id = ?
                "#,
            )
            .bind(resource.step_id)
            .fetch_one(pool)
            .await?;
            Ok(Some((resource, owner_id)))
        }
        None => Ok(None),
    }
}

/// Insert a resource under a step
pub async fn insert_resource(
    pool: &SqlitePool,
    step_id: i64,
    title: &str,
    url: &str,
    description: &str,
    resource_type: ResourceType,
) -> Result<ResourceRow, sqlx::Error> {
    sqlx::query_as::<_, ResourceRow>(
        r#"
        INSERT INTO resources (title, url, description, resource_type, step_id)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, title, url, description, resource_type, step_id
        "#,
    )
    .bind(title)
    .bind(url)
    .bind(description)
    .bind(resource_type)
    .bind(step_id)
    .fetch_one(pool)
    .await
}

/// Update a resource
pub async fn update_resource(
    pool: &SqlitePool,
    id: i64,
    title: &str,
    url: &str,
    description: &str,
    resource_type: ResourceType,
) -> Result<Option<ResourceRow>, sqlx::Error> {
    sqlx::query_as::<_, ResourceRow>(
        r#"
        UPDATE resources
        SET title = ?, url = ?, description = ?, resource_type = ?
        WHERE id = ?
        RETURNING id, title, url, description, resource_type, step_id
        "#,
    )
    .bind(title)
    .bind(url)
    .bind(description)
    .bind(resource_type)
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Delete a resource
pub async fn delete_resource(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM resources WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
