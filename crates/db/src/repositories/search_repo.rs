//! Repository for the `topic_search_documents` table.
//!
//! A topic's search document aggregates its name, page content, and the
//! content of its questions and non-deleted answers into a single tsvector
//! row. The sync service rebuilds it after related content changes.

use sqlx::PgPool;

use qboard_core::types::DbId;

/// Provides rebuild and query operations over topic search documents.
pub struct SearchRepo;

/// A ranked topic search hit.
#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize)]
pub struct TopicSearchHit {
    pub topic_id: DbId,
    pub slug: String,
    pub name: String,
    pub rank: f32,
}

impl SearchRepo {
    /// Rebuild the aggregate search document for one topic.
    ///
    /// Upserts, so the first reindex of a topic creates its row. Deleted
    /// answers are excluded from the aggregation.
    pub async fn reindex_topic(pool: &PgPool, topic_id: DbId) -> Result<(), sqlx::Error> {
        let sql = "\
            INSERT INTO topic_search_documents (topic_id, body, search_vector, indexed_at) \
            SELECT t.id, doc.body, to_tsvector('english', doc.body), now() \
            FROM topics t \
            CROSS JOIN LATERAL ( \
                SELECT concat_ws(' ', \
                    t.name, \
                    (SELECT tp.content FROM topic_pages tp WHERE tp.topic_id = t.id), \
                    (SELECT string_agg(q.content, ' ') FROM questions q \
                     WHERE q.entity_id = t.id AND q.entity_type = 'topic'), \
                    (SELECT string_agg(a.content, ' ') FROM answers a \
                     JOIN questions q ON q.id = a.question_id \
                     WHERE q.entity_id = t.id AND q.entity_type = 'topic' \
                       AND a.deleted = FALSE) \
                ) AS body \
            ) doc \
            WHERE t.id = $1 \
            ON CONFLICT (topic_id) DO UPDATE SET \
                body = EXCLUDED.body, \
                search_vector = EXCLUDED.search_vector, \
                indexed_at = EXCLUDED.indexed_at";
        sqlx::query(sql).bind(topic_id).execute(pool).await?;
        Ok(())
    }

    /// Rank topics against a plain-language query.
    pub async fn search_topics(
        pool: &PgPool,
        query_text: &str,
        limit: i64,
    ) -> Result<Vec<TopicSearchHit>, sqlx::Error> {
        let sql = "\
            SELECT d.topic_id, t.slug, t.name, \
                   ts_rank(d.search_vector, plainto_tsquery('english', $1)) AS rank \
            FROM topic_search_documents d \
            JOIN topics t ON t.id = d.topic_id \
            WHERE d.search_vector @@ plainto_tsquery('english', $1) \
            ORDER BY rank DESC \
            LIMIT $2";
        sqlx::query_as::<_, TopicSearchHit>(sql)
            .bind(query_text)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
