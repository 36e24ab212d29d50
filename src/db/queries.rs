use rusqlite::{params, Connection};

use crate::models::VectorMatch;
use crate::services::embedding::cosine_similarity;

// ── Vectors ──

pub struct NewVector<'a> {
    pub id: &'a str,
    pub intent: &'a str,
    pub example: &'a str,
    pub embedder: &'a str,
    pub embedding: &'a [f32],
}

pub fn insert_vector(conn: &Connection, vector: &NewVector<'_>) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO intent_vectors (id, intent, example, embedder, dimension, embedding)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            vector.id,
            vector.intent,
            vector.example,
            vector.embedder,
            vector.embedding.len() as i64,
            encode_embedding(vector.embedding)
        ],
    )?;
    Ok(())
}

pub fn count_vectors(conn: &Connection, embedder: &str) -> anyhow::Result<i64> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM intent_vectors WHERE embedder = ?1",
        [embedder],
        |row| row.get(0),
    )?;
    Ok(count)
}

/// Removes vectors written by any other embedder. Returns the number deleted.
pub fn delete_other_embedders(conn: &Connection, embedder: &str) -> anyhow::Result<usize> {
    let deleted = conn.execute("DELETE FROM intent_vectors WHERE embedder != ?1", [embedder])?;
    Ok(deleted)
}

/// Brute-force cosine search over rows from `embedder` with the query's dimension.
pub fn search_nearest(
    conn: &Connection,
    embedder: &str,
    query: &[f32],
    limit: usize,
) -> anyhow::Result<Vec<VectorMatch>> {
    let mut stmt = conn.prepare(
        "SELECT id, intent, example, embedding FROM intent_vectors
         WHERE embedder = ?1 AND dimension = ?2",
    )?;

    let rows = stmt.query_map(params![embedder, query.len() as i64], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, Vec<u8>>(3)?,
        ))
    })?;

    let mut matches = Vec::new();
    for row in rows {
        let (id, intent, example, blob) = row?;
        let stored = decode_embedding(&blob);
        matches.push(VectorMatch {
            id,
            intent,
            example,
            score: cosine_similarity(query, &stored),
        });
    }

    matches.sort_by(|a, b| b.score.total_cmp(&a.score));
    matches.truncate(limit);
    Ok(matches)
}

fn encode_embedding(embedding: &[f32]) -> Vec<u8> {
    embedding.iter().flat_map(|v| v.to_le_bytes()).collect()
}

fn decode_embedding(blob: &[u8]) -> Vec<f32> {
    blob.chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}
