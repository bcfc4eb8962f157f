use anyhow::Context;
use chrono::NaiveDate;
use sqlx::{PgPool, Row};
use tracing::debug;
use uuid::Uuid;

use crate::models::{GradedAnswer, InterviewSession};

pub async fn init_db(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

async fn upsert_interview(
    pool: &PgPool,
    mock_id: &str,
    job_position: &str,
    created_by: &str,
    created_at: Option<NaiveDate>,
) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO interview_practice.interviews (mock_id, job_position, created_by, created_at)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (mock_id) DO UPDATE
        SET job_position = EXCLUDED.job_position
        "#,
    )
    .bind(mock_id)
    .bind(job_position)
    .bind(created_by)
    .bind(created_at)
    .execute(pool)
    .await?;
    Ok(())
}

async fn insert_answer(
    pool: &PgPool,
    mock_id: &str,
    question: &str,
    rating: Option<&str>,
    user_email: &str,
    created_at: Option<NaiveDate>,
    source_key: &str,
) -> anyhow::Result<bool> {
    let result = sqlx::query(
        r#"
        INSERT INTO interview_practice.answers
        (mock_id_ref, question, rating, user_email, created_at, source_key)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (source_key) DO NOTHING
        "#,
    )
    .bind(mock_id)
    .bind(question)
    .bind(rating)
    .bind(user_email)
    .bind(created_at)
    .bind(source_key)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn seed(pool: &PgPool) -> anyhow::Result<()> {
    let email = "avery.lee@example.com";
    let interviews = vec![
        (
            Uuid::parse_str("3d7f5d6f-24f7-4e8e-8b4b-3e7e44b4a7b2")?,
            "Backend Engineer",
            NaiveDate::from_ymd_opt(2026, 2, 2).context("invalid date")?,
            [("Design a rate limiter", Some("88")), ("Explain database indexes", Some("92"))],
        ),
        (
            Uuid::parse_str("0c22f1f1-9184-4fd4-9b21-28c68a6a89dc")?,
            "Backend Engineer",
            NaiveDate::from_ymd_opt(2026, 1, 30).context("invalid date")?,
            [("Describe a production incident", Some("74")), ("How does TLS work?", Some("70"))],
        ),
        (
            Uuid::parse_str("d5a0a1a2-2a3c-44c2-8f73-60b7897a9dd2")?,
            "Platform Engineer",
            NaiveDate::from_ymd_opt(2026, 1, 28).context("invalid date")?,
            [("Walk through a deploy pipeline", Some("65")), ("What is eventual consistency?", None)],
        ),
    ];

    for (mock_id, job_position, created_at, answers) in interviews {
        let mock_id = mock_id.to_string();
        upsert_interview(pool, &mock_id, job_position, email, Some(created_at)).await?;

        for (position, (question, rating)) in answers.into_iter().enumerate() {
            let source_key = format!("seed-{mock_id}-{position}");
            insert_answer(pool, &mock_id, question, rating, email, Some(created_at), &source_key)
                .await?;
        }
    }

    Ok(())
}

pub async fn import_csv(pool: &PgPool, csv_path: &std::path::Path) -> anyhow::Result<usize> {
    #[derive(serde::Deserialize)]
    struct CsvRow {
        mock_id: String,
        job_position: String,
        user_email: String,
        question: String,
        rating: Option<String>,
        interview_date: Option<NaiveDate>,
        answered_at: Option<NaiveDate>,
        source_key: Option<String>,
    }

    let mut reader = csv::Reader::from_path(csv_path)
        .with_context(|| format!("failed to open {}", csv_path.display()))?;
    let mut inserted = 0usize;

    for result in reader.deserialize::<CsvRow>() {
        let row = result?;
        upsert_interview(
            pool,
            &row.mock_id,
            &row.job_position,
            &row.user_email,
            row.interview_date,
        )
        .await?;

        let source_key = row
            .source_key
            .unwrap_or_else(|| format!("import-{}", Uuid::new_v4()));

        let added = insert_answer(
            pool,
            &row.mock_id,
            &row.question,
            row.rating.as_deref(),
            &row.user_email,
            row.answered_at,
            &source_key,
        )
        .await?;

        if added {
            inserted += 1;
        } else {
            debug!(%source_key, "answer already imported");
        }
    }

    Ok(inserted)
}

pub async fn fetch_interviews(pool: &PgPool, email: &str) -> anyhow::Result<Vec<InterviewSession>> {
    let records = sqlx::query(
        r#"
        SELECT mock_id, job_position, created_at
        FROM interview_practice.interviews
        WHERE created_by = $1
        ORDER BY created_at DESC NULLS LAST, id DESC
        "#,
    )
    .bind(email)
    .fetch_all(pool)
    .await?;

    let interviews: Vec<InterviewSession> = records
        .into_iter()
        .map(|row| InterviewSession {
            id: row.get("mock_id"),
            job_position: row.get("job_position"),
            created_at: row.get("created_at"),
        })
        .collect();

    debug!(count = interviews.len(), "fetched interviews");
    Ok(interviews)
}

pub async fn fetch_answers(pool: &PgPool, email: &str) -> anyhow::Result<Vec<GradedAnswer>> {
    let records = sqlx::query(
        r#"
        SELECT mock_id_ref, question, rating, created_at
        FROM interview_practice.answers
        WHERE user_email = $1
        ORDER BY created_at DESC NULLS LAST, id DESC
        "#,
    )
    .bind(email)
    .fetch_all(pool)
    .await?;

    let answers: Vec<GradedAnswer> = records
        .into_iter()
        .map(|row| GradedAnswer {
            interview_ref: row.get("mock_id_ref"),
            question: row.get("question"),
            rating: row.get("rating"),
            created_at: row.get("created_at"),
        })
        .collect();

    debug!(count = answers.len(), "fetched answers");
    Ok(answers)
}
