use anyhow::Result;
use async_trait::async_trait;
use log::info;
use sqlx::postgres::{PgPool, PgPoolOptions};

use super::{FilingStore, Fingerprint, UpsertOutcome};
use crate::form4::types::Filing;

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS issuers (
        cik TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        trading_symbol TEXT
    )",
    "CREATE TABLE IF NOT EXISTS reporting_owners (
        cik TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        is_director BOOLEAN NOT NULL DEFAULT FALSE,
        is_officer BOOLEAN NOT NULL DEFAULT FALSE,
        is_ten_percent_owner BOOLEAN NOT NULL DEFAULT FALSE,
        is_other BOOLEAN NOT NULL DEFAULT FALSE,
        officer_title TEXT
    )",
    "CREATE TABLE IF NOT EXISTS filings (
        accession_number TEXT PRIMARY KEY,
        schema_version TEXT,
        document_type TEXT,
        period_of_report DATE,
        issuer_cik TEXT NOT NULL REFERENCES issuers(cik)
    )",
    "CREATE TABLE IF NOT EXISTS transactions (
        fingerprint TEXT PRIMARY KEY,
        accession_number TEXT NOT NULL REFERENCES filings(accession_number),
        owner_cik TEXT NOT NULL,
        security_title TEXT NOT NULL,
        transaction_date DATE NOT NULL,
        transaction_code TEXT NOT NULL,
        shares NUMERIC,
        price_per_share NUMERIC,
        acquired_disposed TEXT NOT NULL,
        shares_owned_following NUMERIC,
        ownership TEXT NOT NULL,
        indirect_ownership_nature TEXT,
        is_derivative BOOLEAN NOT NULL,
        underlying_title TEXT,
        underlying_shares NUMERIC,
        conversion_or_exercise_price NUMERIC,
        exercise_date DATE,
        expiration_date DATE,
        footnote_ids TEXT[] NOT NULL DEFAULT '{}'
    )",
    "CREATE TABLE IF NOT EXISTS footnotes (
        accession_number TEXT NOT NULL REFERENCES filings(accession_number),
        id TEXT NOT NULL,
        note TEXT NOT NULL,
        PRIMARY KEY (accession_number, id)
    )",
    "CREATE TABLE IF NOT EXISTS signatures (
        accession_number TEXT NOT NULL REFERENCES filings(accession_number),
        position INT NOT NULL,
        name TEXT NOT NULL,
        signed_on DATE NOT NULL,
        PRIMARY KEY (accession_number, position)
    )",
];

/// Durable store. One database transaction per filing, so a batch is never
/// half-persisted; dedup rides on the fingerprint primary key.
pub struct PgFilingStore {
    pool: PgPool,
}

impl PgFilingStore {
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(16)
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    pub fn with_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn ensure_schema(&self) -> Result<()> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl FilingStore for PgFilingStore {
    async fn upsert_filing(&self, filing: &Filing) -> Result<UpsertOutcome> {
        let mut tx = self.pool.begin().await?;

        for issuer in &filing.issuers {
            sqlx::query(
                "INSERT INTO issuers (cik, name, trading_symbol) VALUES ($1, $2, $3)
                 ON CONFLICT (cik) DO UPDATE SET
                     name = EXCLUDED.name,
                     trading_symbol = COALESCE(EXCLUDED.trading_symbol, issuers.trading_symbol)",
            )
            .bind(&issuer.cik)
            .bind(&issuer.name)
            .bind(&issuer.trading_symbol)
            .execute(&mut *tx)
            .await?;
        }

        for owner in &filing.reporting_owners {
            sqlx::query(
                "INSERT INTO reporting_owners
                     (cik, name, is_director, is_officer, is_ten_percent_owner, is_other, officer_title)
                 VALUES ($1, $2, $3, $4, $5, $6, $7)
                 ON CONFLICT (cik) DO UPDATE SET
                     name = EXCLUDED.name,
                     is_director = EXCLUDED.is_director,
                     is_officer = EXCLUDED.is_officer,
                     is_ten_percent_owner = EXCLUDED.is_ten_percent_owner,
                     is_other = EXCLUDED.is_other,
                     officer_title = EXCLUDED.officer_title",
            )
            .bind(&owner.cik)
            .bind(&owner.name)
            .bind(owner.is_director)
            .bind(owner.is_officer)
            .bind(owner.is_ten_percent_owner)
            .bind(owner.is_other)
            .bind(&owner.officer_title)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query(
            "INSERT INTO filings
                 (accession_number, schema_version, document_type, period_of_report, issuer_cik)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (accession_number) DO NOTHING",
        )
        .bind(&filing.accession_number)
        .bind(&filing.schema_version)
        .bind(&filing.document_type)
        .bind(filing.period_of_report)
        .bind(&filing.issuer().cik)
        .execute(&mut *tx)
        .await?;

        let mut outcome = UpsertOutcome::default();
        for transaction in &filing.transactions {
            let fingerprint = Fingerprint::of(&filing.accession_number, transaction);
            let terms = transaction.derivative_terms();
            let result = sqlx::query(
                "INSERT INTO transactions
                     (fingerprint, accession_number, owner_cik, security_title,
                      transaction_date, transaction_code, shares, price_per_share,
                      acquired_disposed, shares_owned_following, ownership,
                      indirect_ownership_nature, is_derivative, underlying_title,
                      underlying_shares, conversion_or_exercise_price,
                      exercise_date, expiration_date, footnote_ids)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                         $11, $12, $13, $14, $15, $16, $17, $18, $19)
                 ON CONFLICT (fingerprint) DO NOTHING",
            )
            .bind(fingerprint.as_str())
            .bind(&filing.accession_number)
            .bind(&transaction.owner_cik)
            .bind(&transaction.security_title)
            .bind(transaction.transaction_date)
            .bind(transaction.code.to_string())
            .bind(transaction.shares)
            .bind(transaction.price_per_share)
            .bind(transaction.acquired_disposed.to_string())
            .bind(transaction.shares_owned_following)
            .bind(transaction.ownership.to_string())
            .bind(&transaction.indirect_ownership_nature)
            .bind(transaction.is_derivative())
            .bind(terms.and_then(|t| t.underlying_title.as_deref()))
            .bind(terms.and_then(|t| t.underlying_shares))
            .bind(terms.and_then(|t| t.conversion_or_exercise_price))
            .bind(terms.and_then(|t| t.exercise_date))
            .bind(terms.and_then(|t| t.expiration_date))
            .bind(&transaction.footnote_ids)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 1 {
                outcome.inserted += 1;
            } else {
                outcome.duplicates += 1;
            }
        }

        for footnote in &filing.footnotes {
            sqlx::query(
                "INSERT INTO footnotes (accession_number, id, note) VALUES ($1, $2, $3)
                 ON CONFLICT (accession_number, id) DO NOTHING",
            )
            .bind(&filing.accession_number)
            .bind(&footnote.id)
            .bind(&footnote.text)
            .execute(&mut *tx)
            .await?;
        }

        for (position, signature) in filing.signatures.iter().enumerate() {
            sqlx::query(
                "INSERT INTO signatures (accession_number, position, name, signed_on)
                 VALUES ($1, $2, $3, $4)
                 ON CONFLICT (accession_number, position) DO NOTHING",
            )
            .bind(&filing.accession_number)
            .bind(position as i32)
            .bind(&signature.name)
            .bind(signature.date)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        info!(
            "persisted filing {}: {} inserted, {} duplicates",
            filing.accession_number, outcome.inserted, outcome.duplicates
        );
        Ok(outcome)
    }
}
