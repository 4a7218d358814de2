//! Postgres operations for daily market and macro snapshots

use crate::config;
use crate::models::{IndicatorSnapshot, MacroSnapshot};
use chrono::NaiveDate;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_postgres::{Client, NoTls, Row};

type DbError = Box<dyn std::error::Error + Send + Sync>;

/// Store keyed by (date, ticker) for per-asset metrics and by date for macro
/// indicators. Numeric columns stay NUMERIC on the wire for compatibility
/// with the existing tables; values are cast to/from float8 at the SQL
/// boundary.
pub struct MarketDatabase {
    client: Arc<RwLock<Option<Client>>>,
}

impl MarketDatabase {
    pub async fn new() -> Result<Self, DbError> {
        Self::connect(&config::get_database_url()).await
    }

    pub async fn connect(database_url: &str) -> Result<Self, DbError> {
        let (client, connection) = tokio_postgres::connect(database_url, NoTls)
            .await
            .map_err(|e| {
                Box::new(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    format!("Failed to connect to Postgres: {}", e),
                )) as DbError
            })?;

        // Spawn connection task
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!(error = %e, "Postgres connection error");
            }
        });

        let db = Self {
            client: Arc::new(RwLock::new(Some(client))),
        };
        db.init_schema().await?;
        Ok(db)
    }

    async fn init_schema(&self) -> Result<(), DbError> {
        let client = self.client.read().await;
        if let Some(ref c) = *client {
            c.execute(
                "CREATE TABLE IF NOT EXISTS market_daily_metrics (
                    date DATE,
                    ticker TEXT,
                    close NUMERIC,
                    rsi_14 NUMERIC,
                    ma200_dist_pct NUMERIC,
                    created_at TIMESTAMP DEFAULT now(),
                    PRIMARY KEY (date, ticker)
                )",
                &[],
            )
            .await
            .map_err(|e| {
                Box::new(std::io::Error::other(format!(
                    "Failed to create market_daily_metrics table: {}",
                    e
                ))) as DbError
            })?;

            c.execute(
                "CREATE TABLE IF NOT EXISTS macro_indicators (
                    date DATE PRIMARY KEY,
                    vix_close NUMERIC,
                    fear_greed_index INTEGER,
                    us10y_yield NUMERIC,
                    soxx_qqq_ratio NUMERIC,
                    xlp_xly_ratio NUMERIC,
                    created_at TIMESTAMP DEFAULT now()
                )",
                &[],
            )
            .await
            .map_err(|e| {
                Box::new(std::io::Error::other(format!(
                    "Failed to create macro_indicators table: {}",
                    e
                ))) as DbError
            })?;
        }
        Ok(())
    }

    /// Insert or update per-asset daily metrics.
    pub async fn upsert_market_daily(
        &self,
        snapshots: &[IndicatorSnapshot],
    ) -> Result<u64, DbError> {
        let client = self.client.read().await;
        let mut written = 0;
        if let Some(ref c) = *client {
            for snapshot in snapshots {
                c.execute(
                    "INSERT INTO market_daily_metrics (date, ticker, close, rsi_14, ma200_dist_pct)
                     VALUES ($1, $2, $3::float8::numeric, $4::float8::numeric, $5::float8::numeric)
                     ON CONFLICT (date, ticker) DO UPDATE SET
                        close = EXCLUDED.close,
                        rsi_14 = EXCLUDED.rsi_14,
                        ma200_dist_pct = EXCLUDED.ma200_dist_pct",
                    &[
                        &snapshot.date,
                        &snapshot.ticker,
                        &snapshot.close,
                        &snapshot.rsi_14,
                        &snapshot.ma200_dist_pct,
                    ],
                )
                .await
                .map_err(|e| {
                    Box::new(std::io::Error::other(format!(
                        "Failed to upsert market metrics for {}: {}",
                        snapshot.ticker, e
                    ))) as DbError
                })?;
                written += 1;
            }
        }
        Ok(written)
    }

    /// Insert or update the macro record for one calendar date.
    pub async fn upsert_macro(&self, snapshot: &MacroSnapshot) -> Result<(), DbError> {
        let client = self.client.read().await;
        if let Some(ref c) = *client {
            c.execute(
                "INSERT INTO macro_indicators
                    (date, vix_close, fear_greed_index, us10y_yield, soxx_qqq_ratio, xlp_xly_ratio)
                 VALUES ($1, $2::float8::numeric, $3, $4::float8::numeric,
                         $5::float8::numeric, $6::float8::numeric)
                 ON CONFLICT (date) DO UPDATE SET
                    vix_close = EXCLUDED.vix_close,
                    fear_greed_index = EXCLUDED.fear_greed_index,
                    us10y_yield = EXCLUDED.us10y_yield,
                    soxx_qqq_ratio = EXCLUDED.soxx_qqq_ratio,
                    xlp_xly_ratio = EXCLUDED.xlp_xly_ratio",
                &[
                    &snapshot.date,
                    &snapshot.vix_close,
                    &snapshot.fear_greed_index,
                    &snapshot.us10y_yield,
                    &snapshot.soxx_qqq_ratio,
                    &snapshot.xlp_xly_ratio,
                ],
            )
            .await
            .map_err(|e| {
                Box::new(std::io::Error::other(format!(
                    "Failed to upsert macro indicators: {}",
                    e
                ))) as DbError
            })?;
        }
        Ok(())
    }

    /// Metrics for the given tickers, ascending by date.
    pub async fn fetch_market_daily(
        &self,
        tickers: &[String],
        start: Option<NaiveDate>,
    ) -> Result<Vec<IndicatorSnapshot>, DbError> {
        let client = self.client.read().await;
        if let Some(ref c) = *client {
            let rows = match start {
                Some(start) => {
                    c.query(
                        "SELECT date, ticker, close::float8 AS close,
                                rsi_14::float8 AS rsi_14,
                                ma200_dist_pct::float8 AS ma200_dist_pct
                         FROM market_daily_metrics
                         WHERE ticker = ANY($1) AND date >= $2
                         ORDER BY date ASC",
                        &[&tickers, &start],
                    )
                    .await
                }
                None => {
                    c.query(
                        "SELECT date, ticker, close::float8 AS close,
                                rsi_14::float8 AS rsi_14,
                                ma200_dist_pct::float8 AS ma200_dist_pct
                         FROM market_daily_metrics
                         WHERE ticker = ANY($1)
                         ORDER BY date ASC",
                        &[&tickers],
                    )
                    .await
                }
            }
            .map_err(|e| {
                Box::new(std::io::Error::other(format!(
                    "Failed to fetch market metrics: {}",
                    e
                ))) as DbError
            })?;

            return rows.iter().map(market_row).collect();
        }
        Ok(Vec::new())
    }

    /// The latest row per ticker, for the summary table.
    pub async fn fetch_latest_market(
        &self,
        tickers: &[String],
    ) -> Result<Vec<IndicatorSnapshot>, DbError> {
        let client = self.client.read().await;
        if let Some(ref c) = *client {
            let rows = c
                .query(
                    "SELECT DISTINCT ON (ticker)
                            date, ticker, close::float8 AS close,
                            rsi_14::float8 AS rsi_14,
                            ma200_dist_pct::float8 AS ma200_dist_pct
                     FROM market_daily_metrics
                     WHERE ticker = ANY($1)
                     ORDER BY ticker, date DESC",
                    &[&tickers],
                )
                .await
                .map_err(|e| {
                    Box::new(std::io::Error::other(format!(
                        "Failed to fetch latest market metrics: {}",
                        e
                    ))) as DbError
                })?;

            return rows.iter().map(market_row).collect();
        }
        Ok(Vec::new())
    }

    /// Macro history ascending by date.
    pub async fn fetch_macro(
        &self,
        start: Option<NaiveDate>,
    ) -> Result<Vec<MacroSnapshot>, DbError> {
        let client = self.client.read().await;
        if let Some(ref c) = *client {
            let rows = match start {
                Some(start) => {
                    c.query(
                        "SELECT date, vix_close::float8 AS vix_close, fear_greed_index,
                                us10y_yield::float8 AS us10y_yield,
                                soxx_qqq_ratio::float8 AS soxx_qqq_ratio,
                                xlp_xly_ratio::float8 AS xlp_xly_ratio
                         FROM macro_indicators
                         WHERE date >= $1
                         ORDER BY date ASC",
                        &[&start],
                    )
                    .await
                }
                None => {
                    c.query(
                        "SELECT date, vix_close::float8 AS vix_close, fear_greed_index,
                                us10y_yield::float8 AS us10y_yield,
                                soxx_qqq_ratio::float8 AS soxx_qqq_ratio,
                                xlp_xly_ratio::float8 AS xlp_xly_ratio
                         FROM macro_indicators
                         ORDER BY date ASC",
                        &[],
                    )
                    .await
                }
            }
            .map_err(|e| {
                Box::new(std::io::Error::other(format!(
                    "Failed to fetch macro indicators: {}",
                    e
                ))) as DbError
            })?;

            return rows.iter().map(macro_row).collect();
        }
        Ok(Vec::new())
    }
}

fn market_row(row: &Row) -> Result<IndicatorSnapshot, DbError> {
    Ok(IndicatorSnapshot {
        date: row.try_get("date")?,
        ticker: row.try_get("ticker")?,
        close: row.try_get("close")?,
        rsi_14: row.try_get("rsi_14")?,
        ma200_dist_pct: row.try_get("ma200_dist_pct")?,
    })
}

fn macro_row(row: &Row) -> Result<MacroSnapshot, DbError> {
    Ok(MacroSnapshot {
        date: row.try_get("date")?,
        vix_close: row.try_get("vix_close")?,
        fear_greed_index: row.try_get("fear_greed_index")?,
        us10y_yield: row.try_get("us10y_yield")?,
        soxx_qqq_ratio: row.try_get("soxx_qqq_ratio")?,
        xlp_xly_ratio: row.try_get("xlp_xly_ratio")?,
    })
}
