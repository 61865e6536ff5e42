//! Hint, profile and usage-log operations.
//!
//! Hints are read per region, filtered to active rows whose weather list
//! admits the current tag, and ordered by priority. Every hint the weaver
//! appends is written to `hint_usage_log`.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use wildweave_narrative::HintUsage;
use wildweave_types::{
    DescriptionStyle, HintCategory, HintId, RegionHint, RegionId, RegionProfile,
};

use crate::error::DbError;

/// Operations on `region_hints`, `region_profiles` and `hint_usage_log`.
pub struct HintStore<'a> {
    pool: &'a PgPool,
}

impl<'a> HintStore<'a> {
    /// Create a new hint store bound to a connection pool.
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Active hints of `region` whose weather list admits `weather`.
    ///
    /// An empty `weather` tag and an empty (or blank) stored list both
    /// admit every row. Tags in the stored list are compared without case
    /// or surrounding spaces. Rows come back highest priority first, ties
    /// by id, at most `limit` of them. Rows that do not decode are skipped
    /// with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn fetch_hints(
        &self,
        region: RegionId,
        weather: &str,
        limit: usize,
    ) -> Result<Vec<RegionHint>, DbError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let tag = weather.trim().to_ascii_lowercase();
        let rows = sqlx::query_as::<_, HintRow>(
            r"SELECT id, region_id, hint_category, hint_text, priority, weather_conditions,
                     seasonal_weight, time_of_day_weight, resource_triggers, created_at, is_active
              FROM region_hints
              WHERE region_id = $1
                AND is_active
                AND (btrim(weather_conditions) = ''
                     OR $2 = ''
                     OR $2 = ANY(string_to_array(lower(replace(weather_conditions, ' ', '')), ',')))
              ORDER BY priority DESC, id
              LIMIT $3",
        )
        .bind(region.into_inner())
        .bind(&tag)
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        let hints = decode_hints(rows);
        tracing::debug!(region = %region, weather = %tag, count = hints.len(), "Fetched region hints");
        Ok(hints)
    }

    /// The stored profile of `region`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn fetch_profile(&self, region: RegionId) -> Result<Option<RegionProfile>, DbError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r"SELECT region_id, overall_theme, dominant_mood, key_characteristics,
                     description_style, complexity_level
              FROM region_profiles
              WHERE region_id = $1",
        )
        .bind(region.into_inner())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(RegionProfile::from))
    }

    /// The authored description of `region`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn fetch_region_description(&self, region: RegionId) -> Result<Option<String>, DbError> {
        let description: Option<Option<String>> =
            sqlx::query_scalar(r"SELECT description FROM regions WHERE id = $1")
                .bind(region.into_inner())
                .fetch_optional(self.pool)
                .await?;
        Ok(description.flatten().filter(|text| !text.trim().is_empty()))
    }

    /// Append one row to `hint_usage_log`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the insert fails.
    pub async fn record_usage(&self, usage: &HintUsage) -> Result<(), DbError> {
        sqlx::query(
            r"INSERT INTO hint_usage_log (hint_id, region_id, category, x, y, weather_condition, season, time_of_day, used_at)
              VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(usage.hint.into_inner())
        .bind(usage.region.into_inner())
        .bind(usage.category.as_str())
        .bind(usage.at.x)
        .bind(usage.at.y)
        .bind(&usage.weather)
        .bind(usage.season.as_str())
        .bind(usage.time.as_str())
        .bind(usage.used_at)
        .execute(self.pool)
        .await?;
        Ok(())
    }

    /// Insert or replace a hint, keeping its id.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the insert fails.
    pub async fn upsert_hint(&self, hint: &RegionHint) -> Result<(), DbError> {
        sqlx::query(
            r"INSERT INTO region_hints (id, region_id, hint_category, hint_text, priority, weather_conditions,
                                        seasonal_weight, time_of_day_weight, resource_triggers, created_at, is_active)
              VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
              ON CONFLICT (id) DO UPDATE SET
                  region_id = EXCLUDED.region_id,
                  hint_category = EXCLUDED.hint_category,
                  hint_text = EXCLUDED.hint_text,
                  priority = EXCLUDED.priority,
                  weather_conditions = EXCLUDED.weather_conditions,
                  seasonal_weight = EXCLUDED.seasonal_weight,
                  time_of_day_weight = EXCLUDED.time_of_day_weight,
                  resource_triggers = EXCLUDED.resource_triggers,
                  is_active = EXCLUDED.is_active",
        )
        .bind(hint.id.into_inner())
        .bind(hint.region.into_inner())
        .bind(hint.category.as_str())
        .bind(&hint.text)
        .bind(hint.priority)
        .bind(&hint.weather_conditions)
        .bind(json_or_null(&hint.seasonal_weights))
        .bind(json_or_null(&hint.time_weights))
        .bind(json_or_null(&hint.resource_triggers))
        .bind(hint.created_at)
        .bind(hint.active)
        .execute(self.pool)
        .await?;
        Ok(())
    }

    /// Insert or replace the profile of a region.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the upsert fails.
    pub async fn upsert_profile(&self, profile: &RegionProfile) -> Result<(), DbError> {
        sqlx::query(
            r"INSERT INTO region_profiles (region_id, overall_theme, dominant_mood, key_characteristics,
                                           description_style, complexity_level)
              VALUES ($1, $2, $3, $4, $5, $6)
              ON CONFLICT (region_id) DO UPDATE SET
                  overall_theme = EXCLUDED.overall_theme,
                  dominant_mood = EXCLUDED.dominant_mood,
                  key_characteristics = EXCLUDED.key_characteristics,
                  description_style = EXCLUDED.description_style,
                  complexity_level = EXCLUDED.complexity_level",
        )
        .bind(profile.region.into_inner())
        .bind(&profile.theme)
        .bind(&profile.dominant_mood)
        .bind(json_or_null(&profile.key_characteristics))
        .bind(profile.style.as_str())
        .bind(i16::from(profile.complexity.clamp(1, 5)))
        .execute(self.pool)
        .await?;
        Ok(())
    }

    /// Number of usage rows recorded for `hint`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn usage_count(&self, hint: HintId) -> Result<u64, DbError> {
        let count: i64 = sqlx::query_scalar(r"SELECT COUNT(*) FROM hint_usage_log WHERE hint_id = $1")
            .bind(hint.into_inner())
            .fetch_one(self.pool)
            .await?;
        Ok(u64::try_from(count).unwrap_or(0))
    }
}

/// Null JSON is stored as SQL `NULL`.
fn json_or_null(value: &serde_json::Value) -> Option<&serde_json::Value> {
    (!value.is_null()).then_some(value)
}

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `region_hints` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct HintRow {
    /// Hint key.
    pub id: i64,
    /// Owning region.
    pub region_id: i64,
    /// Category name.
    pub hint_category: String,
    /// Fragment text.
    pub hint_text: String,
    /// Load priority.
    pub priority: i32,
    /// Comma-separated weather tags.
    pub weather_conditions: String,
    /// Seasonal weight blob.
    pub seasonal_weight: Option<serde_json::Value>,
    /// Time-of-day weight blob.
    pub time_of_day_weight: Option<serde_json::Value>,
    /// Resource trigger blob.
    pub resource_triggers: Option<serde_json::Value>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Whether the hint may be loaded.
    pub is_active: bool,
}

impl TryFrom<HintRow> for RegionHint {
    type Error = DbError;

    fn try_from(row: HintRow) -> Result<Self, Self::Error> {
        let category = HintCategory::parse(&row.hint_category).ok_or_else(|| DbError::InvalidRow {
            id: row.id,
            reason: format!("unknown hint category {:?}", row.hint_category),
        })?;
        Ok(Self {
            id: HintId::new(row.id),
            region: RegionId::new(row.region_id),
            category,
            text: row.hint_text,
            priority: row.priority,
            weather_conditions: row.weather_conditions,
            seasonal_weights: row.seasonal_weight.unwrap_or_default(),
            time_weights: row.time_of_day_weight.unwrap_or_default(),
            resource_triggers: row.resource_triggers.unwrap_or_default(),
            created_at: row.created_at,
            active: row.is_active,
        })
    }
}

/// A row from the `region_profiles` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProfileRow {
    /// Owning region.
    pub region_id: i64,
    /// Overall theme.
    pub overall_theme: String,
    /// Dominant mood word.
    pub dominant_mood: String,
    /// Key-characteristics blob.
    pub key_characteristics: Option<serde_json::Value>,
    /// Style name.
    pub description_style: String,
    /// Complexity level.
    pub complexity_level: i16,
}

impl From<ProfileRow> for RegionProfile {
    fn from(row: ProfileRow) -> Self {
        Self {
            region: RegionId::new(row.region_id),
            theme: row.overall_theme,
            dominant_mood: row.dominant_mood,
            key_characteristics: row.key_characteristics.unwrap_or_default(),
            style: DescriptionStyle::parse_or_default(&row.description_style),
            complexity: u8::try_from(row.complexity_level.clamp(1, 5)).unwrap_or(1),
        }
    }
}

/// Decode fetched rows, dropping the ones with unknown categories.
fn decode_hints(rows: Vec<HintRow>) -> Vec<RegionHint> {
    rows.into_iter()
        .filter_map(|row| match RegionHint::try_from(row) {
            Ok(hint) => Some(hint),
            Err(err) => {
                tracing::warn!(error = %err, "Skipping undecodable region hint");
                None
            }
        })
        .collect()
}
