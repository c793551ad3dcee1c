use sqlx::PgPool;
use uuid::Uuid;

use ops_core::models::Ngo;
use ops_core::status::NgoStatus;

use crate::error::{Error, Result};
use crate::models::NgoRow;

const COLUMNS: &str = "id, legal_name, common_name, bundle, country, state, city, status, \
                       fiscal_type, notes, coordinator_user_id, admin_user_id, created_at, \
                       updated_at";

#[derive(Debug, Clone)]
pub struct NewNgo {
    pub id: Uuid,
    pub legal_name: String,
    pub common_name: String,
    pub bundle: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub status: NgoStatus,
    pub fiscal_type: Option<String>,
    pub notes: Option<String>,
    pub coordinator_user_id: Option<Uuid>,
    pub admin_user_id: Option<Uuid>,
}

/// Partial NGO update; `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct NgoPatch {
    pub legal_name: Option<String>,
    pub common_name: Option<String>,
    pub bundle: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub status: Option<NgoStatus>,
    pub fiscal_type: Option<String>,
    pub notes: Option<String>,
    pub coordinator_user_id: Option<Uuid>,
    pub admin_user_id: Option<Uuid>,
}

/// The bulk rewrite applied to every member of a bundle.
#[derive(Debug, Clone, Default)]
pub struct BundleChange {
    pub rename: Option<String>,
    pub region: Option<String>,
    pub notes: Option<String>,
}

pub struct NgoRepository {
    pool: PgPool,
}

impl NgoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, ngo: &NewNgo) -> Result<Ngo> {
        let row = sqlx::query_as::<_, NgoRow>(&format!(
            r#"
            INSERT INTO ngos
                (id, legal_name, common_name, bundle, country, state, city, status,
                 fiscal_type, notes, coordinator_user_id, admin_user_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(ngo.id)
        .bind(&ngo.legal_name)
        .bind(&ngo.common_name)
        .bind(&ngo.bundle)
        .bind(&ngo.country)
        .bind(&ngo.state)
        .bind(&ngo.city)
        .bind(ngo.status.as_str())
        .bind(&ngo.fiscal_type)
        .bind(&ngo.notes)
        .bind(ngo.coordinator_user_id)
        .bind(ngo.admin_user_id)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    pub async fn update(&self, id: Uuid, patch: &NgoPatch) -> Result<Ngo> {
        let row = sqlx::query_as::<_, NgoRow>(&format!(
            r#"
            UPDATE ngos SET
                legal_name          = COALESCE($2, legal_name),
                common_name         = COALESCE($3, common_name),
                bundle              = COALESCE($4, bundle),
                country             = COALESCE($5, country),
                state               = COALESCE($6, state),
                city                = COALESCE($7, city),
                status              = COALESCE($8, status),
                fiscal_type         = COALESCE($9, fiscal_type),
                notes               = COALESCE($10, notes),
                coordinator_user_id = COALESCE($11, coordinator_user_id),
                admin_user_id       = COALESCE($12, admin_user_id),
                updated_at          = now()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&patch.legal_name)
        .bind(&patch.common_name)
        .bind(&patch.bundle)
        .bind(&patch.country)
        .bind(&patch.state)
        .bind(&patch.city)
        .bind(patch.status.map(NgoStatus::as_str))
        .bind(&patch.fiscal_type)
        .bind(&patch.notes)
        .bind(patch.coordinator_user_id)
        .bind(patch.admin_user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("NGO {id}")))?;

        row.try_into()
    }

    pub async fn fetch(&self, id: Uuid) -> Result<Ngo> {
        let row = sqlx::query_as::<_, NgoRow>(&format!("SELECT {COLUMNS} FROM ngos WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound(format!("NGO {id}")))?;

        row.try_into()
    }

    pub async fn list_all(&self) -> Result<Vec<Ngo>> {
        let rows = sqlx::query_as::<_, NgoRow>(&format!(
            "SELECT {COLUMNS} FROM ngos ORDER BY common_name ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// There is no bundle table: a bundle edit is one bulk UPDATE across every
    /// NGO row sharing the bundle tag. Returns the member count touched.
    pub async fn update_bundle(&self, bundle: &str, change: &BundleChange) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE ngos SET
                bundle     = COALESCE($2, bundle),
                country    = COALESCE($3, country),
                notes      = COALESCE($4, notes),
                updated_at = now()
            WHERE bundle = $1
            "#,
        )
        .bind(bundle)
        .bind(&change.rename)
        .bind(&change.region)
        .bind(&change.notes)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
