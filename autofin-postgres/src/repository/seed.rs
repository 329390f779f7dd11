//! Writes the fixtures from `autofin_db::seed` in dependency order.

use autofin_db::repository::{CreateBatch, ExistByIds};
use autofin_db::seed::{SeedData, CLIENT_IDS};
use std::error::Error;
use tracing::info;

use crate::postgres_repositories::QuotingRepositories;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub clients: usize,
    pub vehicles: usize,
    pub products: usize,
    pub calculations: usize,
    pub sessions: usize,
}

/// Inserts the seed rows inside the repositories' transaction.
///
/// Returns `None` without writing anything when any seed client is already
/// present, so running it twice is harmless.
pub async fn seed_database(
    repos: &QuotingRepositories,
    encryption_key: &str,
) -> Result<Option<SeedSummary>, Box<dyn Error + Send + Sync>> {
    let existing = repos.client_repository.exist_by_ids(&CLIENT_IDS).await?;
    if existing.iter().any(|(_, exists)| *exists) {
        info!("seed data already present, skipping");
        return Ok(None);
    }

    let data = SeedData::build()?;

    let mut clients = Vec::with_capacity(data.clients.len());
    for client in &data.clients {
        let encrypted = repos
            .client_repository
            .encrypt_full_name(&client.profile.full_name, encryption_key)
            .await?;
        clients.push(client.to_model(encrypted)?);
    }

    let summary = SeedSummary {
        clients: repos.client_repository.create_batch(clients).await?.len(),
        vehicles: repos.vehicle_repository.create_batch(data.vehicles).await?.len(),
        products: repos.product_config_repository.create_batch(data.products).await?.len(),
        calculations: repos.calculation_repository.create_batch(data.calculations).await?.len(),
        sessions: repos.user_session_repository.create_batch(data.sessions).await?.len(),
    };

    info!(?summary, "seed data inserted");
    Ok(Some(summary))
}
