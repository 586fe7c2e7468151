pub mod auth_profile_store;
pub mod blob_object_store;
pub mod db_group_driven_ports;
pub mod db_review_driven_ports;
pub mod db_task_driven_ports;

use crate::external_connections;
use anyhow::{Context, anyhow};
use sqlx::pool::PoolConnection;
use sqlx::{PgConnection, PgPool, Postgres};
use std::fmt::{Debug, Display};

/// Data structure which owns clients for connecting to external systems.
/// Allows business logic to be agnostic of the external systems it communicates
/// with so driven adapters can easily be swapped out for other implementations
#[derive(Clone)]
pub struct ExternalConnectivity {
    db: PgPool,
    http_client: reqwest::Client,
}

impl ExternalConnectivity {
    /// Accepts the set of clients used to connect to external systems and
    /// constructs an instance of ExternalConnectivity owning those clients
    pub fn new(db: PgPool) -> Result<Self, anyhow::Error> {
        let http_client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .context("building the shared HTTP client")?;

        Ok(ExternalConnectivity { db, http_client })
    }
}

/// A handle from ExternalConnectivity which can connect to a database
pub struct PoolConnectionHandle {
    active_connection: PoolConnection<Postgres>,
}

impl external_connections::ConnectionHandle for PoolConnectionHandle {
    fn borrow_connection(&mut self) -> &mut PgConnection {
        &mut self.active_connection
    }
}

impl external_connections::ExternalConnectivity for ExternalConnectivity {
    type DbHandle<'cxn_borrow> = PoolConnectionHandle;

    async fn database_cxn(&mut self) -> Result<Self::DbHandle<'_>, anyhow::Error> {
        let handle = PoolConnectionHandle {
            active_connection: self.db.acquire().await?,
        };

        Ok(handle)
    }

    fn http_client(&self) -> &reqwest::Client {
        &self.http_client
    }
}

/// Converts anything implementing Debug and Display into an [anyhow::Error]
fn anyhowify<T: Debug + Display>(errorish: T) -> anyhow::Error {
    anyhow!(format!("{}", errorish))
}
