use sqlx::PgConnection;

/// Bundle of clients for the external systems ProveIt talks to (the relational
/// store plus HTTP services such as the object store and identity provider).
/// Business logic receives an implementation of this trait rather than reaching
/// for process-global clients, so adapters can be swapped out in tests.
pub trait ExternalConnectivity: Sync + Send {
    type DbHandle<'cxn_borrow>: ConnectionHandle
    where
        Self: 'cxn_borrow;

    /// Acquires a handle which can borrow a live database connection
    async fn database_cxn(&mut self) -> Result<Self::DbHandle<'_>, anyhow::Error>;

    /// Borrows the shared HTTP client used to reach external HTTP services
    fn http_client(&self) -> &reqwest::Client;
}

/// A handle owning or borrowing a single database connection
pub trait ConnectionHandle {
    fn borrow_connection(&mut self) -> &mut PgConnection;
}
