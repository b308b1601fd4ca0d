//! Build-once holder for the price table.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::OnceCell;

use super::error::PriceError;
use super::table::PriceTable;

/// Lazily loaded, shared price table.
///
/// The first caller of [`PriceStore::get`] loads the dataset; concurrent
/// callers wait on that same load. A failed load leaves the store empty so
/// a later call can retry. Once loaded the table never changes for the
/// lifetime of the store.
#[derive(Debug)]
pub struct PriceStore {
    path: PathBuf,
    table: OnceCell<Arc<PriceTable>>,
}

impl PriceStore {
    /// Create a store that will load from `path` on first use.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            table: OnceCell::new(),
        }
    }

    /// Create a store around an already-built table.
    pub fn preloaded(table: PriceTable) -> Self {
        Self {
            path: PathBuf::new(),
            table: OnceCell::new_with(Some(Arc::new(table))),
        }
    }

    /// Get the table, loading it on first call.
    pub async fn get(&self) -> Result<Arc<PriceTable>, PriceError> {
        self.table
            .get_or_try_init(|| async {
                let path = self.path.clone();
                let table = tokio::task::spawn_blocking(move || PriceTable::from_path(&path))
                    .await
                    .map_err(|e| PriceError::Load {
                        message: e.to_string(),
                    })??;
                Ok::<_, PriceError>(Arc::new(table))
            })
            .await
            .cloned()
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn dataset() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Truckstop Name,Address,City,State,Retail Price").unwrap();
        writeln!(file, "Pilot,I-35 Exit 1,Austin,TX,3.10").unwrap();
        writeln!(file, "Loves,I-40 Exit 2,Tulsa,OK,2.95").unwrap();
        file.flush().unwrap();
        file
    }

    #[tokio::test]
    async fn loads_on_first_get() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prices.csv");
        // Nothing is read until the first get
        let store = PriceStore::new(&path);

        std::fs::write(&path, "State,Retail Price\nTX,3.10\nOK,2.95\n").unwrap();
        let table = store.get().await.unwrap();
        assert_eq!(table.len(), 2);
    }

    #[tokio::test]
    async fn repeated_get_returns_same_table() {
        let file = dataset();
        let store = PriceStore::new(file.path());

        let first = store.get().await.unwrap();
        let second = store.get().await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_first_gets_share_one_build() {
        let file = dataset();
        let store = Arc::new(PriceStore::new(file.path()));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.get().await.unwrap() })
            })
            .collect();

        let mut tables = Vec::new();
        for handle in handles {
            tables.push(handle.await.unwrap());
        }
        assert!(tables.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }

    #[tokio::test]
    async fn failed_load_can_be_retried() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prices.csv");
        let store = PriceStore::new(&path);

        assert!(matches!(store.get().await, Err(PriceError::Io { .. })));

        std::fs::write(&path, "State,Retail Price\nTX,3.00\n").unwrap();
        let table = store.get().await.unwrap();
        assert_eq!(table.lookup("TX").unwrap().price, 3.00);
    }

    #[tokio::test]
    async fn preloaded_store_skips_disk() {
        let store = PriceStore::preloaded(PriceTable::new());
        assert!(store.get().await.unwrap().is_empty());
    }
}
