use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, OnceLock, PoisonError},
    time::SystemTime,
};

use tracing::debug;

use crate::{dataset::Dataset, error::Error};

/// Source identity: the resolved path plus its modification time. A replaced source
/// file invalidates the cached dataset, an unchanged one is parsed at most once per
/// process.
type Key = (PathBuf, SystemTime);

fn table() -> &'static Mutex<HashMap<Key, Arc<Dataset>>> {
    static TABLE: OnceLock<Mutex<HashMap<Key, Arc<Dataset>>>> = OnceLock::new();
    TABLE.get_or_init(|| Mutex::new(HashMap::new()))
}

/// Load the dataset through the session cache.
pub fn load(path: &Path) -> Result<Arc<Dataset>, Error> {
    let modified = std::fs::metadata(path)?.modified()?;
    let key = (path.to_path_buf(), modified);
    let mut table = table().lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(dataset) = table.get(&key) {
        debug!(path = %path.display(), "session cache hit");
        return Ok(Arc::clone(dataset));
    }
    let dataset = Arc::new(Dataset::from_csv_path(path)?);
    table.retain(|(cached_path, _), _| cached_path.as_path() != path);
    table.insert(key, Arc::clone(&dataset));
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::tests::CSV_HEADER;

    #[test]
    fn test_same_identity_is_parsed_once() {
        let path = std::env::temp_dir().join("zone-demand-cache-test.csv");
        let contents = format!("{CSV_HEADER}\n2017-01-02 00:00,6.0,74.0,0.08,0.05,0.1,10,20,5");
        std::fs::write(&path, contents).unwrap();

        let first = load(&path).unwrap();
        let second = load(&path).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.len(), 1);

        std::fs::remove_file(&path).unwrap();
    }
}
