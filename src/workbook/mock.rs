use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;

use crate::traits::{HandleError, Workbook};

#[derive(Debug, Clone)]
struct BookState {
    name: String,
    rows: Vec<Vec<String>>,
    flushed: bool,
}

/// Mock workbook collaborator for testing.
#[derive(Clone)]
pub struct MockWorkbook {
    next_id: Arc<Mutex<u64>>,
    books: Arc<Mutex<HashMap<String, BookState>>>,
    trashed: Arc<Mutex<Vec<String>>>,
    exports: Arc<Mutex<Vec<(String, Vec<Vec<String>>)>>>,
}

impl MockWorkbook {
    pub fn new() -> Self {
        Self {
            next_id: Arc::new(Mutex::new(0)),
            books: Arc::new(Mutex::new(HashMap::new())),
            trashed: Arc::new(Mutex::new(Vec::new())),
            exports: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Exported workbooks as (name, rows) pairs, in export order.
    pub fn get_exports(&self) -> Vec<(String, Vec<Vec<String>>)> {
        self.exports.lock().unwrap().clone()
    }

    /// Names of trashed workbooks, in order.
    pub fn trashed_names(&self) -> Vec<String> {
        self.trashed.lock().unwrap().clone()
    }

    /// Number of still-live working workbooks.
    pub fn live_books(&self) -> usize {
        self.books.lock().unwrap().len()
    }
}

impl Default for MockWorkbook {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Workbook for MockWorkbook {
    fn name(&self) -> &'static str {
        "mock-workbook"
    }

    async fn create(&self, name: &str) -> Result<String> {
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let handle = format!("book-{}", *next_id);
        self.books.lock().unwrap().insert(
            handle.clone(),
            BookState {
                name: name.to_string(),
                rows: Vec::new(),
                flushed: false,
            },
        );
        Ok(handle)
    }

    async fn append_row(&self, handle: &str, row: &[String]) -> Result<()> {
        let mut books = self.books.lock().unwrap();
        let book = books
            .get_mut(handle)
            .ok_or_else(|| HandleError::UnknownWorkbook(handle.to_string()))?;
        book.rows.push(row.to_vec());
        Ok(())
    }

    async fn flush(&self, handle: &str) -> Result<()> {
        let mut books = self.books.lock().unwrap();
        let book = books
            .get_mut(handle)
            .ok_or_else(|| HandleError::UnknownWorkbook(handle.to_string()))?;
        book.flushed = true;
        Ok(())
    }

    async fn export_xlsx(&self, handle: &str) -> Result<Vec<u8>> {
        let books = self.books.lock().unwrap();
        let book = books
            .get(handle)
            .ok_or_else(|| HandleError::UnknownWorkbook(handle.to_string()))?;
        self.exports
            .lock()
            .unwrap()
            .push((book.name.clone(), book.rows.clone()));
        // Serialized shape is irrelevant to callers; rows are recorded above.
        Ok(format!("xlsx:{}:{} rows", book.name, book.rows.len()).into_bytes())
    }

    async fn trash(&self, handle: &str) -> Result<()> {
        let removed = self.books.lock().unwrap().remove(handle);
        match removed {
            Some(book) => {
                self.trashed.lock().unwrap().push(book.name);
                Ok(())
            }
            None => Err(HandleError::UnknownWorkbook(handle.to_string()).into()),
        }
    }
}
