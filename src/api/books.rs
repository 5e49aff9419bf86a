//! Book catalog endpoints

use validator::Validate;

use super::ApiClient;
use crate::error::ApiResult;
use crate::models::book::{Book, BookQuery, CreateBook, UpdateBook};
use crate::models::Page;

#[derive(Clone)]
pub struct BooksApi {
    client: ApiClient,
}

impl BooksApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &BookQuery) -> ApiResult<Page<Book>> {
        self.client.get_with_query("/books", query).await
    }

    pub async fn get(&self, id: i32) -> ApiResult<Book> {
        self.client.get(&format!("/books/{}", id)).await
    }

    pub async fn create(&self, book: &CreateBook) -> ApiResult<Book> {
        book.validate()?;
        self.client.post("/books", book).await
    }

    pub async fn update(&self, id: i32, book: &UpdateBook) -> ApiResult<Book> {
        book.validate()?;
        self.client.put(&format!("/books/{}", id), book).await
    }

    pub async fn remove(&self, id: i32) -> ApiResult<()> {
        self.client.delete(&format!("/books/{}", id)).await
    }
}
