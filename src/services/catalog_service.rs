use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Book, Genre},
        dto::{
            request::{BookListParams, CreateBookRequest, CreateGenreRequest, UpdateBookRequest},
            response::{DeleteResponse, PagedResponse},
        },
    },
    repositories::{BookRepository, GenreRepository},
};

pub struct CatalogService {
    books: Arc<dyn BookRepository>,
    genres: Arc<dyn GenreRepository>,
}

impl CatalogService {
    pub fn new(books: Arc<dyn BookRepository>, genres: Arc<dyn GenreRepository>) -> Self {
        Self { books, genres }
    }

    pub async fn list_books(&self, params: &BookListParams) -> AppResult<PagedResponse<Book>> {
        params.validate()?;

        let offset = params.offset.unwrap_or(0);
        let limit = params.limit.unwrap_or(20).min(100);

        let (books, total) = self
            .books
            .list(
                params.genre_id.as_deref(),
                params.search.as_deref(),
                offset,
                limit,
            )
            .await?;

        Ok(PagedResponse::new(books, total, offset, limit))
    }

    pub async fn get_book(&self, id: &str) -> AppResult<Book> {
        self.books
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id '{}' not found", id)))
    }

    pub async fn create_book(&self, request: CreateBookRequest) -> AppResult<Book> {
        request.validate()?;

        if self.genres.find_by_id(&request.genre_id).await?.is_none() {
            return Err(AppError::ValidationError(format!(
                "Genre with id '{}' does not exist",
                request.genre_id
            )));
        }

        let mut book = Book::new(
            &request.title,
            &request.author,
            &request.genre_id,
            request.page_count,
            request.published_year,
        );
        book.description = request.description;
        book.cover_url = request.cover_url;

        self.books.create(book).await
    }

    pub async fn update_book(&self, id: &str, request: UpdateBookRequest) -> AppResult<Book> {
        request.validate()?;

        let mut book = self.get_book(id).await?;

        if let Some(genre_id) = &request.genre_id {
            if self.genres.find_by_id(genre_id).await?.is_none() {
                return Err(AppError::ValidationError(format!(
                    "Genre with id '{}' does not exist",
                    genre_id
                )));
            }
            book.genre_id = genre_id.clone();
        }
        if let Some(title) = request.title {
            book.title = title;
        }
        if let Some(author) = request.author {
            book.author = author;
        }
        if let Some(description) = request.description {
            book.description = Some(description);
        }
        if let Some(cover_url) = request.cover_url {
            book.cover_url = Some(cover_url);
        }
        if let Some(page_count) = request.page_count {
            book.page_count = page_count;
        }
        if let Some(published_year) = request.published_year {
            book.published_year = published_year;
        }
        book.modified_at = Some(Utc::now());

        self.books.update(book).await
    }

    pub async fn delete_book(&self, id: &str) -> AppResult<DeleteResponse> {
        self.books.delete(id).await?;
        Ok(DeleteResponse {
            message: format!("Book '{}' deleted", id),
        })
    }

    pub async fn list_genres(&self) -> AppResult<Vec<Genre>> {
        self.genres.find_all().await
    }

    pub async fn create_genre(&self, request: CreateGenreRequest) -> AppResult<Genre> {
        request.validate()?;

        if self.genres.find_by_name(&request.name).await?.is_some() {
            return Err(AppError::AlreadyExists(format!(
                "Genre '{}' already exists",
                request.name
            )));
        }

        let genre = Genre::new(&request.name, request.description);
        self.genres.create(genre).await
    }

    pub async fn delete_genre(&self, id: &str) -> AppResult<DeleteResponse> {
        if self.genres.find_by_id(id).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "Genre with id '{}' not found",
                id
            )));
        }

        let attached = self.books.count_by_genre(id).await?;
        if attached > 0 {
            return Err(AppError::BadRequest(format!(
                "Cannot delete genre: {} book(s) still reference it",
                attached
            )));
        }

        self.genres.delete(id).await?;
        Ok(DeleteResponse {
            message: format!("Genre '{}' deleted", id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{
        book_repository::MockBookRepository, genre_repository::MockGenreRepository,
    };

    fn book_request(genre_id: &str) -> CreateBookRequest {
        CreateBookRequest {
            title: "Matilda".to_string(),
            author: "Roald Dahl".to_string(),
            description: None,
            genre_id: genre_id.to_string(),
            cover_url: None,
            page_count: 240,
            published_year: 1988,
        }
    }

    #[tokio::test]
    async fn create_book_rejects_unknown_genre() {
        let books = MockBookRepository::new();
        let mut genres = MockGenreRepository::new();
        genres.expect_find_by_id().returning(|_| Ok(None));

        let service = CatalogService::new(Arc::new(books), Arc::new(genres));
        let result = service.create_book(book_request("missing-genre")).await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn create_book_with_known_genre_succeeds() {
        let mut books = MockBookRepository::new();
        books.expect_create().returning(Ok);
        let mut genres = MockGenreRepository::new();
        genres
            .expect_find_by_id()
            .returning(|id| Ok(Some(Genre::new("Children", None)).filter(|_| id == "genre-1")));

        let service = CatalogService::new(Arc::new(books), Arc::new(genres));
        let book = service.create_book(book_request("genre-1")).await.unwrap();

        assert_eq!(book.title, "Matilda");
        assert_eq!(book.genre_id, "genre-1");
    }

    #[tokio::test]
    async fn delete_genre_with_attached_books_is_rejected() {
        let mut books = MockBookRepository::new();
        books.expect_count_by_genre().returning(|_| Ok(3));
        let mut genres = MockGenreRepository::new();
        genres
            .expect_find_by_id()
            .returning(|_| Ok(Some(Genre::new("Children", None))));

        let service = CatalogService::new(Arc::new(books), Arc::new(genres));
        let result = service.delete_genre("genre-1").await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn duplicate_genre_name_is_rejected() {
        let books = MockBookRepository::new();
        let mut genres = MockGenreRepository::new();
        genres
            .expect_find_by_name()
            .returning(|_| Ok(Some(Genre::new("Children", None))));

        let service = CatalogService::new(Arc::new(books), Arc::new(genres));
        let result = service
            .create_genre(CreateGenreRequest {
                name: "Children".to_string(),
                description: None,
            })
            .await;

        assert!(matches!(result, Err(AppError::AlreadyExists(_))));
    }
}
