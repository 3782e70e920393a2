//! Stateless request builder and response parser for the `/livros`
//! collection.
//!
//! Each CRUD operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`; the
//! host executes the round-trip in between. Pure pass-through: no local
//! validation or transformation.

use crate::envelope::{self, ApiSuccess};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Book, NewBook};

/// Synchronous, stateless client for the books endpoints.
#[derive(Debug, Clone)]
pub struct BooksClient {
    base_url: String,
}

impl BooksClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_list(&self) -> HttpRequest {
        HttpRequest::bare(HttpMethod::Get, format!("{}/livros", self.base_url))
    }

    pub fn build_get(&self, id: i64) -> HttpRequest {
        HttpRequest::bare(HttpMethod::Get, format!("{}/livros/{id}", self.base_url))
    }

    pub fn build_create(&self, input: &NewBook) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest::json(
            HttpMethod::Post,
            format!("{}/livros", self.base_url),
            body,
        ))
    }

    pub fn build_update(&self, id: i64, input: &NewBook) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest::json(
            HttpMethod::Put,
            format!("{}/livros/{id}", self.base_url),
            body,
        ))
    }

    pub fn build_delete(&self, id: i64) -> HttpRequest {
        HttpRequest::bare(HttpMethod::Delete, format!("{}/livros/{id}", self.base_url))
    }

    pub fn parse_list(&self, response: HttpResponse) -> Result<ApiSuccess<Vec<Book>>, ApiError> {
        envelope::parse_data(response)
    }

    pub fn parse_get(&self, response: HttpResponse) -> Result<ApiSuccess<Book>, ApiError> {
        envelope::parse_data(response)
    }

    pub fn parse_create(&self, response: HttpResponse) -> Result<ApiSuccess<Book>, ApiError> {
        envelope::parse_data(response)
    }

    pub fn parse_update(&self, response: HttpResponse) -> Result<ApiSuccess<Book>, ApiError> {
        envelope::parse_data(response)
    }

    pub fn parse_delete(&self, response: HttpResponse) -> Result<ApiSuccess<()>, ApiError> {
        envelope::parse_ack(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> BooksClient {
        BooksClient::new("http://localhost:5000/api")
    }

    #[test]
    fn build_list_produces_correct_request() {
        let req = client().build_list();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:5000/api/livros");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_get_produces_correct_request() {
        let req = client().build_get(12);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:5000/api/livros/12");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_create_produces_correct_request() {
        let input = NewBook {
            title: "Dom Casmurro".to_string(),
            author: "Machado de Assis".to_string(),
            year: 1899,
            total_copies: 3,
            available_copies: 3,
        };
        let req = client().build_create(&input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:5000/api/livros");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["titulo"], "Dom Casmurro");
        assert_eq!(body["quantidade_total"], 3);
    }

    #[test]
    fn build_update_targets_the_record() {
        let input = NewBook {
            title: "Dom Casmurro".to_string(),
            author: "Machado de Assis".to_string(),
            year: 1899,
            total_copies: 5,
            available_copies: 5,
        };
        let req = client().build_update(12, &input).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:5000/api/livros/12");
    }

    #[test]
    fn build_delete_produces_correct_request() {
        let req = client().build_delete(12);
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:5000/api/livros/12");
        assert!(req.body.is_none());
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = BooksClient::new("http://localhost:5000/api/");
        assert_eq!(client.build_list().path, "http://localhost:5000/api/livros");
    }

    #[test]
    fn parse_list_success() {
        let response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: r#"{"sucesso":true,"dados":[{"id":1,"titulo":"T","autor":"A","ano_publicacao":2000,"quantidade_total":2,"quantidade_disponivel":1}],"total":1}"#.to_string(),
        };
        let ok = client().parse_list(response).unwrap();
        assert_eq!(ok.data.len(), 1);
        assert_eq!(ok.data[0].title, "T");
    }

    #[test]
    fn parse_create_carries_server_message() {
        let response = HttpResponse {
            status: 201,
            headers: Vec::new(),
            body: r#"{"sucesso":true,"dados":{"id":1,"titulo":"T","autor":"A","ano_publicacao":2000,"quantidade_total":2,"quantidade_disponivel":2},"mensagem":"Livro cadastrado com sucesso"}"#.to_string(),
        };
        let ok = client().parse_create(response).unwrap();
        assert_eq!(ok.data.id, 1);
        assert_eq!(ok.message.as_deref(), Some("Livro cadastrado com sucesso"));
    }

    #[test]
    fn parse_get_not_found() {
        let response = HttpResponse {
            status: 404,
            headers: Vec::new(),
            body: r#"{"sucesso":false,"erro":"Livro não encontrado"}"#.to_string(),
        };
        let err = client().parse_get(response).unwrap_err();
        assert_eq!(err.status(), 404);
        assert_eq!(err.to_string(), "Livro não encontrado");
    }

    #[test]
    fn parse_delete_refusal_keeps_server_text() {
        let response = HttpResponse {
            status: 400,
            headers: Vec::new(),
            body: r#"{"sucesso":false,"erro":"Não é possível deletar o livro. Existem 2 empréstimo(s) ativo(s)"}"#.to_string(),
        };
        let err = client().parse_delete(response).unwrap_err();
        assert_eq!(err.status(), 400);
        assert!(err.to_string().starts_with("Não é possível deletar"));
    }
}
