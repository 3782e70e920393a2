//! Stateless request builder and response parser for the `/emprestimos`
//! collection. Same build/parse split as [`crate::books::BooksClient`].

use crate::envelope::{self, ApiSuccess};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Loan, LoanUpdate, NewLoan};

/// Synchronous, stateless client for the loan endpoints.
#[derive(Debug, Clone)]
pub struct LoansClient {
    base_url: String,
}

impl LoansClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_list(&self) -> HttpRequest {
        HttpRequest::bare(HttpMethod::Get, format!("{}/emprestimos", self.base_url))
    }

    pub fn build_get(&self, id: i64) -> HttpRequest {
        HttpRequest::bare(
            HttpMethod::Get,
            format!("{}/emprestimos/{id}", self.base_url),
        )
    }

    pub fn build_create(&self, input: &NewLoan) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest::json(
            HttpMethod::Post,
            format!("{}/emprestimos", self.base_url),
            body,
        ))
    }

    pub fn build_update(&self, id: i64, input: &LoanUpdate) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest::json(
            HttpMethod::Put,
            format!("{}/emprestimos/{id}", self.base_url),
            body,
        ))
    }

    pub fn build_delete(&self, id: i64) -> HttpRequest {
        HttpRequest::bare(
            HttpMethod::Delete,
            format!("{}/emprestimos/{id}", self.base_url),
        )
    }

    pub fn parse_list(&self, response: HttpResponse) -> Result<ApiSuccess<Vec<Loan>>, ApiError> {
        envelope::parse_data(response)
    }

    pub fn parse_get(&self, response: HttpResponse) -> Result<ApiSuccess<Loan>, ApiError> {
        envelope::parse_data(response)
    }

    pub fn parse_create(&self, response: HttpResponse) -> Result<ApiSuccess<Loan>, ApiError> {
        envelope::parse_data(response)
    }

    pub fn parse_update(&self, response: HttpResponse) -> Result<ApiSuccess<Loan>, ApiError> {
        envelope::parse_data(response)
    }

    pub fn parse_delete(&self, response: HttpResponse) -> Result<ApiSuccess<()>, ApiError> {
        envelope::parse_ack(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LoanStatus;

    fn client() -> LoansClient {
        LoansClient::new("http://localhost:5000/api")
    }

    #[test]
    fn build_list_produces_correct_request() {
        let req = client().build_list();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:5000/api/emprestimos");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_create_produces_correct_request() {
        let input = NewLoan {
            borrower: "Ana".to_string(),
            book_id: 7,
        };
        let req = client().build_create(&input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:5000/api/emprestimos");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["nome_usuario"], "Ana");
        assert_eq!(body["livro_id"], 7);
    }

    #[test]
    fn build_return_update_sends_only_status() {
        let req = client().build_update(3, &LoanUpdate::returned()).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:5000/api/emprestimos/3");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["status"], "devolvido");
        assert!(body.get("nome_usuario").is_none());
    }

    #[test]
    fn build_delete_produces_correct_request() {
        let req = client().build_delete(3);
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:5000/api/emprestimos/3");
    }

    #[test]
    fn parse_list_success() {
        let response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: r#"{"sucesso":true,"dados":[{"id":1,"nome_usuario":"Ana","livro_id":7,"titulo_livro":"Dom Casmurro","status":"ativo","data_emprestimo":"2024-03-05","data_devolucao":null}],"total":1}"#.to_string(),
        };
        let ok = client().parse_list(response).unwrap();
        assert_eq!(ok.data.len(), 1);
        assert_eq!(ok.data[0].status, LoanStatus::Active);
    }

    #[test]
    fn parse_update_reflects_return() {
        let response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: r#"{"sucesso":true,"dados":{"id":1,"nome_usuario":"Ana","livro_id":7,"titulo_livro":"Dom Casmurro","status":"devolvido","data_emprestimo":"2024-03-05","data_devolucao":"2024-03-12"},"mensagem":"Empréstimo atualizado com sucesso"}"#.to_string(),
        };
        let ok = client().parse_update(response).unwrap();
        assert_eq!(ok.data.status, LoanStatus::Returned);
        assert_eq!(ok.data.return_date.as_deref(), Some("2024-03-12"));
    }

    #[test]
    fn parse_create_unavailable_book() {
        let response = HttpResponse {
            status: 400,
            headers: Vec::new(),
            body: r#"{"sucesso":false,"erro":"Livro indisponível para empréstimo"}"#.to_string(),
        };
        let err = client().parse_create(response).unwrap_err();
        assert_eq!(err.to_string(), "Livro indisponível para empréstimo");
    }
}
