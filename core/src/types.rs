//! Domain DTOs for the biblioteca API.
//!
//! # Design
//! Field names are English on the Rust side with serde renames pinned to the
//! backend's Portuguese wire names. The types are defined independently from
//! the mock-server crate; integration tests catch any schema drift. Loan
//! dates stay `String`: display formatting must pass malformed values through
//! unchanged, which a parsed date type could not represent.

use serde::{Deserialize, Serialize};

/// A book as returned by `/livros`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Book {
    pub id: i64,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "autor")]
    pub author: String,
    #[serde(rename = "ano_publicacao")]
    pub year: i32,
    #[serde(rename = "quantidade_total")]
    pub total_copies: u32,
    #[serde(rename = "quantidade_disponivel")]
    pub available_copies: u32,
}

/// Loan lifecycle status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LoanStatus {
    #[serde(rename = "ativo")]
    Active,
    #[serde(rename = "devolvido")]
    Returned,
}

impl LoanStatus {
    /// Badge text shown in the loan table.
    pub fn label(self) -> &'static str {
        match self {
            LoanStatus::Active => "Ativo",
            LoanStatus::Returned => "Devolvido",
        }
    }
}

/// A loan as returned by `/emprestimos`. `book_title` is joined by the
/// server at serialization time and may be absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Loan {
    pub id: i64,
    #[serde(rename = "nome_usuario")]
    pub borrower: String,
    #[serde(rename = "livro_id")]
    pub book_id: i64,
    #[serde(rename = "titulo_livro")]
    pub book_title: Option<String>,
    pub status: LoanStatus,
    #[serde(rename = "data_emprestimo")]
    pub loan_date: String,
    #[serde(rename = "data_devolucao")]
    pub return_date: Option<String>,
}

/// Request payload for creating or updating a book. The form always submits
/// `available_copies = total_copies`, on update as well as create.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBook {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "autor")]
    pub author: String,
    #[serde(rename = "ano_publicacao")]
    pub year: i32,
    #[serde(rename = "quantidade_total")]
    pub total_copies: u32,
    #[serde(rename = "quantidade_disponivel")]
    pub available_copies: u32,
}

/// Request payload for creating a loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLoan {
    #[serde(rename = "nome_usuario")]
    pub borrower: String,
    #[serde(rename = "livro_id")]
    pub book_id: i64,
}

/// Partial update for a loan. Only the fields present in the JSON are
/// applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoanUpdate {
    #[serde(rename = "nome_usuario", skip_serializing_if = "Option::is_none")]
    pub borrower: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<LoanStatus>,
}

impl LoanUpdate {
    /// The "return this loan" update.
    pub fn returned() -> Self {
        Self {
            borrower: None,
            status: Some(LoanStatus::Returned),
        }
    }
}

/// Liveness probe payload from `GET /status`.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerStatus {
    pub status: String,
    pub mensagem: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn book_deserializes_from_wire_names() {
        let json = r#"{
            "id": 7,
            "titulo": "Dom Casmurro",
            "autor": "Machado de Assis",
            "ano_publicacao": 1899,
            "quantidade_total": 3,
            "quantidade_disponivel": 2
        }"#;
        let book: Book = serde_json::from_str(json).unwrap();
        assert_eq!(book.id, 7);
        assert_eq!(book.title, "Dom Casmurro");
        assert_eq!(book.available_copies, 2);
    }

    #[test]
    fn loan_status_uses_portuguese_wire_values() {
        let loan: Loan = serde_json::from_str(
            r#"{
                "id": 1,
                "nome_usuario": "Ana",
                "livro_id": 7,
                "titulo_livro": "Dom Casmurro",
                "status": "devolvido",
                "data_emprestimo": "2024-03-05",
                "data_devolucao": "2024-03-12"
            }"#,
        )
        .unwrap();
        assert_eq!(loan.status, LoanStatus::Returned);
        assert_eq!(loan.return_date.as_deref(), Some("2024-03-12"));
    }

    #[test]
    fn loan_tolerates_missing_book_title() {
        let loan: Loan = serde_json::from_str(
            r#"{
                "id": 2,
                "nome_usuario": "Bia",
                "livro_id": 99,
                "titulo_livro": null,
                "status": "ativo",
                "data_emprestimo": "2024-03-05",
                "data_devolucao": null
            }"#,
        )
        .unwrap();
        assert!(loan.book_title.is_none());
        assert!(loan.return_date.is_none());
    }

    #[test]
    fn new_book_serializes_to_wire_names() {
        let input = NewBook {
            title: "Quincas Borba".to_string(),
            author: "Machado de Assis".to_string(),
            year: 1891,
            total_copies: 4,
            available_copies: 4,
        };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["titulo"], "Quincas Borba");
        assert_eq!(json["ano_publicacao"], 1891);
        assert_eq!(json["quantidade_disponivel"], 4);
    }

    #[test]
    fn return_update_serializes_only_status() {
        let json = serde_json::to_value(LoanUpdate::returned()).unwrap();
        assert_eq!(json["status"], "devolvido");
        assert!(json.get("nome_usuario").is_none());
    }
}
