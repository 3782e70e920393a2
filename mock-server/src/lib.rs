//! In-memory re-implementation of the biblioteca backend.
//!
//! Mirrors the original API's routes, validation order, envelope shapes and
//! Portuguese messages: success bodies are `{"sucesso": true, "dados": ...,
//! "mensagem": ...}`, failures `{"sucesso": false, "erro": ...}`. Create and
//! update handlers take raw JSON so field-level validation (missing/empty
//! fields, quantity bounds) can reproduce the original messages exactly.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub titulo: String,
    pub autor: String,
    pub ano_publicacao: i64,
    pub quantidade_total: i64,
    pub quantidade_disponivel: i64,
}

#[derive(Clone, Debug)]
pub struct Loan {
    pub id: i64,
    pub nome_usuario: String,
    pub livro_id: i64,
    pub status: String,
    pub data_emprestimo: String,
    pub data_devolucao: Option<String>,
}

#[derive(Default)]
pub struct Db {
    books: HashMap<i64, Book>,
    loans: HashMap<i64, Loan>,
    next_book_id: i64,
    next_loan_id: i64,
}

pub type SharedDb = Arc<RwLock<Db>>;

pub fn app() -> Router {
    let db: SharedDb = Arc::new(RwLock::new(Db::default()));
    Router::new()
        .route("/api/livros", get(list_books).post(create_book))
        .route(
            "/api/livros/{id}",
            get(get_book).put(update_book).delete(delete_book),
        )
        .route("/api/emprestimos", get(list_loans).post(create_loan))
        .route(
            "/api/emprestimos/{id}",
            get(get_loan).put(update_loan).delete(delete_loan),
        )
        .route("/api/status", get(status))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn failure(status: StatusCode, erro: impl Into<String>) -> (StatusCode, Json<Value>) {
    (
        status,
        Json(json!({ "sucesso": false, "erro": erro.into() })),
    )
}

/// The loan dictionary as serialized by the backend: the book title is
/// joined at serialization time, `null` when the book no longer exists.
fn loan_json(db: &Db, loan: &Loan) -> Value {
    json!({
        "id": loan.id,
        "nome_usuario": loan.nome_usuario,
        "livro_id": loan.livro_id,
        "titulo_livro": db.books.get(&loan.livro_id).map(|b| b.titulo.clone()),
        "status": loan.status,
        "data_emprestimo": loan.data_emprestimo,
        "data_devolucao": loan.data_devolucao,
    })
}

fn today() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}

/// A required text field: present and non-empty.
fn text_field(dados: &Value, key: &str) -> Option<String> {
    dados
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn int_field(dados: &Value, key: &str) -> Option<i64> {
    dados.get(key).and_then(Value::as_i64)
}

fn no_data(dados: &Value) -> bool {
    dados.as_object().is_none_or(|o| o.is_empty())
}

// --- status ---

async fn status() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "online", "mensagem": "API funcionando corretamente" })),
    )
}

// --- livros ---

async fn list_books(State(db): State<SharedDb>) -> (StatusCode, Json<Value>) {
    let db = db.read().await;
    let mut books: Vec<&Book> = db.books.values().collect();
    books.sort_by_key(|b| b.id);
    (
        StatusCode::OK,
        Json(json!({ "sucesso": true, "dados": books, "total": books.len() })),
    )
}

async fn get_book(State(db): State<SharedDb>, Path(id): Path<i64>) -> (StatusCode, Json<Value>) {
    let db = db.read().await;
    match db.books.get(&id) {
        Some(book) => (
            StatusCode::OK,
            Json(json!({ "sucesso": true, "dados": book })),
        ),
        None => failure(StatusCode::NOT_FOUND, "Livro não encontrado"),
    }
}

async fn create_book(
    State(db): State<SharedDb>,
    Json(dados): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if no_data(&dados) {
        return failure(StatusCode::BAD_REQUEST, "Nenhum dado foi enviado");
    }
    let Some(titulo) = text_field(&dados, "titulo") else {
        return failure(StatusCode::BAD_REQUEST, "O campo \"titulo\" é obrigatório");
    };
    let Some(autor) = text_field(&dados, "autor") else {
        return failure(StatusCode::BAD_REQUEST, "O campo \"autor\" é obrigatório");
    };
    let Some(ano_publicacao) = int_field(&dados, "ano_publicacao") else {
        return failure(
            StatusCode::BAD_REQUEST,
            "O campo \"ano_publicacao\" é obrigatório",
        );
    };

    let quantidade_total = int_field(&dados, "quantidade_total").unwrap_or(0);
    let quantidade_disponivel =
        int_field(&dados, "quantidade_disponivel").unwrap_or(quantidade_total);

    if quantidade_total < 0 {
        return failure(
            StatusCode::BAD_REQUEST,
            "A quantidade total não pode ser negativa",
        );
    }
    if quantidade_disponivel > quantidade_total {
        return failure(
            StatusCode::BAD_REQUEST,
            "A quantidade disponível não pode ser maior que a quantidade total",
        );
    }

    let mut db = db.write().await;
    db.next_book_id += 1;
    let book = Book {
        id: db.next_book_id,
        titulo,
        autor,
        ano_publicacao,
        quantidade_total,
        quantidade_disponivel,
    };
    db.books.insert(book.id, book.clone());
    (
        StatusCode::CREATED,
        Json(json!({
            "sucesso": true,
            "dados": book,
            "mensagem": "Livro cadastrado com sucesso"
        })),
    )
}

async fn update_book(
    State(db): State<SharedDb>,
    Path(id): Path<i64>,
    Json(dados): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut db = db.write().await;
    if !db.books.contains_key(&id) {
        return failure(StatusCode::NOT_FOUND, "Livro não encontrado");
    }
    if no_data(&dados) {
        return failure(StatusCode::BAD_REQUEST, "Nenhum dado foi enviado");
    }

    // Validate quantities against the updated total before committing.
    let book = db.books.get(&id).expect("checked above");
    let new_total = match int_field(&dados, "quantidade_total") {
        Some(total) if total < 0 => {
            return failure(
                StatusCode::BAD_REQUEST,
                "A quantidade total não pode ser negativa",
            );
        }
        Some(total) => total,
        None => book.quantidade_total,
    };
    if let Some(disponivel) = int_field(&dados, "quantidade_disponivel") {
        if disponivel > new_total {
            return failure(
                StatusCode::BAD_REQUEST,
                "A quantidade disponível não pode ser maior que a quantidade total",
            );
        }
    }

    let book = db.books.get_mut(&id).expect("checked above");
    if let Some(titulo) = text_field(&dados, "titulo") {
        book.titulo = titulo;
    }
    if let Some(autor) = text_field(&dados, "autor") {
        book.autor = autor;
    }
    if let Some(ano) = int_field(&dados, "ano_publicacao") {
        book.ano_publicacao = ano;
    }
    book.quantidade_total = new_total;
    if let Some(disponivel) = int_field(&dados, "quantidade_disponivel") {
        book.quantidade_disponivel = disponivel;
    }

    let book = book.clone();
    (
        StatusCode::OK,
        Json(json!({
            "sucesso": true,
            "dados": book,
            "mensagem": "Livro atualizado com sucesso"
        })),
    )
}

async fn delete_book(State(db): State<SharedDb>, Path(id): Path<i64>) -> (StatusCode, Json<Value>) {
    let mut db = db.write().await;
    if !db.books.contains_key(&id) {
        return failure(StatusCode::NOT_FOUND, "Livro não encontrado");
    }

    let active = db
        .loans
        .values()
        .filter(|l| l.livro_id == id && l.status == "ativo")
        .count();
    if active > 0 {
        return failure(
            StatusCode::BAD_REQUEST,
            format!("Não é possível deletar o livro. Existem {active} empréstimo(s) ativo(s)"),
        );
    }

    // Cascade: the original schema deletes a book's loans with the book.
    db.loans.retain(|_, l| l.livro_id != id);
    db.books.remove(&id);
    (
        StatusCode::OK,
        Json(json!({ "sucesso": true, "mensagem": "Livro deletado com sucesso" })),
    )
}

// --- emprestimos ---

async fn list_loans(State(db): State<SharedDb>) -> (StatusCode, Json<Value>) {
    let db = db.read().await;
    let mut loans: Vec<&Loan> = db.loans.values().collect();
    loans.sort_by_key(|l| l.id);
    let dados: Vec<Value> = loans.iter().map(|l| loan_json(&db, l)).collect();
    (
        StatusCode::OK,
        Json(json!({ "sucesso": true, "dados": dados, "total": dados.len() })),
    )
}

async fn get_loan(State(db): State<SharedDb>, Path(id): Path<i64>) -> (StatusCode, Json<Value>) {
    let db = db.read().await;
    match db.loans.get(&id) {
        Some(loan) => (
            StatusCode::OK,
            Json(json!({ "sucesso": true, "dados": loan_json(&db, loan) })),
        ),
        None => failure(StatusCode::NOT_FOUND, "Empréstimo não encontrado"),
    }
}

async fn create_loan(
    State(db): State<SharedDb>,
    Json(dados): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if no_data(&dados) {
        return failure(StatusCode::BAD_REQUEST, "Nenhum dado foi enviado");
    }
    let Some(nome_usuario) = text_field(&dados, "nome_usuario") else {
        return failure(
            StatusCode::BAD_REQUEST,
            "O campo \"nome_usuario\" é obrigatório",
        );
    };
    let Some(livro_id) = int_field(&dados, "livro_id") else {
        return failure(
            StatusCode::BAD_REQUEST,
            "O campo \"livro_id\" é obrigatório",
        );
    };

    let mut db = db.write().await;
    let Some(book) = db.books.get(&livro_id) else {
        return failure(StatusCode::NOT_FOUND, "Livro não encontrado");
    };
    if book.quantidade_disponivel <= 0 {
        return failure(StatusCode::BAD_REQUEST, "Livro indisponível para empréstimo");
    }

    db.next_loan_id += 1;
    let loan = Loan {
        id: db.next_loan_id,
        nome_usuario,
        livro_id,
        status: "ativo".to_string(),
        data_emprestimo: today(),
        data_devolucao: None,
    };
    db.books
        .get_mut(&livro_id)
        .expect("checked above")
        .quantidade_disponivel -= 1;
    db.loans.insert(loan.id, loan.clone());

    let dados = loan_json(&db, &loan);
    (
        StatusCode::CREATED,
        Json(json!({
            "sucesso": true,
            "dados": dados,
            "mensagem": "Empréstimo realizado com sucesso"
        })),
    )
}

async fn update_loan(
    State(db): State<SharedDb>,
    Path(id): Path<i64>,
    Json(dados): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut db = db.write().await;
    let Some(loan) = db.loans.get(&id) else {
        return failure(StatusCode::NOT_FOUND, "Empréstimo não encontrado");
    };
    if no_data(&dados) {
        return failure(StatusCode::BAD_REQUEST, "Nenhum dado foi enviado");
    }

    let status_anterior = loan.status.clone();
    let livro_id = loan.livro_id;

    if let Some(novo_status) = dados.get("status").and_then(Value::as_str) {
        if novo_status != "ativo" && novo_status != "devolvido" {
            return failure(
                StatusCode::BAD_REQUEST,
                "Status inválido. Use \"ativo\" ou \"devolvido\"",
            );
        }
        // Reactivation needs an available copy back out of the shelf.
        if status_anterior == "devolvido" && novo_status == "ativo" {
            match db.books.get(&livro_id) {
                Some(book) if book.quantidade_disponivel <= 0 => {
                    return failure(
                        StatusCode::BAD_REQUEST,
                        "Não há exemplares disponíveis para reativar o empréstimo",
                    );
                }
                _ => {}
            }
        }
    }

    if let Some(nome) = dados.get("nome_usuario").and_then(Value::as_str) {
        let loan = db.loans.get_mut(&id).expect("checked above");
        loan.nome_usuario = nome.to_string();
    }

    if let Some(novo_status) = dados
        .get("status")
        .and_then(Value::as_str)
        .map(str::to_string)
    {
        let loan = db.loans.get_mut(&id).expect("checked above");
        loan.status = novo_status.clone();
        if status_anterior == "ativo" && novo_status == "devolvido" {
            if let Some(book) = db.books.get_mut(&livro_id) {
                book.quantidade_disponivel += 1;
                let loan = db.loans.get_mut(&id).expect("checked above");
                loan.data_devolucao = Some(today());
            }
        } else if status_anterior == "devolvido" && novo_status == "ativo" {
            if let Some(book) = db.books.get_mut(&livro_id) {
                book.quantidade_disponivel -= 1;
                let loan = db.loans.get_mut(&id).expect("checked above");
                loan.data_devolucao = None;
            }
        }
    }

    let loan = db.loans.get(&id).expect("checked above").clone();
    let dados = loan_json(&db, &loan);
    (
        StatusCode::OK,
        Json(json!({
            "sucesso": true,
            "dados": dados,
            "mensagem": "Empréstimo atualizado com sucesso"
        })),
    )
}

async fn delete_loan(State(db): State<SharedDb>, Path(id): Path<i64>) -> (StatusCode, Json<Value>) {
    let mut db = db.write().await;
    let Some(loan) = db.loans.get(&id).cloned() else {
        return failure(StatusCode::NOT_FOUND, "Empréstimo não encontrado");
    };

    // Deleting an active loan puts the copy back on the shelf.
    if loan.status == "ativo" {
        if let Some(book) = db.books.get_mut(&loan.livro_id) {
            book.quantidade_disponivel += 1;
        }
    }
    db.loans.remove(&id);
    (
        StatusCode::OK,
        Json(json!({ "sucesso": true, "mensagem": "Empréstimo deletado com sucesso" })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn book_serializes_with_wire_field_names() {
        let book = Book {
            id: 1,
            titulo: "Dom Casmurro".to_string(),
            autor: "Machado de Assis".to_string(),
            ano_publicacao: 1899,
            quantidade_total: 3,
            quantidade_disponivel: 2,
        };
        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(json["titulo"], "Dom Casmurro");
        assert_eq!(json["quantidade_disponivel"], 2);
    }

    #[test]
    fn loan_json_joins_book_title() {
        let mut db = Db::default();
        db.books.insert(
            7,
            Book {
                id: 7,
                titulo: "Dom Casmurro".to_string(),
                autor: "Machado de Assis".to_string(),
                ano_publicacao: 1899,
                quantidade_total: 3,
                quantidade_disponivel: 2,
            },
        );
        let loan = Loan {
            id: 1,
            nome_usuario: "Ana".to_string(),
            livro_id: 7,
            status: "ativo".to_string(),
            data_emprestimo: "2024-03-05".to_string(),
            data_devolucao: None,
        };
        let json = loan_json(&db, &loan);
        assert_eq!(json["titulo_livro"], "Dom Casmurro");
        assert_eq!(json["data_devolucao"], Value::Null);
    }

    #[test]
    fn loan_json_without_book_has_null_title() {
        let db = Db::default();
        let loan = Loan {
            id: 1,
            nome_usuario: "Ana".to_string(),
            livro_id: 99,
            status: "ativo".to_string(),
            data_emprestimo: "2024-03-05".to_string(),
            data_devolucao: None,
        };
        assert_eq!(loan_json(&db, &loan)["titulo_livro"], Value::Null);
    }

    #[test]
    fn text_field_rejects_empty_strings() {
        let dados = json!({ "titulo": "", "autor": "Alguém" });
        assert!(text_field(&dados, "titulo").is_none());
        assert_eq!(text_field(&dados, "autor").as_deref(), Some("Alguém"));
        assert!(text_field(&dados, "ausente").is_none());
    }

    #[test]
    fn no_data_detects_empty_payloads() {
        assert!(no_data(&json!({})));
        assert!(no_data(&Value::Null));
        assert!(!no_data(&json!({ "titulo": "x" })));
    }

    #[test]
    fn today_is_iso_formatted() {
        let date = today();
        let parts: Vec<&str> = date.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].len(), 4);
    }
}
