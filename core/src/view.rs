//! Pure collection → view-model functions.
//!
//! # Design
//! Nothing here knows about a terminal, a DOM, or any other rendering
//! target. List responses are folded into [`ListView`] values, the loan-form
//! book selector into [`SelectorView`], and each adapter draws those however
//! it likes. All the display rules live here so they stay testable.

use crate::envelope::ApiSuccess;
use crate::error::ApiError;
use crate::types::{Book, Loan, LoanStatus};

/// Empty-state message for the book table.
pub const EMPTY_BOOKS_MESSAGE: &str =
    "📚 Nenhum livro cadastrado ainda. Cadastre o primeiro livro acima!";

/// Empty-state message for the loan table.
pub const EMPTY_LOANS_MESSAGE: &str =
    "📖 Nenhum empréstimo registrado ainda. Realize o primeiro empréstimo acima!";

/// Shown in place of the book title when the referenced book is gone.
pub const MISSING_BOOK_PLACEHOLDER: &str = "N/A";

/// Shown for absent dates.
pub const ABSENT_DATE_PLACEHOLDER: &str = "-";

/// Outcome of refreshing a collection: an error banner, the fixed
/// empty-state message, or table rows. Never an error *and* a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView<R> {
    Error(String),
    Empty(&'static str),
    Table(Vec<R>),
}

/// One row of the book table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRow {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub year: i32,
    pub total_copies: u32,
    pub available_copies: u32,
    /// Set when no copy is available; rendered as an "(Indisponível)" marker.
    pub unavailable: bool,
}

/// One row of the loan table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanRow {
    pub id: i64,
    pub borrower: String,
    pub book_title: String,
    pub loan_date: String,
    pub return_date: String,
    pub status: LoanStatus,
    /// The "Return" action is offered only while the loan is active.
    pub returnable: bool,
}

/// An entry of the loan-form book selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookChoice {
    pub id: i64,
    pub label: String,
}

/// State of the loan-form book selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorView {
    Error(String),
    /// No books registered at all.
    NoBooks,
    /// Books exist but none has an available copy.
    NoneAvailable,
    Choices(Vec<BookChoice>),
}

/// Format an ISO-like `YYYY-MM-DD` date as `DD/MM/YYYY`.
///
/// Empty input renders as the placeholder dash; anything that is not exactly
/// three hyphen-separated components passes through unchanged.
pub fn format_date(raw: &str) -> String {
    if raw.is_empty() {
        return ABSENT_DATE_PLACEHOLDER.to_string();
    }
    let parts: Vec<&str> = raw.split('-').collect();
    if parts.len() != 3 {
        return raw.to_string();
    }
    format!("{}/{}/{}", parts[2], parts[1], parts[0])
}

fn format_optional_date(raw: Option<&str>) -> String {
    match raw {
        Some(value) => format_date(value),
        None => ABSENT_DATE_PLACEHOLDER.to_string(),
    }
}

pub fn book_rows(books: &[Book]) -> Vec<BookRow> {
    books
        .iter()
        .map(|book| BookRow {
            id: book.id,
            title: book.title.clone(),
            author: book.author.clone(),
            year: book.year,
            total_copies: book.total_copies,
            available_copies: book.available_copies,
            unavailable: book.available_copies == 0,
        })
        .collect()
}

pub fn loan_rows(loans: &[Loan]) -> Vec<LoanRow> {
    loans
        .iter()
        .map(|loan| LoanRow {
            id: loan.id,
            borrower: loan.borrower.clone(),
            book_title: loan
                .book_title
                .clone()
                .unwrap_or_else(|| MISSING_BOOK_PLACEHOLDER.to_string()),
            loan_date: format_date(&loan.loan_date),
            return_date: format_optional_date(loan.return_date.as_deref()),
            status: loan.status,
            returnable: loan.status == LoanStatus::Active,
        })
        .collect()
}

pub fn book_list_view(result: Result<ApiSuccess<Vec<Book>>, ApiError>) -> ListView<BookRow> {
    match result {
        Err(err) => ListView::Error(err.to_string()),
        Ok(ok) if ok.data.is_empty() => ListView::Empty(EMPTY_BOOKS_MESSAGE),
        Ok(ok) => ListView::Table(book_rows(&ok.data)),
    }
}

pub fn loan_list_view(result: Result<ApiSuccess<Vec<Loan>>, ApiError>) -> ListView<LoanRow> {
    match result {
        Err(err) => ListView::Error(err.to_string()),
        Ok(ok) if ok.data.is_empty() => ListView::Empty(EMPTY_LOANS_MESSAGE),
        Ok(ok) => ListView::Table(loan_rows(&ok.data)),
    }
}

/// Fold a book listing into the loan-form selector: only books with an
/// available copy are offered.
pub fn book_selector(result: Result<ApiSuccess<Vec<Book>>, ApiError>) -> SelectorView {
    let books = match result {
        Err(err) => return SelectorView::Error(err.to_string()),
        Ok(ok) => ok.data,
    };
    if books.is_empty() {
        return SelectorView::NoBooks;
    }
    let choices: Vec<BookChoice> = books
        .iter()
        .filter(|book| book.available_copies > 0)
        .map(|book| BookChoice {
            id: book.id,
            label: format!(
                "{} - {} ({} disponível)",
                book.title, book.author, book.available_copies
            ),
        })
        .collect();
    if choices.is_empty() {
        return SelectorView::NoneAvailable;
    }
    SelectorView::Choices(choices)
}
