//! List and form controllers.
//!
//! # Design
//! Controllers orchestrate one user action each: call the resource client
//! through an injected [`Transport`], fold the outcome into a view model or
//! a [`Notifier`] banner, and tell the caller which parts of the screen are
//! now stale. The record-being-edited is an explicit `Option<i64>` argument,
//! not shared state. Every failure is terminal for its action; nothing
//! retries.

use tracing::{debug, warn};

use crate::books::BooksClient;
use crate::error::ApiError;
use crate::http::Transport;
use crate::loans::LoansClient;
use crate::notify::Notifier;
use crate::status::{build_status, parse_status};
use crate::types::{LoanUpdate, NewBook, NewLoan, ServerStatus};
use crate::view::{self, BookRow, ListView, LoanRow, SelectorView};

/// Fixed message when loading a book into the edit form fails.
pub const EDIT_LOAD_ERROR_MESSAGE: &str = "Erro ao carregar dados do livro";

/// Fixed message after a successful loan return.
pub const LOAN_RETURNED_MESSAGE: &str = "Livro devolvido com sucesso!";

const FALLBACK_SUCCESS_MESSAGE: &str = "Operação realizada com sucesso";

/// Raw book-form fields, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub year: String,
    pub total_copies: String,
}

impl BookDraft {
    pub fn from_book(book: &crate::types::Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            year: book.year.to_string(),
            total_copies: book.total_copies.to_string(),
        }
    }

    /// Convert the typed fields into a request record. Always submits
    /// `available = total`, on update as well as create — the backend's
    /// availability is reset by every form submission, a quirk preserved
    /// from the original system.
    pub fn to_record(&self) -> Result<NewBook, String> {
        let year: i32 = self
            .year
            .trim()
            .parse()
            .map_err(|_| "Ano de publicação inválido".to_string())?;
        let total: u32 = self
            .total_copies
            .trim()
            .parse()
            .map_err(|_| "Quantidade total inválida".to_string())?;
        Ok(NewBook {
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            year,
            total_copies: total,
            available_copies: total,
        })
    }
}

/// Raw loan-form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoanDraft {
    pub borrower: String,
    pub book_id: Option<i64>,
}

impl LoanDraft {
    pub fn to_record(&self) -> Result<NewLoan, String> {
        let book_id = self
            .book_id
            .ok_or_else(|| "Selecione um livro para emprestar".to_string())?;
        Ok(NewLoan {
            borrower: self.borrower.trim().to_string(),
            book_id,
        })
    }
}

/// Controller for the book list and book form.
#[derive(Debug, Clone)]
pub struct BooksController {
    client: BooksClient,
}

impl BooksController {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: BooksClient::new(base_url),
        }
    }

    /// Fetch the collection and fold it into a list view.
    pub fn refresh(&self, transport: &dyn Transport) -> ListView<BookRow> {
        let result = transport
            .execute(self.client.build_list())
            .and_then(|response| self.client.parse_list(response));
        if let Err(err) = &result {
            warn!(error = %err, "book list refresh failed");
        }
        view::book_list_view(result)
    }

    /// Fetch one book for editing. On failure a fixed message is notified
    /// and the form is left untouched.
    pub fn load_for_edit(
        &self,
        transport: &dyn Transport,
        notifier: &mut dyn Notifier,
        id: i64,
    ) -> Option<BookDraft> {
        let result = transport
            .execute(self.client.build_get(id))
            .and_then(|response| self.client.parse_get(response));
        match result {
            Ok(ok) => Some(BookDraft::from_book(&ok.data)),
            Err(err) => {
                warn!(id, error = %err, "loading book for edit failed");
                notifier.error(EDIT_LOAD_ERROR_MESSAGE);
                None
            }
        }
    }

    /// Submit the form: create when `editing` is `None`, otherwise update
    /// that record. Returns `true` when the form should be cleared and the
    /// book list refreshed; on failure the form state is left untouched.
    pub fn submit(
        &self,
        transport: &dyn Transport,
        notifier: &mut dyn Notifier,
        draft: &BookDraft,
        editing: Option<i64>,
    ) -> bool {
        let record = match draft.to_record() {
            Ok(record) => record,
            Err(message) => {
                notifier.error(&message);
                return false;
            }
        };
        let built = match editing {
            Some(id) => self.client.build_update(id, &record),
            None => self.client.build_create(&record),
        };
        let result = built
            .and_then(|request| transport.execute(request))
            .and_then(|response| match editing {
                Some(_) => self.client.parse_update(response),
                None => self.client.parse_create(response),
            });
        match result {
            Ok(ok) => {
                debug!(id = ok.data.id, editing = ?editing, "book form submitted");
                notifier.success(ok.message.as_deref().unwrap_or(FALLBACK_SUCCESS_MESSAGE));
                true
            }
            Err(err) => {
                notifier.error(&err.to_string());
                false
            }
        }
    }

    /// Delete a book. Returns `true` when both the book table and the loan
    /// selector must be refreshed (availability figures may be stale).
    pub fn delete(&self, transport: &dyn Transport, notifier: &mut dyn Notifier, id: i64) -> bool {
        let result = transport
            .execute(self.client.build_delete(id))
            .and_then(|response| self.client.parse_delete(response));
        match result {
            Ok(ok) => {
                debug!(id, "book deleted");
                notifier.success(ok.message.as_deref().unwrap_or(FALLBACK_SUCCESS_MESSAGE));
                true
            }
            Err(err) => {
                notifier.error(&err.to_string());
                false
            }
        }
    }
}

/// Controller for the loan list, loan form, and the form's book selector.
#[derive(Debug, Clone)]
pub struct LoansController {
    loans: LoansClient,
    books: BooksClient,
}

impl LoansController {
    pub fn new(base_url: &str) -> Self {
        Self {
            loans: LoansClient::new(base_url),
            books: BooksClient::new(base_url),
        }
    }

    pub fn refresh(&self, transport: &dyn Transport) -> ListView<LoanRow> {
        let result = transport
            .execute(self.loans.build_list())
            .and_then(|response| self.loans.parse_list(response));
        if let Err(err) = &result {
            warn!(error = %err, "loan list refresh failed");
        }
        view::loan_list_view(result)
    }

    /// Refresh the loan-form book selector (books with available copies).
    pub fn selector(&self, transport: &dyn Transport) -> SelectorView {
        let result = transport
            .execute(self.books.build_list())
            .and_then(|response| self.books.parse_list(response));
        view::book_selector(result)
    }

    /// Submit the loan form. Returns `true` when the form should be reset
    /// and the loan list plus selector refreshed.
    pub fn submit(
        &self,
        transport: &dyn Transport,
        notifier: &mut dyn Notifier,
        draft: &LoanDraft,
    ) -> bool {
        let record = match draft.to_record() {
            Ok(record) => record,
            Err(message) => {
                notifier.error(&message);
                return false;
            }
        };
        let result = self
            .loans
            .build_create(&record)
            .and_then(|request| transport.execute(request))
            .and_then(|response| self.loans.parse_create(response));
        match result {
            Ok(ok) => {
                debug!(id = ok.data.id, book_id = record.book_id, "loan created");
                notifier.success(ok.message.as_deref().unwrap_or(FALLBACK_SUCCESS_MESSAGE));
                true
            }
            Err(err) => {
                notifier.error(&err.to_string());
                false
            }
        }
    }

    /// Flip an active loan to returned. Returns `true` when the loan list
    /// and the selector must be refreshed (availability increased).
    pub fn return_loan(
        &self,
        transport: &dyn Transport,
        notifier: &mut dyn Notifier,
        id: i64,
    ) -> bool {
        let result = self
            .loans
            .build_update(id, &LoanUpdate::returned())
            .and_then(|request| transport.execute(request))
            .and_then(|response| self.loans.parse_update(response));
        match result {
            Ok(_) => {
                debug!(id, "loan returned");
                notifier.success(LOAN_RETURNED_MESSAGE);
                true
            }
            Err(err) => {
                notifier.error(&err.to_string());
                false
            }
        }
    }

    /// Delete a loan. Returns `true` when the loan list and selector must
    /// be refreshed.
    pub fn delete(&self, transport: &dyn Transport, notifier: &mut dyn Notifier, id: i64) -> bool {
        let result = transport
            .execute(self.loans.build_delete(id))
            .and_then(|response| self.loans.parse_delete(response));
        match result {
            Ok(ok) => {
                debug!(id, "loan deleted");
                notifier.success(ok.message.as_deref().unwrap_or(FALLBACK_SUCCESS_MESSAGE));
                true
            }
            Err(err) => {
                notifier.error(&err.to_string());
                false
            }
        }
    }
}

/// Startup connectivity probe. The caller logs the outcome; it is never
/// surfaced as a banner.
pub fn check_status(transport: &dyn Transport, base_url: &str) -> Result<ServerStatus, ApiError> {
    let response = transport.execute(build_status(base_url))?;
    parse_status(response)
}
