//! Client core for the biblioteca REST API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). A host adapter — the TUI
//! binary, or a test harness — executes the actual round-trip through the
//! [`Transport`] trait, keeping everything here deterministic and testable.
//!
//! # Design
//! - Resource clients ([`BooksClient`], [`LoansClient`]) are stateless —
//!   each holds only a `base_url` and splits every CRUD operation into
//!   `build_*` / `parse_*` pairs.
//! - Responses are interpreted through the backend's envelope
//!   (`{dados, mensagem}` on success, `{erro}` on failure) into
//!   `Result<ApiSuccess<T>, ApiError>`; callers branch, nothing panics.
//! - [`view`] turns collections into render-agnostic view models; [`controller`]
//!   drives the list/form flows behind injectable [`Transport`] and
//!   [`Notifier`] capabilities.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod books;
pub mod controller;
pub mod envelope;
pub mod error;
pub mod http;
pub mod loans;
pub mod notify;
pub mod status;
pub mod types;
pub mod view;

pub use books::BooksClient;
pub use controller::{check_status, BookDraft, BooksController, LoanDraft, LoansController};
pub use envelope::ApiSuccess;
pub use error::{ApiError, CONNECTION_ERROR_MESSAGE};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use loans::LoansClient;
pub use notify::{Notice, NoticeKind, Notifier, NOTICE_TTL};
pub use types::{Book, Loan, LoanStatus, LoanUpdate, NewBook, NewLoan, ServerStatus};
pub use view::{BookChoice, BookRow, ListView, LoanRow, SelectorView};
