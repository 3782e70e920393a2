//! Application state and key handling.
//!
//! # Design
//! The [`App`] owns the controllers from `biblioteca-core` plus everything a
//! frame needs to render: current tab, list views, form drafts, the banner
//! and the confirmation modal. Key events mutate state synchronously; the
//! HTTP round-trips block the event loop, which doubles as the guard against
//! duplicate submissions. Rendering lives in [`crate::ui`] and only reads.

use std::time::Instant;

use biblioteca_core::{
    check_status, BookDraft, BookRow, BooksController, ListView, LoanDraft, LoanRow,
    LoansController, Notice, NoticeKind, Notifier, SelectorView, Transport, NOTICE_TTL,
};
use biblioteca_core::view::{EMPTY_BOOKS_MESSAGE, EMPTY_LOANS_MESSAGE};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{info, warn};

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// One notice at a time, last call wins, expired after [`NOTICE_TTL`].
#[derive(Debug, Default)]
pub struct Banner {
    current: Option<(Notice, Instant)>,
}

impl Banner {
    pub fn notice(&self) -> Option<&Notice> {
        self.current.as_ref().map(|(notice, _)| notice)
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }

    pub fn tick_at(&mut self, now: Instant) {
        if let Some((_, shown_at)) = &self.current {
            if now.duration_since(*shown_at) >= NOTICE_TTL {
                self.current = None;
            }
        }
    }
}

impl Notifier for Banner {
    fn notify(&mut self, kind: NoticeKind, text: &str) {
        self.current = Some((
            Notice {
                kind,
                text: text.to_string(),
            },
            Instant::now(),
        ));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Books,
    Loans,
}

/// Where key input goes: one of the form fields, or the table below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Form(usize),
    Table,
}

/// A destructive action waiting for confirmation. Stored in a single slot,
/// so requesting a second confirmation replaces the first instead of
/// stacking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    DeleteBook(i64),
    DeleteLoan(i64),
}

impl PendingAction {
    pub fn message(&self) -> &'static str {
        match self {
            PendingAction::DeleteBook(_) => "Tem certeza que deseja deletar este livro?",
            PendingAction::DeleteLoan(_) => "Tem certeza que deseja deletar este empréstimo?",
        }
    }
}

pub struct App<T: Transport> {
    transport: T,
    base_url: String,
    books: BooksController,
    loans: LoansController,
    pub running: bool,
    pub tab: Tab,
    pub focus: Focus,
    pub banner: Banner,
    pub pending: Option<PendingAction>,
    pub book_list: ListView<BookRow>,
    pub loan_list: ListView<LoanRow>,
    pub selector: SelectorView,
    pub selector_index: usize,
    pub book_form: BookDraft,
    /// Id of the book being edited; `None` means the form creates.
    pub editing: Option<i64>,
    pub borrower: String,
    pub books_cursor: usize,
    pub loans_cursor: usize,
}

fn rows_len<R>(view: &ListView<R>) -> usize {
    match view {
        ListView::Table(rows) => rows.len(),
        _ => 0,
    }
}

impl<T: Transport> App<T> {
    pub fn new(transport: T, base_url: String) -> Self {
        Self {
            books: BooksController::new(&base_url),
            loans: LoansController::new(&base_url),
            transport,
            base_url,
            running: true,
            tab: Tab::Books,
            focus: Focus::Table,
            banner: Banner::default(),
            pending: None,
            book_list: ListView::Empty(EMPTY_BOOKS_MESSAGE),
            loan_list: ListView::Empty(EMPTY_LOANS_MESSAGE),
            selector: SelectorView::NoBooks,
            selector_index: 0,
            book_form: BookDraft::default(),
            editing: None,
            borrower: String::new(),
            books_cursor: 0,
            loans_cursor: 0,
        }
    }

    /// Probe the API and load both collections. The probe outcome is only
    /// logged, never shown as a banner.
    pub fn startup(&mut self) {
        match check_status(&self.transport, &self.base_url) {
            Ok(status) => {
                info!(status = %status.status, message = %status.mensagem, "status probe ok")
            }
            Err(err) => warn!(error = %err, "status probe failed"),
        }
        self.refresh_books();
        self.refresh_loans();
        self.refresh_selector();
    }

    pub fn tick(&mut self) {
        self.banner.tick_at(Instant::now());
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.running = false;
            return;
        }
        if self.pending.is_some() {
            self.on_modal_key(key.code);
            return;
        }
        match self.focus {
            Focus::Table => self.on_table_key(key.code),
            Focus::Form(field) => self.on_form_key(field, key.code),
        }
    }

    fn refresh_books(&mut self) {
        self.book_list = self.books.refresh(&self.transport);
        self.books_cursor = self
            .books_cursor
            .min(rows_len(&self.book_list).saturating_sub(1));
    }

    fn refresh_loans(&mut self) {
        self.loan_list = self.loans.refresh(&self.transport);
        self.loans_cursor = self
            .loans_cursor
            .min(rows_len(&self.loan_list).saturating_sub(1));
    }

    fn refresh_selector(&mut self) {
        self.selector = self.loans.selector(&self.transport);
        if let SelectorView::Choices(choices) = &self.selector {
            self.selector_index = self.selector_index.min(choices.len() - 1);
        } else {
            self.selector_index = 0;
        }
    }

    /// Switch tabs, re-fetching the freshly shown collection so stale
    /// availability figures never linger.
    pub fn switch_tab(&mut self, tab: Tab) {
        if self.tab == tab {
            return;
        }
        self.tab = tab;
        self.focus = Focus::Table;
        match tab {
            Tab::Books => self.refresh_books(),
            Tab::Loans => {
                self.refresh_loans();
                self.refresh_selector();
            }
        }
    }

    fn on_modal_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter | KeyCode::Char('y') => self.confirm_pending(),
            KeyCode::Esc | KeyCode::Char('n') => self.pending = None,
            _ => {}
        }
    }

    fn confirm_pending(&mut self) {
        match self.pending.take() {
            Some(PendingAction::DeleteBook(id)) => {
                if self.books.delete(&self.transport, &mut self.banner, id) {
                    self.refresh_books();
                    self.refresh_selector();
                }
            }
            Some(PendingAction::DeleteLoan(id)) => {
                if self.loans.delete(&self.transport, &mut self.banner, id) {
                    self.refresh_loans();
                    self.refresh_selector();
                }
            }
            None => {}
        }
    }

    fn on_table_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.running = false,
            KeyCode::Char('1') | KeyCode::Left => self.switch_tab(Tab::Books),
            KeyCode::Char('2') | KeyCode::Right => self.switch_tab(Tab::Loans),
            KeyCode::Tab => self.focus = Focus::Form(0),
            KeyCode::Up => self.move_cursor(-1),
            KeyCode::Down => self.move_cursor(1),
            KeyCode::Esc => self.banner.dismiss(),
            KeyCode::Char('e') if self.tab == Tab::Books => self.edit_selected(),
            KeyCode::Char('d') => self.delete_selected(),
            KeyCode::Char('r') if self.tab == Tab::Loans => self.return_selected(),
            _ => {}
        }
    }

    fn table_len(&self) -> usize {
        match self.tab {
            Tab::Books => rows_len(&self.book_list),
            Tab::Loans => rows_len(&self.loan_list),
        }
    }

    fn move_cursor(&mut self, delta: i64) {
        let len = self.table_len();
        if len == 0 {
            return;
        }
        let cursor = match self.tab {
            Tab::Books => &mut self.books_cursor,
            Tab::Loans => &mut self.loans_cursor,
        };
        let moved = (*cursor as i64 + delta).clamp(0, len as i64 - 1);
        *cursor = moved as usize;
    }

    fn selected_book_id(&self) -> Option<i64> {
        match &self.book_list {
            ListView::Table(rows) => rows.get(self.books_cursor).map(|row| row.id),
            _ => None,
        }
    }

    fn selected_loan(&self) -> Option<&LoanRow> {
        match &self.loan_list {
            ListView::Table(rows) => rows.get(self.loans_cursor),
            _ => None,
        }
    }

    fn edit_selected(&mut self) {
        let Some(id) = self.selected_book_id() else {
            return;
        };
        if let Some(draft) = self.books.load_for_edit(&self.transport, &mut self.banner, id) {
            self.book_form = draft;
            self.editing = Some(id);
            self.focus = Focus::Form(0);
        }
    }

    fn delete_selected(&mut self) {
        let action = match self.tab {
            Tab::Books => self.selected_book_id().map(PendingAction::DeleteBook),
            Tab::Loans => self.selected_loan().map(|row| PendingAction::DeleteLoan(row.id)),
        };
        if action.is_some() {
            self.pending = action;
        }
    }

    fn return_selected(&mut self) {
        let Some(row) = self.selected_loan() else {
            return;
        };
        if !row.returnable {
            return;
        }
        let id = row.id;
        if self.loans.return_loan(&self.transport, &mut self.banner, id) {
            self.refresh_loans();
            self.refresh_selector();
        }
    }

    fn form_len(&self) -> usize {
        match self.tab {
            Tab::Books => 4,
            Tab::Loans => 2,
        }
    }

    fn on_form_key(&mut self, field: usize, code: KeyCode) {
        match code {
            KeyCode::Enter => self.submit_form(),
            KeyCode::Esc => self.cancel_form(),
            KeyCode::Tab | KeyCode::Down => {
                let next = field + 1;
                self.focus = if next >= self.form_len() {
                    Focus::Table
                } else {
                    Focus::Form(next)
                };
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = if field == 0 {
                    Focus::Table
                } else {
                    Focus::Form(field - 1)
                };
            }
            KeyCode::Left if self.tab == Tab::Loans && field == 1 => self.cycle_selector(-1),
            KeyCode::Right if self.tab == Tab::Loans && field == 1 => self.cycle_selector(1),
            KeyCode::Char(c) => {
                if let Some(target) = self.field_mut(field) {
                    target.push(c);
                }
            }
            KeyCode::Backspace => {
                if let Some(target) = self.field_mut(field) {
                    target.pop();
                }
            }
            _ => {}
        }
    }

    fn field_mut(&mut self, field: usize) -> Option<&mut String> {
        match (self.tab, field) {
            (Tab::Books, 0) => Some(&mut self.book_form.title),
            (Tab::Books, 1) => Some(&mut self.book_form.author),
            (Tab::Books, 2) => Some(&mut self.book_form.year),
            (Tab::Books, 3) => Some(&mut self.book_form.total_copies),
            (Tab::Loans, 0) => Some(&mut self.borrower),
            _ => None,
        }
    }

    fn cancel_form(&mut self) {
        match self.tab {
            Tab::Books => {
                self.book_form = BookDraft::default();
                self.editing = None;
            }
            Tab::Loans => {
                self.borrower.clear();
                self.selector_index = 0;
            }
        }
        self.focus = Focus::Table;
    }

    fn submit_form(&mut self) {
        match self.tab {
            Tab::Books => {
                let draft = self.book_form.clone();
                if self
                    .books
                    .submit(&self.transport, &mut self.banner, &draft, self.editing)
                {
                    self.book_form = BookDraft::default();
                    self.editing = None;
                    self.refresh_books();
                    self.refresh_selector();
                    self.focus = Focus::Table;
                }
            }
            Tab::Loans => {
                let draft = LoanDraft {
                    borrower: self.borrower.clone(),
                    book_id: self.selected_choice(),
                };
                if self.loans.submit(&self.transport, &mut self.banner, &draft) {
                    self.borrower.clear();
                    self.selector_index = 0;
                    self.refresh_loans();
                    self.refresh_selector();
                    self.focus = Focus::Table;
                }
            }
        }
    }

    /// Id of the book currently highlighted in the selector, if any.
    pub fn selected_choice(&self) -> Option<i64> {
        match &self.selector {
            SelectorView::Choices(choices) if !choices.is_empty() => {
                Some(choices[self.selector_index.min(choices.len() - 1)].id)
            }
            _ => None,
        }
    }

    fn cycle_selector(&mut self, delta: i64) {
        let len = match &self.selector {
            SelectorView::Choices(choices) => choices.len(),
            _ => return,
        };
        let current = self.selector_index.min(len - 1) as i64;
        self.selector_index = (current + delta).rem_euclid(len as i64) as usize;
    }
}
