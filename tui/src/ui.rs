//! Frame rendering. Reads the [`App`] state, never mutates it.

use biblioteca_core::{ListView, NoticeKind, SelectorView, Transport};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Row, Table, TableState, Tabs, Wrap};
use ratatui::Frame;

use crate::app::{App, Focus, PendingAction, Tab};

pub fn draw<T: Transport>(frame: &mut Frame, app: &App<T>) {
    let [header, banner, main, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_tabs(frame, app, header);
    draw_banner(frame, app, banner);
    match app.tab {
        Tab::Books => draw_books(frame, app, main),
        Tab::Loans => draw_loans(frame, app, main),
    }
    draw_footer(frame, app, footer);

    if let Some(pending) = &app.pending {
        draw_modal(frame, pending);
    }
}

fn draw_tabs<T: Transport>(frame: &mut Frame, app: &App<T>, area: Rect) {
    let selected = match app.tab {
        Tab::Books => 0,
        Tab::Loans => 1,
    };
    let tabs = Tabs::new(vec!["Livros", "Empréstimos"])
        .select(selected)
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    frame.render_widget(tabs, area);
}

fn draw_banner<T: Transport>(frame: &mut Frame, app: &App<T>, area: Rect) {
    let Some(notice) = app.banner.notice() else {
        return;
    };
    let style = match notice.kind {
        NoticeKind::Success => Style::default().fg(Color::Green),
        NoticeKind::Error => Style::default().fg(Color::Red),
    };
    frame.render_widget(Paragraph::new(notice.text.as_str()).style(style), area);
}

fn field_line<'a>(label: &'a str, value: &'a str, focused: bool) -> Line<'a> {
    let cursor = if focused { "_" } else { "" };
    let value_style = if focused {
        Style::default().add_modifier(Modifier::BOLD).fg(Color::Cyan)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::styled(label, Style::default().fg(Color::DarkGray)),
        Span::styled(format!("{value}{cursor}"), value_style),
    ])
}

fn draw_books<T: Transport>(frame: &mut Frame, app: &App<T>, area: Rect) {
    let [form_area, table_area] =
        Layout::vertical([Constraint::Length(6), Constraint::Min(0)]).areas(area);

    let title = match app.editing {
        Some(_) => "Editar Livro",
        None => "Cadastrar Novo Livro",
    };
    let focused = |index: usize| app.focus == Focus::Form(index);
    let form = Paragraph::new(vec![
        field_line("Título: ", &app.book_form.title, focused(0)),
        field_line("Autor: ", &app.book_form.author, focused(1)),
        field_line("Ano de Publicação: ", &app.book_form.year, focused(2)),
        field_line("Quantidade Total: ", &app.book_form.total_copies, focused(3)),
    ])
    .block(Block::bordered().title(title));
    frame.render_widget(form, form_area);

    match &app.book_list {
        ListView::Error(message) => draw_list_message(frame, message, Color::Red, table_area),
        ListView::Empty(message) => draw_list_message(frame, message, Color::DarkGray, table_area),
        ListView::Table(rows) => {
            let table_rows: Vec<Row> = rows
                .iter()
                .map(|row| {
                    let title = if row.unavailable {
                        format!("{} (Indisponível)", row.title)
                    } else {
                        row.title.clone()
                    };
                    Row::new(vec![
                        row.id.to_string(),
                        title,
                        row.author.clone(),
                        row.year.to_string(),
                        row.total_copies.to_string(),
                        row.available_copies.to_string(),
                    ])
                })
                .collect();
            let table = Table::new(
                table_rows,
                [
                    Constraint::Length(4),
                    Constraint::Fill(2),
                    Constraint::Fill(2),
                    Constraint::Length(6),
                    Constraint::Length(7),
                    Constraint::Length(12),
                ],
            )
            .header(
                Row::new(vec!["ID", "Título", "Autor", "Ano", "Total", "Disponíveis"])
                    .style(Style::default().add_modifier(Modifier::BOLD)),
            )
            .block(Block::bordered().title("Livros Cadastrados"))
            .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));
            let mut state = TableState::default().with_selected(Some(app.books_cursor));
            frame.render_stateful_widget(table, table_area, &mut state);
        }
    }
}

fn selector_text<T: Transport>(app: &App<T>) -> String {
    match &app.selector {
        SelectorView::Error(message) => message.clone(),
        SelectorView::NoBooks => "Nenhum livro cadastrado".to_string(),
        SelectorView::NoneAvailable => "Nenhum livro disponível no momento".to_string(),
        SelectorView::Choices(choices) => {
            let index = app.selector_index.min(choices.len() - 1);
            format!("< {} >", choices[index].label)
        }
    }
}

fn draw_loans<T: Transport>(frame: &mut Frame, app: &App<T>, area: Rect) {
    let [form_area, table_area] =
        Layout::vertical([Constraint::Length(4), Constraint::Min(0)]).areas(area);

    let selector_line = selector_text(app);
    let form = Paragraph::new(vec![
        field_line("Nome do Usuário: ", &app.borrower, app.focus == Focus::Form(0)),
        field_line("Livro: ", &selector_line, app.focus == Focus::Form(1)),
    ])
    .block(Block::bordered().title("Realizar Empréstimo"));
    frame.render_widget(form, form_area);

    match &app.loan_list {
        ListView::Error(message) => draw_list_message(frame, message, Color::Red, table_area),
        ListView::Empty(message) => draw_list_message(frame, message, Color::DarkGray, table_area),
        ListView::Table(rows) => {
            let table_rows: Vec<Row> = rows
                .iter()
                .map(|row| {
                    let status_style = if row.returnable {
                        Style::default().fg(Color::Yellow)
                    } else {
                        Style::default().fg(Color::Green)
                    };
                    Row::new(vec![
                        Span::raw(row.id.to_string()),
                        Span::raw(row.borrower.clone()),
                        Span::raw(row.book_title.clone()),
                        Span::raw(row.loan_date.clone()),
                        Span::raw(row.return_date.clone()),
                        Span::styled(row.status.label(), status_style),
                    ])
                })
                .collect();
            let table = Table::new(
                table_rows,
                [
                    Constraint::Length(4),
                    Constraint::Fill(2),
                    Constraint::Fill(2),
                    Constraint::Length(16),
                    Constraint::Length(16),
                    Constraint::Length(10),
                ],
            )
            .header(
                Row::new(vec![
                    "ID",
                    "Usuário",
                    "Livro",
                    "Data Empréstimo",
                    "Data Devolução",
                    "Status",
                ])
                .style(Style::default().add_modifier(Modifier::BOLD)),
            )
            .block(Block::bordered().title("Empréstimos"))
            .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));
            let mut state = TableState::default().with_selected(Some(app.loans_cursor));
            frame.render_stateful_widget(table, table_area, &mut state);
        }
    }
}

fn draw_list_message(frame: &mut Frame, message: &str, color: Color, area: Rect) {
    let paragraph = Paragraph::new(message)
        .style(Style::default().fg(color))
        .wrap(Wrap { trim: true })
        .block(Block::bordered());
    frame.render_widget(paragraph, area);
}

fn draw_footer<T: Transport>(frame: &mut Frame, app: &App<T>, area: Rect) {
    let hint = if app.pending.is_some() {
        "Enter/y confirmar | Esc/n cancelar"
    } else {
        match (app.focus, app.tab) {
            (Focus::Table, Tab::Books) => {
                "Tab formulário | ↑↓ selecionar | 1/2 abas | e editar | d deletar | q sair"
            }
            (Focus::Table, Tab::Loans) => {
                "Tab formulário | ↑↓ selecionar | 1/2 abas | r devolver | d deletar | q sair"
            }
            (Focus::Form(1), Tab::Loans) => "←→ escolher livro | Enter salvar | Esc limpar",
            (Focus::Form(_), _) => "Tab/↑↓ campos | Enter salvar | Esc limpar",
        }
    };
    frame.render_widget(
        Paragraph::new(hint).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

fn draw_modal(frame: &mut Frame, pending: &PendingAction) {
    let area = centered_rect(50, 5, frame.area());
    frame.render_widget(Clear, area);
    let text = vec![
        Line::from(pending.message()),
        Line::from(""),
        Line::from(Span::styled(
            "Esta ação não pode ser desfeita.",
            Style::default().fg(Color::Red),
        )),
    ];
    let modal = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(Block::bordered().title("Confirmação"));
    frame.render_widget(modal, area);
}

fn centered_rect(width_percent: u16, height: u16, area: Rect) -> Rect {
    let [_, middle, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(area);
    let [_, centered, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .areas(middle);
    centered
}
