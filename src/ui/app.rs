use crate::admin::{self, QueryStatusFilter, StudentStatusFilter};
use crate::config::Config;
use crate::error::ViewerError;
use crate::export;
use crate::filters::FilterField;
use crate::models::QuestionRef;
use crate::orchestrator::ViewOrchestrator;
use crate::query::{self, QueryField, QueryForm, QuerySubmitter};
use crate::ui::render::render_ui;
use crate::ui::state::{AdminTab, AppEvent, Focus, Notice, Screen, UiState};
use crate::viewer::{
    self, DocumentSource, DocumentStatus, DocumentViewportController, LoadedDocument,
};
use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{info, warn};

pub const SUBMITTED_MESSAGE: &str = "Query Submitted Successfully! Your query has been sent to the \
     examination department. You will receive a response within 3-5 working days.";

pub struct App {
    pub(super) config: Config,
    pub(super) view: ViewOrchestrator,
    pub(super) viewer: DocumentViewportController,
    pub(super) document: Option<LoadedDocument>,
    pub(super) form: QueryForm,
    pub(super) ui: UiState,
    documents: Arc<dyn DocumentSource>,
    submitter: Arc<dyn QuerySubmitter>,
    events_tx: UnboundedSender<AppEvent>,
    events_rx: UnboundedReceiver<AppEvent>,
}

impl App {
    pub fn new(
        config: Config,
        view: ViewOrchestrator,
        documents: Arc<dyn DocumentSource>,
        submitter: Arc<dyn QuerySubmitter>,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            config,
            view,
            viewer: DocumentViewportController::new(),
            document: None,
            form: QueryForm::new(),
            ui: UiState::default(),
            documents,
            submitter,
            events_tx,
            events_rx,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        info!("portal started");

        // Main event loop
        let result = self.event_loop(&mut terminal).await;

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        info!("portal closed");
        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> Result<()> {
        loop {
            terminal.draw(|f| render_ui(f, self))?;

            if event::poll(std::time::Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == event::KeyEventKind::Press && self.handle_key_event(key) {
                        break;
                    }
                }
            }

            self.drain_events();

            // Small yield to let loads and submissions make progress
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }

        Ok(())
    }

    /// Apply every completed background task.
    pub(super) fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_app_event(event);
        }
    }

    fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::DocumentLoaded { url, result } => {
                // A load for a paper that is no longer on screen.
                if self.viewer.current_url() != Some(url.as_str())
                    || !matches!(self.viewer.status(), DocumentStatus::Loading { .. })
                {
                    return;
                }
                match result {
                    Ok(doc) => {
                        self.viewer.on_document_load(doc.num_pages);
                        self.document = Some(doc);
                    }
                    Err(e) => {
                        let reason = match e {
                            ViewerError::ResourceLoad { reason, .. } => reason,
                            other => other.to_string(),
                        };
                        let err = self.viewer.on_document_load_error(reason);
                        self.document = None;
                        let hint = if err.is_retryable() { " (press R to retry)" } else { "" };
                        self.ui.notice = Some(Notice::error(format!("{}{}", err, hint)));
                    }
                }
            }
            AppEvent::QuerySubmitted(outcome) => {
                self.form.complete_submission(outcome.clone());
                self.ui.notice = Some(match outcome {
                    Ok(()) => Notice::success(SUBMITTED_MESSAGE),
                    Err(e) if e.is_retryable() => {
                        Notice::error(format!("{} (press Enter to resubmit)", e))
                    }
                    Err(e) => Notice::error(e.to_string()),
                });
            }
        }
    }

    /// Handle one key press. Returns true when the user asked to quit.
    pub(super) fn handle_key_event(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }

        if self.form.is_open() {
            self.handle_dialog_key(key);
            return false;
        }

        match self.ui.screen {
            Screen::Admin => self.handle_admin_key(key),
            Screen::Portal => self.handle_portal_key(key),
        }
    }

    fn handle_portal_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('a') => {
                self.ui.screen = Screen::Admin;
                return false;
            }
            KeyCode::Tab => {
                self.ui.focus = if self.view.record().is_some() {
                    self.ui.focus.next()
                } else {
                    Focus::Filters
                };
                return false;
            }
            KeyCode::Esc => {
                if self.viewer.state().fullscreen {
                    self.viewer.toggle_fullscreen();
                } else {
                    self.ui.focus = Focus::Filters;
                }
                return false;
            }
            _ => {}
        }

        match self.ui.focus {
            Focus::Filters => self.handle_filter_key(key),
            Focus::Viewer => self.handle_viewer_key(key),
            Focus::Sidebar => self.handle_sidebar_key(key),
        }
        false
    }

    fn handle_filter_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.ui.filter_field = self.ui.filter_field.prev(),
            KeyCode::Down => self.ui.filter_field = self.ui.filter_field.next(),
            KeyCode::Left => self.cycle_filter(false),
            KeyCode::Right => self.cycle_filter(true),
            KeyCode::Backspace | KeyCode::Delete => self.set_filter(self.ui.filter_field, ""),
            KeyCode::Enter => self.search(),
            KeyCode::Char('r') => self.reset(),
            _ => {}
        }
    }

    fn handle_viewer_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('n') | KeyCode::Right | KeyCode::Down => self.viewer.next_page(),
            KeyCode::Char('p') | KeyCode::Left | KeyCode::Up => self.viewer.prev_page(),
            KeyCode::Char('+') | KeyCode::Char('=') => self.viewer.zoom_in(),
            KeyCode::Char('-') => self.viewer.zoom_out(),
            KeyCode::Char('o') => self.viewer.rotate(),
            KeyCode::Char('f') => self.viewer.toggle_fullscreen(),
            KeyCode::Char('v') => self.viewer.toggle_view_mode(),
            KeyCode::Char('R') => self.retry_document(),
            KeyCode::Char('d') => self.download_document(),
            KeyCode::Home => self.jump_to_page(1),
            KeyCode::End => self.jump_to_page(self.viewer.state().num_pages),
            KeyCode::Char(c) if c.is_ascii_digit() && c != '0' => {
                self.jump_to_page(c.to_digit(10).unwrap_or(1));
            }
            _ => {}
        }
    }

    fn jump_to_page(&mut self, page: u32) {
        if !self.viewer.go_to_page(page) && !self.viewer.can_jump() {
            self.ui.notice = Some(Notice::info(
                "Jump to page is only available in single page view (press v)",
            ));
        }
    }

    fn handle_sidebar_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('m') => self.ui.marks_open = !self.ui.marks_open,
            KeyCode::Char('e') => self.export_marks(),
            KeyCode::Char('c') | KeyCode::Enter => self.open_query_dialog(),
            _ => {}
        }
    }

    fn handle_dialog_key(&mut self, key: KeyEvent) {
        let field = self.ui.query_field;
        match key.code {
            KeyCode::Esc => match self.form.cancel() {
                Ok(()) => self.ui.query_field = QueryField::QueryType,
                Err(e) => self.ui.notice = Some(Notice::info(e.to_string())),
            },
            KeyCode::Tab | KeyCode::Down => self.ui.query_field = field.next(),
            KeyCode::BackTab | KeyCode::Up => self.ui.query_field = field.prev(),
            KeyCode::Enter => self.submit_query(),
            KeyCode::Left | KeyCode::Right => {
                let forward = key.code == KeyCode::Right;
                match field {
                    QueryField::QueryType => self.form.cycle_query_type(forward),
                    QueryField::Question => self.form.cycle_question(forward),
                    _ => {}
                }
            }
            KeyCode::Backspace if field.is_text() => self.form.pop_char(field),
            KeyCode::Char(c) if field.is_text() => self.form.push_char(field, c),
            KeyCode::Char('a') if field == QueryField::Question => {
                self.form.set_question(Some(QuestionRef::All));
            }
            _ => {}
        }
    }

    fn handle_admin_key(&mut self, key: KeyEvent) -> bool {
        let admin = &mut self.ui.admin;

        if admin.searching {
            match key.code {
                KeyCode::Esc | KeyCode::Enter => admin.searching = false,
                KeyCode::Backspace => {
                    admin.search.pop();
                    admin.selected_index = 0;
                }
                KeyCode::Char(c) => {
                    admin.search.push(c);
                    admin.selected_index = 0;
                }
                _ => {}
            }
            return false;
        }

        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('a') | KeyCode::Esc => self.ui.screen = Screen::Portal,
            KeyCode::Char('/') => admin.searching = true,
            KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                admin.tab = match admin.tab {
                    AdminTab::Students => AdminTab::Queries,
                    AdminTab::Queries => AdminTab::Students,
                };
                admin.selected_index = 0;
            }
            KeyCode::Char('s') => {
                match admin.tab {
                    AdminTab::Students => {
                        admin.student_status =
                            admin::cycle(&StudentStatusFilter::ALL, admin.student_status, true)
                    }
                    AdminTab::Queries => {
                        admin.query_status =
                            admin::cycle(&QueryStatusFilter::ALL, admin.query_status, true)
                    }
                }
                admin.selected_index = 0;
            }
            KeyCode::Enter if admin.tab == AdminTab::Students => self.view_result_paper(),
            KeyCode::Up => admin.selected_index = admin.selected_index.saturating_sub(1),
            KeyCode::Down => {
                let len = self.admin_row_count();
                let admin = &mut self.ui.admin;
                if admin.selected_index + 1 < len {
                    admin.selected_index += 1;
                }
            }
            _ => {}
        }
        false
    }

    fn admin_row_count(&self) -> usize {
        let catalog = self.view.catalog();
        let admin = &self.ui.admin;
        match admin.tab {
            AdminTab::Students => {
                admin::filter_results(&catalog.results, &admin.search, admin.student_status).len()
            }
            AdminTab::Queries => {
                admin::filter_queries(&catalog.queries, &admin.search, admin.query_status).len()
            }
        }
    }

    /// Open the selected roster row's paper in the portal viewer.
    fn view_result_paper(&mut self) {
        let admin = &self.ui.admin;
        let rows = admin::filter_results(
            &self.view.catalog().results,
            &admin.search,
            admin.student_status,
        );
        let Some(row) = rows.get(admin.selected_index) else {
            return;
        };
        let (student_id, subject_code) = (row.student_id.clone(), row.subject_code.clone());

        let template = &self.config.document_url;
        let url = self.view.open_result(&student_id, &subject_code).map(|record| {
            viewer::document_url(template, &record.roll_number, &record.subject_code)
        });

        self.ui.screen = Screen::Portal;
        match url {
            Some(url) => {
                info!(
                    student_id = %student_id,
                    subject_code = %subject_code,
                    "viewing paper from admin"
                );
                self.ui.notice = None;
                self.ui.focus = Focus::Viewer;
                self.start_document_load(url);
            }
            None => {
                self.close_document();
                self.ui.focus = Focus::Filters;
                self.ui.notice = Some(Notice::info(format!(
                    "No evaluated answer paper for student {} in {}",
                    student_id, subject_code
                )));
            }
        }
    }

    fn cycle_filter(&mut self, forward: bool) {
        let field = self.ui.filter_field;
        let options = self.view.options(field);
        if options.is_empty() {
            return;
        }
        let current = self.view.filters().get(field);
        let idx = options.iter().position(|o| o.value == current);
        let next = match (idx, forward) {
            (None, true) => 0,
            (None, false) => options.len() - 1,
            (Some(i), true) => (i + 1) % options.len(),
            (Some(i), false) => (i + options.len() - 1) % options.len(),
        };
        let value = options[next].value.clone();
        self.set_filter(field, &value);
    }

    fn set_filter(&mut self, field: FilterField, value: &str) {
        let had_record = self.view.record().is_some();
        self.view.set_filter(field, value);
        if had_record && self.view.record().is_none() {
            self.close_document();
            self.ui.focus = Focus::Filters;
        }
    }

    fn search(&mut self) {
        let template = &self.config.document_url;
        let outcome = self.view.search().map(|found| {
            found.map(|record| {
                viewer::document_url(template, &record.roll_number, &record.subject_code)
            })
        });

        let url = match outcome {
            Err(e) => {
                self.ui.notice = Some(Notice::error(e.to_string()));
                return;
            }
            Ok(None) => {
                self.close_document();
                self.ui.notice = Some(Notice::info(
                    "No evaluated answer paper matches these filters",
                ));
                return;
            }
            Ok(Some(url)) => url,
        };

        self.ui.notice = None;
        self.ui.focus = Focus::Viewer;
        self.start_document_load(url);
    }

    fn reset(&mut self) {
        self.view.reset();
        self.close_document();
        self.ui.focus = Focus::Filters;
        self.ui.filter_field = FilterField::Student;
        self.ui.notice = None;
    }

    fn close_document(&mut self) {
        self.viewer.unload();
        self.document = None;
    }

    fn start_document_load(&mut self, url: String) {
        if self.viewer.current_url() != Some(url.as_str()) {
            self.document = None;
        }
        self.viewer.load(&url);
        self.spawn_document_fetch(url);
    }

    fn retry_document(&mut self) {
        if let Some(url) = self.viewer.retry() {
            self.ui.notice = None;
            self.spawn_document_fetch(url);
        }
    }

    fn spawn_document_fetch(&self, url: String) {
        let documents = Arc::clone(&self.documents);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = viewer::load_document(documents.as_ref(), &url).await;
            let _ = tx.send(AppEvent::DocumentLoaded { url, result });
        });
    }

    fn download_document(&mut self) {
        let (Some(doc), Some(record)) = (&self.document, self.view.record()) else {
            self.ui.notice = Some(Notice::info("The answer paper has not finished loading"));
            return;
        };
        let saved =
            export::save_document(&doc.bytes, &record.document_title(), &self.config.download_dir);
        self.ui.notice = Some(match saved {
            Ok(path) => Notice::success(format!("Saved to {}", path.display())),
            Err(e) => {
                warn!(error = %e, "download failed");
                Notice::error(format!("{:#}", e))
            }
        });
    }

    fn export_marks(&mut self) {
        let Some(record) = self.view.record() else {
            return;
        };
        self.ui.notice = Some(match export::export_marks_csv(record, &self.config.download_dir) {
            Ok(path) => Notice::success(format!("Marks exported to {}", path.display())),
            Err(e) => {
                warn!(error = %e, "marks export failed");
                Notice::error(format!("{:#}", e))
            }
        });
    }

    fn open_query_dialog(&mut self) {
        if let Some(record) = self.view.record() {
            self.form.open(record);
            self.ui.query_field = QueryField::QueryType;
        }
    }

    fn submit_query(&mut self) {
        // The submit action is disabled while a submission is in flight.
        if !self.form.can_submit() {
            return;
        }

        let payload = match self.form.begin_submission() {
            Ok(payload) => payload,
            Err(e) => {
                self.ui.notice = Some(Notice::error(e.to_string()));
                return;
            }
        };

        self.ui.notice = Some(Notice::info("Submitting..."));
        let submitter = Arc::clone(&self.submitter);
        let timeout = self.config.submit_timeout;
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let outcome = query::deliver(submitter.as_ref(), &payload, timeout).await;
            let _ = tx.send(AppEvent::QuerySubmitted(outcome));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::models::{QueryPayload, QueryType};
    use crate::query::SubmissionState;
    use crate::resolver::ExamRecordResolver;
    use async_trait::async_trait;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    const SEVEN_PAGES: &[u8] = b"%PDF-1.4\n1 0 obj<</Type/Catalog/Pages 2 0 R>>endobj\n\
2 0 obj<</Type/Pages/Count 7>>endobj\ntrailer<</Root 1 0 R>>\n";

    struct FakeDocuments {
        fail: bool,
    }

    #[async_trait]
    impl DocumentSource for FakeDocuments {
        async fn fetch(&self, _url: &str) -> anyhow::Result<Vec<u8>> {
            if self.fail {
                anyhow::bail!("connection refused");
            }
            Ok(SEVEN_PAGES.to_vec())
        }
    }

    #[derive(Default)]
    struct FakeSubmitter {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl QuerySubmitter for FakeSubmitter {
        async fn submit(&self, _payload: &QueryPayload) -> anyhow::Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn config() -> Config {
        Config {
            document_url: "https://papers.example/{subject}/{roll}.pdf".to_string(),
            query_endpoint: None,
            query_token: None,
            outbox_path: PathBuf::from("unused.csv"),
            catalog_path: None,
            submit_timeout: Duration::from_secs(5),
            download_dir: std::env::temp_dir(),
            college_name: "National Institute of Technology".to_string(),
            log_path: PathBuf::from("unused.log"),
        }
    }

    fn app(fail_documents: bool, submitter: Arc<FakeSubmitter>) -> App {
        let view =
            ViewOrchestrator::new(ExamRecordResolver::from_catalog(Arc::new(Catalog::sample())));
        App::new(
            config(),
            view,
            Arc::new(FakeDocuments {
                fail: fail_documents,
            }),
            submitter,
        )
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
    }

    /// Select the first option of every filter: student 1, sem5, mid_sem, CS601, with_fee.
    fn fill_filters(app: &mut App) {
        for _ in FilterField::ALL {
            press(app, KeyCode::Right);
            press(app, KeyCode::Down);
        }
    }

    async fn settle(app: &mut App) {
        for _ in 0..50 {
            tokio::time::sleep(Duration::from_millis(5)).await;
            app.drain_events();
            let busy = matches!(app.viewer.status(), DocumentStatus::Loading { .. })
                || app.form.is_submitting();
            if !busy {
                break;
            }
        }
    }

    #[tokio::test]
    async fn test_search_loads_document() {
        let mut app = app(false, Arc::default());
        press(&mut app, KeyCode::Enter);
        assert!(app.view.record().is_none());
        assert!(app.ui.notice.is_some());

        fill_filters(&mut app);
        assert!(app.view.filters().is_complete());
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.ui.focus, Focus::Viewer);
        assert_eq!(
            app.viewer.current_url(),
            Some("https://papers.example/CS601/CS2021045.pdf")
        );

        settle(&mut app).await;
        assert!(app.viewer.status().is_ready());
        assert_eq!(app.viewer.state().num_pages, 7);

        press(&mut app, KeyCode::Char('7'));
        assert_eq!(app.viewer.state().page_number, 7);
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.viewer.state().page_number, 7);
    }

    #[tokio::test]
    async fn test_failed_document_can_be_retried() {
        let mut app = app(true, Arc::default());
        fill_filters(&mut app);
        press(&mut app, KeyCode::Enter);
        settle(&mut app).await;

        assert!(app.viewer.status().is_failed());
        assert!(app.view.record().is_some());

        press(&mut app, KeyCode::Char('R'));
        assert!(matches!(app.viewer.status(), DocumentStatus::Loading { .. }));
        settle(&mut app).await;
        assert!(app.viewer.status().is_failed());
    }

    #[tokio::test]
    async fn test_filter_change_closes_document() {
        let mut app = app(false, Arc::default());
        fill_filters(&mut app);
        press(&mut app, KeyCode::Enter);
        settle(&mut app).await;

        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Right);
        assert!(app.view.record().is_none());
        assert_eq!(app.viewer.status(), &DocumentStatus::Idle);
        assert!(app.document.is_none());
    }

    #[tokio::test]
    async fn test_query_dialog_submits_once() {
        let submitter = Arc::new(FakeSubmitter::default());
        let mut app = app(false, Arc::clone(&submitter));
        fill_filters(&mut app);
        press(&mut app, KeyCode::Enter);
        settle(&mut app).await;

        press(&mut app, KeyCode::Tab); // viewer -> sidebar
        press(&mut app, KeyCode::Char('c'));
        assert!(app.form.is_open());

        // Required fields missing: nothing is sent.
        press(&mut app, KeyCode::Enter);
        assert_eq!(submitter.calls.load(Ordering::SeqCst), 0);
        assert_eq!(app.form.state(), &SubmissionState::Idle);

        press(&mut app, KeyCode::Right);
        assert_eq!(app.form.query_type, Some(QueryType::MarksDiscrepancy));
        for _ in 0..4 {
            press(&mut app, KeyCode::Tab);
        }
        for c in "Q5 was under-marked".chars() {
            press(&mut app, KeyCode::Char(c));
        }

        press(&mut app, KeyCode::Enter);
        assert!(app.form.is_submitting());
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Esc);
        assert!(app.form.is_open());

        settle(&mut app).await;
        assert_eq!(submitter.calls.load(Ordering::SeqCst), 1);
        assert_eq!(app.form.state(), &SubmissionState::Succeeded);
        assert!(!app.form.is_open());
    }

    #[tokio::test]
    async fn test_reset_returns_to_welcome() {
        let mut app = app(false, Arc::default());
        fill_filters(&mut app);
        press(&mut app, KeyCode::Enter);
        settle(&mut app).await;

        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('r'));
        assert!(app.view.panels().welcome);
        assert_eq!(app.viewer.status(), &DocumentStatus::Idle);
    }

    #[tokio::test]
    async fn test_admin_screen_navigation() {
        let mut app = app(false, Arc::default());
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.ui.screen, Screen::Admin);

        press(&mut app, KeyCode::Char('/'));
        for c in "amit".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.ui.admin.search, "amit");
        assert_eq!(app.admin_row_count(), 1);

        press(&mut app, KeyCode::Right);
        assert_eq!(app.ui.admin.tab, AdminTab::Queries);
        assert_eq!(app.admin_row_count(), 1);

        assert!(press(&mut app, KeyCode::Char('q')));
    }

    #[tokio::test]
    async fn test_admin_roster_row_opens_paper() {
        let mut app = app(false, Arc::default());
        press(&mut app, KeyCode::Char('a'));
        for _ in 0..3 {
            press(&mut app, KeyCode::Down);
        }
        assert_eq!(app.ui.admin.selected_index, 3);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.ui.screen, Screen::Portal);
        assert_eq!(app.ui.focus, Focus::Viewer);
        let record = app.view.record().unwrap();
        assert_eq!(record.roll_number, "CS2021055");
        assert_eq!(record.subject_code, "CS602");
        assert_eq!(
            app.viewer.current_url(),
            Some("https://papers.example/CS602/CS2021055.pdf")
        );

        settle(&mut app).await;
        assert!(app.viewer.status().is_ready());
        assert!(app.document.is_some());

        // Enter on the queries tab does not leave the admin screen.
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.ui.screen, Screen::Admin);
    }

    #[tokio::test]
    async fn test_superseded_document_load_is_dropped() {
        let mut app = app(false, Arc::default());
        fill_filters(&mut app);
        press(&mut app, KeyCode::Enter);
        assert!(matches!(app.viewer.status(), DocumentStatus::Loading { .. }));

        // The filters change before the fetch reports back.
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Right);
        tokio::time::sleep(Duration::from_millis(50)).await;
        app.drain_events();
        assert_eq!(app.viewer.status(), &DocumentStatus::Idle);
        assert!(app.document.is_none());

        // A completion for an earlier paper while another one is loading.
        let earlier = "https://papers.example/CS601/CS2021045.pdf";
        let current = "https://papers.example/CS602/CS2021055.pdf";
        app.viewer.load(current);
        let sent = app.events_tx.send(AppEvent::DocumentLoaded {
            url: earlier.to_string(),
            result: Ok(LoadedDocument {
                url: earlier.to_string(),
                bytes: SEVEN_PAGES.to_vec(),
                num_pages: 7,
            }),
        });
        assert!(sent.is_ok());
        app.drain_events();
        assert_eq!(
            app.viewer.status(),
            &DocumentStatus::Loading {
                url: current.to_string()
            }
        );
        assert!(app.document.is_none());
    }

    #[tokio::test]
    async fn test_home_and_end_explain_continuous_view() {
        let mut app = app(false, Arc::default());
        fill_filters(&mut app);
        press(&mut app, KeyCode::Enter);
        settle(&mut app).await;

        press(&mut app, KeyCode::End);
        assert_eq!(app.viewer.state().page_number, 7);
        assert!(app.ui.notice.is_none());

        press(&mut app, KeyCode::Char('v'));
        press(&mut app, KeyCode::Home);
        assert_eq!(app.viewer.state().page_number, 7);
        let notice = app.ui.notice.take().unwrap();
        assert!(notice.message.contains("single page view"));

        press(&mut app, KeyCode::Char('p'));
        press(&mut app, KeyCode::End);
        assert_eq!(app.viewer.state().page_number, 6);
        assert!(app.ui.notice.is_some());
    }
}
