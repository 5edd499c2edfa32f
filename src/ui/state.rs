use crate::admin::{QueryStatusFilter, StudentStatusFilter};
use crate::error::ViewerError;
use crate::filters::FilterField;
use crate::query::QueryField;
use crate::viewer::LoadedDocument;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Portal,
    Admin,
}

/// Which portal area receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Filters,
    Viewer,
    Sidebar,
}

impl Focus {
    pub fn next(&self) -> Self {
        match self {
            Focus::Filters => Focus::Viewer,
            Focus::Viewer => Focus::Sidebar,
            Focus::Sidebar => Focus::Filters,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminTab {
    Students,
    Queries,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminState {
    pub tab: AdminTab,
    pub search: String,
    pub searching: bool,
    pub student_status: StudentStatusFilter,
    pub query_status: QueryStatusFilter,
    pub selected_index: usize,
}

impl Default for AdminState {
    fn default() -> Self {
        Self {
            tab: AdminTab::Students,
            search: String::new(),
            searching: false,
            student_status: StudentStatusFilter::All,
            query_status: QueryStatusFilter::All,
            selected_index: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

/// One-line message shown in the status bar until the next one replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// Presentation state that is not owned by any of the domain controllers.
#[derive(Debug, Clone)]
pub struct UiState {
    pub screen: Screen,
    pub focus: Focus,
    pub filter_field: FilterField,
    pub marks_open: bool,
    pub query_field: QueryField,
    pub notice: Option<Notice>,
    pub admin: AdminState,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            screen: Screen::Portal,
            focus: Focus::Filters,
            filter_field: FilterField::Student,
            marks_open: true,
            query_field: QueryField::QueryType,
            notice: None,
            admin: AdminState::default(),
        }
    }
}

/// Completions delivered from background tasks to the event loop.
#[derive(Debug)]
pub enum AppEvent {
    DocumentLoaded {
        url: String,
        result: Result<LoadedDocument, ViewerError>,
    },
    QuerySubmitted(Result<(), ViewerError>),
}
