//! Main application state and root shell.

use chrono::{DateTime, Local};
use eframe::egui::{self, Align, Layout, RichText};
use egui_phosphor::regular::{CALENDAR, SQUARES_FOUR, TRUCK, USERS, USERS_THREE};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::dashboard::{self, DashboardStats};
use crate::error::{AppError, ErrorKind};
use crate::models::{Appointment, AppointmentStatus, Crew, CrewMember, Customer, Resource, find_by_id};
use crate::store::{MockTable, Repository};

use super::components::colors;
use super::forms::{AppointmentForm, CrewForm, CrewMemberForm, CustomerForm};
use super::{appointment_panel, crew_panel, customer_panel, dashboard_panel};

/// Tab currently displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Dashboard,
    Appointments,
    Customers,
    Crews,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Dashboard, Tab::Appointments, Tab::Customers, Tab::Crews];

    /// Get the display name for the tab.
    pub fn name(&self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Appointments => "Appointments",
            Tab::Customers => "Customers",
            Tab::Crews => "Crews",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Tab::Dashboard => SQUARES_FOUR,
            Tab::Appointments => CALENDAR,
            Tab::Customers => USERS,
            Tab::Crews => USERS_THREE,
        }
    }
}

/// Which collection an operation touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Customer,
    Crew,
    CrewMember,
    Appointment,
}

impl ResourceKind {
    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Customer => Customer::LABEL,
            ResourceKind::Crew => Crew::LABEL,
            ResourceKind::CrewMember => CrewMember::LABEL,
            ResourceKind::Appointment => Appointment::LABEL,
        }
    }
}

/// Messages from async tasks to UI.
pub enum UiMessage {
    // Data loading
    CustomersLoaded(Vec<Customer>),
    CrewsLoaded(Vec<Crew>),
    CrewMembersLoaded(Vec<CrewMember>),
    AppointmentsLoaded(Vec<Appointment>),
    DashboardLoaded(DashboardStats),
    LoadFailed { what: &'static str, error: AppError },

    // CRUD operations
    Saved { kind: ResourceKind, name: String, created: bool },
    Deleted { kind: ResourceKind, name: String },
    StatusUpdated { id: i64, status: AppointmentStatus },
    OperationFailed { action: String, error: AppError },
}

/// Log level for UI messages.
#[derive(Clone, Copy, Debug)]
pub enum LogLevel {
    Info,
    Success,
    Error,
}

/// Log entry for display in the UI.
#[derive(Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub message: String,
    pub level: LogLevel,
}

/// Error shown to the user.
#[derive(Clone)]
pub struct ErrorNotice {
    pub kind: ErrorKind,
    pub message: String,
}

/// Target for delete confirmation dialog.
#[derive(Clone)]
pub enum DeleteTarget {
    Customer(i64, String),
    Crew(i64, String),
    CrewMember(i64, String),
    Appointment(i64, String),
}

/// Main application state.
pub struct App {
    // Runtime and data source
    pub rt: tokio::runtime::Runtime,
    pub repo: Repository,
    pub config: AppConfig,

    // Message channel for async communication
    pub tx: mpsc::UnboundedSender<UiMessage>,
    pub rx: mpsc::UnboundedReceiver<UiMessage>,

    // Navigation
    pub current_tab: Tab,

    // Cached data
    pub customers: Vec<Customer>,
    pub crews: Vec<Crew>,
    pub crew_members: Vec<CrewMember>,
    pub appointments: Vec<Appointment>,
    pub dashboard: DashboardStats,
    pub last_refresh: Option<DateTime<Local>>,

    // Requests in flight
    pub pending: usize,

    // Filters
    pub customer_search: String,
    pub member_crew_filter: Option<i64>,
    pub appointment_status_filter: Option<AppointmentStatus>,

    // Forms
    pub customer_form: CustomerForm,
    pub crew_form: CrewForm,
    pub member_form: CrewMemberForm,
    pub appointment_form: AppointmentForm,

    // Log messages
    pub log_messages: Vec<LogEntry>,

    // Dialogs
    pub delete_target: Option<DeleteTarget>,
    pub error: Option<ErrorNotice>,
}

impl App {
    pub fn new(repo: Repository, config: AppConfig, rt: tokio::runtime::Runtime) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        let mut app = Self {
            rt,
            repo,
            config,
            tx,
            rx,
            current_tab: Tab::default(),
            customers: Vec::new(),
            crews: Vec::new(),
            crew_members: Vec::new(),
            appointments: Vec::new(),
            dashboard: DashboardStats::default(),
            last_refresh: None,
            pending: 0,
            customer_search: String::new(),
            member_crew_filter: None,
            appointment_status_filter: None,
            customer_form: CustomerForm::default(),
            crew_form: CrewForm::default(),
            member_form: CrewMemberForm::default(),
            appointment_form: AppointmentForm::default(),
            log_messages: Vec::new(),
            delete_target: None,
            error: None,
        };

        // Load initial data
        app.refresh_tab(app.current_tab);

        app
    }

    /// Log a message to the UI log.
    pub fn log(&mut self, level: LogLevel, message: impl Into<String>) {
        self.log_messages.push(LogEntry {
            timestamp: Local::now(),
            message: message.into(),
            level,
        });

        // Keep only last 100 messages
        if self.log_messages.len() > 100 {
            self.log_messages.remove(0);
        }
    }

    pub fn log_info(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    pub fn log_success(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Success, message);
    }

    /// Record a failure in the log and raise the error dialog.
    pub fn report_error(&mut self, context: &str, error: &AppError) {
        warn!("{context}: {error}");
        let message = format!("{context}: {error}");
        self.log(LogLevel::Error, message.clone());
        self.error = Some(ErrorNotice {
            kind: error.kind(),
            message,
        });
    }

    /// Switch tabs, re-fetching everything the new tab shows.
    pub fn switch_tab(&mut self, tab: Tab) {
        if self.current_tab != tab {
            self.current_tab = tab;
            self.refresh_tab(tab);
        }
    }

    /// Re-fetch the collections a tab renders.
    pub fn refresh_tab(&mut self, tab: Tab) {
        match tab {
            Tab::Dashboard => self.load_dashboard(),
            Tab::Appointments => {
                self.load_appointments();
                self.load_customers();
                self.load_crews();
            }
            Tab::Customers => self.load_customers(),
            Tab::Crews => {
                self.load_crews();
                self.load_crew_members();
            }
        }
    }

    fn spawn_list<R: MockTable>(&mut self, wrap: fn(Vec<R>) -> UiMessage) {
        let repo = self.repo.clone();
        let tx = self.tx.clone();
        self.pending += 1;

        self.rt.spawn(async move {
            let msg = match repo.list::<R>().await {
                Ok(items) => wrap(items),
                Err(error) => UiMessage::LoadFailed { what: R::LABEL, error },
            };
            let _ = tx.send(msg);
        });
    }

    pub fn load_customers(&mut self) {
        self.spawn_list(UiMessage::CustomersLoaded);
    }

    pub fn load_crews(&mut self) {
        self.spawn_list(UiMessage::CrewsLoaded);
    }

    pub fn load_crew_members(&mut self) {
        self.spawn_list(UiMessage::CrewMembersLoaded);
    }

    pub fn load_appointments(&mut self) {
        self.spawn_list(UiMessage::AppointmentsLoaded);
    }

    /// Fetch and aggregate dashboard figures.
    pub fn load_dashboard(&mut self) {
        let repo = self.repo.clone();
        let tx = self.tx.clone();
        let limit = self.config.ui.upcoming_limit;
        let today = Local::now().date_naive();
        self.pending += 1;

        self.rt.spawn(async move {
            let msg = match dashboard::load(&repo, today, limit).await {
                Ok(stats) => UiMessage::DashboardLoaded(stats),
                Err(error) => UiMessage::LoadFailed {
                    what: "Dashboard",
                    error,
                },
            };
            let _ = tx.send(msg);
        });
    }

    /// Create (`id` is `None`) or update a record.
    pub fn save<R: MockTable>(&mut self, kind: ResourceKind, id: Option<i64>, input: R::Input) {
        let repo = self.repo.clone();
        let tx = self.tx.clone();
        self.pending += 1;

        self.rt.spawn(async move {
            let result = match id {
                Some(id) => repo.update::<R>(id, input).await,
                None => repo.create::<R>(input).await,
            };
            let msg = match result {
                Ok(record) => UiMessage::Saved {
                    kind,
                    name: record.display_name(),
                    created: id.is_none(),
                },
                Err(error) => UiMessage::OperationFailed {
                    action: format!("Saving {}", kind.label().to_lowercase()),
                    error,
                },
            };
            let _ = tx.send(msg);
        });
    }

    fn delete<R: MockTable>(&mut self, kind: ResourceKind, id: i64, name: String) {
        let repo = self.repo.clone();
        let tx = self.tx.clone();
        self.pending += 1;

        self.rt.spawn(async move {
            let msg = match repo.delete::<R>(id).await {
                Ok(()) => UiMessage::Deleted { kind, name },
                Err(error) => UiMessage::OperationFailed {
                    action: format!("Deleting {}", kind.label().to_lowercase()),
                    error,
                },
            };
            let _ = tx.send(msg);
        });
    }

    /// Change only the status of an appointment.
    pub fn update_status(&mut self, appointment: Appointment, status: AppointmentStatus) {
        let repo = self.repo.clone();
        let tx = self.tx.clone();
        self.pending += 1;

        self.rt.spawn(async move {
            let msg = match repo.update_status(&appointment, status).await {
                Ok(updated) => UiMessage::StatusUpdated {
                    id: updated.id,
                    status: updated.status,
                },
                Err(error) => UiMessage::OperationFailed {
                    action: "Updating status".to_string(),
                    error,
                },
            };
            let _ = tx.send(msg);
        });
    }

    fn reload(&mut self, kind: ResourceKind) {
        match kind {
            ResourceKind::Customer => self.load_customers(),
            ResourceKind::Crew => self.load_crews(),
            ResourceKind::CrewMember => self.load_crew_members(),
            ResourceKind::Appointment => self.load_appointments(),
        }
    }

    fn reset_form(&mut self, kind: ResourceKind) {
        match kind {
            ResourceKind::Customer => self.customer_form.reset(),
            ResourceKind::Crew => self.crew_form.reset(),
            ResourceKind::CrewMember => self.member_form.reset(),
            ResourceKind::Appointment => self.appointment_form.reset(),
        }
    }

    /// Poll async operation results.
    fn poll_async_results(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            self.pending = self.pending.saturating_sub(1);

            match msg {
                UiMessage::CustomersLoaded(items) => {
                    self.customers = items;
                    self.last_refresh = Some(Local::now());
                }
                UiMessage::CrewsLoaded(items) => {
                    self.crews = items;
                    // Drop a member filter pointing at a crew that no longer exists.
                    if let Some(id) = self.member_crew_filter
                        && find_by_id(&self.crews, id).is_none()
                    {
                        self.member_crew_filter = None;
                    }
                    self.last_refresh = Some(Local::now());
                }
                UiMessage::CrewMembersLoaded(items) => {
                    self.crew_members = items;
                    self.last_refresh = Some(Local::now());
                }
                UiMessage::AppointmentsLoaded(items) => {
                    self.appointments = items;
                    self.last_refresh = Some(Local::now());
                }
                UiMessage::DashboardLoaded(stats) => {
                    self.dashboard = stats;
                    self.last_refresh = Some(Local::now());
                }
                UiMessage::LoadFailed { what, error } => {
                    self.report_error(&format!("Loading {}", what.to_lowercase()), &error);
                }
                UiMessage::Saved { kind, name, created } => {
                    let verb = if created { "created" } else { "updated" };
                    info!("{} '{}' {}", kind.label(), name, verb);
                    self.log_success(format!("{} '{}' {}", kind.label(), name, verb));
                    self.reset_form(kind);
                    self.reload(kind);
                }
                UiMessage::Deleted { kind, name } => {
                    info!("{} '{}' deleted", kind.label(), name);
                    self.log_success(format!("{} '{}' deleted", kind.label(), name));
                    self.reload(kind);
                }
                UiMessage::StatusUpdated { id, status } => {
                    info!("Appointment {id} status set to {status}");
                    self.log_success(format!("Appointment #{id} marked {}", status.label()));
                    self.load_appointments();
                }
                UiMessage::OperationFailed { action, error } => {
                    self.report_error(&action, &error);
                }
            }
        }
    }

    /// Render header and tab bar.
    fn show_header(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.label(RichText::new(TRUCK).size(28.0).color(colors::PRIMARY));
                ui.label(RichText::new("Moving Company Scheduler").size(22.0).strong());
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    ui.label(RichText::new("Professional Moving Services Management").weak());
                });
            });
            ui.add_space(6.0);

            let mut next_tab = None;
            ui.horizontal(|ui| {
                for tab in Tab::ALL {
                    let label = RichText::new(format!("{} {}", tab.icon(), tab.name())).size(15.0);
                    if ui.selectable_label(self.current_tab == tab, label).clicked() {
                        next_tab = Some(tab);
                    }
                    ui.add_space(8.0);
                }
            });
            ui.add_space(6.0);

            if let Some(tab) = next_tab {
                self.switch_tab(tab);
            }
        });
    }

    /// Render status bar (display only, no interaction).
    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .min_height(28.0)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let color = if self.repo.is_mock() {
                        colors::WARNING
                    } else {
                        colors::NEUTRAL
                    };
                    ui.colored_label(color, format!("Data: {}", self.repo.describe()));

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if let Some(at) = self.last_refresh {
                            ui.weak(format!("Updated {}", at.format("%H:%M:%S")));
                        }
                        if self.pending > 0 {
                            ui.spinner();
                        }
                    });
                });
            });
    }

    /// Render modal dialogs (error, delete confirmation).
    fn show_dialogs(&mut self, ctx: &egui::Context) {
        // Error dialog
        if let Some(notice) = self.error.clone() {
            egui::Window::new(notice.kind.label())
                .id(egui::Id::new("error_dialog"))
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.colored_label(colors::ERROR, &notice.message);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.error = None;
                    }
                });
        }

        // Delete confirmation dialog
        if let Some(target) = self.delete_target.clone() {
            let (title, message) = match &target {
                DeleteTarget::Customer(_, name) => ("Delete Customer", format!("Delete customer '{name}'?")),
                DeleteTarget::Crew(_, name) => ("Delete Crew", format!("Delete crew '{name}'?")),
                DeleteTarget::CrewMember(_, name) => ("Delete Crew Member", format!("Delete crew member '{name}'?")),
                DeleteTarget::Appointment(_, name) => ("Delete Appointment", format!("Delete appointment on {name}?")),
            };

            egui::Window::new(title)
                .id(egui::Id::new("delete_dialog"))
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(message);
                    ui.add_space(10.0);
                    ui.horizontal(|ui| {
                        if ui.button("Cancel").clicked() {
                            self.delete_target = None;
                        }
                        if ui.button(RichText::new("Delete").color(colors::DANGER)).clicked() {
                            self.confirm_delete();
                        }
                    });
                });
        }
    }

    /// Execute the confirmed delete operation.
    fn confirm_delete(&mut self) {
        if let Some(target) = self.delete_target.take() {
            match target {
                DeleteTarget::Customer(id, name) => {
                    self.log_info(format!("Deleting customer: {name}"));
                    self.delete::<Customer>(ResourceKind::Customer, id, name);
                }
                DeleteTarget::Crew(id, name) => {
                    self.log_info(format!("Deleting crew: {name}"));
                    self.delete::<Crew>(ResourceKind::Crew, id, name);
                }
                DeleteTarget::CrewMember(id, name) => {
                    self.log_info(format!("Deleting crew member: {name}"));
                    self.delete::<CrewMember>(ResourceKind::CrewMember, id, name);
                }
                DeleteTarget::Appointment(id, name) => {
                    self.log_info(format!("Deleting appointment: {name}"));
                    self.delete::<Appointment>(ResourceKind::Appointment, id, name);
                }
            }
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Poll async results
        self.poll_async_results();

        // Request repaint during async operations
        if self.pending > 0 {
            ctx.request_repaint();
        }

        self.show_header(ctx);
        self.show_status_bar(ctx);
        self.show_dialogs(ctx);

        // Main content
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("main_scroll")
                .auto_shrink([false, false])
                .show(ui, |ui| match self.current_tab {
                    Tab::Dashboard => {
                        if let Some(next) = dashboard_panel::show(self, ui) {
                            self.switch_tab(next);
                        }
                    }
                    Tab::Appointments => appointment_panel::show(self, ui),
                    Tab::Customers => customer_panel::show(self, ui),
                    Tab::Crews => crew_panel::show(self, ui),
                });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ApiClient;
    use crate::store::MockStore;
    use chrono::NaiveDate;

    fn app() -> App {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();
        let repo = Repository::mock(MockStore::seeded(NaiveDate::from_ymd_opt(2025, 7, 16).unwrap()));
        App::new(repo, AppConfig::default(), rt)
    }

    /// Drain messages until no request is in flight.
    fn settle(app: &mut App) {
        for _ in 0..200 {
            app.poll_async_results();
            if app.pending == 0 {
                return;
            }
            std::thread::sleep(std::time::Duration::from_millis(10));
        }
        panic!("requests still pending");
    }

    #[test]
    fn test_startup_loads_dashboard() {
        let mut app = app();
        settle(&mut app);

        assert_eq!(app.dashboard.total_customers, 3);
        assert_eq!(app.dashboard.total_crews, 2);
        assert!(app.last_refresh.is_some());
    }

    #[test]
    fn test_switch_tab_refetches() {
        let mut app = app();
        settle(&mut app);

        app.switch_tab(Tab::Crews);
        settle(&mut app);
        assert_eq!(app.crews.len(), 2);
        assert_eq!(app.crew_members.len(), 5);
        assert!(app.appointments.is_empty());

        app.switch_tab(Tab::Appointments);
        settle(&mut app);
        assert_eq!(app.appointments.len(), 4);
        assert_eq!(app.customers.len(), 3);
    }

    #[test]
    fn test_save_resets_form_and_reloads() {
        let mut app = app();
        app.switch_tab(Tab::Customers);
        settle(&mut app);

        app.customer_form = CustomerForm {
            name: "Grace".to_string(),
            ..CustomerForm::open_new()
        };
        let input = app.customer_form.to_input().unwrap();
        app.save::<Customer>(ResourceKind::Customer, None, input);
        settle(&mut app);

        assert!(!app.customer_form.is_open);
        assert_eq!(app.customers.len(), 4);
        assert!(app.customers.iter().any(|c| c.name == "Grace"));
    }

    #[test]
    fn test_failed_save_keeps_form_open() {
        let mut app = app();
        settle(&mut app);

        app.crew_form = CrewForm::edit(&Crew {
            id: 99,
            name: "Ghost".to_string(),
            description: None,
            is_active: true,
        });
        let input = app.crew_form.to_input().unwrap();
        app.save::<Crew>(ResourceKind::Crew, Some(99), input);
        settle(&mut app);

        assert!(app.crew_form.is_open);
        let notice = app.error.clone().unwrap();
        assert_eq!(notice.kind, ErrorKind::NotFound);
    }

    #[test]
    fn test_confirmed_delete_removes_record() {
        let mut app = app();
        app.switch_tab(Tab::Customers);
        settle(&mut app);

        app.delete_target = Some(DeleteTarget::Customer(3, "Mike Davis".to_string()));
        app.confirm_delete();
        settle(&mut app);

        assert!(app.delete_target.is_none());
        let ids: Vec<i64> = app.customers.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_failed_dashboard_load_keeps_previous_stats() {
        let mut app = app();
        settle(&mut app);
        let before = app.dashboard.clone();
        assert_eq!(before.total_appointments, 4);

        // Bind then drop to get a port nobody listens on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = ApiClient::new(&format!("http://{addr}"), std::time::Duration::from_secs(2)).unwrap();
        app.repo = Repository::Rest(client);

        app.load_dashboard();
        settle(&mut app);

        assert_eq!(app.dashboard, before);
        let notice = app.error.clone().unwrap();
        assert_eq!(notice.kind, ErrorKind::Network);
        assert!(notice.message.starts_with("Loading dashboard"));
    }

    #[test]
    fn test_deleted_crew_clears_member_filter() {
        let mut app = app();
        app.switch_tab(Tab::Crews);
        settle(&mut app);

        app.member_crew_filter = Some(2);
        app.delete_target = Some(DeleteTarget::Crew(2, "Beta Team".to_string()));
        app.confirm_delete();
        settle(&mut app);

        assert_eq!(app.crews.len(), 1);
        assert_eq!(app.member_crew_filter, None);

        app.member_crew_filter = Some(1);
        app.load_crews();
        settle(&mut app);
        assert_eq!(app.member_crew_filter, Some(1));
    }

    #[test]
    fn test_status_update_reloads_appointments() {
        let mut app = app();
        app.switch_tab(Tab::Appointments);
        settle(&mut app);

        let target = app.appointments[2].clone();
        app.update_status(target.clone(), AppointmentStatus::Completed);
        settle(&mut app);

        let updated = app.appointments.iter().find(|a| a.id == target.id).unwrap();
        assert_eq!(updated.status, AppointmentStatus::Completed);
        assert_eq!(updated.origin_address, target.origin_address);
    }
}
