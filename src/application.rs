use std::future::Future;

use chrono::Utc;

use cosmic::app::{Core, Task as CosmicTask, context_drawer};
use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, icon, nav_bar, row, scrollable, text};
use cosmic::{Application, Element, executor, theme};

use crate::api::{
    self, ApiClient, ApiError, applications, hackathons, memberships, notifications, projects, tasks, users,
};
use crate::config::{APP_ID, TeamUpConfig};
use crate::core::application::{ApplicationKind, NewApplication};
use crate::core::filter::ListingFilter;
use crate::core::hackathon::{Hackathon, HackathonForm};
use crate::core::listing::Listing;
use crate::core::membership;
use crate::core::notification::{self, Notification};
use crate::core::project::{Project, ProjectForm};
use crate::message::{
    ApplicantFilterChange, HackathonField, ListingFilterChange, Message, Page, ProfileData, ProjectField,
    RegisterField, View,
};
use crate::pages;
use crate::pages::applicants::ApplyForm;
use crate::session::forms::{LoginForm, RegisterForm};
use crate::session::{self, Session, keyring};
use crate::store::applicants::{ApplicantScope, ApplicantsStore};
use crate::store::listings::{JoinState, ListingStore};
use crate::store::profile::ProfileStore;
use crate::store::workspace::{Access, WorkspaceStore};
use crate::store::workspace_select::WorkspaceChoices;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextDrawerState {
    NewProject,
    NewHackathon,
    NewApplication,
}

pub struct Flags {
    pub config: TeamUpConfig,
    pub cosmic_config: cosmic::cosmic_config::Config,
    pub client: ApiClient,
}

pub struct TeamUp {
    core: Core,
    nav_model: nav_bar::Model,
    config: TeamUpConfig,
    cosmic_config: cosmic::cosmic_config::Config,
    client: ApiClient,
    session: Session,
    view: View,

    /// Blocking message shown above the page until dismissed.
    alert: Option<String>,
    context_drawer_state: Option<ContextDrawerState>,

    // Sign in / sign up
    login_form: LoginForm,
    register_form: RegisterForm,
    auth_error: Option<String>,
    auth_busy: bool,

    // Listings
    projects: ListingStore<Project>,
    hackathons: ListingStore<Hackathon>,
    project_detail: Option<Project>,
    hackathon_detail: Option<Hackathon>,
    project_form: ProjectForm,
    hackathon_form: HackathonForm,
    form_error: Option<String>,

    // Applications
    applicants: ApplicantsStore,
    apply_form: ApplyForm,

    // Workspaces
    choices: WorkspaceChoices,
    workspace: Option<WorkspaceStore>,
    task_error: Option<String>,

    profile: ProfileStore,

    notifications: Vec<Notification>,
    notifications_loading: bool,

    api_url_input: String,
}

/// Wrap a request so its result comes back as a message.
fn request<T, Fut>(fut: Fut, to_msg: impl FnOnce(T) -> Message + Send + 'static) -> CosmicTask<Message>
where
    T: Send + 'static,
    Fut: Future<Output = T> + Send + 'static,
{
    CosmicTask::perform(fut, move |r| cosmic::Action::App(to_msg(r)))
}

fn apply_listing_change<L: Listing>(store: &mut ListingStore<L>, change: ListingFilterChange) {
    if change == ListingFilterChange::Clear {
        store.clear_filter();
        return;
    }
    store.update_filter(|f: &mut ListingFilter| match change {
        ListingFilterChange::Search(s) => f.search = s,
        ListingFilterChange::Status(s) => f.status = s,
        ListingFilterChange::ToggleTheme(t) => f.toggle_theme(&t),
        ListingFilterChange::Format(v) => f.format = v,
        ListingFilterChange::Location(l) => f.location = l,
        ListingFilterChange::Clear => {}
    });
}

impl Application for TeamUp {
    type Executor = executor::Default;
    type Flags = Flags;
    type Message = Message;

    const APP_ID: &'static str = APP_ID;

    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    fn init(core: Core, flags: Self::Flags) -> (Self, CosmicTask<Self::Message>) {
        let Flags {
            config,
            cosmic_config,
            client,
        } = flags;

        // Build sidebar navigation model with section dividers
        let mut nav_model = nav_bar::Model::default();
        for page in Page::ALL {
            let item = nav_model
                .insert()
                .text(page.title())
                .icon(icon::from_name(page.icon_name()).icon())
                .data(*page);
            if Page::SECTION_STARTS.contains(page) {
                item.divider_above(true);
            }
        }

        let login_form = LoginForm {
            email: config.last_email.clone(),
            password: String::new(),
        };
        let api_url_input = config.api_base_url.clone();

        let app = Self {
            core,
            nav_model,
            config,
            cosmic_config,
            client,
            session: Session::default(),
            view: View::Login,
            alert: None,
            context_drawer_state: None,
            login_form,
            register_form: RegisterForm::default(),
            auth_error: None,
            auth_busy: true,
            projects: ListingStore::default(),
            hackathons: ListingStore::default(),
            project_detail: None,
            hackathon_detail: None,
            project_form: ProjectForm::default(),
            hackathon_form: HackathonForm::default(),
            form_error: None,
            applicants: ApplicantsStore::new(ApplicantScope::Mine),
            apply_form: ApplyForm::default(),
            choices: WorkspaceChoices::default(),
            workspace: None,
            task_error: None,
            profile: ProfileStore::default(),
            notifications: Vec::new(),
            notifications_loading: false,
            api_url_input,
        };

        let task = app.load_stored_session();
        (app, task)
    }

    fn nav_model(&self) -> Option<&nav_bar::Model> {
        if self.session.is_authenticated() {
            Some(&self.nav_model)
        } else {
            None
        }
    }

    fn on_nav_select(&mut self, id: nav_bar::Id) -> CosmicTask<Message> {
        match self.nav_model.data::<Page>(id).copied() {
            Some(page) => self.open(View::Page(page)),
            None => CosmicTask::none(),
        }
    }

    fn update(&mut self, message: Message) -> CosmicTask<Message> {
        let now = Utc::now();

        match message {
            // --- Navigation ---
            Message::Open(view) => return self.open(view),

            Message::Back => {
                let parent = self.view.parent();
                return self.open(parent);
            }

            Message::DismissAlert => {
                self.alert = None;
            }

            Message::CloseDrawer => {
                self.close_drawer();
            }

            Message::NewShortcut => {
                if self.session.can_create_listings() {
                    match self.view {
                        View::Page(Page::Projects) => return self.update(Message::OpenCreate(ApplicationKind::Project)),
                        View::Page(Page::Hackathons) => {
                            return self.update(Message::OpenCreate(ApplicationKind::Hackathon));
                        }
                        _ => {}
                    }
                }
                if self.view == View::Page(Page::Applicants) && self.session.can_apply() {
                    return self.update(Message::OpenApplyForm);
                }
            }

            // --- Session ---
            Message::SessionLoaded(result) => match result {
                Ok(stored) if stored.is_authenticated() => {
                    let client = self.client.clone();
                    return request(
                        async move { session::resume(&client, stored).await },
                        Message::SessionResumed,
                    );
                }
                Ok(_) => {
                    self.auth_busy = false;
                }
                Err(e) => {
                    log::warn!("Could not read stored session: {}", e);
                    self.auth_busy = false;
                }
            },

            Message::SessionResumed(result) => {
                self.auth_busy = false;
                match result {
                    Ok(session) => {
                        log::info!("Resumed session for user {:?}", session.user_id());
                        self.session = session;
                        let store = self.store_session();
                        let open = self.open(View::Page(Page::Projects));
                        return CosmicTask::batch(vec![store, open]);
                    }
                    Err(e) if e.is_auth() => {
                        log::info!("Stored session rejected, signing out");
                        self.client.set_token(None);
                        return self.clear_stored_session();
                    }
                    Err(e) => {
                        self.client.set_token(None);
                        self.alert = Some(e.to_string());
                    }
                }
            }

            Message::SessionStored(result) => {
                if let Err(e) = result {
                    log::warn!("Keyring: {}", e);
                }
            }

            Message::LoginEmail(value) => {
                self.login_form.email = value;
            }

            Message::LoginPassword(value) => {
                self.login_form.password = value;
            }

            Message::LoginSubmit => match self.login_form.validate() {
                Err(e) => self.auth_error = Some(e.to_string()),
                Ok((email, password)) => {
                    self.auth_error = None;
                    self.auth_busy = true;
                    self.config.last_email = email.clone();
                    self.save_config();
                    let client = self.client.clone();
                    return request(
                        async move { session::sign_in(&client, &email, &password).await },
                        Message::SignedIn,
                    );
                }
            },

            Message::RegisterInput(field, value) => {
                let form = &mut self.register_form;
                match field {
                    RegisterField::Name => form.name = value,
                    RegisterField::Email => form.email = value,
                    RegisterField::Password => form.password = value,
                    RegisterField::Skills => form.skills = value,
                    RegisterField::Bio => form.bio = value,
                }
            }

            Message::RegisterRole(role) => {
                self.register_form.role = role;
            }

            Message::RegisterSubmit => match self.register_form.to_request() {
                Err(e) => self.auth_error = Some(e.to_string()),
                Ok(registration) => {
                    self.auth_error = None;
                    self.auth_busy = true;
                    self.config.last_email = registration.email.clone();
                    self.save_config();
                    let client = self.client.clone();
                    return request(
                        async move { session::sign_up(&client, &registration).await },
                        Message::SignedIn,
                    );
                }
            },

            Message::SignedIn(result) => {
                self.auth_busy = false;
                match result {
                    Ok(session) => {
                        self.session = session;
                        self.login_form.password.clear();
                        self.register_form = RegisterForm::default();
                        let store = self.store_session();
                        let open = self.open(View::Page(Page::Projects));
                        return CosmicTask::batch(vec![store, open]);
                    }
                    Err(ApiError::Unauthorized) => {
                        self.auth_error = Some(crate::fl!("login-failed"));
                    }
                    Err(e) => {
                        log::warn!("Sign in failed: {}", e);
                        self.auth_error = Some(e.to_string());
                    }
                }
            }

            Message::Logout => {
                log::info!("Signing out");
                self.reset_session();
                return self.clear_stored_session();
            }

            // --- Listings ---
            Message::ProjectsLoaded(result) => match result {
                Ok(items) => self.projects.loaded(items),
                Err(e) => {
                    self.projects.loading = false;
                    return self.fail(e, crate::fl!("error-load-projects"));
                }
            },

            Message::HackathonsLoaded(result) => match result {
                Ok(items) => self.hackathons.loaded(items),
                Err(e) => {
                    self.hackathons.loading = false;
                    return self.fail(e, crate::fl!("error-load-hackathons"));
                }
            },

            Message::MyApplicationsLoaded(result) => match result {
                Ok(apps) => {
                    self.projects.set_applications(&apps);
                    self.hackathons.set_applications(&apps);
                }
                Err(e) => return self.note(e, "own applications"),
            },

            Message::MyMembershipsLoaded(result) => match result {
                Ok(ms) => self.projects.set_joined(membership::active_project_ids(&ms)),
                Err(e) => return self.note(e, "memberships"),
            },

            Message::ListingFilter(kind, change) => match kind {
                ApplicationKind::Project => apply_listing_change(&mut self.projects, change),
                ApplicationKind::Hackathon => apply_listing_change(&mut self.hackathons, change),
            },

            Message::ListingPage(kind, page) => match kind {
                ApplicationKind::Project => self.projects.go_to_page(page, now),
                ApplicationKind::Hackathon => self.hackathons.go_to_page(page, now),
            },

            Message::Join(kind, id) => {
                let client = self.client.clone();
                let body = NewApplication::new(kind, id, "");
                return request(
                    async move { applications::create(&client, &body).await },
                    move |r| Message::JoinFinished(kind, id, r),
                );
            }

            Message::JoinFinished(kind, id, result) => {
                if let Err(ref e) = result {
                    if e.is_auth() {
                        return self.expire_session();
                    }
                }
                if let Ok(ref app) = result {
                    if self.applicants.scope == ApplicantScope::Mine {
                        self.applicants.insert_created(app.clone());
                    }
                }
                self.alert = match kind {
                    ApplicationKind::Project => self.projects.join_finished(id, result),
                    ApplicationKind::Hackathon => self.hackathons.join_finished(id, result),
                };
            }

            Message::DeleteListing(kind, id) => {
                let client = self.client.clone();
                return request(
                    async move {
                        match kind {
                            ApplicationKind::Project => projects::delete(&client, id).await,
                            ApplicationKind::Hackathon => hackathons::delete(&client, id).await,
                        }
                    },
                    move |r| Message::ListingDeleted(kind, id, r),
                );
            }

            Message::ListingDeleted(kind, id, result) => {
                if matches!(&result, Err(e) if e.is_auth()) {
                    return self.expire_session();
                }
                let deleted = result.is_ok();
                self.alert = match kind {
                    ApplicationKind::Project => self.projects.deleted(id, result),
                    ApplicationKind::Hackathon => self.hackathons.deleted(id, result),
                };
                let on_details = matches!(
                    (kind, self.view),
                    (ApplicationKind::Project, View::ProjectDetails(v))
                        | (ApplicationKind::Hackathon, View::HackathonDetails(v)) if v == id
                );
                if deleted && on_details {
                    let parent = self.view.parent();
                    return self.open(parent);
                }
            }

            Message::ProjectLoaded(id, result) => match result {
                Ok(project) => {
                    if self.view == View::ProjectDetails(id)
                        || self.view == View::Reviews(ApplicationKind::Project, id)
                    {
                        self.project_detail = Some(project);
                    }
                }
                Err(e) => return self.missing(e, crate::fl!("error-project-not-found")),
            },

            Message::HackathonLoaded(id, result) => match result {
                Ok(hackathon) => {
                    if self.view == View::HackathonDetails(id)
                        || self.view == View::Reviews(ApplicationKind::Hackathon, id)
                    {
                        self.hackathon_detail = Some(hackathon);
                    }
                }
                Err(e) => return self.missing(e, crate::fl!("error-hackathon-not-found")),
            },

            // --- Create forms ---
            Message::OpenCreate(kind) => {
                if self.session.can_create_listings() {
                    self.form_error = None;
                    self.context_drawer_state = Some(match kind {
                        ApplicationKind::Project => ContextDrawerState::NewProject,
                        ApplicationKind::Hackathon => ContextDrawerState::NewHackathon,
                    });
                    self.core.window.show_context = true;
                }
            }

            Message::ProjectInput(field, value) => {
                let form = &mut self.project_form;
                match field {
                    ProjectField::Title => form.title = value,
                    ProjectField::Description => form.description = value,
                    ProjectField::Role => form.role_input = value,
                    ProjectField::Prize => form.prize = value,
                    ProjectField::Deadline => form.deadline = value,
                    ProjectField::MaxParticipants => form.max_participants = value,
                }
            }

            Message::AddProjectRole => self.project_form.add_role(),

            Message::RemoveProjectRole(idx) => self.project_form.remove_role(idx),

            Message::SubmitProject => match self.project_form.to_request() {
                Err(e) => self.form_error = Some(e.to_string()),
                Ok(body) => {
                    self.form_error = None;
                    let client = self.client.clone();
                    return request(
                        async move { projects::create(&client, &body).await },
                        Message::ProjectCreated,
                    );
                }
            },

            Message::ProjectCreated(result) => match result {
                Ok(project) => {
                    log::info!("Created project {}", project.id);
                    self.projects.created(project);
                    self.project_form = ProjectForm::default();
                    self.close_drawer();
                }
                Err(e) => return self.fail(e, crate::fl!("error-create")),
            },

            Message::HackathonInput(field, value) => {
                let form = &mut self.hackathon_form;
                match field {
                    HackathonField::Title => form.title = value,
                    HackathonField::Description => form.description = value,
                    HackathonField::StartDate => form.start_date = value,
                    HackathonField::EndDate => form.end_date = value,
                    HackathonField::Prize => form.prize = value,
                    HackathonField::MaxParticipants => form.max_participants = value,
                    HackathonField::Format => form.format = value,
                    HackathonField::Location => form.location = value,
                    HackathonField::Tags => form.tags = value,
                }
            }

            Message::SubmitHackathon => match self.hackathon_form.to_request() {
                Err(e) => self.form_error = Some(e.to_string()),
                Ok(body) => {
                    self.form_error = None;
                    let client = self.client.clone();
                    return request(
                        async move { hackathons::create(&client, &body).await },
                        Message::HackathonCreated,
                    );
                }
            },

            Message::HackathonCreated(result) => match result {
                Ok(hackathon) => {
                    log::info!("Created hackathon {}", hackathon.id);
                    self.hackathons.created(hackathon);
                    self.hackathon_form = HackathonForm::default();
                    self.close_drawer();
                }
                Err(e) => return self.fail(e, crate::fl!("error-create")),
            },

            // --- Applicants ---
            Message::ApplicantsLoaded(scope, result) => {
                if scope != self.applicants.scope {
                    return CosmicTask::none();
                }
                match result {
                    Ok(items) => self.applicants.loaded(items),
                    Err(e) => {
                        self.applicants.loading = false;
                        return self.fail(e, crate::fl!("error-load-applications"));
                    }
                }
            }

            Message::ApplicantFilter(change) => match change {
                ApplicantFilterChange::Clear => self.applicants.clear_filter(),
                change => self.applicants.update_filter(|f| match change {
                    ApplicantFilterChange::Search(s) => f.search = s,
                    ApplicantFilterChange::Role(r) => f.role = r,
                    ApplicantFilterChange::Skill(s) => f.skill = s,
                    ApplicantFilterChange::Status(s) => f.status = s,
                    ApplicantFilterChange::Window(w) => f.window = w,
                    ApplicantFilterChange::Clear => {}
                }),
            },

            Message::ApplicantSort(order) => self.applicants.set_sort(order),

            Message::ApplicantPage(page) => self.applicants.go_to_page(page, now),

            Message::SetApplicationStatus(id, next) => match self.applicants.begin_status_change(id, next) {
                Err(e) => {
                    log::info!("Refused status change of application {}: {}", id, e);
                    self.alert = Some(e.to_string());
                }
                Ok(change) => {
                    let client = self.client.clone();
                    let (app_id, action) = (change.id, change.action);
                    return request(
                        async move { applications::review(&client, app_id, action).await },
                        move |r| Message::ApplicationReviewed(change, r),
                    );
                }
            },

            Message::ApplicationReviewed(change, result) => {
                let expired = matches!(&result, Err(e) if e.is_auth());
                let alert = self.applicants.finish_status_change(change, result);
                if expired {
                    return self.expire_session();
                }
                self.alert = alert;
            }

            Message::OpenApplyForm => {
                self.apply_form = ApplyForm::default();
                self.form_error = None;
                self.context_drawer_state = Some(ContextDrawerState::NewApplication);
                self.core.window.show_context = true;
            }

            Message::ApplyKind(kind) => {
                self.apply_form.kind = kind;
                self.apply_form.target = None;
            }

            Message::ApplyTarget(id) => {
                self.apply_form.target = Some(id);
            }

            Message::ApplyMessage(value) => {
                self.apply_form.message = value;
            }

            Message::SubmitApplication => {
                let Some(target) = self.apply_form.target else {
                    self.form_error = Some(crate::fl!("apply-choose-target"));
                    return CosmicTask::none();
                };
                let body = NewApplication::new(self.apply_form.kind, target, &self.apply_form.message);
                let client = self.client.clone();
                return request(
                    async move { applications::create(&client, &body).await },
                    Message::ApplicationCreated,
                );
            }

            Message::ApplicationCreated(result) => match result {
                Ok(app) => {
                    let (kind, target) = (app.kind, app.target_id);
                    self.applicants.insert_created(app.clone());
                    match kind {
                        ApplicationKind::Project => self.projects.join_finished(target, Ok(app)),
                        ApplicationKind::Hackathon => self.hackathons.join_finished(target, Ok(app)),
                    };
                    self.close_drawer();
                }
                Err(ApiError::Validation(detail)) => {
                    self.form_error = Some(detail);
                }
                Err(e) => return self.fail(e, crate::fl!("error-apply")),
            },

            // --- Workspaces ---
            Message::WorkspaceChoicesLoaded(result) => match result {
                Ok(choices) => self.choices = choices,
                Err(e) => {
                    self.choices.loading = false;
                    return self.fail(e, crate::fl!("error-load-workspaces"));
                }
            },

            Message::WorkspaceResolved(id, result) => {
                let user_id = self.session.user_id().unwrap_or_default();
                let Some(ws) = self.workspace.as_mut().filter(|w| w.project_id == id) else {
                    return CosmicTask::none();
                };
                match result {
                    Ok((project, members)) => {
                        if ws.resolve(project, members, user_id) == Access::Granted {
                            let client = self.client.clone();
                            let load = request(
                                async move { tasks::for_project(&client, id).await },
                                move |r| Message::TasksLoaded(id, r),
                            );
                            let names = self.resolve_names();
                            return CosmicTask::batch(vec![load, names]);
                        }
                    }
                    Err(e) => return self.missing(e, crate::fl!("error-project-not-found")),
                }
            }

            Message::TasksLoaded(id, result) => match result {
                Ok(items) => {
                    if let Some(ws) = self.workspace.as_mut().filter(|w| w.project_id == id) {
                        ws.set_tasks(items);
                        return self.resolve_names();
                    }
                }
                Err(e) => return self.fail(e, crate::fl!("error-load-tasks")),
            },

            Message::NamesResolved(id, names) => {
                if let Some(ws) = self.workspace.as_mut().filter(|w| w.project_id == id) {
                    ws.set_names(names);
                }
            }

            Message::TaskDraftTitle(value) => {
                if let Some(ws) = self.workspace.as_mut() {
                    ws.draft.title = value;
                }
            }

            Message::TaskDraftDescription(value) => {
                if let Some(ws) = self.workspace.as_mut() {
                    ws.draft.description = value;
                }
            }

            Message::TaskDraftAssignee(assignee) => {
                if let Some(ws) = self.workspace.as_mut() {
                    ws.draft.assignee = assignee;
                }
            }

            Message::SubmitTask => {
                let Some(ws) = self.workspace.as_ref() else {
                    return CosmicTask::none();
                };
                match ws.new_task() {
                    Err(e) => self.task_error = Some(e.to_string()),
                    Ok(body) => {
                        self.task_error = None;
                        let client = self.client.clone();
                        return request(
                            async move { tasks::create(&client, &body).await },
                            Message::TaskCreated,
                        );
                    }
                }
            }

            Message::TaskCreated(result) => {
                if matches!(&result, Err(e) if e.is_auth()) {
                    return self.expire_session();
                }
                if let Some(ws) = self.workspace.as_mut() {
                    self.alert = ws.task_created(result);
                    return self.resolve_names();
                }
            }

            Message::MoveTask(id, status) => {
                if let Some(mv) = self.workspace.as_mut().and_then(|ws| ws.begin_move(id, status)) {
                    let client = self.client.clone();
                    let (task_id, status) = (mv.task_id, mv.status);
                    return request(
                        async move { tasks::update_status(&client, task_id, status).await },
                        move |r| Message::TaskMoved(mv, r),
                    );
                }
            }

            Message::TaskMoved(mv, result) => {
                let expired = matches!(&result, Err(e) if e.is_auth());
                let alert = match self.workspace.as_mut() {
                    Some(ws) => ws.finish_move(mv, result),
                    None => result.err().map(|e| format!("Could not move the task. {}", e)),
                };
                if expired {
                    return self.expire_session();
                }
                self.alert = alert;
            }

            Message::DeleteTask(id) => {
                let client = self.client.clone();
                return request(
                    async move { tasks::delete(&client, id).await },
                    move |r| Message::TaskDeleted(id, r),
                );
            }

            Message::TaskDeleted(id, result) => {
                if matches!(&result, Err(e) if e.is_auth()) {
                    return self.expire_session();
                }
                if let Some(ws) = self.workspace.as_mut() {
                    self.alert = ws.task_deleted(id, result);
                }
            }

            // --- Profile ---
            Message::ProfileLoaded(result) => match result {
                Ok(data) => {
                    self.session.replace_user(data.user.clone());
                    self.profile.set_user(data.user);
                    self.profile.set_projects(data.projects, data.memberships);
                    self.profile.applications = data.applications;
                }
                Err(e) => {
                    self.profile.loading = false;
                    return self.fail(e, crate::fl!("error-load-profile"));
                }
            },

            Message::EditBio => {
                self.profile.editing_bio = true;
            }

            Message::BioInput(value) => {
                self.profile.bio_draft = value;
            }

            Message::SaveBio => {
                let update = self.profile.bio_update();
                let client = self.client.clone();
                return request(
                    async move { users::update_me(&client, &update).await },
                    Message::ProfileSaved,
                );
            }

            Message::EditSkills => {
                self.profile.editing_skills = true;
            }

            Message::SkillInput(value) => {
                self.profile.skill_input = value;
            }

            Message::AddSkill => self.profile.add_skill(),

            Message::RemoveSkill(skill) => self.profile.remove_skill(&skill),

            Message::SaveSkills => match self.profile.skills_update() {
                Err(e) => self.profile.skill_error = Some(e.to_string()),
                Ok(update) => {
                    let client = self.client.clone();
                    return request(
                        async move { users::update_me(&client, &update).await },
                        Message::ProfileSaved,
                    );
                }
            },

            Message::CancelProfileEdit => self.profile.cancel_edit(),

            Message::ProfileSaved(result) => {
                if matches!(&result, Err(e) if e.is_auth()) {
                    return self.expire_session();
                }
                if let Ok(ref user) = result {
                    self.session.replace_user(user.clone());
                }
                let saved = result.is_ok();
                self.alert = self.profile.saved(result);
                if saved {
                    return self.store_session();
                }
            }

            Message::AcceptInvitation(id) => {
                let client = self.client.clone();
                return request(
                    async move { memberships::accept(&client, id).await },
                    Message::InvitationAccepted,
                );
            }

            Message::InvitationAccepted(result) => {
                if matches!(&result, Err(e) if e.is_auth()) {
                    return self.expire_session();
                }
                let accepted = result.is_ok();
                self.alert = self.profile.invitation_accepted(result);
                if accepted {
                    return self.open(View::Page(Page::Profile));
                }
            }

            Message::ConfirmDeleteProject(id) => {
                self.profile.pending_delete = Some(id);
            }

            Message::CancelDeleteProject => {
                self.profile.pending_delete = None;
            }

            Message::DeleteCreatedProject(id) => {
                let client = self.client.clone();
                return request(
                    async move { projects::delete(&client, id).await },
                    move |r| Message::CreatedProjectDeleted(id, r),
                );
            }

            Message::CreatedProjectDeleted(id, result) => {
                if matches!(&result, Err(e) if e.is_auth()) {
                    return self.expire_session();
                }
                if result.is_ok() {
                    self.projects.deleted(id, Ok(()));
                }
                self.alert = self.profile.project_deleted(id, result);
            }

            // --- Notifications ---
            Message::NotificationsLoaded(result) => {
                self.notifications_loading = false;
                match result {
                    Ok(mut items) => {
                        notification::sort_for_display(&mut items);
                        self.notifications = items;
                    }
                    Err(e) => return self.fail(e, crate::fl!("error-load-notifications")),
                }
            }

            Message::MarkRead(id) => {
                let client = self.client.clone();
                return request(
                    async move { notifications::mark_read(&client, id).await },
                    Message::MarkedRead,
                );
            }

            Message::MarkedRead(result) => match result {
                Ok(updated) => {
                    if let Some(slot) = self.notifications.iter_mut().find(|n| n.id == updated.id) {
                        *slot = updated;
                    }
                    notification::sort_for_display(&mut self.notifications);
                }
                Err(e) => return self.fail(e, crate::fl!("error-mark-read")),
            },

            // --- Settings ---
            Message::ApiUrlInput(value) => {
                self.api_url_input = value;
            }

            Message::ApplyApiUrl => {
                let url = api::normalize_base_url(&self.api_url_input);
                if url == self.client.base_url() {
                    return CosmicTask::none();
                }
                match ApiClient::new(&url) {
                    Ok(client) => {
                        log::info!("Switching API server to {}", url);
                        self.config.api_base_url = url.clone();
                        self.api_url_input = url;
                        self.save_config();
                        self.reset_session();
                        self.client = client;
                        self.auth_busy = true;
                        return self.load_stored_session();
                    }
                    Err(e) => {
                        self.alert = Some(e.to_string());
                    }
                }
            }

            Message::ToggleDebugLogging => {
                self.config.debug_logging = !self.config.debug_logging;
                teamup::set_debug_logging(self.config.debug_logging);
                self.save_config();
            }
        }

        CosmicTask::none()
    }

    fn header_end(&self) -> Vec<Element<'_, Message>> {
        let mut header_row = row().spacing(4).align_y(Alignment::Center);

        if let Some(user) = self.session.user() {
            let unread = self.notifications.iter().filter(|n| !n.is_read).count();
            let bell = if unread > 0 {
                "notification-alert-symbolic"
            } else {
                "preferences-system-notifications-symbolic"
            };
            header_row = header_row
                .push(text::caption(format!("{} · {}", user.name, crate::components::labels::role(user.role))))
                .push(
                    button::icon(icon::from_name(bell))
                        .on_press(Message::Open(View::Page(Page::Notifications))),
                )
                .push(button::icon(icon::from_name("system-log-out-symbolic")).on_press(Message::Logout));
        }

        header_row = header_row.push(
            button::icon(icon::from_name("emblem-system-symbolic"))
                .on_press(Message::Open(View::Page(Page::Settings))),
        );

        vec![header_row.into()]
    }

    fn context_drawer(&self) -> Option<context_drawer::ContextDrawer<'_, Message>> {
        let state = self.context_drawer_state?;
        let error = self.form_error.as_deref();

        let (title, body) = match state {
            ContextDrawerState::NewProject => (
                crate::fl!("projects-new"),
                pages::projects::project_form_view(&self.project_form, error),
            ),
            ContextDrawerState::NewHackathon => (
                crate::fl!("hackathons-new"),
                pages::hackathons::hackathon_form_view(&self.hackathon_form, error),
            ),
            ContextDrawerState::NewApplication => (
                crate::fl!("applicants-new"),
                pages::applicants::apply_form_view(&self.apply_form, self.apply_targets(), error),
            ),
        };

        Some(
            context_drawer::context_drawer(
                container(scrollable(container(body).padding(16))).width(Length::Fill),
                Message::CloseDrawer,
            )
            .title(title),
        )
    }

    fn on_escape(&mut self) -> CosmicTask<Message> {
        if self.context_drawer_state.is_some() {
            self.close_drawer();
        } else {
            self.alert = None;
        }
        CosmicTask::none()
    }

    fn subscription(&self) -> cosmic::iced::Subscription<Message> {
        cosmic::iced::event::listen_with(|event, _status, _id| match event {
            cosmic::iced::Event::Keyboard(cosmic::iced::keyboard::Event::KeyPressed {
                key: cosmic::iced::keyboard::Key::Character(ref c),
                modifiers,
                ..
            }) if c.as_str() == "n" && modifiers.control() => Some(Message::NewShortcut),
            _ => None,
        })
    }

    fn view(&self) -> Element<'_, Message> {
        let now = Utc::now();

        let page: Element<'_, Message> = match self.view {
            View::Login => pages::login::login_view(&self.login_form, self.auth_error.as_deref(), self.auth_busy),
            View::Register => {
                pages::register::register_view(&self.register_form, self.auth_error.as_deref(), self.auth_busy)
            }
            View::Page(Page::Projects) => pages::projects::projects_view(&self.projects, &self.session, now),
            View::Page(Page::Hackathons) => pages::hackathons::hackathons_view(&self.hackathons, &self.session, now),
            View::Page(Page::Applicants) => pages::applicants::applicants_view(
                &self.applicants,
                &self.session,
                None,
                crate::fl!("page-applicants"),
                now,
            ),
            View::Reviews(kind, id) => {
                let (title, owner) = self.target_summary(kind, id);
                pages::applicants::applicants_view(
                    &self.applicants,
                    &self.session,
                    owner,
                    crate::fl!("applicants-for", title = title),
                    now,
                )
            }
            View::Page(Page::Workspaces) => {
                pages::workspace_select::workspace_select_view(&self.choices, self.session.user_id())
            }
            View::Workspace(_) => match self.workspace {
                Some(ref ws) => pages::workspace::workspace_view(ws, self.task_error.as_deref()),
                None => text::body(crate::fl!("loading")).into(),
            },
            View::Page(Page::Profile) => pages::profile::profile_view(&self.profile),
            View::Page(Page::Notifications) => {
                pages::notifications::notifications_view(&self.notifications, self.notifications_loading)
            }
            View::Page(Page::Settings) => pages::settings::settings_view(&self.config, &self.api_url_input),
            View::ProjectDetails(id) => {
                let project = self.project_detail.as_ref().filter(|p| p.id == id);
                let join = project
                    .map(|p| self.projects.join_state(p, &self.session))
                    .unwrap_or(JoinState::Hidden);
                pages::project_details::project_details_view(project, join, &self.session)
            }
            View::HackathonDetails(id) => {
                let hackathon = self.hackathon_detail.as_ref().filter(|h| h.id == id);
                let join = hackathon
                    .map(|h| self.hackathons.join_state(h, &self.session))
                    .unwrap_or(JoinState::Hidden);
                pages::hackathon_details::hackathon_details_view(hackathon, join, &self.session, now)
            }
        };

        let Some(ref alert) = self.alert else {
            return page;
        };

        let banner = container(
            row()
                .spacing(8)
                .align_y(Alignment::Center)
                .push(icon::from_name("dialog-warning-symbolic").size(16).icon())
                .push(text::body(alert.clone()).width(Length::Fill))
                .push(button::icon(icon::from_name("window-close-symbolic")).on_press(Message::DismissAlert)),
        )
        .padding(8)
        .width(Length::Fill)
        .class(theme::Container::Card);

        column().spacing(8).push(banner).push(page).into()
    }
}

impl TeamUp {
    /// Switch the main area to `view` and start whatever it fetches on entry.
    fn open(&mut self, view: View) -> CosmicTask<Message> {
        if view.needs_session() && !self.session.is_authenticated() {
            self.view = View::Login;
            return CosmicTask::none();
        }

        self.close_drawer();
        self.view = view;
        if let Some(page) = view.page() {
            let target = self
                .nav_model
                .iter()
                .find(|&id| self.nav_model.data::<Page>(id) == Some(&page));
            if let Some(id) = target {
                self.nav_model.activate(id);
            }
        }
        log::debug!("Opening {:?}", view);

        let client = self.client.clone();
        let user_id = self.session.user_id().unwrap_or_default();

        match view {
            View::Login | View::Register => {
                self.auth_error = None;
                CosmicTask::none()
            }

            View::Page(Page::Projects) => {
                CosmicTask::batch(vec![self.load_projects(), self.load_my_applications(), self.load_my_memberships()])
            }

            View::Page(Page::Hackathons) => CosmicTask::batch(vec![self.load_hackathons(), self.load_my_applications()]),

            View::Page(Page::Applicants) => {
                self.applicants = ApplicantsStore::new(ApplicantScope::Mine);
                let scope = self.applicants.scope;
                let list = request(
                    async move { applications::list_mine(&client).await },
                    move |r| Message::ApplicantsLoaded(scope, r),
                );
                CosmicTask::batch(vec![list, self.load_projects(), self.load_hackathons()])
            }

            View::Reviews(kind, id) => {
                let scope = ApplicantScope::Target(kind, id);
                self.applicants = ApplicantsStore::new(scope);
                let c = client.clone();
                let list = request(
                    async move { applications::list_for_target(&c, kind, id).await },
                    move |r| Message::ApplicantsLoaded(scope, r),
                );
                let target = self.load_details(kind, id);
                CosmicTask::batch(vec![list, target])
            }

            View::Page(Page::Workspaces) => {
                self.choices.loading = true;
                request(
                    async move {
                        let (projects, hackathons, memberships) = futures::try_join!(
                            projects::list(&client),
                            hackathons::list(&client),
                            memberships::for_user(&client, user_id),
                        )?;
                        Ok::<_, ApiError>(WorkspaceChoices::build(projects, hackathons, &memberships, user_id))
                    },
                    Message::WorkspaceChoicesLoaded,
                )
            }

            View::Workspace(id) => {
                self.workspace = Some(WorkspaceStore::new(id));
                self.task_error = None;
                request(
                    async move {
                        futures::try_join!(projects::get(&client, id), memberships::for_project(&client, id))
                    },
                    move |r| Message::WorkspaceResolved(id, r),
                )
            }

            View::Page(Page::Profile) => {
                self.profile.loading = true;
                request(
                    async move {
                        let (user, projects, memberships, applications) = futures::try_join!(
                            users::me(&client),
                            projects::list(&client),
                            memberships::for_user(&client, user_id),
                            applications::list_mine(&client),
                        )?;
                        Ok::<_, ApiError>(ProfileData {
                            user,
                            projects,
                            memberships,
                            applications,
                        })
                    },
                    Message::ProfileLoaded,
                )
            }

            View::Page(Page::Notifications) => {
                self.notifications_loading = self.notifications.is_empty();
                request(
                    async move { notifications::list(&client).await },
                    Message::NotificationsLoaded,
                )
            }

            View::Page(Page::Settings) => {
                self.api_url_input = self.config.api_base_url.clone();
                CosmicTask::none()
            }

            View::ProjectDetails(id) => {
                let details = self.load_details(ApplicationKind::Project, id);
                CosmicTask::batch(vec![details, self.load_my_applications(), self.load_my_memberships()])
            }

            View::HackathonDetails(id) => {
                let details = self.load_details(ApplicationKind::Hackathon, id);
                CosmicTask::batch(vec![details, self.load_my_applications()])
            }
        }
    }

    fn load_projects(&mut self) -> CosmicTask<Message> {
        self.projects.loading = self.projects.items.is_empty();
        let client = self.client.clone();
        request(async move { projects::list(&client).await }, Message::ProjectsLoaded)
    }

    fn load_hackathons(&mut self) -> CosmicTask<Message> {
        self.hackathons.loading = self.hackathons.items.is_empty();
        let client = self.client.clone();
        request(async move { hackathons::list(&client).await }, Message::HackathonsLoaded)
    }

    fn load_my_applications(&self) -> CosmicTask<Message> {
        let client = self.client.clone();
        request(
            async move { applications::list_mine(&client).await },
            Message::MyApplicationsLoaded,
        )
    }

    fn load_my_memberships(&self) -> CosmicTask<Message> {
        let Some(user_id) = self.session.user_id() else {
            return CosmicTask::none();
        };
        let client = self.client.clone();
        request(
            async move { memberships::for_user(&client, user_id).await },
            Message::MyMembershipsLoaded,
        )
    }

    /// Show the cached copy right away and refresh it from the server.
    fn load_details(&mut self, kind: ApplicationKind, id: i64) -> CosmicTask<Message> {
        let client = self.client.clone();
        match kind {
            ApplicationKind::Project => {
                self.project_detail = self.projects.get(id).cloned();
                request(
                    async move { projects::get(&client, id).await },
                    move |r| Message::ProjectLoaded(id, r),
                )
            }
            ApplicationKind::Hackathon => {
                self.hackathon_detail = self.hackathons.get(id).cloned();
                request(
                    async move { hackathons::get(&client, id).await },
                    move |r| Message::HackathonLoaded(id, r),
                )
            }
        }
    }

    /// Look up display names for everyone on the open workspace we have no name for yet.
    fn resolve_names(&self) -> CosmicTask<Message> {
        let Some(ws) = self.workspace.as_ref() else {
            return CosmicTask::none();
        };
        let ids = ws.people();
        if ids.is_empty() {
            return CosmicTask::none();
        }
        let id = ws.project_id;
        let client = self.client.clone();
        request(
            async move { users::names(&client, &ids).await },
            move |names| Message::NamesResolved(id, names),
        )
    }

    /// Title and owner of the listing whose applications are under review.
    fn target_summary(&self, kind: ApplicationKind, id: i64) -> (String, Option<i64>) {
        let found = match kind {
            ApplicationKind::Project => self
                .project_detail
                .as_ref()
                .filter(|p| p.id == id)
                .map(|p| (p.title.clone(), p.created_by)),
            ApplicationKind::Hackathon => self
                .hackathon_detail
                .as_ref()
                .filter(|h| h.id == id)
                .map(|h| (h.title.clone(), h.created_by)),
        };
        match found {
            Some((title, owner)) => (title, Some(owner)),
            None => (format!("{} #{}", kind.as_str(), id), None),
        }
    }

    /// Listings of the chosen kind the user could apply to.
    fn apply_targets(&self) -> Vec<(i64, String)> {
        fn collect<L: Listing>(store: &ListingStore<L>, session: &Session) -> Vec<(i64, String)> {
            store
                .items
                .iter()
                .filter(|i| store.join_state(*i, session) == JoinState::Join)
                .map(|i| (i.id(), i.title().to_string()))
                .collect()
        }
        match self.apply_form.kind {
            ApplicationKind::Project => collect(&self.projects, &self.session),
            ApplicationKind::Hackathon => collect(&self.hackathons, &self.session),
        }
    }

    fn close_drawer(&mut self) {
        self.context_drawer_state = None;
        self.core.window.show_context = false;
    }

    /// Report a failed request. An authentication failure ends the session instead.
    fn fail(&mut self, err: ApiError, context: String) -> CosmicTask<Message> {
        if err.is_auth() {
            return self.expire_session();
        }
        log::warn!("{}: {}", context, err);
        self.alert = Some(format!("{} {}", context, err));
        CosmicTask::none()
    }

    /// Like `fail`, but a 404 also leads back to the listing.
    fn missing(&mut self, err: ApiError, context: String) -> CosmicTask<Message> {
        if !err.is_not_found() {
            return self.fail(err, context);
        }
        log::info!("{}: {}", context, err);
        self.alert = Some(context);
        let parent = self.view.parent();
        self.open(parent)
    }

    /// Background lookups only log, unless the session is gone.
    fn note(&mut self, err: ApiError, what: &str) -> CosmicTask<Message> {
        if err.is_auth() {
            return self.expire_session();
        }
        log::warn!("Loading {} failed: {}", what, err);
        CosmicTask::none()
    }

    fn expire_session(&mut self) -> CosmicTask<Message> {
        if !self.session.is_authenticated() {
            return CosmicTask::none();
        }
        log::info!("Session expired");
        self.reset_session();
        self.alert = Some(ApiError::Unauthorized.to_string());
        self.clear_stored_session()
    }

    /// Drop everything tied to the signed-in user and show the login page.
    fn reset_session(&mut self) {
        self.session = Session::default();
        self.client.set_token(None);
        self.close_drawer();
        self.projects = ListingStore::default();
        self.hackathons = ListingStore::default();
        self.project_detail = None;
        self.hackathon_detail = None;
        self.applicants = ApplicantsStore::new(ApplicantScope::Mine);
        self.choices = WorkspaceChoices::default();
        self.workspace = None;
        self.profile = ProfileStore::default();
        self.notifications.clear();
        self.view = View::Login;
    }

    fn load_stored_session(&self) -> CosmicTask<Message> {
        let server = self.client.base_url().to_string();
        request(async move { keyring::load(&server).await }, Message::SessionLoaded)
    }

    fn store_session(&self) -> CosmicTask<Message> {
        let server = self.client.base_url().to_string();
        let session = self.session.clone();
        request(
            async move { keyring::save(&server, &session).await },
            Message::SessionStored,
        )
    }

    fn clear_stored_session(&self) -> CosmicTask<Message> {
        let server = self.client.base_url().to_string();
        request(async move { keyring::clear(&server).await }, Message::SessionStored)
    }

    fn save_config(&self) {
        use cosmic::cosmic_config::CosmicConfigEntry;
        if let Err(e) = self.config.write_entry(&self.cosmic_config) {
            log::error!("Failed to save config: {:?}", e);
        }
    }
}
