use crate::api::ApiError;
use crate::core::application::{Application, ApplicationKind, ApplicationStatus};
use crate::core::filter::{DateWindow, SortOrder};
use crate::core::hackathon::Hackathon;
use crate::core::membership::Membership;
use crate::core::notification::Notification;
use crate::core::project::Project;
use crate::core::task::{Task, TaskStatus};
use crate::core::user::{Role, User};
use crate::session::Session;
use crate::store::applicants::{ApplicantScope, StatusChange};
use crate::store::workspace::TaskMove;
use crate::store::workspace_select::WorkspaceChoices;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterField {
    Name,
    Email,
    Password,
    Skills,
    Bio,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectField {
    Title,
    Description,
    Role,
    Prize,
    Deadline,
    MaxParticipants,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HackathonField {
    Title,
    Description,
    StartDate,
    EndDate,
    Prize,
    MaxParticipants,
    Format,
    Location,
    Tags,
}

/// Edits to the projects/hackathons filter bar.
#[derive(Debug, Clone, PartialEq)]
pub enum ListingFilterChange {
    Search(String),
    Status(Option<String>),
    ToggleTheme(String),
    Format(Option<String>),
    Location(String),
    Clear,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApplicantFilterChange {
    Search(String),
    Role(String),
    Skill(String),
    Status(Option<ApplicationStatus>),
    Window(DateWindow),
    Clear,
}

/// Everything the profile page fetches on entry.
#[derive(Debug, Clone)]
pub struct ProfileData {
    pub user: User,
    pub projects: Vec<Project>,
    pub memberships: Vec<Membership>,
    pub applications: Vec<Application>,
}

#[derive(Debug, Clone)]
pub enum Message {
    // Navigation
    Open(View),
    Back,
    DismissAlert,
    CloseDrawer,
    /// Ctrl+N: the create form of the current page.
    NewShortcut,

    // Session
    SessionLoaded(Result<Session, String>),
    SessionResumed(Result<Session, ApiError>),
    SessionStored(Result<(), String>),
    LoginEmail(String),
    LoginPassword(String),
    LoginSubmit,
    RegisterInput(RegisterField, String),
    RegisterRole(Role),
    RegisterSubmit,
    SignedIn(Result<Session, ApiError>),
    Logout,

    // Projects and hackathons
    ProjectsLoaded(Result<Vec<Project>, ApiError>),
    HackathonsLoaded(Result<Vec<Hackathon>, ApiError>),
    MyApplicationsLoaded(Result<Vec<Application>, ApiError>),
    MyMembershipsLoaded(Result<Vec<Membership>, ApiError>),
    ListingFilter(ApplicationKind, ListingFilterChange),
    ListingPage(ApplicationKind, usize),
    Join(ApplicationKind, i64),
    JoinFinished(ApplicationKind, i64, Result<Application, ApiError>),
    DeleteListing(ApplicationKind, i64),
    ListingDeleted(ApplicationKind, i64, Result<(), ApiError>),
    ProjectLoaded(i64, Result<Project, ApiError>),
    HackathonLoaded(i64, Result<Hackathon, ApiError>),

    // Create forms
    OpenCreate(ApplicationKind),
    ProjectInput(ProjectField, String),
    AddProjectRole,
    RemoveProjectRole(usize),
    SubmitProject,
    ProjectCreated(Result<Project, ApiError>),
    HackathonInput(HackathonField, String),
    SubmitHackathon,
    HackathonCreated(Result<Hackathon, ApiError>),

    // Applicants
    ApplicantsLoaded(ApplicantScope, Result<Vec<Application>, ApiError>),
    ApplicantFilter(ApplicantFilterChange),
    ApplicantSort(SortOrder),
    ApplicantPage(usize),
    SetApplicationStatus(i64, ApplicationStatus),
    ApplicationReviewed(StatusChange, Result<Application, ApiError>),
    OpenApplyForm,
    ApplyKind(ApplicationKind),
    ApplyTarget(i64),
    ApplyMessage(String),
    SubmitApplication,
    ApplicationCreated(Result<Application, ApiError>),

    // Workspaces
    WorkspaceChoicesLoaded(Result<WorkspaceChoices, ApiError>),
    WorkspaceResolved(i64, Result<(Project, Vec<Membership>), ApiError>),
    TasksLoaded(i64, Result<Vec<Task>, ApiError>),
    NamesResolved(i64, Vec<(i64, String)>),
    TaskDraftTitle(String),
    TaskDraftDescription(String),
    TaskDraftAssignee(Option<i64>),
    SubmitTask,
    TaskCreated(Result<Task, ApiError>),
    MoveTask(i64, TaskStatus),
    TaskMoved(TaskMove, Result<Task, ApiError>),
    DeleteTask(i64),
    TaskDeleted(i64, Result<(), ApiError>),

    // Profile
    ProfileLoaded(Result<ProfileData, ApiError>),
    EditBio,
    BioInput(String),
    SaveBio,
    EditSkills,
    SkillInput(String),
    AddSkill,
    RemoveSkill(String),
    SaveSkills,
    CancelProfileEdit,
    ProfileSaved(Result<User, ApiError>),
    AcceptInvitation(i64),
    InvitationAccepted(Result<Membership, ApiError>),
    ConfirmDeleteProject(i64),
    CancelDeleteProject,
    DeleteCreatedProject(i64),
    CreatedProjectDeleted(i64, Result<(), ApiError>),

    // Notifications
    NotificationsLoaded(Result<Vec<Notification>, ApiError>),
    MarkRead(i64),
    MarkedRead(Result<Notification, ApiError>),

    // Settings
    ApiUrlInput(String),
    ApplyApiUrl,
    ToggleDebugLogging,
}

/// Sidebar entries, shown once signed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Projects,
    Hackathons,
    Applicants,
    Workspaces,
    Profile,
    Notifications,
    Settings,
}

impl Page {
    pub fn title(&self) -> String {
        match self {
            Self::Projects => crate::fl!("page-projects"),
            Self::Hackathons => crate::fl!("page-hackathons"),
            Self::Applicants => crate::fl!("page-applicants"),
            Self::Workspaces => crate::fl!("page-workspaces"),
            Self::Profile => crate::fl!("page-profile"),
            Self::Notifications => crate::fl!("page-notifications"),
            Self::Settings => crate::fl!("page-settings"),
        }
    }

    pub fn icon_name(&self) -> &'static str {
        match self {
            Self::Projects => "folder-symbolic",
            Self::Hackathons => "applications-science-symbolic",
            Self::Applicants => "mail-send-receive-symbolic",
            Self::Workspaces => "view-grid-symbolic",
            Self::Profile => "avatar-default-symbolic",
            Self::Notifications => "preferences-system-notifications-symbolic",
            Self::Settings => "emblem-system-symbolic",
        }
    }

    pub const ALL: &'static [Page] = &[
        // Browse
        Page::Projects,
        Page::Hackathons,
        // Teams
        Page::Applicants,
        Page::Workspaces,
        // Me
        Page::Profile,
        Page::Notifications,
        Page::Settings,
    ];

    /// Pages that start a new sidebar section (divider drawn above them).
    pub const SECTION_STARTS: &'static [Page] = &[Page::Applicants, Page::Profile];
}

/// What the main area shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Register,
    Page(Page),
    ProjectDetails(i64),
    HackathonDetails(i64),
    /// Applications to a project or hackathon the user owns.
    Reviews(ApplicationKind, i64),
    Workspace(i64),
}

impl View {
    pub fn needs_session(&self) -> bool {
        !matches!(self, Self::Login | Self::Register | Self::Page(Page::Settings))
    }

    /// Where `Back` and a not-found answer lead.
    pub fn parent(&self) -> View {
        match self {
            Self::Login | Self::Register => Self::Login,
            Self::Page(_) => Self::Page(Page::Projects),
            Self::ProjectDetails(_) => Self::Page(Page::Projects),
            Self::HackathonDetails(_) => Self::Page(Page::Hackathons),
            Self::Reviews(ApplicationKind::Project, id) => Self::ProjectDetails(*id),
            Self::Reviews(ApplicationKind::Hackathon, id) => Self::HackathonDetails(*id),
            Self::Workspace(_) => Self::Page(Page::Workspaces),
        }
    }

    /// The sidebar entry to highlight.
    pub fn page(&self) -> Option<Page> {
        match self {
            Self::Login | Self::Register => None,
            Self::Page(p) => Some(*p),
            Self::ProjectDetails(_) => Some(Page::Projects),
            Self::HackathonDetails(_) => Some(Page::Hackathons),
            Self::Reviews(..) => Some(Page::Applicants),
            Self::Workspace(_) => Some(Page::Workspaces),
        }
    }
}
