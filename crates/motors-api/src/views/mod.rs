//! Server-side page rendering.
//!
//! Handlers describe *what* to show with a [`Page`] and a [`PageContext`];
//! a [`Renderer`] turns that into HTML. The shipped renderer is
//! [`HtmlRenderer`].

pub mod format;
pub mod html;

use motors_auth::RequestIdentity;
use motors_entity::account::AccountProfile;
use motors_entity::inventory::{Classification, Vehicle};

use crate::dto::{FieldError, VehicleForm};

pub use html::HtmlRenderer;

/// Turns a page description into a full HTML document.
pub trait Renderer: Send + Sync + 'static {
    /// Renders `page` inside the shared layout.
    fn render(&self, page: &Page, ctx: &PageContext) -> String;
}

/// Data every page needs besides its own content.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    /// Document title and main heading.
    pub title: String,
    /// Classifications for the navigation bar.
    pub nav: Vec<Classification>,
    /// One-shot notice to show above the content.
    pub notice: Option<String>,
    /// Field errors from the submitted form.
    pub errors: Vec<FieldError>,
    /// Who is viewing the page.
    pub identity: RequestIdentity,
}

impl PageContext {
    /// A context with only a title set.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Replaces the notice.
    pub fn with_notice(mut self, notice: impl Into<String>) -> Self {
        self.notice = Some(notice.into());
        self
    }

    /// Replaces the field errors.
    pub fn with_errors(mut self, errors: Vec<FieldError>) -> Self {
        self.errors = errors;
        self
    }
}

/// Values shown in the account update form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountFormValues {
    /// Account being edited.
    pub account_id: i32,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Login email.
    pub email: String,
}

impl From<&AccountProfile> for AccountFormValues {
    fn from(profile: &AccountProfile) -> Self {
        Self {
            account_id: profile.id,
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            email: profile.email.clone(),
        }
    }
}

/// Where a vehicle form posts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleFormMode {
    /// `POST /inv/add-inventory`
    Add,
    /// `POST /inv/update`
    Edit,
}

/// A classification with its vehicles, for the management view.
#[derive(Debug, Clone)]
pub struct ClassificationGroup {
    /// The classification.
    pub classification: Classification,
    /// Its vehicles ordered by id.
    pub vehicles: Vec<Vehicle>,
}

/// Every page the application renders.
#[derive(Debug, Clone)]
pub enum Page {
    /// `/`
    Home,
    /// Login form; `email` is pre-filled after a failed attempt.
    Login { email: String },
    /// Registration form; the password is never echoed back.
    Register {
        first_name: String,
        last_name: String,
        email: String,
    },
    /// Account management landing page.
    AccountHome,
    /// Profile and password forms.
    AccountUpdate(AccountFormValues),
    /// Vehicle grid of one classification.
    Classification { vehicles: Vec<Vehicle> },
    /// One vehicle.
    VehicleDetail(Vehicle),
    /// Inventory management.
    Management { groups: Vec<ClassificationGroup> },
    /// New classification form.
    AddClassification { name: String },
    /// Add or edit vehicle form.
    VehicleForm {
        mode: VehicleFormMode,
        form: VehicleForm,
        classifications: Vec<Classification>,
    },
    /// Delete confirmation.
    DeleteVehicle(Vehicle),
    /// Error page.
    Error { status: u16, message: String },
}
