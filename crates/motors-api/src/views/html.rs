//! The HTML renderer.

use motors_auth::RequestIdentity;
use motors_entity::inventory::{Classification, Vehicle};

use super::format::{escape_html, format_miles, format_price};
use super::{
    AccountFormValues, ClassificationGroup, Page, PageContext, Renderer, VehicleFormMode,
};
use crate::dto::VehicleForm;

/// Builds pages as plain strings around a shared layout.
#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer;

impl HtmlRenderer {
    /// Creates the renderer.
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for HtmlRenderer {
    fn render(&self, page: &Page, ctx: &PageContext) -> String {
        let content = match page {
            Page::Home => home(),
            Page::Login { email } => login(email),
            Page::Register {
                first_name,
                last_name,
                email,
            } => register(first_name, last_name, email),
            Page::AccountHome => account_home(&ctx.identity),
            Page::AccountUpdate(values) => account_update(values),
            Page::Classification { vehicles } => classification_grid(vehicles),
            Page::VehicleDetail(vehicle) => vehicle_detail(vehicle),
            Page::Management { groups } => management(groups),
            Page::AddClassification { name } => add_classification(name),
            Page::VehicleForm {
                mode,
                form,
                classifications,
            } => vehicle_form(*mode, form, classifications),
            Page::DeleteVehicle(vehicle) => delete_vehicle(vehicle),
            Page::Error { status, message } => error_page(*status, message),
        };
        layout(ctx, &content)
    }
}

fn layout(ctx: &PageContext, content: &str) -> String {
    let title = escape_html(&ctx.title);
    let mut html = String::with_capacity(content.len() + 2048);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>{title} | CSE Motors</title>\n"));
    html.push_str("<link rel=\"stylesheet\" href=\"/css/styles.css\">\n");
    html.push_str("</head>\n<body>\n<div id=\"wrapper\">\n");
    html.push_str("<header id=\"top-header\">\n");
    html.push_str("<span class=\"siteName\"><a href=\"/\" title=\"Return to home page\">CSE Motors</a></span>\n");
    html.push_str(&format!("<div id=\"tools\">{}</div>\n", tools(&ctx.identity)));
    html.push_str("</header>\n");
    html.push_str(&nav(&ctx.nav));
    html.push_str(&format!("<main>\n<h1>{title}</h1>\n"));
    if let Some(notice) = &ctx.notice {
        html.push_str(&format!("<p class=\"notice\">{}</p>\n", escape_html(notice)));
    }
    if !ctx.errors.is_empty() {
        html.push_str("<ul class=\"notice errors\">\n");
        for error in &ctx.errors {
            html.push_str(&format!(
                "<li data-field=\"{}\">{}</li>\n",
                escape_html(&error.field),
                escape_html(&error.message)
            ));
        }
        html.push_str("</ul>\n");
    }
    html.push_str(content);
    html.push_str("</main>\n<footer><p>&copy; CSE Motors</p></footer>\n");
    html.push_str("</div>\n</body>\n</html>\n");
    html
}

fn tools(identity: &RequestIdentity) -> String {
    match identity.claims() {
        Some(claims) => format!(
            "<a title=\"Manage your account\" href=\"/account/\">Welcome {}</a> | \
             <a title=\"Click to log out\" href=\"/account/logout\">Logout</a>",
            escape_html(&claims.account_firstname)
        ),
        None => "<a title=\"Click to log in\" href=\"/account/login\">My Account</a>".to_string(),
    }
}

fn nav(classifications: &[Classification]) -> String {
    let mut list = String::from("<nav>\n<ul>\n<li><a href=\"/\" title=\"Home page\">Home</a></li>\n");
    for c in classifications {
        let name = escape_html(&c.name);
        list.push_str(&format!(
            "<li><a href=\"/inv/type/{}\" title=\"See our inventory of {name} vehicles\">{name}</a></li>\n",
            c.id
        ));
    }
    list.push_str("</ul>\n</nav>\n");
    list
}

fn input(label: &str, kind: &str, name: &str, value: &str, extra: &str) -> String {
    format!(
        "<label for=\"{name}\">{label}</label>\n\
         <input type=\"{kind}\" id=\"{name}\" name=\"{name}\" value=\"{}\" {extra}>\n",
        escape_html(value)
    )
}

fn home() -> String {
    "<section id=\"hero\">\n\
     <h2>Welcome to CSE Motors!</h2>\n\
     <p>Browse our inventory by classification using the navigation above.</p>\n\
     <p><a class=\"button\" href=\"/inv/type/1\" title=\"See our vehicles\">Own Today</a></p>\n\
     </section>\n"
        .to_string()
}

fn login(email: &str) -> String {
    let mut html = String::from("<form id=\"loginForm\" action=\"/account/login\" method=\"post\">\n");
    html.push_str(&input("Email", "email", "account_email", email, "required"));
    html.push_str(&input("Password", "password", "account_password", "", "required"));
    html.push_str("<button type=\"submit\">Login</button>\n</form>\n");
    html.push_str("<p>No account? <a href=\"/account/register\">Sign-up</a></p>\n");
    html
}

fn register(first_name: &str, last_name: &str, email: &str) -> String {
    let mut html = String::from("<form id=\"registerForm\" action=\"/account/register\" method=\"post\">\n");
    html.push_str("<p>All fields are required.</p>\n");
    html.push_str(&input("First name", "text", "account_firstname", first_name, "required"));
    html.push_str(&input("Last name", "text", "account_lastname", last_name, "required"));
    html.push_str(&input("Email", "email", "account_email", email, "required"));
    html.push_str(&input(
        "Password",
        "password",
        "account_password",
        "",
        "required minlength=\"12\"",
    ));
    html.push_str(
        "<p class=\"hint\">Passwords must be at least 12 characters and contain at least \
         1 capital letter, 1 number and 1 special character.</p>\n",
    );
    html.push_str("<button type=\"submit\">Register</button>\n</form>\n");
    html
}

fn account_home(identity: &RequestIdentity) -> String {
    let Some(claims) = identity.claims() else {
        return "<p>Please log in.</p>\n".to_string();
    };
    let mut html = format!(
        "<h2>Welcome {}</h2>\n<p>You're logged in.</p>\n",
        escape_html(&claims.account_firstname)
    );
    html.push_str(&format!(
        "<p><a href=\"/account/update/{}\">Update Account Information</a></p>\n",
        claims.account_id
    ));
    if claims.is_staff() {
        html.push_str("<h3>Inventory Management</h3>\n");
        html.push_str("<p><a href=\"/inv/\">Manage Inventory</a></p>\n");
    }
    html
}

fn account_update(values: &AccountFormValues) -> String {
    let mut html = String::from("<form id=\"updateForm\" action=\"/account/update-info\" method=\"post\">\n");
    html.push_str("<h2>Account Update</h2>\n");
    html.push_str(&input("First name", "text", "account_firstname", &values.first_name, "required"));
    html.push_str(&input("Last name", "text", "account_lastname", &values.last_name, "required"));
    html.push_str(&input("Email", "email", "account_email", &values.email, "required"));
    html.push_str(&format!(
        "<input type=\"hidden\" name=\"account_id\" value=\"{}\">\n",
        values.account_id
    ));
    html.push_str("<button type=\"submit\">Update</button>\n</form>\n");

    html.push_str("<form id=\"passwordForm\" action=\"/account/change-password\" method=\"post\">\n");
    html.push_str("<h2>Change Password</h2>\n");
    html.push_str(
        "<p class=\"hint\">Entering a password will change the current password. Passwords \
         must be at least 12 characters and contain at least 1 capital letter, 1 number and \
         1 special character.</p>\n",
    );
    html.push_str(&input(
        "Password",
        "password",
        "account_password",
        "",
        "required minlength=\"12\"",
    ));
    html.push_str(&format!(
        "<input type=\"hidden\" name=\"account_id\" value=\"{}\">\n",
        values.account_id
    ));
    html.push_str("<button type=\"submit\">Change Password</button>\n</form>\n");
    html
}

fn classification_grid(vehicles: &[Vehicle]) -> String {
    if vehicles.is_empty() {
        return "<p class=\"notice\">Sorry, no matching vehicles could be found.</p>\n".to_string();
    }
    let mut grid = String::from("<ul id=\"inv-display\">\n");
    for v in vehicles {
        let name = escape_html(&v.display_name());
        grid.push_str("<li>\n");
        grid.push_str(&format!(
            "<a href=\"/inv/detail/{id}\" title=\"View {name} details\">\
             <img src=\"{thumb}\" alt=\"Image of {name} on CSE Motors\"></a>\n",
            id = v.id,
            thumb = escape_html(&v.thumbnail),
        ));
        grid.push_str("<div class=\"namePrice\">\n<hr>\n");
        grid.push_str(&format!(
            "<h2><a href=\"/inv/detail/{}\" title=\"View {name} details\">{name}</a></h2>\n",
            v.id
        ));
        grid.push_str(&format!("<span>{}</span>\n", format_price(v.price)));
        grid.push_str("</div>\n</li>\n");
    }
    grid.push_str("</ul>\n");
    grid
}

fn vehicle_detail(v: &Vehicle) -> String {
    let name = escape_html(&v.display_name());
    format!(
        "<section id=\"inv-detail\">\n\
         <figure><img src=\"{image}\" alt=\"Image of {name} on CSE Motors\"></figure>\n\
         <div class=\"inv-info\">\n\
         <h2>{year} {name}</h2>\n\
         <p class=\"price\"><strong>Price:</strong> {price}</p>\n\
         <p class=\"miles\"><strong>Mileage:</strong> {miles} miles</p>\n\
         <p class=\"desc\"><strong>Description:</strong> {desc}</p>\n\
         <p class=\"color\"><strong>Color:</strong> {color}</p>\n\
         </div>\n</section>\n",
        image = escape_html(&v.image),
        year = v.year,
        price = format_price(v.price),
        miles = format_miles(v.miles),
        desc = escape_html(&v.description),
        color = escape_html(&v.color),
    )
}

fn management(groups: &[ClassificationGroup]) -> String {
    let mut html = String::from(
        "<ul class=\"management-links\">\n\
         <li><a href=\"/inv/add-classification\">Add New Classification</a></li>\n\
         <li><a href=\"/inv/add-inventory\">Add New Vehicle</a></li>\n\
         </ul>\n",
    );
    for group in groups {
        html.push_str(&format!(
            "<h2>{}</h2>\n",
            escape_html(&group.classification.name)
        ));
        if group.vehicles.is_empty() {
            html.push_str("<p>No vehicles in this classification.</p>\n");
            continue;
        }
        html.push_str("<table class=\"inventory\">\n<thead><tr><th>Vehicle Name</th><td>&nbsp;</td><td>&nbsp;</td></tr></thead>\n<tbody>\n");
        for v in &group.vehicles {
            html.push_str(&format!(
                "<tr><td>{}</td>\
                 <td><a href=\"/inv/edit/{id}\" title=\"Click to update\">Modify</a></td>\
                 <td><a href=\"/inv/delete/{id}\" title=\"Click to delete\">Delete</a></td></tr>\n",
                escape_html(&v.display_name()),
                id = v.id
            ));
        }
        html.push_str("</tbody>\n</table>\n");
    }
    html
}

fn add_classification(name: &str) -> String {
    let mut html = String::from(
        "<form id=\"classificationForm\" action=\"/inv/add-classification\" method=\"post\">\n",
    );
    html.push_str("<p class=\"hint\">Name must be alphanumeric; no spaces or special characters.</p>\n");
    html.push_str(&input(
        "Classification name",
        "text",
        "classification_name",
        name,
        "required pattern=\"[A-Za-z0-9]+\"",
    ));
    html.push_str("<button type=\"submit\">Add Classification</button>\n</form>\n");
    html
}

fn classification_select(classifications: &[Classification], selected: Option<i32>) -> String {
    let mut list = String::from(
        "<label for=\"classificationList\">Classification</label>\n\
         <select name=\"classification_id\" id=\"classificationList\" required>\n\
         <option value=\"\">Choose a Classification</option>\n",
    );
    for c in classifications {
        let marker = if selected == Some(c.id) { " selected" } else { "" };
        list.push_str(&format!(
            "<option value=\"{}\"{marker}>{}</option>\n",
            c.id,
            escape_html(&c.name)
        ));
    }
    list.push_str("</select>\n");
    list
}

fn vehicle_form(mode: VehicleFormMode, form: &VehicleForm, classifications: &[Classification]) -> String {
    let (action, button) = match mode {
        VehicleFormMode::Add => ("/inv/add-inventory", "Add Vehicle"),
        VehicleFormMode::Edit => ("/inv/update", "Update Vehicle"),
    };
    let mut html = format!("<form id=\"inventoryForm\" action=\"{action}\" method=\"post\">\n");
    html.push_str("<p>All fields are required.</p>\n");
    html.push_str(&classification_select(
        classifications,
        form.selected_classification(),
    ));
    html.push_str(&input("Make", "text", "inv_make", &form.inv_make, "required"));
    html.push_str(&input("Model", "text", "inv_model", &form.inv_model, "required"));
    html.push_str(&input(
        "Year",
        "number",
        "inv_year",
        &form.inv_year,
        "required min=\"1900\" max=\"2099\"",
    ));
    html.push_str(&format!(
        "<label for=\"inv_description\">Description</label>\n\
         <textarea id=\"inv_description\" name=\"inv_description\" required>{}</textarea>\n",
        escape_html(&form.inv_description)
    ));
    html.push_str(&input("Image path", "text", "inv_image", &form.inv_image, "required"));
    html.push_str(&input(
        "Thumbnail path",
        "text",
        "inv_thumbnail",
        &form.inv_thumbnail,
        "required",
    ));
    html.push_str(&input(
        "Price",
        "number",
        "inv_price",
        &form.inv_price,
        "required min=\"0\" step=\"any\"",
    ));
    html.push_str(&input("Miles", "number", "inv_miles", &form.inv_miles, "required min=\"0\""));
    html.push_str(&input("Color", "text", "inv_color", &form.inv_color, "required"));
    if let (VehicleFormMode::Edit, Some(id)) = (mode, form.inv_id) {
        html.push_str(&format!("<input type=\"hidden\" name=\"inv_id\" value=\"{id}\">\n"));
    }
    html.push_str(&format!("<button type=\"submit\">{button}</button>\n</form>\n"));
    html
}

fn delete_vehicle(v: &Vehicle) -> String {
    format!(
        "<p>Confirm deletion. The delete is permanent.</p>\n\
         <form id=\"deleteForm\" action=\"/inv/delete\" method=\"post\">\n\
         <label>Make</label><input type=\"text\" value=\"{make}\" readonly>\n\
         <label>Model</label><input type=\"text\" value=\"{model}\" readonly>\n\
         <label>Year</label><input type=\"text\" value=\"{year}\" readonly>\n\
         <label>Price</label><input type=\"text\" value=\"{price}\" readonly>\n\
         <input type=\"hidden\" name=\"inv_id\" value=\"{id}\">\n\
         <button type=\"submit\">Delete Vehicle</button>\n</form>\n",
        make = escape_html(&v.make),
        model = escape_html(&v.model),
        year = v.year,
        price = format_price(v.price),
        id = v.id,
    )
}

fn error_page(status: u16, message: &str) -> String {
    format!(
        "<section id=\"error\">\n<p class=\"status\">{status}</p>\n<p>{}</p>\n</section>\n",
        escape_html(message)
    )
}
