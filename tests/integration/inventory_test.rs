//! Integration tests for inventory browsing, staff management and error
//! pages.

mod helpers;

use axum::http::StatusCode;

use helpers::{TestApp, cookies};
use motors_entity::account::AccountType;
use motors_entity::inventory::{Classification, NewVehicle, Vehicle};

async fn seed(app: &TestApp) -> (Classification, Vehicle) {
    let custom = app.state.inventory.add_classification("Custom").await.unwrap();
    let vehicle = app
        .state
        .inventory
        .add_vehicle(&NewVehicle {
            make: "DMC".to_string(),
            model: "Delorean".to_string(),
            year: 1982,
            description: "Flux capacitor not included".to_string(),
            image: "/images/vehicles/delorean.jpg".to_string(),
            thumbnail: "/images/vehicles/delorean-tn.jpg".to_string(),
            price: 65000.0,
            miles: 12345,
            color: "Silver".to_string(),
            classification_id: custom.id,
        })
        .await
        .unwrap();
    (custom, vehicle)
}

fn vehicle_fields<'a>(classification_id: &'a str, year: &'a str) -> Vec<(&'static str, &'a str)> {
    vec![
        ("classification_id", classification_id),
        ("inv_make", "DMC"),
        ("inv_model", "Delorean"),
        ("inv_year", year),
        ("inv_description", "Time machine"),
        ("inv_image", "/images/vehicles/delorean.jpg"),
        ("inv_thumbnail", "/images/vehicles/delorean-tn.jpg"),
        ("inv_price", "88000"),
        ("inv_miles", "88"),
        ("inv_color", "Silver"),
    ]
}

#[tokio::test]
async fn test_classification_page_lists_vehicles() {
    let app = TestApp::new();
    let (custom, _) = seed(&app).await;

    let response = app.get(&format!("/inv/type/{}", custom.id), None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("<title>Custom vehicles | CSE Motors</title>"));
    assert!(response.body.contains("DMC Delorean"));
    assert!(response.body.contains("$65,000"));
}

#[tokio::test]
async fn test_empty_classification_shows_notice() {
    let app = TestApp::new();
    let sport = app.state.inventory.add_classification("Sport").await.unwrap();

    let response = app.get(&format!("/inv/type/{}", sport.id), None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response
        .body
        .contains("Sorry, no matching vehicles could be found."));
}

#[tokio::test]
async fn test_unknown_classification_is_not_found() {
    let app = TestApp::new();
    seed(&app).await;

    let response = app.get("/inv/type/99", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response
        .body
        .contains("Sorry, we appear to have lost that page."));
    // The error page still carries the navigation.
    assert!(response.body.contains(">Custom</a>"));
}

#[tokio::test]
async fn test_vehicle_detail_formats_numbers() {
    let app = TestApp::new();
    let (_, vehicle) = seed(&app).await;

    let response = app.get(&format!("/inv/detail/{}", vehicle.id), None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("1982 DMC Delorean"));
    assert!(response.body.contains("$65,000"));
    assert!(response.body.contains("12,345 miles"));

    let missing = app.get("/inv/detail/999", None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert!(missing.body.contains("Vehicle not found"));
}

#[tokio::test]
async fn test_management_requires_login() {
    let app = TestApp::new();

    let response = app.get("/inv/", None).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/account/login"));

    let flash = response.cookie_pair("flash").expect("flash cookie");
    let page = app.get("/account/login", Some(flash.as_str())).await;
    assert!(page.body.contains("Please log in."));
}

#[tokio::test]
async fn test_client_is_denied_management() {
    let app = TestApp::new();
    let (_, jwt) = app
        .logged_in("Ada", "a@x.com", AccountType::Client)
        .await;

    let response = app.get("/inv/add-classification", Some(jwt.as_str())).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/account/login"));

    let flash = response.cookie_pair("flash").expect("flash cookie");
    let page = app
        .get("/account/login", Some(cookies(&[jwt.as_str(), flash.as_str()]).as_str()))
        .await;
    assert!(page
        .body
        .contains("You do not have permission to access that page."));
}

#[tokio::test]
async fn test_employee_and_admin_reach_management() {
    let app = TestApp::new();
    let (custom, _) = seed(&app).await;
    let (_, employee) = app
        .logged_in("Emma", "e@x.com", AccountType::Employee)
        .await;
    let (_, admin) = app
        .logged_in("Alan", "admin@x.com", AccountType::Admin)
        .await;

    for jwt in [&employee, &admin] {
        let response = app.get("/inv/", Some(jwt.as_str())).await;
        assert_eq!(response.status, StatusCode::OK);
        assert!(response.body.contains("Vehicle Management"));
        assert!(response.body.contains(&custom.name));
        assert!(response.body.contains("DMC Delorean"));
    }
}

#[tokio::test]
async fn test_add_classification() {
    let app = TestApp::new();
    let (_, jwt) = app
        .logged_in("Emma", "e@x.com", AccountType::Employee)
        .await;

    let response = app
        .post_form(
            "/inv/add-classification",
            &[("classification_name", " Sport ")],
            Some(jwt.as_str()),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert!(response
        .body
        .contains("The Sport classification was successfully added."));
    assert!(response.body.contains(">Sport</a>"));

    let duplicate = app
        .post_form(
            "/inv/add-classification",
            &[("classification_name", "Sport")],
            Some(jwt.as_str()),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_add_classification_rejects_special_characters() {
    let app = TestApp::new();
    let (_, jwt) = app
        .logged_in("Emma", "e@x.com", AccountType::Employee)
        .await;

    let response = app
        .post_form(
            "/inv/add-classification",
            &[("classification_name", "Sport Cars")],
            Some(jwt.as_str()),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response
        .body
        .contains("Classification name cannot contain spaces or special characters."));
    assert!(response.body.contains("value=\"Sport Cars\""));
    assert!(app.state.inventory.classifications().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_add_inventory() {
    let app = TestApp::new();
    let (custom, _) = seed(&app).await;
    let (_, jwt) = app
        .logged_in("Emma", "e@x.com", AccountType::Employee)
        .await;
    let id = custom.id.to_string();

    let response = app
        .post_form("/inv/add-inventory", &vehicle_fields(&id, "1985"), Some(jwt.as_str()))
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert!(response
        .body
        .contains("The DMC Delorean was successfully added."));

    let listed = app
        .state
        .inventory
        .vehicles_by_classification(custom.id)
        .await
        .unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[1].year, 1985);
}

#[tokio::test]
async fn test_add_inventory_rerenders_invalid_form() {
    let app = TestApp::new();
    let (custom, _) = seed(&app).await;
    let (_, jwt) = app
        .logged_in("Emma", "e@x.com", AccountType::Employee)
        .await;
    let id = custom.id.to_string();

    let response = app
        .post_form("/inv/add-inventory", &vehicle_fields(&id, "1850"), Some(jwt.as_str()))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response
        .body
        .contains("Year must be a valid number between 1900 and 2099."));
    assert!(response.body.contains("value=\"1850\""));
    assert!(response.body.contains("value=\"Delorean\""));

    let unknown = app
        .post_form("/inv/add-inventory", &vehicle_fields("42", "1985"), Some(jwt.as_str()))
        .await;
    assert_eq!(unknown.status, StatusCode::BAD_REQUEST);
    assert!(unknown.body.contains("Please select a valid classification."));
}

#[tokio::test]
async fn test_edit_and_update_vehicle() {
    let app = TestApp::new();
    let (custom, vehicle) = seed(&app).await;
    let (_, jwt) = app
        .logged_in("Emma", "e@x.com", AccountType::Employee)
        .await;

    let edit = app
        .get(&format!("/inv/edit/{}", vehicle.id), Some(jwt.as_str()))
        .await;
    assert_eq!(edit.status, StatusCode::OK);
    assert!(edit.body.contains("Edit DMC Delorean"));
    assert!(edit.body.contains("value=\"Silver\""));

    let id = custom.id.to_string();
    let inv_id = vehicle.id.to_string();
    let mut fields = vehicle_fields(&id, "1983");
    fields.push(("inv_id", inv_id.as_str()));

    let response = app.post_form("/inv/update", &fields, Some(jwt.as_str())).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/inv/"));

    let flash = response.cookie_pair("flash").expect("flash cookie");
    let page = app.get("/inv/", Some(cookies(&[jwt.as_str(), flash.as_str()]).as_str())).await;
    assert!(page.body.contains("The DMC Delorean was successfully updated."));

    let stored = app
        .state
        .inventory
        .find_vehicle(vehicle.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.year, 1983);
    assert_eq!(stored.description, "Time machine");
}

#[tokio::test]
async fn test_update_with_errors_rerenders_edit_form() {
    let app = TestApp::new();
    let (custom, vehicle) = seed(&app).await;
    let (_, jwt) = app
        .logged_in("Emma", "e@x.com", AccountType::Employee)
        .await;

    let id = custom.id.to_string();
    let inv_id = vehicle.id.to_string();
    let mut fields = vehicle_fields(&id, "1983");
    fields.retain(|(name, _)| *name != "inv_color");
    fields.push(("inv_id", inv_id.as_str()));

    let response = app.post_form("/inv/update", &fields, Some(jwt.as_str())).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body.contains("Please provide a color."));
    assert!(response.body.contains("value=\"1983\""));
}

#[tokio::test]
async fn test_delete_vehicle() {
    let app = TestApp::new();
    let (_, vehicle) = seed(&app).await;
    let (_, jwt) = app
        .logged_in("Alan", "admin@x.com", AccountType::Admin)
        .await;

    let confirm = app
        .get(&format!("/inv/delete/{}", vehicle.id), Some(jwt.as_str()))
        .await;
    assert_eq!(confirm.status, StatusCode::OK);
    assert!(confirm.body.contains("Delete DMC Delorean"));

    let inv_id = vehicle.id.to_string();
    let response = app
        .post_form("/inv/delete", &[("inv_id", inv_id.as_str())], Some(jwt.as_str()))
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/inv/"));
    assert!(app.state.inventory.find_vehicle(vehicle.id).await.unwrap().is_none());

    let again = app
        .post_form("/inv/delete", &[("inv_id", inv_id.as_str())], Some(jwt.as_str()))
        .await;
    assert_eq!(again.status, StatusCode::SEE_OTHER);
    assert_eq!(again.location(), Some(format!("/inv/delete/{inv_id}").as_str()));
}

#[tokio::test]
async fn test_trigger_500_renders_crash_page() {
    let app = TestApp::new();

    let response = app.get("/error/trigger500", None).await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response
        .body
        .contains("Oh no! There was a crash. Maybe try a different route?"));
    assert!(!response.body.contains("Intentional error"));
}

#[tokio::test]
async fn test_unknown_route_renders_not_found_page() {
    let app = TestApp::new();

    let response = app.get("/no/such/page", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.body.contains("<title>Not Found | CSE Motors</title>"));
    assert!(response
        .body
        .contains("Sorry, we appear to have lost that page."));
}
