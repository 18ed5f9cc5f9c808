use axum::http::StatusCode;
use mockall::predicate::eq;
use parkeasy_core::models::parking::{Coordinates, Location, ParkingSlot, TimeSlot};
use pretty_assertions::assert_eq;
use uuid::Uuid;

use crate::test_utils::{parking_slot, server, time_slot, TestContext};

fn location() -> Location {
    Location {
        id: Uuid::new_v4(),
        code: "rk-beach".to_string(),
        name: "RK Beach".to_string(),
        description: "Beach road parking".to_string(),
        coordinates: Coordinates {
            lat: 17.75,
            lng: 83.25,
        },
        total_spots: 15,
    }
}

#[tokio::test]
async fn test_list_locations() {
    let mut ctx = TestContext::new();
    let locations = vec![location()];
    let expected = locations.clone();
    ctx.inventory
        .expect_list_locations()
        .returning(move || Ok(locations.clone()));
    let server = server(ctx.build_state());

    let response = server.get("/api/locations").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Vec<Location>>(), expected);
}

#[tokio::test]
async fn test_location_slots() {
    let mut ctx = TestContext::new();
    let place = location();
    let slot = parking_slot(vec![time_slot(8, true, 30)]);
    let expected = vec![slot.clone()];
    let found = place.clone();
    ctx.inventory
        .expect_get_location()
        .with(eq(place.id))
        .returning(move |_| Ok(Some(found.clone())));
    ctx.inventory
        .expect_list_slots()
        .with(eq(place.id))
        .returning(move |_| Ok(vec![slot.clone()]));
    let server = server(ctx.build_state());

    let response = server.get(&format!("/api/locations/{}/slots", place.id)).await;

    response.assert_status_ok();
    assert_eq!(response.json::<Vec<ParkingSlot>>(), expected);
}

#[tokio::test]
async fn test_slots_of_unknown_location() {
    let mut ctx = TestContext::new();
    ctx.inventory.expect_get_location().returning(|_| Ok(None));
    ctx.inventory.expect_list_slots().times(0);
    let server = server(ctx.build_state());

    let response = server
        .get(&format!("/api/locations/{}/slots", Uuid::new_v4()))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body = response.json::<serde_json::Value>();
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn test_time_slots_of_slot() {
    let mut ctx = TestContext::new();
    let time_slots = vec![time_slot(8, true, 30), time_slot(9, false, 30)];
    let slot = parking_slot(time_slots.clone());
    let slot_id = slot.id;
    ctx.inventory
        .expect_get_slot()
        .with(eq(slot_id))
        .returning(move |_| Ok(Some(slot.clone())));
    let server = server(ctx.build_state());

    let response = server.get(&format!("/api/slots/{}/time-slots", slot_id)).await;

    response.assert_status_ok();
    let body = response.json::<Vec<TimeSlot>>();
    assert_eq!(body, time_slots);
    assert_eq!(body[0].label(), "08:00-09:00");
}

#[tokio::test]
async fn test_malformed_slot_id_is_rejected() {
    let server = server(TestContext::new().build_state());

    let response = server.get("/api/slots/not-a-uuid/time-slots").await;

    response.assert_status(StatusCode::BAD_REQUEST);
}
