//! End-to-end store registration through the wizard

mod common;

use serde_json::json;
use souk::wizard::{CategoryId, OwnerRef, PartialStorePayload, Step, Wizard};
use souk::{GatewayError, StoreId, WizardError};

use common::FakeGateway;

fn through_subcategories() -> Wizard {
    let mut wizard = Wizard::new();
    wizard
        .advance(PartialStorePayload::new().categories([CategoryId(5), CategoryId(6)]))
        .unwrap();
    wizard
        .advance(
            PartialStorePayload::new()
                .event_planning_categories(["hair", "decor"])
                .rent_hire_categories(["tents"]),
        )
        .unwrap();
    wizard
}

fn details() -> PartialStorePayload {
    PartialStorePayload::new()
        .name("Glow Studio")
        .phone_number("+254700000000")
        .whats_app("+254700000000")
        .overview("Bridal hair and décor")
        .location("Westlands, Nairobi")
        .working_hours("Mon-Sat 8:00-18:00")
        .owner(OwnerRef::User(17))
}

#[tokio::test]
async fn submits_everything_collected() {
    let gateway = FakeGateway::new().route(
        "POST stores/",
        Ok(json!({"id": 31, "name": "Glow Studio"})),
    );
    let wizard = through_subcategories();
    assert_eq!(wizard.step(), Step::Details);

    let created = wizard.submit(&gateway, details()).await.unwrap();

    assert_eq!(created.id, StoreId(31));
    assert_eq!(created.name, "Glow Studio");

    let posted = gateway.posted();
    assert_eq!(posted.len(), 1);
    assert_eq!(posted[0].0, "stores/");
    assert_eq!(
        posted[0].1,
        json!({
            "categories": [5, 6],
            "event_planning_categories": ["decor", "hair"],
            "rent_hire_categories": ["tents"],
            "name": "Glow Studio",
            "phone_number": "+254700000000",
            "whats_app": "+254700000000",
            "image": null,
            "overview": "Bridal hair and décor",
            "location": "Westlands, Nairobi",
            "working_hours": "Mon-Sat 8:00-18:00",
            "owner": 17,
        })
    );
}

#[tokio::test]
async fn failed_submission_hands_wizard_back() {
    let failing = FakeGateway::new().route(
        "POST stores/",
        Err(GatewayError::Server {
            status: 400,
            message: Some("name: store with this name already exists.".into()),
        }),
    );

    let rejected = through_subcategories()
        .submit(&failing, details())
        .await
        .unwrap_err();

    assert!(matches!(rejected.error, WizardError::Submission(_)));
    let wizard = *rejected.wizard;
    assert_eq!(wizard.step(), Step::Details);
    assert_eq!(wizard.payload().name.as_deref(), Some("Glow Studio"));
    assert_eq!(
        wizard.payload().categories.as_ref().map(|c| c.len()),
        Some(2)
    );

    let working = FakeGateway::new().route("POST stores/", Ok(json!({"id": 32})));
    let created = wizard
        .submit(&working, PartialStorePayload::new().name("Glow Studio II"))
        .await
        .unwrap();

    assert_eq!(created.id, StoreId(32));
    assert_eq!(working.posted()[0].1["name"], "Glow Studio II");
    assert_eq!(working.posted()[0].1["location"], "Westlands, Nairobi");
}

#[tokio::test]
async fn cannot_submit_early() {
    let gateway = FakeGateway::new();
    let mut wizard = Wizard::new();
    wizard
        .advance(PartialStorePayload::new().categories([CategoryId(1)]))
        .unwrap();

    let rejected = wizard
        .submit(&gateway, PartialStorePayload::new())
        .await
        .unwrap_err();

    assert_eq!(
        rejected.error,
        WizardError::NotAtFinalStep(Step::Subcategories)
    );
    assert_eq!(rejected.wizard.step(), Step::Subcategories);
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn going_back_and_forth_keeps_details() {
    let gateway = FakeGateway::new().route("POST stores/", Ok(json!({"id": 40})));
    let mut wizard = through_subcategories();

    wizard
        .retreat_with(PartialStorePayload::new().name("Draft name"))
        .unwrap();
    wizard.retreat().unwrap();
    wizard
        .advance(PartialStorePayload::new().categories([CategoryId(6)]))
        .unwrap();
    wizard.advance(PartialStorePayload::new()).unwrap();

    wizard
        .submit(&gateway, PartialStorePayload::new())
        .await
        .unwrap();

    let body = &gateway.posted()[0].1;
    assert_eq!(body["name"], "Draft name");
    assert_eq!(body["categories"], json!([6]));
    assert_eq!(body["rent_hire_categories"], json!(["tents"]));
    assert_eq!(body["owner"], json!(null));
}
