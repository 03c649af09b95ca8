use jeevanamrit_core::models::dosha::{Constitution, DoshaScores};
use jeevanamrit_core::models::profile::{Profile, ProfileUpdate};
use jeevanamrit_storage::error::StorageError;
use jeevanamrit_storage::profiles::{MemoryProfileStore, ProfileStore};
use uuid::Uuid;

fn new_profile(user_id: Uuid) -> Profile {
    Profile::new(
        user_id,
        Some("Ravi".to_string()),
        Some("ravi@example.com".to_string()),
        jiff::Timestamp::now(),
    )
}

fn completed_update() -> ProfileUpdate {
    ProfileUpdate {
        age: 41,
        height_cm: 178.0,
        weight_kg: 82.5,
        allergies: vec!["Gluten".to_string()],
        medical_conditions: vec!["Hypertension".to_string()],
        food_preferences: Vec::new(),
        dosha_scores: DoshaScores {
            vata: 2,
            pitta: 6,
            kapha: 2,
        },
        dominant_dosha: Constitution::Pitta,
        questionnaire_completed: true,
    }
}

#[tokio::test]
async fn create_then_get_returns_the_profile() {
    let store = MemoryProfileStore::new();
    let user_id = Uuid::new_v4();
    let created = store.create_profile(new_profile(user_id)).await.unwrap();

    let fetched = store.get_profile(user_id).await.unwrap();
    assert_eq!(fetched, created);
    assert!(!fetched.questionnaire_completed);
}

#[tokio::test]
async fn second_create_for_same_user_is_rejected() {
    let store = MemoryProfileStore::new();
    let user_id = Uuid::new_v4();
    store.create_profile(new_profile(user_id)).await.unwrap();

    let err = store.create_profile(new_profile(user_id)).await.unwrap_err();
    assert!(matches!(err, StorageError::AlreadyExists { key } if key.contains(&user_id.to_string())));
}

#[tokio::test]
async fn get_unknown_user_is_not_found() {
    let store = MemoryProfileStore::new();
    let err = store.get_profile(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound { .. }));
}

#[tokio::test]
async fn update_applies_questionnaire_fields() {
    let store = MemoryProfileStore::new();
    let user_id = Uuid::new_v4();
    let created = store.create_profile(new_profile(user_id)).await.unwrap();

    let updated = store.update_profile(user_id, completed_update()).await.unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.age, Some(41));
    assert_eq!(updated.dominant_dosha, Some(Constitution::Pitta));
    assert!(updated.questionnaire_completed);

    let fetched = store.get_profile(user_id).await.unwrap();
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn update_without_profile_is_not_found() {
    let store = MemoryProfileStore::new();
    let err = store
        .update_profile(Uuid::new_v4(), completed_update())
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound { .. }));
}

#[test]
fn profile_json_uses_table_field_names() {
    let mut profile = new_profile(Uuid::new_v4());
    profile.apply(&completed_update(), jiff::Timestamp::now());
    let json = serde_json::to_value(&profile).unwrap();

    assert_eq!(json["dominant_dosha"], "pitta");
    assert_eq!(json["dosha_scores"]["pitta"], 6);
    assert_eq!(json["questionnaire_completed"], true);
    assert_eq!(json["allergies"][0], "Gluten");
}
