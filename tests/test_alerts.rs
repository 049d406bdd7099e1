mod common;

use common::setup;
use vigia::domain::error::DomainError;
use vigia::domain::values::alert_state::AlertState;
use vigia::domain::values::alert_type::AlertType;

#[tokio::test]
async fn test_create_alert_defaults() {
    let app = setup();
    let alert = app
        .create_alert(
            "user-1".into(),
            AlertType::HomeBurglary,
            None,
            Some(-33.45),
            Some(-70.66),
            Some("Av. Siempre Viva 742".into()),
            Some("Centro".into()),
            Some("San Bernardo".into()),
            Some("Santiago".into()),
            false,
        )
        .unwrap();

    assert_eq!(alert.state, AlertState::Active);
    assert!(alert.timestamp.is_some());
    assert_eq!(
        alert.description.as_deref(),
        Some("Se ha detectado un intento de robo a propiedad")
    );
}

#[tokio::test]
async fn test_create_alert_requires_user() {
    let app = setup();
    let err = app
        .create_alert(
            "  ".into(),
            AlertType::Panic,
            None,
            None,
            None,
            None,
            None,
            None,
            None,
            false,
        )
        .unwrap_err();
    assert!(err.to_string().contains("user_id"));
}

#[tokio::test]
async fn test_attend_stamps_attention_fields() {
    let app = setup();
    let alert = app
        .create_alert(
            "user-1".into(),
            AlertType::Assault,
            None,
            None,
            None,
            None,
            Some("Centro".into()),
            None,
            None,
            false,
        )
        .unwrap();

    let attended = app
        .change_alert_state(
            &alert.id,
            AlertState::Attended,
            "admin-7".into(),
            Some("Carabineros en el lugar".into()),
        )
        .unwrap();

    assert_eq!(attended.state, AlertState::Attended);
    assert_eq!(attended.attended_by.as_deref(), Some("admin-7"));
    assert!(attended.attended_at.is_some());
    assert_eq!(
        attended.attention_notes.as_deref(),
        Some("Carabineros en el lugar")
    );

    // Round-trips through the store, not just the returned value
    let fetched = &app.recent_alerts(1).unwrap()[0];
    assert_eq!(fetched.state, AlertState::Attended);
    assert_eq!(fetched.attended_by.as_deref(), Some("admin-7"));
    assert!(fetched.attended_at.is_some());

    let stats = app.stats().unwrap();
    assert_eq!(stats.attended, 1);
    assert_eq!(stats.active, 0);
}

#[tokio::test]
async fn test_non_attended_transition_skips_attention_fields() {
    let app = setup();
    let alert = app
        .create_alert(
            "user-1".into(),
            AlertType::Panic,
            None,
            None,
            None,
            None,
            None,
            None,
            None,
            false,
        )
        .unwrap();

    let in_progress = app
        .change_alert_state(
            &alert.id,
            AlertState::InProgress,
            "admin-7".into(),
            Some("en camino".into()),
        )
        .unwrap();

    assert_eq!(in_progress.state, AlertState::InProgress);
    assert!(in_progress.attended_by.is_none());
    assert!(in_progress.attended_at.is_none());
    assert!(in_progress.attention_notes.is_none());

    let stats = app.stats().unwrap();
    assert_eq!(stats.in_progress, 1);
}

#[tokio::test]
async fn test_attend_unknown_alert_is_not_found() {
    let app = setup();
    let err = app
        .change_alert_state("no-such-id", AlertState::Attended, "admin-1".into(), None)
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));
}

#[tokio::test]
async fn test_recent_lists_newest_first() {
    let app = setup();
    for i in 0..3 {
        app.create_alert(
            format!("user-{i}"),
            AlertType::Panic,
            Some(format!("alerta {i}")),
            None,
            None,
            None,
            Some("Centro".into()),
            None,
            None,
            false,
        )
        .unwrap();
    }

    let recent = app.recent_alerts(1).unwrap();
    assert_eq!(recent.len(), 3);
    for pair in recent.windows(2) {
        assert!(pair[0].timestamp >= pair[1].timestamp);
    }
}

#[tokio::test]
async fn test_stats_counters() {
    let app = setup();
    app.create_alert(
        "user-1".into(),
        AlertType::Fire,
        None,
        None,
        None,
        None,
        None,
        None,
        None,
        false,
    )
    .unwrap();
    app.create_alert(
        "user-2".into(),
        AlertType::SilentPanic,
        None,
        None,
        None,
        None,
        None,
        None,
        None,
        true,
    )
    .unwrap();

    let stats = app.stats().unwrap();
    assert_eq!(stats.total, 2);
    assert_eq!(stats.active, 2);
    assert_eq!(stats.in_progress, 0);
    assert_eq!(stats.attended, 0);
    assert_eq!(stats.today, 2);
}
