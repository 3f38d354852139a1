//! Device resolution: search by MAC, then enrich with detail, line and user.

use crate::api::ConfdApi;
use crate::error::ApiError;
use crate::model::{Device, EntityId, Line, User};

/// Return the first fetched item matching `predicate`.
///
/// Single place where associations are resolved client-side over a full
/// collection; a server-side filter can replace it without changing callers.
pub fn find_in_collection<T, P>(items: Vec<T>, predicate: P) -> Option<T>
where
    P: FnMut(&T) -> bool,
{
    items.into_iter().find(predicate)
}

/// Line currently associated with `device_id`.
pub async fn find_line_by_device_id(
    api: &dyn ConfdApi,
    device_id: &EntityId,
) -> Result<Option<Line>, ApiError> {
    let lines = api.list_lines().await?;
    Ok(find_in_collection(lines, |line| {
        line.device_id.as_ref() == Some(device_id)
    }))
}

/// User whose line associations include `line_id`.
pub async fn find_user_by_line_id(
    api: &dyn ConfdApi,
    line_id: &EntityId,
) -> Result<Option<User>, ApiError> {
    let users = api.list_users().await?;
    Ok(find_in_collection(users, |user| user.has_line(line_id)))
}

/// Line carrying extension `exten`.
pub async fn find_line_by_exten(
    api: &dyn ConfdApi,
    exten: &str,
) -> Result<Option<Line>, ApiError> {
    let lines = api.list_lines().await?;
    Ok(find_in_collection(lines, |line| line.has_exten(exten)))
}

/// Look up a device by MAC and enrich it with profile, line and user data.
///
/// Returns `Ok(None)` when the search matches nothing. A device without a
/// line is returned as-is with `line_exten` unset.
pub async fn resolve_device(api: &dyn ConfdApi, mac: &str) -> Result<Option<Device>, ApiError> {
    let search = api.search_devices(mac).await?;
    if search.total() == 0 {
        return Ok(None);
    }
    let Some(summary) = search.items.into_iter().next() else {
        return Ok(None);
    };

    let mut device = Device::from_summary(summary);
    let Some(device_id) = device.id.clone() else {
        tracing::warn!("Device matching {} has no id; skipping enrichment", mac);
        return Ok(Some(device));
    };

    let detail = api.get_device(&device_id).await?;
    device.label = Some(detail.label.clone().unwrap_or_else(|| "N/A".to_string()));
    device.profile = Some(detail.profile_name());

    let Some(line) = find_line_by_device_id(api, &device_id).await? else {
        tracing::warn!("No line found associated with device {}", device_id);
        return Ok(Some(device));
    };

    let user = find_user_by_line_id(api, &line.id).await?;

    device.line_exten = line.first_exten().map(str::to_string);
    device.line_id = Some(line.id);

    if let Some(user) = user {
        device.user_firstname = user.firstname;
        device.user_lastname = user.lastname;
    }

    Ok(Some(device))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeConfd;
    use serde_json::json;

    #[tokio::test]
    async fn test_returns_none_when_total_is_zero() {
        let api = FakeConfd::new().with_search(json!({"items": [], "total": 0}));

        let device = resolve_device(&api, "AA:BB:CC:DD:EE:FF").await.unwrap();
        assert!(device.is_none());
        assert_eq!(api.calls(), vec!["search AA:BB:CC:DD:EE:FF"]);
    }

    #[tokio::test]
    async fn test_full_enrichment() {
        let api = FakeConfd::new()
            .with_search(json!({"items": [{"id": 42, "tenant_uuid": "t-1", "mac": "aa:bb:cc:dd:ee:ff"}], "total": 1}))
            .with_detail(json!({"label": "Phone1", "model": "T46S"}))
            .with_lines(json!([
                {"id": 6, "device_id": "41", "extensions": [{"exten": "1000"}]},
                {"id": 7, "device_id": 42, "extensions": [{"exten": "1001"}]}
            ]))
            .with_users(json!([
                {"uuid": "u-0", "firstname": "Other", "lastname": "User", "lines": [{"id": 6}]},
                {"uuid": "u-1", "firstname": "Jane", "lastname": "Doe", "lines": [{"id": 7}]}
            ]));

        let device = resolve_device(&api, "AA:BB:CC:DD:EE:FF")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(device.id, Some(EntityId::from("42")));
        assert_eq!(device.label.as_deref(), Some("Phone1"));
        assert_eq!(device.tenant_uuid.as_deref(), Some("t-1"));
        assert_eq!(device.profile.as_deref(), Some("Model: T46S"));
        assert_eq!(device.line_id, Some(EntityId::from(7)));
        assert_eq!(device.line_exten.as_deref(), Some("1001"));
        assert_eq!(device.user_firstname.as_deref(), Some("Jane"));
        assert_eq!(device.user_lastname.as_deref(), Some("Doe"));
        assert_eq!(
            api.calls(),
            vec!["search AA:BB:CC:DD:EE:FF", "get_device 42", "list_lines", "list_users"]
        );
    }

    #[tokio::test]
    async fn test_no_line_is_not_an_error() {
        let api = FakeConfd::new()
            .with_search(json!({"items": [{"id": "42"}], "total": 1}))
            .with_detail(json!({"label": "Phone1", "template_id": "tpl"}))
            .with_lines(json!([{"id": 7, "device_id": "99", "extensions": [{"exten": "1001"}]}]));

        let device = resolve_device(&api, "AA:BB:CC:DD:EE:FF")
            .await
            .unwrap()
            .unwrap();

        assert!(device.line_exten.is_none());
        assert!(!device.is_linked());
        assert_eq!(device.profile.as_deref(), Some("Template ID: tpl"));
        assert!(!api.calls().contains(&"list_users".to_string()));
    }

    #[tokio::test]
    async fn test_line_without_extension_or_user() {
        let api = FakeConfd::new()
            .with_search(json!({"items": [{"id": "42"}], "total": 1}))
            .with_detail(json!({}))
            .with_lines(json!([{"id": 7, "device_id": "42", "extensions": []}]))
            .with_users(json!([]));

        let device = resolve_device(&api, "AA:BB:CC:DD:EE:FF")
            .await
            .unwrap()
            .unwrap();

        assert!(device.is_linked());
        assert!(device.line_exten.is_none());
        assert!(device.user_firstname.is_none());
        assert_eq!(device.label.as_deref(), Some("N/A"));
        assert_eq!(device.profile.as_deref(), Some("N/A"));
    }

    #[tokio::test]
    async fn test_device_without_id_skips_enrichment() {
        let api = FakeConfd::new().with_search(json!({"items": [{"mac": "aa:bb"}], "total": 1}));

        let device = resolve_device(&api, "AA:BB:CC:DD:EE:FF")
            .await
            .unwrap()
            .unwrap();
        assert!(device.id.is_none());
        assert_eq!(api.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_transport_error_aborts() {
        let api = FakeConfd::new()
            .with_search(json!({"items": [{"id": "42"}], "total": 1}))
            .with_detail(json!({"label": "Phone1"}))
            .failing_on("list_lines");

        let result = resolve_device(&api, "AA:BB:CC:DD:EE:FF").await;
        assert!(matches!(result, Err(ApiError::Status { status: 500, .. })));
    }

    #[tokio::test]
    async fn test_find_line_by_exten() {
        let api = FakeConfd::new().with_lines(json!([
            {"id": 3, "extensions": [{"exten": "1002"}]},
            {"id": 4, "extensions": [{"exten": "1003"}, {"exten": "1000"}]}
        ]));

        let line = find_line_by_exten(&api, "1000").await.unwrap().unwrap();
        assert_eq!(line.id, EntityId::from(4));
        assert!(find_line_by_exten(&api, "2000").await.unwrap().is_none());
    }

    #[test]
    fn test_find_in_collection_returns_first_match() {
        let found = find_in_collection(vec![1, 4, 6, 8], |n| n % 2 == 0);
        assert_eq!(found, Some(4));
        assert_eq!(find_in_collection(Vec::<i32>::new(), |_| true), None);
    }
}
