use download_worker::{
    config::Config,
    host::{request_elevated, ElevatedExecutionRequest, ExecutionHost, TracingHost},
};

#[test]
fn request_carries_notification_fields() {
    let cfg = Config::default();
    let req = ElevatedExecutionRequest::from_config(&cfg);
    assert_eq!(req.title, "Download in progress");
    assert_eq!(req.body, "Downloading...");
    assert_eq!(req.channel_id, "download_channel");
    assert_eq!(req.icon, "ic_launcher_background");
}

#[tokio::test]
async fn tracing_host_grants_when_enabled() {
    let cfg = Config::default();
    let host = TracingHost::new(&cfg);
    let req = ElevatedExecutionRequest::from_config(&cfg);
    assert!(host.request_elevated_execution(&req).await.is_ok());
    assert!(request_elevated(&host, &req).await);
}

#[tokio::test]
async fn denial_is_swallowed() {
    let mut cfg = Config::default();
    cfg.notification.enabled = false;
    let host = TracingHost::new(&cfg);
    let req = ElevatedExecutionRequest::from_config(&cfg);
    let err = host.request_elevated_execution(&req).await.unwrap_err();
    assert!(err.to_string().contains("denied"));
    assert!(!request_elevated(&host, &req).await);
}
