use download_worker::{
    config::Config,
    fetch::FetchOutcome,
    policy::{classify, decide, TransportPolicy, Verdict, NETWORK_ERROR, UNKNOWN_ERROR},
};

fn no_body(status: u16) -> FetchOutcome {
    FetchOutcome::HttpError { status }
}

#[test]
fn body_is_persisted() {
    let cfg = Config::default();
    let o = FetchOutcome::BodyReceived {
        bytes: vec![1, 2, 3],
    };
    assert_eq!(decide(&cfg, &o), Verdict::Persist(&[1, 2, 3]));
}

#[test]
fn empty_body_is_still_persisted() {
    let cfg = Config::default();
    let o = FetchOutcome::BodyReceived { bytes: vec![] };
    assert_eq!(decide(&cfg, &o), Verdict::Persist(&[]));
}

#[test]
fn server_errors_retry() {
    let cfg = Config::default();
    for status in [500, 503, 599] {
        let o = no_body(status);
        assert_eq!(decide(&cfg, &o), Verdict::Retry, "status {status}");
    }
}

#[test]
fn client_errors_fail_with_network_error() {
    let cfg = Config::default();
    for status in [400, 401, 404, 499, 600, 302] {
        let o = no_body(status);
        assert_eq!(
            decide(&cfg, &o),
            Verdict::Fail(NETWORK_ERROR.to_string()),
            "status {status}"
        );
    }
}

#[test]
fn success_without_body_is_unknown_error() {
    let cfg = Config::default();
    for status in [200, 204] {
        let o = no_body(status);
        assert_eq!(decide(&cfg, &o), Verdict::Fail(UNKNOWN_ERROR.to_string()));
    }
}

#[test]
fn transport_errors_follow_config() {
    let o = FetchOutcome::TransportError {
        message: "connection reset".into(),
    };

    let mut cfg = Config::default();
    assert_eq!(decide(&cfg, &o), Verdict::Fail("connection reset".into()));

    cfg.classification.transport_errors = "retry".into();
    assert_eq!(decide(&cfg, &o), Verdict::Retry);

    cfg.classification.transport_errors = "bogus".into();
    assert_eq!(TransportPolicy::from_config(&cfg), TransportPolicy::Failure);
}

#[test]
fn classification_is_deterministic() {
    let outcomes = [
        FetchOutcome::BodyReceived { bytes: vec![9; 4] },
        no_body(200),
        no_body(404),
        no_body(503),
        FetchOutcome::TransportError {
            message: "dns".into(),
        },
        FetchOutcome::BodyReadError {
            message: "reset".into(),
        },
    ];
    for policy in [TransportPolicy::Failure, TransportPolicy::Retry] {
        for o in &outcomes {
            assert_eq!(classify(policy, o), classify(policy, o));
        }
    }
}

#[test]
fn body_read_errors_fail_under_every_transport_policy() {
    let o = FetchOutcome::BodyReadError {
        message: "connection closed before message completed".into(),
    };
    for policy in [TransportPolicy::Failure, TransportPolicy::Retry] {
        assert_eq!(
            classify(policy, &o),
            Verdict::Fail("connection closed before message completed".into())
        );
    }
}
