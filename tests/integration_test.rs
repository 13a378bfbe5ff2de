use drmid::channel::{
    ErrorCode, IdentityChannel, MethodCall, MethodResponse, METHOD_GET_SECURE_HARDWARE_ID,
    UNAVAILABLE_MESSAGE,
};
use drmid::model::{ApiLevel, Digest};
use drmid::{EncodedIdentifier, SimulatedKeySystem};

#[test]
fn test_derive_matches_independent_sha256_base64() {
    let raw = b"\x01\x23\x45\x67\x89\xab\xcd\xef\x01\x23\x45\x67\x89\xab\xcd\xef".to_vec();
    let key_system = SimulatedKeySystem::new(raw.clone());

    let id = drmid::get_secure_hardware_id_from(&key_system).unwrap();

    assert_eq!(id, drmid::encode(&drmid::sha256(&raw), ApiLevel::P).unwrap());
    assert_eq!(id.as_str().len(), EncodedIdentifier::LENGTH);
    assert_eq!(drmid::decode(id.as_str()).unwrap(), drmid::sha256(&raw));
}

#[test]
fn test_channel_scenarios() {
    let get_id = MethodCall::new(METHOD_GET_SECURE_HARDWARE_ID);

    let device = IdentityChannel::new(SimulatedKeySystem::new(vec![0u8; 16]));
    let first = device.handle(&get_id);
    let second = device.handle(&get_id);
    assert_eq!(first, second);
    assert_eq!(device.key_system().ledger().opened, 2);
    assert_eq!(device.key_system().ledger().closed, 2);

    let no_id = IdentityChannel::new(SimulatedKeySystem::new(Vec::new()));
    assert_eq!(
        no_id.handle(&get_id),
        MethodResponse::error(ErrorCode::Unavailable, UNAVAILABLE_MESSAGE)
    );

    let unsupported = IdentityChannel::new(
        SimulatedKeySystem::new(vec![0u8; 16]).failing_open("UnsupportedSchemeException"),
    );
    assert!(matches!(
        unsupported.handle(&get_id),
        MethodResponse::Error {
            code: ErrorCode::Error,
            ..
        }
    ));

    assert_eq!(
        device.handle(&MethodCall::new("getSecureHardwareID")),
        MethodResponse::NotImplemented
    );
}

#[test]
fn test_encoded_identifier_round_trips_through_text() {
    let key_system = SimulatedKeySystem::new(vec![0xaa; 20]).with_api_level(ApiLevel::new(22));
    let id = drmid::get_secure_hardware_id_from(&key_system).unwrap();

    let parsed: EncodedIdentifier = id.as_str().parse().unwrap();
    let digest: Digest = parsed.to_digest().unwrap();

    assert_eq!(parsed, id);
    assert_eq!(digest, drmid::sha256(&[0xaa; 20]));
    assert_eq!(key_system.ledger().released, 1);
}
